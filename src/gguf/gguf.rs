use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::collections::BTreeMap;
use byteorder::{LittleEndian, ReadBytesExt};
use super::types::{GGUFValue, GGUFError, GGUFValueType, TensorInfo};
use super::gguf_utils::{self, is_gguf_file, read_len, GGUF_MAGIC};
use tracing::{info, debug};

/// Header, metadata and tensor directory of a GGUF file. Tensor data is never read.
pub struct GGUFReader {
    /// Path to the GGUF file
    pub path: PathBuf,
    /// Format version from the header
    pub version: u32,
    /// Metadata key-value pairs with their declared value type
    pub metadata: BTreeMap<String, (GGUFValueType, GGUFValue)>,
    /// Information about each tensor
    pub tensors: Vec<TensorInfo>,
}

impl GGUFReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let path = path.as_ref();

        if !is_gguf_file(path) {
            return Err(Box::new(GGUFError::InvalidFormat("Invalid magic number".into())));
        }

        let mut file = BufReader::new(File::open(path)?);
        let mut reader = Self::from_reader(&mut file)?;
        reader.path = path.to_path_buf();
        Ok(reader)
    }

    /// Parses a GGUF stream positioned at the magic number.
    pub fn from_reader<R: Read>(input: &mut R) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let magic = input.read_u32::<LittleEndian>()?;
        if magic != GGUF_MAGIC {
            return Err(Box::new(GGUFError::InvalidFormat(format!("Invalid magic number: {:#x}", magic))));
        }

        let version = input.read_u32::<LittleEndian>()?;
        let tensor_count = read_len(input, version)?;
        let metadata_count = read_len(input, version)?;

        debug!("Reading GGUF v{}: {} tensors, {} metadata entries", version, tensor_count, metadata_count);

        let mut metadata = BTreeMap::new();
        for _ in 0..metadata_count {
            let key = gguf_utils::read_string(input, version)?;
            let value_type = GGUFValueType::try_from(input.read_u32::<LittleEndian>()?)?;
            let value = gguf_utils::read_value_by_type(input, value_type, version)?;
            metadata.insert(key, (value_type, value));
        }

        let tensors = read_tensor_info(input, tensor_count, version)?;

        info!("Read {} metadata entries and {} tensors from GGUF file", metadata.len(), tensors.len());

        Ok(Self {
            path: PathBuf::new(),
            version,
            metadata,
            tensors,
        })
    }

    pub fn get_metadata_value(&self, key: &str) -> Result<&GGUFValue, GGUFError> {
        match self.metadata.get(key) {
            Some((_, value)) => Ok(value),
            None => Err(GGUFError::MetadataNotFound(key.to_string())),
        }
    }

    /// Value of `general.architecture`, e.g. `llama` or `gptneox`.
    pub fn architecture(&self) -> Option<&str> {
        self.get_metadata_value("general.architecture").ok().and_then(|v| v.as_str())
    }
}

fn read_tensor_info<R: Read>(input: &mut R, tensor_count: u64, version: u32) -> Result<Vec<TensorInfo>, Box<dyn Error + Send + Sync>> {
    let mut tensors = Vec::with_capacity(tensor_count.min(4096) as usize);

    for _ in 0..tensor_count {
        let name = gguf_utils::read_string(input, version)?;

        let n_dims = input.read_u32::<LittleEndian>()?;
        let mut dims = Vec::with_capacity(n_dims.min(8) as usize);
        for _ in 0..n_dims {
            dims.push(read_len(input, version)?);
        }

        let data_type = input.read_u32::<LittleEndian>()?;
        let offset = input.read_u64::<LittleEndian>()?;

        tensors.push(TensorInfo {
            name,
            dims,
            data_type: data_type.into(),
            offset,
        });
    }

    Ok(tensors)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::{Cursor, Write};

    fn write_string(buf: &mut Vec<u8>, s: &str) {
        buf.write_u64::<LittleEndian>(s.len() as u64).unwrap();
        buf.write_all(s.as_bytes()).unwrap();
    }

    /// Builds a small v3 GGUF image with a few metadata keys and two tensors.
    pub(crate) fn sample_gguf() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_u32::<LittleEndian>(GGUF_MAGIC).unwrap();
        buf.write_u32::<LittleEndian>(3).unwrap();
        buf.write_u64::<LittleEndian>(2).unwrap();
        buf.write_u64::<LittleEndian>(3).unwrap();

        write_string(&mut buf, "general.architecture");
        buf.write_u32::<LittleEndian>(GGUFValueType::STRING as u32).unwrap();
        write_string(&mut buf, "llama");

        write_string(&mut buf, "llama.block_count");
        buf.write_u32::<LittleEndian>(GGUFValueType::UINT32 as u32).unwrap();
        buf.write_u32::<LittleEndian>(32).unwrap();

        write_string(&mut buf, "tokenizer.ggml.scores");
        buf.write_u32::<LittleEndian>(GGUFValueType::ARRAY as u32).unwrap();
        buf.write_u32::<LittleEndian>(GGUFValueType::FLOAT32 as u32).unwrap();
        buf.write_u64::<LittleEndian>(20).unwrap();
        for i in 0..20 {
            buf.write_f32::<LittleEndian>(i as f32).unwrap();
        }

        write_string(&mut buf, "token_embd.weight");
        buf.write_u32::<LittleEndian>(2).unwrap();
        buf.write_u64::<LittleEndian>(4096).unwrap();
        buf.write_u64::<LittleEndian>(32000).unwrap();
        buf.write_u32::<LittleEndian>(12).unwrap();
        buf.write_u64::<LittleEndian>(0).unwrap();

        write_string(&mut buf, "output_norm.weight");
        buf.write_u32::<LittleEndian>(1).unwrap();
        buf.write_u64::<LittleEndian>(4096).unwrap();
        buf.write_u32::<LittleEndian>(0).unwrap();
        buf.write_u64::<LittleEndian>(1024).unwrap();

        buf
    }

    #[test]
    fn test_parse_sample() {
        let reader = GGUFReader::from_reader(&mut Cursor::new(sample_gguf())).unwrap();
        assert_eq!(reader.version, 3);
        assert_eq!(reader.architecture(), Some("llama"));
        assert_eq!(reader.get_metadata_value("llama.block_count").unwrap().as_int(), Some(32));
        assert_eq!(reader.tensors.len(), 2);
        assert_eq!(reader.tensors[0].to_string(), "token_embd.weight [4096 x 32000] Q4_K");
        assert_eq!(reader.tensors[1].offset, 1024);
    }

    #[test]
    fn test_missing_key() {
        let reader = GGUFReader::from_reader(&mut Cursor::new(sample_gguf())).unwrap();
        assert!(matches!(
            reader.get_metadata_value("general.name"),
            Err(GGUFError::MetadataNotFound(_))
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut data = sample_gguf();
        data[0] = b'X';
        assert!(GGUFReader::from_reader(&mut Cursor::new(data)).is_err());
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.gguf");
        std::fs::write(&path, sample_gguf()).unwrap();
        let reader = GGUFReader::new(&path).unwrap();
        assert_eq!(reader.path, path);
        assert_eq!(reader.metadata.len(), 3);
    }

    #[test]
    fn test_non_gguf_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.gguf");
        std::fs::write(&path, b"not a model").unwrap();
        assert!(GGUFReader::new(&path).is_err());
    }
}
