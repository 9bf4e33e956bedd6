use std::fs::File;
use std::path::Path;
use std::io::Read;
use byteorder::{LittleEndian, ReadBytesExt};
use super::types::{GGUFValue, GGUFError, GGUFValueType};
use std::error::Error;

/// The magic number that identifies GGUF files
pub const GGUF_MAGIC: u32 = 0x46554747; // "GGUF" in ASCII

/// Upper bound on a single string or array length, guards against corrupt headers
const MAX_LEN: u64 = 1 << 32;

/// Deepest array nesting accepted in a metadata value
pub const MAX_ARRAY_DEPTH: usize = 8;

/// Read a length or count field. Version 1 files use 32-bit fields, later versions 64-bit.
pub fn read_len<R: Read>(reader: &mut R, version: u32) -> Result<u64, Box<dyn Error + Send + Sync>> {
    let len = if version >= 2 {
        reader.read_u64::<LittleEndian>()?
    } else {
        reader.read_u32::<LittleEndian>()? as u64
    };
    if len > MAX_LEN {
        return Err(Box::new(GGUFError::InvalidFormat(format!("Length {} out of range", len))));
    }
    Ok(len)
}

/// Read a length-prefixed UTF-8 string
pub fn read_string<R: Read>(reader: &mut R, version: u32) -> Result<String, Box<dyn Error + Send + Sync>> {
    let str_len = read_len(reader, version)?;

    let mut buffer = Vec::new();
    reader.by_ref().take(str_len).read_to_end(&mut buffer)?;
    if buffer.len() as u64 != str_len {
        return Err(Box::new(GGUFError::InvalidFormat(
            format!("String truncated: expected {} bytes, got {}", str_len, buffer.len())
        )));
    }

    let string = String::from_utf8(buffer)
        .map_err(|e| Box::new(GGUFError::InvalidFormat(format!("Invalid UTF-8 in string: {}", e))))?;

    Ok(string)
}

/// Read a GGUF value of the specified type, including nested arrays
pub fn read_value_by_type<R: Read>(reader: &mut R, value_type: GGUFValueType, version: u32) -> Result<GGUFValue, Box<dyn Error + Send + Sync>> {
    read_value_at_depth(reader, value_type, version, 0)
}

fn read_value_at_depth<R: Read>(reader: &mut R, value_type: GGUFValueType, version: u32, depth: usize) -> Result<GGUFValue, Box<dyn Error + Send + Sync>> {
    let value = match value_type {
        GGUFValueType::UINT8 => GGUFValue::Int(reader.read_u8()? as i64),
        GGUFValueType::INT8 => GGUFValue::Int(reader.read_i8()? as i64),
        GGUFValueType::UINT16 => GGUFValue::Int(reader.read_u16::<LittleEndian>()? as i64),
        GGUFValueType::INT16 => GGUFValue::Int(reader.read_i16::<LittleEndian>()? as i64),
        GGUFValueType::UINT32 => GGUFValue::Int(reader.read_u32::<LittleEndian>()? as i64),
        GGUFValueType::INT32 => GGUFValue::Int(reader.read_i32::<LittleEndian>()? as i64),
        GGUFValueType::FLOAT32 => GGUFValue::Float(reader.read_f32::<LittleEndian>()? as f64),
        GGUFValueType::BOOL => GGUFValue::Bool(reader.read_u8()? != 0),
        GGUFValueType::STRING => GGUFValue::String(read_string(reader, version)?),
        GGUFValueType::UINT64 => GGUFValue::Int(reader.read_u64::<LittleEndian>()? as i64),
        GGUFValueType::INT64 => GGUFValue::Int(reader.read_i64::<LittleEndian>()?),
        GGUFValueType::FLOAT64 => GGUFValue::Float(reader.read_f64::<LittleEndian>()?),
        GGUFValueType::ARRAY => {
            if depth >= MAX_ARRAY_DEPTH {
                return Err(Box::new(GGUFError::InvalidFormat(
                    format!("Arrays nested deeper than {} levels", MAX_ARRAY_DEPTH)
                )));
            }
            // Element type first, then the element count
            let element_type = GGUFValueType::try_from(reader.read_u32::<LittleEndian>()?)?;
            let arr_len = read_len(reader, version)?;
            let mut array = Vec::with_capacity(arr_len.min(4096) as usize);
            for _ in 0..arr_len {
                array.push(read_value_at_depth(reader, element_type, version, depth + 1)?);
            }
            GGUFValue::Array(array)
        }
    };
    Ok(value)
}

/// Checks if a file at the given path is a GGUF format file by verifying its magic number.
///
/// # Arguments
///
/// * `path` - Path to the file to check
///
/// # Returns
///
/// `true` if the file exists and has a valid GGUF magic number, `false` otherwise
pub fn is_gguf_file<P: AsRef<Path>>(path: P) -> bool {
    if let Ok(mut file) = File::open(path) {
        if let Ok(magic) = file.read_u32::<LittleEndian>() {
            return magic == GGUF_MAGIC;
        }
    }
    false
}
