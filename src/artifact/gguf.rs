use std::path::PathBuf;
use tracing::info;
use crate::card::{CardError, ModelArtifact};
use crate::gguf::{is_gguf_file, GGUFReader};
use super::ArtifactProvider;

/// Arrays longer than this are cut short in the config dump.
const ARRAY_PREVIEW: usize = 16;

/// Reads `<directory>/<model_name>.gguf` and dumps its header.
pub struct GgufProvider {
    directory: PathBuf,
}

impl GgufProvider {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.directory.join(format!("{}.gguf", model_name))
    }
}

/// One line per tensor under a header naming the architecture.
pub(crate) fn tensor_listing(reader: &GGUFReader) -> String {
    let mut out = format!(
        "{} (GGUF v{}, {} tensors)\n",
        reader.architecture().unwrap_or("unknown"),
        reader.version,
        reader.tensors.len()
    );
    for tensor in &reader.tensors {
        out.push_str(&format!("  {}\n", tensor));
    }
    out
}

/// Metadata as `key: type = value` lines, sorted by key.
pub(crate) fn metadata_listing(reader: &GGUFReader) -> String {
    reader
        .metadata
        .iter()
        .map(|(key, (value_type, value))| {
            format!("{}: {} = {}\n", key, value_type, value.display_truncated(ARRAY_PREVIEW))
        })
        .collect()
}

impl ArtifactProvider for GgufProvider {
    fn name(&self) -> &str {
        "gguf"
    }

    fn load(&self, model_name: &str) -> Result<ModelArtifact, CardError> {
        let path = self.model_path(model_name);
        if !path.is_file() {
            return Err(CardError::artifact(model_name, format!("{} not found", path.display())));
        }
        if !is_gguf_file(&path) {
            return Err(CardError::artifact(model_name, format!("{} is not a GGUF file", path.display())));
        }

        let reader = GGUFReader::new(&path)
            .map_err(|e| CardError::artifact(model_name, format!("{}: {}", path.display(), e)))?;
        info!("Loaded {} ({} tensors)", path.display(), reader.tensors.len());

        Ok(ModelArtifact {
            arch_text: tensor_listing(&reader),
            config_text: metadata_listing(&reader),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gguf::sample_gguf;

    #[test]
    fn test_load_dumps_tensors_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let provider = GgufProvider::new(dir.path());
        std::fs::write(provider.model_path("tiny-7b"), sample_gguf()).unwrap();

        let artifact = provider.load("tiny-7b").unwrap();
        assert_eq!(
            artifact.arch_text,
            "llama (GGUF v3, 2 tensors)\n  token_embd.weight [4096 x 32000] Q4_K\n  output_norm.weight [4096] F32\n"
        );

        let lines: Vec<&str> = artifact.config_text.lines().collect();
        assert_eq!(lines[0], "general.architecture: str = \"llama\"");
        assert_eq!(lines[1], "llama.block_count: u32 = 32");
        assert!(lines[2].starts_with("tokenizer.ggml.scores: arr = [0, 1, 2"));
        assert!(lines[2].ends_with("... out of 20]"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GgufProvider::new(dir.path()).load("absent-7b").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_not_gguf() {
        let dir = tempfile::tempdir().unwrap();
        let provider = GgufProvider::new(dir.path());
        std::fs::write(provider.model_path("junk-7b"), b"plain text").unwrap();
        let err = provider.load("junk-7b").unwrap_err();
        assert!(err.to_string().contains("is not a GGUF file"));
    }
}
