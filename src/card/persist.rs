use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use super::types::CardError;

/// File name of the generated card inside the model directory.
pub const CARD_FILE: &str = "README.md";

/// Path the card for `model_name` is written to under `output_root`.
pub fn card_path(output_root: &Path, model_name: &str) -> PathBuf {
    output_root.join(model_name).join(CARD_FILE)
}

/// Writes `card` to `<output_root>/<model_name>/README.md`.
///
/// The model directory is created when missing and an existing card is
/// overwritten.
pub fn persist_card(output_root: &Path, model_name: &str, card: &str) -> Result<PathBuf, CardError> {
    let dir = output_root.join(model_name);
    fs::create_dir_all(&dir).map_err(|source| CardError::Filesystem {
        model_name: model_name.to_string(),
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(CARD_FILE);
    fs::write(&path, card).map_err(|source| CardError::Filesystem {
        model_name: model_name.to_string(),
        path: path.clone(),
        source,
    })?;

    info!("Wrote model card: {}", path.display());
    Ok(path)
}
