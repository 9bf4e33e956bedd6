//! Sources of the architecture and configuration text inserted into a card.
//!
//! The generator only sees the [`ArtifactProvider`] trait, so rendering can
//! be exercised with a stub while the real providers talk to the model hub
//! or read local GGUF files.

mod gguf;
mod hub;
mod outline;

pub use gguf::GgufProvider;
pub use hub::HubProvider;
pub use outline::{architecture_outline, config_class_name, config_dump};

use crate::card::{CardError, ModelArtifact};

/// Resolves a model name to the text dumps that go into its card.
pub trait ArtifactProvider {
    /// Short name used in logs, e.g. `hub`.
    fn name(&self) -> &str;

    /// Loads the model named `model_name` and renders its structure and configuration.
    fn load(&self, model_name: &str) -> Result<ModelArtifact, CardError>;
}
