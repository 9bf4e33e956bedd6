//! Model card generation for published language models.
//!
//! A card is rendered from a markdown template by substituting a fixed set
//! of `<<PLACEHOLDER>>` tokens with the model's name, size, provenance links
//! and the architecture and configuration dumps of the loaded model.

pub mod artifact;
pub mod card;
pub mod config;
pub mod gguf;
