mod generator;
mod persist;
mod render;
mod size;
mod types;

pub use generator::{CardGenerator, CardOutcome, RenderedCard};
pub use persist::{card_path, persist_card, CARD_FILE};
pub use render::{check_template, find_tokens, hub_link, render_card, TemplateReport, HUB_URL, PLACEHOLDERS};
pub use size::SizeLabel;
pub use types::{CardError, ModelArtifact, ModelSpec};
