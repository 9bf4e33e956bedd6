use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};
use crate::artifact::ArtifactProvider;
use super::persist::{card_path, persist_card};
use super::render::render_card;
use super::size::SizeLabel;
use super::types::{CardError, ModelSpec};

/// A fully rendered card that has not been written yet.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub model_name: String,
    pub size: SizeLabel,
    pub content: String,
}

/// Outcome of one spec in a batch run.
#[derive(Debug)]
pub struct CardOutcome {
    pub model_name: String,
    pub elapsed: Duration,
    /// Path of the written card, or the target path on a dry run
    pub result: Result<PathBuf, CardError>,
}

impl CardOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Renders model cards from a template and writes them under an output root.
pub struct CardGenerator<'a> {
    template_path: PathBuf,
    output_root: PathBuf,
    provider: &'a dyn ArtifactProvider,
}

impl<'a> CardGenerator<'a> {
    pub fn new(
        template_path: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        provider: &'a dyn ArtifactProvider,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            output_root: output_root.into(),
            provider,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Reads the template from disk. Done per card so edits between runs are picked up.
    pub fn read_template(&self, model_name: &str) -> Result<String, CardError> {
        fs::read_to_string(&self.template_path).map_err(|source| CardError::Template {
            model_name: model_name.to_string(),
            path: self.template_path.clone(),
            source,
        })
    }

    /// Runs every check and substitution for `spec` without touching the output directory.
    pub fn render(&self, spec: &ModelSpec) -> Result<RenderedCard, CardError> {
        let size = SizeLabel::derive(&spec.model_name)?;
        info!("{}: size label {}", spec.model_name, size);

        info!("{}: loading artifact via {} provider", spec.model_name, self.provider.name());
        let artifact = self.provider.load(&spec.model_name)?;

        let template = self.read_template(&spec.model_name)?;
        let content = render_card(&template, spec, &size, &artifact)?;

        Ok(RenderedCard {
            model_name: spec.model_name.clone(),
            size,
            content,
        })
    }

    /// Renders and writes the card for `spec`, returning the written path.
    ///
    /// Nothing is written unless rendering succeeded completely.
    pub fn generate(&self, spec: &ModelSpec) -> Result<PathBuf, CardError> {
        let card = self.render(spec)?;
        persist_card(&self.output_root, &card.model_name, &card.content)
    }

    /// Processes each spec independently, in order.
    ///
    /// A failing spec is logged and recorded in its outcome; the remaining
    /// specs still run. With `dry_run` set cards are rendered but not written.
    pub fn generate_all(&self, specs: &[ModelSpec], dry_run: bool) -> Vec<CardOutcome> {
        specs
            .iter()
            .map(|spec| {
                let started = Instant::now();
                let result = if dry_run {
                    self.render(spec)
                        .map(|card| card_path(&self.output_root, &card.model_name))
                } else {
                    self.generate(spec)
                };
                if let Err(e) = &result {
                    error!("Card generation failed: {}", e);
                }
                CardOutcome {
                    model_name: spec.model_name.clone(),
                    elapsed: started.elapsed(),
                    result,
                }
            })
            .collect()
    }
}
