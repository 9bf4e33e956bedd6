use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use serde::Deserialize;

/// One model release to document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelSpec {
    /// Published model identifier, e.g. `h2ogpt-oasst1-256-20b`
    pub model_name: String,
    /// Hub reference of the model this one was fine-tuned from
    pub base_model: String,
    /// Hub reference of the training dataset
    pub dataset: String,
    /// URL of the archived training logs
    pub training_logs: String,
}

impl ModelSpec {
    pub fn new(
        model_name: impl Into<String>,
        base_model: impl Into<String>,
        dataset: impl Into<String>,
        training_logs: impl Into<String>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            base_model: base_model.into(),
            dataset: dataset.into(),
            training_logs: training_logs.into(),
        }
    }
}

/// Text renderings of a loaded model, as inserted into the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifact {
    /// Structural dump of the model
    pub arch_text: String,
    /// Dump of the model's configuration object
    pub config_text: String,
}

/// Errors raised while generating a model card.
///
/// Every variant carries the model name so a batch report can tell which
/// release failed and at which check.
#[derive(Debug)]
pub enum CardError {
    /// The size label derived from the model name is malformed
    NamingConvention {
        model_name: String,
        label: String,
        reason: String,
    },
    /// A required placeholder is absent from the template
    MissingPlaceholder {
        model_name: String,
        placeholder: &'static str,
    },
    /// Placeholder markers are left over after every substitution ran
    ResidualPlaceholder {
        model_name: String,
        remaining: Vec<String>,
    },
    /// The model artifact could not be resolved or fetched
    ArtifactLoad {
        model_name: String,
        reason: String,
    },
    /// The template file could not be read
    Template {
        model_name: String,
        path: PathBuf,
        source: std::io::Error,
    },
    /// Creating the output directory or writing the card failed
    Filesystem {
        model_name: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CardError {
    /// Short name of the failed check, used in summary tables.
    pub fn kind(&self) -> &'static str {
        match self {
            CardError::NamingConvention { .. } => "naming convention",
            CardError::MissingPlaceholder { .. } => "missing placeholder",
            CardError::ResidualPlaceholder { .. } => "residual placeholder",
            CardError::ArtifactLoad { .. } => "artifact load",
            CardError::Template { .. } => "template",
            CardError::Filesystem { .. } => "filesystem",
        }
    }

    pub(crate) fn artifact(model_name: &str, reason: impl Into<String>) -> Self {
        CardError::ArtifactLoad {
            model_name: model_name.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CardError::NamingConvention { model_name, label, reason } => write!(
                f,
                "{}: size label '{}' breaks the naming convention: {}",
                model_name, label, reason
            ),
            CardError::MissingPlaceholder { model_name, placeholder } => write!(
                f,
                "{}: template does not contain required placeholder {}",
                model_name, placeholder
            ),
            CardError::ResidualPlaceholder { model_name, remaining } => {
                if remaining.is_empty() {
                    write!(f, "{}: rendered card still contains '<<' or '>>' markers", model_name)
                } else {
                    write!(
                        f,
                        "{}: rendered card still contains placeholders: {}",
                        model_name,
                        remaining.join(", ")
                    )
                }
            }
            CardError::ArtifactLoad { model_name, reason } => {
                write!(f, "{}: failed to load model artifact: {}", model_name, reason)
            }
            CardError::Template { model_name, path, source } => {
                write!(f, "{}: failed to read template {}: {}", model_name, path.display(), source)
            }
            CardError::Filesystem { model_name, path, source } => {
                write!(f, "{}: failed to write {}: {}", model_name, path.display(), source)
            }
        }
    }
}

impl Error for CardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CardError::Template { source, .. } | CardError::Filesystem { source, .. } => Some(source),
            _ => None,
        }
    }
}
