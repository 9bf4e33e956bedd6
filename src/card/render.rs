use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use super::size::SizeLabel;
use super::types::{CardError, ModelArtifact, ModelSpec};

/// Base URL used to turn hub references into markdown links.
pub const HUB_URL: &str = "https://huggingface.co";

/// Placeholder tokens in the order they are substituted.
pub const PLACEHOLDERS: [&str; 7] = [
    "<<MODEL_NAME>>",
    "<<MODEL_SIZE>>",
    "<<BASE_MODEL>>",
    "<<DATASET>>",
    "<<MODEL_ARCH>>",
    "<<MODEL_CONFIG>>",
    "<<TRAINING_LOGS>>",
];

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<<[^<>\s]*>>").expect("placeholder pattern is valid")
});

/// Formats a hub reference as `[name](https://huggingface.co/name)`.
pub fn hub_link(reference: &str) -> String {
    format!("[{}]({}/{})", reference, HUB_URL, reference)
}

/// Lists the distinct `<<...>>` tokens present in `content`, in order of appearance.
pub fn find_tokens(content: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for m in TOKEN_RE.find_iter(content) {
        if !tokens.iter().any(|t| t == m.as_str()) {
            tokens.push(m.as_str().to_string());
        }
    }
    tokens
}

/// Result of checking a template without rendering it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TemplateReport {
    /// Required placeholders the template lacks
    pub missing: Vec<&'static str>,
    /// Tokens that no substitution would replace
    pub unknown: Vec<String>,
}

impl TemplateReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty()
    }
}

/// Reports which required placeholders are missing and which unknown tokens are present.
pub fn check_template(template: &str) -> TemplateReport {
    TemplateReport {
        missing: PLACEHOLDERS
            .iter()
            .copied()
            .filter(|p| !template.contains(p))
            .collect(),
        unknown: find_tokens(template)
            .into_iter()
            .filter(|t| !PLACEHOLDERS.contains(&t.as_str()))
            .collect(),
    }
}

/// Substitutes every placeholder in `template` and returns the finished card.
///
/// Placeholders are replaced one at a time in [`PLACEHOLDERS`] order, each
/// checked for presence against the content produced so far. A value that
/// itself contains a later token will have it replaced too.
pub fn render_card(
    template: &str,
    spec: &ModelSpec,
    size: &SizeLabel,
    artifact: &ModelArtifact,
) -> Result<String, CardError> {
    let values = [
        spec.model_name.clone(),
        size.numeric().to_string(),
        hub_link(&spec.base_model),
        hub_link(&spec.dataset),
        artifact.arch_text.clone(),
        artifact.config_text.clone(),
        spec.training_logs.clone(),
    ];

    let mut content = template.to_string();
    for (placeholder, value) in PLACEHOLDERS.into_iter().zip(values.iter()) {
        if !content.contains(placeholder) {
            return Err(CardError::MissingPlaceholder {
                model_name: spec.model_name.clone(),
                placeholder,
            });
        }
        debug!("Substituting {} for {}", placeholder, spec.model_name);
        content = content.replace(placeholder, value);
    }

    if content.contains("<<") || content.contains(">>") {
        return Err(CardError::ResidualPlaceholder {
            model_name: spec.model_name.clone(),
            remaining: find_tokens(&content),
        });
    }

    Ok(content)
}
