use std::fmt;
use super::types::CardError;

/// Parameter-count label taken from the tail of a model name, e.g. `20B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeLabel(String);

impl SizeLabel {
    /// Derives the label from the last `-`-separated segment of `model_name`.
    ///
    /// The label must end in `B` and the character right before the `B` must
    /// be a decimal digit. Only that one character is checked, so `x-1.5b`
    /// and `x-a1b` both pass.
    pub fn derive(model_name: &str) -> Result<Self, CardError> {
        let label = model_name
            .rsplit('-')
            .next()
            .unwrap_or_default()
            .to_uppercase();

        let invalid = |reason: &str| CardError::NamingConvention {
            model_name: model_name.to_string(),
            label: label.clone(),
            reason: reason.to_string(),
        };

        let mut chars = label.chars().rev();
        if chars.next() != Some('B') {
            return Err(invalid("label must end in 'B'"));
        }
        match chars.next() {
            Some(c) if c.is_ascii_digit() => {}
            Some(c) => return Err(invalid(&format!("'{}' before 'B' is not a digit", c))),
            None => return Err(invalid("no digit before 'B'")),
        }

        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The label without its trailing `B`, as printed in the card.
    pub fn numeric(&self) -> &str {
        &self.0[..self.0.len() - 1]
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
