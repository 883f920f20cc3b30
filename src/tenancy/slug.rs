use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 50;

/// Slug addressing one tenant's public profile. Lowercase alphanumeric with
/// hyphens, 3 to 50 characters. Comparison is case-sensitive; normalization
/// happens at onboarding, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantSlug(String);

impl TenantSlug {
    pub fn parse(raw: impl Into<String>) -> Result<Self, SlugError> {
        let raw = raw.into();
        if raw.len() < MIN_LEN {
            return Err(SlugError::TooShort(raw.len()));
        }
        if raw.len() > MAX_LEN {
            return Err(SlugError::TooLong(raw.len()));
        }
        if let Some(offending) = raw
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(offending));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TenantSlug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TenantSlug> for String {
    fn from(value: TenantSlug) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug must be at least {MIN_LEN} characters, got {0}")]
    TooShort(usize),
    #[error("slug must be at most {MAX_LEN} characters, got {0}")]
    TooLong(usize),
    #[error("slug may only contain lowercase letters, digits, and hyphens; found {0:?}")]
    InvalidCharacter(char),
}
