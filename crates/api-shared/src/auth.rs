//! API-key validation shared by every HTTP surface.

use subtle::ConstantTimeEq;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing api key")]
    Missing,
    #[error("invalid api key")]
    Invalid,
}

/// Accepted API keys, resolved once at startup.
///
/// Empty keys are dropped on construction, so an unconfigured gateway rejects every caller.
#[derive(Clone, Default)]
pub struct ApiKeys {
    keys: Vec<String>,
}

impl ApiKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(Into::into)
                .map(|k| k.trim().to_owned())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Validates the provided key against every accepted key in constant time.
    ///
    /// Surrounding whitespace in `provided` is ignored.
    pub fn validate(&self, provided: Option<&str>) -> Result<(), AuthError> {
        let provided = provided.map(str::trim).unwrap_or_default();
        if provided.is_empty() || self.keys.is_empty() {
            return Err(AuthError::Missing);
        }

        let matched = self.keys.iter().fold(subtle::Choice::from(0u8), |acc, key| {
            acc | key.as_bytes().ct_eq(provided.as_bytes())
        });

        if bool::from(matched) {
            Ok(())
        } else {
            Err(AuthError::Invalid)
        }
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("count", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_configured_key() {
        let keys = ApiKeys::new(["primary", "secondary"]);
        assert_eq!(keys.validate(Some("primary")), Ok(()));
        assert_eq!(keys.validate(Some(" secondary ")), Ok(()));
    }

    #[test]
    fn rejects_wrong_or_missing_key() {
        let keys = ApiKeys::new(["primary"]);
        assert_eq!(keys.validate(Some("nope")), Err(AuthError::Invalid));
        assert_eq!(keys.validate(Some("primar")), Err(AuthError::Invalid));
        assert_eq!(keys.validate(Some("  ")), Err(AuthError::Missing));
        assert_eq!(keys.validate(None), Err(AuthError::Missing));
    }

    #[test]
    fn no_configured_keys_rejects_everyone() {
        let keys = ApiKeys::new(["", "  "]);
        assert!(keys.is_empty());
        assert_eq!(keys.validate(Some("anything")), Err(AuthError::Missing));
    }

    #[test]
    fn debug_output_hides_keys() {
        let keys = ApiKeys::new(["secret"]);
        assert!(!format!("{keys:?}").contains("secret"));
    }
}
