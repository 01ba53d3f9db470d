//! Place query entity.

use serde_json::json;

use crate::error::AppError;

/// A trimmed, non-empty place name.
///
/// The only constructor is [`PlaceQuery::parse`], so holding a `PlaceQuery`
/// means the input has already been checked and no source ever sees a blank
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Trims the input and rejects empty or whitespace-only text.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request(
                "Query must not be empty",
                json!({ "field": "q" }),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for case-insensitive text matching.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let query = PlaceQuery::parse("  Eiffel Tower \n").unwrap();
        assert_eq!(query.as_str(), "Eiffel Tower");
        assert_eq!(query.folded(), "eiffel tower");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(matches!(
            PlaceQuery::parse(""),
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            PlaceQuery::parse(" \t\n "),
            Err(AppError::Validation { .. })
        ));
    }
}
