//! Search input parsing.

use std::fmt;

use crate::error::FetchError;

/// A normalized search for a single catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Lookup by catalog number.
    ById(u32),
    /// Lookup by lowercase name.
    ByName(String),
}

impl SearchQuery {
    /// Parses free-form user input.
    ///
    /// Input is trimmed and lowercased. Pure digits (leading zeros allowed)
    /// search by number; anything else searches by name.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidQuery`] for blank input or a number that
    /// is zero or does not fit in a `u32`.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(FetchError::InvalidQuery("empty query".to_string()));
        }

        if normalized.bytes().all(|b| b.is_ascii_digit()) {
            return match normalized.parse::<u32>() {
                Ok(0) | Err(_) => Err(FetchError::InvalidQuery(normalized)),
                Ok(id) => Ok(SearchQuery::ById(id)),
            };
        }

        Ok(SearchQuery::ByName(normalized))
    }

    /// Returns the path segment used for the detail endpoint.
    pub fn path_segment(&self) -> String {
        match self {
            SearchQuery::ById(id) => id.to_string(),
            SearchQuery::ByName(name) => name.clone(),
        }
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchQuery::ById(id) => write!(f, "#{id}"),
            SearchQuery::ByName(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(SearchQuery::parse(" 25 ").unwrap(), SearchQuery::ById(25));
        assert_eq!(SearchQuery::parse("007").unwrap(), SearchQuery::ById(7));
    }

    #[test]
    fn test_parse_name_normalized() {
        assert_eq!(
            SearchQuery::parse("  Pikachu ").unwrap(),
            SearchQuery::ByName("pikachu".to_string())
        );
        // Mixed digits and letters are names.
        assert_eq!(
            SearchQuery::parse("porygon2").unwrap(),
            SearchQuery::ByName("porygon2".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_blank_and_zero() {
        assert!(matches!(SearchQuery::parse("   "), Err(FetchError::InvalidQuery(_))));
        assert!(matches!(SearchQuery::parse("0"), Err(FetchError::InvalidQuery(_))));
        assert!(matches!(
            SearchQuery::parse("99999999999"),
            Err(FetchError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(SearchQuery::ById(4).path_segment(), "4");
        assert_eq!(SearchQuery::ByName("mew".into()).path_segment(), "mew");
    }
}
