use std::fmt;

/// Every query starts with this character and it can never be erased.
pub const MARKER: char = '#';

/// A submitted search term, marker included.
///
/// Construction goes through [`Query::parse`], which rejects the inputs
/// that carry no searchable content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Accept a submitted buffer as a query, or reject it as empty.
    ///
    /// The rejected set is exactly the buffers a user can produce without
    /// typing anything meaningful: nothing at all, the bare marker, a lone
    /// space, or the marker followed by one space.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" | "#" | " " | "# " => None,
            _ => Some(Self(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_a_tagged_term() {
        let query = Query::parse("#climate").unwrap();
        assert_eq!(query.as_str(), "#climate");
    }

    #[test]
    fn test_accepts_multi_word_terms() {
        let query = Query::parse("#rust lang").unwrap();
        assert_eq!(query.as_str(), "#rust lang");
    }

    #[test]
    fn test_rejects_every_empty_shape() {
        for raw in ["", "#", " ", "# "] {
            assert_eq!(Query::parse(raw), None, "expected {raw:?} to be rejected");
        }
    }

    #[test]
    fn test_keeps_trailing_content_after_a_space() {
        // "# x" has content after the marker, unlike "# ".
        assert!(Query::parse("# x").is_some());
    }

    #[test]
    fn test_displays_as_the_raw_term() {
        let query = Query::parse("#climate").unwrap();
        assert_eq!(query.to_string(), "#climate");
    }
}
