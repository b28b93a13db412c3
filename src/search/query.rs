//! Parsing of raw query lines.

/// A query as typed by the user: an optional key path and a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub key: Option<String>,
    pub value: String,
}

impl Query {
    /// Parses a raw line.
    ///
    /// A line containing `=` is split once into `key=value`; a line without
    /// one is a value-only query. The key is trimmed and an empty key counts
    /// as no key. The value is kept verbatim apart from a trailing line
    /// terminator, since string values compare exactly.
    ///
    /// # Example
    ///
    /// ```
    /// use serialquill::search::Query;
    ///
    /// let q = Query::parse("root.a.b =1\n");
    /// assert_eq!(q.key.as_deref(), Some("root.a.b"));
    /// assert_eq!(q.value, "1");
    ///
    /// assert_eq!(Query::parse("name= padded ").value, " padded ");
    ///
    /// let q = Query::parse("url=https://x.test/?a=b");
    /// assert_eq!(q.value, "https://x.test/?a=b");
    ///
    /// assert_eq!(Query::parse("Alice").key, None);
    /// ```
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                Self {
                    key: (!key.is_empty()).then(|| key.to_string()),
                    value: value.to_string(),
                }
            }
            None => Self {
                key: None,
                value: line.to_string(),
            },
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}={}", key, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_only() {
        let q = Query::parse("42\r\n");
        assert_eq!(q, Query { key: None, value: "42".to_string() });
    }

    #[test]
    fn test_value_whitespace_is_kept() {
        let q = Query::parse("  name = padded \n");
        assert_eq!(q.key(), Some("name"));
        assert_eq!(q.value, " padded ");

        assert_eq!(Query::parse("  Alice ").value, "  Alice ");
    }

    #[test]
    fn test_empty_key() {
        let q = Query::parse("=x");
        assert_eq!(q.key(), None);
        assert_eq!(q.value, "x");
    }

    #[test]
    fn test_empty_value() {
        let q = Query::parse("name=");
        assert_eq!(q.key(), Some("name"));
        assert!(q.value.is_empty());
    }

    #[test]
    fn test_display_round_trips_shape() {
        assert_eq!(Query::parse("a.b=1").to_string(), "a.b=1");
        assert_eq!(Query::parse("1").to_string(), "1");
    }
}
