//! Resolution of a raw query key into a search path.

/// Prefixes that anchor a key at the document root.
///
/// Both spellings are exactly five characters including the separator and
/// are matched case-sensitively.
pub const ROOT_TOKENS: [&str; 2] = ["this.", "root."];

/// A resolved query key.
///
/// `anchored` paths must match segment by segment from the root. Unanchored
/// paths may start matching at any depth. A path with nothing left to match
/// means "match the value anywhere".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPath<'k> {
    anchored: bool,
    remaining: &'k str,
}

impl<'k> SearchPath<'k> {
    /// Resolves a raw key.
    ///
    /// # Example
    ///
    /// ```
    /// use serialquill::search::SearchPath;
    ///
    /// let anchored = SearchPath::resolve(Some("root.a.b"));
    /// assert!(anchored.is_anchored());
    /// assert_eq!(anchored.remaining(), "a.b");
    ///
    /// let loose = SearchPath::resolve(Some("a.b"));
    /// assert!(!loose.is_anchored());
    /// assert!(loose.has_key());
    ///
    /// assert!(!SearchPath::resolve(None).has_key());
    /// ```
    pub fn resolve(key: Option<&'k str>) -> Self {
        let key = match key {
            Some(k) if !k.trim().is_empty() => k,
            _ => {
                return Self {
                    anchored: false,
                    remaining: "",
                }
            }
        };

        match ROOT_TOKENS
            .iter()
            .find_map(|token| key.strip_prefix(*token))
        {
            Some(rest) => Self {
                anchored: true,
                remaining: rest,
            },
            None => Self {
                anchored: false,
                remaining: key,
            },
        }
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// The dotted path still to be matched, with any root token removed.
    pub fn remaining(&self) -> &'k str {
        self.remaining
    }

    /// False when the search should match by value alone.
    pub fn has_key(&self) -> bool {
        !self.remaining.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_blank_keys() {
        for key in [None, Some(""), Some("   ")] {
            let path = SearchPath::resolve(key);
            assert!(!path.is_anchored());
            assert!(!path.has_key());
            assert_eq!(path.remaining(), "");
        }
    }

    #[test]
    fn test_both_root_tokens() {
        assert_eq!(SearchPath::resolve(Some("this.x")).remaining(), "x");
        assert_eq!(SearchPath::resolve(Some("root.x.y")).remaining(), "x.y");
        assert!(SearchPath::resolve(Some("this.x")).is_anchored());
    }

    #[test]
    fn test_root_token_is_case_sensitive_and_needs_separator() {
        let upper = SearchPath::resolve(Some("Root.x"));
        assert!(!upper.is_anchored());
        assert_eq!(upper.remaining(), "Root.x");

        let bare = SearchPath::resolve(Some("root"));
        assert!(!bare.is_anchored());
        assert_eq!(bare.remaining(), "root");

        let longer = SearchPath::resolve(Some("rooted.x"));
        assert!(!longer.is_anchored());
    }

    #[test]
    fn test_only_root_token_means_value_only() {
        let path = SearchPath::resolve(Some("root."));
        assert!(path.is_anchored());
        assert!(!path.has_key());
    }

    #[test]
    fn test_unanchored_key_kept_verbatim() {
        let path = SearchPath::resolve(Some(" a.b"));
        assert_eq!(path.remaining(), " a.b");
        assert!(path.has_key());
    }
}
