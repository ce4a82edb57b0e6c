//! Query string decoding and re-encoding.

use url::form_urlencoded;

/// Decoded query parameters: name → first non-blank value, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode an `application/x-www-form-urlencoded` query string.
    ///
    /// Later occurrences of a name are ignored. Pairs with an empty value (including
    /// bare `name` fragments with no `=`) are dropped.
    pub fn parse(querystring: &str) -> Self {
        let mut params = Self::default();
        for (name, value) in form_urlencoded::parse(querystring.as_bytes()) {
            if value.is_empty() || params.contains_key(&name) {
                continue;
            }
            params.pairs.push((name.into_owned(), value.into_owned()));
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.pairs[idx].1.as_str())
    }

    /// Remove `name`, returning its value. Remaining parameters keep their order.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.pairs.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Re-encode as `k=v&...` with form percent-encoding (space becomes `+`).
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.pairs.iter().position(|(k, _)| k == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_first_value() {
        let params = QueryParams::parse("a=1&b=2&a=3");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("2"));
    }

    #[test]
    fn test_parse_drops_blank_and_bare_fragments() {
        let params = QueryParams::parse("flag&empty=&x=1&&");
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("x", "1")]);
    }

    #[test]
    fn test_blank_first_occurrence_does_not_shadow_later_value() {
        let params = QueryParams::parse("a=&a=2");
        assert_eq!(params.get("a"), Some("2"));
    }

    #[test]
    fn test_parse_decodes_percent_and_plus() {
        let params = QueryParams::parse("name=hello+world&path=%2Fa%2Fb&emoji=%F0%9F%98%80");
        assert_eq!(params.get("name"), Some("hello world"));
        assert_eq!(params.get("path"), Some("/a/b"));
        assert_eq!(params.get("emoji"), Some("😀"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(QueryParams::parse("").is_empty());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut params = QueryParams::parse("a=1&b=2&c=3");
        assert_eq!(params.remove("b"), Some("2".to_string()));
        assert_eq!(params.remove("b"), None);
        assert_eq!(params.encode(), "a=1&c=3");
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let params = QueryParams::parse("q=a%26b%3Dc+d");
        assert_eq!(params.get("q"), Some("a&b=c d"));
        assert_eq!(params.encode(), "q=a%26b%3Dc+d");

        let reparsed = QueryParams::parse(&params.encode());
        assert_eq!(reparsed, params);
    }

    #[test]
    fn test_encode_tilde_and_star() {
        let params = QueryParams::parse("q=a~b*c");
        assert_eq!(params.get("q"), Some("a~b*c"));
        assert_eq!(params.encode(), "q=a%7Eb*c");
    }
}
