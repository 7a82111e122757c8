//! DOMTokenList (classList)
//!
//! Space-separated token set backing `class`.

/// DOMTokenList for managing space-separated tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(&[token]);
        }
        list
    }

    /// Number of tokens
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add token(s)
    pub fn add(&mut self, tokens: &[&str]) {
        for token in tokens {
            if !token.is_empty() && !self.contains(token) {
                self.tokens.push(token.to_string());
            }
        }
    }

    /// Remove token(s)
    pub fn remove(&mut self, tokens: &[&str]) {
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = match force {
            Some(state) => state,
            None => !self.contains(token),
        };
        if present {
            self.add(&[token]);
        } else {
            self.remove(&[token]);
        }
        present
    }

    /// Serialized value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Replace contents from a string
    pub fn set_value(&mut self, value: &str) {
        *self = Self::from_string(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let list = DOMTokenList::from_string("alert  alert-info alert");
        assert_eq!(list.length(), 2);
        assert!(list.contains("alert"));
        assert!(list.contains("alert-info"));
    }

    #[test]
    fn test_add_remove() {
        let mut list = DOMTokenList::new();
        list.add(&["text-warning", "text-danger", ""]);
        assert_eq!(list.length(), 2);

        list.remove(&["text-warning"]);
        assert_eq!(list.value(), "text-danger");
    }

    #[test]
    fn test_toggle() {
        let mut list = DOMTokenList::new();

        assert!(list.toggle("is-invalid", None));
        assert!(list.contains("is-invalid"));
        assert!(list.toggle("is-invalid", Some(true)));
        assert!(!list.toggle("is-invalid", None));
        assert!(!list.toggle("is-invalid", Some(false)));
        assert!(list.is_empty());
    }
}
