//! Inline style declarations (`style` attribute)

/// Parsed inline `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `prop: value; prop: value`. Malformed declarations are skipped.
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for decl in css_text.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let prop = prop.trim();
            let value = value.trim();
            if prop.is_empty() || value.is_empty() {
                continue;
            }
            style.set_property(prop, value);
        }
        style
    }

    pub fn get_property(&self, prop: &str) -> Option<&str> {
        let prop = prop.to_ascii_lowercase();
        self.declarations
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it, as with `style.x = ''`
    pub fn set_property(&mut self, prop: &str, value: &str) {
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            self.remove_property(&prop);
            return;
        }
        match self.declarations.iter_mut().find(|(p, _)| *p == prop) {
            Some((_, v)) => *v = value.to_string(),
            None => self.declarations.push((prop, value.to_string())),
        }
    }

    pub fn remove_property(&mut self, prop: &str) -> Option<String> {
        let prop = prop.to_ascii_lowercase();
        let index = self.declarations.iter().position(|(p, _)| *p == prop)?;
        Some(self.declarations.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize as `prop: value; prop: value;`
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let style = InlineStyle::parse("display:none ; max-width: 200px;;bogus");
        assert_eq!(style.get_property("display"), Some("none"));
        assert_eq!(style.get_property("MAX-WIDTH"), Some("200px"));
        assert_eq!(style.css_text(), "display: none; max-width: 200px;");
    }

    #[test]
    fn test_set_and_clear() {
        let mut style = InlineStyle::new();
        style.set_property("display", "block");
        style.set_property("display", "none");
        assert_eq!(style.css_text(), "display: none;");

        style.set_property("display", "");
        assert!(style.is_empty());
    }
}
