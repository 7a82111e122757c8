//! Selector Queries
//!
//! querySelector / querySelectorAll / matches over the arena tree.
//!
//! Supported grammar: selector lists (`a, b`), descendant and child
//! combinators, and compound selectors built from a type or `*`, `#id`,
//! `.class`, attribute selectors (`[a]`, `[a=v]`, `[a^=v]`, `[a$=v]`,
//! `[a*=v]`, `[a~=v]`) and `:not(<compound>)`.

use crate::{DomTree, NodeId};

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected character {ch:?} at {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("Unexpected end of selector")]
    UnexpectedEnd,

    #[error("Unsupported pseudo-class :{0}")]
    UnsupportedPseudo(String),
}

/// Attribute selector operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOperator {
    /// `[a=v]`
    Equals,
    /// `[a^=v]`
    Prefix,
    /// `[a$=v]`
    Suffix,
    /// `[a*=v]`
    Substring,
    /// `[a~=v]`
    Includes,
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSelector {
    pub name: String,
    pub operator: Option<(AttrOperator, String)>,
}

impl AttrSelector {
    fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match &self.operator {
            None => true,
            Some((AttrOperator::Equals, expected)) => value == expected,
            // Empty operands never match for the substring operators
            Some((_, expected)) if expected.is_empty() => false,
            Some((AttrOperator::Prefix, expected)) => value.starts_with(expected.as_str()),
            Some((AttrOperator::Suffix, expected)) => value.ends_with(expected.as_str()),
            Some((AttrOperator::Substring, expected)) => value.contains(expected.as_str()),
            Some((AttrOperator::Includes, expected)) => value.split_whitespace().any(|t| t == expected),
        }
    }
}

/// Simple selector inside a compound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Id(String),
    Class(String),
    Attribute(AttrSelector),
    Not(Box<CompoundSelector>),
}

/// Compound selector: optional type plus simple selectors, no combinators
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// Lowercase tag name; `None` for `*` or an omitted type
    pub tag: Option<String>,
    pub components: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Check a single element against this compound
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(elem) = tree.element(id) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if !elem.local_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.components.iter().all(|component| match component {
            SimpleSelector::Id(expected) => elem.id() == Some(expected.as_str()),
            SimpleSelector::Class(class) => elem.has_class(class),
            SimpleSelector::Attribute(attr) => attr.matches(elem.get_attr(&attr.name)),
            SimpleSelector::Not(inner) => !inner.matches(tree, id),
        })
    }
}

/// Combinator between compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
}

/// Compounds joined by combinators, e.g. `form .is-invalid`
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

impl ComplexSelector {
    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(last) = self.compounds.len().checked_sub(1) else {
            return false;
        };
        self.compounds[last].matches(tree, id) && self.matches_left_of(tree, id, last)
    }

    /// `compounds[index]` already matched `id`; check everything to its left
    fn matches_left_of(&self, tree: &DomTree, id: NodeId, index: usize) -> bool {
        if index == 0 {
            return true;
        }
        let left = &self.compounds[index - 1];
        let mut ancestors = tree.ancestors(id).filter(|a| tree.is_element(*a));
        match self.combinators[index - 1] {
            Combinator::Child => ancestors
                .next()
                .is_some_and(|parent| left.matches(tree, parent) && self.matches_left_of(tree, parent, index - 1)),
            Combinator::Descendant => {
                ancestors.any(|a| left.matches(tree, a) && self.matches_left_of(tree, a, index - 1))
            }
        }
    }
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<ComplexSelector>,
}

impl Selector {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser = Parser { chars: input.chars().collect(), pos: 0 };
        let mut alternatives = Vec::new();
        loop {
            parser.skip_whitespace();
            alternatives.push(parser.parse_complex()?);
            parser.skip_whitespace();
            match parser.peek() {
                None => break,
                Some(',') => parser.pos += 1,
                Some(ch) => return Err(SelectorError::UnexpectedChar { pos: parser.pos, ch }),
            }
        }
        Ok(Self { alternatives })
    }

    /// Check whether an element matches any alternative
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(tree, id))
    }

    /// First matching descendant of `scope` in document order
    pub fn select_first(&self, tree: &DomTree, scope: NodeId) -> Option<NodeId> {
        tree.descendants(scope).find(|id| self.matches(tree, *id))
    }

    /// All matching descendants of `scope` in document order
    pub fn select_all(&self, tree: &DomTree, scope: NodeId) -> Vec<NodeId> {
        tree.descendants(scope).filter(|id| self.matches(tree, *id)).collect()
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl DomTree {
    /// querySelector
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(Selector::parse(selector)?.select_first(self, scope))
    }

    /// querySelectorAll
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(Selector::parse(selector)?.select_all(self, scope))
    }

    /// Element.matches
    pub fn matches(&self, id: NodeId, selector: &str) -> Result<bool, SelectorError> {
        Ok(Selector::parse(selector)?.matches(self, id))
    }

    /// Element.closest (inclusive)
    pub fn closest(&self, id: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|candidate| selector.matches(self, *candidate)))
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Skip whitespace, reporting whether any was consumed
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(ch) => Err(SelectorError::UnexpectedChar { pos: self.pos, ch }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(ch) => SelectorError::UnexpectedChar { pos: self.pos, ch },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_space => Combinator::Descendant,
                Some(ch) => return Err(SelectorError::UnexpectedChar { pos: self.pos, ch }),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }
        Ok(ComplexSelector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut compound = CompoundSelector::default();
        let mut has_type = false;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                has_type = true;
            }
            Some(ch) if is_ident_start(ch) => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
                has_type = true;
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.components.push(SimpleSelector::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    compound.components.push(SimpleSelector::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    let attr = self.parse_attribute()?;
                    compound.components.push(SimpleSelector::Attribute(attr));
                }
                Some(':') => {
                    self.pos += 1;
                    let name = self.parse_ident()?;
                    if !name.eq_ignore_ascii_case("not") {
                        return Err(SelectorError::UnsupportedPseudo(name));
                    }
                    self.expect('(')?;
                    self.skip_whitespace();
                    let inner = self.parse_compound()?;
                    self.skip_whitespace();
                    self.expect(')')?;
                    compound.components.push(SimpleSelector::Not(Box::new(inner)));
                }
                _ => break,
            }
        }

        if !has_type && compound.components.is_empty() {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<AttrSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let operator = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                Some(AttrOperator::Equals)
            }
            Some(ch @ ('^' | '$' | '*' | '~')) => {
                self.pos += 1;
                self.expect('=')?;
                Some(match ch {
                    '^' => AttrOperator::Prefix,
                    '$' => AttrOperator::Suffix,
                    '*' => AttrOperator::Substring,
                    _ => AttrOperator::Includes,
                })
            }
            _ => return Err(self.unexpected()),
        };

        let operator = match operator {
            None => None,
            Some(op) => {
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.pos += 1;
                        self.parse_quoted(quote)?
                    }
                    _ => self.parse_ident()?,
                };
                self.skip_whitespace();
                Some((op, value))
            }
        };

        self.expect(']')?;
        Ok(AttrSelector { name, operator })
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(SelectorError::UnexpectedEnd),
                Some(ch) if ch == quote => {
                    self.pos += 1;
                    return Ok(value);
                }
                Some('\\') => {
                    self.pos += 1;
                    let escaped = self.peek().ok_or(SelectorError::UnexpectedEnd)?;
                    value.push(escaped);
                    self.pos += 1;
                }
                Some(ch) => {
                    value.push(ch);
                    self.pos += 1;
                }
            }
        }
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(ch) if is_ident_start(ch) => {}
            _ => return Err(self.unexpected()),
        }
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '-' || !ch.is_ascii()
}

fn is_ident_char(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}
