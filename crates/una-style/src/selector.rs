//! Compound selectors, selector lists and specificity.
//!
//! Only compound selectors are supported: an optional tag, an optional id, and
//! any number of classes and pseudo-states, all of which must hold on the same
//! node. There are no combinators.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::parser::parse_selector_list;

// ── SelectorSubject ───────────────────────────────────────────────────────

/// Anything a selector can be matched against.
pub trait SelectorSubject {
    /// Tag (element type) name.
    fn tag_name(&self) -> &str;
    fn id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    /// Pseudo-states are matched by `:name` clauses.
    fn has_pseudo(&self, pseudo: &str) -> bool;
}

// ── Specificity ───────────────────────────────────────────────────────────

/// `(ids, classes + pseudo-states, tag)`, compared lexicographically.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Specificity(pub u16, pub u16, pub u16);

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .cmp(&other.0)
            .then(self.1.cmp(&other.1))
            .then(self.2.cmp(&other.2))
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Selector ──────────────────────────────────────────────────────────────

/// One compound selector, e.g. `node#toolbar.item.separator:hover`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selector {
    /// `None` matches any tag (`*` or omitted).
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub pseudos: Vec<String>,
}

impl Selector {
    pub fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S) -> bool {
        if let Some(tag) = &self.tag {
            if tag != subject.tag_name() {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if subject.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| subject.has_class(c))
            && self.pseudos.iter().all(|p| subject.has_pseudo(p))
    }

    pub fn specificity(&self) -> Specificity {
        Specificity(
            self.id.is_some() as u16,
            (self.classes.len() + self.pseudos.len()) as u16,
            self.tag.is_some() as u16,
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.id.is_none() && self.classes.is_empty() && self.pseudos.is_empty() => {
                f.write_str("*")?
            }
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for c in &self.classes {
            write!(f, ".{c}")?;
        }
        for p in &self.pseudos {
            write!(f, ":{p}")?;
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = ParseError;

    /// Parses exactly one compound selector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut list = parse_selector_list(s)?;
        if list.0.len() != 1 {
            return Err(ParseError::new("expected a single selector, got a list", 1, 1));
        }
        Ok(list.0.remove(0))
    }
}

// ── SelectorList ──────────────────────────────────────────────────────────

/// Comma-separated alternatives; matches when any alternative matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self(selectors)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.0.iter()
    }

    pub fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S) -> bool {
        self.0.iter().any(|s| s.matches(subject))
    }

    /// Specificity of the most specific alternative that matches, if any.
    pub fn match_specificity<S: SelectorSubject + ?Sized>(&self, subject: &S) -> Option<Specificity> {
        self.0
            .iter()
            .filter(|s| s.matches(subject))
            .map(Selector::specificity)
            .max()
    }
}

impl From<Selector> for SelectorList {
    fn from(s: Selector) -> Self {
        Self(vec![s])
    }
}

impl FromStr for SelectorList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector_list(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Subject {
        tag: &'static str,
        id: Option<&'static str>,
        classes: Vec<&'static str>,
        pseudos: Vec<&'static str>,
    }

    impl SelectorSubject for Subject {
        fn tag_name(&self) -> &str { self.tag }
        fn id(&self) -> Option<&str> { self.id }
        fn has_class(&self, class: &str) -> bool { self.classes.contains(&class) }
        fn has_pseudo(&self, pseudo: &str) -> bool { self.pseudos.contains(&pseudo) }
    }

    fn item() -> Subject {
        Subject { tag: "node", id: Some("B"), classes: vec!["item", "separator"], pseudos: vec!["hover"] }
    }

    fn sel(s: &str) -> Selector { s.parse().unwrap() }

    #[test]
    fn compound_requires_every_clause() {
        assert!(sel(".item.separator:hover").matches(&item()));
        assert!(!sel(".item.separator:disabled").matches(&item()));
        assert!(!sel(".item.other").matches(&item()));
    }

    #[test]
    fn id_and_tag_clauses() {
        assert!(sel("#B.item").matches(&item()));
        assert!(!sel("#C").matches(&item()));
        assert!(sel("node#B").matches(&item()));
        assert!(!sel("separator").matches(&item()));
        assert!(sel("*").matches(&item()));
    }

    #[test]
    fn specificity_orders_id_over_class_over_tag() {
        assert!(sel("#x").specificity() > sel(".a.b.c:hover").specificity());
        assert!(sel(".a").specificity() > sel("node").specificity());
        assert_eq!(sel(".a:hover").specificity(), Specificity(0, 2, 0));
    }

    #[test]
    fn list_reports_best_matching_alternative() {
        let list: SelectorList = ".item, #B, .missing".parse().unwrap();
        assert_eq!(list.match_specificity(&item()), Some(Specificity(1, 0, 0)));
        let none: SelectorList = ".missing, #nope".parse().unwrap();
        assert_eq!(none.match_specificity(&item()), None);
    }

    #[test]
    fn display_round_trips() {
        for src in ["node#a.b:hover", ".x.y", "*", "#id"] {
            assert_eq!(sel(src).to_string(), src);
        }
    }
}
