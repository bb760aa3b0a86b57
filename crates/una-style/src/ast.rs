use crate::selector::SelectorList;

/// A parsed stylesheet source: rules in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheetSource {
    pub rules: Vec<RuleSource>,
}

/// `selector, selector { name: value...; ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSource {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
    /// 1-based line of the rule's first selector.
    pub line: usize,
}

/// `name: value value ...;`
///
/// Shorthands (`padding: 4 8`) keep every value; interpretation is up to the
/// consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub values: Vec<Value>,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f32),
    /// Straight-alpha `[r, g, b, a]` bytes from `#rgb`, `#rrggbb` or `#rrggbbaa`.
    Color([u8; 4]),
    Ident(String),
    Str(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Value::Ident(s) => Some(s),
            _ => None,
        }
    }
}
