//! Selectors and the stylesheet source language for the Una node tree.
//!
//! Has no dependencies on the engine or the node tree.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `StyleSheetSource`, `RuleSource`, `Declaration`, `Value` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_stylesheet`, `parse_selector_list` entry points |
//! | [`selector`] | `Selector`, `SelectorList`, `Specificity`, `SelectorSubject` |
//!
//! # Quick start
//!
//! ```rust
//! use una_style::parse_stylesheet;
//!
//! let src = r#"
//!     .item { padding: 4 8; }
//!     .item.separator:hover, #toolbar { background-color: #3a3a3aff; }
//! "#;
//!
//! let sheet = parse_stylesheet(src).unwrap();
//! assert_eq!(sheet.rules.len(), 2);
//! assert_eq!(sheet.rules[1].selectors.0.len(), 2);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod selector;

pub use ast::{Declaration, RuleSource, StyleSheetSource, Value};
pub use error::ParseError;
pub use parser::{parse_selector_list, parse_stylesheet};
pub use selector::{Selector, SelectorList, SelectorSubject, Specificity};

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) { parse_stylesheet(src).unwrap(); }
    fn err(src: &str) { parse_stylesheet(src).unwrap_err(); }

    #[test] fn empty_sheet() { ok(""); }
    #[test] fn empty_rule() { ok(".item { }"); }
    #[test] fn class_rule() { ok(".item { padding: 4; color: #ffffffff; }"); }
    #[test] fn compound_rule() { ok(".item.separator:hover { opacity: 0.5 }"); }
    #[test] fn id_rule() { ok("#toolbar { flow: horizontal; gap: 6px; }"); }
    #[test] fn tag_rule() { ok("node { anchor: middle-left }"); }
    #[test] fn universal_rule() { ok("* { is-visible: true }"); }
    #[test] fn alternatives() { ok(".a, .b:hover, #c { gap: 2 }"); }
    #[test] fn shorthand_values() { ok(".a { padding: 2 4 6 8; margin: 1 2; }"); }
    #[test] fn short_hex() { ok(".a { color: #fff }"); }
    #[test] fn string_value() { ok(".a { text: 'quoted'; }"); }
    #[test] fn block_comment() { ok("/* header */ .a { /* body */ gap: 8 /* tail */ }"); }
    #[test] fn line_comment() { ok("// top\n.a {\n    // inside\n    gap: 8\n}"); }
    #[test] fn missing_trailing_semicolon() { ok(".a { gap: 8; padding: 4 }"); }
    #[test] fn err_bad_color() { err(".a { color: #xyz }"); }
    #[test] fn err_five_digit_color() { err(".a { color: #12345 }"); }
    #[test] fn err_unclosed_block() { err(".a { gap: 8"); }
    #[test] fn err_descendant_combinator() { err(".a .b { gap: 8 }"); }
    #[test] fn err_child_combinator() { err(".a > .b { gap: 8 }"); }
    #[test] fn err_double_id() { err("#a#b { gap: 8 }"); }
    #[test] fn err_empty_value() { err(".a { gap: ; }"); }
    #[test] fn err_missing_selector() { err("{ gap: 8 }"); }
    #[test] fn err_space_after_dot() { err(". a { gap: 8 }"); }

    #[test]
    fn declarations_keep_every_value() {
        let sheet = parse_stylesheet(".a { padding: 2 4 6 8 }").unwrap();
        let decl = &sheet.rules[0].declarations[0];
        assert_eq!(decl.name, "padding");
        assert_eq!(decl.values, vec![
            Value::Number(2.0), Value::Number(4.0), Value::Number(6.0), Value::Number(8.0),
        ]);
    }

    #[test]
    fn colors_decode_to_straight_bytes() {
        let sheet = parse_stylesheet(".a { color: #102030; background-color: #fff8 }");
        assert!(sheet.is_err());
        let sheet = parse_stylesheet(".a { color: #102030; background-color: #ff000080 }").unwrap();
        let decls = &sheet.rules[0].declarations;
        assert_eq!(decls[0].values[0], Value::Color([0x10, 0x20, 0x30, 0xff]));
        assert_eq!(decls[1].values[0], Value::Color([0xff, 0x00, 0x00, 0x80]));
    }

    #[test]
    fn error_positions_point_at_the_problem() {
        let e = parse_stylesheet(".a {\n  gap: 8;\n  color: #zz;\n}").unwrap_err();
        assert_eq!(e.line, 3);
        assert_eq!(e.col, 10);
    }

    #[test]
    fn rule_lines_are_recorded() {
        let sheet = parse_stylesheet("\n\n.a { gap: 1 }\n.b { gap: 2 }").unwrap();
        assert_eq!(sheet.rules[0].line, 3);
        assert_eq!(sheet.rules[1].line, 4);
    }

    #[test]
    fn selector_list_entry_point() {
        let list = parse_selector_list("#B.y, .x").unwrap();
        assert_eq!(list.to_string(), "#B.y, .x");
        assert!(parse_selector_list("").is_err());
        assert!(parse_selector_list(".x,").is_err());
    }
}
