use crate::ast::{Declaration, RuleSource, StyleSheetSource, Value};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};
use crate::selector::{Selector, SelectorList};

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .map(|t| (t.line, t.col))
            .or_else(|| self.tokens.last().map(|t| (t.line, t.col)))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    /// Whether whitespace precedes the current token.
    fn peek_spaced(&self) -> bool {
        self.tokens.get(self.pos).is_some_and(|t| t.spaced)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::new(msg, line, col)
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        if self.peek_spaced() {
            return Err(self.err(format!("whitespace is not allowed before {what}")));
        }
        match self.peek().clone() {
            Token::Ident(s) => {
                self.advance();
                Ok(s)
            }
            tok => Err(self.err(format!("expected {what}, got {:?}", tok))),
        }
    }

    // ── Stylesheet ────────────────────────────────────────────────────────

    pub fn parse_stylesheet(&mut self) -> Result<StyleSheetSource, ParseError> {
        let mut rules = Vec::new();
        while self.peek() != &Token::Eof {
            rules.push(self.parse_rule()?);
        }
        Ok(StyleSheetSource { rules })
    }

    fn parse_rule(&mut self) -> Result<RuleSource, ParseError> {
        let (line, _) = self.current_pos();
        let selectors = self.parse_selector_list(&Token::LBrace)?;
        self.advance(); // consume `{`

        let mut declarations = Vec::new();
        loop {
            match self.peek() {
                Token::RBrace => { self.advance(); break; }
                Token::Eof => return Err(self.err("unclosed '{' block")),
                Token::Semicolon => { self.advance(); }
                Token::Ident(_) => declarations.push(self.parse_declaration()?),
                tok => {
                    return Err(self.err(format!(
                        "unexpected {:?} inside rule, expected a declaration (name: value)",
                        tok
                    )));
                }
            }
        }

        Ok(RuleSource { selectors, declarations, line })
    }

    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let (line, col) = self.current_pos();
        let name = match self.advance() {
            Token::Ident(s) => s,
            tok => return Err(self.err(format!("expected a property name, got {:?}", tok))),
        };
        if self.advance() != Token::Colon {
            return Err(self.err(format!("expected ':' after '{name}'")));
        }

        let mut values = Vec::new();
        loop {
            match self.peek() {
                Token::Semicolon => { self.advance(); break; }
                Token::RBrace | Token::Eof => break,
                _ => values.push(self.parse_value()?),
            }
        }
        if values.is_empty() {
            return Err(ParseError::new(format!("'{name}' has no value"), line, col));
        }

        Ok(Declaration { name, values, line, col })
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let (line, col) = self.current_pos();
        match self.advance() {
            Token::Number(n) => Ok(Value::Number(n)),
            Token::Ident(s) => Ok(Value::Ident(s)),
            Token::Str(s) => Ok(Value::Str(s)),
            Token::Hash(h) => parse_hex_color(&h)
                .map(Value::Color)
                .ok_or_else(|| ParseError::new(
                    format!("color literal must be #rgb, #rrggbb or #rrggbbaa, got #{h}"),
                    line,
                    col,
                )),
            tok => Err(ParseError::new(format!("expected a value, got {:?}", tok), line, col)),
        }
    }

    // ── Selectors ─────────────────────────────────────────────────────────

    /// Parses `compound (, compound)*` up to (not including) `terminator`.
    pub fn parse_selector_list(&mut self, terminator: &Token) -> Result<SelectorList, ParseError> {
        let mut selectors = vec![self.parse_compound()?];
        loop {
            let tok = self.peek();
            if tok == terminator {
                break;
            }
            match tok {
                Token::Comma => {
                    self.advance();
                    selectors.push(self.parse_compound()?);
                }
                Token::Greater => {
                    return Err(self.err("child combinators ('>') are not supported"));
                }
                Token::Eof => return Err(self.err("unexpected end of input in selector")),
                _ if self.peek_spaced() => {
                    return Err(self.err("descendant combinators are not supported; \
                        write a compound selector without spaces"));
                }
                tok => return Err(self.err(format!("unexpected {:?} in selector", tok))),
            }
        }
        Ok(SelectorList::new(selectors))
    }

    fn parse_compound(&mut self) -> Result<Selector, ParseError> {
        let mut sel = Selector::default();
        let mut any_part = false;

        match self.peek().clone() {
            Token::Star => { self.advance(); any_part = true; }
            Token::Ident(tag) => { self.advance(); sel.tag = Some(tag); any_part = true; }
            _ => {}
        }

        loop {
            if any_part && self.peek_spaced() {
                break;
            }
            match self.peek().clone() {
                Token::Hash(id) => {
                    if sel.id.is_some() {
                        return Err(self.err("a selector may contain at most one id"));
                    }
                    self.advance();
                    sel.id = Some(id);
                }
                Token::Dot => {
                    self.advance();
                    sel.classes.push(self.expect_ident("a class name")?);
                }
                Token::Colon => {
                    self.advance();
                    sel.pseudos.push(self.expect_ident("a pseudo-state name")?);
                }
                _ => break,
            }
            any_part = true;
        }

        if !any_part {
            return Err(self.err(format!("expected a selector, got {:?}", self.peek())));
        }
        Ok(sel)
    }
}

fn parse_hex_color(hex: &str) -> Option<[u8; 4]> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some([nib(0)?, nib(1)?, nib(2)?, 255])
        }
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

// ── Public parse entry points ─────────────────────────────────────────────

/// Parse stylesheet source text into rules.
pub fn parse_stylesheet(src: &str) -> Result<StyleSheetSource, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_stylesheet()
}

/// Parse a comma-separated selector list such as `".item:hover, #toolbar"`.
pub fn parse_selector_list(src: &str) -> Result<SelectorList, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_selector_list(&Token::Eof)
}
