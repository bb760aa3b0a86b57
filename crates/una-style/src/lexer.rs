use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Ident(String),
    Str(String),
    /// Number literal. A trailing `px` unit is accepted and dropped.
    Number(f32),
    /// `#` followed by name characters. The parser decides whether this is an
    /// id selector or a hex color from context.
    Hash(String),
    // Punctuation
    Dot,
    Colon,
    Comma,
    Semicolon,
    Star,
    /// `>`; lexed only so the parser can reject combinators with a clear message.
    Greater,
    LBrace,
    RBrace,
    // Sentinel
    Eof,
}

/// A token together with its 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
    /// Whitespace or a comment separated this token from the previous one.
    pub spaced: bool,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let spaced = self.skip_whitespace_and_comments()?;
            let (line, col) = (self.line, self.col);
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(TokenWithPos { token, line, col, spaced });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut it = self.src[self.pos..].chars();
        it.next();
        it.next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Returns whether anything was skipped.
    fn skip_whitespace_and_comments(&mut self) -> Result<bool, ParseError> {
        let start = self.pos;
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            if self.src[self.pos..].starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if self.src[self.pos..].starts_with("/*") {
                let (line, col) = (self.line, self.col);
                self.advance(); self.advance(); // consume `/*`
                loop {
                    if self.src[self.pos..].starts_with("*/") {
                        self.advance(); self.advance(); // consume `*/`
                        break;
                    }
                    if self.advance().is_none() {
                        return Err(ParseError::new("unterminated block comment", line, col));
                    }
                }
            } else {
                break;
            }
        }
        Ok(self.pos != start)
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let ch = match self.peek() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        match ch {
            ':' => { self.advance(); Ok(Token::Colon) }
            ',' => { self.advance(); Ok(Token::Comma) }
            ';' => { self.advance(); Ok(Token::Semicolon) }
            '*' => { self.advance(); Ok(Token::Star) }
            '>' => { self.advance(); Ok(Token::Greater) }
            '{' => { self.advance(); Ok(Token::LBrace) }
            '}' => { self.advance(); Ok(Token::RBrace) }
            '"' | '\'' => self.lex_string(ch),
            '#' => self.lex_hash(),
            '.' if matches!(self.peek_second(), Some(c) if c.is_ascii_digit()) => self.lex_number(),
            '.' => { self.advance(); Ok(Token::Dot) }
            '-' if matches!(self.peek_second(), Some(c) if c.is_ascii_digit() || c == '.') => {
                self.lex_number()
            }
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_name_start(c) => Ok(Token::Ident(self.lex_name())),
            other => Err(self.err(format!("unexpected character {:?}", other))),
        }
    }

    fn lex_string(&mut self, quote: char) -> Result<Token, ParseError> {
        let (line, col) = (self.line, self.col);
        self.advance(); // consume opening quote
        let mut s = String::new();
        loop {
            match self.advance() {
                None => return Err(ParseError::new("unterminated string literal", line, col)),
                Some(c) if c == quote => break,
                Some('\\') => {
                    match self.advance() {
                        Some('n')  => s.push('\n'),
                        Some('t')  => s.push('\t'),
                        Some(c)    => s.push(c),
                        None => return Err(ParseError::new("unterminated escape sequence", line, col)),
                    }
                }
                Some(c) => s.push(c),
            }
        }
        Ok(Token::Str(s))
    }

    fn lex_hash(&mut self) -> Result<Token, ParseError> {
        self.advance(); // consume `#`
        if !matches!(self.peek(), Some(c) if is_name_char(c)) {
            return Err(self.err("expected a name or hex digits after '#'"));
        }
        Ok(Token::Hash(self.lex_name()))
    }

    fn lex_number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let s = &self.src[start..self.pos];
        let n = s
            .parse::<f32>()
            .map_err(|_| self.err(format!("invalid number {:?}", s)))?;
        if self.src[self.pos..].starts_with("px") {
            self.advance(); self.advance();
        }
        Ok(Token::Number(n))
    }

    fn lex_name(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.advance();
        }
        self.src[start..self.pos].to_string()
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn compound_selector_tokens() {
        assert_eq!(
            kinds(".item.separator:hover"),
            vec![
                Token::Dot, Token::Ident("item".into()),
                Token::Dot, Token::Ident("separator".into()),
                Token::Colon, Token::Ident("hover".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn numbers_accept_px_and_leading_dot() {
        assert_eq!(kinds("4px .5 -2"), vec![
            Token::Number(4.0), Token::Number(0.5), Token::Number(-2.0), Token::Eof,
        ]);
    }

    #[test]
    fn hyphenated_idents() {
        assert_eq!(kinds("background-color"), vec![Token::Ident("background-color".into()), Token::Eof]);
    }

    #[test]
    fn spacing_is_recorded() {
        let toks = Lexer::new(".a .b").tokenize().unwrap();
        assert!(!toks[1].spaced);
        assert!(toks[2].spaced);
    }

    #[test]
    fn positions_are_one_based() {
        let toks = Lexer::new("a\n  #b").tokenize().unwrap();
        assert_eq!((toks[1].line, toks[1].col), (2, 3));
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        assert!(Lexer::new(".a { /* oops").tokenize().is_err());
    }
}
