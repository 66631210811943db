//! Hand-written lexer for the surface expression grammar.
//!
//! The grammar this translator accepts has no binary operators, statements,
//! or control flow at all, so a `/` is unambiguously the start of a regex
//! literal: there is no division to disambiguate against, unlike a full
//! ECMAScript lexer.

use bt_common::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    String,
    Number,
    Regex,
    True,
    False,
    Null,
    Undefined,
    New,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    Dot,
    Eof,
}

#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// The literal's decoded text: for strings, the unescaped value; for
    /// regex, the pattern without the flags or delimiters is returned via
    /// `Lexer::regex_flags`; otherwise the raw source slice.
    pub text: String,
    /// Regex flags (e.g. `"gi"`) when `kind == Regex`; empty otherwise.
    pub aux: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub pos: usize,
}

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Pattern/flags split captured for the most recently lexed regex token.
    last_regex_flags: String,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            last_regex_flags: String::new(),
        }
    }

    /// Flags captured alongside the most recently returned `Regex` token.
    pub fn last_regex_flags(&self) -> &str {
        &self.last_regex_flags
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(b) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::at(start as u32),
                text: String::new(),
                aux: String::new(),
            });
        };

        match b {
            b'{' => self.single(TokenKind::LBrace, start),
            b'}' => self.single(TokenKind::RBrace, start),
            b'[' => self.single(TokenKind::LBracket, start),
            b']' => self.single(TokenKind::RBracket, start),
            b'(' => self.single(TokenKind::LParen, start),
            b')' => self.single(TokenKind::RParen, start),
            b',' => self.single(TokenKind::Comma, start),
            b':' => self.single(TokenKind::Colon, start),
            b'.' => self.single(TokenKind::Dot, start),
            b'\'' | b'"' => self.lex_string(b, start),
            b'/' => self.lex_regex(start),
            b'0'..=b'9' => self.lex_number(start),
            _ if is_ident_start(b) => self.lex_ident_or_keyword(start),
            other => Err(LexError {
                message: format!("unexpected character '{}'", other as char),
                pos: start,
            }),
        }
    }

    fn single(&mut self, kind: TokenKind, start: usize) -> Result<Token, LexError> {
        self.pos += 1;
        Ok(Token {
            kind,
            span: Span::from_len(start as u32, 1),
            text: self.src[start..self.pos].to_string(),
            aux: String::new(),
        })
    }

    fn lex_string(&mut self, quote: u8, start: usize) -> Result<Token, LexError> {
        self.pos += 1; // opening quote
        let mut out = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(LexError {
                        message: "unterminated string literal".into(),
                        pos: start,
                    });
                }
                Some(b) if b == quote => break,
                Some(b'\\') => {
                    let escaped = self.bump().ok_or_else(|| LexError {
                        message: "unterminated escape sequence".into(),
                        pos: start,
                    })?;
                    out.push(match escaped {
                        b'n' => '\n',
                        b't' => '\t',
                        b'r' => '\r',
                        b'0' => '\0',
                        b'\\' => '\\',
                        b'\'' => '\'',
                        b'"' => '"',
                        other => other as char,
                    });
                }
                Some(b) => out.push(b as char),
            }
        }
        Ok(Token {
            kind: TokenKind::String,
            span: Span::new(start as u32, self.pos as u32),
            text: out,
            aux: String::new(),
        })
    }

    fn lex_regex(&mut self, start: usize) -> Result<Token, LexError> {
        self.pos += 1; // opening '/'
        let mut pattern = String::new();
        let mut in_class = false;
        loop {
            match self.bump() {
                None => {
                    return Err(LexError {
                        message: "unterminated regular expression literal".into(),
                        pos: start,
                    });
                }
                Some(b'\\') => {
                    pattern.push('\\');
                    if let Some(next) = self.bump() {
                        pattern.push(next as char);
                    }
                }
                Some(b'[') => {
                    in_class = true;
                    pattern.push('[');
                }
                Some(b']') => {
                    in_class = false;
                    pattern.push(']');
                }
                Some(b'/') if !in_class => break,
                Some(b) => pattern.push(b as char),
            }
        }
        let flags_start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphabetic() {
                self.pos += 1;
            } else {
                break;
            }
        }
        let flags = self.src[flags_start..self.pos].to_string();
        self.last_regex_flags = flags.clone();
        Ok(Token {
            kind: TokenKind::Regex,
            span: Span::new(start as u32, self.pos as u32),
            text: pattern,
            aux: flags,
        })
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, LexError> {
        // 0x / 0o / 0b prefixed literals
        if self.peek() == Some(b'0') {
            if let Some(next) = self.peek_at(1) {
                if matches!(next, b'x' | b'X' | b'o' | b'O' | b'b' | b'B') {
                    self.pos += 2;
                    while let Some(b) = self.peek() {
                        if b.is_ascii_alphanumeric() || b == b'_' {
                            self.pos += 1;
                        } else {
                            break;
                        }
                    }
                    return Ok(self.number_token(start));
                }
            }
        }

        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            while let Some(b) = self.peek() {
                if b.is_ascii_digit() || b == b'_' {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mut lookahead = self.pos + 1;
            if matches!(self.bytes.get(lookahead), Some(b'+') | Some(b'-')) {
                lookahead += 1;
            }
            if self.bytes.get(lookahead).is_some_and(|b| b.is_ascii_digit()) {
                self.pos = lookahead;
                while let Some(b) = self.peek() {
                    if b.is_ascii_digit() {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
            }
        }
        Ok(self.number_token(start))
    }

    fn number_token(&mut self, start: usize) -> Token {
        Token {
            kind: TokenKind::Number,
            span: Span::new(start as u32, self.pos as u32),
            text: self.src[start..self.pos].to_string(),
            aux: String::new(),
        }
    }

    fn lex_ident_or_keyword(&mut self, start: usize) -> Result<Token, LexError> {
        while let Some(b) = self.peek() {
            if is_ident_continue(b) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = self.src[start..self.pos].to_string();
        let kind = match text.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "undefined" => TokenKind::Undefined,
            "new" => TokenKind::New,
            _ => TokenKind::Ident,
        };
        Ok(Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
            text,
            aux: String::new(),
        })
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_punctuation_and_new() {
        assert_eq!(
            kinds("new Foo(1, 2)"),
            vec![
                TokenKind::New,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_string_with_escapes() {
        let toks = Lexer::new(r#"'a\'b'"#).tokenize().unwrap();
        assert_eq!(toks[0].text, "a'b");
    }

    #[test]
    fn lexes_regex_and_flags() {
        let mut lexer = Lexer::new("/foo\\/bar/gi");
        let toks = lexer.tokenize_collect();
        assert_eq!(toks[0].kind, TokenKind::Regex);
        assert_eq!(toks[0].text, "foo\\/bar");
    }

    #[test]
    fn classifies_numeric_forms() {
        assert_eq!(kinds("0x1F"), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(kinds("0o17"), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Number, TokenKind::Eof]);
    }
}

#[cfg(test)]
impl<'a> Lexer<'a> {
    fn tokenize_collect(&mut self) -> Vec<Token> {
        let mut out = Vec::new();
        loop {
            let tok = self.next_token().unwrap();
            let eof = tok.kind == TokenKind::Eof;
            out.push(tok);
            if eof {
                break;
            }
        }
        out
    }
}
