//! Recursive-descent parser for the surface expression grammar.
//!
//! Covers object/array literals, primitive literals, `new`-style
//! constructor calls, member access, and call expressions. There is no
//! statement or operator grammar to parse: the translator only ever
//! receives one expression.

use crate::ast::{Ast, AstBuilder, NodeId, NodeKind};
use crate::lexer::{LexError, Lexer, Token, TokenKind};
use bt_common::numeric::classify_numeric_literal;
use bt_common::numeric::NumericForm;
use bt_common::{Span, TranslateError};

#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub pos: usize,
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError {
            message: e.message,
            pos: e.pos,
        }
    }
}

impl From<ParseError> for TranslateError {
    fn from(e: ParseError) -> Self {
        TranslateError::generic(e.message).at(Span::at(e.pos as u32))
    }
}

pub fn parse(src: &str) -> Result<Ast, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        builder: AstBuilder::new(src),
    };
    let root = parser.parse_expression()?;
    parser.expect_eof()?;
    Ok(parser.builder.finish(root))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    builder: AstBuilder,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.peek().kind == kind {
            Ok(self.bump())
        } else {
            Err(ParseError {
                message: format!("expected {:?}, found {:?}", kind, self.peek().kind),
                pos: self.peek().span.start as usize,
            })
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.peek().kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(ParseError {
                message: format!("unexpected trailing token {:?}", self.peek().kind),
                pos: self.peek().span.start as usize,
            })
        }
    }

    /// Parse a primary expression, then any trailing `.attr` / `(args)`
    /// suffixes (member access and call expressions nest this way).
    fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        let mut node = self.parse_primary()?;
        loop {
            match self.peek().kind {
                TokenKind::Dot => {
                    let start = self.builder.span(node).start;
                    self.bump();
                    let name_tok = self.expect(TokenKind::Ident)?;
                    let end = name_tok.span.end;
                    node = self.builder.push(
                        NodeKind::MemberAccess { name: name_tok.text },
                        vec![node],
                        Span::new(start, end),
                    );
                }
                TokenKind::LParen => {
                    let start = self.builder.span(node).start;
                    let args = self.parse_call_args()?;
                    let end = self.tokens[self.pos.saturating_sub(1)].span.end;
                    let mut children = vec![node];
                    children.extend(args);
                    node = self.builder.push(NodeKind::CallExpression, children, Span::new(start, end));
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn parse_call_args(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if self.peek().kind != TokenKind::RParen {
            loop {
                args.push(self.parse_expression()?);
                if self.peek().kind == TokenKind::Comma {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::New => {
                self.bump();
                let inner = self.parse_new_target()?;
                Ok(self
                    .builder
                    .push(NodeKind::NewExpression, vec![inner], Span::new(tok.span.start, self.prev_end())))
            }
            TokenKind::String => {
                self.bump();
                Ok(self.builder.push(
                    NodeKind::StringLiteral { value: tok.text },
                    vec![],
                    tok.span,
                ))
            }
            TokenKind::Number => {
                self.bump();
                let kind = match classify_numeric_literal(&tok.text) {
                    NumericForm::Integer => NodeKind::IntegerLiteral,
                    NumericForm::Decimal => NodeKind::DecimalLiteral,
                    NumericForm::Hex => NodeKind::HexLiteral,
                    NumericForm::Octal => NodeKind::OctalLiteral,
                };
                Ok(self.builder.push(kind, vec![], tok.span))
            }
            TokenKind::Regex => {
                self.bump();
                Ok(self.builder.push(
                    NodeKind::RegexLiteral {
                        pattern: tok.text,
                        flags: tok.aux,
                    },
                    vec![],
                    tok.span,
                ))
            }
            TokenKind::True => {
                self.bump();
                Ok(self.builder.push(NodeKind::BooleanLiteral(true), vec![], tok.span))
            }
            TokenKind::False => {
                self.bump();
                Ok(self.builder.push(NodeKind::BooleanLiteral(false), vec![], tok.span))
            }
            TokenKind::Null => {
                self.bump();
                Ok(self.builder.push(NodeKind::NullLiteral, vec![], tok.span))
            }
            TokenKind::Undefined => {
                self.bump();
                Ok(self.builder.push(NodeKind::UndefinedLiteral, vec![], tok.span))
            }
            TokenKind::Ident => {
                self.bump();
                Ok(self.builder.push(NodeKind::Identifier, vec![], tok.span))
            }
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(ParseError {
                message: format!("unexpected token {other:?}"),
                pos: tok.span.start as usize,
            }),
        }
    }

    /// After `new`, the target is either a bare identifier/member-access
    /// callee or a full call expression; both parse the same way since
    /// `parse_expression` already folds call-suffixes onto its result.
    fn parse_new_target(&mut self) -> Result<NodeId, ParseError> {
        self.parse_expression()
    }

    fn parse_object_literal(&mut self) -> Result<NodeId, ParseError> {
        let start_tok = self.expect(TokenKind::LBrace)?;
        let mut props = Vec::new();
        if self.peek().kind != TokenKind::RBrace {
            loop {
                let key_tok = self.peek().clone();
                let key = match key_tok.kind {
                    TokenKind::Ident => {
                        self.bump();
                        self.builder.push(NodeKind::Identifier, vec![], key_tok.span)
                    }
                    TokenKind::String => {
                        self.bump();
                        self.builder.push(
                            NodeKind::StringLiteral { value: key_tok.text.clone() },
                            vec![],
                            key_tok.span,
                        )
                    }
                    _ => {
                        return Err(ParseError {
                            message: format!("expected property key, found {:?}", key_tok.kind),
                            pos: key_tok.span.start as usize,
                        });
                    }
                };
                self.expect(TokenKind::Colon)?;
                let value = self.parse_expression()?;
                let prop_span = Span::new(key_tok.span.start, self.prev_end());
                props.push(self.builder.push(NodeKind::Property, vec![key, value], prop_span));
                if self.peek().kind == TokenKind::Comma {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        let end_tok = self.expect(TokenKind::RBrace)?;
        Ok(self
            .builder
            .push(NodeKind::ObjectLiteral, props, Span::new(start_tok.span.start, end_tok.span.end)))
    }

    fn parse_array_literal(&mut self) -> Result<NodeId, ParseError> {
        let start_tok = self.expect(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::RBracket => break,
                TokenKind::Comma => {
                    let tok = self.bump();
                    elements.push(self.builder.push(NodeKind::Elision, vec![], tok.span));
                    continue;
                }
                _ => {
                    elements.push(self.parse_expression()?);
                    if self.peek().kind == TokenKind::Comma {
                        self.bump();
                    } else {
                        break;
                    }
                }
            }
        }
        let end_tok = self.expect(TokenKind::RBracket)?;
        Ok(self
            .builder
            .push(NodeKind::ArrayLiteral, elements, Span::new(start_tok.span.start, end_tok.span.end)))
    }

    fn prev_end(&self) -> u32 {
        self.tokens[self.pos.saturating_sub(1)].span.end
    }
}
