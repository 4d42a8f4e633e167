//! Tree notation
//!
//! A compact s-expression form of a tree, one node per parenthesized group:
//!
//!     (NOVELLA (LEVEL @1:1 (LEVEL_TITLE (WORD "Intro")) (PARAGRAPH_REGULAR (WORD "Hi"))))
//!
//! After the kind come the optional quoted text (`\"`, `\\`, `\n` and `\t` escapes), the
//! optional location (`@line:col` or `@file:line:col`) and the children. [`write_notation`]
//! is what `Debug` prints for nodes; [`read_notation`] reads it back, which keeps fixtures
//! in tests short.

use logos::Logos;
use std::ops::Range;

use crate::folio::ast::{Location, Node, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("unexpected character at offset {offset}")]
    UnexpectedCharacter { offset: usize },
    #[error("expected {expected} at offset {offset}, found '{found}'")]
    UnexpectedToken {
        offset: usize,
        expected: &'static str,
        found: String,
    },
    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str },
    #[error("unknown node kind '{kind}' at offset {offset}")]
    UnknownKind { offset: usize, kind: String },
    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[token("(")]
    Open,
    #[token(")")]
    Close,
    #[regex("[A-Z][A-Z0-9_]*", |lex| lex.slice().to_string())]
    Kind(String),
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    Text(String),
    // Whole location in one run; the file part may itself contain ':'.
    #[regex(r"@[^\s()@]+", |lex| parse_location(&lex.slice()[1..]))]
    At(Location),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Open => "(".to_string(),
            Token::Close => ")".to_string(),
            Token::Kind(kind) => kind.clone(),
            Token::Text(text) => format!("\"{}\"", escape(text)),
            Token::At(location) => format!("@{}", location),
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decodes a quoted literal, quotes included. Unknown escapes keep the escaped character.
fn unescape(quoted: &str) -> String {
    let body = &quoted[1..quoted.len() - 1];
    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some(other) => text.push(other),
            None => {}
        }
    }
    text
}

fn parse_location(source: &str) -> Option<Location> {
    let mut parts = source.rsplitn(3, ':');
    let column = parts.next()?.parse().ok()?;
    let line = parts.next()?.parse().ok()?;
    Some(match parts.next() {
        Some(file) => Location::in_file(file, line, column),
        None => Location::new(line, column),
    })
}

/// Writes `node` and its descendants on one line.
pub fn write_notation(node: &Node) -> String {
    let mut output = String::new();
    write_node(node, &mut output);
    output
}

fn write_node(node: &Node, output: &mut String) {
    output.push('(');
    output.push_str(node.kind().name());
    if let Some(text) = node.text() {
        output.push_str(" \"");
        output.push_str(&escape(text));
        output.push('"');
    }
    if let Some(location) = node.location() {
        output.push_str(" @");
        output.push_str(&location.to_string());
    }
    for child in node.child_nodes() {
        output.push(' ');
        write_node(child, output);
    }
    output.push(')');
}

/// Reads a single tree. Whitespace between tokens is insignificant.
pub fn read_notation(source: &str) -> Result<Node, NotationError> {
    let tokens = Token::lexer(source)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(NotationError::UnexpectedCharacter { offset: span.start }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut reader = Reader { tokens, cursor: 0 };
    let node = reader.node()?;
    match reader.tokens.get(reader.cursor) {
        Some((_, span)) => Err(NotationError::TrailingInput { offset: span.start }),
        None => Ok(node),
    }
}

struct Reader {
    tokens: Vec<(Token, Range<usize>)>,
    cursor: usize,
}

impl Reader {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(token, _)| token)
    }

    fn advance(&mut self, expected: &'static str) -> Result<(Token, usize), NotationError> {
        let (token, span) = self
            .tokens
            .get(self.cursor)
            .cloned()
            .ok_or(NotationError::UnexpectedEnd { expected })?;
        self.cursor += 1;
        Ok((token, span.start))
    }

    fn node(&mut self) -> Result<Node, NotationError> {
        match self.advance("'('")? {
            (Token::Open, _) => {}
            (other, offset) => {
                return Err(NotationError::UnexpectedToken {
                    offset,
                    expected: "'('",
                    found: other.describe(),
                })
            }
        }

        let kind = match self.advance("a node kind")? {
            (Token::Kind(name), offset) => NodeKind::from_name(&name)
                .ok_or(NotationError::UnknownKind { offset, kind: name })?,
            (other, offset) => {
                return Err(NotationError::UnexpectedToken {
                    offset,
                    expected: "a node kind",
                    found: other.describe(),
                })
            }
        };
        let mut node = Node::new(kind);

        if let Some(Token::Text(text)) = self.peek() {
            node = node.with_text(text.clone());
            self.cursor += 1;
        }
        if let Some(Token::At(location)) = self.peek() {
            node = node.with_location(location.clone());
            self.cursor += 1;
        }

        let mut children = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Close) => {
                    self.cursor += 1;
                    break;
                }
                Some(Token::Open) => children.push(self.node()?),
                Some(_) => {
                    let (other, offset) = self.advance("')'")?;
                    return Err(NotationError::UnexpectedToken {
                        offset,
                        expected: "')' or a child node",
                        found: other.describe(),
                    });
                }
                None => {
                    return Err(NotationError::UnexpectedEnd { expected: "')'" });
                }
            }
        }

        Ok(node.with_children(children))
    }
}
