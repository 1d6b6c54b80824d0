//! Recursive descent parser over the logos token stream
//!
//! Grammar, one statement per line:
//!
//! ```text
//! document := (line ("\n" line)*)?
//! line     := ε | COMMENT | entry COMMENT?
//! entry    := access+ "=" literal
//! access   := "." key | "{" key "}" | "[" ("i" | key)? "]" | "(" "i"? ")"
//! key      := IDENT | INTEGER | "true" | "false" | "null" | STRING
//! literal  := "null" | "true" | "false" | INTEGER | DECIMAL | STRING
//! ```

use super::ast::{Access, AccessKind, Entry, Literal, Statement};
use super::diagnostics::SyntaxError;
use super::lexer::{tokenize, Span, Token};
use serde_json::{Number, Value};

const ACCESS: &str = "an access (`.`, `{`, `[` or `(`)";

pub fn parse(source: &str) -> Result<Vec<Statement>, SyntaxError> {
    let tokens = tokenize(source).map_err(|span| SyntaxError::UnknownCharacter { span })?;
    Parser {
        tokens,
        pos: 0,
        end: source.len(),
    }
    .document()
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, Span)>,
    pos: usize,
    end: usize,
}

impl<'src> Parser<'src> {
    fn document(mut self) -> Result<Vec<Statement>, SyntaxError> {
        let mut statements = Vec::new();
        while let Some((token, _)) = self.peek() {
            match token {
                Token::Newline => {
                    self.pos += 1;
                    statements.push(Statement::Blank);
                }
                Token::Comment(text) => {
                    self.pos += 1;
                    statements.push(Statement::Comment(comment_text(text)));
                    self.end_of_line()?;
                }
                _ => {
                    let entry = self.entry()?;
                    statements.push(Statement::Entry(entry));
                }
            }
        }
        Ok(statements)
    }

    fn entry(&mut self) -> Result<Entry, SyntaxError> {
        let mut accesses = vec![self.access()?];
        while !matches!(self.peek(), Some((Token::Eq, _))) {
            accesses.push(self.access()?);
        }
        self.pos += 1;
        let value = self.literal()?;
        let comment = match self.peek() {
            Some((Token::Comment(text), _)) => {
                self.pos += 1;
                Some(comment_text(text))
            }
            _ => None,
        };
        self.end_of_line()?;
        Ok(Entry {
            accesses,
            value,
            comment,
        })
    }

    fn access(&mut self) -> Result<Access, SyntaxError> {
        let (token, span) = self.next(ACCESS)?;
        let (kind, end) = match token {
            Token::Dot => {
                let (name, key_span) = self.key()?;
                (AccessKind::Field(name), key_span.end)
            }
            Token::LBrace => {
                let (name, _) = self.key()?;
                let close = self.expect(Token::RBrace, "`}`")?;
                (AccessKind::MapKey(name), close.end)
            }
            Token::LBracket => {
                let kind = match self.peek() {
                    Some((Token::RBracket, _)) => AccessKind::Last,
                    Some((Token::Ident("i"), _)) => {
                        self.pos += 1;
                        AccessKind::Push
                    }
                    _ => AccessKind::Keyed(self.key()?.0),
                };
                let close = self.expect(Token::RBracket, "`]`")?;
                (kind, close.end)
            }
            Token::LParen => {
                let kind = match self.peek() {
                    Some((Token::Ident("i"), _)) => {
                        self.pos += 1;
                        AccessKind::TuplePush
                    }
                    _ => AccessKind::TupleLast,
                };
                let close = self.expect(Token::RParen, "`i` or `)`")?;
                (kind, close.end)
            }
            other => return Err(unexpected(&other, span, ACCESS)),
        };
        Ok(Access {
            kind,
            span: span.start..end,
        })
    }

    fn key(&mut self) -> Result<(String, Span), SyntaxError> {
        let (token, span) = self.next("a key")?;
        let name = match token {
            Token::Ident(s) | Token::Integer(s) => s.to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::Null => "null".to_string(),
            Token::RawString(s) => s.to_string(),
            Token::EscapedString(s) => unescape(s, &span)?,
            other => return Err(unexpected(&other, span, "a key")),
        };
        Ok((name, span))
    }

    fn literal(&mut self) -> Result<Literal, SyntaxError> {
        let (token, span) = self.next("a value")?;
        let value = match token {
            Token::Null => Value::Null,
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::Integer(s) => Value::Number(integer(s, &span)?),
            Token::Decimal(s) => Value::Number(decimal(s, &span)?),
            Token::RawString(s) => Value::String(s.to_string()),
            Token::EscapedString(s) => Value::String(unescape(s, &span)?),
            Token::RawBlockString(s) => Value::String(block_content(s, &span)?.to_string()),
            Token::EscapedBlockString(s) => {
                Value::String(unescape(block_content(s, &span)?, &span)?)
            }
            other => return Err(unexpected(&other, span, "a value")),
        };
        Ok(Literal { value, span })
    }

    fn end_of_line(&mut self) -> Result<(), SyntaxError> {
        match self.peek() {
            None => Ok(()),
            Some((Token::Newline, _)) => {
                self.pos += 1;
                Ok(())
            }
            Some((token, span)) => Err(unexpected(&token, span, "end of line")),
        }
    }

    fn expect(&mut self, expected: Token<'src>, describe: &str) -> Result<Span, SyntaxError> {
        let (token, span) = self.next(describe)?;
        if token == expected {
            Ok(span)
        } else {
            Err(unexpected(&token, span, describe))
        }
    }

    fn peek(&self) -> Option<(Token<'src>, Span)> {
        self.tokens.get(self.pos).cloned()
    }

    fn next(&mut self, expected: &str) -> Result<(Token<'src>, Span), SyntaxError> {
        let item = self.peek().ok_or_else(|| SyntaxError::UnexpectedEof {
            offset: self.end,
            expected: expected.to_string(),
        })?;
        self.pos += 1;
        Ok(item)
    }
}

fn unexpected(token: &Token<'_>, span: Span, expected: &str) -> SyntaxError {
    SyntaxError::UnexpectedToken {
        span,
        expected: expected.to_string(),
        found: token.describe(),
    }
}

fn comment_text(raw: &str) -> String {
    raw.strip_prefix('#').unwrap_or(raw).trim().to_string()
}

fn integer(text: &str, span: &Span) -> Result<Number, SyntaxError> {
    if let Ok(value) = text.parse::<i64>() {
        return Ok(Number::from(value));
    }
    text.parse::<u64>()
        .map(Number::from)
        .map_err(|_| SyntaxError::InvalidLiteral {
            span: span.clone(),
            message: format!("integer `{text}` is out of range"),
        })
}

fn decimal(text: &str, span: &Span) -> Result<Number, SyntaxError> {
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| SyntaxError::InvalidLiteral {
            span: span.clone(),
            message: format!("decimal `{text}` is out of range"),
        })
}

/// Strip the newlines that open and close a multi-line block string.
fn block_content<'a>(content: &'a str, span: &Span) -> Result<&'a str, SyntaxError> {
    if !content.contains('\n') {
        return Ok(content);
    }
    let invalid = |message: &str| SyntaxError::InvalidLiteral {
        span: span.clone(),
        message: message.to_string(),
    };
    let inner = content
        .strip_prefix("\r\n")
        .or_else(|| content.strip_prefix('\n'))
        .ok_or_else(|| invalid("a multi-line string must start with a line break"))?;
    inner
        .strip_suffix("\r\n")
        .or_else(|| inner.strip_suffix('\n'))
        .ok_or_else(|| invalid("a multi-line string must end with a line break"))
}

/// Decode JSON-style escapes. Raw line breaks and tabs inside block strings are kept.
fn unescape(content: &str, span: &Span) -> Result<String, SyntaxError> {
    let mut json = String::with_capacity(content.len() + 2);
    json.push('"');
    let mut escaped = false;
    for c in content.chars() {
        if escaped {
            if c.is_control() {
                return Err(SyntaxError::InvalidLiteral {
                    span: span.clone(),
                    message: "a backslash cannot escape a line break".to_string(),
                });
            }
            json.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                json.push(c);
                escaped = true;
            }
            '"' => json.push_str("\\\""),
            '\n' => json.push_str("\\n"),
            '\r' => json.push_str("\\r"),
            '\t' => json.push_str("\\t"),
            c if c.is_control() => json.push_str(&format!("\\u{:04x}", c as u32)),
            c => json.push(c),
        }
    }
    json.push('"');
    serde_json::from_str(&json).map_err(|e| SyntaxError::InvalidLiteral {
        span: span.clone(),
        message: format!("invalid escape sequence: {e}"),
    })
}
