//! Lexer for marc source using logos
//!
//! Newlines are significant (one entry per line) so only horizontal whitespace is skipped.
//! Multi-line strings are single tokens and may contain newlines.

use logos::Logos;
use std::ops::Range;

pub type Span = Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token<'src> {
    #[token("\n")]
    Newline,

    #[regex(r"#[^\n]*", |lex| lex.slice())]
    Comment(&'src str),

    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[regex(r"-?[0-9]+", |lex| lex.slice(), priority = 3)]
    Integer(&'src str),

    #[regex(r"-?[0-9]+(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)", |lex| lex.slice(), priority = 3)]
    Decimal(&'src str),

    #[regex(r"[A-Za-z0-9_-]+", |lex| lex.slice())]
    Ident(&'src str),

    /// `'...'`, content taken verbatim
    #[regex(r"'[^'\n]*'", |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    RawString(&'src str),

    /// `"..."`, JSON escapes
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    EscapedString(&'src str),

    /// `'''...'''`, verbatim and may span lines
    #[regex(r"'''([^']|'[^']|''[^'])*'''", |lex| { let s = lex.slice(); &s[3..s.len() - 3] })]
    RawBlockString(&'src str),

    /// `"""..."""`, JSON escapes and may span lines
    #[regex(r#""""([^"\\]|\\.)*""""#, |lex| { let s = lex.slice(); &s[3..s.len() - 3] })]
    EscapedBlockString(&'src str),
}

impl Token<'_> {
    /// Short human description used in "expected ..., found ..." messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Newline => "end of line".to_string(),
            Token::Comment(_) => "comment".to_string(),
            Token::Dot => "`.`".to_string(),
            Token::Eq => "`=`".to_string(),
            Token::LBracket => "`[`".to_string(),
            Token::RBracket => "`]`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::LBrace => "`{`".to_string(),
            Token::RBrace => "`}`".to_string(),
            Token::True | Token::False => "boolean".to_string(),
            Token::Null => "`null`".to_string(),
            Token::Integer(s) => format!("integer `{s}`"),
            Token::Decimal(s) => format!("decimal `{s}`"),
            Token::Ident(s) => format!("identifier `{s}`"),
            Token::RawString(_)
            | Token::EscapedString(_)
            | Token::RawBlockString(_)
            | Token::EscapedBlockString(_) => "string".to_string(),
        }
    }
}

/// Tokenize `source`, returning every token with its byte span.
///
/// The first character that starts no token is reported as `Err(span)`.
pub fn tokenize(source: &str) -> Result<Vec<(Token<'_>, Span)>, Span> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| token.map(|t| (t, span.clone())).map_err(|_| span))
        .collect()
}
