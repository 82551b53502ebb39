//! Lexer for Tamarin using logos.
//!
//! Produces a `TokenList` terminated by `Eof`. Newlines are ordinary
//! whitespace; `//` and `#` start line comments.

mod cook_escape;
mod lex_error;

use logos::Logos;
use tam_ir::{Name, Span, Token, TokenKind, TokenList};

pub use lex_error::{LexError, LexErrorKind};

/// Raw token from logos (before literal conversion).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"#[^\n]*")]
    HashComment,

    // Keywords
    #[token("let")]
    Let,
    #[token("func")]
    Func,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Literals
    #[regex(r"[0-9][0-9_]*")]
    Int,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    Float,

    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,

    /// Backtick string: no escapes, may span lines.
    #[regex(r"`[^`]*`")]
    RawString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source code into a `TokenList`.
///
/// Stops at the first malformed token.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::LineComment | RawToken::HashComment) => {}
            Ok(raw) => {
                let kind = convert_token(raw, slice, span)?;
                result.push(Token::new(kind, span));
            }
            Err(()) => return Err(unexpected(slice, span, source)),
        }
    }

    let eof = Span::from_range(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof));
    Ok(result)
}

/// Classify a slice logos could not match.
fn unexpected(slice: &str, span: Span, source: &str) -> LexError {
    let first = slice.chars().next().unwrap_or('\0');
    if first == '"' || first == '`' {
        let rest = Span::new(span.start, Span::from_range(0..source.len()).end);
        return LexError::new(LexErrorKind::UnterminatedString, rest);
    }
    LexError::new(LexErrorKind::UnexpectedChar(first), span)
}

fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Int => match parse_int_skip_underscores(slice) {
            Some(n) => TokenKind::Int(n),
            None => {
                return Err(LexError::new(
                    LexErrorKind::IntOverflow(slice.to_string()),
                    span,
                ))
            }
        },
        RawToken::Float => match parse_float_skip_underscores(slice) {
            Some(f) => TokenKind::Float(f.to_bits()),
            None => {
                return Err(LexError::new(
                    LexErrorKind::InvalidFloat(slice.to_string()),
                    span,
                ))
            }
        },
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::String(cook_escape::unescape_string(content, span.start + 1)?)
        }
        RawToken::RawString => TokenKind::String(slice[1..slice.len() - 1].to_string()),
        RawToken::Ident => TokenKind::Ident(Name::new(slice)),

        RawToken::Let => TokenKind::Let,
        RawToken::Func => TokenKind::Func,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::For => TokenKind::For,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,

        // Filtered out by `lex`.
        RawToken::LineComment | RawToken::HashComment => TokenKind::Eof,
    };
    Ok(kind)
}

/// Parse a decimal integer, skipping `_` separators, without allocating.
#[inline]
fn parse_int_skip_underscores(s: &str) -> Option<i64> {
    let mut result: i64 = 0;
    for c in s.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10)?;
        result = result.checked_mul(10)?;
        result = result.checked_add(i64::from(digit))?;
    }
    Some(result)
}

/// Parse a float; only allocates if underscores are present.
#[inline]
fn parse_float_skip_underscores(s: &str) -> Option<f64> {
    if s.contains('_') {
        s.replace('_', "").parse().ok()
    } else {
        s.parse().ok()
    }
}
