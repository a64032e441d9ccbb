// csssan-core/src/util.rs
//! Token-level serialization back to CSS text.
//!
//! Identifiers, names and strings are re-escaped through `cssparser`'s serializers, so
//! a sanitized tree always renders to text that re-lexes into the same tokens.

use cssparser::{serialize_identifier, serialize_name, serialize_string};
use std::fmt::{self, Write};

use crate::objects::{Token, TokenKind};

/// Renders a single token.
pub fn write_token<W: Write>(token: &Token, dest: &mut W) -> fmt::Result {
    let value = token.value();
    match token.kind() {
        TokenKind::Ident => serialize_identifier(value, dest),
        TokenKind::Function => {
            serialize_identifier(value, dest)?;
            dest.write_char('(')
        }
        TokenKind::AtKeyword => {
            dest.write_char('@')?;
            serialize_identifier(value, dest)
        }
        TokenKind::Hash => {
            dest.write_char('#')?;
            serialize_name(value, dest)
        }
        TokenKind::String | TokenKind::BadString => serialize_string(value, dest),
        TokenKind::Url | TokenKind::BadUrl => {
            dest.write_str("url(")?;
            serialize_string(value, dest)?;
            dest.write_char(')')
        }
        TokenKind::Delim | TokenKind::Number | TokenKind::Percentage | TokenKind::Dimension => {
            dest.write_str(value)
        }
        TokenKind::Whitespace => {
            if !value.is_empty() && value.chars().all(char::is_whitespace) {
                dest.write_str(value)
            } else {
                dest.write_char(' ')
            }
        }
        TokenKind::PpComment => {
            dest.write_str("/*")?;
            dest.write_str(&value.replace("*/", "* /"))?;
            dest.write_str("*/")
        }
        TokenKind::Cdo => dest.write_str("<!--"),
        TokenKind::Cdc => dest.write_str("-->"),
        TokenKind::Colon => dest.write_char(':'),
        TokenKind::Semicolon => dest.write_char(';'),
        TokenKind::Comma => dest.write_char(','),
        TokenKind::LeftBracket => dest.write_char('['),
        TokenKind::RightBracket => dest.write_char(']'),
        TokenKind::LeftParen => dest.write_char('('),
        TokenKind::RightParen => dest.write_char(')'),
        TokenKind::LeftBrace => dest.write_char('{'),
        TokenKind::RightBrace => dest.write_char('}'),
        TokenKind::IncludeMatch => dest.write_str("~="),
        TokenKind::DashMatch => dest.write_str("|="),
        TokenKind::PrefixMatch => dest.write_str("^="),
        TokenKind::SuffixMatch => dest.write_str("$="),
        TokenKind::SubstringMatch => dest.write_str("*="),
    }
}

/// Concatenates tokens into CSS text.
///
/// An empty comment is emitted between two tokens that would otherwise lex as one
/// (`a` `b` would become the single ident `ab`).
pub fn stringify(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    for token in tokens {
        if prev.is_some_and(|p| needs_separator(p, token)) {
            out.push_str("/**/");
        }
        // Writing into a String cannot fail.
        let _ = write_token(token, &mut out);
        prev = Some(token);
    }
    out
}

fn starts_word(token: &Token) -> bool {
    matches!(
        token.kind(),
        TokenKind::Ident
            | TokenKind::Function
            | TokenKind::Url
            | TokenKind::BadUrl
            | TokenKind::Number
            | TokenKind::Percentage
            | TokenKind::Dimension
            | TokenKind::Cdc
    ) || token.matches(TokenKind::Delim, "-")
}

fn starts_number(token: &Token) -> bool {
    matches!(token.kind(), TokenKind::Number | TokenKind::Percentage | TokenKind::Dimension)
}

fn needs_separator(prev: &Token, next: &Token) -> bool {
    match prev.kind() {
        TokenKind::Ident | TokenKind::AtKeyword | TokenKind::Hash | TokenKind::Dimension => {
            starts_word(next) || next.is(TokenKind::LeftParen)
        }
        TokenKind::Number => {
            starts_word(next) || next.matches(TokenKind::Delim, "%") || next.matches(TokenKind::Delim, ".")
        }
        TokenKind::Delim => match prev.value() {
            "#" | "@" | "-" => starts_word(next),
            "." | "+" => starts_number(next),
            "/" => next.matches(TokenKind::Delim, "*"),
            "<" => next.matches(TokenKind::Delim, "!"),
            "|" => next.matches(TokenKind::Delim, "=") || next.matches(TokenKind::Delim, "|"),
            "$" | "*" | "^" | "~" => next.matches(TokenKind::Delim, "="),
            "\\" => true,
            _ => false,
        },
        _ => false,
    }
}
