// csssan-core/src/tokenizer.rs
//! Converts stylesheet text into a flat stream of [`Token`]s using the `cssparser` crate.
//!
//! `cssparser` hands back blocks and functions as single tokens whose contents must be
//! entered with `parse_nested_block`. This adapter flattens them again: an opening token,
//! the contents, then a closing token when the source actually closed the group, which is
//! what the [`Parser`] expects. Comments are dropped. Lines and columns are 1-based.
//!
//! Groups nested deeper than [`MAX_GROUP_DEPTH`] are not entered. Each one is replaced by a
//! single bad-string token, which every sanitizer rejects, and reported as `nesting-too-deep`.
//!
//! [`Parser`]: crate::parser::Parser

use cssparser::{ParseError, Parser as CssParser, ParserInput, ToCss, Token as CssToken};
use log::{debug, trace, warn};

use crate::diagnostic::{Diagnostic, ErrorLog};
use crate::objects::{Position, Token, TokenKind};

/// Deepest block or function nesting that is tokenized, parsed or sanitized.
pub const MAX_GROUP_DEPTH: usize = 64;

pub const NESTING_TOO_DEEP: &str = "nesting-too-deep";

/// Tokenizes `css` completely, discarding diagnostics.
pub fn tokenize(css: &str) -> Vec<Token> {
    tokenize_with_errors(css, &mut ErrorLog::new())
}

/// Tokenizes `css` completely, recording groups that were too deep to enter in `errors`.
pub fn tokenize_with_errors(css: &str, errors: &mut ErrorLog) -> Vec<Token> {
    let mut input = ParserInput::new(css);
    let mut parser = CssParser::new(&mut input);
    let mut tokens = Vec::new();
    read_tokens(&mut parser, &mut tokens, errors, 0);
    debug!("Tokenized {} bytes into {} tokens.", css.len(), tokens.len());
    tokens
}

/// The placeholder left where a too-deep group was skipped.
pub(crate) fn too_deep_marker(position: Position) -> Token {
    Token::new(TokenKind::BadString).with_position(position)
}

fn read_tokens<'i, 't>(
    parser: &mut CssParser<'i, 't>,
    out: &mut Vec<Token>,
    errors: &mut ErrorLog,
    depth: usize,
) {
    loop {
        let location = parser.current_source_location();
        let position = Position::new(i64::from(location.line) + 1, i64::from(location.column));
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        let (open, close) = match &token {
            CssToken::Function(name) => {
                (Token::with(TokenKind::Function, name.as_ref()), TokenKind::RightParen)
            }
            CssToken::ParenthesisBlock => (Token::new(TokenKind::LeftParen), TokenKind::RightParen),
            CssToken::SquareBracketBlock => {
                (Token::new(TokenKind::LeftBracket), TokenKind::RightBracket)
            }
            CssToken::CurlyBracketBlock => (Token::new(TokenKind::LeftBrace), TokenKind::RightBrace),
            other => {
                if let Some(converted) = convert(other) {
                    out.push(converted.with_position(position));
                }
                continue;
            }
        };

        if depth >= MAX_GROUP_DEPTH {
            // The unentered group is skipped by cssparser on the next call.
            warn!("Skipping group nested deeper than {} at {}", MAX_GROUP_DEPTH, position);
            errors.push(Diagnostic::at(NESTING_TOO_DEEP, position));
            out.push(too_deep_marker(position));
            continue;
        }

        out.push(open.with_position(position));
        let mut contents_end = None;
        let nested: Result<(), ParseError<'i, ()>> = parser.parse_nested_block(|inner| {
            read_tokens(inner, out, errors, depth + 1);
            contents_end = Some(inner.position());
            Ok(())
        });
        if let Err(e) = nested {
            trace!("Ignoring nested block error at {}: {:?}", position, e);
        }
        // At end of input nothing follows the contents, so the group was never closed.
        if contents_end.is_some_and(|end| end != parser.position()) {
            let end = parser.current_source_location();
            let end_position =
                Position::new(i64::from(end.line) + 1, (i64::from(end.column) - 1).max(1));
            out.push(Token::new(close).with_position(end_position));
        }
    }
}

/// Maps a non-grouping `cssparser` token. Returns `None` for comments.
fn convert(token: &CssToken<'_>) -> Option<Token> {
    let converted = match token {
        CssToken::Ident(value) => Token::with(TokenKind::Ident, value.as_ref()),
        CssToken::AtKeyword(value) => Token::with(TokenKind::AtKeyword, value.as_ref()),
        CssToken::Hash(value) | CssToken::IDHash(value) => Token::with(TokenKind::Hash, value.as_ref()),
        CssToken::QuotedString(value) => Token::with(TokenKind::String, value.as_ref()),
        CssToken::UnquotedUrl(value) => Token::with(TokenKind::Url, value.as_ref()),
        CssToken::Delim(c) => Token::with(TokenKind::Delim, c.to_string()),
        CssToken::Number { .. } => Token::with(TokenKind::Number, token.to_css_string()),
        CssToken::Percentage { .. } => Token::with(TokenKind::Percentage, token.to_css_string()),
        CssToken::Dimension { .. } => Token::with(TokenKind::Dimension, token.to_css_string()),
        CssToken::WhiteSpace(value) => Token::with(TokenKind::Whitespace, *value),
        CssToken::Comment(_) => return None,
        CssToken::Colon => Token::new(TokenKind::Colon),
        CssToken::Semicolon => Token::new(TokenKind::Semicolon),
        CssToken::Comma => Token::new(TokenKind::Comma),
        CssToken::IncludeMatch => Token::new(TokenKind::IncludeMatch),
        CssToken::DashMatch => Token::new(TokenKind::DashMatch),
        CssToken::PrefixMatch => Token::new(TokenKind::PrefixMatch),
        CssToken::SuffixMatch => Token::new(TokenKind::SuffixMatch),
        CssToken::SubstringMatch => Token::new(TokenKind::SubstringMatch),
        CssToken::CDO => Token::new(TokenKind::Cdo),
        CssToken::CDC => Token::new(TokenKind::Cdc),
        CssToken::BadUrl(value) => Token::with(TokenKind::BadUrl, value.as_ref()),
        CssToken::BadString(value) => Token::with(TokenKind::BadString, value.as_ref()),
        CssToken::CloseParenthesis => Token::new(TokenKind::RightParen),
        CssToken::CloseSquareBracket => Token::new(TokenKind::RightBracket),
        CssToken::CloseCurlyBracket => Token::new(TokenKind::RightBrace),
        // Grouping tokens are handled by the caller.
        CssToken::Function(_)
        | CssToken::ParenthesisBlock
        | CssToken::SquareBracketBlock
        | CssToken::CurlyBracketBlock => return None,
    };
    Some(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::CssObject;

    fn kinds(css: &str) -> Vec<TokenKind> {
        tokenize(css).iter().map(Token::kind).collect()
    }

    #[test]
    fn test_flattens_blocks() {
        assert_eq!(
            kinds("a{color:red}"),
            vec![
                TokenKind::Ident,
                TokenKind::LeftBrace,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::RightBrace,
            ]
        );
    }

    #[test]
    fn test_functions_and_numbers() {
        let tokens = tokenize("rgb(1, 50%) 10px");
        assert_eq!(tokens[0], Token::with(TokenKind::Function, "rgb"));
        assert_eq!(tokens[1], Token::with(TokenKind::Number, "1"));
        assert_eq!(tokens[4], Token::with(TokenKind::Percentage, "50%"));
        assert_eq!(tokens[5].kind(), TokenKind::RightParen);
        assert_eq!(tokens[7], Token::with(TokenKind::Dimension, "10px"));
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = tokenize("a {\n  b: c;\n}");
        assert_eq!(tokens[0].position(), Position::new(1, 1));
        let b = tokens.iter().find(|t| t.value() == "b").unwrap();
        assert_eq!(b.position(), Position::new(2, 3));
    }

    #[test]
    fn test_comments_are_dropped() {
        assert_eq!(kinds("/* x */a"), vec![TokenKind::Ident]);
    }

    #[test]
    fn test_unclosed_groups_get_no_closing_token() {
        assert_eq!(
            kinds("a { b: rgb(1"),
            vec![
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::LeftBrace,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Whitespace,
                TokenKind::Function,
                TokenKind::Number,
            ]
        );
        assert_eq!(kinds("[x /* c */"), vec![TokenKind::LeftBracket, TokenKind::Ident, TokenKind::Whitespace]);
        assert_eq!(kinds("(x)").last(), Some(&TokenKind::RightParen));
    }

    #[test]
    fn test_closing_inside_string_does_not_close() {
        assert_eq!(kinds("{\"}"), vec![TokenKind::LeftBrace, TokenKind::String]);
    }

    #[test]
    fn test_deep_nesting_is_cut_off() {
        let css = format!("{}x", "(".repeat(100_000));
        let mut errors = ErrorLog::new();
        let tokens = tokenize_with_errors(&css, &mut errors);

        assert_eq!(tokens.len(), MAX_GROUP_DEPTH + 1);
        assert!(tokens[..MAX_GROUP_DEPTH].iter().all(|t| t.kind() == TokenKind::LeftParen));
        assert_eq!(tokens[MAX_GROUP_DEPTH].kind(), TokenKind::BadString);
        assert_eq!(errors.to_vec(), vec![Diagnostic::new(NESTING_TOO_DEEP, 1, 65)]);
    }

    #[test]
    fn test_deep_group_is_skipped_as_a_whole() {
        let css = format!("{}{}y", "[".repeat(MAX_GROUP_DEPTH + 3), "]".repeat(MAX_GROUP_DEPTH + 3));
        let tokens = tokenize(&css);
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::BadString).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::RightBracket).count(), MAX_GROUP_DEPTH);
        assert_eq!(tokens.last(), Some(&Token::with(TokenKind::Ident, "y")));
    }

    #[test]
    fn test_unquoted_url() {
        let tokens = tokenize("url(foo.png)");
        assert_eq!(tokens, vec![Token::with(TokenKind::Url, "foo.png")]);
    }
}
