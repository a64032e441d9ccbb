// csssan-core/tests/at_rule_tests.rs
use std::ptr;

use csssan_core::{AtRule, CssObject, CssSanError, Position, SimpleBlock, Token, TokenKind};

fn at_keyword() -> Token {
    Token::with(TokenKind::AtKeyword, "foobar").at(123, 42)
}

#[test]
fn test_non_at_keyword_is_rejected() {
    let err = AtRule::new(Token::with(TokenKind::Ident, "value")).unwrap_err();
    assert_eq!(err, CssSanError::NotAtKeyword(TokenKind::Ident));
    assert_eq!(err.to_string(), "At rule must begin with an at-keyword token, got ident");
}

#[test]
fn test_bad_block_is_rejected() {
    let mut rule = AtRule::new(Token::with(TokenKind::AtKeyword, "value")).unwrap();
    let block = SimpleBlock::new_from_delimiter(TokenKind::LeftBracket).unwrap();
    let err = rule.set_block(Some(block)).unwrap_err();
    assert_eq!(err.to_string(), "At-rule block must be delimited by {}");
    assert!(rule.block().is_none());
}

#[test]
fn test_clone_is_independent() {
    let mut rule = AtRule::new(at_keyword()).unwrap();
    rule.prelude_mut().add(Token::new(TokenKind::Whitespace));
    rule.set_block(Some(SimpleBlock::new(Token::new(TokenKind::LeftBrace)).unwrap()))
        .unwrap();

    let mut rule2 = rule.clone();
    assert_eq!(rule, rule2);
    assert!(!ptr::eq(rule.prelude(), rule2.prelude()));
    assert!(!ptr::eq(rule.block().unwrap(), rule2.block().unwrap()));

    rule2.prelude_mut().add(Token::with(TokenKind::Ident, "x"));
    assert_eq!(rule.prelude().len(), 1);
    assert_eq!(rule2.prelude().len(), 2);

    let rule = AtRule::new(at_keyword()).unwrap();
    assert!(rule.clone().block().is_none());
}

#[test]
fn test_basics() {
    let at_token = at_keyword();
    let colon = Token::new(TokenKind::Colon);
    let ident = Token::with(TokenKind::Ident, "bar");
    let comment = Token::with(TokenKind::PpComment, "@nowrap");
    let ws = Token::new(TokenKind::Whitespace);
    let insignificant_ws = Token::new(TokenKind::Whitespace).insignificant();
    let left_brace = Token::new(TokenKind::LeftBrace);
    let right_brace = Token::new(TokenKind::RightBrace);

    let mut rule = AtRule::new(at_token.clone()).unwrap();
    assert_eq!(rule.position(), Position::new(123, 42));
    assert!(rule.pp_comments().is_empty());
    assert_eq!(rule.name(), "foobar");
    assert!(rule.prelude().is_empty());
    assert!(rule.block().is_none());

    rule.set_pp_comments(vec![comment.clone()]);
    assert_eq!(rule.pp_comments(), &[comment.clone()]);

    rule.prelude_mut().add(ws.clone());
    rule.prelude_mut().add(ws.clone());
    assert_eq!(
        rule.to_token_array(),
        vec![
            comment.clone(),
            insignificant_ws.clone(),
            at_token.clone(),
            ws.clone(),
            ws.clone(),
            Token::new(TokenKind::Semicolon),
        ]
    );
    assert_eq!(rule.to_string(), rule.to_css());

    let mut block = SimpleBlock::new(left_brace.clone()).unwrap();
    block.value_mut().add(ws.clone());
    rule.set_block(Some(block.clone())).unwrap();
    assert_eq!(rule.block(), Some(&block));
    assert_eq!(
        rule.to_token_array(),
        vec![
            comment.clone(),
            insignificant_ws.clone(),
            at_token.clone(),
            ws.clone(),
            ws.clone(),
            left_brace.clone(),
            ws.clone(),
            right_brace.clone(),
        ]
    );
    assert_eq!(rule.to_string(), rule.to_css());

    rule.prelude_mut().clear();
    rule.prelude_mut().add(colon.clone());
    assert_eq!(
        rule.to_token_array(),
        vec![
            comment.clone(),
            insignificant_ws.clone(),
            at_token.clone(),
            colon,
            left_brace.clone(),
            ws.clone(),
            right_brace.clone(),
        ]
    );

    rule.prelude_mut().clear();
    rule.prelude_mut().add(ident.clone());
    assert_eq!(
        rule.to_token_array(),
        vec![comment, insignificant_ws, at_token, ident, left_brace, ws, right_brace]
    );

    // The separator between `@foobar` and `bar` keeps them from lexing as one keyword.
    assert_eq!(rule.to_css(), "/*@nowrap*/ @foobar/**/bar{ }");

    let rule = AtRule::new_from_name("qwerty");
    assert_eq!(rule.name(), "qwerty");
    assert!(!rule.position().is_known());
}

#[test]
fn test_without_pp_comments_no_separator_is_emitted() {
    let rule = AtRule::new_from_name("import");
    assert_eq!(
        rule.to_token_array(),
        vec![Token::with(TokenKind::AtKeyword, "import"), Token::new(TokenKind::Semicolon)]
    );
    assert_eq!(rule.to_css(), "@import;");
}
