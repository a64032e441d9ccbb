// csssan-core/src/parser.rs
//! Assembles a token stream into rules, declarations and component values.
//!
//! The consumption algorithms follow CSS Syntax Level 3. The parser never fails: malformed
//! input is recovered from the way browsers do, and each recovery is recorded as a
//! [`Diagnostic`] available from [`Parser::parse_errors`].
//!
//! Parsing works on [`Token`]s rather than text so a block's contents can be parsed again
//! later (e.g. the body of an `@media` rule as a rule list) with its original positions.

use log::{debug, warn};
use std::iter::Peekable;
use std::vec::IntoIter;

use crate::diagnostic::{Diagnostic, ErrorLog};
use crate::objects::{
    AtRule, ComponentValue, ComponentValueList, CssFunction, CssObject, Declaration,
    DeclarationList, Position, QualifiedRule, RuleList, SimpleBlock, Token, TokenKind,
};
use crate::tokenizer::{tokenize_with_errors, too_deep_marker, MAX_GROUP_DEPTH, NESTING_TOO_DEEP};

pub struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    reconsumed: Option<Token>,
    errors: ErrorLog,
    depth: usize,
}

impl Parser {
    pub fn new_from_string(css: &str) -> Self {
        let mut errors = ErrorLog::new();
        let tokens = tokenize_with_errors(css, &mut errors);
        let mut parser = Self::new_from_tokens(tokens);
        parser.errors = errors;
        parser
    }

    pub fn new_from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
            reconsumed: None,
            errors: ErrorLog::new(),
            depth: 0,
        }
    }

    /// Parses the top level of a stylesheet. `<!--` and `-->` are ignored here.
    pub fn parse_stylesheet(&mut self) -> RuleList {
        let rules = self.consume_rule_list(true);
        debug!("Parsed stylesheet: {} rules, {} parse errors.", rules.len(), self.errors.len());
        rules
    }

    /// Parses a nested rule list, such as the body of `@media`.
    pub fn parse_rule_list(&mut self) -> RuleList {
        self.consume_rule_list(false)
    }

    /// Parses the body of a declaration block. At-rules found inside are dropped.
    pub fn parse_declaration_list(&mut self) -> DeclarationList {
        let mut list = DeclarationList::new();
        while let Some(token) = self.next() {
            match token.kind() {
                TokenKind::Whitespace | TokenKind::Semicolon => {}
                TokenKind::AtKeyword => {
                    let rule = self.consume_at_rule(token);
                    if let Some(rule) = rule {
                        self.errors.record("unexpected-at-rule", &rule);
                    }
                }
                TokenKind::Ident => {
                    let mut values = vec![ComponentValue::from(token)];
                    while let Some(next) = self.next() {
                        if next.is(TokenKind::Semicolon) {
                            break;
                        }
                        values.push(self.consume_component_value(next));
                    }
                    if let Some(declaration) = self.consume_declaration(values) {
                        list.add(declaration);
                    }
                }
                _ => {
                    self.errors.record("expected-ident", &token);
                    self.reconsume(token);
                    while let Some(next) = self.next() {
                        if next.is(TokenKind::Semicolon) {
                            break;
                        }
                        self.consume_component_value(next);
                    }
                }
            }
        }
        list
    }

    /// Parses everything that is left as a flat list of component values.
    pub fn parse_component_value_list(&mut self) -> ComponentValueList {
        let mut list = ComponentValueList::new();
        while let Some(token) = self.next() {
            list.add(self.consume_component_value(token));
        }
        list
    }

    pub fn parse_errors(&self) -> &[Diagnostic] {
        self.errors.entries()
    }

    pub fn take_parse_errors(&mut self) -> Vec<Diagnostic> {
        let errors = self.errors.to_vec();
        self.errors.clear();
        errors
    }

    fn next(&mut self) -> Option<Token> {
        self.reconsumed.take().or_else(|| self.tokens.next())
    }

    fn reconsume(&mut self, token: Token) {
        self.reconsumed = Some(token);
    }

    fn peek_position(&mut self) -> Position {
        match &self.reconsumed {
            Some(token) => token.position(),
            None => self.tokens.peek().map(CssObject::position).unwrap_or_default(),
        }
    }

    fn consume_rule_list(&mut self, top_level: bool) -> RuleList {
        let mut rules = RuleList::new();
        while let Some(token) = self.next() {
            match token.kind() {
                TokenKind::Whitespace => {}
                TokenKind::Cdo | TokenKind::Cdc if top_level => {}
                TokenKind::AtKeyword => {
                    if let Some(rule) = self.consume_at_rule(token) {
                        rules.add(rule);
                    }
                }
                _ => {
                    self.reconsume(token);
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.add(rule);
                    }
                }
            }
        }
        rules
    }

    fn consume_at_rule(&mut self, keyword: Token) -> Option<AtRule> {
        let mut rule = match AtRule::new(keyword) {
            Ok(rule) => rule,
            Err(e) => {
                warn!("Parser invariant violated: {}", e);
                return None;
            }
        };
        loop {
            match self.next() {
                None => {
                    self.errors.record("unexpected-eof-in-rule", &rule);
                    return Some(rule);
                }
                Some(token) if token.is(TokenKind::Semicolon) => return Some(rule),
                Some(token) if token.is(TokenKind::LeftBrace) => {
                    let block = self.consume_simple_block(token);
                    if let Err(e) = rule.set_block(Some(block)) {
                        warn!("Parser invariant violated: {}", e);
                    }
                    return Some(rule);
                }
                Some(token) => {
                    let value = self.consume_component_value(token);
                    rule.prelude_mut().add(value);
                }
            }
        }
    }

    fn consume_qualified_rule(&mut self) -> Option<QualifiedRule> {
        let mut rule = QualifiedRule::at(self.peek_position());
        loop {
            match self.next() {
                None => {
                    self.errors.record("unexpected-eof-in-rule", &rule);
                    return None;
                }
                Some(token) if token.is(TokenKind::LeftBrace) => {
                    let block = self.consume_simple_block(token);
                    if let Err(e) = rule.set_block(block) {
                        warn!("Parser invariant violated: {}", e);
                    }
                    return Some(rule);
                }
                Some(token) => {
                    let value = self.consume_component_value(token);
                    rule.prelude_mut().add(value);
                }
            }
        }
    }

    fn consume_component_value(&mut self, token: Token) -> ComponentValue {
        if token.kind().opens_group() && self.depth >= MAX_GROUP_DEPTH {
            return self.skip_group(token).into();
        }
        match token.kind() {
            TokenKind::LeftBrace | TokenKind::LeftBracket | TokenKind::LeftParen => {
                self.consume_simple_block(token).into()
            }
            TokenKind::Function => self.consume_function(token).into(),
            _ => token.into(),
        }
    }

    /// Discards the group `open` starts, without recursing, and leaves a marker in its place.
    fn skip_group(&mut self, open: Token) -> Token {
        warn!("Skipping group nested deeper than {} at {}", MAX_GROUP_DEPTH, open.position());
        self.errors.record(NESTING_TOO_DEEP, &open);
        let mut depth = 1usize;
        while let Some(token) = self.next() {
            if token.kind().opens_group() {
                depth += 1;
            } else if token.kind().closes_group() {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
        }
        too_deep_marker(open.position())
    }

    /// `open` must be `{`, `[` or `(`.
    fn consume_simple_block(&mut self, open: Token) -> SimpleBlock {
        self.depth += 1;
        let block = self.consume_simple_block_contents(open);
        self.depth -= 1;
        block
    }

    fn consume_simple_block_contents(&mut self, open: Token) -> SimpleBlock {
        let close = open.kind().matching_close();
        let mut block = match SimpleBlock::new(open) {
            Ok(block) => block,
            Err(e) => unreachable!("consume_simple_block called with {}", e),
        };
        loop {
            match self.next() {
                None => {
                    self.errors.record("unexpected-eof-in-block", &block);
                    return block;
                }
                Some(token) if Some(token.kind()) == close => return block,
                Some(token) => {
                    let value = self.consume_component_value(token);
                    block.value_mut().add(value);
                }
            }
        }
    }

    /// `name` must be a function token.
    fn consume_function(&mut self, name: Token) -> CssFunction {
        self.depth += 1;
        let function = self.consume_function_contents(name);
        self.depth -= 1;
        function
    }

    fn consume_function_contents(&mut self, name: Token) -> CssFunction {
        let mut function = match CssFunction::new(name) {
            Ok(function) => function,
            Err(e) => unreachable!("consume_function called with {}", e),
        };
        loop {
            match self.next() {
                None => {
                    self.errors.record("unexpected-eof-in-function", &function);
                    return function;
                }
                Some(token) if token.is(TokenKind::RightParen) => return function,
                Some(token) => {
                    let value = self.consume_component_value(token);
                    function.value_mut().add(value);
                }
            }
        }
    }

    /// Builds a declaration from `name ws* : value [! important]`.
    fn consume_declaration(&mut self, values: Vec<ComponentValue>) -> Option<Declaration> {
        let mut values = values.into_iter();
        let name = match values.next() {
            Some(ComponentValue::Token(token)) => token,
            _ => return None,
        };
        let mut declaration = Declaration::new(name).ok()?;

        let mut rest: Vec<ComponentValue> = values.skip_while(ComponentValue::is_whitespace).collect();
        if rest.first().map_or(true, |v| !v.is_token(TokenKind::Colon)) {
            self.errors.record("expected-colon", &declaration);
            return None;
        }
        rest.remove(0);

        trim_whitespace(&mut rest);
        if let Some(bang) = important_marker(&rest) {
            rest.truncate(bang);
            trim_whitespace(&mut rest);
            declaration.set_important(true);
        }
        declaration.set_value(ComponentValueList::from(rest));
        Some(declaration)
    }
}

fn trim_whitespace(values: &mut Vec<ComponentValue>) {
    while values.last().is_some_and(ComponentValue::is_whitespace) {
        values.pop();
    }
    let leading = values.iter().take_while(|v| v.is_whitespace()).count();
    values.drain(..leading);
}

/// Index of the `!` of a trailing `! important`, if present.
fn important_marker(values: &[ComponentValue]) -> Option<usize> {
    let last = values.last()?.as_token()?;
    if !last.matches(TokenKind::Ident, "important") {
        return None;
    }
    let bang = values[..values.len() - 1].iter().rposition(|v| !v.is_whitespace())?;
    values[bang].is_token(TokenKind::Delim).then_some(())?;
    (values[bang].as_token()?.value() == "!").then_some(bang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Rule;

    #[test]
    fn test_parse_stylesheet_rules() {
        let mut parser = Parser::new_from_string(
            "@charset \"utf-8\";\n<!-- a { color: red } -->\n@media screen { b { x: y } }",
        );
        let rules = parser.parse_stylesheet();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].name(), Some("charset"));
        assert!(rules[0].block().is_none());
        assert!(matches!(rules[1], Rule::Qualified(_)));
        assert_eq!(rules[1].position(), Position::new(2, 6));
        assert_eq!(rules[2].name(), Some("media"));
        assert!(rules[2].block().is_some());
        assert!(parser.parse_errors().is_empty());
    }

    #[test]
    fn test_round_trip_through_to_css() {
        let css = "a > b, c[href^=\"x\"] { color: rgb(0, 0, 0) }";
        let rules = Parser::new_from_string(css).parse_stylesheet();
        assert_eq!(rules.to_css(), css);
    }

    #[test]
    fn test_qualified_rule_at_eof_is_dropped() {
        let mut parser = Parser::new_from_string("a { x: y }\nb c");
        let rules = parser.parse_stylesheet();
        assert_eq!(rules.len(), 1);
        assert_eq!(parser.parse_errors(), &[Diagnostic::new("unexpected-eof-in-rule", 2, 1)]);
    }

    #[test]
    fn test_unterminated_at_rule_is_kept() {
        let mut parser = Parser::new_from_string("@import 'x.css'");
        let rules = parser.parse_stylesheet();
        assert_eq!(rules.len(), 1);
        assert_eq!(parser.parse_errors(), &[Diagnostic::new("unexpected-eof-in-rule", 1, 1)]);
    }

    #[test]
    fn test_declaration_list() {
        let mut parser = Parser::new_from_string(
            "color : red ; ; margin: 0 auto !IMPORTANT; 12: x; @page {}; width:",
        );
        let list = parser.parse_declaration_list();
        let names: Vec<_> = list.iter().map(Declaration::name).collect();
        assert_eq!(names, vec!["color", "margin", "width"]);

        let decls: Vec<_> = list.iter().collect();
        assert_eq!(decls[0].value().to_css(), "red");
        assert!(!decls[0].is_important());
        assert_eq!(decls[1].value().to_css(), "0 auto");
        assert!(decls[1].is_important());
        assert!(decls[2].value().is_empty());

        let codes: Vec<_> = parser.parse_errors().iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["expected-ident", "unexpected-at-rule"]);
    }

    #[test]
    fn test_declaration_without_colon() {
        let mut parser = Parser::new_from_string("color red; top: 0");
        let list = parser.parse_declaration_list();
        assert_eq!(list.len(), 1);
        assert_eq!(parser.parse_errors(), &[Diagnostic::new("expected-colon", 1, 1)]);
    }

    #[test]
    fn test_reparse_block_contents_keeps_positions() {
        let rules = Parser::new_from_string("@media print {\n  a { b: c }\n}").parse_stylesheet();
        let block = rules[0].block().unwrap();
        let nested = Parser::new_from_tokens(block.value().to_token_array()).parse_rule_list();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].position(), Position::new(2, 3));
    }

    #[test]
    fn test_unclosed_function_and_block() {
        let mut parser = Parser::new_from_tokens(vec![
            Token::with(TokenKind::Function, "rgb").at(1, 1),
            Token::with(TokenKind::Number, "1").at(1, 5),
        ]);
        let values = parser.parse_component_value_list();
        assert_eq!(values.len(), 1);
        assert_eq!(parser.take_parse_errors(), vec![Diagnostic::new("unexpected-eof-in-function", 1, 1)]);
        assert!(parser.parse_errors().is_empty());
    }

    #[test]
    fn test_unclosed_groups_in_text() {
        let mut parser = Parser::new_from_string("a { width: rgb(1");
        let rules = parser.parse_stylesheet();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.to_css(), "a { width: rgb(1)}");
        assert_eq!(
            parser.parse_errors(),
            &[
                Diagnostic::new("unexpected-eof-in-function", 1, 12),
                Diagnostic::new("unexpected-eof-in-block", 1, 3),
            ]
        );
    }

    #[test]
    fn test_deeply_nested_tokens_are_skipped() {
        let mut tokens: Vec<Token> =
            (0..100_000).map(|i| Token::new(TokenKind::LeftParen).at(1, i + 1)).collect();
        tokens.push(Token::with(TokenKind::Ident, "x").at(1, 100_001));
        let mut parser = Parser::new_from_tokens(tokens);
        let values = parser.parse_component_value_list();

        assert_eq!(values.len(), 1);
        let codes: Vec<_> = parser.parse_errors().iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes[0], NESTING_TOO_DEEP);
        assert_eq!(parser.parse_errors()[0], Diagnostic::new(NESTING_TOO_DEEP, 1, 65));
        assert_eq!(codes.len(), MAX_GROUP_DEPTH + 1);
        assert!(codes[1..].iter().all(|c| *c == "unexpected-eof-in-block"));
    }

    #[test]
    fn test_tokenizer_depth_errors_are_parse_errors() {
        let css = format!("a {{ width: {} }}", "(".repeat(100_000));
        let mut parser = Parser::new_from_string(&css);
        parser.parse_stylesheet();
        assert_eq!(parser.parse_errors()[0], Diagnostic::new(NESTING_TOO_DEEP, 1, 75));
    }
}
