// csssan-core/src/sanitizers/mod.rs
//! Concrete, policy-driven sanitizers.
//!
//! Each sanitizer is a separate file within this directory and implements
//! [`NodeSanitizer`](crate::sanitizer::NodeSanitizer) for one node kind. They are all built
//! from a [`SanitizerPolicy`](crate::config::SanitizerPolicy) and composed top-down:
//!
//! * `stylesheet`: dispatches the top-level rule list.
//! * `at_rule`: one per allowed at-rule; checks block shape, prelude and block contents.
//! * `style_rule`: qualified rules; checks the selector and every declaration.
//! * `declaration`: property allow-list.
//! * `value`: token, function and url checks shared by the others.

pub mod at_rule;
pub mod declaration;
pub mod style_rule;
pub mod stylesheet;
pub mod value;

pub use at_rule::AtRuleSanitizer;
pub use declaration::DeclarationSanitizer;
pub use style_rule::StyleRuleSanitizer;
pub use stylesheet::StylesheetSanitizer;
pub use value::ValueSanitizer;

use crate::diagnostic::ErrorLog;
use crate::objects::{CssObject, DeclarationList, SimpleBlock, Token};
use crate::parser::Parser;
use crate::sanitizer::sanitize_obj;

/// Copies `original`'s delimiter with `tokens` re-parsed as its contents.
fn rebuild_block(original: &SimpleBlock, tokens: Vec<Token>) -> SimpleBlock {
    let mut block = original.clone();
    block.set_value(Parser::new_from_tokens(tokens).parse_component_value_list());
    block
}

/// Sanitizes the declarations inside `block`.
///
/// Returns `None` when every declaration was kept and nothing had to be skipped while
/// parsing, so the caller can keep the original block and its formatting.
fn sanitize_declaration_block(
    log: &mut ErrorLog,
    declarations: &mut DeclarationSanitizer,
    block: &SimpleBlock,
) -> Option<SimpleBlock> {
    let mut parser = Parser::new_from_tokens(block.value().to_token_array());
    let parsed = parser.parse_declaration_list();
    let parse_errors = parser.take_parse_errors();
    let mut changed = !parse_errors.is_empty();
    log.extend(parse_errors);

    let mut kept = DeclarationList::new();
    for declaration in &parsed {
        match sanitize_obj(log, declarations, declaration) {
            Some(declaration) => kept.add(declaration.into_owned()),
            None => changed = true,
        }
    }

    changed.then(|| rebuild_block(block, kept.to_token_array()))
}
