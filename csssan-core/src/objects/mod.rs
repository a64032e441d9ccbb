// csssan-core/src/objects/mod.rs
//! The CSS syntax object model.
//!
//! Every node implements [`CssObject`], which gives it a source position and a flat
//! token serialization. Nodes are plain owned data: cloning a rule deep-copies its
//! prelude and block.
//!
//! License: MIT OR Apache-2.0

pub mod component_value;
pub mod css_function;
pub mod declaration;
pub mod rule;
pub mod rule_list;
pub mod simple_block;
pub mod token;

pub use component_value::{ComponentValue, ComponentValueList};
pub use css_function::CssFunction;
pub use declaration::{Declaration, DeclarationList};
pub use rule::{AtRule, QualifiedRule, Rule};
pub use rule_list::RuleList;
pub use simple_block::SimpleBlock;
pub use token::{Position, Token, TokenKind};

/// Behavior shared by every node of the syntax tree.
pub trait CssObject {
    /// Where the node starts in the source, or [`Position::UNKNOWN`].
    fn position(&self) -> Position;

    /// Re-linearizes the node into the token sequence it was parsed from.
    fn to_token_array(&self) -> Vec<Token>;

    /// Renders the node back to CSS text.
    fn to_css(&self) -> String {
        crate::util::stringify(&self.to_token_array())
    }
}
