//! errors.rs - Custom error types for the csssan-core library.
//!
//! These are contract errors: they are raised when an upstream collaborator (tokenizer,
//! parser, or a hand-written sanitizer) builds a node that violates a structural invariant.
//! Problems with the *content* of a stylesheet are never reported through this type; they
//! become `Diagnostic` entries in a sanitizer's error log instead.
//!
//! License: MIT OR Apache-2.0

use thiserror::Error;

use crate::objects::token::TokenKind;

/// This enum represents all possible error types in the `csssan-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CssSanError {
    #[error("At rule must begin with an at-keyword token, got {0}")]
    NotAtKeyword(TokenKind),

    #[error("At-rule block must be delimited by {{}}")]
    AtRuleBlockDelimiter,

    #[error("Qualified rule block must be delimited by {{}}")]
    QualifiedRuleBlockDelimiter,

    #[error("A SimpleBlock is delimited by either {{}}, [], or (); got {0}")]
    BlockDelimiter(TokenKind),

    #[error("CSS function must begin with a function token, got {0}")]
    NotFunction(TokenKind),

    #[error("Declaration must begin with an ident token, got {0}")]
    NotIdent(TokenKind),

    #[error("Invalid sanitizer policy: {0}")]
    InvalidPolicy(String),
}

/// Result alias for contract-checked constructors and setters.
pub type Result<T> = std::result::Result<T, CssSanError>;
