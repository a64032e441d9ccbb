// csssan-core/src/sanitizers/declaration.rs
//! Property allow-list for declarations.

use std::borrow::Cow;

use crate::config::SanitizerPolicy;
use crate::diagnostic::ErrorLog;
use crate::objects::{ComponentValue, Declaration};
use crate::sanitizer::{sanitize_list, NodeSanitizer, Sanitizer};
use crate::sanitizers::value::ValueSanitizer;

pub const UNRECOGNIZED_PROPERTY: &str = "unrecognized-property";
pub const MISSING_VALUE: &str = "missing-value";
pub const BAD_VALUE_FOR_PROPERTY: &str = "bad-value-for-property";

/// Keeps declarations whose property is allowed and whose value passes [`ValueSanitizer`].
#[derive(Debug, Clone)]
pub struct DeclarationSanitizer {
    log: ErrorLog,
    policy: SanitizerPolicy,
    values: ValueSanitizer,
}

impl DeclarationSanitizer {
    pub fn from_policy(policy: &SanitizerPolicy) -> Self {
        Self {
            log: ErrorLog::new(),
            policy: policy.clone(),
            values: ValueSanitizer::for_values(policy),
        }
    }
}

impl Sanitizer for DeclarationSanitizer {
    fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.log
    }
}

impl NodeSanitizer<Declaration> for DeclarationSanitizer {
    fn do_sanitize<'a>(&mut self, node: &'a Declaration) -> Option<Cow<'a, Declaration>> {
        if !self.policy.allows_property(node.name()) {
            self.log.record(UNRECOGNIZED_PROPERTY, node);
            return None;
        }
        if node.value().iter().all(ComponentValue::is_whitespace) {
            self.log.record(MISSING_VALUE, node);
            return None;
        }

        let value = sanitize_list(&mut self.log, &mut self.values, node.value());
        if value.len() != node.value().len() {
            self.log.record(BAD_VALUE_FOR_PROPERTY, node);
            return None;
        }
        Some(Cow::Borrowed(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostic;
    use crate::parser::Parser;

    fn run(css: &str) -> (Vec<String>, Vec<Diagnostic>) {
        let policy = SanitizerPolicy::load_default_policy().unwrap();
        let mut sanitizer = DeclarationSanitizer::from_policy(&policy);
        let declarations = Parser::new_from_string(css).parse_declaration_list();
        let kept = declarations
            .iter()
            .filter_map(|d| sanitizer.sanitize(d).map(|d| d.name().to_string()))
            .collect();
        (kept, sanitizer.sanitization_errors())
    }

    #[test]
    fn test_property_allow_list() {
        let (kept, errors) = run("color: red; behavior: url(x.htc); --accent: blue; COLOR: blue");
        assert_eq!(kept, vec!["color", "--accent", "COLOR"]);
        assert_eq!(errors, vec![Diagnostic::new(UNRECOGNIZED_PROPERTY, 1, 13)]);
    }

    #[test]
    fn test_value_errors_come_before_the_declaration_error() {
        let (kept, errors) = run("width: expression(1); color:");
        assert!(kept.is_empty());
        let codes: Vec<_> = errors.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["disallowed-function", BAD_VALUE_FOR_PROPERTY, MISSING_VALUE]);
    }
}
