// csssan-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use csssan_core::config::{self, AtRulePolicy, BlockPolicy, SanitizerPolicy};
use csssan_core::{CssSanError, RuleIndex};

fn write_policy(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_policy() {
    let policy = SanitizerPolicy::load_default_policy().unwrap();
    assert!(!policy.at_rules.is_empty());
    let import = policy.at_rule("import").unwrap();
    assert!(import.opt_in);
    assert_eq!(import.index, RuleIndex::at(1));
    assert!(policy.values.functions.iter().any(|f| f == "rgb"));
    assert!(policy.selectors.functions.iter().any(|f| f == "nth-child"));
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
at_rules:
  - name: charset
    index: [0, 1]
  - name: media
    description: "Media queries"
    block: rules
style_rules:
  properties: [color, width]
values:
  allow_urls: true
"#;
    let file = write_policy(yaml_content)?;
    let policy = SanitizerPolicy::load_from_file(file.path())?;
    assert_eq!(policy.at_rules.len(), 2);
    assert_eq!(policy.at_rules[0].index, RuleIndex::range(0, 1));
    assert_eq!(policy.at_rules[0].block, BlockPolicy::None);
    assert_eq!(policy.at_rules[1].index, RuleIndex::at(3));
    assert_eq!(policy.at_rules[1].block, BlockPolicy::Rules);
    assert_eq!(policy.at_rules[1].description.as_deref(), Some("Media queries"));
    assert!(policy.style_rules.enabled);
    assert!(policy.allows_property("Width"));
    assert!(policy.values.allow_urls);
    assert!(policy.values.functions.is_empty());
    Ok(())
}

#[test]
fn test_load_from_file_rejects_duplicates() -> Result<()> {
    let file = write_policy("at_rules:\n  - name: media\n  - name: MEDIA\n")?;
    let err = SanitizerPolicy::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Duplicate at-rule name found: 'MEDIA'"));
    assert!(matches!(err.downcast_ref::<CssSanError>(), Some(CssSanError::InvalidPolicy(_))));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_unknown_block_kind() -> Result<()> {
    let file = write_policy("at_rules:\n  - name: media\n    block: sometimes\n")?;
    let err = SanitizerPolicy::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse policy file"));
    Ok(())
}

#[test]
fn test_load_from_missing_file() {
    let err = SanitizerPolicy::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read policy file"));
}

#[test]
fn test_merge_policies_with_default() -> Result<()> {
    let default_policy = SanitizerPolicy::load_default_policy()?;
    let user_policy = SanitizerPolicy {
        at_rules: vec![
            AtRulePolicy { name: "import".into(), index: RuleIndex::at(1), ..Default::default() },
            AtRulePolicy {
                name: "layer".into(),
                block: BlockPolicy::Optional,
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let mut merged = config::merge_policies(default_policy.clone(), Some(user_policy));
    config::validate_policy(&merged)?;
    assert_eq!(merged.at_rules.len(), default_policy.at_rules.len() + 1);
    assert!(!merged.at_rule("import").unwrap().opt_in);
    assert_eq!(merged.style_rules.properties, default_policy.style_rules.properties);

    merged.set_active_at_rules(&[], &["layer".to_string()]);
    assert!(merged.at_rule("import").is_some());
    assert!(merged.at_rule("layer").is_none());
    Ok(())
}
