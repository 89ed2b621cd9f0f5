//! Configuration validation

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_sections(config)?;
    validate_mapping(config)?;
    validate_scanner(config)?;
    validate_rewrite(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_sections(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();
    for (i, section) in config.sections.iter().enumerate() {
        if section.uid.is_empty() {
            return Err(invalid(format!("sections[{}].uid", i), "uid cannot be empty").into());
        }
        if !seen.insert(section.uid.as_str()) {
            return Err(invalid(
                format!("sections[{}].uid", i),
                format!("duplicate section uid '{}'", section.uid),
            )
            .into());
        }
    }

    if !seen.contains(config.default_section.as_str()) {
        return Err(invalid(
            "default_section",
            format!("'{}' is not a configured section", config.default_section),
        )
        .into());
    }

    Ok(())
}

fn validate_mapping(config: &Config) -> Result<()> {
    if !config.mapping.is_empty() {
        debug!(count = config.mapping.len(), "validating label mapping");
    }
    for (i, entry) in config.mapping.iter().enumerate() {
        if entry.label.is_empty() {
            return Err(invalid(format!("mapping[{}].label", i), "label cannot be empty").into());
        }

        if !config.sections.iter().any(|s| s.uid == entry.section) {
            return Err(invalid(
                format!("mapping[{}].section", i),
                format!("'{}' is not a configured section", entry.section),
            )
            .into());
        }
    }

    Ok(())
}

fn validate_scanner(config: &Config) -> Result<()> {
    if config.scanner.base_directory.as_os_str().is_empty() {
        return Err(invalid("scanner.base_directory", "directory cannot be empty").into());
    }
    if config.scanner.unreleased_directory.as_os_str().is_empty() {
        return Err(invalid("scanner.unreleased_directory", "directory cannot be empty").into());
    }
    for (field, value) in [
        ("scanner.owner", &config.scanner.owner),
        ("scanner.repository", &config.scanner.repository),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(invalid(field, "value cannot be blank").into());
        }
    }
    Ok(())
}

fn validate_rewrite(config: &Config) -> Result<()> {
    let rewrite = &config.rewrite;

    if rewrite.placeholder.is_empty() {
        return Err(invalid("rewrite.placeholder", "placeholder cannot be empty").into());
    }
    if let Err(e) = Regex::new(&rewrite.placeholder) {
        return Err(invalid("rewrite.placeholder", e.to_string()).into());
    }

    if rewrite.extensions.is_empty() {
        return Err(invalid("rewrite.extensions", "at least one extension is required").into());
    }
    if let Some(ext) = rewrite
        .extensions
        .iter()
        .find(|e| e.is_empty() || e.starts_with('.'))
    {
        return Err(invalid(
            "rewrite.extensions",
            format!("'{}' must be non-empty and given without a leading dot", ext),
        )
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelMapping;
    use crate::types::Section;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_unknown_default_section() {
        let mut config = Config::default();
        config.default_section = "misc".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_duplicate_section_uid() {
        let mut config = Config::default();
        config.sections.push(Section::new("bugfixes", "Fixes", 42));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_mapping_to_unknown_section() {
        let mut config = Config::default();
        config.mapping.push(LabelMapping::new("perf", "performance"));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_placeholder() {
        let mut config = Config::default();
        config.rewrite.placeholder = "NEXT(".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_dotted_extension() {
        let mut config = Config::default();
        config.rewrite.extensions = vec![".py".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_blank_repository() {
        let mut config = Config::default();
        config.scanner.owner = Some("python-telegram-bot".to_string());
        assert!(validate_config(&config).is_ok());

        config.scanner.repository = Some("  ".to_string());
        assert!(validate_config(&config).is_err());
    }
}
