//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "changenote.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "changenote.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".changenote.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".changenote.toml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> Option<String> {
    toml::to_string_pretty(&Config::default()).ok()
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# changenote configuration

default_section: other

sections:
  - { uid: highlights, title: Highlights, sort_order: 0 }
  - { uid: breaking, title: Breaking Changes, sort_order: 1 }
  - { uid: security, title: Security Changes, sort_order: 2 }
  - { uid: deprecations, title: Deprecations, sort_order: 3 }
  - { uid: features, title: New Features, sort_order: 4 }
  - { uid: bugfixes, title: Bug Fixes, sort_order: 5 }
  - { uid: dependencies, title: Dependencies, sort_order: 6 }
  - { uid: other, title: Other Changes, sort_order: 7 }
  - { uid: documentation, title: Documentation, sort_order: 8 }
  - { uid: internal, title: Internal Changes, sort_order: 9 }

mapping:
  - { label: "🐛 bug", section: bugfixes }
  - { label: "💡 feature", section: features }
  - { label: "🧹 chore", section: internal }
  - { label: "⚙️ bot-api", section: features }
  - { label: "⚙️ documentation", section: documentation }
  - { label: "⚙️ tests", section: internal }
  - { label: "⚙️ ci-cd", section: internal }
  - { label: "⚙️ security", section: security }
  - { label: "⚙️ examples", section: documentation }
  - { label: "⚙️ type-hinting", section: other }
  - { label: "🛠 refactor", section: internal }
  - { label: "🛠 breaking", section: breaking }
  - { label: "⚙️ dependencies", section: dependencies }
  - { label: "🔗 github-actions", section: internal }
  - { label: "🛠 code-quality", section: internal }

scanner:
  base_directory: "."
  unreleased_directory: unreleased
  # owner: python-telegram-bot
  # repository: python-telegram-bot

rewrite:
  root: src
  extensions: [py]
  placeholder: 'NEXT\.VERSION'
  exclude:
    - docs/source/contribute.rst

release:
  finalize_command: null
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_matches_defaults() {
        let parsed: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.sections, defaults.sections);
        assert_eq!(parsed.mapping, defaults.mapping);
        assert_eq!(parsed.rewrite.placeholder, defaults.rewrite.placeholder);
        assert_eq!(parsed.rewrite.exclude, defaults.rewrite.exclude);
    }

    #[test]
    fn test_default_config_toml_roundtrips_sections() {
        let rendered = default_config_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.sections.len(), 10);
        assert_eq!(parsed.default_section, "other");
    }
}
