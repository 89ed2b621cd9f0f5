//! Validate command

use std::collections::HashSet;
use std::path::Path;

use clap::Args;
use console::style;
use tracing::info;

use changenote_core::config::{discover_config, Config};

use crate::cli::{Cli, OutputFormat};

/// Validate the configuration and the layout it points at
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Only validate configuration file
    #[arg(long)]
    pub config_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        // Loading also runs schema validation
        let (config, config_path) = match discover_config(&cwd) {
            Ok((c, p)) => (Some(c), Some(p)),
            Err(e) => {
                errors.push(format!("Configuration: {}", e));
                (None, None)
            }
        };

        if let Some(ref cfg) = config {
            warnings.extend(mapping_warnings(cfg));
            if !self.config_only {
                warnings.extend(layout_warnings(cfg, &cwd));
            }
        }

        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = config_path {
                        println!("Config: {}", style(path.display()).cyan());
                        println!();
                    }

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                warnings.len()
                            );
                        }
                    } else {
                        println!(
                            "{} with {} error(s)",
                            style("✗ Validation failed").red().bold(),
                            errors.len()
                        );
                    }
                }
            }
        }

        if !passed {
            std::process::exit(1);
        }

        Ok(())
    }
}

/// Suspicious but legal mapping entries
fn mapping_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for entry in &config.mapping {
        if !seen.insert(entry.label.as_str()) {
            warnings.push(format!(
                "Label '{}' is mapped more than once; every entry applies",
                entry.label
            ));
        }
    }

    let targeted: HashSet<&str> = config.mapping.iter().map(|e| e.section.as_str()).collect();
    for section in &config.sections {
        if section.uid != config.default_section && !targeted.contains(section.uid.as_str()) {
            warnings.push(format!(
                "Section '{}' has no labels mapped to it",
                section.uid
            ));
        }
    }

    warnings
}

/// Checks against the project directory the configuration refers to
fn layout_warnings(config: &Config, project_dir: &Path) -> Vec<String> {
    let mut warnings = Vec::new();

    let root = project_dir.join(&config.rewrite.root);
    if !root.is_dir() {
        warnings.push(format!("Rewrite root {} does not exist", root.display()));
    } else {
        for excluded in &config.rewrite.exclude {
            let path = root.join(excluded);
            if !path.exists() {
                warnings.push(format!("Excluded file {} does not exist", path.display()));
            }
        }
    }

    let unreleased = config.scanner.unreleased_path(project_dir);
    if !unreleased.is_dir() {
        warnings.push(format!(
            "Unreleased directory {} does not exist",
            unreleased.display()
        ));
    }

    if config.release.finalize_command.is_none() {
        warnings.push("No release.finalize_command configured; releases will only rewrite files".to_string());
    }

    warnings
}
