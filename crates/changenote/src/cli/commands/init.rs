//! Init command

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use changenote_core::config::defaults::{
    default_config_toml, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};

use crate::cli::{output, Cli};

/// Write a default changenote configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file format
    #[arg(long, value_enum)]
    pub config_format: Option<ConfigFormat>,
}

/// Format of the written configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl InitCommand {
    /// The format when it can be decided without asking
    fn format(&self) -> Option<ConfigFormat> {
        if let Some(format) = self.config_format {
            return Some(format);
        }
        match &self.output {
            Some(path) if path.extension().is_some_and(|e| e == "toml") => Some(ConfigFormat::Toml),
            Some(_) => Some(ConfigFormat::Yaml),
            None if self.yes => Some(ConfigFormat::Yaml),
            None => None,
        }
    }

    /// Where the configuration will be written
    fn config_path(&self, cwd: &Path, format: ConfigFormat) -> PathBuf {
        let path = match (&self.output, format) {
            (Some(path), _) => path.clone(),
            (None, ConfigFormat::Yaml) => cwd.join(DEFAULT_CONFIG_YAML),
            (None, ConfigFormat::Toml) => cwd.join(DEFAULT_CONFIG_TOML),
        };
        if format == ConfigFormat::Toml && path.extension().is_some_and(|e| e == "yaml") {
            path.with_extension("toml")
        } else {
            path
        }
    }

    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;

        // The format decides the final path, so it is settled before any
        // existence check
        let format = match self.format() {
            Some(format) => format,
            None => {
                let formats = [ConfigFormat::Yaml, ConfigFormat::Toml];
                let selection = Select::new()
                    .with_prompt("Configuration format")
                    .items(&["yaml", "toml"])
                    .default(0)
                    .interact()?;
                formats[selection]
            }
        };
        let config_path = self.config_path(&cwd, format);

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let content = match format {
            ConfigFormat::Toml => default_config_toml()
                .ok_or_else(|| anyhow::anyhow!("Failed to render default configuration as TOML"))?,
            ConfigFormat::Yaml => DEFAULT_CONFIG_TEMPLATE.to_string(),
        };

        std::fs::write(&config_path, &content)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!(
                "  1. Edit {} to set your sections, label mapping and rewrite root",
                config_path.display()
            );
            println!("  2. Run {} to verify your setup", style("changenote validate").cyan());
            println!(
                "  3. Run {} at release time",
                style("changenote release <VERSION>").cyan()
            );
        }

        Ok(())
    }
}
