//! CLI commands

mod classify;
mod completions;
mod init;
mod release;
mod sections;
mod validate;

pub use classify::ClassifyCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use release::ReleaseCommand;
pub use sections::SectionsCommand;
pub use validate::ValidateCommand;

use changenote_core::config::{load_config_or_default, Config};

use crate::cli::{output, Cli};

/// Load the configuration for the current directory, noting when defaults are used
fn load_config(cli: &Cli) -> anyhow::Result<(Config, std::path::PathBuf)> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = load_config_or_default(&cwd)?;

    if config_path.is_none() && !cli.quiet && cli.format == crate::cli::OutputFormat::Text {
        output::warning(&format!(
            "No configuration found, using defaults. Run {} to create one.",
            output::path_style().apply_to("changenote init")
        ));
    }

    Ok((config, cwd))
}
