//! Release command

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use changenote_core::workflow::{
    CommandFinalizer, NoopFinalizer, PlaceholderRewriter, ReleaseFinalizer, ReleaseTextRewriter,
    RewriteReport,
};
use changenote_core::Version;

use crate::cli::{output, Cli, OutputFormat};

/// Rewrite the version placeholder and finalize a release
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Version identifier to release
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: String,

    /// Show what would change without writing or finalizing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(version = %self.version, dry_run = self.dry_run, "executing release command");
        let (config, cwd) = super::load_config(cli)?;
        let version = Version::new(self.version.clone())?;

        let rewriter = PlaceholderRewriter::new(&config.rewrite, &cwd)?;
        let plan = rewriter.plan(&version)?;

        if self.dry_run {
            match cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "version": version.uid(),
                        "dry_run": true,
                        "rewrite": plan,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    if !cli.quiet {
                        print_report(&plan, &version, true, cli.verbose);
                        println!();
                        println!("{}", style("Dry run - no changes made.").yellow());
                    }
                }
            }
            return Ok(());
        }

        if self.requires_confirmation() {
            // Keep stdout for the JSON result
            match cli.format {
                OutputFormat::Json => {
                    eprintln!("{}", serde_json::to_string_pretty(&plan)?);
                }
                OutputFormat::Text => print_report(&plan, &version, true, true),
            }
            let confirmed = Confirm::new()
                .with_prompt(format!("Release {}?", version))
                .default(false)
                .interact()?;
            if !confirmed {
                eprintln!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let finalizer: Box<dyn ReleaseFinalizer> =
            match CommandFinalizer::from_config(&config, &cwd) {
                Some(finalizer) => Box::new(finalizer),
                None => Box::new(NoopFinalizer),
            };

        let release = ReleaseTextRewriter::new(rewriter, finalizer);
        let outcome = release.release(&version)?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_report(&outcome.rewrite, &version, false, cli.verbose);
                    if outcome.finalized {
                        output::success(&format!(
                            "Released {}",
                            output::version_style().apply_to(version.uid())
                        ));
                    }
                }
            }
        }

        if !outcome.finalized {
            anyhow::bail!("Release finalization for {} reported failure", version);
        }

        Ok(())
    }
}

impl ReleaseCommand {
    /// Every real release is confirmed unless `-y` was given
    fn requires_confirmation(&self) -> bool {
        !self.yes && !self.dry_run
    }
}

fn print_report(report: &RewriteReport, version: &Version, planned: bool, list_files: bool) {
    let verb = if planned { "Would rewrite" } else { "Rewrote" };
    output::info(&format!(
        "{} {} of {} file(s) to {} ({} replacement(s))",
        verb,
        report.rewritten.len(),
        report.scanned,
        output::version_style().apply_to(version.uid()),
        report.replacements
    ));

    if list_files {
        for path in &report.rewritten {
            println!("{}", output::key_value("rewrite", &path.display().to_string()));
        }
        for path in &report.excluded {
            println!("{}", output::key_value("exclude", &path.display().to_string()));
        }
    }
}
