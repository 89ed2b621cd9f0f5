//! Classify command

use clap::Args;
use console::style;
use tracing::info;

use changenote_sections::{LabelSectionClassifier, SectionCatalog, SectionClassifier};

use crate::cli::{output, Cli, OutputFormat};

/// Classify a change into sections from its labels
#[derive(Debug, Args)]
pub struct ClassifyCommand {
    /// Label attached to the change (repeatable)
    #[arg(short, long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Type of a linked issue (repeatable)
    #[arg(short, long = "issue-type", value_name = "TYPE")]
    pub issue_types: Vec<String>,
}

impl ClassifyCommand {
    /// Execute the classify command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(labels = ?self.labels, issue_types = ?self.issue_types, "executing classify command");
        let (config, _) = super::load_config(cli)?;

        let classifier = LabelSectionClassifier::from_config(&config);
        let catalog = SectionCatalog::from_config(&config);

        let issue_types = (!self.issue_types.is_empty()).then_some(self.issue_types.as_slice());
        let uids = classifier.classify(&self.labels, issue_types);
        let sections = catalog.sort(&uids);

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "labels": self.labels,
                    "issue_types": self.issue_types,
                    "sections": sections,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    for section in &sections {
                        println!("{}", section.uid);
                    }
                    return Ok(());
                }

                println!("{}", output::header("Sections"));
                for section in &sections {
                    println!(
                        "  {} {}",
                        output::section_style().apply_to(format!("{:<14}", section.uid)),
                        style(&section.title).dim()
                    );
                }
            }
        }

        Ok(())
    }
}
