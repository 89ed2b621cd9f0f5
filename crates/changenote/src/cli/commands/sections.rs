//! Sections command

use clap::Args;
use console::style;
use tracing::info;

use changenote_sections::{LabelSectionClassifier, SectionCatalog, SectionMapping};

use crate::cli::{output, Cli, OutputFormat};

/// List the configured sections and the labels that map to them
#[derive(Debug, Args)]
pub struct SectionsCommand {
    /// Also show the labels mapped to each section
    #[arg(long)]
    pub labels: bool,
}

impl SectionsCommand {
    /// Execute the sections command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(labels = self.labels, "executing sections command");
        let (config, _) = super::load_config(cli)?;

        let catalog = SectionCatalog::from_config(&config);
        let classifier = LabelSectionClassifier::from_config(&config);
        let mapping = classifier.mapping();

        match cli.format {
            OutputFormat::Json => {
                let sections: Vec<_> = catalog
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "uid": s.uid,
                            "title": s.title,
                            "sort_order": s.sort_order,
                            "default": s.uid == config.default_section,
                            "labels": labels_for(mapping, &s.uid),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&sections)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", output::header("Sections"));
                }
                for section in catalog.iter() {
                    let marker = if section.uid == config.default_section {
                        style(" (default)").dim().to_string()
                    } else {
                        String::new()
                    };
                    println!(
                        "  {:>2}  {} {}{}",
                        section.sort_order,
                        output::section_style().apply_to(format!("{:<14}", section.uid)),
                        section.title,
                        marker
                    );

                    if self.labels {
                        for label in labels_for(mapping, &section.uid) {
                            println!("        {}", style(label).dim());
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Labels mapped to a section, in declaration order
fn labels_for<'a>(mapping: &'a SectionMapping, uid: &str) -> Vec<&'a str> {
    mapping
        .entries()
        .iter()
        .filter(|e| e.section == uid)
        .map(|e| e.label.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use changenote_core::config::Config;

    #[test]
    fn test_labels_for_section() {
        let classifier = LabelSectionClassifier::from_config(&Config::default());
        let labels = labels_for(classifier.mapping(), "documentation");
        assert_eq!(labels, vec!["⚙️ documentation", "⚙️ examples"]);
        assert!(labels_for(classifier.mapping(), "highlights").is_empty());
    }
}
