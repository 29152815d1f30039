//! Output formatting for analysis reports and graph layouts
//!
//! JSON and YAML serialize the library types directly; the human format is a
//! compact terminal summary.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::AnalysisReport;
use crate::layout::{GraphLayout, FULL_EMPHASIS};
use crate::stack::Category;
use crate::tree::NodeKind;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "analysis report"),
            OutputFormat::Yaml => to_yaml(report, "analysis report"),
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    pub fn format_graph(&self, layout: &GraphLayout) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(layout, "graph layout"),
            OutputFormat::Yaml => to_yaml(layout, "graph layout"),
            OutputFormat::Human => Ok(self.format_graph_human(layout)),
        }
    }

    fn format_report_human(&self, report: &AnalysisReport) -> String {
        let details = &report.details;
        let mut output = String::new();

        output.push_str(&format!("\u{2713} {}/{}\n", details.owner, details.name));
        output.push_str(RULE);
        output.push_str("\n\n");

        if !details.description.is_empty() {
            output.push_str(&format!("{}\n\n", details.description));
        }
        output.push_str(&format!("Language:  {}\n", details.language));
        output.push_str(&format!("Stars:     {}\n", details.stars));
        output.push_str(&format!("Forks:     {}\n", details.forks));
        output.push_str(&format!("Branch:    {}\n\n", report.branch));

        output.push_str("Structure:\n");
        output.push_str(&format!("\u{251C}\u{2500} Files:    {}\n", report.stats.files));
        output.push_str(&format!("\u{2514}\u{2500} Folders:  {}\n\n", report.stats.folders));

        output.push_str("Technology Stack:\n");
        if report.stack.is_empty() {
            output.push_str("\u{2514}\u{2500} (nothing detected)\n");
            return output;
        }

        let populated: Vec<Category> = Category::all_variants()
            .iter()
            .copied()
            .filter(|c| !report.stack.labels(*c).is_empty())
            .collect();
        for (i, category) in populated.iter().enumerate() {
            let connector = if i == populated.len() - 1 {
                "\u{2514}"
            } else {
                "\u{251C}"
            };
            output.push_str(&format!(
                "{}\u{2500} {:<10} {}\n",
                connector,
                format!("{}:", category.name()),
                report.stack.labels(*category).join(", ")
            ));
        }

        output
    }

    fn format_graph_human(&self, layout: &GraphLayout) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Graph: {} nodes, {} edges\n",
            layout.nodes.len(),
            layout.edges.len()
        ));
        output.push_str(RULE);
        output.push('\n');

        for node in &layout.nodes {
            let marker = match node.kind {
                NodeKind::Directory => "/",
                NodeKind::File => "",
            };
            let dimmed = if node.emphasis < FULL_EMPHASIS { "  (dimmed)" } else { "" };
            output.push_str(&format!(
                "{}{}{}  ({:.1}, {:.1})  {}{}\n",
                "  ".repeat(node.depth),
                node.label,
                marker,
                node.position.x,
                node.position.y,
                node.color,
                dimmed
            ));
        }

        output
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}
