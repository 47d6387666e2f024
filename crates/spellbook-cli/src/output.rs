//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use spellbook_domain::CategoryTable;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format spell names returned by a query.
    pub fn format_names(&self, names: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(names)?),
            OutputFormat::Table => Ok(self.format_names_table(names)),
            OutputFormat::Quiet => Ok(names.join("\n")),
        }
    }

    fn format_names_table(&self, names: &[String]) -> String {
        if names.is_empty() {
            return self.colorize("No spells found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Spell"]);
        for name in names {
            builder.push_record([name.as_str()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{} spell(s)", table, names.len())
    }

    /// Format the category table.
    pub fn format_categories(&self, table: &CategoryTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = table
                    .categories()
                    .iter()
                    .map(|c| serde_json::json!({ "name": c.name, "spells": c.spells }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Category", "Spells"]);
                for category in table.categories() {
                    builder.push_record([category.name.clone(), category.spells.join(", ")]);
                }

                let mut rendered = builder.build();
                rendered
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(rendered.to_string())
            }
            OutputFormat::Quiet => Ok(table
                .categories()
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether output is restricted to bare results.
    pub fn is_quiet(&self) -> bool {
        self.format == OutputFormat::Quiet
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["Fireball".to_string(), "Magic Missile".to_string()]
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_names(&names()).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, names());
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_names(&names()).unwrap();
        assert_eq!(output, "Fireball\nMagic Missile");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_names(&names()).unwrap();
        assert!(output.contains("Spell"));
        assert!(output.contains("Magic Missile"));
        assert!(output.ends_with("2 spell(s)"));
    }

    #[test]
    fn test_empty_names() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_names(&[]).unwrap();
        assert!(output.contains("No spells found"));
    }

    #[test]
    fn test_categories_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_categories(&CategoryTable::builtin()).unwrap();
        assert!(output.contains("Summoning"));
        assert!(output.contains("Fireball, Magic Missile"));
    }

    #[test]
    fn test_categories_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_categories(&CategoryTable::builtin()).unwrap();
        assert_eq!(output.lines().count(), 8);
        assert_eq!(output.lines().next(), Some("Healing"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
