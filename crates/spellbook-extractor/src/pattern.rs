//! Field pattern matching over document text

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Name line, then "Level: " line, then "Class: " line.
const FIELD_PATTERN: &str =
    r"(?P<name>[A-Za-z ]+)\nLevel: (?P<level>[0-9]+)\nClass: (?P<class>[A-Za-z, ]+)";

static COMPILED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FIELD_PATTERN).expect("field pattern is valid"));

/// The raw fields of one matched spell, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellFields {
    /// Name line, trimmed
    pub name: String,

    /// Parsed level
    pub level: u32,

    /// Class list split on commas, each element trimmed
    pub classes: Vec<String>,
}

/// Matches the three-line spell layout in extracted text
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    pattern: Regex,
}

impl FieldExtractor {
    /// Create an extractor sharing the compiled field pattern
    pub fn new() -> Self {
        Self {
            pattern: COMPILED.clone(),
        }
    }

    /// Yield every non-overlapping match, left to right.
    ///
    /// Spans that deviate from the exact layout are skipped silently, as are
    /// a blank name line and a level too large for `u32`.
    pub fn extract<'a>(&'a self, text: &'a str) -> impl Iterator<Item = SpellFields> + 'a {
        self.pattern.captures_iter(text).filter_map(|caps| {
            let name = caps["name"].trim().to_string();
            if name.is_empty() {
                let offset = caps.get(0).map_or(0, |m| m.start());
                debug!("Skipping match with a blank name line at offset {}", offset);
                return None;
            }
            let level = match caps["level"].parse::<u32>() {
                Ok(level) => level,
                Err(e) => {
                    warn!("Skipping '{}': level '{}' is out of range ({})", name, &caps["level"], e);
                    return None;
                }
            };
            let classes = caps["class"]
                .split(',')
                .map(|class| class.trim().to_string())
                .collect();

            Some(SpellFields {
                name,
                level,
                classes,
            })
        })
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
