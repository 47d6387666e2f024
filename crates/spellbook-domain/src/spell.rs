//! Spell module - the structured record extracted from rulebook text

use crate::category::Classifier;
use std::fmt;

/// Separator used when a class list is flattened into a single string
pub const CLASS_SEPARATOR: &str = ",";

/// A spell parsed out of a rulebook document.
///
/// Records are immutable once created. The category is derived from the
/// name at construction time, so two records with the same name built
/// against the same [`Classifier`] always agree on their category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellRecord {
    name: String,
    level: u32,
    classes: Vec<String>,
    category: String,
}

impl SpellRecord {
    /// Build a record, deriving its category from `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellbook_domain::{CategoryTable, Classifier, SpellRecord};
    ///
    /// let classifier = Classifier::new(&CategoryTable::builtin());
    /// let spell = SpellRecord::classified(
    ///     "Fireball",
    ///     3,
    ///     vec!["Wizard".to_string(), "Sorcerer".to_string()],
    ///     &classifier,
    /// );
    /// assert_eq!(spell.category(), "Offensive");
    /// ```
    pub fn classified(
        name: impl Into<String>,
        level: u32,
        classes: Vec<String>,
        classifier: &Classifier,
    ) -> Self {
        let name = name.into();
        let category = classifier.categorize(&name).to_string();
        Self {
            name,
            level,
            classes,
            category,
        }
    }

    /// Rebuild a record from persisted columns.
    ///
    /// This is primarily for storage layer deserialization; the category
    /// is taken as stored because it was derived when the row was written.
    pub fn restore(name: String, level: u32, classes: Vec<String>, category: String) -> Self {
        Self {
            name,
            level,
            classes,
            category,
        }
    }

    /// Spell name as it appeared in the source text
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spell level
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Casting classes, in parse order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Thematic category, or [`crate::UNKNOWN_CATEGORY`]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Class list joined with [`CLASS_SEPARATOR`], the persisted form.
    pub fn joined_classes(&self) -> String {
        self.classes.join(CLASS_SEPARATOR)
    }

    /// Split a persisted class column back into its elements.
    ///
    /// Inverse of [`SpellRecord::joined_classes`] for any non-empty list,
    /// empty elements included: `""` restores as `[""]`. An empty list
    /// also persists as `""`, so it comes back as a single empty class.
    /// Extracted records always carry at least one class.
    pub fn split_classes(joined: &str) -> Vec<String> {
        joined.split(CLASS_SEPARATOR).map(str::to_string).collect()
    }
}

impl fmt::Display for SpellRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (level {}, {}) [{}]",
            self.name,
            self.level,
            self.joined_classes(),
            self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryTable, UNKNOWN_CATEGORY};

    fn classifier() -> Classifier {
        Classifier::new(&CategoryTable::builtin())
    }

    #[test]
    fn test_classified_derives_category() {
        let spell = SpellRecord::classified(
            "Fireball",
            3,
            vec!["Wizard".to_string(), "Sorcerer".to_string()],
            &classifier(),
        );
        assert_eq!(spell.name(), "Fireball");
        assert_eq!(spell.level(), 3);
        assert_eq!(spell.classes(), ["Wizard", "Sorcerer"]);
        assert_eq!(spell.category(), "Offensive");
    }

    #[test]
    fn test_unknown_name_gets_sentinel() {
        let spell = SpellRecord::classified("Unknown Spell", 1, vec![], &classifier());
        assert_eq!(spell.category(), UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_joined_classes_keeps_order_and_duplicates() {
        let spell = SpellRecord::classified(
            "Bless",
            1,
            vec!["Cleric".to_string(), "Paladin".to_string(), "Cleric".to_string()],
            &classifier(),
        );
        assert_eq!(spell.joined_classes(), "Cleric,Paladin,Cleric");
    }

    #[test]
    fn test_split_classes() {
        assert_eq!(
            SpellRecord::split_classes("Wizard,Sorcerer"),
            vec!["Wizard".to_string(), "Sorcerer".to_string()]
        );
        assert_eq!(SpellRecord::split_classes(""), vec![String::new()]);
    }

    #[test]
    fn test_split_inverts_join_with_empty_elements() {
        for classes in [vec![""], vec!["", ""], vec!["Cleric", "", "Paladin", ""]] {
            let spell = SpellRecord::classified(
                "Aid",
                2,
                classes.iter().map(|c| c.to_string()).collect(),
                &classifier(),
            );
            assert_eq!(SpellRecord::split_classes(&spell.joined_classes()), spell.classes());
        }
    }

    #[test]
    fn test_display() {
        let spell = SpellRecord::classified("Shield", 1, vec!["Wizard".to_string()], &classifier());
        assert_eq!(spell.to_string(), "Shield (level 1, Wizard) [Defensive]");
    }
}
