//! Category module - the static category table and the classifier built on it

use std::collections::{HashMap, HashSet};

/// Category assigned to spells that appear in no table entry
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Categories shipped with the tool, in declaration order.
const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Healing",
        &[
            "Cure Wounds",
            "Healing Word",
            "Mass Healing Word",
            "Regenerate",
            "Heal",
            "Lesser Restoration",
            "Greater Restoration",
        ],
    ),
    (
        "Offensive",
        &[
            "Fireball",
            "Magic Missile",
            "Eldritch Blast",
            "Shatter",
            "Inflict Wounds",
            "Disintegrate",
            "Meteor Swarm",
        ],
    ),
    (
        "Control",
        &[
            "Wall of Force",
            "Hold Person",
            "Entangle",
            "Web",
            "Earthbind",
            "Evard\u{2019}s Black Tentacles",
            "Dominate Person",
        ],
    ),
    (
        "Debuffing",
        &[
            "Ray of Enfeeblement",
            "Bestow Curse",
            "Bane",
            "Slow",
            "Blight",
            "Hex",
            "Contagion",
        ],
    ),
    (
        "Buffing",
        &[
            "Bless",
            "Shield of Faith",
            "Haste",
            "Enhance Ability",
            "Heroism",
            "Aid",
            "Freedom of Movement",
        ],
    ),
    (
        "Utility",
        &[
            "Detect Magic",
            "Identify",
            "Knock",
            "Teleportation Circle",
            "Pass Without Trace",
            "Unseen Servant",
            "Prestidigitation",
        ],
    ),
    (
        "Defensive",
        &[
            "Shield",
            "Counterspell",
            "Absorb Elements",
            "Sanctuary",
            "Globe of Invulnerability",
            "Mage Armor",
            "Stoneskin",
        ],
    ),
    (
        "Summoning",
        &[
            "Conjure Animals",
            "Conjure Elemental",
            "Summon Fey",
            "Find Familiar",
            "Summon Greater Demon",
            "Create Undead",
            "Planar Ally",
        ],
    ),
];

/// One named category and its member spells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category name (e.g. "Healing")
    pub name: String,

    /// Canonical spell names belonging to this category
    pub spells: Vec<String>,
}

/// Ordered mapping from category name to member spell names.
///
/// Declaration order matters: it is the tie-break when a spell name is
/// listed under more than one category. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Build a table from `(category, spells)` pairs, keeping their order.
    ///
    /// Rejects empty or repeated category names. Spell names shared between
    /// categories are accepted here and reported by [`CategoryTable::validate`].
    pub fn new<I, S>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut categories = Vec::new();

        for (name, spells) in entries {
            let name = name.into();
            if name.trim().is_empty() {
                return Err("Category name must not be empty".to_string());
            }
            if name == UNKNOWN_CATEGORY {
                return Err(format!("'{}' is reserved for unmatched spells", UNKNOWN_CATEGORY));
            }
            if !seen.insert(name.clone()) {
                return Err(format!("Duplicate category: {}", name));
            }
            categories.push(Category { name, spells });
        }

        Ok(Self { categories })
    }

    /// The table shipped with the tool
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(name, spells)| Category {
                name: (*name).to_string(),
                spells: spells.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the table has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Check that no spell name is listed under two categories.
    pub fn validate(&self) -> Result<(), String> {
        let mut owner: HashMap<&str, &str> = HashMap::new();
        for category in &self.categories {
            for spell in &category.spells {
                if let Some(first) = owner.insert(spell, &category.name) {
                    if first != category.name {
                        return Err(format!(
                            "Spell '{}' is listed under both '{}' and '{}'",
                            spell, first, category.name
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Maps spell names to categories.
///
/// The table is inverted once at construction; each lookup is a single hash
/// map access. When a name appears under several categories the first declared
/// category wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    by_name: HashMap<String, String>,
}

impl Classifier {
    /// Invert `table` into a name to category map
    pub fn new(table: &CategoryTable) -> Self {
        let mut by_name = HashMap::new();
        for category in table.categories() {
            for spell in &category.spells {
                by_name
                    .entry(spell.clone())
                    .or_insert_with(|| category.name.clone());
            }
        }
        Self { by_name }
    }

    /// Category for `name`, or [`UNKNOWN_CATEGORY`].
    ///
    /// Exact, case-sensitive match.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellbook_domain::{CategoryTable, Classifier};
    ///
    /// let classifier = Classifier::new(&CategoryTable::builtin());
    /// assert_eq!(classifier.categorize("Cure Wounds"), "Healing");
    /// assert_eq!(classifier.categorize("cure wounds"), "Unknown");
    /// ```
    pub fn categorize(&self, name: &str) -> &str {
        self.by_name
            .get(name)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&CategoryTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = CategoryTable::builtin();
        assert_eq!(table.len(), 8);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_builtin_lookups() {
        let classifier = Classifier::default();
        assert_eq!(classifier.categorize("Fireball"), "Offensive");
        assert_eq!(classifier.categorize("Heal"), "Healing");
        assert_eq!(classifier.categorize("Web"), "Control");
        assert_eq!(classifier.categorize("Hex"), "Debuffing");
        assert_eq!(classifier.categorize("Haste"), "Buffing");
        assert_eq!(classifier.categorize("Knock"), "Utility");
        assert_eq!(classifier.categorize("Shield"), "Defensive");
        assert_eq!(classifier.categorize("Planar Ally"), "Summoning");
    }

    #[test]
    fn test_no_partial_or_case_insensitive_match() {
        let classifier = Classifier::default();
        assert_eq!(classifier.categorize("fireball"), UNKNOWN_CATEGORY);
        assert_eq!(classifier.categorize("Fireball "), UNKNOWN_CATEGORY);
        assert_eq!(classifier.categorize("Shield of"), UNKNOWN_CATEGORY);
        assert_eq!(classifier.categorize(""), UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_first_declared_category_wins() {
        let table = CategoryTable::new(vec![
            ("Alpha", vec!["Twin".to_string()]),
            ("Beta", vec!["Twin".to_string(), "Solo".to_string()]),
        ])
        .unwrap();

        assert!(table.validate().is_err());

        let classifier = Classifier::new(&table);
        assert_eq!(classifier.categorize("Twin"), "Alpha");
        assert_eq!(classifier.categorize("Solo"), "Beta");
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let result = CategoryTable::new(vec![("Alpha", vec![]), ("Alpha", vec![])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_and_reserved_names() {
        assert!(CategoryTable::new(vec![(" ", vec![])]).is_err());
        assert!(CategoryTable::new(vec![(UNKNOWN_CATEGORY, vec![])]).is_err());
    }

    #[test]
    fn test_empty_table_maps_everything_to_unknown() {
        let table = CategoryTable::new(Vec::<(String, Vec<String>)>::new()).unwrap();
        assert!(table.is_empty());
        let classifier = Classifier::new(&table);
        assert_eq!(classifier.categorize("Fireball"), UNKNOWN_CATEGORY);
    }

    proptest! {
        #[test]
        fn categorize_is_total_and_stable(name in ".*") {
            let table = CategoryTable::builtin();
            let classifier = Classifier::new(&table);

            let first = classifier.categorize(&name).to_string();
            let second = classifier.categorize(&name).to_string();
            prop_assert_eq!(&first, &second);

            let known = table.categories().iter().any(|c| c.name == first);
            prop_assert!(known || first == UNKNOWN_CATEGORY);
        }

        #[test]
        fn every_member_maps_to_its_category(idx in 0usize..8, member in 0usize..7) {
            let table = CategoryTable::builtin();
            let category = &table.categories()[idx];
            let classifier = Classifier::new(&table);
            prop_assert_eq!(classifier.categorize(&category.spells[member]), category.name.as_str());
        }
    }
}
