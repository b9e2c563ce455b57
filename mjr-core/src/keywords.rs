use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// Relative date words understood by the date parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DateKeyword {
    Today,
    Yesterday,
    Tomorrow,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    #[strum(serialize = "this week")]
    ThisWeek,
    #[strum(serialize = "last week")]
    LastWeek,
    #[strum(serialize = "this month")]
    ThisMonth,
    #[strum(serialize = "last month")]
    LastMonth,
    #[strum(serialize = "this year")]
    ThisYear,
    #[strum(serialize = "last year")]
    LastYear,
}

static CANONICAL: Lazy<HashMap<&'static str, DateKeyword>> =
    Lazy::new(|| DateKeyword::iter().map(|k| (k.into(), k)).collect());

/// Keyword lookup table: the canonical words plus user synonyms.
///
/// Lookups are case-insensitive and ignore repeated whitespace, so
/// `"Last   Week"` resolves like `"last week"`.
#[derive(Debug, Clone, Default)]
pub struct Keywords {
    synonyms: HashMap<String, DateKeyword>,
}

impl Keywords {
    /// Builds the table from `alias -> target` pairs, e.g. `ayer = "yesterday"`.
    ///
    /// Pairs whose alias is itself a canonical word, or whose target is not a
    /// known word, are skipped.
    pub fn with_synonyms(pairs: &HashMap<String, String>) -> Self {
        let mut synonyms = HashMap::new();
        for (alias, target) in pairs {
            let alias = normalize(alias);
            if Self::is_canonical(&alias) {
                tracing::warn!(alias = %alias, "ignoring synonym that shadows a built-in word");
                continue;
            }
            match CANONICAL.get(normalize(target).as_str()) {
                Some(&keyword) => {
                    synonyms.insert(alias, keyword);
                }
                None => tracing::warn!(alias = %alias, target = %target, "unknown synonym target"),
            }
        }
        Self { synonyms }
    }

    pub fn is_canonical(word: &str) -> bool {
        CANONICAL.contains_key(normalize(word).as_str())
    }

    pub fn resolve(&self, input: &str) -> Option<DateKeyword> {
        let word = normalize(input);
        CANONICAL
            .get(word.as_str())
            .or_else(|| self.synonyms.get(&word))
            .copied()
    }

    pub fn matches(&self, keyword: DateKeyword, input: &str) -> bool {
        self.resolve(input) == Some(keyword)
    }
}

fn normalize(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}
