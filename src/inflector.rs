//! English noun inflection for inferred template names.
//!
//! `render(@topic)` and `render(message.topics)` both mean "render the `topics/topic`
//! partial". Turning the trailing word into a `plural/singular` pair needs a
//! pluralizer and a singularizer. Hosts that already own an inflection library plug it
//! in through the [`Inflector`] trait; [`EnglishInflector`] is the built-in rule set.
//!
//! Rules are tried in order and the first match wins, after irregular and
//! uncountable words are handled.

use regex::Regex;
use std::sync::LazyLock;

/// Pluralization and singularization capability.
pub trait Inflector: Send + Sync {
    /// Plural form of `word`. Already plural words are returned unchanged.
    fn pluralize(&self, word: &str) -> String;

    /// Singular form of `word`. Already singular words are returned unchanged.
    fn singularize(&self, word: &str) -> String;
}

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

/// `(singular, plural)` pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const PLURAL_RULES: &[(&str, &str)] = &[
    (r"(?i)(quiz)$", "${1}zes"),
    (r"(?i)^(ox)$", "${1}en"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)sis$", "ses"),
    (r"(?i)([ti])a$", "${1}a"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)(buffal|tomat)o$", "${1}oes"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(octop|vir)(?:us|i)$", "${1}i"),
    (r"(?i)s$", "s"),
    (r"$", "s"),
];

const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)^(ox)en$", "${1}"),
    (r"(?i)(alias|status)(?:es)?$", "${1}"),
    (r"(?i)(octop|vir)(?:us|i)$", "${1}us"),
    (r"(?i)(cris|test)(?:is|es)$", "${1}is"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(bus)(?:es)?$", "${1}"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)(s)eries$", "${1}eries"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(analy|ba|diagno|parenthe|progno|synop|the)(?:sis|ses)$", "${1}sis"),
    (r"(?i)([ti])a$", "${1}um"),
    (r"(?i)(n)ews$", "${1}ews"),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)s$", ""),
];

fn compile(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(pattern).ok().map(|regex| (regex, *replacement))
        })
        .collect()
}

static PLURALS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(PLURAL_RULES));
static SINGULARS: LazyLock<Vec<(Regex, &'static str)>> =
    LazyLock::new(|| compile(SINGULAR_RULES));

/// Built-in English inflector covering regular nouns plus common irregulars.
///
/// # Examples
///
/// ```rust
/// use template_digest::inflector::{EnglishInflector, Inflector};
///
/// let inflector = EnglishInflector;
/// assert_eq!(inflector.pluralize("topic"), "topics");
/// assert_eq!(inflector.singularize("topics"), "topic");
/// assert_eq!(inflector.pluralize("category"), "categories");
/// assert_eq!(inflector.singularize("people"), "person");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl EnglishInflector {
    fn apply(word: &str, rules: &[(Regex, &'static str)]) -> String {
        if word.is_empty() || UNCOUNTABLE.contains(&word.to_lowercase().as_str()) {
            return word.to_string();
        }
        for (regex, replacement) in rules {
            if regex.is_match(word) {
                return regex.replace(word, *replacement).into_owned();
            }
        }
        word.to_string()
    }
}

impl Inflector for EnglishInflector {
    fn pluralize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if let Some((_, plural)) =
            IRREGULAR.iter().find(|(singular, plural)| lower == *singular || lower == *plural)
        {
            return (*plural).to_string();
        }
        Self::apply(word, &PLURALS)
    }

    fn singularize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if let Some((singular, _)) =
            IRREGULAR.iter().find(|(singular, plural)| lower == *singular || lower == *plural)
        {
            return (*singular).to_string();
        }
        Self::apply(word, &SINGULARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_regular_nouns() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.pluralize("topic"), "topics");
        assert_eq!(inflector.pluralize("comment"), "comments");
        assert_eq!(inflector.pluralize("box"), "boxes");
        assert_eq!(inflector.pluralize("address"), "addresses");
        assert_eq!(inflector.pluralize("category"), "categories");
        assert_eq!(inflector.pluralize("day"), "days");
        assert_eq!(inflector.pluralize("wife"), "wives");
        assert_eq!(inflector.pluralize("status"), "statuses");
    }

    #[test]
    fn test_pluralize_is_identity_on_plurals() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.pluralize("topics"), "topics");
        assert_eq!(inflector.pluralize("people"), "people");
        assert_eq!(inflector.pluralize("news"), "news");
    }

    #[test]
    fn test_singularize_regular_nouns() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.singularize("topics"), "topic");
        assert_eq!(inflector.singularize("boxes"), "box");
        assert_eq!(inflector.singularize("addresses"), "address");
        assert_eq!(inflector.singularize("categories"), "category");
        assert_eq!(inflector.singularize("wives"), "wife");
        assert_eq!(inflector.singularize("statuses"), "status");
        assert_eq!(inflector.singularize("analyses"), "analysis");
    }

    #[test]
    fn test_singularize_is_identity_on_singulars() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.singularize("topic"), "topic");
        assert_eq!(inflector.singularize("address"), "address");
        assert_eq!(inflector.singularize("status"), "status");
        assert_eq!(inflector.singularize("person"), "person");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.pluralize("person"), "people");
        assert_eq!(inflector.singularize("children"), "child");
        assert_eq!(inflector.pluralize("sheep"), "sheep");
        assert_eq!(inflector.singularize("series"), "series");
    }
}
