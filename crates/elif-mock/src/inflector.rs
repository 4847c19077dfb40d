//! Inflection service - singular/plural rules and name casing
//!
//! Names are inflected on their last word only, so compound names such as
//! `amazingContacts` become `amazingContact`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::config::MockConfig;

/// Pluralization service used by name resolution and relationship inference
pub trait Inflector: Send + Sync {
    /// Singular form of `word`; uncountable words come back unchanged
    fn singularize(&self, word: &str) -> String;

    /// Plural form of `word`; uncountable words come back unchanged
    fn pluralize(&self, word: &str) -> String;

    /// Whether `word` has a single form for singular and plural
    fn is_uncountable(&self, word: &str) -> bool;
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn compile(rules: &[(&str, &'static str)]) -> Vec<Rule> {
    rules
        .iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(&format!("(?i){}", pattern)).expect("built-in inflection rule"),
            replacement,
        })
        .collect()
}

// Highest priority first.
static PLURAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    compile(&[
        ("(quiz)$", "${1}zes"),
        ("^(oxen)$", "${1}"),
        ("^(ox)$", "${1}en"),
        ("^(m|l)ice$", "${1}ice"),
        ("^(m|l)ouse$", "${1}ice"),
        ("(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        ("(x|ch|ss|sh)$", "${1}es"),
        ("([^aeiouy]|qu)y$", "${1}ies"),
        ("(hive)$", "${1}s"),
        ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        ("sis$", "ses"),
        ("([ti])a$", "${1}a"),
        ("([ti])um$", "${1}a"),
        ("(buffal|tomat)o$", "${1}oes"),
        ("(bu)s$", "${1}ses"),
        ("(alias|status)$", "${1}es"),
        ("(octop|vir)i$", "${1}i"),
        ("(octop|vir)us$", "${1}i"),
        ("^(ax|test)is$", "${1}es"),
        ("s$", "s"),
        ("$", "s"),
    ])
});

static SINGULAR_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    compile(&[
        ("(database)s$", "${1}"),
        ("(quiz)zes$", "${1}"),
        ("(matr)ices$", "${1}ix"),
        ("(vert|ind)ices$", "${1}ex"),
        ("^(ox)en", "${1}"),
        ("(alias|status)(es)?$", "${1}"),
        ("(octop|vir)(us|i)$", "${1}us"),
        ("^(a)x[ie]s$", "${1}xis"),
        ("(cris|test)(is|es)$", "${1}is"),
        ("(shoe)s$", "${1}"),
        ("(o)es$", "${1}"),
        ("(bus)(es)?$", "${1}"),
        ("^(m|l)ice$", "${1}ouse"),
        ("(x|ch|ss|sh)es$", "${1}"),
        ("(m)ovies$", "${1}ovie"),
        ("(s)eries$", "${1}eries"),
        ("([^aeiouy]|qu)ies$", "${1}y"),
        ("([lr])ves$", "${1}f"),
        ("(tive)s$", "${1}"),
        ("(hive)s$", "${1}"),
        ("([^f])ves$", "${1}fe"),
        ("(^analy)(sis|ses)$", "${1}sis"),
        (
            "((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
            "${1}sis",
        ),
        ("([ti])a$", "${1}um"),
        ("(n)ews$", "${1}ews"),
        ("(ss)$", "${1}"),
        ("s$", ""),
    ])
});

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("cow", "kine"),
    ("zombie", "zombies"),
];

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
];

/// English rule set with configurable irregular and uncountable nouns
#[derive(Debug, Clone)]
pub struct EnglishInflector {
    plurals: Vec<Rule>,
    singulars: Vec<Rule>,
    irregular_plurals: HashMap<String, String>,
    irregular_singulars: HashMap<String, String>,
    uncountable: HashSet<String>,
}

impl Default for EnglishInflector {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishInflector {
    pub fn new() -> Self {
        let mut inflector = Self {
            plurals: PLURAL_RULES.clone(),
            singulars: SINGULAR_RULES.clone(),
            irregular_plurals: HashMap::new(),
            irregular_singulars: HashMap::new(),
            uncountable: UNCOUNTABLE.iter().map(|w| w.to_string()).collect(),
        };
        for (singular, plural) in IRREGULAR {
            inflector.irregular(singular, plural);
        }
        inflector
    }

    /// Build an inflector with the extra nouns from `config`
    pub fn from_config(config: &MockConfig) -> Self {
        let mut inflector = Self::new();
        for word in &config.uncountable {
            inflector.uncountable(word);
        }
        for (singular, plural) in &config.irregular {
            inflector.irregular(singular, plural);
        }
        inflector
    }

    /// Mark a noun as uncountable
    pub fn uncountable(&mut self, word: &str) -> &mut Self {
        self.uncountable.insert(word.to_lowercase());
        self
    }

    /// Register an irregular singular/plural pair
    pub fn irregular(&mut self, singular: &str, plural: &str) -> &mut Self {
        let singular = singular.to_lowercase();
        let plural = plural.to_lowercase();
        self.irregular_plurals.insert(singular.clone(), plural.clone());
        self.irregular_singulars.insert(plural, singular);
        self
    }

    /// `irregulars` maps into the wanted form; `already` holds irregular words
    /// that are in that form already and must not go through the rules.
    fn inflect(
        &self,
        word: &str,
        irregulars: &HashMap<String, String>,
        already: &HashMap<String, String>,
        rules: &[Rule],
    ) -> String {
        let (head, tail) = split_last_word(word);
        if tail.is_empty() {
            return word.to_string();
        }

        let lower = tail.to_lowercase();
        if self.uncountable.contains(&lower) {
            return word.to_string();
        }

        if let Some(replacement) = irregulars.get(&lower) {
            return format!("{}{}", head, match_capitalization(tail, replacement));
        }
        if already.contains_key(&lower) {
            return word.to_string();
        }

        for rule in rules {
            if rule.pattern.is_match(tail) {
                let inflected = rule.pattern.replace(tail, rule.replacement);
                return format!("{}{}", head, inflected);
            }
        }

        word.to_string()
    }
}

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        self.inflect(word, &self.irregular_singulars, &self.irregular_plurals, &self.singulars)
    }

    fn pluralize(&self, word: &str) -> String {
        self.inflect(word, &self.irregular_plurals, &self.irregular_singulars, &self.plurals)
    }

    fn is_uncountable(&self, word: &str) -> bool {
        let (_, tail) = split_last_word(word);
        self.uncountable.contains(&tail.to_lowercase())
    }
}

/// Split `amazingContacts` into (`amazing`, `Contacts`) and `amazing-contacts`
/// into (`amazing-`, `contacts`).
fn split_last_word(word: &str) -> (&str, &str) {
    let boundary = word
        .char_indices()
        .filter(|(i, c)| *i > 0 && (c.is_uppercase() || *c == '-' || *c == '_'))
        .map(|(i, c)| if c == '-' || c == '_' { i + 1 } else { i })
        .last()
        .unwrap_or(0);
    word.split_at(boundary)
}

fn match_capitalization(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(first) if first.is_uppercase() => capitalize(replacement),
        _ => replacement.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert `amazing-contact`, `amazing_contact` or `AmazingContact` to `amazingContact`
pub fn camelize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (index, part) in s
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .enumerate()
    {
        if index == 0 {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                result.extend(first.to_lowercase());
                result.push_str(chars.as_str());
            }
        } else {
            result.push_str(&capitalize(part));
        }
    }
    result
}
