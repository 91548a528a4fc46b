use crate::domain::model::LemmaPos;
use crate::domain::ports::Lemmatizer;
use crate::nlp::lexicon::Lexicon;
use crate::nlp::tagger::undouble;
use crate::utils::error::{AnnotateError, Result};
use std::sync::Arc;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

/// WordNet-style morphological reduction over the built-in lexicon.
///
/// Lookup order: exception table, known base form, suffix rules whose result
/// is a known base form (shortest wins), then a guarded plural heuristic for
/// unknown nouns. Text that matches nothing comes back unchanged.
#[derive(Debug, Clone)]
pub struct MorphyLemmatizer {
    lexicon: Arc<Lexicon>,
}

impl MorphyLemmatizer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    fn rules(pos: LemmaPos) -> &'static [(&'static str, &'static str)] {
        match pos {
            LemmaPos::Noun => NOUN_RULES,
            LemmaPos::Verb => VERB_RULES,
            LemmaPos::Adjective => ADJECTIVE_RULES,
            LemmaPos::Adverb | LemmaPos::Auto => &[],
        }
    }

    fn candidates(&self, word: &str, pos: LemmaPos) -> Vec<String> {
        let mut found = Vec::new();

        if let Some(lemma) = self.lexicon.exception(word, pos) {
            found.push(lemma.to_string());
        }
        if self.lexicon.is_base(word, pos) {
            found.push(word.to_string());
        }

        for &(suffix, replacement) in Self::rules(pos) {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let candidate = format!("{}{}", stem, replacement);
            if self.lexicon.is_base(&candidate, pos) {
                found.push(candidate);
            } else if pos == LemmaPos::Verb && replacement.is_empty() {
                // running -> runn -> run
                let undoubled = undouble(stem);
                if undoubled != stem && self.lexicon.is_base(&undoubled, pos) {
                    found.push(undoubled);
                }
            }
        }

        found
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize(&self, text: &str, pos: LemmaPos) -> Result<String> {
        if pos == LemmaPos::Auto {
            return Err(AnnotateError::LemmatizationError {
                text: text.to_string(),
                message: "part of speech must be resolved before lemmatizing".to_string(),
            });
        }

        // 詞典只收小寫; 含大寫的字原樣保留
        let found = self.candidates(text, pos);
        if let Some(shortest) = found.into_iter().min_by_key(|c| c.chars().count()) {
            return Ok(shortest);
        }

        if pos == LemmaPos::Noun && !text.chars().any(char::is_uppercase) {
            if let Some(singular) = guess_singular(text) {
                return Ok(singular);
            }
        }

        Ok(text.to_string())
    }
}

/// Plural stripping for nouns missing from the lexicon ("zebras" -> "zebra").
fn guess_singular(lower: &str) -> Option<String> {
    if lower.chars().count() <= 3 || !lower.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return None;
    }

    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.chars().count() > 1 {
            return Some(format!("{}y", stem));
        }
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if lower.ends_with(suffix) {
            return lower.strip_suffix("es").map(str::to_string);
        }
    }
    if lower.ends_with('s') && !["ss", "us", "is", "ous"].iter().any(|s| lower.ends_with(s)) {
        return lower.strip_suffix('s').map(str::to_string);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmatizer() -> MorphyLemmatizer {
        MorphyLemmatizer::new(Arc::new(Lexicon::builtin().unwrap()))
    }

    fn noun(text: &str) -> String {
        lemmatizer().lemmatize(text, LemmaPos::Noun).unwrap()
    }

    #[test]
    fn test_lemmatize_is_idempotent_on_base_forms() {
        assert_eq!(noun("cats"), "cat");
        assert_eq!(noun("cat"), "cat");
        assert_eq!(noun(&noun("cats")), "cat");
        assert_eq!(noun("happy"), "happy");
    }

    #[test]
    fn test_noun_rules_and_exceptions() {
        assert_eq!(noun("boxes"), "box");
        assert_eq!(noun("churches"), "church");
        assert_eq!(noun("babies"), "baby");
        assert_eq!(noun("children"), "child");
        assert_eq!(noun("wolves"), "wolf");
        assert_eq!(noun("glass"), "glass");
    }

    #[test]
    fn test_unknown_plural_nouns_use_heuristic() {
        assert_eq!(noun("zebras"), "zebra");
        assert_eq!(noun("ponies"), "pony");
        assert_eq!(noun("campus"), "campus");
        assert_eq!(noun("famous"), "famous");
    }

    #[test]
    fn test_running_depends_on_part_of_speech() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("running", LemmaPos::Noun).unwrap(), "running");
        assert_eq!(l.lemmatize("running", LemmaPos::Verb).unwrap(), "run");
        assert_eq!(l.lemmatize("went", LemmaPos::Verb).unwrap(), "go");
        assert_eq!(l.lemmatize("hoped", LemmaPos::Verb).unwrap(), "hope");
        assert_eq!(l.lemmatize("carries", LemmaPos::Verb).unwrap(), "carry");
    }

    #[test]
    fn test_adjectives() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("better", LemmaPos::Adjective).unwrap(), "good");
        assert_eq!(l.lemmatize("larger", LemmaPos::Adjective).unwrap(), "large");
        assert_eq!(l.lemmatize("older", LemmaPos::Adjective).unwrap(), "old");
    }

    #[test]
    fn test_unresolved_auto_is_an_error() {
        let result = lemmatizer().lemmatize("cats", LemmaPos::Auto);
        assert!(matches!(result, Err(AnnotateError::LemmatizationError { .. })));
    }

    #[test]
    fn test_unmatched_text_keeps_its_case() {
        assert_eq!(noun("Xyzzy"), "Xyzzy");
    }

    #[test]
    fn test_capitalized_words_are_left_unchanged() {
        assert_eq!(noun("Cats"), "Cats");
        assert_eq!(noun("Zebras"), "Zebras");
        assert_eq!(lemmatizer().lemmatize("Running", LemmaPos::Verb).unwrap(), "Running");
    }
}
