use crate::domain::model::{LemmaPos, TaggedWord};
use crate::domain::ports::PosTagger;
use crate::nlp::lexicon::Lexicon;
use crate::nlp::tokenizer;
use crate::utils::error::Result;
use std::sync::Arc;

const NOUN_SUFFIXES: &[&str] = &[
    "ness", "ment", "tion", "sion", "ity", "ship", "ism", "ance", "ence", "hood",
];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "less", "ical", "ic", "ish", "ary", "al",
];

/// Lexicon lookup followed by suffix guesses and a few contextual repairs.
/// Produces Penn Treebank tags.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: Arc<Lexicon>,
}

impl LexiconTagger {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    fn initial_tag(&self, word: &str, sentence_initial: bool) -> String {
        let lower = word.to_lowercase();

        if let Some(tag) = self.lexicon.tag_of(&lower) {
            return tag.to_string();
        }

        if is_number(word) {
            return "CD".to_string();
        }

        if !sentence_initial && word.chars().next().is_some_and(char::is_uppercase) {
            return "NNP".to_string();
        }

        self.suffix_tag(&lower).to_string()
    }

    fn suffix_tag(&self, lower: &str) -> &'static str {
        let len = lower.chars().count();

        if len > 4 && lower.ends_with("ing") {
            return "VBG";
        }
        if len > 3 && lower.ends_with("ed") {
            return "VBD";
        }
        if len > 3 && lower.ends_with("ly") {
            return "RB";
        }
        if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return "NN";
        }
        if let Some(stem) = lower.strip_suffix("est") {
            if self.is_adjective_stem(stem, "iest") || self.is_adjective_stem(stem, "est") {
                return "JJS";
            }
        }
        if let Some(stem) = lower.strip_suffix("er") {
            if self.is_adjective_stem(stem, "ier") || self.is_adjective_stem(stem, "er") {
                return "JJR";
            }
        }
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return "JJ";
        }
        if len > 3
            && lower.ends_with('s')
            && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s))
        {
            return "NNS";
        }
        if lower.contains('-') {
            return "JJ";
        }
        "NN"
    }

    /// Checks whether `stem` plus the comparative ending came from a known
    /// adjective ("happ" + "iest" -> "happy", "larg" + "est" -> "large").
    fn is_adjective_stem(&self, stem: &str, ending: &str) -> bool {
        if stem.is_empty() {
            return false;
        }
        let is_adj = |w: &str| self.lexicon.is_base(w, LemmaPos::Adjective);

        if ending.starts_with('i') {
            return stem
                .strip_suffix('i')
                .is_some_and(|s| is_adj(format!("{}y", s).as_str()));
        }

        is_adj(stem) || is_adj(format!("{}e", stem).as_str()) || is_adj(undouble(stem).as_str())
    }

    fn apply_context_rules(&self, tagged: &mut [TaggedWord]) {
        for i in 1..tagged.len() {
            let prev = tagged[i - 1].tag.clone();
            let lower = tagged[i].word.to_lowercase();
            let current = tagged[i].tag.as_str();

            // to/情態動詞 之後接原形動詞
            if (prev == "TO" || prev == "MD")
                && (current == "VBP" || current == "NN")
                && self.lexicon.is_base(&lower, LemmaPos::Verb)
            {
                tagged[i].tag = "VB".to_string();
            } else if (prev == "DT" || prev == "PRP$") && current == "VBP" {
                tagged[i].tag = "NN".to_string();
            } else if prev == "PRP" && current == "NNS" {
                let stem = lower.strip_suffix('s').unwrap_or(&lower);
                if self.lexicon.is_base(stem, LemmaPos::Verb) {
                    tagged[i].tag = "VBZ".to_string();
                }
            }
        }
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedWord>> {
        let mut tagged: Vec<TaggedWord> = tokenizer::words(text)
            .into_iter()
            .enumerate()
            .map(|(i, word)| {
                let tag = self.initial_tag(&word, i == 0);
                TaggedWord::new(word, tag)
            })
            .collect();

        self.apply_context_rules(&mut tagged);
        Ok(tagged)
    }
}

fn is_number(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.' || c == '-')
}

/// "bigg" -> "big"
pub(crate) fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    match chars.as_slice() {
        [.., a, b] if a == b && !"aeiou".contains(*b) => {
            chars[..chars.len() - 1].iter().collect()
        }
        _ => stem.to_string(),
    }
}
