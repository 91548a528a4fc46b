use crate::domain::model::LemmaPos;
use crate::utils::error::{AnnotateError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

const TAGS_TSV: &str = include_str!("data/tags.tsv");
const LEMMA_BASES_TSV: &str = include_str!("data/lemma_bases.tsv");
const LEMMA_EXCEPTIONS_TSV: &str = include_str!("data/lemma_exceptions.tsv");
const SENTIMENT_TSV: &str = include_str!("data/sentiment.tsv");

#[derive(Debug, Deserialize)]
struct TagRow {
    word: String,
    tag: String,
}

#[derive(Debug, Deserialize)]
struct BaseRow {
    word: String,
    pos: String,
}

#[derive(Debug, Deserialize)]
struct ExceptionRow {
    pos: String,
    inflected: String,
    lemma: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentEntry {
    pub polarity: f64,
    pub subjectivity: f64,
    pub intensity: f64,
}

impl SentimentEntry {
    pub fn is_modifier(&self) -> bool {
        (self.intensity - 1.0).abs() > f64::EPSILON
    }
}

#[derive(Debug, Deserialize)]
struct SentimentRow {
    word: String,
    polarity: f64,
    subjectivity: f64,
    intensity: f64,
}

/// Parses a tab separated table with `#` comment lines; columns map onto
/// the row struct by position.
fn read_table<T: for<'de> Deserialize<'de>>(source: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(source.as_bytes());

    let mut rows = Vec::new();
    for row in reader.deserialize::<T>() {
        rows.push(row?);
    }
    Ok(rows)
}

fn parse_pos(name: &str, code: &str) -> Result<LemmaPos> {
    match code {
        "n" => Ok(LemmaPos::Noun),
        "v" => Ok(LemmaPos::Verb),
        "a" => Ok(LemmaPos::Adjective),
        "r" => Ok(LemmaPos::Adverb),
        other => Err(AnnotateError::ConfigError {
            message: format!("lexicon table '{}' has unknown part of speech '{}'", name, other),
        }),
    }
}

/// Word lists shared by the built-in tagger, lemmatizer and sentiment scorer.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    tags: HashMap<String, String>,
    bases: HashSet<(LemmaPos, String)>,
    exceptions: HashMap<(LemmaPos, String), String>,
    sentiment: HashMap<String, SentimentEntry>,
}

impl Lexicon {
    pub fn builtin() -> Result<Self> {
        let mut lexicon = Self::default();

        for row in read_table::<TagRow>(TAGS_TSV)? {
            lexicon.tags.entry(row.word).or_insert(row.tag);
        }

        for row in read_table::<BaseRow>(LEMMA_BASES_TSV)? {
            let pos = parse_pos("lemma_bases", &row.pos)?;
            lexicon.bases.insert((pos, row.word));
        }

        for row in read_table::<ExceptionRow>(LEMMA_EXCEPTIONS_TSV)? {
            let pos = parse_pos("lemma_exceptions", &row.pos)?;
            lexicon.exceptions.insert((pos, row.inflected), row.lemma);
        }

        for row in read_table::<SentimentRow>(SENTIMENT_TSV)? {
            let entry = SentimentEntry {
                polarity: row.polarity,
                subjectivity: row.subjectivity,
                intensity: row.intensity,
            };
            lexicon.sentiment.insert(row.word, entry);
        }

        tracing::debug!(
            "Loaded lexicon: {} tags, {} base forms, {} exceptions, {} sentiment entries",
            lexicon.tags.len(),
            lexicon.bases.len(),
            lexicon.exceptions.len(),
            lexicon.sentiment.len()
        );

        Ok(lexicon)
    }

    pub fn tag_of(&self, word: &str) -> Option<&str> {
        self.tags.get(word).map(String::as_str)
    }

    pub fn is_base(&self, word: &str, pos: LemmaPos) -> bool {
        self.bases.contains(&(pos, word.to_string()))
    }

    pub fn exception(&self, word: &str, pos: LemmaPos) -> Option<&str> {
        self.exceptions
            .get(&(pos, word.to_string()))
            .map(String::as_str)
    }

    pub fn sentiment_of(&self, word: &str) -> Option<&SentimentEntry> {
        self.sentiment.get(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicon_loads() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(lexicon.tag_of("happy"), Some("JJ"));
        assert_eq!(lexicon.tag_of("the"), Some("DT"));
        assert!(lexicon.is_base("cat", LemmaPos::Noun));
        assert!(!lexicon.is_base("cats", LemmaPos::Noun));
        assert_eq!(lexicon.exception("went", LemmaPos::Verb), Some("go"));
    }

    #[test]
    fn test_sentiment_modifiers_are_marked() {
        let lexicon = Lexicon::builtin().unwrap();
        let very = lexicon.sentiment_of("very").unwrap();
        assert!(very.is_modifier());
        let happy = lexicon.sentiment_of("happy").unwrap();
        assert!(!happy.is_modifier());
        assert!(happy.polarity > 0.0);
    }

    #[test]
    fn test_read_table_rejects_malformed_rows() {
        let result = read_table::<SentimentRow>("# word\tpolarity\nhappy\tvery\t1.0\t1.0\n");
        assert!(matches!(result, Err(AnnotateError::CsvError(_))));
    }
}
