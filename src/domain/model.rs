use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One input row: only the first column is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub index: usize,
    pub line: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub word: String,
    pub tag: String,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// A record after tagging; the unit the later passes work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedText {
    pub record: WordRecord,
    pub tags: Vec<TaggedWord>,
}

impl TaggedText {
    pub fn text(&self) -> &str {
        &self.record.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaPair {
    pub index: usize,
    pub original: String,
    pub lemma: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub index: usize,
    pub original: String,
    pub polarity: f64,
    pub subjectivity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Sentiment,
    PosWrite,
    LemmaWrite,
    SentimentWrite,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Sentiment => "sentiment",
            Stage::PosWrite => "pos_write",
            Stage::LemmaWrite => "lemma_write",
            Stage::SentimentWrite => "sentiment_write",
        };
        f.write_str(name)
    }
}

/// An item a recoverable stage skipped, kept so the run can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedItem {
    pub stage: Stage,
    pub index: usize,
    pub text: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome<T> {
    pub items: Vec<T>,
    pub dropped: Vec<DroppedItem>,
}

impl<T> StageOutcome<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            dropped: Vec::new(),
        }
    }

    pub fn drop_count(&self) -> usize {
        self.dropped.len()
    }
}

impl<T> Default for StageOutcome<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationSet {
    pub tagged: Vec<TaggedText>,
    pub lemmas: Vec<LemmaPair>,
    pub sentiments: StageOutcome<SentimentScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub path: String,
    pub rows_written: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_path: String,
    pub records_read: usize,
    pub pos: OutputFile,
    pub lemma: OutputFile,
    pub sentiment: OutputFile,
    pub dropped: Vec<DroppedItem>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn dropped_in(&self, stage: Stage) -> usize {
        self.dropped.iter().filter(|d| d.stage == stage).count()
    }

    pub fn output_paths(&self) -> [&str; 3] {
        [&self.pos.path, &self.lemma.path, &self.sentiment.path]
    }
}

/// Byte encoding of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum InputEncoding {
    #[default]
    #[serde(rename = "latin1", alias = "iso-8859-1")]
    #[cfg_attr(feature = "cli", value(name = "latin1", alias = "iso-8859-1"))]
    Latin1,
    #[serde(rename = "utf-8", alias = "utf8")]
    #[cfg_attr(feature = "cli", value(name = "utf-8", alias = "utf8"))]
    Utf8,
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEncoding::Latin1 => f.write_str("latin1"),
            InputEncoding::Utf8 => f.write_str("utf-8"),
        }
    }
}

/// Part of speech handed to the lemmatizer. `Auto` follows the first tag of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LemmaPos {
    #[default]
    Noun,
    Verb,
    Adjective,
    Adverb,
    Auto,
}

impl LemmaPos {
    /// Maps a Penn Treebank tag onto the lemmatizer's word classes.
    pub fn from_penn_tag(tag: &str) -> Self {
        if tag.starts_with("VB") || tag == "MD" {
            LemmaPos::Verb
        } else if tag.starts_with("JJ") {
            LemmaPos::Adjective
        } else if tag.starts_with("RB") {
            LemmaPos::Adverb
        } else {
            LemmaPos::Noun
        }
    }
}

impl fmt::Display for LemmaPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LemmaPos::Noun => "noun",
            LemmaPos::Verb => "verb",
            LemmaPos::Adjective => "adjective",
            LemmaPos::Adverb => "adverb",
            LemmaPos::Auto => "auto",
        };
        f.write_str(name)
    }
}
