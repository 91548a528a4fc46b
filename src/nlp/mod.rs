//! Built-in annotation backends and the toolkit bundle handed to the pipeline.

pub mod lemmatizer;
pub mod lexicon;
pub mod sentiment;
pub mod tagger;
pub mod tokenizer;

use crate::domain::ports::{Lemmatizer, PosTagger, SentimentScorer};
use crate::utils::error::Result;
use std::sync::Arc;

pub use lemmatizer::MorphyLemmatizer;
pub use lexicon::Lexicon;
pub use sentiment::LexiconSentiment;
pub use tagger::LexiconTagger;

/// The three annotation backends one run uses.
pub struct NlpToolkit {
    pub tagger: Box<dyn PosTagger>,
    pub lemmatizer: Box<dyn Lemmatizer>,
    pub scorer: Box<dyn SentimentScorer>,
}

impl NlpToolkit {
    pub fn new(
        tagger: Box<dyn PosTagger>,
        lemmatizer: Box<dyn Lemmatizer>,
        scorer: Box<dyn SentimentScorer>,
    ) -> Self {
        Self {
            tagger,
            lemmatizer,
            scorer,
        }
    }

    /// Lexicon-backed tagger, lemmatizer and scorer sharing one lexicon.
    pub fn builtin() -> Result<Self> {
        let lexicon = Arc::new(Lexicon::builtin()?);
        Ok(Self::new(
            Box::new(LexiconTagger::new(Arc::clone(&lexicon))),
            Box::new(MorphyLemmatizer::new(Arc::clone(&lexicon))),
            Box::new(LexiconSentiment::new(lexicon)),
        ))
    }

    pub fn with_tagger(mut self, tagger: Box<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_lemmatizer(mut self, lemmatizer: Box<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    pub fn with_scorer(mut self, scorer: Box<dyn SentimentScorer>) -> Self {
        self.scorer = scorer;
        self
    }
}
