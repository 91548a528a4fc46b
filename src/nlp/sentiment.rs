use crate::domain::ports::SentimentScorer;
use crate::nlp::lexicon::Lexicon;
use crate::nlp::tokenizer;
use crate::utils::error::{AnnotateError, Result};
use std::sync::Arc;

const NEGATORS: &[&str] = &["not", "no", "never", "n't", "n’t"];
const NEGATION_FACTOR: f64 = -0.5;

/// Averages lexicon polarity and subjectivity over the words of a text.
///
/// Modifiers ("very", "slightly") scale the word right after them instead of
/// being scored, and a negator flips the next scored word at half strength.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    lexicon: Arc<Lexicon>,
}

impl LexiconSentiment {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl SentimentScorer for LexiconSentiment {
    fn score(&self, text: &str) -> Result<(f64, f64)> {
        let words: Vec<String> = tokenizer::words(text)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();

        let mut scored: Vec<(f64, f64)> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for (i, word) in words.iter().enumerate() {
            if NEGATORS.contains(&word.as_str()) {
                negated = true;
                continue;
            }

            let Some(entry) = self.lexicon.sentiment_of(word) else {
                intensity = 1.0;
                continue;
            };

            let next_is_scored = words
                .get(i + 1)
                .and_then(|next| self.lexicon.sentiment_of(next))
                .is_some_and(|next| !next.is_modifier());
            if entry.is_modifier() && next_is_scored {
                intensity *= entry.intensity;
                continue;
            }

            let mut polarity = entry.polarity * intensity;
            if negated {
                polarity *= NEGATION_FACTOR;
            }
            let subjectivity = entry.subjectivity * intensity;
            scored.push((polarity, subjectivity));

            intensity = 1.0;
            negated = false;
        }

        if scored.is_empty() {
            return Ok((0.0, 0.0));
        }

        let n = scored.len() as f64;
        let polarity = scored.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = scored.iter().map(|(_, s)| s).sum::<f64>() / n;

        if !polarity.is_finite() || !subjectivity.is_finite() {
            return Err(AnnotateError::ScoringError {
                text: text.to_string(),
                message: "score is not a finite number".to_string(),
            });
        }

        Ok((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)))
    }
}
