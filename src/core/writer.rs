use crate::domain::model::{
    DroppedItem, InputEncoding, LemmaPair, SentimentScore, Stage, TaggedText,
};
use crate::nlp::tokenizer;
use crate::utils::error::{AnnotateError, Result};

pub const POS_PREFIX: &str = "pos_";
pub const LEMMA_PREFIX: &str = "lemma_";
pub const SENTIMENT_PREFIX: &str = "sent_";

/// One annotation turned into one output CSV row.
pub trait OutputRow {
    const STAGE: Stage;
    const WIDTH: usize;

    fn index(&self) -> usize;
    fn source_text(&self) -> &str;
    fn fields(&self) -> Result<Vec<String>>;
}

fn first_word_of(text: &str, what: &str) -> Result<String> {
    tokenizer::first_word(text).ok_or_else(|| AnnotateError::ExtractionError {
        message: format!("{} has no words", what),
    })
}

fn format_score(value: f64) -> String {
    // Debug 格式保留小數點: 1.0 而非 1
    format!("{:?}", value)
}

impl OutputRow for TaggedText {
    const STAGE: Stage = Stage::PosWrite;
    const WIDTH: usize = 2;

    fn index(&self) -> usize {
        self.record.index
    }

    fn source_text(&self) -> &str {
        self.text()
    }

    fn fields(&self) -> Result<Vec<String>> {
        let first = self.tags.first().ok_or_else(|| AnnotateError::ExtractionError {
            message: "no tagged words".to_string(),
        })?;
        Ok(vec![first.word.clone(), first.tag.clone()])
    }
}

impl OutputRow for LemmaPair {
    const STAGE: Stage = Stage::LemmaWrite;
    const WIDTH: usize = 2;

    fn index(&self) -> usize {
        self.index
    }

    fn source_text(&self) -> &str {
        &self.original
    }

    fn fields(&self) -> Result<Vec<String>> {
        Ok(vec![
            first_word_of(&self.original, "original text")?,
            first_word_of(&self.lemma, "lemma")?,
        ])
    }
}

impl OutputRow for SentimentScore {
    const STAGE: Stage = Stage::SentimentWrite;
    const WIDTH: usize = 3;

    fn index(&self) -> usize {
        self.index
    }

    fn source_text(&self) -> &str {
        &self.original
    }

    fn fields(&self) -> Result<Vec<String>> {
        Ok(vec![
            first_word_of(&self.original, "original text")?,
            format_score(self.polarity),
            format_score(self.subjectivity),
        ])
    }
}

#[derive(Debug, Clone)]
pub struct RenderedTable {
    pub bytes: Vec<u8>,
    pub rows_written: usize,
    pub dropped: Vec<DroppedItem>,
}

/// Renders every row that yields its fields; rows that fail extraction are
/// reported in `dropped` instead of aborting the table.
pub fn render_table<R: OutputRow>(items: &[R]) -> Result<RenderedTable> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    let mut rows_written = 0;
    let mut dropped = Vec::new();

    for item in items {
        let fields = match item.fields() {
            Ok(fields) if fields.len() == R::WIDTH => fields,
            Ok(fields) => {
                dropped.push(drop_item(
                    item,
                    format!("expected {} fields, got {}", R::WIDTH, fields.len()),
                ));
                continue;
            }
            Err(e) if e.is_recoverable() => {
                dropped.push(drop_item(item, e.to_string()));
                continue;
            }
            Err(e) => return Err(e),
        };

        writer.write_record(&fields)?;
        rows_written += 1;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    for item in &dropped {
        tracing::warn!(
            "⚠️ Skipped row {} ('{}') in {}: {}",
            item.index,
            item.text,
            item.stage,
            item.reason
        );
    }

    Ok(RenderedTable {
        bytes,
        rows_written,
        dropped,
    })
}

/// Re-encodes a rendered table in the run's encoding, so latin1 input gives
/// latin1 output. Characters outside latin1 become `?`.
pub fn encode_output(bytes: &[u8], encoding: InputEncoding) -> Result<Vec<u8>> {
    match encoding {
        InputEncoding::Utf8 => Ok(bytes.to_vec()),
        InputEncoding::Latin1 => {
            let text = encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or_else(|| AnnotateError::DecodeError {
                    encoding: InputEncoding::Utf8.to_string(),
                    message: "rendered table is not valid UTF-8".to_string(),
                })?;
            if !encoding_rs::mem::is_str_latin1(&text) {
                tracing::warn!("⚠️ Output has characters outside latin1, written as '?'");
            }
            Ok(encoding_rs::mem::encode_latin1_lossy(&text).into_owned())
        }
    }
}

fn drop_item<R: OutputRow>(item: &R, reason: String) -> DroppedItem {
    DroppedItem {
        stage: R::STAGE,
        index: item.index(),
        text: item.source_text().to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{TaggedWord, WordRecord};

    fn tagged(index: usize, text: &str, tags: Vec<TaggedWord>) -> TaggedText {
        TaggedText {
            record: WordRecord {
                index,
                line: index as u64 + 1,
                text: text.to_string(),
            },
            tags,
        }
    }

    #[test]
    fn test_pos_rows_use_first_tagged_word() {
        let items = vec![
            tagged(0, "happy", vec![TaggedWord::new("happy", "JJ")]),
            tagged(1, "!!!", vec![]),
            tagged(
                2,
                "good morning",
                vec![TaggedWord::new("good", "JJ"), TaggedWord::new("morning", "NN")],
            ),
        ];

        let table = render_table(&items).unwrap();
        assert_eq!(String::from_utf8(table.bytes).unwrap(), "happy,JJ\ngood,JJ\n");
        assert_eq!(table.rows_written, 2);
        assert_eq!(table.dropped.len(), 1);
        assert_eq!(table.dropped[0].stage, Stage::PosWrite);
        assert_eq!(table.dropped[0].index, 1);
    }

    #[test]
    fn test_lemma_rows_use_first_word_of_each_side() {
        let items = vec![
            LemmaPair {
                index: 0,
                original: "cats".to_string(),
                lemma: "cat".to_string(),
            },
            LemmaPair {
                index: 1,
                original: "...".to_string(),
                lemma: "...".to_string(),
            },
        ];

        let table = render_table(&items).unwrap();
        assert_eq!(String::from_utf8(table.bytes).unwrap(), "cats,cat\n");
        assert_eq!(table.dropped[0].stage, Stage::LemmaWrite);
    }

    #[test]
    fn test_sentiment_rows_keep_decimal_point() {
        let items = vec![SentimentScore {
            index: 0,
            original: "happy".to_string(),
            polarity: 0.8,
            subjectivity: 1.0,
        }];

        let table = render_table(&items).unwrap();
        assert_eq!(String::from_utf8(table.bytes).unwrap(), "happy,0.8,1.0\n");
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let items = vec![tagged(0, "a,b", vec![TaggedWord::new("a,b", "NN")])];
        let table = render_table(&items).unwrap();
        assert_eq!(String::from_utf8(table.bytes).unwrap(), "\"a,b\",NN\n");
    }

    #[test]
    fn test_latin1_output_round_trips_input_bytes() {
        let items = vec![tagged(0, "café", vec![TaggedWord::new("café", "NN")])];
        let table = render_table(&items).unwrap();

        let latin1 = encode_output(&table.bytes, InputEncoding::Latin1).unwrap();
        assert_eq!(latin1, b"caf\xe9,NN\n".to_vec());

        let utf8 = encode_output(&table.bytes, InputEncoding::Utf8).unwrap();
        assert_eq!(utf8, "café,NN\n".as_bytes());

        let wide = encode_output("Ω,NN\n".as_bytes(), InputEncoding::Latin1).unwrap();
        assert_eq!(wide, b"?,NN\n".to_vec());
    }
}
