use crate::core::loader;
use crate::core::writer::{self, RenderedTable, LEMMA_PREFIX, POS_PREFIX, SENTIMENT_PREFIX};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    AnnotationSet, DroppedItem, LemmaPair, LemmaPos, OutputFile, RunSummary, SentimentScore,
    Stage, StageOutcome, TaggedText, WordRecord,
};
use crate::nlp::NlpToolkit;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Word annotation pipeline: load words, run the tag, lemma and sentiment
/// passes, write one CSV per pass.
pub struct AnnotationPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    toolkit: NlpToolkit,
    started_at: DateTime<Utc>,
}

impl<S: Storage, C: ConfigProvider> AnnotationPipeline<S, C> {
    pub fn new(storage: S, config: C, toolkit: NlpToolkit) -> Self {
        Self {
            storage,
            config,
            toolkit,
            started_at: Utc::now(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_path(&self, prefix: &str) -> String {
        Path::new(self.config.output_dir())
            .join(format!("{}{}", prefix, self.config.output_name()))
            .to_string_lossy()
            .into_owned()
    }

    fn report_path(&self) -> String {
        let stem = Path::new(self.config.output_name())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("run");
        Path::new(self.config.output_dir())
            .join(format!("report_{}.json", stem))
            .to_string_lossy()
            .into_owned()
    }

    pub fn tag_records(&self, records: Vec<WordRecord>) -> Result<Vec<TaggedText>> {
        let mut tagged = Vec::with_capacity(records.len());
        for record in records {
            let tags = self.toolkit.tagger.tag(&record.text)?;
            tagged.push(TaggedText { record, tags });
        }
        Ok(tagged)
    }

    pub fn lemmatize_all(&self, tagged: &[TaggedText]) -> Result<Vec<LemmaPair>> {
        let configured = self.config.lemma_pos();
        let mut lemmas = Vec::with_capacity(tagged.len());

        for item in tagged {
            let pos = match configured {
                LemmaPos::Auto => item
                    .tags
                    .first()
                    .map(|t| LemmaPos::from_penn_tag(&t.tag))
                    .unwrap_or_default(),
                pos => pos,
            };
            let lemma = self.toolkit.lemmatizer.lemmatize(item.text(), pos)?;
            lemmas.push(LemmaPair {
                index: item.record.index,
                original: item.text().to_string(),
                lemma,
            });
        }

        Ok(lemmas)
    }

    pub fn score_all(&self, tagged: &[TaggedText]) -> StageOutcome<SentimentScore> {
        let mut outcome = StageOutcome::new();

        for item in tagged {
            match self.toolkit.scorer.score(item.text()) {
                Ok((polarity, subjectivity)) => outcome.items.push(SentimentScore {
                    index: item.record.index,
                    original: item.text().to_string(),
                    polarity: polarity.clamp(-1.0, 1.0),
                    subjectivity: subjectivity.clamp(0.0, 1.0),
                }),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Sentiment scoring skipped row {} ('{}'): {}",
                        item.record.index,
                        item.text(),
                        e
                    );
                    outcome.dropped.push(DroppedItem {
                        stage: Stage::Sentiment,
                        index: item.record.index,
                        text: item.text().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome
    }

    async fn write_table(&self, path: &str, table: &RenderedTable) -> Result<OutputFile> {
        tracing::debug!("Writing {} rows ({} bytes) to {}", table.rows_written, table.bytes.len(), path);
        let bytes = writer::encode_output(&table.bytes, self.config.encoding())?;
        self.storage.write_file(path, &bytes).await?;
        Ok(OutputFile {
            path: self.storage.resolve(path),
            rows_written: table.rows_written,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for AnnotationPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<WordRecord>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading {} as {}", input_path, self.config.encoding());

        let bytes = self.storage.read_file(input_path).await?;
        let text = loader::decode(bytes, self.config.encoding())?;
        loader::parse_words(&text)
    }

    async fn transform(&self, records: Vec<WordRecord>) -> Result<AnnotationSet> {
        let tagged = self.tag_records(records)?;
        tracing::debug!(
            "Tagged {} rows into {} tokens",
            tagged.len(),
            tagged.iter().map(|t| t.tags.len()).sum::<usize>()
        );

        let lemmas = self.lemmatize_all(&tagged)?;
        tracing::debug!("Lemmatized {} rows as {}", lemmas.len(), self.config.lemma_pos());

        let sentiments = self.score_all(&tagged);
        if sentiments.drop_count() > 0 {
            tracing::warn!("{} rows dropped during sentiment scoring", sentiments.drop_count());
        }

        Ok(AnnotationSet {
            tagged,
            lemmas,
            sentiments,
        })
    }

    async fn load(&self, annotations: AnnotationSet) -> Result<RunSummary> {
        let records_read = annotations.tagged.len();
        let mut dropped = annotations.sentiments.dropped.clone();

        // 三個輸出依序寫入，前面已寫入的檔案不會回滾
        let pos_table = writer::render_table(&annotations.tagged)?;
        let pos = self
            .write_table(&self.output_path(POS_PREFIX), &pos_table)
            .await?;
        dropped.extend(pos_table.dropped);

        let lemma_table = writer::render_table(&annotations.lemmas)?;
        let lemma = self
            .write_table(&self.output_path(LEMMA_PREFIX), &lemma_table)
            .await?;
        dropped.extend(lemma_table.dropped);

        let sentiment_table = writer::render_table(&annotations.sentiments.items)?;
        let sentiment = self
            .write_table(&self.output_path(SENTIMENT_PREFIX), &sentiment_table)
            .await?;
        dropped.extend(sentiment_table.dropped);

        let summary = RunSummary {
            input_path: self.config.input_path().to_string(),
            records_read,
            pos,
            lemma,
            sentiment,
            dropped,
            started_at: self.started_at,
            finished_at: Utc::now(),
        };

        if self.config.write_report() {
            let report_path = self.report_path();
            let json = serde_json::to_vec_pretty(&summary)?;
            self.storage.write_file(&report_path, &json).await?;
            tracing::info!("📝 Run report saved to: {}", self.storage.resolve(&report_path));
        }

        Ok(summary)
    }
}
