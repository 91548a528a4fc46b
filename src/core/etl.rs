use crate::core::Pipeline;
use crate::domain::model::{RunSummary, Stage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct AnnotationEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnnotationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting annotation run...");

        // Load
        let records = self.pipeline.extract().await?;
        tracing::info!("Loaded {} words", records.len());
        self.monitor.log_stats("Load");

        // Annotate
        let annotations = self.pipeline.transform(records).await?;
        tracing::info!(
            "Annotated {} words: {} lemmas, {} sentiment scores",
            annotations.tagged.len(),
            annotations.lemmas.len(),
            annotations.sentiments.items.len()
        );
        self.monitor.log_stats("Annotate");

        // Write
        let summary = self.pipeline.load(annotations).await?;
        tracing::info!(
            "Wrote {} pos rows, {} lemma rows, {} sentiment rows",
            summary.pos.rows_written,
            summary.lemma.rows_written,
            summary.sentiment.rows_written
        );
        if !summary.dropped.is_empty() {
            tracing::warn!(
                "⚠️ Dropped {} items (sentiment: {}, pos: {}, lemma: {}, sentiment rows: {})",
                summary.dropped.len(),
                summary.dropped_in(Stage::Sentiment),
                summary.dropped_in(Stage::PosWrite),
                summary.dropped_in(Stage::LemmaWrite),
                summary.dropped_in(Stage::SentimentWrite)
            );
        }
        self.monitor.log_stats("Write");
        self.monitor.log_final_stats();

        Ok(summary)
    }
}
