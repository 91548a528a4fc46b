use anyhow::Result;
use tempfile::TempDir;
use word_annotator::core::ConfigProvider;
use word_annotator::domain::model::TaggedWord;
use word_annotator::domain::ports::{PosTagger, SentimentScorer};
use word_annotator::{
    AnnotateError, AnnotationEngine, AnnotationPipeline, InputEncoding, LemmaPos, LocalStorage,
    NlpToolkit, Stage,
};

struct TestConfig {
    input: String,
    output_dir: String,
}

impl ConfigProvider for TestConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_name(&self) -> &str {
        "words.csv"
    }

    fn encoding(&self) -> InputEncoding {
        InputEncoding::Utf8
    }

    fn lemma_pos(&self) -> LemmaPos {
        LemmaPos::Noun
    }

    fn write_report(&self) -> bool {
        false
    }
}

/// Fails on one word, scores everything else as mildly positive.
struct PickyScorer {
    rejects: &'static str,
}

impl SentimentScorer for PickyScorer {
    fn score(&self, text: &str) -> word_annotator::Result<(f64, f64)> {
        if text == self.rejects {
            return Err(AnnotateError::ScoringError {
                text: text.to_string(),
                message: "model refused".to_string(),
            });
        }
        Ok((0.25, 0.5))
    }
}

struct BrokenTagger;

impl PosTagger for BrokenTagger {
    fn tag(&self, text: &str) -> word_annotator::Result<Vec<TaggedWord>> {
        if text == "sad" {
            return Err(AnnotateError::TaggingError {
                text: text.to_string(),
                message: "backend unavailable".to_string(),
            });
        }
        Ok(vec![TaggedWord::new(text, "NN")])
    }
}

fn setup(contents: &str) -> Result<(TempDir, TestConfig)> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("words.csv");
    std::fs::write(&input, contents)?;
    let config = TestConfig {
        input: input.to_string_lossy().into_owned(),
        output_dir: temp_dir.path().join("out").to_string_lossy().into_owned(),
    };
    Ok((temp_dir, config))
}

#[tokio::test]
async fn test_scoring_failures_are_dropped_and_reported() -> Result<()> {
    let (temp_dir, config) = setup("happy\nsad\ncats\n")?;

    let toolkit = NlpToolkit::builtin()?.with_scorer(Box::new(PickyScorer { rejects: "sad" }));
    let pipeline = AnnotationPipeline::new(LocalStorage::current_dir(), config, toolkit);
    let summary = AnnotationEngine::new(pipeline).run().await?;

    assert_eq!(summary.records_read, 3);
    assert_eq!(summary.pos.rows_written, 3);
    assert_eq!(summary.lemma.rows_written, 3);
    assert_eq!(summary.sentiment.rows_written, 2);

    assert_eq!(summary.dropped_in(Stage::Sentiment), 1);
    let dropped = &summary.dropped[0];
    assert_eq!(dropped.index, 1);
    assert_eq!(dropped.text, "sad");
    assert!(dropped.reason.contains("model refused"));

    let sent = std::fs::read_to_string(temp_dir.path().join("out").join("sent_words.csv"))?;
    assert_eq!(sent, "happy,0.25,0.5\ncats,0.25,0.5\n");

    Ok(())
}

#[tokio::test]
async fn test_tagging_failure_aborts_the_run() -> Result<()> {
    let (temp_dir, config) = setup("happy\nsad\n")?;

    let toolkit = NlpToolkit::builtin()?.with_tagger(Box::new(BrokenTagger));
    let pipeline = AnnotationPipeline::new(LocalStorage::current_dir(), config, toolkit);
    let result = AnnotationEngine::new(pipeline).run().await;

    match result {
        Err(e @ AnnotateError::TaggingError { .. }) => assert!(!e.is_recoverable()),
        other => panic!("expected a tagging error, got {:?}", other.map(|s| s.records_read)),
    }
    assert!(!temp_dir.path().join("out").exists());

    Ok(())
}

#[tokio::test]
async fn test_pipeline_passes_can_run_individually() -> Result<()> {
    let (_temp_dir, config) = setup("")?;
    let pipeline = AnnotationPipeline::new(LocalStorage::current_dir(), config, NlpToolkit::builtin()?);

    let records = word_annotator::core::loader::parse_words("good morning\nmice\n")?;
    let tagged = pipeline.tag_records(records)?;
    assert_eq!(tagged[0].tags.len(), 2);
    assert_eq!(tagged[0].tags[0], TaggedWord::new("good", "JJ"));
    assert_eq!(tagged[0].tags[1], TaggedWord::new("morning", "NN"));

    let lemmas = pipeline.lemmatize_all(&tagged)?;
    assert_eq!(lemmas[1].lemma, "mouse");

    let scores = pipeline.score_all(&tagged);
    assert_eq!(scores.items.len(), 2);
    assert_eq!(scores.drop_count(), 0);
    assert!(scores.items[0].polarity > 0.0);

    Ok(())
}
