use crate::domain::model::{
    AnnotationSet, InputEncoding, LemmaPos, RunSummary, TaggedWord, WordRecord,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Display form of `path` as it lands on the backing store.
    fn resolve(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn output_name(&self) -> &str;
    fn encoding(&self) -> InputEncoding;
    fn lemma_pos(&self) -> LemmaPos;
    fn write_report(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<WordRecord>>;
    async fn transform(&self, records: Vec<WordRecord>) -> Result<AnnotationSet>;
    async fn load(&self, annotations: AnnotationSet) -> Result<RunSummary>;
}

/// Part-of-speech tagging backend. Punctuation is not part of the output.
pub trait PosTagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<TaggedWord>>;
}

pub trait Lemmatizer: Send + Sync {
    /// `pos` is never `LemmaPos::Auto`; callers resolve it first.
    fn lemmatize(&self, text: &str, pos: LemmaPos) -> Result<String>;
}

pub trait SentimentScorer: Send + Sync {
    /// Returns `(polarity, subjectivity)`.
    fn score(&self, text: &str) -> Result<(f64, f64)>;
}
