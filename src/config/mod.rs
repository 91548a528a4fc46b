pub mod storage;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{InputEncoding, LemmaPos};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "word-annotator")]
#[command(about = "Annotate a CSV word list with POS tags, lemmas and sentiment scores")]
pub struct CliConfig {
    /// CSV file whose first column holds the words
    #[arg(short, long)]
    pub input: String,

    #[arg(long, default_value = "../data")]
    pub output_dir: String,

    /// Output files are named pos_<name>, lemma_<name> and sent_<name>
    #[arg(long, default_value = "all_words.csv")]
    pub output_name: String,

    #[arg(long, value_enum, default_value_t = InputEncoding::Latin1)]
    pub encoding: InputEncoding,

    #[arg(long, value_enum, default_value_t = LemmaPos::Noun)]
    pub lemma_pos: LemmaPos,

    #[arg(long, help = "Write a JSON run report next to the outputs")]
    pub report: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory after each stage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn encoding(&self) -> InputEncoding {
        self.encoding
    }

    fn lemma_pos(&self) -> LemmaPos {
        self.lemma_pos
    }

    fn write_report(&self) -> bool {
        self.report
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_file_name("output_name", &self.output_name, &["csv"])?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["word-annotator", "--input", "words.csv"]);
        assert_eq!(config.output_dir, "../data");
        assert_eq!(config.output_name, "all_words.csv");
        assert_eq!(config.encoding, InputEncoding::Latin1);
        assert_eq!(config.lemma_pos, LemmaPos::Noun);
        assert!(!config.report);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_value_enums() {
        let config = CliConfig::parse_from([
            "word-annotator",
            "-i",
            "words.csv",
            "--encoding",
            "utf-8",
            "--lemma-pos",
            "auto",
        ]);
        assert_eq!(config.encoding, InputEncoding::Utf8);
        assert_eq!(config.lemma_pos, LemmaPos::Auto);
    }

    #[test]
    fn test_cli_rejects_non_csv_output_name() {
        let config = CliConfig::parse_from([
            "word-annotator",
            "--input",
            "words.csv",
            "--output-name",
            "words.txt",
        ]);
        assert!(config.validate().is_err());
    }
}
