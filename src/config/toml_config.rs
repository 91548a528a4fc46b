use crate::core::ConfigProvider;
use crate::domain::model::{InputEncoding, LemmaPos};
use crate::utils::error::{AnnotateError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub annotate: AnnotateConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub encoding: InputEncoding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: String,
    #[serde(default = "default_output_name")]
    pub name: String,
    #[serde(default)]
    pub report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            name: default_output_name(),
            report: false,
        }
    }
}

fn default_output_dir() -> String {
    "../data".to_string()
}

fn default_output_name() -> String {
    "all_words.csv".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotateConfig {
    #[serde(default)]
    pub lemma_pos: LemmaPos,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnnotateError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AnnotateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WORDS_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;

        let input_path = validation::validate_required_field("input.path", &self.input.path)?;
        validation::validate_path("input.path", input_path)?;

        validation::validate_path("output.directory", &self.output.directory)?;
        validation::validate_file_name("output.name", &self.output.name, &["csv"])?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.input.path.as_deref().unwrap_or_default()
    }

    fn output_dir(&self) -> &str {
        &self.output.directory
    }

    fn output_name(&self) -> &str {
        &self.output.name
    }

    fn encoding(&self) -> InputEncoding {
        self.input.encoding
    }

    fn lemma_pos(&self) -> LemmaPos {
        self.annotate.lemma_pos
    }

    fn write_report(&self) -> bool {
        self.output.report
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let toml_content = r#"
[pipeline]
name = "semsoc-words"
version = "1.0.0"

[input]
path = "data/all_words.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "semsoc-words");
        assert_eq!(config.input_path(), "data/all_words.csv");
        assert_eq!(config.output_dir(), "../data");
        assert_eq!(config.output_name(), "all_words.csv");
        assert_eq!(config.encoding(), InputEncoding::Latin1);
        assert_eq!(config.lemma_pos(), LemmaPos::Noun);
        assert!(!config.write_report());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[pipeline]
name = "full"
description = "All sections"
version = "2.0"

[input]
path = "in.csv"
encoding = "utf-8"

[output]
directory = "out"
name = "words.csv"
report = true

[annotate]
lemma_pos = "auto"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.encoding(), InputEncoding::Utf8);
        assert_eq!(config.lemma_pos(), LemmaPos::Auto);
        assert_eq!(config.output_dir(), "out");
        assert!(config.write_report());
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WORD_ANNOTATOR_TEST_INPUT", "/tmp/words.csv");

        let toml_content = r#"
[pipeline]
name = "env"
version = "1.0"

[input]
path = "${WORD_ANNOTATOR_TEST_INPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_path(), "/tmp/words.csv");

        std::env::remove_var("WORD_ANNOTATOR_TEST_INPUT");
    }

    #[test]
    fn test_missing_input_path_fails_validation() {
        let toml_content = r#"
[pipeline]
name = "no-input"
version = "1.0"

[input]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(AnnotateError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_encoding_is_a_parse_error() {
        let toml_content = r#"
[pipeline]
name = "bad"
version = "1.0"

[input]
path = "in.csv"
encoding = "ebcdic"
"#;

        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(AnnotateError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"
version = "1.0"

[input]
path = "words.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
    }
}
