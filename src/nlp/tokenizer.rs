use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]").unwrap()
    })
}

/// Splits text into word and punctuation tokens. A trailing `n't` is split off
/// its stem ("don't" -> "do", "n't").
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for m in token_pattern().find_iter(text) {
        let token = m.as_str();
        match split_negation(token) {
            Some((stem, negation)) => {
                tokens.push(stem.to_string());
                tokens.push(negation.to_string());
            }
            None => tokens.push(token.to_string()),
        }
    }

    tokens
}

/// Tokens carrying at least one letter or digit; punctuation is dropped.
pub fn words(text: &str) -> Vec<String> {
    tokenize(text).into_iter().filter(|t| is_word(t)).collect()
}

pub fn first_word(text: &str) -> Option<String> {
    words(text).into_iter().next()
}

pub fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

fn split_negation(token: &str) -> Option<(&str, &str)> {
    let lower = token.to_lowercase();
    if lower.len() <= 3 || !(lower.ends_with("n't") || lower.ends_with("n’t")) {
        return None;
    }
    // "n't" 與 "n’t" 的位元組長度不同
    let suffix_len = if lower.ends_with("n't") { 3 } else { "n’t".len() };
    let split_at = token.len() - suffix_len;
    if !token.is_char_boundary(split_at) {
        return None;
    }
    Some(token.split_at(split_at))
}
