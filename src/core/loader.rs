use crate::domain::model::{InputEncoding, WordRecord};
use crate::utils::error::{AnnotateError, Result};

pub fn decode(bytes: Vec<u8>, encoding: InputEncoding) -> Result<String> {
    match encoding {
        // latin1 的每個位元組直接對應 U+0000..U+00FF
        InputEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(&bytes).into_owned()),
        InputEncoding::Utf8 => {
            let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
            if had_errors {
                return Err(AnnotateError::DecodeError {
                    encoding: encoding.to_string(),
                    message: "invalid byte sequence".to_string(),
                });
            }
            Ok(text.into_owned())
        }
    }
}

/// Reads the first column of every row. A blank line is a row without
/// fields and aborts the load.
///
/// The csv reader skips blank lines on its own, so the bytes it stepped over
/// between two records are checked here: anything beyond the previous
/// record's terminator is a blank line.
pub fn parse_words(text: &str) -> Result<Vec<WordRecord>> {
    let bytes = text.as_bytes();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut record = csv::StringRecord::new();
    let mut words = Vec::new();

    loop {
        let more = reader.read_record(&mut record)?;

        // 讀取前的位置: 上一筆記錄的結尾 (或檔案開頭)
        let (from, from_line) = record
            .position()
            .map(|p| (p.byte() as usize, p.line()))
            .unwrap_or((0, 1));
        let to = if more {
            skip_terminators(bytes, from)
        } else {
            bytes.len()
        };
        check_skipped(bytes, from, from_line, to, words.is_empty())?;

        if !more {
            break;
        }

        let line = from_line + newlines(&bytes[from..to]);
        let first = record.get(0).ok_or(AnnotateError::EmptyRow { line })?;
        words.push(WordRecord {
            index: words.len(),
            line,
            text: first.to_string(),
        });
    }

    tracing::debug!("Parsed {} rows from input", words.len());
    Ok(words)
}

fn is_terminator(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

fn skip_terminators(bytes: &[u8], from: usize) -> usize {
    from + bytes[from..].iter().take_while(|b| is_terminator(**b)).count()
}

fn newlines(bytes: &[u8]) -> u64 {
    bytes.iter().filter(|b| **b == b'\n').count() as u64
}

/// Line breaks in a run of terminator bytes; `\r\n` counts once.
fn line_breaks(gap: &[u8]) -> usize {
    gap.iter()
        .enumerate()
        .filter(|(i, b)| **b == b'\n' || gap.get(i + 1) != Some(&b'\n'))
        .count()
}

/// `from` is where the reader stopped after the previous record, `to` where
/// the next record starts. Between them lie only line terminators.
fn check_skipped(bytes: &[u8], from: usize, from_line: u64, to: usize, at_start: bool) -> Result<()> {
    if at_start {
        return match line_breaks(&bytes[..to]) {
            0 => Ok(()),
            _ => Err(AnnotateError::EmptyRow { line: 1 }),
        };
    }

    // 上一筆記錄結束時只吃掉了換行的第一個位元組
    let (gap_start, terminator_line) = match from.checked_sub(1).map(|i| bytes[i]) {
        Some(b'\n') => (from - 1, from_line - 1),
        Some(b'\r') => (from - 1, from_line),
        _ => (from, from_line),
    };

    if line_breaks(&bytes[gap_start..to]) > 1 {
        return Err(AnnotateError::EmptyRow {
            line: terminator_line + 1,
        });
    }
    Ok(())
}
