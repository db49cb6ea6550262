use anyhow::Result;
use rusty_tesseract::{Args, DataOutput, Image};
use std::collections::HashMap;
use std::path::Path;

use super::types::OcrConfig;
use super::OcrEngine;
use crate::common::RawLine;

/// Tesseract, driven through its TSV data output.
///
/// Tesseract scores words, not lines, so words sharing a
/// (page, block, paragraph, line) key are merged into one `RawLine` whose
/// confidence is the mean word confidence.
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    fn args(&self) -> Args {
        Args {
            lang: self.config.lang.clone(),
            config_variables: HashMap::from([("tessedit_create_tsv".into(), "1".into())]),
            dpi: Some(self.config.dpi.unwrap_or(OcrConfig::get_default_dpi()) as i32),
            psm: Some(self.config.psm.unwrap_or(OcrConfig::get_default_psm()) as i32),
            oem: Some(self.config.oem.unwrap_or(OcrConfig::get_default_oem()) as i32),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "Tesseract"
    }

    fn recognize(&self, path: &Path) -> Result<Option<Vec<RawLine>>> {
        let image = Image::from_path(path).map_err(|e| anyhow::anyhow!("{}", e))?;
        let data_output = rusty_tesseract::image_to_data(&image, &self.args())
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(data_output_to_lines(&data_output))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineKey {
    page: i32,
    block: i32,
    paragraph: i32,
    line: i32,
}

#[derive(Debug, Clone, Copy)]
struct Word<'a> {
    key: LineKey,
    text: &'a str,
    conf: f32, // 0 - 100, negative for non-word rows
}

fn data_output_to_lines(data_output: &DataOutput) -> Option<Vec<RawLine>> {
    if data_output.data.is_empty() {
        return None;
    }

    let words = data_output.data.iter().map(|row| Word {
        key: LineKey {
            page: row.page_num,
            block: row.block_num,
            paragraph: row.par_num,
            line: row.line_num,
        },
        text: row.text.as_str(),
        conf: row.conf,
    });

    Some(group_words(words))
}

fn group_words<'a>(words: impl IntoIterator<Item = Word<'a>>) -> Vec<RawLine> {
    let mut grouped: Vec<(LineKey, Vec<&'a str>, f64)> = Vec::new();

    for word in words {
        let text = word.text.trim();
        if word.conf < 0.0 || text.is_empty() {
            continue;
        }

        let confidence = (f64::from(word.conf) / 100.0).clamp(0.0, 1.0);
        match grouped.last_mut() {
            Some((key, texts, sum)) if *key == word.key => {
                texts.push(text);
                *sum += confidence;
            }
            _ => grouped.push((word.key, vec![text], confidence)),
        }
    }

    grouped
        .into_iter()
        .map(|(_, texts, sum)| RawLine::new(texts.join(" "), sum / texts.len() as f64))
        .collect()
}
