use anyhow::{Context, Result};
use clap::{Args, Parser};
use ocr_core::image2text::OcrConfig;
use ocr_core::process::{ProcessorConfig, DEFAULT_CONFIDENCE_THRESHOLD};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    #[arg(long, env = "OCR_LANG", default_value = "eng", help = "Tesseract language profile, e.g. eng or chi_sim+eng")]
    pub lang: String,

    #[arg(long, env = "OCR_DPI", help = "Image resolution passed to Tesseract (default 600)")]
    pub dpi: Option<u32>,

    #[arg(long, env = "OCR_PSM", help = "Tesseract page segmentation mode (default 1, with orientation detection)")]
    pub psm: Option<u32>,

    #[arg(long, env = "OCR_OEM", help = "Tesseract OCR engine mode (default 1)")]
    pub oem: Option<u32>,

    #[arg(
        long,
        env = "OCR_CONFIDENCE_THRESHOLD",
        default_value_t = DEFAULT_CONFIDENCE_THRESHOLD,
        value_parser = parse_threshold,
        help = "Lines must score strictly above this to be kept"
    )]
    pub confidence_threshold: f64,

    #[arg(long, env = "OCR_TEMP_DIR", help = "Where uploads are staged (default: system temp dir)")]
    pub temp_dir: Option<PathBuf>,
}

impl EngineArgs {
    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig::new(self.lang.clone(), self.dpi, self.psm, self.oem)
    }

    pub fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig::new(self.confidence_threshold, self.temp_dir.clone())
    }
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "HTTP OCR service: upload an image, get its text back", long_about = None)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "OCR_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    #[arg(long, env = "OCR_RECOGNITION_TIMEOUT_SECS", help = "Give up waiting on the engine after this many seconds")]
    pub recognition_timeout_secs: Option<u64>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            processor: self.engine.processor_config(),
            lang: self.engine.lang.clone(),
            max_upload_bytes: self.max_upload_bytes,
            recognition_timeout: self.recognition_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServiceSettings {
    pub processor: ProcessorConfig,
    pub lang: String,
    pub max_upload_bytes: usize,
    pub recognition_timeout: Option<Duration>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            processor: ProcessorConfig::default(),
            lang: OcrConfig::get_default_lang(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            recognition_timeout: None,
        }
    }
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|e| format!("not a number: {}", e))?;

    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("{} is outside 0.0..=1.0", threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["ocr-server"]).unwrap();

        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.engine.confidence_threshold, DEFAULT_CONFIDENCE_THRESHOLD);
        assert!(config.service_settings().recognition_timeout.is_none());
    }

    #[test]
    fn test_engine_flags() {
        let config = ServerConfig::try_parse_from([
            "ocr-server",
            "--port",
            "8080",
            "--lang",
            "chi_sim+eng",
            "--psm",
            "3",
            "--confidence-threshold",
            "0.8",
            "--recognition-timeout-secs",
            "30",
        ])
        .unwrap();

        let ocr = config.engine.ocr_config();
        assert_eq!(ocr.lang, "chi_sim+eng");
        assert_eq!(ocr.psm, Some(3));
        assert_eq!(ocr.dpi, None);

        let settings = config.service_settings();
        assert_eq!(settings.processor.confidence_threshold, 0.8);
        assert_eq!(settings.recognition_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_threshold_range() {
        assert!(parse_threshold("0.5").is_ok());
        assert!(parse_threshold("1.5").is_err());
        assert!(parse_threshold("abc").is_err());
    }
}
