use anyhow::{Context, Result};
use clap::Parser;
use ocr_core::envelope::into_envelope;
use ocr_core::image2text::TesseractEngine;
use ocr_core::upload::{process_upload, UploadedImage};
use ocr_server::common::init_logger_exe;
use ocr_server::service::EngineArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Recognize text in a local image the same way the OCR server does", long_about = None)]
struct Cli {
    #[arg(help = "Path to the image file")]
    image: PathBuf,

    #[arg(long, help = "Pretty-print the JSON output")]
    pretty: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

fn main() -> Result<()> {
    init_logger_exe();
    let cli = Cli::parse();

    let bytes = std::fs::read(&cli.image)
        .with_context(|| format!("Failed to read {}", cli.image.display()))?;
    let filename = cli
        .image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let engine = TesseractEngine::new(cli.engine.ocr_config());
    let outcome = process_upload(
        Some(UploadedImage::new(bytes, filename)),
        &engine,
        &cli.engine.processor_config(),
    );

    let (status, envelope) = into_envelope(outcome);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{}", json);

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
