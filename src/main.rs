use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xlsxdeck::{DeckGenerator, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};

/// `RUST_LOG`が未設定の場合のフィルター
const DEFAULT_LOG_FILTER: &str = "xlsxdeck=info";

/// Usage: `xlsxdeck [input.xlsx] [output.pptx]`
fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string());
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

    tracing::info!("++ Generating {} from {}", output, input);

    match DeckGenerator::new(&input, &output).generate() {
        Ok(()) => {
            tracing::info!("++ Done: {}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(log_filter(rust_log.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

/// `RUST_LOG`の指定をそのまま使い、未設定または解釈できない場合のみデフォルトにする
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
