mod cli;
mod error;
mod output;

use clap::Parser;
use dca_calculator_core::view::ResultsArea;
use dca_calculator_core::DcaCalculator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let settings = cli.settings()?;
    tracing::info!(base_url = %settings.base_url, locale = %settings.locale, "starting");

    let calculator = DcaCalculator::new(settings)?;

    let today = chrono::Local::now().date_naive();
    let mut form = calculator.initial_form(today);
    cli.fill_form(&mut form);

    let mut area = ResultsArea::new();
    let outcome = calculator.submit(&form, &mut area).await;

    // The error message is part of the output too, so write before failing.
    output::write(&area, cli.format, cli.output.as_deref())?;
    outcome?;
    Ok(())
}

/// Logs go to stderr so stdout stays clean for the rendered output.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
