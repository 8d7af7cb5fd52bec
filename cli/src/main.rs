use clap::Parser;
use console::style;
use dotenv::dotenv;
use indicatif::{ProgressBar, ProgressStyle};
use shared_api::{Configuration, ServiceError};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

const MATCHED_MESSAGE: &str = "Faces matched!";
const NOT_MATCHED_MESSAGE: &str = "Faces did not match.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Attempt to load the .env file, ignoring errors if the file doesn't exist
    dotenv().ok();

    // wrong arguments exit here with the usage, before any AWS configuration is loaded
    let config = Configuration::parse();

    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
    // stdout is kept for the comparison result
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name.clone(), non_blocking_writer);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);
    if let Err(e) = LogTracer::init() {
        eprintln!("failed to forward log records to tracing: {}", e);
    }
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install the tracing subscriber: {}", e);
    }
    info!(app_name, "starting");

    match run(&config).await {
        Ok(matched) => {
            let line = result_line(matched);
            if matched {
                println!("{}", style(line).green().bold());
            } else {
                println!("{}", style(line).yellow());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Configuration) -> Result<bool, ServiceError> {
    let service = rekognition_api::connect(&config.aws).await?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} [{elapsed_precise}] {msg:.yellow.bold}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(format!(
        "comparing {} with {}",
        config.source_image, config.target_image
    ));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = service
        .compare_faces(&config.source_image, &config.target_image)
        .await;
    spinner.finish_and_clear();

    debug!("comparison result: {:?}", result);
    result
}

fn result_line(matched: bool) -> &'static str {
    if matched {
        MATCHED_MESSAGE
    } else {
        NOT_MATCHED_MESSAGE
    }
}
