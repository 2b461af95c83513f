use clap::Parser;
use indicatif::MultiProgress;
use instant_assistant_cli::config::get_config;
use instant_assistant_cli::{
    CliError, CliResult, ExitCode, ProvisionOptions, ProvisionOrchestrator, logging, terminal,
};
use instant_assistant_core::error::IoError;
use instant_assistant_core::{Error as CoreError, OpenAiClient, api_key_from_env};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "instant-assistant")]
#[command(author, version, about = "Create a retrieval assistant from a directory of documents", long_about = None)]
struct Cli {
    /// Directory containing the documents to upload
    dir: PathBuf,

    /// Name of the assistant
    #[arg(long, default_value = "My assistant")]
    name: String,

    /// Instructions for the assistant
    #[arg(long, default_value = "")]
    instructions: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version come through here too
            return if e.use_stderr() {
                ExitCode::Misuse.into()
            } else {
                ExitCode::Success.into()
            };
        }
    };

    let progress_bars = logging::init(cli.debug);
    if cli.debug {
        eprintln!("Debug logging enabled");
    }

    match run(&cli, progress_bars).await {
        Ok(url) => {
            println!("{url}");
            ExitCode::Success.into()
        }
        Err(error) => {
            eprint!("{}", error.format_for_user(cli.debug));
            error.exit_code().into()
        }
    }
}

async fn run(cli: &Cli, progress_bars: MultiProgress) -> CliResult<String> {
    // The key is checked first: without it nothing else may happen
    let api_key = api_key_from_env()?;
    ensure_directory(&cli.dir)?;

    let config = get_config().map_err(|e| CliError::configuration(&format!("{e:#}")))?;
    log::debug!("Scanning with {:?}", config.scan);

    let client = OpenAiClient::new(config.api.clone(), api_key)?;
    let orchestrator = ProvisionOrchestrator::new(
        client,
        ProvisionOptions {
            name: cli.name.clone(),
            instructions: cli.instructions.clone(),
            model: config.api.model.clone(),
            show_progress: terminal::should_show_progress_by_default(),
        },
    )
    .with_progress_bars(progress_bars);

    let report = orchestrator
        .run(&config.scan.to_scan_config(&cli.dir))
        .await?;

    if !report.failed.is_empty() {
        log::warn!(
            "{} of {} file(s) could not be uploaded",
            report.failed.len(),
            report.scanned.len()
        );
    }

    Ok(report.assistant_url)
}

fn ensure_directory(path: &Path) -> CliResult<()> {
    if path.is_dir() {
        return Ok(());
    }

    let error = if path.exists() {
        IoError::not_a_directory(path)
    } else {
        IoError::file_not_found(path)
    };
    Err(CoreError::Io(error).into())
}
