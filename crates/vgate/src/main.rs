mod cli;
mod error;
mod logging;
mod report;
mod settings;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::info;
use vgate_core::{CheckConfig, DateMode, VersionCode, compare_version_codes, resolve_update_url};

use crate::cli::{CheckArgs, Cli, Command};
use crate::error::AppError;
use crate::settings::{AppSettings, CURRENT_VERSION_CODE};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("vgate: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let settings = AppSettings::load(cli.config.as_deref())?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Check(CheckArgs::default()));
    logging::init_logging(
        cli.verbose || settings.debug_logging,
        command
            .writes_log_file()
            .then_some(settings.max_log_size_bytes),
    );

    match command {
        Command::Check(args) => run_check(&settings, &args).await,
        Command::Format { code } => {
            println!("{}", VersionCode::new(&code)?.format());
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare { a, b } => {
            let ordering = compare_version_codes(&a, &b)?;
            println!("{}", report::ordering_value(ordering));
            Ok(ExitCode::SUCCESS)
        }
        Command::ResolveUrl(args) => {
            println!(
                "{}",
                resolve_update_url(&args.android, &args.ios, args.platform)
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_check(settings: &AppSettings, args: &CheckArgs) -> Result<ExitCode, AppError> {
    let config = check_config(settings, args)?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.http_timeout_secs))
        .user_agent(format!("vgate/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(AppError::HttpClient)?;

    let result = vgate_core::check_app_version(&http_client, &config).await;
    info!("Version check finished: {}", result.status);

    if args.json {
        println!("{}", report::render_json(&result)?);
    } else {
        print!("{}", report::render_summary(&result, args.platform));
    }

    Ok(ExitCode::from(report::exit_status(result.status)))
}

/// Command-line flags win over the settings file, which wins over built-in
/// defaults.
fn check_config(settings: &AppSettings, args: &CheckArgs) -> Result<CheckConfig, AppError> {
    let current_code =
        VersionCode::new(args.current_code.as_deref().unwrap_or(CURRENT_VERSION_CODE))?;
    let date_mode = if args.strict_dates {
        DateMode::Strict
    } else {
        settings.date_mode
    };

    let manifest_url = args
        .manifest_url
        .clone()
        .unwrap_or_else(|| settings.manifest_url.clone());
    let app_key = args
        .app_key
        .clone()
        .unwrap_or_else(|| settings.app_key.clone());

    Ok(CheckConfig::new(manifest_url, app_key, current_code).with_date_mode(date_mode))
}
