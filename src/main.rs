//! tiktok-collections - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tiktok_collections::{
    api::TikTokApi,
    cli::Args,
    config::{validate_config, validate_target, Config, RunMode},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_error, print_info, print_summary, print_warning, write_report,
        ConsoleProgress,
    },
    scrape::{scrape, ScrapeProgress},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Resolution(_) | Error::Api(_) | Error::Http(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging on stderr; stdout is reserved for the report
    let log_level = if args.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if !args.quiet {
        print_banner();
    }

    // Load configuration and apply CLI overrides
    let mut config = Config::load_or_default(&args.config)?;
    args.merge_into_config(&mut config);

    validate_config(&config)?;
    validate_target(&args.target)?;

    let cookies = config.session_cookies()?;
    let mode = RunMode::from_cookies(&cookies);
    if !args.quiet {
        print_info(&format!("Mode: {} ({} cookies)", mode, cookies.len()));
        if !mode.is_authenticated() {
            print_warning("No session cookies: only public collections will be visible");
        }
    }

    let api = TikTokApi::new(
        &config.api.base_url,
        &config.api.user_agent,
        config.timeout(),
        &cookies,
    )?;
    tracing::debug!("Authenticated requests: {}", api.is_authenticated());

    let mut progress: Box<dyn ScrapeProgress> = if args.quiet {
        Box::new(())
    } else {
        Box::new(ConsoleProgress::new())
    };

    let report = scrape(&api, &config.rate, &args.target, mode, progress.as_mut()).await?;
    drop(progress);

    let destination = config.output.path.as_deref();
    write_report(&report, destination, config.output.pretty)?;

    if !args.quiet {
        print_summary(&report, destination);
    }

    Ok(())
}
