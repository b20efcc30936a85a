//! CLI entry point for the imgzip tool.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use imgzip_core::{
    FetchError, PackagedResult, PipelineConfig, PipelineError, run, suggested_archive_name,
};
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

/// Itemized result listing is capped at this many lines.
const MAX_LISTED: usize = 200;

/// Exit code for a fatal page error (non-2xx page response).
const EXIT_PAGE_ERROR: u8 = 2;

/// Exit code for a fatal network error (page unreachable or timed out).
const EXIT_NETWORK_ERROR: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    match run_app(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("unexpected error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_app(args: Args) -> Result<ExitCode> {
    let config = PipelineConfig {
        page_url: args.url.clone(),
        timeout_secs: u64::from(args.timeout),
        max_images: usize::from(args.max_images),
        concurrency: usize::from(args.concurrency),
    };

    let spinner = if args.quiet || args.json {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_message("Fetching page and downloading images...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let result = run(&config).await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    // Fatal errors are distinguishable as page / network / unexpected.
    let result = match result {
        Ok(result) => result,
        Err(e @ PipelineError::PageFetch(FetchError::HttpStatus { .. })) => {
            eprintln!("page error: {e}");
            return Ok(ExitCode::from(EXIT_PAGE_ERROR));
        }
        Err(
            e @ PipelineError::PageFetch(FetchError::Network { .. } | FetchError::Timeout { .. }),
        ) => {
            eprintln!("network error: {e}");
            return Ok(ExitCode::from(EXIT_NETWORK_ERROR));
        }
        Err(e) => return Err(e.into()),
    };

    if result.downloaded.is_empty() {
        warn!(
            skipped = result.skipped.len(),
            "no downloadable images found (or the site blocked access)"
        );
        if args.json {
            print_json_report(&result, None)?;
        } else if !args.quiet {
            println!("No downloadable images found.");
            if !result.skipped.is_empty() {
                println!("Skipped/failed: {}", result.skipped.len());
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(suggested_archive_name(&args.url)));
    std::fs::write(&output, &result.archive_bytes)
        .with_context(|| format!("failed to write archive to {}", output.display()))?;

    info!(
        downloaded = result.downloaded.len(),
        skipped = result.skipped.len(),
        archive = %output.display(),
        "archive written"
    );

    if args.json {
        print_json_report(&result, Some(&output))?;
    } else if !args.quiet {
        print_summary(&result, &output);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(result: &PackagedResult, output: &std::path::Path) {
    println!(
        "Downloaded {} images (raw total: {} bytes) -> {}",
        result.downloaded.len(),
        result.total_raw_bytes(),
        output.display()
    );

    for image in result.downloaded.iter().take(MAX_LISTED) {
        println!(
            "  {}  ({}, {} bytes)",
            image.filename, image.content_type, image.size_bytes
        );
    }
    if result.downloaded.len() > MAX_LISTED {
        println!("  ... showing {MAX_LISTED} of {}", result.downloaded.len());
    }

    if !result.skipped.is_empty() {
        println!("Skipped/failed ({}):", result.skipped.len());
        for skip in result.skipped.iter().take(MAX_LISTED) {
            println!("  {}  ({})", skip.url, skip.reason);
        }
        if result.skipped.len() > MAX_LISTED {
            println!("  ... showing {MAX_LISTED} of {}", result.skipped.len());
        }
    }
}

fn print_json_report(result: &PackagedResult, output: Option<&std::path::Path>) -> Result<()> {
    let report = serde_json::json!({
        "archive": output.map(|p| p.display().to_string()),
        "downloaded": result.downloaded,
        "skipped": result.skipped,
        "total_raw_bytes": result.total_raw_bytes(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
