//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use imgzip_core::{DEFAULT_CONCURRENCY, DEFAULT_MAX_IMAGES, DEFAULT_TIMEOUT_SECS};

/// Download every image on a web page into a single ZIP archive.
///
/// Imgzip fetches one page, discovers every embedded image reference
/// (src, srcset, and common lazy-load attributes), downloads each image,
/// and writes the successful downloads into a deflate-compressed ZIP.
#[derive(Parser, Debug)]
#[command(name = "imgzip")]
#[command(author, version, about)]
pub struct Args {
    /// Web page URL to scan for images (http:// or https://)
    pub url: String,

    /// Maximum number of images to download (1-2000)
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_IMAGES as u16, value_parser = clap::value_parser!(u16).range(1..=2000))]
    pub max_images: u16,

    /// Per-request timeout in seconds (5-120)
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS as u8, value_parser = clap::value_parser!(u8).range(5..=120))]
    pub timeout: u8,

    /// Maximum concurrent image fetches (1 for strictly sequential, up to 16)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub concurrency: u8,

    /// Output ZIP path (default: <host>_images.zip in the current directory)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print a machine-readable JSON report instead of the summary
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["imgzip", "https://example.com/page"]).unwrap();
        assert_eq!(args.url, "https://example.com/page");
        assert_eq!(args.max_images, 300); // DEFAULT_MAX_IMAGES
        assert_eq!(args.timeout, 25); // DEFAULT_TIMEOUT_SECS
        assert_eq!(args.concurrency, 8); // DEFAULT_CONCURRENCY
        assert!(args.output.is_none());
        assert!(!args.json);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_requires_url() {
        let result = Args::try_parse_from(["imgzip"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_max_images_range_is_enforced() {
        let result = Args::try_parse_from(["imgzip", "https://x.test", "-m", "0"]);
        assert!(result.is_err());
        let result = Args::try_parse_from(["imgzip", "https://x.test", "-m", "2001"]);
        assert!(result.is_err());
        let args = Args::try_parse_from(["imgzip", "https://x.test", "-m", "2000"]).unwrap();
        assert_eq!(args.max_images, 2000);
    }

    #[test]
    fn test_cli_timeout_range_is_enforced() {
        let result = Args::try_parse_from(["imgzip", "https://x.test", "-t", "4"]);
        assert!(result.is_err());
        let result = Args::try_parse_from(["imgzip", "https://x.test", "-t", "121"]);
        assert!(result.is_err());
        let args = Args::try_parse_from(["imgzip", "https://x.test", "-t", "120"]).unwrap();
        assert_eq!(args.timeout, 120);
    }

    #[test]
    fn test_cli_concurrency_range_is_enforced() {
        let result = Args::try_parse_from(["imgzip", "https://x.test", "-c", "17"]);
        assert!(result.is_err());
        let args = Args::try_parse_from(["imgzip", "https://x.test", "-c", "1"]).unwrap();
        assert_eq!(args.concurrency, 1);
    }

    #[test]
    fn test_cli_output_and_json_flags() {
        let args = Args::try_parse_from([
            "imgzip",
            "https://x.test",
            "-o",
            "out.zip",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.output.unwrap(), PathBuf::from("out.zip"));
        assert!(args.json);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["imgzip", "https://x.test", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
