//! Command-line interface parsing for Parkscout
//!
//! This module handles parsing of CLI arguments using clap. All flags are
//! optional; the defaults match normal interactive use against nps.gov.

use clap::Parser;
use std::path::PathBuf;

/// Parkscout - browse national park sites by state and find nearby places
#[derive(Parser, Debug)]
#[command(name = "parkscout")]
#[command(about = "Browse U.S. national park sites by state and look up nearby places")]
#[command(version)]
pub struct Cli {
    /// Path of the JSON cache file (defaults to the user cache directory)
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// MapQuest API key (overrides the MAPQUEST_API_KEY environment variable)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Courtesy delay before each uncached request, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub delay_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["parkscout"]);
        assert!(cli.cache_file.is_none());
        assert!(cli.api_key.is_none());
        assert_eq!(cli.delay_ms, 1000);
    }

    #[test]
    fn test_cli_parse_cache_file() {
        let cli = Cli::parse_from(["parkscout", "--cache-file", "/tmp/cache.json"]);
        assert_eq!(cli.cache_file, Some(PathBuf::from("/tmp/cache.json")));
    }

    #[test]
    fn test_cli_parse_api_key_and_delay() {
        let cli = Cli::parse_from(["parkscout", "--api-key", "abc123", "--delay-ms", "0"]);
        assert_eq!(cli.api_key.as_deref(), Some("abc123"));
        assert_eq!(cli.delay_ms, 0);
    }
}
