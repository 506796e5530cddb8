//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use flate2::Compression;
use std::env;
use std::path::PathBuf;

use crate::constants::cli::DEFAULT_BATCH_CONCURRENCY;
use crate::container::CodecOptions;
use crate::error::{Error, Result};

/// Configuration for the library and the command line tools.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Deflate level used when writing the embedded archive (0-9)
    pub compression_level: u32,
    /// Reject containers whose magic tag is not `sc7x`
    pub strict_magic: bool,
    /// Directory the CLI writes new scripts to when no path is given
    pub output_dir: Option<PathBuf>,
    /// Number of files `batch` processes at once
    pub batch_concurrency: usize,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            compression_level: Compression::best().level(),
            strict_magic: false,
            output_dir: dirs::document_dir(),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(level) = env::var("MEDIASCRIPT_COMPRESSION_LEVEL") {
            config.compression_level = parse_compression_level(&level)?;
        }

        if let Ok(strict) = env::var("MEDIASCRIPT_STRICT_MAGIC") {
            config.strict_magic = parse_flag(&strict);
        }

        // Output dir: env var override, or default ~/Documents
        if let Ok(path) = env::var("MEDIASCRIPT_OUTPUT_DIR") {
            config.output_dir = Some(PathBuf::from(shellexpand::tilde(&path).to_string()));
        }

        if let Ok(count) = env::var("MEDIASCRIPT_BATCH_CONCURRENCY") {
            config.batch_concurrency = match count.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::config(
                        format!("MEDIASCRIPT_BATCH_CONCURRENCY={count:?} is not a positive integer"),
                        "Set it to a whole number such as 4",
                    ))
                }
            };
        }

        Ok(config)
    }

    /// The codec-relevant subset of this configuration
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            compression: Compression::new(self.compression_level),
            strict_magic: self.strict_magic,
        }
    }
}

fn parse_compression_level(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(level) if level <= 9 => Ok(level),
        _ => Err(Error::config(
            format!("MEDIASCRIPT_COMPRESSION_LEVEL={raw:?} is out of range"),
            "Use a deflate level from 0 (store) to 9 (best)",
        )),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
