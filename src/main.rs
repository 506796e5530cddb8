//! `mediascript` - command line tool for `MediaShout` 7 script files.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use mediascript::config::Config;
use mediascript::constants::cli::SCRIPT_EXTENSIONS;
use mediascript::container::{self, CodecOptions, ZipArchiveService};
use mediascript::script::Script;

#[derive(Parser)]
#[command(name = "mediascript", version, about = "Read, write and verify MediaShout 7 scripts")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty script
    New {
        /// Script name
        name: String,
        /// Output file (defaults to `<output dir>/<name>.sc7x`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a script's model document as JSON
    Json {
        /// Script file
        file: PathBuf,
    },
    /// Decode and re-encode a script, checking nothing is lost
    Roundtrip {
        /// Script file
        input: PathBuf,
        /// Where to write the re-encoded script
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Round-trip every script under a directory
    Batch {
        /// Directory to scan
        dir: PathBuf,
        /// Print a JSON report to stdout
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    debug!("{} {} starting", config.app_name(), config.app_version());
    let options = config.codec_options();

    match cli.command {
        Commands::New { name, output } => {
            let path = match output {
                Some(path) => path,
                None => default_output(&config, &name)?,
            };
            let script = mediascript::create_script(name);
            write_script(&script, &path, &options).await?;
            info!("Created {}", path.display());
        }
        Commands::Json { file } => {
            let script = read_script(&file, &options).await?;
            let document = script.encode().context("Failed to encode script model")?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::Roundtrip { input, output } => {
            let (script, bytes) = verify(&input, options).await?;
            info!(
                "{} round-trips: {} cues, {} bytes re-encoded",
                input.display(),
                script.cue_count(),
                bytes.len()
            );
            if let Some(path) = output {
                fs_err::tokio::write(&path, bytes).await?;
                info!("Wrote {}", path.display());
            }
        }
        Commands::Batch { dir, json } => batch(&dir, &config, options, json).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn default_output(config: &Config, name: &str) -> Result<PathBuf> {
    let Some(dir) = &config.output_dir else {
        bail!("No output directory; pass --output or set MEDIASCRIPT_OUTPUT_DIR");
    };
    Ok(dir.join(format!("{name}.sc7x")))
}

async fn read_script(path: &Path, options: &CodecOptions) -> Result<Script> {
    let bytes = fs_err::tokio::read(path).await?;
    container::decode_with(&bytes, &ZipArchiveService, options)
        .await
        .with_context(|| format!("Failed to decode {}", path.display()))
}

async fn write_script(script: &Script, path: &Path, options: &CodecOptions) -> Result<()> {
    let bytes = container::encode_with(script, &ZipArchiveService, options)
        .await
        .context("Failed to encode script")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::tokio::create_dir_all(parent).await?;
    }
    fs_err::tokio::write(path, bytes).await?;
    Ok(())
}

/// Decode, re-encode and decode again, requiring both decodes to agree.
async fn verify(path: &Path, options: CodecOptions) -> Result<(Script, Vec<u8>)> {
    let script = read_script(path, &options).await?;
    let bytes = container::encode_with(&script, &ZipArchiveService, &options)
        .await
        .with_context(|| format!("Failed to re-encode {}", path.display()))?;
    let again = container::decode_with(&bytes, &ZipArchiveService, &options)
        .await
        .with_context(|| format!("Failed to decode re-encoded {}", path.display()))?;
    if again != script {
        bail!("{} changed after re-encoding", path.display());
    }
    Ok((script, bytes))
}

fn is_script_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// One line of the `batch --json` report.
#[derive(Serialize)]
struct FileReport {
    path: PathBuf,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cues: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn batch(dir: &Path, config: &Config, options: CodecOptions, json: bool) -> Result<()> {
    let files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_script_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();
    info!("Checking {} scripts under {}", files.len(), dir.display());

    let results: Vec<(PathBuf, Result<(Script, Vec<u8>)>)> = stream::iter(files)
        .map(|path| async move {
            let result = verify(&path, options).await;
            (path, result)
        })
        .buffer_unordered(config.batch_concurrency)
        .collect()
        .await;

    let mut failed = 0usize;
    let mut report = Vec::with_capacity(results.len());
    for (path, result) in &results {
        match result {
            Ok((script, _)) => {
                info!("ok   {} ({} cues)", path.display(), script.cue_count());
                report.push(FileReport {
                    path: path.clone(),
                    ok: true,
                    cues: Some(script.cue_count()),
                    error: None,
                });
            }
            Err(e) => {
                failed += 1;
                warn!("FAIL {}: {e:#}", path.display());
                report.push(FileReport {
                    path: path.clone(),
                    ok: false,
                    cues: None,
                    error: Some(format!("{e:#}")),
                });
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!("{} of {} scripts round-trip", results.len() - failed, results.len());
    if failed > 0 {
        bail!("{failed} scripts failed to round-trip");
    }
    Ok(())
}
