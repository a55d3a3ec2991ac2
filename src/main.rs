// Command-line host for the placeholder generator.
// The library (lib.rs) holds everything else; this file only wires files in and downloads out.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use placeholder_generator_lib::utils::{read_input_file, save_export};
use placeholder_generator_lib::{
    download_all, download_placeholder, process_images, upload_images, AppState, ProcessorConfig,
    ProgressType,
};

/// Generate same-size placeholder images for a set of pictures
#[derive(Parser, Debug)]
#[command(name = "placeholder-gen")]
#[command(version)]
#[command(about = "Generates same-size placeholder images for a batch of pictures", long_about = None)]
struct Cli {
    /// Images to generate placeholders for; non-image files are skipped
    #[arg(required = true, value_name = "FILE")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    files: Vec<PathBuf>,

    /// Directory the generated files are written to
    #[arg(long, value_name = "DIR", default_value = "placeholders")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    out_dir: PathBuf,

    /// Also write every placeholder into one ZIP archive
    #[arg(long)]
    zip: bool,

    /// Skip writing the individual PNG files
    #[arg(long)]
    no_singles: bool,

    /// Pause before publishing each placeholder, in milliseconds
    #[arg(long, value_name = "MS")]
    pacing_ms: Option<u64>,

    /// JSON file with processor settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<ProcessorConfig> {
    let mut config = match &cli.config {
        Some(path) => ProcessorConfig::from_json_file(path)?,
        None => ProcessorConfig::default(),
    };
    if let Some(ms) = cli.pacing_ms {
        config = config.with_completion_delay(Duration::from_millis(ms));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)       // Remove module path
        .with_thread_ids(false)   // Remove thread IDs
        .with_ansi(true)
        .compact()
        .init();

    let cli = Cli::parse();
    let mut state = AppState::new(load_config(&cli)?);

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match read_input_file(path).await {
            Ok(file) => files.push(file),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    let accepted = upload_images(&mut state, files).context("No images to process")?;
    info!("Generating placeholders for {} images", accepted);

    let summary = process_images(&mut state, |progress| match progress.progress_type {
        ProgressType::Progress => match (&progress.error, progress.task_status) {
            (Some(err), _) => warn!("{} ({})", progress.status, err),
            (None, Some(status)) if status.is_terminal() => {
                info!("[{:>3}%] {}", progress.progress_percentage, progress.status)
            }
            _ => debug!("{}", progress.status),
        },
        _ => debug!("Batch {}: {}/{}", progress.status, progress.completed_tasks, progress.total_tasks),
    })
    .await;

    if !cli.no_singles {
        for id in state.batch().task_ids() {
            if let Some(file) = download_placeholder(&state, id) {
                let path = save_export(&cli.out_dir, &file).await?;
                debug!("Wrote {}", path.display());
            }
        }
    }

    if cli.zip {
        match download_all(&state) {
            Ok(archive) => {
                let path = save_export(&cli.out_dir, &archive).await?;
                info!("Archive written to {}", path.display());
            }
            Err(e) => error!("{}", e),
        }
    }

    println!("{}/{} placeholders generated", summary.completed, summary.total);
    Ok(())
}
