//! trackdle-rotate - Once-daily rotation job
//!
//! Advances the puzzle rotation window by one calendar day: picks the next
//! puzzle, renders its snippet clips, commits the new window, then discards
//! the retired entry's clips. Intended to run exactly once per day from an
//! external scheduler (cron or similar) that guarantees a single writer;
//! a doubled run fails on the rotation record's version token.
//!
//! Exits non-zero on any failure so the scheduler can alert and retry on
//! the next run; the previously committed window stays authoritative.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use trackdle_common::db::{init_database, DailyInfoRepository, PuzzleRepository};
use trackdle_common::{config, time};
use trackdle_game::picker::SqlitePuzzlePicker;
use trackdle_game::render::FfmpegRenderer;
use trackdle_game::rotation::{advance_day, SnippetRenderer};

#[derive(Parser, Debug)]
#[command(name = "trackdle-rotate", about = "Advance the daily puzzle rotation by one day")]
struct Args {
    /// Root folder holding trackdle.db and the snippet clips
    #[arg(long, env = "TRACKDLE_ROOT")]
    root: Option<PathBuf>,

    /// Calendar day to rotate for (YYYY-MM-DD); defaults to today in UTC
    #[arg(long)]
    date: Option<String>,

    /// ffmpeg executable used to cut snippet clips
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting trackdle-rotate v{}", env!("CARGO_PKG_VERSION"));

    let root = config::resolve_root_folder(args.root.as_deref());
    std::fs::create_dir_all(&root)
        .with_context(|| format!("cannot create root folder {}", root.display()))?;
    info!("Root folder: {}", root.display());

    let today = match &args.date {
        Some(s) => time::parse_date_key(s)?,
        None => time::today(),
    };

    let pool = init_database(&config::database_path(&root)).await?;
    let daily = DailyInfoRepository::new(pool.clone());
    let picker = SqlitePuzzlePicker::new(PuzzleRepository::new(pool.clone()));
    let renderer = FfmpegRenderer::new(config::snippets_dir(&root), args.ffmpeg);

    let (current, version) = daily.load().await?;
    info!(
        "Loaded rotation record: {} active entries, {} recent ids, version {}",
        current.active.len(),
        current.recent_ids.len(),
        version
    );

    // The rotation job has no interactive caller; log failures for the
    // operator before exiting non-zero.
    let rotation = match advance_day(&current, today, &picker, &renderer, &mut rand::thread_rng())
        .await
    {
        Ok(rotation) => rotation,
        Err(e) => {
            error!("Rotation for {} failed: {}", today, e);
            error!("Previous window remains authoritative; retry on the next scheduled run");
            return Err(e.into());
        }
    };

    rotation.info.check_invariants()?;
    daily.save(version, &rotation.info).await?;

    // Clips are only discarded once the new window is committed
    if let Some(evicted) = &rotation.evicted {
        if let Err(e) = renderer.discard(&evicted.snippets).await {
            error!(
                "Could not discard clips of retired puzzle {}: {}",
                evicted.puzzle_id, e
            );
        } else {
            info!("Discarded clips of retired puzzle {}", evicted.puzzle_id);
        }
    }

    info!("Rotation for {} complete", today);
    Ok(())
}
