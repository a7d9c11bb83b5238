//! ffmpeg-backed snippet renderer
//!
//! Cuts the six clip tiers by shelling out to ffmpeg, one invocation per
//! tier, all from the same start offset. Clips land under
//! `<snippets_dir>/<puzzle-id>/tier<i>.mp3`. Rendering is all-or-nothing per
//! puzzle: any failed tier removes the puzzle's clip directory before the
//! error surfaces.

use crate::rotation::SnippetRenderer;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};
use trackdle_common::model::SNIPPET_LENGTHS;
use trackdle_common::{Error, Puzzle, Result, SnippetRef};

/// Renders snippet clips via an external ffmpeg process
#[derive(Debug, Clone)]
pub struct FfmpegRenderer {
    snippets_dir: PathBuf,
    ffmpeg: String,
}

impl FfmpegRenderer {
    pub fn new(snippets_dir: PathBuf, ffmpeg: impl Into<String>) -> Self {
        Self {
            snippets_dir,
            ffmpeg: ffmpeg.into(),
        }
    }

    fn clip_dir(&self, puzzle: &Puzzle) -> PathBuf {
        self.snippets_dir.join(puzzle.id.to_string())
    }

    async fn render_tier(
        &self,
        source: &Path,
        offset_secs: f64,
        length_secs: f64,
        out: &Path,
    ) -> Result<()> {
        let status = Command::new(&self.ffmpeg)
            .arg("-y")
            .arg("-loglevel")
            .arg("error")
            .arg("-ss")
            .arg(format!("{:.3}", offset_secs))
            .arg("-t")
            .arg(format!("{:.3}", length_secs))
            .arg("-i")
            .arg(source)
            .arg(out)
            .status()
            .await
            .map_err(|e| Error::Render(format!("failed to run '{}': {}", self.ffmpeg, e)))?;

        if !status.success() {
            return Err(Error::Render(format!(
                "'{}' exited with {} while cutting {}",
                self.ffmpeg,
                status,
                out.display()
            )));
        }
        Ok(())
    }
}

impl SnippetRenderer for FfmpegRenderer {
    async fn render(&self, puzzle: &Puzzle, offset_secs: f64) -> Result<Vec<SnippetRef>> {
        let dir = self.clip_dir(puzzle);
        tokio::fs::create_dir_all(&dir).await?;

        let source = Path::new(&puzzle.source_path);
        let mut refs = Vec::with_capacity(SNIPPET_LENGTHS.len());

        for (tier, length_secs) in SNIPPET_LENGTHS.iter().enumerate() {
            let out = dir.join(format!("tier{}.mp3", tier));
            if let Err(e) = self.render_tier(source, offset_secs, *length_secs, &out).await {
                // All-or-nothing: drop any tiers already cut for this puzzle
                let _ = tokio::fs::remove_dir_all(&dir).await;
                return Err(e);
            }
            refs.push(SnippetRef {
                uri: out.display().to_string(),
                start_secs: offset_secs,
                length_secs: *length_secs,
            });
        }

        debug!(
            "Rendered {} clips for {} at offset {:.3}s",
            refs.len(),
            puzzle.id,
            offset_secs
        );
        Ok(refs)
    }

    async fn discard(&self, refs: &[SnippetRef]) -> Result<()> {
        for r in refs {
            match tokio::fs::remove_file(&r.uri).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Could not remove clip {}: {}", r.uri, e),
            }
        }
        // Remove the per-puzzle directory once its clips are gone
        if let Some(dir) = refs.first().and_then(|r| Path::new(&r.uri).parent()) {
            let _ = tokio::fs::remove_dir(dir).await;
        }
        Ok(())
    }
}
