//! Editor → preview scroll synchronization.
//!
//! - [`anchor`]: rendered element positions tagged with source lines
//! - [`scroll`]: mapping an editor position to a preview offset
//! - [`guard`]: suppression window against echoed scroll events
//! - [`blocks`]: the source lines a renderer will anchor

pub mod anchor;
pub mod blocks;
pub mod guard;
pub mod scroll;

pub use anchor::{Anchor, AnchorSet};
pub use blocks::{BlockType, SourceBlock, block_start_lines, source_blocks};
pub use guard::ScrollGuard;
pub use scroll::{EditorMetrics, ScrollTarget, SyncConfig, is_near_bottom, preview_target};

use crate::editor::Mode;

/// Scroll synchronizer state for one editor/preview pair.
///
/// Only Markdown documents are synced; a LaTeX preview is a compiled PDF with
/// no source anchors.
#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    guard: ScrollGuard,
    config: SyncConfig,
    mode: Mode,
    follow_bottom: bool,
}

impl ScrollSync {
    pub const fn new(config: SyncConfig, suppress_ms: u64) -> Self {
        Self {
            guard: ScrollGuard::new(suppress_ms),
            config,
            mode: Mode::Markdown,
            follow_bottom: false,
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    const fn is_active(&self) -> bool {
        matches!(self.mode, Mode::Markdown)
    }

    /// Handle an editor scroll event at `now_ms`.
    ///
    /// Events arriving while the previous sync's window is open are dropped
    /// and yield [`ScrollTarget::Unchanged`], as does every event outside
    /// Markdown mode.
    pub fn on_editor_scroll(
        &mut self,
        metrics: &EditorMetrics,
        anchors: &AnchorSet,
        now_ms: u64,
    ) -> ScrollTarget {
        if !self.is_active() {
            return ScrollTarget::Unchanged;
        }
        if !self.guard.try_enter(now_ms) {
            tracing::trace!(now_ms, "scroll event suppressed");
            return ScrollTarget::Unchanged;
        }
        preview_target(metrics, anchors, &self.config)
    }

    /// Record the editor position at the moment its text changes.
    ///
    /// An edit made within the bottom threshold makes the next
    /// [`on_render`](Self::on_render) follow the preview's end.
    pub fn on_text_change(&mut self, metrics: &EditorMetrics) {
        if !self.is_active() {
            return;
        }
        let metrics = EditorMetrics {
            line_height: scroll::effective_line_height(metrics.line_height, &self.config),
            ..*metrics
        };
        self.follow_bottom = is_near_bottom(&metrics, self.config.bottom_threshold_lines);
    }

    /// Handle a finished preview render.
    ///
    /// Yields [`ScrollTarget::PreviewBottom`] once after an edit near the
    /// bottom, otherwise [`ScrollTarget::Unchanged`].
    pub fn on_render(&mut self) -> ScrollTarget {
        if self.is_active() && std::mem::take(&mut self.follow_bottom) {
            tracing::debug!("edit at bottom, following preview end");
            return ScrollTarget::PreviewBottom;
        }
        ScrollTarget::Unchanged
    }

    /// Forget any open suppression window.
    pub const fn reset(&mut self) {
        self.guard.reset();
    }
}
