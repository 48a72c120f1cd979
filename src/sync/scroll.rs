//! Editor → preview scroll position mapping.
//!
//! The editor scrolls in uniform source lines while the preview's rendered
//! height per source line varies. The preview target is found by locating the
//! source line at the top of the editor and interpolating between the
//! nearest rendered anchors around it.

use serde::Serialize;

use super::anchor::{Anchor, AnchorSet};

/// Line height assumed when the host cannot measure one.
pub const DEFAULT_LINE_HEIGHT: f64 = 22.0;
/// Pixels left above the matched line in the preview.
pub const DEFAULT_LEAD_IN: f64 = 10.0;
/// Distance from the editor's bottom, in lines, that snaps the preview to its end.
pub const DEFAULT_BOTTOM_THRESHOLD_LINES: f64 = 2.0;

/// Scroll state of the editor pane, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub scroll_height: f64,
    pub line_height: f64,
}

/// Tunables for the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncConfig {
    pub lead_in: f64,
    pub bottom_threshold_lines: f64,
    pub default_line_height: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lead_in: DEFAULT_LEAD_IN,
            bottom_threshold_lines: DEFAULT_BOTTOM_THRESHOLD_LINES,
            default_line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

/// Where the preview pane should scroll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "offset", rename_all = "kebab-case")]
pub enum ScrollTarget {
    /// Leave the preview where it is.
    Unchanged,
    /// Scroll the preview to its maximum scroll position.
    PreviewBottom,
    /// Scroll the preview to this offset.
    Offset(f64),
}

/// The 1-based source line at the top of the editor viewport, rounded to the
/// nearest line.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn top_line(scroll_top: f64, line_height: f64) -> usize {
    ((scroll_top.max(0.0) / line_height + 0.5).floor() as usize).saturating_add(1)
}

/// Whether the editor is scrolled to within `threshold_lines` of its bottom.
pub fn is_near_bottom(metrics: &EditorMetrics, threshold_lines: f64) -> bool {
    metrics.scroll_top + metrics.viewport_height
        >= metrics.scroll_height - threshold_lines * metrics.line_height
}

/// Compute the preview scroll target for the editor's current position.
pub fn preview_target(
    metrics: &EditorMetrics,
    anchors: &AnchorSet,
    config: &SyncConfig,
) -> ScrollTarget {
    let metrics = EditorMetrics {
        line_height: effective_line_height(metrics.line_height, config),
        ..*metrics
    };

    if is_near_bottom(&metrics, config.bottom_threshold_lines) {
        tracing::debug!("editor at bottom, snapping preview to end");
        return ScrollTarget::PreviewBottom;
    }
    if anchors.is_empty() {
        return ScrollTarget::Unchanged;
    }

    let line = top_line(metrics.scroll_top, metrics.line_height);
    let target = match bracket(anchors.as_slice(), line) {
        (None, _) => 0.0,
        (Some(best), None) => best.offset,
        (Some(best), Some(next)) if best.line == next.line => best.offset,
        (Some(best), Some(next)) => interpolate(best, next, line) - config.lead_in,
    };
    tracing::debug!(line, target, "preview target");
    ScrollTarget::Offset(target.max(0.0))
}

/// One pass over the anchors: the last anchor at or above `line`, and the
/// first anchor after it that lies below `line`.
fn bracket(anchors: &[Anchor], line: usize) -> (Option<&Anchor>, Option<&Anchor>) {
    let mut best = None;
    for anchor in anchors {
        if anchor.line <= line {
            best = Some(anchor);
        } else {
            return (best, Some(anchor));
        }
    }
    (best, None)
}

/// Linear interpolation of `line` between two anchors on different lines.
fn interpolate(best: &Anchor, next: &Anchor, line: usize) -> f64 {
    let span_lines = (next.line - best.line) as f64;
    let into = line.saturating_sub(best.line) as f64;
    best.offset + (next.offset - best.offset) * into / span_lines
}

pub(super) fn effective_line_height(line_height: f64, config: &SyncConfig) -> f64 {
    if line_height.is_finite() && line_height > 0.0 {
        line_height
    } else if config.default_line_height.is_finite() && config.default_line_height > 0.0 {
        config.default_line_height
    } else {
        DEFAULT_LINE_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(pairs: &[(usize, f64)]) -> AnchorSet {
        pairs
            .iter()
            .map(|&(line, offset)| Anchor::new(line, offset).unwrap())
            .collect()
    }

    fn metrics(scroll_top: f64) -> EditorMetrics {
        EditorMetrics {
            scroll_top,
            viewport_height: 400.0,
            scroll_height: 10_000.0,
            line_height: 20.0,
        }
    }

    fn offset(target: ScrollTarget) -> f64 {
        match target {
            ScrollTarget::Offset(offset) => offset,
            other => panic!("expected an offset, got {other:?}"),
        }
    }

    #[test]
    fn test_top_line_rounds_to_nearest() {
        assert_eq!(top_line(0.0, 20.0), 1);
        assert_eq!(top_line(9.9, 20.0), 1);
        assert_eq!(top_line(10.0, 20.0), 2);
        assert_eq!(top_line(80.0, 20.0), 5);
    }

    #[test]
    fn test_top_line_ignores_overscroll() {
        assert_eq!(top_line(-50.0, 20.0), 1);
    }

    #[test]
    fn test_top_line_saturates_on_huge_offsets() {
        assert_eq!(top_line(f64::INFINITY, 20.0), usize::MAX);
        assert_eq!(top_line(1e300, 20.0), usize::MAX);
    }

    #[test]
    fn test_infinite_scroll_top_targets_last_anchor() {
        let set = anchors(&[(1, 0.0), (3, 120.0)]);
        let m = EditorMetrics {
            scroll_top: f64::INFINITY,
            scroll_height: f64::NAN,
            ..metrics(0.0)
        };
        let target = preview_target(&m, &set, &SyncConfig::default());
        assert_eq!(target, ScrollTarget::Offset(120.0));
    }

    #[test]
    fn test_interpolates_between_anchors() {
        let set = anchors(&[(1, 0.0), (10, 900.0)]);
        let target = preview_target(&metrics(80.0), &set, &SyncConfig::default());
        assert!((offset(target) - (400.0 - DEFAULT_LEAD_IN)).abs() < 1e-9);
    }

    #[test]
    fn test_before_first_anchor_targets_top() {
        let set = anchors(&[(5, 300.0), (9, 600.0)]);
        let target = preview_target(&metrics(0.0), &set, &SyncConfig::default());
        assert_eq!(target, ScrollTarget::Offset(0.0));
    }

    #[test]
    fn test_past_last_anchor_targets_last_anchor() {
        let set = anchors(&[(1, 0.0), (3, 120.0)]);
        let target = preview_target(&metrics(400.0), &set, &SyncConfig::default());
        assert_eq!(target, ScrollTarget::Offset(120.0));
    }

    #[test]
    fn test_anchor_on_top_line_subtracts_lead_in() {
        let set = anchors(&[(1, 0.0), (5, 250.0), (9, 500.0)]);
        let target = preview_target(&metrics(80.0), &set, &SyncConfig::default());
        assert!((offset(target) - (250.0 - DEFAULT_LEAD_IN)).abs() < 1e-9);
    }

    #[test]
    fn test_equal_lines_fall_back_to_anchor_offset() {
        // the scan stops at the first anchor past the top line, so `best`
        // and `next` only share a line when they bracket nothing
        let best = Anchor::new(4, 200.0).unwrap();
        let next = Anchor::new(4, 230.0).unwrap();
        let slice = [best, next];
        assert_eq!(bracket(&slice, 4), (Some(&next), None));
        let set = anchors(&[(4, 200.0), (4, 230.0)]);
        let target = preview_target(&metrics(60.0), &set, &SyncConfig::default());
        assert_eq!(target, ScrollTarget::Offset(230.0));
    }

    #[test]
    fn test_empty_anchors_is_noop() {
        let target = preview_target(&metrics(100.0), &AnchorSet::default(), &SyncConfig::default());
        assert_eq!(target, ScrollTarget::Unchanged);
    }

    #[test]
    fn test_bottom_shortcut_wins_over_empty_anchors() {
        let m = EditorMetrics {
            scroll_top: 600.0,
            viewport_height: 400.0,
            scroll_height: 1000.0,
            line_height: 20.0,
        };
        let target = preview_target(&m, &AnchorSet::default(), &SyncConfig::default());
        assert_eq!(target, ScrollTarget::PreviewBottom);
    }

    #[test]
    fn test_bottom_shortcut_boundary() {
        let mut m = EditorMetrics {
            scroll_top: 1000.0,
            viewport_height: 500.0,
            scroll_height: 1600.0,
            line_height: 20.0,
        };
        // 1500 >= 1560 is false
        assert!(!is_near_bottom(&m, 2.0));
        m.scroll_top = 1060.0;
        // 1560 >= 1560 is true
        assert!(is_near_bottom(&m, 2.0));
    }

    #[test]
    fn test_bottom_shortcut_threshold_is_tunable() {
        let m = EditorMetrics {
            scroll_top: 1000.0,
            viewport_height: 500.0,
            scroll_height: 1600.0,
            line_height: 20.0,
        };
        let config = SyncConfig {
            bottom_threshold_lines: 5.0,
            ..SyncConfig::default()
        };
        let target = preview_target(&m, &anchors(&[(1, 0.0)]), &config);
        assert_eq!(target, ScrollTarget::PreviewBottom);
    }

    #[test]
    fn test_invalid_line_height_uses_default() {
        let set = anchors(&[(1, 0.0), (11, 1000.0)]);
        let m = EditorMetrics {
            line_height: 0.0,
            ..metrics(110.0)
        };
        // 110 / 22 + 0.5 = 5.5 -> line 6
        let target = preview_target(&m, &set, &SyncConfig::default());
        assert!((offset(target) - (500.0 - DEFAULT_LEAD_IN)).abs() < 1e-9);
    }

    #[test]
    fn test_lead_in_never_drives_target_negative() {
        let set = anchors(&[(1, 0.0), (100, 50.0)]);
        let target = preview_target(&metrics(20.0), &set, &SyncConfig::default());
        assert_eq!(target, ScrollTarget::Offset(0.0));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn target_is_never_negative(
                mut lines in prop::collection::vec(1..500usize, 0..40),
                offsets in prop::collection::vec(0.0..50_000.0f64, 40),
                scroll_top in 0.0..20_000.0f64,
            ) {
                lines.sort_unstable();
                let set: AnchorSet = lines
                    .iter()
                    .zip(&offsets)
                    .map(|(&line, &offset)| Anchor::new(line, offset).unwrap())
                    .collect();
                let m = EditorMetrics {
                    scroll_top,
                    viewport_height: 500.0,
                    scroll_height: 100_000.0,
                    line_height: 18.0,
                };
                if let ScrollTarget::Offset(target) = preview_target(&m, &set, &SyncConfig::default()) {
                    prop_assert!(target >= 0.0);
                    prop_assert!(target.is_finite());
                }
            }
        }
    }
}
