//! Benchmarks for preview target computation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use splitmark::sync::{Anchor, AnchorSet, EditorMetrics, SyncConfig, block_start_lines, preview_target};

fn bench_preview_target(c: &mut Criterion) {
    let anchors: AnchorSet = (1..=5_000)
        .filter_map(|line| Anchor::new(line * 3, line as f64 * 61.5).ok())
        .collect();
    let metrics = EditorMetrics {
        scroll_top: 250_000.0,
        viewport_height: 900.0,
        scroll_height: 400_000.0,
        line_height: 22.0,
    };
    let config = SyncConfig::default();
    c.bench_function("preview_target_5k_anchors", |b| {
        b.iter(|| preview_target(black_box(&metrics), black_box(&anchors), &config))
    });
}

fn bench_block_index(c: &mut Criterion) {
    let md = (1..=300)
        .map(|n| format!("## Section {n}\n\nSome text with **bold** and $x^2$.\n\n- item\n- [ ] task\n"))
        .collect::<Vec<_>>()
        .join("\n");
    c.bench_function("block_start_lines_300_sections", |b| {
        b.iter(|| block_start_lines(black_box(&md)))
    });
}

criterion_group!(benches, bench_preview_target, bench_block_index);
criterion_main!(benches);
