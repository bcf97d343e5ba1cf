//! Benchmark: focusable-set enumeration and Tab cycling.
//!
//! Run with: `cargo bench -p lds-widgets --bench focus_bench`
//!
//! The focusable set is recomputed on every Tab press, so its cost grows
//! with panel size. These benches track that cost for small dialogs and
//! for form-heavy panels.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lds_core::dom::{Document, ElementId, Tag};
use lds_widgets::focus::{FocusDirection, FocusManager, enumerate_focusable};

/// Panel with `fields` rows of label + input + helper text, every third
/// input disabled, plus a footer with two buttons.
fn form_panel(fields: usize) -> (Document, ElementId) {
    let mut doc = Document::new();
    let panel = doc.append_new(doc.root(), Tag::Div);
    doc.set_attr(panel, "tabindex", "-1");
    for i in 0..fields {
        let row = doc.append_new(panel, Tag::Div);
        doc.append_new(row, Tag::Label);
        let input = doc.append_new(row, Tag::Input);
        if i % 3 == 0 {
            doc.toggle_attr(input, "disabled", true);
        }
        doc.append_new(row, Tag::Paragraph);
    }
    let footer = doc.append_new(panel, Tag::Div);
    doc.append_new(footer, Tag::Button);
    doc.append_new(footer, Tag::Button);
    (doc, panel)
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_focusable");
    for fields in [4usize, 32, 256] {
        let (doc, panel) = form_panel(fields);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &fields, |b, _| {
            b.iter(|| black_box(enumerate_focusable(&doc, black_box(panel))));
        });
    }
    group.finish();
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle_forward");
    for fields in [4usize, 32, 256] {
        let (mut doc, panel) = form_panel(fields);
        let fm = FocusManager::new();
        group.bench_with_input(BenchmarkId::from_parameter(fields), &fields, |b, _| {
            b.iter(|| black_box(fm.cycle(&mut doc, panel, FocusDirection::Forward)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_enumerate, bench_cycle);
criterion_main!(benches);
