//! Benchmarks for glyph run rendering

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glint_core::config::RendererConfig;
use glint_core::geometry::{IntRect, Rect};
use glint_core::math::DVec2;
use glint_geometry::Transform2D;
use glint_test_utils::ScriptedLayout;
use glint_text::{Canvas, FontFace, ServerFont, TextRenderer};

const WIDTH: u32 = 512;
const HEIGHT: u32 = 64;

fn setup() -> (TextRenderer<Canvas>, ScriptedLayout) {
    let canvas = Canvas::new(WIDTH, HEIGHT).expect("Failed to create canvas");
    let renderer = TextRenderer::new(canvas, RendererConfig::default());
    (renderer, ScriptedLayout::boxes(7.0, 6, 9))
}

fn clip() -> IntRect {
    IntRect::new(0, 0, WIDTH as i32 - 1, HEIGHT as i32 - 1)
}

fn paint(renderer: &mut TextRenderer<Canvas>, layout: &mut ScriptedLayout, text: &str) -> Rect {
    let baseline = DVec2::new(0.0, 40.0);
    renderer.render_string(layout, text, baseline, clip(), false, None, None, None)
}

fn bench_dry_run(c: &mut Criterion) {
    let (mut renderer, mut layout) = setup();
    let mut group = c.benchmark_group("dry_run");

    for len in [1usize, 8, 64] {
        let text = "x".repeat(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| {
                black_box(renderer.render_string(
                    &mut layout,
                    text,
                    DVec2::new(0.0, 40.0),
                    clip(),
                    true,
                    None,
                    None,
                    None,
                ))
            });
        });
    }

    group.finish();
}

fn bench_paint(c: &mut Criterion) {
    let (mut renderer, mut layout) = setup();
    let mut group = c.benchmark_group("paint");
    let text = "The quick brown fox jumps over the lazy dog";

    group.bench_function("bitmaps", |b| {
        renderer.set_view_transform(Transform2D::IDENTITY);
        b.iter(|| black_box(paint(&mut renderer, &mut layout, text)));
    });

    group.bench_function("rotated_outlines", |b| {
        renderer.set_view_transform(Transform2D::rotate(0.05));
        b.iter(|| black_box(paint(&mut renderer, &mut layout, text)));
    });

    group.bench_function("false_bold_underlined", |b| {
        renderer.set_view_transform(Transform2D::scale(1.25));
        let font = ServerFont::default().false_bold_width(0.5).face(FontFace::UNDERSCORE);
        renderer.set_font(font);
        b.iter(|| black_box(paint(&mut renderer, &mut layout, text)));
    });

    group.finish();
}

criterion_group!(benches, bench_dry_run, bench_paint);
criterion_main!(benches);
