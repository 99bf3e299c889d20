//! End-to-end rendering into the software canvas.

use glint_core::config::RendererConfig;
use glint_core::geometry::{IntRect, Rect};
use glint_core::math::DVec2;
use glint_geometry::Transform2D;
use glint_test_utils::ScriptedLayout;
use glint_text::*;

const INK: [u8; 4] = [0, 0, 0, 255];
const PAPER: [u8; 4] = [0, 0, 0, 0];

fn canvas_renderer() -> TextRenderer<Canvas> {
    let canvas = Canvas::new(40, 30).unwrap();
    TextRenderer::new(canvas, RendererConfig::default())
}

fn full_clip() -> IntRect {
    IntRect::new(0, 0, 39, 29)
}

fn draw(
    renderer: &mut TextRenderer<Canvas>,
    layout: &mut ScriptedLayout,
    text: &str,
    baseline: DVec2,
    clip: IntRect,
    dry_run: bool,
) -> Rect {
    renderer.render_string(layout, text, baseline, clip, dry_run, None, None, None)
}

#[test]
fn test_bitmap_run_lands_on_baseline() {
    let mut renderer = canvas_renderer();
    let mut layout = ScriptedLayout::boxes(6.0, 5, 8);

    let bounds = draw(&mut renderer, &mut layout, "ab", DVec2::new(2.0, 20.0), full_clip(), false);
    assert_eq!(bounds, Rect::new(2.0, 11.0, 13.0, 20.0));

    let canvas = renderer.target();
    // 'a' covers x 2..7, y 12..20
    assert_eq!(canvas.pixel(2, 12), Some(INK));
    assert_eq!(canvas.pixel(6, 19), Some(INK));
    assert_eq!(canvas.pixel(7, 15), Some(PAPER));
    assert_eq!(canvas.pixel(4, 20), Some(PAPER));
    // 'b' starts at x 8
    assert_eq!(canvas.pixel(8, 12), Some(INK));
}

#[test]
fn test_dry_run_leaves_canvas_untouched() {
    let mut renderer = canvas_renderer();
    let mut layout = ScriptedLayout::boxes(6.0, 5, 8);
    draw(&mut renderer, &mut layout, "ab", DVec2::new(2.0, 20.0), full_clip(), true);
    assert!(renderer.target().pixels().iter().all(|&byte| byte == 0));
}

#[test]
fn test_scaled_outlines() {
    let mut renderer = canvas_renderer();
    renderer.set_view_transform(Transform2D::scale(2.0));
    let mut layout = ScriptedLayout::boxes(6.0, 5, 8);

    let bounds = draw(&mut renderer, &mut layout, "ab", DVec2::new(1.0, 12.0), full_clip(), false);
    assert_eq!(bounds, Rect::new(2.0, 6.0, 24.0, 24.0));

    let canvas = renderer.target();
    // 'a' spans device x 2..12, y 8..24; 'b' x 14..24
    assert_eq!(canvas.pixel(5, 15), Some(INK));
    assert_eq!(canvas.pixel(13, 15), Some(PAPER));
    assert_eq!(canvas.pixel(20, 15), Some(INK));
    assert_eq!(canvas.pixel(5, 25), Some(PAPER));
}

#[test]
fn test_underline_on_canvas() {
    let mut renderer = canvas_renderer();
    renderer.set_font(ServerFont::default().face(FontFace::UNDERSCORE));
    let mut layout = ScriptedLayout::boxes(6.0, 5, 8);

    draw(&mut renderer, &mut layout, "a", DVec2::new(2.0, 20.0), full_clip(), false);

    let canvas = renderer.target();
    // Centred on 22.5 with width 1: exactly row 22, x 2.5..7.5
    assert_eq!(canvas.pixel(4, 22), Some(INK));
    assert_eq!(canvas.pixel(4, 21), Some(PAPER));
    assert_eq!(canvas.pixel(4, 23), Some(PAPER));
    assert_eq!(canvas.pixel(9, 22), Some(PAPER));
}

#[test]
fn test_alpha_mask_clips_ink() {
    let mut renderer = canvas_renderer();
    let mut mask = vec![0u8; 40 * 30];
    for row in mask.chunks_exact_mut(40) {
        row[20..].fill(255);
    }
    renderer
        .target_mut()
        .set_alpha_mask(Some(AlphaMask::new(40, 30, mask).unwrap()))
        .unwrap();
    renderer.set_view_transform(Transform2D::scale(2.0));
    let mut layout = ScriptedLayout::boxes(6.0, 5, 8);

    draw(&mut renderer, &mut layout, "ab", DVec2::new(1.0, 12.0), full_clip(), false);

    let canvas = renderer.target();
    assert_eq!(canvas.pixel(5, 15), Some(PAPER));
    assert_eq!(canvas.pixel(21, 15), Some(INK));
}

#[test]
fn test_clip_skips_whole_glyphs() {
    let mut renderer = canvas_renderer();
    let mut layout = ScriptedLayout::boxes(6.0, 5, 8);

    // Only 'b' (x 8..13) touches the clip; it is painted whole.
    let clip = IntRect::new(12, 0, 39, 29);
    draw(&mut renderer, &mut layout, "ab", DVec2::new(2.0, 20.0), clip, false);

    let canvas = renderer.target();
    assert_eq!(canvas.pixel(3, 15), Some(PAPER));
    assert_eq!(canvas.pixel(9, 15), Some(INK));
}

#[test]
fn test_colour_and_antialiasing_switch() {
    let mut renderer = canvas_renderer();
    renderer.target_mut().set_color(Color::rgb(0, 0, 255));
    renderer.set_antialiasing(false);
    renderer.set_view_transform(Transform2D::scale(1.5));
    let mut layout = ScriptedLayout::boxes(6.0, 5, 8);

    draw(&mut renderer, &mut layout, "a", DVec2::new(2.0, 12.0), full_clip(), false);

    // Without antialiasing every painted pixel is fully opaque.
    let canvas = renderer.into_target();
    let painted: Vec<_> = canvas
        .pixels()
        .chunks_exact(4)
        .filter(|px| px[3] != 0)
        .collect();
    assert!(!painted.is_empty());
    assert!(painted.iter().all(|px| *px == [0, 0, 255, 255]));
}
