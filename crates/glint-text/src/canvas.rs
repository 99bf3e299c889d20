//! Software raster target.
//!
//! [`Canvas`] is an RGBA8 surface implementing [`RasterTarget`] on top of
//! zeno's coverage rasterizer. Paths are accumulated as zeno commands per
//! rasterizer and turned into a coverage mask when the dispatcher flushes.

use glint_core::geometry::IntPoint;
use glint_core::profiling::profile_function;
use glint_geometry::{Path, PathCommand};
use zeno::{Command, Fill, Format, Mask, Origin, Vector};

use crate::error::{GlintError, GlintResult};
use crate::glyph::{BitmapFormat, GlyphBitmap};
use crate::raster::{Compositor, Gamma, RasterTarget, RasterizerKind};

/// Straight-alpha RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Per-pixel 8-bit clip mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> GlintResult<Self> {
        if data.len() != width as usize * height as usize {
            return Err(GlintError::AlphaMaskSizeMismatch {
                expected_width: width,
                expected_height: height,
                width,
                height,
                data_len: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Mask filled with a single value.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Mask value at a pixel; zero outside the mask.
    pub fn value(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }
}

fn vector(point: glam::DVec2) -> Vector {
    Vector::new(point.x as f32, point.y as f32)
}

fn to_commands(path: &Path, out: &mut Vec<Command>) {
    out.extend(path.commands().iter().map(|command| match *command {
        PathCommand::MoveTo(to) => Command::MoveTo(vector(to)),
        PathCommand::LineTo(to) => Command::LineTo(vector(to)),
        PathCommand::QuadTo { control, to } => Command::QuadTo(vector(control), vector(to)),
        PathCommand::CubicTo {
            control1,
            control2,
            to,
        } => Command::CurveTo(vector(control1), vector(control2), vector(to)),
        PathCommand::Close => Command::Close,
    }));
}

/// `src` over `dst` with coverage `alpha`.
fn blend_channel(src: u8, dst: u8, alpha: u32) -> u8 {
    ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
}

fn scale(a: u32, b: u32) -> u32 {
    (a * b + 127) / 255
}

/// An RGBA8 surface with a foreground colour and an optional alpha mask.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    color: Color,
    gamma: Gamma,
    gray: Vec<Command>,
    subpixel: Vec<Command>,
    mask: Option<AlphaMask>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> GlintResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlintError::InvalidSurfaceSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            color: Color::BLACK,
            gamma: Gamma::default(),
            gray: Vec::new(),
            subpixel: Vec::new(),
            mask: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 rows, `width * 4` bytes each.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Foreground colour used by every compositor.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn alpha_mask(&self) -> Option<&AlphaMask> {
        self.mask.as_ref()
    }

    /// Install or remove the alpha mask. A mask must cover the canvas
    /// exactly.
    pub fn set_alpha_mask(&mut self, mask: Option<AlphaMask>) -> GlintResult<()> {
        if let Some(mask) = &mask
            && (mask.width != self.width || mask.height != self.height)
        {
            return Err(GlintError::AlphaMaskSizeMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: mask.width,
                height: mask.height,
                data_len: mask.data.len(),
            });
        }
        self.mask = mask;
        Ok(())
    }

    fn composite(&mut self, x: i32, y: i32, coverage: [u8; 3], compositor: Compositor) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let color = self.color;
        let src = [color.r, color.g, color.b];
        let average = (coverage[0] as u32 + coverage[1] as u32 + coverage[2] as u32) / 3;

        let alphas = match compositor {
            Compositor::Binary => {
                if average < 128 {
                    return;
                }
                [color.a as u32; 3]
            }
            Compositor::Solid => [scale(average, color.a as u32); 3],
            Compositor::Subpixel => coverage.map(|c| scale(c as u32, color.a as u32)),
            Compositor::Masked => {
                let mask = self.mask.as_ref().map_or(255, |mask| mask.value(x, y)) as u32;
                [scale(scale(average, mask), color.a as u32); 3]
            }
        };
        if alphas == [0; 3] {
            return;
        }

        let px = &mut self.pixels[i..i + 4];
        for channel in 0..3 {
            px[channel] = blend_channel(src[channel], px[channel], alphas[channel]);
        }
        let alpha = alphas[0].max(alphas[1]).max(alphas[2]);
        px[3] = (alpha + scale(px[3] as u32, 255 - alpha)) as u8;
    }
}

impl RasterTarget for Canvas {
    fn reset(&mut self, rasterizer: RasterizerKind) {
        match rasterizer {
            RasterizerKind::Gray => self.gray.clear(),
            RasterizerKind::Subpixel => self.subpixel.clear(),
        }
    }

    fn add_path(&mut self, rasterizer: RasterizerKind, path: &Path) {
        match rasterizer {
            RasterizerKind::Gray => to_commands(path, &mut self.gray),
            RasterizerKind::Subpixel => to_commands(path, &mut self.subpixel),
        }
    }

    fn set_gamma(&mut self, gamma: Gamma) {
        self.gamma = gamma;
    }

    fn render_scanlines(&mut self, rasterizer: RasterizerKind, compositor: Compositor) {
        profile_function!();
        let commands = match rasterizer {
            RasterizerKind::Gray => std::mem::take(&mut self.gray),
            RasterizerKind::Subpixel => std::mem::take(&mut self.subpixel),
        };
        if commands.is_empty() {
            return;
        }

        let format = match rasterizer {
            RasterizerKind::Gray => Format::Alpha,
            RasterizerKind::Subpixel => Format::Subpixel,
        };
        let (coverage, placement) = Mask::new(&commands[..])
            .format(format)
            .style(Fill::NonZero)
            .origin(Origin::TopLeft)
            .render();
        tracing::trace!(
            ?rasterizer,
            ?compositor,
            left = placement.left,
            top = placement.top,
            width = placement.width,
            height = placement.height,
            "rendering scanlines"
        );

        let width = placement.width as usize;
        for row in 0..placement.height as usize {
            for col in 0..width {
                let i = row * width + col;
                let triple = match rasterizer {
                    RasterizerKind::Gray => {
                        let c = self.gamma.apply(coverage[i]);
                        [c, c, c]
                    }
                    RasterizerKind::Subpixel => {
                        [coverage[i * 4], coverage[i * 4 + 1], coverage[i * 4 + 2]]
                    }
                };
                if triple == [0; 3] {
                    continue;
                }
                self.composite(
                    placement.left + col as i32,
                    placement.top + row as i32,
                    triple,
                    compositor,
                );
            }
        }
    }

    fn blit_bitmap(
        &mut self,
        bitmap: &GlyphBitmap,
        format: BitmapFormat,
        origin: IntPoint,
        compositor: Compositor,
    ) {
        profile_function!();
        for y in 0..bitmap.height() {
            let row = bitmap.row(y);
            for x in 0..bitmap.width() {
                let xi = x as usize;
                let triple = match format {
                    BitmapFormat::Mono => {
                        let on = row[xi / 8] & (0x80 >> (xi % 8)) != 0;
                        if on { [255; 3] } else { [0; 3] }
                    }
                    BitmapFormat::Gray8 => [row[xi]; 3],
                    BitmapFormat::Subpixel => [row[xi * 3], row[xi * 3 + 1], row[xi * 3 + 2]],
                };
                if triple == [0; 3] {
                    continue;
                }
                self.composite(origin.x + x as i32, origin.y + y as i32, triple, compositor);
            }
        }
    }

    fn has_alpha_mask(&self) -> bool {
        self.mask.is_some()
    }
}
