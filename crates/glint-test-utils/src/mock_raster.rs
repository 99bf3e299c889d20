//! Recording implementation of [`RasterTarget`] for testing.
//!
//! Every call is appended to a log shared by all clones of the target, so a
//! test can hand one clone to the renderer and inspect the other.

use std::sync::Arc;

use glint_core::geometry::{IntPoint, Rect};
use glint_geometry::Path;
use glint_text::{BitmapFormat, Compositor, Gamma, GlyphBitmap, RasterTarget, RasterizerKind};
use parking_lot::Mutex;

/// A recorded raster operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCall {
    Reset(RasterizerKind),
    AddPath {
        rasterizer: RasterizerKind,
        bounds: Option<Rect>,
        commands: usize,
    },
    SetGamma(Gamma),
    RenderScanlines {
        rasterizer: RasterizerKind,
        compositor: Compositor,
    },
    BlitBitmap {
        format: BitmapFormat,
        origin: IntPoint,
        width: u32,
        height: u32,
        compositor: Compositor,
    },
}

/// Raster target recording calls instead of painting.
///
/// # Example
///
/// ```rust
/// use glint_test_utils::{MockRasterTarget, RasterCall};
/// use glint_text::{RasterTarget, RasterizerKind};
///
/// let mock = MockRasterTarget::new();
/// let mut target = mock.clone();
/// target.reset(RasterizerKind::Gray);
///
/// assert_eq!(mock.calls(), vec![RasterCall::Reset(RasterizerKind::Gray)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRasterTarget {
    calls: Arc<Mutex<Vec<RasterCall>>>,
    masked: bool,
}

impl MockRasterTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// A target reporting an active alpha mask.
    pub fn with_alpha_mask() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn set_alpha_mask(&mut self, masked: bool) {
        self.masked = masked;
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<RasterCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Compositors in the order paints reached them, bitmap blits and
    /// scanline flushes alike.
    pub fn compositors(&self) -> Vec<Compositor> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RasterCall::RenderScanlines { compositor, .. }
                | RasterCall::BlitBitmap { compositor, .. } => Some(*compositor),
                _ => None,
            })
            .collect()
    }

    pub fn count_blits(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RasterCall::BlitBitmap { .. }))
            .count()
    }

    pub fn count_renders(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RasterCall::RenderScanlines { .. }))
            .count()
    }

    /// Bounds of every path added, in order.
    pub fn added_paths(&self) -> Vec<(RasterizerKind, Option<Rect>)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RasterCall::AddPath { rasterizer, bounds, .. } => Some((*rasterizer, *bounds)),
                _ => None,
            })
            .collect()
    }

    /// Whether anything beyond resets and gamma changes was recorded.
    pub fn painted(&self) -> bool {
        self.calls
            .lock()
            .iter()
            .any(|call| !matches!(call, RasterCall::Reset(_) | RasterCall::SetGamma(_)))
    }

    fn record(&self, call: RasterCall) {
        self.calls.lock().push(call);
    }
}

impl RasterTarget for MockRasterTarget {
    fn reset(&mut self, rasterizer: RasterizerKind) {
        self.record(RasterCall::Reset(rasterizer));
    }

    fn add_path(&mut self, rasterizer: RasterizerKind, path: &Path) {
        self.record(RasterCall::AddPath {
            rasterizer,
            bounds: path.bounds(),
            commands: path.len(),
        });
    }

    fn set_gamma(&mut self, gamma: Gamma) {
        self.record(RasterCall::SetGamma(gamma));
    }

    fn render_scanlines(&mut self, rasterizer: RasterizerKind, compositor: Compositor) {
        self.record(RasterCall::RenderScanlines { rasterizer, compositor });
    }

    fn blit_bitmap(
        &mut self,
        bitmap: &GlyphBitmap,
        format: BitmapFormat,
        origin: IntPoint,
        compositor: Compositor,
    ) {
        self.record(RasterCall::BlitBitmap {
            format,
            origin,
            width: bitmap.width(),
            height: bitmap.height(),
            compositor,
        });
    }

    fn has_alpha_mask(&self) -> bool {
        self.masked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_log() {
        let mock = MockRasterTarget::with_alpha_mask();
        let mut target = mock.clone();
        assert!(target.has_alpha_mask());

        target.set_gamma(Gamma::Threshold(0.5));
        assert!(!mock.painted());

        target.render_scanlines(RasterizerKind::Gray, Compositor::Masked);
        let bitmap = GlyphBitmap::new(BitmapFormat::Gray8, 2, 2, 2, vec![0; 4]).unwrap();
        target.blit_bitmap(&bitmap, BitmapFormat::Gray8, IntPoint::new(1, 2), Compositor::Masked);

        assert!(mock.painted());
        assert_eq!(mock.count_renders(), 1);
        assert_eq!(mock.count_blits(), 1);
        assert_eq!(mock.compositors(), vec![Compositor::Masked, Compositor::Masked]);

        mock.clear_calls();
        assert!(target.calls().is_empty());
    }
}
