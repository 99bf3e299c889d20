//! Font state consumed by the renderer.
//!
//! The caller owns the font; the renderer keeps a value copy for the
//! duration of its calls and derives its embedded transform from it.

use bitflags::bitflags;

bitflags! {
    /// Face flags of a font style.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontFace: u16 {
        const ITALIC = 0x0001;
        const UNDERSCORE = 0x0002;
        const NEGATIVE = 0x0004;
        const OUTLINED = 0x0008;
        const STRIKEOUT = 0x0010;
        const BOLD = 0x0020;
        const REGULAR = 0x0040;
    }
}

/// Glyph spacing mode handed through to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Spacing {
    /// Each glyph is spaced by its own advance.
    #[default]
    Char,
    /// Advances are adjusted to keep the whole string's width stable.
    String,
    /// Advances are rounded to whole pixels.
    Bitmap,
    /// Every glyph gets the same advance.
    Fixed,
}

/// Vertical font metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontHeight {
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

impl FontHeight {
    pub fn new(ascent: f32, descent: f32, leading: f32) -> Self {
        Self {
            ascent,
            descent,
            leading,
        }
    }

    /// `ascent + descent`.
    pub fn total(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Extra per-glyph advance applied by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EscapementDelta {
    /// Added after every non-whitespace glyph.
    pub nonspace: f32,
    /// Added after every whitespace glyph.
    pub space: f32,
}

/// Font descriptor: identity, size, synthetic transforms and face flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerFont {
    family_id: u16,
    style_id: u16,
    size: f32,
    /// Shear in degrees; 90 is upright.
    shear: f32,
    /// Rotation in degrees, counter-clockwise on screen.
    rotation: f32,
    false_bold_width: f32,
    spacing: Spacing,
    face: FontFace,
    height: FontHeight,
}

impl Default for ServerFont {
    fn default() -> Self {
        Self {
            family_id: 0,
            style_id: 0,
            size: 12.0,
            shear: 90.0,
            rotation: 0.0,
            false_bold_width: 0.0,
            spacing: Spacing::Char,
            face: FontFace::REGULAR,
            height: FontHeight::new(9.0, 3.0, 0.0),
        }
    }
}

impl ServerFont {
    pub fn new(family_id: u16, style_id: u16) -> Self {
        Self {
            family_id,
            style_id,
            ..Self::default()
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn shear(mut self, degrees: f32) -> Self {
        self.shear = degrees;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn false_bold_width(mut self, width: f32) -> Self {
        self.false_bold_width = width;
        self
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn face(mut self, face: FontFace) -> Self {
        self.face = face;
        self
    }

    pub fn height(mut self, height: FontHeight) -> Self {
        self.height = height;
        self
    }

    pub fn family_id(&self) -> u16 {
        self.family_id
    }

    pub fn style_id(&self) -> u16 {
        self.style_id
    }

    pub fn get_size(&self) -> f32 {
        self.size
    }

    pub fn get_shear(&self) -> f32 {
        self.shear
    }

    pub fn get_rotation(&self) -> f32 {
        self.rotation
    }

    pub fn get_false_bold_width(&self) -> f32 {
        self.false_bold_width
    }

    pub fn get_spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn get_face(&self) -> FontFace {
        self.face
    }

    /// Font metrics query.
    pub fn get_height(&self) -> FontHeight {
        self.height
    }

    pub fn is_underlined(&self) -> bool {
        self.face.contains(FontFace::UNDERSCORE)
    }

    pub fn is_struck_out(&self) -> bool {
        self.face.contains(FontFace::STRIKEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_is_upright() {
        let font = ServerFont::default();
        assert_eq!(font.get_shear(), 90.0);
        assert_eq!(font.get_rotation(), 0.0);
        assert!(!font.is_underlined());
        assert!(!font.is_struck_out());
    }

    #[test]
    fn test_face_flags() {
        let font = ServerFont::new(1, 2).face(FontFace::UNDERSCORE | FontFace::STRIKEOUT);
        assert!(font.is_underlined());
        assert!(font.is_struck_out());
        assert_eq!(font.family_id(), 1);
        assert_eq!(font.style_id(), 2);
    }

    #[test]
    fn test_total_height() {
        assert_eq!(FontHeight::new(9.0, 3.0, 1.0).total(), 12.0);
    }
}
