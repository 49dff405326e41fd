//! Drawable rendering primitives
//!
//! A [`Drawable`] is a surface-agnostic icon: an immutable alpha mask shared
//! between clones plus an optional tint. Hosts map it to whatever their
//! toolkit uses (a bitmap, a vector drawable, a terminal glyph).
//!
//! Clones share the mask, so cloning is cheap and a clone can never alter
//! the template it came from. Tinting always produces a new value.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Surface-agnostic RGBA color
///
/// # Examples
///
/// ```
/// use presence_core::drawable::Color;
///
/// let green = Color::from_argb(0xFF3B_A55D_u32 as i32);
/// assert_eq!(green, Color::rgb(0x3b, 0xa5, 0x5d));
/// assert_eq!(green.to_argb(), 0xFF3B_A55D_u32 as i32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0=transparent, 255=opaque)
    pub a: u8,
}

impl Color {
    /// Create a fully opaque color from RGB components
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha channel
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully transparent color
    #[must_use]
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Decode a packed `0xAARRGGBB` integer, the format hosts store colors in
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_argb(argb: i32) -> Self {
        let v = argb as u32;
        Self {
            a: (v >> 24) as u8,
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }

    /// Encode as a packed `0xAARRGGBB` integer
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_argb(self) -> i32 {
        ((self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32)
            as i32
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`
    ///
    /// Returns `None` for anything else.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_argb((0xFF00_0000 | value) as i32)),
            8 => Some(Self::from_argb(value as i32)),
            _ => None,
        }
    }

    /// Convert to a hex string (`#rrggbb`, or `#aarrggbb` when translucent)
    #[must_use]
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }

    /// Scale the alpha channel by a coverage value (0-255)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn with_coverage(self, coverage: u8) -> Self {
        let a = (self.a as u16 * coverage as u16 + 127) / 255;
        Self { a: a as u8, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::transparent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Immutable icon template or tinted clone
///
/// The mask is one coverage byte per pixel in row-major order. Untinted
/// drawables rasterise as opaque white, which is what template assets look
/// like before a status color is applied.
#[derive(Clone, PartialEq, Eq)]
pub struct Drawable {
    name: Arc<str>,
    mask: Arc<[u8]>,
    width: u16,
    height: u16,
    tint: Option<Color>,
}

impl Drawable {
    /// Create a template from an alpha mask
    ///
    /// Returns `None` when the mask length does not match the dimensions.
    #[must_use]
    pub fn from_mask(
        name: impl Into<Arc<str>>,
        mask: Vec<u8>,
        width: u16,
        height: u16,
    ) -> Option<Self> {
        if mask.len() != usize::from(width) * usize::from(height) {
            return None;
        }
        Some(Self {
            name: name.into(),
            mask: mask.into(),
            width,
            height,
            tint: None,
        })
    }

    /// Asset name this drawable was loaded from
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intrinsic width in pixels
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Intrinsic height in pixels
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Tint applied to this drawable, if any
    #[must_use]
    pub const fn tint(&self) -> Option<Color> {
        self.tint
    }

    /// A fresh clone carrying `color` as its tint
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn tinted(&self, color: Color) -> Self {
        Self {
            tint: Some(color),
            ..self.clone()
        }
    }

    /// Whether two drawables share the same underlying mask allocation
    #[must_use]
    pub fn shares_mask_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.mask, &other.mask)
    }

    /// Rasterise to RGBA pixels in row-major order
    ///
    /// Deterministic: the same mask and tint always yield the same pixels.
    #[must_use]
    pub fn rasterize(&self) -> Vec<Color> {
        let fill = self.tint.unwrap_or(Color::rgb(255, 255, 255));
        self.mask
            .iter()
            .map(|&coverage| fill.with_coverage(coverage))
            .collect()
    }
}

impl fmt::Debug for Drawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawable")
            .field("name", &self.name)
            .field("size", &format_args!("{}x{}", self.width, self.height))
            .field("tint", &self.tint.map(|c| c.to_hex()))
            .finish()
    }
}
