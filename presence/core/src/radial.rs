//! Radial overlay selection
//!
//! Picks the ring drawn behind an avatar for the user's overall status.
//! Avatar views are recycled between rows, so the "nothing to show" result is
//! a real value (no background, no padding) that callers apply like any
//! other; it wipes whatever ring the previous occupant of the view had.

use serde::{Deserialize, Serialize};

use crate::cache::{Family, IconVariantSet};
use crate::display::DisplayConfig;
use crate::drawable::Drawable;
use crate::presence::ClientStatus;

/// Inset between the avatar and its ring, on every side
pub const RADIAL_PADDING: u32 = 8;

/// View padding in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    /// Left inset
    pub left: u32,
    /// Top inset
    pub top: u32,
    /// Right inset
    pub right: u32,
    /// Bottom inset
    pub bottom: u32,
}

impl Padding {
    /// Same inset on all sides
    #[must_use]
    pub const fn uniform(px: u32) -> Self {
        Self {
            left: px,
            top: px,
            right: px,
            bottom: px,
        }
    }

    /// No inset
    #[must_use]
    pub const fn zero() -> Self {
        Self::uniform(0)
    }
}

/// Background and padding to apply to an avatar view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadialOverlay {
    /// Ring to draw behind the avatar; `None` clears any existing one
    pub background: Option<Drawable>,
    /// Padding to apply
    pub padding: Padding,
}

impl RadialOverlay {
    /// The reset overlay
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            background: None,
            padding: Padding::zero(),
        }
    }

    /// Whether this overlay clears the view
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.background.is_none()
    }
}

/// Overlay for `status`
///
/// `square` selects the rectangular ring. Absent or unmapped statuses, and
/// a ring family that failed to build, yield [`RadialOverlay::cleared`].
#[must_use]
pub fn select(
    status: Option<ClientStatus>,
    square: bool,
    variants: &IconVariantSet,
) -> RadialOverlay {
    let family = if square {
        Family::RadialRect
    } else {
        Family::Radial
    };
    match status.and_then(|s| variants.variant(family, s)) {
        Some(ring) => RadialOverlay {
            background: Some(ring.clone()),
            padding: Padding::uniform(RADIAL_PADDING),
        },
        None => RadialOverlay::cleared(),
    }
}

/// Overlay for a context, or `None` when the context leaves avatars alone
#[must_use]
pub fn select_for(
    config: &DisplayConfig,
    status: Option<ClientStatus>,
    variants: &IconVariantSet,
) -> Option<RadialOverlay> {
    config
        .radial
        .then(|| select(status, config.square, variants))
}
