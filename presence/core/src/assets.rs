//! Icon template assets
//!
//! The host (or the preview binary) owns the actual image files; the core
//! asks for templates by name through [`AssetProvider`] once per start and
//! keeps whatever loads in [`IconTemplates`]. A template that fails to load
//! only disables the indicators built from it.

use std::collections::HashMap;

use thiserror::Error;

use crate::drawable::Drawable;

/// Host-owned mobile phone glyph
pub const IC_MOBILE: &str = "ic_mobile";
/// Desktop monitor glyph
pub const IC_DESKTOP: &str = "ic_desktop";
/// Browser globe glyph
pub const IC_WEB: &str = "ic_web";
/// Host's filled online dot, also the template for filled colors
pub const IC_STATUS_ONLINE: &str = "ic_status_online_16dp";
/// Host's idle crescent
pub const IC_STATUS_IDLE: &str = "ic_status_idle_16dp";
/// Host's do-not-disturb dot
pub const IC_STATUS_DND: &str = "ic_status_dnd_16dp";
/// Ring drawn behind circular avatars
pub const IC_RADIAL_STATUS: &str = "ic_radial_status";
/// Ring drawn behind square avatars
pub const IC_RADIAL_STATUS_RECT: &str = "ic_radial_status_rect";

/// Every template the engine asks for
pub const ALL_TEMPLATES: [&str; 8] = [
    IC_MOBILE,
    IC_DESKTOP,
    IC_WEB,
    IC_STATUS_ONLINE,
    IC_STATUS_IDLE,
    IC_STATUS_DND,
    IC_RADIAL_STATUS,
    IC_RADIAL_STATUS_RECT,
];

/// Errors from loading an asset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The provider has no asset under this name
    #[error("asset `{0}` is missing")]
    Missing(String),
}

/// Source of icon templates
pub trait AssetProvider {
    /// Load the template stored under `name`
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Missing`] when no such asset exists.
    fn load(&self, name: &str) -> Result<Drawable, AssetError>;
}

/// Base templates loaded at start, keyed by asset name
///
/// Templates are never tinted in place; the variant cache clones them.
#[derive(Debug, Clone, Default)]
pub struct IconTemplates {
    templates: HashMap<&'static str, Drawable>,
}

impl IconTemplates {
    /// Load every known template, skipping the ones the provider lacks
    pub fn load<P: AssetProvider + ?Sized>(provider: &P) -> Self {
        let mut templates = HashMap::with_capacity(ALL_TEMPLATES.len());
        for name in ALL_TEMPLATES {
            match provider.load(name) {
                Ok(drawable) => {
                    templates.insert(name, drawable);
                }
                Err(e) => {
                    tracing::warn!(
                        asset = name,
                        error = %e,
                        "Template unavailable, indicators using it are disabled"
                    );
                }
            }
        }
        tracing::debug!(loaded = templates.len(), "Icon templates loaded");
        Self { templates }
    }

    /// Template stored under `name`
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Missing`] if it never loaded.
    pub fn get(&self, name: &str) -> Result<&Drawable, AssetError> {
        self.templates
            .get(name)
            .ok_or_else(|| AssetError::Missing(name.to_string()))
    }

    /// Number of templates that loaded
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether nothing loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// In-memory provider with generated masks
///
/// Used by the preview binary and tests where no host image loader exists.
#[derive(Debug, Clone, Default)]
pub struct BundledAssets {
    assets: HashMap<String, Drawable>,
}

impl BundledAssets {
    /// Edge length of the generated masks
    pub const SIZE: u16 = 16;

    /// Provider with a generated mask for every known template
    #[must_use]
    pub fn generated() -> Self {
        let mut assets = Self::default();
        for name in ALL_TEMPLATES {
            if let Some(drawable) = generate(name, Self::SIZE) {
                assets.insert(drawable);
            }
        }
        assets
    }

    /// Provider with no assets at all
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace an asset, keyed by its name
    pub fn insert(&mut self, drawable: Drawable) {
        self.assets.insert(drawable.name().to_string(), drawable);
    }

    /// Builder: drop an asset
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.assets.remove(name);
        self
    }
}

impl AssetProvider for BundledAssets {
    fn load(&self, name: &str) -> Result<Drawable, AssetError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::Missing(name.to_string()))
    }
}

/// Rough silhouettes; hosts ship real artwork
fn generate(name: &'static str, size: u16) -> Option<Drawable> {
    let n = i32::from(size);
    let c = n / 2;
    let inside: Box<dyn Fn(i32, i32) -> bool> = match name {
        // Phone: tall rounded bar
        IC_MOBILE => Box::new(move |x, y| {
            x >= n / 4 && x < n - n / 4 && y >= 1 && y < n - 1
        }),
        // Monitor: wide screen on a short stand
        IC_DESKTOP => Box::new(move |x, y| {
            (y >= 1 && y < n * 2 / 3) || (y >= n * 2 / 3 && x >= c - 1 && x <= c)
        }),
        // Globe: disc with a horizontal band cut out
        IC_WEB => Box::new(move |x, y| {
            let d = (x - c).pow(2) + (y - c).pow(2);
            d < c * c && y != c
        }),
        IC_STATUS_ONLINE | IC_STATUS_DND => {
            Box::new(move |x, y| (x - c).pow(2) + (y - c).pow(2) < c * c)
        }
        // Crescent: disc minus an offset disc
        IC_STATUS_IDLE => Box::new(move |x, y| {
            (x - c).pow(2) + (y - c).pow(2) < c * c
                && (x - c / 2).pow(2) + (y - c / 2).pow(2) >= (c / 2).pow(2)
        }),
        IC_RADIAL_STATUS => Box::new(move |x, y| {
            let d = (x - c).pow(2) + (y - c).pow(2);
            d < c * c && d >= (c - 2).pow(2)
        }),
        IC_RADIAL_STATUS_RECT => {
            Box::new(move |x, y| x < 2 || y < 2 || x >= n - 2 || y >= n - 2)
        }
        _ => return None,
    };

    let mask = (0..n)
        .flat_map(|y| (0..n).map(move |x| (x, y)))
        .map(|(x, y)| if inside(x, y) { 255 } else { 0 })
        .collect();
    Drawable::from_mask(name, mask, size, size)
}
