//! Drawable variant cache
//!
//! Builds the tinted icon variants every bind draws from, and publishes them
//! as one immutable [`IconVariantSet`].
//!
//! # Design
//!
//! - **Templates are immutable**: [`IconTemplates`] is owned by the cache and
//!   only ever cloned. Tinting a clone never changes the template, so a
//!   template can back several families at once.
//! - **Wholesale rebuild**: a tint change builds a complete new set.
//! - **Single swap**: the new set replaces the old one under one write lock.
//!   A bind holding an `Arc` to the previous set keeps drawing from it
//!   consistently; nobody ever sees a half-built set.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::{
    AssetError, IconTemplates, IC_DESKTOP, IC_MOBILE, IC_RADIAL_STATUS, IC_RADIAL_STATUS_RECT,
    IC_STATUS_DND, IC_STATUS_IDLE, IC_STATUS_ONLINE, IC_WEB,
};
use crate::drawable::{Color, Drawable};
use crate::presence::ClientStatus;

/// Host default for online (green)
pub const DEFAULT_ONLINE: Color = Color::rgb(0x3b, 0xa5, 0x5d);
/// Host default for idle (yellow)
pub const DEFAULT_IDLE: Color = Color::rgb(0xfa, 0xa8, 0x1a);
/// Host default for do-not-disturb (red)
pub const DEFAULT_DND: Color = Color::rgb(0xed, 0x42, 0x45);

/// Errors from building a variant family
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A template the family is built from never loaded
    #[error("cannot build variants: template `{template}` was never loaded")]
    AssetMissing {
        /// Name of the missing template
        template: String,
    },
}

impl From<AssetError> for CacheError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::Missing(template) => Self::AssetMissing { template },
        }
    }
}

/// Per-status tint overrides; `None` falls back to the host default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTints {
    /// Override for online
    pub online: Option<Color>,
    /// Override for idle
    pub idle: Option<Color>,
    /// Override for do-not-disturb
    pub dnd: Option<Color>,
}

impl StatusTints {
    /// Effective tint for `status`; `None` for offline
    #[must_use]
    pub fn resolve(&self, status: ClientStatus) -> Option<Color> {
        match status {
            ClientStatus::Online => Some(self.online.unwrap_or(DEFAULT_ONLINE)),
            ClientStatus::Idle => Some(self.idle.unwrap_or(DEFAULT_IDLE)),
            ClientStatus::DoNotDisturb => Some(self.dnd.unwrap_or(DEFAULT_DND)),
            ClientStatus::Offline => None,
        }
    }

    /// Whether any override is set
    #[must_use]
    pub fn any_override(&self) -> bool {
        self.online.is_some() || self.idle.is_some() || self.dnd.is_some()
    }
}

/// The three tinted variants of one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    online: Drawable,
    idle: Drawable,
    dnd: Drawable,
}

impl VariantSet {
    /// Tint three fresh clones of one template
    #[must_use]
    pub fn build(template: &Drawable, tints: &StatusTints) -> Self {
        Self::from_templates([template, template, template], tints)
    }

    /// Tint fresh clones of a distinct template per status (online, idle, dnd)
    #[must_use]
    pub fn from_templates(templates: [&Drawable; 3], tints: &StatusTints) -> Self {
        let [online, idle, dnd] = templates;
        Self {
            online: online.tinted(tints.online.unwrap_or(DEFAULT_ONLINE)),
            idle: idle.tinted(tints.idle.unwrap_or(DEFAULT_IDLE)),
            dnd: dnd.tinted(tints.dnd.unwrap_or(DEFAULT_DND)),
        }
    }

    /// Variant for `status`; offline is unmapped
    #[must_use]
    pub fn get(&self, status: ClientStatus) -> Option<&Drawable> {
        match status {
            ClientStatus::Online => Some(&self.online),
            ClientStatus::Idle => Some(&self.idle),
            ClientStatus::DoNotDisturb => Some(&self.dnd),
            ClientStatus::Offline => None,
        }
    }
}

/// Build the variants of a single named template
///
/// # Errors
///
/// Returns [`CacheError::AssetMissing`] if the template never loaded.
pub fn build(
    templates: &IconTemplates,
    name: &str,
    tints: &StatusTints,
) -> Result<VariantSet, CacheError> {
    Ok(VariantSet::build(templates.get(name)?, tints))
}

/// Icon families held by an [`IconVariantSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Phone glyph
    Mobile,
    /// Monitor glyph
    Desktop,
    /// Globe glyph
    Web,
    /// Solid dot in the status color
    Filled,
    /// Ring behind circular avatars
    Radial,
    /// Ring behind square avatars
    RadialRect,
    /// The host's own status dots (online dot, idle crescent, dnd dot)
    StatusDots,
}

impl Family {
    /// All families, in build order
    pub const ALL: [Family; 7] = [
        Family::Mobile,
        Family::Desktop,
        Family::Web,
        Family::Filled,
        Family::Radial,
        Family::RadialRect,
        Family::StatusDots,
    ];

    fn build(
        self,
        templates: &IconTemplates,
        tints: &StatusTints,
    ) -> Result<VariantSet, CacheError> {
        match self {
            Self::Mobile => build(templates, IC_MOBILE, tints),
            Self::Desktop => build(templates, IC_DESKTOP, tints),
            Self::Web => build(templates, IC_WEB, tints),
            Self::Filled => build(templates, IC_STATUS_ONLINE, tints),
            Self::Radial => build(templates, IC_RADIAL_STATUS, tints),
            Self::RadialRect => build(templates, IC_RADIAL_STATUS_RECT, tints),
            Self::StatusDots => Ok(VariantSet::from_templates(
                [
                    templates.get(IC_STATUS_ONLINE)?,
                    templates.get(IC_STATUS_IDLE)?,
                    templates.get(IC_STATUS_DND)?,
                ],
                tints,
            )),
        }
    }
}

/// Every tinted variant for one tint configuration
#[derive(Debug, Clone)]
pub struct IconVariantSet {
    generation: u64,
    tints: StatusTints,
    families: HashMap<Family, VariantSet>,
}

impl IconVariantSet {
    /// Build every family whose templates are available
    #[must_use]
    pub fn build(templates: &IconTemplates, tints: StatusTints, generation: u64) -> Self {
        let mut families = HashMap::with_capacity(Family::ALL.len());
        for family in Family::ALL {
            match family.build(templates, &tints) {
                Ok(set) => {
                    families.insert(family, set);
                }
                Err(e) => {
                    tracing::warn!(family = ?family, error = %e, "Skipping icon family");
                }
            }
        }
        Self {
            generation,
            tints,
            families,
        }
    }

    /// Variant of `family` for `status`
    ///
    /// `None` when the family failed to build or the status is unmapped.
    #[must_use]
    pub fn variant(&self, family: Family, status: ClientStatus) -> Option<&Drawable> {
        self.families.get(&family)?.get(status)
    }

    /// Whether `family` built successfully
    #[must_use]
    pub fn has_family(&self, family: Family) -> bool {
        self.families.contains_key(&family)
    }

    /// Tints this set was built with
    #[must_use]
    pub fn tints(&self) -> &StatusTints {
        &self.tints
    }

    /// Rebuild counter, starting at 1 for the first build
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owner of the templates and the currently published variant set
#[derive(Debug)]
pub struct VariantCache {
    templates: IconTemplates,
    current: RwLock<Arc<IconVariantSet>>,
    generation: AtomicU64,
}

impl VariantCache {
    /// Take ownership of the templates and build the first set
    #[must_use]
    pub fn new(templates: IconTemplates, tints: StatusTints) -> Self {
        let initial = IconVariantSet::build(&templates, tints, 1);
        Self {
            templates,
            current: RwLock::new(Arc::new(initial)),
            generation: AtomicU64::new(1),
        }
    }

    /// The published set
    ///
    /// Callers keep the returned `Arc` for the whole bind.
    #[must_use]
    pub fn current(&self) -> Arc<IconVariantSet> {
        Arc::clone(&self.current.read())
    }

    /// Build a new set with `tints` and publish it
    pub fn rebuild(&self, tints: StatusTints) -> Arc<IconVariantSet> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        // Build outside the lock; only the swap is serialized.
        let next = Arc::new(IconVariantSet::build(&self.templates, tints, generation));
        *self.current.write() = Arc::clone(&next);
        tracing::debug!(generation, "Icon variants rebuilt");
        next
    }

    /// Templates owned by this cache
    #[must_use]
    pub fn templates(&self) -> &IconTemplates {
        &self.templates
    }
}
