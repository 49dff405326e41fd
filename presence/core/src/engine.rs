//! Engine
//!
//! Shared state every hook reads at bind time: the live settings, the variant
//! cache and the host's avatar shape. Hooks hold an `Arc<Engine>` and pull
//! their context's slice of the settings fresh on each bind.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::assets::IconTemplates;
use crate::cache::{IconVariantSet, VariantCache};
use crate::composer::compose;
use crate::display::{DisplayConfig, IndicatorDescriptor, RenderContext};
use crate::presence::{ClientStatus, PresenceSnapshot};
use crate::radial::{select_for, RadialOverlay};
use crate::settings::Settings;

/// Settings, variants and avatar shape for one running plugin
#[derive(Debug)]
pub struct Engine {
    settings: Arc<RwLock<Settings>>,
    cache: VariantCache,
    square_avatars: bool,
}

impl Engine {
    /// Build the first variant set from the current tints
    #[must_use]
    pub fn new(
        settings: Arc<RwLock<Settings>>,
        templates: IconTemplates,
        square_avatars: bool,
    ) -> Self {
        let tints = settings.read().tints();
        Self {
            cache: VariantCache::new(templates, tints),
            settings,
            square_avatars,
        }
    }

    /// Engine over settings nobody else shares
    #[must_use]
    pub fn from_settings(
        settings: Settings,
        templates: IconTemplates,
        square_avatars: bool,
    ) -> Self {
        Self::new(Arc::new(RwLock::new(settings)), templates, square_avatars)
    }

    /// Settings resolved for `context` right now
    #[must_use]
    pub fn display_config(&self, context: RenderContext) -> DisplayConfig {
        self.settings
            .read()
            .display_config(context, self.square_avatars)
    }

    /// Indicators for `snapshot` in `context`
    #[must_use]
    pub fn compose(
        &self,
        context: RenderContext,
        snapshot: &PresenceSnapshot,
    ) -> Vec<IndicatorDescriptor> {
        let config = self.display_config(context);
        let variants = self.cache.current();
        compose(snapshot, &config, context, &variants)
    }

    /// Radial overlay for `context`, `None` when radial is off there
    #[must_use]
    pub fn overlay(
        &self,
        context: RenderContext,
        status: Option<ClientStatus>,
    ) -> Option<RadialOverlay> {
        let config = self.display_config(context);
        let variants = self.cache.current();
        select_for(&config, status, &variants)
    }

    /// Rebuild the variants from the current tints
    pub fn rebuild_variants(&self) -> Arc<IconVariantSet> {
        let tints = self.settings.read().tints();
        self.cache.rebuild(tints)
    }

    /// The published variant set
    #[must_use]
    pub fn variants(&self) -> Arc<IconVariantSet> {
        self.cache.current()
    }

    /// Whether the host draws square avatars
    #[must_use]
    pub fn square_avatars(&self) -> bool {
        self.square_avatars
    }

    /// Shared settings handle
    #[must_use]
    pub fn settings(&self) -> &Arc<RwLock<Settings>> {
        &self.settings
    }
}
