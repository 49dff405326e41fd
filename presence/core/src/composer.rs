//! Indicator composition
//!
//! Decides which icons a context shows for a presence, in what order and at
//! what size. Every function here is pure over its inputs; the caller
//! supplies the snapshot, its resolved [`DisplayConfig`], and the variant set
//! it took from the cache for this bind.
//!
//! # Paths
//!
//! Each [`RenderContext`] uses exactly one path:
//!
//! - **Platform breakdown** (profile, lists, chat platforms): Mobile, then
//!   Desktop, then Web, gated by avatar mode.
//! - **Single status** (chat status): one filled dot for the overall status.
//! - **Avatar dot** (avatar status): replaces the host's dot depending on
//!   avatar mode, filled colors and tint overrides.

use crate::cache::{Family, IconVariantSet};
use crate::display::{DisplayConfig, IndicatorDescriptor, IndicatorKind, RenderContext};
use crate::presence::{ClientStatus, Platform, PresenceSnapshot};
use crate::resolver::{is_mobile_only, resolve};

/// Pixel size of the avatar status dot
pub const AVATAR_STATUS_SIZE: u32 = 16;

/// Composition path of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// Per-platform icons
    PlatformBreakdown {
        /// Treat the context as having no avatar, whatever the settings say
        force_no_avatar: bool,
    },
    /// One filled dot for the overall status
    SingleStatus,
    /// Replacement for the host's avatar dot
    AvatarDot,
}

impl RenderContext {
    /// Path this context composes with
    #[must_use]
    pub const fn composition(self) -> Composition {
        match self {
            Self::UserProfile | Self::MembersList | Self::DirectMessages | Self::FriendsList => {
                Composition::PlatformBreakdown {
                    force_no_avatar: false,
                }
            }
            // Chat rows have their own avatar dot settings; the breakdown
            // always shows in full here.
            Self::ChatStatusPlatforms => Composition::PlatformBreakdown {
                force_no_avatar: true,
            },
            Self::ChatStatus => Composition::SingleStatus,
            Self::AvatarStatus => Composition::AvatarDot,
        }
    }
}

/// Compose the ordered indicators for `context`
#[must_use]
pub fn compose(
    snapshot: &PresenceSnapshot,
    config: &DisplayConfig,
    context: RenderContext,
    variants: &IconVariantSet,
) -> Vec<IndicatorDescriptor> {
    match context.composition() {
        Composition::PlatformBreakdown { force_no_avatar } => {
            if context == RenderContext::ChatStatusPlatforms && !config.chat_status_platforms {
                return Vec::new();
            }
            let no_avatar = force_no_avatar || !config.avatar_status;
            compose_platforms(snapshot, config.size, no_avatar, variants)
        }
        Composition::SingleStatus => {
            if !config.chat_status {
                return Vec::new();
            }
            single_status(snapshot.status, config.size, Family::Filled, variants)
                .into_iter()
                .collect()
        }
        Composition::AvatarDot => compose_avatar_dot(snapshot, config, variants)
            .into_iter()
            .collect(),
    }
}

/// Per-platform breakdown
///
/// With an avatar dot present (`no_avatar == false`) the dot already shows
/// one platform, so the breakdown is only added for mobile users, and the
/// phone itself is left to the dot.
#[must_use]
pub fn compose_platforms(
    snapshot: &PresenceSnapshot,
    size: u32,
    no_avatar: bool,
    variants: &IconVariantSet,
) -> Vec<IndicatorDescriptor> {
    let Some(statuses) = snapshot.client_statuses else {
        return Vec::new();
    };
    let resolved = resolve(snapshot);
    let mut out = Vec::with_capacity(3);

    let emit = |platform: Platform, kind: IndicatorKind, family: Family| {
        if !resolved.is_active(platform) {
            return None;
        }
        let status = statuses.get(platform)?;
        let icon = variants.variant(family, status)?;
        Some(IndicatorDescriptor::new(kind, status, icon, size))
    };

    if no_avatar && resolved.is_mobile_active {
        if let Some(mobile) = emit(Platform::Mobile, IndicatorKind::Mobile, Family::Mobile) {
            out.push(mobile.with_width(size * 2 / 3));
        }
    }
    if no_avatar || resolved.is_mobile_active {
        out.extend(emit(Platform::Desktop, IndicatorKind::Desktop, Family::Desktop));
    }
    if no_avatar || resolved.is_mobile_active || resolved.is_desktop_active {
        out.extend(emit(Platform::Web, IndicatorKind::Web, Family::Web));
    }

    tracing::trace!(count = out.len(), no_avatar, "Composed platform indicators");
    out
}

/// One dot for the overall status from `family`
#[must_use]
pub fn single_status(
    status: Option<ClientStatus>,
    size: u32,
    family: Family,
    variants: &IconVariantSet,
) -> Option<IndicatorDescriptor> {
    let status = status?;
    let icon = variants.variant(family, status)?;
    Some(IndicatorDescriptor::new(IndicatorKind::Status, status, icon, size))
}

/// Replacement for the host's avatar dot, first matching rule wins
///
/// `None` leaves the host's own dot in place.
#[must_use]
pub fn compose_avatar_dot(
    snapshot: &PresenceSnapshot,
    config: &DisplayConfig,
    variants: &IconVariantSet,
) -> Option<IndicatorDescriptor> {
    let size = AVATAR_STATUS_SIZE;

    if config.avatar_status {
        let statuses = snapshot.client_statuses?;
        let mobile = statuses.mobile?;
        // The host already draws an untinted phone for mobile-only users
        if is_mobile_only(&statuses) && config.tints.online.is_none() {
            return None;
        }
        let icon = variants.variant(Family::Mobile, mobile)?;
        return Some(IndicatorDescriptor::new(
            IndicatorKind::Mobile,
            mobile,
            icon,
            size,
        ));
    }

    if config.filled_colors {
        return single_status(snapshot.status, size, Family::Filled, variants);
    }

    if config.tints.any_override() {
        if snapshot
            .client_statuses
            .is_some_and(|statuses| is_mobile_only(&statuses))
        {
            let icon = variants.variant(Family::Mobile, ClientStatus::Online)?;
            return Some(IndicatorDescriptor::new(
                IndicatorKind::Mobile,
                ClientStatus::Online,
                icon,
                size,
            ));
        }
        return single_status(snapshot.status, size, Family::StatusDots, variants);
    }

    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::assets::{BundledAssets, IconTemplates, IC_DESKTOP, IC_STATUS_ONLINE};
    use crate::cache::StatusTints;
    use crate::drawable::Color;
    use crate::presence::ClientStatuses;

    fn variants() -> IconVariantSet {
        IconVariantSet::build(
            &IconTemplates::load(&BundledAssets::generated()),
            StatusTints::default(),
            1,
        )
    }

    fn config(avatar_status: bool) -> DisplayConfig {
        DisplayConfig {
            avatar_status,
            filled_colors: false,
            chat_status: true,
            chat_status_platforms: true,
            size: 24,
            tints: StatusTints::default(),
            radial: true,
            square: false,
        }
    }

    fn snapshot(
        mobile: Option<ClientStatus>,
        desktop: Option<ClientStatus>,
        web: Option<ClientStatus>,
    ) -> PresenceSnapshot {
        PresenceSnapshot {
            status: mobile.or(desktop).or(web),
            client_statuses: Some(ClientStatuses {
                mobile,
                desktop,
                web,
            }),
        }
    }

    fn kinds(descriptors: &[IndicatorDescriptor]) -> Vec<(IndicatorKind, ClientStatus)> {
        descriptors.iter().map(|d| (d.kind, d.status)).collect()
    }

    const ALL_OPTIONS: [Option<ClientStatus>; 5] = [
        None,
        Some(ClientStatus::Online),
        Some(ClientStatus::Idle),
        Some(ClientStatus::DoNotDisturb),
        Some(ClientStatus::Offline),
    ];

    fn all_snapshots() -> Vec<PresenceSnapshot> {
        let mut out = Vec::new();
        for m in ALL_OPTIONS {
            for d in ALL_OPTIONS {
                for w in ALL_OPTIONS {
                    out.push(snapshot(m, d, w));
                }
            }
        }
        out
    }

    #[test]
    fn test_mobile_then_web_without_avatar() {
        let v = variants();
        let s = snapshot(
            Some(ClientStatus::DoNotDisturb),
            None,
            Some(ClientStatus::Online),
        );
        let out = compose(&s, &config(false), RenderContext::MembersList, &v);

        assert_eq!(
            kinds(&out),
            vec![
                (IndicatorKind::Mobile, ClientStatus::DoNotDisturb),
                (IndicatorKind::Web, ClientStatus::Online),
            ]
        );
        assert_eq!((out[0].pixel_size, out[0].pixel_width), (24, 16));
        assert_eq!((out[1].pixel_size, out[1].pixel_width), (24, 24));
        assert_eq!(out[0].icon.tint(), Some(crate::cache::DEFAULT_DND));
    }

    #[test]
    fn test_avatar_mode_hides_breakdown_for_desktop_user() {
        let v = variants();
        let s = snapshot(None, Some(ClientStatus::Idle), None);
        assert!(compose(&s, &config(true), RenderContext::MembersList, &v).is_empty());
    }

    #[test]
    fn test_avatar_mode_shows_other_platforms_for_mobile_user() {
        let v = variants();
        let s = snapshot(
            Some(ClientStatus::Online),
            Some(ClientStatus::Idle),
            Some(ClientStatus::Online),
        );
        let out = compose(&s, &config(true), RenderContext::DirectMessages, &v);
        assert_eq!(
            kinds(&out),
            vec![
                (IndicatorKind::Desktop, ClientStatus::Idle),
                (IndicatorKind::Web, ClientStatus::Online),
            ]
        );
    }

    #[test]
    fn test_chat_platforms_ignore_avatar_setting() {
        let v = variants();
        let s = snapshot(None, Some(ClientStatus::Idle), None);
        let out = compose(&s, &config(true), RenderContext::ChatStatusPlatforms, &v);
        assert_eq!(kinds(&out), vec![(IndicatorKind::Desktop, ClientStatus::Idle)]);
    }

    #[test]
    fn test_no_avatar_mobile_iff_mobile_active() {
        let v = variants();
        for s in all_snapshots() {
            let out = compose(&s, &config(false), RenderContext::FriendsList, &v);
            let has_mobile = out.iter().any(|d| d.kind == IndicatorKind::Mobile);
            assert_eq!(has_mobile, resolve(&s).is_mobile_active, "{s:?}");
        }
    }

    #[test]
    fn test_avatar_mode_without_mobile_or_desktop_is_empty() {
        let v = variants();
        for s in all_snapshots() {
            let resolved = resolve(&s);
            if resolved.is_mobile_active || resolved.is_desktop_active {
                continue;
            }
            assert!(
                compose(&s, &config(true), RenderContext::UserProfile, &v).is_empty(),
                "{s:?}"
            );
        }
    }

    #[test]
    fn test_avatar_mode_desktop_keeps_web() {
        let v = variants();
        let s = snapshot(None, Some(ClientStatus::Online), Some(ClientStatus::Online));
        let out = compose(&s, &config(true), RenderContext::MembersList, &v);
        assert_eq!(kinds(&out), vec![(IndicatorKind::Web, ClientStatus::Online)]);
    }

    #[test]
    fn test_platform_order_is_fixed() {
        let v = variants();
        let rank = |kind| match kind {
            IndicatorKind::Mobile => 0,
            IndicatorKind::Desktop => 1,
            IndicatorKind::Web => 2,
            IndicatorKind::Status => 3,
        };
        for avatar in [false, true] {
            for s in all_snapshots() {
                let out = compose(&s, &config(avatar), RenderContext::MembersList, &v);
                assert!(
                    out.windows(2).all(|w| rank(w[0].kind) < rank(w[1].kind)),
                    "{s:?}"
                );
            }
        }
    }

    #[test]
    fn test_missing_breakdown_composes_nothing() {
        let v = variants();
        let s = PresenceSnapshot::with_status(ClientStatus::Online);
        assert!(compose(&s, &config(false), RenderContext::UserProfile, &v).is_empty());
    }

    #[test]
    fn test_missing_family_is_skipped() {
        let templates = IconTemplates::load(&BundledAssets::generated().without(IC_DESKTOP));
        let v = IconVariantSet::build(&templates, StatusTints::default(), 1);
        let s = snapshot(
            Some(ClientStatus::Online),
            Some(ClientStatus::Online),
            Some(ClientStatus::Idle),
        );
        let out = compose(&s, &config(false), RenderContext::MembersList, &v);
        assert_eq!(
            kinds(&out),
            vec![
                (IndicatorKind::Mobile, ClientStatus::Online),
                (IndicatorKind::Web, ClientStatus::Idle),
            ]
        );
    }

    #[test]
    fn test_chat_status_single_filled_dot() {
        let v = variants();
        let s = snapshot(None, Some(ClientStatus::Idle), Some(ClientStatus::Online));
        let mut c = config(false);
        c.size = 16;
        let out = compose(&s, &c, RenderContext::ChatStatus, &v);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, IndicatorKind::Status);
        assert_eq!(out[0].status, ClientStatus::Idle);
        assert_eq!(out[0].icon.name(), IC_STATUS_ONLINE);
        assert_eq!(out[0].pixel_size, 16);
    }

    #[test]
    fn test_chat_contexts_respect_toggles() {
        let v = variants();
        let s = snapshot(Some(ClientStatus::Online), None, None);
        let mut c = config(false);
        c.chat_status = false;
        c.chat_status_platforms = false;
        assert!(compose(&s, &c, RenderContext::ChatStatus, &v).is_empty());
        assert!(compose(&s, &c, RenderContext::ChatStatusPlatforms, &v).is_empty());
    }

    #[test]
    fn test_filled_avatar_dot() {
        let v = variants();
        let s = snapshot(None, Some(ClientStatus::Online), None);
        let mut c = config(false);
        c.filled_colors = true;
        let out = compose(&s, &c, RenderContext::AvatarStatus, &v);
        assert_eq!(kinds(&out), vec![(IndicatorKind::Status, ClientStatus::Online)]);
        assert_eq!(out[0].icon.name(), IC_STATUS_ONLINE);
        assert_eq!(out[0].pixel_size, AVATAR_STATUS_SIZE);
    }

    #[test]
    fn test_avatar_dot_leaves_host_phone_for_mobile_only() {
        let v = variants();
        let s = snapshot(Some(ClientStatus::Online), None, None);
        assert!(compose_avatar_dot(&s, &config(true), &v).is_none());

        let mut tinted = config(true);
        tinted.tints.online = Some(Color::rgb(0, 255, 0));
        let v = IconVariantSet::build(
            &IconTemplates::load(&BundledAssets::generated()),
            tinted.tints,
            1,
        );
        let dot = compose_avatar_dot(&s, &tinted, &v).unwrap();
        assert_eq!(dot.kind, IndicatorKind::Mobile);
        assert_eq!(dot.icon.tint(), Some(Color::rgb(0, 255, 0)));
    }

    #[test]
    fn test_avatar_dot_shows_idle_phone() {
        let v = variants();
        let s = snapshot(Some(ClientStatus::Idle), Some(ClientStatus::Online), None);
        let dot = compose_avatar_dot(&s, &config(true), &v).unwrap();
        assert_eq!((dot.kind, dot.status), (IndicatorKind::Mobile, ClientStatus::Idle));
    }

    #[test]
    fn test_avatar_dot_custom_tints() {
        let mut c = config(false);
        c.tints.dnd = Some(Color::rgb(1, 1, 1));
        let v = IconVariantSet::build(
            &IconTemplates::load(&BundledAssets::generated()),
            c.tints,
            1,
        );

        let desktop_dnd = snapshot(None, Some(ClientStatus::DoNotDisturb), None);
        let dot = compose_avatar_dot(&desktop_dnd, &c, &v).unwrap();
        assert_eq!(dot.kind, IndicatorKind::Status);
        assert_eq!(dot.icon.tint(), Some(Color::rgb(1, 1, 1)));

        let phone = snapshot(Some(ClientStatus::Online), None, None);
        let dot = compose_avatar_dot(&phone, &c, &v).unwrap();
        assert_eq!((dot.kind, dot.status), (IndicatorKind::Mobile, ClientStatus::Online));
    }

    #[test]
    fn test_avatar_dot_untouched_by_default() {
        let v = variants();
        let s = snapshot(None, Some(ClientStatus::Online), None);
        assert!(compose_avatar_dot(&s, &config(false), &v).is_none());
    }
}
