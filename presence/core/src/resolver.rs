//! Status resolution
//!
//! Turns a raw [`PresenceSnapshot`] into the flags the composer branches on.

use crate::presence::{ClientStatus, ClientStatuses, Platform, PresenceSnapshot};

/// Per-platform activity derived from a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedStatus {
    /// Mobile client defined and not offline
    pub is_mobile_active: bool,
    /// Desktop client defined and not offline
    pub is_desktop_active: bool,
    /// Web client defined and not offline
    pub is_web_active: bool,
    /// Host-resolved overall status, passed through unchanged
    pub overall_status: Option<ClientStatus>,
}

impl ResolvedStatus {
    /// Activity flag for one platform
    #[must_use]
    pub const fn is_active(&self, platform: Platform) -> bool {
        match platform {
            Platform::Mobile => self.is_mobile_active,
            Platform::Desktop => self.is_desktop_active,
            Platform::Web => self.is_web_active,
        }
    }
}

/// Resolve activity flags from a snapshot
///
/// A missing client-status block resolves every platform to inactive.
#[must_use]
pub fn resolve(snapshot: &PresenceSnapshot) -> ResolvedStatus {
    let statuses = snapshot.client_statuses.unwrap_or_default();
    ResolvedStatus {
        is_mobile_active: statuses.is_active(Platform::Mobile),
        is_desktop_active: statuses.is_active(Platform::Desktop),
        is_web_active: statuses.is_active(Platform::Web),
        overall_status: snapshot.status,
    }
}

/// The host's "on mobile" predicate
///
/// True when the mobile client is online and neither desktop nor web is.
#[must_use]
pub fn is_mobile_only(statuses: &ClientStatuses) -> bool {
    statuses.mobile == Some(ClientStatus::Online)
        && statuses.desktop != Some(ClientStatus::Online)
        && statuses.web != Some(ClientStatus::Online)
}
