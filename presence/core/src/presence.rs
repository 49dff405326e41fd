//! Presence data model
//!
//! Read-only presence records supplied by the host on every bind. The core
//! never owns or mutates these; it only reads them to decide what to draw.
//!
//! # Wire shape
//!
//! The types serialize the way the chat host reports them:
//!
//! ```json
//! {
//!   "status": "dnd",
//!   "client_statuses": { "mobile": "dnd", "web": "online" }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status reported for one client, or resolved for the user overall
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Online and active
    Online,
    /// Away / idle
    Idle,
    /// Do not disturb
    #[serde(rename = "dnd")]
    DoNotDisturb,
    /// Offline, invisible, or anything the host did not recognise
    #[serde(other)]
    Offline,
}

impl ClientStatus {
    /// Whether this status counts as a live connection
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Offline)
    }

    /// Settings key holding the tint override for this status
    ///
    /// `Offline` has no tint and returns `None`.
    #[must_use]
    pub const fn tint_key(self) -> Option<&'static str> {
        match self {
            Self::Online => Some("colorOnline"),
            Self::Idle => Some("colorIdle"),
            Self::DoNotDisturb => Some("colorDND"),
            Self::Offline => None,
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Idle => write!(f, "idle"),
            Self::DoNotDisturb => write!(f, "dnd"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Client platform a status was reported from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Phone or tablet app
    Mobile,
    /// Desktop app
    Desktop,
    /// Browser session
    Web,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mobile => write!(f, "mobile"),
            Self::Desktop => write!(f, "desktop"),
            Self::Web => write!(f, "web"),
        }
    }
}

/// Per-platform statuses; `None` means not connected on that platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientStatuses {
    /// Status of the mobile client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<ClientStatus>,
    /// Status of the desktop client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<ClientStatus>,
    /// Status of the web client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<ClientStatus>,
}

impl ClientStatuses {
    /// Status reported for a single platform
    #[must_use]
    pub const fn get(&self, platform: Platform) -> Option<ClientStatus> {
        match platform {
            Platform::Mobile => self.mobile,
            Platform::Desktop => self.desktop,
            Platform::Web => self.web,
        }
    }

    /// Whether the platform has a defined, non-offline status
    #[must_use]
    pub fn is_active(&self, platform: Platform) -> bool {
        self.get(platform).is_some_and(ClientStatus::is_active)
    }
}

/// A user's presence as handed over by the host for one render
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceSnapshot {
    /// Overall status, already resolved by the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    /// Per-platform breakdown, when the host has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_statuses: Option<ClientStatuses>,
}

impl PresenceSnapshot {
    /// Snapshot with only an overall status
    #[must_use]
    pub const fn with_status(status: ClientStatus) -> Self {
        Self {
            status: Some(status),
            client_statuses: None,
        }
    }

    /// Builder: attach a per-platform breakdown
    #[must_use]
    pub const fn platforms(mut self, client_statuses: ClientStatuses) -> Self {
        self.client_statuses = Some(client_statuses);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_is_inactive() {
        assert!(ClientStatus::Online.is_active());
        assert!(ClientStatus::Idle.is_active());
        assert!(ClientStatus::DoNotDisturb.is_active());
        assert!(!ClientStatus::Offline.is_active());
    }

    #[test]
    fn test_absent_platform_is_inactive() {
        let statuses = ClientStatuses {
            mobile: Some(ClientStatus::Idle),
            desktop: Some(ClientStatus::Offline),
            web: None,
        };
        assert!(statuses.is_active(Platform::Mobile));
        assert!(!statuses.is_active(Platform::Desktop));
        assert!(!statuses.is_active(Platform::Web));
    }

    #[test]
    fn test_deserialize_host_payload() {
        let json = r#"{"status":"dnd","client_statuses":{"mobile":"dnd","web":"online"}}"#;
        let snapshot: PresenceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.status, Some(ClientStatus::DoNotDisturb));
        let statuses = snapshot.client_statuses.unwrap();
        assert_eq!(statuses.mobile, Some(ClientStatus::DoNotDisturb));
        assert_eq!(statuses.desktop, None);
        assert_eq!(statuses.web, Some(ClientStatus::Online));
    }

    #[test]
    fn test_unknown_status_string_maps_to_offline() {
        let status: ClientStatus = serde_json::from_str(r#""invisible""#).unwrap();
        assert_eq!(status, ClientStatus::Offline);
    }

    #[test]
    fn test_tint_keys() {
        assert_eq!(ClientStatus::Online.tint_key(), Some("colorOnline"));
        assert_eq!(ClientStatus::DoNotDisturb.tint_key(), Some("colorDND"));
        assert_eq!(ClientStatus::Offline.tint_key(), None);
    }
}
