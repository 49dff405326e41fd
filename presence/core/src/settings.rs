//! Display settings
//!
//! The typed settings store behind the key/value surface the host exposes to
//! users, plus the per-context [`DisplayConfig`] resolution binds use.
//!
//! # Keys
//!
//! | Key | Type | Default |
//! |-----|------|---------|
//! | `sizeUserProfileInd` | int | 32 |
//! | `sizeMembersListInd` | int | 24 |
//! | `sizeDMsInd` | int | 24 |
//! | `sizeFriendsListInd` | int | 24 |
//! | `sizeChatStatus` | int | 16 |
//! | `sizeChatStatusPlatform` | int | 24 |
//! | `avatarStatus` | bool | true |
//! | `filledColors` | bool | false |
//! | `chatStatus` | bool | true |
//! | `chatStatusPlatforms` | bool | false |
//! | `radialStatus` | bool | true |
//! | `radialStatusUserProfile` | bool | true |
//! | `radialStatusMembersList` | bool | true |
//! | `radialStatusDMs` | bool | true |
//! | `radialStatusFriendsList` | bool | true |
//! | `radialStatusChat` | bool | true |
//! | `colorOnline` | int (ARGB) | unset |
//! | `colorIdle` | int (ARGB) | unset |
//! | `colorDND` | int (ARGB) | unset |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::StatusTints;
use crate::composer::AVATAR_STATUS_SIZE;
use crate::display::{DisplayConfig, RenderContext};
use crate::drawable::Color;
use crate::plugin::HookGroup;

/// Smallest accepted indicator size in pixels
pub const MIN_SIZE: u32 = 1;
/// Largest accepted indicator size in pixels
pub const MAX_SIZE: u32 = 256;

/// Errors from reading or writing a setting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Not a recognised key
    #[error("unknown setting `{0}`")]
    UnknownKey(String),

    /// Value of the wrong type for the key
    #[error("setting `{key}` expects a {expected} value")]
    TypeMismatch {
        /// Key being set
        key: SettingKey,
        /// Expected type name
        expected: &'static str,
    },

    /// Size outside the accepted range
    #[error("setting `{key}` must be between {MIN_SIZE} and {MAX_SIZE}, got {value}")]
    OutOfRange {
        /// Key being set
        key: SettingKey,
        /// Rejected value
        value: i64,
    },

    /// Color that does not fit a 32-bit ARGB value
    #[error("setting `{key}` must be a 32-bit ARGB color, got {value}")]
    InvalidColor {
        /// Key being set
        key: SettingKey,
        /// Rejected value
        value: i64,
    },
}

/// A typed setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean toggle
    Bool(bool),
    /// Integer (sizes, packed ARGB colors)
    Int(i64),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Every recognised setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum SettingKey {
    SizeUserProfileInd,
    SizeMembersListInd,
    SizeDMsInd,
    SizeFriendsListInd,
    SizeChatStatus,
    SizeChatStatusPlatform,
    AvatarStatus,
    FilledColors,
    ChatStatus,
    ChatStatusPlatforms,
    RadialStatus,
    RadialStatusUserProfile,
    RadialStatusMembersList,
    RadialStatusDMs,
    RadialStatusFriendsList,
    RadialStatusChat,
    ColorOnline,
    ColorIdle,
    ColorDND,
}

/// What has to happen after a setting changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingEffect {
    /// Tinted variants are stale and must be rebuilt
    pub rebuild_variants: bool,
    /// Hook group whose registration depends on the setting
    pub rehook: Option<HookGroup>,
}

impl SettingKey {
    /// All keys, in table order
    pub const ALL: [SettingKey; 19] = [
        SettingKey::SizeUserProfileInd,
        SettingKey::SizeMembersListInd,
        SettingKey::SizeDMsInd,
        SettingKey::SizeFriendsListInd,
        SettingKey::SizeChatStatus,
        SettingKey::SizeChatStatusPlatform,
        SettingKey::AvatarStatus,
        SettingKey::FilledColors,
        SettingKey::ChatStatus,
        SettingKey::ChatStatusPlatforms,
        SettingKey::RadialStatus,
        SettingKey::RadialStatusUserProfile,
        SettingKey::RadialStatusMembersList,
        SettingKey::RadialStatusDMs,
        SettingKey::RadialStatusFriendsList,
        SettingKey::RadialStatusChat,
        SettingKey::ColorOnline,
        SettingKey::ColorIdle,
        SettingKey::ColorDND,
    ];

    /// Key as stored by the host
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SizeUserProfileInd => "sizeUserProfileInd",
            Self::SizeMembersListInd => "sizeMembersListInd",
            Self::SizeDMsInd => "sizeDMsInd",
            Self::SizeFriendsListInd => "sizeFriendsListInd",
            Self::SizeChatStatus => "sizeChatStatus",
            Self::SizeChatStatusPlatform => "sizeChatStatusPlatform",
            Self::AvatarStatus => "avatarStatus",
            Self::FilledColors => "filledColors",
            Self::ChatStatus => "chatStatus",
            Self::ChatStatusPlatforms => "chatStatusPlatforms",
            Self::RadialStatus => "radialStatus",
            Self::RadialStatusUserProfile => "radialStatusUserProfile",
            Self::RadialStatusMembersList => "radialStatusMembersList",
            Self::RadialStatusDMs => "radialStatusDMs",
            Self::RadialStatusFriendsList => "radialStatusFriendsList",
            Self::RadialStatusChat => "radialStatusChat",
            Self::ColorOnline => "colorOnline",
            Self::ColorIdle => "colorIdle",
            Self::ColorDND => "colorDND",
        }
    }

    /// Look a key up by its stored name
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    const fn is_size(self) -> bool {
        matches!(
            self,
            Self::SizeUserProfileInd
                | Self::SizeMembersListInd
                | Self::SizeDMsInd
                | Self::SizeFriendsListInd
                | Self::SizeChatStatus
                | Self::SizeChatStatusPlatform
        )
    }

    const fn is_color(self) -> bool {
        matches!(self, Self::ColorOnline | Self::ColorIdle | Self::ColorDND)
    }

    /// Consequence of changing this key
    ///
    /// Sizes and the list radial toggles are read at bind time and need
    /// nothing.
    #[must_use]
    pub const fn effect(self) -> SettingEffect {
        let (rebuild_variants, rehook) = match self {
            Self::ColorOnline | Self::ColorIdle | Self::ColorDND => {
                (true, Some(HookGroup::StatusView))
            }
            Self::AvatarStatus | Self::FilledColors => (false, Some(HookGroup::StatusView)),
            Self::ChatStatus => (false, Some(HookGroup::ChatStatus)),
            Self::ChatStatusPlatforms => (false, Some(HookGroup::ChatStatusPlatforms)),
            Self::RadialStatus | Self::RadialStatusUserProfile | Self::RadialStatusChat => {
                (false, Some(HookGroup::Radial))
            }
            _ => (false, None),
        };
        SettingEffect {
            rebuild_variants,
            rehook,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All user-facing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Profile header indicator size
    pub size_user_profile_ind: u32,
    /// Member list indicator size
    pub size_members_list_ind: u32,
    /// DM list indicator size
    #[serde(rename = "sizeDMsInd")]
    pub size_dms_ind: u32,
    /// Friends list indicator size
    pub size_friends_list_ind: u32,
    /// Chat status dot size
    pub size_chat_status: u32,
    /// Chat platform indicator size
    pub size_chat_status_platform: u32,
    /// Replace the avatar dot with platform icons
    pub avatar_status: bool,
    /// Filled-color avatar dots
    pub filled_colors: bool,
    /// Status dot after chat author names
    pub chat_status: bool,
    /// Platform breakdown after chat author names
    pub chat_status_platforms: bool,
    /// Master switch for radial overlays
    pub radial_status: bool,
    /// Radial overlay on the profile avatar
    pub radial_status_user_profile: bool,
    /// Radial overlay in the member list
    pub radial_status_members_list: bool,
    /// Radial overlay in the DM list
    #[serde(rename = "radialStatusDMs")]
    pub radial_status_dms: bool,
    /// Radial overlay in the friends list
    pub radial_status_friends_list: bool,
    /// Radial overlay on chat avatars
    pub radial_status_chat: bool,
    /// Online tint override
    #[serde(with = "tint_serde", skip_serializing_if = "Option::is_none")]
    pub color_online: Option<Color>,
    /// Idle tint override
    #[serde(with = "tint_serde", skip_serializing_if = "Option::is_none")]
    pub color_idle: Option<Color>,
    /// Do-not-disturb tint override
    #[serde(
        rename = "colorDND",
        with = "tint_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_dnd: Option<Color>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size_user_profile_ind: 32,
            size_members_list_ind: 24,
            size_dms_ind: 24,
            size_friends_list_ind: 24,
            size_chat_status: 16,
            size_chat_status_platform: 24,
            avatar_status: true,
            filled_colors: false,
            chat_status: true,
            chat_status_platforms: false,
            radial_status: true,
            radial_status_user_profile: true,
            radial_status_members_list: true,
            radial_status_dms: true,
            radial_status_friends_list: true,
            radial_status_chat: true,
            color_online: None,
            color_idle: None,
            color_dnd: None,
        }
    }
}

impl Settings {
    /// Tint overrides as a unit
    #[must_use]
    pub fn tints(&self) -> StatusTints {
        StatusTints {
            online: self.color_online,
            idle: self.color_idle,
            dnd: self.color_dnd,
        }
    }

    /// Whether the avatar status dot is replaced at all
    #[must_use]
    pub fn replaces_avatar_dot(&self) -> bool {
        self.avatar_status || self.filled_colors || self.tints().any_override()
    }

    /// Resolve the settings one context binds with
    ///
    /// `square_avatars` is the host's avatar shape; the profile avatar is
    /// always round.
    #[must_use]
    pub fn display_config(&self, context: RenderContext, square_avatars: bool) -> DisplayConfig {
        let (size, radial) = match context {
            RenderContext::UserProfile => (
                self.size_user_profile_ind,
                self.radial_status_user_profile,
            ),
            RenderContext::MembersList => {
                (self.size_members_list_ind, self.radial_status_members_list)
            }
            RenderContext::DirectMessages => (self.size_dms_ind, self.radial_status_dms),
            RenderContext::FriendsList => {
                (self.size_friends_list_ind, self.radial_status_friends_list)
            }
            RenderContext::ChatStatus => (self.size_chat_status, self.radial_status_chat),
            RenderContext::ChatStatusPlatforms => {
                (self.size_chat_status_platform, self.radial_status_chat)
            }
            RenderContext::AvatarStatus => (AVATAR_STATUS_SIZE, false),
        };
        DisplayConfig {
            avatar_status: self.avatar_status,
            filled_colors: self.filled_colors,
            chat_status: self.chat_status,
            chat_status_platforms: self.chat_status_platforms,
            size,
            tints: self.tints(),
            radial: self.radial_status && radial,
            square: square_avatars && context != RenderContext::UserProfile,
        }
    }

    /// Current value of `key`; `None` for an unset color
    #[must_use]
    pub fn get(&self, key: SettingKey) -> Option<SettingValue> {
        use SettingKey as K;
        let value = match key {
            K::SizeUserProfileInd => SettingValue::Int(self.size_user_profile_ind.into()),
            K::SizeMembersListInd => SettingValue::Int(self.size_members_list_ind.into()),
            K::SizeDMsInd => SettingValue::Int(self.size_dms_ind.into()),
            K::SizeFriendsListInd => SettingValue::Int(self.size_friends_list_ind.into()),
            K::SizeChatStatus => SettingValue::Int(self.size_chat_status.into()),
            K::SizeChatStatusPlatform => SettingValue::Int(self.size_chat_status_platform.into()),
            K::AvatarStatus => SettingValue::Bool(self.avatar_status),
            K::FilledColors => SettingValue::Bool(self.filled_colors),
            K::ChatStatus => SettingValue::Bool(self.chat_status),
            K::ChatStatusPlatforms => SettingValue::Bool(self.chat_status_platforms),
            K::RadialStatus => SettingValue::Bool(self.radial_status),
            K::RadialStatusUserProfile => SettingValue::Bool(self.radial_status_user_profile),
            K::RadialStatusMembersList => SettingValue::Bool(self.radial_status_members_list),
            K::RadialStatusDMs => SettingValue::Bool(self.radial_status_dms),
            K::RadialStatusFriendsList => SettingValue::Bool(self.radial_status_friends_list),
            K::RadialStatusChat => SettingValue::Bool(self.radial_status_chat),
            K::ColorOnline => SettingValue::Int(self.color_online?.to_argb().into()),
            K::ColorIdle => SettingValue::Int(self.color_idle?.to_argb().into()),
            K::ColorDND => SettingValue::Int(self.color_dnd?.to_argb().into()),
        };
        Some(value)
    }

    /// Whether a value is stored for `key` (colors can be unset)
    #[must_use]
    pub fn exists(&self, key: SettingKey) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::TypeMismatch`] for a value of the wrong type
    /// [`SettingsError::OutOfRange`] for sizes outside
    /// [`MIN_SIZE`]..=[`MAX_SIZE`] and [`SettingsError::InvalidColor`] for
    /// colors that do not fit 32 bits.
    pub fn set(
        &mut self,
        key: SettingKey,
        value: SettingValue,
    ) -> Result<SettingEffect, SettingsError> {
        if key.is_size() {
            let SettingValue::Int(raw) = value else {
                return Err(SettingsError::TypeMismatch { key, expected: "int" });
            };
            *self.size_slot(key) = validate_size(key, raw)?;
        } else if key.is_color() {
            let SettingValue::Int(raw) = value else {
                return Err(SettingsError::TypeMismatch { key, expected: "int" });
            };
            let argb =
                argb_from_i64(raw).ok_or(SettingsError::InvalidColor { key, value: raw })?;
            if let Some(slot) = self.color_slot(key) {
                *slot = Some(Color::from_argb(argb));
            }
        } else {
            let SettingValue::Bool(flag) = value else {
                return Err(SettingsError::TypeMismatch { key, expected: "bool" });
            };
            if let Some(slot) = self.bool_slot(key) {
                *slot = flag;
            }
        }
        Ok(key.effect())
    }

    /// Store a value given the key's stored name
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownKey`] for unrecognised keys, otherwise
    /// as [`Settings::set`].
    pub fn set_by_name(
        &mut self,
        key: &str,
        value: SettingValue,
    ) -> Result<SettingEffect, SettingsError> {
        let key =
            SettingKey::parse(key).ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        self.set(key, value)
    }

    /// Restore the default for `key` (unsets colors)
    pub fn reset(&mut self, key: SettingKey) -> SettingEffect {
        let mut defaults = Self::default();
        if key.is_size() {
            *self.size_slot(key) = *defaults.size_slot(key);
        } else if let Some(slot) = self.color_slot(key) {
            *slot = None;
        } else if let (Some(slot), Some(default)) = (self.bool_slot(key), defaults.bool_slot(key)) {
            *slot = *default;
        }
        key.effect()
    }

    /// Check every size is in range
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError::OutOfRange`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for key in SettingKey::ALL.into_iter().filter(|k| k.is_size()) {
            if let Some(SettingValue::Int(raw)) = self.get(key) {
                validate_size(key, raw)?;
            }
        }
        Ok(())
    }

    fn size_slot(&mut self, key: SettingKey) -> &mut u32 {
        match key {
            SettingKey::SizeUserProfileInd => &mut self.size_user_profile_ind,
            SettingKey::SizeMembersListInd => &mut self.size_members_list_ind,
            SettingKey::SizeDMsInd => &mut self.size_dms_ind,
            SettingKey::SizeFriendsListInd => &mut self.size_friends_list_ind,
            SettingKey::SizeChatStatus => &mut self.size_chat_status,
            _ => &mut self.size_chat_status_platform,
        }
    }

    fn bool_slot(&mut self, key: SettingKey) -> Option<&mut bool> {
        Some(match key {
            SettingKey::AvatarStatus => &mut self.avatar_status,
            SettingKey::FilledColors => &mut self.filled_colors,
            SettingKey::ChatStatus => &mut self.chat_status,
            SettingKey::ChatStatusPlatforms => &mut self.chat_status_platforms,
            SettingKey::RadialStatus => &mut self.radial_status,
            SettingKey::RadialStatusUserProfile => &mut self.radial_status_user_profile,
            SettingKey::RadialStatusMembersList => &mut self.radial_status_members_list,
            SettingKey::RadialStatusDMs => &mut self.radial_status_dms,
            SettingKey::RadialStatusFriendsList => &mut self.radial_status_friends_list,
            SettingKey::RadialStatusChat => &mut self.radial_status_chat,
            _ => return None,
        })
    }

    fn color_slot(&mut self, key: SettingKey) -> Option<&mut Option<Color>> {
        match key {
            SettingKey::ColorOnline => Some(&mut self.color_online),
            SettingKey::ColorIdle => Some(&mut self.color_idle),
            SettingKey::ColorDND => Some(&mut self.color_dnd),
            _ => None,
        }
    }
}

fn validate_size(key: SettingKey, raw: i64) -> Result<u32, SettingsError> {
    u32::try_from(raw)
        .ok()
        .filter(|size| (MIN_SIZE..=MAX_SIZE).contains(size))
        .ok_or(SettingsError::OutOfRange { key, value: raw })
}

/// Accept both signed (as hosts store them) and unsigned ARGB integers
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn argb_from_i64(raw: i64) -> Option<i32> {
    if let Ok(signed) = i32::try_from(raw) {
        return Some(signed);
    }
    u32::try_from(raw).ok().map(|unsigned| unsigned as i32)
}

/// Tints as ARGB integers or `#RRGGBB` / `#AARRGGBB` strings
mod tint_serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::argb_from_i64;
    use crate::drawable::Color;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTint {
        Argb(i64),
        Hex(String),
    }

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        tint: &Option<Color>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match tint {
            Some(color) => serializer.serialize_str(&color.to_hex()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Color>, D::Error> {
        match Option::<RawTint>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawTint::Argb(raw)) => argb_from_i64(raw)
                .map(|argb| Some(Color::from_argb(argb)))
                .ok_or_else(|| D::Error::custom(format!("color {raw} does not fit in 32 bits"))),
            Some(RawTint::Hex(hex)) => Color::from_hex(&hex)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("`{hex}` is not #RRGGBB or #AARRGGBB"))),
        }
    }
}
