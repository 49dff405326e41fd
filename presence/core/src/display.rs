//! Shared rendering types
//!
//! What the composer consumes ([`DisplayConfig`], [`RenderContext`]) and what
//! it produces ([`IndicatorDescriptor`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::StatusTints;
use crate::drawable::Drawable;
use crate::presence::ClientStatus;

/// Text inserted before every inline indicator
pub const INLINE_SEPARATOR: &str = " ";

/// Where indicators are being drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderContext {
    /// Name line of the user profile header
    UserProfile,
    /// Rows of the channel member list
    MembersList,
    /// Rows of the direct message list
    DirectMessages,
    /// Rows of the friends list (friends and pending requests)
    FriendsList,
    /// Single status dot after a chat author's name
    ChatStatus,
    /// Platform breakdown after a chat author's name
    ChatStatusPlatforms,
    /// The small status dot the host draws on avatars
    AvatarStatus,
}

impl RenderContext {
    /// Every context
    pub const ALL: [RenderContext; 7] = [
        RenderContext::UserProfile,
        RenderContext::MembersList,
        RenderContext::DirectMessages,
        RenderContext::FriendsList,
        RenderContext::ChatStatus,
        RenderContext::ChatStatusPlatforms,
        RenderContext::AvatarStatus,
    ];

    /// Settings key holding this context's pixel size, if it has one
    #[must_use]
    pub const fn size_key(self) -> Option<&'static str> {
        match self {
            Self::UserProfile => Some("sizeUserProfileInd"),
            Self::MembersList => Some("sizeMembersListInd"),
            Self::DirectMessages => Some("sizeDMsInd"),
            Self::FriendsList => Some("sizeFriendsListInd"),
            Self::ChatStatus => Some("sizeChatStatus"),
            Self::ChatStatusPlatforms => Some("sizeChatStatusPlatform"),
            Self::AvatarStatus => None,
        }
    }
}

impl fmt::Display for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserProfile => "user_profile",
            Self::MembersList => "members_list",
            Self::DirectMessages => "direct_messages",
            Self::FriendsList => "friends_list",
            Self::ChatStatus => "chat_status",
            Self::ChatStatusPlatforms => "chat_status_platforms",
            Self::AvatarStatus => "avatar_status",
        };
        f.write_str(name)
    }
}

/// Settings resolved for one context at bind time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Platform icons replace the avatar status dot
    pub avatar_status: bool,
    /// Avatar dots use the filled variant set
    pub filled_colors: bool,
    /// Single status dot after chat author names
    pub chat_status: bool,
    /// Platform breakdown after chat author names
    pub chat_status_platforms: bool,
    /// Pixel size for this context
    pub size: u32,
    /// Tint overrides
    pub tints: StatusTints,
    /// Radial overlay enabled for this context
    pub radial: bool,
    /// Avatars are square, so overlays use the rectangular ring
    pub square: bool,
}

/// Which glyph a descriptor carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    /// Phone glyph
    Mobile,
    /// Monitor glyph
    Desktop,
    /// Globe glyph
    Web,
    /// Status dot for the overall status
    Status,
}

/// One icon to draw, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorDescriptor {
    /// Glyph kind
    pub kind: IndicatorKind,
    /// Status the tint denotes
    pub status: ClientStatus,
    /// Tinted icon; a clone the host may keep
    pub icon: Drawable,
    /// Height in pixels
    pub pixel_size: u32,
    /// Width in pixels
    pub pixel_width: u32,
}

impl IndicatorDescriptor {
    /// Square descriptor
    #[must_use]
    pub fn new(kind: IndicatorKind, status: ClientStatus, icon: &Drawable, size: u32) -> Self {
        Self {
            kind,
            status,
            icon: icon.clone(),
            pixel_size: size,
            pixel_width: size,
        }
    }

    /// Builder: override the width
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.pixel_width = width;
        self
    }
}
