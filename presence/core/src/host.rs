//! Host integration surface
//!
//! Everything the engine needs from the chat client it runs inside, expressed
//! as traits so the core never depends on a concrete UI toolkit:
//!
//! - [`ViewTree`] hands out the views of the row or header being bound
//! - [`Interceptor`] installs a callback after a host method and returns an
//!   [`UnpatchToken`] that removes it
//! - [`PluginRegistry`] and [`Notifier`] cover conflict handling
//! - [`AssetProvider`] supplies icon templates
//!
//! A host implements all four and gets [`Host`] for free.

use std::fmt;
use std::sync::Arc;

use crate::assets::AssetProvider;
use crate::display::{IndicatorDescriptor, INLINE_SEPARATOR};
use crate::drawable::Drawable;
use crate::presence::PresenceSnapshot;
use crate::radial::{Padding, RadialOverlay};

/// Host view identifiers the adapters look up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// Username line (profile header and member rows)
    UsernameText,
    /// Member row avatar
    MemberAvatar,
    /// DM row name
    PrivateChannelName,
    /// DM row avatar
    PrivateChannelAvatar,
    /// Friends / pending row name
    FriendName,
    /// Friends / pending row avatar
    FriendAvatar,
    /// Profile header avatar
    ProfileAvatar,
    /// Chat message author name
    ChatAuthorName,
    /// Chat message author avatar
    ChatAuthorAvatar,
}

impl ViewId {
    /// Resource name the host registers this view under
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::UsernameText => "username_text",
            Self::MemberAvatar => "channel_members_list_item_avatar",
            Self::PrivateChannelName => "channels_list_item_private_name",
            Self::PrivateChannelAvatar => "channels_list_item_private_avatar",
            Self::FriendName => "friends_list_item_name",
            Self::FriendAvatar => "friends_list_item_avatar",
            Self::ProfileAvatar => "avatar_cutout",
            Self::ChatAuthorName => "chat_item_name",
            Self::ChatAuthorAvatar => "chat_item_avatar",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_name())
    }
}

/// A text view that accepts appended content
pub trait TextSurface {
    /// Append plain text
    fn append_text(&mut self, text: &str);

    /// Append an inline icon drawn at `width` x `height` pixels
    fn append_icon(&mut self, icon: &Drawable, width: u32, height: u32);
}

/// An avatar image view
pub trait AvatarSurface {
    /// Set the view padding
    fn set_padding(&mut self, padding: Padding);

    /// Set or clear the background drawn behind the avatar
    fn set_background(&mut self, background: Option<Drawable>);
}

/// The host's small status dot view
pub trait StatusSurface {
    /// Replace the image shown
    fn set_image(&mut self, image: Drawable);
}

/// Views of the item currently being bound
pub trait ViewTree {
    /// Text view by id
    fn text_view(&mut self, id: ViewId) -> Option<&mut dyn TextSurface>;

    /// Avatar view by id
    fn avatar_view(&mut self, id: ViewId) -> Option<&mut dyn AvatarSurface>;

    /// The status dot view, when the bound item is one
    fn status_view(&mut self) -> Option<&mut dyn StatusSurface>;
}

/// Host methods the engine hooks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Status dot receives a presence
    StatusViewSetPresence,
    /// Profile header name line is configured
    UserProfileHeaderPrimaryName,
    /// Member list row is bound
    MembersListBind,
    /// DM list row is configured
    PrivateChannelConfigure,
    /// Friends list row is configured
    FriendConfigure,
    /// Pending request row is configured
    PendingFriendConfigure,
    /// Chat message row is configured
    ChatMessageConfigure,
    /// Profile header avatar receives a presence
    AvatarPresenceViewBind,
}

impl HookPoint {
    /// Host-side method signature
    #[must_use]
    pub const fn signature(self) -> &'static str {
        match self {
            Self::StatusViewSetPresence => "StatusView.setPresence(Presence)",
            Self::UserProfileHeaderPrimaryName => {
                "UserProfileHeaderView.configurePrimaryName(UserProfileHeaderViewModel.ViewState.Loaded)"
            }
            Self::MembersListBind => {
                "ChannelMembersListViewHolderMember.bind(ChannelMembersListAdapter.Item.Member, Function0)"
            }
            Self::PrivateChannelConfigure => {
                "WidgetChannelsListAdapter.ItemChannelPrivate.onConfigure(int, ChannelListItem)"
            }
            Self::FriendConfigure => {
                "WidgetFriendsListAdapter.ItemUser.onConfigure(int, FriendsListViewModel.Item)"
            }
            Self::PendingFriendConfigure => {
                "WidgetFriendsListAdapter.ItemPendingUser.onConfigure(int, FriendsListViewModel.Item)"
            }
            Self::ChatMessageConfigure => {
                "WidgetChatListAdapterItemMessage.onConfigure(int, ChatListEntry)"
            }
            Self::AvatarPresenceViewBind => "UserAvatarPresenceView.a(UserAvatarPresenceView.a)",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

/// What a hook receives when the host binds an item
pub struct BindArgs<'a> {
    /// Presence of the user shown, if the host has one
    pub presence: Option<&'a PresenceSnapshot>,
    /// Views of the item
    pub views: &'a mut dyn ViewTree,
}

impl<'a> BindArgs<'a> {
    /// Bind arguments for one item
    pub fn new(presence: Option<&'a PresenceSnapshot>, views: &'a mut dyn ViewTree) -> Self {
        Self { presence, views }
    }
}

/// Callback installed at a [`HookPoint`]
pub type BindHook = Arc<dyn Fn(&mut BindArgs<'_>) + Send + Sync>;

/// Removes one installed hook when consumed
pub struct UnpatchToken {
    point: HookPoint,
    unpatch: Box<dyn FnOnce() + Send>,
}

impl UnpatchToken {
    /// Token that runs `unpatch` when consumed
    pub fn new(point: HookPoint, unpatch: impl FnOnce() + Send + 'static) -> Self {
        Self {
            point,
            unpatch: Box::new(unpatch),
        }
    }

    /// Hook point this token removes
    #[must_use]
    pub fn point(&self) -> HookPoint {
        self.point
    }

    /// Remove the hook
    pub fn unpatch(self) {
        tracing::trace!(point = ?self.point, "Unpatching hook");
        (self.unpatch)();
    }
}

impl fmt::Debug for UnpatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnpatchToken")
            .field("point", &self.point)
            .finish_non_exhaustive()
    }
}

/// Method interception
pub trait Interceptor {
    /// Run `hook` after every call of the method at `point`
    fn intercept(&mut self, point: HookPoint, hook: BindHook) -> UnpatchToken;
}

/// Other plugins installed in the host
pub trait PluginRegistry {
    /// Whether the named plugin is enabled
    fn is_enabled(&self, name: &str) -> bool;

    /// Disable the named plugin
    fn disable(&mut self, name: &str);
}

/// User-facing notices
pub trait Notifier {
    /// Show a toast; `long` selects the long duration
    fn show_toast(&mut self, message: &str, long: bool);
}

/// Everything the plugin needs from its host
pub trait Host: Interceptor + PluginRegistry + Notifier + AssetProvider {}

impl<T: Interceptor + PluginRegistry + Notifier + AssetProvider + ?Sized> Host for T {}

/// Append indicators to a text view, each preceded by the separator
pub fn append_inline(view: &mut dyn TextSurface, indicators: &[IndicatorDescriptor]) {
    for indicator in indicators {
        view.append_text(INLINE_SEPARATOR);
        view.append_icon(&indicator.icon, indicator.pixel_width, indicator.pixel_size);
    }
}

/// Apply an overlay, clearing what the view showed before
pub fn apply_overlay(view: &mut dyn AvatarSurface, overlay: &RadialOverlay) {
    view.set_padding(overlay.padding);
    view.set_background(overlay.background.clone());
}
