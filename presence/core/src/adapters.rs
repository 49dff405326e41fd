//! View injection adapters
//!
//! One function per host bind site. Each looks up its views, asks the
//! [`Engine`] what to draw for its [`RenderContext`] and writes the result
//! into the views. No decision logic lives here.
//!
//! Views are checked before anything is written, so a bind with a missing
//! view changes nothing.

use thiserror::Error;

use crate::display::RenderContext;
use crate::engine::Engine;
use crate::host::{append_inline, apply_overlay, BindArgs, ViewId};
use crate::presence::{ClientStatus, PresenceSnapshot};

/// Errors inside a single bind
///
/// Never leave the hook; the plugin logs them and the bind is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindError {
    /// The host did not provide a view the adapter writes to
    #[error("view `{0}` not found")]
    MissingView(ViewId),

    /// The bound item has no status dot view
    #[error("status view not found")]
    MissingStatusView,
}

/// Signature shared by every adapter
pub type Adapter = fn(&Engine, &mut BindArgs<'_>) -> Result<(), BindError>;

fn status_of(presence: Option<&PresenceSnapshot>) -> Option<ClientStatus> {
    presence.and_then(|p| p.status)
}

/// Inline indicators after a name
fn bind_inline(
    engine: &Engine,
    args: &mut BindArgs<'_>,
    context: RenderContext,
    name: ViewId,
) -> Result<(), BindError> {
    let Some(presence) = args.presence else {
        return Ok(());
    };
    let view = args
        .views
        .text_view(name)
        .ok_or(BindError::MissingView(name))?;
    let indicators = engine.compose(context, presence);
    append_inline(view, &indicators);
    Ok(())
}

/// Radial overlay on an avatar, applied even without a status so recycled
/// views lose their previous ring
fn bind_radial(
    engine: &Engine,
    args: &mut BindArgs<'_>,
    context: RenderContext,
    avatar: ViewId,
) -> Result<(), BindError> {
    let Some(overlay) = engine.overlay(context, status_of(args.presence)) else {
        return Ok(());
    };
    let view = args
        .views
        .avatar_view(avatar)
        .ok_or(BindError::MissingView(avatar))?;
    apply_overlay(view, &overlay);
    Ok(())
}

/// List rows: name indicators plus the bind-time radial toggle
fn bind_row(
    engine: &Engine,
    args: &mut BindArgs<'_>,
    context: RenderContext,
    name: ViewId,
    avatar: ViewId,
) -> Result<(), BindError> {
    let overlay = engine.overlay(context, status_of(args.presence));
    if overlay.is_some() && args.views.avatar_view(avatar).is_none() {
        return Err(BindError::MissingView(avatar));
    }
    if args.presence.is_some() && args.views.text_view(name).is_none() {
        return Err(BindError::MissingView(name));
    }

    bind_inline(engine, args, context, name)?;
    if let (Some(overlay), Some(view)) = (overlay, args.views.avatar_view(avatar)) {
        apply_overlay(view, &overlay);
    }
    Ok(())
}

/// Profile header name line
///
/// # Errors
///
/// [`BindError::MissingView`] when the host has no name view.
pub fn bind_profile_header(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    bind_inline(engine, args, RenderContext::UserProfile, ViewId::UsernameText)
}

/// Profile header avatar ring (always circular)
///
/// # Errors
///
/// [`BindError::MissingView`] when the host has no avatar view.
pub fn bind_profile_avatar(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    bind_radial(engine, args, RenderContext::UserProfile, ViewId::ProfileAvatar)
}

/// Member list row
///
/// # Errors
///
/// [`BindError::MissingView`] when a view the row needs is absent.
pub fn bind_member_row(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    bind_row(
        engine,
        args,
        RenderContext::MembersList,
        ViewId::UsernameText,
        ViewId::MemberAvatar,
    )
}

/// Direct message list row
///
/// # Errors
///
/// [`BindError::MissingView`] when a view the row needs is absent.
pub fn bind_dm_row(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    bind_row(
        engine,
        args,
        RenderContext::DirectMessages,
        ViewId::PrivateChannelName,
        ViewId::PrivateChannelAvatar,
    )
}

/// Friends list row, used for both friends and pending requests
///
/// # Errors
///
/// [`BindError::MissingView`] when a view the row needs is absent.
pub fn bind_friend_row(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    bind_row(
        engine,
        args,
        RenderContext::FriendsList,
        ViewId::FriendName,
        ViewId::FriendAvatar,
    )
}

/// Status dot after a chat author's name
///
/// # Errors
///
/// [`BindError::MissingView`] when the author name view is absent.
pub fn bind_chat_status(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    bind_inline(engine, args, RenderContext::ChatStatus, ViewId::ChatAuthorName)
}

/// Platform breakdown after a chat author's name
///
/// # Errors
///
/// [`BindError::MissingView`] when the author name view is absent.
pub fn bind_chat_platforms(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    bind_inline(
        engine,
        args,
        RenderContext::ChatStatusPlatforms,
        ViewId::ChatAuthorName,
    )
}

/// Ring behind a chat author's avatar
///
/// # Errors
///
/// [`BindError::MissingView`] when the author avatar view is absent.
pub fn bind_chat_avatar(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    bind_radial(engine, args, RenderContext::ChatStatus, ViewId::ChatAuthorAvatar)
}

/// Replacement for the host's avatar status dot
///
/// Leaves the host's image alone when nothing replaces it.
///
/// # Errors
///
/// [`BindError::MissingStatusView`] when a replacement exists but the item
/// has no status view.
pub fn bind_status_view(engine: &Engine, args: &mut BindArgs<'_>) -> Result<(), BindError> {
    let Some(presence) = args.presence else {
        return Ok(());
    };
    let Some(dot) = engine
        .compose(RenderContext::AvatarStatus, presence)
        .into_iter()
        .next()
    else {
        return Ok(());
    };
    args.views
        .status_view()
        .ok_or(BindError::MissingStatusView)?
        .set_image(dot.icon);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use parking_lot::RwLock;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::assets::{BundledAssets, IconTemplates};
    use crate::drawable::Drawable;
    use crate::host::{AvatarSurface, StatusSurface, TextSurface, ViewTree};
    use crate::presence::ClientStatuses;
    use crate::radial::Padding;
    use crate::settings::Settings;

    #[derive(Default)]
    struct Text(Vec<String>);

    impl TextSurface for Text {
        fn append_text(&mut self, text: &str) {
            self.0.push(text.to_string());
        }

        fn append_icon(&mut self, icon: &Drawable, width: u32, height: u32) {
            self.0.push(format!("{}@{width}x{height}", icon.name()));
        }
    }

    #[derive(Default)]
    struct Avatar {
        padding: Padding,
        background: Option<Drawable>,
    }

    impl AvatarSurface for Avatar {
        fn set_padding(&mut self, padding: Padding) {
            self.padding = padding;
        }

        fn set_background(&mut self, background: Option<Drawable>) {
            self.background = background;
        }
    }

    #[derive(Default)]
    struct Status(Option<Drawable>);

    impl StatusSurface for Status {
        fn set_image(&mut self, image: Drawable) {
            self.0 = Some(image);
        }
    }

    #[derive(Default)]
    struct Views {
        texts: HashMap<ViewId, Text>,
        avatars: HashMap<ViewId, Avatar>,
        status: Option<Status>,
    }

    impl Views {
        fn with_text(mut self, id: ViewId) -> Self {
            self.texts.insert(id, Text::default());
            self
        }

        fn with_avatar(mut self, id: ViewId) -> Self {
            self.avatars.insert(id, Avatar::default());
            self
        }
    }

    impl ViewTree for Views {
        fn text_view(&mut self, id: ViewId) -> Option<&mut dyn TextSurface> {
            self.texts.get_mut(&id).map(|v| v as &mut dyn TextSurface)
        }

        fn avatar_view(&mut self, id: ViewId) -> Option<&mut dyn AvatarSurface> {
            self.avatars.get_mut(&id).map(|v| v as &mut dyn AvatarSurface)
        }

        fn status_view(&mut self) -> Option<&mut dyn StatusSurface> {
            self.status.as_mut().map(|v| v as &mut dyn StatusSurface)
        }
    }

    fn engine(settings: Settings) -> Engine {
        Engine::new(
            Arc::new(RwLock::new(settings)),
            IconTemplates::load(&BundledAssets::generated()),
            false,
        )
    }

    fn mobile_and_web() -> PresenceSnapshot {
        PresenceSnapshot::with_status(ClientStatus::Online).platforms(ClientStatuses {
            mobile: Some(ClientStatus::Online),
            desktop: None,
            web: Some(ClientStatus::Idle),
        })
    }

    #[test]
    fn test_member_row_appends_and_rings() {
        let engine = engine(Settings::default());
        let presence = mobile_and_web();
        let mut views = Views::default()
            .with_text(ViewId::UsernameText)
            .with_avatar(ViewId::MemberAvatar);

        bind_member_row(&engine, &mut BindArgs::new(Some(&presence), &mut views)).unwrap();

        // Avatar mode: the phone is left to the avatar dot
        assert_eq!(
            views.texts[&ViewId::UsernameText].0,
            vec![" ".to_string(), "ic_web@24x24".to_string()]
        );
        let avatar = &views.avatars[&ViewId::MemberAvatar];
        assert_eq!(avatar.padding, Padding::uniform(8));
        assert!(avatar.background.is_some());
    }

    #[test]
    fn test_missing_avatar_view_skips_whole_bind() {
        let engine = engine(Settings::default());
        let presence = mobile_and_web();
        let mut views = Views::default().with_text(ViewId::PrivateChannelName);

        let result = bind_dm_row(&engine, &mut BindArgs::new(Some(&presence), &mut views));

        assert_eq!(
            result,
            Err(BindError::MissingView(ViewId::PrivateChannelAvatar))
        );
        assert!(views.texts[&ViewId::PrivateChannelName].0.is_empty());
    }

    #[test]
    fn test_row_without_radial_needs_no_avatar_view() {
        let mut settings = Settings::default();
        settings.radial_status_friends_list = false;
        let engine = engine(settings);
        let presence = mobile_and_web();
        let mut views = Views::default().with_text(ViewId::FriendName);

        assert!(bind_friend_row(&engine, &mut BindArgs::new(Some(&presence), &mut views)).is_ok());
    }

    #[test]
    fn test_radial_clears_without_presence() {
        let engine = engine(Settings::default());
        let mut views = Views::default().with_avatar(ViewId::ChatAuthorAvatar);
        views
            .avatars
            .get_mut(&ViewId::ChatAuthorAvatar)
            .unwrap()
            .padding = Padding::uniform(8);

        bind_chat_avatar(&engine, &mut BindArgs::new(None, &mut views)).unwrap();

        let avatar = &views.avatars[&ViewId::ChatAuthorAvatar];
        assert_eq!(avatar.padding, Padding::zero());
        assert!(avatar.background.is_none());
    }

    #[test]
    fn test_chat_status_dot() {
        let engine = engine(Settings::default());
        let presence = PresenceSnapshot::with_status(ClientStatus::DoNotDisturb);
        let mut views = Views::default().with_text(ViewId::ChatAuthorName);

        bind_chat_status(&engine, &mut BindArgs::new(Some(&presence), &mut views)).unwrap();

        assert_eq!(
            views.texts[&ViewId::ChatAuthorName].0,
            vec![" ".to_string(), "ic_status_online_16dp@16x16".to_string()]
        );
    }

    #[test]
    fn test_status_view_replaced_with_tinted_phone() {
        let engine = engine(Settings::default());
        let presence = PresenceSnapshot::with_status(ClientStatus::Idle).platforms(ClientStatuses {
            mobile: Some(ClientStatus::Idle),
            ..ClientStatuses::default()
        });
        let mut views = Views {
            status: Some(Status::default()),
            ..Views::default()
        };

        bind_status_view(&engine, &mut BindArgs::new(Some(&presence), &mut views)).unwrap();

        let image = views.status.unwrap().0.unwrap();
        assert_eq!(image.name(), "ic_mobile");
        assert_eq!(image.tint(), Some(crate::cache::DEFAULT_IDLE));
    }

    #[test]
    fn test_status_view_left_alone_without_replacement() {
        let mut settings = Settings::default();
        settings.avatar_status = false;
        let engine = engine(settings);
        let presence = mobile_and_web();
        // No status view at all is fine when nothing replaces the dot
        let mut views = Views::default();
        assert!(bind_status_view(&engine, &mut BindArgs::new(Some(&presence), &mut views)).is_ok());
    }
}
