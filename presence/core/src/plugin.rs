//! Plugin lifecycle
//!
//! [`PresencePlugin`] owns the running [`Engine`] and every installed hook.
//! Hooks are installed in [`HookGroup`]s so a settings change only
//! re-registers the group it affects.
//!
//! # Lifecycle
//!
//! ```text
//! start ──► conflict check ──► load templates ──► build variants
//!                                                       │
//!          ┌────────────────────────────────────────────┘
//!          ▼
//!     register every group ──► (apply_setting: rebuild / rehook)* ──► stop
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::adapters::{
    bind_chat_avatar, bind_chat_platforms, bind_chat_status, bind_dm_row, bind_friend_row,
    bind_member_row, bind_profile_avatar, bind_profile_header, bind_status_view, Adapter,
};
use crate::assets::IconTemplates;
use crate::engine::Engine;
use crate::host::{BindArgs, BindHook, Host, HookPoint, UnpatchToken};
use crate::settings::{SettingEffect, SettingKey, SettingValue, Settings, SettingsError};

/// Plugin that draws over the same views and must not run alongside
pub const CONFLICTING_PLUGIN: &str = "BetterStatus";

/// Plugin whose presence means avatars are square
pub const SQUARE_AVATARS_PLUGIN: &str = "SquareAvatars";

/// Toast shown when the conflicting plugin is disabled
pub const CONFLICT_NOTICE: &str =
    "Presence indicators disabled BetterStatus for you as the two plugins are incompatible.";

/// Hooks that are registered and removed together
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookGroup {
    /// Avatar status dot replacement
    StatusView,
    /// Member list rows
    MembersList,
    /// Profile header name
    UserProfile,
    /// DM list rows
    DirectMessages,
    /// Friends and pending request rows
    FriendsList,
    /// Chat author status dot
    ChatStatus,
    /// Chat author platform breakdown
    ChatStatusPlatforms,
    /// Profile and chat avatar rings
    Radial,
}

impl HookGroup {
    /// Every group, in registration order
    pub const ALL: [HookGroup; 8] = [
        HookGroup::StatusView,
        HookGroup::MembersList,
        HookGroup::UserProfile,
        HookGroup::DirectMessages,
        HookGroup::FriendsList,
        HookGroup::ChatStatus,
        HookGroup::ChatStatusPlatforms,
        HookGroup::Radial,
    ];

    /// Hooks this group installs under `settings`
    ///
    /// Groups gated by a registration-time toggle install nothing when it is
    /// off.
    #[must_use]
    pub fn hooks(self, settings: &Settings) -> Vec<(HookPoint, Adapter)> {
        match self {
            Self::StatusView if settings.replaces_avatar_dot() => {
                vec![(HookPoint::StatusViewSetPresence, bind_status_view as Adapter)]
            }
            Self::MembersList => vec![(HookPoint::MembersListBind, bind_member_row as Adapter)],
            Self::UserProfile => vec![(
                HookPoint::UserProfileHeaderPrimaryName,
                bind_profile_header as Adapter,
            )],
            Self::DirectMessages => {
                vec![(HookPoint::PrivateChannelConfigure, bind_dm_row as Adapter)]
            }
            Self::FriendsList => vec![
                (HookPoint::FriendConfigure, bind_friend_row as Adapter),
                (HookPoint::PendingFriendConfigure, bind_friend_row as Adapter),
            ],
            Self::ChatStatus if settings.chat_status => {
                vec![(HookPoint::ChatMessageConfigure, bind_chat_status as Adapter)]
            }
            Self::ChatStatusPlatforms if settings.chat_status_platforms => vec![(
                HookPoint::ChatMessageConfigure,
                bind_chat_platforms as Adapter,
            )],
            Self::Radial if settings.radial_status => {
                let mut hooks = Vec::with_capacity(2);
                if settings.radial_status_user_profile {
                    hooks.push((HookPoint::AvatarPresenceViewBind, bind_profile_avatar as Adapter));
                }
                if settings.radial_status_chat {
                    hooks.push((HookPoint::ChatMessageConfigure, bind_chat_avatar as Adapter));
                }
                hooks
            }
            _ => Vec::new(),
        }
    }
}

/// Wrap an adapter so bind errors stop at the hook boundary
fn make_hook(engine: &Arc<Engine>, point: HookPoint, adapter: Adapter) -> BindHook {
    let engine = Arc::clone(engine);
    Arc::new(move |args: &mut BindArgs<'_>| {
        if let Err(e) = adapter(&engine, args) {
            tracing::debug!(point = ?point, error = %e, "Skipping bind");
        }
    })
}

/// The presence indicators plugin
#[derive(Debug)]
pub struct PresencePlugin {
    settings: Arc<RwLock<Settings>>,
    engine: Option<Arc<Engine>>,
    hooks: HashMap<HookGroup, Vec<UnpatchToken>>,
}

impl PresencePlugin {
    /// Plugin over `settings`; nothing is installed until [`start`](Self::start)
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            engine: None,
            hooks: HashMap::new(),
        }
    }

    /// Start the plugin inside `host`
    ///
    /// Restarting a running plugin stops it first.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.is_running() {
            self.stop();
        }

        if host.is_enabled(CONFLICTING_PLUGIN) {
            tracing::warn!(plugin = CONFLICTING_PLUGIN, "Disabling conflicting plugin");
            host.show_toast(CONFLICT_NOTICE, true);
            host.disable(CONFLICTING_PLUGIN);
        }

        let templates = IconTemplates::load(&*host);
        let square_avatars = host.is_enabled(SQUARE_AVATARS_PLUGIN);
        self.engine = Some(Arc::new(Engine::new(
            Arc::clone(&self.settings),
            templates,
            square_avatars,
        )));

        for group in HookGroup::ALL {
            self.register(group, host);
        }

        tracing::info!(
            square_avatars,
            hooks = self.hook_count(),
            "Presence indicators started"
        );
    }

    /// Remove every hook; a no-op when not running
    pub fn stop(&mut self) {
        let mut removed = 0usize;
        for (_, tokens) in self.hooks.drain() {
            for token in tokens {
                token.unpatch();
                removed += 1;
            }
        }
        if self.engine.take().is_some() {
            tracing::info!(hooks = removed, "Presence indicators stopped");
        }
    }

    /// (Re)install one hook group
    ///
    /// Existing hooks of the group are removed first. Does nothing unless
    /// running.
    pub fn register<H: Host + ?Sized>(&mut self, group: HookGroup, host: &mut H) {
        let Some(engine) = self.engine.clone() else {
            return;
        };
        if let Some(tokens) = self.hooks.remove(&group) {
            for token in tokens {
                token.unpatch();
            }
        }

        let hooks = group.hooks(&self.settings.read());
        let tokens: Vec<UnpatchToken> = hooks
            .into_iter()
            .map(|(point, adapter)| host.intercept(point, make_hook(&engine, point, adapter)))
            .collect();

        tracing::debug!(group = ?group, hooks = tokens.len(), "Registered hook group");
        if !tokens.is_empty() {
            self.hooks.insert(group, tokens);
        }
    }

    /// Store a setting and apply its effect to the running plugin
    ///
    /// # Errors
    ///
    /// Returns the [`SettingsError`] for unknown keys or invalid values; the
    /// stored settings are unchanged in that case.
    pub fn apply_setting<H: Host + ?Sized>(
        &mut self,
        key: &str,
        value: SettingValue,
        host: &mut H,
    ) -> Result<SettingEffect, SettingsError> {
        let effect = self.settings.write().set_by_name(key, value)?;
        tracing::debug!(key, value = %value, "Setting changed");
        self.apply_effect(effect, host);
        Ok(effect)
    }

    /// Restore a setting's default and apply the effect
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownKey`] for unrecognised keys.
    pub fn reset_setting<H: Host + ?Sized>(
        &mut self,
        key: &str,
        host: &mut H,
    ) -> Result<SettingEffect, SettingsError> {
        let key =
            SettingKey::parse(key).ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        let effect = self.settings.write().reset(key);
        self.apply_effect(effect, host);
        Ok(effect)
    }

    fn apply_effect<H: Host + ?Sized>(&mut self, effect: SettingEffect, host: &mut H) {
        if effect.rebuild_variants {
            if let Some(engine) = &self.engine {
                engine.rebuild_variants();
            }
        }
        if let Some(group) = effect.rehook {
            self.register(group, host);
        }
    }

    /// Whether hooks are installed
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.engine.is_some()
    }

    /// The running engine
    #[must_use]
    pub fn engine(&self) -> Option<&Arc<Engine>> {
        self.engine.as_ref()
    }

    /// Snapshot of the current settings
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Number of installed hooks
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }

    /// Installed hook points of one group
    #[must_use]
    pub fn hook_points(&self, group: HookGroup) -> Vec<HookPoint> {
        self.hooks
            .get(&group)
            .map(|tokens| tokens.iter().map(UnpatchToken::point).collect())
            .unwrap_or_default()
    }
}

impl Drop for PresencePlugin {
    fn drop(&mut self) {
        self.stop();
    }
}
