//! Presence Core - Per-Platform Presence Indicators for Chat Clients
//!
//! This crate decides which presence icons a chat client draws next to a user
//! (mobile, desktop, web), in which order, at which size and in which color,
//! and which status ring sits behind their avatar. It is independent of any
//! UI toolkit; the host supplies views, asset loading and method interception
//! through the traits in [`host`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           Host client                             │
//! │   member rows · DM rows · friends · profile header · chat rows    │
//! │                  │ bind (presence, views)                         │
//! └──────────────────┼───────────────────────────────────────────────┘
//!                    │
//! ┌──────────────────┼───────────────────────────────────────────────┐
//! │                  ▼          PRESENCE CORE                         │
//! │  ┌──────────────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │     Adapters     │──►│   Composer   │──►│   Descriptors    │  │
//! │  │ (one per bind)   │   │   Resolver   │   │   RadialOverlay  │  │
//! │  └────────┬─────────┘   │   Radial     │   └──────────────────┘  │
//! │           │             └──────┬───────┘                          │
//! │           ▼                    ▼                                  │
//! │  ┌──────────────────┐   ┌──────────────┐                          │
//! │  │ Settings (live)  │   │ VariantCache │ ◄── rebuilt on tint change│
//! │  └──────────────────┘   └──────────────┘                          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`PresencePlugin`]: start/stop, hook registration, settings changes
//! - [`Engine`]: settings + variant cache shared by every hook
//! - [`compose`]: the ordered indicators for one context
//! - [`radial::select`]: the avatar ring for one status
//! - [`VariantCache`]: tinted icon variants, swapped as a unit
//!
//! # Quick Start
//!
//! ```
//! use presence_core::{
//!     BundledAssets, ClientStatus, ClientStatuses, Engine, IconTemplates, PresenceSnapshot,
//!     RenderContext, Settings,
//! };
//!
//! let engine = Engine::from_settings(
//!     Settings::default(),
//!     IconTemplates::load(&BundledAssets::generated()),
//!     false,
//! );
//! let snapshot = PresenceSnapshot::with_status(ClientStatus::Online).platforms(ClientStatuses {
//!     mobile: Some(ClientStatus::Online),
//!     web: Some(ClientStatus::Idle),
//!     ..ClientStatuses::default()
//! });
//!
//! let indicators = engine.compose(RenderContext::MembersList, &snapshot);
//! assert_eq!(indicators.len(), 1); // the web icon; the phone is on the avatar
//! ```
//!
//! # Module Overview
//!
//! - [`presence`]: client status data model
//! - [`drawable`]: immutable icons and colors
//! - [`assets`]: template loading
//! - [`cache`]: tinted variant sets
//! - [`resolver`]: per-platform activity
//! - [`display`]: render contexts and descriptors
//! - [`composer`]: indicator composition
//! - [`radial`]: avatar ring selection
//! - [`settings`]: typed settings and per-context resolution
//! - [`config`]: TOML settings file
//! - [`host`]: host integration traits
//! - [`engine`]: shared bind-time state
//! - [`adapters`]: per-view bind functions
//! - [`plugin`]: lifecycle and hook groups
//!
//! # Threading
//!
//! Every operation runs synchronously on the host's render thread. Nothing
//! here spawns, sleeps or blocks; shared state uses `parking_lot` locks only
//! so hooks can be `Send + Sync`.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod assets;
pub mod cache;
pub mod composer;
pub mod config;
pub mod display;
pub mod drawable;
pub mod engine;
pub mod host;
pub mod plugin;
pub mod presence;
pub mod radial;
pub mod resolver;
pub mod settings;

// Re-exports for convenience
pub use adapters::BindError;
pub use assets::{AssetError, AssetProvider, BundledAssets, IconTemplates};
pub use cache::{CacheError, Family, IconVariantSet, StatusTints, VariantCache};
pub use composer::compose;
pub use config::{
    default_settings_path, load_settings, load_settings_from_path, save_settings_to_path,
    ConfigError, ConfigSource, LoadedSettings,
};
pub use display::{DisplayConfig, IndicatorDescriptor, IndicatorKind, RenderContext};
pub use drawable::{Color, Drawable};
pub use engine::Engine;
pub use host::{
    AvatarSurface, BindArgs, BindHook, Host, HookPoint, Interceptor, Notifier, PluginRegistry,
    StatusSurface, TextSurface, UnpatchToken, ViewId, ViewTree,
};
pub use plugin::{HookGroup, PresencePlugin};
pub use presence::{ClientStatus, ClientStatuses, Platform, PresenceSnapshot};
pub use radial::{Padding, RadialOverlay};
pub use resolver::{resolve, ResolvedStatus};
pub use settings::{SettingEffect, SettingKey, SettingValue, Settings, SettingsError};
