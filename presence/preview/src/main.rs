//! Presence Preview - Standalone Indicator Preview
//!
//! Runs the presence engine outside any chat client, with the bundled icon
//! set, and prints what each render context would draw for a presence.
//!
//! # Usage
//!
//! ```bash
//! # Built-in sample presences, every context
//! presence-preview
//!
//! # One presence, one context
//! presence-preview --presence '{"status":"online","client_statuses":{"mobile":"dnd","web":"online"}}' \
//!     --context members-list
//!
//! # Presence document from a file, JSON output
//! presence-preview --presence-file presence.json --format json
//!
//! # Override settings for this run and persist them
//! presence-preview --set avatarStatus=false --set colorOnline=#43b581 --save
//!
//! # Verbose logging
//! RUST_LOG=debug presence-preview
//! ```

mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use presence_core::{
    default_settings_path, load_settings_from_path, save_settings_to_path, BundledAssets, Color,
    Engine, IconTemplates, PresenceSnapshot, RenderContext, SettingValue, Settings,
};

use render::{preview, OutputFormat};

/// Presence Preview - print the indicators each context would draw
#[derive(Parser, Debug)]
#[command(name = "presence-preview")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file path
    #[arg(short = 'c', long, env = "PRESENCE_INDICATORS_CONFIG", value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Presence as a JSON document
    #[arg(short = 'p', long, value_name = "JSON", conflicts_with = "presence_file")]
    presence: Option<String>,

    /// Presence JSON document read from a file
    #[arg(long, value_name = "FILE")]
    presence_file: Option<PathBuf>,

    /// Render context to preview (default: all)
    #[arg(short = 'x', long, value_enum)]
    context: Option<ContextArg>,

    /// Treat avatars as square
    #[arg(long)]
    square: bool,

    /// Setting override as key=value (repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Write the settings, overrides included, back to the settings file
    #[arg(long)]
    save: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "PRESENCE_INDICATORS_LOG", default_value = "warn")]
    log_level: String,
}

/// Command-line names for render contexts
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ContextArg {
    UserProfile,
    MembersList,
    DirectMessages,
    FriendsList,
    ChatStatus,
    ChatStatusPlatforms,
    AvatarStatus,
}

impl From<ContextArg> for RenderContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::UserProfile => Self::UserProfile,
            ContextArg::MembersList => Self::MembersList,
            ContextArg::DirectMessages => Self::DirectMessages,
            ContextArg::FriendsList => Self::FriendsList,
            ContextArg::ChatStatus => Self::ChatStatus,
            ContextArg::ChatStatusPlatforms => Self::ChatStatusPlatforms,
            ContextArg::AvatarStatus => Self::AvatarStatus,
        }
    }
}

/// Initialize logging
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "presence_preview={level},presence_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse a `key=value` override
///
/// `true`/`false` are booleans, `#RRGGBB`/`#AARRGGBB` are colors, anything
/// else must be an integer.
fn parse_override(raw: &str) -> Result<(String, SettingValue)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("override `{raw}` is not KEY=VALUE");
    };
    let value = value.trim();
    let parsed = match value {
        "true" => SettingValue::Bool(true),
        "false" => SettingValue::Bool(false),
        hex if hex.starts_with('#') => {
            let color =
                Color::from_hex(hex).with_context(|| format!("invalid color `{hex}`"))?;
            SettingValue::Int(i64::from(color.to_argb()))
        }
        int => SettingValue::Int(
            int.parse()
                .with_context(|| format!("value `{int}` for `{key}` is not bool, int or color"))?,
        ),
    };
    Ok((key.trim().to_string(), parsed))
}

/// Presences to preview
fn load_presences(args: &Args) -> Result<Vec<(String, PresenceSnapshot)>> {
    if let Some(json) = &args.presence {
        let snapshot = serde_json::from_str(json).context("Failed to parse --presence")?;
        return Ok(vec![("presence".to_string(), snapshot)]);
    }
    if let Some(path) = &args.presence_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read presence file: {path:?}"))?;
        let snapshot = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse presence file: {path:?}"))?;
        return Ok(vec![(path.display().to_string(), snapshot)]);
    }
    render::samples()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let settings_path = args.settings.clone().or_else(default_settings_path);
    let loaded = load_settings_from_path(settings_path.clone())
        .context("Failed to load settings")?;
    info!(source = %loaded.source, "Settings loaded");

    let mut settings: Settings = loaded.settings;
    for raw in &args.overrides {
        let (key, value) = parse_override(raw)?;
        settings
            .set_by_name(&key, value)
            .with_context(|| format!("Invalid override `{raw}`"))?;
        debug!(key = %key, value = %value, "Applied override");
    }

    if args.save {
        let Some(path) = &settings_path else {
            bail!("No settings path available; pass --settings");
        };
        save_settings_to_path(&settings, path)
            .with_context(|| format!("Failed to save settings to {path:?}"))?;
        info!(path = ?path, "Settings saved");
    }

    let engine = Engine::from_settings(
        settings,
        IconTemplates::load(&BundledAssets::generated()),
        args.square,
    );

    let contexts: Vec<RenderContext> = match args.context {
        Some(context) => vec![context.into()],
        None => RenderContext::ALL.to_vec(),
    };

    let presences = load_presences(&args)?;
    let report = preview(&engine, &presences, &contexts);
    print!("{}", render::format(&report, args.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override_types() {
        assert_eq!(
            parse_override("chatStatus=false").unwrap(),
            ("chatStatus".to_string(), SettingValue::Bool(false))
        );
        assert_eq!(
            parse_override("sizeDMsInd=18").unwrap(),
            ("sizeDMsInd".to_string(), SettingValue::Int(18))
        );
        assert_eq!(
            parse_override("colorIdle=#ffffff").unwrap(),
            ("colorIdle".to_string(), SettingValue::Int(-1))
        );
    }

    #[test]
    fn test_parse_override_rejects_garbage() {
        assert!(parse_override("chatStatus").is_err());
        assert!(parse_override("chatStatus=maybe").is_err());
        assert!(parse_override("colorIdle=#zzz").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "presence-preview",
            "--context",
            "chat-status-platforms",
            "--set",
            "chatStatusPlatforms=true",
            "--format",
            "json",
        ]);
        assert_eq!(args.context, Some(ContextArg::ChatStatusPlatforms));
        assert_eq!(args.overrides.len(), 1);
        assert!(matches!(args.format, OutputFormat::Json));
    }

    #[test]
    fn test_presence_file() {
        use std::ffi::OsStr;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("presence.json");
        std::fs::write(&path, r#"{"status":"idle","client_statuses":{"web":"idle"}}"#).unwrap();

        let args = Args::parse_from([
            OsStr::new("presence-preview"),
            OsStr::new("--presence-file"),
            path.as_os_str(),
        ]);
        let presences = load_presences(&args).unwrap();
        assert_eq!(presences.len(), 1);
        assert_eq!(presences[0].1.status, Some(presence_core::ClientStatus::Idle));
    }
}
