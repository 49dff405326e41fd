//! Preview report building and formatting

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use presence_core::{
    ClientStatus, Engine, IndicatorDescriptor, IndicatorKind, Padding, PresenceSnapshot,
    RadialOverlay, RenderContext,
};

/// Built-in presences shown when none is given
const SAMPLES: &[(&str, &str)] = &[
    (
        "mobile only",
        r#"{"status":"online","client_statuses":{"mobile":"online"}}"#,
    ),
    (
        "desktop and web",
        r#"{"status":"online","client_statuses":{"desktop":"online","web":"dnd"}}"#,
    ),
    (
        "everywhere",
        r#"{"status":"idle","client_statuses":{"mobile":"dnd","desktop":"idle","web":"online"}}"#,
    ),
    ("no breakdown", r#"{"status":"dnd"}"#),
    ("offline", r#"{"status":"offline","client_statuses":{}}"#),
];

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// Pretty-printed JSON
    Json,
}

/// One drawn icon
#[derive(Debug, Serialize)]
pub struct IconLine {
    kind: IndicatorKind,
    status: ClientStatus,
    icon: String,
    tint: Option<String>,
    width: u32,
    height: u32,
}

impl From<&IndicatorDescriptor> for IconLine {
    fn from(d: &IndicatorDescriptor) -> Self {
        Self {
            kind: d.kind,
            status: d.status,
            icon: d.icon.name().to_string(),
            tint: d.icon.tint().map(|c| c.to_hex()),
            width: d.pixel_width,
            height: d.pixel_size,
        }
    }
}

/// Avatar ring, or its reset
#[derive(Debug, Serialize)]
pub struct RingLine {
    icon: Option<String>,
    tint: Option<String>,
    padding: Padding,
}

impl From<&RadialOverlay> for RingLine {
    fn from(overlay: &RadialOverlay) -> Self {
        Self {
            icon: overlay.background.as_ref().map(|b| b.name().to_string()),
            tint: overlay
                .background
                .as_ref()
                .and_then(|b| b.tint())
                .map(|c| c.to_hex()),
            padding: overlay.padding,
        }
    }
}

/// Result for one presence in one context
#[derive(Debug, Serialize)]
pub struct Entry {
    presence: String,
    context: RenderContext,
    indicators: Vec<IconLine>,
    ring: Option<RingLine>,
}

/// Built-in sample presences
pub fn samples() -> Result<Vec<(String, PresenceSnapshot)>> {
    SAMPLES
        .iter()
        .map(|(name, json)| {
            let snapshot = serde_json::from_str(json)
                .with_context(|| format!("Invalid sample presence `{name}`"))?;
            Ok(((*name).to_string(), snapshot))
        })
        .collect()
}

/// Run every presence through every context
pub fn preview(
    engine: &Engine,
    presences: &[(String, PresenceSnapshot)],
    contexts: &[RenderContext],
) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(presences.len() * contexts.len());
    for (name, snapshot) in presences {
        for &context in contexts {
            let indicators = engine.compose(context, snapshot);
            let ring = match context {
                // The status dot has no ring of its own
                RenderContext::AvatarStatus | RenderContext::ChatStatusPlatforms => None,
                _ => engine.overlay(context, snapshot.status),
            };
            entries.push(Entry {
                presence: name.clone(),
                context,
                indicators: indicators.iter().map(IconLine::from).collect(),
                ring: ring.as_ref().map(RingLine::from),
            });
        }
    }
    entries
}

/// Format a report
pub fn format(entries: &[Entry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(entries)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Text => format_text(entries),
    }
}

fn format_text(entries: &[Entry]) -> Result<String> {
    let mut out = String::new();
    let mut current: Option<&str> = None;
    for entry in entries {
        if current != Some(entry.presence.as_str()) {
            writeln!(out, "== {} ==", entry.presence)?;
            current = Some(entry.presence.as_str());
        }

        write!(out, "  {:<22}", entry.context.to_string())?;
        if entry.indicators.is_empty() {
            write!(out, " -")?;
        }
        for icon in &entry.indicators {
            write!(
                out,
                " {}({} {} {}x{})",
                icon.icon,
                icon.status,
                icon.tint.as_deref().unwrap_or("-"),
                icon.width,
                icon.height
            )?;
        }
        if let Some(ring) = &entry.ring {
            match &ring.icon {
                Some(name) => write!(
                    out,
                    " | ring {name} {} pad {}",
                    ring.tint.as_deref().unwrap_or("-"),
                    ring.padding.left
                )?,
                None => write!(out, " | ring cleared")?,
            }
        }
        writeln!(out)?;
    }
    Ok(out)
}
