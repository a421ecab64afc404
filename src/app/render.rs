//! Terminal rendering of the info card, map frame and toasts.

use colored::{Color, ColoredString, Colorize};

use crate::controller::{ControllerSnapshot, Notification, NotificationKind};
use crate::map::MapFrame;
use crate::storage::ThemePreference;

struct Palette {
    label: Color,
    value: Color,
    accent: Color,
}

fn palette(theme: ThemePreference) -> Palette {
    match theme {
        ThemePreference::Light => Palette {
            label: Color::BrightBlack,
            value: Color::Black,
            accent: Color::Yellow,
        },
        ThemePreference::Dark => Palette {
            label: Color::BrightBlack,
            value: Color::BrightWhite,
            accent: Color::BrightYellow,
        },
    }
}

fn field(label: &str, value: &str, palette: &Palette, highlight: bool) -> String {
    let value: ColoredString = if highlight {
        value.color(palette.accent).bold()
    } else {
        value.color(palette.value)
    };
    format!("  {:<11}{}", label.color(palette.label), value)
}

/// The four-field info card. Values are highlighted during the update pulse.
pub fn render_card(snapshot: &ControllerSnapshot) -> String {
    let palette = palette(snapshot.theme);
    let record = &snapshot.record;
    let pulse = snapshot.just_updated;

    let mut lines = vec![format!(
        "{}{}",
        "IP Address Tracker".color(palette.accent).bold(),
        if snapshot.loading { "  (searching...)" } else { "" }
    )];
    lines.push(field("IP Address", &record.ip, &palette, pulse));
    lines.push(field("Location", &record.location_label(), &palette, pulse));
    lines.push(field("ZIP", &record.region_or_zip, &palette, pulse));
    lines.push(field("ISP", &record.isp, &palette, pulse));
    lines.join("\n")
}

/// Map frame summary with a link to the center tile.
pub fn render_map(frame: &MapFrame, theme: ThemePreference) -> String {
    let palette = palette(theme);
    let position = format!(
        "{:.4}, {:.4} @ zoom {}{}",
        frame.center.latitude,
        frame.center.longitude,
        frame.zoom,
        if frame.recenter.is_some() {
            " (re-centered)"
        } else {
            ""
        }
    );
    [
        field("Map", &position, &palette, false),
        field("Pin", &frame.marker.popup, &palette, false),
        field("Tile", &frame.center_tile_url, &palette, false),
        format!("  {}", frame.tile_layer.attribution.color(palette.label)),
    ]
    .join("\n")
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = format!("[{}]", notification.kind.as_str());
    let tag = match notification.kind {
        NotificationKind::Success => tag.green(),
        NotificationKind::Warning => tag.yellow(),
        NotificationKind::Error => tag.red(),
    };
    format!("{} {}", tag.bold(), notification.message)
}

pub fn render_history(entries: &[String]) -> String {
    if entries.is_empty() {
        return "  (no recent searches)".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("  {}. {}", i + 1, entry))
        .collect::<Vec<_>>()
        .join("\n")
}
