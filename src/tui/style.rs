//! Colors and glyphs for the fact cards and the start menu

use ratatui::style::Color;

/// Start-menu glyph for a domain
pub fn domain_emoji(domain: &str) -> &'static str {
    match domain {
        "Space" => "🚀",
        "Animals" => "🦁",
        "Machines" => "🤖",
        "Outdoors" => "🌲",
        "Food" => "🍎",
        "Human Body" => "🫀",
        "Sports" => "⚽",
        _ => "❓",
    }
}

/// Start-menu accent for a domain
pub fn domain_color(domain: &str) -> Color {
    match domain {
        "Space" => Color::Indexed(99),     // indigo
        "Animals" => Color::Indexed(208),  // orange
        "Machines" => Color::Indexed(103), // slate
        "Outdoors" => Color::Indexed(35),  // emerald
        "Food" => Color::LightRed,
        "Human Body" => Color::Indexed(204), // rose
        "Sports" => Color::LightBlue,
        _ => Color::Gray,
    }
}

/// Map a presentation hint to a terminal color.
///
/// Accepts bare palette tokens (`blue`) and Tailwind-style classes
/// (`bg-blue-100`). Anything unrecognised gets a neutral color.
pub fn hint_color(hint: &str) -> Color {
    let token = hint
        .trim()
        .to_ascii_lowercase()
        .split('-')
        .find(|part| !part.is_empty() && *part != "bg" && !part.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .unwrap_or_default();

    match token.as_str() {
        "blue" | "sky" => Color::LightBlue,
        "green" => Color::LightGreen,
        "emerald" | "teal" => Color::Indexed(35),
        "yellow" | "amber" => Color::LightYellow,
        "purple" | "violet" => Color::LightMagenta,
        "orange" => Color::Indexed(208),
        "rose" | "pink" | "red" => Color::Indexed(204),
        "indigo" => Color::Indexed(99),
        "slate" | "gray" | "grey" => Color::Indexed(103),
        _ => Color::White,
    }
}
