use crate::global_constants::FORBIDDEN_FILENAME_CHARACTERS;

/// Strips characters that are unsafe in filenames on at least one
/// supported platform.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|character| !FORBIDDEN_FILENAME_CHARACTERS.contains(character))
        .collect()
}

pub fn format_bytes(size: usize) -> String {
    const UNITS: &[&str] = &["B", "kB", "MB", "GB"];

    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", size, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
