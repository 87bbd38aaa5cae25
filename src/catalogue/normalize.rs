use super::Style;

/// Names every font carries for housekeeping glyphs, never emitted
const RESERVED_NAMES: [&str; 3] = [".notdef", ".null", "nonmarkingreturn"];

/// Icon font naming convention prefix, dropped from identifiers
const ICON_PREFIX: &str = "ic_fluent_";

/// Prepended to identifiers that would otherwise start with a digit
pub const DIGIT_FILLER: &str = "Glyph";

/// A glyph name split into its style and a constant-safe identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub style: Style,
    pub identifier: String,
}

/// Normalizes a raw PostScript glyph name.
///
/// Returns `None` for empty and reserved names, and for names that leave
/// nothing behind once punctuation is stripped.
///
/// # Examples
///
/// ```
/// use glyphmap::catalogue::{Style, normalize::normalize_glyph_name};
///
/// let name = normalize_glyph_name("ic_fluent_arrow_left_filled").unwrap();
/// assert_eq!(name.style, Style::Filled);
/// assert_eq!(name.identifier, "ArrowLeft");
/// ```
pub fn normalize_glyph_name(raw: &str) -> Option<NormalizedName> {
    if raw.is_empty() || RESERVED_NAMES.contains(&raw) {
        return None;
    }

    let (style, rest) = split_style(raw);
    let rest = strip_prefix_ignore_case(rest, ICON_PREFIX).unwrap_or(rest);

    let mut identifier = pascal_case(rest);
    if identifier.is_empty() {
        return None;
    }
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert_str(0, DIGIT_FILLER);
    }

    Some(NormalizedName { style, identifier })
}

/// Joins `_`, `-` and `.` separated segments into PascalCase, dropping
/// anything that is not an ASCII letter or digit
pub fn pascal_case(name: &str) -> String {
    name.split(['_', '-', '.'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            // identifiers stay ASCII, so a name like `é_filled` comes out
            // empty and is rejected
            title_case(segment)
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .collect()
}

fn title_case(segment: &str) -> String {
    let lower = segment.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_style(name: &str) -> (Style, &str) {
    for style in Style::ALL {
        let suffix = style.suffix();
        if let Some(rest) = strip_suffix_ignore_case(name, suffix) {
            return (style, rest);
        }
    }
    (Style::Regular, name)
}

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &name[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &name[..split])
}
