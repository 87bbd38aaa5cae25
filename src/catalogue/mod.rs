//! Joins codepoints with glyph names into per-style groups of constants.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use crate::tables::{cmap::CodepointMap, post::GlyphNames};

pub mod normalize;

use normalize::normalize_glyph_name;

/// The grouping tag derived from a glyph name's suffix.
///
/// Variants are declared in lexicographic order of their names so that
/// groups keyed by `Style` iterate the same way their names would sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Style {
    Filled,
    Ltr,
    Regular,
    Rtl,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Regular, Style::Filled, Style::Rtl, Style::Ltr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filled => "Filled",
            Self::Ltr => "Ltr",
            Self::Regular => "Regular",
            Self::Rtl => "Rtl",
        }
    }

    /// The glyph name suffix selecting this style, matched case-insensitively
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Filled => "_filled",
            Self::Ltr => "_ltr",
            Self::Regular => "_regular",
            Self::Rtl => "_rtl",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One glyph ready for emission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphEntry {
    /// Unique within its style group, always starts with a letter
    pub constant_name: String,
    pub raw_name: String,
    pub codepoint: u32,
}

impl GlyphEntry {
    /// The codepoint as a string literal escape, `\uXXXX` inside the BMP
    /// and `\UXXXXXXXX` above it
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphmap::catalogue::GlyphEntry;
    ///
    /// let entry = GlyphEntry {
    ///     constant_name: "Home24".into(),
    ///     raw_name: "ic_fluent_home_24_regular".into(),
    ///     codepoint: 0xE700,
    /// };
    /// assert_eq!(entry.escaped(), "\\uE700");
    /// ```
    pub fn escaped(&self) -> String {
        if self.codepoint <= 0xFFFF {
            format!("\\u{:04X}", self.codepoint)
        } else {
            format!("\\U{:08X}", self.codepoint)
        }
    }
}

/// Every emitted glyph of one font, grouped by style
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalogue {
    groups: BTreeMap<Style, Vec<GlyphEntry>>,
}

impl Catalogue {
    pub fn groups(&self) -> &BTreeMap<Style, Vec<GlyphEntry>> {
        &self.groups
    }

    pub fn get(&self, style: Style) -> Option<&[GlyphEntry]> {
        self.groups.get(&style).map(Vec::as_slice)
    }

    pub fn style_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of entries across all groups
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Orders each group ordinally by constant name
    pub fn sort_by_constant_name(&mut self) {
        for entries in self.groups.values_mut() {
            entries.sort_by(|a, b| a.constant_name.cmp(&b.constant_name));
        }
    }
}

impl IntoIterator for Catalogue {
    type Item = (Style, Vec<GlyphEntry>);

    type IntoIter = std::collections::btree_map::IntoIter<Style, Vec<GlyphEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Accumulates glyphs, keeping the first one seen for each
/// (style, identifier) pair
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    seen: HashSet<(Style, String)>,
    catalogue: Catalogue,
}

impl CatalogueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `raw_name` and files it under its style.
    ///
    /// Returns `false` if the name was rejected or collided with an earlier
    /// glyph.
    pub fn push(&mut self, codepoint: u32, raw_name: &str) -> bool {
        let Some(name) = normalize_glyph_name(raw_name) else {
            return false;
        };

        if !self.seen.insert((name.style, name.identifier.clone())) {
            log::debug!(
                "dropping {raw_name} at U+{codepoint:04X}, {} {} already taken",
                name.style,
                name.identifier
            );
            return false;
        }

        self.catalogue
            .groups
            .entry(name.style)
            .or_default()
            .push(GlyphEntry {
                constant_name: name.identifier,
                raw_name: raw_name.to_owned(),
                codepoint,
            });
        true
    }

    /// Walks the codepoint map in order, pushing every codepoint whose glyph
    /// has a name. Codepoints without names are skipped.
    pub fn extend_from_tables(&mut self, codepoints: &CodepointMap, names: &GlyphNames) {
        for (codepoint, glyph) in codepoints {
            if let Some(name) = names.get(glyph) {
                self.push(*codepoint, name);
            }
        }
    }

    /// Returns the groups in insertion order
    pub fn finish(self) -> Catalogue {
        self.catalogue
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(constant_name: &str, raw_name: &str, codepoint: u32) -> GlyphEntry {
        GlyphEntry {
            constant_name: constant_name.into(),
            raw_name: raw_name.into(),
            codepoint,
        }
    }

    #[test]
    fn groups_by_style_in_name_order() {
        let codepoints = CodepointMap::from([(0xE001, 1), (0xE002, 2), (0xE003, 3), (0xE004, 4)]);
        let names = GlyphNames::from([
            (1, "ic_fluent_add_24_regular".to_string()),
            (2, "ic_fluent_add_24_filled".to_string()),
            (3, "ic_fluent_text_rtl".to_string()),
            (4, "ic_fluent_text_ltr".to_string()),
        ]);

        let mut builder = CatalogueBuilder::new();
        builder.extend_from_tables(&codepoints, &names);
        let catalogue = builder.finish();

        let styles = catalogue.groups().keys().map(Style::as_str).collect::<Vec<_>>();
        assert_eq!(styles, vec!["Filled", "Ltr", "Regular", "Rtl"]);
        assert_eq!(
            catalogue.get(Style::Filled).unwrap(),
            &[entry("Add24", "ic_fluent_add_24_filled", 0xE002)]
        );
        assert_eq!(catalogue.len(), 4);
    }

    #[test]
    fn first_codepoint_wins_on_collision() {
        // insertion order, not numeric order, decides
        let codepoints = CodepointMap::from([(0xE010, 2), (0xE001, 1)]);
        let names = GlyphNames::from([
            (1, "ic_fluent_home_regular".to_string()),
            (2, "ic_fluent_Home".to_string()),
        ]);

        let mut builder = CatalogueBuilder::new();
        builder.extend_from_tables(&codepoints, &names);
        let catalogue = builder.finish();

        assert_eq!(
            catalogue.get(Style::Regular).unwrap(),
            &[entry("Home", "ic_fluent_Home", 0xE010)]
        );
    }

    #[test]
    fn same_identifier_in_different_styles() {
        let mut builder = CatalogueBuilder::new();
        assert!(builder.push(0xE001, "star_regular"));
        assert!(builder.push(0xE002, "star_filled"));
        assert!(!builder.push(0xE003, "STAR"));
        assert_eq!(builder.finish().len(), 2);
    }

    #[test]
    fn unnamed_and_rejected_glyphs_are_skipped() {
        let codepoints = CodepointMap::from([(0x20, 0), (0x21, 7), (0x22, 1)]);
        let names = GlyphNames::from([(0, ".notdef".to_string()), (1, "ok".to_string())]);

        let mut builder = CatalogueBuilder::new();
        builder.extend_from_tables(&codepoints, &names);

        assert_eq!(
            builder.finish().into_iter().collect::<Vec<_>>(),
            vec![(Style::Regular, vec![entry("Ok", "ok", 0x22)])]
        );
    }

    #[test]
    fn sorting_is_ordinal() {
        let mut builder = CatalogueBuilder::new();
        for (codepoint, name) in [(1, "zoom"), (2, "add"), (3, "Zebra_b"), (4, "a_b")] {
            builder.push(codepoint, name);
        }
        let mut catalogue = builder.finish();
        catalogue.sort_by_constant_name();

        let names = catalogue
            .get(Style::Regular)
            .unwrap()
            .iter()
            .map(|entry| entry.constant_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["AB", "Add", "ZebraB", "Zoom"]);
    }

    #[test]
    fn escapes() {
        assert_eq!(entry("A", "a", 0x41).escaped(), "\\u0041");
        assert_eq!(entry("A", "a", 0xFFFF).escaped(), "\\uFFFF");
        assert_eq!(entry("A", "a", 0x1F600).escaped(), "\\U0001F600");
    }
}
