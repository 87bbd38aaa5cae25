//! Per-font settings handed in by whoever discovered the font files.

use crate::catalogue::{Style, normalize::pascal_case};

/// Optional per-file overrides. Anything left unset falls back to a default
/// derived from the file name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontOptions {
    pub class_name: Option<String>,
    pub namespace: Option<String>,
    pub font_alias: Option<String>,
}

/// Settings with every default filled in
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFont {
    pub class_name: String,
    pub namespace: String,
    pub font_alias: String,
}

impl FontOptions {
    /// Fills in the defaults: the class name is the PascalCased file stem
    /// and the font alias is the class name.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphmap::config::FontOptions;
    ///
    /// let font = FontOptions::default().resolve("fluent-system-icons", "Icons");
    /// assert_eq!(font.class_name, "FluentSystemIcons");
    /// assert_eq!(font.namespace, "Icons");
    /// assert_eq!(font.font_alias, "FluentSystemIcons");
    /// ```
    pub fn resolve(&self, file_stem: &str, default_namespace: &str) -> ResolvedFont {
        let class_name = self
            .class_name
            .clone()
            .unwrap_or_else(|| pascal_case(file_stem));
        let font_alias = self
            .font_alias
            .clone()
            .unwrap_or_else(|| class_name.clone());

        ResolvedFont {
            namespace: self
                .namespace
                .clone()
                .unwrap_or_else(|| default_namespace.to_owned()),
            class_name,
            font_alias,
        }
    }
}

impl ResolvedFont {
    /// Name of the class holding one style's constants.
    ///
    /// The style is appended unless the font only has one style, or the
    /// class name already ends with it.
    pub fn class_name_for_style(&self, style: Style, style_count: usize) -> String {
        let suffix = style.as_str();
        let already_suffixed = self.class_name.len() >= suffix.len()
            && self
                .class_name
                .get(self.class_name.len() - suffix.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix));

        if style_count == 1 || already_suffixed {
            self.class_name.clone()
        } else {
            format!("{}{suffix}", self.class_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win() {
        let options = FontOptions {
            class_name: Some("Fluent".into()),
            namespace: Some("App.Icons".into()),
            font_alias: Some("FluentAlias".into()),
        };
        assert_eq!(
            options.resolve("whatever", "Default"),
            ResolvedFont {
                class_name: "Fluent".into(),
                namespace: "App.Icons".into(),
                font_alias: "FluentAlias".into(),
            }
        );
    }

    #[test]
    fn alias_follows_overridden_class_name() {
        let options = FontOptions {
            class_name: Some("Segoe".into()),
            ..Default::default()
        };
        assert_eq!(options.resolve("segoe-fluent", "Glyphs").font_alias, "Segoe");
    }

    #[test]
    fn style_disambiguation() {
        let font = FontOptions::default().resolve("fluent_icons", "Glyphs");
        assert_eq!(font.class_name_for_style(Style::Filled, 2), "FluentIconsFilled");
        assert_eq!(font.class_name_for_style(Style::Filled, 1), "FluentIcons");

        let font = FontOptions::default().resolve("FluentIconsRegular", "Glyphs");
        assert_eq!(font.class_name, "Fluenticonsregular");
        assert_eq!(
            font.class_name_for_style(Style::Regular, 3),
            "Fluenticonsregular"
        );
        assert_eq!(
            font.class_name_for_style(Style::Rtl, 3),
            "FluenticonsregularRtl"
        );
    }
}
