//! Named style registry resolving tag names to SGR code lists.

use std::{collections::HashMap, error::Error as StdError, fmt};

use crate::style::Style;

/// Built-in tag table: name → SGR parameter codes, applied in order.
const BUILTIN_STYLES: &[(&str, &[u8])] = &[
    // basic colors
    ("red", &[0, 31]),
    ("blue", &[0, 34]),
    ("cyan", &[0, 36]),
    ("black", &[0, 30]),
    ("green", &[0, 32]),
    ("brown", &[0, 33]),
    ("white", &[1, 37]),
    ("default", &[39]),
    ("normal", &[39]),
    ("yellow", &[1, 33]),
    ("magenta", &[1, 35]),
    // alert tags, like bootstrap's alert
    ("suc", &[1, 32]),
    ("success", &[1, 32]),
    ("info", &[0, 32]),
    ("comment", &[0, 33]),
    ("note", &[36, 1]),
    ("notice", &[36, 4]),
    ("warn", &[0, 30, 43]),
    ("warning", &[0, 30, 43]),
    ("primary", &[0, 34]),
    ("danger", &[0, 31]),
    ("err", &[30, 41]),
    ("error", &[30, 41]),
    // light / bright variants
    ("lightRed", &[1, 31]),
    ("light_red", &[1, 31]),
    ("lightGreen", &[1, 32]),
    ("light_green", &[1, 32]),
    ("lightBlue", &[1, 34]),
    ("light_blue", &[1, 34]),
    ("lightCyan", &[1, 36]),
    ("light_cyan", &[1, 36]),
    ("lightGray", &[37]),
    ("light_gray", &[37]),
    ("darkGray", &[90]),
    ("dark_gray", &[90]),
    ("lightYellow", &[93]),
    ("light_yellow", &[93]),
    ("lightMagenta", &[95]),
    ("light_magenta", &[95]),
    ("lightRedEx", &[91]),
    ("light_red_ex", &[91]),
    ("lightGreenEx", &[92]),
    ("light_green_ex", &[92]),
    ("lightBlueEx", &[94]),
    ("light_blue_ex", &[94]),
    ("lightCyanEx", &[96]),
    ("light_cyan_ex", &[96]),
    ("whiteEx", &[97]),
    ("white_ex", &[97]),
    // text options
    ("bold", &[1]),
    ("underscore", &[4]),
    ("reverse", &[7]),
];

/// Error returned by the strict [`StyleRegistry::style()`] lookup.
#[derive(Debug)]
pub struct UnknownStyleError {
    name: String,
}

impl UnknownStyleError {
    /// The name that failed to resolve.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownStyleError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "style `{}` is not registered", self.name)
    }
}

impl StdError for UnknownStyleError {}

/// Mutable map of named [`Style`]s used to resolve markup tags.
///
/// A registry created via [`Self::new()`] / `Default` is seeded with the
/// built-in tag names (`info`, `warning`, `error`, basic color names and
/// their `light*` variants, and option tags like `bold`). Styles are never
/// removed automatically; [`Self::add()`] may overwrite any entry.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: HashMap<String, Style>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        let styles = BUILTIN_STYLES
            .iter()
            .map(|(name, codes)| (name.to_string(), Style::from_codes(codes)))
            .collect();
        Self { styles }
    }
}

impl StyleRegistry {
    /// Creates a registry seeded with the built-in styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry without any styles.
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Registers a style under the given name, overwriting any previous
    /// entry.
    pub fn add(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// Looks up a style; `None` for unregistered names.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Strict lookup variant failing on unregistered names. Use when absence
    /// of the style is a caller bug rather than user input.
    pub fn style(&self, name: &str) -> Result<&Style, UnknownStyleError> {
        self.styles.get(name).ok_or_else(|| UnknownStyleError {
            name: name.to_owned(),
        })
    }

    /// Checks whether the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Iterates over registered style names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.styles.keys().map(String::as_str)
    }
}
