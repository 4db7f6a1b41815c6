//! Color and style value types rendering to ANSI SGR parameters.

use std::{error::Error as StdError, fmt, num::ParseIntError, str::FromStr};

use crate::{convert, detect::ColorLevel};

/// SGR parameter constants for the 16-color palette and text options.
///
/// Foreground colors occupy 30..=37 (90..=97 for the bright variants),
/// background colors 40..=47 (100..=107), and text options single digits.
pub mod codes {
    pub const FG_BLACK: u8 = 30;
    pub const FG_RED: u8 = 31;
    pub const FG_GREEN: u8 = 32;
    pub const FG_YELLOW: u8 = 33;
    pub const FG_BLUE: u8 = 34;
    pub const FG_MAGENTA: u8 = 35;
    pub const FG_CYAN: u8 = 36;
    pub const FG_WHITE: u8 = 37;
    pub const FG_DEFAULT: u8 = 39;

    pub const BG_BLACK: u8 = 40;
    pub const BG_RED: u8 = 41;
    pub const BG_GREEN: u8 = 42;
    pub const BG_YELLOW: u8 = 43;
    pub const BG_BLUE: u8 = 44;
    pub const BG_MAGENTA: u8 = 45;
    pub const BG_CYAN: u8 = 46;
    pub const BG_WHITE: u8 = 47;
    pub const BG_DEFAULT: u8 = 49;

    pub const RESET: u8 = 0;
    pub const BOLD: u8 = 1;
    pub const FUZZY: u8 = 2;
    pub const ITALIC: u8 = 3;
    pub const UNDERSCORE: u8 = 4;
    pub const BLINK: u8 = 5;
    pub const REVERSE: u8 = 7;
    pub const CONCEALED: u8 = 8;
}

/// Resolves a foreground color name to its SGR code.
pub fn fg_color_code(name: &str) -> Option<u8> {
    Some(match name {
        "black" => codes::FG_BLACK,
        "red" => codes::FG_RED,
        "green" => codes::FG_GREEN,
        "yellow" => codes::FG_YELLOW,
        "blue" => codes::FG_BLUE,
        "magenta" => codes::FG_MAGENTA,
        "cyan" => codes::FG_CYAN,
        "white" => codes::FG_WHITE,
        "default" => codes::FG_DEFAULT,
        _ => return None,
    })
}

/// Resolves a background color name to its SGR code.
pub fn bg_color_code(name: &str) -> Option<u8> {
    // Background codes are the foreground ones shifted by 10.
    fg_color_code(name).map(|code| code + 10)
}

/// Resolves a text option name (`bold`, `underscore`, ...) to its SGR code.
pub fn option_code(name: &str) -> Option<u8> {
    Some(match name {
        "bold" => codes::BOLD,
        "fuzzy" => codes::FUZZY,
        "italic" => codes::ITALIC,
        "underscore" => codes::UNDERSCORE,
        "blink" => codes::BLINK,
        "reverse" => codes::REVERSE,
        "concealed" => codes::CONCEALED,
        _ => return None,
    })
}

/// RGB color with 8-bit channels.
///
/// A color [can be parsed](FromStr) from a hex string. The accepted forms are
/// 3-digit (`ccc`, each digit doubled), 6-digit (`aabbcc`) and a 6-digit form
/// with a `#` or `0x` prefix; parsing any other shape fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl fmt::LowerHex for RgbColor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Errors that can occur when [parsing](FromStr) an [`RgbColor`] from a string.
#[derive(Debug)]
#[non_exhaustive]
pub enum HexColorParseError {
    /// Color string contains non-ASCII chars.
    NotAscii,
    /// The color has incorrect string length (not 1 or 2 chars per color
    /// channel after the optional `#` / `0x` prefix). The byte length of the
    /// unprefixed string is provided within this variant.
    IncorrectLen(usize),
    /// Error parsing color channel value.
    IncorrectDigit(ParseIntError),
}

impl fmt::Display for HexColorParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAscii => formatter.write_str("color string contains non-ASCII chars"),
            Self::IncorrectLen(len) => write!(
                formatter,
                "unexpected byte length {len} of color string, expected 3 or 6"
            ),
            Self::IncorrectDigit(err) => write!(formatter, "error parsing hex digit: {err}"),
        }
    }
}

impl StdError for HexColorParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::IncorrectDigit(err) => Some(err),
            _ => None,
        }
    }
}

impl FromStr for RgbColor {
    type Err = HexColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() {
            return Err(HexColorParseError::NotAscii);
        }

        let s = s.strip_prefix('#').unwrap_or(s);
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if s.len() == 3 {
            let r = u8::from_str_radix(&s[..1], 16).map_err(HexColorParseError::IncorrectDigit)?;
            let g = u8::from_str_radix(&s[1..2], 16).map_err(HexColorParseError::IncorrectDigit)?;
            let b = u8::from_str_radix(&s[2..], 16).map_err(HexColorParseError::IncorrectDigit)?;
            Ok(Self(r * 17, g * 17, b * 17))
        } else if s.len() == 6 {
            let r = u8::from_str_radix(&s[..2], 16).map_err(HexColorParseError::IncorrectDigit)?;
            let g = u8::from_str_radix(&s[2..4], 16).map_err(HexColorParseError::IncorrectDigit)?;
            let b = u8::from_str_radix(&s[4..], 16).map_err(HexColorParseError::IncorrectDigit)?;
            Ok(Self(r, g, b))
        } else {
            Err(HexColorParseError::IncorrectLen(s.len()))
        }
    }
}

/// Single color / option specifier rendering to an ANSI SGR parameter fragment.
///
/// Specifiers [`Display`](fmt::Display) as the bare parameter fragment without
/// the `ESC[` prefix / `m` suffix, e.g. `38;5;132` or `31`, so that several of
/// them can be `;`-joined into one escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpec {
    /// One fixed SGR parameter: a basic color (30..=37 / 40..=47), a bright
    /// color (90..=97 / 100..=107), a default color (39 / 49) or a text
    /// option code.
    Code(u8),
    /// Indexed color from the 256-color palette; renders as `38;5;N` /
    /// `48;5;N`.
    Indexed {
        index: u8,
        background: bool,
    },
    /// 24-bit color; renders as `38;2;R;G;B` / `48;2;R;G;B`.
    Rgb {
        color: RgbColor,
        background: bool,
    },
}

impl ColorSpec {
    /// Creates a foreground indexed color.
    pub fn indexed(index: u8) -> Self {
        Self::Indexed {
            index,
            background: false,
        }
    }

    /// Creates a foreground RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb {
            color: RgbColor(r, g, b),
            background: false,
        }
    }

    /// Switches this specifier to the background plane. No-op for fixed codes.
    #[must_use]
    pub fn on_background(self) -> Self {
        match self {
            Self::Code(code) => Self::Code(code),
            Self::Indexed { index, .. } => Self::Indexed {
                index,
                background: true,
            },
            Self::Rgb { color, .. } => Self::Rgb {
                color,
                background: true,
            },
        }
    }

    /// Downsamples this specifier to what the given capability level can
    /// actually display: RGB colors degrade to the 256-color palette and
    /// further to the basic 16 colors. Fixed codes pass through unchanged.
    #[must_use]
    pub fn adapt(self, level: ColorLevel) -> Self {
        match (self, level) {
            (Self::Rgb { color, background }, ColorLevel::Extended256) => Self::Indexed {
                index: convert::rgb_to_ansi256(color.0, color.1, color.2),
                background,
            },
            (Self::Rgb { color, background }, ColorLevel::Basic16 | ColorLevel::None) => {
                Self::Code(convert::rgb_to_basic(color.0, color.1, color.2, background))
            }
            (Self::Indexed { index, background }, ColorLevel::Basic16 | ColorLevel::None) => {
                let RgbColor(r, g, b) = convert::ansi256_to_rgb(index);
                Self::Code(convert::rgb_to_basic(r, g, b, background))
            }
            (spec, _) => spec,
        }
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(formatter, "{code}"),
            Self::Indexed { index, background } => {
                let prefix = if *background { 48 } else { 38 };
                write!(formatter, "{prefix};5;{index}")
            }
            Self::Rgb {
                color: RgbColor(r, g, b),
                background,
            } => {
                let prefix = if *background { 48 } else { 38 };
                write!(formatter, "{prefix};2;{r};{g};{b}")
            }
        }
    }
}

impl From<RgbColor> for ColorSpec {
    fn from(color: RgbColor) -> Self {
        Self::Rgb {
            color,
            background: false,
        }
    }
}

/// Ordered sequence of [`ColorSpec`]s forming one SGR parameter list.
///
/// An empty style renders any text unchanged; no escape sequence is emitted
/// for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    specs: Vec<ColorSpec>,
}

impl Style {
    /// Creates an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a style from a list of fixed SGR codes, preserving their order.
    pub fn from_codes(codes: &[u8]) -> Self {
        Self {
            specs: codes.iter().copied().map(ColorSpec::Code).collect(),
        }
    }

    /// Appends a specifier to this style.
    pub fn push(&mut self, spec: ColorSpec) {
        self.specs.push(spec);
    }

    /// Appends a specifier, builder-style.
    #[must_use]
    pub fn with(mut self, spec: impl Into<ColorSpec>) -> Self {
        self.specs.push(spec.into());
        self
    }

    /// Appends a fixed SGR code, builder-style.
    #[must_use]
    pub fn code(self, code: u8) -> Self {
        self.with(ColorSpec::Code(code))
    }

    /// Checks whether this style contains no specifiers.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterates over the specifiers of this style.
    pub fn iter(&self) -> impl Iterator<Item = ColorSpec> + '_ {
        self.specs.iter().copied()
    }

    /// Returns the `;`-joined SGR parameter list of this style.
    pub fn sgr_params(&self) -> String {
        self.to_string()
    }

    /// Downsamples all specifiers via [`ColorSpec::adapt()`].
    #[must_use]
    pub fn adapt(&self, level: ColorLevel) -> Self {
        Self {
            specs: self.iter().map(|spec| spec.adapt(level)).collect(),
        }
    }

    /// Wraps `text` into the escape sequence of this style:
    /// `ESC[<params>m<text>ESC[0m`. An empty style or empty text is returned
    /// unchanged.
    pub fn wrap(&self, text: &str) -> String {
        if self.is_empty() || text.is_empty() {
            text.to_owned()
        } else {
            format!("\u{1b}[{self}m{text}\u{1b}[0m")
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.specs.iter().enumerate() {
            if i > 0 {
                formatter.write_str(";")?;
            }
            fmt::Display::fmt(spec, formatter)?;
        }
        Ok(())
    }
}

impl From<ColorSpec> for Style {
    fn from(spec: ColorSpec) -> Self {
        Self { specs: vec![spec] }
    }
}

impl FromIterator<ColorSpec> for Style {
    fn from_iter<I: IntoIterator<Item = ColorSpec>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().collect(),
        }
    }
}
