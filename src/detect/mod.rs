//! Terminal color capability detection.
//!
//! Detection is a pure function of environment variables (plus a console-mode
//! probe on Windows): [`detect()`] classifies the output target into a
//! [`ColorLevel`] and records the deciding signal in a human-readable
//! [`Detection::reason()`] mark. The environment is accessed through the
//! [`EnvSource`] seam so tests can substitute a plain map and re-run
//! detection at will.

use std::{collections::HashMap, env, error::Error as StdError, fmt, io};

#[cfg(test)]
mod tests;
#[cfg(windows)]
mod windows;

/// `TERM` values of terminals that support 256 colors without advertising it
/// via a `-256color` suffix.
const SPECIAL_COLOR_TERMS: &[&str] = &["alacritty"];

/// Color support level of a terminal, ordered from least to most capable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorLevel {
    /// No color support; escape sequences would be rendered as mojibake.
    #[default]
    None,
    /// 3- / 4-bit colors (8 basic + 8 bright).
    Basic16,
    /// 8-bit indexed colors (`38;5;N` sequences).
    Extended256,
    /// 24-bit true color (`38;2;R;G;B` sequences).
    TrueColor,
}

impl ColorLevel {
    /// Checks whether any color output is possible at this level.
    pub fn supports_color(self) -> bool {
        self > Self::None
    }
}

impl fmt::Display for ColorLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::None => "none",
            Self::Basic16 => "16-color",
            Self::Extended256 => "256-color",
            Self::TrueColor => "true-color",
        })
    }
}

/// Source of environment variables for [`detect()`].
///
/// Implemented by [`OsEnv`] (the process environment) and by
/// `HashMap<String, String>` (for tests).
pub trait EnvSource {
    /// Returns the value of the given variable, or `None` if it is unset
    /// or empty.
    fn var(&self, name: &str) -> Option<String>;
}

/// [`EnvSource`] reading the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnv;

impl EnvSource for OsEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).filter(|value| !value.is_empty()).cloned()
    }
}

/// Error encountered while probing the console; recorded in
/// [`Detection::errors()`], never raised.
#[derive(Debug)]
pub struct DetectError {
    context: &'static str,
    source: io::Error,
}

impl DetectError {
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn new(context: &'static str, source: io::Error) -> Self {
        Self { context, source }
    }
}

impl fmt::Display for DetectError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "error {}: {}", self.context, self.source)
    }
}

impl StdError for DetectError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

/// Outcome of capability detection: the level together with a provenance mark
/// naming the signal that decided it (e.g. `COLORTERM=truecolor`).
#[derive(Debug, Default)]
pub struct Detection {
    level: ColorLevel,
    reason: String,
    errors: Vec<DetectError>,
}

impl Detection {
    /// Creates a detection result with the given level and reason.
    pub fn new(level: ColorLevel, reason: impl Into<String>) -> Self {
        Self {
            level,
            reason: reason.into(),
            errors: Vec::new(),
        }
    }

    /// Creates a result for an explicitly forced level, bypassing detection.
    pub fn forced(level: ColorLevel) -> Self {
        Self::new(level, "forced")
    }

    /// Detected color level.
    pub fn level(&self) -> ColorLevel {
        self.level
    }

    /// The signal that decided the classification, e.g. `TERM=xterm-256color`.
    /// Empty if no signal matched. Diagnostics only; never drives control
    /// flow.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Errors encountered by console probes during detection.
    pub fn errors(&self) -> &[DetectError] {
        &self.errors
    }
}

/// Detects the color capability of the current output target.
///
/// Checks are ordered from the most capable signal downwards and the first
/// match wins, so a signal proving a higher level short-circuits the cheaper
/// checks below it. Two post-passes adjust the raw result:
///
/// - `TERM=screen` (tmux / screen without a `-256color` suffix) caps the
///   level at [`ColorLevel::Extended256`], since multiplexers are known to
///   mangle true-color passthrough;
/// - a truthy `FORCE_COLOR` lifts an otherwise colorless result to
///   [`ColorLevel::Basic16`].
///
/// The function itself never fails; console probe errors are recorded in
/// [`Detection::errors()`].
pub fn detect(env: &dyn EnvSource) -> Detection {
    let term = env.var("TERM").unwrap_or_default();
    let mut detection = detect_raw(env, &term);

    if term == "screen" && detection.level > ColorLevel::Extended256 {
        detection.level = ColorLevel::Extended256;
        detection.reason = "TERM=screen".to_owned();
    }

    if detection.level == ColorLevel::None {
        if let Some(force) = env.var("FORCE_COLOR") {
            if is_truthy(&force) {
                detection.level = ColorLevel::Basic16;
                detection.reason = format!("FORCE_COLOR={force}");
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        level = %detection.level,
        reason = detection.reason,
        "detected color level"
    );

    detection
}

fn detect_raw(env: &dyn EnvSource, term: &str) -> Detection {
    if let Some(colorterm) = env.var("COLORTERM") {
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return Detection::new(ColorLevel::TrueColor, format!("COLORTERM={colorterm}"));
        }
    }

    if let Some(detection) = check_term_program(env) {
        return detection;
    }
    if let Some(detection) = check_256_color(env, term) {
        return detection;
    }

    if term.contains("term") {
        return Detection::new(ColorLevel::Basic16, format!("TERM={term}"));
    }

    #[cfg(windows)]
    if term.is_empty() {
        return windows::detect_console(env);
    }

    Detection::default()
}

/// Checks terminal applications known to support more than `TERM` advertises.
fn check_term_program(env: &dyn EnvSource) -> Option<Detection> {
    if env.var("TERMINAL_EMULATOR").as_deref() == Some("JetBrains-JediTerm") {
        return Some(Detection::new(
            ColorLevel::TrueColor,
            "TERMINAL_EMULATOR=JetBrains-JediTerm",
        ));
    }

    let program = env.var("TERM_PROGRAM")?;
    let level = match program.as_str() {
        // True color requires iTerm2 3.x; older, missing or unparsable
        // versions get 256 colors.
        "iTerm.app" => match env.var("TERM_PROGRAM_VERSION").and_then(|v| major_version(&v)) {
            Some(major) if major >= 3 => ColorLevel::TrueColor,
            _ => ColorLevel::Extended256,
        },
        "Apple_Terminal" => ColorLevel::Extended256,
        "Terminus" => ColorLevel::TrueColor,
        _ => return None,
    };
    Some(Detection::new(level, format!("TERM_PROGRAM={program}")))
}

fn check_256_color(env: &dyn EnvSource, term: &str) -> Option<Detection> {
    // ConEmu-style markers used by legacy Windows ANSI drivers.
    if env.var("ConEmuANSI").as_deref() == Some("ON") {
        return Some(Detection::new(ColorLevel::Extended256, "ConEmuANSI=ON"));
    }
    if let Some(ansicon) = env.var("ANSICON") {
        return Some(Detection::new(
            ColorLevel::Extended256,
            format!("ANSICON={ansicon}"),
        ));
    }

    if SPECIAL_COLOR_TERMS.contains(&term) || term.contains("256color") {
        return Some(Detection::new(
            ColorLevel::Extended256,
            format!("TERM={term}"),
        ));
    }
    None
}

fn major_version(version: &str) -> Option<u32> {
    version.split('.').next()?.parse().ok()
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.to_ascii_lowercase().as_str(),
        "" | "0" | "off" | "false" | "no" | "none"
    )
}
