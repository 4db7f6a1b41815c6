//! Terminal text styling with inline color tags, in a fun way.
//!
//! # What it does
//!
//! This crate allows to:
//!
//! - Embed styling instructions into plain strings as lightweight markup
//!   tags (`<info>done</>`, `<fg=white;bg=blue;op=bold>status</>`) and
//!   [render](Console::render()) them into [ANSI SGR escape sequences][SGR].
//! - Detect what level of color the current terminal supports
//!   ([`detect()`]) from environment signals (`COLORTERM`, `TERM`,
//!   `TERM_PROGRAM`, legacy Windows ANSI-driver markers), with an auditable
//!   [reason](Detection::reason()) for every classification.
//! - Degrade gracefully: on colorless targets the same markup renders to
//!   plain readable text, and RGB colors downsample to the 256- or 16-color
//!   palette on less capable terminals.
//! - Build styles programmatically from [`ColorSpec`]s (basic, 256-color
//!   indexed, 24-bit RGB) and named [`Style`]s registered in a
//!   [`StyleRegistry`].
//!
//! # Design decisions
//!
//! - **No process-wide state.** All configuration (the enable switch, the
//!   detected or forced color level, the style registry, the output
//!   writer) lives in an explicit [`Console`] value owned by the caller.
//!   Tests and concurrent callers get independent instances instead of
//!   fighting over globals.
//! - **Uniform `</>` closer.** Tags close with a literal `</>` rather than
//!   `</name>`. Adjacent sibling spans stay unambiguous, while nested spans
//!   are deliberately unsupported (an outer span ends at the first `</>`).
//! - **Malformed input never fails.** Unknown tag names and attribute
//!   clauses degrade to plain text; the worst case for any input is
//!   unstyled, readable output.
//!
//! # Crate features
//!
//! ## `tracing`
//!
//! *(Off by default)*
//!
//! Uses [the eponymous facade][`tracing`] to trace detection and rendering
//! decisions, which could be useful for debugging. Tracing is performed on
//! the `DEBUG` level.
//!
//! [SGR]: https://en.wikipedia.org/wiki/ANSI_escape_code#SGR
//! [`tracing`]: https://docs.rs/tracing/
//!
//! # Examples
//!
//! Rendering markup through a [`Console`]:
//!
//! ```
//! use term_markup::{ColorLevel, Console};
//!
//! let mut console = Console::with_writer(Vec::new());
//! // Force a level so the example does not depend on the test environment.
//! console.force_color_level(ColorLevel::TrueColor);
//! console.println("<red>MSG</>")?;
//! assert_eq!(
//!     String::from_utf8(console.into_writer())?,
//!     "\u{1b}[0;31mMSG\u{1b}[0m\n"
//! );
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Detecting capabilities with a custom environment:
//!
//! ```
//! use std::collections::HashMap;
//! use term_markup::{detect, ColorLevel};
//!
//! let env: HashMap<_, _> =
//!     [("COLORTERM".to_owned(), "truecolor".to_owned())].into();
//! let detection = detect(&env);
//! assert_eq!(detection.level(), ColorLevel::TrueColor);
//! assert_eq!(detection.reason(), "COLORTERM=truecolor");
//! ```

// Documentation settings.
#![doc(html_root_url = "https://docs.rs/term-markup/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use crate::{
    console::Console,
    detect::{detect, ColorLevel, DetectError, Detection, EnvSource, OsEnv},
    registry::{StyleRegistry, UnknownStyleError},
    render::{clear_codes, clear_tags, replace_tags},
    style::{
        bg_color_code, codes, fg_color_code, option_code, ColorSpec, HexColorParseError,
        RgbColor, Style,
    },
};

mod console;
pub mod convert;
mod detect;
mod registry;
mod render;
mod style;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
