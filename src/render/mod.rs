//! Markup rendering: locating `<tag>content</>` spans and substituting them
//! with ANSI escape sequences (or stripping them when color is unusable).
//!
//! The tag language is deliberately small: an opening `<tagname>` or
//! `<fg=..;bg=..;op=..>` token, arbitrary content (newlines included), and
//! the uniform `</>` closer. There is no per-tag closing token, so sibling
//! spans are unambiguous while nested spans are not supported: an outer span
//! always ends at the first `</>`. A hand-written scanner is used instead of
//! regexes; output is assembled left-to-right by match position, so repeated
//! identical spans are each substituted exactly once.

use std::ops::Range;

use crate::{
    detect::ColorLevel,
    registry::StyleRegistry,
    style::{bg_color_code, fg_color_code, option_code, ColorSpec, RgbColor, Style},
};


const TAG_CLOSER: &str = "</>";

/// Characters allowed inside a tag body: covers bare style names
/// (`lightRedEx`, `light_red_ex`) and attribute expressions
/// (`fg=#c0ffee;op=bold,underscore`).
fn is_tag_body_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'=' | b',' | b';' | b'#')
}

/// Matched tag span: `<body>content</>`.
#[derive(Debug)]
struct TagSpan {
    body: Range<usize>,
    content: Range<usize>,
    /// Position just past the `</>` closer.
    end: usize,
}

/// Tries to match a tag span starting at the `<` located at `open`.
fn match_span(input: &str, open: usize) -> Option<TagSpan> {
    let bytes = input.as_bytes();
    debug_assert_eq!(bytes[open], b'<');

    let mut i = open + 1;
    while i < bytes.len() && is_tag_body_char(bytes[i]) {
        i += 1;
    }
    if i == open + 1 || i == bytes.len() || bytes[i] != b'>' {
        return None;
    }

    let content_start = i + 1;
    // Non-greedy: the span ends at the first closer after the opening tag.
    let closer = input[content_start..].find(TAG_CLOSER)? + content_start;
    Some(TagSpan {
        body: open + 1..i,
        content: content_start..closer,
        end: closer + TAG_CLOSER.len(),
    })
}

/// Replaces `<tag>content</>` spans in `input` with ANSI escape sequences.
///
/// Tag bodies are resolved either as attribute expressions (`fg=`, `bg=`,
/// `op=` clauses) or as names in `registry`. Spans that resolve to a
/// non-empty style are replaced with `ESC[<code>m<content>ESC[0m`, or with
/// the bare content (escape sequences [cleared](clear_codes())) if `level`
/// does not support color, so rendered output never contains raw tag syntax
/// for resolvable tags. Spans that do not resolve (unknown names, attribute
/// expressions whose every clause is dropped) are left completely untouched,
/// delimiters included: they are assumed to be literal user text.
pub fn replace_tags(input: &str, registry: &StyleRegistry, level: ColorLevel) -> String {
    if !input.contains('<') {
        return input.to_owned();
    }

    let mut output = String::with_capacity(input.len());
    let mut pos = 0;
    while let Some(rel) = input[pos..].find('<') {
        let open = pos + rel;
        output.push_str(&input[pos..open]);

        let Some(span) = match_span(input, open) else {
            output.push('<');
            pos = open + 1;
            continue;
        };

        let body = &input[span.body.clone()];
        let content = &input[span.content.clone()];
        if let Some(style) = resolve_tag(body, registry) {
            if level.supports_color() {
                output.push_str(&style.adapt(level).wrap(content));
            } else {
                // Also drop any escape sequences embedded in the content, so
                // a colorless target sees pure plain text.
                output.push_str(&clear_codes(content));
            }
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(tag = body, "left unresolvable tag untouched");
            output.push_str(&input[open..span.end]);
        }
        pos = span.end;
    }
    output.push_str(&input[pos..]);
    output
}

/// Resolves a tag body to a style; `None` means the span must be left as-is.
fn resolve_tag(body: &str, registry: &StyleRegistry) -> Option<Style> {
    let style = if body.contains('=') {
        parse_attr_tag(body)
    } else {
        registry.get(body).cloned()?
    };
    if style.is_empty() {
        None
    } else {
        Some(style)
    }
}

/// Parses an inline attribute tag body like `fg=white;bg=blue;op=bold,blink`.
///
/// Clauses resolve independently; malformed or unknown pieces contribute
/// nothing instead of failing the tag. Codes assemble in fg, bg, then
/// listed-option order regardless of the clause order in the body.
fn parse_attr_tag(body: &str) -> Style {
    let mut fg = None;
    let mut bg = None;
    let mut options = Vec::new();

    for clause in body.split(';') {
        let Some((key, value)) = clause.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "fg" => {
                if let Some(spec) = parse_color_value(value, false) {
                    fg = Some(spec);
                }
            }
            "bg" => {
                if let Some(spec) = parse_color_value(value, true) {
                    bg = Some(spec);
                }
            }
            "op" => {
                for name in value.split(',') {
                    if let Some(code) = option_code(name.trim()) {
                        options.push(ColorSpec::Code(code));
                    }
                }
            }
            _ => { /* unknown key; drop the clause */ }
        }
    }

    fg.into_iter().chain(bg).chain(options).collect()
}

/// Parses an attribute color value: a named basic color, a `#`-prefixed hex
/// color, or a 256-color palette index.
fn parse_color_value(value: &str, background: bool) -> Option<ColorSpec> {
    let named = if background {
        bg_color_code(value)
    } else {
        fg_color_code(value)
    };
    if let Some(code) = named {
        return Some(ColorSpec::Code(code));
    }

    if value.starts_with('#') {
        let color: RgbColor = value.parse().ok()?;
        return Some(ColorSpec::Rgb { color, background });
    }

    if value.bytes().all(|byte| byte.is_ascii_digit()) {
        let index = value.parse().ok()?;
        return Some(ColorSpec::Indexed { index, background });
    }
    None
}

/// Strips all tag-like tokens from `input`, resolvable or not.
///
/// A token is `<`, an optional `/`, a (possibly empty) run of tag-body
/// characters, and `>`; a matching closer is not required. Removal is
/// iterated to a fixed point, so this operation is idempotent even when
/// deleting a token juxtaposes the halves of a new one (e.g. `<<bold>>`).
pub fn clear_tags(input: &str) -> String {
    let mut current = strip_tag_tokens(input);
    loop {
        let next = strip_tag_tokens(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_tag_tokens(input: &str) -> String {
    if !input.contains('<') {
        return input.to_owned();
    }

    let bytes = input.as_bytes();
    let mut output = String::with_capacity(input.len());
    let mut pos = 0;
    while let Some(rel) = input[pos..].find('<') {
        let open = pos + rel;
        output.push_str(&input[pos..open]);

        let mut i = open + 1;
        if i < bytes.len() && bytes[i] == b'/' {
            i += 1;
        }
        while i < bytes.len() && is_tag_body_char(bytes[i]) {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'>' {
            pos = i + 1;
        } else {
            output.push('<');
            pos = open + 1;
        }
    }
    output.push_str(&input[pos..]);
    output
}

/// Strips rendered ANSI SGR sequences (`ESC [ <params> m`) from `input`.
///
/// Operates on already-rendered output, unlike [`clear_tags()`], which
/// operates on the markup language. Malformed or unfinished escape sequences
/// are left in place.
pub fn clear_codes(input: &str) -> String {
    if !input.contains('\u{1b}') {
        return input.to_owned();
    }

    let bytes = input.as_bytes();
    let mut output = String::with_capacity(input.len());
    let mut pos = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'[') {
            let mut j = i + 2;
            while j < bytes.len() && matches!(bytes[j], b'0'..=b'9' | b';' | b'?') {
                j += 1;
            }
            if j > i + 2 && bytes.get(j) == Some(&b'm') {
                output.push_str(&input[pos..i]);
                i = j + 1;
                pos = i;
                continue;
            }
        }
        i += 1;
    }
    output.push_str(&input[pos..]);
    output
}
