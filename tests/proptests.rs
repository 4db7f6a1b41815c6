//! Property testing for markup and color conversions.

use std::collections::HashMap;

use proptest::{collection, num, option, prelude::*};
use term_markup::{
    clear_codes, clear_tags, convert, detect, replace_tags, ColorLevel, RgbColor, StyleRegistry,
};

fn tag_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("red".to_owned()),
        Just("info".to_owned()),
        Just("warning".to_owned()),
        Just("bold".to_owned()),
        Just("notatag".to_owned()),
        "[a-z]{1,8}",
    ]
}

/// Text that cannot accidentally contain tag delimiters or escape bytes.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!\n]{0,20}"
}

fn markup() -> impl Strategy<Value = String> {
    collection::vec(
        prop_oneof![
            plain_text(),
            (tag_name(), plain_text()).prop_map(|(tag, text)| format!("<{tag}>{text}</>")),
            Just("</>".to_owned()),
            Just("<".to_owned()),
            Just(">".to_owned()),
        ],
        0..8,
    )
    .prop_map(|chunks| chunks.concat())
}

proptest! {
    #[test]
    fn clearing_tags_is_idempotent(input in "\\PC*") {
        let once = clear_tags(&input);
        prop_assert_eq!(clear_tags(&once), once);
    }

    #[test]
    fn clearing_tags_is_idempotent_on_markup(input in markup()) {
        let once = clear_tags(&input);
        prop_assert_eq!(clear_tags(&once), once);
    }

    #[test]
    fn hex_round_trip(r in num::u8::ANY, g in num::u8::ANY, b in num::u8::ANY) {
        let hex = convert::rgb_to_hex(RgbColor(r, g, b));
        let parsed: RgbColor = hex.parse().unwrap();
        prop_assert_eq!(parsed, RgbColor(r, g, b));
        prop_assert_eq!(convert::rgb_to_hex(parsed), hex);
    }

    #[test]
    fn disabled_rendering_emits_no_escapes(input in markup()) {
        let registry = StyleRegistry::new();
        let stripped = replace_tags(&input, &registry, ColorLevel::None);
        let esc = '\u{1b}';
        prop_assert!(!stripped.contains(esc));
    }

    #[test]
    fn rendering_preserves_content(tag in tag_name(), text in plain_text()) {
        let registry = StyleRegistry::new();
        let input = format!("<{tag}>{text}</>");
        let rendered = replace_tags(&input, &registry, ColorLevel::TrueColor);
        // Whatever happened to the tag, the content must survive.
        prop_assert!(rendered.contains(&text));
        // And clearing the output recovers plain text for known tags.
        if registry.contains(&tag) {
            prop_assert_eq!(clear_codes(&rendered), text);
        }
    }

    #[test]
    fn unknown_tags_pass_through(text in plain_text()) {
        let registry = StyleRegistry::new();
        let input = format!("<notatag>{text}</>");
        let rendered = replace_tags(&input, &registry, ColorLevel::TrueColor);
        prop_assert_eq!(rendered, input);
    }

    #[test]
    fn detection_monotonicity(
        term in option::of("[a-z0-9-]{1,16}"),
        colorterm in prop_oneof![Just("truecolor".to_owned()), Just("24bit".to_owned())],
    ) {
        let mut env = HashMap::new();
        env.insert("COLORTERM".to_owned(), colorterm);
        if let Some(term) = &term {
            env.insert("TERM".to_owned(), term.clone());
        }

        let detection = detect(&env);
        if term.as_deref() == Some("screen") {
            // The multiplexer ceiling is the only allowed lowering.
            prop_assert_eq!(detection.level(), ColorLevel::Extended256);
        } else {
            prop_assert_eq!(detection.level(), ColorLevel::TrueColor);
        }
    }

    #[test]
    fn ansi256_expansion_is_in_cube(index in num::u8::ANY) {
        let RgbColor(r, g, b) = convert::ansi256_to_rgb(index);
        // Expanding and re-mapping a cube color must be the identity.
        if (16..=231).contains(&index) && !(r == g && g == b) {
            prop_assert_eq!(convert::rgb_to_ansi256(r, g, b), index);
        }
    }

    #[test]
    fn hsl_round_trip(r in num::u8::ANY, g in num::u8::ANY, b in num::u8::ANY) {
        let (h, s, l) = convert::rgb_to_hsl(r, g, b);
        let RgbColor(r2, g2, b2) = convert::hsl_to_rgb(h, s, l);
        // Rounding error of at most one step per channel.
        prop_assert!(i16::from(r).abs_diff(i16::from(r2)) <= 1);
        prop_assert!(i16::from(g).abs_diff(i16::from(g2)) <= 1);
        prop_assert!(i16::from(b).abs_diff(i16::from(b2)) <= 1);
    }
}
