use std::collections::HashMap;

use super::*;

fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
    vars.iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn truecolor_from_colorterm() {
    let detection = detect(&env(&[("COLORTERM", "truecolor")]));
    assert_eq!(detection.level(), ColorLevel::TrueColor);
    assert_eq!(detection.reason(), "COLORTERM=truecolor");

    let detection = detect(&env(&[("COLORTERM", "24bit"), ("TERM", "xterm")]));
    assert_eq!(detection.level(), ColorLevel::TrueColor);
    assert_eq!(detection.reason(), "COLORTERM=24bit");
}

#[test]
fn colorterm_beats_conflicting_term() {
    // A lower-capability TERM must not override the true-color proof.
    let detection = detect(&env(&[
        ("COLORTERM", "truecolor"),
        ("TERM", "xterm-256color"),
    ]));
    assert_eq!(detection.level(), ColorLevel::TrueColor);
}

#[test]
fn extended_from_term_suffix() {
    for term in ["xterm-256color", "screen-256color", "tmux-256color"] {
        let detection = detect(&env(&[("TERM", term)]));
        assert_eq!(detection.level(), ColorLevel::Extended256, "TERM={term}");
        assert_eq!(detection.reason(), format!("TERM={term}"));
    }
}

#[test]
fn extended_from_special_terms() {
    let detection = detect(&env(&[("TERM", "alacritty")]));
    assert_eq!(detection.level(), ColorLevel::Extended256);
    assert_eq!(detection.reason(), "TERM=alacritty");
}

#[test]
fn extended_from_ansi_driver_markers() {
    let detection = detect(&env(&[("ConEmuANSI", "ON")]));
    assert_eq!(detection.level(), ColorLevel::Extended256);
    assert_eq!(detection.reason(), "ConEmuANSI=ON");

    let detection = detect(&env(&[("ANSICON", "189x2000 (189x43)")]));
    assert_eq!(detection.level(), ColorLevel::Extended256);
    assert_eq!(detection.reason(), "ANSICON=189x2000 (189x43)");
}

#[test]
fn basic_from_term() {
    let detection = detect(&env(&[("TERM", "xterm")]));
    assert_eq!(detection.level(), ColorLevel::Basic16);
    assert_eq!(detection.reason(), "TERM=xterm");

    let detection = detect(&env(&[("TERM", "vt100-terminal")]));
    assert_eq!(detection.level(), ColorLevel::Basic16);
}

#[test]
fn nothing_detected() {
    let detection = detect(&env(&[("NO", "none")]));
    assert_eq!(detection.level(), ColorLevel::None);
    assert_eq!(detection.reason(), "");
    assert!(!detection.level().supports_color());
}

#[test]
fn force_color_floor() {
    let detection = detect(&env(&[("FORCE_COLOR", "on")]));
    assert_eq!(detection.level(), ColorLevel::Basic16);
    assert_eq!(detection.reason(), "FORCE_COLOR=on");

    // The floor never lowers a properly detected level.
    let detection = detect(&env(&[
        ("FORCE_COLOR", "on"),
        ("TERM", "xterm-256color"),
    ]));
    assert_eq!(detection.level(), ColorLevel::Extended256);

    // Falsy values do not force anything.
    let detection = detect(&env(&[("FORCE_COLOR", "off")]));
    assert_eq!(detection.level(), ColorLevel::None);
    let detection = detect(&env(&[("FORCE_COLOR", "0")]));
    assert_eq!(detection.level(), ColorLevel::None);
}

#[test]
fn iterm_version_gate() {
    let base = [
        ("TERM", "xterm-256color"),
        ("TERM_PROGRAM", "iTerm.app"),
        ("ITERM_PROFILE", "Default"),
    ];

    let mut vars = env(&base);
    vars.insert("TERM_PROGRAM_VERSION".into(), "3.4.5beta1".into());
    assert_eq!(detect(&vars).level(), ColorLevel::TrueColor);
    assert_eq!(detect(&vars).reason(), "TERM_PROGRAM=iTerm.app");

    // Unparsable version.
    let mut vars = env(&base);
    vars.insert("TERM_PROGRAM_VERSION".into(), "xx.beta".into());
    assert_eq!(detect(&vars).level(), ColorLevel::Extended256);

    // Version below the minimum.
    let mut vars = env(&base);
    vars.insert("TERM_PROGRAM_VERSION".into(), "2.9".into());
    assert_eq!(detect(&vars).level(), ColorLevel::Extended256);

    // No version at all.
    assert_eq!(detect(&env(&base)).level(), ColorLevel::Extended256);
}

#[test]
fn known_terminal_programs() {
    let detection = detect(&env(&[
        ("TERM", "xterm-256color"),
        ("TERM_PROGRAM", "Terminus"),
    ]));
    assert_eq!(detection.level(), ColorLevel::TrueColor);
    assert_eq!(detection.reason(), "TERM_PROGRAM=Terminus");

    let detection = detect(&env(&[
        ("TERM", "xterm-256color"),
        ("TERM_PROGRAM", "Apple_Terminal"),
        ("TERM_PROGRAM_VERSION", "433"),
    ]));
    assert_eq!(detection.level(), ColorLevel::Extended256);

    let detection = detect(&env(&[
        ("TERM", "xterm-256color"),
        ("TERMINAL_EMULATOR", "JetBrains-JediTerm"),
    ]));
    assert_eq!(detection.level(), ColorLevel::TrueColor);
    assert_eq!(detection.reason(), "TERMINAL_EMULATOR=JetBrains-JediTerm");
}

#[test]
fn unknown_term_program_falls_through() {
    let detection = detect(&env(&[
        ("TERM", "xterm-256color"),
        ("TERM_PROGRAM", "SomethingElse"),
    ]));
    assert_eq!(detection.level(), ColorLevel::Extended256);
    assert_eq!(detection.reason(), "TERM=xterm-256color");
}

#[test]
fn screen_caps_truecolor() {
    let detection = detect(&env(&[("TERM", "screen"), ("COLORTERM", "truecolor")]));
    assert_eq!(detection.level(), ColorLevel::Extended256);
    assert_eq!(detection.reason(), "TERM=screen");
}

#[test]
fn screen_caps_terminal_programs() {
    for extra in [
        ("TERM_PROGRAM", "Terminus"),
        ("TERM_PROGRAM", "iTerm.app"),
        ("TERMINAL_EMULATOR", "JetBrains-JediTerm"),
    ] {
        let mut vars = env(&[("TERM", "screen"), extra]);
        vars.insert("TERM_PROGRAM_VERSION".into(), "3.4.5beta1".into());
        let detection = detect(&vars);
        assert_eq!(detection.level(), ColorLevel::Extended256, "{extra:?}");
    }

    // The ceiling is not a floor: `screen` alone proves nothing.
    let detection = detect(&env(&[("TERM", "screen")]));
    assert_eq!(detection.level(), ColorLevel::None);
}

#[test]
fn levels_are_ordered() {
    assert!(ColorLevel::None < ColorLevel::Basic16);
    assert!(ColorLevel::Basic16 < ColorLevel::Extended256);
    assert!(ColorLevel::Extended256 < ColorLevel::TrueColor);
}

#[test]
fn empty_env_values_are_ignored() {
    let detection = detect(&env(&[("COLORTERM", ""), ("TERM", "")]));
    assert_eq!(detection.level(), ColorLevel::None);
}
