//! Pure color-space conversions: HEX / RGB / 256-color / 16-color / HSL / HSV.
//!
//! All functions are plain numeric transforms without any terminal
//! interaction; they underpin [`ColorSpec::adapt()`](crate::ColorSpec::adapt())
//! and are usable on their own.

use crate::style::RgbColor;

/// Standard xterm values for the 16 base palette entries.
const BASE_PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x80, 0x00, 0x00),
    (0x00, 0x80, 0x00),
    (0x80, 0x80, 0x00),
    (0x00, 0x00, 0x80),
    (0x80, 0x00, 0x80),
    (0x00, 0x80, 0x80),
    (0xc0, 0xc0, 0xc0),
    (0x80, 0x80, 0x80),
    (0xff, 0x00, 0x00),
    (0x00, 0xff, 0x00),
    (0xff, 0xff, 0x00),
    (0x00, 0x00, 0xff),
    (0xff, 0x00, 0xff),
    (0x00, 0xff, 0xff),
    (0xff, 0xff, 0xff),
];

/// Formats a color as a bare lowercase 6-digit hex string (no `#` prefix).
pub fn rgb_to_hex(color: RgbColor) -> String {
    format!("{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Maps an RGB color to the nearest entry of the 256-color palette.
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    // The grayscale ramp (232..=255) is denser than the color cube diagonal,
    // so pure grays map there.
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return ((u16::from(r) - 8) / 10) as u8 + 232;
    }

    let scale = |channel: u8| (u16::from(channel) * 5 / 255) as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

/// Expands a 256-color palette index into its RGB value.
pub fn ansi256_to_rgb(index: u8) -> RgbColor {
    match index {
        0..=15 => {
            let (r, g, b) = BASE_PALETTE[index as usize];
            RgbColor(r, g, b)
        }
        16..=231 => {
            let index = index - 16;
            let r = color_cube_channel(index / 36);
            let g = color_cube_channel((index / 6) % 6);
            let b = color_cube_channel(index % 6);
            RgbColor(r, g, b)
        }
        _ => {
            let gray = 10 * (index - 232) + 8;
            RgbColor(gray, gray, gray)
        }
    }
}

fn color_cube_channel(index: u8) -> u8 {
    match index {
        0 => 0,
        1 => 0x5f,
        2 => 0x87,
        3 => 0xaf,
        4 => 0xd7,
        5 => 0xff,
        _ => unreachable!(),
    }
}

/// Maps an RGB color to a basic 16-color SGR code (30..=37 / 90..=97, or the
/// 40 / 100 bases when `background` is set).
pub fn rgb_to_basic(r: u8, g: u8, b: u8, background: bool) -> u8 {
    let base: u8 = if background { 40 } else { 30 };
    let (bright, color) = if r == g && g == b {
        // Grayscale: pick between black / dark gray / light gray / white.
        match r {
            0..=54 => (0, 0),
            55..=126 => (60, 0),
            127..=186 => (0, 7),
            _ => (60, 7),
        }
    } else {
        let k = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
        let bright = if k >= 192 { 60 } else { 0 };
        let mut color = 0;
        if r >= k {
            color |= 1;
        }
        if g >= k {
            color |= 2;
        }
        if b >= k {
            color |= 4;
        }
        (bright, color)
    };
    base + bright + color
}

/// Converts an RGB color to `(hue, saturation, lightness)` with
/// `hue ∈ [0, 360)` and `saturation, lightness ∈ [0, 1]`.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, lightness);
    }

    let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
    let hue = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    (hue.rem_euclid(360.0), saturation, lightness)
}

/// [`rgb_to_hsl()`] variant returning integer `(degrees, percent, percent)`.
pub fn rgb_to_hsl_int(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let (h, s, l) = rgb_to_hsl(r, g, b);
    (
        h.round() as u16 % 360,
        (s * 100.0).round() as u8,
        (l * 100.0).round() as u8,
    )
}

/// Converts `(hue, saturation, lightness)` to an RGB color; argument ranges
/// as in [`rgb_to_hsl()`].
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> RgbColor {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - c / 2.0;
    sector_to_rgb(h, c, m)
}

/// [`hsl_to_rgb()`] variant accepting integer `(degrees, percent, percent)`.
pub fn hsl_int_to_rgb(h: u16, s: u8, l: u8) -> RgbColor {
    hsl_to_rgb(f64::from(h), f64::from(s) / 100.0, f64::from(l) / 100.0)
}

/// Converts an RGB color to `(hue, saturation, value)` with
/// `hue ∈ [0, 360)` and `saturation, value ∈ [0, 1]`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let rf = f64::from(r) / 255.0;
    let gf = f64::from(g) / 255.0;
    let bf = f64::from(b) / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };
    (hue.rem_euclid(360.0), saturation, max)
}

/// Converts `(hue, saturation, value)` to an RGB color; argument ranges as in
/// [`rgb_to_hsv()`].
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> RgbColor {
    let c = v * s;
    let m = v - c;
    sector_to_rgb(h, c, m)
}

fn sector_to_rgb(h: f64, c: f64, m: f64) -> RgbColor {
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match hp as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    RgbColor(
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let color: RgbColor = "aabbcc".parse().unwrap();
        assert_eq!(color, RgbColor(170, 187, 204));
        assert_eq!(rgb_to_hex(color), "aabbcc");
        assert_eq!(format!("{color:x}"), "#aabbcc");
    }

    #[test]
    fn basic_color_mapping() {
        assert_eq!(rgb_to_basic(134, 56, 56, false), 31);
        assert_eq!(rgb_to_basic(134, 56, 56, true), 41);
        assert_eq!(rgb_to_basic(57, 187, 226, true), 46);
        assert_eq!(rgb_to_basic(0xfd, 0x7c, 0xfc, false), 95);
        assert_eq!(rgb_to_basic(0xfd, 0x7c, 0xfc, true), 105);
    }

    #[test]
    fn ansi256_mapping() {
        // Cube corners.
        assert_eq!(rgb_to_ansi256(0, 0, 255), 16 + 5);
        assert_eq!(ansi256_to_rgb(21), RgbColor(0, 0, 255));
        // Grayscale ramp.
        assert_eq!(rgb_to_ansi256(128, 128, 128), 244);
        assert_eq!(ansi256_to_rgb(244), RgbColor(128, 128, 128));
        // Base palette expansion.
        assert_eq!(ansi256_to_rgb(1), RgbColor(0x80, 0, 0));
        assert_eq!(ansi256_to_rgb(9), RgbColor(0xff, 0, 0));
    }

    #[test]
    fn hsl_conversions() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), RgbColor(255, 0, 0));
        assert_eq!(hsl_int_to_rgb(0, 100, 50), RgbColor(255, 0, 0));
        assert_eq!(hsl_int_to_rgb(0, 100, 25), RgbColor(128, 0, 0));
        assert_eq!(hsl_int_to_rgb(0, 0, 66), RgbColor(168, 168, 168));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.6627), RgbColor(169, 169, 169));
        assert_eq!(hsl_int_to_rgb(217, 91, 60), RgbColor(60, 131, 246));

        assert_eq!(rgb_to_hsl_int(60, 131, 246), (217, 91, 60));
        assert_eq!(rgb_to_hsl_int(255, 0, 0), (0, 100, 50));
        assert_eq!(rgb_to_hsl_int(0, 255, 0), (120, 100, 50));
        assert_eq!(rgb_to_hsl_int(0, 0, 255), (240, 100, 50));
        assert_eq!(rgb_to_hsl_int(128, 128, 128), (0, 0, 50));
    }

    #[test]
    fn hsv_conversions() {
        let (h, s, v) = rgb_to_hsv(255, 0, 0);
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(h, s, v), RgbColor(255, 0, 0));

        let (h, s, v) = rgb_to_hsv(255, 255, 0);
        assert_eq!((h, s, v), (60.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(h, s, v), RgbColor(255, 255, 0));

        let (h, s, v) = rgb_to_hsv(128, 0, 128);
        assert_eq!(h, 300.0);
        assert_eq!(s, 1.0);
        assert!((v - 0.5).abs() < 0.01);
        assert_eq!(hsv_to_rgb(h, s, v), RgbColor(128, 0, 128));

        // Black and white have no defined hue.
        assert_eq!(rgb_to_hsv(0, 0, 0), (0.0, 0.0, 0.0));
        assert_eq!(rgb_to_hsv(255, 255, 255), (0.0, 0.0, 1.0));
    }
}
