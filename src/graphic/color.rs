// color.rs -- 24-bit colors, CSS named colors and color-space conversions.
//
// RGB channels live in 0..=255; CMYK components in 0..=1; hue in degrees
// [0, 360); saturation, value and lightness in percent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::rng::Rng;

// ============================================================================
// Named colors
// ============================================================================

macro_rules! named_colors {
    ($($variant:ident => ($name:literal, $rgb:literal),)+) => {
        /// CSS named colors.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum NamedColor {
            $($variant,)+
        }

        impl NamedColor {
            pub const ALL: &'static [NamedColor] = &[$(NamedColor::$variant,)+];

            /// Packed 0xRRGGBB value.
            pub const fn rgb(self) -> u32 {
                match self {
                    $(NamedColor::$variant => $rgb,)+
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(NamedColor::$variant => $name,)+
                }
            }
        }
    };
}

named_colors! {
    Black => ("black", 0x000000),
    Navy => ("navy", 0x000080),
    DarkBlue => ("dark_blue", 0x00008B),
    MediumBlue => ("medium_blue", 0x0000CD),
    Blue => ("blue", 0x0000FF),
    DarkGreen => ("dark_green", 0x006400),
    Green => ("green", 0x008000),
    Teal => ("teal", 0x008080),
    DarkCyan => ("dark_cyan", 0x008B8B),
    DeepSkyBlue => ("deep_sky_blue", 0x00BFFF),
    DarkTurquoise => ("dark_turquoise", 0x00CED1),
    MediumSpringGreen => ("medium_spring_green", 0x00FA9A),
    Lime => ("lime", 0x00FF00),
    SpringGreen => ("spring_green", 0x00FF7F),
    Aqua => ("aqua", 0x00FFFF),
    Cyan => ("cyan", 0x00FFFF),
    MidnightBlue => ("midnight_blue", 0x191970),
    DodgerBlue => ("dodger_blue", 0x1E90FF),
    LightSeaGreen => ("light_sea_green", 0x20B2AA),
    ForestGreen => ("forest_green", 0x228B22),
    SeaGreen => ("sea_green", 0x2E8B57),
    DarkSlateGray => ("dark_slate_gray", 0x2F4F4F),
    LimeGreen => ("lime_green", 0x32CD32),
    MediumSeaGreen => ("medium_sea_green", 0x3CB371),
    Turquoise => ("turquoise", 0x40E0D0),
    RoyalBlue => ("royal_blue", 0x4169E1),
    SteelBlue => ("steel_blue", 0x4682B4),
    DarkSlateBlue => ("dark_slate_blue", 0x483D8B),
    MediumTurquoise => ("medium_turquoise", 0x48D1CC),
    Indigo => ("indigo", 0x4B0082),
    DarkOliveGreen => ("dark_olive_green", 0x556B2F),
    CadetBlue => ("cadet_blue", 0x5F9EA0),
    CornflowerBlue => ("cornflower_blue", 0x6495ED),
    RebeccaPurple => ("rebecca_purple", 0x663399),
    MediumAquaMarine => ("medium_aqua_marine", 0x66CDAA),
    DimGray => ("dim_gray", 0x696969),
    SlateBlue => ("slate_blue", 0x6A5ACD),
    OliveDrab => ("olive_drab", 0x6B8E23),
    SlateGray => ("slate_gray", 0x708090),
    LightSlateGray => ("light_slate_gray", 0x778899),
    MediumSlateBlue => ("medium_slate_blue", 0x7B68EE),
    LawnGreen => ("lawn_green", 0x7CFC00),
    Chartreuse => ("chartreuse", 0x7FFF00),
    Aquamarine => ("aquamarine", 0x7FFFD4),
    Maroon => ("maroon", 0x800000),
    Purple => ("purple", 0x800080),
    Olive => ("olive", 0x808000),
    Gray => ("gray", 0x808080),
    SkyBlue => ("sky_blue", 0x87CEEB),
    LightSkyBlue => ("light_sky_blue", 0x87CEFA),
    BlueViolet => ("blue_violet", 0x8A2BE2),
    DarkRed => ("dark_red", 0x8B0000),
    DarkMagenta => ("dark_magenta", 0x8B008B),
    SaddleBrown => ("saddle_brown", 0x8B4513),
    DarkSeaGreen => ("dark_sea_green", 0x8FBC8F),
    LightGreen => ("light_green", 0x90EE90),
    MediumPurple => ("medium_purple", 0x9370DB),
    DarkViolet => ("dark_violet", 0x9400D3),
    PaleGreen => ("pale_green", 0x98FB98),
    DarkOrchid => ("dark_orchid", 0x9932CC),
    YellowGreen => ("yellow_green", 0x9ACD32),
    Sienna => ("sienna", 0xA0522D),
    Brown => ("brown", 0xA52A2A),
    DarkGray => ("dark_gray", 0xA9A9A9),
    LightBlue => ("light_blue", 0xADD8E6),
    GreenYellow => ("green_yellow", 0xADFF2F),
    PaleTurquoise => ("pale_turquoise", 0xAFEEEE),
    LightSteelBlue => ("light_steel_blue", 0xB0C4DE),
    PowderBlue => ("powder_blue", 0xB0E0E6),
    FireBrick => ("fire_brick", 0xB22222),
    DarkGoldenRod => ("dark_golden_rod", 0xB8860B),
    MediumOrchid => ("medium_orchid", 0xBA55D3),
    RosyBrown => ("rosy_brown", 0xBC8F8F),
    DarkKhaki => ("dark_khaki", 0xBDB76B),
    Silver => ("silver", 0xC0C0C0),
    MediumVioletRed => ("medium_violet_red", 0xC71585),
    IndianRed => ("indian_red", 0xCD5C5C),
    Peru => ("peru", 0xCD853F),
    Chocolate => ("chocolate", 0xD2691E),
    Tan => ("tan", 0xD2B48C),
    LightGray => ("light_gray", 0xD3D3D3),
    Thistle => ("thistle", 0xD8BFD8),
    Orchid => ("orchid", 0xDA70D6),
    GoldenRod => ("golden_rod", 0xDAA520),
    PaleVioletRed => ("pale_violet_red", 0xDB7093),
    Crimson => ("crimson", 0xDC143C),
    Gainsboro => ("gainsboro", 0xDCDCDC),
    Plum => ("plum", 0xDDA0DD),
    BurlyWood => ("burly_wood", 0xDEB887),
    LightCyan => ("light_cyan", 0xE0FFFF),
    Lavender => ("lavender", 0xE6E6FA),
    DarkSalmon => ("dark_salmon", 0xE9967A),
    Violet => ("violet", 0xEE82EE),
    PaleGoldenRod => ("pale_golden_rod", 0xEEE8AA),
    LightCoral => ("light_coral", 0xF08080),
    Khaki => ("khaki", 0xF0E68C),
    AliceBlue => ("alice_blue", 0xF0F8FF),
    HoneyDew => ("honey_dew", 0xF0FFF0),
    Azure => ("azure", 0xF0FFFF),
    SandyBrown => ("sandy_brown", 0xF4A460),
    Wheat => ("wheat", 0xF5DEB3),
    Beige => ("beige", 0xF5F5DC),
    WhiteSmoke => ("white_smoke", 0xF5F5F5),
    MintCream => ("mint_cream", 0xF5FFFA),
    GhostWhite => ("ghost_white", 0xF8F8FF),
    Salmon => ("salmon", 0xFA8072),
    AntiqueWhite => ("antique_white", 0xFAEBD7),
    Linen => ("linen", 0xFAF0E6),
    LightGoldenRodYellow => ("light_golden_rod_yellow", 0xFAFAD2),
    OldLace => ("old_lace", 0xFDF5E6),
    Red => ("red", 0xFF0000),
    Fuchsia => ("fuchsia", 0xFF00FF),
    Magenta => ("magenta", 0xFF00FF),
    DeepPink => ("deep_pink", 0xFF1493),
    OrangeRed => ("orange_red", 0xFF4500),
    Tomato => ("tomato", 0xFF6347),
    HotPink => ("hot_pink", 0xFF69B4),
    Coral => ("coral", 0xFF7F50),
    DarkOrange => ("dark_orange", 0xFF8C00),
    LightSalmon => ("light_salmon", 0xFFA07A),
    Orange => ("orange", 0xFFA500),
    LightPink => ("light_pink", 0xFFB6C1),
    Pink => ("pink", 0xFFC0CB),
    Gold => ("gold", 0xFFD700),
    PeachPuff => ("peach_puff", 0xFFDAB9),
    NavajoWhite => ("navajo_white", 0xFFDEAD),
    Moccasin => ("moccasin", 0xFFE4B5),
    Bisque => ("bisque", 0xFFE4C4),
    MistyRose => ("misty_rose", 0xFFE4E1),
    BlanchedAlmond => ("blanched_almond", 0xFFEBCD),
    PapayaWhip => ("papaya_whip", 0xFFEFD5),
    LavenderBlush => ("lavender_blush", 0xFFF0F5),
    SeaShell => ("sea_shell", 0xFFF5EE),
    Cornsilk => ("cornsilk", 0xFFF8DC),
    LemonChiffon => ("lemon_chiffon", 0xFFFACD),
    FloralWhite => ("floral_white", 0xFFFAF0),
    Snow => ("snow", 0xFFFAFA),
    Yellow => ("yellow", 0xFFFF00),
    LightYellow => ("light_yellow", 0xFFFFE0),
    Ivory => ("ivory", 0xFFFFF0),
    White => ("white", 0xFFFFFF),
}

impl FromStr for NamedColor {
    type Err = Error;

    /// Case-insensitive; underscores, dashes and spaces are ignored, so
    /// "dark_blue", "DarkBlue" and "dark blue" all match.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        NamedColor::ALL
            .iter()
            .copied()
            .find(|c| c.name().replace('_', "") == key)
            .ok_or_else(|| Error::Parse(format!("unknown color name '{s}'")))
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

fn unit_to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Pack RGB into 0xRRGGBB; channels are clamped to 0..=255.
pub fn rgb_to_int(red: i32, green: i32, blue: i32) -> u32 {
    (channel(red) as u32) << 16 | (channel(green) as u32) << 8 | channel(blue) as u32
}

/// Pack RGBA into 0xAARRGGBB.
pub fn rgba_to_int(red: i32, green: i32, blue: i32, alpha: i32) -> u32 {
    (channel(alpha) as u32) << 24 | rgb_to_int(red, green, blue)
}

pub fn int_to_rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

pub fn int_to_rgba(color: u32) -> (u8, u8, u8, u8) {
    let (r, g, b) = int_to_rgb(color);
    (r, g, b, (color >> 24) as u8)
}

/// Parse "rrggbb" with an optional leading '#'.
pub fn hex_to_int(hex: &str) -> Result<u32> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.is_empty() || digits.len() > 8 {
        return Err(Error::Parse(format!("invalid hex color '{hex}'")));
    }
    u32::from_str_radix(digits, 16).map_err(|e| Error::Parse(format!("invalid hex color '{hex}': {e}")))
}

pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8)> {
    hex_to_int(hex).map(int_to_rgb)
}

/// Lowercase hex digits without padding.
pub fn int_to_hex(color: u32) -> String {
    format!("{color:x}")
}

pub fn rgb_to_cmyk(red: i32, green: i32, blue: i32) -> (f64, f64, f64, f64) {
    let rgb = [channel(red), channel(green), channel(blue)].map(|v| v as f64 / 255.0);
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let key = 1.0 - max;
    if max == 0.0 {
        return (0.0, 0.0, 0.0, 1.0);
    }
    (1.0 - rgb[0] / max, 1.0 - rgb[1] / max, 1.0 - rgb[2] / max, key)
}

/// Components are clamped to 0..=1.
pub fn cmyk_to_rgb(cyan: f64, magenta: f64, yellow: f64, key: f64) -> (u8, u8, u8) {
    let k = 1.0 - key.clamp(0.0, 1.0);
    (
        unit_to_channel((1.0 - cyan.clamp(0.0, 1.0)) * k),
        unit_to_channel((1.0 - magenta.clamp(0.0, 1.0)) * k),
        unit_to_channel((1.0 - yellow.clamp(0.0, 1.0)) * k),
    )
}

/// (hue, max, min, delta) of the normalized channels.
fn hue_and_extremes(red: i32, green: i32, blue: i32) -> (f64, f64, f64, f64) {
    let [r, g, b] = [channel(red), channel(green), channel(blue)].map(|v| v as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let mut hue = if delta <= 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if hue < 0.0 {
        hue += 360.0;
    }
    (hue, max, min, delta)
}

pub fn rgb_to_hsv(red: i32, green: i32, blue: i32) -> (f64, f64, f64) {
    let (hue, max, _, delta) = hue_and_extremes(red, green, blue);
    let saturation = if max == 0.0 { 0.0 } else { delta / max * 100.0 };
    (hue, saturation, max * 100.0)
}

pub fn rgb_to_hsl(red: i32, green: i32, blue: i32) -> (f64, f64, f64) {
    let (hue, max, min, delta) = hue_and_extremes(red, green, blue);
    let lightness = (max + min) / 2.0;
    let saturation = if delta == 0.0 { 0.0 } else { delta / (1.0 - (2.0 * lightness - 1.0).abs()) };
    (hue, saturation * 100.0, lightness * 100.0)
}

/// Hue in [0, 360), anything at or above 360 becomes 359.
fn clamp_hue(hue: f64) -> f64 {
    if hue >= 360.0 {
        359.0
    } else {
        hue.max(0.0)
    }
}

/// Place chroma and the second-largest component by hue sector, then
/// shift every channel by `m`.
fn sector_to_rgb(hue: f64, chroma: f64, m: f64) -> (u8, u8, u8) {
    let h = hue / 60.0;
    let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    (unit_to_channel(r + m), unit_to_channel(g + m), unit_to_channel(b + m))
}

pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let v = value.clamp(0.0, 100.0) / 100.0;
    let s = saturation.clamp(0.0, 100.0) / 100.0;
    let chroma = v * s;
    sector_to_rgb(clamp_hue(hue), chroma, v - chroma)
}

pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let l = lightness.clamp(0.0, 100.0) / 100.0;
    let s = saturation.clamp(0.0, 100.0) / 100.0;
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    sector_to_rgb(clamp_hue(hue), chroma, l - chroma / 2.0)
}

/// Rec. 709 luma weights, rounded.
pub fn rgb_to_luminance(red: i32, green: i32, blue: i32) -> u8 {
    let (r, g, b) = (channel(red) as f64, channel(green) as f64, channel(blue) as f64);
    (0.2126 * r + 0.7152 * g + 0.0722 * b).round() as u8
}

/// Share of each channel in the channel sum; (0, 0, 0) for black.
pub fn chromaticity_coordinates(red: i32, green: i32, blue: i32) -> (f64, f64, f64) {
    let (r, g, b) = (channel(red) as f64, channel(green) as f64, channel(blue) as f64);
    let sum = r + g + b;
    if sum == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    (r / sum, g / sum, b / sum)
}

// ============================================================================
// Color
// ============================================================================

/// 24-bit RGB color plus an opacity byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    value: u32,
    opacity: u8,
}

impl Default for Color {
    fn default() -> Self {
        Color::new(0)
    }
}

impl Color {
    /// From a packed 0xRRGGBB value; bits above 24 are dropped.
    pub const fn new(value: u32) -> Self {
        Color { value: value & 0x00FF_FFFF, opacity: 255 }
    }

    pub fn from_rgb(red: i32, green: i32, blue: i32) -> Self {
        Color::new(rgb_to_int(red, green, blue))
    }

    pub fn from_rgba(red: i32, green: i32, blue: i32, alpha: i32) -> Self {
        Color::new(rgb_to_int(red, green, blue)).with_opacity(channel(alpha))
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        hex_to_int(hex).map(Color::new)
    }

    pub const fn from_named(name: NamedColor) -> Self {
        Color::new(name.rgb())
    }

    pub fn random(rng: &mut Rng) -> Self {
        Color::new(rng.next_u32())
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity;
    }

    pub fn red(&self) -> u8 {
        int_to_rgb(self.value).0
    }

    pub fn green(&self) -> u8 {
        int_to_rgb(self.value).1
    }

    pub fn blue(&self) -> u8 {
        int_to_rgb(self.value).2
    }

    pub fn alpha(&self) -> u8 {
        self.opacity
    }

    pub fn to_u32(&self) -> u32 {
        self.value
    }

    pub fn to_hex(&self) -> String {
        int_to_hex(self.value)
    }

    pub fn luminance(&self) -> u8 {
        rgb_to_luminance(self.red() as i32, self.green() as i32, self.blue() as i32)
    }

    fn channels(&self) -> (i32, i32, i32) {
        (self.red() as i32, self.green() as i32, self.blue() as i32)
    }
}

impl From<NamedColor> for Color {
    fn from(name: NamedColor) -> Self {
        Color::from_named(name)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::new(value)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Hex digits ("#40e0d0", "40e0d0") or a color name ("turquoise").
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Color::from_hex(s);
        }
        match s.parse::<NamedColor>() {
            Ok(name) => Ok(Color::from_named(name)),
            Err(_) => Color::from_hex(s),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Color models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorRGB {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorRGBA {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// Components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorCMYK {
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    pub key: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorHSV {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorHSL {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl From<Color> for ColorRGB {
    fn from(c: Color) -> Self {
        ColorRGB { red: c.red(), green: c.green(), blue: c.blue() }
    }
}

impl From<ColorRGB> for Color {
    fn from(c: ColorRGB) -> Self {
        Color::from_rgb(c.red as i32, c.green as i32, c.blue as i32)
    }
}

impl From<Color> for ColorRGBA {
    fn from(c: Color) -> Self {
        ColorRGBA { red: c.red(), green: c.green(), blue: c.blue(), alpha: c.alpha() }
    }
}

impl From<ColorRGBA> for Color {
    fn from(c: ColorRGBA) -> Self {
        Color::from_rgba(c.red as i32, c.green as i32, c.blue as i32, c.alpha as i32)
    }
}

impl From<Color> for ColorCMYK {
    fn from(c: Color) -> Self {
        let (r, g, b) = c.channels();
        let (cyan, magenta, yellow, key) = rgb_to_cmyk(r, g, b);
        ColorCMYK { cyan, magenta, yellow, key }
    }
}

impl From<ColorCMYK> for Color {
    fn from(c: ColorCMYK) -> Self {
        let (r, g, b) = cmyk_to_rgb(c.cyan, c.magenta, c.yellow, c.key);
        Color::from_rgb(r as i32, g as i32, b as i32)
    }
}

impl From<Color> for ColorHSV {
    fn from(c: Color) -> Self {
        let (r, g, b) = c.channels();
        let (hue, saturation, value) = rgb_to_hsv(r, g, b);
        ColorHSV { hue, saturation, value }
    }
}

impl From<ColorHSV> for Color {
    fn from(c: ColorHSV) -> Self {
        let (r, g, b) = hsv_to_rgb(c.hue, c.saturation, c.value);
        Color::from_rgb(r as i32, g as i32, b as i32)
    }
}

impl From<Color> for ColorHSL {
    fn from(c: Color) -> Self {
        let (r, g, b) = c.channels();
        let (hue, saturation, lightness) = rgb_to_hsl(r, g, b);
        ColorHSL { hue, saturation, lightness }
    }
}

impl From<ColorHSL> for Color {
    fn from(c: ColorHSL) -> Self {
        let (r, g, b) = hsl_to_rgb(c.hue, c.saturation, c.lightness);
        Color::from_rgb(r as i32, g as i32, b as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    #[test]
    fn test_pack_unpack() {
        assert_eq!(rgb_to_int(10, 25, 30), 661790);
        assert_eq!(rgb_to_int(52, 36, 85), 3417173);
        assert_eq!(rgb_to_int(300, -5, 0), 0xFF0000);
        assert_eq!(int_to_rgb(3050327), (46, 139, 87));
        assert_eq!(rgba_to_int(1, 2, 3, 128), 0x8001_0203);
        assert_eq!(int_to_rgba(0x8001_0203), (1, 2, 3, 128));
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex_to_int("40e0d0").unwrap(), 4251856);
        assert_eq!(hex_to_int("#40E0D0").unwrap(), 4251856);
        assert_eq!(hex_to_rgb("ff8000").unwrap(), (255, 128, 0));
        assert!(hex_to_int("zz").is_err());
        assert!(hex_to_int("").is_err());
        assert_eq!(int_to_hex(0x00ff00), "ff00");
    }

    #[test]
    fn test_cmyk() {
        let (c, m, y, k) = rgb_to_cmyk(52, 36, 85);
        close(c, 0.388, 1e-3);
        close(m, 0.576, 1e-3);
        close(y, 0.0, 1e-12);
        close(k, 0.667, 1e-3);
        assert_eq!(cmyk_to_rgb(c, m, y, k), (52, 36, 85));

        let (c, m, y, k) = rgb_to_cmyk(243, 55, 123);
        close(c, 0.0, 1e-12);
        close(m, 0.774, 1e-3);
        close(y, 0.494, 1e-3);
        close(k, 0.047, 1e-3);

        assert_eq!(rgb_to_cmyk(0, 0, 0), (0.0, 0.0, 0.0, 1.0));
        assert_eq!(cmyk_to_rgb(0.0, 0.0, 0.0, 1.0), (0, 0, 0));
    }

    #[test]
    fn test_hsv() {
        let (h, s, v) = rgb_to_hsv(52, 36, 85);
        close(h, 259.592, 1e-3);
        close(s, 57.647, 1e-3);
        close(v, 33.333, 1e-3);
        assert_eq!(hsv_to_rgb(h, s, v), (52, 36, 85));

        let (h, s, v) = rgb_to_hsv(243, 55, 123);
        close(h, 338.298, 1e-3);
        close(s, 77.366, 1e-3);
        close(v, 95.294, 1e-3);
        assert_eq!(hsv_to_rgb(h, s, v), (243, 55, 123));
    }

    #[test]
    fn test_hsl() {
        let (h, s, l) = rgb_to_hsl(52, 36, 85);
        close(h, 259.592, 1e-3);
        close(s, 40.495, 1e-3);
        close(l, 23.725, 1e-3);
        assert_eq!(hsl_to_rgb(h, s, l), (52, 36, 85));

        let (h, s, l) = rgb_to_hsl(243, 55, 123);
        close(h, 338.298, 1e-3);
        close(s, 88.679, 1e-3);
        close(l, 58.431, 1e-3);
        assert_eq!(hsl_to_rgb(h, s, l), (243, 55, 123));
    }

    #[test]
    fn test_out_of_range_inputs() {
        // 360 is read as 359, a red hue.
        let (r, _, b) = hsv_to_rgb(360.0, 100.0, 100.0);
        assert_eq!(r, 255);
        assert!(b < 10);
        assert_eq!(hsv_to_rgb(0.0, 150.0, 200.0), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, -10.0, 50.0), (128, 128, 128));
    }

    #[test]
    fn test_luminance_and_chromaticity() {
        assert_eq!(rgb_to_luminance(46, 139, 87), 115);
        let (r, g, b) = chromaticity_coordinates(10, 20, 70);
        close(r, 0.1, 1e-12);
        close(g, 0.2, 1e-12);
        close(b, 0.7, 1e-12);
        assert_eq!(chromaticity_coordinates(0, 0, 0), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_color() {
        let azure = Color::from(NamedColor::Azure);
        assert_eq!(azure.to_u32(), 15794175);
        assert_eq!(azure.luminance(), 252);
        assert_eq!(azure.to_hex(), "f0ffff");
        assert_eq!(azure.alpha(), 255);

        let c = Color::new(3050327);
        assert_eq!((c.red(), c.green(), c.blue()), (46, 139, 87));
        assert_eq!(c.luminance(), 115);

        let t = Color::from_hex("40e0d0").unwrap();
        assert_eq!(t.to_u32(), 4251856);
        assert_eq!(t.luminance(), 189);

        let a = Color::from_rgba(1, 2, 3, 40);
        assert_eq!(a.alpha(), 40);
        assert_eq!(a.to_u32(), 0x010203);
    }

    #[test]
    fn test_parse() {
        assert_eq!("turquoise".parse::<Color>().unwrap(), Color::from_named(NamedColor::Turquoise));
        assert_eq!("Dark Blue".parse::<NamedColor>().unwrap(), NamedColor::DarkBlue);
        assert_eq!("#f0ffff".parse::<Color>().unwrap().to_u32(), 0xF0FFFF);
        assert!("not-a-color".parse::<Color>().is_err());
        let c = Color::new(0x123abc);
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
    }

    #[test]
    fn test_random() {
        let mut rng = Rng::new(5);
        let a = Color::random(&mut rng);
        let b = Color::random(&mut rng);
        assert!(a.to_u32() <= 0xFF_FFFF);
        assert_ne!(a, b);
    }

    #[test]
    fn test_models() {
        let c = Color::from_rgb(52, 36, 85);
        assert_eq!(ColorRGB::from(c), ColorRGB { red: 52, green: 36, blue: 85 });
        assert_eq!(Color::from(ColorHSV::from(c)), c);
        assert_eq!(Color::from(ColorHSL::from(c)), c);
        assert_eq!(Color::from(ColorCMYK::from(c)), c);
        let rgba = ColorRGBA::from(c.with_opacity(7));
        assert_eq!(rgba.alpha, 7);
        assert_eq!(Color::from(rgba).alpha(), 7);
    }

    #[test]
    fn test_named_table() {
        assert_eq!(NamedColor::ALL.len(), 141);
        assert_eq!(NamedColor::MidnightBlue.rgb(), 0x191970);
        assert_eq!(NamedColor::Aqua.rgb(), NamedColor::Cyan.rgb());
        assert_eq!(NamedColor::White.to_string(), "white");
    }
}
