// graphic/mod.rs -- Colors.

pub mod color;

pub use color::{Color, ColorCMYK, ColorHSL, ColorHSV, ColorRGB, ColorRGBA, NamedColor};
