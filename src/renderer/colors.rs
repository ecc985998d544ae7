//! Colors for game elements

use crate::settings::Palette;

/// Straight-alpha sRGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Full set of colors used to draw a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colors {
    pub background_top: Color,
    pub background_bottom: Color,
    pub asteroid: Color,
    pub crater: Color,
    pub bullet: Color,
    pub ship: Color,
    pub ship_outline: Color,
    pub overlay: Color,
    pub text: Color,
}

pub static STANDARD: Colors = Colors {
    background_top: Color::rgb(0x00, 0x10, 0x18),
    background_bottom: Color::rgb(0x00, 0x18, 0x2a),
    asteroid: Color::rgb(0x9a, 0x8f, 0x80),
    crater: Color::rgba(0, 0, 0, 0.15),
    bullet: Color::rgb(0xff, 0xff, 0xff),
    ship: Color::rgb(0x4f, 0xd1, 0xc5),
    ship_outline: Color::rgba(0, 0, 0, 0.15),
    overlay: Color::rgba(0, 0, 0, 0.6),
    text: Color::rgb(0xff, 0xff, 0xff),
};

pub static HIGH_CONTRAST: Colors = Colors {
    background_top: Color::rgb(0x00, 0x00, 0x00),
    background_bottom: Color::rgb(0x00, 0x00, 0x00),
    asteroid: Color::rgb(0xff, 0xd4, 0x00),
    crater: Color::rgba(0, 0, 0, 0.6),
    bullet: Color::rgb(0xff, 0xff, 0xff),
    ship: Color::rgb(0x00, 0xff, 0xff),
    ship_outline: Color::rgb(0xff, 0xff, 0xff),
    overlay: Color::rgba(0, 0, 0, 0.8),
    text: Color::rgb(0xff, 0xff, 0xff),
};

impl Colors {
    pub fn for_palette(palette: Palette) -> &'static Colors {
        match palette {
            Palette::Standard => &STANDARD,
            Palette::HighContrast => &HIGH_CONTRAST,
        }
    }
}
