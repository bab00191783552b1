use std::fmt;

/// Stroke and fill colors, in the CSS notations the display is described in.
///
/// Saturation and lightness are percentages, alpha is `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Hsl {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
    Hsla {
        hue: f32,
        saturation: f32,
        lightness: f32,
        alpha: f32,
    },
    Rgba {
        r: u8,
        g: u8,
        b: u8,
        alpha: f32,
    },
}

/// Straight (non-premultiplied) color with every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Fully saturated HSL, the only saturation the fireworks use.
    pub fn hsl(hue: f32, lightness: f32) -> Self {
        Color::Hsl {
            hue,
            saturation: 100.0,
            lightness,
        }
    }

    pub fn hsla(hue: f32, lightness: f32, alpha: f32) -> Self {
        Color::Hsla {
            hue,
            saturation: 100.0,
            lightness,
            alpha,
        }
    }

    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Color::Rgba { r, g, b, alpha }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Hsl { .. } => 1.0,
            Color::Hsla { alpha, .. } | Color::Rgba { alpha, .. } => alpha.clamp(0.0, 1.0),
        }
    }

    pub fn to_rgba(&self) -> Rgba {
        match *self {
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(hue, saturation, lightness, 1.0),
            Color::Hsla {
                hue,
                saturation,
                lightness,
                alpha,
            } => hsl_to_rgb(hue, saturation, lightness, alpha),
            Color::Rgba { r, g, b, alpha } => Rgba {
                r: r as f32 / 255.0,
                g: g as f32 / 255.0,
                b: b as f32 / 255.0,
                a: alpha.clamp(0.0, 1.0),
            },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
            Color::Hsla {
                hue,
                saturation,
                lightness,
                alpha,
            } => write!(f, "hsla({hue}, {saturation}%, {lightness}%, {alpha})"),
            Color::Rgba { r, g, b, alpha } => write!(f, "rgba({r}, {g}, {b}, {alpha})"),
        }
    }
}

// Hue wraps around the circle, so bursts drawn near 0 or 360 stay valid.
fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;

    Rgba {
        r: r + m,
        g: g + m,
        b: b + m,
        a: alpha.clamp(0.0, 1.0),
    }
}
