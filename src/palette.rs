// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::cell::Shade;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Green,
    Cyan,
    Amber,
    Red,
    Blue,
    Purple,
    Gray,
}

impl ColorScheme {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" | "matrix" => Ok(ColorScheme::Green),
            "cyan" => Ok(ColorScheme::Cyan),
            "amber" | "gold" | "yellow" => Ok(ColorScheme::Amber),
            "red" => Ok(ColorScheme::Red),
            "blue" => Ok(ColorScheme::Blue),
            "purple" => Ok(ColorScheme::Purple),
            "gray" | "grey" => Ok(ColorScheme::Gray),
            _ => Err(format!("invalid color: {} (see --list-colors)", s)),
        }
    }

    /// Gradient stops from darkest trail to the head glyph.
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorScheme::Green => &[(0, 40, 0), (0, 170, 40), (0, 255, 70), (200, 255, 200)],
            ColorScheme::Cyan => &[(0, 35, 45), (0, 150, 170), (0, 230, 255), (210, 250, 255)],
            ColorScheme::Amber => &[(50, 30, 0), (190, 120, 0), (255, 190, 0), (255, 240, 190)],
            ColorScheme::Red => &[(45, 0, 0), (170, 20, 20), (255, 50, 50), (255, 210, 210)],
            ColorScheme::Blue => &[(0, 10, 50), (20, 70, 200), (60, 130, 255), (210, 225, 255)],
            ColorScheme::Purple => &[(35, 0, 45), (130, 40, 170), (190, 90, 255), (240, 215, 255)],
            ColorScheme::Gray => &[(40, 40, 40), (140, 140, 140), (200, 200, 200), (255, 255, 255)],
        }
    }
}

const LEVELS: usize = 8;

/// Foreground colors for a scheme, darkest first; the last entry is the head color.
#[derive(Clone, Debug)]
pub struct Palette {
    pub colors: Vec<Color>,
    pub bg: Option<Color>,
    pub accent: Option<Color>,
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;

    let cr = CUBE_LEVELS[r6 as usize];
    let cg = CUBE_LEVELS[g6 as usize];
    let cb = CUBE_LEVELS[b6 as usize];
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(r, g, b, cr, cg, cb);

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_idx = if avg < 8 {
        16
    } else if avg > 238 {
        231
    } else {
        232 + ((avg - 8) / 10)
    };
    let (gr, gg, gb) = if gray_idx == 16 {
        (0, 0, 0)
    } else if gray_idx == 231 {
        (255, 255, 255)
    } else {
        let v = 8 + 10 * (gray_idx - 232);
        (v, v, v)
    };
    let gray_dist = dist2(r, g, b, gr, gg, gb);

    if gray_dist < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

fn rgb_to_color16(r: u8, g: u8, b: u8) -> Color {
    const TABLE: [(Color, (u8, u8, u8)); 16] = [
        (Color::Black, (0, 0, 0)),
        (Color::DarkGrey, (128, 128, 128)),
        (Color::Grey, (192, 192, 192)),
        (Color::White, (255, 255, 255)),
        (Color::DarkRed, (128, 0, 0)),
        (Color::Red, (255, 0, 0)),
        (Color::DarkGreen, (0, 128, 0)),
        (Color::Green, (0, 255, 0)),
        (Color::DarkBlue, (0, 0, 128)),
        (Color::Blue, (0, 0, 255)),
        (Color::DarkCyan, (0, 128, 128)),
        (Color::Cyan, (0, 255, 255)),
        (Color::DarkMagenta, (128, 0, 128)),
        (Color::Magenta, (255, 0, 255)),
        (Color::DarkYellow, (128, 128, 0)),
        (Color::Yellow, (255, 255, 0)),
    ];

    let mut best = Color::White;
    let mut best_d = i32::MAX;
    for (c, (cr, cg, cb)) in TABLE {
        let d = dist2(r, g, b, cr, cg, cb);
        if d < best_d {
            best_d = d;
            best = c;
        }
    }
    best
}

fn colors_from_rgb(mode: ColorMode, list: &[(u8, u8, u8)]) -> Vec<Color> {
    match mode {
        ColorMode::Mono => Vec::new(),
        ColorMode::TrueColor => list
            .iter()
            .map(|&(r, g, b)| Color::Rgb { r, g, b })
            .collect(),
        ColorMode::Color256 => list
            .iter()
            .map(|&(r, g, b)| Color::AnsiValue(rgb_to_ansi256(r, g, b)))
            .collect(),
        ColorMode::Color16 => list
            .iter()
            .map(|&(r, g, b)| rgb_to_color16(r, g, b))
            .collect(),
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

fn gradient_from_stops(stops: &[(u8, u8, u8)], steps: usize) -> Vec<(u8, u8, u8)> {
    if steps == 0 || stops.is_empty() {
        return Vec::new();
    }
    if stops.len() == 1 {
        return vec![stops[0]; steps];
    }
    if steps == 1 {
        return vec![stops[0]];
    }

    let segs = stops.len().saturating_sub(1);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        let t = (i as f32) / ((steps - 1) as f32);
        let pos = t * (segs as f32);
        let mut seg = pos.floor() as usize;
        if seg >= segs {
            seg = segs.saturating_sub(1);
        }
        let lt = pos - (seg as f32);
        let (r0, g0, b0) = stops[seg];
        let (r1, g1, b1) = stops[seg + 1];
        out.push((
            lerp_u8(r0, r1, lt),
            lerp_u8(g0, g1, lt),
            lerp_u8(b0, b1, lt),
        ));
    }
    out
}

fn colors_from_stops(mode: ColorMode, stops: &[(u8, u8, u8)], steps: usize) -> Vec<Color> {
    let rgb = gradient_from_stops(stops, steps);
    colors_from_rgb(mode, &rgb)
}

pub fn build_palette(scheme: ColorScheme, mode: ColorMode, default_background: bool) -> Palette {
    let bg = if default_background {
        None
    } else {
        Some(match mode {
            ColorMode::Mono | ColorMode::Color16 => Color::Black,
            ColorMode::TrueColor => Color::Rgb { r: 0, g: 0, b: 0 },
            ColorMode::Color256 => Color::AnsiValue(16),
        })
    };

    if mode == ColorMode::Mono {
        return Palette {
            colors: Vec::new(),
            bg,
            accent: None,
        };
    }

    let colors = colors_from_stops(mode, scheme.stops(), LEVELS);
    let accent = colors.get(LEVELS / 2).copied();
    Palette { colors, bg, accent }
}

impl Palette {
    /// Foreground and bold flag for a grid cell, `None` when it is not drawn.
    pub fn style(&self, shade: Shade) -> Option<(Option<Color>, bool)> {
        let n = self.colors.len();
        match shade {
            Shade::Hidden => None,
            Shade::Head => Some((self.colors.last().copied(), true)),
            Shade::Lit => Some((self.colors.get(n.saturating_sub(2)).copied(), false)),
            Shade::Fade(pct) => {
                // Trail levels skip the head color.
                let top = n.saturating_sub(2) as u32;
                let idx = (pct.min(100) as u32 * top + 50) / 100;
                Some((self.colors.get(idx as usize).copied(), false))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_levels_brighten_with_opacity() {
        let p = build_palette(ColorScheme::Green, ColorMode::TrueColor, false);
        assert_eq!(p.colors.len(), LEVELS);
        let low = p.style(Shade::Fade(5)).unwrap().0;
        let high = p.style(Shade::Fade(95)).unwrap().0;
        assert_eq!(low, p.colors.first().copied());
        assert_eq!(high, p.colors.get(LEVELS - 2).copied());
    }

    #[test]
    fn head_is_brightest_and_bold() {
        let p = build_palette(ColorScheme::Cyan, ColorMode::Color256, false);
        assert_eq!(p.style(Shade::Head), Some((p.colors.last().copied(), true)));
        assert_eq!(p.style(Shade::Hidden), None);
    }

    #[test]
    fn mono_has_no_foreground() {
        let p = build_palette(ColorScheme::Green, ColorMode::Mono, true);
        assert_eq!(p.style(Shade::Lit), Some((None, false)));
        assert_eq!(p.style(Shade::Head), Some((None, true)));
        assert_eq!(p.bg, None);
    }

    #[test]
    fn color256_maps_pure_green_into_cube() {
        assert_eq!(rgb_to_ansi256(0, 255, 0), 46);
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
    }

    #[test]
    fn parses_scheme_aliases() {
        assert_eq!(ColorScheme::parse("Grey").unwrap(), ColorScheme::Gray);
        assert_eq!(ColorScheme::parse("gold").unwrap(), ColorScheme::Amber);
        assert!(ColorScheme::parse("mauve").is_err());
    }
}
