//! Yellow-to-red count gradient shared by the HTML and console reports

use std::fmt;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    /// CSS `rgb(r,g,b)` notation
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// ANSI escape setting this as a truecolor background with black text
    pub fn ansi_background(self) -> String {
        format!("\x1b[30;48;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

/// Map `count` within `[min, max]` onto a yellow-to-red ramp
///
/// Red stays at 255, green falls linearly from 255 at `min` to 0 at `max`. A
/// degenerate range (`min == max`) maps everything to pure red; counts outside the
/// range are clamped.
pub fn gradient(count: u64, min: u64, max: u64) -> Rgb {
    if max <= min {
        return Rgb::RED;
    }

    let count = count.clamp(min, max);
    let scale = (255 * (count - min) as u128 / (max - min) as u128) as u8;

    Rgb {
        r: 255,
        g: 255 - scale,
        b: 0,
    }
}
