//! Color palette.

use crate::ui::{Rgb, Style};

pub const BACKGROUND: Rgb = Rgb::new(22, 22, 30);
pub const SURFACE: Rgb = Rgb::new(36, 36, 48);
pub const TEXT: Rgb = Rgb::new(220, 220, 228);
pub const MUTED: Rgb = Rgb::new(128, 128, 148);
pub const PRIMARY: Rgb = Rgb::new(122, 162, 247);
pub const INTERACT: Rgb = Rgb::new(187, 154, 247);
pub const ERROR: Rgb = Rgb::new(247, 118, 142);
pub const SELECTION: Rgb = Rgb::new(52, 59, 88);

pub fn base() -> Style {
    Style::new().fg(TEXT).bg(BACKGROUND)
}

pub fn muted() -> Style {
    Style::new().fg(MUTED)
}

pub fn title() -> Style {
    Style::new().fg(PRIMARY).bold()
}

pub fn focused() -> Style {
    Style::new().fg(INTERACT).bold()
}

pub fn error() -> Style {
    Style::new().fg(ERROR).bold()
}
