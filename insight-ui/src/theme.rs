//! Colours shared by the components.

use insight_dom::Color;

pub const PANEL_BG: Color = Color::oklch(0.22, 0.015, 260.0);
pub const PANEL_BORDER: Color = Color::oklch(0.45, 0.02, 260.0);
pub const TEXT: Color = Color::oklch(0.93, 0.01, 260.0);
pub const TEXT_MUTED: Color = Color::oklch(0.7, 0.015, 260.0);
pub const HEADING: Color = Color::oklch(0.97, 0.005, 260.0);
pub const ACCENT: Color = Color::oklch(0.78, 0.15, 155.0);
pub const ACCENT_BG: Color = Color::oklch(0.4, 0.09, 155.0);
pub const DANGER: Color = Color::oklch(0.72, 0.16, 25.0);
pub const DANGER_BG: Color = Color::oklch(0.38, 0.1, 25.0);
pub const CTA_BG: Color = Color::oklch(0.62, 0.14, 90.0);
pub const GRID: Color = Color::oklch(0.35, 0.01, 260.0);
