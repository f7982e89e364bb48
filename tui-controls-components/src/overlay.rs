//! Overlay helpers: backdrop dimming and centered placement
//!
//! Call [`render_backdrop`] after the background has been drawn; it dims
//! what is already in the buffer and fills the overlay area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::{Clear, Widget},
    Frame,
};

/// Backdrop appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropStyle {
    /// Dim factor for the background (0.0 = untouched, 1.0 = black)
    pub dim_factor: f32,
    /// Fill color for the overlay area (None = cleared to default)
    pub bg_color: Option<Color>,
}

impl Default for BackdropStyle {
    fn default() -> Self {
        Self {
            dim_factor: 0.5,
            bg_color: None,
        }
    }
}

impl BackdropStyle {
    /// Backdrop with a fill color for the overlay area
    pub fn with_bg(bg_color: Color) -> Self {
        Self {
            bg_color: Some(bg_color),
            ..Default::default()
        }
    }
}

/// Dim everything drawn so far, then clear `area` for overlay content
pub fn render_backdrop(frame: &mut Frame, area: Rect, style: &BackdropStyle) {
    dim_buffer(frame.buffer_mut(), style.dim_factor);
    frame.render_widget(Clear, area);
    if let Some(bg) = style.bg_color {
        frame.render_widget(BgFill(bg), area);
    }
}

/// Scale every cell's colors toward black by `factor`
///
/// Named colors have no RGB value to scale; anything dimmed past half
/// becomes dark gray, the rest keeps its color with the DIM modifier.
pub fn dim_buffer(buffer: &mut Buffer, factor: f32) {
    let factor = factor.clamp(0.0, 1.0);
    if factor == 0.0 {
        return;
    }
    let scale = 1.0 - factor;

    for cell in buffer.content.iter_mut() {
        cell.fg = dim_color(cell.fg, scale);
        cell.bg = dim_color(cell.bg, scale);
        if factor < 0.5 {
            cell.modifier |= ratatui::style::Modifier::DIM;
        }
    }
}

fn dim_color(color: Color, scale: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * scale) as u8,
            (g as f32 * scale) as u8,
            (b as f32 * scale) as u8,
        ),
        Color::Reset => Color::Reset,
        _ if scale <= 0.5 => Color::DarkGray,
        other => other,
    }
}

/// Fills an area with a background color
struct BgFill(Color);

impl Widget for BgFill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                buf[(x, y)].set_bg(self.0);
                buf[(x, y)].set_symbol(" ");
            }
        }
    }
}

/// A `width` x `height` rectangle centered in `area`, kept one cell from its edges
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Move `rect` so it lies inside `bounds` (shrinking it if it is larger)
pub fn clamp_rect(rect: Rect, bounds: Rect) -> Rect {
    let width = rect.width.min(bounds.width);
    let height = rect.height.min(bounds.height);
    let x = rect.x.clamp(bounds.x, bounds.right().saturating_sub(width));
    let y = rect.y.clamp(bounds.y, bounds.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}
