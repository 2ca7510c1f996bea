use insight_dom::text::{display_width, truncate_to_width, wrap_words};
use insight_dom::{Buffer, Rect, Rgb};

use super::{BarChart, Geometry, EMPTY_MESSAGE, LABEL_ROWS};
use crate::summary::format::compact;
use crate::theme;

/// Partial block glyphs, in eighths of a row.
const EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub(super) fn chart(chart: &BarChart, geo: &Geometry, area: Rect, buf: &mut Buffer) {
    draw_axes(geo, area, buf);
    for (index, point) in chart.points.iter().enumerate() {
        let color = point.color().to_rgb();
        let top = draw_bar(geo, index, point.value, color, buf);
        let label = compact(point.value);
        put_centered(buf, geo.slot_x(index), geo.slot_width, top.saturating_sub(1), &label, theme::TEXT.to_rgb());
        let lines = wrap_words(point.label(), geo.slot_width.saturating_sub(1).max(1) as usize);
        for (row, line) in lines.iter().take(LABEL_ROWS as usize).enumerate() {
            put_centered(
                buf,
                geo.slot_x(index),
                geo.slot_width,
                geo.baseline + 1 + row as u16,
                line,
                theme::TEXT_MUTED.to_rgb(),
            );
        }
    }
}

pub(super) fn empty(area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let y = area.y + area.height / 2;
    put_centered(buf, area.x, area.width, y, EMPTY_MESSAGE, theme::TEXT_MUTED.to_rgb());
}

fn draw_axes(geo: &Geometry, area: Rect, buf: &mut Buffer) {
    let axis_x = geo.plot_x - 1;
    let text = theme::TEXT_MUTED.to_rgb();
    let grid = theme::GRID.to_rgb();

    for y in geo.plot_top..geo.baseline {
        put(buf, axis_x, y, '│', text);
    }
    put(buf, axis_x, geo.baseline, '└', text);
    for x in geo.plot_x..geo.plot_x + geo.plot_width {
        put(buf, x, geo.baseline, '─', text);
    }

    let height = geo.plot_height() as f64;
    for &tick in &geo.scale.ticks {
        let y = geo.baseline - (geo.scale.fraction(tick) * height).round() as u16;
        let label = compact(tick);
        let label_x = area.x + geo.axis_width.saturating_sub(display_width(&label) as u16);
        put_str(buf, label_x, y, &label, text, axis_x);
        if y == geo.baseline {
            continue;
        }
        // Dashed gridline
        for x in (geo.plot_x..geo.plot_x + geo.plot_width).step_by(2) {
            put(buf, x, y, '╌', grid);
        }
    }
}

/// Draw one bar. Returns the row of its topmost drawn cell.
fn draw_bar(geo: &Geometry, index: usize, value: f64, color: Rgb, buf: &mut Buffer) -> u16 {
    let eighths = (geo.scale.fraction(value) * geo.plot_height() as f64 * 8.0).round() as u16;
    let full = eighths / 8;
    let partial = (eighths % 8) as usize;
    let x0 = geo.bar_x(index);

    for x in x0..x0 + geo.bar_width {
        for row in 0..full {
            put(buf, x, geo.baseline - 1 - row, EIGHTHS[8], color);
        }
        if partial > 0 {
            put(buf, x, geo.baseline - 1 - full, EIGHTHS[partial], color);
        }
    }
    geo.baseline - full - u16::from(partial > 0)
}

fn put(buf: &mut Buffer, x: u16, y: u16, ch: char, fg: Rgb) {
    if let Some(cell) = buf.get_mut(x, y) {
        cell.char = ch;
        cell.fg = fg;
        cell.wide_continuation = false;
    }
}

/// Write `text` from `x`, stopping before column `limit`.
fn put_str(buf: &mut Buffer, x: u16, y: u16, text: &str, fg: Rgb, limit: u16) {
    let mut col = x;
    for ch in text.chars() {
        if col >= limit {
            break;
        }
        put(buf, col, y, ch, fg);
        col += 1;
    }
}

fn put_centered(buf: &mut Buffer, x: u16, width: u16, y: u16, text: &str, fg: Rgb) {
    let text = truncate_to_width(text, width as usize);
    let offset = (width as usize).saturating_sub(display_width(&text)) / 2;
    put_str(buf, x + offset as u16, y, &text, fg, x + width);
}
