use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::{align_offset, char_width, display_width, truncate_to_width, wrap_words};
use crate::types::{Backdrop, Border, Color, Rgb, TextStyle, TextWrap};

/// An element queued for drawing with everything it inherits from ancestors.
struct RenderItem<'a> {
    element: &'a Element,
    z_index: i16,
    tree_order: usize,
    clip: Rect,
    opacity: f32,
    foreground: Option<Color>,
}

/// Draw the element tree into `buf` using a layout computed for the same tree.
///
/// Elements are painted in ascending z-index, tree order breaking ties.
/// Children inherit their parent's z-index as a floor, the product of
/// ancestor opacities, and the nearest ancestor foreground colour.
pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let mut items = Vec::new();
    let screen = Rect::from_size(buf.width(), buf.height());
    collect(root, layout, &mut items, root.z_index, screen, 1.0, None);

    items.sort_by_key(|item| (item.z_index, item.tree_order));

    for item in &items {
        render_item(item, layout, buf);
    }
}

fn collect<'a>(
    element: &'a Element,
    layout: &LayoutResult,
    items: &mut Vec<RenderItem<'a>>,
    parent_z: i16,
    parent_clip: Rect,
    parent_opacity: f32,
    parent_fg: Option<Color>,
) {
    let Some(rect) = layout.get(&element.id) else {
        return;
    };
    let z_index = element.z_index.max(parent_z);
    let opacity = parent_opacity * element.style.opacity;
    let foreground = element.style.foreground.or(parent_fg);

    items.push(RenderItem {
        element,
        z_index,
        tree_order: items.len(),
        clip: parent_clip,
        opacity,
        foreground,
    });

    if let Content::Children(children) = &element.content {
        let clip = rect.intersect(parent_clip);
        for child in children {
            collect(child, layout, items, z_index, clip, opacity, foreground);
        }
    }
}

fn render_item(item: &RenderItem, layout: &LayoutResult, buf: &mut Buffer) {
    let element = item.element;
    let Some(rect) = layout.get(&element.id).copied() else {
        return;
    };

    if let Backdrop::Dim(amount) = element.backdrop {
        apply_dim(buf, amount);
    }

    let visible = rect.intersect(item.clip);
    if visible.is_empty() {
        return;
    }

    if let Some(bg) = element.style.background {
        fill_rect(buf, visible, bg.to_rgb(), item.opacity);
    }

    if element.style.border != Border::None {
        render_border(buf, rect, visible, element.style.border, item);
    }

    let border = u16::from(element.style.border != Border::None);
    let inner = rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    );

    match &element.content {
        Content::Text(text) => render_text(buf, text, inner, item),
        Content::Custom(custom) => {
            let area = inner.intersect(item.clip);
            if area.is_empty() {
                return;
            }
            let before = (item.opacity < 1.0).then(|| snapshot(buf, area));
            custom.render(area, buf);
            if let Some(before) = before {
                fade_over(buf, area, &before, item.opacity);
            }
        }
        Content::None | Content::Children(_) => {}
    }
}

fn apply_dim(buf: &mut Buffer, amount: f32) {
    for cell in buf.cells_mut() {
        cell.fg = cell.fg.darken(amount);
        cell.bg = cell.bg.darken(amount);
    }
}

fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Rgb, opacity: f32) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                let under = cell.bg;
                *cell = Cell::default();
                cell.bg = under.blend(bg, opacity);
            }
        }
    }
}

fn put_char(buf: &mut Buffer, x: u16, y: u16, ch: char, fg: Rgb, style: TextStyle, opacity: f32) {
    let width = char_width(ch);
    if let Some(cell) = buf.get_mut(x, y) {
        cell.char = ch;
        cell.fg = cell.bg.blend(fg, opacity);
        cell.style = style;
        cell.wide_continuation = false;
    }
    if width == 2 {
        if let Some(next) = buf.get_mut(x + 1, y) {
            next.char = ' ';
            next.wide_continuation = true;
        }
    }
}

fn render_border(buf: &mut Buffer, rect: Rect, visible: Rect, border: Border, item: &RenderItem) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let (tl, tr, bl, br, h, v) = match border {
        Border::None => return,
        Border::Single => ('┌', '┐', '└', '┘', '─', '│'),
        Border::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
    };
    let fg = item.foreground.map(|c| c.to_rgb()).unwrap_or(Cell::default().fg);
    let style = TextStyle::new();
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    let mut draw = |x: u16, y: u16, ch: char| {
        if visible.contains(x, y) {
            put_char(buf, x, y, ch, fg, style, item.opacity);
        }
    };

    for x in rect.x + 1..right {
        draw(x, rect.y, h);
        draw(x, bottom, h);
    }
    for y in rect.y + 1..bottom {
        draw(rect.x, y, v);
        draw(right, y, v);
    }
    draw(rect.x, rect.y, tl);
    draw(right, rect.y, tr);
    draw(rect.x, bottom, bl);
    draw(right, bottom, br);
}

fn render_text(buf: &mut Buffer, text: &str, inner: Rect, item: &RenderItem) {
    if inner.is_empty() {
        return;
    }
    let element = item.element;
    let max_width = inner.width as usize;
    let lines: Vec<String> = match element.text_wrap {
        TextWrap::Wrap => wrap_words(text, max_width),
        TextWrap::Truncate => text.lines().map(|l| truncate_to_width(l, max_width)).collect(),
        TextWrap::NoWrap => text.lines().map(str::to_string).collect(),
    };

    let fg = item
        .foreground
        .map(|c| c.to_rgb())
        .unwrap_or(Cell::default().fg);
    let style = element.style.text_style;
    let clip = inner.intersect(item.clip);

    for (row, line) in lines.iter().enumerate() {
        let y = inner.y + row as u16;
        if y >= inner.bottom() {
            break;
        }
        let offset = align_offset(display_width(line), max_width, element.text_align);
        let mut x = inner.x + offset as u16;
        for ch in line.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if x + w > inner.right() {
                break;
            }
            if clip.contains(x, y) {
                put_char(buf, x, y, ch, fg, style, item.opacity);
            }
            x += w;
        }
    }
}

fn snapshot(buf: &Buffer, area: Rect) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(area.width as usize * area.height as usize);
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            cells.push(buf.get(x, y).copied().unwrap_or_default());
        }
    }
    cells
}

/// Blend what custom content drew in `area` over the cells that were there before.
fn fade_over(buf: &mut Buffer, area: Rect, before: &[Cell], opacity: f32) {
    let mut i = 0;
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let (Some(cell), Some(under)) = (buf.get_mut(x, y), before.get(i)) {
                cell.fg = under.bg.blend(cell.fg, opacity);
                cell.bg = under.bg.blend(cell.bg, opacity);
            }
            i += 1;
        }
    }
}
