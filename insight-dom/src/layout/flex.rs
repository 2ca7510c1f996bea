use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::{display_width, wrap_words};
use crate::types::{Align, Border, Direction, Justify, Position, Size, TextWrap};

pub type LayoutResult = HashMap<String, Rect>;

pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    layout_element(element, available, &mut result);
    result
}

fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) {
    let margin = &element.margin;
    let area = if element.position == Position::Absolute {
        available
    } else {
        available.shrink(margin.top, margin.right, margin.bottom, margin.left)
    };

    let width = resolve_size(element.width, area.width, element, true, area.width);
    let height = resolve_size(element.height, area.height, element, false, width);
    let mut rect = Rect::new(area.x, area.y, width, height);

    if element.position != Position::Static {
        rect = rect.offset(element.left.unwrap_or(0), element.top.unwrap_or(0));
    }

    result.insert(element.id.clone(), rect);
    layout_children(element, rect, result);
}

fn border_size(element: &Element) -> u16 {
    if element.style.border == Border::None {
        0
    } else {
        1
    }
}

fn inner_rect(element: &Element, rect: Rect) -> Rect {
    let border = border_size(element);
    rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    )
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };

    if children.is_empty() {
        return;
    }

    let (flow_children, absolute_children): (Vec<&Element>, Vec<&Element>) = children
        .iter()
        .partition(|c| c.position != Position::Absolute);

    let inner = inner_rect(element, rect);
    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };

    // Cross sizes first: a column child's height depends on its width.
    let crosses: Vec<u16> = flow_children
        .iter()
        .map(|child| cross_extent(element, child, is_row, cross_size))
        .collect();

    let gap_total = element.gap * flow_children.len().saturating_sub(1) as u16;
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    let mut mains: Vec<Option<u16>> = Vec::with_capacity(flow_children.len());

    for (child, cross) in flow_children.iter().zip(&crosses) {
        let margin_main = if is_row {
            child.margin.horizontal_total()
        } else {
            child.margin.vertical_total()
        };
        let size = if is_row { child.width } else { child.height };
        let main = match size {
            Size::Fill => None,
            Size::Fixed(n) => Some(n),
            Size::Percent(p) => Some((main_size as f32 * p) as u16),
            Size::Auto => Some(if is_row {
                intrinsic_width(child)
            } else {
                intrinsic_height(child, *cross)
            }),
        };
        let main = main.map(|m| constrain(child, m, is_row));
        match main {
            Some(m) => fixed_total = fixed_total.saturating_add(m + margin_main),
            None => {
                fill_count += 1;
                fixed_total = fixed_total.saturating_add(margin_main);
            }
        }
        mains.push(main);
    }

    let remaining = main_size.saturating_sub(fixed_total.saturating_add(gap_total));
    let fill_size = if fill_count > 0 {
        remaining / fill_count
    } else {
        0
    };

    let mains: Vec<u16> = flow_children
        .iter()
        .zip(mains)
        .map(|(child, m)| m.unwrap_or_else(|| constrain(child, fill_size, is_row)))
        .collect();

    let used: u16 = flow_children
        .iter()
        .zip(&mains)
        .map(|(child, m)| {
            let margin = if is_row {
                child.margin.horizontal_total()
            } else {
                child.margin.vertical_total()
            };
            m.saturating_add(margin)
        })
        .fold(gap_total, u16::saturating_add);
    let extra = main_size.saturating_sub(used);

    let (mut offset, between) = match element.justify {
        Justify::Start => (0, element.gap),
        Justify::End => (extra, element.gap),
        Justify::Center => (extra / 2, element.gap),
        Justify::SpaceBetween if flow_children.len() > 1 => {
            (0, extra / (flow_children.len() - 1) as u16 + element.gap)
        }
        Justify::SpaceBetween => (0, element.gap),
    };

    for (i, child) in flow_children.iter().enumerate() {
        let (before, after) = if is_row {
            (child.margin.left, child.margin.right)
        } else {
            (child.margin.top, child.margin.bottom)
        };
        let (cross_before, cross_after) = if is_row {
            (child.margin.top, child.margin.bottom)
        } else {
            (child.margin.left, child.margin.right)
        };

        let main = mains[i].min(main_size.saturating_sub(offset + before));
        let available_cross = cross_size.saturating_sub(cross_before + cross_after);
        let cross = crosses[i].min(available_cross);

        let cross_offset = match element.align {
            Align::Start | Align::Stretch => cross_before,
            Align::Center => cross_before + available_cross.saturating_sub(cross) / 2,
            Align::End => cross_before + available_cross.saturating_sub(cross),
        };

        let mut child_rect = if is_row {
            Rect::new(inner.x + offset + before, inner.y + cross_offset, main, cross)
        } else {
            Rect::new(inner.x + cross_offset, inner.y + offset + before, cross, main)
        };
        if child.position == Position::Relative {
            child_rect = child_rect.offset(child.left.unwrap_or(0), child.top.unwrap_or(0));
        }

        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, result);

        offset = offset.saturating_add(before + mains[i] + after + between);
    }

    for child in absolute_children {
        layout_element(child, rect, result);
    }
}

fn cross_extent(parent: &Element, child: &Element, is_row: bool, cross_size: u16) -> u16 {
    let (before, after) = if is_row {
        (child.margin.top, child.margin.bottom)
    } else {
        (child.margin.left, child.margin.right)
    };
    let available = cross_size.saturating_sub(before + after);
    let size = if is_row { child.height } else { child.width };
    let cross = match size {
        Size::Fixed(n) => n,
        Size::Fill => available,
        Size::Percent(p) => (cross_size as f32 * p) as u16,
        Size::Auto if parent.align == Align::Stretch => available,
        Size::Auto if is_row => intrinsic_height(child, intrinsic_width(child).min(available)),
        Size::Auto => intrinsic_width(child),
    };
    constrain(child, cross, !is_row).min(available)
}

/// Apply min/max constraints along one axis.
fn constrain(element: &Element, value: u16, is_width: bool) -> u16 {
    let (min, max) = if is_width {
        (element.min_width, element.max_width)
    } else {
        (element.min_height, element.max_height)
    };
    let value = min.map_or(value, |m| value.max(m));
    max.map_or(value, |m| value.min(m))
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool, width: u16) -> u16 {
    let base = match size {
        Size::Fixed(n) => n,
        Size::Fill => available,
        Size::Percent(p) => (available as f32 * p) as u16,
        Size::Auto if is_width => intrinsic_width(element),
        Size::Auto => intrinsic_height(element, width),
    };
    constrain(element, base, is_width).min(available)
}

/// Preferred width of an element including padding and border.
pub(crate) fn intrinsic_width(element: &Element) -> u16 {
    if let Size::Fixed(n) = element.width {
        return n;
    }
    let chrome = element.padding.horizontal_total() + 2 * border_size(element);
    let content = match &element.content {
        Content::None => 0,
        Content::Text(text) => text.lines().map(display_width).max().unwrap_or(0) as u16,
        Content::Custom(custom) => custom.intrinsic_size().0,
        Content::Children(children) => {
            let widths = children
                .iter()
                .filter(|c| c.position != Position::Absolute)
                .map(|c| intrinsic_width(c) + c.margin.horizontal_total());
            if element.direction == Direction::Row {
                let gaps = element.gap * children.len().saturating_sub(1) as u16;
                widths.fold(gaps, u16::saturating_add)
            } else {
                widths.max().unwrap_or(0)
            }
        }
    };
    constrain(element, content.saturating_add(chrome), true)
}

/// Preferred height of an element laid out at `width` columns.
pub(crate) fn intrinsic_height(element: &Element, width: u16) -> u16 {
    if let Size::Fixed(n) = element.height {
        return n;
    }
    let border = border_size(element);
    let chrome = element.padding.vertical_total() + 2 * border;
    let inner_width = width.saturating_sub(element.padding.horizontal_total() + 2 * border);
    let content = match &element.content {
        Content::None => 0,
        Content::Text(text) => match element.text_wrap {
            TextWrap::Wrap => wrap_words(text, inner_width as usize).len() as u16,
            TextWrap::NoWrap | TextWrap::Truncate => text.lines().count().max(1) as u16,
        },
        Content::Custom(custom) => custom.intrinsic_size().1,
        Content::Children(children) => {
            let flow = children.iter().filter(|c| c.position != Position::Absolute);
            if element.direction == Direction::Column {
                let gaps = element.gap * children.len().saturating_sub(1) as u16;
                flow.map(|c| {
                    let child_width = match c.width {
                        Size::Fixed(n) => n.min(inner_width),
                        Size::Auto if element.align != Align::Stretch => {
                            intrinsic_width(c).min(inner_width)
                        }
                        _ => inner_width,
                    };
                    intrinsic_height(c, child_width) + c.margin.vertical_total()
                })
                .fold(gaps, u16::saturating_add)
            } else {
                flow.map(|c| {
                    intrinsic_height(c, intrinsic_width(c).min(inner_width))
                        + c.margin.vertical_total()
                })
                .max()
                .unwrap_or(0)
            }
        }
    };
    constrain(element, content.saturating_add(chrome), false)
}
