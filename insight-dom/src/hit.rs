use crate::element::{find_element, Content, Element};
use crate::layout::LayoutResult;

/// Ids from the root down to the topmost element containing the point.
///
/// Siblings are searched from the top of the paint order down: higher
/// z-index first, later siblings before earlier ones. Returns an empty path
/// when the root itself does not contain the point.
pub fn hit_path(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Vec<String> {
    let mut path = Vec::new();
    descend(layout, root, x, y, &mut path);
    path
}

fn descend(layout: &LayoutResult, element: &Element, x: u16, y: u16, path: &mut Vec<String>) -> bool {
    let Some(rect) = layout.get(&element.id) else {
        return false;
    };
    if !rect.contains(x, y) {
        return false;
    }

    path.push(element.id.clone());

    if let Content::Children(children) = &element.content {
        let mut order: Vec<(usize, &Element)> = children.iter().enumerate().collect();
        order.sort_by_key(|(i, child)| (std::cmp::Reverse(child.z_index), std::cmp::Reverse(*i)));
        for (_, child) in order {
            if descend(layout, child, x, y, path) {
                break;
            }
        }
    }
    true
}

/// Find the deepest clickable element at the given coordinates.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_path(layout, root, x, y)
        .into_iter()
        .rev()
        .find(|id| find_element(root, id).is_some_and(|el| el.clickable))
}
