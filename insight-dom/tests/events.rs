use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use insight_dom::{
    dispatch_click, hit_path, hit_test, Element, LayoutResult, MouseButton, Rect,
};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let read = {
        let count = count.clone();
        move || count.load(Ordering::SeqCst)
    };
    (count, read)
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_point_inside() {
    let root = Element::box_()
        .id("root")
        .clickable(true)
        .child(Element::text("Click me").id("btn").clickable(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("btn", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&layout, &root, 15, 11), Some("btn".to_string()));
    assert_eq!(hit_test(&layout, &root, 5, 5), Some("root".to_string()));
    assert_eq!(hit_test(&layout, &root, 150, 150), None);
}

#[test]
fn test_hit_test_overlapping_elements() {
    // Later siblings paint on top
    let root = Element::box_()
        .id("root")
        .child(Element::box_().id("bottom").clickable(true))
        .child(Element::box_().id("top").clickable(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 100)),
        ("bottom", Rect::new(10, 10, 50, 50)),
        ("top", Rect::new(30, 30, 50, 50)),
    ]);

    assert_eq!(hit_test(&layout, &root, 40, 40), Some("top".to_string()));
    assert_eq!(hit_test(&layout, &root, 15, 15), Some("bottom".to_string()));
}

#[test]
fn test_hit_test_z_index_beats_tree_order() {
    let root = Element::box_()
        .id("root")
        .child(Element::box_().id("raised").z_index(10).clickable(true))
        .child(Element::box_().id("later").clickable(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 100)),
        ("raised", Rect::new(0, 0, 50, 50)),
        ("later", Rect::new(0, 0, 50, 50)),
    ]);

    assert_eq!(hit_test(&layout, &root, 5, 5), Some("raised".to_string()));
}

#[test]
fn test_hit_test_only_clickable() {
    let root = Element::box_()
        .id("root")
        .child(Element::text("Not clickable").id("text"));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("text", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&layout, &root, 15, 11), None);
}

#[test]
fn test_hit_path_root_to_target() {
    let root = Element::box_().id("root").child(
        Element::box_()
            .id("panel")
            .child(Element::text("x").id("label")),
    );

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 80, 24)),
        ("panel", Rect::new(10, 5, 40, 10)),
        ("label", Rect::new(12, 6, 10, 1)),
    ]);

    assert_eq!(hit_path(&layout, &root, 13, 6), vec!["root", "panel", "label"]);
    assert_eq!(hit_path(&layout, &root, 1, 1), vec!["root"]);
    assert!(hit_path(&layout, &root, 90, 1).is_empty());
}

// ============================================================================
// Click Dispatch
// ============================================================================

#[test]
fn test_click_bubbles_to_ancestors() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let (o1, o2) = (order.clone(), order.clone());

    let root = Element::box_()
        .id("root")
        .on_click(move |_| o1.lock().unwrap().push("root"))
        .child(
            Element::box_()
                .id("inner")
                .on_click(move |_| o2.lock().unwrap().push("inner")),
        );
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 20, 10)),
        ("inner", Rect::new(2, 2, 5, 5)),
    ]);

    let outcome = dispatch_click(&root, &layout, 3, 3, MouseButton::Left);

    assert_eq!(*order.lock().unwrap(), vec!["inner", "root"]);
    assert_eq!(outcome.target.as_deref(), Some("inner"));
    assert_eq!(outcome.handled_by, vec!["inner", "root"]);
    assert_eq!(outcome.stopped_at, None);
}

#[test]
fn test_stop_propagation_shields_ancestors() {
    let (backdrop_hits, backdrop_count) = counter();

    let root = Element::box_()
        .id("backdrop")
        .on_click(move |_| {
            backdrop_hits.fetch_add(1, Ordering::SeqCst);
        })
        .child(
            Element::box_()
                .id("panel")
                .on_click(|event| event.stop_propagation())
                .child(Element::text("body").id("body")),
        );
    let layout = create_layout(&[
        ("backdrop", Rect::new(0, 0, 40, 20)),
        ("panel", Rect::new(10, 5, 20, 10)),
        ("body", Rect::new(11, 6, 10, 1)),
    ]);

    // On a non-clickable descendant of the panel
    let outcome = dispatch_click(&root, &layout, 12, 6, MouseButton::Left);
    assert_eq!(outcome.target.as_deref(), Some("body"));
    assert_eq!(outcome.stopped_at.as_deref(), Some("panel"));
    assert_eq!(backdrop_count(), 0);

    // Outside the panel
    dispatch_click(&root, &layout, 1, 1, MouseButton::Left);
    assert_eq!(backdrop_count(), 1);
}

#[test]
fn test_current_target_follows_bubbling() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (s1, s2) = (seen.clone(), seen.clone());

    let root = Element::box_()
        .id("root")
        .on_click(move |e| {
            s1.lock()
                .unwrap()
                .push((e.target.clone(), e.current_target().to_string()))
        })
        .child(Element::box_().id("leaf").on_click(move |e| {
            s2.lock()
                .unwrap()
                .push((e.target.clone(), e.current_target().to_string()))
        }));
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 10, 10)),
        ("leaf", Rect::new(0, 0, 2, 2)),
    ]);

    dispatch_click(&root, &layout, 1, 1, MouseButton::Left);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], ("leaf".to_string(), "leaf".to_string()));
    assert_eq!(seen[1], ("leaf".to_string(), "root".to_string()));
}

#[test]
fn test_non_left_buttons_do_not_click() {
    let (hits, count) = counter();
    let root = Element::box_().id("root").on_click(move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    let layout = create_layout(&[("root", Rect::new(0, 0, 10, 10))]);

    let outcome = dispatch_click(&root, &layout, 1, 1, MouseButton::Right);
    dispatch_click(&root, &layout, 1, 1, MouseButton::Middle);

    assert_eq!(count(), 0);
    assert_eq!(outcome.target, None);
}

#[test]
fn test_click_outside_root_is_ignored() {
    let (hits, count) = counter();
    let root = Element::box_().id("root").on_click(move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    let layout = create_layout(&[("root", Rect::new(0, 0, 10, 10))]);

    let outcome = dispatch_click(&root, &layout, 50, 50, MouseButton::Left);

    assert_eq!(count(), 0);
    assert!(outcome.handled_by.is_empty());
}
