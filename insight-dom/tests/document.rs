use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use insight_dom::{Document, Key, KeyEvent, ListenerGuard};

fn escape() -> KeyEvent {
    KeyEvent::plain(Key::Escape)
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_listener_receives_keys_until_guard_dropped() {
    let doc = Document::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let h = hits.clone();
    let guard = doc.add_key_listener(move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(doc.dispatch_key(&escape()), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    drop(guard);
    assert_eq!(doc.dispatch_key(&escape()), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_attach_and_detach_counts() {
    let doc = Document::new();
    assert_eq!(doc.listener_count(), 0);

    let a = doc.add_key_listener(|_| {});
    let b = doc.add_key_listener(|_| {});
    assert_eq!(doc.listener_count(), 2);
    assert_eq!(doc.attach_count(), 2);
    assert_ne!(a.id(), b.id());

    drop(a);
    assert_eq!(doc.listener_count(), 1);
    assert_eq!(doc.detach_count(), 1);

    drop(b);
    assert_eq!(doc.listener_count(), 0);
    assert_eq!(doc.attach_count(), 2);
    assert_eq!(doc.detach_count(), 2);
}

#[test]
fn test_clones_share_registry() {
    let doc = Document::new();
    let other = doc.clone();

    let _guard = other.add_key_listener(|_| {});
    assert_eq!(doc.listener_count(), 1);
}

#[test]
fn test_guard_outliving_document_is_harmless() {
    let doc = Document::new();
    let guard = doc.add_key_listener(|_| {});
    drop(doc);
    drop(guard);
}

#[test]
fn test_listener_sees_key_and_modifiers() {
    let doc = Document::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let s = seen.clone();
    let _guard = doc.add_key_listener(move |event| s.lock().unwrap().push(*event));

    doc.dispatch_key(&KeyEvent::plain(Key::Char('q')));
    doc.dispatch_key(&escape());

    assert_eq!(
        *seen.lock().unwrap(),
        vec![KeyEvent::plain(Key::Char('q')), escape()]
    );
}

// ============================================================================
// Re-entrancy
// ============================================================================

#[test]
fn test_listener_removed_mid_dispatch_is_skipped() {
    let doc = Document::new();
    let second_hits = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<ListenerGuard>>> = Arc::new(Mutex::new(None));

    // First listener drops the second listener's guard.
    let s = slot.clone();
    let _first = doc.add_key_listener(move |_| {
        s.lock().unwrap().take();
    });

    let h = second_hits.clone();
    let second = doc.add_key_listener(move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });
    *slot.lock().unwrap() = Some(second);

    assert_eq!(doc.dispatch_key(&escape()), 1);
    assert_eq!(second_hits.load(Ordering::SeqCst), 0);
    assert_eq!(doc.listener_count(), 1);
}

#[test]
fn test_listener_may_register_during_dispatch() {
    let doc = Document::new();
    let added: Arc<Mutex<Vec<ListenerGuard>>> = Arc::new(Mutex::new(Vec::new()));

    let d = doc.clone();
    let a = added.clone();
    let _guard = doc.add_key_listener(move |_| {
        a.lock().unwrap().push(d.add_key_listener(|_| {}));
    });

    // The new listener is not part of the running dispatch.
    assert_eq!(doc.dispatch_key(&escape()), 1);
    assert_eq!(doc.listener_count(), 2);
}
