#![forbid(unsafe_code)]

//! Integration tests for the modal overlay lifecycle.
//!
//! These tests drive an [`OverlayController`] the way a host page would:
//! toggle it open, commit the render, dispatch key and pointer events at
//! elements, and observe focus plus dismissal notifications.
//!
//! # Invariants tested
//!
//! 1. Trap closure: Tab presses never move focus out of the panel.
//! 2. Escape closes exactly once and focus returns to the opener.
//! 3. A repeated open saves focus once and schedules one initial focus.
//! 4. Only a click whose target is the backdrop itself dismisses.
//! 5. With both dismiss flags off, only `request_close` dismisses.
//! 6. Wrap-around at both ends of the focusable set.
//! 7. Round trip: opener → panel → opener.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use lds_core::dom::{Document, ElementId, Tag};
use lds_core::event::{DomEvent, KeyCode, KeyEvent, Modifiers, PointerEvent};
use lds_widgets::focus::enumerate_focusable;
use lds_widgets::modal::{DismissReason, Dismissal, FOOTER_SLOT, OverlayConfig, OverlayController};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A page with an opener button `E` and a modal host holding `[A, B, C]`.
///
/// ```text
///   body
///   ├── button E
///   └── lds-modal
///       ├── button A
///       ├── button B
///       └── button C   (slot="footer")
/// ```
struct Page {
    doc: Document,
    opener: ElementId,
    host: ElementId,
    buttons: [ElementId; 3],
}

fn page() -> Page {
    let mut doc = Document::new();
    let opener = doc.append_new(doc.root(), Tag::Button);
    let host = doc.append_new(doc.root(), Tag::Custom("lds-modal".into()));
    let a = doc.append_new(host, Tag::Button);
    let b = doc.append_new(host, Tag::Button);
    let c = doc.append_new(host, Tag::Button);
    doc.set_attr(c, "slot", FOOTER_SLOT);
    Page {
        doc,
        opener,
        host,
        buttons: [a, b, c],
    }
}

type Seen = Rc<RefCell<Vec<Dismissal>>>;

fn open(page: &mut Page, config: OverlayConfig) -> (OverlayController, Seen) {
    let mut ctl = OverlayController::new(page.host, config);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    ctl.add_dismiss_listener(move |d| sink.borrow_mut().push(*d));
    page.doc.focus(page.opener);
    assert!(ctl.request_open(&mut page.doc));
    ctl.commit(&mut page.doc);
    (ctl, seen)
}

fn press(ctl: &mut OverlayController, doc: &mut Document, key: KeyEvent) -> DomEvent {
    let target = doc.active_element().unwrap_or(doc.root());
    let mut event = DomEvent::key(key, target);
    ctl.handle_event(doc, &mut event);
    event
}

fn tab(ctl: &mut OverlayController, doc: &mut Document) -> DomEvent {
    press(ctl, doc, KeyEvent::new(KeyCode::Tab))
}

fn shift_tab(ctl: &mut OverlayController, doc: &mut Document) -> DomEvent {
    press(
        ctl,
        doc,
        KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT),
    )
}

#[derive(Default)]
struct Messages(Vec<String>);

struct MessageCapture {
    state: Arc<Mutex<Messages>>,
}

impl<S: Subscriber> Layer<S> for MessageCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Visitor(Option<String>);
        impl tracing::field::Visit for Visitor {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.0 = Some(value.to_owned());
                }
            }

            fn record_debug(
                &mut self,
                field: &tracing::field::Field,
                value: &dyn std::fmt::Debug,
            ) {
                if field.name() == "message" {
                    self.0 = Some(format!("{value:?}").trim_matches('"').to_owned());
                }
            }
        }
        let mut visitor = Visitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.state.lock().expect("capture lock").0.push(message);
        }
    }
}

fn capture_messages<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let state = Arc::new(Mutex::new(Messages::default()));
    let subscriber = tracing_subscriber::registry().with(MessageCapture {
        state: Arc::clone(&state),
    });
    let guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();
    let out = f();
    drop(guard);
    let messages = std::mem::take(&mut state.lock().expect("capture lock").0);
    (out, messages)
}

// ---------------------------------------------------------------------------
// Trap closure
// ---------------------------------------------------------------------------

#[test]
fn tab_presses_stay_inside_panel_and_cycle_back() {
    let mut page = page();
    let (mut ctl, _) = open(&mut page, OverlayConfig::default());
    let panel = ctl.panel().expect("panel");
    let set = enumerate_focusable(&page.doc, panel);
    assert_eq!(set, page.buttons.to_vec());

    let start = page.doc.active_element();
    for _ in 0..set.len() {
        let ev = tab(&mut ctl, &mut page.doc);
        assert!(ev.default_prevented());
        let active = page.doc.active_element().expect("focus");
        assert!(set.contains(&active));
    }
    assert_eq!(page.doc.active_element(), start);
}

#[test]
fn wrap_around_at_both_ends() {
    let mut page = page();
    let [a, _, c] = page.buttons;
    let (mut ctl, _) = open(&mut page, OverlayConfig::default());

    page.doc.focus(c);
    tab(&mut ctl, &mut page.doc);
    assert_eq!(page.doc.active_element(), Some(a));

    shift_tab(&mut ctl, &mut page.doc);
    assert_eq!(page.doc.active_element(), Some(c));
}

#[test]
fn focus_moved_outside_is_pulled_back_in() {
    let mut page = page();
    let [a, _, _] = page.buttons;
    let (mut ctl, _) = open(&mut page, OverlayConfig::default());
    let panel = ctl.panel().expect("panel");

    // Focus escaped to the panel itself (e.g. a click on padding).
    page.doc.focus(panel);
    tab(&mut ctl, &mut page.doc);
    assert_eq!(page.doc.active_element(), Some(a));
}

// ---------------------------------------------------------------------------
// Dismissal
// ---------------------------------------------------------------------------

#[test]
fn escape_dismisses_once_and_restores_opener() {
    let mut page = page();
    let (mut ctl, seen) = open(&mut page, OverlayConfig::default());

    let ev = press(&mut ctl, &mut page.doc, KeyEvent::new(KeyCode::Escape));
    assert!(ev.propagation_stopped());
    // A second Escape lands on the opener, outside any panel.
    press(&mut ctl, &mut page.doc, KeyEvent::new(KeyCode::Escape));

    assert_eq!(
        *seen.borrow(),
        vec![Dismissal {
            reason: DismissReason::Escape
        }]
    );
    assert_eq!(page.doc.active_element(), Some(page.opener));
    assert!(!ctl.is_open());
}

#[test]
fn bubbled_click_from_panel_does_not_dismiss() {
    let mut page = page();
    let [a, _, _] = page.buttons;
    let (mut ctl, seen) = open(&mut page, OverlayConfig::default());
    let panel = ctl.panel().expect("panel");
    let backdrop = ctl.backdrop().expect("backdrop");

    for target in [panel, a] {
        let mut ev = DomEvent::pointer(PointerEvent::click(), target);
        assert_eq!(ctl.handle_event(&mut page.doc, &mut ev), None);
    }
    assert!(ctl.is_open());

    let mut ev = DomEvent::pointer(PointerEvent::click(), backdrop);
    assert!(ctl.handle_event(&mut page.doc, &mut ev).is_some());
    assert_eq!(seen.borrow()[0].reason, DismissReason::Backdrop);
}

#[test]
fn disabled_dismissals_leave_only_programmatic_close() {
    let mut page = page();
    let config = OverlayConfig::new()
        .dismiss_on_backdrop(false)
        .dismiss_on_escape(false);
    let (mut ctl, seen) = open(&mut page, config);
    let backdrop = ctl.backdrop().expect("backdrop");

    press(&mut ctl, &mut page.doc, KeyEvent::new(KeyCode::Escape));
    let mut click = DomEvent::pointer(PointerEvent::click(), backdrop);
    ctl.handle_event(&mut page.doc, &mut click);
    assert!(seen.borrow().is_empty());
    assert!(ctl.is_open());

    ctl.request_close(&mut page.doc);
    assert_eq!(
        seen.borrow().iter().map(|d| d.reason).collect::<Vec<_>>(),
        vec![DismissReason::Programmatic]
    );
}

#[test]
fn flags_can_change_while_open() {
    let mut page = page();
    let (mut ctl, seen) = open(&mut page, OverlayConfig::default());
    ctl.set_dismiss_on_escape(false);
    press(&mut ctl, &mut page.doc, KeyEvent::new(KeyCode::Escape));
    assert!(ctl.is_open());
    ctl.set_dismiss_on_escape(true);
    press(&mut ctl, &mut page.doc, KeyEvent::new(KeyCode::Escape));
    assert!(!ctl.is_open());
    assert_eq!(seen.borrow().len(), 1);
}

// ---------------------------------------------------------------------------
// Re-entrancy
// ---------------------------------------------------------------------------

#[test]
fn double_open_saves_and_schedules_once() {
    let mut page = page();
    let mut ctl = OverlayController::new(page.host, OverlayConfig::default());
    page.doc.focus(page.opener);

    let (_, messages) = capture_messages(|| {
        ctl.request_open(&mut page.doc);
        ctl.request_open(&mut page.doc);
    });
    let opens = messages.iter().filter(|m| *m == "overlay.open").count();
    assert_eq!(opens, 1, "{messages:?}");
    assert!(ctl.has_pending_initial_focus());

    assert!(ctl.commit(&mut page.doc));
    assert!(!ctl.has_pending_initial_focus());
    // Nothing left to run on the next commit.
    assert!(!ctl.commit(&mut page.doc));
}

#[test]
fn dismissal_is_logged_with_reason() {
    let mut page = page();
    let (mut ctl, _) = open(&mut page, OverlayConfig::default());
    let (_, messages) = capture_messages(|| {
        ctl.request_close(&mut page.doc);
        ctl.request_close(&mut page.doc);
    });
    let dismissals = messages.iter().filter(|m| *m == "overlay.dismiss").count();
    assert_eq!(dismissals, 1, "{messages:?}");
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[test]
fn opener_panel_opener_round_trip() {
    let mut page = page();
    let [a, _, _] = page.buttons;
    let (mut ctl, _) = open(&mut page, OverlayConfig::default());
    assert_eq!(page.doc.active_element(), Some(a));

    ctl.request_close(&mut page.doc);
    assert_eq!(page.doc.active_element(), Some(page.opener));
}

#[test]
fn empty_overlay_focuses_panel_then_restores() {
    let mut doc = Document::new();
    let opener = doc.append_new(doc.root(), Tag::Button);
    let host = doc.append_new(doc.root(), Tag::Custom("lds-modal".into()));
    let mut ctl = OverlayController::new(host, OverlayConfig::new().heading("Notice"));

    doc.focus(opener);
    ctl.request_open(&mut doc);
    ctl.commit(&mut doc);
    assert_eq!(doc.active_element(), ctl.panel());

    ctl.request_close(&mut doc);
    assert_eq!(doc.active_element(), Some(opener));
    assert!(doc.children(host).is_empty());
}

#[test]
fn reopen_after_close_works_like_first_open() {
    let mut page = page();
    let [a, _, _] = page.buttons;
    let (mut ctl, seen) = open(&mut page, OverlayConfig::default());
    ctl.request_close(&mut page.doc);

    ctl.request_open(&mut page.doc);
    ctl.commit(&mut page.doc);
    assert_eq!(page.doc.active_element(), Some(a));
    press(&mut ctl, &mut page.doc, KeyEvent::new(KeyCode::Escape));
    assert_eq!(page.doc.active_element(), Some(page.opener));
    assert_eq!(seen.borrow().len(), 2);
}
