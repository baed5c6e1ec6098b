//! Selection tracking tests
//!
//! Tests for completing selections on the draft surface and the toolbar
//! opening / closing in response.

mod common;

use common::{select, test_model};

use relay_compose::editable::SelectionRange;
use relay_compose::messages::{Msg, SurfaceMsg};
use relay_compose::model::FloatingId;
use relay_compose::update::update;

// ========================================================================
// Toolbar Visibility Tests
// ========================================================================

#[test]
fn test_non_empty_selection_opens_toolbar() {
    let mut model = test_model("Hello world");

    select(&mut model, 0, 5);

    assert_eq!(model.visibility(), FloatingId::Toolbar);
    let details = model.selection_details().unwrap();
    assert_eq!(details.range(), SelectionRange::new(0, 5));
    assert_eq!(details.selected_text(), "Hello");
}

#[test]
fn test_collapsed_selection_keeps_toolbar_closed() {
    let mut model = test_model("Hello world");

    select(&mut model, 3, 3);

    assert_eq!(model.visibility(), FloatingId::Closed);
    assert!(model.selection_details().is_none());
}

#[test]
fn test_whitespace_only_selection_is_not_tracked() {
    let mut model = test_model("Hello   world");

    select(&mut model, 5, 8);

    assert_eq!(model.visibility(), FloatingId::Closed);
}

#[test]
fn test_selected_text_is_trimmed_but_range_is_not() {
    let mut model = test_model("Hello brave world");

    select(&mut model, 5, 12);

    let details = model.selection_details().unwrap();
    assert_eq!(details.selected_text(), "brave");
    assert_eq!(details.range(), SelectionRange::new(5, 12));
}

#[test]
fn test_reversed_offsets_are_normalized() {
    let mut model = test_model("Hello world");

    select(&mut model, 11, 6);

    let details = model.selection_details().unwrap();
    assert_eq!(details.range(), SelectionRange::new(6, 11));
    assert_eq!(details.selected_text(), "world");
    assert_eq!(model.selection, SelectionRange::new(6, 11));
}

#[test]
fn test_offsets_past_end_are_clamped() {
    let mut model = test_model("Hello");

    select(&mut model, 2, 99);

    let details = model.selection_details().unwrap();
    assert_eq!(details.range(), SelectionRange::new(2, 5));
    assert_eq!(details.selected_text(), "llo");
}

#[test]
fn test_collapsing_selection_closes_toolbar() {
    let mut model = test_model("Hello world");
    let hub = model.pointer.clone();

    select(&mut model, 0, 5);
    assert!(hub.is_listening());

    select(&mut model, 2, 2);

    assert_eq!(model.visibility(), FloatingId::Closed);
    assert!(!hub.is_listening());
}

#[test]
fn test_new_selection_replaces_tracked_selection() {
    let mut model = test_model("Hello world");
    let hub = model.pointer.clone();

    select(&mut model, 0, 5);
    select(&mut model, 6, 11);

    assert_eq!(model.selection_details().unwrap().selected_text(), "world");
    assert_eq!(hub.active_count(), 1);
}

#[test]
fn test_set_selection_alone_does_not_open_toolbar() {
    let mut model = test_model("Hello world");

    update(
        &mut model,
        Msg::Surface(SurfaceMsg::SetSelection { start: 0, end: 5 }),
    );

    assert_eq!(model.selection, SelectionRange::new(0, 5));
    assert_eq!(model.visibility(), FloatingId::Closed);
}

#[test]
fn test_multibyte_offsets_are_characters() {
    let mut model = test_model("héllo wörld");

    select(&mut model, 6, 11);

    assert_eq!(model.selection_details().unwrap().selected_text(), "wörld");
}

// ========================================================================
// Escape / Typing Tests
// ========================================================================

#[test]
fn test_escape_closes_toolbar() {
    let mut model = test_model("Hello world");
    select(&mut model, 0, 5);

    let cmd = update(&mut model, Msg::Surface(SurfaceMsg::Escape));

    assert!(cmd.is_some());
    assert_eq!(model.visibility(), FloatingId::Closed);
}

#[test]
fn test_escape_with_nothing_open_is_noop() {
    let mut model = test_model("Hello world");

    let cmd = update(&mut model, Msg::Surface(SurfaceMsg::Escape));

    assert!(cmd.is_none());
}

#[test]
fn test_typing_closes_toolbar() {
    let mut model = test_model("Hello world");
    let hub = model.pointer.clone();
    select(&mut model, 0, 5);

    update(
        &mut model,
        Msg::Surface(SurfaceMsg::InsertText("Goodbye".into())),
    );

    assert_eq!(model.text(), "Goodbye world");
    assert_eq!(model.selection, SelectionRange::collapsed(7));
    assert_eq!(model.visibility(), FloatingId::Closed);
    assert!(!hub.is_listening());
}
