#![forbid(unsafe_code)]

//! End-to-end fitting scenarios through the widget lifecycle.

use elide_core::geometry::Size;
use elide_layout::{FlowLayout, Input, Node, text_content};
use elide_widgets::{ElideConfig, ElidedText, LifecycleHooks, fit};

fn attached(content: Vec<Node>, width: u16, height: u16) -> ElidedText<FlowLayout> {
    let mut widget = ElidedText::new(content, FlowLayout::new(Size::new(width, height)));
    widget.on_attach();
    widget
}

#[test]
fn content_that_fits_is_left_alone() {
    let widget = attached(vec![Node::text("Hello world")], 11, 1);
    assert_eq!(widget.children(), &[Node::text("Hello world")]);
    assert_eq!(widget.tooltip(), None);
    assert!(!widget.did_trim());
}

#[test]
fn box_fitting_one_word_ends_with_ellipsis() {
    let widget = attached(vec![Node::text("Hello world")], 9, 1);
    assert!(text_content(widget.children()).ends_with(" ..."));
    assert_eq!(widget.tooltip(), Some("Hello world"));

    let widget = attached(vec![Node::text("Hello big world")], 12, 1);
    assert_eq!(text_content(widget.children()), "Hello ...");
    assert_eq!(widget.tooltip(), Some("Hello big world"));
}

#[test]
fn zero_width_box_skips_fitting() {
    let mut children = vec![Node::text("Hello big world")];
    let mut layout = FlowLayout::new(Size::new(0, 1));
    let outcome = fit(&mut children, &mut layout, &ElideConfig::default());
    assert!(outcome.skipped);
    assert!(!outcome.did_trim);
    assert_eq!(children, vec![Node::text("Hello big world")]);
}

#[test]
fn shrinking_to_zero_width_leaves_pristine_content_untrimmed() {
    let mut widget = attached(vec![Node::text("Hello big world")], 12, 1);
    assert!(widget.did_trim());

    widget.resize(Size::new(0, 1));
    assert_eq!(widget.children(), &[Node::text("Hello big world")]);
    assert_eq!(widget.tooltip(), None);
    assert!(widget.last_outcome().is_some_and(|o| o.skipped));
}

#[test]
fn oversized_input_survives_while_siblings_are_sacrificed() {
    let input = Node::from(
        Input::text_field()
            .placeholder("type your full postal address here")
            .cols(30),
    );
    let widget = attached(
        vec![Node::text("Name: "), input.clone(), Node::text(" please fill")],
        20,
        1,
    );
    assert_eq!(widget.children(), &[input]);
    assert!(widget.did_trim());
    assert_eq!(widget.last_outcome().map(|o| o.ellipsis_appended), Some(false));
}

#[test]
fn input_stays_when_trailing_text_carries_the_ellipsis() {
    let input = Node::from(Input::text_field().placeholder("name").cols(20));
    let widget = attached(
        vec![Node::text("Name: "), input.clone(), Node::text(" please fill")],
        38,
        1,
    );
    let children = widget.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], Node::text("Name: "));
    assert_eq!(children[1], input);
    assert!(text_content(&children[2..]).ends_with(" ..."));
}

#[test]
fn earlier_siblings_untouched_when_last_one_absorbs_the_cut() {
    let widget = attached(
        vec![
            Node::text("Alpha "),
            Node::text("Beta "),
            Node::text("Gamma delta epsilon"),
        ],
        20,
        1,
    );
    let children = widget.children();
    assert_eq!(children[0], Node::text("Alpha "));
    assert_eq!(children[1], Node::text("Beta "));
    assert_eq!(children[2], Node::text(" ..."));
    assert_eq!(
        widget.tooltip(),
        Some("Alpha Beta Gamma delta epsilon")
    );
}

#[test]
fn trailing_break_takes_no_row_once_the_tail_is_gone() {
    let widget = attached(
        vec![Node::text("first line"), Node::Break, Node::text("tail")],
        20,
        1,
    );
    assert_eq!(widget.children(), &[Node::text("first ..."), Node::Break]);
}

#[test]
fn break_between_lines_is_removed() {
    let widget = attached(
        vec![Node::text("ab"), Node::Break, Node::text(" cd"), Node::Break],
        20,
        1,
    );
    assert!(widget.did_trim());
    assert!(widget.last_outcome().is_some_and(|o| o.nodes_removed >= 2));
    assert!(text_content(widget.children()).ends_with(" ..."));
}

#[test]
fn taller_box_keeps_more_lines() {
    let text = "one two three four five six seven eight";
    let short = attached(vec![Node::text(text)], 10, 1);
    let tall = attached(vec![Node::text(text)], 10, 3);
    assert!(text_content(tall.children()).len() > text_content(short.children()).len());
}
