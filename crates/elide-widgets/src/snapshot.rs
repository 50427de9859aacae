#![forbid(unsafe_code)]

//! Pristine content snapshots.
//!
//! Every fit cycle starts from the content exactly as the consumer supplied
//! it. The snapshot owns a deep copy of that content; the live tree is
//! rebuilt from fresh copies, so nothing the fitter does to the live tree can
//! reach the snapshot.

use elide_layout::{Node, node_count, text_content};

/// An owned record of a widget's pre-truncation content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSnapshot {
    original_children: Vec<Node>,
    original_text: String,
}

impl ContentSnapshot {
    /// Deep-copy `children` and record their flattened text.
    #[must_use]
    pub fn capture(children: &[Node]) -> Self {
        Self {
            original_children: children.to_vec(),
            original_text: text_content(children),
        }
    }

    /// Replace `live` with fresh copies of the captured children, in order.
    ///
    /// Idempotent: any number of calls yields the same tree.
    pub fn restore(&self, live: &mut Vec<Node>) {
        live.clear();
        live.extend(self.original_children.iter().cloned());
    }

    /// The captured children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.original_children
    }

    /// The captured flattened text, untrimmed.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Number of captured nodes, descendants included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        node_count(&self.original_children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elide_layout::Input;

    fn sample() -> Vec<Node> {
        vec![
            Node::text("  Hello "),
            Node::element("b", [Node::text("big"), Node::Break]),
            Node::from(Input::text_area().value("draft")),
            Node::text(" world  "),
        ]
    }

    #[test]
    fn capture_records_text() {
        let snapshot = ContentSnapshot::capture(&sample());
        assert_eq!(snapshot.original_text(), "  Hello bigdraft world  ");
        assert_eq!(snapshot.node_count(), 6);
    }

    #[test]
    fn restore_reproduces_structure() {
        let original = sample();
        let snapshot = ContentSnapshot::capture(&original);

        let mut live = original.clone();
        live.pop();
        live[0].set_text_content("mangled");
        live.push(Node::Break);

        snapshot.restore(&mut live);
        assert_eq!(live, original);
    }

    #[test]
    fn restore_is_idempotent() {
        let original = sample();
        let snapshot = ContentSnapshot::capture(&original);
        let mut live = Vec::new();
        for _ in 0..3 {
            snapshot.restore(&mut live);
            assert_eq!(live, original);
            assert_eq!(text_content(&live), snapshot.original_text());
            assert_eq!(node_count(&live), snapshot.node_count());
        }
    }

    #[test]
    fn live_mutation_never_reaches_snapshot() {
        let snapshot = ContentSnapshot::capture(&sample());
        let mut live = Vec::new();
        snapshot.restore(&mut live);
        if let Node::Element(element) = &mut live[1] {
            element.children.clear();
        }
        assert_eq!(snapshot.children(), sample().as_slice());
    }

    #[test]
    fn empty_content() {
        let snapshot = ContentSnapshot::capture(&[]);
        let mut live = vec![Node::text("x")];
        snapshot.restore(&mut live);
        assert!(live.is_empty());
        assert_eq!(snapshot.original_text(), "");
    }

    mod proptests {
        use super::*;
        use crate::{ElideConfig, fit};
        use elide_core::geometry::Size;
        use elide_layout::FlowLayout;
        use proptest::prelude::*;

        fn tree_strategy() -> impl Strategy<Value = Node> {
            let leaf = prop_oneof![
                4 => "[ a-z]{0,12}".prop_map(Node::text),
                1 => Just(Node::Break),
                1 => "[a-z]{0,6}".prop_map(|v| Node::from(Input::text_field().value(v))),
            ];
            leaf.prop_recursive(3, 24, 4, |inner| {
                prop::collection::vec(inner, 0..4).prop_map(|kids| Node::element("span", kids))
            })
        }

        proptest! {
            #[test]
            fn repeated_restores_reproduce_the_capture(
                children in prop::collection::vec(tree_strategy(), 0..6),
                width in 1u16..20,
                rounds in 1usize..6,
            ) {
                let snapshot = ContentSnapshot::capture(&children);
                prop_assert_eq!(snapshot.original_text(), text_content(&children));
                prop_assert_eq!(snapshot.node_count(), node_count(&children));

                let mut live = children.clone();
                let mut layout = FlowLayout::new(Size::new(width, 1));
                for _ in 0..rounds {
                    fit(&mut live, &mut layout, &ElideConfig::default());
                    snapshot.restore(&mut live);
                    prop_assert_eq!(&live, &children);
                    prop_assert_eq!(text_content(&live), snapshot.original_text());
                    prop_assert_eq!(node_count(&live), snapshot.node_count());
                }
                prop_assert_eq!(snapshot.children(), children.as_slice());
            }
        }
    }
}
