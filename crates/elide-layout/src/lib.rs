#![forbid(unsafe_code)]

//! Layout for elide.
//!
//! - [`Node`] - the value-type content tree a widget owns
//! - [`FlowLayout`] - terminal inline flow layout, the reference [`Measure`]
//! - [`OverflowProbe`] - decides whether content outgrew its box
//!
//! # Example
//! ```
//! use elide_core::geometry::Size;
//! use elide_layout::{FlowLayout, Measure, Node, OverflowProbe, REFERENCE_GLYPHS};
//!
//! let mut layout = FlowLayout::new(Size::new(5, 1));
//! let probe = OverflowProbe::calibrate(&mut layout, REFERENCE_GLYPHS);
//!
//! let content = vec![Node::text("Hello world")];
//! let metrics = layout.measure(&content);
//! assert!(metrics.has_size());
//! assert!(probe.overflows(&metrics));
//! ```

pub mod flow;
pub mod node;
pub mod probe;

pub use flow::{Flow, FlowLayout, Fragment, FragmentKind};
pub use node::{Element, Input, InputKind, Node, NodeKind, node_count, text_content};
pub use probe::{BoxMetrics, Measure, OverflowProbe, REFERENCE_GLYPHS};
