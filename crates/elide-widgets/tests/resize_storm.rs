#![forbid(unsafe_code)]

//! Resize storms.
//!
//! Whatever sequence of sizes a widget goes through, its final state must
//! equal a freshly attached widget fitted once at the final size.

use std::time::{Duration, Instant};

use elide_core::debounce::DebounceConfig;
use elide_core::geometry::Size;
use elide_layout::{FlowLayout, Input, Node, text_content};
use elide_widgets::{ElideConfig, ElidedText, LifecycleHooks};

/// Pattern type for resize storm generation.
#[derive(Debug, Clone, Copy)]
enum StormPattern {
    /// Pseudo-random sizes from a seed.
    Burst { count: usize, seed: u64 },
    /// Linear sweep between two sizes.
    Sweep { start: (u16, u16), end: (u16, u16), steps: usize },
    /// Alternate between two sizes.
    Oscillate { a: (u16, u16), b: (u16, u16), cycles: usize },
}

impl StormPattern {
    fn sizes(self) -> Vec<Size> {
        match self {
            Self::Burst { count, mut seed } => (0..count)
                .map(|_| {
                    seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                    let width = (seed >> 33) % 40;
                    let height = (seed >> 50) % 4;
                    Size::new(width as u16, height as u16)
                })
                .collect(),
            Self::Sweep { start, end, steps } => (0..=steps)
                .map(|i| {
                    let lerp = |from: u16, to: u16| {
                        let from = i64::from(from);
                        let to = i64::from(to);
                        (from + (to - from) * i as i64 / steps.max(1) as i64) as u16
                    };
                    Size::new(lerp(start.0, end.0), lerp(start.1, end.1))
                })
                .collect(),
            Self::Oscillate { a, b, cycles } => (0..cycles * 2)
                .map(|i| if i % 2 == 0 { Size::from(a) } else { Size::from(b) })
                .collect(),
        }
    }
}

fn content() -> Vec<Node> {
    vec![
        Node::text("Quarterly report: "),
        Node::element("b", [Node::text("revenue grew steadily")]),
        Node::Break,
        Node::text(" across all "),
        Node::from(Input::text_field().value("EMEA").cols(6)),
        Node::text(" regions this year"),
    ]
}

fn fresh(size: Size, config: &ElideConfig) -> ElidedText<FlowLayout> {
    let mut widget = ElidedText::with_config(content(), FlowLayout::new(size), config.clone());
    widget.on_attach();
    widget
}

fn assert_matches_fresh(widget: &ElidedText<FlowLayout>, size: Size, config: &ElideConfig) {
    let expected = fresh(size, config);
    assert_eq!(widget.children(), expected.children(), "children at {size:?}");
    assert_eq!(widget.tooltip(), expected.tooltip(), "tooltip at {size:?}");
    assert_eq!(widget.did_trim(), expected.did_trim());
}

fn run_storm(pattern: StormPattern) {
    let config = ElideConfig::default();
    let mut widget = fresh(Size::new(24, 2), &config);
    let sizes = pattern.sizes();
    for &size in &sizes {
        widget.resize(size);
        assert_matches_fresh(&widget, size, &config);
    }
}

#[test]
fn burst_storm() {
    run_storm(StormPattern::Burst { count: 60, seed: 42 });
}

#[test]
fn sweep_storm_shrinking() {
    run_storm(StormPattern::Sweep {
        start: (60, 3),
        end: (1, 1),
        steps: 30,
    });
}

#[test]
fn sweep_storm_growing() {
    run_storm(StormPattern::Sweep {
        start: (0, 1),
        end: (80, 2),
        steps: 40,
    });
}

#[test]
fn oscillate_storm() {
    run_storm(StormPattern::Oscillate {
        a: (10, 1),
        b: (70, 3),
        cycles: 12,
    });
}

#[test]
fn debounced_storm_settles_to_final_size() {
    let config = ElideConfig::default().debounce(DebounceConfig::new(Duration::from_millis(16)));
    let mut widget = fresh(Size::new(24, 2), &config);
    let cycles_before = widget.fit_cycles();

    let t0 = Instant::now();
    let sizes = StormPattern::Burst { count: 40, seed: 7 }.sizes();
    for (i, &size) in sizes.iter().enumerate() {
        widget.resize_at(size, t0 + Duration::from_millis(i as u64));
    }
    let last = sizes.last().copied().unwrap_or(Size::new(24, 2));

    // The burst is shorter than the hard deadline: nothing fires mid-storm.
    assert_eq!(widget.fit_cycles(), cycles_before);

    let settle = t0 + Duration::from_millis(sizes.len() as u64 + 200);
    assert!(widget.poll(settle));
    assert_eq!(widget.fit_cycles(), cycles_before + 1);
    assert_matches_fresh(&widget, last, &config);
}

#[test]
fn detach_after_storm_restores_original() {
    let config = ElideConfig::default();
    let mut widget = fresh(Size::new(24, 2), &config);
    for size in (StormPattern::Oscillate { a: (5, 1), b: (50, 2), cycles: 5 }).sizes() {
        widget.resize(size);
    }
    widget.on_detach();
    assert_eq!(widget.children(), content().as_slice());
    assert_eq!(text_content(widget.children()), text_content(&content()));
    assert_eq!(widget.tooltip(), None);
}
