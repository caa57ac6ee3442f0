mod common;
use common::*;

use core_history::History;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Back,
    Forward,
    Clear(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..10_000).prop_map(Op::Add),
        2 => Just(Op::Back),
        2 => Just(Op::Forward),
        1 => any::<bool>().prop_map(Op::Clear),
    ]
}

/// Plain two-stack reference model.
#[derive(Default)]
struct Model {
    previous: Vec<usize>,
    next: Vec<usize>,
}

proptest! {
    #[test]
    fn history_matches_two_stack_model(ops in prop::collection::vec(op(), 0..64)) {
        let mut view = FixedView::new();
        let mut h = History::new();
        let mut m = Model::default();
        for op in ops {
            match op {
                Op::Add(p) => {
                    h.add(&mut view, p);
                    m.next.clear();
                    m.previous.push(p);
                }
                Op::Back => {
                    let expected = m.previous.len() > 1;
                    prop_assert_eq!(h.back(&mut view), expected);
                    if expected {
                        let top = m.previous.pop().unwrap();
                        m.next.push(top);
                        prop_assert_eq!(view.cursor, m.previous.last().copied());
                    }
                }
                Op::Forward => {
                    let expected = !m.next.is_empty();
                    prop_assert_eq!(h.forward(&mut view), expected);
                    if expected {
                        let top = m.next.pop().unwrap();
                        m.previous.push(top);
                        prop_assert_eq!(view.cursor, Some(top));
                    }
                }
                Op::Clear(only_next) => {
                    h.clear(&mut view, only_next);
                    m.next.clear();
                    if !only_next {
                        m.previous.clear();
                    }
                }
            }
            prop_assert_eq!(h.previous_count(), m.previous.len());
            prop_assert_eq!(h.next_count(), m.next.len());
            prop_assert_eq!(h.previous(&view), m.previous.last().copied());
            prop_assert_eq!(h.next(&view), m.next.last().copied());
            // every live marker is owned by exactly one stack entry
            prop_assert_eq!(view.markers.len(), m.previous.len() + m.next.len());
        }
    }

    #[test]
    fn adds_alone_never_create_forward_history(
        points in prop::collection::vec(0usize..1_000, 1..32),
    ) {
        let mut view = FixedView::new();
        let mut h = History::new();
        for p in &points {
            h.add(&mut view, *p);
        }
        prop_assert_eq!(h.previous(&view), points.last().copied());
        prop_assert_eq!(h.next_count(), 0);
        prop_assert!(!h.forward(&mut view));
    }
}
