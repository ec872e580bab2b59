//! Property tests for the circular line buffer.

use proptest::prelude::*;
use zoetrope_core::{LineBuffer, BLANK_COLUMN};

#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(u8),
    Pop,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u8>().prop_map(Op::Insert),
        4 => Just(Op::Pop),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    /// Occupancy and free space always partition the usable capacity,
    /// whatever the host throws at the buffer.
    #[test]
    fn accounting_stays_consistent(ops in proptest::collection::vec(op_strategy(), 0..200)) {
        let mut buffer = LineBuffer::<8>::new();
        for op in ops {
            match op {
                Op::Insert(fill) => {
                    let _ = buffer.insert(&[fill; 15]);
                }
                Op::Pop => {
                    let _ = buffer.pop();
                }
                Op::Clear => buffer.clear(),
            }
            prop_assert!(buffer.occupancy() <= buffer.capacity());
            prop_assert!(buffer.free_spaces() <= buffer.capacity());
            prop_assert_eq!(buffer.occupancy() + buffer.free_spaces(), buffer.capacity());
        }
    }

    /// Columns come back in the order they went in, with inserts into a
    /// full buffer discarded rather than overwriting.
    #[test]
    fn pop_order_matches_accepted_inserts(fills in proptest::collection::vec(any::<u8>(), 0..32)) {
        let mut buffer = LineBuffer::<8>::new();
        let mut accepted = Vec::new();
        for fill in fills {
            if buffer.insert(&[fill; 15]).is_ok() {
                accepted.push(fill);
            }
        }
        for expected in accepted {
            prop_assert_eq!(buffer.pop(), Some([expected; 15]));
        }
        prop_assert_eq!(buffer.pop(), None);
        prop_assert_eq!(buffer.free_spaces(), buffer.capacity());
    }

    /// Clearing always restores the full usable capacity.
    #[test]
    fn clear_restores_capacity(count in 0usize..20) {
        let mut buffer = LineBuffer::<8>::new();
        for _ in 0..count {
            let _ = buffer.insert(&BLANK_COLUMN);
        }
        buffer.clear();
        prop_assert_eq!(buffer.occupancy(), 0);
        prop_assert_eq!(buffer.free_spaces(), buffer.capacity());
    }
}
