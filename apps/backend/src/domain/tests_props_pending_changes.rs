//! Property tests for inline-edit dirty tracking.

use proptest::prelude::*;

use crate::domain::pending_changes::PendingChanges;
use crate::domain::test_prelude;

#[derive(Debug, Clone)]
enum Op {
    Track(u8, String),
    Set(u8, String),
    Revert(u8),
    RevertAll,
}

fn op() -> impl Strategy<Value = Op> {
    let key = 0u8..6;
    let value = "[a-c]{0,2}";
    prop_oneof![
        (key.clone(), value).prop_map(|(k, v)| Op::Track(k, v)),
        (key.clone(), value).prop_map(|(k, v)| Op::Set(k, v)),
        key.prop_map(Op::Revert),
        Just(Op::RevertAll),
    ]
}

fn key(k: u8) -> String {
    format!("field_{k}")
}

fn apply(pc: &mut PendingChanges, op: &Op) {
    match op {
        Op::Track(k, v) => pc.track(&key(*k), v),
        Op::Set(k, v) => pc.set(&key(*k), v),
        Op::Revert(k) => pc.revert(&key(*k)),
        Op::RevertAll => pc.revert_all(),
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// A field is dirty exactly when its current value differs from the original.
    #[test]
    fn prop_dirty_iff_changed(ops in prop::collection::vec(op(), 0..60)) {
        let mut pc = PendingChanges::new();
        for op in &ops {
            apply(&mut pc, op);
        }
        for f in pc.fields() {
            prop_assert_eq!(pc.is_dirty(&f.key), f.current_value != f.original_value);
        }
        prop_assert_eq!(pc.has_changes(), !pc.dirty_fields().is_empty());
    }

    /// Dirty fields are reported in first-touch order.
    #[test]
    fn prop_dirty_fields_follow_first_touch(ops in prop::collection::vec(op(), 0..60)) {
        let mut pc = PendingChanges::new();
        let mut first_touch: Vec<String> = Vec::new();
        for op in &ops {
            match op {
                Op::Track(k, _) | Op::Set(k, _) => {
                    if !first_touch.contains(&key(*k)) {
                        first_touch.push(key(*k));
                    }
                }
                _ => {}
            }
            apply(&mut pc, op);
        }
        let expected: Vec<String> = first_touch
            .into_iter()
            .filter(|k| pc.is_dirty(k))
            .collect();
        let actual: Vec<String> = pc.dirty_fields().into_iter().map(str::to_string).collect();
        prop_assert_eq!(actual, expected);
    }

    /// revert_all always leaves nothing to save.
    #[test]
    fn prop_revert_all_cleans(ops in prop::collection::vec(op(), 0..60)) {
        let mut pc = PendingChanges::new();
        for op in &ops {
            apply(&mut pc, op);
        }
        pc.revert_all();
        prop_assert!(!pc.has_changes());
        for f in pc.fields() {
            prop_assert_eq!(&f.current_value, &f.original_value);
        }
    }
}
