//! Property tests for registry selection bookkeeping.

use proptest::prelude::*;
use sortvis_algorithm::{from_fn, AlgorithmRegistry};
use sortvis_core::{AlgorithmId, Comparator, LaneSlice};

fn registry(n: usize) -> AlgorithmRegistry {
    let mut reg = AlgorithmRegistry::new();
    for i in 0..n {
        reg.register(
            format!("algo-{i}"),
            from_fn(|_: &mut LaneSlice<'_>, _: &dyn Comparator| {}),
        )
        .unwrap();
    }
    reg
}

proptest! {
    #[test]
    fn selected_ids_match_flags_in_order(
        n in 1usize..12,
        toggles in prop::collection::vec(0usize..12, 0..40),
    ) {
        let mut reg = registry(n);
        let mut expected = vec![false; n];
        for t in toggles {
            let hit = reg.toggle(AlgorithmId(t));
            if t < n {
                expected[t] = !expected[t];
                prop_assert_eq!(hit, Some(expected[t]));
            } else {
                prop_assert_eq!(hit, None);
            }
        }
        let want: Vec<AlgorithmId> = expected
            .iter()
            .enumerate()
            .filter(|(_, &s)| s)
            .map(|(i, _)| AlgorithmId(i))
            .collect();
        prop_assert_eq!(reg.selected_ids().to_vec(), want);
    }
}
