//! Every reference plug-in must leave its lane sorted and a permutation of
//! its input, using the comparator for every ordering decision.

use proptest::prelude::*;
use sortvis_algorithm::{AlgorithmRegistry, SortAlgorithm};
use sortvis_algorithms::{
    register_defaults, ParallelMergeSort, ParallelQuickSort, RandomizedParallelQuickSort,
};
use sortvis_core::Dataset;
use sortvis_test_utils::{assert_sorted_permutation, shuffled_values, CountingComparator};

fn defaults() -> AlgorithmRegistry {
    let mut reg = AlgorithmRegistry::new();
    register_defaults(&mut reg).unwrap();
    reg
}

fn sort_with(algorithm: &dyn SortAlgorithm, input: &[u32]) -> (Vec<u32>, u64) {
    let data = Dataset::from_values(input.iter().copied());
    let cmp = CountingComparator::new();
    data.run_task(|lane| algorithm.sort(lane, &cmp));
    assert_eq!(data.ledger().live_count(), 0);
    (data.values(), cmp.count())
}

#[test]
fn every_default_sorts_fixed_sizes() {
    let reg = defaults();
    for n in [0u32, 1, 2, 50, 1000] {
        let input = shuffled_values(n, u64::from(n));
        for entry in reg.entries() {
            let (output, comparisons) = sort_with(entry.algorithm.as_ref(), &input);
            assert_sorted_permutation(&input, &output);
            if n >= 2 {
                assert!(comparisons > 0, "{} sorted without comparing", entry.name);
            } else {
                assert_eq!(comparisons, 0, "{} compared a trivial lane", entry.name);
            }
        }
    }
}

#[test]
fn every_default_handles_sorted_and_reversed_input() {
    let reg = defaults();
    let ascending: Vec<u32> = (1..=64).collect();
    let descending: Vec<u32> = (1..=64).rev().collect();
    for entry in reg.entries() {
        for input in [&ascending, &descending] {
            let (output, _) = sort_with(entry.algorithm.as_ref(), input);
            assert_eq!(output, ascending, "{}", entry.name);
        }
    }
}

#[test]
fn parallel_plugins_fork_disjoint_children() {
    let input = shuffled_values(1000, 77);
    let sorters: [Box<dyn SortAlgorithm>; 3] = [
        Box::new(ParallelMergeSort::default()),
        Box::new(ParallelQuickSort::default()),
        Box::new(RandomizedParallelQuickSort::new(5)),
    ];
    for sorter in &sorters {
        let data = Dataset::from_values(input.iter().copied());
        data.run_task(|lane| sorter.sort(lane, &CountingComparator::new()));
        assert!(data.is_sorted());
        assert!(data.ledger().spawned() > 1);
        assert_eq!(data.ledger().live_count(), 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_inputs_with_duplicates(input in prop::collection::vec(0u32..16, 0..64)) {
        let reg = defaults();
        for entry in reg.entries() {
            let (output, _) = sort_with(entry.algorithm.as_ref(), &input);
            let mut expected = input.clone();
            expected.sort_unstable();
            prop_assert_eq!(output, expected, "{}", entry.name);
        }
    }

    #[test]
    fn aggressive_forking_stays_correct(input in prop::collection::vec(any::<u32>(), 0..48)) {
        let sorters: [Box<dyn SortAlgorithm>; 3] = [
            Box::new(ParallelMergeSort::with_cutoff(2)),
            Box::new(ParallelQuickSort::with_cutoff(2)),
            Box::new(RandomizedParallelQuickSort::new(11).with_cutoff(2)),
        ];
        for sorter in &sorters {
            let (output, _) = sort_with(sorter.as_ref(), &input);
            let mut expected = input.clone();
            expected.sort_unstable();
            prop_assert_eq!(output, expected);
        }
    }
}
