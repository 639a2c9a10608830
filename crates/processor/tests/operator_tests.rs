//! Integration tests for the stateful operators
//!
//! Test Coverage:
//! - Centered sliding window emission points and aggregates
//! - Equi-join and theta-join emission order over interleaved sources
//! - Group-by per-key neutral application and first-seen output order
//! - Pipeline composition and the executor driving fallible sources

use processor::aggregation::GroupBy;
use processor::error::{ProcessorError, Result, SourceError};
use processor::join::{Either, EquiJoin, ThetaJoin};
use processor::pipeline::*;
use processor::window::{CenteredSlidingWindow, ThreePointWindow};
use processor::WindowError;

// ============================================================================
// WINDOW TESTS
// ============================================================================

mod window_tests {
    use super::*;

    #[test]
    fn test_window_rejects_zero_size_before_any_data() {
        let result = CenteredSlidingWindow::new(0, 0, |a: &i32, x: &i32| a + x, |a: &i32, x: &i32| a - x);
        assert!(matches!(result, Err(WindowError::InvalidWindowSize { size: 0 })));
    }

    #[test]
    fn test_window_emission_starts_after_delay() {
        let mut window =
            CenteredSlidingWindow::new(7, 0, |a: &i32, x: &i32| a + x, |a: &i32, x: &i32| a - x)
                .unwrap();
        let mut out: Collector<i32> = Collector::new();
        window.start(&mut out);

        for i in 1..=3 {
            window.next(i, &mut out);
            assert!(out.is_empty(), "emitted after {} items", i);
        }
        window.next(4, &mut out);
        assert_eq!(out.items(), &[10]);
    }

    #[test]
    fn test_window_as_moving_average() {
        let mut smooth = CenteredSlidingWindow::new(
            3,
            0.0,
            |a: &f64, x: &f64| a + x / 3.0,
            |a: &f64, x: &f64| a - x / 3.0,
        )
        .unwrap();
        let out = collect(vec![3.0, 6.0, 9.0, 12.0], &mut smooth);
        let expected = [3.0, 6.0, 9.0];
        assert_eq!(out.len(), expected.len());
        for (got, want) in out.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_window_feeds_three_point_window() {
        let window =
            CenteredSlidingWindow::new(1, 0, |a: &i32, x: &i32| a + x, |a: &i32, x: &i32| a - x)
                .unwrap();
        let mut query = window.then(ThreePointWindow::new(|p: &i32, _: &i32, n: &i32| n - p));
        assert_eq!(collect(vec![1, 4, 9, 16], &mut query), vec![8, 12]);
    }
}

// ============================================================================
// JOIN TESTS
// ============================================================================

mod join_tests {
    use super::*;

    #[test]
    fn test_equi_join_interleaved_sources() {
        let mut join = EquiJoin::new(|l: &(u32, char)| l.0, |r: &(u32, char)| r.0);
        let mut out: Collector<((u32, char), (u32, char))> = Collector::new();
        join.start(&mut out);

        join.next(Either::Left((1, 'a')), &mut out);
        assert!(out.is_empty());

        join.next(Either::Right((1, 'b')), &mut out);
        assert_eq!(out.items(), &[((1, 'a'), (1, 'b'))]);

        join.next(Either::Right((2, 'c')), &mut out);
        assert_eq!(out.len(), 1);

        join.next(Either::Left((2, 'd')), &mut out);
        join.end(&mut out);

        let pairs: Vec<(char, char)> = out.items().iter().map(|(l, r)| (l.1, r.1)).collect();
        assert_eq!(pairs, vec![('a', 'b'), ('d', 'c')]);
        assert_eq!(out.end_count(), 1);
    }

    #[test]
    fn test_equi_join_emits_every_pair_once() {
        let mut join = EquiJoin::new(|l: &(u8, u8)| l.0, |r: &(u8, u8)| r.0);
        let input = vec![
            Either::Left((1, 0)),
            Either::Left((1, 1)),
            Either::Right((1, 10)),
            Either::Right((1, 11)),
            Either::Left((1, 2)),
        ];
        let out = collect(input, &mut join);

        // Each triggering item is crossed with its partners in arrival order
        let expected = vec![
            ((1, 0), (1, 10)),
            ((1, 1), (1, 10)),
            ((1, 0), (1, 11)),
            ((1, 1), (1, 11)),
            ((1, 2), (1, 10)),
            ((1, 2), (1, 11)),
        ];
        assert_eq!(out, expected);
        assert_eq!(join.left_len(), 3);
        assert_eq!(join.right_len(), 2);
    }

    #[test]
    fn test_theta_join_less_than() {
        let mut join = ThetaJoin::new(|a: &i32, b: &i32| a < b);
        let input = vec![
            Either::Left(1),
            Either::Right(3),
            Either::Left(5),
            Either::Right(2),
        ];
        assert_eq!(collect(input, &mut join), vec![(1, 3), (1, 2)]);
    }

    #[test]
    fn test_theta_join_band_predicate() {
        let mut join = ThetaJoin::new(|a: &i32, b: &i32| (a - b).abs() <= 1);
        let input = vec![
            Either::Right(10),
            Either::Right(20),
            Either::Left(11),
            Either::Left(19),
            Either::Right(12),
        ];
        assert_eq!(collect(input, &mut join), vec![(11, 10), (19, 20), (11, 12)]);
    }
}

// ============================================================================
// GROUP-BY TESTS
// ============================================================================

mod group_by_tests {
    use super::*;

    #[test]
    fn test_group_by_sum() {
        let mut sums = GroupBy::new(0, |acc: &i32, x: i32| acc + x);
        let mut out: Collector<(i32, i32)> = Collector::new();
        sums.start(&mut out);
        for item in [(1, 10), (2, 5), (1, 3)] {
            sums.next(item, &mut out);
            assert!(out.is_empty());
        }
        sums.end(&mut out);
        assert_eq!(out.items(), &[(1, 13), (2, 5)]);
    }

    #[test]
    fn test_neutral_applied_per_key() {
        // With init = 100 every key starts from 100, not one global fold
        let mut sums = GroupBy::new(100, |acc: &i32, x: i32| acc + x);
        let out = collect(vec![("x", 1), ("y", 2), ("x", 3)], &mut sums);
        assert_eq!(out, vec![("x", 104), ("y", 102)]);
    }

    #[test]
    fn test_group_by_non_commutative_op() {
        let mut concat = GroupBy::new(String::from(">"), |acc: &String, c: char| format!("{}{}", acc, c));
        let out = collect(vec![(2, 'a'), (1, 'b'), (2, 'c')], &mut concat);
        assert_eq!(out, vec![(2, ">ac".to_string()), (1, ">b".to_string())]);
    }
}

// ============================================================================
// PIPELINE TESTS
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_scan_then_filter() {
        let mut query = ScanOperator::new(0, |acc: &i32, x: i32| acc + x)
            .then(FilterOperator::new(|sum: &i32| sum % 2 == 0));
        assert_eq!(collect(1..=6, &mut query), vec![6, 10]);
    }

    #[test]
    fn test_parallel_with_combine_fn() {
        let mut query = Parallel::new(
            MapOperator::new(|x: i32| x * 2),
            MapOperator::new(|x: i32| x * 3),
            CombineFn(|a: i32, b: i32| a + b),
        );
        assert_eq!(collect(vec![1, 2, 3], &mut query), vec![5, 10, 15]);
    }

    #[test]
    fn test_boxed_queries_compose() {
        let first: Box<dyn Query<i32, i32>> = Box::new(MapOperator::new(|x: i32| x + 1));
        let mut query = first.then(Identity::new());
        assert_eq!(collect(vec![1, 2], &mut query), vec![2, 3]);
    }

    #[test]
    fn test_try_collect_propagates_source_error() {
        let mut query = Identity::<i32>::new();
        let source: Vec<Result<i32>> = vec![
            Ok(1),
            Err(ProcessorError::Source(SourceError::InvalidSample {
                record: 2,
                value: "?".into(),
            })),
        ];
        let err = try_collect(source, &mut query).unwrap_err();
        assert!(err.to_string().contains("record 2"));
    }
}
