//! Property-based test generators for levels, rows and selections.
//!
//! Numbers are drawn from small integer grids so that boundary touches and
//! overlaps actually occur, and so every value survives a round trip through
//! the token syntax unchanged.

use proptest::prelude::*;

use crate::model::{FactRow, Interval, Level};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Shared proptest configuration: 512 cases, generous shrink budget.
#[must_use]
pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 512,
        max_shrink_iters: 5000,
        ..ProptestConfig::default()
    }
}

// ─── Levels ──────────────────────────────────────────────────────────────────

/// Strategy for a single level with arbitrary (possibly inverted) bounds.
pub fn arb_level() -> impl Strategy<Value = Level> {
    let bound = proptest::option::of(-1000..1000i32);
    let label = proptest::option::of(
        proptest::string::string_regex("[A-Za-z][A-Za-z ]{0,11}").expect("valid regex"),
    );
    (bound.clone(), bound, label).prop_map(|(min, max, label)| Level {
        min: min.map(f64::from),
        max: max.map(f64::from),
        label,
    })
}

/// Strategy for 0–9 arbitrary levels.
pub fn arb_levels() -> impl Strategy<Value = Vec<Level>> {
    proptest::collection::vec(arb_level(), 0..10)
}

/// Strategy for well-formed settings: ascending breakpoints where level `i`
/// spans `[b_i, b_{i+1}]` and either end may have been left blank.
pub fn arb_ascending_levels() -> impl Strategy<Value = Vec<Level>> {
    (1..8usize).prop_flat_map(|n| {
        (
            -500..500i32,
            proptest::collection::vec(0..100i32, n),
            proptest::collection::vec(any::<(bool, bool)>(), n),
        )
            .prop_map(|(start, steps, keep)| {
                let mut breakpoints = vec![start];
                for step in steps {
                    let last = *breakpoints.last().unwrap_or(&start);
                    breakpoints.push(last + step);
                }
                keep.iter()
                    .enumerate()
                    .map(|(i, &(keep_min, keep_max))| {
                        Level::new(
                            keep_min.then(|| f64::from(breakpoints[i])),
                            keep_max.then(|| f64::from(breakpoints[i + 1])),
                        )
                    })
                    .collect::<Vec<Level>>()
            })
    })
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Strategy for 0–49 index rows over a small post-id space (duplicates likely).
pub fn arb_rows() -> impl Strategy<Value = Vec<FactRow>> {
    proptest::collection::vec((-1000..1000i32, 1..20u64), 0..50).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(value, post_id)| FactRow::new(f64::from(value), post_id))
            .collect::<Vec<FactRow>>()
    })
}

// ─── Selections ──────────────────────────────────────────────────────────────

/// Strategy for 0–11 well-formed intervals with `1 <= from <= to`.
///
/// A lower bound of at least 1 keeps every upper bound non-zero, so the
/// token spelling of each interval parses back to the same interval.
pub fn arb_intervals() -> impl Strategy<Value = Vec<Interval>> {
    proptest::collection::vec((1..300i32, proptest::option::of(0..120i32)), 0..12).prop_map(
        |pairs| {
            pairs
                .into_iter()
                .map(|(from, len)| match len {
                    Some(len) => Interval::closed(f64::from(from), f64::from(from + len)),
                    None => Interval::open(f64::from(from)),
                })
                .collect::<Vec<Interval>>()
        },
    )
}

/// Sample points around every boundary of `intervals`, plus far outliers.
#[must_use]
pub fn sample_points(intervals: &[Interval]) -> Vec<f64> {
    let mut points = vec![-1.0, 0.0, 1e9];
    for interval in intervals {
        let mut edges = vec![interval.from];
        edges.extend(interval.to);
        for edge in edges {
            points.extend([edge - 0.5, edge, edge + 0.5]);
        }
    }
    points
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn ascending_levels_have_one_level_per_step() {
        let mut runner = TestRunner::default();
        let strategy = arb_ascending_levels();
        for _ in 0..50 {
            let levels = strategy.new_tree(&mut runner).unwrap().current();
            assert!(!levels.is_empty() && levels.len() < 8);
            let mut last_seen = f64::MIN;
            for level in &levels {
                for value in [level.min, level.max].into_iter().flatten() {
                    assert!(value >= last_seen, "breakpoints must ascend");
                    last_seen = value;
                }
            }
        }
    }

    #[test]
    fn intervals_are_well_formed() {
        let mut runner = TestRunner::default();
        let strategy = arb_intervals();
        for _ in 0..50 {
            for interval in strategy.new_tree(&mut runner).unwrap().current() {
                assert!(interval.from >= 1.0);
                if let Some(to) = interval.to {
                    assert!(to >= interval.from);
                }
            }
        }
    }

    #[test]
    fn sample_points_cover_edges() {
        let points = sample_points(&[Interval::closed(10.0, 20.0)]);
        for expected in [9.5, 10.0, 10.5, 19.5, 20.0, 20.5] {
            assert!(points.contains(&expected), "missing sample point {expected}");
        }
    }
}
