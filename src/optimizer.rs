//! Itinerary optimizer: nearest-neighbor construction followed by 2-opt.
//!
//! All functions here are pure. They borrow the distance matrix and the
//! current stop order and return a new order; nothing is kept between calls,
//! so independent trips can be optimised concurrently.
//!
//! Tours are ranked by [`TourCost`]: fewer missing matrix entries first, then
//! shorter distance. A tour that uses a missing entry is never preferred over
//! one that uses fewer.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace, warn};

use crate::error::OptimizeError;
use crate::matrix::DistanceMatrix;
use crate::traits::{DistanceMatrixProvider, Id};

/// Ordered visiting sequence of stops.
pub type Tour<S> = Vec<S>;

/// Ranking key for a tour.
///
/// Field order matters: the derived `Ord` compares `gaps` before `distance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TourCost {
    /// Consecutive pairs with no matrix record.
    pub gaps: usize,
    /// Sum of the recorded legs.
    pub distance: u64,
}

impl TourCost {
    /// Single figure for reporting: `u64::MAX` (the matrix's `MISSING`) when
    /// any leg is missing, otherwise the distance.
    pub const fn total(self) -> u64 {
        if self.gaps > 0 {
            u64::MAX
        } else {
            self.distance
        }
    }
}

/// Build an initial tour greedily, always travelling to the closest
/// remaining stop.
///
/// The tour starts at `stops[0]`. Ties go to the stop that appears first in
/// `stops`. Returns an empty tour for empty input.
pub fn construct<S: Id>(distances: &DistanceMatrix<S>, stops: &[S]) -> Tour<S> {
    let Some((first, rest)) = stops.split_first() else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(stops.len());
    path.push(first.clone());

    let mut remaining: Vec<&S> = rest.iter().collect();
    let mut current = first;

    // min_by_key keeps the first of several equal minima.
    while let Some(idx) = remaining
        .iter()
        .enumerate()
        .min_by_key(|(_, stop)| distances.distance(current, stop))
        .map(|(idx, _)| idx)
    {
        let next = remaining.remove(idx);
        path.push(next.clone());
        current = next;
    }

    path
}

/// Refine a tour with 2-opt segment reversals until no swap shortens it.
///
/// Each pass tries every `0 <= i < j < len` against the current best,
/// reversing `tour[i + 1..=j]` and adopting the candidate when its
/// [`TourCost`] is strictly lower. Any adoption triggers another full pass.
/// Position 0 never lies inside a reversed range, so the start stop is kept.
pub fn improve<S: Id>(distances: &DistanceMatrix<S>, tour: &[S]) -> Tour<S> {
    let n = tour.len();
    let mut best_order = tour.to_vec();
    let mut best_cost = tour_cost(distances, &best_order);
    let mut candidate = Vec::with_capacity(n);

    let mut passes = 0usize;
    let mut improved = true;
    while improved {
        improved = false;
        passes += 1;

        for i in 0..n.saturating_sub(1) {
            for j in i + 1..n {
                candidate.clone_from(&best_order);
                candidate[i + 1..=j].reverse();

                let candidate_cost = tour_cost(distances, &candidate);
                if candidate_cost < best_cost {
                    trace!(i, j, from = ?best_cost, to = ?candidate_cost, "2-opt swap");
                    std::mem::swap(&mut best_order, &mut candidate);
                    best_cost = candidate_cost;
                    improved = true;
                }
            }
        }
    }

    trace!(passes, gaps = best_cost.gaps, distance = best_cost.distance, "2-opt converged");
    best_order
}

/// Count missing legs and sum the recorded ones.
pub fn tour_cost<S: Id>(distances: &DistanceMatrix<S>, tour: &[S]) -> TourCost {
    tour.windows(2).fold(TourCost::default(), |cost, pair| match pair {
        [from, to] if from == to => cost,
        [from, to] => match distances.get(from, to) {
            Some(record) => TourCost {
                distance: cost.distance.saturating_add(record.distance),
                ..cost
            },
            None => TourCost {
                gaps: cost.gaps + 1,
                ..cost
            },
        },
        _ => cost,
    })
}

/// Sum of the distances between consecutive stops.
///
/// Any tour crossing a missing pair reports [`DistanceMatrix::MISSING`]; use
/// [`tour_cost`] to tell such tours apart.
pub fn total_distance<S: Id>(distances: &DistanceMatrix<S>, tour: &[S]) -> u64 {
    tour_cost(distances, tour).total()
}

/// Reorder `stops` for minimal travel distance.
///
/// Fails with [`OptimizeError::EmptyInput`] when there are no stops. A fault
/// inside construction or improvement is reported as
/// [`OptimizeError::Failed`] instead of unwinding into the caller.
pub fn optimise<S: Id>(distances: &DistanceMatrix<S>, stops: &[S]) -> Result<Tour<S>, OptimizeError> {
    if stops.is_empty() {
        return Err(OptimizeError::EmptyInput);
    }

    let tour = panic::catch_unwind(AssertUnwindSafe(|| {
        let missing = distances.missing_pairs(stops).len();
        if missing > 0 {
            warn!(
                stops = stops.len(),
                missing,
                "distance matrix incomplete, missing pairs treated as unreachable"
            );
        }
        improve(distances, &construct(distances, stops))
    }))
    .map_err(|payload| OptimizeError::Failed(panic_message(payload.as_ref())))?;

    debug!(
        stops = stops.len(),
        before = total_distance(distances, stops),
        after = total_distance(distances, &tour),
        "itinerary optimised"
    );

    Ok(tour)
}

/// Fetch distances for `stops` from `provider`, then [`optimise`].
///
/// Provider failures are returned unchanged as [`OptimizeError::Provider`].
pub fn optimise_with<S, P>(provider: &P, stops: &[S]) -> Result<Tour<S>, OptimizeError>
where
    S: Id,
    P: DistanceMatrixProvider<S> + ?Sized,
{
    if stops.is_empty() {
        return Err(OptimizeError::EmptyInput);
    }
    let distances = provider.distances_for(stops)?;
    optimise(&distances, stops)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown fault".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DistanceRecord;

    fn matrix(edges: &[(&'static str, &'static str, u64)]) -> DistanceMatrix<&'static str> {
        edges
            .iter()
            .map(|&(from, to, distance)| (from, to, DistanceRecord::new(distance, distance)))
            .collect()
    }

    /// Stops on a line at positions 0, 1, 2, 3 with symmetric distances.
    fn line() -> DistanceMatrix<&'static str> {
        let positions = [("a", 0i64), ("b", 1), ("c", 2), ("d", 3)];
        let mut m = DistanceMatrix::new();
        for &(from, x) in &positions {
            for &(to, y) in &positions {
                if from != to {
                    let d = (x - y).unsigned_abs();
                    m.insert(from, to, DistanceRecord::new(d, d));
                }
            }
        }
        m
    }

    #[test]
    fn test_construct_picks_nearest() {
        let m = line();
        assert_eq!(construct(&m, &["a", "d", "c", "b"]), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_construct_tie_goes_to_first_in_input_order() {
        let m = matrix(&[("a", "b", 5), ("a", "c", 5), ("b", "c", 1), ("c", "b", 1)]);
        assert_eq!(construct(&m, &["a", "c", "b"]), vec!["a", "c", "b"]);
        assert_eq!(construct(&m, &["a", "b", "c"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_construct_empty() {
        let m = DistanceMatrix::<&str>::new();
        assert!(construct(&m, &[]).is_empty());
    }

    #[test]
    fn test_total_distance_sums_consecutive_pairs() {
        let m = line();
        assert_eq!(total_distance(&m, &["a", "c", "b", "d"]), 2 + 1 + 2);
        assert_eq!(total_distance(&m, &["a"]), 0);
        assert_eq!(total_distance(&m, &[]), 0);
    }

    #[test]
    fn test_total_distance_saturates_on_missing() {
        let m = matrix(&[("a", "b", 4)]);
        assert_eq!(total_distance(&m, &["a", "b", "c"]), DistanceMatrix::<&str>::MISSING);
    }

    #[test]
    fn test_tour_cost_counts_gaps() {
        let m = matrix(&[("a", "b", 4), ("c", "d", 6)]);
        assert_eq!(
            tour_cost(&m, &["a", "b", "c", "d"]),
            TourCost { gaps: 1, distance: 10 }
        );
        assert!(tour_cost(&m, &["b", "a", "c", "d"]) > tour_cost(&m, &["a", "b", "c", "d"]));
        assert!(TourCost { gaps: 0, distance: 1_000 } < TourCost { gaps: 1, distance: 0 });
    }

    #[test]
    fn test_improve_uncrosses_route() {
        let m = line();
        let improved = improve(&m, &["a", "c", "b", "d"]);
        assert_eq!(improved, vec!["a", "b", "c", "d"]);
        assert_eq!(total_distance(&m, &improved), 3);
    }

    #[test]
    fn test_improve_keeps_start() {
        let m = line();
        let improved = improve(&m, &["c", "a", "d", "b"]);
        assert_eq!(improved[0], "c");
        assert!(total_distance(&m, &improved) <= total_distance(&m, &["c", "a", "d", "b"]));
    }

    #[test]
    fn test_improve_short_tours_unchanged() {
        let m = line();
        assert!(improve(&m, &[]).is_empty());
        assert_eq!(improve(&m, &["b"]), vec!["b"]);
        assert_eq!(improve(&m, &["b", "a"]), vec!["b", "a"]);
    }

    #[test]
    fn test_optimise_empty_fails() {
        let m = line();
        assert_eq!(optimise(&m, &[]), Err(OptimizeError::EmptyInput));
    }

    #[test]
    fn test_panic_message_extracts_str_and_string() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown fault");
    }
}
