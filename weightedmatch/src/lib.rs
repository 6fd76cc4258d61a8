//! Minimum-cost perfect matching in general graphs.
//!
//! [`min_cost_perfect_matching`] pairs every vertex of a sparse candidate
//! graph at minimum total cost using Gabow's implementation of Edmonds'
//! algorithm, or reports that no perfect matching exists.

mod gabow;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::gabow::{MinCostMatch, UNMATCHED};

pub type Weight = i64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("a perfect matching needs an even number of vertices, got {0}")]
    OddVertexCount(usize),
    #[error("vertex {vertex} is out of range for {vertices} vertices")]
    VertexOutOfRange { vertex: usize, vertices: usize },
    #[error("candidate edge joins vertex {0} to itself")]
    SelfLoop(usize),
    #[error("candidate weights are too large to match exactly")]
    WeightOverflow,
    #[error("the candidate edges admit no perfect matching")]
    NoPerfectMatching,
}

pub type Result<T> = std::result::Result<T, MatchError>;

/// Finds a perfect matching of minimum total weight that only uses the
/// given candidate edges `(i, j, weight)` over vertices `0..vertices`.
///
/// Returns `mate` with `mate[i]` the partner of `i`. Parallel candidates
/// between the same pair keep the cheaper weight.
pub fn min_cost_perfect_matching(
    vertices: usize,
    edges: &[(usize, usize, Weight)],
) -> Result<Vec<usize>> {
    if vertices % 2 != 0 {
        return Err(MatchError::OddVertexCount(vertices));
    }

    let mut cheapest: BTreeMap<(usize, usize), Weight> = BTreeMap::new();
    for &(i, j, w) in edges {
        for &vertex in &[i, j] {
            if vertex >= vertices {
                return Err(MatchError::VertexOutOfRange { vertex, vertices });
            }
        }
        if i == j {
            return Err(MatchError::SelfLoop(i));
        }
        let weight = cheapest.entry((i.min(j), i.max(j))).or_insert(w);
        *weight = (*weight).min(w);
    }
    if vertices == 0 {
        return Ok(Vec::new());
    }
    if cheapest.is_empty() {
        return Err(MatchError::NoPerfectMatching);
    }

    // The engine numbers vertices from 1.
    let candidates: Vec<(usize, usize, Weight)> = cheapest
        .into_iter()
        .map(|((i, j), w)| (i + 1, j + 1, w))
        .collect();
    debug!(vertices, candidates = candidates.len(), "solving minimum cost perfect matching");

    let search = MinCostMatch::new(vertices, &candidates).ok_or(MatchError::WeightOverflow)?;
    let mate = search.solve();
    if mate[1..].contains(&UNMATCHED) {
        return Err(MatchError::NoPerfectMatching);
    }
    let mate: Vec<usize> = mate[1..].iter().map(|&m| m - 1).collect();
    debug_assert!(mate.iter().enumerate().all(|(i, &j)| mate[j] == i));
    Ok(mate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(mate: &[usize], edges: &[(usize, usize, Weight)]) -> Weight {
        mate.iter()
            .enumerate()
            .filter(|&(i, &j)| i < j)
            .map(|(i, &j)| {
                edges
                    .iter()
                    .filter(|&&(a, b, _)| (a, b) == (i, j) || (a, b) == (j, i))
                    .map(|e| e.2)
                    .min()
                    .unwrap()
            })
            .sum()
    }

    // Cheapest perfect matching by exhaustive pairing of the lowest free
    // vertex; `None` when the free vertices cannot all be paired.
    fn brute_min(free: &mut Vec<usize>, costs: &[Vec<Option<Weight>>]) -> Option<Weight> {
        if free.is_empty() {
            return Some(0);
        }
        let first = free.remove(0);
        let mut best: Option<Weight> = None;
        for k in 0..free.len() {
            let cost = match costs[first][free[k]] {
                Some(cost) => cost,
                None => continue,
            };
            let other = free.remove(k);
            if let Some(rest) = brute_min(free, costs) {
                best = Some(best.map_or(cost + rest, |b| b.min(cost + rest)));
            }
            free.insert(k, other);
        }
        free.insert(0, first);
        best
    }

    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> Weight {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((self.0 >> 33) % 50) as Weight
        }
    }

    // Random candidate graphs on `n` vertices; `keep` out of 50 pairs get an
    // edge.
    fn check_against_exhaustive(seed: u64, n: usize, keep: Weight) {
        let mut rng = Lcg(seed);
        let mut costs = vec![vec![None; n]; n];
        let mut edges = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                if rng.next() >= keep {
                    continue;
                }
                let w = rng.next();
                costs[i][j] = Some(w);
                costs[j][i] = Some(w);
                edges.push((i, j, w));
            }
        }
        let mut free: Vec<usize> = (0..n).collect();
        match (min_cost_perfect_matching(n, &edges), brute_min(&mut free, &costs)) {
            (Ok(mate), Some(best)) => assert_eq!(total(&mate, &edges), best, "seed {}", seed),
            (Err(MatchError::NoPerfectMatching), None) => {}
            (found, best) => panic!("seed {}: {:?} but exhaustive {:?}", seed, found, best),
        }
    }

    #[test]
    fn empty_graph() {
        assert_eq!(min_cost_perfect_matching(0, &[]), Ok(vec![]));
        assert_eq!(
            min_cost_perfect_matching(2, &[]),
            Err(MatchError::NoPerfectMatching)
        );
    }

    #[test]
    fn single_pair() {
        assert_eq!(min_cost_perfect_matching(2, &[(0, 1, 7)]), Ok(vec![1, 0]));
    }

    #[test]
    fn square_prefers_cheap_sides() {
        let edges = [
            (0, 1, 1),
            (2, 3, 1),
            (0, 2, 10),
            (1, 3, 10),
            (0, 3, 10),
            (1, 2, 10),
        ];
        assert_eq!(min_cost_perfect_matching(4, &edges), Ok(vec![1, 0, 3, 2]));
    }

    #[test]
    fn cheapest_total_beats_cheapest_edge() {
        let edges = [(0, 1, 1), (2, 3, 100), (0, 2, 30), (1, 3, 30)];
        let mate = min_cost_perfect_matching(4, &edges).unwrap();
        assert_eq!(mate, vec![2, 3, 0, 1]);
        assert_eq!(total(&mate, &edges), 60);
    }

    #[test]
    fn size_wins_over_cost() {
        // The cheap middle edge would leave both ends single.
        let edges = [(1, 2, 0), (0, 1, 40), (2, 3, 40)];
        assert_eq!(min_cost_perfect_matching(4, &edges), Ok(vec![1, 0, 3, 2]));
    }

    #[test]
    fn parallel_candidates_keep_cheaper() {
        let edges = [(0, 1, 9), (1, 0, 4)];
        let mate = min_cost_perfect_matching(2, &edges).unwrap();
        assert_eq!(total(&mate, &edges), 4);
    }

    #[test]
    fn zero_and_negative_weights() {
        let edges = [(0, 1, 0), (2, 3, -5), (0, 2, -1), (1, 3, -1)];
        let mate = min_cost_perfect_matching(4, &edges).unwrap();
        assert_eq!(total(&mate, &edges), -5);
    }

    #[test]
    fn star_has_no_perfect_matching() {
        let edges = [(0, 1, 1), (0, 2, 1), (0, 3, 1)];
        assert_eq!(
            min_cost_perfect_matching(4, &edges),
            Err(MatchError::NoPerfectMatching)
        );
    }

    #[test]
    fn two_components_match_separately() {
        let edges = [(0, 1, 3), (2, 3, 5)];
        assert_eq!(min_cost_perfect_matching(4, &edges), Ok(vec![1, 0, 3, 2]));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            min_cost_perfect_matching(3, &[(0, 1, 1)]),
            Err(MatchError::OddVertexCount(3))
        );
        assert_eq!(
            min_cost_perfect_matching(2, &[(0, 2, 1)]),
            Err(MatchError::VertexOutOfRange {
                vertex: 2,
                vertices: 2
            })
        );
        assert_eq!(
            min_cost_perfect_matching(2, &[(1, 1, 1)]),
            Err(MatchError::SelfLoop(1))
        );
    }

    #[test]
    fn huge_weights_are_refused() {
        let edges = [(0, 1, 0), (2, 3, Weight::MAX / 4)];
        assert_eq!(
            min_cost_perfect_matching(4, &edges),
            Err(MatchError::WeightOverflow)
        );
        let edges = [(0, 1, Weight::MIN), (2, 3, Weight::MAX)];
        assert_eq!(
            min_cost_perfect_matching(4, &edges),
            Err(MatchError::WeightOverflow)
        );
    }

    #[test]
    fn complete_graphs_agree_with_exhaustive_search() {
        for seed in 0..40u64 {
            check_against_exhaustive(seed, 2 + 2 * (seed as usize % 3), 50);
        }
    }

    #[test]
    fn sparse_graphs_agree_with_exhaustive_search() {
        for seed in 0..120u64 {
            check_against_exhaustive(seed, 2 + 2 * (seed as usize % 4), 25);
        }
    }
}
