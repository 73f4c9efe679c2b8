//! Single-vehicle, single-depot tour solver over a distance matrix.
//!
//! Exact TSP is out of reach, so the solver builds a tour with a
//! nearest-neighbor (cheapest next arc) construction and polishes it with
//! 2-opt segment reversals. The result is always a valid complete tour on a
//! well-formed matrix; optimality is not guaranteed. Equal-cost arcs resolve
//! to the lowest index, which keeps output deterministic and testable.

use serde::Serialize;

use crate::error::PlannerError;

/// Ignore float noise below this when comparing candidate tours.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Maximum 2-opt improvement passes.
const MAX_IMPROVEMENT_PASSES: usize = 100;

/// An ordered visiting sequence over matrix indices.
///
/// `order` starts and ends at the depot and visits every other index exactly
/// once, so its length is matrix size + 1. `total_km` is the sum of the
/// consecutive edge weights along `order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub order: Vec<usize>,
    pub total_km: f64,
}

/// Find a short closed tour through every index of `matrix`, starting and
/// ending at `depot`.
///
/// A one-point matrix yields the trivial tour `[depot, depot]` with zero
/// length; that is a success, not an error. `NoSolution` is returned only
/// for a matrix no tour can be built from: empty, non-square, or containing
/// negative (or NaN) entries.
pub fn solve(matrix: &[Vec<f64>], depot: usize) -> Result<Tour, PlannerError> {
    let n = matrix.len();
    if n == 0 {
        return Err(PlannerError::no_solution("empty distance matrix"));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(PlannerError::no_solution(format!(
                "matrix is not square: row {} has {} entries, expected {}",
                i,
                row.len(),
                n
            )));
        }
        for (j, &entry) in row.iter().enumerate() {
            // `!(x >= 0.0)` also catches NaN.
            if !(entry >= 0.0) {
                return Err(PlannerError::no_solution(format!(
                    "matrix entry [{i}][{j}] is {entry}, expected a non-negative distance"
                )));
            }
        }
    }
    if depot >= n {
        return Err(PlannerError::validation(format!(
            "depot index {depot} is out of bounds for a {n}-point matrix"
        )));
    }

    if n == 1 {
        return Ok(Tour {
            order: vec![depot, depot],
            total_km: 0.0,
        });
    }

    let mut order = nearest_neighbor_tour(matrix, depot);
    for _ in 0..MAX_IMPROVEMENT_PASSES {
        if !two_opt_improve(matrix, &mut order) {
            break;
        }
    }

    let total_km = tour_length(matrix, &order);
    Ok(Tour { order, total_km })
}

/// Greedy construction: from the depot, repeatedly take the cheapest arc to
/// an unvisited index (lowest index on ties), then close the loop.
fn nearest_neighbor_tour(matrix: &[Vec<f64>], depot: usize) -> Vec<usize> {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n + 1);

    let mut current = depot;
    visited[current] = true;
    order.push(current);

    for _ in 1..n {
        let mut best_next = usize::MAX;
        let mut best_cost = f64::INFINITY;
        for next in 0..n {
            if !visited[next] && matrix[current][next] < best_cost {
                best_cost = matrix[current][next];
                best_next = next;
            }
        }
        visited[best_next] = true;
        order.push(best_next);
        current = best_next;
    }

    order.push(depot);
    order
}

/// Sum of consecutive edge weights along a tour.
pub fn tour_length(matrix: &[Vec<f64>], order: &[usize]) -> f64 {
    order.windows(2).map(|edge| matrix[edge[0]][edge[1]]).sum()
}

// ============================================================================
// Local Search
// ============================================================================

/// 2-opt: reverse one interior segment if that shortens the tour. The depot
/// endpoints stay fixed. Returns true when an improvement was applied.
fn two_opt_improve(matrix: &[Vec<f64>], order: &mut [usize]) -> bool {
    let len = order.len();
    if len < 5 {
        // Fewer than three interior stops: reversal cannot change the length.
        return false;
    }

    for i in 1..len - 2 {
        for j in i + 1..len - 1 {
            let before = matrix[order[i - 1]][order[i]] + matrix[order[j]][order[j + 1]];
            let after = matrix[order[i - 1]][order[j]] + matrix[order[i]][order[j + 1]];
            if after + IMPROVEMENT_EPSILON < before {
                order[i..=j].reverse();
                return true;
            }
        }
    }

    false
}
