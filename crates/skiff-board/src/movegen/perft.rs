//! Perft (performance test) for validating move generation and move
//! application together.
//!
//! Perft counts leaf positions at a fixed depth; the totals for a handful
//! of standard positions are published and any divergence points at a bug
//! in either the generator or `make_move`.

use super::generate_moves;
use crate::Position;

/// Counts the leaf positions reachable from `position` in `depth` plies.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut next = *position;
        next.make_move(*m);
        nodes += perft(&next, depth - 1);
    }
    nodes
}

/// Perft split by first move: the node count under each root move at
/// `depth - 1`. The moves are rendered in the external UCI frame, sorted,
/// which makes diverging subtrees easy to pick out by comparison with
/// another engine.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut next = *position;
        next.make_move(*m);
        let nodes = if depth > 1 { perft(&next, depth - 1) } else { 1 };
        results.push((crate::move_to_uci(position, *m), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
