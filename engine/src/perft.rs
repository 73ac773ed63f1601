/*
  This file is part of an Ataxx game engine.

  This program is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  This program is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Transposition-table-accelerated and worker-pool-parallel perft, layered
//! on top of [`ataxx_base::perft`]'s ground-truth move generator.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;

use ataxx_base::{perft::count_moves, Position};

use crate::transposition::TTable;

/// Pack a perft result into the transposition table's opaque payload: the
/// low byte is the depth it was computed to (the convention every payload
/// in this table shares, see [`crate::transposition`]), and the remaining
/// 56 bits are the leaf count.
fn encode(depth: u8, count: u64) -> u64 {
    u64::from(depth) | (count << 8)
}

fn decode(payload: u64, depth: u32) -> Option<u64> {
    if payload == 0 {
        return None;
    }
    if u32::from((payload & 0xFF) as u8) != depth {
        return None;
    }
    Some(payload >> 8)
}

#[must_use]
/// Count the leaf positions reachable from `pos` after `depth` plies,
/// probing and populating `ttable` along the way. Produces the same count
/// as [`ataxx_base::perft::perft`] for every position and depth, just
/// faster on repeated or transposing positions.
pub fn perft_tt(pos: &Position, depth: u32, ttable: &TTable) -> u64 {
    if depth == 0 {
        return 1;
    }

    let key = pos.hash();
    if let Some(count) = decode(ttable.probe(key), depth) {
        return count;
    }

    let count = if depth == 1 {
        count_moves(pos)
    } else {
        let mut nodes = 0u64;
        for &m in &pos.legal_moves() {
            let mut child = *pos;
            child.make_move(m);
            nodes += perft_tt(&child, depth - 1, ttable);
        }
        nodes
    };

    ttable.write(key, encode(depth.min(u32::from(u8::MAX)) as u8, count));
    count
}

#[must_use]
/// Split `depth` plies of perft from `pos` across `threads` worker
/// threads, each pulling the next unclaimed root move from a shared
/// counter and recursing single-threaded (through [`perft_tt`], sharing
/// `ttable`) from there. Produces the same total as [`perft_tt`] for any
/// `threads >= 1`.
pub fn perft_parallel(pos: &Position, depth: u32, threads: usize, ttable: &TTable) -> u64 {
    if depth == 0 {
        return 1;
    }

    let root_moves = pos.legal_moves();
    if root_moves.is_empty() {
        return 0;
    }
    let root_moves: Vec<_> = root_moves.as_slice().to_vec();

    let next_index = AtomicUsize::new(0);
    let total = AtomicU64::new(0);
    let worker_count = threads.max(1).min(root_moves.len());

    thread::scope(|scope| {
        for _ in 0..worker_count {
            let next_index = &next_index;
            let total = &total;
            let root_moves = &root_moves;
            scope.spawn(move || loop {
                let idx = next_index.fetch_add(1, Ordering::Relaxed);
                if idx >= root_moves.len() {
                    break;
                }
                let mut child = *pos;
                child.make_move(root_moves[idx]);
                let count = perft_tt(&child, depth - 1, ttable);
                total.fetch_add(count, Ordering::Relaxed);
            });
        }
    });

    total.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ataxx_base::perft::perft;

    #[test]
    fn perft_tt_matches_the_reference_implementation() {
        let pos = Position::start();
        let ttable = TTable::with_size_mb(1);
        for depth in 0..=4 {
            assert_eq!(perft_tt(&pos, depth, &ttable), perft(&pos, depth));
        }
    }

    #[test]
    fn perft_tt_is_stable_across_repeated_calls() {
        let pos = Position::start();
        let ttable = TTable::with_size_mb(1);
        let first = perft_tt(&pos, 4, &ttable);
        let second = perft_tt(&pos, 4, &ttable);
        assert_eq!(first, second);
    }

    #[test]
    fn perft_parallel_matches_the_reference_implementation_at_various_thread_counts() {
        let pos = Position::start();
        for threads in [1, 2, 4, 8] {
            let ttable = TTable::with_size_mb(1);
            assert_eq!(perft_parallel(&pos, 3, threads, &ttable), perft(&pos, 3));
        }
    }

    #[test]
    fn perft_parallel_handles_zero_depth() {
        let pos = Position::start();
        let ttable = TTable::with_size_mb(1);
        assert_eq!(perft_parallel(&pos, 0, 4, &ttable), 1);
    }

    #[test]
    fn perft_parallel_returns_zero_when_a_side_has_no_stones() {
        let pos = Position::parse("7/7/7/7/7/7/7 x 0");
        let ttable = TTable::with_size_mb(1);
        assert_eq!(perft_parallel(&pos, 2, 4, &ttable), 0);
    }

    #[test]
    fn jump_capture_position_matches_across_variants() {
        let pos = Position::parse("x5o/7/7/3x3/7/7/o5x x 0");
        let ttable_a = TTable::with_size_mb(1);
        let ttable_b = TTable::with_size_mb(1);
        assert_eq!(
            perft_tt(&pos, 3, &ttable_a),
            perft_parallel(&pos, 3, 3, &ttable_b)
        );
    }
}
