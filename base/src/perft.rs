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

//! Performance testing, or "perft": exhaustive leaf-counting move-generator
//! tests. This single-threaded, TT-less variant is the ground-truth
//! reference; the engine crate layers a transposition-table-accelerated and
//! a worker-pool-parallel variant on top of the same move generator.

use crate::{Bitboard, Position};

#[must_use]
/// Count the legal moves available to the side to move, without allocating
/// a move list. If either side has no stones left, the game is already
/// over and the count is 0 (not 1, even though no moves exist either).
/// Otherwise, a side with stones but no clone or jump target has exactly
/// one legal move: the null move.
pub fn count_moves(pos: &Position) -> u64 {
    let us = pos.stones(pos.side_to_move());
    let them = pos.stones(!pos.side_to_move());
    if us.is_empty() || them.is_empty() {
        return 0;
    }

    let empty = !(us | them | pos.gaps());
    let mut count = u64::from((us.adjacent() & empty).popcount());
    for from in us.iter() {
        count += u64::from((Bitboard::from_square(from).jumps() & empty).popcount());
    }

    if count == 0 {
        1
    } else {
        count
    }
}

#[must_use]
/// Count the number of leaf positions reachable from `pos` after exactly
/// `depth` plies.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if depth == 1 {
        return count_moves(pos);
    }

    let mut nodes = 0u64;
    for &m in &pos.legal_moves() {
        let mut child = *pos;
        child.make_move(m);
        nodes += perft(&child, depth - 1);
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn perft_start_position() {
        perft_assistant(
            "x5o/7/7/7/7/7/o5x x 0",
            &[1, 16, 256, 6460, 155_888],
        );
    }

    #[test]
    fn count_moves_is_zero_when_a_side_has_no_stones() {
        let pos = Position::parse("7/7/7/7/7/7/7 x 0");
        assert_eq!(count_moves(&pos), 0);
    }

    #[test]
    fn count_moves_falls_back_to_one_null_move() {
        let pos = Position::parse("7/1-----1/1-----1/1--x--1/1-----1/1-----1/7 x 0");
        assert_eq!(count_moves(&pos), 1);
    }

    #[test]
    fn count_moves_matches_legal_moves_length() {
        let pos = Position::start();
        assert_eq!(count_moves(&pos), pos.legal_moves().len() as u64);
    }

    #[test]
    fn divide_at_depth_two_sums_to_the_depth_two_total() {
        let pos = Position::start();
        let mut total = 0u64;
        for &m in &pos.legal_moves() {
            let mut child = pos;
            child.make_move(m);
            let sub = perft(&child, 1);
            total += sub;
        }
        assert_eq!(total, perft(&pos, 2));
    }

    #[test]
    fn jump_capture_perft_one_counts_targets_correctly() {
        let pos = Position::parse("x5o/7/7/3x3/7/7/o5x x 0");
        // d4's 8 clone targets minus gaps/stones, plus its 16 jump targets,
        // none of which are occupied in this otherwise-empty middle board.
        let d4 = Square::from_algebraic("d4").unwrap();
        assert!(pos.stones(crate::Color::Cross).contains(d4));
        assert_eq!(perft(&pos, 1), count_moves(&pos));
    }

    fn perft_assistant(fen: &str, node_counts: &[u64]) {
        let pos = Position::parse(fen);
        for (depth, &expected) in node_counts.iter().enumerate() {
            assert_eq!(perft(&pos, depth as u32), expected, "depth {depth}");
        }
    }
}
