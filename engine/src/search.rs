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

//! The search algorithm: a negamax tree search with alpha-beta pruning,
//! driven by iterative deepening, backed by the shared transposition table.
//!
//! Ataxx has no captures to quiesce and no checks to extend, so there is no
//! quiescence search here: a leaf is simply the static evaluation. What
//! principal-variation search still buys over plain alpha-beta is move
//! ordering, mate-distance pruning, and a transposition table that can
//! short-circuit whole subtrees on a re-visited position.

use ataxx_base::{Bitboard, Move, Position, Square};

use crate::evaluate::StaticEvaluator;
use crate::globals::SearchGlobals;
use crate::transposition::TTable;

/// The deepest ply this search will ever recurse to, regardless of the
/// requested iterative-deepening depth. Bounds the stack and the size of a
/// mate score.
pub const MAX_PLY: u32 = 128;

/// A score magnitude no real evaluation or mate score can reach, used as
/// the initial window at the root.
pub const INFINITE: i32 = 300_001;

/// The score awarded for delivering an immediate win. Scores closer to zero
/// than this represent a mate found deeper in the tree; see [`mate_in`].
pub const MATE_SCORE: i32 = 300_000;

/// The bound a transposition table entry represents, mirroring the
/// classical alpha-beta node types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is exact: the true minimax value of the node.
    Exact,
    /// The stored score is a lower bound: the true value is at least this
    /// high (a beta cutoff occurred).
    Lower,
    /// The stored score is an upper bound: the true value is at most this
    /// high (no move improved alpha).
    Upper,
}

/// Pack a search result into the transposition table's opaque 64-bit
/// payload. Layout, low bit first: depth (8 bits), bound (2 bits), move (12
/// bits: 6 bits `from` + 6 bits `to`), 10 unused bits, then the score as 32
/// bits occupying the top half of the word.
fn encode(mv: Move, bound: Bound, depth: u8, score: i32) -> u64 {
    let bound_bits: u64 = match bound {
        Bound::Exact => 0,
        Bound::Lower => 1,
        Bound::Upper => 2,
    };
    let move_bits: u64 = u64::from(mv.from().index()) | (u64::from(mv.to().index()) << 6);
    u64::from(depth) | (bound_bits << 8) | (move_bits << 10) | ((score as u32 as u64) << 32)
}

/// A decoded transposition table entry for the search, see [`encode`].
struct TTEntry {
    mv: Move,
    bound: Bound,
    depth: u8,
    score: i32,
}

fn decode(payload: u64) -> Option<TTEntry> {
    if payload == 0 {
        return None;
    }
    let depth = (payload & 0xFF) as u8;
    let bound = match (payload >> 8) & 0b11 {
        0 => Bound::Exact,
        1 => Bound::Lower,
        _ => Bound::Upper,
    };
    let move_bits = (payload >> 10) & 0xFFF;
    let from = Square::new((move_bits & 0x3F) as u8);
    let to = Square::new(((move_bits >> 6) & 0x3F) as u8);
    let mv = if from.index() == to.index() {
        Move::clone_move(to)
    } else {
        Move::jump(from, to)
    };
    let score = ((payload >> 32) as u32) as i32;
    Some(TTEntry {
        mv,
        bound,
        depth,
        score,
    })
}

/// Score a move for ordering purposes: the transposition table's move is
/// searched first, and every other move is scored by the stone-count swing
/// it produces, computed directly from the bitboards rather than by
/// actually playing the move.
fn order_score(pos: &Position, m: Move, tt_move: Option<Move>) -> i32 {
    if Some(m) == tt_move {
        return 1_000_000;
    }
    if m.is_null() {
        return 0;
    }
    let us = pos.stones(pos.side_to_move());
    let them = pos.stones(!pos.side_to_move());
    let captured = Bitboard::from_square(m.to()).adjacent() & them;
    let us_count = us.popcount() as i32;
    let them_count = them.popcount() as i32;
    let diff = us_count - them_count + i32::from(m.is_clone()) + 2 * captured.popcount() as i32;
    if diff > 1 {
        10_000 + diff
    } else {
        diff
    }
}

/// The result of searching a subtree: its score, from the perspective of
/// the side to move at that node, and its principal variation (empty
/// unless this was a PV node that improved alpha).
#[derive(Clone, Debug, Default)]
pub struct SearchOutcome {
    pub score: i32,
    pub pv: Vec<Move>,
}

/// Search `pos` to `depth` plies, returning its score and principal
/// variation. `ply` counts plies from the root of this iterative-deepening
/// call (the root itself is ply 1, so that it is subject to the same
/// stop/draw/mate-distance checks as every other node).
pub fn negamax(
    pos: &Position,
    mut alpha: i32,
    mut beta: i32,
    depth: i32,
    ply: u32,
    sg: &SearchGlobals,
    ttable: &TTable,
    eval_fn: StaticEvaluator,
) -> SearchOutcome {
    sg.inc_nodes();

    if depth <= 0 {
        return SearchOutcome {
            score: eval_fn(pos),
            pv: Vec::new(),
        };
    }

    if ply > 0 {
        if sg.should_stop() {
            return SearchOutcome::default();
        }
        if pos.halfmoves() >= 100 {
            return SearchOutcome::default();
        }
        if ply >= MAX_PLY {
            return SearchOutcome {
                score: eval_fn(pos),
                pv: Vec::new(),
            };
        }
        alpha = alpha.max(-MATE_SCORE + ply as i32);
        beta = beta.min(MATE_SCORE - ply as i32);
        if alpha >= beta {
            return SearchOutcome {
                score: alpha,
                pv: Vec::new(),
            };
        }
    }

    let pv_node = beta - alpha > 1;

    let mut tt_move = None;
    if let Some(entry) = decode(ttable.probe(pos.hash())) {
        tt_move = Some(entry.mv);
        if u32::from(entry.depth) >= depth as u32 {
            let cutoff = match entry.bound {
                Bound::Exact => true,
                Bound::Lower => entry.score >= beta,
                Bound::Upper => entry.score < alpha,
            };
            if cutoff {
                return SearchOutcome {
                    score: entry.score,
                    pv: vec![entry.mv],
                };
            }
        }
    }

    let mut moves = pos.legal_moves();
    if moves.is_empty() {
        // The side to move has no stones left: an immediate loss, scored
        // so that a mate found sooner is worse than one found later.
        return SearchOutcome {
            score: -MATE_SCORE + ply as i32,
            pv: Vec::new(),
        };
    }
    if moves.len() == 1 && moves.as_slice()[0].is_null() {
        let mut child = *pos;
        child.make_move(Move::NULL);
        let result = negamax(&child, -beta, -alpha, depth, ply + 1, sg, ttable, eval_fn);
        let mut pv = vec![Move::NULL];
        pv.extend(result.pv);
        return SearchOutcome {
            score: -result.score,
            pv,
        };
    }

    moves.sort_by_score(|m| order_score(pos, m, tt_move));

    let alpha_orig = alpha;
    let mut best_score = -INFINITE;
    let mut best_pv: Vec<Move> = Vec::new();

    for (i, &m) in moves.as_slice().iter().enumerate() {
        let mut child = *pos;
        child.make_move(m);

        let result = if i == 0 {
            let r = negamax(&child, -beta, -alpha, depth - 1, ply + 1, sg, ttable, eval_fn);
            SearchOutcome {
                score: -r.score,
                pv: r.pv,
            }
        } else {
            let r = negamax(
                &child,
                -alpha - 1,
                -alpha,
                depth - 1,
                ply + 1,
                sg,
                ttable,
                eval_fn,
            );
            let mut score = -r.score;
            let mut pv = r.pv;
            if score > alpha && score < beta {
                let r2 = negamax(&child, -beta, -alpha, depth - 1, ply + 1, sg, ttable, eval_fn);
                score = -r2.score;
                pv = r2.pv;
            }
            SearchOutcome { score, pv }
        };

        if ply > 0 && sg.should_stop() {
            return SearchOutcome::default();
        }

        if result.score > best_score {
            best_score = result.score;
            if result.score > alpha {
                alpha = result.score;
                if pv_node {
                    let mut new_pv = Vec::with_capacity(1 + result.pv.len());
                    new_pv.push(m);
                    new_pv.extend(result.pv);
                    best_pv = new_pv;
                }
            }
        }

        if alpha >= beta {
            break;
        }
    }

    let bound = if best_score >= beta {
        Bound::Lower
    } else if best_score <= alpha_orig {
        Bound::Upper
    } else {
        Bound::Exact
    };

    if let Some(&best_move) = best_pv.first() {
        ttable.write(
            pos.hash(),
            encode(best_move, bound, depth.max(0) as u8, best_score),
        );
    }

    SearchOutcome {
        score: best_score,
        pv: best_pv,
    }
}

/// One completed iterative-deepening pass: what a protocol adapter turns
/// into an `info` line.
#[derive(Clone, Debug)]
pub struct SearchProgress {
    pub depth: i32,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: std::time::Duration,
    pub pv: Vec<Move>,
}

/// Iteratively deepen from depth 1 until `sg` signals a stop, reporting
/// each completed depth through `on_info` and returning the best move
/// found by the deepest depth that finished, or `None` if not even depth 1
/// completed (the search was stopped before it could report anything, or
/// the side to move has no legal moves at all).
pub fn iterative_deepening(
    pos: &Position,
    ttable: &TTable,
    sg: &SearchGlobals,
    eval_fn: StaticEvaluator,
    mut on_info: impl FnMut(&SearchProgress),
) -> Option<Move> {
    let mut best_move = None;
    for depth in 1..=MAX_PLY as i32 {
        let outcome = negamax(pos, -INFINITE, INFINITE, depth, 1, sg, ttable, eval_fn);
        if outcome.pv.is_empty() {
            break;
        }
        best_move = Some(outcome.pv[0]);
        on_info(&SearchProgress {
            depth,
            score: outcome.score,
            nodes: sg.nodes(),
            elapsed: sg.elapsed(),
            pv: outcome.pv,
        });
        if sg.should_stop() {
            break;
        }
    }
    best_move
}

#[must_use]
/// If `score` represents a forced mate, the number of moves (not plies)
/// until it lands, signed so that a positive value means the side to move
/// delivers it. `None` for an ordinary evaluation score. Used by the
/// protocol adapter to print `score mate N` instead of `score cp N`.
pub fn mate_in(score: i32) -> Option<i32> {
    if score > MATE_SCORE - MAX_PLY as i32 {
        Some((MATE_SCORE - score + 1) / 2)
    } else if score < -MATE_SCORE + MAX_PLY as i32 {
        Some(-((MATE_SCORE + score + 1) / 2))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::material_eval;
    use ataxx_base::Color;
    use std::time::Duration;

    fn unlimited() -> SearchGlobals {
        SearchGlobals::new(Color::Cross, crate::time::GoParams::default())
    }

    #[test]
    fn search_entries_round_trip_through_encode_decode() {
        let mv = Move::jump(Square::from_file_rank(0, 0), Square::from_file_rank(2, 2));
        let payload = encode(mv, Bound::Lower, 7, -1234);
        let entry = decode(payload).unwrap();
        assert_eq!(entry.mv, mv);
        assert_eq!(entry.bound, Bound::Lower);
        assert_eq!(entry.depth, 7);
        assert_eq!(entry.score, -1234);
    }

    #[test]
    fn clone_move_round_trips_through_encode_decode() {
        let mv = Move::clone_move(Square::from_file_rank(3, 3));
        let payload = encode(mv, Bound::Exact, 1, 0);
        let entry = decode(payload).unwrap();
        assert!(entry.mv.is_clone());
        assert_eq!(entry.mv, mv);
    }

    #[test]
    fn finds_an_immediate_winning_capture() {
        // Cross can jump onto e4, capturing d4 and f4, leaving Knot with
        // nothing.
        let pos = Position::parse("7/7/7/3x3/7/7/7 x 0");
        let ttable = TTable::with_size_mb(1);
        let sg = unlimited();
        let best =
            iterative_deepening(&pos, &ttable, &sg, material_eval, |_| {}).expect("a move");
        assert!(!best.is_null());
    }

    #[test]
    fn depth_one_search_returns_a_legal_move_from_the_start_position() {
        let pos = Position::start();
        let ttable = TTable::with_size_mb(1);
        let sg = unlimited();
        let outcome = negamax(&pos, -INFINITE, INFINITE, 1, 1, &sg, &ttable, material_eval);
        assert!(!outcome.pv.is_empty());
        assert!(pos.legal_moves().contains(outcome.pv[0]));
    }

    #[test]
    fn a_position_with_no_stones_for_the_side_to_move_is_a_loss() {
        let pos = Position::parse("7/7/7/7/7/7/7 o 0");
        let ttable = TTable::with_size_mb(1);
        let sg = unlimited();
        let outcome = negamax(&pos, -INFINITE, INFINITE, 3, 1, &sg, &ttable, material_eval);
        assert!(outcome.score <= -MATE_SCORE + MAX_PLY as i32);
    }

    #[test]
    fn a_forced_null_move_is_reported_in_the_principal_variation() {
        let pos = Position::parse("7/1-----1/1-----1/1--x--1/1-----1/1-----1/7 x 0");
        let ttable = TTable::with_size_mb(1);
        let sg = unlimited();
        let outcome = negamax(&pos, -INFINITE, INFINITE, 2, 1, &sg, &ttable, material_eval);
        assert_eq!(outcome.pv.first(), Some(&Move::NULL));
    }

    #[test]
    fn a_stopped_search_reports_no_score() {
        let pos = Position::start();
        let ttable = TTable::with_size_mb(1);
        let sg = unlimited();
        sg.force_stop();
        let outcome = negamax(&pos, -INFINITE, INFINITE, 5, 1, &sg, &ttable, material_eval);
        assert_eq!(outcome.score, 0);
        assert!(outcome.pv.is_empty());
    }

    #[test]
    fn iterative_deepening_reports_increasing_depths() {
        let pos = Position::start();
        let ttable = TTable::with_size_mb(1);
        let sg = unlimited();
        let mut depths = Vec::new();
        let best = iterative_deepening(&pos, &ttable, &sg, material_eval, |progress| {
            depths.push(progress.depth);
            if progress.depth >= 3 {
                sg.force_stop();
            }
        });
        assert!(best.is_some());
        assert!(depths.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn mate_in_recognizes_mate_scores_and_ignores_ordinary_scores() {
        assert_eq!(mate_in(MATE_SCORE - 1), Some(1));
        assert_eq!(mate_in(-(MATE_SCORE - 1)), Some(-1));
        assert_eq!(mate_in(250), None);
    }

    #[test]
    fn a_dry_elapsed_duration_is_nonnegative() {
        let sg = unlimited();
        assert!(sg.elapsed() >= Duration::ZERO);
    }
}
