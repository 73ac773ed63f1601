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

//! Positions: the two piece bitboards, the gap bitboard, side to move, and
//! the incrementally maintained half-move clock and Zobrist hash.

use std::fmt::{self, Display, Formatter};

use crate::{zobrist, Bitboard, Color, Move, MoveList, Square};

/// The starting position: Cross on a1/g7, Knot on a7/g1, no gaps.
pub const START_POSITION: &str = "x5o/7/7/7/7/7/o5x x 0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A complete, self-contained Ataxx position.
pub struct Position {
    piece_bb: [Bitboard; 2],
    gaps: Bitboard,
    side_to_move: Color,
    halfmoves: u32,
    hash: u64,
}

impl Position {
    /// The starting position.
    #[must_use]
    pub fn start() -> Position {
        Position::parse(START_POSITION)
    }

    #[must_use]
    /// Parse a position from its text form (`<board> <side> <halfmoves>`).
    /// Malformed input is handled leniently and best-effort: unrecognized
    /// board tokens are skipped, a missing side defaults to Cross, and a
    /// missing or unparsable half-move count defaults to 0. This function
    /// never panics.
    pub fn parse(s: &str) -> Position {
        let mut tokens = s.split_whitespace();
        let board_part = tokens.next().unwrap_or("");
        let side_part = tokens.next().unwrap_or("x");
        let halfmoves_part = tokens.next();

        let mut piece_bb = [Bitboard::EMPTY; 2];
        let mut gaps = Bitboard::EMPTY;

        for (row_idx, row) in board_part.split('/').take(7).enumerate() {
            let rank = 6 - row_idx as u8;
            let mut file = 0u8;
            for c in row.chars() {
                if file >= 7 {
                    break;
                }
                match c {
                    '1'..='7' => file += c as u8 - b'0',
                    '-' => {
                        gaps = gaps | Bitboard::from_square(Square::from_file_rank(file, rank));
                        file += 1;
                    }
                    'x' | 'X' => {
                        let idx = Color::Cross.index();
                        piece_bb[idx] =
                            piece_bb[idx] | Bitboard::from_square(Square::from_file_rank(file, rank));
                        file += 1;
                    }
                    'o' | 'O' => {
                        let idx = Color::Knot.index();
                        piece_bb[idx] =
                            piece_bb[idx] | Bitboard::from_square(Square::from_file_rank(file, rank));
                        file += 1;
                    }
                    _ => {}
                }
            }
        }

        let side_to_move = Color::from_char(side_part.chars().next().unwrap_or('x'));
        let halfmoves = halfmoves_part
            .and_then(|tok| tok.parse::<u32>().ok())
            .unwrap_or(0);

        let mut pos = Position {
            piece_bb,
            gaps,
            side_to_move,
            halfmoves,
            hash: 0,
        };
        pos.hash = pos.recompute_hash();
        pos
    }

    #[must_use]
    /// Recompute the Zobrist hash from scratch, ignoring the incrementally
    /// maintained value. Used to check hash consistency.
    pub fn recompute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for sq in self.piece_bb[Color::Cross.index()].iter() {
            hash ^= zobrist::piece_square_key(Color::Cross, sq.index());
        }
        for sq in self.piece_bb[Color::Knot.index()].iter() {
            hash ^= zobrist::piece_square_key(Color::Knot, sq.index());
        }
        if self.side_to_move == Color::Knot {
            hash ^= *zobrist::SIDE_TO_MOVE_KEY;
        }
        hash
    }

    #[inline(always)]
    #[must_use]
    /// The incrementally maintained Zobrist hash of this position.
    pub const fn hash(&self) -> u64 {
        self.hash
    }

    #[inline(always)]
    #[must_use]
    /// The side to move.
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    #[must_use]
    /// The half-move clock, counting plies since the last clone or capture.
    pub const fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    #[inline(always)]
    #[must_use]
    /// The stones belonging to `color`.
    pub const fn stones(&self, color: Color) -> Bitboard {
        self.piece_bb[color.index()]
    }

    #[inline(always)]
    #[must_use]
    /// The permanently blocked squares.
    pub const fn gaps(&self) -> Bitboard {
        self.gaps
    }

    #[must_use]
    /// Generate the legal moves available to the side to move: one clone
    /// move per empty square adjacent to a friendly stone, one jump move
    /// per (stone, empty square two king-steps away) pair, or a single
    /// null move if the side has stones but neither kind of move exists.
    /// Returns an empty list if the side to move has no stones left.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let us = self.piece_bb[self.side_to_move.index()];
        if us.is_empty() {
            return moves;
        }
        let them = self.piece_bb[(!self.side_to_move).index()];
        let empty = !(us | them | self.gaps);

        let clone_targets = us.adjacent() & empty;
        for to in clone_targets.iter() {
            moves.push(Move::clone_move(to));
        }

        for from in us.iter() {
            let jump_targets = Bitboard::from_square(from).jumps() & empty;
            for to in jump_targets.iter() {
                moves.push(Move::jump(from, to));
            }
        }

        if moves.is_empty() {
            moves.push(Move::NULL);
        }
        moves
    }

    /// Apply `m` to this position, updating bitboards, the half-move
    /// clock, and the Zobrist hash incrementally. Assumes `m` was produced
    /// by [`Position::legal_moves`] on this exact position.
    pub fn make_move(&mut self, m: Move) {
        if m.is_null() {
            self.hash ^= *zobrist::SIDE_TO_MOVE_KEY;
            self.side_to_move = !self.side_to_move;
            return;
        }

        let us = self.side_to_move;
        let them = !us;
        let from = m.from();
        let to = m.to();
        let from_bb = Bitboard::from_square(from);
        let to_bb = Bitboard::from_square(to);
        let captured = to_bb.adjacent() & self.piece_bb[them.index()];

        if !m.is_clone() {
            self.hash ^= zobrist::piece_square_key(us, from.index());
        }
        self.hash ^= zobrist::piece_square_key(us, to.index());
        for sq in captured.iter() {
            self.hash ^= zobrist::piece_square_key(them, sq.index());
            self.hash ^= zobrist::piece_square_key(us, sq.index());
        }
        self.hash ^= *zobrist::SIDE_TO_MOVE_KEY;

        self.piece_bb[them.index()] = self.piece_bb[them.index()] ^ captured;
        self.piece_bb[us.index()] = self.piece_bb[us.index()] ^ (from_bb | to_bb | captured);

        self.halfmoves += 1;
        if m.is_clone() {
            self.halfmoves = 0;
        }

        self.side_to_move = them;
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row_idx in 0..7 {
            let rank = 6 - row_idx;
            let mut empty_run = 0u8;
            for file in 0..7 {
                let sq = Square::from_file_rank(file, rank);
                if self.gaps.contains(sq) {
                    if empty_run > 0 {
                        write!(f, "{empty_run}")?;
                        empty_run = 0;
                    }
                    write!(f, "-")?;
                } else if self.piece_bb[Color::Cross.index()].contains(sq) {
                    if empty_run > 0 {
                        write!(f, "{empty_run}")?;
                        empty_run = 0;
                    }
                    write!(f, "x")?;
                } else if self.piece_bb[Color::Knot.index()].contains(sq) {
                    if empty_run > 0 {
                        write!(f, "{empty_run}")?;
                        empty_run = 0;
                    }
                    write!(f, "o")?;
                } else {
                    empty_run += 1;
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if row_idx < 6 {
                write!(f, "/")?;
            }
        }
        write!(f, " {} {}", self.side_to_move, self.halfmoves)
    }
}
