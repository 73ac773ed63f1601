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

//! Shared data types used across the whole Ataxx engine: bitboards, squares,
//! moves, Zobrist keys, and the position representation built from them.

mod bitboard;
pub use bitboard::Bitboard;

mod color;
pub use color::Color;

mod square;
pub use square::Square;

mod zobrist;

mod moves;
pub use moves::{Move, MoveList};

mod position;
pub use position::Position;

pub mod perft;
