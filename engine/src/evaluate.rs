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

//! Static evaluation. Ataxx has no material values to tune, no piece-square
//! tables, and no phase to taper between: the only signal worth anything is
//! stone count, so that is the entire evaluation function.

use ataxx_base::Position;

/// The weight given to each stone of advantage. A single constant, since
/// there is nothing else to weigh it against.
pub const MATERIAL: i32 = 100;

/// The shape every evaluation function in this engine conforms to: a plain
/// function pointer rather than a trait object, so the search can carry it
/// by value without any dynamic dispatch.
pub type StaticEvaluator = fn(&Position) -> i32;

#[must_use]
/// Score `pos` from the perspective of the side to move: the stone-count
/// differential, scaled by [`MATERIAL`].
pub fn material_eval(pos: &Position) -> i32 {
    let us = pos.stones(pos.side_to_move()).popcount() as i32;
    let them = pos.stones(!pos.side_to_move()).popcount() as i32;
    MATERIAL * (us - them)
}
