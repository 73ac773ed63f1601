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

//! Zobrist keys used to incrementally hash a position as stones are placed
//! and flipped.

use once_cell::sync::Lazy;

use crate::Color;

/// One key per (color, square) pair, XORed in whenever a stone of that
/// color occupies that square.
pub static PIECE_SQUARE_KEYS: Lazy<[[u64; 49]; 2]> = Lazy::new(|| {
    let rng = fastrand::Rng::with_seed(0x5750_4159_434F_4465);
    let mut keys = [[0u64; 49]; 2];
    for color_keys in &mut keys {
        for key in color_keys.iter_mut() {
            *key = rng.u64(..);
        }
    }
    keys
});

/// XORed into the hash whenever it is knot's turn to move.
pub static SIDE_TO_MOVE_KEY: Lazy<u64> =
    Lazy::new(|| fastrand::Rng::with_seed(0x0053_4944_4554_4F4D).u64(..));

#[inline(always)]
#[must_use]
/// The key for a stone of `color` sitting on square index `sq`.
pub fn piece_square_key(color: Color, sq: u8) -> u64 {
    PIECE_SQUARE_KEYS[color.index()][sq as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_square_keys_are_not_trivially_zero() {
        assert_ne!(piece_square_key(Color::Cross, 0), 0);
        assert_ne!(piece_square_key(Color::Knot, 48), 0);
    }

    #[test]
    fn distinct_squares_get_distinct_keys() {
        assert_ne!(
            piece_square_key(Color::Cross, 0),
            piece_square_key(Color::Cross, 1)
        );
    }

    #[test]
    fn distinct_colors_get_distinct_keys_on_the_same_square() {
        assert_ne!(
            piece_square_key(Color::Cross, 10),
            piece_square_key(Color::Knot, 10)
        );
    }

    #[test]
    fn keys_are_stable_across_calls() {
        assert_eq!(
            piece_square_key(Color::Cross, 5),
            piece_square_key(Color::Cross, 5)
        );
        assert_eq!(*SIDE_TO_MOVE_KEY, *SIDE_TO_MOVE_KEY);
    }
}
