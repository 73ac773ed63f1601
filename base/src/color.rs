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

//! The two sides that play Ataxx.

use std::{fmt, ops::Not};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Which side a stone or a player belongs to.
pub enum Color {
    /// The cross player, conventionally the first to move.
    Cross = 0,
    /// The knot player.
    Knot = 1,
}

impl Color {
    #[inline(always)]
    #[must_use]
    /// The index of this color into a two-element, color-indexed array.
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    /// Parse a color from its textual token (`x`/`X` for Cross, `o`/`O` for
    /// Knot). Any other character is treated as Cross; callers that need to
    /// detect malformed input should check the character themselves first.
    pub fn from_char(c: char) -> Color {
        match c {
            'o' | 'O' => Color::Knot,
            _ => Color::Cross,
        }
    }

    #[must_use]
    /// The textual token for this color, as used in position strings.
    pub const fn to_char(self) -> char {
        match self {
            Color::Cross => 'x',
            Color::Knot => 'o',
        }
    }
}

impl Not for Color {
    type Output = Color;
    #[inline(always)]
    fn not(self) -> Color {
        match self {
            Color::Cross => Color::Knot,
            Color::Knot => Color::Cross,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(!Color::Cross, Color::Knot);
        assert_eq!(!Color::Knot, Color::Cross);
    }

    #[test]
    fn parses_from_char() {
        assert_eq!(Color::from_char('x'), Color::Cross);
        assert_eq!(Color::from_char('X'), Color::Cross);
        assert_eq!(Color::from_char('o'), Color::Knot);
        assert_eq!(Color::from_char('O'), Color::Knot);
    }

    #[test]
    fn round_trips_through_char() {
        for c in [Color::Cross, Color::Knot] {
            assert_eq!(Color::from_char(c.to_char()), c);
        }
    }
}
