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

//! Error taxonomy for the pieces of the engine that cross a thread or
//! process boundary. Parse failures are handled separately (as `Result<T,
//! String>`, see [`crate::protocol`]) since their messages are purely
//! diagnostic and never matched on.

use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Failure modes that can occur while coordinating the background search
/// thread. Search itself never errors: timeouts, depth limits, and the
/// 100-move rule are all ordinary return values, not [`SearchError`]s.
pub enum SearchError {
    /// The background search thread panicked or otherwise could not be
    /// joined.
    Join,
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Join => write!(f, "search thread failed to join"),
        }
    }
}

impl std::error::Error for SearchError {}
