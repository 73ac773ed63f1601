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

//! Engine-wide configuration. Small on purpose: there is only one option
//! an operator can tune from outside, the transposition table size.

/// The transposition table size, in MiB, used when no `setoption`/`-s` flag
/// overrides it.
pub const DEFAULT_HASH_MB: usize = 16;

/// The smallest hash table size that will be honored.
pub const MIN_HASH_MB: usize = 1;

/// The largest hash table size that will be honored: one terabyte.
pub const MAX_HASH_MB: usize = 1_048_576;

#[must_use]
/// Clamp a requested hash size to the supported range, rather than
/// rejecting it outright.
pub const fn clamp_hash_mb(mb: usize) -> usize {
    if mb < MIN_HASH_MB {
        MIN_HASH_MB
    } else if mb > MAX_HASH_MB {
        MAX_HASH_MB
    } else {
        mb
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Configuration the engine reads at startup and that `setoption` may
/// subsequently change.
pub struct SearchConfig {
    /// Transposition table size, in MiB.
    pub hash_mb: usize,
}

impl SearchConfig {
    #[must_use]
    pub const fn new(hash_mb: usize) -> SearchConfig {
        SearchConfig {
            hash_mb: clamp_hash_mb(hash_mb),
        }
    }

    /// Overwrite the hash size, clamping it to the supported range.
    pub fn set_hash_mb(&mut self, mb: usize) {
        self.hash_mb = clamp_hash_mb(mb);
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig::new(DEFAULT_HASH_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_below_minimum() {
        assert_eq!(clamp_hash_mb(0), MIN_HASH_MB);
    }

    #[test]
    fn clamps_above_maximum() {
        assert_eq!(clamp_hash_mb(usize::MAX), MAX_HASH_MB);
    }

    #[test]
    fn leaves_in_range_values_untouched() {
        assert_eq!(clamp_hash_mb(64), 64);
    }

    #[test]
    fn default_config_uses_default_hash_size() {
        assert_eq!(SearchConfig::default().hash_mb, DEFAULT_HASH_MB);
    }
}
