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

//! Time management heuristics.
//!
//! Given a `go` command's clock parameters, decide how many milliseconds
//! the next search is allowed to run for. This engine rations time to
//! itself indiscriminately: there is no position-complexity estimate, just
//! a fixed fraction of the time remaining until the next increment.

use ataxx_base::Color;

/// The clock and depth/node parameters a `go` command can carry. Every
/// field is optional because a `go` command may specify any subset of
/// them, or none at all (meaning "search until told to stop").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub winc: Option<u64>,
    pub btime: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u32>,
    pub movetime: Option<u64>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub infinite: bool,
}

impl GoParams {
    #[must_use]
    /// The time remaining for `color`, if the corresponding clock field was
    /// sent.
    fn time_for(&self, color: Color) -> Option<u64> {
        match color {
            Color::Cross => self.wtime,
            Color::Knot => self.btime,
        }
    }

    #[must_use]
    /// The increment for `color`, defaulting to zero if none was sent.
    fn inc_for(&self, color: Color) -> u64 {
        match color {
            Color::Cross => self.winc,
            Color::Knot => self.binc,
        }
        .unwrap_or(0)
    }

    #[must_use]
    /// The number of milliseconds the engine should budget for this move
    /// from `color`'s point of view, or `None` if the search should run
    /// until told to stop (an `infinite` search, or a `go` with neither a
    /// clock nor a `movetime`).
    ///
    /// When the clock was sent, the budget divides the time remaining
    /// (plus the increments still to come) evenly across the moves left
    /// until the next time control, defaulting to 30 moves when
    /// `movestogo` is absent. A 50ms safety margin is reserved whenever
    /// exactly one move remains to the control, since running out of time
    /// on the very last move of a control is unrecoverable.
    pub fn budget_millis(&self, color: Color) -> Option<u64> {
        if self.infinite {
            return None;
        }
        if let Some(time) = self.time_for(color) {
            let inc = self.inc_for(color);
            let movestogo = self.movestogo.unwrap_or(30).max(1) as u64;
            let mut budget = (time + (movestogo - 1) * inc) / movestogo;
            if movestogo == 1 {
                budget = budget.saturating_sub(50);
            }
            return Some(budget);
        }
        self.movetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clock_and_no_movetime_means_unbounded() {
        let go = GoParams::default();
        assert_eq!(go.budget_millis(Color::Cross), None);
    }

    #[test]
    fn infinite_overrides_every_other_field() {
        let go = GoParams {
            wtime: Some(1000),
            infinite: true,
            ..GoParams::default()
        };
        assert_eq!(go.budget_millis(Color::Cross), None);
    }

    #[test]
    fn movetime_is_used_when_no_clock_is_sent() {
        let go = GoParams {
            movetime: Some(1234),
            ..GoParams::default()
        };
        assert_eq!(go.budget_millis(Color::Cross), Some(1234));
    }

    #[test]
    fn default_movestogo_divides_by_thirty() {
        let go = GoParams {
            wtime: Some(30_000),
            ..GoParams::default()
        };
        assert_eq!(go.budget_millis(Color::Cross), Some(1_000));
    }

    #[test]
    fn increment_is_folded_into_the_budget() {
        let go = GoParams {
            wtime: Some(30_000),
            winc: Some(100),
            movestogo: Some(1),
            ..GoParams::default()
        };
        // (30000 + 0*100) / 1 - 50 safety margin.
        assert_eq!(go.budget_millis(Color::Cross), Some(29_950));
    }

    #[test]
    fn colors_read_their_own_clock_field() {
        let go = GoParams {
            wtime: Some(10_000),
            btime: Some(20_000),
            movestogo: Some(1),
            ..GoParams::default()
        };
        assert_eq!(go.budget_millis(Color::Cross), Some(9_950));
        assert_eq!(go.budget_millis(Color::Knot), Some(19_950));
    }
}
