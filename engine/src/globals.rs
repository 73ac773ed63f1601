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

//! Search globals: the state shared between the thread running a search and
//! whatever thread might ask it to stop early, plus the node counter and
//! clock that decide when that happens on their own.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use ataxx_base::Color;

use crate::time::GoParams;

/// Node counts are only checked against the clock/cap once every 4096
/// nodes (tested via these low bits), so the hot path of search pays for a
/// relaxed atomic increment and nothing else almost all of the time.
const NODE_CHECK_MASK: u64 = 0xFFF;

#[derive(Debug)]
/// Shared, thread-safe state for a single in-progress search. One
/// `SearchGlobals` is created per `go` command and handed (by reference or
/// `Arc`) to every node of the search tree, and to whichever thread handles
/// an incoming `stop` command.
pub struct SearchGlobals {
    side: Color,
    go: GoParams,
    stop: AtomicBool,
    nodes: AtomicU64,
    start: Instant,
}

impl SearchGlobals {
    #[must_use]
    /// Begin timing a search for `side`, governed by `go`'s clock/infinite
    /// parameters.
    pub fn new(side: Color, go: GoParams) -> SearchGlobals {
        SearchGlobals {
            side,
            go,
            stop: AtomicBool::new(false),
            nodes: AtomicU64::new(0),
            start: Instant::now(),
        }
    }

    /// Record that one more node has been visited, and return the running
    /// total.
    #[inline]
    pub fn inc_nodes(&self) -> u64 {
        self.nodes.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[must_use]
    #[inline]
    /// The cumulative number of nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    #[must_use]
    /// Time elapsed since this search began.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    /// Ask another thread (typically the one handling a `stop` command) to
    /// end the search as soon as it next checks.
    pub fn force_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    #[must_use]
    /// Whether the search should stop right now: either because it was
    /// told to, because a node cap was exceeded, or because the clock ran
    /// out. Cheap to call on every node: the expensive clock/cap checks
    /// only run once every 4096 nodes.
    pub fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Acquire) {
            return true;
        }
        let nodes = self.nodes.load(Ordering::Relaxed);
        if nodes & NODE_CHECK_MASK != 0 {
            return false;
        }
        if let Some(cap) = self.go.nodes {
            if nodes >= cap {
                self.stop.store(true, Ordering::Release);
                return true;
            }
        }
        if let Some(budget) = self.go.budget_millis(self.side) {
            if self.start.elapsed().as_millis() as u64 >= budget {
                self.stop.store(true, Ordering::Release);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_stop_is_observed_immediately() {
        let sg = SearchGlobals::new(Color::Cross, GoParams::default());
        assert!(!sg.should_stop());
        sg.force_stop();
        assert!(sg.should_stop());
    }

    #[test]
    fn node_counter_increments() {
        let sg = SearchGlobals::new(Color::Cross, GoParams::default());
        assert_eq!(sg.inc_nodes(), 1);
        assert_eq!(sg.inc_nodes(), 2);
        assert_eq!(sg.nodes(), 2);
    }

    #[test]
    fn unbounded_search_never_stops_on_its_own() {
        let sg = SearchGlobals::new(Color::Cross, GoParams::default());
        for _ in 0..10_000 {
            sg.inc_nodes();
        }
        assert!(!sg.should_stop());
    }

    #[test]
    fn node_cap_stops_the_search() {
        let go = GoParams {
            nodes: Some(5),
            ..GoParams::default()
        };
        let sg = SearchGlobals::new(Color::Cross, go);
        for _ in 0..4096 {
            sg.inc_nodes();
        }
        assert!(sg.should_stop());
    }
}
