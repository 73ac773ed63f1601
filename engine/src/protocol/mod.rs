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

//! A line-oriented protocol modeled on UCI, renamed `uai` since this engine
//! plays Ataxx rather than chess. One line in, at most a few lines out; see
//! [`parse_line`] for the commands accepted and [`Message`] for what the
//! engine sends back.

use ataxx_base::Move;

mod parse;
mod send;
pub use parse::*;
pub use send::{EngineInfo, Message, OptionType};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
/// Everything the controller on the other end of stdin can ask of the
/// engine.
pub enum Command {
    /// Sent once at startup. The engine must reply with [`Message::Id`],
    /// one [`Message::Option`] per tunable, and finally [`Message::UaiOk`].
    Uai,
    /// Request a liveness check. The engine must reply [`Message::ReadyOk`]
    /// once it has caught up on any queued work.
    IsReady,
    /// Set a tunable option by name, with an optional value.
    SetOption { name: String, value: Option<String> },
    /// Reset internal state (the transposition table) ahead of a new game.
    NewGame,
    /// Set up the position to search from: either the start position or a
    /// given board string, with `moves` played afterward.
    Position {
        fen: Option<String>,
        moves: Vec<Move>,
    },
    /// Begin a search, governed by the given options.
    Go(Vec<GoOption>),
    /// End the running search as soon as possible and report a best move.
    Stop,
    /// Shut down.
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One key/value pair from a `go` command.
pub enum GoOption {
    /// Restrict the search to these moves only.
    SearchMoves(Vec<Move>),
    /// Cross's remaining time, in milliseconds.
    WTime(u64),
    /// Knot's remaining time, in milliseconds.
    BTime(u64),
    /// Cross's increment, in milliseconds.
    WInc(u64),
    /// Knot's increment, in milliseconds.
    BInc(u64),
    /// Moves remaining until the next time control.
    MovesToGo(u32),
    /// Search to exactly this many plies.
    Depth(u32),
    /// Search no more than this many nodes.
    Nodes(u64),
    /// Search for exactly this many milliseconds.
    MoveTime(u64),
    /// Search until told to stop, ignoring every clock field.
    Infinite,
}
