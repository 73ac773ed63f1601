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

//! The Ataxx engine: static evaluation, the transposition table, the
//! search, time management, a perft driver, and the line protocol that
//! binds them to standard input and output.

pub mod adapter;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod globals;
pub mod perft;
pub mod protocol;
pub mod search;
pub mod time;
pub mod transposition;

pub use error::SearchError;
