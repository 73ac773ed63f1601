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

//! Entry point for the `ataxx` binary: with no subcommand it runs the
//! line-oriented protocol loop on stdin/stdout; `perft` instead runs a
//! standalone move-count benchmark and exits.

use ataxx_base::Position;
use ataxx_engine::perft::{perft_parallel, perft_tt};
use ataxx_engine::transposition::TTable;
use clap::{Parser, Subcommand};

const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 100;
const MIN_SIZE_MB: usize = 1;
const MAX_SIZE_MB: usize = 1_048_576;

#[derive(Parser)]
#[command(name = "ataxx", about = "An Ataxx game engine")]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Count leaf positions reachable from a position, for a given depth.
    Perft {
        /// The position to start from, in FEN notation.
        #[arg(short, long)]
        fen: Option<String>,
        /// How many plies to search.
        #[arg(short, long)]
        depth: u8,
        /// How many worker threads to split the root moves across.
        #[arg(short, long, default_value_t = 1)]
        threads: usize,
        /// Transposition table size, in megabytes.
        #[arg(short, long, default_value_t = 16)]
        size: usize,
    },
}

fn hardware_thread_limit() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

fn run_perft(fen: Option<String>, depth: u8, threads: usize, size: usize) {
    let depth = depth.clamp(MIN_DEPTH, MAX_DEPTH);
    let size = size.clamp(MIN_SIZE_MB, MAX_SIZE_MB);
    let threads = threads.clamp(1, hardware_thread_limit());

    let pos = match fen {
        Some(f) => Position::parse(&f),
        None => Position::start(),
    };
    let ttable = TTable::with_size_mb(size);

    let count = if threads <= 1 {
        perft_tt(&pos, u32::from(depth), &ttable)
    } else {
        perft_parallel(&pos, u32::from(depth), threads, &ttable)
    };
    println!("{count}");
}

fn main() {
    let cli = Cli::parse();
    match cli.mode {
        Some(Mode::Perft {
            fen,
            depth,
            threads,
            size,
        }) => run_perft(fen, depth, threads, size),
        None => ataxx_engine::adapter::run(),
    }
}
