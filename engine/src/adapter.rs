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

//! The protocol read loop, shared by the `ataxx_engine` binary and the
//! no-subcommand mode of the `ataxx` CLI.
//!
//! Reads one line at a time from stdin, parses it into a [`Command`], and
//! reacts. A `go` spawns a background thread that runs iterative deepening
//! and prints `info`/`bestmove` lines as it goes; every other command is
//! handled inline on the main thread.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use ataxx_base::{Move, Position};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::evaluate::material_eval;
use crate::globals::SearchGlobals;
use crate::protocol::{parse_line, Command, EngineInfo, GoOption, Message, OptionType};
use crate::search::iterative_deepening;
use crate::time::GoParams;
use crate::transposition::TTable;

struct Engine {
    pos: Position,
    config: SearchConfig,
    ttable: Arc<TTable>,
    globals: Option<Arc<SearchGlobals>>,
    search_handle: Option<thread::JoinHandle<()>>,
}

impl Engine {
    fn new() -> Engine {
        let config = SearchConfig::default();
        Engine {
            pos: Position::start(),
            ttable: Arc::new(TTable::with_size_mb(config.hash_mb)),
            config,
            globals: None,
            search_handle: None,
        }
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Uai => self.uai(),
            Command::IsReady => println!("{}", Message::ReadyOk),
            Command::SetOption { name, value } => self.set_option(&name, value),
            Command::NewGame => self.new_game(),
            Command::Position { fen, moves } => self.set_position(fen, &moves),
            Command::Go(opts) => self.go(&opts),
            Command::Stop => self.stop(),
            Command::Quit => unreachable!("the main loop intercepts quit before dispatch"),
        }
    }

    fn uai(&self) {
        println!(
            "{}",
            Message::Id {
                name: Some(concat!(
                    "Ataxx Engine ",
                    env!("CARGO_PKG_VERSION"),
                    " (",
                    env!("GIT_HASH"),
                    ")"
                )),
                author: Some("The Ataxx Engine Authors"),
            }
        );
        println!(
            "{}",
            Message::Option {
                name: "Hash",
                opt: OptionType::Spin {
                    default: crate::config::DEFAULT_HASH_MB as i64,
                    min: crate::config::MIN_HASH_MB as i64,
                    max: crate::config::MAX_HASH_MB as i64,
                },
            }
        );
        println!("{}", Message::UaiOk);
    }

    fn set_option(&mut self, name: &str, value: Option<String>) {
        match name {
            "Hash" => match value.and_then(|v| v.parse::<usize>().ok()) {
                Some(mb) => {
                    self.stop();
                    self.config.set_hash_mb(mb);
                    self.ttable = Arc::new(TTable::with_size_mb(self.config.hash_mb));
                }
                None => debug_info("no usable value given for option `Hash`"),
            },
            _ => debug_info(&format!("unknown option `{name}`")),
        }
    }

    fn new_game(&mut self) {
        self.stop();
        self.ttable = Arc::new(TTable::with_size_mb(self.config.hash_mb));
        self.pos = Position::start();
    }

    fn set_position(&mut self, fen: Option<String>, moves: &[Move]) {
        self.pos = match fen {
            Some(f) => Position::parse(&f),
            None => Position::start(),
        };
        for &m in moves {
            self.pos.make_move(m);
        }
    }

    fn go(&mut self, opts: &[GoOption]) {
        self.stop();

        let mut go = GoParams::default();
        for opt in opts {
            match opt {
                GoOption::SearchMoves(_) => {
                    debug_info("searchmoves is not supported; searching every legal move");
                }
                &GoOption::WTime(t) => go.wtime = Some(t),
                &GoOption::BTime(t) => go.btime = Some(t),
                &GoOption::WInc(i) => go.winc = Some(i),
                &GoOption::BInc(i) => go.binc = Some(i),
                &GoOption::MovesToGo(n) => go.movestogo = Some(n),
                &GoOption::Depth(d) => go.depth = Some(d),
                &GoOption::Nodes(n) => go.nodes = Some(n),
                &GoOption::MoveTime(t) => go.movetime = Some(t),
                GoOption::Infinite => go.infinite = true,
            }
        }
        let depth_cap = go.depth;

        let globals = Arc::new(SearchGlobals::new(self.pos.side_to_move(), go));
        self.globals = Some(Arc::clone(&globals));
        self.search_handle = Some(spawn_search(
            self.pos,
            Arc::clone(&self.ttable),
            Arc::clone(&globals),
            depth_cap,
        ));
    }

    fn stop(&mut self) {
        if let Some(globals) = &self.globals {
            globals.force_stop();
        }
        if let Some(handle) = self.search_handle.take() {
            if handle.join().is_err() {
                debug_info(&SearchError::Join.to_string());
            }
        }
        self.globals = None;
    }
}

fn spawn_search(
    pos: Position,
    ttable: Arc<TTable>,
    globals: Arc<SearchGlobals>,
    depth_cap: Option<u32>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let best = iterative_deepening(&pos, &ttable, &globals, material_eval, |progress| {
            let nps = if progress.elapsed.as_millis() > 0 {
                (progress.nodes as u128 * 1000 / progress.elapsed.as_millis()) as u64
            } else {
                0
            };
            let infos = [
                EngineInfo::Depth(progress.depth),
                EngineInfo::Time(progress.elapsed),
                EngineInfo::Nodes(progress.nodes),
                EngineInfo::NodeSpeed(nps),
                EngineInfo::HashFull(ttable.fill_rate_permille()),
                EngineInfo::Score(progress.score),
                EngineInfo::Pv(&progress.pv),
            ];
            println!("{}", Message::Info(&infos));
            if let Some(max_depth) = depth_cap {
                if progress.depth as u32 >= max_depth {
                    globals.force_stop();
                }
            }
        });

        match best {
            Some(m) => println!("{}", Message::BestMove { m, ponder: None }),
            None => debug_info("search produced no move"),
        }
    })
}

/// Print a diagnostic `info string` line. Unlike UCI, this protocol has no
/// `debug on/off` toggle, so these are always sent; a controller that
/// doesn't care is free to ignore any `info` line it doesn't recognize.
fn debug_info(s: &str) {
    println!("{}", Message::Info(&[EngineInfo::String(s)]));
}

/// Run the protocol loop to completion, reading commands from stdin and
/// writing responses to stdout until `quit`/`exit` or end-of-input.
pub fn run() {
    let mut engine = Engine::new();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match parse_line(&line) {
            Ok(Command::Quit) => {
                engine.stop();
                break;
            }
            Ok(cmd) => engine.handle(cmd),
            Err(e) => debug_info(&format!("could not parse line: {e}")),
        }
    }
}
