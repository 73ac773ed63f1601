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

use std::fmt;
use std::time::Duration;

use ataxx_base::Move;

use crate::search::mate_in;

#[derive(Clone, PartialEq)]
/// Everything the engine can print back to stdout.
pub enum Message<'a> {
    /// Identify the engine. Sent once, right after [`super::Command::Uai`].
    Id {
        name: Option<&'a str>,
        author: Option<&'a str>,
    },
    /// Marks the end of the startup handshake.
    UaiOk,
    /// Reply to [`super::Command::IsReady`].
    ReadyOk,
    /// Advertise one tunable option.
    Option { name: &'a str, opt: OptionType<'a> },
    /// The result of a completed (or stopped) search.
    BestMove { m: Move, ponder: Option<Move> },
    /// Progress of an in-flight search.
    Info(&'a [EngineInfo<'a>]),
}

#[derive(Clone, Debug, PartialEq)]
/// One field of an `info` line.
pub enum EngineInfo<'a> {
    Depth(i32),
    SelDepth(i32),
    Time(Duration),
    Nodes(u64),
    Pv(&'a [Move]),
    /// The centipawn score, from the perspective of the side to move.
    Score(i32),
    HashFull(u16),
    NodeSpeed(u64),
    String(&'a str),
}

#[derive(Clone, Debug, PartialEq)]
/// The shape of a tunable option, as advertised to the controller.
pub enum OptionType<'a> {
    Spin { default: i64, min: i64, max: i64 },
    String(Option<&'a str>),
    Check(Option<bool>),
    Button,
}

impl<'a> fmt::Display for Message<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Id { name, author } => {
                write!(f, "id")?;
                if let Some(n) = name {
                    write!(f, " name {n}")?;
                }
                if let Some(a) = author {
                    if name.is_some() {
                        write!(f, "\nid")?;
                    }
                    write!(f, " author {a}")?;
                }
                Ok(())
            }
            Message::UaiOk => write!(f, "uaiok"),
            Message::ReadyOk => write!(f, "readyok"),
            Message::Option { name, opt } => write_option(f, name, opt),
            Message::BestMove { m, ponder } => {
                write!(f, "bestmove {m}")?;
                if let Some(p) = ponder {
                    write!(f, " ponder {p}")?;
                }
                Ok(())
            }
            Message::Info(infos) => write_info(f, infos),
        }
    }
}

fn write_option(f: &mut fmt::Formatter, name: &str, opt: &OptionType) -> fmt::Result {
    write!(f, "option name {name} ")?;
    match opt {
        OptionType::Spin { default, min, max } => {
            write!(f, "type spin default {default} min {min} max {max}")
        }
        OptionType::String(s) => {
            write!(f, "type string")?;
            if let Some(st) = s {
                write!(f, " default {st}")?;
            }
            Ok(())
        }
        OptionType::Check(default) => {
            write!(f, "type check")?;
            if let Some(d) = default {
                write!(f, " default {d}")?;
            }
            Ok(())
        }
        OptionType::Button => write!(f, "type button"),
    }
}

fn write_info(f: &mut fmt::Formatter, infos: &[EngineInfo]) -> fmt::Result {
    write!(f, "info")?;
    for info in infos {
        match info {
            EngineInfo::Depth(d) => write!(f, " depth {d}")?,
            EngineInfo::SelDepth(sd) => write!(f, " seldepth {sd}")?,
            EngineInfo::Time(t) => write!(f, " time {}", t.as_millis())?,
            EngineInfo::Nodes(n) => write!(f, " nodes {n}")?,
            EngineInfo::Pv(pv) => {
                write!(f, " pv")?;
                for m in pv.iter() {
                    write!(f, " {m}")?;
                }
            }
            EngineInfo::Score(score) => {
                write!(f, " score ")?;
                match mate_in(*score) {
                    Some(plies) => write!(f, "mate {plies}")?,
                    None => write!(f, "cp {score}")?,
                }
            }
            EngineInfo::HashFull(permille) => write!(f, " hashfull {permille}")?,
            EngineInfo::NodeSpeed(nps) => write!(f, " nps {nps}")?,
            EngineInfo::String(s) => write!(f, " string {s}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ataxx_base::Square;

    #[test]
    fn formats_id() {
        let msg = Message::Id {
            name: Some("Ataxx Engine"),
            author: Some("The Authors"),
        };
        assert_eq!(msg.to_string(), "id name Ataxx Engine\nid author The Authors");
    }

    #[test]
    fn formats_uaiok_and_readyok() {
        assert_eq!(Message::UaiOk.to_string(), "uaiok");
        assert_eq!(Message::ReadyOk.to_string(), "readyok");
    }

    #[test]
    fn formats_bestmove_with_ponder() {
        let m = Move::clone_move(Square::from_algebraic("c3").unwrap());
        let ponder = Move::clone_move(Square::from_algebraic("d3").unwrap());
        let msg = Message::BestMove {
            m,
            ponder: Some(ponder),
        };
        assert_eq!(msg.to_string(), "bestmove c3 ponder d3");
    }

    #[test]
    fn formats_an_info_line_with_a_pv() {
        let pv = [
            Move::clone_move(Square::from_algebraic("b1").unwrap()),
            Move::clone_move(Square::from_algebraic("c2").unwrap()),
        ];
        let infos = [
            EngineInfo::Depth(4),
            EngineInfo::Nodes(1234),
            EngineInfo::Score(57),
            EngineInfo::Pv(&pv),
        ];
        assert_eq!(
            Message::Info(&infos).to_string(),
            "info depth 4 nodes 1234 score cp 57 pv b1 c2"
        );
    }

    #[test]
    fn formats_a_mate_score() {
        let infos = [EngineInfo::Score(crate::search::MATE_SCORE - 1)];
        assert_eq!(Message::Info(&infos).to_string(), "info score mate 1");
    }

    #[test]
    fn formats_option_spin() {
        let msg = Message::Option {
            name: "Hash",
            opt: OptionType::Spin {
                default: 16,
                min: 1,
                max: 1_048_576,
            },
        };
        assert_eq!(
            msg.to_string(),
            "option name Hash type spin default 16 min 1 max 1048576"
        );
    }
}
