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

use ataxx_base::Move;

use super::{Command, GoOption};

/// The result of parsing a single line of input. Per the contract of this
/// protocol, a parse error is purely diagnostic: the caller is expected to
/// log it (or not) and move on to the next line, never to crash or retry.
pub type ParseResult = Result<Command, String>;

#[must_use = "a parse error should be reported, not silently dropped"]
/// Parse a single line of protocol input.
pub fn parse_line(line: &str) -> ParseResult {
    let mut tokens = line.split_ascii_whitespace();
    let first_tok = tokens.next().ok_or("line contains no tokens")?;
    match first_tok {
        "uai" => Ok(Command::Uai),
        "isready" => Ok(Command::IsReady),
        "setoption" => parse_set_option(&mut tokens),
        "uainewgame" => Ok(Command::NewGame),
        "position" => parse_position(&mut tokens),
        "go" => parse_go(&mut tokens),
        "stop" => Ok(Command::Stop),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(format!("unrecognized command `{first_tok}`")),
    }
}

/// Parse a `setoption` line. Assumes `"setoption"` has already been
/// consumed, so the next token is expected to be `"name"`.
fn parse_set_option(tokens: &mut dyn Iterator<Item = &str>) -> ParseResult {
    let name_tok = tokens
        .next()
        .ok_or("reached end of line while searching for `name` field in `setoption`")?;
    if name_tok != "name" {
        return Err(format!(
            "expected token `name` for `setoption`, got `{name_tok}`"
        ));
    }

    let mut name = String::new();
    loop {
        let key_tok = match tokens.next() {
            Some(tok) => tok,
            None => return Ok(Command::SetOption { name, value: None }),
        };
        if key_tok == "value" {
            break;
        }
        if !name.is_empty() {
            name += " ";
        }
        name += key_tok;
    }

    let mut value = String::new();
    for tok in tokens {
        if !value.is_empty() {
            value += " ";
        }
        value += tok;
    }
    Ok(Command::SetOption {
        name,
        value: Some(value),
    })
}

/// Parse a `position` line. Assumes `"position"` has already been
/// consumed, so the next token is either `"fen"` or `"startpos"`.
fn parse_position(tokens: &mut dyn Iterator<Item = &str>) -> ParseResult {
    let fen = match tokens
        .next()
        .ok_or_else(|| "reached end of line while parsing position".to_string())?
    {
        "fen" => {
            let mut fen = String::new();
            loop {
                let Some(next_tok) = tokens.next() else {
                    break;
                };
                if next_tok == "moves" {
                    break;
                }
                if !fen.is_empty() {
                    fen += " ";
                }
                fen += next_tok;
            }
            Some(fen)
        }
        "startpos" => {
            // Consume the separating "moves" token, if present.
            let mut peeked = tokens.peekable();
            if peeked.peek() == Some(&"moves") {
                peeked.next();
            }
            return parse_moves(peeked).map(|moves| Command::Position { fen: None, moves });
        }
        other => return Err(format!("illegal starting position token `{other}`")),
    };

    parse_moves(tokens).map(|moves| Command::Position { fen, moves })
}

fn parse_moves<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Vec<Move>, String> {
    tokens
        .map(|tok| Move::from_text(tok).ok_or_else(|| format!("could not parse move `{tok}`")))
        .collect()
}

/// Parse a `go` line. Assumes `"go"` has already been consumed.
fn parse_go(tokens: &mut dyn Iterator<Item = &str>) -> ParseResult {
    let mut opts = Vec::new();
    let mut peeked = tokens.peekable();
    while let Some(opt_tok) = peeked.next() {
        let opt = match opt_tok {
            "searchmoves" => {
                let mut moves = Vec::new();
                while let Some(tok) = peeked.peek() {
                    match Move::from_text(tok) {
                        Some(m) => {
                            moves.push(m);
                            peeked.next();
                        }
                        None => break,
                    }
                }
                Some(GoOption::SearchMoves(moves))
            }
            "wtime" => Some(GoOption::WTime(parse_int(peeked.next())?)),
            "btime" => Some(GoOption::BTime(parse_int(peeked.next())?)),
            "winc" => Some(GoOption::WInc(parse_int(peeked.next())?)),
            "binc" => Some(GoOption::BInc(parse_int(peeked.next())?)),
            "movestogo" => Some(GoOption::MovesToGo(parse_int(peeked.next())? as u32)),
            "depth" => Some(GoOption::Depth(parse_int(peeked.next())? as u32)),
            "nodes" => Some(GoOption::Nodes(parse_int(peeked.next())?)),
            "movetime" => Some(GoOption::MoveTime(parse_int(peeked.next())?)),
            "infinite" => Some(GoOption::Infinite),
            // Pondering is a non-goal; the token is accepted and ignored
            // rather than failing the whole `go`.
            "ponder" => None,
            _ => return Err(format!("unrecognized option `{opt_tok}` for `go`")),
        };
        if let Some(opt) = opt {
            opts.push(opt);
        }
    }
    Ok(Command::Go(opts))
}

fn parse_int(x: Option<&str>) -> Result<u64, String> {
    match x {
        None => Err("reached end of line while parsing an integer".into()),
        Some(s) => s.parse().map_err(|e| format!("could not parse int: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uai_isready_stop_quit() {
        assert_eq!(parse_line("uai"), Ok(Command::Uai));
        assert_eq!(parse_line("isready"), Ok(Command::IsReady));
        assert_eq!(parse_line("stop"), Ok(Command::Stop));
        assert_eq!(parse_line("quit"), Ok(Command::Quit));
    }

    #[test]
    fn parses_startpos_with_no_moves() {
        assert_eq!(
            parse_line("position startpos"),
            Ok(Command::Position {
                fen: None,
                moves: Vec::new()
            })
        );
    }

    #[test]
    fn parses_startpos_with_moves() {
        assert_eq!(
            parse_line("position startpos moves b1 a1c3"),
            Ok(Command::Position {
                fen: None,
                moves: vec![
                    Move::from_text("b1").unwrap(),
                    Move::from_text("a1c3").unwrap(),
                ]
            })
        );
    }

    #[test]
    fn parses_a_fen_position() {
        let parsed = parse_line("position fen x5o/7/7/7/7/7/o5x x 0 moves b1");
        assert_eq!(
            parsed,
            Ok(Command::Position {
                fen: Some("x5o/7/7/7/7/7/o5x x 0".to_string()),
                moves: vec![Move::from_text("b1").unwrap()],
            })
        );
    }

    #[test]
    fn parses_setoption_with_a_value() {
        assert_eq!(
            parse_line("setoption name Hash value 64"),
            Ok(Command::SetOption {
                name: "Hash".to_string(),
                value: Some("64".to_string()),
            })
        );
    }

    #[test]
    fn parses_go_with_clock_fields() {
        assert_eq!(
            parse_line("go wtime 1000 btime 2000 winc 10 binc 20 movestogo 5"),
            Ok(Command::Go(vec![
                GoOption::WTime(1000),
                GoOption::BTime(2000),
                GoOption::WInc(10),
                GoOption::BInc(20),
                GoOption::MovesToGo(5),
            ]))
        );
    }

    #[test]
    fn parses_go_infinite() {
        assert_eq!(parse_line("go infinite"), Ok(Command::Go(vec![GoOption::Infinite])));
    }

    #[test]
    fn go_ponder_is_ignored_rather_than_rejected() {
        assert_eq!(
            parse_line("go ponder wtime 1000"),
            Ok(Command::Go(vec![GoOption::WTime(1000)]))
        );
    }

    #[test]
    fn rejects_unrecognized_commands() {
        assert!(parse_line("frobnicate").is_err());
    }

    #[test]
    fn rejects_malformed_moves() {
        assert!(parse_line("position startpos moves zz99").is_err());
    }
}
