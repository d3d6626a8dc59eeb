//! UCI command parsing.

use std::time::Duration;

use gambit_engine::SearchLimits;
use gambit_engine::search::negamax::MAX_PLY;

use crate::error::UciError;

/// Starting point of a `position` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSetup {
    StartPos,
    /// The four position-bearing FEN fields; move counters are dropped.
    Fen {
        placement: String,
        side: String,
        castling: String,
        en_passant: String,
    },
}

/// A parsed `position` command: a setup plus the moves played from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCommand {
    pub setup: PositionSetup,
    pub moves: Vec<String>,
}

/// Options accepted by `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOption {
    /// Transposition table size in megabytes.
    Hash(usize),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- set up a position with optional moves applied.
    Position(PositionCommand),
    /// `go` -- start searching with given limits.
    Go(SearchLimits),
    /// `go perft <depth>` -- count leaf nodes per root move.
    Perft(u32),
    /// `setoption name <id> value <x>`.
    SetOption(UciOption),
    /// `d` -- print the current position.
    Display,
    /// `stop` -- halt the current search.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (silently ignored per UCI convention).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&first, rest)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match first {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "d" => Ok(Command::Display),
        "position" => parse_position(rest),
        "go" => parse_go(rest),
        "setoption" => parse_setoption(rest),
        _ => Ok(Command::Unknown(first.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen> [moves e2e4 d7d5 ...]`, where the FEN may omit
///   its two move counters
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let moves_at = tokens.iter().position(|&t| t == "moves").unwrap_or(tokens.len());
    let (head, tail) = tokens.split_at(moves_at);

    let setup = match head {
        ["startpos"] => PositionSetup::StartPos,
        ["fen", placement, side, castling, en_passant, counters @ ..] if counters.len() <= 2 => {
            PositionSetup::Fen {
                placement: placement.to_string(),
                side: side.to_string(),
                castling: castling.to_string(),
                en_passant: en_passant.to_string(),
            }
        }
        ["fen", fields @ ..] => return Err(UciError::FenFieldCount { fen: fields.join(" ") }),
        _ => return Err(UciError::MalformedPosition),
    };

    let moves = tail.iter().skip(1).map(|m| m.to_string()).collect();
    Ok(Command::Position(PositionCommand { setup, moves }))
}

/// Parse the `go` command arguments.
///
/// Supports: wtime, btime, winc, binc, movestogo, depth, movetime,
/// infinite, perft. Unknown tokens are silently skipped.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut limits = SearchLimits::default();

    let mut i = 0;
    while i < tokens.len() {
        let value = tokens.get(i + 1);
        match tokens[i] {
            "perft" => return Ok(Command::Perft(parse_int(value, "perft")?)),
            "wtime" => limits.wtime = Some(parse_millis(value, "wtime")?),
            "btime" => limits.btime = Some(parse_millis(value, "btime")?),
            "winc" => limits.winc = Some(parse_millis(value, "winc")?),
            "binc" => limits.binc = Some(parse_millis(value, "binc")?),
            "movestogo" => limits.movestogo = Some(parse_int(value, "movestogo")?),
            "depth" => limits.depth = Some(parse_depth(value)?),
            "movetime" => limits.movetime = Some(parse_millis(value, "movetime")?),
            "infinite" => {
                limits.infinite = true;
                i += 1;
                continue;
            }
            // Unknown token -- skip per UCI convention
            _ => {
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    Ok(Command::Go(limits))
}

/// Parse `setoption name <id> value <x>`. Option names are case-insensitive.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    let value_at = tokens.iter().position(|&t| t == "value").ok_or(UciError::MalformedOption)?;
    let name = match &tokens[..value_at] {
        ["name", name @ ..] if !name.is_empty() => name.join(" "),
        _ => return Err(UciError::MalformedOption),
    };
    let value = tokens[value_at + 1..].join(" ");

    if name.eq_ignore_ascii_case("hash") {
        let mb = value
            .parse::<usize>()
            .ok()
            .filter(|&mb| mb >= 1)
            .ok_or_else(|| UciError::InvalidOptionValue { name: name.clone(), value: value.clone() })?;
        return Ok(Command::SetOption(UciOption::Hash(mb)));
    }
    Err(UciError::UnknownOption { name })
}

/// Parse a millisecond value from a token. Negative clocks count as zero.
fn parse_millis(token: Option<&&str>, param: &str) -> Result<Duration, UciError> {
    let ms: i64 = parse_int(token, param)?;
    Ok(Duration::from_millis(ms.max(0) as u64))
}

/// Parse a search depth, clamped to what the search can reach.
fn parse_depth(token: Option<&&str>) -> Result<u8, UciError> {
    let depth: i64 = parse_int(token, "depth")?;
    Ok(depth.clamp(1, MAX_PLY as i64 - 1) as u8)
}

/// Parse an integer value from a token.
fn parse_int<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Result<T, UciError> {
    let value = token.ok_or_else(|| UciError::MissingGoValue { param: param.to_string() })?;
    value
        .parse()
        .map_err(|_| UciError::InvalidGoValue { param: param.to_string(), value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn go(line: &str) -> SearchLimits {
        match parse_command(line).unwrap() {
            Command::Go(limits) => limits,
            other => panic!("expected Go, got {other:?}"),
        }
    }

    fn position(line: &str) -> PositionCommand {
        match parse_command(line).unwrap() {
            Command::Position(cmd) => cmd,
            other => panic!("expected Position, got {other:?}"),
        }
    }

    #[test]
    fn parse_simple_commands() {
        assert!(matches!(parse_command("uci").unwrap(), Command::Uci));
        assert!(matches!(parse_command("isready").unwrap(), Command::IsReady));
        assert!(matches!(parse_command("ucinewgame").unwrap(), Command::UciNewGame));
        assert!(matches!(parse_command("stop").unwrap(), Command::Stop));
        assert!(matches!(parse_command("quit").unwrap(), Command::Quit));
        assert!(matches!(parse_command("d").unwrap(), Command::Display));
    }

    #[test]
    fn parse_position_startpos() {
        let cmd = position("position startpos");
        assert_eq!(cmd.setup, PositionSetup::StartPos);
        assert!(cmd.moves.is_empty());
    }

    #[test]
    fn parse_position_startpos_with_moves() {
        let cmd = position("position startpos moves e2e4 e7e5");
        assert_eq!(cmd.moves, vec!["e2e4", "e7e5"]);
    }

    #[test]
    fn parse_position_fen() {
        let cmd = position("position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1 moves c7c5");
        assert_eq!(
            cmd.setup,
            PositionSetup::Fen {
                placement: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR".to_string(),
                side: "b".to_string(),
                castling: "KQkq".to_string(),
                en_passant: "e3".to_string(),
            }
        );
        assert_eq!(cmd.moves, vec!["c7c5"]);
    }

    #[test]
    fn parse_position_fen_without_counters() {
        let cmd = position("position fen 4k3/8/8/8/8/8/8/4K3 w - -");
        assert!(matches!(cmd.setup, PositionSetup::Fen { .. }));
    }

    #[test]
    fn parse_position_errors() {
        assert!(matches!(parse_command("position"), Err(UciError::MalformedPosition)));
        assert!(matches!(parse_command("position moves e2e4"), Err(UciError::MalformedPosition)));
        assert!(matches!(parse_command("position fen invalid"), Err(UciError::FenFieldCount { .. })));
        assert!(matches!(
            parse_command("position fen 4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra"),
            Err(UciError::FenFieldCount { .. })
        ));
    }

    #[test]
    fn parse_go_depth() {
        assert_eq!(go("go depth 6").depth, Some(6));
    }

    #[test]
    fn parse_go_bare_defaults() {
        assert_eq!(go("go"), SearchLimits::default());
    }

    #[test]
    fn parse_go_clock() {
        let limits = go("go wtime 300000 btime 290000 winc 2000 binc 1000 movestogo 20");
        assert_eq!(limits.wtime, Some(Duration::from_millis(300_000)));
        assert_eq!(limits.btime, Some(Duration::from_millis(290_000)));
        assert_eq!(limits.winc, Some(Duration::from_millis(2_000)));
        assert_eq!(limits.binc, Some(Duration::from_millis(1_000)));
        assert_eq!(limits.movestogo, Some(20));
    }

    #[test]
    fn parse_go_movetime_and_infinite() {
        assert_eq!(go("go movetime 5000").movetime, Some(Duration::from_millis(5000)));
        assert!(go("go infinite").infinite);
    }

    #[test]
    fn negative_clock_is_zero() {
        assert_eq!(go("go wtime -150").wtime, Some(Duration::ZERO));
    }

    #[test]
    fn unknown_go_tokens_are_skipped() {
        let limits = go("go ponder depth 3");
        assert_eq!(limits.depth, Some(3));
    }

    #[test]
    fn parse_go_perft() {
        assert!(matches!(parse_command("go perft 4").unwrap(), Command::Perft(4)));
        assert!(matches!(parse_command("go perft"), Err(UciError::MissingGoValue { .. })));
    }

    #[test]
    fn parse_go_bad_values() {
        assert!(matches!(parse_command("go wtime"), Err(UciError::MissingGoValue { .. })));
        assert!(matches!(parse_command("go depth abc"), Err(UciError::InvalidGoValue { .. })));
    }

    #[test]
    fn out_of_range_depth_is_clamped() {
        assert_eq!(go("go depth 300").depth, Some(63));
        assert_eq!(go("go depth 99999999999").depth, Some(63));
        assert_eq!(go("go depth 0").depth, Some(1));
        assert_eq!(go("go depth -4").depth, Some(1));
    }

    #[test]
    fn parse_setoption_hash() {
        assert!(matches!(
            parse_command("setoption name Hash value 64").unwrap(),
            Command::SetOption(UciOption::Hash(64))
        ));
        assert!(matches!(
            parse_command("setoption name hash value 0"),
            Err(UciError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            parse_command("setoption name Threads value 4"),
            Err(UciError::UnknownOption { .. })
        ));
        assert!(matches!(parse_command("setoption name Hash"), Err(UciError::MalformedOption)));
    }

    #[test]
    fn parse_unknown_and_empty() {
        assert!(matches!(parse_command("foobar").unwrap(), Command::Unknown(_)));
        assert!(matches!(parse_command("").unwrap(), Command::Unknown(_)));
    }
}
