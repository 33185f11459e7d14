//! UCI command parsing.

use std::time::Duration;

/// Commands the engine understands, parsed from one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go(GoParams),
    SetOption {
        name: String,
        value: Option<String>,
    },
    Stop,
    Quit,
    Display,
}

/// Arguments of a `go` command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub movetime: Option<Duration>,
    pub wtime: Option<Duration>,
    pub btime: Option<Duration>,
    pub winc: Option<Duration>,
    pub binc: Option<Duration>,
    pub movestogo: Option<u32>,
    pub infinite: bool,
}

fn parse_millis(parts: &[&str], i: usize) -> Option<Duration> {
    parts
        .get(i)
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Parse one line of UCI input. Unknown commands yield `None` and are
/// ignored by the loop, per the UCI convention.
#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let first = parts.first()?;

    match *first {
        "uci" => Some(UciCommand::Uci),
        "isready" => Some(UciCommand::IsReady),
        "ucinewgame" => Some(UciCommand::UciNewGame),
        "position" => parse_position(&parts),
        "go" => Some(UciCommand::Go(parse_go(&parts))),
        "setoption" => parse_setoption(&parts),
        "stop" => Some(UciCommand::Stop),
        "quit" => Some(UciCommand::Quit),
        "display" | "d" => Some(UciCommand::Display),
        _ => None,
    }
}

fn parse_position(parts: &[&str]) -> Option<UciCommand> {
    let mut i = 1;
    let fen = match parts.get(i)? {
        &"startpos" => {
            i += 1;
            None
        }
        &"fen" => {
            // A full FEN is six fields; accept at least four
            let end = parts
                .iter()
                .position(|&p| p == "moves")
                .unwrap_or(parts.len());
            if end < i + 5 {
                return None;
            }
            let fen = parts[i + 1..end].join(" ");
            i = end;
            Some(fen)
        }
        _ => return None,
    };

    let mut moves = Vec::new();
    if parts.get(i) == Some(&"moves") {
        moves.extend(parts[i + 1..].iter().map(|s| (*s).to_string()));
    }

    Some(UciCommand::Position { fen, moves })
}

fn parse_go(parts: &[&str]) -> GoParams {
    let mut params = GoParams::default();

    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                params.depth = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "movetime" => {
                params.movetime = parse_millis(parts, i + 1);
                i += 2;
            }
            "wtime" => {
                params.wtime = parse_millis(parts, i + 1);
                i += 2;
            }
            "btime" => {
                params.btime = parse_millis(parts, i + 1);
                i += 2;
            }
            "winc" => {
                params.winc = parse_millis(parts, i + 1);
                i += 2;
            }
            "binc" => {
                params.binc = parse_millis(parts, i + 1);
                i += 2;
            }
            "movestogo" => {
                params.movestogo = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "infinite" => {
                params.infinite = true;
                i += 1;
            }
            _ => i += 1,
        }
    }

    params
}

fn parse_setoption(parts: &[&str]) -> Option<UciCommand> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    Some(UciCommand::SetOption {
        name: name_parts.join(" "),
        value: if value_parts.is_empty() {
            None
        } else {
            Some(value_parts.join(" "))
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_uci_command("uci"), Some(UciCommand::Uci));
        assert_eq!(parse_uci_command("isready"), Some(UciCommand::IsReady));
        assert_eq!(parse_uci_command("ucinewgame"), Some(UciCommand::UciNewGame));
        assert_eq!(parse_uci_command("stop"), Some(UciCommand::Stop));
        assert_eq!(parse_uci_command("quit"), Some(UciCommand::Quit));
        assert_eq!(parse_uci_command("bogus command"), None);
        assert_eq!(parse_uci_command(""), None);
    }

    #[test]
    fn test_parse_position_startpos_with_moves() {
        let cmd = parse_uci_command("position startpos moves e2e4 e7e5").unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: None,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_position_fen() {
        let cmd = parse_uci_command(
            "position fen 4k3/8/8/8/3q4/8/3R4/4K3 w - - 0 1 moves d2d4",
        )
        .unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: Some("4k3/8/8/8/3q4/8/3R4/4K3 w - - 0 1".to_string()),
                moves: vec!["d2d4".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_go_clock() {
        let cmd =
            parse_uci_command("go wtime 300000 btime 300000 winc 2000 binc 2000 movestogo 40")
                .unwrap();
        let UciCommand::Go(params) = cmd else {
            panic!("expected go");
        };
        assert_eq!(params.wtime, Some(Duration::from_millis(300_000)));
        assert_eq!(params.binc, Some(Duration::from_millis(2_000)));
        assert_eq!(params.movestogo, Some(40));
        assert!(!params.infinite);
    }

    #[test]
    fn test_parse_go_depth_and_movetime() {
        let UciCommand::Go(params) = parse_uci_command("go depth 6 movetime 2000").unwrap() else {
            panic!("expected go");
        };
        assert_eq!(params.depth, Some(6));
        assert_eq!(params.movetime, Some(Duration::from_millis(2000)));
    }

    #[test]
    fn test_parse_setoption() {
        let cmd = parse_uci_command("setoption name Hash value 128").unwrap();
        assert_eq!(
            cmd,
            UciCommand::SetOption {
                name: "Hash".to_string(),
                value: Some("128".to_string()),
            }
        );

        let cmd = parse_uci_command("setoption name Clear Hash").unwrap();
        assert_eq!(
            cmd,
            UciCommand::SetOption {
                name: "Clear Hash".to_string(),
                value: None,
            }
        );
    }
}
