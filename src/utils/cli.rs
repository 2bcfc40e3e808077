use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GUICommand {
    UCI,
    IsReady,
    NewGame,                           // ucinewgame
    FenPosition(String, Vec<String>),  // position fen <fen> [moves ...]
    StartPosition(Vec<String>),        // position startpos [moves ...]
    SetOption(String, String),         // setoption name <name> value <value>
    Perft(String),                     // go perft <depth>
    Search(Vec<String>),               // go (with params)
    Display,                           // d
    Moves(Option<String>),             // moves [square]
    Undo,                              // undo
    Eval,                              // eval
    Quit,                              // quit the program

    Invalid(String), // placeholder for invalid commands so we can pattern match
}

impl GUICommand {
    /// Reads one command from stdin; end of input reads as `Quit`.
    pub fn receive() -> GUICommand {
        let mut input = String::new();

        match io::stdin().read_line(&mut input) {
            Ok(0) => GUICommand::Quit,
            Ok(_) => GUICommand::parse(&input),
            Err(error) => {
                log::warn!("Failed to read a command: {}", error);
                GUICommand::Quit
            }
        }
    }

    pub fn parse(input: &str) -> GUICommand {
        let parts = input.split_whitespace().collect::<Vec<_>>();

        match parts.as_slice() {
            ["uci"] => GUICommand::UCI,
            ["isready"] => GUICommand::IsReady,
            ["ucinewgame"] => GUICommand::NewGame,
            ["position", "startpos"] => GUICommand::StartPosition(vec![]),
            ["position", "startpos", "moves", moves @ ..] => {
                GUICommand::StartPosition(moves.iter().map(|m| m.to_string()).collect())
            }
            ["position", "fen", rest @ ..] if !rest.is_empty() => {
                match rest.iter().position(|&part| part == "moves") {
                    Some(index) => GUICommand::FenPosition(
                        rest[..index].join(" "),
                        rest[index + 1..].iter().map(|m| m.to_string()).collect(),
                    ),
                    None => GUICommand::FenPosition(rest.join(" "), vec![]),
                }
            }
            ["setoption", "name", name_and_rest @ ..] if !name_and_rest.is_empty() => {
                Self::parse_setoption(name_and_rest)
            }
            ["go", "perft", depth] => GUICommand::Perft(depth.to_string()),
            ["go", params @ ..] => {
                GUICommand::Search(params.iter().map(|p| p.to_string()).collect())
            }
            ["d"] => GUICommand::Display,
            ["moves"] => GUICommand::Moves(None),
            ["moves", square] => GUICommand::Moves(Some(square.to_string())),
            ["undo"] => GUICommand::Undo,
            ["eval"] => GUICommand::Eval,
            ["quit"] => GUICommand::Quit,
            _ => GUICommand::Invalid(input.trim().to_string()),
        }
    }

    fn parse_setoption(parts: &[&str]) -> GUICommand {
        // Find the "value" keyword to split name and value
        match parts.iter().position(|&part| part == "value") {
            Some(value_pos) => {
                let name = parts[..value_pos].join(" ");
                let value = parts[value_pos + 1..].join(" ");

                if !name.is_empty() && !value.is_empty() {
                    GUICommand::SetOption(name, value)
                } else {
                    GUICommand::Invalid(format!("setoption name {} value {}", name, value))
                }
            }
            None => GUICommand::Invalid(format!("setoption name {}", parts.join(" "))),
        }
    }
}
