use rand::random_range;

use crate::{
    board_display::BoardDisplay,
    fen::{Fen, ParseFenError},
    game::GameState,
    lan::{Lan, ParseLanError},
    player::Player,
    square::Square,
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
        .map(<str>::trim_start)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Restart,
    Undo,
    Random,
    Quit,
    Import(Fen),
    ExportFen,
    Square(Square),
    Move(Lan),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Undo => write!(f, "undo")?,
            Input::Random => write!(f, "random")?,
            Input::Quit => write!(f, "quit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::Square(square) => write!(f, "{square}")?,
            Input::Move(movement) => write!(f, "{movement}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "undo" => Ok(Input::Undo),
            "random" => Ok(Input::Random),
            "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Ok(square) = s.parse() {
                    Ok(Input::Square(square))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}
fn status(game: &GameState) -> String {
    let outcome = game.checkmate_stalemate_checker();
    if outcome.is_over() {
        format!("game over: {outcome}\n")
    } else if game.is_in_check() {
        format!("{} plays, in check\n", game.whose_turn())
    } else {
        format!("{} plays\n", game.whose_turn())
    }
}
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn repl() -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut game = GameState::new();
    let mut info = String::new();
    let mut highlighted = Vec::new();
    let mut update = true;
    let mut view = Player::White;
    let mut first_time = true;
    loop {
        if update {
            info = status(&game);
        }
        if first_time {
            info.push_str("type `help` for instructions\n");
            first_time = false;
        }
        update = false;
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: game.board(),
                view,
                highlighted: &highlighted,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let input = match text?.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            let over = game.checkmate_stalemate_checker().is_over();
            match input {
                Input::Help => {
                    writeln!(output, "flip           - flip the board")?;
                    writeln!(output, "restart        - reset to starting position")?;
                    writeln!(output, "undo           - take back the last move")?;
                    writeln!(output, "quit           - quit the game")?;
                    writeln!(output, "import <fen>   - import a position")?;
                    writeln!(output, "fen            - export the position as fen")?;
                    writeln!(output, "e2             - view valid moves")?;
                    writeln!(output, "e2e4           - play the move")?;
                    writeln!(output, "e7e8n          - move and promote")?;
                    writeln!(output, "e1g1           - perform castling")?;
                    writeln!(output, "random         - play a random move")?;
                }
                Input::Flip => {
                    view = !view;
                }
                Input::Restart => {
                    game.reset();
                    update = true;
                    highlighted.clear();
                }
                Input::Undo => match game.try_undo() {
                    Ok(record) => {
                        writeln!(output, "took back {record}")?;
                        update = true;
                        highlighted.clear();
                    }
                    Err(err) => {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                },
                Input::Quit => return Ok(()),
                Input::Import(fen) => {
                    game = GameState::from_board(fen.0);
                    update = true;
                    highlighted.clear();
                }
                Input::ExportFen => {
                    writeln!(output, "{}", Fen(*game.board()))?;
                }
                Input::Square(square) => {
                    if let Some(piece) = game.board()[square] {
                        if !piece.is_player(game.whose_turn()) {
                            writeln!(error, "Error: It is {}'s turn", game.whose_turn())?;
                            continue;
                        }
                        highlighted = game.get_valid_moves(square);
                        if highlighted.is_empty() {
                            writeln!(output, "{piece} has no valid moves")?;
                        }
                    } else {
                        writeln!(error, "Error: No piece found on {square}")?;
                        continue;
                    }
                }
                Input::Move(lan) => {
                    if over {
                        writeln!(error, "Error: the game is over, `undo` or `restart` to continue")?;
                        continue;
                    }
                    if let Err(err) = game.try_move(lan.origin, lan.destination, lan.promotion) {
                        writeln!(error, "Error: {lan} is an invalid move: {err}")?;
                        continue;
                    }
                    highlighted.clear();
                    highlighted.push(lan.origin);
                    highlighted.push(lan.destination);
                    update = true;
                }
                Input::Random => {
                    if over {
                        writeln!(error, "Error: the game is over, `undo` or `restart` to continue")?;
                        continue;
                    }
                    let moves = game.all_valid_moves();
                    let (origin, destination) = moves[random_range(0..moves.len())];
                    let record = game.try_move(origin, destination, None);
                    debug_assert!(record.is_ok());
                    highlighted.clear();
                    highlighted.push(origin);
                    highlighted.push(destination);
                    update = true;
                }
            }
            break;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseInputError {
    Fen(ParseFenError),
    Move(ParseLanError),
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseLanError> for ParseInputError {
    fn from(value: ParseLanError) -> Self {
        ParseInputError::Move(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Move(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Move(err) => Some(err),
        }
    }
}
