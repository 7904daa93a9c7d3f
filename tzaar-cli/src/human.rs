//! Console player - reads moves typed by a person

use std::io::{BufRead, Write};

use tzaar_core::{legal_moves, validate, Board, Color, Move, Player, PlayerError};

/// Prompts on `output` and reads one move per line from `input`.
///
/// Unparsable or illegal input is reported and asked again, so only legal
/// moves ever reach the arbiter. `quit` or end of input gives up the game.
pub struct HumanPlayer<R: BufRead, W: Write> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: &str, input: R, output: W) -> Self {
        Self {
            name: name.to_string(),
            input,
            output,
        }
    }

    fn prompt(&mut self, board: &Board, color: Color, moves: &[Move]) -> std::io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", board)?;
        let listed: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        writeln!(self.output, "{:?} to move. Legal: {}", color, listed.join(" "))?;
        write!(self.output, "{}> ", self.name)?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> Result<Move, PlayerError> {
        let moves = legal_moves(board, color);
        self.prompt(board, color, &moves)?;

        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PlayerError::InputClosed);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("quit") {
                return Err(PlayerError::InputClosed);
            }
            if line.is_empty() {
                write!(self.output, "{}> ", self.name)?;
                self.output.flush()?;
                continue;
            }

            match line.parse::<Move>() {
                Ok(mv) => match validate(board, color, mv) {
                    Ok(()) => return Ok(mv),
                    Err(reason) => writeln!(self.output, "Illegal move: {}", reason)?,
                },
                Err(err) => writeln!(self.output, "{}", err)?,
            }
            write!(self.output, "{}> ", self.name)?;
            self.output.flush()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn human(script: &str) -> HumanPlayer<Cursor<Vec<u8>>, Vec<u8>> {
        HumanPlayer::new("tester", Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn first_stack(board: &Board, color: Color) -> Move {
        legal_moves(board, color)
            .into_iter()
            .find(|m| m.is_stack())
            .unwrap()
    }

    #[test]
    fn test_reads_legal_move() {
        let board = Board::standard();
        let expected = first_stack(&board, Color::White);
        let mut player = human(&format!("{}\n", expected));

        assert_eq!(player.choose_move(&board, Color::White).unwrap(), expected);
        let shown = String::from_utf8(player.output).unwrap();
        assert!(shown.contains("White to move"));
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let board = Board::standard();
        let expected = first_stack(&board, Color::White);
        let script = format!("nonsense\n\npass\n{}\n", expected);
        let mut player = human(&script);

        assert_eq!(player.choose_move(&board, Color::White).unwrap(), expected);
        let shown = String::from_utf8(player.output).unwrap();
        assert!(shown.contains("Illegal move"));
    }

    #[test]
    fn test_quit_and_eof_close_input() {
        let board = Board::standard();
        assert!(matches!(
            human("quit\n").choose_move(&board, Color::White),
            Err(PlayerError::InputClosed)
        ));
        assert!(matches!(
            human("").choose_move(&board, Color::Black),
            Err(PlayerError::InputClosed)
        ));
    }
}
