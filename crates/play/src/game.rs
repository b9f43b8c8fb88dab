//! Human vs engine game on the console.

use anyhow::{bail, Context, Result};
use gomoku_board::{find_winner, Board};
use gomoku_core::{Cell, GomokuError, Player, TurnOrder};
use gomoku_mcts::{Mcts, SearchConfig};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::info;

/// Parse `row,col` into an available cell of `board`.
///
/// # Errors
/// - `GomokuError::InvalidInput` if the text is not two comma-separated integers
/// - `GomokuError::OutOfRange` if the location is off the board
/// - `GomokuError::InvalidMove` if the cell is already taken
pub fn parse_move(input: &str, board: &Board) -> gomoku_core::Result<Cell> {
    let invalid = || GomokuError::InvalidInput(input.trim().to_string());

    let (row, col) = input.trim().split_once(',').ok_or_else(invalid)?;
    let row: usize = row.trim().parse().map_err(|_| invalid())?;
    let col: usize = col.trim().parse().map_err(|_| invalid())?;

    let cell = board.cell_at(row, col)?;
    if !board.is_available(cell) {
        return Err(GomokuError::InvalidMove { cell });
    }
    Ok(cell)
}

/// Read lines from `input` until one names an available cell.
///
/// Prints `invalid move` for every rejected line.
fn read_human_move<I: BufRead, O: Write>(input: &mut I, output: &mut O, board: &Board) -> Result<Cell> {
    loop {
        write!(output, "Your move (row,col): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read move")? == 0 {
            bail!("input closed before the game ended");
        }

        match parse_move(&line, board) {
            Ok(cell) => return Ok(cell),
            Err(err) => {
                info!(%err, "rejected human move");
                writeln!(output, "invalid move")?;
            }
        }
    }
}

/// Play one game between a human on `input`/`output` and the engine.
///
/// Player identities and the first mover are drawn from `rng`, which then
/// drives the engine. The board is rendered after every move. Returns the
/// winner, or `None` on a tie.
pub fn play_human<R, I, O>(config: SearchConfig, mut rng: R, mut input: I, mut output: O) -> Result<Option<Player>>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut board = Board::new(config.width, config.height, config.n_in_row)?;
    let n_in_row = config.n_in_row;

    let human = if rng.gen_bool(0.5) { Player::X } else { Player::O };
    let first = if rng.gen_bool(0.5) { human } else { human.opposite() };
    let mut turn = TurnOrder::starting_with(first);
    let mut engine = Mcts::new(config, rng)?;

    writeln!(output, "You play {}, the engine plays {}", human, human.opposite())?;
    writeln!(output, "{} moves first", first)?;
    write!(output, "{}", board)?;

    loop {
        let player = turn.peek();
        let cell = if player == human {
            read_human_move(&mut input, &mut output, &board)?
        } else {
            let result = engine.search(&board, &turn)?;
            writeln!(output, "Engine ({}) plays {}", player, board.location_of(result.cell)?)?;
            writeln!(
                output,
                "total simulations: {}, maximum depth searched: {}, win ratio: {:.3}",
                result.simulations, result.max_depth, result.win_ratio
            )?;
            result.cell
        };

        board.apply(player, cell)?;
        turn.next();
        write!(output, "{}", board)?;

        if let Some(winner) = find_winner(&board, n_in_row) {
            writeln!(output, "Game end. Winner is {}", winner)?;
            return Ok(Some(winner));
        }
        if board.is_full() {
            writeln!(output, "Game end. Tie")?;
            return Ok(None);
        }
    }
}
