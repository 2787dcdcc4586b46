// Simple command-line application to play chess

use fianchetto::{board::PrettyStyle, Board, Color, GameStatus, Move, MoveStatus};
use std::io::{self, BufRead, Write};

fn main() {
    let mut stdin = io::stdin().lock();

    let mut board = Board::initial();

    loop {
        let player = board.current_player();
        match player.status() {
            GameStatus::Checkmate => {
                println!("{}", board.pretty(PrettyStyle::Ascii));
                let winner = match player.color() {
                    Color::White => "Black",
                    Color::Black => "White",
                };
                println!("Checkmate, {} wins", winner);
                break;
            }
            GameStatus::Stalemate => {
                println!("{}", board.pretty(PrettyStyle::Ascii));
                println!("Stalemate, the game is drawn");
                break;
            }
            GameStatus::Check => println!("Check!"),
            GameStatus::Normal => {}
        }

        println!("{}", board.pretty(PrettyStyle::Ascii));
        let side = match board.side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        print!("{} move ({}): ", side, board.raw().move_number);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        let mv = match Move::from_uci_legal(s, &board) {
            Ok(mv) => mv,
            Err(e) => {
                println!("Bad move: {}", e);
                println!();
                continue;
            }
        };

        // The move is definitely legal after `Move::from_uci_legal()`, so the
        // transition must succeed.
        let transition = player.make_move(mv);
        assert_eq!(transition.status(), MoveStatus::Done);
        board = transition.into_board();

        println!();
    }
}
