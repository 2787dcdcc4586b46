//! # Fianchetto
//!
//! A chess rules library built around immutable positions.
//!
//! The library validates positions, generates moves and detects the game state. Making
//! a move doesn't mutate the board and yields a new one instead, so positions can be
//! freely stored, shared and compared.
//!
//! ## Features
//!
//! - board representation with full position validation
//! - pseudo-legal and legal move generation
//! - game state detection (check, checkmate, stalemate) via players
//! - FEN parsing and formatting, UCI-style move notation
//!
//! ## Example
//!
//! ```
//! use fianchetto::{Board, GameStatus, Move, MoveStatus};
//! use std::str::FromStr;
//!
//! // Start from the initial position and make a move
//! let board = Board::initial();
//! let mv = Move::from_uci_legal("e2e4", &board).unwrap();
//! let transition = board.current_player().make_move(mv);
//! assert_eq!(transition.status(), MoveStatus::Done);
//! assert_eq!(
//!     transition.board().as_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
//! );
//!
//! // Detect the game state
//! let board =
//!     Board::from_str("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
//!         .unwrap();
//! assert_eq!(board.current_player().status(), GameStatus::Checkmate);
//! ```

pub use fianchetto_base::{bitboard, bitboard_consts, geometry, types};

pub mod attack;
pub mod board;
pub mod movegen;
pub mod moves;
pub mod player;

pub use bitboard::Bitboard;
pub use board::{Board, RawBoard};
pub use movegen::MoveList;
pub use moves::{Move, MoveKind, PromotePiece};
pub use player::{GameStatus, MoveStatus, MoveTransition, Player};
pub use types::{CastlingRights, CastlingSide, Cell, Color, Coord, File, Piece, Rank};
