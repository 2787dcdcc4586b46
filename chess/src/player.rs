//! Players and game state detection.
//!
//! A [`Player`] is one side's view of a [`Board`]: its color, its king and pieces, and
//! the list of moves it can legally make. The game loop builds a move (for example, via
//! [`Move::from_coords()`]), passes it to [`Player::make_move()`] and continues from the
//! board inside the returned [`MoveTransition`]. Boards are never mutated, so the whole
//! game is just a chain of boards.

use crate::board::Board;
use crate::movegen::{self, legal, MoveList};
use crate::moves::{Move, ValidateError};
use crate::types::{Cell, Color, Coord};

/// Result of a [`Player::make_move()`] call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    /// The move was made
    Done,
    /// The move is not among the legal moves of the player
    IllegalMove,
    /// The move would leave the player's king under attack
    ///
    /// Normally such moves are already filtered out of the legal move list, so this
    /// status indicates a move which didn't come from that list.
    LeavesInCheck,
}

/// State of the game from the point of view of a single player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The game goes on
    Normal,
    /// The player is in check but can still move
    Check,
    /// The player is checkmated and loses
    Checkmate,
    /// The player has no legal moves but is not in check, the game is drawn
    Stalemate,
}

/// Board produced by applying a move, together with the status of that move.
///
/// When the move is declined, the board is left unchanged.
#[derive(Debug, Clone)]
pub struct MoveTransition {
    board: Board,
    status: MoveStatus,
}

impl MoveTransition {
    /// Status of the attempted move
    #[inline]
    pub fn status(&self) -> MoveStatus {
        self.status
    }

    /// Returns `true` if the move was made
    #[inline]
    pub fn is_done(&self) -> bool {
        self.status == MoveStatus::Done
    }

    /// Board after the move, or the original board if the move was declined
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Converts the transition into the resulting board
    #[inline]
    pub fn into_board(self) -> Board {
        self.board
    }
}

/// One side's view of a board.
///
/// The player can be constructed for either color, not only for the side to move. The
/// legal moves of the side which is not on move show what it could do if it were its
/// turn, and such moves cannot be actually made until the turn passes to that side.
#[derive(Debug, Clone)]
pub struct Player<'a> {
    board: &'a Board,
    color: Color,
    moves: MoveList,
}

impl<'a> Player<'a> {
    /// Creates a player of color `color` viewing the board `board`
    pub fn new(board: &'a Board, color: Color) -> Player<'a> {
        Player {
            board,
            color,
            moves: legal::gen_all_for(board, color),
        }
    }

    /// Color of the player
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Board viewed by the player
    #[inline]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Position of the player's king
    #[inline]
    pub fn king_pos(&self) -> Coord {
        self.board.king_pos(self.color)
    }

    /// The other side's view of the same board
    pub fn opponent(&self) -> Player<'a> {
        Player::new(self.board, self.color.inv())
    }

    /// All the legal moves of the player
    #[inline]
    pub fn legal_moves(&self) -> &MoveList {
        &self.moves
    }

    /// Iterates over the player's pieces with their positions
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Cell)> + 'a {
        let board = self.board;
        board
            .color(self.color)
            .into_iter()
            .map(move |coord| (coord, board.get(coord)))
    }

    /// Returns `true` if the player's king is attacked
    pub fn is_check(&self) -> bool {
        movegen::is_cell_attacked(self.board, self.king_pos(), self.color.inv())
    }

    /// Returns `true` if the player is checkmated
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.moves.is_empty()
    }

    /// Returns `true` if the player is stalemated
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.moves.is_empty()
    }

    /// State of the game from the point of view of the player
    pub fn status(&self) -> GameStatus {
        match (self.is_check(), self.moves.is_empty()) {
            (false, false) => GameStatus::Normal,
            (true, false) => GameStatus::Check,
            (true, true) => GameStatus::Checkmate,
            (false, true) => GameStatus::Stalemate,
        }
    }

    /// Tries to make the move `mv` and returns the resulting transition.
    ///
    /// The move is made only if it belongs to the legal moves of the player and the
    /// player is on move, otherwise the board is returned unchanged with the
    /// corresponding status.
    pub fn make_move(&self, mv: Move) -> MoveTransition {
        if !self.moves.contains(&mv) {
            return MoveTransition {
                board: self.board.clone(),
                status: MoveStatus::IllegalMove,
            };
        }
        match mv.apply(self.board) {
            Ok(board) => MoveTransition {
                board,
                status: MoveStatus::Done,
            },
            Err(ValidateError::NotLegal) => MoveTransition {
                board: self.board.clone(),
                status: MoveStatus::LeavesInCheck,
            },
            Err(ValidateError::NotPseudoLegal) => MoveTransition {
                board: self.board.clone(),
                status: MoveStatus::IllegalMove,
            },
        }
    }
}

impl Board {
    /// Returns the player which is on move
    pub fn current_player(&self) -> Player<'_> {
        Player::new(self, self.side())
    }

    /// Returns the player of color `color`
    pub fn player(&self, color: Color) -> Player<'_> {
        Player::new(self, color)
    }
}
