//! Moves and their application

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::{CastlingSide, Cell, Color, Coord, CoordParseError, File, Piece, Rank};
use crate::{attack, geometry, movegen};

use std::fmt::{self, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Kind of the move
///
/// The kind determines how the move changes the board, so pawn moves, castlings and
/// ordinary piece moves are told apart here.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Null move
    #[default]
    Null = 0,
    /// Move or capture by a piece other than a pawn, except castling
    Simple = 1,
    /// Castling towards the h-file
    CastlingKingside = 2,
    /// Castling towards the a-file
    CastlingQueenside = 3,
    /// Pawn step one rank forward, straight or capturing diagonally
    PawnSimple = 4,
    /// Pawn step two ranks forward from its home rank
    PawnDouble = 5,
    /// Enpassant capture
    Enpassant = 6,
    /// Pawn move onto the last rank, leaving a knight there
    PromoteKnight = 7,
    /// Pawn move onto the last rank, leaving a bishop there
    PromoteBishop = 8,
    /// Pawn move onto the last rank, leaving a rook there
    PromoteRook = 9,
    /// Pawn move onto the last rank, leaving a queen there
    PromoteQueen = 10,
}

/// Piece left on the board after a promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

impl From<PromotePiece> for MoveKind {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Self::PromoteKnight,
            PromotePiece::Bishop => Self::PromoteBishop,
            PromotePiece::Rook => Self::PromoteRook,
            PromotePiece::Queen => Self::PromoteQueen,
        }
    }
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::CastlingKingside,
            CastlingSide::Queen => Self::CastlingQueenside,
        }
    }
}

impl MoveKind {
    /// Castling side for castling moves, `None` for all the other kinds
    #[inline]
    pub const fn castling_side(&self) -> Option<CastlingSide> {
        match *self {
            Self::CastlingKingside => Some(CastlingSide::King),
            Self::CastlingQueenside => Some(CastlingSide::Queen),
            _ => None,
        }
    }

    /// Promotion target for promotion moves, `None` for all the other kinds
    #[inline]
    pub const fn promote(&self) -> Option<PromotePiece> {
        match *self {
            Self::PromoteKnight => Some(PromotePiece::Knight),
            Self::PromoteBishop => Some(PromotePiece::Bishop),
            Self::PromoteRook => Some(PromotePiece::Rook),
            Self::PromoteQueen => Some(PromotePiece::Queen),
            _ => None,
        }
    }
}

/// Chess move
///
/// Besides its kind and squares, a move records the moving piece and the captured piece
/// exactly as they stood on the source board. A move created in one position can thus
/// outlive it, and an attempt to apply it in a position where those pieces no longer
/// match is rejected instead of corrupting the board.
///
/// There are three levels of move validity:
///
/// - _Well-formed_. The fields agree with each other, as reported by
///   [`Move::is_well_formed()`]. Null move counts as well-formed.
///
/// - _Pseudo-legal_. The move follows the movement rules in the given position, but the
///   own king may be left under attack.
///
/// - _Legal_. Pseudo-legal, and the own king is not left under attack.
///
/// Applying a move never modifies the source board. [`Move::apply()`] returns a brand-new
/// board with the move made.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    src: Coord,
    dst: Coord,
    piece: Cell,
    captured: Cell,
}

/// Error validating or applying a move
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Move breaks the movement rules in the given position
    #[error("move does not follow the movement rules")]
    NotPseudoLegal,
    /// Move leaves the own king under attack
    #[error("move leaves the king under attack")]
    NotLegal,
}

/// Error assembling a [`Move`] from its parts
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum CreateError {
    /// The parts of the move contradict each other
    #[error("move is malformed")]
    NotWellFormed,
}

/// Error parsing a move in UCI notation
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum UciParseError {
    /// String has a wrong length
    #[error("string length must be 4 or 5")]
    BadLength,
    /// Source square is malformed
    #[error("bad source square: {0}")]
    BadSrc(CoordParseError),
    /// Destination square is malformed
    #[error("bad destination square: {0}")]
    BadDst(CoordParseError),
    /// Promotion letter is not one of `n`, `b`, `r`, `q`
    #[error("bad promotion char {0:?}")]
    BadPromote(char),
}

/// Error converting a UCI string into a well-formed [`Move`]
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// String is not a valid UCI move
    #[error("bad move string: {0}")]
    Parse(#[from] UciParseError),
    /// Parsed move doesn't make sense in the given position
    #[error("move does not fit the position: {0}")]
    Create(#[from] CreateError),
}

/// Error converting a UCI string into a pseudo-legal or legal [`Move`]
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// String is not a valid UCI move
    #[error("bad move string: {0}")]
    Parse(#[from] UciParseError),
    /// Parsed move doesn't make sense in the given position
    #[error("move does not fit the position: {0}")]
    Create(#[from] CreateError),
    /// Move violates the rules in the given position
    #[error("illegal move: {0}")]
    Validate(#[from] ValidateError),
}

impl Move {
    /// Null move
    pub const NULL: Move = Move {
        kind: MoveKind::Null,
        src: Coord::from_index(0),
        dst: Coord::from_index(0),
        piece: Cell::EMPTY,
        captured: Cell::EMPTY,
    };

    #[inline]
    pub(crate) const fn new_unchecked(
        kind: MoveKind,
        src: Coord,
        dst: Coord,
        piece: Cell,
        captured: Cell,
    ) -> Move {
        Move {
            kind,
            src,
            dst,
            piece,
            captured,
        }
    }

    /// Creates a new move from its raw parts and validates it for well-formedness
    pub fn new(
        kind: MoveKind,
        src: Coord,
        dst: Coord,
        piece: Cell,
        captured: Cell,
    ) -> Result<Move, CreateError> {
        let mv = Move {
            kind,
            src,
            dst,
            piece,
            captured,
        };
        if !mv.is_well_formed() {
            return Err(CreateError::NotWellFormed);
        }
        Ok(mv)
    }

    /// Castling move performed by `color` towards `side`
    #[inline]
    pub fn from_castling(color: Color, side: CastlingSide) -> Move {
        let rank = geometry::home_rank(color);
        let dst_file = match side {
            CastlingSide::King => File::G,
            CastlingSide::Queen => File::C,
        };
        Move {
            kind: side.into(),
            src: Coord::from_parts(File::E, rank),
            dst: Coord::from_parts(dst_file, rank),
            piece: Cell::from_parts(color, Piece::King),
            captured: Cell::EMPTY,
        }
    }

    /// Creates a move between `src` and `dst` if such move exists in position `b`
    ///
    /// The move kind and the involved pieces are deduced from the position. If the move
    /// is a promotion, the pawn promotes to a queen; use [`Move::from_coords_promote()`]
    /// to pick another piece.
    ///
    /// The returned move is pseudo-legal. `None` is returned if no pseudo-legal move connects
    /// the given squares.
    pub fn from_coords(b: &Board, src: Coord, dst: Coord) -> Option<Move> {
        let piece = b.get(src);
        if piece.piece() == Some(Piece::Pawn)
            && piece.color() == Some(b.side())
            && dst.rank() == geometry::promote_rank(b.side())
        {
            return Move::from_coords_promote(b, src, dst, PromotePiece::Queen);
        }
        let mv = make_candidate(b, src, dst, None)?;
        mv.is_pseudo_legal(b).then_some(mv)
    }

    /// Same as [`Move::from_coords()`], but promotes to `promote` instead of a queen
    pub fn from_coords_promote(
        b: &Board,
        src: Coord,
        dst: Coord,
        promote: PromotePiece,
    ) -> Option<Move> {
        let mv = make_candidate(b, src, dst, Some(promote))?;
        mv.is_pseudo_legal(b).then_some(mv)
    }

    /// Creates a move from the UCI string `s` if `b` is the position preceding this move
    ///
    /// No pseudo-legality check is performed on the result.
    #[inline]
    pub fn from_uci(s: &str, b: &Board) -> Result<Move, MoveParseError> {
        let parsed = ParsedMove::from_str(s)?;
        Ok(parsed.into_move(b)?)
    }

    /// Like [`Move::from_uci()`], additionally checking that the move is pseudo-legal
    pub fn from_uci_pseudo_legal(s: &str, b: &Board) -> Result<Move, ParseError> {
        let mv = ParsedMove::from_str(s)?.into_move(b)?;
        mv.validate_pseudo_legal(b)?;
        Ok(mv)
    }

    /// Like [`Move::from_uci()`], additionally checking that the move is legal
    pub fn from_uci_legal(s: &str, b: &Board) -> Result<Move, ParseError> {
        let mv = ParsedMove::from_str(s)?.into_move(b)?;
        mv.validate(b)?;
        Ok(mv)
    }

    /// Returns `true` if the move is pseudo-legal in position `b`
    #[inline]
    pub fn is_pseudo_legal(&self, b: &Board) -> bool {
        is_move_pseudo_legal(b, *self)
    }

    /// Returns `true` if the move is legal in position `b`
    ///
    /// Unlike [`Move::is_pseudo_legal()`], this also verifies that the king doesn't remain
    /// under attack after the move, which requires applying it.
    pub fn is_legal(&self, b: &Board) -> bool {
        self.is_pseudo_legal(b) && !self.apply_unchecked(b).is_opponent_king_attacked()
    }

    /// Validates whether this move is pseudo-legal in position `b`
    #[inline]
    pub fn validate_pseudo_legal(&self, b: &Board) -> Result<(), ValidateError> {
        if !self.is_pseudo_legal(b) {
            return Err(ValidateError::NotPseudoLegal);
        }
        Ok(())
    }

    /// Validates whether this move is legal in position `b`
    pub fn validate(&self, b: &Board) -> Result<(), ValidateError> {
        self.validate_pseudo_legal(b)?;
        match self.apply_unchecked(b).is_opponent_king_attacked() {
            false => Ok(()),
            true => Err(ValidateError::NotLegal),
        }
    }

    /// Applies the move to position `b` and returns the resulting position
    ///
    /// The source board is left untouched. Returns [`ValidateError::NotPseudoLegal`] if
    /// the move doesn't pass [`Move::is_pseudo_legal()`], and [`ValidateError::NotLegal`]
    /// if the king remains under attack after the move.
    pub fn apply(&self, b: &Board) -> Result<Board, ValidateError> {
        self.validate_pseudo_legal(b)?;
        let next = self.apply_unchecked(b);
        if next.is_opponent_king_attacked() {
            return Err(ValidateError::NotLegal);
        }
        Ok(next)
    }

    // The move must be pseudo-legal or null, otherwise the resulting board is garbage.
    pub(crate) fn apply_unchecked(&self, b: &Board) -> Board {
        let mut next = b.clone();
        apply_in_place(&mut next, *self);
        next
    }

    /// Checks that the fields of the move agree with each other
    ///
    /// Non-well-formed moves are rejected by all the functions which take moves, so this
    /// is mostly useful for diagnostics.
    pub fn is_well_formed(&self) -> bool {
        if self.kind == MoveKind::Null {
            return *self == Move::NULL;
        }
        let side = match self.piece.color() {
            Some(c) => c,
            None => return false,
        };
        if self.captured.is_occupied() && self.captured.color() != Some(side.inv()) {
            return false;
        }

        match self.kind {
            MoveKind::Null => unreachable!(),
            MoveKind::Simple => {
                if self.piece.piece() == Some(Piece::Pawn) {
                    return false;
                }
            }
            MoveKind::CastlingKingside | MoveKind::CastlingQueenside => {
                let rank = geometry::home_rank(side);
                let dst_file = match self.kind {
                    MoveKind::CastlingKingside => File::G,
                    _ => File::C,
                };
                if self.piece.piece() != Some(Piece::King)
                    || self.captured.is_occupied()
                    || self.src != Coord::from_parts(File::E, rank)
                    || self.dst != Coord::from_parts(dst_file, rank)
                {
                    return false;
                }
            }
            MoveKind::PawnSimple => {
                let file_step = self.src.file().index().abs_diff(self.dst.file().index());
                if self.piece.piece() != Some(Piece::Pawn)
                    || file_step > 1
                    || matches!(self.src.rank(), Rank::R1 | Rank::R8)
                    || matches!(self.dst.rank(), Rank::R1 | Rank::R8)
                {
                    return false;
                }
                let step_ok = match side {
                    Color::White => self.src.rank().index() == self.dst.rank().index() + 1,
                    Color::Black => self.src.rank().index() + 1 == self.dst.rank().index(),
                };
                if !step_ok {
                    return false;
                }
            }
            MoveKind::PawnDouble => {
                if self.piece.piece() != Some(Piece::Pawn)
                    || self.captured.is_occupied()
                    || self.src.file() != self.dst.file()
                    || self.src.rank() != geometry::double_src_rank(side)
                    || self.dst.rank() != geometry::double_dst_rank(side)
                {
                    return false;
                }
            }
            MoveKind::Enpassant => {
                let file_step = self.src.file().index().abs_diff(self.dst.file().index());
                if self.piece.piece() != Some(Piece::Pawn)
                    || self.captured.piece() != Some(Piece::Pawn)
                    || self.src.rank() != geometry::ep_src_rank(side)
                    || self.dst.rank() != geometry::ep_dst_rank(side)
                    || file_step != 1
                {
                    return false;
                }
            }
            MoveKind::PromoteKnight
            | MoveKind::PromoteBishop
            | MoveKind::PromoteRook
            | MoveKind::PromoteQueen => {
                let file_step = self.src.file().index().abs_diff(self.dst.file().index());
                if self.piece.piece() != Some(Piece::Pawn)
                    || self.src.rank() != geometry::prepromote_rank(side)
                    || self.dst.rank() != geometry::promote_rank(side)
                    || file_step > 1
                {
                    return false;
                }
            }
        };

        true
    }

    /// Kind of the move
    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Square the moving piece leaves
    ///
    /// Null move reports the square with index 0 here.
    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    /// Square the moving piece arrives at
    ///
    /// Null move reports the square with index 0 here.
    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Moving piece, exactly as it stood on the source board
    #[inline]
    pub const fn piece(&self) -> Cell {
        self.piece
    }

    /// Captured piece, or [`Cell::EMPTY`] when nothing is captured
    ///
    /// For enpassant this is the pawn captured on the adjacent square, not the contents
    /// of the destination square.
    #[inline]
    pub const fn captured(&self) -> Cell {
        self.captured
    }

    /// `true` if the move takes a piece off the board
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_occupied()
    }

    /// Side making the move, `None` for null move
    #[inline]
    pub fn side(&self) -> Option<Color> {
        self.piece.color()
    }
}

impl Default for Move {
    #[inline]
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Display for Move {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        ParsedMove::from(*self).fmt(f)
    }
}

/// Move parsed from UCI notation
///
/// Unlike [`Move`], it is not bound to any position and can be parsed from a string
/// alone. Use [`ParsedMove::into_move()`] to interpret it in a concrete position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParsedMove {
    /// Null UCI move
    Null,
    /// Non-null UCI move
    Move {
        /// Source square
        src: Coord,
        /// Destination square
        dst: Coord,
        /// Promotion target, if the move promotes
        promote: Option<PromotePiece>,
    },
}

impl ParsedMove {
    /// Converts the parsed move into [`Move`] in position `b`
    ///
    /// The returned move may still fail pseudo-legality checks in `b`.
    pub fn into_move(self, b: &Board) -> Result<Move, CreateError> {
        match self {
            ParsedMove::Null => Ok(Move::NULL),
            ParsedMove::Move { src, dst, promote } => {
                make_candidate(b, src, dst, promote).ok_or(CreateError::NotWellFormed)
            }
        }
    }
}

impl From<Move> for ParsedMove {
    #[inline]
    fn from(mv: Move) -> ParsedMove {
        if mv.kind() == MoveKind::Null {
            return ParsedMove::Null;
        }
        ParsedMove::Move {
            src: mv.src(),
            dst: mv.dst(),
            promote: mv.kind().promote(),
        }
    }
}

impl fmt::Display for ParsedMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParsedMove::Null => f.write_str("0000"),
            ParsedMove::Move { src, dst, promote } => {
                let suffix = match promote {
                    Some(PromotePiece::Knight) => "n",
                    Some(PromotePiece::Bishop) => "b",
                    Some(PromotePiece::Rook) => "r",
                    Some(PromotePiece::Queen) => "q",
                    None => "",
                };
                write!(f, "{}{}{}", src, dst, suffix)
            }
        }
    }
}

impl FromStr for ParsedMove {
    type Err = UciParseError;

    fn from_str(s: &str) -> Result<ParsedMove, Self::Err> {
        if s == "0000" {
            return Ok(ParsedMove::Null);
        }
        let promote = match s.len() {
            4 => None,
            5 => {
                let c = s.as_bytes()[4] as char;
                Some(match c {
                    'n' => PromotePiece::Knight,
                    'b' => PromotePiece::Bishop,
                    'r' => PromotePiece::Rook,
                    'q' => PromotePiece::Queen,
                    _ => return Err(UciParseError::BadPromote(c)),
                })
            }
            _ => return Err(UciParseError::BadLength),
        };
        let src = Coord::from_str(&s[0..2]).map_err(UciParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(UciParseError::BadDst)?;
        Ok(ParsedMove::Move { src, dst, promote })
    }
}

// Builds a well-formed move between the given squares, deducing the move kind and the
// involved pieces from the position. Returns `None` if no such move can be formed.
fn make_candidate(
    b: &Board,
    src: Coord,
    dst: Coord,
    promote: Option<PromotePiece>,
) -> Option<Move> {
    let side = b.side();
    let piece = b.get(src);
    let kind = match promote {
        Some(p) => MoveKind::from(p),
        None => {
            if piece.piece() == Some(Piece::Pawn) && piece.color() == Some(side) {
                if src.rank() == geometry::double_src_rank(side)
                    && dst.rank() == geometry::double_dst_rank(side)
                {
                    MoveKind::PawnDouble
                } else if src.file() != dst.file() && b.get(dst).is_empty() {
                    MoveKind::Enpassant
                } else {
                    MoveKind::PawnSimple
                }
            } else if piece.piece() == Some(Piece::King)
                && piece.color() == Some(side)
                && src == Coord::from_parts(File::E, geometry::home_rank(side))
                && dst == Coord::from_parts(File::G, geometry::home_rank(side))
            {
                MoveKind::CastlingKingside
            } else if piece.piece() == Some(Piece::King)
                && piece.color() == Some(side)
                && src == Coord::from_parts(File::E, geometry::home_rank(side))
                && dst == Coord::from_parts(File::C, geometry::home_rank(side))
            {
                MoveKind::CastlingQueenside
            } else {
                MoveKind::Simple
            }
        }
    };
    let captured = match kind {
        MoveKind::Enpassant => b.get(dst.add(-geometry::pawn_push_delta(side))),
        MoveKind::CastlingKingside | MoveKind::CastlingQueenside => Cell::EMPTY,
        _ => b.get(dst),
    };
    Move::new(kind, src, dst, piece, captured).ok()
}

fn is_move_pseudo_legal(b: &Board, mv: Move) -> bool {
    let side = b.side();
    if mv.piece.color() != Some(side) || b.get(mv.src) != mv.piece {
        return false;
    }
    match mv.kind {
        MoveKind::Simple => {
            if b.get(mv.dst) != mv.captured {
                return false;
            }
            match mv.piece.piece() {
                Some(Piece::Bishop) => attack::bishop(mv.src, b.all).has(mv.dst),
                Some(Piece::Rook) => attack::rook(mv.src, b.all).has(mv.dst),
                Some(Piece::Queen) => {
                    attack::bishop(mv.src, b.all).has(mv.dst)
                        || attack::rook(mv.src, b.all).has(mv.dst)
                }
                Some(Piece::Knight) => attack::knight(mv.src).has(mv.dst),
                Some(Piece::King) => attack::king(mv.src).has(mv.dst),
                _ => false,
            }
        }
        MoveKind::PawnSimple
        | MoveKind::PromoteKnight
        | MoveKind::PromoteBishop
        | MoveKind::PromoteRook
        | MoveKind::PromoteQueen => {
            if b.get(mv.dst) != mv.captured {
                return false;
            }
            // Captures go diagonally, plain pushes keep the file.
            let straight = mv.src.file() == mv.dst.file();
            if mv.captured.is_occupied() {
                !straight
            } else {
                straight
            }
        }
        MoveKind::PawnDouble => {
            // Both the skipped square and the destination must be empty.
            let must_empty = match side {
                Color::White => Bitboard::from_raw(0x0101 << mv.dst.index()),
                Color::Black => Bitboard::from_raw(0x0101 << (mv.dst.index() - 8)),
            };
            (b.all & must_empty).is_empty()
        }
        MoveKind::CastlingKingside | MoveKind::CastlingQueenside => {
            let cast = match mv.kind {
                MoveKind::CastlingKingside => CastlingSide::King,
                _ => CastlingSide::Queen,
            };
            let rank = geometry::home_rank(side);
            let rook_file = match cast {
                CastlingSide::King => File::H,
                CastlingSide::Queen => File::A,
            };
            let rook = b.get2(rook_file, rank);
            let transit = match cast {
                CastlingSide::King => mv.src.add(1),
                CastlingSide::Queen => mv.src.add(-1),
            };
            !mv.piece.has_moved()
                && rook.piece() == Some(Piece::Rook)
                && rook.color() == Some(side)
                && !rook.has_moved()
                && (b.all & movegen::castling_pass(side, cast)).is_empty()
                && !movegen::is_cell_attacked(b, mv.src, side.inv())
                && !movegen::is_cell_attacked(b, transit, side.inv())
        }
        MoveKind::Enpassant => {
            if let Some(p) = b.raw().ep_source {
                if b.get(p) != mv.captured {
                    return false;
                }
                return (p == mv.src.add(1) || p == mv.src.add(-1))
                    && mv.dst == p.add(geometry::pawn_push_delta(side));
            }
            false
        }
        MoveKind::Null => false,
    }
}

fn apply_in_place(b: &mut Board, mv: Move) {
    // The mover comes from the move itself, so the what-if move lists of the side
    // which is not on move filter correctly.
    let side = match mv.piece.color() {
        Some(c) => c,
        None => b.raw.side,
    };
    let src_bb = Bitboard::from_coord(mv.src);
    let dst_bb = Bitboard::from_coord(mv.dst);
    let change = src_bb | dst_bb;
    b.raw.ep_source = None;

    match mv.kind {
        MoveKind::Simple | MoveKind::PawnSimple => {
            b.raw.put(mv.src, Cell::EMPTY);
            b.raw.put(mv.dst, mv.piece.with_moved());
            *b.color_mut(side) ^= change;
            *b.color_mut(side.inv()) &= !dst_bb;
        }
        MoveKind::PawnDouble => {
            b.raw.put(mv.src, Cell::EMPTY);
            b.raw.put(mv.dst, mv.piece.with_moved());
            *b.color_mut(side) ^= change;
            b.raw.ep_source = Some(mv.dst);
        }
        MoveKind::PromoteKnight
        | MoveKind::PromoteBishop
        | MoveKind::PromoteRook
        | MoveKind::PromoteQueen => {
            let promote = match mv.kind.promote() {
                Some(p) => Cell::from_parts(side, p.into()).with_moved(),
                None => unreachable!(),
            };
            b.raw.put(mv.src, Cell::EMPTY);
            b.raw.put(mv.dst, promote);
            *b.color_mut(side) ^= change;
            *b.color_mut(side.inv()) &= !dst_bb;
        }
        MoveKind::CastlingKingside => {
            let rank = geometry::home_rank(side);
            let rook = b.get2(File::H, rank).with_moved();
            b.raw.put2(File::E, rank, Cell::EMPTY);
            b.raw.put2(File::F, rank, rook);
            b.raw.put2(File::G, rank, mv.piece.with_moved());
            b.raw.put2(File::H, rank, Cell::EMPTY);
            let off = match side {
                Color::White => 56,
                Color::Black => 0,
            };
            *b.color_mut(side) ^= Bitboard::from_raw(0xf0 << off);
        }
        MoveKind::CastlingQueenside => {
            let rank = geometry::home_rank(side);
            let rook = b.get2(File::A, rank).with_moved();
            b.raw.put2(File::A, rank, Cell::EMPTY);
            b.raw.put2(File::C, rank, mv.piece.with_moved());
            b.raw.put2(File::D, rank, rook);
            b.raw.put2(File::E, rank, Cell::EMPTY);
            let off = match side {
                Color::White => 56,
                Color::Black => 0,
            };
            *b.color_mut(side) ^= Bitboard::from_raw(0x1d << off);
        }
        MoveKind::Enpassant => {
            let pawn_sq = mv.dst.add(-geometry::pawn_push_delta(side));
            let pawn = Bitboard::from_coord(pawn_sq);
            b.raw.put(mv.src, Cell::EMPTY);
            b.raw.put(mv.dst, mv.piece.with_moved());
            b.raw.put(pawn_sq, Cell::EMPTY);
            *b.color_mut(side) ^= change;
            *b.color_mut(side.inv()) ^= pawn;
        }
        MoveKind::Null => {
            // Do nothing.
        }
    }

    if mv.piece.piece() == Some(Piece::King) {
        b.kings[side as usize] = mv.dst;
    }
    if mv.captured.is_occupied() || mv.piece.piece() == Some(Piece::Pawn) {
        b.raw.move_counter = 0;
    } else {
        b.raw.move_counter += 1;
    }
    b.raw.side = side.inv();
    if side == Color::Black {
        b.raw.move_number += 1;
    }
    b.all = b.white | b.black;
}
