//! Board representation, FEN support and position validation

use crate::bitboard::Bitboard;
use crate::types::{
    self, CastlingRights, CastlingSide, Cell, Color, Coord, File, Piece, Rank,
};
use crate::{bitboard_consts, geometry, movegen};

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Position validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// The enpassant square lies on a wrong rank
    #[error("bad enpassant square {0}")]
    InvalidEnpassant(Coord),
    /// A side has more than 16 pieces on the board
    #[error("{0:?} has too many pieces")]
    TooManyPieces(Color),
    /// A side has no king at all
    #[error("{0:?} has no king")]
    NoKing(Color),
    /// A side has two or more kings
    #[error("{0:?} has more than one king")]
    TooManyKings(Color),
    /// A pawn stands on the first or the last rank
    #[error("misplaced pawn on {0}")]
    InvalidPawn(Coord),
    /// The king of the side which is not to move can be captured
    #[error("inactive king is attacked")]
    OpponentKingAttacked,
}

/// Error parsing the piece placement field of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// A rank describes more than eight squares
    #[error("rank {0} is too long")]
    RankOverflow(Rank),
    /// A rank describes fewer than eight squares
    #[error("rank {0} is too short")]
    RankUnderflow(Rank),
    /// More than eight ranks
    #[error("more than eight ranks")]
    Overflow,
    /// Fewer than eight ranks
    #[error("fewer than eight ranks")]
    Underflow,
    /// A character denotes neither a piece nor a run of empty squares
    #[error("stray char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing FEN into a [`RawBoard`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawFenParseError {
    /// The string contains bytes outside the ASCII range
    #[error("FEN contains non-ASCII chars")]
    NonAscii,
    /// The piece placement field is missing
    #[error("missing piece placement")]
    NoBoard,
    /// The piece placement field is malformed
    #[error("bad piece placement: {0}")]
    Board(#[from] CellsParseError),
    /// The side-to-move field is missing
    #[error("missing side to move")]
    NoMoveSide,
    /// The side-to-move field is malformed
    #[error("bad side to move: {0}")]
    MoveSide(#[from] types::ColorParseError),
    /// The castling field is missing
    #[error("missing castling field")]
    NoCastling,
    /// The castling field is malformed
    #[error("bad castling field: {0}")]
    Castling(#[from] types::CastlingRightsParseError),
    /// The enpassant field is missing
    #[error("missing enpassant field")]
    NoEnpassant,
    /// The enpassant field is malformed
    #[error("bad enpassant field: {0}")]
    Enpassant(#[from] types::CoordParseError),
    /// The enpassant square lies on a wrong rank
    #[error("bad enpassant rank {0}")]
    InvalidEnpassantRank(Rank),
    /// The half-move clock is malformed
    #[error("bad halfmove clock: {0}")]
    MoveCounter(ParseIntError),
    /// The move number is malformed
    #[error("bad fullmove number: {0}")]
    MoveNumber(ParseIntError),
    /// The string has trailing fields
    #[error("trailing data after FEN")]
    ExtraData,
}

/// Error parsing FEN into a [`Board`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// The string is not a well-formed FEN
    #[error("malformed FEN: {0}")]
    Fen(#[from] RawFenParseError),
    /// The string parses, but the position is invalid
    #[error("illegal position: {0}")]
    Valid(#[from] ValidateError),
}

/// Raw chess board
///
/// Raw board contains all the necessary information about the chess position. But, unlike
/// [`Board`], it is not validated and may contain an invalid position.
///
/// Raw board can be used to build or edit the position programmatically. After changing the
/// necessary fields, it must be converted to [`Board`] via [`Board::try_from()`].
///
/// Note that there is no castling rights field. Castling eligibility is tracked through the
/// moved flags on the cells themselves, and [`RawBoard::castling_rights()`] derives the
/// rights from those flags. FEN parsing performs the reverse reconciliation.
///
/// # Example
///
/// ```
/// # use fianchetto::{RawBoard, Board, File, Rank, Color, Piece, Cell};
/// #
/// let mut raw = RawBoard::empty();
/// raw.side = Color::Black;
/// raw.move_counter = 3;
/// raw.move_number = 25;
/// raw.put2(File::B, Rank::R1, Cell::from_parts(Color::White, Piece::King));
/// raw.put2(File::G, Rank::R5, Cell::from_parts(Color::Black, Piece::King));
///
/// let board = Board::try_from(raw).unwrap();
/// assert_eq!(board.as_fen(), "8/8/8/6k1/8/8/8/1K6 b - - 3 25");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Contents of the squares, indexed by coordinate
    ///
    /// Prefer [`RawBoard::get()`] and [`RawBoard::put()`] over indexing this array
    /// directly.
    pub cells: [Cell; 64],
    /// Side to move
    pub side: Color,
    /// Square of the pawn which has just made a double move, if any
    ///
    /// `None` means that no enpassant capture is possible. The destination square of
    /// such a capture can be obtained via [`RawBoard::ep_dest()`].
    pub ep_source: Option<Coord>,
    /// Number of half-moves since the last capture or pawn move
    pub move_counter: u16,
    /// Full move number, incremented after each move by Black
    pub move_number: u16,
}

impl RawBoard {
    /// Returns a board without any pieces
    ///
    /// Same as [`RawBoard::default()`], but `const`.
    #[inline]
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [Cell::EMPTY; 64],
            side: Color::White,
            ep_source: None,
            move_counter: 0,
            move_number: 1,
        }
    }

    /// Returns the starting position
    ///
    /// All the cells are unmoved, so both sides keep full castling rights.
    pub fn initial() -> RawBoard {
        const BACK_ROW: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        let mut raw = RawBoard::empty();
        for (file, piece) in File::iter().zip(BACK_ROW) {
            raw.put2(file, Rank::R1, Cell::from_parts(Color::White, piece));
            raw.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            raw.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
            raw.put2(file, Rank::R8, Cell::from_parts(Color::Black, piece));
        }
        raw
    }

    /// Parses a position in FEN notation
    ///
    /// A more readable alias for [`RawBoard::from_str`].
    #[inline]
    pub fn from_fen(fen: &str) -> Result<RawBoard, RawFenParseError> {
        RawBoard::from_str(fen)
    }

    /// Returns the contents of the square `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        unsafe { *self.cells.get_unchecked(c.index()) }
    }

    /// Returns the contents of the square at `file` and `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` onto the square `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        unsafe {
            *self.cells.get_unchecked_mut(c.index()) = cell;
        }
    }

    /// Puts `cell` onto the square at `file` and `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Derives the castling rights from the moved flags
    ///
    /// A right is present iff the king stands unmoved on its home square and the
    /// corresponding rook stands unmoved in its corner.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::EMPTY;
        for color in [Color::White, Color::Black] {
            let rank = geometry::home_rank(color);
            let king = self.get2(File::E, rank);
            if king.piece() != Some(Piece::King)
                || king.color() != Some(color)
                || king.has_moved()
            {
                continue;
            }
            for (file, side) in [(File::A, CastlingSide::Queen), (File::H, CastlingSide::King)] {
                let rook = self.get2(file, rank);
                if rook.piece() == Some(Piece::Rook)
                    && rook.color() == Some(color)
                    && !rook.has_moved()
                {
                    rights.set(color, side);
                }
            }
        }
        rights
    }

    /// Returns the square onto which an enpassant capture would arrive, or `None` if
    /// no enpassant is possible
    ///
    /// The rank of `self.ep_source` is not inspected; the result is computed as if it
    /// were a valid enpassant source for the current side to move.
    #[inline]
    pub fn ep_dest(&self) -> Option<Coord> {
        let p = self.ep_source?;
        Some(Coord::from_parts(
            p.file(),
            geometry::ep_dst_rank(self.side),
        ))
    }

    /// Wraps the board for pretty-printing with the given `style`
    ///
    /// The wrapper implements [`fmt::Display`] and can be fed to `write!()`,
    /// `println!()` or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use fianchetto::{RawBoard, board::PrettyStyle};
    /// #
    /// let raw = RawBoard::from_fen("3r4/8/8/2k5/8/5P2/1K6/8 w - - 0 57").unwrap();
    ///
    /// let res = r#"
    /// 8|...r....
    /// 7|........
    /// 6|........
    /// 5|..k.....
    /// 4|........
    /// 3|.....P..
    /// 2|.K......
    /// 1|........
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(raw.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { raw: self, style }
    }

    /// Renders the board as a FEN string
    ///
    /// A more readable alias for `RawBoard::to_string()`.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for RawBoard {
    #[inline]
    fn default() -> RawBoard {
        RawBoard::empty()
    }
}

/// Fully validated chess position
///
/// Unlike [`RawBoard`], this type upholds the position invariants, so move generation
/// and move application can rely on them without re-checking. It bundles the raw
/// position with auxiliary bitboards that speed those operations up.
///
/// Boards are immutable; making a move builds a brand-new board and leaves the source
/// board untouched.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) raw: RawBoard,
    pub(crate) white: Bitboard,
    pub(crate) black: Bitboard,
    pub(crate) all: Bitboard,
    pub(crate) kings: [Coord; 2],
}

impl Board {
    /// Returns the starting position
    pub fn initial() -> Board {
        RawBoard::initial().try_into().unwrap()
    }

    /// Parses a position in FEN notation
    ///
    /// A more readable alias for [`Board::from_str`].
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        Board::from_str(fen)
    }

    /// Returns the underlying raw board
    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.raw
    }

    /// Returns the contents of the square `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.raw.get(c)
    }

    /// Returns the contents of the square at `file` and `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.raw.get2(file, rank)
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.raw.side
    }

    /// Returns the bitboard of all the pieces of color `c`
    #[inline]
    pub fn color(&self, c: Color) -> Bitboard {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    pub(crate) fn color_mut(&mut self, c: Color) -> &mut Bitboard {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Returns the bitboard of all the occupied squares
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.all
    }

    /// Returns the square of the king of color `c`
    #[inline]
    pub fn king_pos(&self, c: Color) -> Coord {
        self.kings[c as usize]
    }

    /// Returns `true` if the king of the side which just moved is under attack
    ///
    /// Such a position cannot arise from legal play. Move application re-checks this
    /// after building a candidate board.
    #[inline]
    pub fn is_opponent_king_attacked(&self) -> bool {
        let c = self.raw.side;
        movegen::is_cell_attacked(self, self.king_pos(c.inv()), c)
    }

    /// Returns `true` if the side to move has at least one legal move
    #[inline]
    pub fn has_legal_moves(&self) -> bool {
        movegen::has_legal_moves(self)
    }

    /// Returns `true` if the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        let c = self.raw.side;
        movegen::is_cell_attacked(self, self.king_pos(c), c.inv())
    }

    /// Returns the bitboard of the pieces currently giving check
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        let c = self.raw.side;
        movegen::cell_attackers(self, self.king_pos(c), c.inv())
    }

    /// Wraps the board for pretty-printing with the given `style`
    ///
    /// See [`RawBoard::pretty()`] for usage details.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.raw.pretty(style)
    }

    /// Renders the board as a FEN string
    ///
    /// A more readable alias for `Board::to_string()`.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Board {
    #[inline]
    fn eq(&self, other: &Board) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Board {}

impl Hash for Board {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state)
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(mut raw: RawBoard) -> Result<Board, ValidateError> {
        if let Some(p) = raw.ep_source {
            if p.rank() != geometry::ep_src_rank(raw.side) {
                return Err(ValidateError::InvalidEnpassant(p));
            }

            // The field survives only if the captured pawn is actually present and
            // the square it jumped over is free
            let pawn = raw.get(p);
            let skipped = p.add(geometry::pawn_push_delta(raw.side));
            if pawn.piece() != Some(Piece::Pawn)
                || pawn.color() != Some(raw.side.inv())
                || raw.get(skipped).is_occupied()
            {
                raw.ep_source = None;
            }
        }

        let mut sides = [Bitboard::EMPTY; 2];
        let mut pawns = Bitboard::EMPTY;
        let mut king_bb = [Bitboard::EMPTY; 2];
        for coord in Coord::iter() {
            let cell = raw.get(coord);
            if let Some(color) = cell.color() {
                sides[color as usize].set(coord);
                match cell.piece() {
                    Some(Piece::Pawn) => pawns.set(coord),
                    Some(Piece::King) => king_bb[color as usize].set(coord),
                    _ => {}
                }
            }
        }

        for color in [Color::White, Color::Black] {
            if sides[color as usize].popcount() > 16 {
                return Err(ValidateError::TooManyPieces(color));
            }
        }
        for color in [Color::White, Color::Black] {
            match king_bb[color as usize].popcount() {
                0 => return Err(ValidateError::NoKing(color)),
                1 => {}
                _ => return Err(ValidateError::TooManyKings(color)),
            }
        }
        let kings = [
            king_bb[0]
                .into_iter()
                .next()
                .ok_or(ValidateError::NoKing(Color::White))?,
            king_bb[1]
                .into_iter()
                .next()
                .ok_or(ValidateError::NoKing(Color::Black))?,
        ];

        // Pawns cannot stand on the back ranks
        let edges = bitboard_consts::rank(Rank::R1) | bitboard_consts::rank(Rank::R8);
        if let Some(coord) = (pawns & edges).into_iter().next() {
            return Err(ValidateError::InvalidPawn(coord));
        }

        let [white, black] = sides;
        let board = Board {
            raw,
            white,
            black,
            all: white | black,
            kings,
        };
        if board.is_opponent_king_attacked() {
            return Err(ValidateError::OpponentKingAttacked);
        }

        Ok(board)
    }
}

impl TryFrom<&RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: &RawBoard) -> Result<Board, ValidateError> {
        (*raw).try_into()
    }
}

/// Character set for [`RawBoard::pretty()`] and [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Plain ASCII frame and pieces
    Ascii,
    /// Unicode box-drawing frame and figurine pieces
    Utf8,
}

/// Display adapter returned by [`RawBoard::pretty()`] and [`Board::pretty()`]
pub struct Pretty<'a> {
    raw: &'a RawBoard,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<[Cell; 64], CellsParseError> {
    use CellsParseError as E;

    let mut cells = [Cell::EMPTY; 64];
    let mut seen = 0_usize;
    for (idx, chunk) in s.split('/').enumerate() {
        if idx >= 8 {
            return Err(E::Overflow);
        }
        let rank = Rank::from_index(idx);
        let mut file = 0_usize;
        for ch in chunk.chars() {
            match ch {
                '1'..='8' => {
                    file += ch as usize - '0' as usize;
                    if file > 8 {
                        return Err(E::RankOverflow(rank));
                    }
                }
                _ => {
                    if file == 8 {
                        return Err(E::RankOverflow(rank));
                    }
                    cells[idx * 8 + file] = Cell::from_char(ch).ok_or(E::UnexpectedChar(ch))?;
                    file += 1;
                }
            }
        }
        if file < 8 {
            return Err(E::RankUnderflow(rank));
        }
        seen = idx + 1;
    }
    if seen < 8 {
        return Err(E::Underflow);
    }

    Ok(cells)
}

// Reconciles the parsed castling rights field with the moved flags: a rook without its
// right is marked as moved, and the king of a side holding no rights at all is marked
// as moved. Rights whose king or rook is absent from its home square are dropped.
fn apply_castling_rights(cells: &mut [Cell; 64], rights: CastlingRights) {
    for color in [Color::White, Color::Black] {
        let rank = geometry::home_rank(color);
        for (file, side) in [(File::A, CastlingSide::Queen), (File::H, CastlingSide::King)] {
            let idx = Coord::from_parts(file, rank).index();
            let cell = cells[idx];
            if cell.piece() == Some(Piece::Rook)
                && cell.color() == Some(color)
                && !rights.has(color, side)
            {
                cells[idx] = cell.with_moved();
            }
        }
        let idx = Coord::from_parts(File::E, rank).index();
        let cell = cells[idx];
        if cell.piece() == Some(Piece::King)
            && cell.color() == Some(color)
            && !rights.has_color(color)
        {
            cells[idx] = cell.with_moved();
        }
    }
}

impl FromStr for RawBoard {
    type Err = RawFenParseError;

    fn from_str(s: &str) -> Result<RawBoard, Self::Err> {
        use RawFenParseError as E;

        if !s.is_ascii() {
            return Err(E::NonAscii);
        }
        let mut fields = s.split(' ').fuse();
        let mut require = |missing: E| fields.next().ok_or(missing);

        let mut cells = parse_cells(require(E::NoBoard)?)?;
        let side = Color::from_str(require(E::NoMoveSide)?)?;
        let rights = CastlingRights::from_str(require(E::NoCastling)?)?;
        let ep_source = match require(E::NoEnpassant)? {
            "-" => None,
            ep => {
                let dst = Coord::from_str(ep)?;
                if dst.rank() != geometry::ep_dst_rank(side) {
                    return Err(E::InvalidEnpassantRank(dst.rank()));
                }
                Some(Coord::from_parts(
                    dst.file(),
                    geometry::ep_src_rank(side),
                ))
            }
        };

        let move_counter = fields
            .next()
            .map_or(Ok(0), |t| u16::from_str(t).map_err(E::MoveCounter))?;
        let move_number = fields
            .next()
            .map_or(Ok(1), |t| u16::from_str(t).map_err(E::MoveNumber))?;
        if fields.next().is_some() {
            return Err(E::ExtraData);
        }

        apply_castling_rights(&mut cells, rights);

        Ok(RawBoard {
            cells,
            side,
            ep_source,
            move_counter,
            move_number,
        })
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        let raw = RawBoard::from_str(s)?;
        Ok(raw.try_into()?)
    }
}

impl Display for RawBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            let mut gap = 0;
            for file in File::iter() {
                let cell = self.get2(file, rank);
                if cell.is_empty() {
                    gap += 1;
                } else {
                    if gap != 0 {
                        write!(f, "{}", gap)?;
                        gap = 0;
                    }
                    write!(f, "{}", cell)?;
                }
            }
            if gap != 0 {
                write!(f, "{}", gap)?;
            }
            if rank != Rank::R1 {
                write!(f, "/")?;
            }
        }
        write!(f, " {} {} ", self.side, self.castling_rights())?;
        match self.ep_dest() {
            Some(p) => write!(f, "{}", p)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.move_counter, self.move_number)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

// Characters to draw the frame, the side-to-move mark and the pieces
struct Glyphs {
    horz: char,
    vert: char,
    cross: char,
    marks: [char; 2],
    piece: fn(Cell) -> char,
}

impl PrettyStyle {
    fn glyphs(self) -> Glyphs {
        match self {
            PrettyStyle::Ascii => Glyphs {
                horz: '-',
                vert: '|',
                cross: '+',
                marks: ['W', 'B'],
                piece: |c| c.as_char(),
            },
            PrettyStyle::Utf8 => Glyphs {
                horz: '─',
                vert: '│',
                cross: '┼',
                marks: ['○', '●'],
                piece: |c| c.as_utf8_char(),
            },
        }
    }
}

impl Display for Pretty<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let g = self.style.glyphs();
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, g.vert)?;
            for file in File::iter() {
                write!(f, "{}", (g.piece)(self.raw.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", g.horz, g.cross)?;
        for _ in File::iter() {
            write!(f, "{}", g.horz)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", g.marks[self.raw.side as usize], g.vert)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_size() {
        assert_eq!(mem::size_of::<RawBoard>(), 72);
        assert_eq!(mem::size_of::<Board>(), 104);
    }

    #[test]
    fn test_initial() {
        const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

        assert_eq!(RawBoard::initial().to_string(), START_FEN);
        assert_eq!(Board::initial().to_string(), START_FEN);
        assert_eq!(RawBoard::from_str(START_FEN), Ok(RawBoard::initial()));
        assert_eq!(Board::from_str(START_FEN), Ok(Board::initial()));
        assert_eq!(RawBoard::initial().castling_rights(), CastlingRights::FULL);
    }

    #[test]
    fn test_midgame() {
        const FEN: &str = "r2q1rk1/ppp2ppp/2np1n2/2b1p1B1/2B1P1b1/2NP1N2/PPP2PPP/R2Q1RK1 w - - 6 8";

        let board = Board::from_fen(FEN).unwrap();
        assert_eq!(board.as_fen(), FEN);
        assert_eq!(
            board.get2(File::G, Rank::R5),
            Cell::from_parts(Color::White, Piece::Bishop)
        );
        assert_eq!(
            board.get2(File::G, Rank::R4),
            Cell::from_parts(Color::Black, Piece::Bishop)
        );
        assert_eq!(
            board.king_pos(Color::White),
            Coord::from_parts(File::G, Rank::R1)
        );
        assert_eq!(
            board.king_pos(Color::Black),
            Coord::from_parts(File::G, Rank::R8)
        );
        assert_eq!(board.raw().side, Color::White);
        assert_eq!(board.raw().castling_rights(), CastlingRights::EMPTY);
        assert_eq!(board.raw().ep_source, None);
        assert_eq!(board.raw().move_counter, 6);
        assert_eq!(board.raw().move_number, 8);
    }

    #[test]
    fn test_moved_flags() {
        // Only the kingside right: the queenside rook must be flagged as moved.
        let raw = RawBoard::from_fen("4k3/8/8/8/8/8/8/R3K2R w K - 0 1").unwrap();
        assert!(raw.get2(File::A, Rank::R1).has_moved());
        assert!(!raw.get2(File::H, Rank::R1).has_moved());
        assert!(!raw.get2(File::E, Rank::R1).has_moved());
        // Black holds no rights at all, so its king is flagged too.
        assert!(raw.get2(File::E, Rank::R8).has_moved());
        assert_eq!(
            raw.castling_rights(),
            CastlingRights::EMPTY.with(Color::White, CastlingSide::King)
        );
        assert_eq!(raw.as_fen(), "4k3/8/8/8/8/8/8/R3K2R w K - 0 1");
    }

    #[test]
    fn test_fixes() {
        // The queenside right has no rook on a1 to back it, so only "Kkq" survives
        // the round-trip.
        const FEN: &str = "rnbqkb1r/ppppp1pp/5n2/5p2/8/5N2/PPPPPPPP/1RBQKB1R w KQkq f6 0 3";

        let raw = RawBoard::from_fen(FEN).unwrap();
        let mut rights = CastlingRights::FULL;
        rights.unset(Color::White, CastlingSide::Queen);
        assert_eq!(raw.castling_rights(), rights);
        assert_eq!(raw.ep_source, Some(Coord::from_parts(File::F, Rank::R5)));
        assert_eq!(raw.ep_dest(), Some(Coord::from_parts(File::F, Rank::R6)));

        // The knight on f6 occupies the square the f-pawn allegedly jumped over,
        // so validation drops the enpassant field.
        let board = Board::try_from(raw).unwrap();
        assert_eq!(board.raw().ep_source, None);
        assert_eq!(board.raw().ep_dest(), None);
        assert_eq!(
            board.as_fen(),
            "rnbqkb1r/ppppp1pp/5n2/5p2/8/5N2/PPPPPPPP/1RBQKB1R w Kkq - 0 3"
        );
    }

    #[test]
    fn test_enpassant() {
        // The b5 pawn just double-pushed and b6 is free, so the field survives
        // validation even though no white pawn can capture it.
        const FEN: &str = "rnbqkbnr/p1pppppp/8/1p6/8/5N2/PPPPPPPP/RNBQKB1R w KQkq b6 0 2";

        let raw = RawBoard::from_fen(FEN).unwrap();
        let board = Board::try_from(raw).unwrap();
        assert_eq!(board.raw().ep_source, Some(Coord::from_parts(File::B, Rank::R5)));
        assert_eq!(board.raw().ep_dest(), Some(Coord::from_parts(File::B, Rank::R6)));
        assert_eq!(board.as_fen(), FEN);

        // No pawn stands on d5 to back the claimed capture, so the field is dropped.
        let fen = "rnbqkbnr/ppp1pppp/8/8/8/3P4/PPP1PPPP/RNBQKBNR w KQkq d6 0 3";
        let raw = RawBoard::from_fen(fen).unwrap();
        assert_eq!(raw.ep_dest(), Some(Coord::from_parts(File::D, Rank::R6)));
        let board = Board::try_from(raw).unwrap();
        assert_eq!(board.raw().ep_source, None);
        assert_eq!(
            board.as_fen(),
            "rnbqkbnr/ppp1pppp/8/8/8/3P4/PPP1PPPP/RNBQKBNR w KQkq - 0 3"
        );
    }

    #[test]
    fn test_incomplete() {
        const POS: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";

        assert_eq!(
            RawBoard::from_fen(POS),
            Err(RawFenParseError::NoMoveSide)
        );
        assert_eq!(
            RawBoard::from_fen(&format!("{} w", POS)),
            Err(RawFenParseError::NoCastling)
        );
        assert_eq!(
            RawBoard::from_fen(&format!("{} w KQkq", POS)),
            Err(RawFenParseError::NoEnpassant)
        );

        let raw = RawBoard::from_fen(&format!("{} w KQkq -", POS)).unwrap();
        assert_eq!(raw.move_counter, 0);
        assert_eq!(raw.move_number, 1);

        let raw = RawBoard::from_fen(&format!("{} w KQkq - 37", POS)).unwrap();
        assert_eq!(raw.move_counter, 37);
        assert_eq!(raw.move_number, 1);
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::NoKing(Color::White)))
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4KK2 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::TooManyKings(
                Color::White
            ))),
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/P7/PPPPPPPP/PPPPPPPP/4K3 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::TooManyPieces(
                Color::White
            ))),
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/P3K3 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::InvalidPawn(
                Coord::from_parts(File::A, Rank::R1)
            ))),
        );
        // White to move, but the black king is already under attack.
        assert_eq!(
            Board::from_fen("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenParseError::Valid(ValidateError::OpponentKingAttacked)),
        );
        // Enpassant must point to the rank of the enemy double push.
        let mut raw = RawBoard::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        raw.ep_source = Some(Coord::from_parts(File::E, Rank::R4));
        assert_eq!(
            Board::try_from(raw),
            Err(ValidateError::InvalidEnpassant(Coord::from_parts(
                File::E,
                Rank::R4
            ))),
        );
    }

    #[test]
    fn test_pretty() {
        let board = Board::from_fen("3r4/8/8/2k5/8/5P2/1K6/8 w - - 0 57").unwrap();
        let expected = concat!(
            "8|...r....\n",
            "7|........\n",
            "6|........\n",
            "5|..k.....\n",
            "4|........\n",
            "3|.....P..\n",
            "2|.K......\n",
            "1|........\n",
            "-+--------\n",
            "W|abcdefgh\n",
        );
        assert_eq!(board.pretty(PrettyStyle::Ascii).to_string(), expected);

        let board = Board::initial();
        let expected = concat!(
            "8│♜♞♝♛♚♝♞♜\n",
            "7│♟♟♟♟♟♟♟♟\n",
            "6│........\n",
            "5│........\n",
            "4│........\n",
            "3│........\n",
            "2│♙♙♙♙♙♙♙♙\n",
            "1│♖♘♗♕♔♗♘♖\n",
            "─┼────────\n",
            "○│abcdefgh\n",
        );
        assert_eq!(board.pretty(PrettyStyle::Utf8).to_string(), expected);
    }
}
