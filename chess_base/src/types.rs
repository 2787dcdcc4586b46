use std::fmt::{self, Formatter};
use std::mem;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("bad file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("bad rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("string must be two chars long")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("bad cell char {0:?}")]
    UnexpectedChar(char),
    #[error("string must be one char long")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("bad color char {0:?}")]
    UnexpectedChar(char),
    #[error("string must be one char long")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastlingRightsParseError {
    #[error("bad castling char {0:?}")]
    UnexpectedChar(char),
    #[error("castling char {0:?} occurs twice")]
    DuplicateChar(char),
    #[error("empty string")]
    EmptyString,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as usize
    }

    // Safe for val < 8, as the enum is repr(u8) with contiguous discriminants.
    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        mem::transmute(val as u8)
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index out of range");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(Self::from_index)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File::from_index((c as u8 - b'a') as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + self.index() as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// Ranks are numbered from the top of the board, so `R8` has index zero and
// coord index 0 is the square a8.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as usize
    }

    // Safe for val < 8, as the enum is repr(u8) with contiguous discriminants.
    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        mem::transmute(val as u8)
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index out of range");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(Self::from_index)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Rank::from_index((b'8' - c as u8) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'1' + (7 - self.index()) as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord(u8);

impl Coord {
    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord index out of range");
        Coord(val as u8)
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Coord {
        Coord(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord((rank.index() * 8 + file.index()) as u8)
    }

    pub const fn file(&self) -> File {
        unsafe { File::from_index_unchecked((self.0 % 8) as usize) }
    }

    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_index_unchecked((self.0 / 8) as usize) }
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn diag1(&self) -> usize {
        self.rank().index() + self.file().index()
    }

    pub const fn diag2(&self) -> usize {
        self.file().index() + 7 - self.rank().index()
    }

    pub const fn add(self, delta: isize) -> Coord {
        Coord::from_index((self.index() as isize + delta) as usize)
    }

    pub const unsafe fn add_unchecked(self, delta: isize) -> Coord {
        Coord::from_index_unchecked((self.index() as isize + delta) as usize)
    }

    pub fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Coord> {
        let file = self.file().index() as isize + delta_file;
        let rank = self.rank().index() as isize + delta_rank;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }
        Some(Coord::from_parts(
            File::from_index(file as usize),
            Rank::from_index(rank as usize),
        ))
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..64).map(Coord::from_index)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            0..=63 => write!(f, "Coord({})", self),
            _ => write!(f, "Coord(?{:?})", self.0),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let fc = chars.next().ok_or(CoordParseError::BadLength)?;
        let rc = chars.next().ok_or(CoordParseError::BadLength)?;
        if chars.next().is_some() {
            return Err(CoordParseError::BadLength);
        }
        let file = File::from_char(fc).ok_or(CoordParseError::UnexpectedFileChar(fc))?;
        let rank = Rank::from_char(rc).ok_or(CoordParseError::UnexpectedRankChar(rc))?;
        Ok(Coord::from_parts(file, rank))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|color| color.as_char() == c)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(ColorParseError::BadLength)?;
        if chars.next().is_some() {
            return Err(ColorParseError::BadLength);
        }
        Color::from_char(c).ok_or(ColorParseError::UnexpectedChar(c))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl Piece {
    // Material weight in centipawns. Kept as part of piece identity for
    // scoring consumers; nothing in move generation depends on it.
    pub const fn value(&self) -> u32 {
        match *self {
            Piece::Pawn => 100,
            Piece::Knight => 300,
            Piece::Bishop => 300,
            Piece::Rook => 500,
            Piece::Queen => 900,
            Piece::King => 10_000,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Piece::Pawn,
            Piece::King,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
        ]
        .into_iter()
    }
}

// One square's content, packed into a byte. The low four bits select empty
// or (color, piece); bit 4 is the moved flag and is set only on occupied
// cells. The moved flag takes part in equality, so two boards that differ
// only in piece history compare as different.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const MAX_INDEX: usize = 13;

    const MOVED_BIT: u8 = 0x10;
    const CHARS: &'static [u8; 13] = b".PKNBRQpknbrq";
    const GLYPHS: [char; 13] = [
        '.',
        '♙', '♔', '♘', '♗', '♖', '♕',
        '♟', '♚', '♞', '♝', '♜', '♛',
    ];

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Cell {
        Cell(val as u8)
    }

    pub const fn from_index(val: usize) -> Cell {
        assert!(val < Self::MAX_INDEX, "cell index out of range");
        Cell(val as u8)
    }

    // Index into the unmoved cell alphabet, in [0, MAX_INDEX). The moved
    // flag is not part of the index.
    pub const fn index(&self) -> usize {
        (self.0 & 0xf) as usize
    }

    pub const fn from_parts(c: Color, p: Piece) -> Cell {
        Cell(1 + (c as u8) * 6 + p as u8)
    }

    pub const fn has_moved(&self) -> bool {
        self.0 & Self::MOVED_BIT != 0
    }

    pub const fn with_moved(self) -> Cell {
        if self.is_empty() {
            self
        } else {
            Cell(self.0 | Self::MOVED_BIT)
        }
    }

    pub const fn color(&self) -> Option<Color> {
        if self.is_empty() {
            None
        } else if self.index() < 7 {
            Some(Color::White)
        } else {
            Some(Color::Black)
        }
    }

    pub const fn piece(&self) -> Option<Piece> {
        if self.is_empty() {
            return None;
        }
        let code = ((self.index() - 1) % 6) as u8;
        // Safe, as the code is always below 6 and Piece is repr(u8).
        Some(unsafe { mem::transmute(code) })
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::MAX_INDEX).map(Self::from_index)
    }

    pub fn as_char(&self) -> char {
        Self::CHARS[self.index()] as char
    }

    pub fn as_utf8_char(&self) -> char {
        Self::GLYPHS[self.index()]
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::CHARS
            .iter()
            .position(|&b| b as char == c)
            .map(Cell::from_index)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let valid = self.index() < Self::MAX_INDEX
            && self.0 & !0x1f == 0
            && !(self.index() == 0 && self.0 != 0);
        if valid {
            let moved = if self.has_moved() { "*" } else { "" };
            return write!(f, "Cell({}{})", self.as_char(), moved);
        }
        write!(f, "Cell(?{:?})", self.0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(CellParseError::BadLength)?;
        if chars.next().is_some() {
            return Err(CellParseError::BadLength);
        }
        Cell::from_char(c).ok_or(CellParseError::UnexpectedChar(c))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

// Castling rights exist only at the notation boundary. The board itself
// tracks castling eligibility through the moved flags on its cells, and
// rights are reconciled with those flags during FEN parsing and formatting.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const EMPTY: CastlingRights = CastlingRights(0);
    pub const FULL: CastlingRights = CastlingRights(0b1111);

    const fn bit(c: Color, s: CastlingSide) -> u8 {
        1_u8 << ((c as u8) * 2 + s as u8)
    }

    const fn color_bits(c: Color) -> u8 {
        0b11 << ((c as u8) * 2)
    }

    pub const fn has(&self, c: Color, s: CastlingSide) -> bool {
        self.0 & Self::bit(c, s) != 0
    }

    pub const fn has_color(&self, c: Color) -> bool {
        self.0 & Self::color_bits(c) != 0
    }

    pub const fn with(self, c: Color, s: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 | Self::bit(c, s))
    }

    pub fn set(&mut self, c: Color, s: CastlingSide) {
        self.0 |= Self::bit(c, s)
    }

    pub fn unset(&mut self, c: Color, s: CastlingSide) {
        self.0 &= !Self::bit(c, s)
    }

    pub fn unset_color(&mut self, c: Color) {
        self.0 &= !Self::color_bits(c)
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            0..=15 => write!(f, "CastlingRights({})", self),
            _ => write!(f, "CastlingRights(?{:?})", self.0),
        }
    }
}

// FEN order of the castling letters
const CASTLING_ALPHABET: [(Color, CastlingSide, char); 4] = [
    (Color::White, CastlingSide::King, 'K'),
    (Color::White, CastlingSide::Queen, 'Q'),
    (Color::Black, CastlingSide::King, 'k'),
    (Color::Black, CastlingSide::Queen, 'q'),
];

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        for (color, side, ch) in CASTLING_ALPHABET {
            if self.has(color, side) {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use CastlingRightsParseError as E;

        if s == "-" {
            return Ok(Self::EMPTY);
        }
        if s.is_empty() {
            return Err(E::EmptyString);
        }
        let mut rights = Self::EMPTY;
        for ch in s.chars() {
            let (color, side) = CASTLING_ALPHABET
                .iter()
                .find(|&&(_, _, l)| l == ch)
                .map(|&(c, s, _)| (c, s))
                .ok_or(E::UnexpectedChar(ch))?;
            if rights.has(color, side) {
                return Err(E::DuplicateChar(ch));
            }
            rights.set(color, side);
        }
        Ok(rights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file() {
        for idx in 0..8 {
            let file = File::from_index(idx);
            assert_eq!(file.index(), idx);
            assert_eq!(File::from_char(file.as_char()), Some(file));
        }
        assert!(File::iter().eq((0..8).map(File::from_index)));
        assert_eq!(File::A.as_char(), 'a');
        assert_eq!(File::H.as_char(), 'h');
        assert_eq!(File::from_char('i'), None);
    }

    #[test]
    fn test_rank() {
        for idx in 0..8 {
            let rank = Rank::from_index(idx);
            assert_eq!(rank.index(), idx);
            assert_eq!(Rank::from_char(rank.as_char()), Some(rank));
        }
        assert!(Rank::iter().eq((0..8).map(Rank::from_index)));
        assert_eq!(Rank::R8.as_char(), '8');
        assert_eq!(Rank::R1.as_char(), '1');
        assert_eq!(Rank::from_char('0'), None);
        assert_eq!(Rank::from_char('9'), None);
    }

    #[test]
    fn test_coord() {
        let mut iter = Coord::iter();
        for rank in Rank::iter() {
            for file in File::iter() {
                let coord = iter.next().unwrap();
                assert_eq!(coord, Coord::from_parts(file, rank));
                assert_eq!(coord.file(), file);
                assert_eq!(coord.rank(), rank);
            }
        }
        assert_eq!(iter.next(), None);
        assert_eq!(Coord::from_parts(File::A, Rank::R8).index(), 0);
        assert_eq!(Coord::from_parts(File::H, Rank::R1).index(), 63);
    }

    #[test]
    fn test_cell() {
        assert_eq!(Cell::EMPTY.color(), None);
        assert_eq!(Cell::EMPTY.piece(), None);

        let mut iter = Cell::iter();
        assert_eq!(iter.next(), Some(Cell::EMPTY));
        for color in [Color::White, Color::Black] {
            for piece in Piece::iter() {
                let cell = iter.next().unwrap();
                assert_eq!(cell, Cell::from_parts(color, piece));
                assert_eq!(cell.color(), Some(color));
                assert_eq!(cell.piece(), Some(piece));
            }
        }
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_cell_moved() {
        assert!(!Cell::EMPTY.has_moved());
        assert_eq!(Cell::EMPTY.with_moved(), Cell::EMPTY);

        let pawn = Cell::from_parts(Color::White, Piece::Pawn);
        let moved = pawn.with_moved();
        assert!(!pawn.has_moved());
        assert!(moved.has_moved());
        assert_ne!(pawn, moved);
        assert_eq!(moved.with_moved(), moved);

        assert_eq!(moved.color(), pawn.color());
        assert_eq!(moved.piece(), pawn.piece());
        assert_eq!(moved.index(), pawn.index());
        assert_eq!(moved.as_char(), pawn.as_char());
        assert_eq!(format!("{:?}", pawn), "Cell(P)");
        assert_eq!(format!("{:?}", moved), "Cell(P*)");
    }

    #[test]
    fn test_piece_value() {
        assert_eq!(Piece::Pawn.value(), 100);
        assert_eq!(Piece::Queen.value(), 900);
        assert!(Piece::King.value() > Piece::Queen.value());
    }

    #[test]
    fn test_castling() {
        let empty = CastlingRights::EMPTY;
        let full = CastlingRights::FULL;
        for color in [Color::White, Color::Black] {
            for side in [CastlingSide::King, CastlingSide::Queen] {
                assert!(!empty.has(color, side));
                assert!(full.has(color, side));
            }
            assert!(!empty.has_color(color));
            assert!(full.has_color(color));
        }
        assert_eq!(empty.to_string(), "-");
        assert_eq!(full.to_string(), "KQkq");
        assert_eq!(CastlingRights::from_str("-"), Ok(empty));
        assert_eq!(CastlingRights::from_str("KQkq"), Ok(full));

        let mut rights = CastlingRights::EMPTY;
        rights.set(Color::White, CastlingSide::Queen);
        rights.set(Color::Black, CastlingSide::King);
        assert!(rights.has(Color::White, CastlingSide::Queen));
        assert!(!rights.has(Color::White, CastlingSide::King));
        assert!(rights.has_color(Color::White));
        assert!(rights.has_color(Color::Black));
        assert_eq!(rights.to_string(), "Qk");
        assert_eq!(CastlingRights::from_str("Qk"), Ok(rights));

        rights.unset(Color::White, CastlingSide::Queen);
        assert!(!rights.has_color(Color::White));
        assert_eq!(rights.to_string(), "k");
        assert_eq!(CastlingRights::from_str("k"), Ok(rights));

        rights.set(Color::Black, CastlingSide::Queen);
        rights.unset_color(Color::Black);
        assert_eq!(rights, CastlingRights::EMPTY);

        assert!(CastlingRights::from_str("").is_err());
        assert!(CastlingRights::from_str("KK").is_err());
        assert!(CastlingRights::from_str("Kx").is_err());
    }

    #[test]
    fn test_coord_str() {
        for coord in Coord::iter() {
            assert_eq!(Coord::from_str(&coord.to_string()), Ok(coord));
        }
        assert_eq!(
            Coord::from_str("g6"),
            Ok(Coord::from_parts(File::G, Rank::R6))
        );
        assert_eq!(Coord::from_parts(File::C, Rank::R2).to_string(), "c2");
        assert_eq!(Coord::from_str("h9"), Err(CoordParseError::UnexpectedRankChar('9')));
        assert_eq!(Coord::from_str("i4"), Err(CoordParseError::UnexpectedFileChar('i')));
        assert_eq!(Coord::from_str("e44"), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_str(""), Err(CoordParseError::BadLength));
    }

    #[test]
    fn test_cell_str() {
        assert_eq!(Cell::EMPTY.to_string(), ".");
        assert_eq!(Cell::from_parts(Color::White, Piece::Knight).to_string(), "N");
        assert_eq!(Cell::from_parts(Color::Black, Piece::Queen).to_string(), "q");
        for cell in Cell::iter() {
            assert_eq!(Cell::from_str(&cell.to_string()), Ok(cell));
        }
        assert_eq!(Cell::from_str("j"), Err(CellParseError::UnexpectedChar('j')));
        assert_eq!(Cell::from_str("NN"), Err(CellParseError::BadLength));
    }
}
