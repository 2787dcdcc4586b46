use crate::types::Coord;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt::{self, Formatter};

/// Set of squares, one bit per coordinate
///
/// Bit `i` corresponds to the square with [`Coord::index()`] equal to `i`, so the
/// lowest bit is a8 and the highest one is h1.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    pub const fn from_raw(val: u64) -> Bitboard {
        Bitboard(val)
    }

    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    pub const fn from_coord(coord: Coord) -> Bitboard {
        Bitboard(1_u64 << coord.index())
    }

    pub const fn with(self, coord: Coord) -> Bitboard {
        Bitboard(self.0 | (1_u64 << coord.index()))
    }

    pub const fn without(self, coord: Coord) -> Bitboard {
        Bitboard(self.0 & !(1_u64 << coord.index()))
    }

    pub fn set(&mut self, coord: Coord) {
        self.0 |= 1_u64 << coord.index();
    }

    pub fn unset(&mut self, coord: Coord) {
        self.0 &= !(1_u64 << coord.index());
    }

    pub const fn has(&self, coord: Coord) -> bool {
        ((self.0 >> coord.index()) & 1) != 0
    }

    pub const fn popcount(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({})", self)
    }
}

// Renders eight rank rows from a8 to h1, separated by slashes, like the board part
// of FEN.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            if row != 0 {
                write!(f, "/")?;
            }
            let byte = (self.0 >> (8 * row)) as u8;
            write!(f, "{:08b}", byte.reverse_bits())?;
        }
        Ok(())
    }
}

/// Iterator over the squares of a [`Bitboard`], in ascending index order
pub struct IntoIter(u64);

impl Iterator for IntoIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        unsafe { Some(Coord::from_index_unchecked(idx)) }
    }
}

impl IntoIterator for Bitboard {
    type Item = Coord;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter(self.0)
    }
}
