use crate::bitboard::Bitboard;
use crate::types::{File, Rank};

const fn rank_masks() -> [Bitboard; 8] {
    let mut res = [Bitboard::EMPTY; 8];
    let mut i = 0;
    while i < 8 {
        res[i] = Bitboard::from_raw(0xff_u64 << (8 * i));
        i += 1;
    }
    res
}

const fn file_masks() -> [Bitboard; 8] {
    let mut res = [Bitboard::EMPTY; 8];
    let mut i = 0;
    while i < 8 {
        res[i] = Bitboard::from_raw(0x0101_0101_0101_0101 << i);
        i += 1;
    }
    res
}

// Indices follow Coord::diag1() and Coord::diag2().
const fn diag_masks(flip: bool) -> [Bitboard; 15] {
    let mut res = [Bitboard::EMPTY; 15];
    let mut idx = 0;
    while idx < 64 {
        let file = idx % 8;
        let rank = idx / 8;
        let d = if flip { 7 - rank + file } else { file + rank };
        res[d] = Bitboard::from_raw(res[d].as_raw() | (1_u64 << idx));
        idx += 1;
    }
    res
}

pub const DIAG1: [Bitboard; 15] = diag_masks(false);
pub const DIAG2: [Bitboard; 15] = diag_masks(true);

const RANK: [Bitboard; 8] = rank_masks();
const FILE: [Bitboard; 8] = file_masks();

pub const fn rank(r: Rank) -> Bitboard {
    RANK[r.index()]
}

pub const fn file(f: File) -> Bitboard {
    FILE[f.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    #[test]
    fn test_masks() {
        for c in Coord::iter() {
            assert!(file(c.file()).has(c));
            assert!(rank(c.rank()).has(c));
            assert!(DIAG1[c.diag1()].has(c));
            assert!(DIAG2[c.diag2()].has(c));
        }
        for f in File::iter() {
            assert_eq!(file(f).popcount(), 8);
        }
        for r in Rank::iter() {
            assert_eq!(rank(r).popcount(), 8);
        }
        let diag1: u32 = DIAG1.iter().map(Bitboard::popcount).sum();
        let diag2: u32 = DIAG2.iter().map(Bitboard::popcount).sum();
        assert_eq!(diag1, 64);
        assert_eq!(diag2, 64);
    }
}
