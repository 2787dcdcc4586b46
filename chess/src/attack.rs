use crate::bitboard::Bitboard;
use crate::bitboard_consts;
use crate::geometry;
use crate::types::{Color, Coord, File};

// Every step is an index offset paired with the mask of source squares for
// which that offset wraps across a board edge. Candidates are generated on a
// flat 64-cell index, so an unguarded offset like +1 would silently carry a
// piece from file H to file A of the next rank.
type Step = (isize, Bitboard);

const FILE_A: Bitboard = bitboard_consts::file(File::A);
const FILE_B: Bitboard = bitboard_consts::file(File::B);
const FILE_G: Bitboard = bitboard_consts::file(File::G);
const FILE_H: Bitboard = bitboard_consts::file(File::H);
const FILE_AB: Bitboard = Bitboard::from_raw(FILE_A.as_raw() | FILE_B.as_raw());
const FILE_GH: Bitboard = Bitboard::from_raw(FILE_G.as_raw() | FILE_H.as_raw());

const KNIGHT_STEPS: [Step; 8] = [
    (-17, FILE_A),
    (-15, FILE_H),
    (-10, FILE_AB),
    (-6, FILE_GH),
    (6, FILE_AB),
    (10, FILE_GH),
    (15, FILE_A),
    (17, FILE_H),
];

const KING_STEPS: [Step; 8] = [
    (-9, FILE_A),
    (-8, Bitboard::EMPTY),
    (-7, FILE_H),
    (-1, FILE_A),
    (1, FILE_H),
    (7, FILE_A),
    (8, Bitboard::EMPTY),
    (9, FILE_H),
];

const WHITE_PAWN_STEPS: [Step; 2] = [
    (geometry::pawn_west_delta(Color::White), FILE_A),
    (geometry::pawn_east_delta(Color::White), FILE_H),
];

const BLACK_PAWN_STEPS: [Step; 2] = [
    (geometry::pawn_west_delta(Color::Black), FILE_A),
    (geometry::pawn_east_delta(Color::Black), FILE_H),
];

const BISHOP_STEPS: [Step; 4] = [(-9, FILE_A), (-7, FILE_H), (7, FILE_A), (9, FILE_H)];
const ROOK_STEPS: [Step; 4] = [
    (-8, Bitboard::EMPTY),
    (-1, FILE_A),
    (1, FILE_H),
    (8, Bitboard::EMPTY),
];

const fn near_table(steps: &[Step]) -> [Bitboard; 64] {
    let mut res = [Bitboard::EMPTY; 64];
    let mut idx = 0;
    while idx < 64 {
        let src = Coord::from_index(idx);
        let mut s = 0;
        while s < steps.len() {
            let (delta, wrap) = steps[s];
            if !wrap.has(src) {
                let dst = idx as isize + delta;
                if 0 <= dst && dst < 64 {
                    res[idx] = res[idx].with(Coord::from_index(dst as usize));
                }
            }
            s += 1;
        }
        idx += 1;
    }
    res
}

static KING_ATTACKS: [Bitboard; 64] = near_table(&KING_STEPS);
static KNIGHT_ATTACKS: [Bitboard; 64] = near_table(&KNIGHT_STEPS);
static WHITE_PAWN_ATTACKS: [Bitboard; 64] = near_table(&WHITE_PAWN_STEPS);
static BLACK_PAWN_ATTACKS: [Bitboard; 64] = near_table(&BLACK_PAWN_STEPS);

#[inline]
pub fn king(coord: Coord) -> Bitboard {
    unsafe { *KING_ATTACKS.get_unchecked(coord.index()) }
}

#[inline]
pub fn knight(coord: Coord) -> Bitboard {
    unsafe { *KNIGHT_ATTACKS.get_unchecked(coord.index()) }
}

#[inline]
pub fn pawn(color: Color, coord: Coord) -> Bitboard {
    match color {
        Color::White => unsafe { *WHITE_PAWN_ATTACKS.get_unchecked(coord.index()) },
        Color::Black => unsafe { *BLACK_PAWN_ATTACKS.get_unchecked(coord.index()) },
    }
}

// Walks each ray until the edge, including the first occupied square and
// stopping there. Callers mask own pieces out of the result themselves.
fn ray(src: Coord, occupied: Bitboard, steps: &[Step; 4]) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    for &(delta, wrap) in steps {
        let mut pos = src;
        loop {
            if wrap.has(pos) {
                break;
            }
            let next = pos.index() as isize + delta;
            if !(0..64).contains(&next) {
                break;
            }
            let next = unsafe { Coord::from_index_unchecked(next as usize) };
            res.set(next);
            if occupied.has(next) {
                break;
            }
            pos = next;
        }
    }
    res
}

#[inline]
pub fn rook(coord: Coord, occupied: Bitboard) -> Bitboard {
    ray(coord, occupied, &ROOK_STEPS)
}

#[inline]
pub fn bishop(coord: Coord, occupied: Bitboard) -> Bitboard {
    ray(coord, occupied, &BISHOP_STEPS)
}
