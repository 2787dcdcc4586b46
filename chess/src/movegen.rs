//! Move generation.
//!
//! This module allows to generate all the moves from a given position. The generated moves
//! can be either pseudo-legal or legal (see [`crate::moves`] docs for the difference between
//! them). The pseudo-legal generator is faster, and a pseudo-legal move can be checked for full
//! legality when it is applied to the board.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::{Move, MoveKind};
use crate::types::{CastlingSide, Cell, Color, Coord, File, Piece};
use crate::{attack, geometry};

use std::convert::Infallible;
use std::iter;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Returns `true` if the cell `coord` is attacked by pieces of color `color`.
///
/// Note that pinned pieces are still considered attacking, and the en passant
/// capture doesn't count as an attack on the pawn which has just moved.
pub fn is_cell_attacked(b: &Board, coord: Coord, color: Color) -> bool {
    let occupied = b.color(color);

    // Near attacks. The pawn table is inverted here, as we trace the attack
    // from the target cell back to its possible sources
    for src in attack::pawn(color.inv(), coord) & occupied {
        if b.get(src).piece() == Some(Piece::Pawn) {
            return true;
        }
    }
    for src in attack::knight(coord) & occupied {
        if b.get(src).piece() == Some(Piece::Knight) {
            return true;
        }
    }
    for src in attack::king(coord) & occupied {
        if b.get(src).piece() == Some(Piece::King) {
            return true;
        }
    }

    // Far attacks
    for src in attack::bishop(coord, b.all) & occupied {
        if matches!(b.get(src).piece(), Some(Piece::Bishop) | Some(Piece::Queen)) {
            return true;
        }
    }
    for src in attack::rook(coord, b.all) & occupied {
        if matches!(b.get(src).piece(), Some(Piece::Rook) | Some(Piece::Queen)) {
            return true;
        }
    }

    false
}

/// Returns the bitboard of all the pieces of color `color` attacking the cell `coord`.
pub fn cell_attackers(b: &Board, coord: Coord, color: Color) -> Bitboard {
    let occupied = b.color(color);
    let mut res = Bitboard::EMPTY;
    for src in attack::pawn(color.inv(), coord) & occupied {
        if b.get(src).piece() == Some(Piece::Pawn) {
            res.set(src);
        }
    }
    for src in attack::knight(coord) & occupied {
        if b.get(src).piece() == Some(Piece::Knight) {
            res.set(src);
        }
    }
    for src in attack::king(coord) & occupied {
        if b.get(src).piece() == Some(Piece::King) {
            res.set(src);
        }
    }
    for src in attack::bishop(coord, b.all) & occupied {
        if matches!(b.get(src).piece(), Some(Piece::Bishop) | Some(Piece::Queen)) {
            res.set(src);
        }
    }
    for src in attack::rook(coord, b.all) & occupied {
        if matches!(b.get(src).piece(), Some(Piece::Rook) | Some(Piece::Queen)) {
            res.set(src);
        }
    }
    res
}

// Cells that must be empty for the castling to be possible.
pub(crate) const fn castling_pass(c: Color, s: CastlingSide) -> Bitboard {
    let x = match s {
        CastlingSide::King => 0b0110_0000,
        CastlingSide::Queen => 0b0000_1110,
    };
    match c {
        Color::White => Bitboard::from_raw(x << 56),
        Color::Black => Bitboard::from_raw(x),
    }
}

/// Listener which accepts generated moves and can signal to stop the generation.
pub trait MaybeMovePush {
    /// Error type when the generation must be stopped
    type Err;

    /// Accepts a move `m` or returns an error to stop the generation
    fn push(&mut self, m: Move) -> Result<(), Self::Err>;
}

/// Listener which just accepts generated moves.
pub trait MovePush {
    /// Accepts a move `m`
    fn push(&mut self, m: Move);
}

impl<T: MovePush> MaybeMovePush for T {
    type Err = Infallible;

    #[inline]
    fn push(&mut self, m: Move) -> Result<(), Infallible> {
        <Self as MovePush>::push(self, m);
        Ok(())
    }
}

impl MovePush for Vec<Move> {
    #[inline]
    fn push(&mut self, m: Move) {
        Vec::push(self, m);
    }
}

impl<const N: usize> MovePush for ArrayVec<Move, N> {
    #[inline]
    fn push(&mut self, m: Move) {
        ArrayVec::push(self, m);
    }
}

/// List of moves
///
/// The list is backed by a fixed-capacity vector, so it doesn't allocate. The capacity
/// is enough to hold all the moves in any reachable position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveList(ArrayVec<Move, 256>);

impl MoveList {
    /// Creates an empty move list
    #[inline]
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl MovePush for MoveList {
    #[inline]
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = <ArrayVec<Move, 256> as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl iter::FromIterator<Move> for MoveList {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> MoveList {
        MoveList(iter.into_iter().collect())
    }
}

// Stops the generation immediately after the first move arrives.
struct ErrOnFirst;

impl MaybeMovePush for ErrOnFirst {
    type Err = ();

    #[inline]
    fn push(&mut self, _m: Move) -> Result<(), ()> {
        Err(())
    }
}

// Passes through only the moves which don't leave their own king under attack.
struct LegalFilter<'a, P> {
    board: &'a Board,
    inner: &'a mut P,
}

impl<'a, P: MaybeMovePush> MaybeMovePush for LegalFilter<'a, P> {
    type Err = P::Err;

    fn push(&mut self, m: Move) -> Result<(), P::Err> {
        if m.apply_unchecked(self.board).is_opponent_king_attacked() {
            return Ok(());
        }
        self.inner.push(m)
    }
}

struct MoveGenImpl<'a, P> {
    board: &'a Board,
    color: Color,
    dst: &'a mut P,
}

impl<'a, P: MaybeMovePush> MoveGenImpl<'a, P> {
    fn new(board: &'a Board, color: Color, dst: &'a mut P) -> Self {
        MoveGenImpl { board, color, dst }
    }

    #[inline]
    fn add(
        &mut self,
        kind: MoveKind,
        src: Coord,
        dst: Coord,
        piece: Cell,
        captured: Cell,
    ) -> Result<(), P::Err> {
        self.dst.push(Move::new_unchecked(kind, src, dst, piece, captured))
    }

    fn add_pawn(&mut self, src: Coord, dst: Coord, piece: Cell, captured: Cell) -> Result<(), P::Err> {
        if dst.rank() == geometry::promote_rank(self.color) {
            self.add(MoveKind::PromoteKnight, src, dst, piece, captured)?;
            self.add(MoveKind::PromoteBishop, src, dst, piece, captured)?;
            self.add(MoveKind::PromoteRook, src, dst, piece, captured)?;
            self.add(MoveKind::PromoteQueen, src, dst, piece, captured)?;
        } else {
            self.add(MoveKind::PawnSimple, src, dst, piece, captured)?;
        }
        Ok(())
    }

    fn gen_pawn(&mut self, src: Coord, piece: Cell) -> Result<(), P::Err> {
        let color = self.color;
        let forward = geometry::pawn_push_delta(color);

        // Pawns cannot stand on the last rank, so the cell in front of the pawn
        // always exists
        let fwd = src.add(forward);
        if self.board.get(fwd).is_empty() {
            self.add_pawn(src, fwd, piece, Cell::EMPTY)?;
            if src.rank() == geometry::double_src_rank(color) {
                let fwd2 = fwd.add(forward);
                if self.board.get(fwd2).is_empty() {
                    self.add(MoveKind::PawnDouble, src, fwd2, piece, Cell::EMPTY)?;
                }
            }
        }

        for dst in attack::pawn(color, src) & self.board.color(color.inv()) {
            self.add_pawn(src, dst, piece, self.board.get(dst))?;
        }

        if let Some(p) = self.board.raw().ep_source {
            let taken = self.board.get(p);
            if taken.color() == Some(color.inv())
                && p.rank() == src.rank()
                && (p == src.add(1) || p == src.add(-1))
            {
                self.add(MoveKind::Enpassant, src, p.add(forward), piece, taken)?;
            }
        }

        Ok(())
    }

    fn gen_simple(&mut self, src: Coord, piece: Cell, attacks: Bitboard) -> Result<(), P::Err> {
        for dst in attacks & !self.board.color(self.color) {
            self.add(MoveKind::Simple, src, dst, piece, self.board.get(dst))?;
        }
        Ok(())
    }

    fn gen_piece(&mut self, src: Coord) -> Result<(), P::Err> {
        let piece = self.board.get(src);
        if piece.color() != Some(self.color) {
            return Ok(());
        }
        match piece.piece() {
            Some(Piece::Pawn) => self.gen_pawn(src, piece),
            Some(Piece::King) => self.gen_simple(src, piece, attack::king(src)),
            Some(Piece::Knight) => self.gen_simple(src, piece, attack::knight(src)),
            Some(Piece::Bishop) => self.gen_simple(src, piece, attack::bishop(src, self.board.all)),
            Some(Piece::Rook) => self.gen_simple(src, piece, attack::rook(src, self.board.all)),
            Some(Piece::Queen) => self.gen_simple(
                src,
                piece,
                attack::bishop(src, self.board.all) | attack::rook(src, self.board.all),
            ),
            None => Ok(()),
        }
    }

    fn gen_castling(&mut self) -> Result<(), P::Err> {
        let color = self.color;
        let rank = geometry::home_rank(color);
        let king = self.board.get2(File::E, rank);
        if king.piece() != Some(Piece::King) || king.color() != Some(color) || king.has_moved() {
            return Ok(());
        }
        let src = Coord::from_parts(File::E, rank);
        for (cast, rook_file, tmp_file, dst_file) in [
            (CastlingSide::King, File::H, File::F, File::G),
            (CastlingSide::Queen, File::A, File::D, File::C),
        ] {
            let rook = self.board.get2(rook_file, rank);
            if rook.piece() != Some(Piece::Rook) || rook.color() != Some(color) || rook.has_moved()
            {
                continue;
            }
            if (castling_pass(color, cast) & self.board.all).is_nonempty() {
                continue;
            }
            let tmp = Coord::from_parts(tmp_file, rank);
            if is_cell_attacked(self.board, src, color.inv())
                || is_cell_attacked(self.board, tmp, color.inv())
            {
                continue;
            }
            let dst = Coord::from_parts(dst_file, rank);
            self.add(MoveKind::from(cast), src, dst, king, Cell::EMPTY)?;
        }
        Ok(())
    }

    fn gen_all(&mut self) -> Result<(), P::Err> {
        for src in self.board.color(self.color) {
            self.gen_piece(src)?;
        }
        self.gen_castling()
    }

    // Castlings are intentionally not generated here, as there is no such
    // situation where a castling is the only legal move.
    fn gen_all_for_detect(&mut self) -> Result<(), P::Err> {
        let king = self.board.king_pos(self.color);
        self.gen_piece(king)?;
        for src in self.board.color(self.color) {
            if src != king {
                self.gen_piece(src)?;
            }
        }
        Ok(())
    }
}

/// Returns `true` if the current side has at least one legal move.
///
/// This function is much faster than generating all the legal moves, as it stops
/// right after the first such move is found. King moves are probed first, since
/// they are the most likely way out of check.
pub fn has_legal_moves(b: &Board) -> bool {
    let mut detector = ErrOnFirst;
    let mut filter = LegalFilter {
        board: b,
        inner: &mut detector,
    };
    MoveGenImpl::new(b, b.side(), &mut filter)
        .gen_all_for_detect()
        .is_err()
}

/// Pseudo-legal move generation.
///
/// Such moves are guaranteed to pass [`Move::apply()`](crate::moves::Move::apply)
/// validation, though the application can still decline the moves which leave the
/// king under attack.
pub mod pseudo_legal {
    use super::{Board, Color, Coord, File, MoveGenImpl, MoveList, MovePush};
    use crate::geometry;

    /// Generates all the pseudo-legal moves for the side to move into `dst`
    pub fn gen_all_into<P: MovePush>(b: &Board, dst: &mut P) {
        let _ = MoveGenImpl::new(b, b.side(), dst).gen_all();
    }

    /// Generates all the pseudo-legal moves for the side to move
    pub fn gen_all(b: &Board) -> MoveList {
        let mut res = MoveList::new();
        gen_all_into(b, &mut res);
        res
    }

    /// Generates all the moves which the pieces of color `color` could make if it
    /// were their turn
    ///
    /// For the side to move, the result is the same as of [`gen_all()`]. The moves
    /// of the opposite side cannot be applied to the board and serve only to inspect
    /// its position.
    pub fn gen_all_for(b: &Board, color: Color) -> MoveList {
        let mut res = MoveList::new();
        let _ = MoveGenImpl::new(b, color, &mut res).gen_all();
        res
    }

    /// Generates all the pseudo-legal moves of the single piece located at `src` into `dst`
    ///
    /// The moves are generated for the color of that piece, regardless of the side to
    /// move. If the cell is empty, nothing is generated.
    pub fn gen_cell_into<P: MovePush>(b: &Board, src: Coord, dst: &mut P) {
        let color = match b.get(src).color() {
            Some(color) => color,
            None => return,
        };
        let mut gen = MoveGenImpl::new(b, color, dst);
        let _ = gen.gen_piece(src);
        if src == Coord::from_parts(File::E, geometry::home_rank(color)) {
            let _ = gen.gen_castling();
        }
    }

    /// Generates all the pseudo-legal moves of the single piece located at `src`
    pub fn gen_cell(b: &Board, src: Coord) -> MoveList {
        let mut res = MoveList::new();
        gen_cell_into(b, src, &mut res);
        res
    }
}

/// Legal move generation.
///
/// Works slower than the pseudo-legal one, as each move is tentatively applied to the
/// board to verify that it doesn't leave the king under attack.
pub mod legal {
    use super::{pseudo_legal, Board, Color, Coord, LegalFilter, MoveGenImpl, MoveList, MovePush};

    /// Generates all the legal moves for the side to move into `dst`
    pub fn gen_all_into<P: MovePush>(b: &Board, dst: &mut P) {
        let mut filter = LegalFilter { board: b, inner: dst };
        let _ = MoveGenImpl::new(b, b.side(), &mut filter).gen_all();
    }

    /// Generates all the legal moves for the side to move
    pub fn gen_all(b: &Board) -> MoveList {
        let mut res = MoveList::new();
        gen_all_into(b, &mut res);
        res
    }

    /// Generates all the moves which the pieces of color `color` could legally make
    /// if it were their turn
    pub fn gen_all_for(b: &Board, color: Color) -> MoveList {
        let mut res = pseudo_legal::gen_all_for(b, color);
        res.retain(|&mut m| !m.apply_unchecked(b).is_opponent_king_attacked());
        res
    }

    /// Generates all the legal moves of the single piece located at `src`
    ///
    /// Like [`pseudo_legal::gen_cell()`], the moves are generated for the color of that
    /// piece, regardless of the side to move.
    pub fn gen_cell(b: &Board, src: Coord) -> MoveList {
        let mut res = pseudo_legal::gen_cell(b, src);
        res.retain(|&mut m| !m.apply_unchecked(b).is_opponent_king_attacked());
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::moves::{Move, PromotePiece};
    use crate::types::{Color, Coord, File, Rank};
    use std::str::FromStr;

    #[test]
    fn test_cell_attackers() {
        let b = Board::from_str("4r2b/4r1p1/3p1p2/8/3k2n1/6q1/8/7K w - - 0 1").unwrap();
        let e5 = Coord::from_parts(File::E, Rank::R5);
        // The e8 rook and the h8 bishop stand behind blockers and must not count.
        assert_eq!(
            cell_attackers(&b, e5, Color::Black),
            Bitboard::EMPTY
                .with(Coord::from_parts(File::E, Rank::R7))
                .with(Coord::from_parts(File::D, Rank::R6))
                .with(Coord::from_parts(File::F, Rank::R6))
                .with(Coord::from_parts(File::D, Rank::R4))
                .with(Coord::from_parts(File::G, Rank::R4))
                .with(Coord::from_parts(File::G, Rank::R3)),
        );
        assert_eq!(cell_attackers(&b, e5, Color::White), Bitboard::EMPTY);
        assert!(is_cell_attacked(&b, e5, Color::Black));
        assert!(!is_cell_attacked(&b, e5, Color::White));

        let h6 = Coord::from_parts(File::H, Rank::R6);
        assert!(is_cell_attacked(&b, h6, Color::Black));
        assert!(!is_cell_attacked(&b, h6, Color::White));

        let b = Board::from_str("8/8/8/8/1KP2k2/8/8/8 w - - 0 1").unwrap();
        assert_eq!(
            cell_attackers(&b, Coord::from_parts(File::B, Rank::R5), Color::White),
            Bitboard::EMPTY
                .with(Coord::from_parts(File::B, Rank::R4))
                .with(Coord::from_parts(File::C, Rank::R4)),
        );
        assert_eq!(
            cell_attackers(&b, Coord::from_parts(File::E, Rank::R5), Color::Black),
            Bitboard::from_coord(Coord::from_parts(File::F, Rank::R4)),
        );
    }

    #[test]
    fn test_gen_initial() {
        let b = Board::initial();
        assert_eq!(pseudo_legal::gen_all(&b).len(), 20);
        assert_eq!(legal::gen_all(&b).len(), 20);

        let b1 = Coord::from_parts(File::B, Rank::R1);
        let moves = legal::gen_cell(&b, b1);
        let mut uci: Vec<_> = moves.iter().map(|m| m.to_string()).collect();
        uci.sort();
        assert_eq!(uci, vec!["b1a3", "b1c3"]);

        let d2 = Coord::from_parts(File::D, Rank::R2);
        let moves = legal::gen_cell(&b, d2);
        let mut uci: Vec<_> = moves.iter().map(|m| m.to_string()).collect();
        uci.sort();
        assert_eq!(uci, vec!["d2d3", "d2d4"]);

        let e1 = Coord::from_parts(File::E, Rank::R1);
        assert!(legal::gen_cell(&b, e1).is_empty());

        // The black pieces also have their moves, even though White is to move
        let d7 = Coord::from_parts(File::D, Rank::R7);
        let moves = legal::gen_cell(&b, d7);
        let mut uci: Vec<_> = moves.iter().map(|m| m.to_string()).collect();
        uci.sort();
        assert_eq!(uci, vec!["d7d5", "d7d6"]);
        assert_eq!(legal::gen_all_for(&b, Color::Black).len(), 20);

        let f5 = Coord::from_parts(File::F, Rank::R5);
        assert!(legal::gen_cell(&b, f5).is_empty());
    }

    #[test]
    fn test_gen_castling() {
        // Castling through an attacked cell is not even pseudo-legal
        let b = Board::from_str("r3k2r/8/8/8/8/5r2/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(Move::from_uci_pseudo_legal("e1g1", &b).is_err());
        assert!(Move::from_uci_legal("e1c1", &b).is_ok());
        let moves = legal::gen_all(&b);
        assert!(!moves.iter().any(|m| m.kind() == MoveKind::CastlingKingside));
        assert!(moves.iter().any(|m| m.kind() == MoveKind::CastlingQueenside));

        // Castling into an attacked cell is pseudo-legal but not legal
        let b = Board::from_str("r3k2r/8/8/8/8/6r1/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(Move::from_uci_pseudo_legal("e1g1", &b).is_ok());
        assert!(Move::from_uci_legal("e1g1", &b).is_err());
        let moves = legal::gen_all(&b);
        assert!(!moves.iter().any(|m| m.kind() == MoveKind::CastlingKingside));
        assert!(moves.iter().any(|m| m.kind() == MoveKind::CastlingQueenside));

        // The rook on h1 has lost its castling rights
        let b = Board::from_str("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1").unwrap();
        let moves = legal::gen_all(&b);
        assert!(!moves.iter().any(|m| m.kind() == MoveKind::CastlingKingside));
        assert!(moves.iter().any(|m| m.kind() == MoveKind::CastlingQueenside));

        // Both passages are blocked by knights
        let b = Board::from_str("rn2k1nr/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1").unwrap();
        let moves = legal::gen_all(&b);
        assert!(!moves
            .iter()
            .any(|m| m.kind().castling_side().is_some()));
    }

    #[test]
    fn test_has_legal_moves() {
        let b = Board::initial();
        assert!(has_legal_moves(&b));
        assert!(b.has_legal_moves());

        // Fool's mate
        let b =
            Board::from_str("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(!has_legal_moves(&b));
        assert!(b.is_check());
        assert!(legal::gen_all(&b).is_empty());

        // Stalemate
        let b = Board::from_str("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!has_legal_moves(&b));
        assert!(!b.is_check());
        assert!(legal::gen_all(&b).is_empty());
        assert!(!pseudo_legal::gen_all(&b).is_empty());
    }

    #[test]
    fn test_gen_consistent() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r1bq1rk1/ppp2ppp/2np1n2/2b1p3/2B1P3/2NP1N2/PPP2PPP/R1BQ1RK1 w - - 0 7",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
        ] {
            let b = Board::from_str(fen).unwrap();
            let pseudo = pseudo_legal::gen_all(&b);
            let legal = legal::gen_all(&b);
            for m in &pseudo {
                assert!(m.is_pseudo_legal(&b), "{} must be pseudo-legal on {}", m, fen);
            }
            let filtered: MoveList = pseudo
                .iter()
                .copied()
                .filter(|m| m.is_legal(&b))
                .collect();
            assert_eq!(legal, filtered, "legal moves mismatch on {}", fen);

            // The moves must also be reconstructible from their squares
            for m in &legal {
                let promote = m.kind().promote();
                if promote.is_none() || promote == Some(PromotePiece::Queen) {
                    assert_eq!(Move::from_coords(&b, m.src(), m.dst()), Some(*m));
                } else {
                    assert_eq!(
                        Move::from_coords_promote(&b, m.src(), m.dst(), promote.unwrap()),
                        Some(*m)
                    );
                }
            }
        }
    }

    fn perft(b: &Board, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = legal::gen_all(b);
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .iter()
            .map(|m| perft(&m.apply_unchecked(b), depth - 1))
            .sum()
    }

    #[test]
    fn test_perft_initial() {
        let b = Board::initial();
        assert_eq!(perft(&b, 1), 20);
        assert_eq!(perft(&b, 2), 400);
        assert_eq!(perft(&b, 3), 8_902);
        assert_eq!(perft(&b, 4), 197_281);
    }

    #[test]
    fn test_perft_tactical() {
        let b = Board::from_str(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&b, 1), 48);
        assert_eq!(perft(&b, 2), 2_039);
        assert_eq!(perft(&b, 3), 97_862);
    }

    #[test]
    fn test_perft_endgame() {
        let b = Board::from_str("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&b, 1), 14);
        assert_eq!(perft(&b, 2), 191);
        assert_eq!(perft(&b, 3), 2_812);
        assert_eq!(perft(&b, 4), 43_238);
    }
}
