//! # Base types for fianchetto
//!
//! This is an auxiliary crate for `fianchetto`, holding the vocabulary types the engine is
//! written in: files, ranks, coordinates, colors, pieces, cells and the bitboard masks used
//! to guard against edge wrap-around.
//!
//! Normally you don't want to use this crate directly. Use `fianchetto` instead.

pub mod bitboard;
pub mod bitboard_consts;
pub mod geometry;
pub mod types;
