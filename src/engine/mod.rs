//! Core engine: the load, filter and select pass behind every page view.

pub mod board;

pub use board::{build_board, Board};
