//! Terminal UI components.
//!
//! - [`style`]: Colors and modifiers for segments and chrome
//! - [`preview`]: Segment trees as styled ratatui lines

pub mod preview;
pub mod style;

mod render;
mod status;

pub use render::{render, split_main_columns};

pub const LIST_WIDTH_PERCENT: u16 = 35;
pub const DETAIL_WIDTH_PERCENT: u16 = 65;
/// Widest abbreviation column before names are truncated
pub const MAX_ABBREVIATION_WIDTH: usize = 16;

#[cfg(test)]
mod tests;
