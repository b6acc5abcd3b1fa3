//! Domain layer: sheets, draws and winner audit. No I/O beyond the random
//! source.

pub mod cell;
pub mod draw;
pub mod scripted;
pub mod sheet;
pub mod winner;

/// Rows and columns on a sheet.
pub const GRID_DIM: usize = 5;
/// Width of each column's value range.
pub const COLUMN_SPAN: usize = 15;
/// Highest drawable number.
pub const MAX_NUMBER: u8 = 75;
/// Index of the always-free center cell (both axes).
pub const CENTER: usize = 2;

pub use cell::Cell;
pub use draw::{draw_unique, DrawSequencer};
pub use scripted::{play_out, ScriptedOutcome};
pub use sheet::{column_range, Grid, Sheet, WildcardPolicy};
pub use winner::{audit_winners, WinnerAudit};
