//! Player sheets: generation under column-range constraints and match
//! tracking.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::cell::Cell;
use super::{CENTER, COLUMN_SPAN, GRID_DIM};
use crate::errors::DomainError;
use crate::rng::{RandomPoolError, RandomSource};

/// Column-major grid: `grid[col][row]`.
pub type Grid = [[Cell; GRID_DIM]; GRID_DIM];

/// Where wildcards go besides the always-free center cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WildcardPolicy {
    /// One extra pick in `[0, 5)` per non-center column; `0` means no
    /// wildcard, `r` wildcards row `r`.
    #[default]
    Scattered,
    /// Only the center cell is free.
    CenterOnly,
}

impl WildcardPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WildcardPolicy::Scattered => "scattered",
            WildcardPolicy::CenterOnly => "center",
        }
    }
}

impl fmt::Display for WildcardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WildcardPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scattered" => Ok(WildcardPolicy::Scattered),
            "center" | "center_only" | "center-only" => Ok(WildcardPolicy::CenterOnly),
            other => Err(DomainError::validation(format!(
                "unknown wildcard policy '{other}'"
            ))),
        }
    }
}

/// Half-open value range of a column with zero excluded.
pub fn column_range(col: usize) -> (u8, u8) {
    let low = (col * COLUMN_SPAN) as u8;
    (low.max(1), low + COLUMN_SPAN as u8)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    id: u32,
    columns: Grid,
    required_matches: usize,
    matched_count: usize,
}

impl Sheet {
    /// Generate a fresh sheet with id 1.
    pub async fn generate<S>(source: &S, policy: WildcardPolicy) -> Result<Self, RandomPoolError>
    where
        S: RandomSource + ?Sized,
    {
        let mut columns = [[Cell::Wildcard; GRID_DIM]; GRID_DIM];
        for (col, column) in columns.iter_mut().enumerate() {
            *column = fill_column(source, col).await?;
        }

        columns[CENTER][CENTER] = Cell::Wildcard;
        if policy == WildcardPolicy::Scattered {
            for (col, column) in columns.iter_mut().enumerate() {
                if col == CENTER {
                    continue;
                }
                let row = source.pick_below(GRID_DIM as u32).await? as usize;
                if row != 0 {
                    column[row] = Cell::Wildcard;
                }
            }
        }

        Ok(Self::with_grid(columns))
    }

    /// Build a sheet from a known grid, checking the column constraints.
    pub fn from_columns(columns: Grid) -> Result<Self, DomainError> {
        for (col, column) in columns.iter().enumerate() {
            let (low, high) = column_range(col);
            let mut previous: Option<u8> = None;
            for n in column.iter().filter_map(|cell| cell.number()) {
                if !(low..high).contains(&n) {
                    return Err(DomainError::validation(format!(
                        "{n} is outside column {col} range [{low}, {high})"
                    )));
                }
                if previous.is_some_and(|p| p >= n) {
                    return Err(DomainError::validation(format!(
                        "column {col} must be strictly ascending"
                    )));
                }
                previous = Some(n);
            }
        }

        let sheet = Self::with_grid(columns);
        if sheet.required_matches == 0 {
            return Err(DomainError::validation("sheet has no numbered cells"));
        }
        Ok(sheet)
    }

    fn with_grid(columns: Grid) -> Self {
        let required_matches = columns
            .iter()
            .flatten()
            .filter(|cell| !cell.is_wildcard())
            .count();
        Self {
            id: 1,
            columns,
            required_matches,
            matched_count: 0,
        }
    }

    /// Count hits for a drawn number and report whether the sheet is now a
    /// full house. Callers invoke this once per distinct draw, in order.
    pub fn find_match(&mut self, drawn: u8) -> bool {
        let hits = self
            .columns
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Number(drawn))
            .count();
        self.matched_count += hits;

        debug!(
            sheet_id = self.id,
            draw = drawn,
            hits,
            matched = self.matched_count,
            required = self.required_matches,
            "Sheet match progress"
        );

        self.is_full_house()
    }

    pub fn is_full_house(&self) -> bool {
        self.matched_count == self.required_matches
    }

    /// `(col, row)` of a number on this sheet.
    pub fn locate(&self, n: u8) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col, column)| {
            column
                .iter()
                .position(|cell| *cell == Cell::Number(n))
                .map(|row| (col, row))
        })
    }

    /// Every numbered cell appears in `draws`, independent of the running
    /// match count.
    pub fn is_covered_by(&self, draws: &[u8]) -> bool {
        self.numbers().all(|n| draws.contains(&n))
    }

    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.columns.iter().flatten().filter_map(|cell| cell.number())
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn columns(&self) -> &Grid {
        &self.columns
    }

    pub fn required_matches(&self) -> usize {
        self.required_matches
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn wildcard_count(&self) -> usize {
        GRID_DIM * GRID_DIM - self.required_matches
    }
}

async fn fill_column<S>(source: &S, col: usize) -> Result<[Cell; GRID_DIM], RandomPoolError>
where
    S: RandomSource + ?Sized,
{
    let base = (col * COLUMN_SPAN) as u8;
    let mut values: Vec<u8> = Vec::with_capacity(GRID_DIM);
    while values.len() < GRID_DIM {
        let candidate = base + source.pick_below(COLUMN_SPAN as u32).await? as u8;
        if candidate == 0 || values.contains(&candidate) {
            continue;
        }
        values.push(candidate);
    }
    values.sort_unstable();

    let mut column = [Cell::Wildcard; GRID_DIM];
    for (cell, n) in column.iter_mut().zip(values) {
        *cell = Cell::Number(n);
    }
    Ok(column)
}
