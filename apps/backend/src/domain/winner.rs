//! Winner audit: who actually holds a full house against the draw history.

use serde::Serialize;
use tracing::{info, warn};

use super::sheet::Sheet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinnerAudit {
    pub declared: String,
    /// The declared winner's sheet is covered by the draw history.
    pub declared_verified: bool,
    /// Every player whose numbered cells are all drawn, in join order.
    pub qualifying: Vec<String>,
}

impl WinnerAudit {
    pub fn is_tie(&self) -> bool {
        self.qualifying.len() > 1
    }
}

pub fn audit_winners<'a, I>(declared: &str, players: I, draws: &[u8]) -> WinnerAudit
where
    I: IntoIterator<Item = (&'a str, &'a Sheet)>,
{
    let qualifying: Vec<String> = players
        .into_iter()
        .filter(|(_, sheet)| sheet.is_covered_by(draws))
        .map(|(name, _)| name.to_string())
        .collect();
    let declared_verified = qualifying.iter().any(|name| name == declared);

    let audit = WinnerAudit {
        declared: declared.to_string(),
        declared_verified,
        qualifying,
    };

    if !audit.declared_verified {
        warn!(
            declared = %audit.declared,
            draws = draws.len(),
            "Declared winner failed the audit"
        );
    }
    info!(
        declared = %audit.declared,
        qualifying = ?audit.qualifying,
        tie = audit.is_tie(),
        "Winner audit complete"
    );

    audit
}
