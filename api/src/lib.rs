pub mod client;
pub mod search;
pub mod stats;
pub mod wire;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Domain types, independent of the player endpoint wire format
// ---------------------------------------------------------------------------

pub const UNKNOWN_POSITION: &str = "Unknown";
pub const UNKNOWN_NATION: &str = "Unknown";
pub const UNKNOWN_PLAYER: &str = "Unknown Player";
pub const NOT_AVAILABLE: &str = "N/A";

/// Characters `encodeURIComponent` leaves untouched besides ASCII alphanumerics.
const ROUTE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One row of the player endpoint. Identity is positional within a fetch;
/// `name` is not guaranteed unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub pos: Option<String>,
    pub nation: Option<String>, // "ENG England"
    pub age: Option<u32>,
    pub gls: Option<u32>,
    pub mp: Option<u32>,
    pub min: Option<u32>,
    pub ast: Option<u32>,
    pub xg: Option<f64>,
    pub xag: Option<f64>,
    pub crdy: Option<u32>,
    pub crdr: Option<u32>,
}

impl PlayerRecord {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() { UNKNOWN_PLAYER } else { &self.name }
    }

    pub fn position_label(&self) -> &str {
        self.pos
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(UNKNOWN_POSITION)
    }

    /// The last whitespace-separated token of `nation`, which is the readable
    /// country name in the "ENG England" encoding.
    pub fn nationality(&self) -> &str {
        self.nation
            .as_deref()
            .and_then(|n| n.split_whitespace().last())
            .unwrap_or(UNKNOWN_NATION)
    }

    pub fn age_label(&self) -> String {
        self.age.map_or_else(|| NOT_AVAILABLE.to_string(), |a| a.to_string())
    }

    pub fn goals(&self) -> u32 {
        self.gls.unwrap_or(0)
    }

    /// Percent-encoded name, safe to embed as a single route segment.
    pub fn route_slug(&self) -> String {
        utf8_percent_encode(&self.name, ROUTE_SEGMENT).to_string()
    }
}

/// Distinct team names, sorted lexicographically.
pub type TeamSet = Vec<String>;

/// Project `team` over a full listing, de-duplicate and sort.
pub fn derive_teams(all_players: &[PlayerRecord]) -> TeamSet {
    all_players
        .iter()
        .map(|p| p.team.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
