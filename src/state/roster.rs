use crate::state::app_state::PlayerSelection;
use chrono::Local;
use log::{debug, warn};
use pl_api::stats::{RosterAggregate, aggregate};
use pl_api::{PlayerRecord, TeamSet, derive_teams, search};
use std::fmt;

// ---------------------------------------------------------------------------
// Fetch failures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    Teams,
    Players,
}

impl FetchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchScope::Teams => "teams",
            FetchScope::Players => "players",
        }
    }
}

/// The only failure the store knows about. Network errors, malformed payloads
/// and empty results all arrive as this.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailed {
    pub scope: FetchScope,
    pub detail: String,
}

impl FetchFailed {
    pub fn new(scope: FetchScope, detail: impl Into<String>) -> Self {
        Self { scope, detail: detail.into() }
    }
}

impl fmt::Display for FetchFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            FetchScope::Teams => write!(f, "Failed to load team list: {}", self.detail),
            FetchScope::Players => write!(f, "Could not fetch players: {}", self.detail),
        }
    }
}

impl std::error::Error for FetchFailed {}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub enum TeamsPhase {
    #[default]
    Loading,
    Ready(TeamSet),
    Failed(FetchFailed),
}

/// One selection cycle: `Idle -> Loading -> {Ready, Failed}`. Selecting a team
/// from any phase goes back to `Loading`.
#[derive(Debug, Default)]
pub enum RosterPhase {
    #[default]
    Idle,
    Loading {
        team: String,
    },
    Ready {
        team: String,
        players: Vec<PlayerRecord>,
        loaded_at: String,
    },
    Failed {
        team: String,
        error: FetchFailed,
    },
}

impl RosterPhase {
    pub fn team(&self) -> Option<&str> {
        match self {
            RosterPhase::Idle => None,
            RosterPhase::Loading { team }
            | RosterPhase::Ready { team, .. }
            | RosterPhase::Failed { team, .. } => Some(team),
        }
    }

    pub fn players(&self) -> &[PlayerRecord] {
        match self {
            RosterPhase::Ready { players, .. } => players,
            _ => &[],
        }
    }
}

/// Handed out by [`RosterStore::select_team`]; the caller turns it into a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTicket {
    pub team: String,
    pub seq: u64,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RosterStore {
    teams: TeamsPhase,
    phase: RosterPhase,
    /// Sequence of the most recently initiated roster fetch.
    latest_seq: u64,
    query: String,
    /// Positions into the current roster that match `query`.
    visible: Vec<usize>,
    aggregate: RosterAggregate,
    cursor: usize,
}

impl RosterStore {
    pub fn teams(&self) -> &TeamsPhase {
        &self.teams
    }

    pub fn team_set(&self) -> &[String] {
        match &self.teams {
            TeamsPhase::Ready(teams) => teams,
            _ => &[],
        }
    }

    pub fn on_teams_loaded(&mut self, result: Result<Vec<PlayerRecord>, FetchFailed>) {
        self.teams = match result {
            Ok(all_players) => {
                let teams = derive_teams(&all_players);
                debug!("derived {} teams from {} players", teams.len(), all_players.len());
                TeamsPhase::Ready(teams)
            }
            Err(error) => TeamsPhase::Failed(error),
        };
    }

    pub fn phase(&self) -> &RosterPhase {
        &self.phase
    }

    /// Start a new selection cycle for `team`. Any outstanding fetch becomes
    /// stale and the search query is cleared.
    pub fn select_team(&mut self, team: &str) -> RosterTicket {
        self.latest_seq += 1;
        self.phase = RosterPhase::Loading { team: team.to_string() };
        self.query.clear();
        self.cursor = 0;
        self.refresh();
        RosterTicket { team: team.to_string(), seq: self.latest_seq }
    }

    /// Apply a finished roster fetch. Results for anything but the latest
    /// selection are dropped and `false` is returned.
    pub fn apply_roster(&mut self, seq: u64, result: Result<Vec<PlayerRecord>, FetchFailed>) -> bool {
        if seq != self.latest_seq {
            warn!("discarding stale roster result (seq {seq}, latest {})", self.latest_seq);
            return false;
        }
        let team = self.phase.team().unwrap_or_default().to_string();

        self.phase = match result {
            Ok(players) => RosterPhase::Ready {
                team,
                players,
                loaded_at: Local::now().format("%H:%M").to_string(),
            },
            Err(error) => RosterPhase::Failed { team, error },
        };
        self.cursor = 0;
        self.refresh();
        true
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refresh();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    fn refresh(&mut self) {
        let players = self.phase.players();
        self.visible = search::filter_positions(players, &self.query);
        self.aggregate = aggregate(self.visible.iter().map(|&idx| &players[idx]));
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
    }

    // -----------------------------------------------------------------------
    // Filtered view
    // -----------------------------------------------------------------------

    pub fn filtered(&self) -> impl Iterator<Item = &PlayerRecord> {
        let players = self.phase.players();
        self.visible.iter().map(move |&idx| &players[idx])
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    pub fn roster_len(&self) -> usize {
        self.phase.players().len()
    }

    pub fn aggregate(&self) -> &RosterAggregate {
        &self.aggregate
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn selected_player(&self) -> Option<&PlayerRecord> {
        let idx = *self.visible.get(self.cursor)?;
        self.phase.players().get(idx)
    }

    /// Navigation payload for the player under the cursor.
    pub fn select_player(&self) -> Option<PlayerSelection> {
        self.selected_player().cloned().map(PlayerSelection::new)
    }
}
