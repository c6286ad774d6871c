use crate::state::network::LoadingState;
use crate::state::roster::FetchFailed;
use crossterm::event::KeyEvent;
use pl_api::PlayerRecord;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Full listing, used once on startup to derive the team set.
    LoadTeams,
    /// One team's roster. `seq` is the selection sequence the store issued.
    LoadRoster { team: String, seq: u64 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TeamsLoaded { result: Result<Vec<PlayerRecord>, FetchFailed> },
    RosterLoaded { team: String, seq: u64, result: Result<Vec<PlayerRecord>, FetchFailed> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
