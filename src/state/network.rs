use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::roster::{FetchFailed, FetchScope};
use log::{debug, error};
use pl_api::PlayerRecord;
use pl_api::client::{ApiResult, PlayerSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, mpsc};

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Runs every request in its own task, so responses can come back in any
/// order. Roster responses carry the selection sequence they were issued
/// with; ordering is the store's concern.
pub struct NetworkWorker<S: PlayerSource> {
    source: S,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
    wake_spinner: Arc<Notify>,
}

impl<S: PlayerSource> NetworkWorker<S> {
    pub fn new(
        source: S,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            source,
            requests,
            responses,
            in_flight: Arc::new(AtomicUsize::new(0)),
            wake_spinner: Arc::new(Notify::new()),
        }
    }

    pub async fn run(mut self) {
        let spinner = tokio::spawn(spin_while_loading(
            self.responses.clone(),
            self.in_flight.clone(),
            self.wake_spinner.clone(),
        ));

        while let Some(request) = self.requests.recv().await {
            self.start_loading().await;

            let source = self.source.clone();
            let responses = self.responses.clone();
            let in_flight = self.in_flight.clone();
            tokio::spawn(async move {
                let response = handle_request(&source, request).await;
                debug!("network request complete");
                stop_loading(&responses, &in_flight, response_is_ok(&response)).await;

                if let Err(e) = responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }

        spinner.abort();
    }

    async fn start_loading(&self) {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.wake_spinner.notify_one();
            let loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
            let _ = self
                .responses
                .send(NetworkResponse::LoadingStateChanged { loading_state })
                .await;
        }
    }
}

async fn handle_request<S: PlayerSource>(source: &S, request: NetworkRequest) -> NetworkResponse {
    match request {
        NetworkRequest::LoadTeams => {
            debug!("loading full player listing");
            let result = coalesce(FetchScope::Teams, "player listing", source.all_players().await);
            NetworkResponse::TeamsLoaded { result }
        }
        NetworkRequest::LoadRoster { team, seq } => {
            debug!("loading roster for {team} (seq {seq})");
            let result = coalesce(FetchScope::Players, &team, source.team_players(&team).await);
            NetworkResponse::RosterLoaded { team, seq, result }
        }
    }
}

/// Fold transport errors, parse errors and empty listings into one failure.
fn coalesce(
    scope: FetchScope,
    subject: &str,
    result: ApiResult<Vec<PlayerRecord>>,
) -> Result<Vec<PlayerRecord>, FetchFailed> {
    match result {
        Ok(players) if players.is_empty() => {
            error!("{subject}: no players returned");
            Err(FetchFailed::new(scope, format!("{subject}: no players returned")))
        }
        Ok(players) => Ok(players),
        Err(e) => {
            error!("{} fetch failed for {subject}: {e}", scope.as_str());
            Err(FetchFailed::new(scope, format!("{subject}: {e}")))
        }
    }
}

fn response_is_ok(response: &NetworkResponse) -> bool {
    match response {
        NetworkResponse::TeamsLoaded { result } => result.is_ok(),
        NetworkResponse::RosterLoaded { result, .. } => result.is_ok(),
        NetworkResponse::LoadingStateChanged { .. } => true,
    }
}

/// Ticks the spinner while any request is in flight and parks on `wake`
/// otherwise.
async fn spin_while_loading(
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
    wake: Arc<Notify>,
) {
    let mut spinner_index = 1;
    loop {
        if in_flight.load(Ordering::SeqCst) == 0 {
            wake.notified().await;
            continue;
        }
        tokio::time::sleep(Duration::from_millis(33)).await;
        if in_flight.load(Ordering::SeqCst) == 0 {
            continue;
        }
        let loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[spinner_index] };
        spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
        if responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await
            .is_err()
        {
            break;
        }
    }
}

async fn stop_loading(responses: &mpsc::Sender<NetworkResponse>, in_flight: &AtomicUsize, is_ok: bool) {
    if in_flight.fetch_sub(1, Ordering::SeqCst) != 1 {
        return;
    }
    tokio::time::sleep(Duration::from_millis(15)).await;

    let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged {
            loading_state: LoadingState { is_loading: false, spinner_char },
        })
        .await;
}
