use crate::PlayerRecord;
use crate::wire::{ApiPlayer, map_players};
use reqwest::Client;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1ap/player";

/// Anything that can hand out player listings. The terminal app only talks to
/// this seam, which keeps fetch ordering testable without a server.
pub trait PlayerSource: Clone + Send + Sync + 'static {
    /// The complete listing across every team.
    fn all_players(&self) -> impl Future<Output = ApiResult<Vec<PlayerRecord>>> + Send;

    /// One team's roster, in the order the source returns it.
    fn team_players(&self, team: &str) -> impl Future<Output = ApiResult<Vec<PlayerRecord>>> + Send;
}

/// Client for the player stats endpoint.
#[derive(Debug, Clone)]
pub struct PlApi {
    client: Client,
    base_url: String,
    snapshot: Option<PathBuf>,
    timeout: Duration,
}

impl Default for PlApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("pltui/0.1 (terminal squad viewer)")
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            snapshot: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl PlApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Serve every request from a local JSON snapshot instead of the network.
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every player the endpoint knows about.
    pub async fn fetch_players(&self) -> ApiResult<Vec<PlayerRecord>> {
        if let Some(path) = &self.snapshot {
            return load_snapshot(path);
        }
        self.get(&[]).await
    }

    /// Fetch one team's roster (`?team=`).
    pub async fn fetch_team_players(&self, team: &str) -> ApiResult<Vec<PlayerRecord>> {
        if let Some(path) = &self.snapshot {
            let mut players = load_snapshot(path)?;
            players.retain(|p| p.team == team);
            return Ok(players);
        }
        self.get(&[("team", team)]).await
    }

    async fn get(&self, query: &[(&str, &str)]) -> ApiResult<Vec<PlayerRecord>> {
        let url = &self.base_url;
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let raw = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<Vec<ApiPlayer>>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))?;
        Ok(map_players(raw))
    }
}

impl PlayerSource for PlApi {
    fn all_players(&self) -> impl Future<Output = ApiResult<Vec<PlayerRecord>>> + Send {
        self.fetch_players()
    }

    fn team_players(&self, team: &str) -> impl Future<Output = ApiResult<Vec<PlayerRecord>>> + Send {
        self.fetch_team_players(team)
    }
}

fn load_snapshot(path: &Path) -> ApiResult<Vec<PlayerRecord>> {
    let shown = path.display();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::NotFound(format!("could not read {shown}: {e}")))?;
    let raw: Vec<ApiPlayer> = serde_json::from_str(&content)
        .map_err(|e| ApiError::NotFound(format!("invalid player json at {shown}: {e}")))?;
    Ok(map_players(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PATH: &str = "/api/v1ap/player";

    fn api_for(server: &mockito::Server) -> PlApi {
        PlApi::with_base_url(format!("{}{PATH}", server.url()))
    }

    #[tokio::test]
    async fn fetch_players_maps_listing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"name":"Bukayo Saka","team":"Arsenal","pos":"FW","nation":"eng ENG","age":23,"gls":6},
                    {"name":"Cole Palmer","team":"Chelsea","pos":"MF","age":22.0,"gls":15.0}]"#,
            )
            .create_async()
            .await;

        let players = api_for(&server).fetch_players().await.unwrap();
        mock.assert_async().await;
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Bukayo Saka");
        assert_eq!(players[1].team, "Chelsea");
        assert_eq!(players[1].gls, Some(15));
        assert_eq!(players[1].nation, None);
    }

    #[tokio::test]
    async fn fetch_team_players_sends_encoded_team_param() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_query(Matcher::UrlEncoded("team".into(), "Aston Villa".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name":"Ollie Watkins","team":"Aston Villa","pos":"FW"}]"#)
            .create_async()
            .await;

        let players = api_for(&server).fetch_team_players("Aston Villa").await.unwrap();
        mock.assert_async().await;
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].team, "Aston Villa");
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", PATH).with_status(500).create_async().await;

        let err = api_for(&server).fetch_players().await.unwrap_err();
        assert!(matches!(err, ApiError::Api(..)), "got {err}");
    }

    #[tokio::test]
    async fn malformed_body_is_parsing_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"players": "nope"}"#)
            .create_async()
            .await;

        let err = api_for(&server).fetch_players().await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(..)), "got {err}");
    }

    #[tokio::test]
    async fn snapshot_serves_and_filters_by_team() {
        let path = std::env::temp_dir().join(format!("pl_api_snapshot_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"name":"A","team":"Fulham"},{"name":"B","team":"Wolves"},{"name":"C","team":"Fulham"},{"name":"D","team":"Fulham "}]"#,
        )
        .unwrap();

        let api = PlApi::new().with_snapshot(&path);
        assert_eq!(api.fetch_players().await.unwrap().len(), 4);
        let fulham = api.fetch_team_players("Fulham").await.unwrap();
        let names: Vec<_> = fulham.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);

        let padded = api.fetch_team_players("Fulham ").await.unwrap();
        assert_eq!(padded.len(), 1);
        assert_eq!(padded[0].name, "D");

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn missing_snapshot_is_not_found() {
        let api = PlApi::new().with_snapshot("/definitely/not/here.json");
        let err = api.fetch_players().await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
