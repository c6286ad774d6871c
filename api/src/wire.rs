/// Wire types for the player endpoint.
/// Endpoint: `GET {base}` (all players) and `GET {base}?team={team}`.
use crate::PlayerRecord;
use serde::Deserialize;

/// Every field is optional on the wire. Numbers arrive as integers or as
/// doubles (`25.0`) depending on the backend's column types.
#[derive(Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct ApiPlayer {
    pub name: Option<String>,
    pub team: Option<String>,
    pub pos: Option<String>,
    pub nation: Option<String>,
    pub age: Option<f64>,
    pub gls: Option<f64>,
    pub mp: Option<f64>,
    pub min: Option<f64>,
    pub ast: Option<f64>,
    pub xg: Option<f64>,
    pub xag: Option<f64>,
    pub crdy: Option<f64>,
    pub crdr: Option<f64>,
}

impl From<ApiPlayer> for PlayerRecord {
    fn from(raw: ApiPlayer) -> Self {
        PlayerRecord {
            name: raw.name.unwrap_or_default(),
            team: raw.team.unwrap_or_default(),
            pos: non_blank(raw.pos),
            nation: non_blank(raw.nation),
            age: raw.age.and_then(count),
            gls: raw.gls.and_then(count),
            mp: raw.mp.and_then(count),
            min: raw.min.and_then(count),
            ast: raw.ast.and_then(count),
            xg: raw.xg.filter(|v| v.is_finite()),
            xag: raw.xag.filter(|v| v.is_finite()),
            crdy: raw.crdy.and_then(count),
            crdr: raw.crdr.and_then(count),
        }
    }
}

pub fn map_players(raw: Vec<ApiPlayer>) -> Vec<PlayerRecord> {
    raw.into_iter().map(PlayerRecord::from).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn count(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 {
        Some(value.round() as u32)
    } else {
        None
    }
}
