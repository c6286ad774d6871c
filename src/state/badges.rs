use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_BADGE: &str = "⚽";

const PREMIER_LEAGUE_BADGES: [(&str, &str); 20] = [
    ("Arsenal", "🔴"),
    ("Aston Villa", "🦁"),
    ("Bournemouth", "🍒"),
    ("Brentford", "🐝"),
    ("Brighton", "⚡"),
    ("Chelsea", "🔵"),
    ("Crystal Palace", "🦅"),
    ("Everton", "🔵"),
    ("Fulham", "⚪"),
    ("Leeds", "⚪"),
    ("Leicester City", "🦊"),
    ("Liverpool", "🔴"),
    ("Manchester City", "🌙"),
    ("Manchester United", "😈"),
    ("Newcastle United", "⚫"),
    ("Nottingham Forest", "🌳"),
    ("Southampton", "🔴"),
    ("Tottenham", "⚪"),
    ("West Ham", "⚒️"),
    ("Wolves", "🐺"),
];

/// Resolves a team name to the symbol shown next to it.
pub trait TeamBadges {
    /// Always returns something; unknown teams get the fallback symbol.
    fn badge(&self, team: &str) -> &str;
}

#[derive(Debug, Clone)]
pub struct BadgeTable {
    badges: HashMap<String, String>,
    fallback: String,
}

impl Default for BadgeTable {
    fn default() -> Self {
        Self {
            badges: PREMIER_LEAGUE_BADGES
                .iter()
                .map(|(team, badge)| (team.to_string(), badge.to_string()))
                .collect(),
            fallback: DEFAULT_BADGE.to_string(),
        }
    }
}

/// On-disk overlay: `{"fallback": "*", "teams": {"Ipswich": "🚜"}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BadgeFile {
    fallback: Option<String>,
    teams: HashMap<String, String>,
}

impl BadgeTable {
    pub fn new(badges: HashMap<String, String>, fallback: impl Into<String>) -> Self {
        Self { badges, fallback: fallback.into() }
    }

    /// Default table with entries from a JSON overlay file merged on top.
    pub fn with_overlay_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("read badges failed: {e}"))?;
        let overlay = serde_json::from_str::<BadgeFile>(&content)
            .map_err(|e| format!("parse badges failed: {e}"))?;

        let Self { mut badges, fallback } = Self::default();
        badges.extend(overlay.teams);
        let fallback = overlay.fallback.filter(|f| !f.is_empty()).unwrap_or(fallback);
        Ok(Self::new(badges, fallback))
    }
}

impl TeamBadges for BadgeTable {
    fn badge(&self, team: &str) -> &str {
        self.badges.get(team).map_or(self.fallback.as_str(), String::as_str)
    }
}
