use log::LevelFilter;
use pl_api::client::DEFAULT_BASE_URL;
use std::path::PathBuf;

pub const ENV_API_URL: &str = "PLTUI_API_URL";
pub const ENV_PLAYERS_JSON: &str = "PLTUI_PLAYERS_JSON";
pub const ENV_BADGES: &str = "PLTUI_BADGES";
pub const ENV_LOG_LEVEL: &str = "PLTUI_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_url: String,
    pub players_json: Option<PathBuf>,
    pub badges_json: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_url: DEFAULT_BASE_URL.to_string(),
            players_json: None,
            badges_json: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            full_screen: false,
            log_level: value(ENV_LOG_LEVEL).and_then(|l| l.parse::<LevelFilter>().ok()),
            api_url: value(ENV_API_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            players_json: value(ENV_PLAYERS_JSON).map(PathBuf::from),
            badges_json: value(ENV_BADGES).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> AppSettings {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let s = settings_from(&[]);
        assert_eq!(s.api_url, DEFAULT_BASE_URL);
        assert_eq!(s.log_level, None);
        assert!(s.players_json.is_none());
        assert!(s.badges_json.is_none());
    }

    #[test]
    fn environment_overrides_are_read() {
        let s = settings_from(&[
            (ENV_API_URL, " http://stats.local/api/player "),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_PLAYERS_JSON, "/tmp/players.json"),
        ]);
        assert_eq!(s.api_url, "http://stats.local/api/player");
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.players_json, Some(PathBuf::from("/tmp/players.json")));
    }

    #[test]
    fn blank_and_invalid_values_are_ignored() {
        let s = settings_from(&[(ENV_API_URL, "   "), (ENV_LOG_LEVEL, "loud")]);
        assert_eq!(s.api_url, DEFAULT_BASE_URL);
        assert_eq!(s.log_level, None);
    }
}
