use crate::heatmap::color::Theme;
use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/preferences.json";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub api_url: String,
    pub api_token: Option<String>,
    pub theme: Theme,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let api_url = lookup("HABIT_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_token = lookup("HABIT_API_TOKEN").filter(|token| !token.trim().is_empty());
        let theme = match lookup("HABIT_VIEW_THEME") {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown theme, using light");
                Theme::default()
            }),
            None => Theme::default(),
        };

        Self {
            port,
            data_path,
            api_url,
            api_token,
            theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/preferences.json"));
        assert_eq!(config.api_url, "http://127.0.0.1:3000");
        assert_eq!(config.api_token, None);
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config(&[("PORT", "http"), ("HABIT_VIEW_THEME", "neon"), ("HABIT_API_TOKEN", " ")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn explicit_values_win() {
        let config = config(&[
            ("PORT", "9000"),
            ("APP_DATA_PATH", "/tmp/prefs.json"),
            ("HABIT_API_URL", "http://habits.local"),
            ("HABIT_API_TOKEN", "secret"),
            ("HABIT_VIEW_THEME", "dark"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.api_url, "http://habits.local");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.theme, Theme::Dark);
    }
}
