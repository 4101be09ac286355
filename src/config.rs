use std::time::Duration;

use tracing::level_filters::LevelFilter;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub posts_key: String,
    pub session_cookie: String,
    pub session_days: i64,
    pub reaction_highlight: Duration,
    pub log_level: LevelFilter,
    pub root_element_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_key: "posts".to_string(),
            session_cookie: "username".to_string(),
            session_days: 7,
            reaction_highlight: Duration::from_millis(200),
            log_level: LevelFilter::INFO,
            root_element_id: "root".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by variables captured when the bundle was built.
    /// The browser has no process environment, so this reads `option_env!`.
    pub fn from_env() -> Self {
        Self::from_vars(|name| match name {
            "NEWSFEED_POSTS_KEY" => option_env!("NEWSFEED_POSTS_KEY"),
            "NEWSFEED_SESSION_COOKIE" => option_env!("NEWSFEED_SESSION_COOKIE"),
            "NEWSFEED_SESSION_DAYS" => option_env!("NEWSFEED_SESSION_DAYS"),
            "NEWSFEED_LOG_LEVEL" => option_env!("NEWSFEED_LOG_LEVEL"),
            _ => None,
        })
    }

    pub fn from_vars<'a>(var: impl Fn(&str) -> Option<&'a str>) -> Self {
        let defaults = Self::default();
        Self {
            posts_key: var("NEWSFEED_POSTS_KEY")
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.posts_key),
            session_cookie: var("NEWSFEED_SESSION_COOKIE")
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.session_cookie),
            session_days: var("NEWSFEED_SESSION_DAYS")
                .and_then(|v| v.parse().ok())
                .filter(|days: &i64| *days > 0)
                .unwrap_or(defaults.session_days),
            log_level: var("NEWSFEED_LOG_LEVEL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_level),
            ..defaults
        }
    }

    pub fn session_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.session_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_wire_names() {
        let config = Config::default();
        assert_eq!(config.posts_key, "posts");
        assert_eq!(config.session_cookie, "username");
        assert_eq!(config.session_lifetime(), chrono::Duration::days(7));
        assert_eq!(config.reaction_highlight, Duration::from_millis(200));
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let config = Config::from_vars(|name| match name {
            "NEWSFEED_POSTS_KEY" => Some("feed"),
            "NEWSFEED_SESSION_DAYS" => Some("-3"),
            "NEWSFEED_LOG_LEVEL" => Some("debug"),
            _ => None,
        });
        assert_eq!(config.posts_key, "feed");
        assert_eq!(config.session_cookie, "username");
        assert_eq!(config.session_days, 7);
        assert_eq!(config.log_level, LevelFilter::DEBUG);
    }
}
