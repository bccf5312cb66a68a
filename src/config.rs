//! Settings resolved from `gitli.*` git configuration keys.
//!
//! Every lookup goes through [`ConfigSource`], which can only answer "value" or
//! "unset". A failed lookup always resolves to the documented default.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::query;
use crate::store::cursor::IdScheme;

pub const COLOR: &str = "gitli.color";
pub const LIST_OPTION: &str = "gitli.list.option";
pub const PATH: &str = "gitli.path";
pub const TEAM_ACTIVE: &str = "gitli.team.active";
pub const TEAM_USER: &str = "gitli.team.user";
pub const LOG_FORMAT: &str = "gitli.log.format";
pub const USER_NAME: &str = "user.name";

/// Key/value lookup over an external configuration service.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory configuration, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigSource for StaticConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// `gitli.color`: `auto` defers to terminal detection, `on`/`true` forces color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Never,
    Auto,
    Always,
}

impl ColorMode {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("auto") => Self::Auto,
            Some("on" | "true" | "always") => Self::Always,
            _ => Self::Never,
        }
    }

    pub fn enabled(self) -> bool {
        self != Self::Never
    }
}

/// How `show` renders commits that reference an issue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CommitStyle {
    #[default]
    Oneline,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub color: ColorMode,
    pub default_filter: String,
    pub store_path: Option<PathBuf>,
    pub id_scheme: IdScheme,
    pub commit_style: CommitStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: ColorMode::Never,
            default_filter: query::ALL.to_string(),
            store_path: None,
            id_scheme: IdScheme::Simple,
            commit_style: CommitStyle::Oneline,
        }
    }
}

fn lookup(source: &dyn ConfigSource, key: &str) -> Option<String> {
    let value = source
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    debug!(key, value = ?value, "config lookup");
    value
}

fn is_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "on" | "true" | "yes" | "1"
        )
    })
}

/// Login name of the invoking user, from the environment or git `user.name`.
pub fn login_name(source: &dyn ConfigSource) -> Option<String> {
    ["USER", "LOGNAME", "USERNAME"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .or_else(|| lookup(source, USER_NAME))
}

/// Team prefix: the configured user, else the first character of the login name.
pub fn team_prefix(source: &dyn ConfigSource) -> String {
    lookup(source, TEAM_USER)
        .or_else(|| {
            login_name(source).and_then(|name| name.chars().next().map(String::from))
        })
        .unwrap_or_else(|| "u".to_string())
}

impl Settings {
    pub fn resolve(source: &dyn ConfigSource) -> Self {
        let id_scheme = if is_enabled(lookup(source, TEAM_ACTIVE).as_deref()) {
            IdScheme::Prefixed(team_prefix(source))
        } else {
            IdScheme::Simple
        };
        let commit_style = match lookup(source, LOG_FORMAT).map(|v| v.to_lowercase()) {
            Some(v) if v == "full" || v == "medium" => CommitStyle::Full,
            _ => CommitStyle::Oneline,
        };
        Self {
            color: ColorMode::parse(lookup(source, COLOR).as_deref()),
            default_filter: lookup(source, LIST_OPTION)
                .map(|v| v.to_lowercase())
                .unwrap_or_else(|| query::ALL.to_string()),
            store_path: lookup(source, PATH).map(PathBuf::from),
            id_scheme,
            commit_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        assert_eq!(Settings::resolve(&StaticConfig::new()), Settings::default());
    }

    #[test]
    fn color_modes() {
        let mode = |value: &str| Settings::resolve(&StaticConfig::new().with(COLOR, value)).color;
        assert_eq!(mode("auto"), ColorMode::Auto);
        assert_eq!(mode("on"), ColorMode::Always);
        assert_eq!(mode("TRUE"), ColorMode::Always);
        assert_eq!(mode("off"), ColorMode::Never);
        assert!(!mode("nope").enabled());
    }

    #[test]
    fn default_filter_is_lowercased_and_blank_means_all() {
        let settings = Settings::resolve(&StaticConfig::new().with(LIST_OPTION, " Open "));
        assert_eq!(settings.default_filter, "open");
        let settings = Settings::resolve(&StaticConfig::new().with(LIST_OPTION, "   "));
        assert_eq!(settings.default_filter, "all");
    }

    #[test]
    fn team_mode_uses_configured_user() {
        let source = StaticConfig::new()
            .with(TEAM_ACTIVE, "on")
            .with(TEAM_USER, "bob");
        assert_eq!(
            Settings::resolve(&source).id_scheme,
            IdScheme::Prefixed("bob".into())
        );
    }

    #[test]
    fn team_user_without_active_flag_stays_simple() {
        let source = StaticConfig::new().with(TEAM_USER, "bob");
        assert_eq!(Settings::resolve(&source).id_scheme, IdScheme::Simple);
    }

    #[test]
    fn team_prefix_falls_back_to_a_single_character() {
        let prefix = team_prefix(&StaticConfig::new().with(USER_NAME, "Zed Example"));
        assert_eq!(prefix.chars().count(), 1);
    }

    #[test]
    fn store_path_and_commit_style() {
        let source = StaticConfig::new()
            .with(PATH, "/tmp/issues")
            .with(LOG_FORMAT, "Full");
        let settings = Settings::resolve(&source);
        assert_eq!(settings.store_path, Some(PathBuf::from("/tmp/issues")));
        assert_eq!(settings.commit_style, CommitStyle::Full);
    }
}
