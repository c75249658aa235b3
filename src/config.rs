use std::collections::HashMap;
use std::fs;
use std::sync::OnceLock;

use cross_xdg::BaseDirs;

use crate::theme::{parse_color, Palette};

const CONFIG_FILE: &str = "tri.toml";

/// Settings read from `$XDG_CONFIG_HOME/tri.toml`.
///
/// ```toml
/// [repl]
/// prompt = "tri"
/// history = 500
///
/// [limits]
/// max_steps = 10000000
/// timeout_ms = 2000
///
/// [colors]
/// bracket = "#cba6f7"
/// comment = "dark_gray"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub history_size: usize,
    pub max_steps: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub colors: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "tri".to_string(),
            history_size: 1_000,
            max_steps: None,
            timeout_ms: None,
            colors: Palette::default(),
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// The process-wide configuration, loaded once.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| load_from_file().unwrap_or_default())
}

fn load_from_file() -> Option<Config> {
    let base_dirs = BaseDirs::new().ok()?;
    let path = base_dirs.config_home().join(CONFIG_FILE);
    let content = fs::read_to_string(path).ok()?;
    Some(Config::from_toml_str(&content))
}

impl Config {
    /// Parse the small `[section]` / `key = value` subset the config file uses.
    /// Unknown sections, unknown keys and malformed values are ignored.
    pub fn from_toml_str(content: &str) -> Self {
        let entries = read_entries(content);
        let mut cfg = Config::default();

        let get = |section: &str, key: &str| entries.get(&(section.to_string(), key.to_string()));

        if let Some(v) = get("repl", "prompt") {
            cfg.prompt = v.clone();
        }
        if let Some(n) = get("repl", "history").and_then(|v| v.parse().ok()) {
            cfg.history_size = n;
        }
        cfg.max_steps = get("limits", "max_steps").and_then(|v| v.parse().ok());
        cfg.timeout_ms = get("limits", "timeout_ms").and_then(|v| v.parse().ok());

        macro_rules! color {
            ($field:ident) => {
                if let Some(c) = get("colors", stringify!($field)).and_then(|v| parse_color(v)) {
                    cfg.colors.$field = c;
                }
            };
        }

        color!(plus);
        color!(minus);
        color!(left);
        color!(right);
        color!(output);
        color!(input);
        color!(bracket);
        color!(comment);

        cfg
    }
}

/// Collect `(section, key) -> value` with surrounding quotes removed.
fn read_entries(content: &str) -> HashMap<(String, String), String> {
    let mut section = String::new();
    let mut entries = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = name.trim().to_string();
            continue;
        }
        let Some((key, raw)) = line.split_once('=') else {
            continue;
        };
        let raw = raw.trim();
        let value = raw
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(raw);
        entries.insert((section.clone(), key.trim().to_string()), value.to_string());
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use nu_ansi_term::Color;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml_str(""), Config::default());
    }

    #[test]
    fn reads_all_sections() {
        let cfg = Config::from_toml_str(
            r##"
            # comment
            [repl]
            prompt = "bf"
            history = 42

            [limits]
            max_steps = 1000
            timeout_ms = 250

            [colors]
            bracket = "#010203"
            plus = red
            "##,
        );
        assert_eq!(cfg.prompt, "bf");
        assert_eq!(cfg.history_size, 42);
        assert_eq!(cfg.max_steps, Some(1000));
        assert_eq!(cfg.timeout_ms, Some(250));
        assert_eq!(cfg.colors.bracket, Color::Rgb(1, 2, 3));
        assert_eq!(cfg.colors.plus, Color::Red);
        assert_eq!(cfg.colors.minus, Palette::default().minus);
    }

    #[test]
    fn keys_are_scoped_to_their_section() {
        let cfg = Config::from_toml_str("[colors]\nprompt = \"nope\"\n[other]\nmax_steps = 3\n");
        assert_eq!(cfg.prompt, "tri");
        assert_eq!(cfg.max_steps, None);
    }

    #[test]
    fn malformed_values_are_ignored() {
        let cfg = Config::from_toml_str("[repl]\nhistory = lots\n[colors]\nplus = \"#zz\"\nno equals sign\n");
        assert_eq!(cfg.history_size, 1_000);
        assert_eq!(cfg.colors.plus, Palette::default().plus);
    }
}
