//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent)

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// User settings. Game rules are fixed and not part of this file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub start: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if let [key] = keys {
        serializer.serialize_str(key)
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            soft_drop: vec!["Down".to_string()],
            hard_drop: vec!["Space".to_string()],
            rotate: vec!["Up".to_string()],
            start: vec!["Enter".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
        }
    }
}

impl VisualSettings {
    /// Get the block characters (filled, empty) based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", " ."),
            "round" => ("()", " ."),
            _ => ("██", "  "), // "solid" or default
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or create default
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("No config directory, using default settings");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`. Defaults are written only when the file
    /// does not exist yet; an unreadable file is left untouched.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, writing defaults", path.display());
                let defaults = Self::default();
                if let Err(e) = defaults.save_to(path) {
                    tracing::warn!("Could not write default settings: {}", e);
                }
                defaults
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read settings at {} ({}), using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Parse settings text, falling back to defaults if it is malformed
    pub fn parse(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|e| {
            tracing::warn!("Invalid settings file, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save settings to the platform settings file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = Self::settings_path() else {
            return Err("Could not determine settings path".to_string());
        };
        self.save_to(&path)
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Create directory if needed
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }

        // Serialize and write
        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Settings::parse(""), Settings::default());
    }

    #[test]
    fn test_single_key_or_list() {
        let settings = Settings::parse(
            r#"
            [keys]
            rotate = "x"
            hard_drop = ["Space", "w"]
            "#,
        );
        assert_eq!(settings.keys.rotate, vec!["x"]);
        assert_eq!(settings.keys.hard_drop, vec!["Space", "w"]);
        // Untouched fields keep their defaults
        assert_eq!(settings.keys.move_left, vec!["Left"]);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        assert_eq!(Settings::parse("keys = 3"), Settings::default());
    }

    #[test]
    fn test_serialized_defaults_parse_back() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(text.contains("rotate = \"Up\""));
        assert_eq!(Settings::parse(&text), Settings::default());
    }

    /// Fresh scratch directory under the system temp dir
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("blockfall-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let path = scratch_dir("missing").join("settings.toml");
        assert_eq!(Settings::load_from(&path), Settings::default());
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(Settings::parse(&written), Settings::default());
    }

    #[test]
    fn test_existing_file_is_loaded() {
        let dir = scratch_dir("existing");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        fs::write(&path, "[keys]\nrotate = \"x\"\n").unwrap();
        assert_eq!(Settings::load_from(&path).keys.rotate, vec!["x"]);
    }

    #[test]
    fn test_unreadable_file_is_not_overwritten() {
        let dir = scratch_dir("not-utf8");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        let original: &[u8] = b"[keys]\nrotate = \"x\"\n# caf\xe9\n";
        fs::write(&path, original).unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_block_chars() {
        let mut visual = VisualSettings::default();
        assert_eq!(visual.block_chars().0, "██");
        visual.block_style = "bracket".to_string();
        assert_eq!(visual.block_chars(), ("[]", " ."));
    }
}
