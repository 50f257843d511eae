use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Engine tunables, persisted as JSON under the user data dir. Unknown or
/// missing fields fall back to defaults so old files keep loading.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineSettings {
    #[serde(default = "default_version")]
    version: u32,

    /// How long the achievement reveal stays on screen.
    #[serde(default = "default_reveal_duration")]
    pub reveal_duration_secs: f32,

    /// Pause between showing the summary panel and accepting player input,
    /// so the panel is visible before gameplay freezes.
    #[serde(default = "default_summary_hold")]
    pub summary_hold_secs: f32,

    /// Override for the progress-snapshot directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_version() -> u32 {
    1
}
fn default_reveal_duration() -> f32 {
    4.0
}
fn default_summary_hold() -> f32 {
    0.5
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            version: 1,
            reveal_duration_secs: 4.0,
            summary_hold_secs: 0.5,
            data_dir: None,
        }
    }
}

impl EngineSettings {
    pub fn load() -> Self {
        let path = Self::settings_path();
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(mut settings) = serde_json::from_str::<EngineSettings>(&contents) {
                settings.migrate();
                return settings;
            }
        }
        let default = EngineSettings::default();
        let _ = default.save();
        default
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = Self::settings_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        fs::write(path, contents)
    }

    fn settings_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        let mut path = data_dir.join("questkeeper");
        path.push("settings.json");
        path
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn reveal_duration(&self) -> Duration {
        Duration::from_secs_f32(self.reveal_duration_secs.max(0.0))
    }

    pub fn summary_hold(&self) -> Duration {
        Duration::from_secs_f32(self.summary_hold_secs.max(0.0))
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.reveal_duration(), Duration::from_secs(4));
        assert_eq!(settings.summary_hold(), Duration::from_secs_f32(0.5));
        assert!(settings.data_dir.is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: EngineSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.reveal_duration_secs, 4.0);
        assert_eq!(settings.summary_hold_secs, 0.5);
    }

    #[test]
    fn test_migrate_bumps_version_zero() {
        let mut settings: EngineSettings =
            serde_json::from_str(r#"{"version":0,"reveal_duration_secs":2.0}"#).unwrap();
        settings.migrate();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.reveal_duration_secs, 2.0);
    }

    #[test]
    fn test_negative_durations_clamp_to_zero() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{"summary_hold_secs":-1.0}"#).unwrap();
        assert_eq!(settings.summary_hold(), Duration::ZERO);
    }

    #[test]
    #[serial]
    fn test_is_debug_mode_reads_env() {
        std::env::set_var("DEBUG", "1");
        assert!(EngineSettings::is_debug_mode());
        std::env::set_var("DEBUG", "0");
        assert!(!EngineSettings::is_debug_mode());
        std::env::remove_var("DEBUG");
        assert!(!EngineSettings::is_debug_mode());
    }
}
