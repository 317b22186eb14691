// ============================================================================
// APP SETTINGS — persisted UI preferences (key=value .cfg file)
// ============================================================================

use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Persisted UI preferences. Pixel data is never stored here; the settings
/// file only remembers how the user likes the tool set up between sessions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppSettings {
    /// Theme mode (Light or Dark)
    pub theme_mode: ThemeMode,
    /// Directory of the most recently opened image
    pub last_open_dir: Option<PathBuf>,
    /// Directory of the most recently saved image
    pub last_save_dir: Option<PathBuf>,
}

impl AppSettings {
    /// Path to the settings file.
    /// On Linux:   ~/.config/filterfe/filterfe_settings.cfg  (XDG_CONFIG_HOME respected)
    /// On Windows: %APPDATA%\FilterFE\filterfe_settings.cfg
    /// On macOS:   ~/Library/Application Support/FilterFE/filterfe_settings.cfg
    pub(crate) fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
                    PathBuf::from(home).join(".config")
                })
                .join("filterfe");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("filterfe_settings.cfg"));
        }
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA")
                .or_else(|_| std::env::var("USERPROFILE"))
                .ok()?;
            let config_dir = PathBuf::from(appdata).join("FilterFE");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("filterfe_settings.cfg"));
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            let config_dir = PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("FilterFE");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("filterfe_settings.cfg"));
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join("filterfe_settings.cfg")))
        }
    }

    /// Save settings to disk. Failures are ignored — preferences are not
    /// worth interrupting the user over.
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else {
            return;
        };
        let _ = std::fs::write(path, self.to_config_string());
    }

    /// Load settings from disk (returns defaults if file missing or corrupt).
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        Self::from_config_string(&content)
    }

    fn to_config_string(&self) -> String {
        let mode_str = match self.theme_mode {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        let open_dir = self
            .last_open_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let save_dir = self
            .last_save_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        format!(
            "theme_mode={mode_str}\n\
             last_open_dir={open_dir}\n\
             last_save_dir={save_dir}\n"
        )
    }

    fn from_config_string(content: &str) -> Self {
        let mut settings = Self::default();
        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "theme_mode" => {
                    settings.theme_mode = match value {
                        "dark" => ThemeMode::Dark,
                        _ => ThemeMode::Light,
                    };
                }
                "last_open_dir" if !value.is_empty() => {
                    settings.last_open_dir = Some(PathBuf::from(value));
                }
                "last_save_dir" if !value.is_empty() => {
                    settings.last_save_dir = Some(PathBuf::from(value));
                }
                _ => {}
            }
        }
        settings
    }
}
