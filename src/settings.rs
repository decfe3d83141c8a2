//! Presentation preferences
//!
//! Persisted in LocalStorage on web. Nothing here affects the simulation.

use serde::{Deserialize, Serialize};

/// HUD and display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the session best time next to the clock
    pub show_best_time: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: false,
            show_best_time: true,
            high_contrast: false,
        }
    }
}

/// Display toggles bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Fps,
    BestTime,
    HighContrast,
}

impl Toggle {
    /// Map a DOM `KeyboardEvent.code` to a toggle
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyF" => Some(Toggle::Fps),
            "KeyB" => Some(Toggle::BestTime),
            "KeyH" => Some(Toggle::HighContrast),
            _ => None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "spring_runner_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Flip one preference. Returns the new value.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::Fps => &mut self.show_fps,
            Toggle::BestTime => &mut self.show_best_time,
            Toggle::HighContrast => &mut self.high_contrast,
        };
        *flag = !*flag;
        *flag
    }

    /// Parse stored settings, falling back to defaults on bad data
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let settings = Settings {
            show_fps: true,
            show_best_time: false,
            high_contrast: true,
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{"show_fps": true}"#).unwrap();
        assert!(settings.show_fps);
        assert!(settings.show_best_time);
        assert!(!settings.high_contrast);
    }

    #[test]
    fn test_toggle_flips_one_flag() {
        let mut settings = Settings::default();
        assert!(settings.toggle(Toggle::Fps));
        assert!(settings.show_fps);
        assert!(settings.show_best_time);
        assert!(!settings.high_contrast);

        assert!(!settings.toggle(Toggle::BestTime));
        assert!(settings.toggle(Toggle::HighContrast));
        assert!(!settings.toggle(Toggle::Fps));

        let stored = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(stored, settings);
    }

    #[test]
    fn test_toggle_keys() {
        assert_eq!(Toggle::from_key_code("KeyF"), Some(Toggle::Fps));
        assert_eq!(Toggle::from_key_code("KeyB"), Some(Toggle::BestTime));
        assert_eq!(Toggle::from_key_code("KeyH"), Some(Toggle::HighContrast));
        assert_eq!(Toggle::from_key_code("KeyR"), None);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }
}
