//! Game settings and preferences
//!
//! Read from the page URL query (`?quality=low&export=0`). Nothing is stored.

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Whether golden enemies get a shadow glow
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, level-up burst)
    pub particles: bool,
    /// Download the leaderboard listing on every game over
    pub export_on_game_over: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            export_on_game_over: true,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective glow (follows the preset)
    pub fn glow(&self) -> bool {
        self.quality.glow_enabled()
    }

    /// Build settings from a key lookup over URL query parameters.
    ///
    /// Unknown keys and unparseable values are ignored.
    pub fn from_params(param: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(value) = param("quality") {
            match QualityPreset::from_str(&value) {
                Some(preset) => settings.quality = preset,
                None => log::warn!("Unknown quality preset '{}'", value),
            }
        }
        if let Some(on) = param("particles").as_deref().and_then(parse_flag) {
            settings.particles = on;
        }
        if let Some(on) = param("export").as_deref().and_then(parse_flag) {
            settings.export_on_game_over = on;
        }

        settings
    }

    /// Parse a raw query string, with or without the leading `?`.
    ///
    /// The first occurrence of a key wins, as with `URLSearchParams.get`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(&str, &str)> = query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
            .collect();
        Self::from_params(|key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let params = crate::platform::search_params();
        let settings = Self::from_params(|key| params.as_ref().and_then(|p| p.get(key)));
        log::info!(
            "Settings: quality={}, particles={}, export={}",
            settings.quality.as_str(),
            settings.particles,
            settings.export_on_game_over
        );
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
