use crate::events::AppEvent;
use async_channel::Sender;
use circle_visualizer::animation::Animation;
use circle_visualizer::gradient::STOP_COUNT;
use circle_visualizer::{Gradient, LineCap, Settings, SettingsError};
use derive_more::{Deref, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::rgb::FromHexError;
use palette::{Srgb, Srgba};
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// An opaque sRGB color written as `#rrggbb` (or `#rgb`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        let c: Srgb<f64> = self.0.into_format();
        Srgba::new(c.red, c.green, c.blue, 1.0)
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

/// Overrides for the visualizer; anything left out keeps its default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisualizerConfig {
    pub line_count: Option<usize>,
    pub max_length: Option<f64>,
    pub line_width: Option<f64>,
    pub line_cap: Option<LineCap>,
    pub gradient: Option<Vec<HexColor>>,
}

impl VisualizerConfig {
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let defaults = Settings::default();
        let gradient = match &self.gradient {
            Some(stops) => {
                let stops: [HexColor; STOP_COUNT] = stops
                    .as_slice()
                    .try_into()
                    .map_err(|_| ConfigError::GradientStops(stops.len()))?;
                Gradient::new(stops.map(HexColor::to_srgba))
            }
            None => defaults.gradient,
        };

        let settings = Settings {
            line_count: self.line_count.unwrap_or(defaults.line_count),
            max_length: self.max_length.unwrap_or(defaults.max_length),
            line_width: self.line_width.unwrap_or(defaults.line_width),
            line_cap: self.line_cap.unwrap_or(defaults.line_cap),
            gradient,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub sweep_delay_ms: u64,
    pub animation_ms: u64,
    pub highlight: HexColor,
    pub reset_value: f64,
    pub reset_color: HexColor,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            sweep_delay_ms: 80,
            animation_ms: 300,
            highlight: HexColor::new(0x57, 0x9f, 0x2b),
            reset_value: 0.5,
            reset_color: HexColor::new(0xaa, 0xaa, 0xaa),
        }
    }
}

impl SampleConfig {
    pub fn sweep_delay(&self) -> Duration {
        Duration::from_millis(self.sweep_delay_ms)
    }

    pub fn animation(&self) -> Animation {
        Animation::Linear(Duration::from_millis(self.animation_ms))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub visualizer: VisualizerConfig,
    #[serde(default)]
    pub sample: SampleConfig,
}

impl Config {
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        self.visualizer.settings()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid visualizer settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("Expected 4 gradient colors, found {0}")]
    GradientStops(usize),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "circle-visualizer", "circle-sample")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads `path` (if it exists) plus `CIRCLE_SAMPLE_*` variables, and checks
/// that the result describes a valid visualizer.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_with_environment(path, environment())
}

/// `CIRCLE_SAMPLE_<SECTION>__<KEY>`, e.g. `CIRCLE_SAMPLE_VISUALIZER__LINE_COUNT`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("CIRCLE_SAMPLE")
        .prefix_separator("_")
        .separator("__")
}

fn load_with_environment(
    path: &Path,
    environment: config::Environment,
) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()).required(false))
        .add_source(environment)
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.settings()?;
    Ok(config)
}

pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config, {} is unusable: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_hex_color_deserialization() {
        let cases = vec![
            ("\"#ff5693\"", HexColor::new(0xff, 0x56, 0x93)),
            ("\"ff5693\"", HexColor::new(0xff, 0x56, 0x93)),
            ("\"#aaa\"", HexColor::new(0xaa, 0xaa, 0xaa)),
        ];

        for (json, expected) in cases {
            let deserialized: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<HexColor>("\"#zz0000\"").is_err());
    }

    #[test]
    fn test_hex_color_to_srgba() {
        let c = HexColor::new(0xff, 0x00, 0xaa).to_srgba();
        assert!((c.red - 1.0).abs() < EPSILON);
        assert!(c.green.abs() < EPSILON);
        assert!((c.blue - 0.6666666667).abs() < 1e-6);
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.settings().unwrap(), Settings::default());
        assert_eq!(config.sample.sweep_delay(), Duration::from_millis(80));
        assert_eq!(
            config.sample.animation(),
            Animation::Linear(Duration::from_millis(300))
        );
        assert_eq!(config.sample.reset_value, 0.5);
    }

    #[test]
    fn test_visualizer_overrides() {
        let json = r##"{
            "visualizer": {
                "line_count": 32,
                "line_cap": "square",
                "gradient": ["#000000", "#ffffff", "#ff0000", "#00ff00"]
            },
            "sample": { "sweep_delay_ms": 20 }
        }"##;
        let config: Config = serde_json::from_str(json).unwrap();
        let settings = config.settings().unwrap();

        assert_eq!(settings.line_count, 32);
        assert_eq!(settings.line_cap, LineCap::Square);
        assert_eq!(settings.max_length, 30.0);
        assert_eq!(settings.gradient.stop(1), Srgba::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(config.sample.sweep_delay_ms, 20);
        assert_eq!(config.sample.animation_ms, 300);
    }

    #[test]
    fn test_wrong_number_of_stops() {
        let json = r##"{ "visualizer": { "gradient": ["#000000", "#ffffff"] } }"##;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.settings(),
            Err(ConfigError::GradientStops(2))
        ));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let json = r#"{ "visualizer": { "line_count": 0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.settings(),
            Err(ConfigError::Settings(SettingsError::ZeroLineCount))
        ));
    }

    #[test]
    fn test_load_config_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("circle-sample-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(
            &path,
            "[visualizer]\nline_count = 12\nline_width = 1.5\n\n[sample]\nreset_color = \"#101010\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.line_count, 12);
        assert_eq!(settings.line_width, 1.5);
        assert_eq!(config.sample.reset_color, HexColor::new(0x10, 0x10, 0x10));

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = std::env::temp_dir().join(format!("circle-sample-env-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(&path, "[visualizer]\nline_count = 8\nline_width = 2.0\n").unwrap();

        let vars = config::Map::from([
            (
                "CIRCLE_SAMPLE_VISUALIZER__LINE_COUNT".to_string(),
                "12".to_string(),
            ),
            (
                "CIRCLE_SAMPLE_SAMPLE__SWEEP_DELAY_MS".to_string(),
                "20".to_string(),
            ),
            ("OTHER_APP_VISUALIZER__LINE_COUNT".to_string(), "99".to_string()),
        ]);
        let config = load_with_environment(&path, environment().source(Some(vars))).unwrap();
        let settings = config.settings().unwrap();

        assert_eq!(settings.line_count, 12);
        assert_eq!(settings.line_width, 2.0);
        assert_eq!(config.sample.sweep_delay_ms, 20);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bundled_default_config_matches_defaults() {
        let dir = std::env::temp_dir().join(format!("circle-sample-default-{}", std::process::id()));
        let path = write_default_config(&dir.join("config.toml")).unwrap();

        let config = load_config(&path).unwrap();
        let settings = config.settings().unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.line_count, defaults.line_count);
        assert_eq!(settings.line_cap, defaults.line_cap);
        for (loaded, expected) in settings.gradient.stops().iter().zip(defaults.gradient.stops()) {
            assert!((loaded.red - expected.red).abs() < 1e-2);
            assert!((loaded.green - expected.green).abs() < 1e-2);
            assert!((loaded.blue - expected.blue).abs() < 1e-2);
        }
        assert_eq!(config.sample.highlight, SampleConfig::default().highlight);

        fs_err::remove_dir_all(&dir).unwrap();
    }
}
