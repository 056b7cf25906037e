use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "wrap-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";
const LOG_FILE_NAME: &str = "wrap-snake.log";

/// Default number of cells per grid row and column.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest grid that still fits the three-segment starting body with room to turn.
pub const MIN_GRID_SIZE: u16 = 5;

pub const MAX_GRID_SIZE: u16 = 200;

/// Default side length of one cell in surface pixels.
pub const DEFAULT_CELL_SIZE: u16 = 2;

pub const MAX_CELL_SIZE: u16 = 16;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Number of segments in a freshly reset snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Upper half-block glyph used to pack two pixel rows into one terminal row.
pub const GLYPH_HALF_UPPER: &str = "▀";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `size` cells per side.
    #[must_use]
    pub fn square(size: u16) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Colors applied to the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub food: Color,
    pub snake_head: Color,
    pub snake_eye: Color,
    pub snake_body: Color,
    /// Faint frame stroked around the board.
    pub border: Color,
    pub hud_score: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Dark board with a green snake and red food.
pub const THEME_DEFAULT: Theme = Theme {
    background: Color::Rgb(0x0b, 0x0b, 0x0c),
    food: Color::Rgb(0xef, 0x44, 0x44),
    snake_head: Color::Rgb(0x16, 0xa3, 0x4a),
    snake_eye: Color::Rgb(0x05, 0x25, 0x0a),
    snake_body: Color::Rgb(0x05, 0x96, 0x69),
    border: Color::Rgb(0x10, 0x10, 0x11),
    hud_score: Color::White,
    menu_title: Color::Rgb(0x16, 0xa3, 0x4a),
    menu_footer: Color::DarkGray,
};

/// Fully resolved settings for one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub cell_size: u16,
    pub tick_interval: Duration,
    /// Fixed food-placement seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::square(DEFAULT_GRID_SIZE),
            cell_size: DEFAULT_CELL_SIZE,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            seed: None,
        }
    }
}

/// Optional overrides, read from the settings file or from the command line.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub grid_size: Option<u16>,
    pub cell_size: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl Settings {
    /// Layers `overrides` on top of `self`; values present in `overrides` win.
    #[must_use]
    pub fn merged_with(self, overrides: Settings) -> Self {
        Self {
            grid_size: overrides.grid_size.or(self.grid_size),
            cell_size: overrides.cell_size.or(self.cell_size),
            tick_interval_ms: overrides.tick_interval_ms.or(self.tick_interval_ms),
            seed: overrides.seed.or(self.seed),
        }
    }

    /// Fills unset values with defaults and validates the result.
    pub fn resolve(self) -> Result<GameConfig, ConfigError> {
        let defaults = GameConfig::default();

        let grid_size = self.grid_size.unwrap_or(defaults.grid.width);
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
            return Err(ConfigError::GridSize(grid_size));
        }

        let cell_size = self.cell_size.unwrap_or(defaults.cell_size);
        if !(1..=MAX_CELL_SIZE).contains(&cell_size) {
            return Err(ConfigError::CellSize(cell_size));
        }

        let tick_ms = self.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS);
        if tick_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::TickInterval(tick_ms));
        }

        Ok(GameConfig {
            grid: GridSize::square(grid_size),
            cell_size,
            tick_interval: Duration::from_millis(tick_ms),
            seed: self.seed,
        })
    }
}

/// Returns the platform-correct default settings path.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

/// Loads settings from an explicitly named file. A missing file is an error.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_settings(path, &raw)
}

/// Loads settings from the default location.
///
/// Returns default settings when the file does not exist yet.
pub fn load_default_settings() -> Result<Settings, ConfigError> {
    let Some(path) = default_settings_path() else {
        return Ok(Settings::default());
    };

    match fs::read_to_string(&path) {
        Ok(raw) => parse_settings(&path, &raw),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(source) => Err(ConfigError::Read { path, source }),
    }
}

fn parse_settings(path: &Path, raw: &str) -> Result<Settings, ConfigError> {
    serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{load_settings, parse_settings, GameConfig, GridSize, Settings};
    use crate::error::ConfigError;

    #[test]
    fn empty_settings_resolve_to_defaults() {
        let config = Settings::default()
            .resolve()
            .expect("defaults should be valid");

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.grid, GridSize::square(20));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn overrides_take_precedence_over_file_values() {
        let file = Settings {
            grid_size: Some(30),
            cell_size: Some(4),
            tick_interval_ms: None,
            seed: Some(1),
        };
        let cli = Settings {
            grid_size: Some(12),
            tick_interval_ms: Some(150),
            ..Settings::default()
        };

        let merged = file.merged_with(cli);

        assert_eq!(merged.grid_size, Some(12));
        assert_eq!(merged.cell_size, Some(4));
        assert_eq!(merged.tick_interval_ms, Some(150));
        assert_eq!(merged.seed, Some(1));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let tiny_grid = Settings {
            grid_size: Some(4),
            ..Settings::default()
        };
        assert!(matches!(tiny_grid.resolve(), Err(ConfigError::GridSize(4))));

        let zero_cell = Settings {
            cell_size: Some(0),
            ..Settings::default()
        };
        assert!(matches!(zero_cell.resolve(), Err(ConfigError::CellSize(0))));

        let fast_tick = Settings {
            tick_interval_ms: Some(5),
            ..Settings::default()
        };
        assert!(matches!(
            fast_tick.resolve(),
            Err(ConfigError::TickInterval(5))
        ));
    }

    #[test]
    fn settings_json_is_parsed() {
        let settings = parse_settings(
            Path::new("inline.json"),
            r#"{ "grid_size": 24, "tick_interval_ms": 80 }"#,
        )
        .expect("valid json should parse");

        assert_eq!(settings.grid_size, Some(24));
        assert_eq!(settings.tick_interval_ms, Some(80));
        assert_eq!(settings.cell_size, None);
    }

    #[test]
    fn unknown_settings_keys_are_rejected() {
        let result = parse_settings(Path::new("inline.json"), r#"{ "speed": 3 }"#);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn explicit_settings_file_round_trips_from_disk() {
        let path = unique_test_path("explicit");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, r#"{ "seed": 99 }"#).expect("test file write should succeed");

        let settings = load_settings(&path).expect("load should succeed");
        assert_eq!(settings.seed, Some(99));

        cleanup_test_path(&path);
    }

    #[test]
    fn missing_explicit_settings_file_is_an_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            load_settings(&path),
            Err(ConfigError::Read { .. })
        ));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("wrap-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
