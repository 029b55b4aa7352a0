use mc_rs_selector::Position;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub console: ConsoleSection,
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct ConsoleSection {
    /// Name of the player that `@s`, `@p` and `distance` are relative to.
    #[serde(default)]
    pub executor: Option<String>,
    /// Fixed seed for `@r`. Absent = seeded from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub output: OutputFormat,
    /// Population fixture, relative to the config file.
    #[serde(default = "default_population")]
    pub population: String,
}

fn default_population() -> String {
    "population.toml".into()
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            executor: None,
            seed: None,
            output: OutputFormat::Text,
            population: default_population(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    /// Fallback reference point when no executor is set.
    #[serde(default = "default_spawn")]
    pub spawn: [f64; 3],
}

fn default_spawn() -> [f64; 3] {
    [0.0, 64.0, 0.0]
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            spawn: default_spawn(),
        }
    }
}

impl WorldSection {
    pub fn spawn_position(&self) -> Position {
        let [x, y, z] = self.spawn;
        Position::new(x, y, z)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl ConsoleConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
