//! Player population loaded from a TOML fixture.
//!
//! ```toml
//! [[entity]]
//! name = "Steve"
//! position = [10.0, 64.0, 10.0]
//! gamemode = "creative"
//! level = 30
//! team = "red"
//! tags = ["vip"]
//!
//! [objectives.kills]
//! Steve = 3
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use mc_rs_selector::{EntitySource, GameMode, Position, Scoreboard, SelectorError};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct PopulationFile {
    #[serde(default, rename = "entity")]
    entities: Vec<EntityEntry>,
    #[serde(default)]
    objectives: HashMap<String, HashMap<String, i32>>,
}

#[derive(Debug, Deserialize)]
struct EntityEntry {
    name: String,
    position: [f64; 3],
    #[serde(default = "default_gamemode")]
    gamemode: String,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default = "default_online")]
    online: bool,
}

fn default_gamemode() -> String {
    "survival".into()
}

fn default_online() -> bool {
    true
}

/// A player known to the console.
#[derive(Debug, Clone)]
pub struct Player {
    pub runtime_id: u64,
    pub name: String,
    pub position: Position,
    pub game_mode: GameMode,
    pub level: i32,
    pub team: Option<String>,
    pub tags: HashSet<String>,
    pub online: bool,
}

/// Every player plus the scoreboard objectives, in file order.
pub struct Population {
    players: Vec<Player>,
    objectives: HashMap<String, HashMap<String, i32>>,
    spawn: Position,
}

impl Population {
    pub fn load<P: AsRef<Path>>(
        path: P,
        spawn: Position,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents, spawn)?)
    }

    pub fn parse(toml_content: &str, spawn: Position) -> Result<Self, toml::de::Error> {
        let file: PopulationFile = toml::from_str(toml_content)?;
        let mut players: Vec<Player> = Vec::with_capacity(file.entities.len());
        for (i, entry) in file.entities.into_iter().enumerate() {
            let folded = entry.name.to_lowercase();
            if players.iter().any(|p| p.name.to_lowercase() == folded) {
                warn!("Duplicate player name {:?}, name lookups will find the first", entry.name);
            }
            let game_mode = GameMode::from_name(&entry.gamemode).unwrap_or_else(|| {
                warn!(
                    "Unknown gamemode {:?} for {}, using survival",
                    entry.gamemode, entry.name
                );
                GameMode::Survival
            });
            let [x, y, z] = entry.position;
            players.push(Player {
                runtime_id: i as u64 + 1,
                name: entry.name,
                position: Position::new(x, y, z),
                game_mode,
                level: entry.level,
                team: entry.team,
                tags: entry.tags.into_iter().collect(),
                online: entry.online,
            });
        }
        Ok(Self {
            players,
            objectives: file.objectives,
            spawn,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn objective_count(&self) -> usize {
        self.objectives.len()
    }

    pub fn get(&self, runtime_id: u64) -> Option<&Player> {
        self.players.iter().find(|p| p.runtime_id == runtime_id)
    }

    /// Display names for a list of runtime IDs.
    pub fn names(&self, ids: &[u64]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.get(id).map(|p| p.name.clone()))
            .collect()
    }

    fn player(&self, runtime_id: u64) -> Option<&Player> {
        let player = self.get(runtime_id);
        if player.is_none() {
            warn!("Selector asked about unknown runtime id {runtime_id}");
        }
        player
    }
}

impl EntitySource for Population {
    type Entity = u64;

    fn entities(&self) -> Vec<u64> {
        self.players
            .iter()
            .filter(|p| p.online)
            .map(|p| p.runtime_id)
            .collect()
    }

    /// Case-insensitive, including non-ASCII letters.
    fn find_by_name(&self, name: &str) -> Option<u64> {
        let name = name.to_lowercase();
        self.players
            .iter()
            .find(|p| p.name.to_lowercase() == name)
            .map(|p| p.runtime_id)
    }

    fn is_online(&self, entity: &u64) -> bool {
        self.player(*entity).is_some_and(|p| p.online)
    }

    fn name_of(&self, entity: &u64) -> String {
        self.player(*entity)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn position_of(&self, entity: &u64) -> Position {
        self.player(*entity)
            .map(|p| p.position)
            .unwrap_or(self.spawn)
    }

    fn default_reference(&self, _entity: &u64) -> Position {
        self.spawn
    }

    fn game_mode_of(&self, entity: &u64) -> GameMode {
        self.player(*entity)
            .map(|p| p.game_mode)
            .unwrap_or(GameMode::Survival)
    }

    fn level_of(&self, entity: &u64) -> i32 {
        self.player(*entity).map_or(0, |p| p.level)
    }
}

impl Scoreboard<u64> for Population {
    fn team_of(&self, entity: &u64) -> Option<String> {
        self.player(*entity).and_then(|p| p.team.clone())
    }

    fn tags_of(&self, entity: &u64) -> HashSet<String> {
        self.player(*entity)
            .map(|p| p.tags.clone())
            .unwrap_or_default()
    }

    /// Players without an entry on an existing objective score 0.
    fn score(&self, objective: &str, entity: &u64) -> Result<i32, SelectorError> {
        let scores = self
            .objectives
            .get(objective)
            .ok_or_else(|| SelectorError::ObjectiveNotFound(objective.to_string()))?;
        let name = self.name_of(entity);
        Ok(scores.get(&name).copied().unwrap_or(0))
    }
}
