//! In-memory host used by the unit tests.

use std::collections::{HashMap, HashSet};

use crate::error::SelectorError;
use crate::host::{EntitySource, Scoreboard};
use crate::types::{GameMode, Position};

pub struct TestEntity {
    pub name: String,
    pub position: Position,
    pub spawn: Position,
    pub game_mode: GameMode,
    pub level: i32,
    pub team: Option<String>,
    pub tags: HashSet<String>,
    pub online: bool,
}

pub fn player(name: &str) -> TestEntity {
    TestEntity {
        name: name.to_string(),
        position: Position::default(),
        spawn: Position::default(),
        game_mode: GameMode::Survival,
        level: 0,
        team: None,
        tags: HashSet::new(),
        online: true,
    }
}

impl TestEntity {
    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Position::new(x, y, z);
        self
    }

    pub fn spawn(mut self, x: f64, y: f64, z: f64) -> Self {
        self.spawn = Position::new(x, y, z);
        self
    }

    pub fn gamemode(mut self, mode: GameMode) -> Self {
        self.game_mode = mode;
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }
}

/// Entities are addressed by their index in `entities`.
#[derive(Default)]
pub struct TestWorld {
    pub entities: Vec<TestEntity>,
    pub objectives: HashMap<String, HashMap<String, i32>>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entity: TestEntity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn objective(mut self, name: &str, scores: &[(&str, i32)]) -> Self {
        let scores = scores.iter().map(|(n, s)| (n.to_string(), *s)).collect();
        self.objectives.insert(name.to_string(), scores);
        self
    }

    pub fn names(&self, found: &[usize]) -> Vec<String> {
        found
            .iter()
            .map(|&i| self.entities[i].name.clone())
            .collect()
    }
}

impl EntitySource for TestWorld {
    type Entity = usize;

    fn entities(&self) -> Vec<usize> {
        (0..self.entities.len())
            .filter(|&i| self.entities[i].online)
            .collect()
    }

    fn find_by_name(&self, name: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.name == name)
    }

    fn is_online(&self, entity: &usize) -> bool {
        self.entities[*entity].online
    }

    fn name_of(&self, entity: &usize) -> String {
        self.entities[*entity].name.clone()
    }

    fn position_of(&self, entity: &usize) -> Position {
        self.entities[*entity].position
    }

    fn default_reference(&self, entity: &usize) -> Position {
        self.entities[*entity].spawn
    }

    fn game_mode_of(&self, entity: &usize) -> GameMode {
        self.entities[*entity].game_mode
    }

    fn level_of(&self, entity: &usize) -> i32 {
        self.entities[*entity].level
    }
}

impl Scoreboard<usize> for TestWorld {
    fn team_of(&self, entity: &usize) -> Option<String> {
        self.entities[*entity].team.clone()
    }

    fn tags_of(&self, entity: &usize) -> HashSet<String> {
        self.entities[*entity].tags.clone()
    }

    fn score(&self, objective: &str, entity: &usize) -> Result<i32, SelectorError> {
        let scores = self
            .objectives
            .get(objective)
            .ok_or_else(|| SelectorError::ObjectiveNotFound(objective.to_string()))?;
        Ok(scores
            .get(&self.entities[*entity].name)
            .copied()
            .unwrap_or(0))
    }
}
