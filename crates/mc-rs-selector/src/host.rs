//! What the selector engine needs from the world it queries.
//!
//! The engine never owns entities: it works on cheap handles (`Entity`) and asks
//! the host for everything else. A host is expected to answer consistently for
//! the duration of one `resolve` call.

use std::collections::HashSet;

use crate::error::SelectorError;
use crate::types::{GameMode, Position};

/// The live entity population.
pub trait EntitySource {
    /// Handle to an entity. Equality is identity (used to exclude the executor).
    type Entity: Clone + PartialEq;

    /// Every currently known entity, in a stable enumeration order.
    fn entities(&self) -> Vec<Self::Entity>;

    /// Look up an entity by its exact identifier.
    fn find_by_name(&self, name: &str) -> Option<Self::Entity>;

    /// Whether the entity is currently active (connected, for players).
    fn is_online(&self, entity: &Self::Entity) -> bool;

    fn name_of(&self, entity: &Self::Entity) -> String;

    fn position_of(&self, entity: &Self::Entity) -> Position;

    /// Reference point used when a selector has no executor (world spawn).
    fn default_reference(&self, entity: &Self::Entity) -> Position;

    fn game_mode_of(&self, entity: &Self::Entity) -> GameMode;

    fn level_of(&self, entity: &Self::Entity) -> i32;
}

/// Teams, tags and objectives.
pub trait Scoreboard<E> {
    fn team_of(&self, entity: &E) -> Option<String>;

    fn tags_of(&self, entity: &E) -> HashSet<String>;

    /// Score of `entity` on `objective`.
    ///
    /// Must fail with [`SelectorError::ObjectiveNotFound`] when the objective
    /// does not exist.
    fn score(&self, objective: &str, entity: &E) -> Result<i32, SelectorError>;
}
