//! Bracket arguments (`name=Steve`, `distance=..5`, `scores={kills=1..}`) and
//! the per-field matchers that evaluate them.

use tracing::debug;

use crate::error::SelectorError;
use crate::host::{EntitySource, Scoreboard};
use crate::range::{DistanceRange, IntRange, Range};
use crate::types::{Axis, GameMode, Position};

/// A `key=value` pair, split on the first `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCondition<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> RawCondition<'a> {
    /// Returns `None` when there is no `=`; such arguments are ignored.
    pub fn parse(text: &'a str) -> Option<Self> {
        let (key, value) = text.split_once('=')?;
        Some(Self {
            key: key.trim(),
            value: value.trim(),
        })
    }
}

/// Split an argument list on commas that are not nested inside `{}` or `[]`.
///
/// Brackets must pair up; a stray or mismatched one is an error rather than
/// swallowing the arguments after it.
pub fn split_arguments(text: &str) -> Result<Vec<&str>, SelectorError> {
    let unbalanced = || SelectorError::UnbalancedBrackets(text.to_string());
    let mut parts = Vec::new();
    let mut open = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '{' => open.push('}'),
            '[' => open.push(']'),
            '}' | ']' => {
                if open.pop() != Some(c) {
                    return Err(unbalanced());
                }
            }
            ',' if open.is_empty() => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if !open.is_empty() {
        return Err(unbalanced());
    }
    parts.push(&text[start..]);
    Ok(parts)
}

/// A parsed, recognized selector argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `name` is stored lowercased.
    Name { name: String, negated: bool },
    /// `None` when the mode name was not recognized; never matches.
    GameMode(Option<GameMode>),
    Distance(DistanceRange),
    Team { team: String, negated: bool },
    Tag { tag: String, negated: bool },
    Scores(Vec<(String, IntRange)>),
    Level(IntRange),
    Coordinate(Axis, IntRange),
}

fn negatable(value: &str) -> (String, bool) {
    match value.strip_prefix('!') {
        Some(rest) => (rest.to_string(), true),
        None => (value.to_string(), false),
    }
}

fn range<T: std::str::FromStr>(key: &str, value: &str) -> Result<Range<T>, SelectorError> {
    Range::parse(value).map_err(|source| SelectorError::InvalidArgument {
        key: key.to_string(),
        source,
    })
}

fn parse_scores(value: &str) -> Result<Vec<(String, IntRange)>, SelectorError> {
    let inner = value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .ok_or_else(|| SelectorError::MalformedScores(value.to_string()))?;

    let mut scores = Vec::new();
    for entry in split_arguments(inner)? {
        let Some((objective, bounds)) = entry.split_once('=') else {
            if !entry.trim().is_empty() {
                debug!("Ignoring score entry without '=': {entry:?}");
            }
            continue;
        };
        let objective = objective.trim();
        scores.push((objective.to_string(), range(objective, bounds)?));
    }
    Ok(scores)
}

impl Condition {
    /// Type-check a raw argument. Unknown keys yield `Ok(None)`.
    pub fn from_raw(raw: RawCondition<'_>) -> Result<Option<Self>, SelectorError> {
        let RawCondition { key, value } = raw;
        let condition = match key {
            "name" => {
                let (name, negated) = negatable(value);
                Condition::Name {
                    name: name.to_lowercase(),
                    negated,
                }
            }
            "gamemode" => {
                let mode = GameMode::from_name(value);
                if mode.is_none() {
                    debug!("Unknown gamemode {value:?}, condition will never match");
                }
                Condition::GameMode(mode)
            }
            "distance" => Condition::Distance(range(key, value)?),
            "team" => {
                let (team, negated) = negatable(value);
                Condition::Team { team, negated }
            }
            "tag" => {
                let (tag, negated) = negatable(value);
                Condition::Tag { tag, negated }
            }
            "scores" => Condition::Scores(parse_scores(value)?),
            "level" => Condition::Level(range(key, value)?),
            "x" => Condition::Coordinate(Axis::X, range(key, value)?),
            "y" => Condition::Coordinate(Axis::Y, range(key, value)?),
            "z" => Condition::Coordinate(Axis::Z, range(key, value)?),
            _ => {
                debug!("Ignoring unknown selector argument {key:?}");
                return Ok(None);
            }
        };
        Ok(Some(condition))
    }

    /// Parse the text between `[` and `]`.
    pub fn parse_list(text: &str) -> Result<Vec<Condition>, SelectorError> {
        let mut conditions = Vec::new();
        for part in split_arguments(text)? {
            let Some(raw) = RawCondition::parse(part) else {
                if !part.trim().is_empty() {
                    debug!("Ignoring selector argument without '=': {part:?}");
                }
                continue;
            };
            if let Some(condition) = Condition::from_raw(raw)? {
                conditions.push(condition);
            }
        }
        Ok(conditions)
    }

    /// Evaluate this condition against one candidate.
    ///
    /// Only `scores` can fail, when it names an objective that does not exist.
    pub fn matches<S, B>(
        &self,
        source: &S,
        scoreboard: &B,
        candidate: &S::Entity,
        reference: Position,
    ) -> Result<bool, SelectorError>
    where
        S: EntitySource,
        B: Scoreboard<S::Entity>,
    {
        let matched = match self {
            Condition::Name { name, negated } => {
                (source.name_of(candidate).to_lowercase() == *name) != *negated
            }
            Condition::GameMode(mode) => *mode == Some(source.game_mode_of(candidate)),
            Condition::Distance(range) => {
                range.contains(source.position_of(candidate).distance(&reference))
            }
            Condition::Team { team, negated } => {
                let on_team = scoreboard.team_of(candidate).as_deref() == Some(team.as_str());
                on_team != *negated
            }
            Condition::Tag { tag, negated } => {
                scoreboard.tags_of(candidate).contains(tag) != *negated
            }
            Condition::Scores(scores) => {
                for (objective, range) in scores {
                    if !range.contains(scoreboard.score(objective, candidate)?) {
                        return Ok(false);
                    }
                }
                true
            }
            Condition::Level(range) => range.contains(source.level_of(candidate)),
            Condition::Coordinate(axis, range) => {
                range.contains(source.position_of(candidate).block(*axis))
            }
        };
        Ok(matched)
    }
}
