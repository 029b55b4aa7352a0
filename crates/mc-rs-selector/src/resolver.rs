//! Resolve selector tokens to entities.

use rand::Rng;
use tracing::{debug, trace};

use crate::condition::Condition;
use crate::error::{ResolveError, SelectorError};
use crate::host::{EntitySource, Scoreboard};
use crate::kind::{SelectorBase, SelectorKind};
use crate::types::Position;

/// Resolves selector tokens against a host's entities and scoreboard.
///
/// Holds no state of its own; every call reads the host afresh.
pub struct Resolver<'a, S, B> {
    source: &'a S,
    scoreboard: &'a B,
}

impl<'a, S, B> Resolver<'a, S, B>
where
    S: EntitySource,
    B: Scoreboard<S::Entity>,
{
    pub fn new(source: &'a S, scoreboard: &'a B) -> Self {
        Self { source, scoreboard }
    }

    /// Resolve every token in order and concatenate the results.
    ///
    /// Tokens that find nothing contribute nothing; duplicates are kept. The
    /// first malformed token aborts the whole call.
    pub fn resolve<T, R>(
        &self,
        tokens: &[T],
        executor: Option<&S::Entity>,
        rng: &mut R,
    ) -> Result<Vec<S::Entity>, ResolveError>
    where
        T: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut found = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            let kind = SelectorKind::classify(token).map_err(|e| ResolveError::new(token, e))?;
            debug!("Resolving {token:?} as {kind:?}");
            self.resolve_kind(kind, executor, rng, &mut found)
                .map_err(|e| ResolveError::new(token, e))?;
        }
        Ok(found)
    }

    /// Point that `distance` and `@p` measure from for this candidate.
    pub fn reference_point(&self, candidate: &S::Entity, executor: Option<&S::Entity>) -> Position {
        match executor {
            Some(executor) => self.source.position_of(executor),
            None => self.source.default_reference(candidate),
        }
    }

    /// Whether `candidate` satisfies every condition.
    pub fn matches_conditions(
        &self,
        candidate: &S::Entity,
        conditions: &[Condition],
        reference: Position,
    ) -> Result<bool, SelectorError> {
        for condition in conditions {
            if !condition.matches(self.source, self.scoreboard, candidate, reference)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn resolve_kind<R: Rng + ?Sized>(
        &self,
        kind: SelectorKind<'_>,
        executor: Option<&S::Entity>,
        rng: &mut R,
        found: &mut Vec<S::Entity>,
    ) -> Result<(), SelectorError> {
        match kind {
            SelectorKind::Sender => found.extend(executor.cloned()),
            SelectorKind::RandomAny => {
                let mut all = self.source.entities();
                if !all.is_empty() {
                    found.push(all.swap_remove(rng.gen_range(0..all.len())));
                }
            }
            SelectorKind::BareAll => found.extend(self.source.entities()),
            SelectorKind::DirectName(name) => found.extend(
                self.source
                    .find_by_name(name)
                    .filter(|e| self.source.is_online(e)),
            ),
            SelectorKind::Filtered { base, conditions } => {
                self.resolve_filtered(base, &conditions, executor, rng, found)?
            }
        }
        Ok(())
    }

    fn resolve_filtered<R: Rng + ?Sized>(
        &self,
        base: SelectorBase,
        conditions: &[Condition],
        executor: Option<&S::Entity>,
        rng: &mut R,
        found: &mut Vec<S::Entity>,
    ) -> Result<(), SelectorError> {
        if base == SelectorBase::Sender {
            if let Some(executor) = executor {
                let reference = self.source.position_of(executor);
                if self.matches_conditions(executor, conditions, reference)? {
                    found.push(executor.clone());
                }
            }
            return Ok(());
        }

        let mut matches = Vec::new();
        for candidate in self.source.entities() {
            let reference = self.reference_point(&candidate, executor);
            let matched = self.matches_conditions(&candidate, conditions, reference)?;
            trace!(
                "{} {}",
                self.source.name_of(&candidate),
                if matched { "matches" } else { "rejected" }
            );
            if matched {
                matches.push((candidate, reference));
            }
        }

        match base {
            SelectorBase::Nearest => {
                let mut nearest: Option<(f64, S::Entity)> = None;
                for (candidate, reference) in matches {
                    if executor == Some(&candidate) {
                        continue;
                    }
                    let dist = self.source.position_of(&candidate).distance_squared(&reference);
                    // strict `<` keeps the earliest of equally distant candidates
                    if nearest.as_ref().map_or(true, |(best, _)| dist < *best) {
                        nearest = Some((dist, candidate));
                    }
                }
                found.extend(nearest.map(|(_, candidate)| candidate));
            }
            SelectorBase::Random => {
                if !matches.is_empty() {
                    let idx = rng.gen_range(0..matches.len());
                    found.push(matches.swap_remove(idx).0);
                }
            }
            SelectorBase::All | SelectorBase::AllEntities | SelectorBase::Sender => {
                found.extend(matches.into_iter().map(|(candidate, _)| candidate));
            }
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
