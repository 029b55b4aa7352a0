//! Token classification: `@s`, `@r`, `@a`/`@e`, `@p`, `@x[...]` or a literal name.

use crate::condition::Condition;
use crate::error::SelectorError;

/// The marker in front of a bracketed argument list; decides how matches are picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorBase {
    /// `@p` — the single nearest match, never the executor.
    Nearest,
    /// `@r` — one match picked uniformly at random.
    Random,
    /// `@a` — every match.
    All,
    /// `@e` — every match (the population only holds players).
    AllEntities,
    /// `@s` — the executor, if it matches.
    Sender,
}

impl SelectorBase {
    pub const ALL: [SelectorBase; 5] = [
        SelectorBase::Nearest,
        SelectorBase::Random,
        SelectorBase::All,
        SelectorBase::AllEntities,
        SelectorBase::Sender,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            SelectorBase::Nearest => "@p",
            SelectorBase::Random => "@r",
            SelectorBase::All => "@a",
            SelectorBase::AllEntities => "@e",
            SelectorBase::Sender => "@s",
        }
    }
}

/// What a single token asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorKind<'a> {
    /// `@s`
    Sender,
    /// `@r`
    RandomAny,
    /// `@a` or `@e`
    BareAll,
    /// Anything that is not a selector: an entity identifier.
    DirectName(&'a str),
    /// `@p`, or any base marker followed by `[...]`.
    Filtered {
        base: SelectorBase,
        conditions: Vec<Condition>,
    },
}

impl<'a> SelectorKind<'a> {
    /// Classify a token, parsing its argument list if it has one.
    pub fn classify(token: &'a str) -> Result<Self, SelectorError> {
        match token {
            "@s" => return Ok(SelectorKind::Sender),
            "@r" => return Ok(SelectorKind::RandomAny),
            "@a" | "@e" => return Ok(SelectorKind::BareAll),
            "@p" => {
                return Ok(SelectorKind::Filtered {
                    base: SelectorBase::Nearest,
                    conditions: Vec::new(),
                })
            }
            _ => {}
        }

        for base in SelectorBase::ALL {
            let Some(args) = token
                .strip_prefix(base.marker())
                .and_then(|rest| rest.strip_prefix('['))
            else {
                continue;
            };
            let args = args
                .strip_suffix(']')
                .ok_or(SelectorError::UnterminatedArguments)?;
            return Ok(SelectorKind::Filtered {
                base,
                conditions: Condition::parse_list(args)?,
            });
        }

        Ok(SelectorKind::DirectName(token))
    }
}
