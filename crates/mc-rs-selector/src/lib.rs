//! Entity selector resolution: `@s`, `@a`, `@p`, `@r`, `@e`, bracket arguments
//! and literal names.
//!
//! ```text
//! @a[gamemode=survival,distance=..10]
//! @p[team=!red,scores={kills=1..,deaths=..3}]
//! ```
//!
//! Supported arguments: `name`, `gamemode`, `distance`, `team`, `tag`,
//! `scores`, `level`, `x`, `y`, `z`. Unknown arguments are ignored.
//!
//! The engine reads everything through [`EntitySource`] and [`Scoreboard`], and
//! takes its random source as a parameter, so it keeps no state between calls.

pub mod condition;
pub mod error;
pub mod host;
pub mod kind;
pub mod range;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod fixture;

pub use condition::{Condition, RawCondition};
pub use error::{RangeError, ResolveError, SelectorError};
pub use host::{EntitySource, Scoreboard};
pub use kind::{SelectorBase, SelectorKind};
pub use range::{DistanceRange, IntRange, Range};
pub use resolver::Resolver;
pub use types::{Axis, GameMode, Position};
