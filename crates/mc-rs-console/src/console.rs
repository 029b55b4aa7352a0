//! Line-oriented front end: parse a line, dispatch it through the registry.

use rand::rngs::StdRng;
use tracing::debug;

use crate::commands::{CommandContext, CommandRegistry, CommandResult};
use crate::config::OutputFormat;
use crate::population::Population;

pub struct Console {
    registry: CommandRegistry,
    population: Population,
    executor: Option<u64>,
    rng: StdRng,
    output: OutputFormat,
}

impl Console {
    pub fn new(
        population: Population,
        executor: Option<u64>,
        rng: StdRng,
        output: OutputFormat,
    ) -> Self {
        Self {
            registry: CommandRegistry::new(),
            population,
            executor,
            rng,
            output,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Run one input line. Blank lines yield `None`.
    pub fn run_line(&mut self, line: &str) -> Option<CommandResult> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let mut parts = line.split_whitespace();
        let name = parts.next()?;
        let args: Vec<String> = if name == "help" {
            self.registry.help_args()
        } else {
            parts.map(String::from).collect()
        };
        debug!("Command {name} with {} argument(s)", args.len());

        let mut ctx = CommandContext {
            sender: self.executor,
            args,
            population: &self.population,
            rng: &mut self.rng,
            output: self.output,
        };
        Some(self.registry.execute(name, &mut ctx))
    }
}
