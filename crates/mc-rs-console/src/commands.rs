//! Console command registry and built-in commands.

use std::collections::HashMap;

use mc_rs_selector::{EntitySource, ResolveError, Resolver};
use rand::rngs::StdRng;
use serde_json::json;
use tracing::warn;

use crate::config::OutputFormat;
use crate::population::Population;

/// Context passed to a command handler.
pub struct CommandContext<'a> {
    /// Runtime ID of the executor, if any.
    pub sender: Option<u64>,
    /// Arguments after the command name.
    pub args: Vec<String>,
    pub population: &'a Population,
    pub rng: &'a mut StdRng,
    pub output: OutputFormat,
}

impl CommandContext<'_> {
    fn resolve(
        &mut self,
        sender: Option<u64>,
        tokens: &[String],
    ) -> Result<Vec<u64>, ResolveError> {
        Resolver::new(self.population, self.population).resolve(
            tokens,
            sender.as_ref(),
            &mut *self.rng,
        )
    }
}

/// Result returned by a command handler.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command executed successfully.
    pub success: bool,
    /// Lines to print.
    pub messages: Vec<String>,
    /// If true, the console should exit.
    pub should_stop: bool,
}

impl CommandResult {
    /// Create a successful result with a single message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            messages: vec![message.into()],
            should_stop: false,
        }
    }

    /// Create a failed result with a single message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            messages: vec![message.into()],
            should_stop: false,
        }
    }
}

/// Function pointer type for command handlers.
pub type CommandFn = fn(&mut CommandContext<'_>) -> CommandResult;

/// A registered command.
pub struct CommandEntry {
    pub name: String,
    pub description: String,
    pub handler: CommandFn,
}

/// Registry of console commands.
///
/// Commands are registered explicitly; there is no discovery.
pub struct CommandRegistry {
    commands: HashMap<String, CommandEntry>,
}

impl CommandRegistry {
    /// Create a new registry with the built-in commands.
    pub fn new() -> Self {
        let mut registry = Self {
            commands: HashMap::new(),
        };
        registry.register("help", "List available commands", cmd_help);
        registry.register("select", "Resolve selectors and list the targets", cmd_select);
        registry.register("count", "Resolve selectors and count the targets", cmd_count);
        registry.register(
            "as",
            "Resolve selectors as another player: as <name> <selector...>",
            cmd_as,
        );
        registry.register("stop", "Exit the console", cmd_stop);
        registry
    }

    /// Register a command. A second registration under the same name replaces the first.
    pub fn register(&mut self, name: &str, description: &str, handler: CommandFn) {
        let previous = self.commands.insert(
            name.to_string(),
            CommandEntry {
                name: name.to_string(),
                description: description.to_string(),
                handler,
            },
        );
        if previous.is_some() {
            warn!("Command /{name} registered twice, replacing the earlier handler");
        }
    }

    /// Execute a command by name.
    pub fn execute(&self, name: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        match self.commands.get(name) {
            Some(entry) => (entry.handler)(ctx),
            None => CommandResult::err(format!(
                "Unknown command: {name}. Type help for a list of commands."
            )),
        }
    }

    /// `name:description` pairs sorted by name, as `help` expects them.
    pub fn help_args(&self) -> Vec<String> {
        let mut entries: Vec<&CommandEntry> = self.get_commands().values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
            .into_iter()
            .map(|e| format!("{}:{}", e.name, e.description))
            .collect()
    }

    /// Get a reference to all registered commands.
    pub fn get_commands(&self) -> &HashMap<String, CommandEntry> {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Built-in commands
// ---------------------------------------------------------------------------

fn cmd_help(ctx: &mut CommandContext<'_>) -> CommandResult {
    // The console injects the command list as "name:description" pairs.
    let mut lines = vec!["Available commands:".to_string()];
    for arg in &ctx.args {
        if let Some((name, desc)) = arg.split_once(':') {
            lines.push(format!("  {name} - {desc}"));
        }
    }
    CommandResult {
        success: true,
        messages: lines,
        should_stop: false,
    }
}

fn list_targets(
    ctx: &mut CommandContext<'_>,
    sender: Option<u64>,
    tokens: &[String],
) -> CommandResult {
    if tokens.is_empty() {
        return CommandResult::err("Usage: select <selector...>");
    }
    let targets = match ctx.resolve(sender, tokens) {
        Ok(t) => t,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let names = ctx.population.names(&targets);
    match ctx.output {
        OutputFormat::Json => CommandResult::ok(json!({ "targets": names }).to_string()),
        OutputFormat::Text if names.is_empty() => CommandResult::ok("No targets matched"),
        OutputFormat::Text => CommandResult::ok(format!(
            "Found {count} target{s}: {list}",
            count = names.len(),
            s = if names.len() == 1 { "" } else { "s" },
            list = names.join(", "),
        )),
    }
}

fn cmd_select(ctx: &mut CommandContext<'_>) -> CommandResult {
    let tokens = std::mem::take(&mut ctx.args);
    let sender = ctx.sender;
    list_targets(ctx, sender, &tokens)
}

fn cmd_count(ctx: &mut CommandContext<'_>) -> CommandResult {
    let tokens = std::mem::take(&mut ctx.args);
    if tokens.is_empty() {
        return CommandResult::err("Usage: count <selector...>");
    }
    let sender = ctx.sender;
    let count = match ctx.resolve(sender, &tokens) {
        Ok(t) => t.len(),
        Err(e) => return CommandResult::err(e.to_string()),
    };
    match ctx.output {
        OutputFormat::Json => CommandResult::ok(json!({ "count": count }).to_string()),
        OutputFormat::Text => CommandResult::ok(format!("{count} matched")),
    }
}

fn cmd_as(ctx: &mut CommandContext<'_>) -> CommandResult {
    let mut args = std::mem::take(&mut ctx.args);
    if args.len() < 2 {
        return CommandResult::err("Usage: as <name> <selector...>");
    }
    let tokens = args.split_off(1);
    let name = &args[0];
    match ctx.population.find_by_name(name) {
        Some(sender) => list_targets(ctx, Some(sender), &tokens),
        None => CommandResult::err(format!("Player not found: {name}")),
    }
}

fn cmd_stop(_ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult {
        success: true,
        messages: vec!["Stopping...".to_string()],
        should_stop: true,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mc_rs_selector::Position;
    use rand::SeedableRng;

    const FIXTURE: &str = r#"
        [[entity]]
        name = "Steve"
        position = [0.0, 64.0, 0.0]

        [[entity]]
        name = "Alex"
        position = [3.0, 64.0, 4.0]
        team = "blue"

        [[entity]]
        name = "Notch"
        position = [100.0, 64.0, 0.0]
        gamemode = "creative"
    "#;

    fn population() -> Population {
        Population::parse(FIXTURE, Position::new(0.0, 64.0, 0.0)).unwrap()
    }

    fn exec(
        reg: &CommandRegistry,
        pop: &Population,
        output: OutputFormat,
        name: &str,
        args: &[&str],
    ) -> CommandResult {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = CommandContext {
            sender: Some(1),
            args: args.iter().map(|s| s.to_string()).collect(),
            population: pop,
            rng: &mut rng,
            output,
        };
        reg.execute(name, &mut ctx)
    }

    fn no_op(_ctx: &mut CommandContext<'_>) -> CommandResult {
        CommandResult::ok("noop")
    }

    #[test]
    fn registry_has_builtins() {
        let reg = CommandRegistry::new();
        for name in ["help", "select", "count", "as", "stop"] {
            assert!(reg.get_commands().contains_key(name), "missing {name}");
        }
        assert_eq!(reg.get_commands().len(), 5);
    }

    #[test]
    fn unknown_command() {
        let reg = CommandRegistry::new();
        let pop = population();
        let result = exec(&reg, &pop, OutputFormat::Text, "teleport", &[]);
        assert!(!result.success);
        assert!(result.messages[0].contains("Unknown command"));
    }

    #[test]
    fn register_replaces_duplicate() {
        let mut reg = CommandRegistry::new();
        reg.register("stop", "Overridden", no_op);
        assert_eq!(reg.get_commands().len(), 5);
        let pop = population();
        let result = exec(&reg, &pop, OutputFormat::Text, "stop", &[]);
        assert!(!result.should_stop);
        assert_eq!(result.messages, vec!["noop"]);
    }

    #[test]
    fn help_args_sorted() {
        let reg = CommandRegistry::new();
        let args = reg.help_args();
        assert_eq!(args.len(), 5);
        assert!(args[0].starts_with("as:"));
        assert!(args[4].starts_with("stop:"));
    }

    #[test]
    fn help_lists_commands() {
        let reg = CommandRegistry::new();
        let pop = population();
        let help = reg.help_args();
        let args: Vec<&str> = help.iter().map(String::as_str).collect();
        let result = exec(&reg, &pop, OutputFormat::Text, "help", &args);
        assert!(result.success);
        assert_eq!(result.messages.len(), 6);
        assert!(result.messages[0].contains("Available commands"));
    }

    #[test]
    fn select_text() {
        let reg = CommandRegistry::new();
        let pop = population();
        let result = exec(&reg, &pop, OutputFormat::Text, "select", &["@a[distance=..10]"]);
        assert!(result.success);
        assert_eq!(result.messages, vec!["Found 2 targets: Steve, Alex"]);

        let result = exec(&reg, &pop, OutputFormat::Text, "select", &["@p"]);
        assert_eq!(result.messages, vec!["Found 1 target: Alex"]);

        let result = exec(&reg, &pop, OutputFormat::Text, "select", &["@a[team=red]"]);
        assert_eq!(result.messages, vec!["No targets matched"]);
    }

    #[test]
    fn select_json() {
        let reg = CommandRegistry::new();
        let pop = population();
        let result = exec(&reg, &pop, OutputFormat::Json, "select", &["@s", "Notch"]);
        let value: serde_json::Value = serde_json::from_str(&result.messages[0]).unwrap();
        assert_eq!(value["targets"], json!(["Steve", "Notch"]));
    }

    #[test]
    fn select_reports_errors() {
        let reg = CommandRegistry::new();
        let pop = population();
        let result = exec(&reg, &pop, OutputFormat::Text, "select", &["@a[scores={kills=1}]"]);
        assert!(!result.success);
        assert!(result.messages[0].contains("objective not found: kills"));

        let result = exec(&reg, &pop, OutputFormat::Text, "select", &[]);
        assert!(!result.success);
        assert!(result.messages[0].contains("Usage"));
    }

    #[test]
    fn count_matches() {
        let reg = CommandRegistry::new();
        let pop = population();
        let result = exec(&reg, &pop, OutputFormat::Text, "count", &["@a[gamemode=survival]"]);
        assert_eq!(result.messages, vec!["2 matched"]);
        let result = exec(&reg, &pop, OutputFormat::Json, "count", &["@a", "@a"]);
        assert_eq!(result.messages, vec![r#"{"count":6}"#]);
    }

    #[test]
    fn as_changes_executor() {
        let reg = CommandRegistry::new();
        let pop = population();
        let result = exec(&reg, &pop, OutputFormat::Text, "as", &["notch", "@s", "@p"]);
        assert_eq!(result.messages, vec!["Found 2 targets: Notch, Alex"]);

        let result = exec(&reg, &pop, OutputFormat::Text, "as", &["Nobody", "@s"]);
        assert!(!result.success);
        assert!(result.messages[0].contains("Player not found"));

        let result = exec(&reg, &pop, OutputFormat::Text, "as", &["Steve"]);
        assert!(!result.success);
    }

    #[test]
    fn stop_flags_shutdown() {
        let reg = CommandRegistry::new();
        let pop = population();
        let result = exec(&reg, &pop, OutputFormat::Text, "stop", &[]);
        assert!(result.success);
        assert!(result.should_stop);
    }

    #[test]
    fn result_helpers() {
        let ok = CommandResult::ok("success");
        assert!(ok.success);
        assert_eq!(ok.messages[0], "success");

        let err = CommandResult::err("failed");
        assert!(!err.success);
        assert_eq!(err.messages[0], "failed");
    }
}
