//! # Layer Commands
//!
//! Implementation of console commands using the command pattern. Each
//! command recognises its own syntax and produces events; the registry
//! picks the first command that can handle a line.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::console::commands::{CommandContext, CommandEvent};
use crate::console::models::{FeatureField, LayerField};
use crate::console::widgets::PanelId;

pub const HELP_TEXT: &str = "\
Commands:
  list                        show the layer list
  load                        reload layers from the backend
  toggle <layers|selection>   collapse or expand a panel
  select <index>              stage a copy of a layer for editing
  new                         stage an empty layer
  set <field> [value]         edit wmsId, name, style or opacity
  feature add                 append a blank feature
  feature rm <index>          remove a feature
  feature <index> <field> <v> edit a feature's wmsId or name
  add | save                  send the staged layer to the backend
  delete [wmsId]              delete a layer (default: the one being edited)
  show profile                show connection details
  help                        show this text
  quit                        exit";

static RE_TOGGLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^toggle\s+(\S+)$").expect("Invalid toggle command pattern"));
static RE_SELECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^select\s+(\d+)$").expect("Invalid select command pattern"));
static RE_SET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^set\s+(\S+)(?:\s+(.*))?$").expect("Invalid set command pattern"));
static RE_FEATURE_REMOVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^feature\s+(?:rm|remove)\s+(\d+)$").expect("Invalid feature rm command pattern")
});
static RE_FEATURE_EDIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^feature\s+(\d+)\s+(\S+)(?:\s+(.*))?$")
        .expect("Invalid feature edit command pattern")
});
static RE_DELETE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^delete(?:\s+(.+))?$").expect("Invalid delete command pattern"));

/// Trait for console commands
pub trait ConsoleCommand: Send {
    /// Check if this command can handle the given line
    fn can_handle(&self, line: &str) -> bool;

    /// Execute the command and produce events
    fn execute(&self, line: &str, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging
    fn name(&self) -> &'static str;
}

/// Command answering a fixed set of words with one event
struct KeywordCommand {
    name: &'static str,
    keywords: &'static [&'static str],
    event: CommandEvent,
}

impl ConsoleCommand for KeywordCommand {
    fn can_handle(&self, line: &str) -> bool {
        self.keywords.iter().any(|keyword| *keyword == line)
    }

    fn execute(&self, _line: &str, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![self.event.clone()])
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

fn keyword(
    name: &'static str,
    keywords: &'static [&'static str],
    event: CommandEvent,
) -> Box<dyn ConsoleCommand + Send> {
    Box::new(KeywordCommand {
        name,
        keywords,
        event,
    })
}

/// `toggle <panel>`
pub struct ToggleCommand;

impl ConsoleCommand for ToggleCommand {
    fn can_handle(&self, line: &str) -> bool {
        RE_TOGGLE.is_match(line)
    }

    fn execute(&self, line: &str, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let name = RE_TOGGLE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str());
        let panel =
            PanelId::parse(name).ok_or_else(|| anyhow::anyhow!("Unknown panel '{name}'"))?;
        Ok(vec![CommandEvent::PanelToggleRequested { panel }])
    }

    fn name(&self) -> &'static str {
        "ToggleCommand"
    }
}

/// `select <index>`
pub struct SelectCommand;

impl ConsoleCommand for SelectCommand {
    fn can_handle(&self, line: &str) -> bool {
        RE_SELECT.is_match(line)
    }

    fn execute(&self, line: &str, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let caps = RE_SELECT
            .captures(line)
            .ok_or_else(|| anyhow::anyhow!("Usage: select <index>"))?;
        let index = caps[1].parse::<usize>()?;
        Ok(vec![CommandEvent::SelectRequested { index }])
    }

    fn name(&self) -> &'static str {
        "SelectCommand"
    }
}

/// `set <field> [value]`; an omitted value clears optional fields
pub struct SetFieldCommand;

impl ConsoleCommand for SetFieldCommand {
    fn can_handle(&self, line: &str) -> bool {
        RE_SET.is_match(line)
    }

    fn execute(&self, line: &str, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let caps = RE_SET
            .captures(line)
            .ok_or_else(|| anyhow::anyhow!("Usage: set <field> [value]"))?;
        let field = LayerField::parse(&caps[1])
            .ok_or_else(|| anyhow::anyhow!("Unknown layer field '{}'", &caps[1]))?;
        let value = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
        Ok(vec![CommandEvent::SelectionFieldEditRequested { field, value }])
    }

    fn name(&self) -> &'static str {
        "SetFieldCommand"
    }
}

/// `feature add`, `feature rm <index>`, `feature <index> <field> <value>`
pub struct FeatureCommand;

impl ConsoleCommand for FeatureCommand {
    fn can_handle(&self, line: &str) -> bool {
        line == "feature add" || RE_FEATURE_REMOVE.is_match(line) || RE_FEATURE_EDIT.is_match(line)
    }

    fn execute(&self, line: &str, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if line == "feature add" {
            return Ok(vec![CommandEvent::FeatureAddRequested]);
        }
        if let Some(caps) = RE_FEATURE_REMOVE.captures(line) {
            let index = caps[1].parse::<usize>()?;
            return Ok(vec![CommandEvent::FeatureRemoveRequested { index }]);
        }

        let caps = RE_FEATURE_EDIT
            .captures(line)
            .ok_or_else(|| anyhow::anyhow!("Usage: feature <index> <wmsId|name> <value>"))?;
        let index = caps[1].parse::<usize>()?;
        let field = FeatureField::parse(&caps[2])
            .ok_or_else(|| anyhow::anyhow!("Unknown feature field '{}'", &caps[2]))?;
        let value = caps.get(3).map_or("", |m| m.as_str()).trim().to_string();
        Ok(vec![CommandEvent::FeatureFieldEditRequested {
            index,
            field,
            value,
        }])
    }

    fn name(&self) -> &'static str {
        "FeatureCommand"
    }
}

/// `delete [wmsId]`; without an id, deletes the layer being edited
pub struct DeleteCommand;

impl ConsoleCommand for DeleteCommand {
    fn can_handle(&self, line: &str) -> bool {
        RE_DELETE.is_match(line)
    }

    fn execute(&self, line: &str, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let explicit = RE_DELETE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string());

        let wms_id = match explicit {
            Some(wms_id) => wms_id,
            None if context.state.is_editing => context.state.selected_wms_id.clone(),
            None => anyhow::bail!("Nothing to delete: give a wmsId or select a layer first"),
        };
        Ok(vec![CommandEvent::DeleteLayerRequested { wms_id }])
    }

    fn name(&self) -> &'static str {
        "DeleteCommand"
    }
}

/// Type alias to reduce complexity for command collection
type CommandCollection = Vec<Box<dyn ConsoleCommand + Send>>;

/// Registry for managing console commands
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create a new registry with all default commands
    pub fn new() -> Self {
        let commands: CommandCollection = vec![
            keyword("ListCommand", &["list", "ls"], CommandEvent::ListRequested),
            keyword("LoadCommand", &["load", "reload"], CommandEvent::ReloadRequested),
            keyword("NewCommand", &["new"], CommandEvent::NewLayerRequested),
            keyword("AddCommand", &["add"], CommandEvent::AddLayerRequested),
            keyword("SaveCommand", &["save"], CommandEvent::SaveLayerRequested),
            keyword(
                "ShowProfileCommand",
                &["show profile"],
                CommandEvent::ShowProfileRequested,
            ),
            keyword("HelpCommand", &["help", "?"], CommandEvent::HelpRequested),
            keyword("QuitCommand", &["quit", "exit", "q"], CommandEvent::QuitRequested),
            Box::new(ToggleCommand),
            Box::new(SelectCommand),
            Box::new(SetFieldCommand),
            Box::new(FeatureCommand),
            Box::new(DeleteCommand),
        ];

        Self { commands }
    }

    /// Parse and execute a command line
    pub fn execute_command(&self, line: &str, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(vec![]);
        }

        for command in &self.commands {
            if command.can_handle(trimmed) {
                tracing::debug!("Command '{}' handled by {}", trimmed, command.name());
                return command.execute(trimmed, context);
            }
        }

        tracing::warn!("Unknown command: {}", trimmed);
        Err(anyhow::anyhow!("Unknown command '{trimmed}', type 'help'"))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
