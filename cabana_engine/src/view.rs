//! View module.
//! This contains the view to the game world / messages.
//! Rather than printing to the console from each handler, handlers push `ViewItem`s which are
//! styled and displayed together at the end of the turn.

use colored::Colorize;
use textwrap::fill;
use variantly::Variantly;

use crate::style::{GameStyle, indented_block, normal_block};

const ICON_SUCCESS: &str = "\u{2611}"; // ✔
const ICON_FAILURE: &str = "\u{274C}"; // ✖
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_AMBIENT: &str = "⌘";
const ICON_ENGINE: &str = "⚙";
const ICON_CELEBRATE: &str = "🎉"; // U+1F389

/// One entry of the help listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    pub command: String,
    pub description: String,
}

/// `ViewItems` are each of the various types of information / messages that may be displayed to the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    /// Full scenario description including the object listing.
    ScenarioDescription { name: String, text: String },
    ObjectDescription(String),
    ActionSuccess(String),
    ActionFailure(String),
    /// Narrative output of an object action.
    ActionText(String),
    AmbientEvent(String),
    Inventory(Vec<String>),
    Help(Vec<HelpLine>),
    EngineMessage(String),
    Error(String),
    Victory(String),
}

impl ViewItem {
    /// Unstyled text of this item, one entry per output line.
    pub fn plain_lines(&self) -> Vec<String> {
        match self {
            ViewItem::ScenarioDescription { text, .. } => text.lines().map(str::to_string).collect(),
            ViewItem::ObjectDescription(text)
            | ViewItem::ActionSuccess(text)
            | ViewItem::ActionFailure(text)
            | ViewItem::ActionText(text)
            | ViewItem::AmbientEvent(text)
            | ViewItem::EngineMessage(text)
            | ViewItem::Error(text)
            | ViewItem::Victory(text) => vec![text.clone()],
            ViewItem::Inventory(names) if names.is_empty() => vec!["Seu inventário está vazio.".to_string()],
            ViewItem::Inventory(names) => std::iter::once("Itens no inventário:".to_string())
                .chain(names.iter().map(|n| format!("- {n}")))
                .collect(),
            ViewItem::Help(lines) => std::iter::once("Lista de comandos:".to_string())
                .chain(lines.iter().map(|l| format!("{} - {}", l.command, l.description)))
                .collect(),
        }
    }
}

/// View aggregates information to be displayed on each pass through the REPL and then
/// displays the result.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub items: Vec<ViewItem>,
}

impl View {
    /// Create a new empty view.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Plain text of everything pushed since the last flush.
    pub fn lines(&self) -> Vec<String> {
        self.items.iter().flat_map(ViewItem::plain_lines).collect()
    }

    /// Drop everything pending without displaying it.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Compose and display all message contents in the current frame / turn.
    pub fn flush(&mut self) {
        if self.items.is_empty() {
            return;
        }
        for item in &self.items {
            Self::render(item);
        }
        self.items.clear();
        println!();
    }

    fn render(item: &ViewItem) {
        match item {
            ViewItem::ScenarioDescription { name, text } => {
                println!("{}", name.scenario_style().bold());
                let mut lines = text.lines();
                if let Some(first) = lines.next() {
                    println!("{}", fill(first, normal_block()).description_style());
                }
                for line in lines {
                    if let Some(entry) = line.strip_prefix("- ") {
                        println!("  - {}", entry.item_style());
                    } else {
                        println!("{}", line.section_style());
                    }
                }
            },
            ViewItem::ObjectDescription(text) => {
                println!("{}", fill(text, normal_block()).description_style());
            },
            ViewItem::ActionSuccess(text) => {
                println!("{:<4}{}", ICON_SUCCESS.green(), fill(text, normal_block()).success_style());
            },
            ViewItem::ActionFailure(text) => {
                println!("{:<4}{}", ICON_FAILURE.red(), fill(text, normal_block()).denied_style());
            },
            ViewItem::ActionText(text) => {
                println!("{}", fill(text, normal_block()).action_style());
            },
            ViewItem::AmbientEvent(text) => {
                println!("{:<4}{}", ICON_AMBIENT.dimmed(), text.ambient_style());
            },
            ViewItem::EngineMessage(text) => {
                println!("{:<4}{}", ICON_ENGINE, fill(text, normal_block()));
            },
            ViewItem::Error(text) => {
                println!("{:<4}{}", ICON_ERROR.red(), text.error_style());
            },
            ViewItem::Victory(text) => {
                println!("{:<4}{}", ICON_CELEBRATE, fill(text, normal_block()).victory_style());
            },
            ViewItem::Inventory(_) | ViewItem::Help(_) => {
                let lines = item.plain_lines();
                if let Some((heading, rest)) = lines.split_first() {
                    println!("{}", heading.as_str().section_style());
                    for line in rest {
                        println!("{}", fill(line, indented_block()));
                    }
                }
            },
        }
    }
}
