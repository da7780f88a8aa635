//! Terminal input handling for the Cabana REPL.
//!
//! Wraps rustyline configuration and completion tailored to the engine's verbs and save slots,
//! with a plain stdin fallback when no terminal is attached.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, ExternalPrinter, Helper};

use crate::ambient::HintSink;
use crate::repl::Confirm;
use crate::save_files::{active_save_dir, list_save_slots};
use crate::style::GameStyle;

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

const COMMAND_TERMS: &[&str] = &[
    "abrir",
    "ajuda",
    "carregar",
    "entrar",
    "fechar",
    "i",
    "inventário",
    "ir",
    "largar",
    "leste",
    "norte",
    "observar",
    "oeste",
    "olhar",
    "pegar",
    "sair",
    "salvar",
    "soltar",
    "sul",
    "usar",
    "ver",
    "voltar",
];

type ReplEditor = rustyline::Editor<CabanaHelper, DefaultHistory>;

#[derive(Default)]
struct CabanaHelper;

impl Helper for CabanaHelper {}

impl Completer for CabanaHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        if let Some(partial) = prefix.strip_prefix("carregar ") {
            let offset = start + prefix.len() - partial.trim_start().len();
            return Ok((offset, slot_candidates(&available_save_slots(), partial.trim_start())));
        }
        let pairs = COMMAND_TERMS
            .iter()
            .filter(|term| term.starts_with(prefix.as_str()))
            .map(|term| Pair {
                display: (*term).to_string(),
                replacement: (*term).to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CabanaHelper {
    type Hint = String;
}

impl Highlighter for CabanaHelper {}

impl Validator for CabanaHelper {}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

fn slot_candidates(slots: &[String], partial: &str) -> Vec<Pair> {
    slots
        .iter()
        .filter(|slot| slot.starts_with(partial))
        .map(|slot| Pair {
            display: slot.clone(),
            replacement: slot.clone(),
        })
        .collect()
}

fn available_save_slots() -> Vec<String> {
    match list_save_slots(&active_save_dir()) {
        Ok(slots) => slots,
        Err(err) => {
            warn!("failed to enumerate save slots for completion: {err}");
            Vec::new()
        },
    }
}

/// Helper responsible for managing the interactive input backend.
///
/// Prefers `rustyline` when an interactive terminal is available, falling back to
/// a basic stdin reader otherwise.
pub struct InputManager {
    backend: Backend,
}

impl InputManager {
    pub fn new() -> Self {
        let backend = if io::stdin().is_terminal() {
            match RustylineInput::new() {
                Ok(editor) => {
                    info!("using rustyline-backed REPL input");
                    Backend::Rustyline(editor)
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };

        Self { backend }
    }

    /// Read a line from the current backend. If the interactive backend reports an
    /// unrecoverable error, switch to the plain stdin backend and retry once.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) => {
                if self.backend.is_rustyline() {
                    warn!("rustyline input failed: {err} -- switching to basic stdin");
                    self.backend = Backend::plain();
                    self.backend.read_line(prompt)
                } else {
                    Err(err)
                }
            },
        }
    }

    /// Sink for ambient hints printed from the notifier thread.
    ///
    /// With rustyline the hint is printed above the prompt line being edited; otherwise it is
    /// written straight to stdout.
    pub fn hint_sink(&mut self) -> HintSink {
        if let Backend::Rustyline(input) = &mut self.backend {
            match input.editor.create_external_printer() {
                Ok(mut printer) => {
                    return Box::new(move |hint: &str| {
                        if let Err(err) = printer.print(ambient_line(hint)) {
                            warn!("failed to print ambient hint: {err}");
                        }
                    });
                },
                Err(err) => warn!("no external printer available ({err}), hints go to stdout"),
            }
        }
        Box::new(|hint: &str| println!("{}", ambient_line(hint)))
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for InputManager {
    fn confirm(&mut self, prompt: &str) -> String {
        let prompt = format!("{prompt} ").prompt_style().to_string();
        match self.read_line(&prompt) {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof | InputEvent::Interrupted) => String::new(),
            Err(err) => {
                warn!("confirmation prompt failed: {err}");
                String::new()
            },
        }
    }
}

fn ambient_line(hint: &str) -> String {
    format!("{:<4}{}", "⌘".dimmed(), hint.ambient_style())
}

enum Backend {
    Rustyline(RustylineInput),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read_line(prompt),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new() -> io::Result<Self> {
        let mut editor = rustyline::Editor::<CabanaHelper, _>::new().map_err(map_io_err)?;
        editor.set_helper(Some(CabanaHelper));
        let history_path = history_file_path();

        if let Some(path) = history_path.as_ref() {
            if let Some(dir) = path.parent()
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("failed to create history directory {}: {err}", dir.display());
            }

            if let Err(err) = editor.load_history(path) {
                match err {
                    ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        info!("no prior history found at {}, starting fresh", path.display());
                    },
                    other => {
                        warn!("failed to load history from {}: {other}", path.display());
                    },
                }
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Some(path) = self.history_path.as_ref()
                        && let Err(err) = self.editor.save_history(path)
                    {
                        warn!("failed to persist history to {}: {err}", path.display());
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        Ok(InputEvent::Line(self.buffer.clone()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    path.push("cabana_engine");
    path.push("history.txt");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).unwrap();
        assert!(matches!(result, InputEvent::Interrupted));
        let result = convert_readline_error(ReadlineError::Eof).unwrap();
        assert!(matches!(result, InputEvent::Eof));
    }

    #[test]
    fn history_path_appends_components() {
        let base = PathBuf::from("/tmp/cabana-test");
        let path = build_history_path(&base);
        assert!(path.ends_with(Path::new("cabana_engine/history.txt")));
    }

    #[test]
    fn every_verb_is_completable() {
        for verb in ["ver", "ir", "abrir", "fechar", "pegar", "largar", "usar", "voltar", "sair"] {
            assert!(COMMAND_TERMS.contains(&verb), "{verb} missing");
        }
    }

    #[test]
    fn prefix_skips_leading_whitespace() {
        assert_eq!(current_prefix("  pe", 4), (2, "pe".to_string()));
        assert_eq!(current_prefix("", 0), (0, String::new()));
    }

    #[test]
    fn slot_candidates_filter_by_prefix() {
        let slots = vec!["manha".to_string(), "tarde".to_string()];
        let found = slot_candidates(&slots, "ma");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].replacement, "manha");
        assert_eq!(slot_candidates(&slots, "").len(), 2);
    }
}
