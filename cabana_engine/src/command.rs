//! Command module
//!
//! Describes possible commands used during gameplay and maps raw input lines onto them.
//!
//! The first word is the verb (matched exactly and case-sensitively), the second word is the
//! target. A target written as `qualifier:target` keeps only the text after the colon.
use variantly::Variantly;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    Back,
    Drop(String),
    Help,
    Inventory,
    Load(String),
    Lock(String),
    Look,
    LookAt(String),
    MoveTo(String),
    /// A known verb that needs a target was given none. Holds the verb as typed.
    MissingTarget(String),
    Noop,
    Quit,
    Save(String),
    Take(String),
    Unknown,
    Unlock(String),
    UseObject(String),
}

/// Parses an input line and returns a corresponding `Command`.
pub fn parse_command(input: &str) -> Command {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Command::Noop;
    };
    let target = words.next().map(strip_qualifier).filter(|t| !t.is_empty());

    let needs = |make: fn(String) -> Command| match target {
        Some(t) => make(t.to_string()),
        None => Command::MissingTarget(verb.to_string()),
    };

    match verb {
        "ver" | "olhar" | "observar" => target.map_or(Command::Look, |t| Command::LookAt(t.to_string())),
        "ir" | "entrar" => needs(Command::MoveTo),
        "abrir" => needs(Command::Unlock),
        "fechar" => needs(Command::Lock),
        "pegar" => needs(Command::Take),
        "largar" | "soltar" => needs(Command::Drop),
        "usar" => needs(Command::UseObject),
        "voltar" => Command::Back,
        "i" | "inventário" => Command::Inventory,
        "ajuda" => Command::Help,
        "sair" => Command::Quit,
        "salvar" => needs(Command::Save),
        "carregar" => needs(Command::Load),
        _ => Command::Unknown,
    }
}

/// `chave:baú` -> `baú`
fn strip_qualifier(token: &str) -> &str {
    token.split_once(':').map_or(token, |(_, target)| target)
}
