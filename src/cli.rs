use serde::Serialize;

use crate::config::RuntimeConfig;
use crate::data::library::{self, Library};
use crate::data::loader::load_library;
use crate::data::resolver::sorted_armies;
use crate::data::strategem::Turn;
use crate::glossary;
use crate::server;
use crate::summary::{army_strategems, summarize_unit, unit_detail};

const USAGE: &str = "usage: muster <serve|armies|army|units|unit|strategems|lookup|clear-cache|score>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Armies,
    Army,
    Units,
    Unit,
    Strategems,
    Lookup,
    ClearCache,
    Score,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("armies") => Some(Command::Armies),
        Some("army") => Some(Command::Army),
        Some("units") => Some(Command::Units),
        Some("unit") => Some(Command::Unit),
        Some("strategems") => Some(Command::Strategems),
        Some("lookup") => Some(Command::Lookup),
        Some("clear-cache") => Some(Command::ClearCache),
        Some("score") => Some(Command::Score),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let config = RuntimeConfig::from_env();

    match command {
        Command::Serve => handle_serve(&config),
        Command::Armies => handle_armies(&config),
        Command::Army => handle_army(&config, args),
        Command::Units => handle_units(&config, args),
        Command::Unit => handle_unit(&config, args),
        Command::Strategems => handle_strategems(&config, args),
        Command::Lookup => handle_lookup(&config, args),
        Command::ClearCache => handle_clear_cache(&config),
        Command::Score => handle_score(&config),
    }
}

fn runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Runtime::new() {
        Ok(runtime) => Some(runtime),
        Err(err) => {
            eprintln!("failed to start async runtime: {err}");
            None
        }
    }
}

/// Run the full load sequence once and hand back whatever arrived.
fn load(config: &RuntimeConfig) -> Option<Library> {
    let runtime = runtime()?;
    let loader = config.loader();
    let shared = library::shared(Library::default());
    runtime.block_on(load_library(&loader, &shared));
    let library = shared.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone();
    Some(library)
}

fn print_json<T: Serialize + ?Sized>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

fn required_arg<'a>(args: &'a [String], usage: &str) -> Option<&'a str> {
    let value = args.get(2).map(String::as_str).filter(|v| !v.trim().is_empty());
    if value.is_none() {
        eprintln!("usage: muster {usage}");
    }
    value
}

fn handle_serve(config: &RuntimeConfig) -> i32 {
    let Some(runtime) = runtime() else {
        return 1;
    };
    match runtime.block_on(server::run_server(config)) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_armies(config: &RuntimeConfig) -> i32 {
    let Some(library) = load(config) else {
        return 1;
    };
    let menu: Vec<_> = sorted_armies(library.armies())
        .into_iter()
        .map(server::api::ArmyMenuItem::from)
        .collect();
    print_json(&menu, "army menu")
}

fn handle_army(config: &RuntimeConfig, args: &[String]) -> i32 {
    let Some(id) = required_arg(args, "army <army-id>") else {
        return 2;
    };
    let Some(library) = load(config) else {
        return 1;
    };
    let Some(army) = library.army(id) else {
        eprintln!("army not found: {id}");
        return 1;
    };
    print_json(
        &server::api::ArmyPage {
            army,
            detachment: library.detachment_for(Some(army)),
        },
        "army",
    )
}

fn handle_units(config: &RuntimeConfig, args: &[String]) -> i32 {
    let Some(id) = required_arg(args, "units <army-id>") else {
        return 2;
    };
    let Some(library) = load(config) else {
        return 1;
    };
    let Some(army) = library.army(id) else {
        eprintln!("army not found: {id}");
        return 1;
    };
    let settings = library.settings_or_default();
    let summaries: Vec<_> = library
        .units_for(Some(army))
        .into_iter()
        .map(|unit| summarize_unit(unit, &settings))
        .collect();
    print_json(&summaries, "unit summaries")
}

fn handle_unit(config: &RuntimeConfig, args: &[String]) -> i32 {
    let Some(name) = required_arg(args, "unit <unit-name>") else {
        return 2;
    };
    let Some(library) = load(config) else {
        return 1;
    };
    match library.unit(name) {
        Some(unit) => print_json(&unit_detail(unit), "unit"),
        None => {
            eprintln!("unit not found: {name}");
            1
        }
    }
}

fn handle_strategems(config: &RuntimeConfig, args: &[String]) -> i32 {
    let Some(id) = required_arg(args, "strategems <army-id> [your|opponent]") else {
        return 2;
    };
    let turn = match args.get(3) {
        None => None,
        Some(raw) => match Turn::parse_filter(raw) {
            Some(turn) => Some(turn),
            None => {
                eprintln!("invalid turn '{raw}', expected 'your' or 'opponent'");
                return 2;
            }
        },
    };
    let Some(library) = load(config) else {
        return 1;
    };
    let Some(army) = library.army(id) else {
        eprintln!("army not found: {id}");
        return 1;
    };
    let strategems = army_strategems(
        Some(army),
        library.detachment_for(Some(army)),
        library.strategems(),
        turn,
    );
    print_json(&strategems, "strategems")
}

fn handle_lookup(config: &RuntimeConfig, args: &[String]) -> i32 {
    let text = args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();
    if text.trim().is_empty() {
        eprintln!("usage: muster lookup <ability text>");
        return 2;
    }
    let Some(library) = load(config) else {
        return 1;
    };
    match glossary::resolve(Some(&text), library.glossary()) {
        Some(entry) => print_json(entry, "glossary entry"),
        None => {
            eprintln!("no glossary entry matches '{text}'");
            1
        }
    }
}

fn handle_clear_cache(config: &RuntimeConfig) -> i32 {
    match config.document_cache().clear_all() {
        Ok(()) => {
            println!("cache cleared: {}", config.cache_dir.display());
            0
        }
        Err(err) => {
            eprintln!("failed to clear cache: {err}");
            1
        }
    }
}

fn handle_score(config: &RuntimeConfig) -> i32 {
    print_json(&config.scoreboard().standings(), "scoreboard")
}
