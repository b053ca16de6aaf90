use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser as _};
use clap_complete::generate;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use favthings_core::config::Config;
use favthings_core::{FavThingsError, InputSource, Parser, Report, Result, Whitelist};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Report {
            input,
            categories,
            json,
        }) => {
            let outcome = run_report(
                &base_dir,
                input.as_deref(),
                categories.as_deref(),
                json,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            );
            return match outcome {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    write_fatal(&e, &mut io::stderr().lock()).ok();
                    ExitCode::from(e.exit_code() as u8)
                }
            };
        }
        Some(Commands::Categories { categories }) => {
            handle_categories(&base_dir, categories.as_deref())
        }
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "favthings", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("FAVTHINGS_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".favthings"))
        .unwrap_or_else(|| PathBuf::from(".favthings"))
}

/// Effective whitelist: `--categories` (taken as given) wins over the
/// configured file, the configured extra names are always added.
fn load_whitelist(base_dir: &Path, categories: Option<&Path>) -> Result<Whitelist> {
    let config = Config::load(base_dir)?;
    match categories {
        Some(path) => config.whitelist_from(Some(path)),
        None => config.whitelist(base_dir),
    }
}

fn run_report<W: Write, E: Write>(
    base_dir: &Path,
    input: Option<&Path>,
    categories: Option<&Path>,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> Result<()> {
    let whitelist = load_whitelist(base_dir, categories)?;
    let source = InputSource::from_arg(input);
    info!(%source, categories = whitelist.len(), "reading favorite things");

    let mut parser = Parser::new(whitelist);
    parser.parse(source.open()?)?;

    write_report(&Report::from_parser(&parser), json, out, err)?;
    Ok(())
}

fn write_report<W: Write, E: Write>(
    report: &Report,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        return Ok(());
    }

    if !report.errors.is_empty() {
        writeln!(
            err,
            "A total of {} error(s) occurred while parsing: ",
            report.errors.len()
        )?;
        for message in &report.errors {
            writeln!(err, "{}", message)?;
        }
        writeln!(err)?;
    }

    if report.is_empty() {
        writeln!(
            out,
            "No favorite things found in any category, nothing to see here."
        )?;
        return Ok(());
    }

    if let Some(item) = &report.highest_rated {
        writeln!(
            out,
            "Highest rating category: {}; thing: {}; rating: {}",
            item.category_name(),
            item.name(),
            item.rating()
        )?;
    }
    if let Some(highest) = &report.highest_sum {
        writeln!(
            out,
            "Category with highest sum: {}; sum was {}",
            highest.category, highest.sum
        )?;
    }
    Ok(())
}

/// Fatal errors abort the report before anything reaches stdout.
fn write_fatal<E: Write>(error: &FavThingsError, err: &mut E) -> io::Result<()> {
    writeln!(err, "A fatal error has occurred:")?;
    writeln!(err, "{}", error)
}

fn handle_categories(base_dir: &Path, categories: Option<&Path>) -> Result<()> {
    let whitelist = load_whitelist(base_dir, categories)?;

    println!();
    for name in whitelist.names() {
        println!("  {}", name.cyan());
    }
    println!();
    println!("{} categories accepted", whitelist.len());

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(FavThingsError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            Config::update(base_dir, &key, &value)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
