use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use taxonomy_core::catalog::{derive_id, Catalog, CatalogSource, RemoteSource};
use taxonomy_core::config::{default_base_dir, Config, ConfigKey, OutputFormat};
use taxonomy_core::{JsonFileSource, Result, TaxonomyContext, TaxonomyError};

mod args;
mod logging;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Tree {
            remote,
            local,
            json,
        }) => handle_tree(&base_dir, remote, local, json),
        Some(Commands::Build {
            input,
            extras,
            json,
        }) => handle_build(&base_dir, &input, extras.as_deref(), json),
        Some(Commands::Id { names }) => {
            handle_id(&names);
            Ok(())
        }
        Some(Commands::Find { name }) => handle_find(&name),
        Some(Commands::Stats) => {
            handle_stats();
            Ok(())
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

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("TAXONOMY_BASE") {
        return PathBuf::from(base);
    }

    default_base_dir().unwrap_or_else(|_| PathBuf::from(".taxonomy"))
}

fn handle_tree(base_dir: &Path, remote: Option<PathBuf>, local: bool, json: bool) -> Result<()> {
    let config = Config::load(base_dir)?;
    let source = match (local, remote) {
        (true, _) => None,
        (false, Some(path)) => Some(JsonFileSource::new(path)),
        (false, None) => config.remote_source(),
    };

    let ctx = TaxonomyContext::builtin();
    let handle = ctx.load(source.as_ref().map(|s| s as &dyn RemoteSource));
    let catalog = handle.catalog();

    if let (Some(source), false) = (&source, catalog.is_remote()) {
        eprintln!(
            "{} remote source {} unavailable, showing builtin tree",
            "[WARN]".yellow().bold(),
            source.name()
        );
    }

    print_catalog(&catalog, output_format(&config, json))
}

fn handle_build(base_dir: &Path, input: &Path, extras: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load(base_dir)?;
    let base = JsonFileSource::new(input).fetch()?;
    let extras = match extras {
        Some(path) => JsonFileSource::new(path).fetch()?,
        None => Vec::new(),
    };

    let ctx = TaxonomyContext::with_tables(base, extras);
    print_catalog(&ctx.local(), output_format(&config, json))
}

fn handle_id(names: &[String]) {
    for name in names {
        let id = derive_id(name);
        if id.is_empty() {
            println!("{} {}", name, "(empty)".dimmed());
        } else {
            println!("{} {}", id.cyan(), name.dimmed());
        }
    }
}

fn handle_find(name: &str) -> Result<()> {
    let catalog = TaxonomyContext::builtin().local();
    let paths = catalog.find_item_by_name(name);
    if paths.is_empty() {
        return Err(TaxonomyError::ItemNotFound {
            name: name.to_string(),
        });
    }

    for path in paths {
        println!("{}  {}", path.key().cyan(), path.label());
    }
    Ok(())
}

fn handle_stats() {
    let catalog = TaxonomyContext::builtin().local();
    let stats = catalog.stats();

    println!();
    println!("{} {}", "Categories:".bold(), stats.categories);
    println!("{} {}", "Subcategories:".bold(), stats.subcategories);
    println!("{} {}", "Items:".bold(), stats.items);
    println!("{} {}", "Fingerprint:".bold(), catalog.fingerprint.dimmed());
    println!();
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    let load = || Config::load(base_dir);

    match action {
        ConfigAction::Get { key } => {
            let key: ConfigKey = key.parse()?;
            println!("{}", load()?.value(key));
        }
        ConfigAction::Set { key, value } => {
            let mut config = load()?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, config.value(key.parse()?));
        }
        ConfigAction::List => {
            let width = ConfigKey::ALL.iter().map(|k| k.as_str().len()).max().unwrap_or(0);
            for (key, value) in load()?.list() {
                println!("{} = {}", format!("{:<width$}", key.as_str()).cyan(), value);
            }
        }
        ConfigAction::Path => println!("{}", Config::path(base_dir).display()),
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
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
    generate(shell, &mut cmd, "taxonomy", &mut io::stdout());
}

fn output_format(config: &Config, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        config.output.format
    }
}

fn print_catalog(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(catalog)?);
        }
        OutputFormat::Tree => print_tree(catalog),
    }
    Ok(())
}

fn print_tree(catalog: &Catalog) {
    let source = match &catalog.source {
        CatalogSource::Local => "builtin".to_string(),
        CatalogSource::Remote { name } => name.clone(),
    };
    println!();
    println!("{} {}", "Source:".bold(), source);
    println!();

    for category in &catalog.categories {
        println!(
            "{} {}",
            category.name.cyan().bold(),
            format!("({})", category.id).dimmed()
        );

        let last_sub = category.subcategories.len().saturating_sub(1);
        for (i, sub) in category.subcategories.iter().enumerate() {
            let (branch, rail) = if i == last_sub {
                ("└──", "    ")
            } else {
                ("├──", "│   ")
            };
            println!("  {} {} {}", branch, sub.name, format!("({})", sub.id).dimmed());

            let last_item = sub.items.len().saturating_sub(1);
            for (j, item) in sub.items.iter().enumerate() {
                let twig = if j == last_item { "└──" } else { "├──" };
                println!("  {}{} {}", rail, twig, item.name);
            }
        }
        println!();
    }
}
