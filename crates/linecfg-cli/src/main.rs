use std::path::Path;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use colored::Colorize;
use linecfg::{ConfigStatus, FlatConfig, SectionedConfig, Value};
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Get { file, key, section } => {
            let section = section_arg(cli.sectioned, section)?;
            cmd_get(&file, &key, section.as_deref())
        }
        Commands::Set {
            file,
            key,
            value,
            section,
        } => {
            let section = section_arg(cli.sectioned, section)?;
            cmd_set(&file, &key, &value, section.as_deref())
        }
        Commands::Unset { file, key, section } => {
            let section = section_arg(cli.sectioned, section)?;
            cmd_unset(&file, &key, section.as_deref())
        }
        Commands::List { file } => cmd_list(&file, cli.sectioned),
        Commands::Export { file } => cmd_export(&file, cli.sectioned),
    }
}

/// Keyed commands on sectioned files need to know which section to touch.
fn section_arg(sectioned: bool, section: Option<String>) -> Result<Option<String>> {
    if sectioned && section.is_none() {
        bail!("sectioned files need --section <name>");
    }
    Ok(section)
}

fn ensure_loaded(status: ConfigStatus, path: &Path) -> Result<()> {
    if status.is_ok() {
        Ok(())
    } else {
        Err(anyhow!("could not load {}: {}", path.display(), status))
    }
}

fn ensure_saved(status: ConfigStatus, path: &Path) -> Result<()> {
    if status.is_ok() {
        Ok(())
    } else {
        Err(anyhow!("could not save {}: {}", path.display(), status))
    }
}

/// Loading a file that does not exist yet is fine for `set`; anything
/// else is reported.
fn ensure_loadable(status: ConfigStatus, path: &Path) -> Result<()> {
    match status {
        ConfigStatus::NoError | ConfigStatus::FileNotFound => Ok(()),
        other => Err(anyhow!("could not load {}: {}", path.display(), other)),
    }
}

fn cmd_get(file: &Path, key: &str, section: Option<&str>) -> Result<()> {
    let value = match section {
        Some(name) => {
            let doc = SectionedConfig::open(file);
            ensure_loaded(doc.status(), file)?;
            doc.section(name)?.get(key)?.clone()
        }
        None => {
            let doc = FlatConfig::open(file);
            ensure_loaded(doc.status(), file)?;
            doc.get(key)?.clone()
        }
    };
    println!("{}", value);
    Ok(())
}

fn cmd_set(file: &Path, key: &str, value: &str, section: Option<&str>) -> Result<()> {
    match section {
        Some(name) => {
            let mut doc = SectionedConfig::open(file);
            ensure_loadable(doc.status(), file)?;
            doc.flush();
            doc.add_section(name);
            let group = doc.section_mut(name)?;
            if !group.insert(key, value) {
                group.update(key, value);
            }
            doc.save();
            ensure_saved(doc.status(), file)?;
        }
        None => {
            let mut doc = FlatConfig::open(file);
            ensure_loadable(doc.status(), file)?;
            doc.flush();
            if !doc.insert(key, value) {
                doc.update(key, value);
            }
            doc.save();
            ensure_saved(doc.status(), file)?;
        }
    }
    println!("{} {} = {}", "set".green(), key, value);
    Ok(())
}

fn cmd_unset(file: &Path, key: &str, section: Option<&str>) -> Result<()> {
    match section {
        Some(name) => {
            let mut doc = SectionedConfig::open(file);
            ensure_loaded(doc.status(), file)?;
            doc.section_mut(name)?.pop(key)?;
            doc.save();
            ensure_saved(doc.status(), file)?;
        }
        None => {
            let mut doc = FlatConfig::open(file);
            ensure_loaded(doc.status(), file)?;
            doc.pop(key)?;
            doc.save();
            ensure_saved(doc.status(), file)?;
        }
    }
    println!("{} {}", "unset".yellow(), key);
    Ok(())
}

fn cmd_list(file: &Path, sectioned: bool) -> Result<()> {
    if sectioned {
        let doc = SectionedConfig::open(file);
        ensure_loaded(doc.status(), file)?;
        for name in doc.sections() {
            println!("{}", format!("[{}]", name).cyan().bold());
            if let Ok(section) = doc.section(name) {
                print_pairs(section.iter());
            }
            println!();
        }
    } else {
        let doc = FlatConfig::open(file);
        ensure_loaded(doc.status(), file)?;
        print_pairs(doc.iter());
    }
    Ok(())
}

fn cmd_export(file: &Path, sectioned: bool) -> Result<()> {
    let json = if sectioned {
        let doc = SectionedConfig::open(file);
        ensure_loaded(doc.status(), file)?;
        serde_json::to_string_pretty(&doc)?
    } else {
        let doc = FlatConfig::open(file);
        ensure_loaded(doc.status(), file)?;
        serde_json::to_string_pretty(&doc)?
    };
    println!("{}", json);
    Ok(())
}

fn print_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a Value)>) {
    let pairs: Vec<_> = pairs.collect();
    let width = pairs.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    for (key, value) in pairs {
        let pad = " ".repeat(width - key.width());
        println!("{}{} = {}", key.bold(), pad, value);
    }
}
