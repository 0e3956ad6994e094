use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::cli::output;
use crate::index::{FormatFilter, SearchIndex};
use crate::package::discover_packages;
use crate::utils::index_file_path;

#[derive(Parser)]
#[command(name = "pkgindex")]
#[command(version = "0.1.0")]
#[command(about = "Index and search locally built data packages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register every package found under a directory
    Index {
        /// Directory or metadata file to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Show what would be indexed without writing
        #[arg(short, long)]
        list: bool,
    },
    /// List all indexed packages, best first
    List {
        /// Restrict output: a format name, `issued`, or `all`
        #[arg(short, long, default_value = "all")]
        format: FormatFilter,
        /// Emit machine-readable JSON
        #[arg(short, long)]
        json: bool,
        /// Show local file paths instead of URLs
        #[arg(short, long)]
        path: bool,
    },
    /// Search the index for a term
    Search {
        /// Package name, identifier, or locator to look up
        term: String,
        /// Restrict output: a format name, `issued`, or `all`
        #[arg(short, long, default_value = "issued")]
        format: FormatFilter,
        /// Print only the single best match
        #[arg(short = '1', long)]
        one: bool,
        /// Emit machine-readable JSON
        #[arg(short, long)]
        json: bool,
        /// Show local file paths instead of URLs
        #[arg(short, long)]
        path: bool,
    },
    /// Print the location of the index file
    Config,
    /// Reset the index to empty
    Clear,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Index { path, list }) => cmd_index(&path, list),
        Some(Commands::List { format, json, path }) => cmd_list(format, json, path),
        Some(Commands::Search { term, format, one, json, path }) => {
            cmd_search(&term, format, one, json, path)
        }
        Some(Commands::Config) => cmd_config(),
        Some(Commands::Clear) => cmd_clear(),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn open_index() -> Result<SearchIndex> {
    Ok(SearchIndex::new(index_file_path()?))
}

fn cmd_index(path: &Path, list_only: bool) -> Result<()> {
    let packages = discover_packages(path)
        .with_context(|| format!("Failed to scan {}", path.display()))?;

    if list_only {
        let rows: Vec<[String; 2]> = packages
            .iter()
            .map(|p| [p.name.clone(), p.metadata_path.display().to_string()])
            .collect();
        output::print_table(["Name", "Path"], &rows);
        return Ok(());
    }

    let mut index = open_index()?;
    for package in &packages {
        index.add_package(package)?;
    }
    index.write()?;
    println!("Indexed {} packages", packages.len());

    Ok(())
}

fn cmd_list(filter: FormatFilter, json: bool, as_path: bool) -> Result<()> {
    let mut index = open_index()?;
    let packages: Vec<_> =
        index.list()?.into_iter().filter(|p| filter.accepts(p.format)).collect();
    output::print_packages(&packages, json, as_path)
}

fn cmd_search(term: &str, filter: FormatFilter, one: bool, json: bool, as_path: bool) -> Result<()> {
    let mut index = open_index()?;

    if one {
        match index.resolve_one(term, filter)? {
            Some(package) => println!("{}", output::render_location(&package, as_path)),
            None => bail!("No package matching `{term}`"),
        }
        return Ok(());
    }

    let packages = index.search(term, filter)?;
    output::print_packages(&packages, json, as_path)
}

fn cmd_config() -> Result<()> {
    println!("{}", index_file_path()?.display());
    Ok(())
}

fn cmd_clear() -> Result<()> {
    let mut index = open_index()?;
    index.clear()?;
    println!("Cleared the index");
    Ok(())
}
