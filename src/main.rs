//! snipmark - snippet markup previewer and abbreviation manager.
//!
//! # Usage
//!
//! ```bash
//! snipmark render '**Best,** *Sam*' --format html
//! snipmark add ';sig' 'Best,\n**Sam**'
//! snipmark simulate 'thanks ;sig'
//! snipmark dashboard --watch
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use snipmark::app::App;
use snipmark::config::{
    ConfigFlags, OutputFormat, clear_config_flags, default_snippets_path, global_config_path,
    load_config_flags, local_override_path, parse_flag_tokens, save_config_flags,
};
use snipmark::markup::{
    RenderOptions, format_tree, has_formatting, plain_text, render_with_options, to_html,
};
use snipmark::matcher::{Matcher, Payload};
use snipmark::perf;
use snipmark::snippet::{JsonSnippetStore, SnippetStore};
use snipmark::sync::{DEFAULT_SYNC_PREFIX, check_prefix, load_table, plan_sync, save_table};

/// Preview snippet markup and manage abbreviations
#[derive(Parser, Debug)]
#[command(name = "snipmark", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Snippet file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    snippets: Option<PathBuf>,

    /// Nesting depth at which markup is kept literal
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<usize>,

    /// Abbreviation prefix selecting snippets for sync
    #[arg(long, global = true, value_name = "PREFIX")]
    sync_prefix: Option<String>,

    /// Log timing of the main operations
    #[arg(long, global = true)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse markup and print the result
    Render {
        /// Markup text (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read markup from a file
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Exit 0 if the text carries formatting, 1 otherwise
    Check {
        /// Markup text (reads stdin when omitted)
        text: Option<String>,
    },
    /// List stored snippets
    List,
    /// Add a snippet
    Add {
        abbreviation: String,
        expansion: String,
    },
    /// Change the abbreviation and/or expansion of a snippet
    Edit {
        id: String,
        #[arg(long)]
        abbreviation: Option<String>,
        #[arg(long)]
        expansion: Option<String>,
    },
    /// Delete a snippet
    Remove { id: String },
    /// Type text through the matcher and print every expansion
    Simulate { typed: String },
    /// Mirror prefixed snippets into a replacement table
    Sync {
        /// Replacement table JSON file
        #[arg(long, value_name = "PATH")]
        table: PathBuf,

        /// Print the plan without writing the table
        #[arg(long)]
        dry_run: bool,
    },
    /// Browse snippets in a terminal dashboard
    Dashboard {
        /// Reload when the snippet file changes
        #[arg(short, long)]
        watch: bool,
    },
}

fn main() -> Result<ExitCode> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Initialize logging once the merged flags say whether timings are wanted
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(perf::env_filter(effective.perf))
        .init();
    perf::set_enabled(effective.perf);

    let snippets_path = effective
        .snippets
        .clone()
        .unwrap_or_else(default_snippets_path);
    let options = effective
        .max_depth
        .map_or_else(RenderOptions::default, |depth| {
            RenderOptions::default().with_max_depth(depth)
        });

    match cli.command {
        Command::Render { text, file, format } => {
            let source = read_source(text, file.as_deref())?;
            let format = format.or(effective.format).unwrap_or(OutputFormat::Tree);
            print_rendered(&source, format, &options)?;
        }
        Command::Check { text } => {
            let source = read_source(text, None)?;
            if has_formatting(&source) {
                println!("formatted");
            } else {
                println!("plain");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::List => {
            let store = JsonSnippetStore::new(snippets_path);
            let snippets = store.list().context("Failed to list snippets")?;
            if snippets.is_empty() {
                println!("No snippets in {}", store.path().display());
            }
            for snippet in snippets {
                let flag = if has_formatting(&snippet.expansion) {
                    "rich "
                } else {
                    "plain"
                };
                println!(
                    "{}  {flag}  {}  {}",
                    snippet.id,
                    snippet.abbreviation,
                    snippet.expansion.replace('\n', "\\n")
                );
            }
        }
        Command::Add {
            abbreviation,
            expansion,
        } => {
            let mut store = JsonSnippetStore::new(snippets_path);
            let id = store
                .create(&abbreviation, &expansion)
                .context("Failed to add snippet")?;
            println!("{id}");
        }
        Command::Edit {
            id,
            abbreviation,
            expansion,
        } => {
            let mut store = JsonSnippetStore::new(snippets_path);
            let snippet = store
                .update(&id, abbreviation.as_deref(), expansion.as_deref())
                .with_context(|| format!("Failed to edit snippet {id}"))?;
            println!("{}  {}", snippet.abbreviation, snippet.expansion);
        }
        Command::Remove { id } => {
            let mut store = JsonSnippetStore::new(snippets_path);
            store
                .delete(&id)
                .with_context(|| format!("Failed to remove snippet {id}"))?;
        }
        Command::Simulate { typed } => {
            let store = JsonSnippetStore::new(snippets_path);
            let mut matcher = Matcher::new(store.list().context("Failed to load snippets")?);
            let fired = matcher.feed_str(&typed);
            if fired.is_empty() {
                println!("No expansions");
            }
            for expansion in fired {
                let kind = match expansion.payload {
                    Payload::Plain(_) => "type",
                    Payload::Rich { .. } => "paste",
                };
                println!(
                    "{}: erase {}, {kind} {:?}",
                    expansion.abbreviation,
                    expansion.erase,
                    expansion.payload.plain()
                );
            }
        }
        Command::Sync { table, dry_run } => {
            let _scope = perf::scope("sync.total");
            let prefix = effective
                .sync_prefix
                .as_deref()
                .unwrap_or(DEFAULT_SYNC_PREFIX);
            check_prefix(prefix)?;
            let store = JsonSnippetStore::new(snippets_path);
            let snippets = store.list().context("Failed to load snippets")?;
            let mut entries = load_table(&table)
                .with_context(|| format!("Failed to read replacement table {}", table.display()))?;
            let plan = plan_sync(&snippets, &entries, prefix);
            for action in &plan.actions {
                println!("{action}");
            }
            if dry_run {
                println!("Dry run: {} change(s) planned.", plan.actions.len());
            } else {
                if !plan.is_empty() {
                    plan.apply(&mut entries);
                    save_table(&table, &entries).with_context(|| {
                        format!("Failed to write replacement table {}", table.display())
                    })?;
                }
                println!("{}", plan.summary());
            }
        }
        Command::Dashboard { watch } => {
            let mut app = App::new(snippets_path)
                .with_watch(watch || effective.watch)
                .with_render_options(options);
            app.run().context("Application error")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_source(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    // A trailing newline from `echo` is not part of the snippet.
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

fn print_rendered(source: &str, format: OutputFormat, options: &RenderOptions) -> Result<()> {
    let segments = {
        let _scope = perf::scope("markup.render");
        render_with_options(source, options)
    };
    match format {
        OutputFormat::Tree => print!("{}", format_tree(&segments)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&segments).context("Failed to serialize segments")?
        ),
        OutputFormat::Html => println!("{}", to_html(&segments)),
        OutputFormat::Plain => println!("{}", plain_text(&segments)),
    }
    Ok(())
}
