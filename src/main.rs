//! kcm CLI
//!
//! Entry point for the `kcm` command-line tool.

use clap::{ArgAction, Args, Parser, Subcommand};
use console::Term;
use kcm::config::{Settings, SettingsFile};
use kcm::discovery::{self, ExcludeRules, PathContext};
use kcm::{
    detect_all, merge_with_current_context, resolve, write_merged, ConfigDocument, PersistOptions,
    PromptError, Prompter, TerminalPrompter,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod output;

/// Exit code for configuration, load and write failures
const EXIT_ERROR: i32 = 1;

/// Exit code when the operator aborts (matches SIGINT convention)
const EXIT_CANCELLED: i32 = 130;

#[derive(Parser)]
#[command(name = "kcm")]
#[command(about = "Kubeconfig Manager", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Kubeconfig files or directories to load (repeatable, comma-separated)
    #[arg(long, value_delimiter = ',')]
    load: Vec<String>,

    /// Path to settings file (default: ~/.config/kcm/config.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Extra glob patterns skipped while scanning directories
    #[arg(long)]
    exclude: Vec<String>,

    /// Merged kubeconfig target (default: ~/.kube/config)
    #[arg(long)]
    save: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge kubeconfigs
    Merge {
        #[command(flatten)]
        source: SourceArgs,

        /// Do not back up the existing target before overwriting it
        #[arg(long)]
        no_backup: bool,

        /// Save without asking for confirmation
        #[arg(long, short = 'y')]
        yes: bool,

        /// Print the merged kubeconfig instead of saving it
        #[arg(long, conflicts_with_all = ["yes", "no_backup"])]
        stdout: bool,
    },

    /// List discovered kubeconfigs and name collisions between them
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    install_interrupt_handler();

    match cli.command {
        Commands::Merge {
            source,
            no_backup,
            yes,
            stdout,
        } => {
            run_merge(&source, no_backup, yes, stdout);
        }
        Commands::List { source } => {
            run_list(&source);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn install_interrupt_handler() {
    // dialoguer hides the cursor while a prompt is active
    let result = ctrlc::set_handler(|| {
        let _ = Term::stderr().show_cursor();
        process::exit(EXIT_CANCELLED);
    });
    if let Err(e) = result {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }
}

fn cli_overrides(source: &SourceArgs, no_backup: bool) -> Option<serde_json::Value> {
    let mut map = serde_json::Map::new();

    if !source.load.is_empty() {
        map.insert("load".to_string(), serde_json::json!(source.load));
    }
    if let Some(ref save) = source.save {
        map.insert("save".to_string(), serde_json::json!(save));
    }
    if !source.exclude.is_empty() {
        map.insert("exclude".to_string(), serde_json::json!(source.exclude));
    }
    if no_backup {
        map.insert("backup".to_string(), serde_json::json!(false));
    }

    if map.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(map))
    }
}

fn load_settings(source: &SourceArgs, no_backup: bool) -> Result<Settings, String> {
    let paths = PathContext::from_env().map_err(|e| e.to_string())?;
    let file = match source.config {
        Some(ref path) => Some(SettingsFile::explicit(path.clone())),
        None => SettingsFile::default_location(&paths),
    };

    Settings::build(file.as_ref(), cli_overrides(source, no_backup), &paths)
        .map_err(|e| e.to_string())
}

fn load_documents(settings: &Settings) -> Result<Vec<ConfigDocument>, String> {
    let exclude = ExcludeRules::with_patterns(&settings.exclude).map_err(|e| e.to_string())?;
    discovery::load(&settings.load, &exclude).map_err(|e| e.to_string())
}

fn fail(msg: &str) -> ! {
    output::error(msg);
    process::exit(EXIT_ERROR);
}

fn run_merge(source: &SourceArgs, no_backup: bool, yes: bool, stdout: bool) {
    let settings = load_settings(source, no_backup).unwrap_or_else(|e| fail(&e));
    let mut documents = load_documents(&settings).unwrap_or_else(|e| fail(&e));

    if documents.is_empty() {
        output::warn("No kubeconfig files found.");
        return;
    }
    output::info(&format!("Loaded {} kubeconfig file(s)", documents.len()));

    let mut prompter = TerminalPrompter::new();
    let has_collisions = !detect_all(&documents).is_empty();
    let needs_terminal = has_collisions || !(yes || stdout);
    if needs_terminal && !prompter.is_interactive() {
        fail("Interactive terminal required (name collisions or save confirmation).");
    }

    let report = match resolve(&mut documents, &mut prompter) {
        Ok(report) => report,
        Err(e) if e.is_cancelled() => {
            output::error(&e.to_string());
            process::exit(EXIT_CANCELLED);
        }
        Err(e) => fail(&e.to_string()),
    };
    if !report.renames.is_empty() {
        output::info(&format!("Applied {} rename(s)", report.renames.len()));
    }

    let merged = merge_with_current_context(&documents, Some(&settings.save));

    if stdout {
        match merged.to_yaml_string() {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => fail(&format!("Error serializing output: {}", e)),
        }
        return;
    }

    if !yes {
        let question = format!(
            "Save merged kubeconfig to file? ({})",
            settings.save.display()
        );
        match prompter.ask_confirm(&question) {
            Ok(true) => {}
            Ok(false) => {
                output::info("Merged kubeconfig not saved.");
                return;
            }
            Err(PromptError::Cancelled) => process::exit(EXIT_CANCELLED),
            Err(e) => fail(&e.to_string()),
        }
    }

    let options = PersistOptions {
        backup: settings.backup,
    };
    match write_merged(&settings.save, &merged, options) {
        Ok(backup) => {
            if let Some(backup) = backup {
                output::info(&format!("Previous kubeconfig backed up to {}", backup.display()));
            }
            output::success(&format!("Saved merged kubeconfig to {}", settings.save.display()));
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn run_list(source: &SourceArgs) {
    let settings = load_settings(source, false).unwrap_or_else(|e| fail(&e));
    let documents = load_documents(&settings).unwrap_or_else(|e| fail(&e));

    if documents.is_empty() {
        println!("No kubeconfig files found.");
        return;
    }

    output::header(&format!("Kubeconfigs ({} total)", documents.len()));
    println!();
    for doc in &documents {
        println!("  {}", doc.source.display());
        println!(
            "    Clusters: {}  Users: {}  Contexts: {}",
            doc.config.clusters.len(),
            doc.config.users.len(),
            doc.config.contexts.len()
        );
        if let Some(ref current) = doc.config.current_context {
            println!("    Current context: {}", current);
        }
    }

    let groups = detect_all(&documents);
    println!();
    if groups.is_empty() {
        println!("No name collisions.");
        return;
    }

    output::header(&format!("Collisions ({} total)", groups.len()));
    println!();
    for group in &groups {
        println!("  {} \"{}\"", group.namespace.entity(), group.name);
        for member in &group.members {
            println!("    {}", documents[member.document].source.display());
        }
    }
}
