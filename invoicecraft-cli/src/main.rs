//! # invoicecraft CLI
//!
//! Command-line interface for the invoice pipeline.
//!
//! Usage:
//!   invoicecraft generate <record.json>
//!   invoicecraft generate <record.json> --out-dir invoices/
//!   invoicecraft generate <record.json> --dry-run
//!   invoicecraft agents
//!   invoicecraft tools
//!
//! `generate` routes the record through the tool registry - the same path a
//! model-issued tool call takes - so the CLI exercises exactly the shipped
//! tool surface.

use clap::{Parser, Subcommand};
use invoicecraft_agent::{
    builtin_agents, builtin_registry, dispatch_tool, InMemorySessionStore, Session, SessionStore,
    ToolCall,
};
use invoicecraft_doc::{generate_invoice, MemoryRenderer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "invoicecraft")]
#[command(author, version, about = "invoicecraft - invoice generation agent toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (show the session transcript)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show the final result
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an invoice PDF from a JSON record file
    Generate {
        /// Path to the invoice record JSON file
        #[arg(required = true)]
        file: String,

        /// Directory the PDF is written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Print the block sequence instead of writing a PDF
        #[arg(long)]
        dry_run: bool,
    },
    /// List the shipped agent definitions
    Agents,
    /// Show registered tool schemas
    Tools,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_generate(file: &str, out_dir: PathBuf, dry_run: bool, verbose: bool, quiet: bool) {
    let invoice_data = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", file, e);
            std::process::exit(1);
        }
    };

    if dry_run {
        let renderer = MemoryRenderer::new();
        match generate_invoice(&invoice_data, &renderer, &out_dir) {
            Ok(_) => {
                for line in renderer.lines() {
                    println!("{}", line);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let registry = match builtin_registry(out_dir) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error building tool registry: {}", e);
            std::process::exit(1);
        }
    };

    let store = InMemorySessionStore::new();
    let mut session = match store.create_session("invoice_app", "cli") {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error creating session: {}", e);
            std::process::exit(1);
        }
    };

    let arguments = serde_json::json!({ "invoice_data": invoice_data }).to_string();
    let call = ToolCall::new("cli", "generate_invoice_pdf", arguments);

    match dispatch_tool(&registry, &mut session, &call) {
        Ok(result) => {
            let message = result.as_str().map(str::to_string).unwrap_or_else(|| {
                serde_json::to_string_pretty(&result).unwrap_or_default()
            });
            println!("{}", message);

            if let Err(e) = store.save_session(&session) {
                eprintln!("Warning: failed to save session: {}", e);
            }
            if verbose {
                print_transcript(&session);
            }
            if message.starts_with("Error") {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if !quiet {
        eprintln!(
            "Session {} recorded {} turns",
            session.id,
            session.turns.len()
        );
    }
}

fn print_transcript(session: &Session) {
    println!("\n--- Transcript ({}) ---", session.id);
    for (i, turn) in session.turns.iter().enumerate() {
        let tool = turn
            .tool_name
            .as_deref()
            .map(|t| format!(" [{}]", t))
            .unwrap_or_default();
        println!("  {:3}. {:?}{} -> {}", i, turn.role, tool, truncate(&turn.content, 80));
    }
}

fn list_agents() {
    for agent in builtin_agents() {
        println!("{}\n", agent.summary());
    }
}

fn show_tools() {
    let registry = match builtin_registry(PathBuf::from(".")) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error building tool registry: {}", e);
            std::process::exit(1);
        }
    };

    for definition in registry.definitions() {
        println!(
            "{}",
            serde_json::to_string_pretty(definition).unwrap_or_default()
        );
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let cut = s
            .char_indices()
            .take_while(|(i, _)| *i < max_len)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…", &s[..cut])
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate { file, out_dir, dry_run } => {
            run_generate(&file, out_dir, dry_run, cli.verbose, cli.quiet);
        }
        Commands::Agents => list_agents(),
        Commands::Tools => show_tools(),
    }
}
