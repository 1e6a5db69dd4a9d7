mod flows;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::flows::{
    build_engine, collect_rows, format_list_json, format_list_lines, format_status_lines,
    load_config, outcome_line, run_batch,
};
use crate::render::{current_output_style, log_observer, render_status_line};

#[derive(Parser, Debug)]
#[command(name = "hostmask")]
#[command(about = "Reversible host identity mutations", long_about = None)]
struct Cli {
    #[arg(long)]
    prefix: Option<PathBuf>,
    #[arg(long, global = true)]
    plain: bool,
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    List {
        #[arg(long)]
        json: bool,
    },
    Status {
        id: u32,
    },
    Apply {
        id: u32,
        #[arg(long, default_value = "")]
        params: String,
    },
    Restore {
        id: u32,
    },
    Batch {
        #[arg(required = true)]
        ids: Vec<u32>,
        #[arg(long, default_value = "")]
        params: String,
    },
    Clear {
        id: u32,
    },
    Get {
        name: String,
        #[arg(long, default_value = "")]
        default: String,
    },
    Set {
        name: String,
        value: String,
    },
    Doctor,
    Completions {
        shell: Shell,
    },
    Version,
}

fn main() -> ExitCode {
    match run_cli(Cli::parse()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run_cli(cli: Cli) -> Result<u8> {
    let style = current_output_style(cli.plain);

    match cli.command {
        Commands::List { json } => {
            let engine = build_engine(cli.prefix)?;
            let rows = collect_rows(&engine)?;
            if json {
                println!("{}", format_list_json(&rows)?);
            } else {
                for line in format_list_lines(&rows) {
                    println!("{line}");
                }
            }
            Ok(0)
        }
        Commands::Status { id } => {
            let engine = build_engine(cli.prefix)?;
            for line in format_status_lines(&engine, id)? {
                println!("{line}");
            }
            Ok(0)
        }
        Commands::Apply { id, params } => {
            let mut engine = build_engine(cli.prefix)?;
            if cli.verbose {
                engine.set_log_observer(Some(log_observer(style)));
            }
            let code = engine.apply(id, &params);
            println!("{}", outcome_line(style, "apply", id, code));
            if !engine.last_error_message().is_empty() {
                eprintln!("{}", engine.last_error_message());
            }
            Ok(code.code() as u8)
        }
        Commands::Restore { id } => {
            let mut engine = build_engine(cli.prefix)?;
            if cli.verbose {
                engine.set_log_observer(Some(log_observer(style)));
            }
            let code = engine.restore(id);
            println!("{}", outcome_line(style, "restore", id, code));
            if !engine.last_error_message().is_empty() {
                eprintln!("{}", engine.last_error_message());
            }
            Ok(code.code() as u8)
        }
        Commands::Batch { ids, params } => {
            let mut engine = build_engine(cli.prefix)?;
            if cli.verbose {
                engine.set_log_observer(Some(log_observer(style)));
            }
            let code = run_batch(&mut engine, style, &ids, &params);
            println!(
                "{}",
                render_status_line(style, code.as_str(), &format!("batch of {}", ids.len()))
            );
            if !engine.last_error_message().is_empty() {
                eprintln!("{}", engine.last_error_message());
            }
            Ok(code.code() as u8)
        }
        Commands::Clear { id } => {
            let mut engine = build_engine(cli.prefix)?;
            engine.clear_backup(id)?;
            println!("{}", render_status_line(style, "cleared", &format!("operation {id}")));
            Ok(0)
        }
        Commands::Get { name, default } => {
            let engine = build_engine(cli.prefix)?;
            println!("{}", engine.backups().setting(&name, &default)?);
            Ok(0)
        }
        Commands::Set { name, value } => {
            let engine = build_engine(cli.prefix)?;
            engine.backups().save_setting(&name, &value)?;
            println!("{name}={value}");
            Ok(0)
        }
        Commands::Doctor => {
            let prefix = flows::resolved_prefix(cli.prefix)?;
            let config = load_config(&prefix)?;
            for line in flows::format_doctor_lines(&prefix, &config) {
                println!("{}", render_status_line(style, "step", &line));
            }
            Ok(0)
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "hostmask", &mut std::io::stdout());
            Ok(0)
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}
