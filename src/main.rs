//! classfront command line interface
//!
//! Usage:
//!   classfront [OPTIONS] <input-file>
//!
//! Examples:
//!   classfront Program.txt                  # Diagnostics, symbol table and verdict
//!   classfront --tokens Program.txt         # Also print the token table
//!   classfront --trace Program.txt          # Log the parse rule tree

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use classfront::parser::lexer::tokenize;
use classfront::parser::trace::LogTracer;
use classfront::report::Report;
use classfront::{FrontendConfig, Parser};
use crossterm::tty::IsTty;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Lexer, parser and semantic checker for single-class programs
#[derive(ClapParser, Debug)]
#[command(name = "classfront")]
#[command(version)]
#[command(about = "Lexes, parses and type-checks a single-class program", long_about = None)]
struct Cli {
    /// Source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the token table
    #[arg(long)]
    tokens: bool,

    /// Log every grammar rule entered (trace level)
    #[arg(long)]
    trace: bool,

    /// Read a leading zero followed by digits as an octal literal
    #[arg(long)]
    octal: bool,

    /// Check assignments and initialisers against the declared type
    #[arg(long)]
    check_assignments: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    let mut logger = env_logger::Builder::from_default_env();
    logger.filter_level(log_level).format_timestamp(None);
    if cli.trace {
        logger.filter_module("classfront::parser::trace", log::LevelFilter::Trace);
    }
    logger.init();

    let config = build_config(&cli);
    debug!("Input file: {:?}", cli.input);
    debug!("Config: {:?}", config);

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;

    info!("Lexing...");
    let tokens = tokenize(&source, config.lexer);

    let parser = Parser::with_config(tokens, config);
    let analysis = if cli.trace {
        parser.with_tracer(LogTracer).parse()
    } else {
        parser.parse()
    };

    let stdout = io::stdout();
    let color = !cli.no_color && stdout.is_tty();
    let mut out = stdout.lock();
    let report = Report::new(&analysis).with_color(color);

    if cli.tokens {
        report.write_tokens(&mut out)?;
        writeln!(out)?;
    }
    report.write_diagnostics(&mut out)?;
    report.write_symbols(&mut out)?;
    writeln!(out)?;
    report.write_summary(&mut out)?;
    out.flush()?;

    if !analysis.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn build_config(cli: &Cli) -> FrontendConfig {
    let mut config = FrontendConfig::default();
    if cli.octal {
        config = config.with_octal_literals();
    }
    if cli.check_assignments {
        config = config.with_assignment_checks();
    }
    config
}
