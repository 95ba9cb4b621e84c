//! SEO Checker CLI
//!
//! Checks an HTML file against the configured SEO rules.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use seo_checker::config::{ColorMode, Config, OutputFormat};
use seo_checker::engine::{Checker, Input};
use seo_checker::output::formatter_for;
use seo_checker::rule::load_rules;
use std::path::PathBuf;

const BANNER: &str = "************************ SEO CHECKER ************************";

#[derive(Parser)]
#[command(
    name = "seo-checker",
    version,
    about = "Check HTML files against structural SEO rules"
)]
struct Cli {
    /// HTML file to check ("-" reads standard input)
    input: Option<String>,

    /// Rules file (YAML or JSON) replacing the configured rules
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report to this file instead of the console
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// List the effective rules and the handlers they resolve to
    #[arg(long)]
    list_rules: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };

    let rules = match &cli.rules {
        Some(path) => Some(
            load_rules(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        ),
        None => None,
    };

    config.merge_cli(cli.format.map(OutputFormat::from), rules);
    Ok(config)
}

fn list_rules(checker: &Checker) {
    println!("{}", "Rules:".bold());
    for (index, rule) in checker.default_rules().iter().enumerate() {
        let resolver = checker.resolve(rule);
        let handlers = if resolver.is_empty() {
            "(no handler)".dimmed().to_string()
        } else {
            resolver.handler_ids().join(", ").cyan().to_string()
        };
        println!("  {:>3}  {}  -> {}", index, rule, handlers);
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let config = load_config(cli)?;

    match config.output.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format = config.output.format;
    let checker = Checker::new(config.rules);

    if cli.list_rules {
        list_rules(&checker);
        return Ok(0);
    }

    let input = match cli.input.as_deref() {
        Some("-") => Input::stdin(),
        Some(path) => Input::from(PathBuf::from(path)),
        None => return Err(seo_checker::CheckError::InputMissing.into()),
    };

    if cli.verbose {
        eprintln!(
            "Checking {} against {} rules",
            input.origin().cyan(),
            checker.default_rules().len()
        );
    }

    let report = checker.run_report(input, None)?;
    let formatter = formatter_for(format);
    let rendered = checker.emit(&report, cli.output.as_deref(), formatter.as_ref())?;

    match &cli.output {
        Some(_) => println!("{}", rendered.green()),
        None => {
            println!();
            println!("{}", BANNER.bold());
            if report.is_clean() && format == OutputFormat::Text {
                println!("{}", "No SEO issues found".green());
            } else {
                println!("{}", rendered);
            }
            println!();
        }
    }

    if cli.verbose {
        eprintln!(
            "{} diagnostic(s) from {} rules in {:.2}ms",
            report.diagnostics.len(),
            report.rules_evaluated,
            report.duration.as_secs_f64() * 1000.0
        );
    }

    Ok(report.exit_code())
}

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            2
        }
    };

    std::process::exit(exit_code);
}
