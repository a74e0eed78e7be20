//! confpatch CLI
//!
//! Entry point for the `confpatch` command-line tool.

use clap::{Parser, Subcommand};
use confpatch::{Document, ExplainOutput, JsonHostConfig, PatchReport, Patcher, RuleSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "confpatch")]
#[command(about = "Apply replacement rules to a JSON configuration document", version)]
struct Cli {
    /// Log rule resolution and writes to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a rule set and write the patched document
    Apply {
        /// Rule file (.toml or .json)
        #[arg(long, short = 'r')]
        rules: PathBuf,

        /// Host configuration file (.toml or .json) for placeholders
        #[arg(long)]
        host_config: Option<PathBuf>,

        /// Write the patched document here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print a patch report to stderr
        #[arg(long)]
        report: bool,

        /// The JSON document to patch
        input: PathBuf,
    },
    /// Show how each rule resolves and which paths it targets, without writing the output file
    /// Show how each rule resolves and which paths it targets, without writing the output
    Explain {
        /// Rule file (.toml or .json)
        #[arg(long, short = 'r')]
        rules: PathBuf,

        /// Host configuration file (.toml or .json) for placeholders
        #[arg(long)]
        host_config: Option<PathBuf>,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,

        /// The JSON document to evaluate against
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Apply {
            rules,
            host_config,
            output,
            report,
            input,
        } => run_apply(&rules, host_config.as_deref(), output.as_deref(), report, &input),
        Commands::Explain {
            rules,
            host_config,
            human,
            input,
        } => run_explain(&rules, host_config.as_deref(), human, &input),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_apply(
    rules_path: &Path,
    host_path: Option<&Path>,
    output_path: Option<&Path>,
    report: bool,
    input_path: &Path,
) {
    let (rules, host, data) = load_inputs(rules_path, host_path, input_path);

    let document = match Document::parse(&data) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error patching {}: {}", input_path.display(), e);
            process::exit(1);
        }
    };
    let before = report.then(|| document.clone());

    let patched = match Patcher::new(&host).patch(document, &rules.rules) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error patching {}: {}", input_path.display(), e);
            process::exit(1);
        }
    };

    let json = match patched.document.to_json_pretty() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path.display(), e);
                process::exit(1);
            }
        }
        None => println!("{}", json),
    }

    if let Some(before) = before {
        let report = PatchReport::build(&before, &patched.document, patched.outcomes)
            .and_then(|r| r.to_json());
        match report {
            Ok(json) => eprintln!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    }
}

fn run_explain(rules_path: &Path, host_path: Option<&Path>, human: bool, input_path: &Path) {
    let (rules, host, data) = load_inputs(rules_path, host_path, input_path);

    let patched = match Patcher::new(&host).patch_bytes(&data, &rules.rules) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error evaluating rules: {}", e);
            process::exit(1);
        }
    };

    let explanation = ExplainOutput::new(input_path.display().to_string(), patched.outcomes);

    if human {
        println!("{}", explanation.to_human());
    } else {
        match explanation.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    }
}

fn load_inputs(
    rules_path: &Path,
    host_path: Option<&Path>,
    input_path: &Path,
) -> (RuleSet, JsonHostConfig, Vec<u8>) {
    let rules = match RuleSet::from_file(rules_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading rules: {}", e);
            process::exit(1);
        }
    };

    let host = match host_path {
        Some(path) => match JsonHostConfig::from_file(path) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("Error loading host configuration: {}", e);
                process::exit(1);
            }
        },
        None => JsonHostConfig::empty(),
    };

    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path.display(), e);
            process::exit(1);
        }
    };

    (rules, host, data)
}
