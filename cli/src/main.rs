//! docxtree CLI - word-processing package conversion tool
//!
//! A command-line tool for converting .docx files to HTML or to the JSON
//! form of the document tree.

use clap::{Parser, Subcommand};
use colored::*;
use docxtree::docx::{find_part_paths, PartKind};
use docxtree::options::{default_namespaces, DEFAULT_BODY_ELEMENT};
use docxtree::render::{JsonFormat, RenderOptions};
use docxtree::{Package, ReadOptions, Warning};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Word-processing package conversion to HTML and JSON
#[derive(Parser)]
#[command(
    name = "docxtree",
    version,
    about = "Convert .docx documents to HTML or JSON",
    long_about = "docxtree - Word-processing package reader.\n\n\
                  Reads a .docx package into a document tree and writes it as HTML or JSON."
)]
struct Cli {
    /// Log part resolution and parsing details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Resolved name of the body element in the main document
    #[arg(long, global = true, default_value = DEFAULT_BODY_ELEMENT)]
    body_element: String,

    /// Extra namespace mapping as PREFIX=URI (repeatable)
    #[arg(long = "namespace", global = true, value_name = "PREFIX=URI", value_parser = parse_namespace)]
    namespaces: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to HTML
    Html {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix for generated element IDs
        #[arg(long, default_value = "")]
        id_prefix: String,

        /// Keep empty paragraphs
        #[arg(long)]
        keep_empty_paragraphs: bool,

        /// Do not emit page markers at rendered page breaks
        #[arg(long)]
        no_page_markers: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Convert a document to the JSON document tree
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show the resolved parts and document statistics
    Info {
        /// Input file path
        input: PathBuf,

        /// Print the resolved part paths as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Parse a `PREFIX=URI` namespace mapping.
fn parse_namespace(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((prefix, uri)) if !prefix.is_empty() && !uri.is_empty() => {
            Ok((prefix.to_string(), uri.to_string()))
        }
        _ => Err(format!("expected PREFIX=URI, got '{}'", value)),
    }
}

impl Cli {
    /// Reading options: the standard namespace table extended with any
    /// `--namespace` mappings, and the `--body-element` name.
    fn read_options(&self) -> ReadOptions {
        let mut mapping = default_namespaces();
        for (prefix, uri) in &self.namespaces {
            mapping.insert(prefix.as_str(), uri.as_str());
        }
        ReadOptions::new()
            .with_namespace_mapping(mapping)
            .with_body_element_name(self.body_element.as_str())
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let read_options = cli.read_options();
    match cli.command {
        Commands::Html {
            input,
            output,
            id_prefix,
            keep_empty_paragraphs,
            no_page_markers,
            max_heading,
        } => {
            let pb = create_spinner("Reading document...");

            let result = docxtree::read_file(&input, &read_options)?;
            pb.set_message("Rendering to HTML...");

            let options = RenderOptions::new()
                .with_id_prefix(id_prefix)
                .with_ignore_empty_paragraphs(!keep_empty_paragraphs)
                .with_page_markers(!no_page_markers)
                .with_max_heading(max_heading);
            let html = docxtree::render::to_html(&result.value, &options);

            pb.finish_and_clear();
            print_warnings(&result.messages);
            write_output(output.as_ref(), &html)?;

            if let Some(path) = output {
                println!("{} Converted to HTML: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let pb = create_spinner("Reading document...");

            let result = docxtree::read_file(&input, &read_options)?;
            pb.set_message("Rendering to JSON...");

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = docxtree::render::to_json(&result.value, format)?;

            pb.finish_and_clear();
            print_warnings(&result.messages);
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!("{} Converted to JSON: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Info { input, json } => {
            let pb = create_spinner("Analyzing document...");

            let package = Package::open(&input)?;
            let paths = find_part_paths(&package);

            if json {
                pb.finish_and_clear();
                println!("{}", serde_json::to_string_pretty(&paths)?);
                return Ok(());
            }

            let result = docxtree::docx::read(&package, &read_options)?;
            pb.finish_and_clear();

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Entries".bold(), package.list_entries().len());

            println!("\n{}", "Parts".cyan().bold());
            println!("{}", "─".repeat(40));
            print_part(&package, "main document", &paths.main_document);
            for kind in PartKind::ALL {
                print_part(&package, kind.name(), paths.get(kind));
            }

            let doc = &result.value;
            let text = doc.plain_text();
            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Blocks".bold(), doc.children.len());
            println!("{}: {}", "Notes".bold(), doc.notes.len());
            println!("{}: {}", "Comments".bold(), doc.comments.len());
            println!("{}: {}", "Words".bold(), text.split_whitespace().count());
            println!("{}: {}", "Characters".bold(), text.chars().count());
            println!("{}: {}", "Warnings".bold(), result.messages.len());
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "docxtree".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word-processing package reader with HTML and JSON output");
}

fn print_part(package: &Package, label: &str, path: &str) {
    let status = if package.exists(path) {
        "present".green()
    } else {
        "absent".yellow()
    };
    println!("{}: {} ({})", label.bold(), path, status);
}

fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["docxtree", "json", "in.docx", "--verbose", "--compact"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Json { compact: true, .. }));
        assert_eq!(cli.read_options(), ReadOptions::default());
    }

    #[test]
    fn test_read_options_from_flags() {
        let cli = Cli::try_parse_from([
            "docxtree",
            "--body-element",
            "x:content",
            "html",
            "in.docx",
            "--namespace",
            "x=urn:example:doc",
            "--namespace",
            "y=urn:example:other",
        ])
        .unwrap();

        let options = cli.read_options();
        assert_eq!(options.body_element_name, "x:content");
        assert_eq!(options.namespace_mapping.prefix_for("urn:example:doc"), Some("x"));
        assert_eq!(options.namespace_mapping.prefix_for("urn:example:other"), Some("y"));
        assert_eq!(
            options
                .namespace_mapping
                .prefix_for("http://schemas.openxmlformats.org/wordprocessingml/2006/main"),
            Some("w")
        );
    }

    #[test]
    fn test_malformed_namespace_flag_is_rejected() {
        assert!(Cli::try_parse_from(["docxtree", "--namespace", "nouri", "info", "in.docx"]).is_err());
        assert!(Cli::try_parse_from(["docxtree", "--namespace", "=urn:x", "info", "in.docx"]).is_err());
    }
}
