//! Command-line interface for the article schema.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::catalog::create_article_schema;
use crate::config::SchemaConfig;
use crate::engine::{decode_document, encode_document};
use crate::error::Result;
use crate::model::Node;
use crate::registry::{MarkPolicy, Schema};

/// Article schema - decode, encode and normalize article markup.
#[derive(Parser)]
#[command(name = "article-schema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Schema configuration (YAML); defaults to the product policy
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite XHTML markup into its canonical form.
    Normalize {
        /// XHTML input file
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode XHTML markup into a JSON document.
    Decode {
        /// XHTML input file
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode a JSON document as XHTML markup.
    Encode {
        /// JSON document file
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a JSON document against content models and mark policies.
    Check {
        /// JSON document file
        input: PathBuf,
    },

    /// List the active node and mark types.
    Catalog,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SchemaConfig::load(path)?,
        None => SchemaConfig::default(),
    };
    let schema = create_article_schema(&config)?;

    match cli.command {
        Commands::Normalize { input, output } => {
            let xhtml = std::fs::read_to_string(&input)?;
            let doc = decode_document(&schema, &xhtml)?;
            emit(&encode_document(&schema, &doc)?, output.as_deref())
        }
        Commands::Decode { input, output } => {
            let xhtml = std::fs::read_to_string(&input)?;
            let doc = decode_document(&schema, &xhtml)?;
            emit(&serde_json::to_string_pretty(&doc)?, output.as_deref())
        }
        Commands::Encode { input, output } => {
            let doc = read_document(&input)?;
            emit(&encode_document(&schema, &doc)?, output.as_deref())
        }
        Commands::Check { input } => check_command(&schema, &input),
        Commands::Catalog => {
            print_catalog(&schema);
            Ok(())
        }
    }
}

fn read_document(path: &Path) -> Result<Node> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))?;
            eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn check_command(schema: &Schema, input: &Path) -> Result<()> {
    let doc = read_document(input)?;
    schema.check(&doc)?;
    println!("{} {}", style("Valid:").green().bold(), input.display());
    Ok(())
}

fn print_catalog(schema: &Schema) {
    println!("{}", style("Nodes").bold());
    for name in schema.node_names() {
        let Some(spec) = schema.node(name) else {
            continue;
        };
        let content = schema
            .content_expr(name)
            .map(ToString::to_string)
            .unwrap_or_default();
        let mut notes = spec.groups.clone();
        if spec.atom {
            notes.push("atom".to_string());
        }
        if spec.marks == MarkPolicy::None {
            notes.push("no marks".to_string());
        }
        println!(
            "  {:<16} {:<30} {}",
            style(name).cyan(),
            content,
            style(notes.join(", ")).dim()
        );
    }

    println!();
    println!("{}", style("Marks").bold());
    for name in schema.mark_names() {
        println!("  {}", style(name).cyan());
    }
}
