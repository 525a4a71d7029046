//! Swagger Generator
//!
//! Generates a Swagger 2.0 document from a YANG schema tree.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use swagger_gen::config::{ElementKind, Format, GeneratorConfig, ModelStrategyKind, TagStrategy};
use swagger_gen::errors::GeneratorError;
use swagger_gen::generator::SwaggerGenerator;
use swagger_gen::input::load_context;
use swagger_gen::output::write_file;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Swagger generator - transforms YANG schema trees into Swagger 2.0 documents
#[derive(Parser, Debug)]
#[command(name = "swagger-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema tree to read (.json, .yaml or .yml)
    #[arg(short, long)]
    input: PathBuf,

    /// Module to generate for; repeat for several (default: all modules)
    #[arg(short, long = "module")]
    modules: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generator configuration file (.json, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long)]
    format: Option<Format>,

    /// Element kinds to generate, comma separated
    #[arg(long, value_delimiter = ',')]
    elements: Option<Vec<ElementKind>>,

    /// Model strategy
    #[arg(long)]
    strategy: Option<ModelStrategyKind>,

    /// Tag strategy; repeat for several
    #[arg(long = "tag")]
    tags: Vec<TagStrategy>,

    /// Host written into the document
    #[arg(long)]
    host: Option<String>,

    /// Base path written into the document
    #[arg(long)]
    base_path: Option<String>,

    /// API version written into the document
    #[arg(long)]
    api_version: Option<String>,

    /// Resolve alias chains during post-processing
    #[arg(long)]
    collapse_alias_chains: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Loads the configuration file, if any, and applies flag overrides.
    fn config(&self) -> Result<GeneratorConfig, GeneratorError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(elements) = &self.elements {
            config = config.with_elements(elements.iter().copied());
        }
        if let Some(strategy) = self.strategy {
            config = config.with_strategy(strategy);
        }
        for tag in &self.tags {
            config = config.with_tag(*tag);
        }
        if let Some(host) = &self.host {
            config = config.with_host(host);
        }
        if let Some(base_path) = &self.base_path {
            config = config.with_base_path(base_path);
        }
        if let Some(version) = &self.api_version {
            config = config.with_version(version);
        }
        if self.collapse_alias_chains {
            config = config.with_collapse_alias_chains(true);
        }
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            // -v: processed nodes
            1 => "warn,swagger_gen=info".to_string(),
            // -vv: skips and rewrites
            2 => "info,swagger_gen=debug,swagger_define=debug".to_string(),
            _ => "debug,swagger_gen=trace,swagger_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config()?;
    let format = config.format;
    let ctx = load_context(&cli.input)?;

    let mut generator = if cli.modules.is_empty() {
        SwaggerGenerator::for_all_modules(&ctx, config)?
    } else {
        SwaggerGenerator::new(&ctx, &cli.modules, config)?
    };

    match &cli.output {
        Some(path) => {
            let doc = generator.generate()?;
            write_file(&doc, format, path)?;
            eprintln!(
                "{} {} ({} paths, {} definitions)",
                "Generated".green().bold(),
                path.display(),
                doc.paths.len(),
                doc.definitions.as_ref().map_or(0, |d| d.len())
            );
        }
        None => {
            generator.generate_to(io::stdout().lock())?;
        }
    }

    Ok(())
}
