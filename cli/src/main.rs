//! cvpdf CLI - bilingual PDF resume generator

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;

use cvpdf::{
    generate, generate_languages, AppConfig, FormatterRegistry, GenerateRequest, GeneratedFile,
    PageSize, RenderOptions, Renderer,
};

const DEFAULT_CONFIG: &str = "config/config.json";

#[derive(Parser, Debug)]
#[command(name = "cvpdf")]
#[command(version)]
#[command(about = "Generate PDF resumes from JSON in several languages", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render a CV to PDF
    Render(RenderArgs),

    /// Check CV data, styles and translations without rendering
    Validate {
        /// CV data file (defaults to the configured one)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Language code
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,

        #[command(flatten)]
        config: ConfigArg,
    },

    /// Print the element stream handed to the layout engine as JSON
    Elements {
        /// CV data file (defaults to the configured one)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Language code
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        config: ConfigArg,
    },

    /// List the supported section types
    Sections,

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    /// CV data file (defaults to the configured one)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Language code, or "all" for every configured language
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Output PDF file (derived from name and role if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Page size
    #[arg(long, value_enum, default_value = "a4")]
    page_size: PaperSize,

    /// Write uncompressed content streams
    #[arg(long)]
    no_compress: bool,

    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Args, Debug, Clone)]
struct ConfigArg {
    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "CVPDF_CONFIG", default_value = DEFAULT_CONFIG)]
    config: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PaperSize {
    /// ISO A4
    A4,
    /// US Letter
    Letter,
}

impl From<PaperSize> for PageSize {
    fn from(size: PaperSize) -> Self {
        match size {
            PaperSize::A4 => PageSize::A4,
            PaperSize::Letter => PageSize::LETTER,
        }
    }
}

impl Commands {
    fn config_path(&self) -> Option<&Path> {
        match self {
            Commands::Render(args) => Some(args.config.config.as_path()),
            Commands::Validate { config, .. } | Commands::Elements { config, .. } => {
                Some(config.config.as_path())
            }
            Commands::Sections | Commands::Version => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli
        .command
        .clone()
        .unwrap_or_else(|| Commands::Render(cli.render.clone()));

    let config = command.config_path().map(AppConfig::load).transpose();
    init_logging(cli.verbose, config.as_ref().ok().and_then(Option::as_ref));

    let result = match config {
        Ok(config) => run(command, config.as_ref()),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` overrides the configured level; `--verbose` overrides both.
fn init_logging(verbose: bool, config: Option<&AppConfig>) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(
        config
            .map(|c| c.logging.level_filter())
            .unwrap_or(LevelFilter::Warn),
    );
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    // A logger may already be installed when running under tests.
    let _ = builder.try_init();
}

fn run(command: Commands, config: Option<&AppConfig>) -> Result<(), Box<dyn Error>> {
    match (command, config) {
        (Commands::Sections, _) => {
            cmd_sections();
            Ok(())
        }
        (Commands::Version, _) => {
            cmd_version();
            Ok(())
        }
        (_, None) => Err("no configuration loaded".into()),
        (Commands::Render(args), Some(config)) => cmd_render(&args, config),
        (
            Commands::Validate {
                input, language, ..
            },
            Some(config),
        ) => cmd_validate(config, input.as_deref(), language.as_deref()),
        (
            Commands::Elements {
                input,
                language,
                output,
                compact,
                ..
            },
            Some(config),
        ) => cmd_elements(
            config,
            input.as_deref(),
            language.as_deref(),
            output.as_deref(),
            compact,
        ),
    }
}

fn effective_language(config: &AppConfig, language: Option<&str>) -> String {
    language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(&config.defaults.language)
        .to_lowercase()
}

fn cmd_render(args: &RenderArgs, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let options = RenderOptions::new()
        .with_page_size(args.page_size.into())
        .with_compression(!args.no_compress);
    let renderer = Renderer::new(options);

    let request = GenerateRequest {
        language: args.language.clone(),
        input: args.input.clone(),
        output: args.output.clone(),
    };

    if !args
        .language
        .as_deref()
        .is_some_and(|l| l.trim().eq_ignore_ascii_case("all"))
    {
        let file = generate(config, &renderer, &request)?;
        print_generated(&file);
        return Ok(());
    }

    if args.output.is_some() {
        log::warn!("--output is ignored with --language all");
    }
    let languages = all_languages(config)?;
    let results = generate_languages(config, &renderer, &request, &languages);

    let mut failures = 0;
    for (language, result) in languages.iter().zip(results) {
        match result {
            Ok(file) => print_generated(&file),
            Err(e) => {
                eprintln!("{} [{}]: {}", "Error".red().bold(), language, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} languages failed", failures, languages.len()).into());
    }
    Ok(())
}

/// Languages mapped in the configuration, else those of the shared
/// translations file, else the default language.
fn all_languages(config: &AppConfig) -> Result<Vec<String>, Box<dyn Error>> {
    let mapped = config.mapped_languages();
    if !mapped.is_empty() {
        return Ok(mapped);
    }

    let translations =
        cvpdf::load_translations(config.translations_path(&config.defaults.language)?)?;
    let languages = translations.languages();
    if languages.is_empty() {
        Ok(vec![config.defaults.language.clone()])
    } else {
        Ok(languages)
    }
}

fn print_generated(file: &GeneratedFile) {
    println!(
        "{} {} {}",
        "Generated".green(),
        file.path.display(),
        format!(
            "[{}, {} page{}]",
            file.language,
            file.stats.pages,
            if file.stats.pages == 1 { "" } else { "s" }
        )
        .dimmed()
    );
}

fn cmd_validate(
    config: &AppConfig,
    input: Option<&Path>,
    language: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let language = effective_language(config, language);
    cvpdf::validate_inputs(config, &language, input)?;
    println!("{} ({})", "Inputs are valid".green().bold(), language);
    Ok(())
}

fn cmd_elements(
    config: &AppConfig,
    input: Option<&Path>,
    language: Option<&str>,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn Error>> {
    let language = effective_language(config, language);
    let data_path = match input {
        Some(path) => path.to_path_buf(),
        None => config.data_path(&language)?,
    };

    let doc = cvpdf::load_document(data_path)?;
    let styles = cvpdf::load_json_file(config.styles_path())?;
    let translations = cvpdf::load_translations(config.translations_path(&language)?)?;
    let elements = cvpdf::render::build_elements(&doc, &styles, &translations, &language)?;

    let json = if compact {
        serde_json::to_string(&elements)?
    } else {
        serde_json::to_string_pretty(&elements)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_sections() {
    println!("{}", "Section types".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for section_type in FormatterRegistry::with_defaults().section_types() {
        println!("  {}", section_type);
    }
}

fn cmd_version() {
    println!("{} {}", "cvpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Bilingual PDF resume generator");
    println!();
    println!("License: MIT");
}
