//! unhtml CLI - HTML to structured content conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unhtml::{
    parse_file_with_options, parse_files, DirectorySink, HtmlParser, JsonFormat, ParseOptions,
    RenderOptions, StylePolicy, UnknownTagPolicy,
};

#[derive(Parser)]
#[command(name = "unhtml")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert HTML into structured blocks, Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    parse: ParseFlags,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Parsing flags shared by every subcommand.
#[derive(Args, Clone)]
struct ParseFlags {
    /// Fail on the first element that cannot be converted
    #[arg(long, global = true)]
    strict: bool,

    /// Let an inner style element end the style of an outer one of the same kind
    #[arg(long, global = true)]
    toggle_styles: bool,

    /// Convert the contents of unsupported elements instead of dropping them
    #[arg(long, global = true)]
    descend_unknown: bool,

    /// Initial base URL (a <base> element overrides it)
    #[arg(long, global = true, env = "UNHTML_BASE_URL")]
    base_url: Option<String>,

    /// Convert <h4>..<h6> to level-3 headings instead of dropping them
    #[arg(long, global = true)]
    clamp_headings: bool,

    /// Maximum element nesting depth
    #[arg(long, global = true, default_value_t = unhtml::parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl ParseFlags {
    fn to_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new()
            .with_max_depth(self.max_depth)
            .with_clamped_headings(self.clamp_headings);
        if self.strict {
            options = options.strict();
        }
        if self.toggle_styles {
            options = options.with_style_policy(StylePolicy::Toggle);
        }
        if self.descend_unknown {
            options = options.with_unknown_tags(UnknownTagPolicy::Descend);
        }
        if let Some(ref url) = self.base_url {
            options = options.with_base_url(url);
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert HTML to all formats (Markdown, text, JSON)
    Convert {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert HTML to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "markdown")]
        table_mode: TableMode,

        /// Maximum heading level (1-3)
        #[arg(long, default_value = "3")]
        max_heading: u8,

        /// Do not escape Markdown syntax characters in text
        #[arg(long)]
        no_escape: bool,
    },

    /// Convert HTML to plain text
    Text {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Join lines inside a block with spaces
        #[arg(long)]
        flatten: bool,
    },

    /// Convert HTML to JSON
    Json {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert many HTML files to JSON in parallel
    Batch {
        /// Input HTML files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// Standard Markdown tables
    Markdown,
    /// HTML tables for ragged or multi-line tables
    Html,
}

impl From<TableMode> for unhtml::TableFallback {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Markdown => unhtml::TableFallback::Markdown,
            TableMode::Html => unhtml::TableFallback::Html,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.parse.to_options();

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref(), options),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            table_mode,
            max_heading,
            no_escape,
        }) => {
            let render_options = RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_table_fallback(table_mode.into())
                .with_max_heading(max_heading)
                .with_escaping(!no_escape);
            cmd_markdown(&input, output.as_deref(), options, &render_options)
        }
        Some(Commands::Text {
            input,
            output,
            flatten,
        }) => cmd_text(&input, output.as_deref(), options, flatten),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), options, compact),
        Some(Commands::Info { input, json }) => cmd_info(&input, options, json),
        Some(Commands::Batch {
            inputs,
            output,
            compact,
        }) => cmd_batch(&inputs, &output, options, compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), options)
            } else {
                println!("{}", "Usage: unhtml <FILE> [OUTPUT]".yellow());
                println!("       unhtml --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {msg}") {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = progress_bar(4);

    // Embedded images go straight to disk while parsing
    pb.set_message("Parsing HTML...");
    let mut sink = DirectorySink::new(output_dir.join("images"))?;
    let parser = HtmlParser::open_with_options(input, options)?;
    let doc = parser.parse_with_sink(&mut sink)?;
    pb.inc(1);

    let render_options = RenderOptions::new()
        .with_frontmatter(true)
        .with_image_prefix("images/");

    pb.set_message("Generating Markdown...");
    let markdown = unhtml::render::to_markdown(&doc, &render_options)?;
    fs::write(output_dir.join("extract.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = unhtml::render::to_text(&doc, &render_options)?;
    fs::write(output_dir.join("extract.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = unhtml::render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("content.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} extract.md", "├─".dimmed());
    println!("  {} extract.txt", "├─".dimmed());
    println!("  {} content.json", "├─".dimmed());
    println!("  {} images/ ({} embedded)", "└─".dimmed(), sink.written());

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    options: ParseOptions,
    render_options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, options)?;
    let markdown = unhtml::render::to_markdown(&doc, render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    options: ParseOptions,
    flatten: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, options)?;
    let render_options = RenderOptions::new().with_line_breaks(!flatten);
    let text = unhtml::render::to_text(&doc, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    options: ParseOptions,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unhtml::render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path, options: ParseOptions, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let format = unhtml::detect_format_from_path(input)?;
    let doc = parse_file_with_options(input, options)?;
    let stats = doc.stats();

    if json {
        let value = serde_json::json!({
            "file": input.display().to_string(),
            "encoding": format.encoding.to_string(),
            "replaced_bytes": format.had_replacements,
            "title": doc.title,
            "metadata": doc.metadata,
            "base_url": doc.base_url,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: HTML ({}{})",
        "Format".bold(),
        format.encoding,
        if format.has_doctype { ", doctype" } else { "" }
    );
    if format.had_replacements {
        println!("{}", "Malformed bytes were replaced during decoding".yellow());
    }
    if let Some(ref title) = doc.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref base_url) = doc.base_url {
        println!("{}: {}", "Base URL".bold(), base_url);
    }
    for (name, content) in &doc.metadata {
        println!("{}: {}", name.bold(), content);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), doc.block_count());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Embeds".bold(), stats.embed_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: &Path,
    options: ParseOptions,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let pb = progress_bar(inputs.len() as u64);
    pb.set_message("Converting...");

    let results = parse_files(inputs, &options);

    let mut failed = 0;
    for (path, result) in results {
        pb.inc(1);
        let doc = match result {
            Ok(doc) => doc,
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), path.display(), e));
                failed += 1;
                continue;
            }
        };

        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let target = output.join(format!("{}.json", stem));
        fs::write(&target, unhtml::render::to_json(&doc, format)?)?;
    }

    pb.finish_with_message("Done!");
    println!(
        "\n{} {} converted, {} failed",
        "Batch complete:".green().bold(),
        inputs.len() - failed,
        failed
    );

    if failed > 0 {
        return Err(format!("{} file(s) could not be converted", failed).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unhtml".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML to structured content conversion tool");
    println!();
    println!("License: MIT");
}
