use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wim_protocol::KnowledgeDocument;
use wim_solver::{
    Analyzer, AnalyzerOptions, Diagnostic, KnowledgeBase, OverrunPolicy, SenseAssignment,
    StaticLexicon, WimGraph, KNOWLEDGE_ENV,
};

#[derive(Parser)]
#[command(author, version, about = "Builds Weak Inferred Meanings from bracketed parses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one parse and print its WIM as JSON
    Analyze(AnalyzeArgs),
    /// Compile a JSON knowledge document to an rkyv archive
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Match every template against its own example parse
    Check {
        #[arg(long, env = KNOWLEDGE_ENV, value_name = "FILE")]
        kb: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        lexicon: Option<PathBuf>,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Knowledge base, JSON or `.rkyv`
    #[arg(long, env = KNOWLEDGE_ENV, value_name = "FILE")]
    kb: Option<PathBuf>,

    #[arg(long, value_name = "FILE")]
    lexicon: PathBuf,

    /// The parse uses Penn Treebank labels
    #[arg(long)]
    penn: bool,

    /// Fail when a template has fewer roles than matched constituents
    #[arg(long)]
    strict: bool,

    #[arg(long, default_value_t = 1)]
    index: u32,

    /// Sentence text; defaults to the parse's leaves
    #[arg(long)]
    text: Option<String>,

    /// Bracketed parse, read from stdin when omitted
    parse: Option<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    index: u32,
    text: String,
    parse: String,
    wim: &'a WimGraph,
    senses: &'a [SenseAssignment],
    diagnostics: &'a [Diagnostic],
    wim_time: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Analyze(args) => analyze(args),
        Command::Compile { input, output } => compile(input, output),
        Command::Check { kb, lexicon } => check(kb, lexicon),
    }
}

fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let knowledge = KnowledgeBase::load_from(args.kb)?;
    let lexicon = StaticLexicon::load(&args.lexicon)?;

    let parse = match args.parse {
        Some(parse) => parse,
        None => io::read_to_string(io::stdin()).context("reading parse from stdin")?,
    };
    let mut tree = wim_parser::parse_tree(&parse)?;
    if args.penn {
        tree = wim_parser::prepare(&tree);
    }

    let options = AnalyzerOptions {
        overrun: if args.strict {
            OverrunPolicy::Strict
        } else {
            OverrunPolicy::Truncate
        },
    };

    let started = Instant::now();
    let analysis = Analyzer::new(&knowledge, &lexicon)
        .with_options(options)
        .analyze_bracket(&tree)?;
    let wim_time = started.elapsed().as_secs_f64();

    let report = Report {
        index: args.index,
        text: args.text.unwrap_or_else(|| tree.leaves().join(" ")),
        parse: parse.trim().to_string(),
        wim: &analysis.wim,
        senses: &analysis.senses,
        diagnostics: &analysis.diagnostics,
        wim_time,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn compile(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    info!(path = %input.display(), "Reading knowledge document");
    let text = fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let document: KnowledgeDocument = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", input.display()))?;

    // Refuse to archive records the loader would reject.
    let knowledge = KnowledgeBase::from_document(&document)?;
    info!(
        keys = knowledge.len(),
        records = document.record_count(),
        "Compiling knowledge base"
    );

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&document)
        .map_err(|err| anyhow::anyhow!("rkyv serialization failed: {:?}", err))?;
    let bytes = serializer.into_serializer().into_inner();

    fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), bytes = bytes.len(), "Archive written");
    Ok(())
}

fn check(kb: Option<PathBuf>, lexicon: Option<PathBuf>) -> anyhow::Result<()> {
    let knowledge = KnowledgeBase::load_from(kb)?;
    let lexicon = match lexicon {
        Some(path) => StaticLexicon::load(path)?,
        None => StaticLexicon::default(),
    };

    let report = knowledge.check_examples(&lexicon);
    for failure in &report.failures {
        println!("FAIL {} | {} | {}", failure.frame_key, failure.example, failure.reason);
    }
    println!(
        "{} passes, {} fails, {} without a parse",
        report.passed,
        report.failures.len(),
        knowledge.template_count() - report.checked
    );

    if !report.failures.is_empty() {
        anyhow::bail!("{} example parses did not match", report.failures.len());
    }
    Ok(())
}
