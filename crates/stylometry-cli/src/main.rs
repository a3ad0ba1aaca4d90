use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use feature_pipeline::{
    run_batch, to_pretty_json, Document, ExtractionConfig, FeatureAggregator,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use text_features::{Lexicon, RuleAnnotator};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// stylometry: per-document stylometric features from prepared corpora.
/// Commands:
///   - extract                (batch: <name>.txt, <name>_clean.txt, <name>_clean_nostops.txt → <name>_features.json)
///   - tokens --input FILE    (debug: features of one token file on STDOUT)
#[derive(Parser, Debug)]
#[command(name = "stylometry", version, about = "Stylometric feature extraction")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract a feature record for every document of a corpus
    Extract(ExtractArgs),

    /// (Debug) Token features of a single file, printed as JSON
    Tokens {
        /// Whitespace-separated token file
        #[arg(long)]
        input: PathBuf,

        /// Raw text for sentence statistics
        #[arg(long)]
        raw: Option<PathBuf>,

        #[arg(long)]
        chunk_size: Option<usize>,

        /// `token<TAB>tag` lexicon for part-of-speech tags
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// TOML config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the prepared artifacts
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory the `<name>_features.json` files are written to
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Document name; repeat for several. Default: every document in the input dir
    #[arg(long = "doc")]
    docs: Vec<String>,

    #[arg(long)]
    chunk_size: Option<usize>,

    /// How many most frequent words to keep
    #[arg(long)]
    mfw_limit: Option<usize>,

    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Run the per-document passes on worker threads
    #[arg(long)]
    parallel: bool,
}

fn resolve_config(args: ExtractArgs) -> Result<ExtractionConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractionConfig::load(path)
            .with_context(|| format!("failed loading config: {}", path.display()))?,
        None => ExtractionConfig::default(),
    };
    if let Some(dir) = args.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = args.out_dir {
        config.output_dir = dir;
    }
    if !args.docs.is_empty() {
        config.documents = args.docs;
    }
    if let Some(n) = args.chunk_size {
        config.features.chunk_size = n;
    }
    if let Some(n) = args.mfw_limit {
        config.features.mfw_limit = n;
    }
    if args.lexicon.is_some() {
        config.lexicon = args.lexicon;
    }
    if args.parallel {
        config.features.parallel_passes = true;
    }
    config.validate()?;
    Ok(config)
}

fn build_annotator(lexicon: Option<&Path>) -> Result<RuleAnnotator> {
    let lexicon = match lexicon {
        Some(path) => Lexicon::load(path)?,
        None => Lexicon::default(),
    };
    Ok(RuleAnnotator::new(lexicon)?)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Extract(args) => {
            let config = resolve_config(args)?;
            tracing::debug!(?config, "resolved configuration");
            let annotator = build_annotator(config.lexicon.as_deref())?;
            let summary = run_batch(&config, &annotator)?;

            for (id, err) in &summary.failed {
                eprintln!("✗ {id}: {err}");
            }
            for path in &summary.written {
                eprintln!("✓ wrote {}", path.display());
            }
            if summary.written.is_empty() && !summary.failed.is_empty() {
                bail!("no feature records could be written");
            }
        }

        // ----- DEBUG ROUTE -----
        Commands::Tokens { input, raw, chunk_size, lexicon } => {
            let mut config = ExtractionConfig::default();
            if let Some(n) = chunk_size {
                config.features.chunk_size = n;
            }
            config.validate()?;
            let annotator = build_annotator(lexicon.as_deref())?;

            let id = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("input")
                .to_owned();
            let doc = Document {
                id,
                raw_text: raw.unwrap_or_default(),
                tokens_with_stops: input.clone(),
                tokens_without_stops: input,
            };
            let report = FeatureAggregator::new(&annotator, &config.features).aggregate(&doc);
            if report.completed.is_empty() {
                bail!("no features computed from {}", doc.tokens_with_stops.display());
            }

            let json = to_pretty_json(&report.sanitized)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(&json).context("failed writing STDOUT")?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
