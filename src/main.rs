//! emoset CLI
//!
//! Usage:
//!   emoset --text "your text here"                  # Analyze and print the prompt
//!   emoset --text "..." --save --seed 7             # ...and save a dataset sample
//!   emoset --interactive --save                     # One sample per stdin line
//!   emoset --batch phrases.txt --per-phrase 3       # Offline dataset generation
//!   emoset --stats                                  # Samples per label in --out-dir
//!   emoset --text "..." --json                      # JSON output

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use emoset::core::{
    load_lexicon_or_default, AnalyzerConfig, DatasetPipeline, DatasetWriter, Draft,
    EmotionAnalyzer, PipelineConfig,
};
use emoset::logging::init_tracing;
use emoset::types::{DatasetRecord, Emotion, Error};
use emoset::{ARTIFACT_HEIGHT, ARTIFACT_WIDTH, DEFAULT_LABEL, DEFAULT_TOP_K, MAX_SEED, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "emoset",
    version = VERSION,
    about = "Score text emotions, synthesize render prompts and build a labeled dataset",
    long_about = "emoset scores free-form text against a weighted emotion lexicon,\n\
                  maps the result to valence/arousal and synthesizes a spectrogram prompt.\n\
                  With --save, each prompt is rendered and appended to a dataset directory\n\
                  (<label>_<NNNNN>.png + .txt sidecar + index.csv).\n\n\
                  Labels: anger, calm, energy, joy, mystery, sadness\n\
                  (French aliases colere, calme, energie, joie, mystere, tristesse accepted)"
)]
struct Args {
    /// Text to analyze (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - analyze each stdin line
    #[arg(short, long)]
    interactive: bool,

    /// Batch mode - one phrase per line, every sample saved
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Samples per phrase in batch mode
    #[arg(long, default_value_t = 1)]
    per_phrase: usize,

    /// Save a rendered sample to the dataset
    #[arg(short, long)]
    save: bool,

    /// Dataset directory
    #[arg(short, long, default_value = "./dataset")]
    out_dir: PathBuf,

    /// Render seed (first seed in batch mode)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(0..=MAX_SEED))]
    seed: u64,

    /// Dataset label override (default: dominant emotion)
    #[arg(short, long, value_parser = parse_emotion)]
    emotion: Option<Emotion>,

    /// Lexicon JSON file ({"label": {"word": weight}})
    #[arg(short, long)]
    lexicon: Option<PathBuf>,

    /// Labels woven into the prompt
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Artifact width
    #[arg(long, default_value_t = ARTIFACT_WIDTH)]
    width: u32,

    /// Artifact height
    #[arg(long, default_value_t = ARTIFACT_HEIGHT)]
    height: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging and score breakdown
    #[arg(short, long)]
    verbose: bool,

    /// Print samples per label in the dataset directory
    #[arg(long)]
    stats: bool,
}

fn parse_emotion(raw: &str) -> Result<Emotion, String> {
    raw.parse::<Emotion>().map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let pipeline = build_pipeline(&args);

    let outcome = if args.stats {
        run_stats(&pipeline, &args)
    } else if let Some(ref path) = args.batch {
        run_batch(&pipeline, path, &args)
    } else if args.interactive {
        run_interactive(&pipeline, &args)
    } else if let Some(ref text) = args.text {
        run_single(&pipeline, text, &args)
    } else {
        // Default to interactive if no mode specified
        run_interactive(&pipeline, &args)
    };

    if let Err(e) = outcome {
        eprintln!("{} [{}] {}", "error:".red().bold(), e.code(), e);
        process::exit(1);
    }
}

fn build_pipeline(args: &Args) -> DatasetPipeline {
    let lexicon = load_lexicon_or_default(args.lexicon.as_deref());
    let analyzer = EmotionAnalyzer::new(
        lexicon,
        AnalyzerConfig {
            default_label: DEFAULT_LABEL,
            top_k: args.top_k,
        },
    );
    let config = PipelineConfig {
        width: args.width,
        height: args.height,
        allow_fallback: true,
    };
    DatasetPipeline::new(analyzer, DatasetWriter::new(&args.out_dir), config)
}

/// Analyze one text, optionally save it
fn run_single(pipeline: &DatasetPipeline, text: &str, args: &Args) -> Result<(), Error> {
    let draft = pipeline.draft(text, args.emotion)?;
    let record = if args.save {
        Some(pipeline.save_draft(&draft, args.seed)?)
    } else {
        None
    };
    print_result(&draft, record.as_ref(), args);
    Ok(())
}

/// One analysis (and sample, with --save) per stdin line
fn run_interactive(pipeline: &DatasetPipeline, args: &Args) -> Result<(), Error> {
    print_header("Interactive", pipeline);
    println!("Type a phrase and press Enter. Type 'quit' to exit.");
    if args.save {
        println!("Samples will be saved to: {}", pipeline.writer().dir().display());
    }
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut seed = args.seed;
    let mut saved = 0usize;

    loop {
        print!("{} ", ">".bold());
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let draft = pipeline.draft(line, args.emotion)?;
        let record = if args.save {
            let record = pipeline.save_draft(&draft, seed)?;
            seed = seed.wrapping_add(1);
            saved += 1;
            Some(record)
        } else {
            None
        };
        print_result(&draft, record.as_ref(), args);
    }

    println!("\nSession ended. Samples saved: {}", saved);
    Ok(())
}

/// Save `per_phrase` samples for each line of a file
fn run_batch(pipeline: &DatasetPipeline, path: &Path, args: &Args) -> Result<(), Error> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        Error::Config(emoset::types::ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
    })?;

    let records = pipeline.generate_batch(content.lines(), args.seed, args.per_phrase)?;

    if args.json {
        print_json(&records);
    } else {
        for record in &records {
            print_record(record);
        }
        println!(
            "\n{} {} samples in {}",
            "Dataset updated:".green().bold(),
            records.len(),
            pipeline.writer().dir().display()
        );
    }
    Ok(())
}

/// Samples per label from the index
fn run_stats(pipeline: &DatasetPipeline, args: &Args) -> Result<(), Error> {
    let counts = pipeline.writer().label_counts()?;

    if args.json {
        let map: std::collections::BTreeMap<&str, usize> =
            Emotion::ALL.iter().map(|e| (e.name(), counts.get(e).copied().unwrap_or(0))).collect();
        print_json(&map);
        return Ok(());
    }

    println!("Dataset: {}", pipeline.writer().dir().display());
    let mut total = 0;
    for e in Emotion::ALL {
        let n = counts.get(&e).copied().unwrap_or(0);
        total += n;
        println!("  {:<8} {:>6}", e.name().color(e.color()), n);
    }
    println!("  {:<8} {:>6}", "total".bold(), total);
    Ok(())
}

fn print_header(mode: &str, pipeline: &DatasetPipeline) {
    println!("{}", format!("emoset v{} - {}", VERSION, mode).bold());
    println!(
        "Lexicon: {} terms | top-k: {} | default: {}",
        pipeline.analyzer().lexicon().len(),
        pipeline.analyzer().config().top_k,
        pipeline.analyzer().config().default_label
    );
    println!();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
    }
}

fn print_result(draft: &Draft, record: Option<&DatasetRecord>, args: &Args) {
    if args.json {
        #[derive(Serialize)]
        struct Output<'a> {
            label: Emotion,
            prompt: &'a str,
            tagged_prompt: &'a str,
            analysis: &'a emoset::types::EmotionAnalysisResult,
            #[serde(skip_serializing_if = "Option::is_none")]
            record: Option<&'a DatasetRecord>,
        }
        print_json(&Output {
            label: draft.label,
            prompt: &draft.prompt,
            tagged_prompt: &draft.tagged_prompt,
            analysis: &draft.analysis,
            record,
        });
        return;
    }

    let label = draft.label;
    println!(
        "{} {} | {}",
        "emotion:".bold(),
        label.name().color(label.color()).bold(),
        draft.analysis.affect()
    );

    if args.verbose {
        let dist = draft.analysis.distribution();
        for e in Emotion::ALL {
            let p = dist.get(e);
            let bar = "█".repeat((p * 30.0).round() as usize);
            println!(
                "  {:<8} score={:<3} p={:.3} {}",
                e.name(),
                draft.analysis.scores().get(e),
                p,
                bar.color(e.color())
            );
        }
    }

    println!("{} {}", "prompt:".bold(), draft.tagged_prompt);
    if let Some(record) = record {
        print_record(record);
    }
}

fn print_record(record: &DatasetRecord) {
    println!(
        "{} {} + {} (seed={}, {}x{})",
        "saved:".green().bold(),
        record.artifact_file,
        record.sidecar_file,
        record.seed,
        record.width,
        record.height
    );
}
