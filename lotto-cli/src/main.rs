mod display;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use lotto_data::history::load_history;
use lotto_data::stats::compute_stats;
use lotto_generator::config::GeneratorConfig;
use lotto_generator::entropy::{EntropyCollector, EntropyDigest, EntropySample};
use lotto_generator::pipeline::{generate, run_all};
use lotto_generator::scoring::{score, Score};
use lotto_generator::strategy::Strategy;
use lotto_generator::table::{load_table, HotColdTable};

use crate::display::{
    display_all, display_analysis, display_digest_numbers, display_disclaimer, display_entropy,
    display_history_summary, display_hot_cold, display_score, display_strategy,
};

#[derive(Parser)]
#[command(name = "lotto", about = "Generator liczb Lotto 6/49 oparty na entropii systemowej")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Wygenerować jeden zestaw liczb (domyślnie)
    Generate(GenerateArgs),

    /// Uruchomić wszystkie strategie i wskazać rekomendację
    All {
        /// Ziarno generatora zamiast skrótu entropii
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        source: TableSource,
    },

    /// Pokazać źródła entropii i liczby wyprowadzone ze skrótu
    Entropy,

    /// Przeanalizować historię losowań
    Analyze {
        /// Plik z historią losowań
        #[arg(short, long)]
        file: PathBuf,

        /// Ile liczb pokazać w rankingach
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Okno ostatnich losowań
        #[arg(short, long, default_value = "100")]
        recent: usize,
    },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Wymuszona strategia (pomija wybór przez entropię)
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Ziarno generatora zamiast skrótu entropii
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    source: TableSource,

    /// Wynik w formacie JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Default)]
struct TableSource {
    /// Tabela liczb gorących i zimnych (JSON)
    #[arg(long, conflicts_with = "history")]
    table: Option<PathBuf>,

    /// Historia losowań, z której wyznaczyć tabelę
    #[arg(long)]
    history: Option<PathBuf>,
}

#[derive(Serialize)]
struct GenerateReport<'a> {
    samples: &'a [EntropySample],
    digest: String,
    strategy: Strategy,
    seed: Option<u64>,
    table: &'a HotColdTable,
    score: &'a Score,
}

fn main() -> Result<()> {
    env_logger::init();

    ctrlc::set_handler(|| {
        println!("\n\n👋 Do widzenia!");
        std::process::exit(0);
    })
    .context("Nie można zainstalować obsługi Ctrl-C")?;

    let cli = Cli::parse();
    let config = GeneratorConfig::default();

    match cli.command.unwrap_or(Command::Generate(GenerateArgs::default())) {
        Command::Generate(args) => cmd_generate(&config, args),
        Command::All { seed, source } => cmd_all(&config, seed, &source),
        Command::Entropy => cmd_entropy(),
        Command::Analyze { file, top, recent } => cmd_analyze(&config, &file, top, recent),
    }
}

fn make_rng(seed: Option<u64>, digest: &EntropyDigest) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_seed(digest.bytes()),
    }
}

fn resolve_table(source: &TableSource, config: &GeneratorConfig) -> Result<HotColdTable> {
    if let Some(path) = &source.table {
        return load_table(path);
    }
    if let Some(path) = &source.history {
        let history = load_history(path)?;
        return HotColdTable::from_history(&history.draws, config)
            .with_context(|| format!("Nie można wyznaczyć tabeli z {:?}", path));
    }
    Ok(HotColdTable::default())
}

fn cmd_generate(config: &GeneratorConfig, args: GenerateArgs) -> Result<()> {
    let table = resolve_table(&args.source, config)?;
    let report = EntropyCollector::system().collect();

    let strategy = args.strategy.unwrap_or_else(|| Strategy::select(&report.digest));
    let mut rng = make_rng(args.seed, &report.digest);
    log::info!("Strategia {:?}, ziarno {:?}", strategy, args.seed);

    let numbers = generate(strategy, &table, config, &mut rng)?;
    let result = score(&numbers, &table, config);

    if args.json {
        let out = GenerateReport {
            samples: &report.samples,
            digest: report.digest.to_hex(),
            strategy,
            seed: args.seed,
            table: &table,
            score: &result,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    display_entropy(&report);
    display_strategy(strategy, args.strategy.is_some());
    display_score(&result);
    display_disclaimer();
    Ok(())
}

fn cmd_all(config: &GeneratorConfig, seed: Option<u64>, source: &TableSource) -> Result<()> {
    let table = resolve_table(source, config)?;
    let report = EntropyCollector::system().collect();
    let mut rng = make_rng(seed, &report.digest);

    let run = run_all(&table, config, &mut rng)?;

    display_entropy(&report);
    display_all(&run);
    display_disclaimer();
    Ok(())
}

fn cmd_entropy() -> Result<()> {
    let report = EntropyCollector::system().collect();
    display_entropy(&report);
    display_strategy(Strategy::select(&report.digest), false);
    display_digest_numbers(&report.digest);
    display_disclaimer();
    Ok(())
}

fn cmd_analyze(config: &GeneratorConfig, file: &PathBuf, top: usize, recent: usize) -> Result<()> {
    let history = load_history(file)?;
    display_history_summary(&history);
    if history.is_empty() {
        println!("Brak poprawnych losowań w pliku.");
        return Ok(());
    }

    let stats = compute_stats(&history.draws);
    display_analysis(&history, &stats, top, recent);

    let derived = GeneratorConfig {
        recent_window: recent.max(1),
        list_len: top.max(1),
        ..config.clone()
    };
    let table = HotColdTable::from_history(&history.draws, &derived)?;
    display_hot_cold(&table);
    Ok(())
}
