use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use climb_rank::models::{SyntheticConfig, generate_profiles};
use climb_rank::utils::logging::{
    create_main_progress_bar, create_spinner, finish_and_clear, finish_progress_bar,
};
use climb_rank::{
    AnalysisReport, ClimberProfile, ParquetStore, PercentileAnalyzer, ProfileMetrics,
    ProfileStore, RankConfig, RankingSession,
};

/// Rank a climber's strength profile against stored climbers of the same grade
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the stored profiles
    #[arg(long, env = "CLIMB_RANK_STORE_DIR", global = true)]
    store_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a profile and rank it within its grade
    Submit(ProfileArgs),
    /// Rank a profile without saving it
    Compare(ProfileArgs),
    /// Show the number of stored profiles per grade
    Grades,
    /// Append synthetic profiles to the store
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Hardest grade climbed, e.g. V5
    #[arg(long)]
    grade: String,
    /// Max pull-up, additional weight (kg)
    #[arg(long = "pull-up", allow_negative_numbers = true)]
    pull_up: f64,
    /// 20mm crimp dead hang, additional weight (kg)
    #[arg(long = "crimp-20mm", allow_negative_numbers = true)]
    crimp_20mm: f64,
    /// 10mm crimp dead hang, additional weight (kg)
    #[arg(long = "crimp-10mm", allow_negative_numbers = true)]
    crimp_10mm: f64,
    /// Pinch grip dead hang, additional weight (kg)
    #[arg(long, allow_negative_numbers = true)]
    pinch: f64,
    /// 7:3 repeaters (min)
    #[arg(long, allow_negative_numbers = true)]
    endurance: f64,
    /// Total pull-ups; negative when a single pull-up is out of reach
    #[arg(long = "power-endurance", allow_negative_numbers = true)]
    power_endurance: f64,
    /// Reach beyond toes (cm)
    #[arg(long, allow_negative_numbers = true)]
    hamstring: f64,
    /// Lateral split, pelvis to ground (cm)
    #[arg(long, allow_negative_numbers = true)]
    hip: f64,
    /// Plank duration (min)
    #[arg(long, allow_negative_numbers = true)]
    core: f64,
    /// Height (cm)
    #[arg(long, allow_negative_numbers = true)]
    height: f64,
    /// Weight (kg)
    #[arg(long, allow_negative_numbers = true)]
    weight: f64,
}

impl ProfileArgs {
    fn to_profile(&self) -> climb_rank::Result<ClimberProfile> {
        let metrics = ProfileMetrics {
            pull_up_strength: self.pull_up,
            crimp_20mm_strength: self.crimp_20mm,
            crimp_10mm_strength: self.crimp_10mm,
            pinch_grip_strength: self.pinch,
            endurance: self.endurance,
            power_endurance: self.power_endurance,
            hamstring_flexibility: self.hamstring,
            hip_flexibility: self.hip,
            core_strength: self.core,
        };
        ClimberProfile::new(self.grade.clone(), metrics, self.height, self.weight)
    }
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Number of profiles to generate
    #[arg(long, default_value_t = 100)]
    count: usize,
    /// Seed for reproducible profiles
    #[arg(long)]
    seed: Option<u64>,
    /// Comma-separated grades, easiest first
    #[arg(long, value_delimiter = ',')]
    grades: Option<Vec<String>>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = RankConfig::from_env().context("Invalid CLIMB_RANK_* environment")?;
    if let Some(dir) = &cli.store_dir {
        config = config.with_store_dir(dir);
    }
    log::debug!("Configuration:\n{config}");

    match &cli.command {
        Command::Submit(args) => {
            let profile = args.to_profile().context("Invalid profile")?;
            let store = open_store(&config)?;
            let analyzer = PercentileAnalyzer::new(config.thresholds);
            let mut session = RankingSession::new(store, analyzer);
            let report = session.submit(&profile).context("Failed to save profile")?;
            print_report(&report, cli.json)?;
            session.into_store().close()?;
        }
        Command::Compare(args) => {
            let profile = args.to_profile().context("Invalid profile")?;
            let store = open_store(&config)?;
            let analyzer = PercentileAnalyzer::new(config.thresholds);
            let session = RankingSession::new(store, analyzer);
            print_report(&session.compare(&profile), cli.json)?;
        }
        Command::Grades => {
            let store = open_store(&config)?;
            let spinner = create_spinner(Some("Reading stored profiles"));
            let table = store.fetch_all();
            finish_and_clear(&spinner);
            let counts = table?.grade_counts();
            if cli.json {
                let entries: Vec<_> = counts
                    .iter()
                    .map(|(grade, count)| serde_json::json!({ "grade": grade, "count": count }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if counts.is_empty() {
                println!("No profiles stored in {}.", config.store_dir.display());
            } else {
                for (grade, count) in &counts {
                    println!("{grade}: {count}");
                }
            }
        }
        Command::Seed(args) => seed(&config, args)?,
    }

    Ok(())
}

fn open_store(config: &RankConfig) -> anyhow::Result<ParquetStore> {
    ParquetStore::open_with_config(config).with_context(|| {
        format!(
            "Failed to open profile store at {}",
            config.store_dir.display()
        )
    })
}

fn print_report(report: &AnalysisReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
        if !report.metrics().is_empty() {
            info!(
                "Cohort of {}: {}",
                report.cohort_size(),
                report.tier_counts()
            );
        }
    }
    Ok(())
}

fn seed(config: &RankConfig, args: &SeedArgs) -> anyhow::Result<()> {
    let mut synthetic = SyntheticConfig {
        count: args.count,
        seed: args.seed,
        ..SyntheticConfig::default()
    };
    if let Some(grades) = &args.grades {
        synthetic.grades = grades
            .iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
    }
    anyhow::ensure!(!synthetic.grades.is_empty(), "At least one grade is required");

    let start = Instant::now();
    let spinner = create_spinner(Some("Generating profiles"));
    let profiles = generate_profiles(&synthetic);
    finish_and_clear(&spinner);
    let profiles = profiles?;
    let mut store = open_store(config)?;

    let pb = create_main_progress_bar(profiles.len() as u64, Some("Storing profiles"));
    for profile in &profiles {
        store.append(profile)?;
        pb.inc(1);
    }
    finish_progress_bar(&pb, Some("Done"));

    info!(
        "Seeded {} profiles into {} in {:?}",
        profiles.len(),
        config.store_dir.display(),
        start.elapsed()
    );
    store.close()?;
    Ok(())
}
