mod api;
mod server;
mod snapshot;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};

use engage_intel::scoring::{
    ActivityScorer, ActivityTier, CampaignBenchmark, ContactScorer, EngagementTier,
    HeatmapAnalyzer, ListHealthScorer,
};
use engage_intel::{export, format_count, format_float, format_percent, EngineConfig, ScoringStrategy};
use snapshot::EntitySnapshot;

#[derive(Parser)]
#[command(name = "engage-intel", about = "CRM engagement intelligence reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Report(ReportArgs),
    Serve(ServeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "contacts")]
    kind: String,
    #[arg(long)]
    strategy: Option<String>,
    #[arg(long)]
    lookback_days: Option<i64>,
    #[arg(long)]
    csv: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/engine.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => run_report(args),
        Command::Serve(args) => server::serve(args).await,
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_report(args: ReportArgs) -> Result<(), String> {
    let (config, _) = EngineConfig::load(args.config.clone())?;
    let snapshot = EntitySnapshot::load(&args.input)?;
    let now = Utc::now();

    match args.kind.as_str() {
        "contacts" => report_contacts(&config, &snapshot, &args, now),
        "lists" => report_lists(&config, &snapshot, &args, now),
        "campaigns" => report_campaigns(&config, &snapshot, &args),
        "send-times" => report_send_times(&config, &snapshot, &args, now),
        other => Err(format!("unknown report kind: {}", other)),
    }
}

fn report_contacts(
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    args: &ReportArgs,
    now: chrono::DateTime<Utc>,
) -> Result<(), String> {
    let strategy = api::resolve_strategy(args.strategy.as_deref(), config);

    match strategy {
        ScoringStrategy::Profile => {
            let scorer = ContactScorer::new(config.contact.clone());
            let mut scores = scorer.score_all(&snapshot.contacts, now);
            scores.sort_by(|a, b| b.score.cmp(&a.score));

            let champions = scores
                .iter()
                .filter(|entry| entry.tier == EngagementTier::Champion)
                .count();
            let warm = scores
                .iter()
                .filter(|entry| entry.tier == EngagementTier::Warm)
                .count();
            let cold = scores.len() - champions - warm;

            println!("Contacts scored: {} (profile strategy)", scores.len());
            println!(
                "Tiers: {} champion | {} warm | {} cold",
                champions, warm, cold
            );
            for entry in scores.iter().take(10) {
                println!(
                    "  {} | score {} | {}",
                    entry.email,
                    entry.score,
                    entry.tier.label()
                );
            }

            if let Some(path) = args.csv.as_ref() {
                export::write_contact_scores(create_csv(path)?, &scores)?;
                println!("Wrote {}", path.display());
            }
        }
        ScoringStrategy::Activity => {
            let scorer = ActivityScorer::new(config.activity.clone());
            let mut scores = scorer.score_all(&snapshot.contacts, &snapshot.events, now);
            scores.sort_by(|a, b| b.score.cmp(&a.score));

            let dormant = scores
                .iter()
                .filter(|entry| entry.tier == ActivityTier::Dormant)
                .count();
            println!("Contacts scored: {} (activity strategy)", scores.len());
            println!("Dormant contacts: {}", dormant);
            for entry in scores.iter().take(10) {
                println!(
                    "  {} | score {} | {} ({} opens, {} clicks)",
                    entry.email,
                    entry.score,
                    entry.tier.label(),
                    entry.opens,
                    entry.clicks
                );
            }

            if let Some(path) = args.csv.as_ref() {
                export::write_activity_scores(create_csv(path)?, &scores)?;
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

fn report_lists(
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    args: &ReportArgs,
    now: chrono::DateTime<Utc>,
) -> Result<(), String> {
    let scorer = ListHealthScorer::new(config.list.clone());
    let reports = scorer.score_all(&snapshot.lists, &snapshot.contacts, now);

    println!("Lists scored: {}", reports.len());
    for report in &reports {
        println!(
            "  {} | health {} (grade {}) | {} subscribers | {} active of {} sampled | blacklist {}",
            report.name,
            report.health_score,
            report.grade.label(),
            format_count(report.total_subscribers),
            report.active_count,
            report.member_count,
            format_percent(report.blacklist_rate * 100.0)
        );
    }

    if let Some(path) = args.csv.as_ref() {
        export::write_list_health(create_csv(path)?, &reports)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn report_campaigns(
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    args: &ReportArgs,
) -> Result<(), String> {
    let benchmark = CampaignBenchmark::new(config.campaign.clone());
    let report = benchmark.report(&snapshot.campaigns);

    println!("Campaigns benchmarked: {}", report.total_campaigns);
    println!(
        "Averages: open {} | click {} | bounce {} | unsubscribe {}",
        format_percent(report.averages.open_rate),
        format_percent(report.averages.click_rate),
        format_percent(report.averages.bounce_rate),
        format_percent(report.averages.unsubscribe_rate)
    );
    println!(
        "Vs industry: open {} | click {}",
        format_float(report.delta.vs_industry_open, 1),
        format_float(report.delta.vs_industry_click, 1)
    );

    if !report.top_performers.is_empty() {
        println!("Top performers:");
        for campaign in &report.top_performers {
            println!(
                "  #{} {} | engagement {}",
                campaign.rank,
                campaign.name,
                format_float(campaign.engagement_score, 2)
            );
        }
        println!("Bottom performers:");
        for campaign in &report.bottom_performers {
            println!(
                "  #{} {} | engagement {}",
                campaign.rank,
                campaign.name,
                format_float(campaign.engagement_score, 2)
            );
        }
    }

    if let Some(path) = args.csv.as_ref() {
        export::write_benchmark(create_csv(path)?, &report)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn report_send_times(
    config: &EngineConfig,
    snapshot: &EntitySnapshot,
    args: &ReportArgs,
    now: chrono::DateTime<Utc>,
) -> Result<(), String> {
    let analyzer = HeatmapAnalyzer::new(config.heatmap.clone());
    let lookback = args
        .lookback_days
        .unwrap_or(config.heatmap.default_lookback_days);
    let report = analyzer.analyze(&snapshot.events, lookback, now);

    println!(
        "Engagements analyzed: {} over {} days",
        format_count(report.total_engagements),
        report.days_analyzed
    );
    println!(
        "Best send time: {} {} ({} engagements)",
        report.best_time.day_name, report.best_time.hour_formatted, report.best_time.total
    );

    if let Some(path) = args.csv.as_ref() {
        export::write_heatmap(create_csv(path)?, &report)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    let config = EngineConfig::default();
    config.write(&args.path)?;
    println!("Wrote {}", args.path.display());
    Ok(())
}

fn create_csv(path: &Path) -> Result<File, String> {
    File::create(path).map_err(|err| format!("failed to create csv file: {}", err))
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
