use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::api::{
    resolve_strategy, CampaignReportRequest, ContactReportRequest, ContactReportResponse,
    ListReportRequest, ListReportResponse, SendTimeReportRequest,
};
use engage_intel::scoring::{
    ActivityScorer, CampaignBenchmark, ContactScorer, HeatmapAnalyzer, ListHealthScorer,
};
use engage_intel::{BenchmarkReport, EngineConfig, HeatmapReport, ScoringStrategy};

#[derive(Clone)]
struct AppState {
    config: EngineConfig,
}

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (config, config_path) = EngineConfig::load(None)?;
    if let Some(path) = config_path.as_ref() {
        if path.exists() {
            info!(path = %path.display(), "loaded engine config");
        }
    }

    let state = AppState { config };
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/reports/contacts", post(contact_report))
        .route("/api/reports/lists", post(list_report))
        .route("/api/reports/campaigns", post(campaign_report))
        .route("/api/reports/send-times", post(send_time_report))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "engagement report server listening");
    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn contact_report(
    State(state): State<AppState>,
    Json(request): Json<ContactReportRequest>,
) -> Json<ContactReportResponse> {
    let now = Utc::now();
    let strategy = resolve_strategy(request.strategy.as_deref(), &state.config);
    info!(
        strategy = strategy.label(),
        contacts = request.contacts.len(),
        "scoring contacts"
    );

    let response = match strategy {
        ScoringStrategy::Profile => {
            let scorer = ContactScorer::new(state.config.contact.clone());
            ContactReportResponse::from_profile(scorer.score_all(&request.contacts, now))
        }
        ScoringStrategy::Activity => {
            let scorer = ActivityScorer::new(state.config.activity.clone());
            let events = request.events.unwrap_or_default();
            ContactReportResponse::from_activity(scorer.score_all(&request.contacts, &events, now))
        }
    };
    Json(response)
}

async fn list_report(
    State(state): State<AppState>,
    Json(request): Json<ListReportRequest>,
) -> Json<ListReportResponse> {
    let now = Utc::now();
    info!(lists = request.lists.len(), "scoring list health");
    let scorer = ListHealthScorer::new(state.config.list.clone());
    let reports = scorer.score_all(&request.lists, &request.contacts, now);
    Json(ListReportResponse {
        total_lists: reports.len(),
        reports,
    })
}

async fn campaign_report(
    State(state): State<AppState>,
    Json(request): Json<CampaignReportRequest>,
) -> Json<BenchmarkReport> {
    info!(campaigns = request.campaigns.len(), "benchmarking campaigns");
    let benchmark = CampaignBenchmark::new(state.config.campaign.clone());
    Json(benchmark.report(&request.campaigns))
}

async fn send_time_report(
    State(state): State<AppState>,
    Json(request): Json<SendTimeReportRequest>,
) -> Json<HeatmapReport> {
    let now = Utc::now();
    let analyzer = HeatmapAnalyzer::new(state.config.heatmap.clone());
    let lookback = request
        .lookback_days
        .unwrap_or(state.config.heatmap.default_lookback_days);
    info!(events = request.events.len(), lookback, "building send-time heatmap");
    Json(analyzer.analyze(&request.events, lookback, now))
}
