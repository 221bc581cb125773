use chrono::{DateTime, Duration, TimeZone, Utc};

use engage_intel::scoring::heatmap::format_hour;
use engage_intel::scoring::{CampaignBenchmark, HeatmapAnalyzer, HeatmapConfig};
use engage_intel::{export, ActivityEvent, Campaign, CampaignStats, EngineConfig};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
}

fn make_campaign(id: i64, status: &str, stats: CampaignStats) -> Campaign {
    Campaign {
        id,
        name: format!("Campaign {}", id),
        subject: format!("Subject {}", id),
        sent_date: Some(fixed_now() - Duration::days(id)),
        status: status.to_string(),
        stats,
    }
}

fn make_event(
    email: &str,
    campaign_id: i64,
    opened_at: Option<DateTime<Utc>>,
    clicked_at: Option<DateTime<Utc>>,
) -> ActivityEvent {
    ActivityEvent {
        email: email.to_string(),
        campaign_id,
        campaign_name: format!("Campaign {}", campaign_id),
        opened_at,
        clicked_at,
    }
}

fn default_benchmark() -> CampaignBenchmark {
    CampaignBenchmark::new(EngineConfig::default().campaign)
}

fn default_analyzer() -> HeatmapAnalyzer {
    HeatmapAnalyzer::new(EngineConfig::default().heatmap)
}

#[test]
fn engagement_score_weighs_rates() {
    let stats = CampaignStats {
        open_rate: 30.0,
        click_rate: 5.0,
        bounce_rate: 1.0,
        ..CampaignStats::default()
    };

    let score = default_benchmark().engagement_score(&stats);

    assert!((score - 14.4).abs() < 1e-9);
}

#[test]
fn engagement_score_clamps_at_zero() {
    let stats = CampaignStats {
        open_rate: 0.0,
        click_rate: 0.0,
        bounce_rate: 50.0,
        ..CampaignStats::default()
    };

    let score = default_benchmark().engagement_score(&stats);

    assert!((score - 0.0).abs() < 1e-9);
}

#[test]
fn zero_eligible_campaigns_yield_zero_report() {
    let campaigns = vec![
        make_campaign(1, "draft", CampaignStats::default()),
        make_campaign(
            2,
            "sent",
            CampaignStats {
                sent: 0,
                ..CampaignStats::default()
            },
        ),
    ];

    let report = default_benchmark().report(&campaigns);

    assert_eq!(report.total_campaigns, 0);
    assert!((report.averages.open_rate - 0.0).abs() < 1e-9);
    assert!((report.averages.click_rate - 0.0).abs() < 1e-9);
    assert!((report.averages.bounce_rate - 0.0).abs() < 1e-9);
    assert!((report.averages.unsubscribe_rate - 0.0).abs() < 1e-9);
    assert!(report.top_performers.is_empty());
    assert!(report.bottom_performers.is_empty());
}

#[test]
fn aggregate_averages_use_pooled_counts() {
    let campaigns = vec![
        make_campaign(
            1,
            "sent",
            CampaignStats {
                sent: 100,
                delivered: 90,
                unique_opens: 40,
                unique_clicks: 5,
                hard_bounces: 2,
                soft_bounces: 3,
                unsubscribes: 2,
                ..CampaignStats::default()
            },
        ),
        make_campaign(
            2,
            "sent",
            CampaignStats {
                sent: 100,
                delivered: 110,
                unique_opens: 10,
                unique_clicks: 5,
                hard_bounces: 1,
                soft_bounces: 4,
                unsubscribes: 2,
                ..CampaignStats::default()
            },
        ),
        make_campaign(3, "draft", CampaignStats::default()),
    ];

    let report = default_benchmark().report(&campaigns);

    assert_eq!(report.total_campaigns, 2);
    assert!((report.averages.open_rate - 25.0).abs() < 1e-9);
    assert!((report.averages.click_rate - 5.0).abs() < 1e-9);
    assert!((report.averages.bounce_rate - 5.0).abs() < 1e-9);
    assert!((report.averages.unsubscribe_rate - 2.0).abs() < 1e-9);
    assert!((report.delta.vs_industry_open - 3.5).abs() < 1e-9);
    assert!((report.delta.vs_industry_click - 2.7).abs() < 1e-9);
}

#[test]
fn zero_delivered_guards_rate_divisions() {
    let campaigns = vec![make_campaign(
        1,
        "sent",
        CampaignStats {
            sent: 10,
            delivered: 0,
            unique_opens: 5,
            hard_bounces: 1,
            ..CampaignStats::default()
        },
    )];

    let report = default_benchmark().report(&campaigns);

    assert_eq!(report.total_campaigns, 1);
    assert!((report.averages.open_rate - 0.0).abs() < 1e-9);
    assert!((report.averages.bounce_rate - 10.0).abs() < 1e-9);
}

#[test]
fn ranking_assigns_top_and_bottom_slots() {
    let campaigns: Vec<Campaign> = (1..=12)
        .map(|id| {
            make_campaign(
                id,
                "sent",
                CampaignStats {
                    sent: 100,
                    delivered: 100,
                    open_rate: id as f64,
                    ..CampaignStats::default()
                },
            )
        })
        .collect();

    let report = default_benchmark().report(&campaigns);

    assert_eq!(report.total_campaigns, 12);
    assert_eq!(report.top_performers.len(), 5);
    assert_eq!(report.bottom_performers.len(), 5);

    let top_ids: Vec<i64> = report
        .top_performers
        .iter()
        .map(|campaign| campaign.campaign_id)
        .collect();
    assert_eq!(top_ids, vec![12, 11, 10, 9, 8]);
    let top_ranks: Vec<usize> = report
        .top_performers
        .iter()
        .map(|campaign| campaign.rank)
        .collect();
    assert_eq!(top_ranks, vec![1, 2, 3, 4, 5]);

    let bottom_ids: Vec<i64> = report
        .bottom_performers
        .iter()
        .map(|campaign| campaign.campaign_id)
        .collect();
    assert_eq!(bottom_ids, vec![5, 4, 3, 2, 1]);
    let bottom_ranks: Vec<usize> = report
        .bottom_performers
        .iter()
        .map(|campaign| campaign.rank)
        .collect();
    assert_eq!(bottom_ranks, vec![8, 9, 10, 11, 12]);
}

#[test]
fn small_pools_overlap_top_and_bottom() {
    let campaigns: Vec<Campaign> = (1..=3)
        .map(|id| {
            make_campaign(
                id,
                "sent",
                CampaignStats {
                    sent: 50,
                    delivered: 50,
                    open_rate: id as f64 * 10.0,
                    ..CampaignStats::default()
                },
            )
        })
        .collect();

    let report = default_benchmark().report(&campaigns);

    assert_eq!(report.top_performers.len(), 3);
    assert_eq!(report.bottom_performers.len(), 3);
    assert_eq!(
        report.top_performers[0].campaign_id,
        report.bottom_performers[0].campaign_id
    );
}

#[test]
fn benchmark_exports_as_csv() {
    let campaigns: Vec<Campaign> = (1..=2)
        .map(|id| {
            make_campaign(
                id,
                "sent",
                CampaignStats {
                    sent: 100,
                    delivered: 100,
                    open_rate: id as f64 * 10.0,
                    ..CampaignStats::default()
                },
            )
        })
        .collect();

    let report = default_benchmark().report(&campaigns);
    let mut buffer = Vec::new();
    export::write_benchmark(&mut buffer, &report).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "segment,rank,campaign_id,name,subject,engagement_score,open_rate,click_rate"
    );
    assert_eq!(lines.len(), 5);
}

#[test]
fn single_open_places_wednesday_afternoon() {
    let now = fixed_now();
    let opened = Utc.with_ymd_and_hms(2026, 8, 5, 14, 0, 0).unwrap();
    let events = vec![make_event("ana@example.com", 1, Some(opened), None)];

    let report = default_analyzer().analyze(&events, 90, now);

    assert_eq!(report.cell(4, 14).opens, 1);
    assert_eq!(report.max_value, 1);
    assert_eq!(report.total_engagements, 1);
    assert_eq!(report.days_analyzed, 90);
    assert_eq!(report.best_time.day, 4);
    assert_eq!(report.best_time.day_name, "Wednesday");
    assert_eq!(report.best_time.hour, 14);
    assert_eq!(report.best_time.hour_formatted, "2:00 PM");
    assert_eq!(report.best_time.total, 1);
}

#[test]
fn open_and_click_can_land_in_different_cells() {
    let now = fixed_now();
    let opened = Utc.with_ymd_and_hms(2026, 8, 5, 14, 0, 0).unwrap();
    let clicked = Utc.with_ymd_and_hms(2026, 8, 6, 9, 30, 0).unwrap();
    let events = vec![make_event("ana@example.com", 1, Some(opened), Some(clicked))];

    let report = default_analyzer().analyze(&events, 90, now);

    assert_eq!(report.cell(4, 14).opens, 1);
    assert_eq!(report.cell(5, 9).clicks, 1);
    assert_eq!(report.total_engagements, 2);
}

#[test]
fn window_filters_opens_and_clicks_independently() {
    let now = fixed_now();
    let events = vec![make_event(
        "ana@example.com",
        1,
        Some(now - Duration::days(100)),
        Some(now - Duration::days(5)),
    )];

    let report = default_analyzer().analyze(&events, 90, now);

    assert_eq!(report.total_engagements, 1);
    let opens: u64 = report.grid.iter().flatten().map(|cell| cell.opens).sum();
    let clicks: u64 = report.grid.iter().flatten().map(|cell| cell.clicks).sum();
    assert_eq!(opens, 0);
    assert_eq!(clicks, 1);
}

#[test]
fn duplicate_events_are_summed() {
    let now = fixed_now();
    let opened = Utc.with_ymd_and_hms(2026, 8, 5, 14, 0, 0).unwrap();
    let events = vec![
        make_event("ana@example.com", 1, Some(opened), None),
        make_event("ana@example.com", 1, Some(opened), None),
    ];

    let report = default_analyzer().analyze(&events, 90, now);

    assert_eq!(report.cell(4, 14).opens, 2);
    assert_eq!(report.max_value, 2);
}

#[test]
fn tie_break_keeps_earliest_day_then_hour() {
    let now = fixed_now();
    let monday = Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap();
    let tuesday = Utc.with_ymd_and_hms(2026, 8, 4, 9, 0, 0).unwrap();
    let events = vec![
        make_event("a@example.com", 1, Some(tuesday), None),
        make_event("b@example.com", 1, Some(monday), None),
    ];

    let report = default_analyzer().analyze(&events, 90, now);
    assert_eq!(report.best_time.day_name, "Monday");
    assert_eq!(report.best_time.hour, 10);

    let early = Utc.with_ymd_and_hms(2026, 8, 2, 5, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2026, 8, 2, 9, 0, 0).unwrap();
    let same_day = vec![
        make_event("a@example.com", 1, Some(late), None),
        make_event("b@example.com", 1, Some(early), None),
    ];

    let report = default_analyzer().analyze(&same_day, 90, now);
    assert_eq!(report.best_time.day_name, "Sunday");
    assert_eq!(report.best_time.hour, 5);
}

#[test]
fn conservation_over_all_cells() {
    let now = fixed_now();
    let opened = Utc.with_ymd_and_hms(2026, 8, 5, 14, 0, 0).unwrap();
    let clicked = Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap();
    let events = vec![
        make_event("a@example.com", 1, Some(opened), Some(clicked)),
        make_event("b@example.com", 1, Some(opened), None),
        make_event("c@example.com", 2, None, Some(now - Duration::days(120))),
    ];

    let report = default_analyzer().analyze(&events, 90, now);

    let cell_sum: u64 = report.grid.iter().flatten().map(|cell| cell.total).sum();
    assert_eq!(report.total_engagements, cell_sum);
    assert_eq!(report.total_engagements, 3);
    assert_eq!(report.cell(4, 14).opens, 2);
}

#[test]
fn future_timestamps_stay_in_window() {
    let now = fixed_now();
    let tomorrow = now + Duration::days(1);
    let events = vec![make_event("a@example.com", 1, None, Some(tomorrow))];

    let report = default_analyzer().analyze(&events, 90, now);

    assert_eq!(report.total_engagements, 1);
    assert_eq!(report.cell(6, 12).clicks, 1);
}

#[test]
fn empty_events_default_to_sunday_midnight() {
    let report = default_analyzer().analyze(&[], 30, fixed_now());

    assert_eq!(report.max_value, 0);
    assert_eq!(report.total_engagements, 0);
    assert_eq!(report.days_analyzed, 30);
    assert_eq!(report.best_time.day, 1);
    assert_eq!(report.best_time.day_name, "Sunday");
    assert_eq!(report.best_time.hour, 0);
    assert_eq!(report.best_time.hour_formatted, "12:00 AM");
    assert_eq!(report.best_time.total, 0);
}

#[test]
fn analyze_default_uses_config_lookback() {
    let now = fixed_now();
    let analyzer = HeatmapAnalyzer::new(HeatmapConfig {
        default_lookback_days: 7,
    });
    let events = vec![make_event(
        "a@example.com",
        1,
        Some(now - Duration::days(10)),
        None,
    )];

    let report = analyzer.analyze_default(&events, now);

    assert_eq!(report.total_engagements, 0);
    assert_eq!(report.days_analyzed, 7);
}

#[test]
fn hour_formatting_uses_12_hour_clock() {
    assert_eq!(format_hour(0), "12:00 AM");
    assert_eq!(format_hour(1), "1:00 AM");
    assert_eq!(format_hour(11), "11:00 AM");
    assert_eq!(format_hour(12), "12:00 PM");
    assert_eq!(format_hour(13), "1:00 PM");
    assert_eq!(format_hour(23), "11:00 PM");
}

#[test]
fn heatmap_exports_one_row_per_cell() {
    let report = default_analyzer().analyze(&[], 90, fixed_now());
    let mut buffer = Vec::new();
    export::write_heatmap(&mut buffer, &report).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "day,hour,opens,clicks,total");
    assert_eq!(lines.len(), 1 + 7 * 24);
}
