use std::io::Write;

use crate::scoring::{
    ActivityScore, BenchmarkReport, ContactScore, HeatmapReport, ListHealthReport,
};

pub fn write_contact_scores<W: Write>(writer: W, scores: &[ContactScore]) -> Result<(), String> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["contact_id", "email", "score", "tier"])
        .map_err(csv_error)?;
    for entry in scores {
        out.write_record([
            entry.contact_id.to_string(),
            entry.email.clone(),
            entry.score.to_string(),
            entry.tier.label().to_string(),
        ])
        .map_err(csv_error)?;
    }
    out.flush().map_err(|err| format!("failed to flush csv: {}", err))
}

pub fn write_activity_scores<W: Write>(writer: W, scores: &[ActivityScore]) -> Result<(), String> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["contact_id", "email", "opens", "clicks", "score", "tier"])
        .map_err(csv_error)?;
    for entry in scores {
        out.write_record([
            entry.contact_id.to_string(),
            entry.email.clone(),
            entry.opens.to_string(),
            entry.clicks.to_string(),
            entry.score.to_string(),
            entry.tier.label().to_string(),
        ])
        .map_err(csv_error)?;
    }
    out.flush().map_err(|err| format!("failed to flush csv: {}", err))
}

pub fn write_list_health<W: Write>(writer: W, reports: &[ListHealthReport]) -> Result<(), String> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        "list_id",
        "name",
        "total_subscribers",
        "member_count",
        "active_count",
        "blacklist_rate",
        "avg_days_since_modified",
        "health_score",
        "grade",
    ])
    .map_err(csv_error)?;
    for report in reports {
        out.write_record([
            report.list_id.to_string(),
            report.name.clone(),
            report.total_subscribers.to_string(),
            report.member_count.to_string(),
            report.active_count.to_string(),
            format!("{:.4}", report.blacklist_rate),
            format!("{:.1}", report.avg_days_since_modified),
            report.health_score.to_string(),
            report.grade.label().to_string(),
        ])
        .map_err(csv_error)?;
    }
    out.flush().map_err(|err| format!("failed to flush csv: {}", err))
}

pub fn write_benchmark<W: Write>(writer: W, report: &BenchmarkReport) -> Result<(), String> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([
        "segment",
        "rank",
        "campaign_id",
        "name",
        "subject",
        "engagement_score",
        "open_rate",
        "click_rate",
    ])
    .map_err(csv_error)?;
    for (segment, performers) in [
        ("top", &report.top_performers),
        ("bottom", &report.bottom_performers),
    ] {
        for campaign in performers {
            out.write_record([
                segment.to_string(),
                campaign.rank.to_string(),
                campaign.campaign_id.to_string(),
                campaign.name.clone(),
                campaign.subject.clone(),
                format!("{:.2}", campaign.engagement_score),
                format!("{:.2}", campaign.open_rate),
                format!("{:.2}", campaign.click_rate),
            ])
            .map_err(csv_error)?;
        }
    }
    out.flush().map_err(|err| format!("failed to flush csv: {}", err))
}

pub fn write_heatmap<W: Write>(writer: W, report: &HeatmapReport) -> Result<(), String> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["day", "hour", "opens", "clicks", "total"])
        .map_err(csv_error)?;
    for (day_index, row) in report.grid.iter().enumerate() {
        for (hour, cell) in row.iter().enumerate() {
            out.write_record([
                (day_index + 1).to_string(),
                hour.to_string(),
                cell.opens.to_string(),
                cell.clicks.to_string(),
                cell.total.to_string(),
            ])
            .map_err(csv_error)?;
        }
    }
    out.flush().map_err(|err| format!("failed to flush csv: {}", err))
}

fn csv_error(err: csv::Error) -> String {
    format!("failed to write csv: {}", err)
}
