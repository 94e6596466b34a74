//! Corpus overview for operators.

use crate::DataArgs;
use cvd_dash::Dashboard;
use cvd_jhu::snapshot::DailyReports;
use cvd_utils::dates::format_date;

pub fn run_summary(data: &DataArgs) -> anyhow::Result<()> {
    let (reports, tables) = data.load_sources()?;
    let dashboard = Dashboard::from_sources(&reports, &tables)?;
    println!("{}", render_summary(&reports, &dashboard));
    Ok(())
}

pub fn render_summary(reports: &DailyReports, dashboard: &Dashboard) -> String {
    let mut lines = vec![format!("Daily reports: {} files", reports.files_loaded)];
    match reports.date_span() {
        Some((first, last)) => lines.push(format!(
            "  {} .. {}, {} countries",
            format_date(&first),
            format_date(&last),
            reports.countries.len()
        )),
        None => lines.push("  no rows".to_string()),
    }

    let general = dashboard.general();
    lines.push(format!("Cumulative series: {} days", general.dates().len()));
    match (general.dates().first(), general.dates().last()) {
        (Some(first), Some(last)) => lines.push(format!(
            "  {} .. {}, {} countries",
            format_date(first),
            format_date(last),
            general.countries().len()
        )),
        _ => lines.push("  no dates".to_string()),
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_empty_corpus() {
        let text = render_summary(&DailyReports::default(), &Dashboard::default());
        assert!(text.contains("Daily reports: 0 files"));
        assert!(text.contains("no rows"));
        assert!(text.contains("Cumulative series: 0 days"));
    }
}
