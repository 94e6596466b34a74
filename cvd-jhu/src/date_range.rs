use chrono::NaiveDate;

/// First day the corpus published a daily report.
pub const FIRST_REPORT_DAY: (i32, u32, u32) = (2020, 1, 22);
/// Last day the corpus published a daily report before it was archived.
pub const LAST_REPORT_DAY: (i32, u32, u32) = (2023, 3, 9);

/// Walks every calendar day from `start` through `end` (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct ReportDays {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl ReportDays {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let next = if start <= end { Some(start) } else { None };
        Self { next, end }
    }

    /// The full publishing period of the daily reports.
    pub fn publishing_period() -> Self {
        let (sy, sm, sd) = FIRST_REPORT_DAY;
        let (ey, em, ed) = LAST_REPORT_DAY;
        match (
            NaiveDate::from_ymd_opt(sy, sm, sd),
            NaiveDate::from_ymd_opt(ey, em, ed),
        ) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Self { next: None, end: NaiveDate::MIN },
        }
    }
}

impl Iterator for ReportDays {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }
}
