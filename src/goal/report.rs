//! Goal progress reports.
//!
//! Every timeframe compares the tallied current value against the target
//! and states the surplus or deficit. Month goals additionally walk back
//! through every completed calendar month since the athlete's earliest
//! activity of that kind and report each one, most recent first.

use chrono::{Datelike, Local, NaiveDate};

use super::types::Goal;
#[cfg(test)]
use super::types::Metric;
use crate::activity::{DateWindow, Tally};
use crate::athlete::Athlete;

impl Goal {
    /// Render this goal's progress report against the current date.
    pub fn report(&self, athlete: &Athlete) -> String {
        self.report_at(athlete, Local::now().date_naive())
    }

    /// Render this goal's progress report as of `today`.
    ///
    /// Zero matching activities still produce a report: current is 0 and
    /// the whole target shows as a deficit.
    pub fn report_at(&self, athlete: &Athlete, today: NaiveDate) -> String {
        match self.timeframe() {
            super::Timeframe::Cumulative => {
                let tally = Tally::compute(athlete, self.kind(), DateWindow::through(today));
                let current = tally.metric(self.metric());
                format!(
                    "{} Current: {} {}",
                    self.phrase(),
                    self.metric().render(current),
                    self.verdict(current, "Achieved with surplus", "Deficit"),
                )
            }
            super::Timeframe::Year => {
                let window = DateWindow::new(
                    NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
                    NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
                );
                let tally = Tally::compute(athlete, self.kind(), window);
                let current = tally.metric(self.metric());
                format!(
                    "{}, year to date: {} {}",
                    self.phrase(),
                    self.metric().render(current),
                    self.verdict(current, "goal achieved with surplus", "deficit"),
                )
            }
            super::Timeframe::Month => self.month_report(athlete, today),
        }
    }

    /// Current-month line plus the historical back-series.
    fn month_report(&self, athlete: &Athlete, today: NaiveDate) -> String {
        let mut lines = Vec::new();

        if let Some(window) = month_window(today.year(), today.month()) {
            let tally = Tally::compute(athlete, self.kind(), window);
            let current = tally.metric(self.metric());
            lines.push(format!(
                "{}, month to date: {} {}",
                self.phrase(),
                self.metric().render(current),
                self.verdict(current, "goal achieved with surplus", "deficit"),
            ));
        }

        // Walk forward from the earliest month, then reverse so the most
        // recently completed month prints first. The current month is
        // excluded; it is covered by the line above.
        if let Some(earliest) = athlete.earliest_activity(self.kind()) {
            let mut year = earliest.year();
            let mut month = earliest.month();
            let mut history = Vec::new();

            while (year, month) < (today.year(), today.month()) {
                if let Some(window) = month_window(year, month) {
                    let tally = Tally::compute(athlete, self.kind(), window);
                    let prior = tally.metric(self.metric());
                    history.push(format!(
                        "      {}-{:02}: {} {}",
                        year,
                        month,
                        self.metric().render(prior),
                        self.verdict(prior, "goal achieved with surplus", "deficit"),
                    ));
                }
                month += 1;
                if month == 13 {
                    year += 1;
                    month = 1;
                }
            }

            history.reverse();
            lines.extend(history);
        }

        lines.join("\n")
    }

    /// Surplus or deficit clause for a tallied value.
    fn verdict(&self, current: f64, achieved: &str, missed: &str) -> String {
        let target = f64::from(self.target());
        if current >= target {
            format!("{}: {}", achieved, self.metric().render(current - target))
        } else {
            format!("{}: {}", missed, self.metric().render(target - current))
        }
    }
}

/// Inclusive window covering one calendar month.
fn month_window(year: i32, month: u32) -> Option<DateWindow> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(DateWindow::new(first, next_first.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{
        Activity, ActivityAttributes, ActivityDetails, ActivityKind, FootDetails,
    };
    use crate::goal::Timeframe;
    use std::time::Duration;

    fn run(start: &str, miles: f64) -> Activity {
        Activity::new(
            format!("{}T07:00:00", start).parse().unwrap(),
            Duration::from_secs(1800),
            ActivityAttributes::default(),
            ActivityDetails::Run(FootDetails {
                distance_miles: Some(miles),
                ..Default::default()
            }),
        )
        .unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_month_window_last_days() {
        assert_eq!(
            month_window(2021, 2).unwrap(),
            DateWindow::new(date("2021-02-01"), date("2021-02-28"))
        );
        assert_eq!(
            month_window(2020, 2).unwrap().end,
            date("2020-02-29")
        );
        assert_eq!(
            month_window(2021, 12).unwrap().end,
            date("2021-12-31")
        );
    }

    #[test]
    fn test_cumulative_deficit() {
        let mut athlete = Athlete::new();
        athlete.add_activity(run("2023-03-15", 3.1));

        let goal = Goal::new(ActivityKind::Run, Metric::Count, Timeframe::Cumulative, 10)
            .unwrap();
        let report = goal.report_at(&athlete, date("2023-04-01"));

        assert_eq!(
            report,
            "Goal: Run 10 times on a cumulative basis Current: 1 Deficit: 9"
        );
    }

    #[test]
    fn test_cumulative_surplus() {
        let mut athlete = Athlete::new();
        for day in 1..=4 {
            athlete.add_activity(run(&format!("2023-03-0{}", day), 3.0));
        }

        let goal = Goal::new(ActivityKind::Run, Metric::Count, Timeframe::Cumulative, 3)
            .unwrap();
        let report = goal.report_at(&athlete, date("2023-04-01"));

        assert!(report.ends_with("Current: 4 Achieved with surplus: 1"));
    }

    #[test]
    fn test_year_report_limits_to_calendar_year() {
        let mut athlete = Athlete::new();
        athlete.add_activity(run("2022-12-31", 5.0));
        athlete.add_activity(run("2023-02-01", 5.0));
        athlete.add_activity(run("2023-03-01", 5.0));

        let goal = Goal::new(ActivityKind::Run, Metric::Distance, Timeframe::Year, 100)
            .unwrap();
        let report = goal.report_at(&athlete, date("2023-06-15"));

        assert_eq!(
            report,
            "Goal: Run 100 miles each year, year to date: 10.00 deficit: 90.00"
        );
    }

    #[test]
    fn test_zero_activity_report_still_prints() {
        let athlete = Athlete::new();
        let goal = Goal::new(ActivityKind::Tennis, Metric::Count, Timeframe::Year, 8)
            .unwrap();

        let report = goal.report_at(&athlete, date("2023-06-15"));
        assert!(report.ends_with("year to date: 0 deficit: 8"));
    }

    #[test]
    fn test_month_back_series_reverse_chronological() {
        let mut athlete = Athlete::new();
        athlete.add_activity(run("2021-03-10", 3.0));
        athlete.add_activity(run("2021-03-20", 3.0));
        athlete.add_activity(run("2021-05-05", 3.0));

        let goal = Goal::new(ActivityKind::Run, Metric::Count, Timeframe::Month, 2)
            .unwrap();
        let report = goal.report_at(&athlete, date("2021-06-15"));
        let lines: Vec<&str> = report.lines().collect();

        // Current month plus March, April, May history.
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("month to date: 0 deficit: 2"));
        assert_eq!(lines[1], "      2021-05: 1 deficit: 1");
        assert_eq!(lines[2], "      2021-04: 0 deficit: 2");
        assert_eq!(lines[3], "      2021-03: 2 goal achieved with surplus: 0");
    }

    #[test]
    fn test_month_series_crosses_year_boundary() {
        let mut athlete = Athlete::new();
        athlete.add_activity(run("2020-11-02", 3.0));

        let goal = Goal::new(ActivityKind::Run, Metric::Count, Timeframe::Month, 1)
            .unwrap();
        let report = goal.report_at(&athlete, date("2021-02-10"));
        let lines: Vec<&str> = report.lines().collect();

        // History covers 2020-11 through 2021-01.
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("      2021-01:"));
        assert!(lines[3].starts_with("      2020-11:"));
    }

    #[test]
    fn test_month_series_empty_when_no_activity() {
        let athlete = Athlete::new();
        let goal = Goal::new(ActivityKind::Run, Metric::Count, Timeframe::Month, 1)
            .unwrap();

        let report = goal.report_at(&athlete, date("2021-06-15"));
        assert_eq!(report.lines().count(), 1);
    }

    #[test]
    fn test_month_series_empty_when_earliest_in_current_month() {
        let mut athlete = Athlete::new();
        athlete.add_activity(run("2021-06-02", 3.0));

        let goal = Goal::new(ActivityKind::Run, Metric::Count, Timeframe::Month, 1)
            .unwrap();
        let report = goal.report_at(&athlete, date("2021-06-15"));

        assert_eq!(report.lines().count(), 1);
        assert!(report.contains("month to date: 1 goal achieved with surplus: 0"));
    }
}
