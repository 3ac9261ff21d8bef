use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::models::{ChartDataPoint, ChartMetric, RoiRecord, TimeFilter, ToolAggregate};

/// Spans longer than this many days switch the adaptive `all` window from
/// day to week buckets.
const WEEK_SPAN_DAYS: i64 = 60;
/// Spans longer than this many days switch the adaptive `all` window from
/// week to month buckets.
const MONTH_SPAN_DAYS: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Day,
    Week,
    Month,
}

struct Bucket {
    start: NaiveDate,
    label: String,
    values: Vec<f64>,
}

/// Chart-ready series of per-bucket means for the requested metric over the
/// window of `filter`, anchored at the current wall clock. Buckets with no
/// records are emitted with value 0; output order is bucket order.
pub fn prepare_time_series(
    records: &[RoiRecord],
    filter: TimeFilter,
    metric: ChartMetric,
) -> Vec<ChartDataPoint> {
    prepare_time_series_at(records, filter, metric, Utc::now().date_naive())
}

pub(crate) fn prepare_time_series_at(
    records: &[RoiRecord],
    filter: TimeFilter,
    metric: ChartMetric,
    now: NaiveDate,
) -> Vec<ChartDataPoint> {
    if records.is_empty() {
        return Vec::new();
    }

    let (start, granularity) = match filter {
        TimeFilter::Last7Days => (now - Duration::days(7), Granularity::Day),
        TimeFilter::Last30Days => (now - Duration::days(30), Granularity::Day),
        TimeFilter::Last90Days => (now - Duration::days(90), Granularity::Week),
        TimeFilter::LastYear => (now - Duration::days(365), Granularity::Month),
        TimeFilter::All => {
            // Anchor at the earliest record and pick the granularity from
            // the actual span of the data.
            let earliest = records.iter().map(|r| r.date).min().unwrap_or(now);
            let span = (now - earliest).num_days();
            let granularity = if span > MONTH_SPAN_DAYS {
                Granularity::Month
            } else if span > WEEK_SPAN_DAYS {
                Granularity::Week
            } else {
                Granularity::Day
            };
            (earliest, granularity)
        }
    };

    let mut buckets = build_buckets(start, now, granularity);

    for record in records.iter().filter(|r| r.date >= start && r.date <= now) {
        let value = match metric {
            ChartMetric::Revenue => record.revenue,
            ChartMetric::Costs => record.costs,
            ChartMetric::Roi => record.revenue - record.costs,
        };
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| bucket_contains(b.start, granularity, record.date))
        {
            bucket.values.push(value);
        }
    }

    buckets
        .into_iter()
        .map(|bucket| {
            let mean = if bucket.values.is_empty() {
                0.0
            } else {
                bucket.values.iter().sum::<f64>() / bucket.values.len() as f64
            };
            ChartDataPoint {
                date: bucket.label.clone(),
                value: round2(mean),
                label: Some(bucket.label),
            }
        })
        .collect()
}

/// The full ordered bucket sequence covering `[start, end]`.
fn build_buckets(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    match granularity {
        Granularity::Day => {
            let mut day = start;
            while day <= end {
                buckets.push(Bucket {
                    start: day,
                    label: day.format("%b %d").to_string(),
                    values: Vec::new(),
                });
                day += Duration::days(1);
            }
        }
        Granularity::Week => {
            let mut week = start;
            while week <= end {
                buckets.push(Bucket {
                    start: week,
                    label: week.format("%b %d").to_string(),
                    values: Vec::new(),
                });
                week += Duration::days(7);
            }
        }
        Granularity::Month => {
            let mut month = start.with_day(1).unwrap_or(start);
            while month <= end {
                buckets.push(Bucket {
                    start: month,
                    label: month.format("%b %Y").to_string(),
                    values: Vec::new(),
                });
                month = next_month_start(month);
            }
        }
    }
    buckets
}

fn next_month_start(month_start: NaiveDate) -> NaiveDate {
    let (year, month) = if month_start.month() == 12 {
        (month_start.year() + 1, 1)
    } else {
        (month_start.year(), month_start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(month_start)
}

fn bucket_contains(bucket_start: NaiveDate, granularity: Granularity, date: NaiveDate) -> bool {
    match granularity {
        Granularity::Day => date == bucket_start,
        // A week bucket covers [start, start + 7 days).
        Granularity::Week => date >= bucket_start && date < bucket_start + Duration::days(7),
        Granularity::Month => {
            date.year() == bucket_start.year() && date.month() == bucket_start.month()
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-tool group sums, sorted descending by net ROI. The stable sort keeps
/// first-seen tool order on ties.
pub fn aggregate_by_tool(records: &[RoiRecord]) -> Vec<ToolAggregate> {
    let mut aggregates: Vec<ToolAggregate> = Vec::new();
    for record in records {
        match aggregates
            .iter_mut()
            .find(|a| a.tool == record.automation_tool)
        {
            Some(aggregate) => {
                aggregate.total_costs += record.costs;
                aggregate.total_revenue += record.revenue;
                aggregate.leads_generated += u64::from(record.leads_generated);
            }
            None => aggregates.push(ToolAggregate {
                tool: record.automation_tool.clone(),
                total_costs: record.costs,
                total_revenue: record.revenue,
                roi: 0.0,
                leads_generated: u64::from(record.leads_generated),
            }),
        }
    }

    for aggregate in &mut aggregates {
        aggregate.roi = aggregate.total_revenue - aggregate.total_costs;
    }

    aggregates.sort_by(|a, b| b.roi.partial_cmp(&a.roi).unwrap_or(std::cmp::Ordering::Equal));
    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(date: &str, costs: f64, revenue: f64, tool: &str, leads: u32) -> RoiRecord {
        RoiRecord {
            id: format!("roi_{}_{}", tool, date),
            date: date.parse().unwrap(),
            costs,
            revenue,
            automation_tool: tool.to_string(),
            leads_generated: leads,
            created_at: Utc::now(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        let series = prepare_time_series(&[], TimeFilter::Last30Days, ChartMetric::Revenue);
        assert!(series.is_empty());
    }

    #[test]
    fn test_seven_day_window_emits_all_day_buckets() {
        let now = day("2024-06-30");
        let records = vec![record("2024-06-25", 50.0, 100.0, "A", 1)];
        let series =
            prepare_time_series_at(&records, TimeFilter::Last7Days, ChartMetric::Revenue, now);

        // Inclusive [now - 7, now]: eight day buckets.
        assert_eq!(series.len(), 8);
        assert_eq!(series[0].date, "Jun 23");
        assert_eq!(series[2].value, 100.0);
        // Every other bucket is present with value 0.
        assert!(series.iter().filter(|p| p.value == 0.0).count() == 7);
    }

    #[test]
    fn test_thirty_day_window_keeps_empty_buckets() {
        let now = day("2024-06-30");
        let records = vec![record("2024-06-15", 0.0, 80.0, "A", 1)];
        let series =
            prepare_time_series_at(&records, TimeFilter::Last30Days, ChartMetric::Revenue, now);

        // One point per day bucket spanned, empty days included with value 0.
        assert_eq!(series.len(), 31);
        let hit = series.iter().find(|p| p.date == "Jun 15").unwrap();
        assert_eq!(hit.value, 80.0);
        assert_eq!(series.iter().filter(|p| p.value == 0.0).count(), 30);
    }

    #[test]
    fn test_bucket_value_is_rounded_mean() {
        let now = day("2024-06-30");
        let records = vec![
            record("2024-06-28", 0.0, 10.0, "A", 1),
            record("2024-06-28", 0.0, 10.0, "A", 1),
            record("2024-06-28", 0.0, 5.0, "A", 1),
        ];
        let series =
            prepare_time_series_at(&records, TimeFilter::Last7Days, ChartMetric::Revenue, now);

        // mean(10, 10, 5) = 8.333... rounded to 8.33
        let point = series.iter().find(|p| p.date == "Jun 28").unwrap();
        assert_eq!(point.value, 8.33);
    }

    #[test]
    fn test_roi_metric_is_per_record_net() {
        let now = day("2024-06-30");
        let records = vec![record("2024-06-29", 30.0, 100.0, "A", 1)];
        let series = prepare_time_series_at(&records, TimeFilter::Last7Days, ChartMetric::Roi, now);

        let point = series.iter().find(|p| p.date == "Jun 29").unwrap();
        assert_eq!(point.value, 70.0);
    }

    #[test]
    fn test_ninety_day_window_uses_week_buckets() {
        let now = day("2024-06-30");
        let records = vec![record("2024-04-10", 0.0, 100.0, "A", 1)];
        let series =
            prepare_time_series_at(&records, TimeFilter::Last90Days, ChartMetric::Revenue, now);

        // Start 2024-04-01, stepping 7 days: 13 buckets up to 2024-06-24.
        assert_eq!(series.len(), 13);
        assert_eq!(series[0].date, "Apr 01");
        // 2024-04-10 falls in [Apr 08, Apr 15).
        assert_eq!(series[1].value, 100.0);
        assert_eq!(series[0].value, 0.0);
    }

    #[test]
    fn test_all_filter_picks_granularity_by_span() {
        let now = day("2024-06-30");

        let short = vec![
            record("2024-06-01", 0.0, 10.0, "A", 1),
            record("2024-06-10", 0.0, 20.0, "A", 1),
        ];
        let series = prepare_time_series_at(&short, TimeFilter::All, ChartMetric::Revenue, now);
        // 29-day span: day buckets anchored at the earliest record.
        assert_eq!(series.len(), 30);
        assert_eq!(series[0].date, "Jun 01");

        let medium = vec![
            record("2024-03-01", 0.0, 10.0, "A", 1),
            record("2024-06-10", 0.0, 20.0, "A", 1),
        ];
        let series = prepare_time_series_at(&medium, TimeFilter::All, ChartMetric::Revenue, now);
        // 121-day span: week buckets.
        assert_eq!(series.len(), 18);
        assert_eq!(series[0].date, "Mar 01");

        let long = vec![
            record("2023-06-01", 0.0, 10.0, "A", 1),
            record("2024-06-10", 0.0, 20.0, "A", 1),
        ];
        let series = prepare_time_series_at(&long, TimeFilter::All, ChartMetric::Revenue, now);
        // 395-day span: calendar month buckets, June 2023 through June 2024.
        assert_eq!(series.len(), 13);
        assert_eq!(series[0].date, "Jun 2023");
        assert_eq!(series[12].date, "Jun 2024");
    }

    #[test]
    fn test_aggregate_by_tool_sums_and_sorts_descending() {
        let records = vec![
            record("2024-01-01", 100.0, 150.0, "Zapier", 3),
            record("2024-01-02", 50.0, 400.0, "Make", 7),
            record("2024-01-03", 100.0, 250.0, "Zapier", 2),
        ];
        let aggregates = aggregate_by_tool(&records);

        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].tool, "Make");
        assert_eq!(aggregates[0].roi, 350.0);
        assert_eq!(aggregates[1].tool, "Zapier");
        assert_eq!(aggregates[1].total_costs, 200.0);
        assert_eq!(aggregates[1].total_revenue, 400.0);
        assert_eq!(aggregates[1].roi, 200.0);
        assert_eq!(aggregates[1].leads_generated, 5);
    }

    #[test]
    fn test_aggregate_by_tool_ties_keep_first_seen_order() {
        let records = vec![
            record("2024-01-01", 100.0, 200.0, "B", 1),
            record("2024-01-02", 100.0, 200.0, "A", 1),
        ];
        let aggregates = aggregate_by_tool(&records);
        assert_eq!(aggregates[0].tool, "B");
        assert_eq!(aggregates[1].tool, "A");
    }
}
