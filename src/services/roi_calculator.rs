use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{RoiRecord, RoiReport, TimeFilter};

/// Net return: revenue minus costs. No cost basis means no meaningful ROI
/// figure, so a zero cost maps to 0.
pub fn roi(costs: f64, revenue: f64) -> f64 {
    if costs == 0.0 {
        return 0.0;
    }
    revenue - costs
}

/// Return on investment as a percentage of costs. 0 when costs are 0.
pub fn roi_percentage(costs: f64, revenue: f64) -> f64 {
    if costs == 0.0 {
        return 0.0;
    }
    ((revenue - costs) / costs) * 100.0
}

/// Days to recover `total_costs` at `daily_revenue` per day, rounded up.
/// 0 when there is no daily revenue.
pub fn payback_period(total_costs: f64, daily_revenue: f64) -> f64 {
    if daily_revenue == 0.0 {
        return 0.0;
    }
    (total_costs / daily_revenue).ceil()
}

/// Average cost of one generated lead. 0 when there are no leads.
pub fn cost_per_acquisition(total_costs: f64, leads_generated: f64) -> f64 {
    if leads_generated == 0.0 {
        return 0.0;
    }
    total_costs / leads_generated
}

/// Percentage change from `previous` to `current`. 0 when there is no
/// previous revenue to compare against.
pub fn revenue_growth_rate(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    ((current - previous) / previous) * 100.0
}

/// Records whose date falls inside the trailing window of `filter`.
fn filter_by_window(records: &[RoiRecord], filter: TimeFilter, now: NaiveDate) -> Vec<RoiRecord> {
    match filter.start_date(now) {
        None => records.to_vec(),
        Some(start) => records
            .iter()
            .filter(|r| r.date >= start)
            .cloned()
            .collect(),
    }
}

/// Full ROI report over the records inside the window, anchored at the
/// current wall clock.
pub fn generate_roi_report(records: &[RoiRecord], filter: TimeFilter) -> RoiReport {
    generate_roi_report_at(records, filter, Utc::now())
}

pub(crate) fn generate_roi_report_at(
    records: &[RoiRecord],
    filter: TimeFilter,
    now: DateTime<Utc>,
) -> RoiReport {
    let mut window = filter_by_window(records, filter, now.date_naive());

    // An empty window is a defined terminal case, not an error.
    if window.is_empty() {
        return RoiReport::empty(filter, now);
    }

    let total_costs: f64 = window.iter().map(|r| r.costs).sum();
    let total_revenue: f64 = window.iter().map(|r| r.revenue).sum();
    let total_leads: f64 = window.iter().map(|r| f64::from(r.leads_generated)).sum();

    window.sort_by_key(|r| r.date);

    // Growth compares the later half of the window against the earlier half;
    // on odd counts the first half gets the smaller share.
    let mid = window.len() / 2;
    let first_half_revenue: f64 = window[..mid].iter().map(|r| r.revenue).sum();
    let second_half_revenue: f64 = window[mid..].iter().map(|r| r.revenue).sum();

    // Span between earliest and latest entry; same-day data counts as one day.
    let span_days = (window[window.len() - 1].date - window[0].date)
        .num_days()
        .max(1);
    let daily_revenue = total_revenue / span_days as f64;

    RoiReport {
        total_roi: roi(total_costs, total_revenue),
        roi_percentage: roi_percentage(total_costs, total_revenue),
        payback_period: payback_period(total_costs, daily_revenue),
        total_costs,
        total_revenue,
        net_profit: total_revenue - total_costs,
        cost_per_acquisition: cost_per_acquisition(total_costs, total_leads),
        revenue_growth_rate: revenue_growth_rate(second_half_revenue, first_half_revenue),
        period: filter,
        generated_at: now,
    }
}
