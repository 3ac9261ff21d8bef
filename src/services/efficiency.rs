use chrono::NaiveDate;

use crate::models::RoiRecord;
use crate::services::roi_calculator::{cost_per_acquisition, roi_percentage};

/// Per-tool ROI percentage below this marks the tool as high-cost.
pub const HIGH_COST_TOOL_ROI_PCT: f64 = 50.0;
/// Per-record ROI percentage below this marks its date as low-performing.
pub const LOW_PERFORMANCE_ROI_PCT: f64 = 30.0;
/// At most this many low-performing dates are reported, oldest first.
pub const MAX_LOW_PERFORMING_PERIODS: usize = 5;
/// Aggregate cost per acquisition above this flags lead generation.
pub const INEFFICIENT_CPA_THRESHOLD: f64 = 100.0;

/// Efficiency ratios over a record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EfficiencySummary {
    pub average_roi: f64,
    pub average_cpa: f64,
    pub cost_efficiency: f64,
    /// 100 minus the coefficient of variation of revenue, floored at 0.
    pub revenue_consistency: f64,
}

/// Underperforming tools and periods flagged in a record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bottlenecks {
    pub high_cost_tools: Vec<String>,
    pub low_performing_periods: Vec<NaiveDate>,
    pub inefficient_lead_generation: bool,
}

/// Efficiency ratios over whatever subset the caller passes; no time
/// filtering happens here. Empty input yields all zeros.
pub fn analyze_efficiency(records: &[RoiRecord]) -> EfficiencySummary {
    if records.is_empty() {
        return EfficiencySummary::default();
    }

    let total_costs: f64 = records.iter().map(|r| r.costs).sum();
    let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
    let total_leads: f64 = records.iter().map(|r| f64::from(r.leads_generated)).sum();

    let cost_efficiency = if total_costs > 0.0 {
        (total_revenue / total_costs) * 100.0
    } else {
        0.0
    };

    let mean_revenue = total_revenue / records.len() as f64;
    let revenue_consistency = if mean_revenue > 0.0 {
        let variance = records
            .iter()
            .map(|r| (r.revenue - mean_revenue).powi(2))
            .sum::<f64>()
            / records.len() as f64;
        (100.0 - (variance.sqrt() / mean_revenue) * 100.0).max(0.0)
    } else {
        0.0
    };

    EfficiencySummary {
        average_roi: roi_percentage(total_costs, total_revenue),
        average_cpa: cost_per_acquisition(total_costs, total_leads),
        cost_efficiency,
        revenue_consistency,
    }
}

/// Variant over pre-summed totals, used at the transport boundary. A single
/// aggregate has no revenue spread, so consistency is 100 whenever there is
/// revenue at all.
pub fn analyze_efficiency_totals(
    total_costs: f64,
    total_revenue: f64,
    total_leads: f64,
) -> EfficiencySummary {
    EfficiencySummary {
        average_roi: roi_percentage(total_costs, total_revenue),
        average_cpa: cost_per_acquisition(total_costs, total_leads),
        cost_efficiency: if total_costs > 0.0 {
            (total_revenue / total_costs) * 100.0
        } else {
            0.0
        },
        revenue_consistency: if total_revenue > 0.0 { 100.0 } else { 0.0 },
    }
}

/// Flags high-cost tools, low-performing dates and inefficient lead
/// generation. Empty input yields empty/false defaults.
pub fn identify_bottlenecks(records: &[RoiRecord]) -> Bottlenecks {
    if records.is_empty() {
        return Bottlenecks::default();
    }

    // Per-tool cost/revenue totals, first-seen order.
    let mut tool_totals: Vec<(String, f64, f64)> = Vec::new();
    for record in records {
        match tool_totals
            .iter_mut()
            .find(|(tool, _, _)| *tool == record.automation_tool)
        {
            Some((_, costs, revenue)) => {
                *costs += record.costs;
                *revenue += record.revenue;
            }
            None => tool_totals.push((
                record.automation_tool.clone(),
                record.costs,
                record.revenue,
            )),
        }
    }

    let high_cost_tools = tool_totals
        .iter()
        .filter(|(_, costs, revenue)| roi_percentage(*costs, *revenue) < HIGH_COST_TOOL_ROI_PCT)
        .map(|(tool, _, _)| tool.clone())
        .collect();

    let mut by_date: Vec<&RoiRecord> = records.iter().collect();
    by_date.sort_by_key(|r| r.date);
    let low_performing_periods = by_date
        .iter()
        .filter(|r| roi_percentage(r.costs, r.revenue) < LOW_PERFORMANCE_ROI_PCT)
        .take(MAX_LOW_PERFORMING_PERIODS)
        .map(|r| r.date)
        .collect();

    let total_costs: f64 = records.iter().map(|r| r.costs).sum();
    let total_leads: f64 = records.iter().map(|r| f64::from(r.leads_generated)).sum();
    let inefficient_lead_generation =
        cost_per_acquisition(total_costs, total_leads) > INEFFICIENT_CPA_THRESHOLD;

    Bottlenecks {
        high_cost_tools,
        low_performing_periods,
        inefficient_lead_generation,
    }
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

    #[test]
    fn test_empty_efficiency_is_all_zero() {
        let summary = analyze_efficiency(&[]);
        assert_eq!(summary, EfficiencySummary::default());
    }

    #[test]
    fn test_efficiency_ratios_over_totals() {
        let records = vec![
            record("2024-01-01", 100.0, 200.0, "A", 5),
            record("2024-01-02", 100.0, 200.0, "B", 5),
        ];
        let summary = analyze_efficiency(&records);

        // Totals: costs 200, revenue 400, leads 10.
        assert_eq!(summary.average_roi, 100.0);
        assert_eq!(summary.average_cpa, 20.0);
        assert_eq!(summary.cost_efficiency, 200.0);
        // Equal revenues: zero spread, full consistency.
        assert_eq!(summary.revenue_consistency, 100.0);
    }

    #[test]
    fn test_revenue_consistency_penalizes_spread() {
        let records = vec![
            record("2024-01-01", 10.0, 100.0, "A", 1),
            record("2024-01-02", 10.0, 300.0, "A", 1),
        ];
        let summary = analyze_efficiency(&records);
        // mean 200, stddev 100, cv 50% -> consistency 50
        assert!((summary.revenue_consistency - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_consistency_zero_mean() {
        let records = vec![record("2024-01-01", 10.0, 0.0, "A", 1)];
        assert_eq!(analyze_efficiency(&records).revenue_consistency, 0.0);
    }

    #[test]
    fn test_totals_variant_matches_record_analysis() {
        let records = vec![record("2024-01-01", 100.0, 250.0, "A", 4)];
        let from_records = analyze_efficiency(&records);
        let from_totals = analyze_efficiency_totals(100.0, 250.0, 4.0);
        assert_eq!(from_records, from_totals);
    }

    #[test]
    fn test_empty_bottlenecks() {
        let bottlenecks = identify_bottlenecks(&[]);
        assert!(bottlenecks.high_cost_tools.is_empty());
        assert!(bottlenecks.low_performing_periods.is_empty());
        assert!(!bottlenecks.inefficient_lead_generation);
    }

    #[test]
    fn test_high_cost_tool_boundary_is_strict() {
        // ROI exactly 49% is flagged, exactly 50% is not.
        let flagged = identify_bottlenecks(&[record("2024-01-01", 100.0, 149.0, "A", 1)]);
        assert_eq!(flagged.high_cost_tools, vec!["A".to_string()]);

        let clean = identify_bottlenecks(&[record("2024-01-01", 100.0, 150.0, "A", 1)]);
        assert!(clean.high_cost_tools.is_empty());
    }

    #[test]
    fn test_high_cost_tools_keep_first_seen_order() {
        let records = vec![
            record("2024-01-03", 100.0, 110.0, "Zapier", 1),
            record("2024-01-01", 100.0, 120.0, "Make", 1),
            record("2024-01-02", 100.0, 400.0, "n8n", 1),
        ];
        let bottlenecks = identify_bottlenecks(&records);
        assert_eq!(
            bottlenecks.high_cost_tools,
            vec!["Zapier".to_string(), "Make".to_string()]
        );
    }

    #[test]
    fn test_low_performing_periods_capped_chronologically() {
        // Seven loss-making days, listed out of order on purpose.
        let mut records: Vec<RoiRecord> = (1..=7)
            .rev()
            .map(|day| record(&format!("2024-02-0{}", day), 100.0, 110.0, "A", 1))
            .collect();
        // One healthy day that must not appear.
        records.push(record("2024-02-08", 100.0, 200.0, "A", 1));

        let bottlenecks = identify_bottlenecks(&records);
        let expected: Vec<NaiveDate> = (1..=5)
            .map(|day| format!("2024-02-0{}", day).parse().unwrap())
            .collect();
        assert_eq!(bottlenecks.low_performing_periods, expected);
    }

    #[test]
    fn test_inefficient_lead_generation_threshold_is_strict() {
        // CPA 125 > 100 flags; CPA exactly 100 does not.
        let flagged = identify_bottlenecks(&[record("2024-01-01", 500.0, 1000.0, "A", 4)]);
        assert!(flagged.inefficient_lead_generation);

        let clean = identify_bottlenecks(&[record("2024-01-01", 500.0, 1000.0, "A", 5)]);
        assert!(!clean.inefficient_lead_generation);
    }
}
