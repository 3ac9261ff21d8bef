use serde::{Deserialize, Serialize};

/// One bucket of a chart series. `date` is the bucket label, `value` the
/// averaged metric for that bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub date: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Which record field a time series is built from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartMetric {
    #[default]
    Revenue,
    Costs,
    Roi,
}

impl ChartMetric {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "revenue" => Some(ChartMetric::Revenue),
            "costs" => Some(ChartMetric::Costs),
            "roi" => Some(ChartMetric::Roi),
            _ => None,
        }
    }
}

/// Group totals for one automation tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolAggregate {
    pub tool: String,
    pub total_costs: f64,
    pub total_revenue: f64,
    pub roi: f64,
    pub leads_generated: u64,
}
