use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Trailing time window for report and chart computations, anchored at "now".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeFilter {
    #[serde(rename = "7d")]
    Last7Days,
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "1y")]
    LastYear,
    #[serde(rename = "all")]
    All,
}

impl TimeFilter {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "7d" => Some(TimeFilter::Last7Days),
            "30d" => Some(TimeFilter::Last30Days),
            "90d" => Some(TimeFilter::Last90Days),
            "1y" => Some(TimeFilter::LastYear),
            "all" => Some(TimeFilter::All),
            _ => None,
        }
    }

    /// Window length in days; `None` for `all`.
    pub fn window_days(&self) -> Option<i64> {
        match self {
            TimeFilter::Last7Days => Some(7),
            TimeFilter::Last30Days => Some(30),
            TimeFilter::Last90Days => Some(90),
            TimeFilter::LastYear => Some(365),
            TimeFilter::All => None,
        }
    }

    /// Inclusive start of the trailing window, `None` for `all`.
    pub fn start_date(&self, now: NaiveDate) -> Option<NaiveDate> {
        self.window_days().map(|days| now - Duration::days(days))
    }
}

impl std::fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFilter::Last7Days => write!(f, "7d"),
            TimeFilter::Last30Days => write!(f, "30d"),
            TimeFilter::Last90Days => write!(f, "90d"),
            TimeFilter::LastYear => write!(f, "1y"),
            TimeFilter::All => write!(f, "all"),
        }
    }
}

/// Snapshot of derived ROI metrics over a time window. Recomputed on demand,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiReport {
    pub total_roi: f64,
    pub roi_percentage: f64,
    /// Days to recover total costs at the daily revenue rate.
    pub payback_period: f64,
    pub total_costs: f64,
    pub total_revenue: f64,
    pub net_profit: f64,
    pub cost_per_acquisition: f64,
    pub revenue_growth_rate: f64,
    pub period: TimeFilter,
    pub generated_at: DateTime<Utc>,
}

impl RoiReport {
    /// All-zero report for an empty window. A defined terminal case, not an error.
    pub fn empty(period: TimeFilter, generated_at: DateTime<Utc>) -> Self {
        Self {
            total_roi: 0.0,
            roi_percentage: 0.0,
            payback_period: 0.0,
            total_costs: 0.0,
            total_revenue: 0.0,
            net_profit: 0.0,
            cost_per_acquisition: 0.0,
            revenue_growth_rate: 0.0,
            period,
            generated_at,
        }
    }
}
