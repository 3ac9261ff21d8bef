mod chart;
mod record;
mod recommendation;
mod report;

pub use chart::{ChartDataPoint, ChartMetric, ToolAggregate};
pub use record::{NewRoiRecord, RoiRecord};
pub use recommendation::{Category, Difficulty, OptimizationRecommendation, Priority};
pub use report::{RoiReport, TimeFilter};
