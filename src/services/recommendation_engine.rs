use uuid::Uuid;

use crate::models::{Category, Difficulty, OptimizationRecommendation, Priority, RoiRecord};
use crate::services::efficiency::{
    analyze_efficiency, identify_bottlenecks, Bottlenecks, EfficiencySummary,
};

/// Average ROI below this asks for lead-conversion work.
pub const LOW_AVERAGE_ROI_PCT: f64 = 100.0;
/// Cost efficiency below this asks for more workflow automation.
pub const COST_EFFICIENCY_TARGET_PCT: f64 = 150.0;
/// Revenue consistency below this asks for stabilization work.
pub const REVENUE_CONSISTENCY_FLOOR_PCT: f64 = 70.0;
/// Average ROI above this suggests scaling the automation further.
pub const SCALE_UP_ROI_PCT: f64 = 150.0;

/// Runs the analyzer over the full input and evaluates the rule table.
/// Empty input produces no recommendations.
pub fn generate_recommendations(records: &[RoiRecord]) -> Vec<OptimizationRecommendation> {
    if records.is_empty() {
        return Vec::new();
    }

    let efficiency = analyze_efficiency(records);
    let bottlenecks = identify_bottlenecks(records);
    recommendations_from_analysis(&efficiency, &bottlenecks)
}

/// Rule-table entry point over pre-computed analyzer output, also used by
/// the transport layer. Rules are independent; every matching rule fires
/// exactly once.
pub fn recommendations_from_analysis(
    efficiency: &EfficiencySummary,
    bottlenecks: &Bottlenecks,
) -> Vec<OptimizationRecommendation> {
    let mut recommendations = Vec::new();

    if !bottlenecks.high_cost_tools.is_empty() {
        recommendations.push(recommendation(
            "Optimize High-Cost Automation Tools",
            format!(
                "Tools with low ROI detected: {}. Consider renegotiating contracts or switching to more cost-effective alternatives.",
                bottlenecks.high_cost_tools.join(", ")
            ),
            Priority::High,
            Category::CostReduction,
            25.0,
            &[
                "Review current tool subscriptions and usage",
                "Compare with alternative solutions",
                "Negotiate better pricing with vendors",
                "Consider consolidating tools",
            ],
            Difficulty::Medium,
        ));
    }

    if efficiency.average_roi < LOW_AVERAGE_ROI_PCT {
        recommendations.push(recommendation(
            "Improve Lead Conversion Strategy",
            "Current ROI is below optimal levels. Focus on improving lead quality and conversion rates.".to_string(),
            Priority::High,
            Category::RevenueIncrease,
            35.0,
            &[
                "Implement lead scoring system",
                "Optimize sales funnel",
                "Enhance follow-up processes",
                "Train sales team on automation tools",
            ],
            Difficulty::Medium,
        ));
    }

    if efficiency.cost_efficiency < COST_EFFICIENCY_TARGET_PCT {
        recommendations.push(recommendation(
            "Enhance Automation Efficiency",
            "Cost efficiency can be improved. Automate more manual processes and optimize workflows.".to_string(),
            Priority::Medium,
            Category::Efficiency,
            20.0,
            &[
                "Identify manual bottlenecks",
                "Implement workflow automation",
                "Set up automated reporting",
                "Integrate systems for better data flow",
            ],
            Difficulty::Easy,
        ));
    }

    if bottlenecks.inefficient_lead_generation {
        recommendations.push(recommendation(
            "Reduce Cost Per Acquisition",
            "CPA is higher than industry benchmarks. Optimize lead generation channels and targeting.".to_string(),
            Priority::High,
            Category::CostReduction,
            30.0,
            &[
                "Analyze lead sources by CPA",
                "Focus budget on high-performing channels",
                "Improve targeting and segmentation",
                "A/B test lead generation campaigns",
            ],
            Difficulty::Medium,
        ));
    }

    if efficiency.revenue_consistency < REVENUE_CONSISTENCY_FLOOR_PCT {
        recommendations.push(recommendation(
            "Stabilize Revenue Streams",
            "Revenue shows high variability. Implement strategies for more consistent performance.".to_string(),
            Priority::Medium,
            Category::RevenueIncrease,
            15.0,
            &[
                "Develop recurring revenue models",
                "Implement customer retention programs",
                "Create predictable sales pipeline",
                "Balance seasonal fluctuations",
            ],
            Difficulty::Hard,
        ));
    }

    if efficiency.average_roi > SCALE_UP_ROI_PCT {
        recommendations.push(recommendation(
            "Scale Successful Automation",
            "Strong ROI indicates successful automation. Consider expanding to additional processes.".to_string(),
            Priority::Low,
            Category::Automation,
            40.0,
            &[
                "Identify additional automation opportunities",
                "Replicate successful workflows",
                "Expand to new markets or segments",
                "Invest in advanced AI capabilities",
            ],
            Difficulty::Medium,
        ));
    }

    // Stable sort keeps rule-table order among equal priorities.
    recommendations.sort_by_key(|r| r.priority.rank());
    recommendations
}

fn recommendation(
    title: &str,
    description: String,
    priority: Priority,
    category: Category,
    estimated_impact: f64,
    action_items: &[&str],
    implementation_difficulty: Difficulty,
) -> OptimizationRecommendation {
    OptimizationRecommendation {
        id: format!("rec_{}", Uuid::new_v4()),
        title: title.to_string(),
        description,
        priority,
        category,
        estimated_impact,
        action_items: action_items.iter().map(|s| s.to_string()).collect(),
        implementation_difficulty,
    }
}
