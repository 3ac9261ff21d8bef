pub mod chart_data;
pub mod efficiency;
pub mod recommendation_engine;
pub mod roi_calculator;
