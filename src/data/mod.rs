pub mod moves;
pub mod type_chart;
