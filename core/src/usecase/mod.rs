pub mod dashboard;
pub mod monthly;
pub mod normalize;

#[cfg(test)]
mod dashboard_test;

pub use dashboard::UtilityDashboard;
pub use monthly::monthly_totals;
pub use normalize::normalize;
