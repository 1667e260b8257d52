// Domain layer - Records, selection and rendered output
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod unemployment;
