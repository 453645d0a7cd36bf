// Domain layer - Dashboard declarations and their invariants
pub mod dashboard;
pub mod error;
pub mod exventure;
