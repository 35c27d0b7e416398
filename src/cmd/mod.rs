pub mod extract;
pub mod report;
