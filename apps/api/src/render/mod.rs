// Presentation layer: turns an EvaluationResult into what the client draws.

pub mod gauge;
pub mod report;

pub use report::{build_report, AnalysisReport};
