//! Assessment pipeline: input decoding, the engine, and report output.
//!
//! The CLI handlers share this orchestration: load → assess → format → write.

mod engine;
mod input;
mod load;
mod output;
mod report;

pub use engine::{ENGINE_VERSION, ReadinessEngine};
pub use input::{AssessmentInput, CategoryInput, SubcategoryInput, records_from_json_str};
pub use load::{load_assessment_with_context, load_records_with_context};
pub use output::{
    OutputFormat, OutputTarget, format_records_summary, format_report_summary, write_output,
};
pub use report::{CategoryReport, ReadinessReport, SubcategoryRecord};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Overall score fell below the requested minimum
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::BELOW_THRESHOLD, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
