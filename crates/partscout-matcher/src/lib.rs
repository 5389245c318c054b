//! Scoring, comparison, and multi-distributor search for replacement parts.

pub mod compare;
pub mod compliance;
pub mod error;
pub mod finder;
pub mod report;
pub mod scoring;

pub use compliance::{check_aviation_compliance, meets_requirements, ComplianceReport};
pub use error::MatchError;
pub use finder::AlternativeFinder;
pub use report::{
    AlternativeReport, AvailabilityReport, BestAlternative, ComparisonReport, ComponentSummary,
    FindOutcome, PartAvailability, SearchReport,
};
pub use scoring::score_alternative;
