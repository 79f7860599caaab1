// lepasserelle - Bridge & Integration
//
// *La Passerelle* (The Bridge) - CLI wiring between the catalog, the index, and the engine

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod batch;
pub mod cli;
pub mod config;
pub mod response;

pub use batch::{BatchReport, QueryPredictions};
pub use config::ProjectConfig;
pub use response::{RecommendationResponse, RecommendedAssessment};
