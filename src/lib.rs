pub mod classify_coverage;
pub mod config;
pub mod errors;
pub mod load_dictionary;
pub mod logging;
pub mod normalize_vocabulary;
pub mod pipeline;
pub mod report_coverage;
