pub mod adjuster;
pub mod config;
pub mod entropy;
pub mod generators;
pub mod pipeline;
pub mod scoring;
pub mod strategy;
pub mod table;
