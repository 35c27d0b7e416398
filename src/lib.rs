pub mod config;
pub mod error;
pub mod ngrams;
pub mod normalizer;
pub mod pipeline;
pub mod store;
pub mod tokenizer;
// cmd and reports are binary modules, declared in main.rs.
