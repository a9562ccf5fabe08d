// src/lib.rs
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod exit;
pub mod expand;
pub mod graph;
pub mod idf;
pub mod rank;
pub mod segment;
pub mod similarity;
