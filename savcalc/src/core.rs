// src/core.rs
pub mod audit;
pub mod binder;
pub mod engine;
pub mod format;
pub mod markup;
pub mod reader;
