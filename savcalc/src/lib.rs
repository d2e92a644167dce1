// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod scenario;
pub mod utils;

pub use cli::{Args, run, run_with};
pub use config::{Config, ConfigError, Markup, load_config};
pub use crate::core::audit::{BoundSummary, PageReport, PageStatus, audit_directory, audit_page};
pub use crate::core::binder::{BindError, Binder, Bound, Update};
pub use crate::core::engine::compute;
pub use crate::core::format::{currency, format_results, plain};
pub use crate::core::markup::{EditError, HtmlPage, NodeId, Page};
pub use crate::core::reader::{read_elements, read_form};
pub use models::{
    CoefficientName, Coefficients, Edit, FieldName, FormattedResults, InputName, Inputs, Reading,
    ResultName, Results, Scan,
};
pub use scenario::{load_scenario, parse_scenario};
