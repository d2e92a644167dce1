// src/models.rs
pub mod edit;
pub mod names;
pub mod reading;
pub mod scan;
pub mod values;

pub use edit::Edit;
pub use names::{CoefficientName, FieldName, InputName, ResultName, UnknownName};
pub use reading::Reading;
pub use scan::Scan;
pub use values::{Coefficients, FormattedResults, Inputs, Results};
