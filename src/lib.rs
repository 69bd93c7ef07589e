//! chartdoc: parameter documentation for annotated Helm values files.
//!
//! Two views of a `values.yaml` are reconciled:
//!
//! - **declared** records from `## @param` style comment tags ([`parser::comments`])
//! - **computed** records from the flattened YAML tree ([`parser::values`])
//!
//! [`parser::merge`] joins them by name, [`dependencies`] adds entries for
//! subcharts listed in `Chart.yaml`, and [`check`] reports keys that are
//! documented without a value or valued without documentation.

pub mod check;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod model;
pub mod parser;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{Parameter, ValueType, NIL_PLACEHOLDER};
