#![forbid(unsafe_code)]

//! Core data model for the org chart engine: people records, the collapsible
//! tree, and the typed chart configuration with its explicit defaults.
//!
//! Everything here is headless and side-effect free. Layout, reconciliation
//! and viewport math live in `orgchart-render`; host wiring lives in
//! `orgchart`.

pub mod config;
pub mod error;
pub mod person;
pub mod tree;

pub use config::{
    ChartConfig, ChartOptions, LineType, Margin, ScaleExtent, StyleMap, StyleValue,
};
pub use error::{Error, Result};
pub use person::{Person, PersonNode};
pub use tree::{NodeId, OrgNode, OrgTree, Toggle};
