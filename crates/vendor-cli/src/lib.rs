//! Shared CLI infrastructure for the vendor ETL binary.

pub mod logging;
