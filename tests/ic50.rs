//! Integration tests for the dose-response pipeline
//!
//! Tests use Plate construction and the public builder API as the entry point.

#[path = "ic50/common.rs"]
mod common;

#[path = "ic50/test_recovery.rs"]
mod test_recovery;

#[path = "ic50/test_batch.rs"]
mod test_batch;

#[path = "ic50/test_report.rs"]
mod test_report;
