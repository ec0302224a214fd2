//! Integration tests module
//!
//! Drives the `blueprint` binary against snapshot fixtures on disk and a
//! mocked wordpress.org directory.

pub mod cache;
pub mod common;
pub mod export;
pub mod generate;
pub mod scan;
pub mod select;
