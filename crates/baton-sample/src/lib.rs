//! # Order Pipeline Sample Library
//!
//! This library exposes the application modules for integration testing.

pub mod flows;
pub mod model;
pub mod ops;
pub mod store;
