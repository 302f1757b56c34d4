// src/lib.rs

//! pouetspy library
//!
//! Watches pouet.net for new comments on the productions of some groups and
//! for new productions on some platforms, and renders what changed since the
//! previous run as an HTML report.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
