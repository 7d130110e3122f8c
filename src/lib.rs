#![doc(test(attr(deny(warnings))))]

//! Trip Planner drives a four-step trip-request wizard over a mutable draft
//! and submits the finished request to a booking endpoint.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod draft;
pub mod errors;
pub mod submission;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Trip Planner tracing initialized.");
    });
}
