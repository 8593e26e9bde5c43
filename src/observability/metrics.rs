//! Metrics collection.
//!
//! # Metrics
//! - `shell_navigations_total` (counter): navigations by outcome
//! - `shell_view_loads_total` (counter): deferred view loads by result
//! - `shell_view_cache_hits_total` (counter): deferred views served from cache
//! - `shell_routes_registered` (gauge): records in the compiled route table
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Labels are static strings only

pub fn record_navigation(outcome: &'static str) {
    metrics::counter!("shell_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_view_load(result: &'static str) {
    metrics::counter!("shell_view_loads_total", "result" => result).increment(1);
}

pub fn record_view_cache_hit() {
    metrics::counter!("shell_view_cache_hits_total").increment(1);
}

pub fn record_routes_registered(count: usize) {
    metrics::gauge!("shell_routes_registered").set(count as f64);
}
