//! Scrapes a utility's published outage table into per-queue disruption
//! states for today and tomorrow, and stores the result as JSON per region.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod fetcher;
pub mod infrastructure;
pub mod schedule;
pub mod store;
