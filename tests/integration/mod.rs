//! Integration tests for release-tickets against real git repositories

mod test_config;
mod test_discovery;
mod test_scan;
