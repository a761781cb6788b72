//! Integration tests for the crawl service
//!
//! These tests use wiremock to serve root pages and drive the orchestrator
//! and the HTTP control surface end-to-end over loopback.

mod common;
mod control_tests;
