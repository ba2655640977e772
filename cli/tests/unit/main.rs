//! Unit tests for afs CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod call_service;
mod config_store;
mod docker_engine;
mod run_service;
