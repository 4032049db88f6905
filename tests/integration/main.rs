//! Integration tests for the HTTP API.
//!
//! These tests exercise the router end to end with stub AI backends and a
//! lazily-connected pool, so they cover routing, validation, the AI proxy
//! chain, and error mapping without requiring a live PostgreSQL instance.

mod helpers;

mod ai_test;
mod health_test;
