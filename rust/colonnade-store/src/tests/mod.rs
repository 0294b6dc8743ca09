//! Shared test utilities and integration-style checks for the read path.
