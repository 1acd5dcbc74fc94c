// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod encoder;
pub mod engine;
pub mod persistence;
pub mod server;
pub mod telemetry;
