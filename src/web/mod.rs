//! Web server for browser-based plagiarism checks.
//!
//! This module provides an interactive web interface using Axum.
//! Users pick an algorithm, then type or upload a text and a pattern.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! plagscan serve
//!
//! # Custom port and auto-open browser
//! plagscan serve --port 3000 --open
//!
//! # Bind to all interfaces
//! plagscan serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Main page with algorithm choice and input form
//! - `GET /api/algorithms` - List the available algorithms
//! - `POST /api/check` - Check a pattern against a text (multipart form)
//! - `POST /api/compare` - Run every algorithm on the same input (multipart form)

pub mod server;
