//! Exact-matching strategies, scoring, and the engine facade.
//!
//! - [`MatchEngine`](engine::MatchEngine): Main entry point: normalize, match, score
//! - [`ScoreReport`](scoring::ScoreReport): Coverage percentage and matching latency
//! - [`EngineConfig`](config::EngineConfig): Rolling hash parameters and input limits
//!
//! ## Algorithms
//!
//! | Selector | Module | Approach | Worst case |
//! |----------|--------|----------|------------|
//! | `kmp` | [`prefix_function`] | Failure-function automaton | O(n + m) |
//! | `rk`  | [`rolling_hash`] | Rolling hash + confirmation | O(n·m) on collisions |
//! | `bm`  | [`bad_character`] | Bad-character jumps | O(n·m) |
//!
//! All three report every occurrence, overlapping ones included, and must agree
//! on the position set for any input.
//!
//! ## Example
//!
//! ```rust
//! use plagscan::MatchEngine;
//!
//! let engine = MatchEngine::new();
//! let outcome = engine.run_detailed("Abracadabra", "ABRA", "kmp").unwrap();
//!
//! assert_eq!(outcome.positions, vec![0, 7]);
//! assert!((outcome.report.percentage - 72.73).abs() < 1e-9);
//! ```

pub mod bad_character;
pub mod config;
pub mod engine;
pub mod prefix_function;
pub mod rolling_hash;
pub mod scoring;
