//! Shared helpers: input validation for uploads and filenames.

pub mod validation;
