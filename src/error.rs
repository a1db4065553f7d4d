//! Diagnostic error types for seedwalk.
//!
//! Each boundary subsystem (input parsing, artifact writing, engine
//! invocation, results collection) defines its own error type with miette
//! `#[diagnostic]` derives, providing error codes and help text. The
//! grounding core deliberately has no error type: degenerate inputs produce
//! degenerate-but-valid graphs, and broken internal invariants are asserted
//! rather than surfaced.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for seedwalk.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text, source errors) through to the
/// user.
#[derive(Debug, Error, Diagnostic)]
pub enum SeedwalkError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Junto(#[from] JuntoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Results(#[from] ResultsError),
}

// ---------------------------------------------------------------------------
// Junto input errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum JuntoError {
    #[error("failed to read {path}")]
    #[diagnostic(
        code(seedwalk::junto::io),
        help("Check that the file exists and is readable from the working directory.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config {path} is missing required key \"{key}\"")]
    #[diagnostic(
        code(seedwalk::junto::missing_key),
        help(
            "Junto configs are `key = value` lines. The conversion pipeline needs \
             `graph_file` and `seed_file`; engine runs additionally need `output_file`."
        )
    )]
    MissingKey { key: String, path: String },
}

// ---------------------------------------------------------------------------
// Grounded artifact errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SerializeError {
    #[error("failed to write {path}")]
    #[diagnostic(
        code(seedwalk::serialize::io),
        help("Check that the output directory exists and has write permissions.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode node map {path}")]
    #[diagnostic(
        code(seedwalk::serialize::json),
        help("The node map is written as a JSON object; this failure usually means I/O broke mid-write.")
    )]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Conversion pipeline errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("failed to create output directory {path}")]
    #[diagnostic(
        code(seedwalk::convert::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot derive a dataset name from {path}")]
    #[diagnostic(
        code(seedwalk::convert::dataset_name),
        help(
            "The dataset name is the config file name up to its first dot; pass a \
             config path with a UTF-8 file name."
        )
    )]
    DatasetName { path: String },
}

// ---------------------------------------------------------------------------
// Engine runner errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    #[error("failed to spawn engine: {command}")]
    #[diagnostic(
        code(seedwalk::runner::spawn),
        help(
            "Check that the engine installation directory is correct and the \
             binary (or `java`) is on PATH."
        )
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot resolve the junto directory {path}")]
    #[diagnostic(
        code(seedwalk::runner::junto_dir),
        help(
            "The junto directory is exported absolute as JUNTO_DIR; pass a \
             non-empty --junto-dir and run from a live working directory."
        )
    )]
    JuntoDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Engine results errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ResultsError {
    #[error("failed to read engine results {path}")]
    #[diagnostic(
        code(seedwalk::results::io),
        help(
            "The engine is expected to leave its results file behind; if it exited \
             with an error there may be nothing to read."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning seedwalk results.
pub type SeedwalkResult<T> = std::result::Result<T, SeedwalkError>;
