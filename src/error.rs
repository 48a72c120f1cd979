//! Errors raised at the edges of the core.
//!
//! Mutations and scroll computations are total and never fail; these errors
//! only come from parsing textual inputs and decoding wire payloads.

use thiserror::Error;

/// Errors produced while parsing host-supplied text or compile responses.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid selection `{0}`, expected START:END")]
    InvalidSelection(String),

    #[error("invalid anchor `{0}`, expected LINE:OFFSET")]
    InvalidAnchor(String),

    #[error("anchor line must be at least 1, got {0}")]
    AnchorLineZero(usize),

    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("missing LaTeX source")]
    EmptySource,

    #[error("compile response reports success but carries no PDF")]
    MissingPdf,

    #[error("malformed compile response: {0}")]
    CompileResponse(#[from] serde_json::Error),

    #[error("malformed PDF payload: {0}")]
    PdfPayload(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
