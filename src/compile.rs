//! LaTeX compile backend contract.
//!
//! The editor posts `{"source": "..."}` to a compile service and receives
//! either `{"success": true, "pdfBase64": "..."}` or
//! `{"success": false, "errorLog": "..."}`. This module owns both sides of
//! that JSON codec and the log formatting a backend uses for failures.
//! Running the compiler itself is left to the service.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Log text used when a failed compile produced no output at all.
pub const UNKNOWN_ERROR: &str = "Unknown LaTeX error";

/// Message shown when a failure response carries no log.
const GENERIC_FAILURE: &str = "LaTeX compile failed";

/// TeX error context lines: `l.42 \badcommand`.
static ERROR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^l\.(\d+)").expect("error line pattern"));

/// A compile request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub source: String,
}

impl CompileRequest {
    /// Build a request, rejecting blank sources.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(Error::EmptySource);
        }
        Ok(Self { source })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate a request body.
    pub fn from_json(json: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(json)?;
        Self::new(request.source)
    }
}

/// Outcome of a compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileResponse {
    Success {
        pdf: Vec<u8>,
    },
    Failure {
        error_log: String,
        /// 1-based source lines the log points at.
        error_lines: Vec<usize>,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pdf_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_log: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    error_lines: Vec<usize>,
    /// Request-level errors (`{"error": "Missing LaTeX source"}`).
    #[serde(default, skip_serializing)]
    error: Option<String>,
}

impl CompileResponse {
    /// A failure whose error lines are read from the log.
    pub fn failure(error_log: impl Into<String>) -> Self {
        let error_log = error_log.into();
        let error_lines = error_lines_from_log(&error_log);
        Self::Failure {
            error_log,
            error_lines,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        let wire = match self {
            Self::Success { pdf } => WireResponse {
                success: true,
                pdf_base64: Some(STANDARD.encode(pdf)),
                ..WireResponse::default()
            },
            Self::Failure {
                error_log,
                error_lines,
            } => WireResponse {
                success: false,
                error_log: Some(error_log.clone()),
                error_lines: error_lines.clone(),
                ..WireResponse::default()
            },
        };
        Ok(serde_json::to_string(&wire)?)
    }

    /// Decode a response body.
    ///
    /// A failure without a log falls back to the request-level `error`
    /// message; a success must carry a PDF.
    pub fn from_json(json: &str) -> Result<Self> {
        let wire: WireResponse = serde_json::from_str(json)?;
        if !wire.success {
            let error_log = wire
                .error_log
                .filter(|log| !log.is_empty())
                .or(wire.error)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Ok(Self::Failure {
                error_log,
                error_lines: wire.error_lines,
            });
        }
        let encoded = wire
            .pdf_base64
            .filter(|pdf| !pdf.is_empty())
            .ok_or(Error::MissingPdf)?;
        let pdf = STANDARD.decode(encoded)?;
        tracing::debug!(bytes = pdf.len(), "decoded compiled PDF");
        Ok(Self::Success { pdf })
    }
}

/// Format compiler output for a failure response.
///
/// Non-blank stdout and stderr are trimmed and labelled, separated by a blank
/// line. With neither, `error` is used; with nothing at all, [`UNKNOWN_ERROR`].
pub fn format_error_log(stdout: &str, stderr: &str, error: Option<&str>) -> String {
    let mut chunks = Vec::new();
    if !stdout.trim().is_empty() {
        chunks.push(format!("STDOUT:\n{}", stdout.trim()));
    }
    if !stderr.trim().is_empty() {
        chunks.push(format!("STDERR:\n{}", stderr.trim()));
    }
    if chunks.is_empty() {
        return error
            .filter(|e| !e.is_empty())
            .unwrap_or(UNKNOWN_ERROR)
            .to_string();
    }
    chunks.join("\n\n")
}

/// Source lines referenced by `l.N` markers in a TeX log, sorted and distinct.
pub fn error_lines_from_log(log: &str) -> Vec<usize> {
    let mut lines: Vec<usize> = ERROR_LINE
        .captures_iter(log)
        .filter_map(|caps| caps[1].parse().ok())
        .filter(|&line| line > 0)
        .collect();
    lines.sort_unstable();
    lines.dedup();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_source() {
        let request = CompileRequest::new("\\documentclass{article}").unwrap();
        assert_eq!(
            request.to_json().unwrap(),
            r#"{"source":"\\documentclass{article}"}"#
        );
    }

    #[test]
    fn test_blank_request_is_rejected() {
        assert!(matches!(CompileRequest::new("  \n"), Err(Error::EmptySource)));
        assert!(matches!(
            CompileRequest::from_json(r#"{"source":""}"#),
            Err(Error::EmptySource)
        ));
    }

    #[test]
    fn test_success_encodes_pdf_as_base64() {
        let response = CompileResponse::Success {
            pdf: b"%PDF-1.5".to_vec(),
        };
        let json = response.to_json().unwrap();
        assert_eq!(json, r#"{"success":true,"pdfBase64":"JVBERi0xLjU="}"#);
        assert_eq!(CompileResponse::from_json(&json).unwrap(), response);
    }

    #[test]
    fn test_failure_carries_log() {
        let json = r#"{"success":false,"errorLog":"STDERR:\nboom"}"#;
        let response = CompileResponse::from_json(json).unwrap();
        assert!(!response.is_success());
        assert_eq!(
            response,
            CompileResponse::Failure {
                error_log: "STDERR:\nboom".to_string(),
                error_lines: vec![],
            }
        );
    }

    #[test]
    fn test_request_error_becomes_failure() {
        let response = CompileResponse::from_json(r#"{"error":"Missing LaTeX source"}"#).unwrap();
        let CompileResponse::Failure { error_log, .. } = response else {
            panic!("expected failure");
        };
        assert_eq!(error_log, "Missing LaTeX source");
    }

    #[test]
    fn test_failure_without_log_uses_generic_message() {
        let response = CompileResponse::from_json(r#"{"success":false}"#).unwrap();
        let CompileResponse::Failure { error_log, .. } = response else {
            panic!("expected failure");
        };
        assert_eq!(error_log, GENERIC_FAILURE);
    }

    #[test]
    fn test_success_without_pdf_is_error() {
        assert!(matches!(
            CompileResponse::from_json(r#"{"success":true}"#),
            Err(Error::MissingPdf)
        ));
    }

    #[test]
    fn test_bad_base64_is_error() {
        assert!(matches!(
            CompileResponse::from_json(r#"{"success":true,"pdfBase64":"***"}"#),
            Err(Error::PdfPayload(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            CompileResponse::from_json("not json"),
            Err(Error::CompileResponse(_))
        ));
    }

    #[test]
    fn test_format_error_log_labels_streams() {
        let log = format_error_log("  out \n", "\nerr", Some("ignored"));
        assert_eq!(log, "STDOUT:\nout\n\nSTDERR:\nerr");
    }

    #[test]
    fn test_format_error_log_falls_back_to_error() {
        assert_eq!(format_error_log("", "  ", Some("timed out")), "timed out");
        assert_eq!(format_error_log("", "", None), UNKNOWN_ERROR);
        assert_eq!(format_error_log("", "", Some("")), UNKNOWN_ERROR);
    }

    #[test]
    fn test_error_lines_from_log() {
        let log = "! Undefined control sequence.\nl.12 \\foo\n\n! Missing $ inserted.\nl.4 x^2\nl.12 again";
        assert_eq!(error_lines_from_log(log), vec![4, 12]);
        assert!(error_lines_from_log("all.5 fine").is_empty());
    }

    #[test]
    fn test_failure_constructor_reads_error_lines() {
        let response = CompileResponse::failure("STDOUT:\nl.7 \\bad");
        let json = response.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"success":false,"errorLog":"STDOUT:\nl.7 \\bad","errorLines":[7]}"#
        );
    }
}
