//! Error adapter for converting VoltaicError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Netlist decode
//! errors point at the offending position in the input; every other error is
//! reported without a source snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use voltaic::{VoltaicError, netlist::NetlistError};

/// Adapter for a netlist decode error with its source text.
pub struct NetlistAdapter<'a> {
    err: &'a NetlistError,
    src: &'a str,
}

impl<'a> NetlistAdapter<'a> {
    /// Create a new netlist adapter.
    pub fn new(err: &'a NetlistError, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Returns the byte span the decoder stopped at, if it reported one.
    fn span(&self) -> Option<SourceSpan> {
        let NetlistError::Json { line, column, .. } = self.err;
        position_to_offset(self.src, *line, *column).map(|offset| SourceSpan::new(offset.into(), 0))
    }
}

impl fmt::Debug for NetlistAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetlistAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for NetlistAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for NetlistAdapter<'_> {}

impl MietteDiagnostic for NetlistAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("voltaic::netlist"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a netlist is a JSON object with `components` and `nets` arrays",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for [`VoltaicError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a VoltaicError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            VoltaicError::Io(_) => "voltaic::io",
            VoltaicError::Netlist { .. } => "voltaic::netlist",
            VoltaicError::Symbols(_) => "voltaic::symbols",
            VoltaicError::Config(_) => "voltaic::config",
            VoltaicError::Export(_) => "voltaic::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A netlist error with its source location.
    Netlist(NetlistAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Netlist(n) => fmt::Display::fmt(n, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Netlist(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Netlist(n) => n.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Netlist(n) => n.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Netlist(n) => n.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Netlist(n) => n.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Converts a 1-based line and column into a byte offset into `src`.
///
/// Line 0 means the decoder reported no position. Columns past the end of
/// the line clamp to the line end.
fn position_to_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let mut offset = 0;
    for (index, text) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let column = column.saturating_sub(1).min(text.trim_end_matches('\n').len());
            return Some(offset + column);
        }
        offset += text.len();
    }

    // The decoder ran off the end of the input
    Some(src.len())
}

/// Convert a [`VoltaicError`] into a list of reportable errors.
pub fn to_reportables(err: &VoltaicError) -> Vec<Reportable<'_>> {
    match err {
        VoltaicError::Netlist { err, src } => vec![Reportable::Netlist(NetlistAdapter::new(err, src))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
