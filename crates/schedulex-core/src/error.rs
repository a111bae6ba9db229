//! Errors raised while reading a schedule document.

/// The only failure the analyzer reports: the input is not a schedule
/// document it understands. Everything past parsing degrades to defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The document is not well-formed XML.
    #[error("not a recognized schedule document: malformed XML ({0})")]
    MalformedXml(String),

    /// The document parsed but has no `Project/Tasks/Task` records.
    #[error("not a recognized schedule document: missing Project/Tasks/Task")]
    MissingTaskPath,

    /// Binary (compound file) programmes are not supported.
    #[error("not a recognized schedule document: binary programme files are not supported, export to XML first")]
    UnsupportedBinary,

    /// The bytes are neither a binary programme nor UTF-8 text.
    #[error("not a recognized schedule document: content is not UTF-8 text")]
    NotText,
}

impl FormatError {
    /// Pipeline stage that produced the error.
    pub fn stage(&self) -> &'static str {
        "parsing"
    }
}
