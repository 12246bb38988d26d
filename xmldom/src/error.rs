//! Error types for xmldom.

use thiserror::Error;

/// Result type alias for xmldom operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or editing a document tree.
#[derive(Error, Debug)]
pub enum Error {
    /// Markup that is well-formed for the tokenizer but cannot be placed in
    /// the tree, e.g. text outside of the root element.
    #[error("{0}")]
    Syntax(String),

    /// Malformed input reported by quick-xml.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed input detected while turning quick-xml events into tokens.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// The reference node is not a child of the node being mutated.
    #[error("node not found among the children of the target parent")]
    NotFound,

    /// The mutation would break the shape of the tree.
    #[error("hierarchy error: {0}")]
    Hierarchy(String),

    /// A character data offset lies past the end of the buffer.
    #[error("offset {offset} is out of range for data of length {length}")]
    IndexSize {
        /// Offending byte offset.
        offset: usize,
        /// Length of the buffer in bytes.
        length: usize,
    },
}

impl Error {
    /// Shorthand for a structural violation with the given message.
    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        Error::Syntax(msg.into())
    }

    /// Shorthand for a hierarchy violation with the given message.
    pub(crate) fn hierarchy(msg: impl Into<String>) -> Self {
        Error::Hierarchy(msg.into())
    }
}
