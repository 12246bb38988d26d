//! Markup input and output.
//!
//! Parsing is split in two. A [`TokenSource`] turns raw markup into
//! [`Token`]s; the [`TreeBuilder`] turns tokens into a [`Document`]. The
//! builder never looks at characters, so any source that honors the token
//! contract can feed it. [`QuickXmlTokenizer`] is the source used by the
//! `parse*` entry points.
//!
//! [`Document`]: crate::Document

mod builder;
mod printer;
mod tokenizer;

pub use builder::{
    parse, parse_html, parse_html_str, parse_str, parse_xml, parse_xml_str, TreeBuilder,
};
pub use printer::{escape, to_text, to_xml, XmlPrinter};
pub use tokenizer::QuickXmlTokenizer;

use std::collections::HashMap;

use crate::constants::{html_entities, HTML_AUTO_CLOSE};
use crate::error::Result;

/// A structural event produced by a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opening tag with its attributes in declaration order.
    StartTag {
        /// Tag name.
        name: String,
        /// Attribute names and values, already unescaped.
        attributes: Vec<(String, String)>,
    },
    /// A closing tag.
    EndTag {
        /// Tag name as written.
        name: String,
    },
    /// Character data, already unescaped.
    CharData(String),
    /// The body of a comment.
    Comment(String),
    /// Clean end of input.
    EndOfStream,
}

/// Something that produces tokens for the [`TreeBuilder`].
///
/// An `Err` is a malformed-input signal; the builder stops and returns it
/// unchanged.
pub trait TokenSource {
    /// Returns the next token. After [`Token::EndOfStream`] the source is not
    /// polled again.
    fn next_token(&mut self) -> Result<Token>;
}

/// Any iterator of token results is a source; running out means
/// [`Token::EndOfStream`].
impl<I> TokenSource for I
where
    I: Iterator<Item = Result<Token>>,
{
    fn next_token(&mut self) -> Result<Token> {
        self.next().unwrap_or(Ok(Token::EndOfStream))
    }
}

/// Options for parsing.
///
/// `strict`, `auto_close` and `entities` configure the tokenizer and are not
/// interpreted by the builder.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Require matching end tags, quoted attribute values and known entities.
    pub strict: bool,
    /// Elements closed automatically when not strict; matched
    /// case-insensitively.
    pub auto_close: Vec<String>,
    /// Extra named entities, consulted before the predefined XML ones.
    pub entities: HashMap<String, String>,
    /// Log every token the builder consumes at debug level.
    pub debug: bool,
}

impl ParseOptions {
    /// Strict XML: no auto-closed elements, only the predefined entities.
    pub fn xml() -> Self {
        ParseOptions {
            strict: true,
            auto_close: Vec::new(),
            entities: HashMap::new(),
            debug: false,
        }
    }

    /// Lenient HTML-ish markup: void elements auto-close and HTML entities
    /// resolve.
    pub fn html() -> Self {
        ParseOptions {
            strict: false,
            auto_close: HTML_AUTO_CLOSE.iter().map(|s| s.to_string()).collect(),
            entities: html_entities(),
            debug: false,
        }
    }

    /// Returns the options with token logging switched on or off.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::xml()
    }
}
