//! quick-xml behind the [`TokenSource`] contract.
//!
//! All character-level work happens here: decoding, entity resolution,
//! end-tag checks and auto-closing of void elements. Input that ends with
//! elements still open is an error in every mode.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io::BufRead;

use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{ParseOptions, Token, TokenSource};
use crate::error::{Error, Result};

/// Tokenizer that reads markup through a quick-xml [`Reader`].
pub struct QuickXmlTokenizer<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    strict: bool,
    auto_close: HashSet<String>,
    entities: HashMap<String, String>,
    /// Tokens read ahead of time, delivered before anything new is read.
    pending: VecDeque<Token>,
    /// Auto-close element opened by the last delivered token.
    open_auto_close: Option<String>,
    /// Number of delivered start tags not yet matched by an end tag.
    depth: usize,
}

impl<R: BufRead> QuickXmlTokenizer<R> {
    /// Creates a tokenizer over `source`.
    pub fn new(source: R, options: &ParseOptions) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        // Keep whitespace; text nodes must round-trip byte for byte.
        config.trim_text_start = false;
        config.trim_text_end = false;
        config.expand_empty_elements = true;
        config.check_end_names = options.strict;
        config.check_comments = options.strict;

        QuickXmlTokenizer {
            reader,
            buf: Vec::new(),
            strict: options.strict,
            auto_close: options
                .auto_close
                .iter()
                .map(|name| name.to_ascii_lowercase())
                .collect(),
            entities: options.entities.clone(),
            pending: VecDeque::new(),
            open_auto_close: None,
            depth: 0,
        }
    }

    /// Reads the next token from quick-xml, skipping declarations,
    /// processing instructions and doctypes.
    fn read_token(&mut self) -> Result<Token> {
        loop {
            self.buf.clear();
            let token = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => start_tag(&e, self.strict, &self.entities)?,
                Event::Empty(e) => {
                    let start = start_tag(&e, self.strict, &self.entities)?;
                    if let Token::StartTag { name, .. } = &start {
                        self.pending.push_back(Token::EndTag { name: name.clone() });
                    }
                    start
                }
                Event::End(e) => Token::EndTag {
                    name: decode(e.name().as_ref())?.to_string(),
                },
                Event::Text(e) => Token::CharData(unescape(&e, self.strict, &self.entities)?),
                Event::CData(e) => Token::CharData(decode(&e)?.to_string()),
                Event::Comment(e) => Token::Comment(decode(&e)?.to_string()),
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => continue,
                Event::Eof => Token::EndOfStream,
            };
            return Ok(token);
        }
    }

    fn is_auto_close(&self, name: &str) -> bool {
        !self.strict && self.auto_close.contains(&name.to_ascii_lowercase())
    }
}

impl<R: BufRead> TokenSource for QuickXmlTokenizer<R> {
    fn next_token(&mut self) -> Result<Token> {
        let token = match self.pending.pop_front() {
            Some(token) => token,
            None => self.read_token()?,
        };

        // An auto-close element ends right away unless its own end tag is
        // the very next token.
        let token = match self.open_auto_close.take() {
            Some(open)
                if !matches!(&token, Token::EndTag { name } if name.eq_ignore_ascii_case(&open)) =>
            {
                self.pending.push_front(token);
                Token::EndTag { name: open }
            }
            _ => token,
        };

        match &token {
            Token::StartTag { name, .. } => {
                self.depth += 1;
                if self.is_auto_close(name) {
                    self.open_auto_close = Some(name.clone());
                }
            }
            Token::EndTag { .. } => self.depth = self.depth.saturating_sub(1),
            Token::EndOfStream if self.depth > 0 => {
                return Err(Error::Tokenizer(format!(
                    "unexpected end of input with {} element(s) still open",
                    self.depth
                )));
            }
            _ => {}
        }
        Ok(token)
    }
}

/// Converts an opening tag into a start token.
fn start_tag(e: &BytesStart<'_>, strict: bool, entities: &HashMap<String, String>) -> Result<Token> {
    let name = decode(e.name().as_ref())?.to_string();

    let mut attrs = if strict {
        e.attributes()
    } else {
        e.html_attributes()
    };
    if !strict {
        attrs.with_checks(false);
    }

    let mut attributes = Vec::new();
    for attr in attrs {
        let attr = attr.map_err(|e| Error::Tokenizer(format!("attribute error: {}", e)))?;
        let key = decode(attr.key.as_ref())?.to_string();
        let value = unescape(&attr.value, strict, entities)?;
        attributes.push((key, value));
    }

    Ok(Token::StartTag { name, attributes })
}

fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::Tokenizer(e.to_string()))
}

/// Resolves character and entity references in raw text.
///
/// When not strict, text with an unknown entity is kept as written.
fn unescape(raw: &[u8], strict: bool, entities: &HashMap<String, String>) -> Result<String> {
    let raw = decode(raw)?;
    let resolved = unescape_with(raw, |entity| {
        entities
            .get(entity)
            .map(String::as_str)
            .or_else(|| predefined_entity(entity))
    });
    match resolved {
        Ok(text) => Ok(text.into_owned()),
        Err(_) if !strict => Ok(raw.to_string()),
        Err(e) => Err(Error::Tokenizer(e.to_string())),
    }
}

fn predefined_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        _ => None,
    }
}
