//! Tree construction from a token stream.

use std::io::BufRead;

use super::{ParseOptions, QuickXmlTokenizer, Token, TokenSource};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::mutation::append_child;
use crate::node::NodeRef;

/// Builds a [`Document`] from tokens.
///
/// The builder keeps a cursor on the innermost open element. It checks
/// placement (one root, nothing but whitespace outside it) and leaves
/// well-formedness of the markup to the token source; elements still open at
/// end of stream are accepted as they are.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    debug: bool,
}

impl TreeBuilder {
    /// Creates a builder. Only `options.debug` is read.
    pub fn new(options: &ParseOptions) -> Self {
        TreeBuilder {
            debug: options.debug,
        }
    }

    /// Consumes `source` up to [`Token::EndOfStream`] and returns the tree.
    ///
    /// A token source error ends the build and is returned unchanged.
    pub fn build<T: TokenSource>(&self, source: &mut T) -> Result<Document> {
        let document = Document::new();
        let mut current: Option<NodeRef> = None;
        let mut count = 0usize;

        loop {
            let token = source.next_token()?;
            if self.debug {
                tracing::debug!(?token, "token");
            }
            count += 1;

            match token {
                Token::StartTag { name, attributes } => {
                    let element = document.create_element(&name);
                    if let Some(data) = element.borrow_mut().as_element_mut() {
                        for (key, value) in &attributes {
                            data.set_attribute(key, value);
                        }
                    }
                    match &current {
                        Some(parent) => {
                            append_child(parent, &element)?;
                        }
                        None => {
                            if document.document_element().is_some() {
                                return Err(Error::syntax("only one root element allowed"));
                            }
                            document.append_child(&element)?;
                        }
                    }
                    current = Some(element);
                }
                Token::EndTag { name } => {
                    let open = current
                        .take()
                        .ok_or_else(|| Error::syntax("end tag without matching start tag"))?;
                    tracing::trace!(end_tag = %name, node = open.borrow().id(), "closing element");
                    current = open.borrow().parent_node().filter(|p| p.borrow().is_element());
                }
                Token::CharData(text) => match &current {
                    Some(parent) => {
                        append_child(parent, &document.create_text_node(&text))?;
                    }
                    None => {
                        if !text.chars().all(char::is_whitespace) {
                            return Err(Error::syntax("text not allowed outside of root element"));
                        }
                    }
                },
                Token::Comment(text) => match &current {
                    Some(parent) => {
                        append_child(parent, &document.create_comment(&text))?;
                    }
                    None => {
                        return Err(Error::syntax("comment not allowed outside of root element"));
                    }
                },
                Token::EndOfStream => break,
            }
        }

        tracing::debug!(tokens = count, "document built");
        Ok(document)
    }
}

/// Parses markup from `reader` with the given options.
pub fn parse<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Document> {
    tracing::debug!(strict = options.strict, "parsing document");
    let mut tokenizer = QuickXmlTokenizer::new(reader, options);
    TreeBuilder::new(options).build(&mut tokenizer)
}

/// Parses markup held in a string.
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<Document> {
    parse(text.as_bytes(), options)
}

/// Parses strict XML from `reader`.
pub fn parse_xml<R: BufRead>(reader: R) -> Result<Document> {
    parse(reader, &ParseOptions::xml())
}

/// Parses strict XML held in a string.
pub fn parse_xml_str(text: &str) -> Result<Document> {
    parse_str(text, &ParseOptions::xml())
}

/// Parses lenient HTML-style markup from `reader`.
pub fn parse_html<R: BufRead>(reader: R) -> Result<Document> {
    parse(reader, &ParseOptions::html())
}

/// Parses lenient HTML-style markup held in a string.
pub fn parse_html_str(text: &str) -> Result<Document> {
    parse_str(text, &ParseOptions::html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::NodeList;
    use crate::constants::NodeType;
    use crate::node::NodeInner;

    fn start(name: &str) -> Result<Token> {
        Ok(Token::StartTag {
            name: name.to_string(),
            attributes: Vec::new(),
        })
    }

    fn end(name: &str) -> Result<Token> {
        Ok(Token::EndTag {
            name: name.to_string(),
        })
    }

    fn text(data: &str) -> Result<Token> {
        Ok(Token::CharData(data.to_string()))
    }

    fn build(tokens: Vec<Result<Token>>) -> Result<Document> {
        TreeBuilder::default().build(&mut tokens.into_iter())
    }

    #[test]
    fn test_build_from_tokens() {
        let doc = build(vec![
            text("\n  "),
            Ok(Token::StartTag {
                name: "parent".to_string(),
                attributes: vec![
                    ("b".to_string(), "2".to_string()),
                    ("a".to_string(), "1".to_string()),
                ],
            }),
            text("mom"),
            start("child"),
            end("child"),
            Ok(Token::Comment("note".to_string())),
            end("parent"),
            text("\n"),
            Ok(Token::EndOfStream),
        ])
        .unwrap();

        let root = doc.document_element().unwrap();
        let root_ref = root.borrow();
        assert_eq!(root_ref.node_name(), "parent");
        let element = root_ref.as_element().unwrap();
        assert_eq!(element.attribute_at(0), Some(("b", "2")));
        assert_eq!(element.attribute_at(1), Some(("a", "1")));

        let kinds: Vec<NodeType> = root_ref
            .children()
            .iter()
            .map(|c| c.borrow().node_type())
            .collect();
        assert_eq!(kinds, vec![NodeType::Text, NodeType::Element, NodeType::Comment]);
        for child in root_ref.children() {
            assert_eq!(NodeInner::owner_document_of_ref(child), Some(doc.clone()));
        }
    }

    #[test]
    fn test_exhausted_iterator_ends_stream() {
        let doc = build(vec![start("a"), end("a")]).unwrap();
        assert_eq!(doc.to_xml(), "<a></a>");
    }

    #[test]
    fn test_unclosed_elements_are_kept() {
        let doc = build(vec![start("a"), start("b"), text("x")]).unwrap();
        assert_eq!(doc.to_xml(), "<a><b>x</b></a>");
    }

    #[test]
    fn test_text_outside_root() {
        let err = build(vec![text("oops"), start("a"), end("a")]).unwrap_err();
        assert!(matches!(&err, Error::Syntax(msg) if msg == "text not allowed outside of root element"));

        let err = build(vec![start("a"), end("a"), text(" tail ")]).unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
    }

    #[test]
    fn test_comment_outside_root() {
        let err = build(vec![Ok(Token::Comment("c".to_string())), start("a")]).unwrap_err();
        assert!(matches!(&err, Error::Syntax(msg) if msg == "comment not allowed outside of root element"));
    }

    #[test]
    fn test_second_root() {
        let err = build(vec![start("a"), end("a"), start("b")]).unwrap_err();
        assert!(matches!(&err, Error::Syntax(msg) if msg == "only one root element allowed"));
    }

    #[test]
    fn test_stray_end_tag() {
        let err = build(vec![end("a")]).unwrap_err();
        assert!(matches!(&err, Error::Syntax(msg) if msg == "end tag without matching start tag"));

        let err = build(vec![start("a"), end("a"), end("a")]).unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
    }

    #[test]
    fn test_source_error_propagates() {
        let err = build(vec![
            start("a"),
            Err(Error::Tokenizer("bad input".to_string())),
            end("a"),
        ])
        .unwrap_err();
        assert!(matches!(&err, Error::Tokenizer(msg) if msg == "bad input"));
    }

    #[test]
    fn test_parse_xml_str() {
        let doc = parse_xml_str("<?xml version=\"1.0\"?>\n<root id=\"r\"><a/>text</root>\n").unwrap();
        assert_eq!(doc.to_xml(), "<root id=\"r\"><a></a>text</root>");
        assert_eq!(doc.child_nodes().length(), 1);
    }

    #[test]
    fn test_parse_xml_rejects_malformed() {
        assert!(matches!(parse_xml_str("<a></b>"), Err(Error::Xml(_))));
        assert!(matches!(parse_xml_str("<a>&nope;</a>"), Err(Error::Tokenizer(_))));
        assert!(matches!(parse_xml_str("<a/><b/>"), Err(Error::Syntax(_))));
    }

    #[test]
    fn test_truncated_input_returns_no_document() {
        assert!(matches!(parse_xml_str("<a><b>"), Err(Error::Tokenizer(_))));
        assert!(matches!(parse_html_str("<div><p>text"), Err(Error::Tokenizer(_))));
        assert!(parse_html_str("<div><img src=x></div>").is_ok());
    }

    #[test]
    fn test_parse_html_str() {
        let doc = parse_html_str("<p class=x>caf&eacute;<br>line<img src=a.png></p>").unwrap();
        assert_eq!(
            doc.to_xml(),
            "<p class=\"x\">caf&#233;<br></br>line<img src=\"a.png\"></img></p>"
        );
    }

    #[test]
    fn test_parse_with_debug_logging() {
        let options = ParseOptions::xml().with_debug(true);
        let doc = parse_str("<a>b</a>", &options).unwrap();
        assert_eq!(doc.to_text(false), "b");
    }
}
