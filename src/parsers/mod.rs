pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::path::Path;

/// Input formats the CLI reads paragraphs from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserType {
    /// HTML documents; paragraphs are `<p>` elements
    Html,
    /// Plain text; paragraphs are separated by blank lines
    Text,
}

impl ParserType {
    /// Determines the parser type from a file name
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("html") | Some("htm") | Some("xhtml") => {
                ::log::debug!("Classifying as HTML: {}", path.display());
                ParserType::Html
            }
            _ => {
                ::log::debug!("Classifying as Text: {}", path.display());
                ParserType::Text
            }
        }
    }
}

/// A paragraph of running text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Position-based identifier (`p1`, `p2`, ...)
    pub id: String,
    /// Closest preceding heading, if the format has headings
    pub headline: String,
    pub content: String,
}

/// Result of parsing a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub paragraphs: Vec<Paragraph>,
}

impl ParseResult {
    /// Number paragraphs in document order
    pub fn from_parts(parts: Vec<(String, String)>) -> Self {
        let paragraphs = parts
            .into_iter()
            .enumerate()
            .map(|(i, (headline, content))| Paragraph {
                id: format!("p{}", i + 1),
                headline,
                content,
            })
            .collect();
        Self { paragraphs }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// All paragraph texts, separated by blank lines
    pub fn content(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Main parser that delegates to specific format parsers
pub struct Parser;

impl Parser {
    /// Parse content based on the parser type
    pub fn parse(content: &str, parser_type: ParserType) -> ParseResult {
        match parser_type {
            ParserType::Html => html::parse(content),
            ParserType::Text => text::parse(content),
        }
    }

    /// Parse content with specific text parser options
    pub fn parse_with_text_options(
        content: &str,
        parser_type: ParserType,
        text_options: &text::TextParserOptions,
    ) -> ParseResult {
        match parser_type {
            ParserType::Html => html::parse(content),
            ParserType::Text => text::parse_with_options(content, text_options),
        }
    }

    /// Determine parser type from the file name and then parse content
    pub fn parse_from_path(content: &str, path: impl AsRef<Path>) -> ParseResult {
        Self::parse(content, ParserType::from_path(path))
    }

    /// Read and parse a file
    pub fn parse_file(path: impl AsRef<Path>) -> crate::Result<ParseResult> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let result = Self::parse_from_path(&content, path);
        ::log::info!(
            "Read {} paragraphs from {}",
            result.paragraphs.len(),
            path.display()
        );
        Ok(result)
    }
}
