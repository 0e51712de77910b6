use crate::parsers::ParseResult;

/// Configuration options for text parsing
#[derive(Debug, Clone, Copy)]
pub struct TextParserOptions {
    /// Whether to keep single newlines within paragraphs
    pub preserve_line_breaks: bool,
    /// Whether to collapse runs of whitespace into a single space
    pub normalize_whitespace: bool,
    /// Paragraphs with fewer characters are dropped
    pub min_paragraph_chars: usize,
}

impl Default for TextParserOptions {
    fn default() -> Self {
        Self {
            preserve_line_breaks: false,
            normalize_whitespace: true,
            min_paragraph_chars: 1,
        }
    }
}

/// Splits plain text into paragraphs with default options
pub fn parse(text: &str) -> ParseResult {
    parse_with_options(text, &TextParserOptions::default())
}

/// Splits plain text into paragraphs with specific options
pub fn parse_with_options(text: &str, options: &TextParserOptions) -> ParseResult {
    if text.trim().is_empty() {
        return ParseResult::default();
    }

    let parts = split_into_paragraphs(text)
        .iter()
        .map(|lines| process_paragraph(lines, options))
        .filter(|p| p.chars().count() >= options.min_paragraph_chars)
        .map(|p| (String::new(), p))
        .collect();

    ParseResult::from_parts(parts)
}

/// Splits text into paragraphs based on empty lines
pub fn split_into_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current_paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if !current_paragraph.is_empty() {
                paragraphs.push(std::mem::take(&mut current_paragraph));
            }
        } else {
            current_paragraph.push(trimmed);
        }
    }

    if !current_paragraph.is_empty() {
        paragraphs.push(current_paragraph);
    }

    paragraphs
}

/// Joins the lines of one paragraph according to options
pub fn process_paragraph(lines: &[&str], options: &TextParserOptions) -> String {
    let separator = if options.preserve_line_breaks { "\n" } else { " " };
    let joined = lines.join(separator);

    if !options.normalize_whitespace {
        return joined;
    }
    if !options.preserve_line_breaks {
        return normalize_whitespace_in_segment(&joined);
    }
    lines
        .iter()
        .map(|line| normalize_whitespace_in_segment(line))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Collapses whitespace within a single line or paragraph
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}
