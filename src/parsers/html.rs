use crate::parsers::ParseResult;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static BLOCKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p").expect("block selector should be valid")
});

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector should be valid"));

/// Extracts the text of every `<p>` element, each with its closest preceding heading.
///
/// Documents without paragraphs yield their whole body text as one paragraph.
pub fn parse(html: &str) -> ParseResult {
    let doc = Html::parse_document(html);

    let mut headline = String::new();
    let mut parts = Vec::new();
    for element in doc.select(&BLOCKS) {
        let text = element_text(element);
        if element.value().name() == "p" {
            if !text.is_empty() {
                parts.push((headline.clone(), text));
            }
        } else {
            headline = text;
        }
    }

    if parts.is_empty() {
        let body = doc
            .select(&BODY)
            .map(element_text)
            .collect::<Vec<_>>()
            .join(" ");
        if !body.is_empty() {
            parts.push((String::new(), body));
        }
    }

    ::log::debug!("HTML parser found {} paragraphs", parts.len());
    ParseResult::from_parts(parts)
}

/// Whitespace-normalized text of an element
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
