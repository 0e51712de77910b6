use crate::parsers::{Parser, ParserType, text::TextParserOptions};

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Ignored</title></head><body>
        <h1>Paris</h1>
        <p>The Eiffel Tower is a wrought-iron <b>lattice</b> tower.</p>
        <div><p>   </p></div>
        <h2>Getting there</h2>
        <p>Take the metro to
           Bir-Hakeim.</p>
        </body></html>"#;

    #[test]
    fn test_parser_type_from_path() {
        assert_eq!(ParserType::from_path("article.html"), ParserType::Html);
        assert_eq!(ParserType::from_path("dir/ARTICLE.HTM"), ParserType::Html);
        assert_eq!(ParserType::from_path("notes.txt"), ParserType::Text);
        assert_eq!(ParserType::from_path("README"), ParserType::Text);
    }

    #[test]
    fn test_html_paragraphs_with_headlines() {
        let result = Parser::parse(PAGE, ParserType::Html);
        assert_eq!(result.paragraphs.len(), 2);

        assert_eq!(result.paragraphs[0].id, "p1");
        assert_eq!(result.paragraphs[0].headline, "Paris");
        assert_eq!(
            result.paragraphs[0].content,
            "The Eiffel Tower is a wrought-iron lattice tower."
        );

        assert_eq!(result.paragraphs[1].id, "p2");
        assert_eq!(result.paragraphs[1].headline, "Getting there");
        assert_eq!(result.paragraphs[1].content, "Take the metro to Bir-Hakeim.");
    }

    #[test]
    fn test_html_without_paragraphs_uses_body() {
        let result = Parser::parse("<html><body><div>Just   a div</div></body></html>", ParserType::Html);
        assert_eq!(result.paragraphs.len(), 1);
        assert_eq!(result.paragraphs[0].content, "Just a div");

        assert!(Parser::parse("<html><body></body></html>", ParserType::Html).is_empty());
    }

    #[test]
    fn test_parse_from_path() {
        let result = Parser::parse_from_path(PAGE, "page.html");
        assert_eq!(result.paragraphs.len(), 2);

        // the same markup read as plain text is one paragraph of raw lines
        let result = Parser::parse_from_path("<p>a</p>\n<p>b</p>", "page.txt");
        assert_eq!(result.paragraphs.len(), 1);
        assert_eq!(result.paragraphs[0].content, "<p>a</p> <p>b</p>");
    }

    #[test]
    fn test_parse_with_text_options() {
        let content = "Short.\n\nA longer paragraph\nover two lines.";
        let options = TextParserOptions {
            min_paragraph_chars: 10,
            preserve_line_breaks: true,
            ..TextParserOptions::default()
        };
        let result = Parser::parse_with_text_options(content, ParserType::Text, &options);
        assert_eq!(result.paragraphs.len(), 1);
        assert_eq!(result.paragraphs[0].id, "p1");
        assert_eq!(result.paragraphs[0].content, "A longer paragraph\nover two lines.");
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("article.txt");
        std::fs::write(&path, "First paragraph.\n\nSecond paragraph.\n").unwrap();

        let result = Parser::parse_file(&path).unwrap();
        assert_eq!(result.paragraphs.len(), 2);
        assert_eq!(result.content(), "First paragraph.\n\nSecond paragraph.");

        assert!(Parser::parse_file(dir.path().join("missing.txt")).is_err());
    }
}
