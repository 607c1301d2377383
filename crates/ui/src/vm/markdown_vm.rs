use std::collections::{HashMap, HashSet};

/// Renders lesson markdown into sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_TASKLISTS);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Strips everything but the harmless subset lesson bodies are allowed to use.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "h1", "h2", "h3", "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre",
        "blockquote", "ul", "ol", "li", "a",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{markdown_to_html, sanitize_html};

    #[test]
    fn markdown_renders_headings_and_lists() {
        let html = markdown_to_html("# Ancient Sunlight\n\n- oil\n- gas\n");
        assert!(html.contains("<h1>Ancient Sunlight</h1>"));
        assert!(html.contains("<li>oil</li>"));
    }

    #[test]
    fn markdown_keeps_emphasis() {
        let html = markdown_to_html("This is **petroleum**.");
        assert!(html.contains("<strong>petroleum</strong>"));
    }

    #[test]
    fn script_injection_is_stripped() {
        let html = sanitize_html("<p>ok</p><script>alert(1)</script>");
        assert!(html.contains("<p>ok</p>"));
        assert!(!html.contains("script"));
    }

    #[test]
    fn javascript_links_are_removed() {
        let html = markdown_to_html("[Link](javascript:alert(1))");
        assert!(html.contains("Link"));
        assert!(!html.contains("javascript:"));
    }
}
