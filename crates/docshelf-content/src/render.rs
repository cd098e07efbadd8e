//! Markdown to HTML page rendering.
//!
//! Pages are rendered as an `<h1>` carrying the document title followed by
//! an `<article class="markdown-body">` holding the converted body.

use docshelf_core::Result;
use pulldown_cmark::{Options, Parser, html};

use crate::cache::DocumentCache;
use crate::document::Document;

/// CSS class on the element wrapping rendered Markdown.
pub const ARTICLE_CLASS: &str = "markdown-body";

/// GitHub-flavoured Markdown extensions enabled for rendering.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Convert Markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render an already loaded document as a page fragment.
///
/// Neither the title nor the converted HTML is escaped. Documentation is
/// treated as trusted, author-controlled content; raw HTML in a title or
/// body reaches the page as written.
pub fn render_page(doc: &Document) -> String {
    format!(
        "<h1>{}</h1><article class=\"{}\">{}</article>",
        doc.title(),
        ARTICLE_CLASS,
        markdown_to_html(doc.body())
    )
}

/// Fetch `file` through the cache and render it.
///
/// # Errors
///
/// Fails when the document cannot be read.
pub async fn render_document_page(cache: &DocumentCache, file: &str) -> Result<String> {
    let doc = cache.get_document(file).await?;
    Ok(render_page(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentLoader, FsSource};
    use crate::frontmatter::DelimiterMode;
    use crate::hooks::StaticRoot;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_to_html_basic() {
        let html = markdown_to_html("# Title\n\nSome *emphasis*.\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_markdown_to_html_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_markdown_to_html_strikethrough_and_tasks() {
        let html = markdown_to_html("~~old~~\n\n- [x] done\n");
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_render_page_layout() {
        let doc = Document::parse(
            "intro.md",
            "---\ntitle: Welcome\n---\nHello\n",
            DelimiterMode::Search,
        );
        assert_eq!(
            render_page(&doc),
            "<h1>Welcome</h1><article class=\"markdown-body\"><p>Hello</p>\n</article>"
        );
    }

    #[test]
    fn test_render_page_does_not_escape_title() {
        let doc = Document::parse(
            "x.md",
            "---\ntitle: \"<em>Styled</em>\"\n---\nBody\n",
            DelimiterMode::Search,
        );
        assert!(render_page(&doc).starts_with("<h1><em>Styled</em></h1>"));
    }

    #[tokio::test]
    async fn test_render_document_page_via_cache() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("setup.md"), "## Steps\n").unwrap();
        let source = FsSource::new(Arc::new(StaticRoot::new(temp.path())));
        let cache = DocumentCache::new(DocumentLoader::new(Arc::new(source)));

        let page = render_document_page(&cache, "setup.md").await.unwrap();

        assert!(page.starts_with("<h1>setup</h1>"));
        assert!(page.contains("<h2>Steps</h2>"));
    }

    #[tokio::test]
    async fn test_render_document_page_missing_fails() {
        let temp = TempDir::new().unwrap();
        let source = FsSource::new(Arc::new(StaticRoot::new(temp.path())));
        let cache = DocumentCache::new(DocumentLoader::new(Arc::new(source)));

        assert!(render_document_page(&cache, "nope.md").await.is_err());
    }
}
