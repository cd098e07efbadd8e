//! Static HTML site output.
//!
//! [`SiteWriter`] receives the menu through [`PageRegistrar`] and writes one
//! HTML file per registered page, plus the stylesheet every page links.

use std::path::{Path, PathBuf};

use docshelf_content::frontmatter::default_title;
use docshelf_content::menu::MENU_LABEL;
use docshelf_content::{DocLibrary, Menu, MenuPage, PageRegistrar};
use docshelf_core::{Error, Result};
use tracing::{debug, info};

/// Stylesheet shipped with every site.
pub const STYLESHEET: &str = include_str!("../assets/markdown.css");

/// Name the stylesheet is written under.
pub const STYLESHEET_NAME: &str = "markdown.css";

/// Output file of the root entry.
pub const INDEX_PAGE: &str = "index.html";

/// Output file name for the sub-entry showing `file`.
///
/// `intro.md` becomes `intro.html`. A document whose stem is `index` is
/// written as `index.md.html` so it does not replace the root page.
pub fn page_file_name(file: &str) -> String {
    let stem = default_title(file);
    if stem == "index" {
        format!("{file}.html")
    } else {
        format!("{stem}.html")
    }
}

#[derive(Debug, Clone)]
struct SitePage {
    page: MenuPage,
    output: String,
}

/// Writes registered pages as a static site.
#[derive(Debug)]
pub struct SiteWriter {
    output_dir: PathBuf,
    pages: Vec<SitePage>,
}

impl PageRegistrar for SiteWriter {
    fn add_menu_page(&mut self, page: &MenuPage) -> Result<()> {
        self.push(page, INDEX_PAGE.to_string())
    }

    fn add_submenu_page(&mut self, _parent_slug: &str, page: &MenuPage) -> Result<()> {
        self.push(page, page_file_name(&page.file))
    }
}

impl SiteWriter {
    /// Create a writer targeting `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pages: Vec::new(),
        }
    }

    /// The directory pages are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn push(&mut self, page: &MenuPage, output: String) -> Result<()> {
        if self.pages.iter().any(|p| p.output == output) {
            return Err(Error::invalid_data(format!(
                "Two pages would be written to {output}"
            )));
        }
        self.pages.push(SitePage {
            page: page.clone(),
            output,
        });
        Ok(())
    }

    /// Register `menu` and write every page, returning the written paths.
    pub async fn write(mut self, library: &DocLibrary, menu: &Menu) -> Result<Vec<PathBuf>> {
        menu.register(&mut self)?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| Error::io_with_path(e, &self.output_dir))?;

        let mut written = Vec::with_capacity(self.pages.len() + 1);

        let css_path = self.output_dir.join(STYLESHEET_NAME);
        write_file(&css_path, STYLESHEET).await?;
        written.push(css_path);

        let nav = self.navigation();
        for site_page in &self.pages {
            let body = library.render_document_page(&site_page.page.file).await?;
            let html = layout(&site_page.page.page_title, &nav, &site_page.output, &body);
            let path = self.output_dir.join(&site_page.output);
            write_file(&path, &html).await?;
            debug!("Wrote {} from {}", path.display(), site_page.page.file);
            written.push(path);
        }

        info!(
            "Wrote {} pages to {}",
            self.pages.len(),
            self.output_dir.display()
        );
        Ok(written)
    }

    /// Navigation entries: the root link, then one per sub-entry.
    fn navigation(&self) -> Vec<(String, String)> {
        self.pages
            .iter()
            .map(|p| (p.page.menu_title.clone(), p.output.clone()))
            .collect()
    }
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Wrap a rendered page in a full HTML document.
///
/// Titles are inserted as-is, like the page body.
fn layout(title: &str, nav: &[(String, String)], current: &str, body: &str) -> String {
    let mut links = String::new();
    for (label, href) in nav.iter().skip(1) {
        let class = if href == current { " class=\"current\"" } else { "" };
        links.push_str(&format!("<li><a href=\"{href}\"{class}>{label}</a></li>\n"));
    }

    let root_href = nav.first().map(|(_, href)| href.as_str()).unwrap_or(INDEX_PAGE);

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} | {MENU_LABEL}</title>\n\
         <link rel=\"stylesheet\" href=\"{STYLESHEET_NAME}\">\n\
         </head>\n\
         <body>\n\
         <nav class=\"docshelf-menu\">\n\
         <a class=\"docshelf-root\" href=\"{root_href}\">{MENU_LABEL}</a>\n\
         <ul>\n{links}</ul>\n\
         </nav>\n\
         <main class=\"wrap\">\n{body}\n</main>\n\
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_docs(dir: &Path) {
        std::fs::write(
            dir.join("intro.md"),
            "---\ntitle: Introduction\nmenu_title: Intro\n---\nWelcome.\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("settings.md"),
            "---\ncapability: manage_options\n---\n# Settings\n",
        )
        .unwrap();
    }

    #[test]
    fn test_page_file_name() {
        assert_eq!(page_file_name("intro.md"), "intro.html");
        assert_eq!(page_file_name("index.md"), "index.md.html");
        assert_eq!(page_file_name("v1.2.md"), "v1.2.html");
    }

    #[test]
    fn test_register_assigns_outputs() {
        let page = |file: &str| MenuPage {
            page_title: file.to_string(),
            menu_title: file.to_string(),
            capability: "edit_posts".to_string(),
            slug: format!("docshelf/documentation/{file}"),
            file: file.to_string(),
        };
        let mut writer = SiteWriter::new("out");

        writer.add_menu_page(&page("a.md")).unwrap();
        writer
            .add_submenu_page("docshelf/documentation", &page("a.md"))
            .unwrap();
        writer
            .add_submenu_page("docshelf/documentation", &page("b.md"))
            .unwrap();

        let outputs: Vec<&str> = writer.pages.iter().map(|p| p.output.as_str()).collect();
        assert_eq!(outputs, vec!["index.html", "a.html", "b.html"]);
    }

    #[test]
    fn test_register_rejects_duplicate_outputs() {
        let page = MenuPage {
            page_title: "A".to_string(),
            menu_title: "A".to_string(),
            capability: "edit_posts".to_string(),
            slug: "docshelf/documentation/a.md".to_string(),
            file: "a.md".to_string(),
        };
        let mut writer = SiteWriter::new("out");
        writer.add_submenu_page("root", &page).unwrap();

        let err = writer.add_submenu_page("root", &page).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_layout_links_stylesheet_and_marks_current() {
        let nav = vec![
            ("Documentation".to_string(), "index.html".to_string()),
            ("Intro".to_string(), "intro.html".to_string()),
            ("FAQ".to_string(), "faq.html".to_string()),
        ];

        let html = layout("Intro", &nav, "intro.html", "<h1>Intro</h1>");

        assert!(html.contains("<link rel=\"stylesheet\" href=\"markdown.css\">"));
        assert!(html.contains("<a href=\"intro.html\" class=\"current\">Intro</a>"));
        assert!(html.contains("<a href=\"faq.html\">FAQ</a>"));
        assert!(html.contains("<title>Intro | Documentation</title>"));
        assert!(html.contains("<h1>Intro</h1>"));
    }

    #[tokio::test]
    async fn test_write_site() {
        let docs = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_docs(docs.path());
        let library = DocLibrary::at(docs.path());
        let menu = library.build_menu().await.unwrap();

        let written = SiteWriter::new(out.path())
            .write(&library, &menu)
            .await
            .unwrap();

        assert_eq!(written.len(), 4);
        let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("<h1>Introduction</h1>"));
        assert!(index.contains("<a href=\"settings.html\">settings</a>"));
        let settings = std::fs::read_to_string(out.path().join("settings.html")).unwrap();
        assert!(settings.contains("<h1>Settings</h1>"));
        assert!(out.path().join("intro.html").exists());
        assert_eq!(
            std::fs::read_to_string(out.path().join(STYLESHEET_NAME)).unwrap(),
            STYLESHEET
        );
    }

    #[tokio::test]
    async fn test_write_single_document_site() {
        let docs = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        std::fs::write(docs.path().join("only.md"), "Just this.").unwrap();
        let library = DocLibrary::at(docs.path());
        let menu = library.build_menu().await.unwrap();

        let written = SiteWriter::new(out.path().join("nested"))
            .write(&library, &menu)
            .await
            .unwrap();

        assert_eq!(written.len(), 2);
        let index = std::fs::read_to_string(out.path().join("nested/index.html")).unwrap();
        assert!(index.contains("<p>Just this.</p>"));
        assert!(index.contains("<ul>\n</ul>"));
    }
}
