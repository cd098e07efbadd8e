//! DocshelfCli application.
//!
//! Provides the CLI application that wires a [`ConfigProvider`] to a
//! [`DocLibrary`] and dispatches commands against it.

use crate::cli::{CliArgs, Command};
use crate::config::DocshelfConfig;
use crate::config_handlers;
use crate::site::SiteWriter;
use docshelf_content::hooks::ConfigRoot;
use docshelf_content::{CapabilitySet, DocLibrary, Menu};
use docshelf_core::traits::ConfigProvider;
use docshelf_core::util::paths::expand_path;
use docshelf_core::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// DocshelfCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct DocshelfCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    library: DocLibrary,
    site_output: PathBuf,
    version: String,
}

impl DocshelfCli<DocshelfConfig> {
    /// Create from CLI args, loading config from file/env.
    ///
    /// `--root` replaces `docs.root` from the config.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let mut config = DocshelfConfig::load(args.config.as_deref())?;
        if let Some(root) = &args.root {
            config.docs.root = root.clone();
        }
        let site_output = config.site_output()?;
        let mode = config.docs.delimiter;

        let config = Arc::new(config);
        let library = DocLibrary::builder(ConfigRoot::new(Arc::clone(&config)))
            .delimiter_mode(mode)
            .build();

        Ok(Self::with_library(name, config, library).with_site_output(site_output))
    }
}

impl<C: ConfigProvider> DocshelfCli<C> {
    /// Create a new CLI application reading documents from the config's root.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        let config = Arc::new(config);
        let library = DocLibrary::builder(ConfigRoot::new(Arc::clone(&config))).build();
        Self::with_library(name, config, library)
    }

    /// Create a CLI application around an already built library.
    pub fn with_library(name: impl Into<String>, config: Arc<C>, library: DocLibrary) -> Self {
        Self {
            name: name.into(),
            config,
            library,
            site_output: PathBuf::from("site"),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Override the default `build` output directory.
    pub fn with_site_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.site_output = output.into();
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Get a reference to the documentation library.
    pub fn library(&self) -> &DocLibrary {
        &self.library
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::List) => self.cmd_list().await,
            Some(Command::Show { file }) => self.cmd_show(file.as_deref()).await,
            Some(Command::Menu { capabilities, json }) => {
                self.cmd_menu(&capabilities, json).await
            }
            Some(Command::Build {
                output,
                capabilities,
            }) => {
                let output = output
                    .map(|o| expand_path(&o))
                    .unwrap_or_else(|| self.site_output.clone());
                self.cmd_build(output, &capabilities).await.map(|_| ())
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}, use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Print one line per documentation file.
    async fn cmd_list(&self) -> Result<()> {
        for line in self.list_lines().await? {
            println!("{line}");
        }
        Ok(())
    }

    async fn list_lines(&self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for file in self.library.list_document_files() {
            let doc = self.library.get_document(&file).await?;
            lines.push(format!(
                "{}\t{}\t{}\t{}",
                doc.file(),
                doc.title(),
                doc.menu_title(),
                doc.capability()
            ));
        }
        Ok(lines)
    }

    /// Print a rendered page.
    async fn cmd_show(&self, file: Option<&str>) -> Result<()> {
        let html = match file {
            Some(file) => self.library.render_document_page(file).await?,
            None => self.library.render_root_page().await?,
        };
        println!("{html}");
        Ok(())
    }

    /// Print the menu, optionally filtered by the viewer's capabilities.
    async fn cmd_menu(&self, capabilities: &[String], json: bool) -> Result<()> {
        let menu = self.visible_menu(capabilities).await?;
        if json {
            let out = serde_json::to_string_pretty(&menu)
                .map_err(|e| Error::invalid_data(e.to_string()))?;
            println!("{out}");
        } else {
            for line in menu_lines(&menu) {
                println!("{line}");
            }
        }
        Ok(())
    }

    /// Write the static site, returning the written paths.
    async fn cmd_build(&self, output: PathBuf, capabilities: &[String]) -> Result<Vec<PathBuf>> {
        let menu = self.visible_menu(capabilities).await?;
        info!("Building {} into {}", self.config.project_name(), output.display());
        SiteWriter::new(output).write(&self.library, &menu).await
    }

    /// The full menu, or the part a viewer holding `capabilities` may see.
    async fn visible_menu(&self, capabilities: &[String]) -> Result<Menu> {
        let menu = self.library.build_menu().await?;
        if capabilities.is_empty() {
            return Ok(menu);
        }
        let viewer = CapabilitySet::new(capabilities.iter().cloned());
        menu.visible_to(&viewer).ok_or_else(|| {
            Error::not_found(format!(
                "No documentation is visible with capabilities [{}]",
                capabilities.join(", ")
            ))
        })
    }
}

/// Text rendering of a menu: the root entry, then indented sub-entries.
fn menu_lines(menu: &Menu) -> Vec<String> {
    let root = menu.root();
    let mut lines = vec![format!(
        "{} [{}] {} -> {}",
        root.menu_title, root.capability, root.slug, root.file
    )];
    for page in menu.submenu() {
        lines.push(format!(
            "  {} ({}) [{}] {}",
            page.menu_title, page.page_title, page.capability, page.slug
        ));
    }
    lines
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliArgs;
    use clap::Parser;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct TestConfig {
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test-app"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn docs_root(&self) -> Result<PathBuf> {
            Ok(self.base.join("doc"))
        }
    }

    fn setup() -> (TempDir, DocshelfCli<TestConfig>) {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("doc");
        std::fs::create_dir(&doc).unwrap();
        std::fs::write(
            doc.join("intro.md"),
            "---\ntitle: Introduction\nmenu_title: Intro\n---\nWelcome.\n",
        )
        .unwrap();
        std::fs::write(
            doc.join("settings.md"),
            "---\ncapability: manage_options\n---\nSecret settings.\n",
        )
        .unwrap();
        std::fs::write(doc.join("_partial.md"), "partial").unwrap();

        let cli = DocshelfCli::new(
            "test-app",
            TestConfig {
                base: temp.path().to_path_buf(),
            },
        );
        (temp, cli)
    }

    fn empty_cli(base: &Path) -> DocshelfCli<TestConfig> {
        DocshelfCli::new(
            "test-app",
            TestConfig {
                base: base.to_path_buf(),
            },
        )
    }

    #[test]
    fn test_docshelf_cli_new() {
        let (_temp, cli) = setup();
        assert_eq!(cli.name, "test-app");
        assert_eq!(cli.config().project_name(), "test-app");
        assert_eq!(cli.site_output, PathBuf::from("site"));
    }

    #[test]
    fn test_docshelf_cli_with_version() {
        let (_temp, cli) = setup();
        let cli = cli.with_version("1.2.3");
        assert_eq!(cli.version, "1.2.3");
    }

    #[test]
    fn test_library_uses_config_root() {
        let (temp, cli) = setup();
        assert_eq!(cli.library().doc_root().unwrap(), temp.path().join("doc"));
        assert_eq!(
            cli.library().list_document_files(),
            vec!["intro.md", "settings.md"]
        );
    }

    #[tokio::test]
    async fn test_list_lines() {
        let (_temp, cli) = setup();
        let lines = cli.list_lines().await.unwrap();
        assert_eq!(
            lines,
            vec![
                "intro.md\tIntroduction\tIntro\tedit_posts",
                "settings.md\tsettings\tsettings\tmanage_options",
            ]
        );
    }

    #[tokio::test]
    async fn test_visible_menu_filters_by_capability() {
        let (_temp, cli) = setup();

        let all = cli.visible_menu(&[]).await.unwrap();
        assert_eq!(all.submenu().len(), 2);

        let editor = cli.visible_menu(&["edit_posts".to_string()]).await.unwrap();
        assert_eq!(editor.submenu().len(), 1);
        assert_eq!(editor.submenu()[0].file, "intro.md");

        let err = cli.visible_menu(&["read".to_string()]).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_menu_lines() {
        let (_temp, cli) = setup();
        let menu = cli.visible_menu(&[]).await.unwrap();
        let lines = menu_lines(&menu);
        assert_eq!(
            lines[0],
            "Documentation [edit_posts] docshelf/documentation -> intro.md"
        );
        assert_eq!(
            lines[1],
            "  Intro (Introduction) [edit_posts] docshelf/documentation/intro.md"
        );
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_cmd_build_writes_site() {
        let (temp, cli) = setup();
        let out = temp.path().join("public");

        let written = cli.cmd_build(out.clone(), &[]).await.unwrap();

        assert_eq!(written.len(), 4);
        assert!(out.join("index.html").exists());
        assert!(out.join("settings.html").exists());
    }

    #[tokio::test]
    async fn test_cmd_build_respects_capabilities() {
        let (temp, cli) = setup();
        let out = temp.path().join("public");

        cli.cmd_build(out.clone(), &["edit_posts".to_string()])
            .await
            .unwrap();

        assert!(out.join("intro.html").exists());
        assert!(!out.join("settings.html").exists());
    }

    #[tokio::test]
    async fn test_run_commands() {
        let (temp, cli) = setup();
        let out = temp.path().join("out");

        for argv in [
            vec!["test", "version"],
            vec!["test"],
            vec!["test", "list"],
            vec!["test", "show"],
            vec!["test", "show", "settings.md"],
            vec!["test", "menu", "--json"],
            vec!["test", "build", "--output", out.to_str().unwrap()],
        ] {
            let args = CliArgs::parse_from(argv.clone());
            assert!(cli.run(args).await.is_ok(), "command failed: {argv:?}");
        }
        assert!(out.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_run_show_missing_file_fails() {
        let (_temp, cli) = setup();
        let args = CliArgs::parse_from(["test", "show", "ghost.md"]);
        let err = cli.run(args).await.unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[tokio::test]
    async fn test_run_menu_without_documents_fails() {
        let temp = TempDir::new().unwrap();
        let cli = empty_cli(temp.path());
        let args = CliArgs::parse_from(["test", "menu"]);
        let err = cli.run(args).await.unwrap_err();
        assert!(matches!(err, Error::EmptyDocumentSet));
    }

    #[test]
    fn test_init_logging() {
        let (_temp, cli) = setup();
        // Should not panic when called repeatedly.
        cli.init_logging(false, false);
        cli.init_logging(true, false);
        cli.init_logging(false, true);
    }

    // ------------------------------------------------------------------------
    // DocshelfConfig integration tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_docshelf_cli_from_args_with_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                r#"
                    project_name = "from-file"
                    base_path = "{}"
                    [docs]
                    root = "manual"
                    delimiter = "anchored"
                "#,
                dir.path().display()
            ),
        )
        .unwrap();

        let args = CliArgs::parse_from(["test", "--config", path.to_str().unwrap()]);
        let cli = DocshelfCli::from_args("test-app", &args).unwrap();

        assert_eq!(cli.config().project_name(), "from-file");
        assert_eq!(cli.library().doc_root().unwrap(), dir.path().join("manual"));
        assert_eq!(
            cli.library().cache().loader().delimiter_mode(),
            docshelf_content::DelimiterMode::Anchored
        );
    }

    #[test]
    fn test_docshelf_cli_from_args_root_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, format!("base_path = \"{}\"\n", dir.path().display())).unwrap();

        let args = CliArgs::parse_from([
            "test",
            "--config",
            path.to_str().unwrap(),
            "--root",
            "/opt/handbook",
        ]);
        let cli = DocshelfCli::from_args("test-app", &args).unwrap();

        assert_eq!(
            cli.library().doc_root().unwrap(),
            PathBuf::from("/opt/handbook")
        );
    }
}
