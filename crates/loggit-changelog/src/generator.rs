//! Changelog generation pipeline

use std::path::Path;

use loggit_core::config::Config;
use loggit_core::Result;
use loggit_git::{CommitRecord, GitRepo};
use tracing::{debug, info, instrument};

use crate::document::LogDocument;
use crate::filter::FilterChain;
use crate::output::write_atomic;
use crate::render::Renderer;

/// Changelog generator
///
/// Resolves the reference, walks history (stopping early when the filters
/// carry a limit), applies the filter chain and checks the resulting
/// document before it is rendered.
pub struct ChangelogGenerator {
    filters: FilterChain,
    renderer: Renderer,
}

impl ChangelogGenerator {
    /// Create a new generator
    pub fn new(filters: FilterChain, renderer: Renderer) -> Self {
        Self { filters, renderer }
    }

    /// Build filters and renderer from configuration.
    ///
    /// Relative template paths are resolved against `base_dir`.
    pub fn from_config(config: &Config, base_dir: &Path) -> Result<Self> {
        let filters = FilterChain::from_spec(&config.filter)?;
        let mode = config.output.render_mode()?;
        let renderer = Renderer::from_mode(&mode, base_dir)?;
        debug!(stages = ?filters.stages(), renderer = renderer.name(), "generator configured");
        Ok(Self::new(filters, renderer))
    }

    /// The filter chain
    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// The renderer
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Extract and filter the history reachable from `reference`
    #[instrument(skip(self, repo), fields(repo = %repo.path().display()))]
    pub fn generate(&self, repo: &GitRepo, reference: &str) -> Result<LogDocument> {
        let log = repo.log(reference)?;
        debug!(tags = log.tags().len(), "tag index built");

        let records: Vec<CommitRecord> = match self.filters.walk_bound() {
            Some(bound) => log.take(bound).collect::<loggit_git::Result<_>>()?,
            None => log.collect::<loggit_git::Result<_>>()?,
        };
        debug!(walked = records.len(), "history walked");

        let doc = LogDocument::new(self.filters.apply(records));
        doc.validate()?;

        info!(commits = doc.len(), "log document built");
        Ok(doc)
    }

    /// Render a document
    pub fn render(&self, doc: &LogDocument) -> String {
        self.renderer.render(doc)
    }

    /// Generate and render in one step
    pub fn generate_rendered(&self, repo: &GitRepo, reference: &str) -> Result<(LogDocument, String)> {
        let doc = self.generate(repo, reference)?;
        let output = self.render(&doc);
        Ok((doc, output))
    }

    /// Generate, render and write to `output`
    #[instrument(skip(self, repo), fields(output = %output.display()))]
    pub fn run(&self, repo: &GitRepo, reference: &str, output: &Path) -> Result<LogDocument> {
        let (doc, text) = self.generate_rendered(repo, reference)?;
        write_atomic(output, &text)?;
        info!(commits = doc.len(), "changelog written");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Repository, Signature, Time};
    use loggit_core::config::{FilterSpec, OutputFormat};
    use loggit_core::error::{FilterError, GitError, LoggitError, OutputError, RenderError};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        (temp, repo)
    }

    fn commit(repo: &Repository, author: &str, message: &str, seconds: i64) -> Oid {
        let sig = Signature::new(author, &format!("{}@test.com", author), &Time::new(seconds, 0))
            .unwrap();
        let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn tag_annotated(repo: &Repository, name: &str, target: Oid) {
        let object = repo.find_object(target, None).unwrap();
        let sig = Signature::new("tagger", "tagger@test.com", &Time::new(0, 0)).unwrap();
        repo.tag(name, &object, &sig, name, false).unwrap();
    }

    /// first, second (tagged 1.0.0), third, fourth
    fn tagged_repo() -> (TempDir, GitRepo) {
        let (temp, raw) = init_repo();
        commit(&raw, "first", "First commit", 1_000);
        let second = commit(&raw, "second", "Second commit", 2_000);
        tag_annotated(&raw, "1.0.0", second);
        commit(&raw, "third", "Third commit", 3_000);
        commit(&raw, "fourth", "Fourth commit", 4_000);
        let repo = GitRepo::open(temp.path()).unwrap();
        (temp, repo)
    }

    fn generator(filter: FilterSpec) -> ChangelogGenerator {
        ChangelogGenerator::new(FilterChain::from_spec(&filter).unwrap(), Renderer::Raw)
    }

    fn raw_generator() -> ChangelogGenerator {
        generator(FilterSpec::default())
    }

    fn names(doc: &LogDocument) -> Vec<&str> {
        doc.commits.iter().map(|c| c.author_name.as_str()).collect()
    }

    #[test]
    fn test_two_commits_raw() {
        let (temp, raw) = init_repo();
        commit(&raw, "first", "First commit", 1_000);
        commit(&raw, "second", "Second commit", 2_000);
        let repo = GitRepo::open(temp.path()).unwrap();

        let (doc, xml) = raw_generator()
            .generate_rendered(&repo, "HEAD")
            .unwrap();

        assert_eq!(names(&doc), vec!["second", "first"]);
        assert!(doc.commits.iter().all(|c| c.tags.is_empty()));
        assert!(doc.validate().is_ok());
        assert!(xml.find("<name>second</name>").unwrap() < xml.find("<name>first</name>").unwrap());
        assert_eq!(xml.matches("<taggedAs/>").count(), 2);
    }

    #[test]
    fn test_two_commits_digest() {
        let (temp, raw) = init_repo();
        let first = commit(&raw, "first", "First commit", 1_000);
        let second = commit(&raw, "second", "Second commit", 2_000);
        let repo = GitRepo::open(temp.path()).unwrap();

        let filters = FilterChain::from_spec(&FilterSpec::default()).unwrap();
        let generator = ChangelogGenerator::new(filters, Renderer::Digest);
        let (_, digest) = generator.generate_rendered(&repo, "HEAD").unwrap();

        let expected = format!(
            "# CHANGELOG\n* id: {} (by second)\n      Second commit\n* id: {} (by first)\n      First commit\n",
            &second.to_string()[..7],
            &first.to_string()[..7]
        );
        assert_eq!(digest, expected);
    }

    #[test]
    fn test_end_tag_on_repository() {
        let (_temp, repo) = tagged_repo();
        let doc = generator(FilterSpec {
            end_tag: Some("1.0.0".to_string()),
            ..Default::default()
        })
        .generate(&repo, "HEAD")
        .unwrap();

        assert_eq!(names(&doc), vec!["second", "first"]);
        assert_eq!(doc.commits[0].tags, vec!["1.0.0".to_string()]);
    }

    #[test]
    fn test_start_tag_on_repository() {
        let (_temp, repo) = tagged_repo();
        let doc = generator(FilterSpec {
            start_tag: Some("1.0.0".to_string()),
            ..Default::default()
        })
        .generate(&repo, "HEAD")
        .unwrap();

        assert_eq!(names(&doc), vec!["fourth", "third"]);
    }

    #[test]
    fn test_limit_stops_walk() {
        let (_temp, repo) = tagged_repo();
        let doc = generator(FilterSpec {
            limit: Some(3),
            ..Default::default()
        })
        .generate(&repo, "HEAD")
        .unwrap();

        assert_eq!(names(&doc), vec!["fourth", "third", "second"]);
    }

    #[test]
    fn test_patterns_on_repository() {
        let (_temp, repo) = tagged_repo();
        let doc = generator(FilterSpec {
            include: "(?:second|third)".to_string(),
            include_flags: "i".to_string(),
            exclude: Some("^Third".to_string()),
            ..Default::default()
        })
        .generate(&repo, "HEAD")
        .unwrap();

        assert_eq!(names(&doc), vec!["second"]);
    }

    #[test]
    fn test_empty_repository_is_ref_not_found() {
        let (temp, _raw) = init_repo();
        let repo = GitRepo::open(temp.path()).unwrap();

        let err = raw_generator()
            .generate(&repo, "HEAD")
            .unwrap_err();
        assert!(matches!(err, LoggitError::Git(GitError::RefNotFound { .. })));
    }

    #[test]
    fn test_unknown_reference() {
        let (_temp, repo) = tagged_repo();
        let err = raw_generator()
            .generate(&repo, "mastr")
            .unwrap_err();
        assert!(matches!(
            err,
            LoggitError::Git(GitError::RefNotFound { reference, .. }) if reference == "mastr"
        ));
    }

    #[test]
    fn test_run_writes_output() {
        let (temp, repo) = tagged_repo();
        let output = temp.path().join("target").join("gitlog.xml");

        let doc = raw_generator()
            .run(&repo, "HEAD", &output)
            .unwrap();

        assert_eq!(doc.len(), 4);
        let xml = std::fs::read_to_string(&output).unwrap();
        assert!(xml.contains("<tag>1.0.0</tag>"));
    }

    #[test]
    fn test_run_to_directory_fails_without_output() {
        let (temp, repo) = tagged_repo();
        let err = raw_generator()
            .run(&repo, "HEAD", temp.path())
            .unwrap_err();
        assert!(matches!(err, LoggitError::Output(OutputError::IsDirectory(_))));
    }

    #[test]
    fn test_from_config_custom_template() {
        let (temp, repo) = tagged_repo();
        std::fs::write(
            temp.path().join("notes.tpl"),
            "{{count}}\n{{#commits}}{{author_name}}:{{tags}}\n{{/commits}}",
        )
        .unwrap();

        let mut config = Config::default();
        config.filter.end_tag = Some("1.0.0".to_string());
        config.output.format = OutputFormat::Custom;
        config.output.template = Some(PathBuf::from("notes.tpl"));

        let generator = ChangelogGenerator::from_config(&config, temp.path()).unwrap();
        let (_, text) = generator.generate_rendered(&repo, "HEAD").unwrap();
        assert_eq!(text, "2\nsecond:1.0.0\nfirst:\n");
    }

    #[test]
    fn test_from_config_errors() {
        let temp = TempDir::new().unwrap();

        let mut config = Config::default();
        config.filter.include = "(".to_string();
        assert!(matches!(
            ChangelogGenerator::from_config(&config, temp.path()),
            Err(LoggitError::Filter(FilterError::InvalidPattern { .. }))
        ));

        let mut config = Config::default();
        config.output.format = OutputFormat::Custom;
        config.output.template = Some(PathBuf::from("missing.tpl"));
        assert!(matches!(
            ChangelogGenerator::from_config(&config, temp.path()),
            Err(LoggitError::Render(RenderError::TemplateRead { .. }))
        ));
    }
}
