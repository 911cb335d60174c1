use std::collections::HashSet;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::filter::{self, TagFilter};

const BUILTIN_CATALOG_YAML: &str = include_str!("../data/catalog.yaml");

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate project id: {0}")]
    DuplicateId(String),

    #[error("invalid project id {0:?}: ids must be non-empty and use only [A-Za-z0-9_-]")]
    InvalidId(String),

    #[error("project {id}: invalid {field} {url:?}: {reason}")]
    InvalidLink {
        id: String,
        field: &'static str,
        url: String,
        reason: String,
    },
}

/// One project's full metadata. Never mutated once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub learnings: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
}

/// Site-wide display strings shared by every view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    pub brand: String,
    pub heading: String,
    pub intro: String,
    pub footer: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            brand: "DevShowcase".to_owned(),
            heading: "Project Showcase".to_owned(),
            intro: "Short video explanations, writeups, screenshots and links for each project."
                .to_owned(),
            footer: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    site: SiteInfo,
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

/// The fixed, ordered list of project records.
///
/// A catalog is built once at startup and passed by reference to every
/// operation that reads it; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    site: SiteInfo,
    records: Vec<ProjectRecord>,
}

impl Catalog {
    pub fn new(site: SiteInfo, records: Vec<ProjectRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !is_valid_id(&record.id) {
                return Err(CatalogError::InvalidId(record.id.clone()));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
            validate_link(record, "githubLink", record.github_link.as_deref())?;
            validate_link(record, "liveLink", record.live_link.as_deref())?;
            validate_media(record, "videoUrl", record.video_url.as_deref())?;
            for image in &record.images {
                validate_media(record, "images", Some(image))?;
            }
        }

        Ok(Self { site, records })
    }

    /// The catalog bundled into the binary.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG_YAML).context("parse bundled catalog")
    }

    /// Loads `path` when given, otherwise the bundled catalog.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog: {}", path.display()))?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => anyhow::bail!(
                "catalog must be a .yaml, .yml or .json file: {}",
                path.display()
            ),
        }
        .with_context(|| format!("load catalog: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            projects = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn from_yaml_str(contents: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(contents).context("deserialize yaml")?;
        Ok(Self::new(file.site, file.projects)?)
    }

    pub fn from_json_str(contents: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(contents).context("deserialize json")?;
        Ok(Self::new(file.site, file.projects)?)
    }

    pub fn site(&self) -> &SiteInfo {
        &self.site
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Distinct tags across every record's tech stack, in first-appearance order.
    pub fn tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for tag in self.records.iter().flat_map(|r| r.tech_stack.iter()) {
            if seen.insert(tag.as_str()) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    pub fn filter(&self, query: &str, tag: &TagFilter) -> Vec<&ProjectRecord> {
        filter::filter(&self.records, query, tag)
    }
}

/// Ids double as route segments and export directory names.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn validate_link(
    record: &ProjectRecord,
    field: &'static str,
    link: Option<&str>,
) -> Result<(), CatalogError> {
    let Some(link) = link else {
        return Ok(());
    };
    let invalid = |reason: String| CatalogError::InvalidLink {
        id: record.id.clone(),
        field,
        url: link.to_owned(),
        reason,
    };

    let url = Url::parse(link).map_err(|err| invalid(err.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid("scheme must be http/https".to_owned()));
    }
    Ok(())
}

/// Media may be a site-relative path or an http(s) URL.
fn validate_media(
    record: &ProjectRecord,
    field: &'static str,
    link: Option<&str>,
) -> Result<(), CatalogError> {
    let Some(link) = link else {
        return Ok(());
    };
    match Url::parse(link) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(()),
        _ => validate_link(record, field, Some(link)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: &str, title: &str, tech_stack: &[&str]) -> ProjectRecord {
        ProjectRecord {
            id: id.to_owned(),
            title: title.to_owned(),
            tagline: format!("{title} tagline"),
            description: format!("About {title}."),
            learnings: String::new(),
            tech_stack: tech_stack.iter().map(|t| (*t).to_owned()).collect(),
            features: Vec::new(),
            images: Vec::new(),
            video_url: None,
            github_link: None,
            live_link: None,
        }
    }

    pub(crate) fn catalog(records: Vec<ProjectRecord>) -> Catalog {
        Catalog::new(SiteInfo::default(), records).expect("valid test catalog")
    }

    #[test]
    fn builtin_catalog_contains_storeit() -> anyhow::Result<()> {
        let catalog = Catalog::builtin()?;
        let storeit = catalog
            .find_by_id("storeit")
            .ok_or_else(|| anyhow::anyhow!("storeit missing"))?;
        assert_eq!(storeit.title, "StoreIt");
        assert_eq!(storeit.images.len(), 6);
        assert_eq!(
            storeit.video_url.as_deref(),
            Some("/assets/storeit/storeitnew.mp4")
        );
        assert_eq!(catalog.site().brand, "Subhajit — DevShowcase");
        Ok(())
    }

    #[test]
    fn find_by_id_returns_none_for_unknown_id() {
        let catalog = catalog(vec![record("storeit", "StoreIt", &["React"])]);
        assert!(catalog.find_by_id("storeit").is_some());
        assert!(catalog.find_by_id("nope").is_none());
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let err = Catalog::new(
            SiteInfo::default(),
            vec![record("a", "A", &[]), record("a", "Again", &[])],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("a".to_owned()));
    }

    #[test]
    fn new_rejects_ids_that_are_not_path_safe() {
        for id in ["", "has space", "../up", "a/b"] {
            let err = Catalog::new(SiteInfo::default(), vec![record(id, "X", &[])]).unwrap_err();
            assert_eq!(err, CatalogError::InvalidId(id.to_owned()), "id={id:?}");
        }
    }

    #[test]
    fn new_rejects_non_http_links() {
        let mut bad = record("a", "A", &[]);
        bad.live_link = Some("ftp://example.com/demo".to_owned());
        let err = Catalog::new(SiteInfo::default(), vec![bad]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidLink { .. }));
        assert!(err.to_string().contains("invalid liveLink"));

        let mut relative = record("b", "B", &[]);
        relative.github_link = Some("github.com/someone".to_owned());
        assert!(Catalog::new(SiteInfo::default(), vec![relative]).is_err());
    }

    #[test]
    fn new_checks_media_schemes() {
        let mut script = record("a", "A", &[]);
        script.video_url = Some("javascript:alert(1)//youtube.com/embed/x".to_owned());
        let err = Catalog::new(SiteInfo::default(), vec![script]).unwrap_err();
        assert!(err.to_string().contains("invalid videoUrl"), "{err}");

        let mut image = record("b", "B", &[]);
        image.images = vec!["data:image/png;base64,AAAA".to_owned()];
        let err = Catalog::new(SiteInfo::default(), vec![image]).unwrap_err();
        assert!(err.to_string().contains("invalid images"), "{err}");

        let mut fine = record("c", "C", &[]);
        fine.video_url = Some("https://www.youtube.com/embed/x".to_owned());
        fine.images = vec!["/assets/c/1.png".to_owned(), "shots/2.png".to_owned()];
        assert!(Catalog::new(SiteInfo::default(), vec![fine]).is_ok());
    }

    #[test]
    fn tags_are_distinct_in_first_appearance_order() {
        let catalog = catalog(vec![
            record("a", "A", &["React", "Next.js"]),
            record("b", "B", &["Rust", "React"]),
            record("c", "C", &[]),
        ]);
        assert_eq!(catalog.tags(), vec!["React", "Next.js", "Rust"]);
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = catalog(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.tags().is_empty());
        assert!(catalog.find_by_id("anything").is_none());
    }

    #[test]
    fn from_path_reads_yaml_and_json() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let yaml = dir.path().join("catalog.yaml");
        std::fs::write(
            &yaml,
            "projects:\n  - id: one\n    title: One\n    techStack: [Go]\n",
        )?;
        let catalog = Catalog::from_path(&yaml)?;
        assert_eq!(catalog.records()[0].tech_stack, vec!["Go"]);
        assert_eq!(catalog.site(), &SiteInfo::default());

        let json = dir.path().join("catalog.json");
        std::fs::write(
            &json,
            r#"{"site":{"brand":"Mine"},"projects":[{"id":"two","title":"Two","videoUrl":"/v.mp4"}]}"#,
        )?;
        let catalog = Catalog::from_path(&json)?;
        assert_eq!(catalog.site().brand, "Mine");
        assert_eq!(catalog.site().heading, "Project Showcase");
        assert_eq!(catalog.records()[0].video_url.as_deref(), Some("/v.mp4"));
        Ok(())
    }

    #[test]
    fn from_path_rejects_unknown_extension() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "")?;
        let err = Catalog::from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains(".yaml, .yml or .json"));
        Ok(())
    }
}
