use crate::catalog::{Catalog, ProjectRecord};
use crate::filter::{ALL_TAGS, TagFilter};

const CARD_BADGES: usize = 3;

/// State of the catalog view: the search box and the tag selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeView {
    query: String,
    tag: TagFilter,
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(query: impl Into<String>, tag: TagFilter) -> Self {
        Self {
            query: query.into(),
            tag,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tag(&self) -> &TagFilter {
        &self.tag
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_tag(&mut self, tag: TagFilter) {
        self.tag = tag;
    }

    pub fn results<'a>(&self, catalog: &'a Catalog) -> Vec<&'a ProjectRecord> {
        catalog.filter(&self.query, &self.tag)
    }

    pub fn cards<'a>(&self, catalog: &'a Catalog) -> Vec<ProjectCard<'a>> {
        self.results(catalog)
            .into_iter()
            .map(ProjectCard::from_record)
            .collect()
    }

    /// Selector options: the "All" sentinel followed by the tag vocabulary.
    pub fn tag_choices(catalog: &Catalog) -> Vec<String> {
        std::iter::once(ALL_TAGS.to_owned())
            .chain(catalog.tags())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumbnail<'a> {
    Image(&'a str),
    Placeholder,
}

/// What a catalog card shows for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub tagline: &'a str,
    pub thumbnail: Thumbnail<'a>,
    pub badges: &'a [String],
}

impl<'a> ProjectCard<'a> {
    pub fn from_record(record: &'a ProjectRecord) -> Self {
        let thumbnail = record
            .images
            .first()
            .map_or(Thumbnail::Placeholder, |img| Thumbnail::Image(img.as_str()));
        let badges = &record.tech_stack[..record.tech_stack.len().min(CARD_BADGES)];

        Self {
            id: &record.id,
            title: &record.title,
            tagline: &record.tagline,
            thumbnail,
            badges,
        }
    }
}
