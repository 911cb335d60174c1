use std::fmt;

use crate::catalog::ProjectRecord;

/// Label of the sentinel choice that disables tag filtering.
pub const ALL_TAGS: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_TAGS {
            Self::All
        } else {
            Self::Tag(value.to_owned())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_TAGS,
            Self::Tag(tag) => tag,
        }
    }

    /// Exact, case-sensitive membership in the record's tech stack.
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => record.tech_stack.iter().any(|t| t == tag),
        }
    }
}

impl From<&str> for TagFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Case-insensitive substring match over title, description and the
/// space-joined tech stack.
pub fn matches_query(record: &ProjectRecord, query: &str) -> bool {
    let haystack = format!(
        "{} {} {}",
        record.title,
        record.description,
        record.tech_stack.join(" ")
    )
    .to_lowercase();
    haystack.contains(&query.to_lowercase())
}

/// Records matching both the text query and the tag, in catalog order.
pub fn filter<'a>(
    records: &'a [ProjectRecord],
    query: &str,
    tag: &TagFilter,
) -> Vec<&'a ProjectRecord> {
    records
        .iter()
        .filter(|record| matches_query(record, query) && tag.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::record;

    fn ids<'a>(records: &[&'a ProjectRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_query_and_all_returns_everything_in_order() {
        let records = vec![
            record("c", "Charlie", &["Go"]),
            record("a", "Alpha", &["React"]),
            record("b", "Bravo", &[]),
        ];
        let out = filter(&records, "", &TagFilter::All);
        assert_eq!(ids(&out), vec!["c", "a", "b"]);
    }

    #[test]
    fn tag_must_match_exactly() {
        let records = vec![record("r", "R", &["React", "Next.js"])];
        assert_eq!(filter(&records, "", &TagFilter::parse("React")).len(), 1);
        assert!(filter(&records, "", &TagFilter::parse("Vue")).is_empty());
        assert!(filter(&records, "", &TagFilter::parse("react")).is_empty());
        assert!(filter(&records, "", &TagFilter::parse("Next")).is_empty());
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let records = vec![record("storeit", "StoreIt", &["Appwrite"])];
        assert_eq!(filter(&records, "storeit", &TagFilter::All).len(), 1);
        assert_eq!(filter(&records, "STORE", &TagFilter::All).len(), 1);
        assert_eq!(filter(&records, "appw", &TagFilter::All).len(), 1);
        assert!(filter(&records, "dropbox", &TagFilter::All).is_empty());
    }

    #[test]
    fn query_spans_joined_fields() {
        let records = vec![record("x", "Gym", &["Node.js", "Tailwind"])];
        // Title, description and tags are joined with single spaces.
        assert_eq!(
            filter(&records, "node.js tailwind", &TagFilter::All).len(),
            1
        );
        assert_eq!(
            filter(&records, "about gym. node", &TagFilter::All).len(),
            1
        );
    }

    #[test]
    fn query_ignores_tagline_and_features() {
        let mut r = record("x", "X", &[]);
        r.tagline = "unique-tagline".to_owned();
        r.features = vec!["unique-feature".to_owned()];
        let records = vec![r];
        assert!(filter(&records, "unique", &TagFilter::All).is_empty());
    }

    #[test]
    fn both_predicates_must_hold() {
        let records = vec![
            record("a", "Shop", &["React"]),
            record("b", "Shop", &["Vue"]),
            record("c", "Blog", &["React"]),
        ];
        let out = filter(&records, "shop", &TagFilter::parse("React"));
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn result_is_order_preserving_subsequence() {
        let records = vec![
            record("a", "One", &["X"]),
            record("b", "Two", &["Y"]),
            record("c", "Three", &["X"]),
            record("d", "Four", &["X"]),
        ];
        for (query, tag) in [("", "X"), ("o", "All"), ("t", "X"), ("zzz", "All")] {
            let out = filter(&records, query, &TagFilter::parse(tag));
            let positions: Vec<usize> = out
                .iter()
                .map(|r| records.iter().position(|c| c.id == r.id).unwrap())
                .collect();
            assert!(
                positions.windows(2).all(|w| w[0] < w[1]),
                "query={query} tag={tag}"
            );
        }
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        assert!(filter(&[], "anything", &TagFilter::All).is_empty());
    }

    #[test]
    fn all_sentinel_round_trips_through_label() {
        assert_eq!(TagFilter::parse(ALL_TAGS), TagFilter::All);
        assert_eq!(TagFilter::All.to_string(), "All");
        assert_eq!(TagFilter::from("Rust").label(), "Rust");
    }
}
