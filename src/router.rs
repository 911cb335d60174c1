use std::fmt;

/// The two logical routes. Anything unmatched resolves to [`Route::Home`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Project { id: String },
}

impl Route {
    pub fn project(id: impl Into<String>) -> Self {
        Self::Project { id: id.into() }
    }

    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let Some(rest) = path.strip_prefix('/') else {
            return Self::Home;
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = rest.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("project"), Some(id), None) if !id.is_empty() => Self::project(id),
            _ => Self::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Project { id } => format!("/project/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
