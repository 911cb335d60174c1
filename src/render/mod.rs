//! Presentation of views, as terminal text or static HTML.

pub mod html;
pub mod text;

pub const SEARCH_PLACEHOLDER: &str = "Search projects...";
pub const NO_MATCHES: &str = "No projects match your search.";
pub const NO_IMAGE: &str = "No Image";
pub const NO_SCREENSHOTS: &str = "No screenshots available.";
pub const UNSUPPORTED_VIDEO: &str = "Unsupported video format. Provide an embed URL or MP4.";
pub const NOT_FOUND_TITLE: &str = "Project not found";
pub const REDIRECTING: &str = "Redirecting home...";
