//! Per-view transient state.
//!
//! Each view owns its own state (search text, tag choice, carousel
//! position, pending redirect) and drops it when it stops being displayed.

pub mod detail;
pub mod home;
pub mod redirect;

pub use detail::{DetailView, MissingProject, ProjectDetail};
pub use home::{HomeView, ProjectCard, Thumbnail};
pub use redirect::{Redirect, RedirectGuard, RedirectScheduler};

#[derive(Debug)]
pub enum View {
    Home(HomeView),
    Detail(DetailView),
}

impl View {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Home(_) => "home",
            Self::Detail(DetailView::Found(_)) => "project",
            Self::Detail(DetailView::NotFound(_)) => "not-found",
        }
    }
}
