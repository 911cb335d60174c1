use crate::carousel::Carousel;
use crate::catalog::{Catalog, ProjectRecord};
use crate::router::Route;
use crate::video::{self, VideoMode};
use crate::view::redirect::{RedirectGuard, RedirectScheduler};

/// The per-project page: either the project or the not-found notice.
#[derive(Debug)]
pub enum DetailView {
    Found(ProjectDetail),
    NotFound(MissingProject),
}

impl DetailView {
    /// Looks `id` up without scheduling anything. Used for static rendering.
    pub fn open(catalog: &Catalog, id: &str) -> Self {
        match catalog.find_by_id(id) {
            Some(record) => Self::Found(ProjectDetail::new(record.clone())),
            None => Self::NotFound(MissingProject {
                id: id.to_owned(),
                redirect: None,
            }),
        }
    }

    /// Looks `id` up and, when it is missing, schedules the redirect home.
    pub fn mount(
        catalog: &Catalog,
        id: &str,
        generation: u64,
        scheduler: &RedirectScheduler,
    ) -> Self {
        let mut view = Self::open(catalog, id);
        if let Self::NotFound(missing) = &mut view {
            tracing::info!(id, "project not found");
            missing.redirect = Some(scheduler.schedule(generation, Route::Home));
        }
        view
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetail {
    record: ProjectRecord,
    video: Option<VideoMode>,
    carousel: Carousel,
}

impl ProjectDetail {
    pub fn new(record: ProjectRecord) -> Self {
        let video = record.video_url.as_deref().map(video::classify);
        let carousel = Carousel::new(record.images.clone());
        Self {
            record,
            video,
            carousel,
        }
    }

    pub fn record(&self) -> &ProjectRecord {
        &self.record
    }

    /// `None` when the record has no video at all.
    pub fn video(&self) -> Option<(&str, VideoMode)> {
        self.record.video_url.as_deref().zip(self.video)
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }
}

#[derive(Debug)]
pub struct MissingProject {
    id: String,
    redirect: Option<RedirectGuard>,
}

impl MissingProject {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn redirect(&self) -> Option<&RedirectGuard> {
        self.redirect.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;
    use crate::catalog::tests::{catalog, record};

    #[test]
    fn open_found_classifies_video_and_builds_carousel() {
        let mut r = record("storeit", "StoreIt", &["React"]);
        r.video_url = Some("/assets/demo.mp4".to_owned());
        r.images = vec!["/a.png".to_owned(), "/b.png".to_owned()];
        let catalog = catalog(vec![r]);

        let DetailView::Found(detail) = DetailView::open(&catalog, "storeit") else {
            panic!("storeit should be found");
        };
        assert_eq!(
            detail.video(),
            Some(("/assets/demo.mp4", VideoMode::DirectFile))
        );
        assert_eq!(detail.carousel().len(), 2);
        assert_eq!(detail.carousel().index(), Some(0));
    }

    #[test]
    fn open_without_video_has_no_video_area() {
        let catalog = catalog(vec![record("a", "A", &[])]);
        let DetailView::Found(detail) = DetailView::open(&catalog, "a") else {
            panic!("a should be found");
        };
        assert_eq!(detail.video(), None);
        assert!(detail.carousel().is_empty());
    }

    #[test]
    fn open_missing_schedules_nothing() {
        let catalog = catalog(vec![record("storeit", "StoreIt", &[])]);
        let DetailView::NotFound(missing) = DetailView::open(&catalog, "nope") else {
            panic!("nope should be missing");
        };
        assert_eq!(missing.id(), "nope");
        assert!(missing.redirect().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn mount_missing_schedules_redirect_home() {
        let catalog = catalog(vec![record("storeit", "StoreIt", &[])]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = RedirectScheduler::new(Duration::from_millis(1200), tx);

        let found = DetailView::mount(&catalog, "storeit", 1, &scheduler);
        assert!(found.is_found());

        let missing = DetailView::mount(&catalog, "nope", 2, &scheduler);
        assert!(!missing.is_found());

        let redirect = rx.recv().await.expect("redirect fires");
        assert_eq!(redirect.generation, 2);
        assert_eq!(redirect.to, Route::Home);
        drop(missing);
    }
}
