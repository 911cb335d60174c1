use std::sync::Arc;

use tokio::sync::mpsc;

use crate::carousel::{Carousel, CarouselError};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::router::Route;
use crate::view::{DetailView, HomeView, Redirect, RedirectScheduler, View};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("the {current} view has no {wanted}")]
    WrongView {
        current: &'static str,
        wanted: &'static str,
    },

    #[error(transparent)]
    Carousel(#[from] CarouselError),
}

/// One browsing session: the current route, the mounted view, and the
/// navigation history.
///
/// Every state change happens through `&mut self` on a single task. Mounting
/// a not-found project spawns its redirect timer, so navigation must run
/// inside a tokio runtime.
#[derive(Debug)]
pub struct Session {
    catalog: Arc<Catalog>,
    route: Route,
    view: View,
    history: Vec<Route>,
    generation: u64,
    scheduler: RedirectScheduler,
    events: mpsc::UnboundedReceiver<Redirect>,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>, config: &Config) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            catalog,
            route: Route::Home,
            view: View::Home(HomeView::new()),
            history: Vec::new(),
            generation: 0,
            scheduler: RedirectScheduler::new(config.redirect_delay, tx),
            events,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn navigate(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.route, route.clone());
        self.history.push(previous);
        self.mount(route);
    }

    /// Returns to the previous route, or home when there is none.
    pub fn back(&mut self) {
        let route = self.history.pop().unwrap_or(Route::Home);
        self.route = route.clone();
        self.mount(route);
    }

    pub fn has_pending_redirect(&self) -> bool {
        matches!(
            &self.view,
            View::Detail(DetailView::NotFound(missing))
                if missing.redirect().is_some_and(|r| !r.is_cancelled())
        )
    }

    /// Waits for the next redirect scheduled by the mounted view and follows
    /// it. Redirects left over from views that were already torn down are
    /// discarded. Pends forever while nothing is scheduled.
    pub async fn next_event(&mut self) -> Route {
        loop {
            let Some(redirect) = self.events.recv().await else {
                // The scheduler keeps a sender alive, so the channel never closes.
                return std::future::pending().await;
            };
            if redirect.generation != self.generation {
                tracing::debug!(
                    generation = redirect.generation,
                    current = self.generation,
                    "discarding stale redirect"
                );
                continue;
            }
            self.navigate(redirect.to.clone());
            return redirect.to;
        }
    }

    pub fn home_mut(&mut self) -> Result<&mut HomeView, SessionError> {
        match &mut self.view {
            View::Home(home) => Ok(home),
            other => Err(SessionError::WrongView {
                current: other.kind(),
                wanted: "search or tag filter",
            }),
        }
    }

    pub fn carousel_mut(&mut self) -> Result<&mut Carousel, SessionError> {
        match &mut self.view {
            View::Detail(DetailView::Found(detail)) => Ok(detail.carousel_mut()),
            other => Err(SessionError::WrongView {
                current: other.kind(),
                wanted: "screenshots",
            }),
        }
    }

    pub fn select_image(&mut self, index: usize) -> Result<(), SessionError> {
        self.carousel_mut()?.select(index)?;
        Ok(())
    }

    fn mount(&mut self, route: Route) {
        self.generation += 1;
        // Drop the old view first so a pending redirect is cancelled before
        // the next view exists.
        self.view = View::Home(HomeView::new());
        if let Route::Project { id } = &route {
            self.view = View::Detail(DetailView::mount(
                &self.catalog,
                id,
                self.generation,
                &self.scheduler,
            ));
        }
        tracing::debug!(
            route = %route,
            view = self.view.kind(),
            generation = self.generation,
            "mounted view"
        );
    }
}
