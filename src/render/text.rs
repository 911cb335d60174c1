use crate::carousel::Carousel;
use crate::catalog::{Catalog, SiteInfo};
use crate::render::{
    NO_IMAGE, NO_MATCHES, NO_SCREENSHOTS, NOT_FOUND_TITLE, REDIRECTING, SEARCH_PLACEHOLDER,
    UNSUPPORTED_VIDEO,
};
use crate::video::VideoMode;
use crate::view::{DetailView, HomeView, MissingProject, ProjectDetail, Thumbnail, View};

const RULE: &str = "----------------------------------------";

pub fn render_view(catalog: &Catalog, view: &View) -> String {
    let mut out = String::new();
    navbar(&mut out, catalog.site());
    match view {
        View::Home(home) => render_home(&mut out, catalog, home),
        View::Detail(DetailView::Found(detail)) => render_detail(&mut out, detail),
        View::Detail(DetailView::NotFound(missing)) => render_not_found(&mut out, missing),
    }
    footer(&mut out, catalog.site());
    out
}

fn navbar(out: &mut String, site: &SiteInfo) {
    out.push_str(&format!("{}    [Projects] [About]\n", site.brand));
    out.push_str(RULE);
    out.push('\n');
}

fn footer(out: &mut String, site: &SiteInfo) {
    if site.footer.is_empty() {
        return;
    }
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{}\n", site.footer));
}

fn render_home(out: &mut String, catalog: &Catalog, home: &HomeView) {
    let site = catalog.site();
    out.push_str(&format!("{}\n{}\n\n", site.heading, site.intro));

    let query = if home.query().is_empty() {
        SEARCH_PLACEHOLDER
    } else {
        home.query()
    };
    out.push_str(&format!("Search: [{query}]\n"));

    let choices = HomeView::tag_choices(catalog)
        .into_iter()
        .map(|choice| {
            if choice == home.tag().label() {
                format!("<{choice}>")
            } else {
                choice
            }
        })
        .collect::<Vec<_>>();
    out.push_str(&format!("Filter: {}\n\n", choices.join(" | ")));

    let cards = home.cards(catalog);
    if cards.is_empty() {
        out.push_str(&format!("{NO_MATCHES}\n"));
        return;
    }

    for card in cards {
        out.push_str(&format!("* {} — {}\n", card.title, card.tagline));
        let thumbnail = match card.thumbnail {
            Thumbnail::Image(src) => src,
            Thumbnail::Placeholder => NO_IMAGE,
        };
        out.push_str(&format!("  image: {thumbnail}\n"));
        if !card.badges.is_empty() {
            out.push_str(&format!("  {}\n", badges(card.badges)));
        }
        out.push_str(&format!("  View Details: open {}\n", card.id));
    }
}

fn render_detail(out: &mut String, detail: &ProjectDetail) {
    let record = detail.record();
    out.push_str("← Back\n\n");
    out.push_str(&format!("{}\n{}\n", record.title, record.tagline));
    if !record.tech_stack.is_empty() {
        out.push_str(&format!("{}\n", badges(&record.tech_stack)));
    }
    out.push('\n');

    if let Some((url, mode)) = detail.video() {
        match mode {
            VideoMode::EmbeddableFrame => out.push_str(&format!("Video (embedded): {url}\n\n")),
            VideoMode::DirectFile => out.push_str(&format!("Video: {url}\n\n")),
            VideoMode::Unsupported => out.push_str(&format!("{UNSUPPORTED_VIDEO}\n\n")),
        }
    }

    out.push_str(&format!("Description\n  {}\n\n", record.description));
    if !record.features.is_empty() {
        out.push_str("Features\n");
        for feature in &record.features {
            out.push_str(&format!("  - {feature}\n"));
        }
        out.push('\n');
    }
    out.push_str(&format!("What I learned\n  {}\n\n", record.learnings));

    out.push_str("Screenshots\n");
    carousel(out, detail.carousel());
    out.push('\n');

    out.push_str("Links\n");
    link(out, "GitHub", record.github_link.as_deref());
    link(out, "Live Demo", record.live_link.as_deref());
    out.push('\n');

    out.push_str("Meta\n");
    out.push_str(&format!("  Project ID: {}\n", record.id));
    out.push_str(&format!("  Tech: {}\n", record.tech_stack.join(", ")));
}

fn carousel(out: &mut String, carousel: &Carousel) {
    let (Some(index), Some(current)) = (carousel.index(), carousel.current()) else {
        out.push_str(&format!("  {NO_SCREENSHOTS}\n"));
        return;
    };
    out.push_str(&format!(
        "  ‹ {current} ({}/{}) ›\n",
        index + 1,
        carousel.len()
    ));
    let markers = carousel
        .indicators()
        .into_iter()
        .map(|active| if active { "●" } else { "○" })
        .collect::<Vec<_>>();
    out.push_str(&format!("  {}\n", markers.join(" ")));
}

fn link(out: &mut String, label: &str, href: Option<&str>) {
    match href {
        Some(href) => out.push_str(&format!("  {label}: {href} ↗\n")),
        None => out.push_str(&format!("  {label}: not available\n")),
    }
}

fn render_not_found(out: &mut String, missing: &MissingProject) {
    out.push_str(&format!("{NOT_FOUND_TITLE}: {}\n", missing.id()));
    out.push_str(&format!("{REDIRECTING}\n"));
}

fn badges(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("[{t}]"))
        .collect::<Vec<_>>()
        .join(" ")
}
