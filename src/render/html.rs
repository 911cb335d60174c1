use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::carousel::Carousel;
use crate::catalog::{Catalog, SiteInfo};
use crate::filter::TagFilter;
use crate::render::{
    NO_IMAGE, NO_MATCHES, NO_SCREENSHOTS, NOT_FOUND_TITLE, REDIRECTING, SEARCH_PLACEHOLDER,
    UNSUPPORTED_VIDEO,
};
use crate::video::VideoMode;
use crate::view::{HomeView, ProjectDetail, Thumbnail};

const STYLE_CSS: &str = r#"body { margin: 0; font-family: system-ui, sans-serif; color: #111827; background: #f9fafb; }
nav { position: sticky; top: 0; background: rgba(255,255,255,0.6); border-bottom: 1px solid #e5e7eb; }
nav .inner, main, header.page { max-width: 64rem; margin: 0 auto; padding: 0.75rem 1rem; }
nav .inner { display: flex; justify-content: space-between; align-items: center; }
.brand { font-weight: 600; font-size: 1.25rem; color: inherit; text-decoration: none; }
.filters a { margin-right: 0.5rem; }
.filters a.active { font-weight: 700; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.card { border: 1px solid #e5e7eb; border-radius: 0.5rem; overflow: hidden; background: #fff; }
.thumb { height: 11rem; display: flex; align-items: center; justify-content: center; background: #f9fafb; }
.thumb img { object-fit: cover; width: 100%; height: 100%; }
.badge { display: inline-block; margin-right: 0.5rem; padding: 0.25rem 0.5rem; border-radius: 0.25rem; background: #f3f4f6; font-size: 0.75rem; }
.empty { text-align: center; color: #6b7280; }
.shot { height: 15rem; display: flex; align-items: center; justify-content: center; background: #f9fafb; }
.shot img { object-fit: contain; height: 100%; }
.dots a { display: inline-block; width: 0.5rem; height: 0.5rem; border-radius: 50%; background: #d1d5db; margin: 0 0.25rem; }
.dots a.active { background: #374151; }
.video iframe { width: 100%; aspect-ratio: 16 / 9; border: 0; }
.video video { width: 100%; height: auto; }
footer { margin-top: 3rem; border-top: 1px solid #e5e7eb; padding: 1.5rem; text-align: center; font-size: 0.875rem; color: #6b7280; }
"#;

/// Stable, collision-free URL slugs for the tag vocabulary.
#[derive(Debug, Clone, Default)]
pub struct TagSlugs {
    slugs: HashMap<String, String>,
}

impl TagSlugs {
    pub fn new(tags: &[String]) -> Self {
        let mut taken = HashSet::new();
        let mut slugs = HashMap::new();
        for tag in tags {
            let base = slugify(tag);
            let mut slug = base.clone();
            let mut n = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            slugs.insert(tag.clone(), slug);
        }
        Self { slugs }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.slugs.get(tag).map(String::as_str)
    }

    pub fn href(&self, tag: &TagFilter) -> String {
        match tag {
            TagFilter::All => "/".to_owned(),
            TagFilter::Tag(tag) => match self.get(tag) {
                Some(slug) => format!("/tags/{slug}/"),
                None => "/".to_owned(),
            },
        }
    }
}

/// Lowercase ASCII alphanumerics; every other run of characters becomes `-`.
pub fn slugify(tag: &str) -> String {
    let mut slug = String::new();
    for c in tag.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("tag");
    }
    slug
}

pub fn project_href(id: &str) -> String {
    format!("/project/{id}/")
}

pub fn shot_href(id: &str, index: usize) -> String {
    format!("/project/{id}/shots/{index}/")
}

pub fn style_css() -> &'static str {
    STYLE_CSS
}

pub fn home_page(catalog: &Catalog, home: &HomeView, slugs: &TagSlugs) -> String {
    let site = catalog.site();
    let mut body = String::new();
    body.push_str("<main>\n");
    body.push_str(&format!(
        "  <header class=\"page\"><h1>{}</h1><p>{}</p></header>\n",
        escape(&site.heading),
        escape(&site.intro)
    ));

    body.push_str("  <div class=\"search\">\n");
    body.push_str(&format!(
        "    <input type=\"search\" value=\"{}\" placeholder=\"{}\" readonly />\n",
        escape(home.query()),
        escape(SEARCH_PLACEHOLDER)
    ));
    body.push_str("    <div class=\"filters\">\n");
    for choice in HomeView::tag_choices(catalog) {
        let tag = TagFilter::parse(&choice);
        let class = if &tag == home.tag() {
            " class=\"active\""
        } else {
            ""
        };
        body.push_str(&format!(
            "      <a href=\"{}\"{class}>{}</a>\n",
            escape(&slugs.href(&tag)),
            escape(&choice)
        ));
    }
    body.push_str("    </div>\n");
    body.push_str("  </div>\n");

    body.push_str("  <section id=\"projects\" class=\"cards\">\n");
    let cards = home.cards(catalog);
    for card in &cards {
        body.push_str("    <div class=\"card\">\n");
        match card.thumbnail {
            Thumbnail::Image(src) => body.push_str(&format!(
                "      <div class=\"thumb\"><img src=\"{}\" alt=\"{}\" /></div>\n",
                escape(src),
                escape(card.title)
            )),
            Thumbnail::Placeholder => body.push_str(&format!(
                "      <div class=\"thumb\">{}</div>\n",
                escape(NO_IMAGE)
            )),
        }
        body.push_str(&format!("      <h2>{}</h2>\n", escape(card.title)));
        body.push_str(&format!("      <p>{}</p>\n", escape(card.tagline)));
        body.push_str(&format!("      <div>{}</div>\n", badges(card.badges)));
        body.push_str(&format!(
            "      <a href=\"{}\">View Details</a>\n",
            escape(&project_href(card.id))
        ));
        body.push_str("    </div>\n");
    }
    if cards.is_empty() {
        body.push_str(&format!(
            "    <div class=\"empty\">{}</div>\n",
            escape(NO_MATCHES)
        ));
    }
    body.push_str("  </section>\n");
    body.push_str("</main>\n");

    let title = match home.tag() {
        TagFilter::All => site.heading.clone(),
        TagFilter::Tag(tag) => format!("{} · {tag}", site.heading),
    };
    wrap_document(site, &title, None, &body)
}

pub fn detail_page(site: &SiteInfo, detail: &ProjectDetail) -> String {
    let record = detail.record();
    let mut body = String::new();
    body.push_str("<main>\n");
    body.push_str("  <p><a href=\"javascript:history.back()\">← Back</a></p>\n");
    body.push_str("  <header>\n");
    body.push_str(&format!("    <h1>{}</h1>\n", escape(&record.title)));
    body.push_str(&format!("    <p>{}</p>\n", escape(&record.tagline)));
    body.push_str(&format!("    <div>{}</div>\n", badges(&record.tech_stack)));
    body.push_str("  </header>\n");

    body.push_str("  <section>\n");
    if let Some((url, mode)) = detail.video() {
        body.push_str("    <div class=\"video\">\n");
        match mode {
            VideoMode::EmbeddableFrame => body.push_str(&format!(
                "      <iframe src=\"{}\" title=\"{}\" sandbox=\"allow-scripts allow-same-origin allow-presentation\" allowfullscreen></iframe>\n",
                escape(url),
                escape(&record.title)
            )),
            VideoMode::DirectFile => body.push_str(&format!(
                "      <video controls><source src=\"{}\" type=\"video/mp4\" />Your browser does not support the video tag.</video>\n",
                escape(url)
            )),
            VideoMode::Unsupported => {
                body.push_str(&format!("      <p>{}</p>\n", escape(UNSUPPORTED_VIDEO)))
            }
        }
        body.push_str("    </div>\n");
    }

    body.push_str("    <h3>Description</h3>\n");
    body.push_str(&format!("    <p>{}</p>\n", escape(&record.description)));
    body.push_str("    <h4>Features</h4>\n");
    body.push_str("    <ul>\n");
    for feature in &record.features {
        body.push_str(&format!("      <li>{}</li>\n", escape(feature)));
    }
    body.push_str("    </ul>\n");
    body.push_str("    <h4>What I learned</h4>\n");
    body.push_str(&format!("    <p>{}</p>\n", escape(&record.learnings)));

    body.push_str("    <h4>Screenshots</h4>\n");
    carousel(&mut body, &record.id, detail.carousel());
    body.push_str("  </section>\n");

    body.push_str("  <aside>\n");
    for (label, href) in [
        ("GitHub", record.github_link.as_deref()),
        ("Live Demo", record.live_link.as_deref()),
    ] {
        if let Some(href) = href {
            body.push_str(&format!(
                "    <a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{label} ↗</a>\n",
                escape(href)
            ));
        }
    }
    body.push_str("    <h4>Meta</h4>\n");
    body.push_str(&format!(
        "    <p>Project ID: <code>{}</code></p>\n",
        escape(&record.id)
    ));
    body.push_str(&format!(
        "    <p>Tech: {}</p>\n",
        escape(&record.tech_stack.join(", "))
    ));
    body.push_str("  </aside>\n");
    body.push_str("</main>\n");

    wrap_document(site, &record.title, None, &body)
}

/// Prev/next and indicator links are computed from the carousel itself, so
/// every exported shot page links to its cyclic neighbours.
fn carousel(out: &mut String, id: &str, carousel: &Carousel) {
    let (Some(index), Some(current)) = (carousel.index(), carousel.current()) else {
        out.push_str(&format!(
            "    <div class=\"empty\">{}</div>\n",
            escape(NO_SCREENSHOTS)
        ));
        return;
    };

    let mut prev = carousel.clone();
    prev.prev();
    let mut next = carousel.clone();
    next.next();

    out.push_str("    <div class=\"carousel\">\n");
    out.push_str(&format!(
        "      <div class=\"shot\"><img src=\"{}\" alt=\"shot-{index}\" /></div>\n",
        escape(current)
    ));
    out.push_str(&format!(
        "      <a class=\"prev\" href=\"{}\">‹</a>\n",
        escape(&shot_href(id, prev.index().unwrap_or(index)))
    ));
    out.push_str(&format!(
        "      <a class=\"next\" href=\"{}\">›</a>\n",
        escape(&shot_href(id, next.index().unwrap_or(index)))
    ));
    out.push_str("      <div class=\"dots\">\n");
    for (i, active) in carousel.indicators().into_iter().enumerate() {
        let class = if active { " class=\"active\"" } else { "" };
        out.push_str(&format!(
            "        <a href=\"{}\"{class} aria-label=\"shot {}\"></a>\n",
            escape(&shot_href(id, i)),
            i + 1
        ));
    }
    out.push_str("      </div>\n");
    out.push_str("    </div>\n");
}

/// The not-found notice, which sends the browser home after `delay`.
pub fn not_found_page(site: &SiteInfo, delay: Duration) -> String {
    let mut body = String::new();
    body.push_str("<main>\n");
    body.push_str(&format!("  <h2>{}</h2>\n", escape(NOT_FOUND_TITLE)));
    body.push_str(&format!("  <p>{}</p>\n", escape(REDIRECTING)));
    body.push_str("</main>\n");
    wrap_document(site, NOT_FOUND_TITLE, Some(delay), &body)
}

fn wrap_document(site: &SiteInfo, title: &str, redirect: Option<Duration>, body: &str) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n");
    out.push_str("<html lang=\"en\">\n");
    out.push_str("<head>\n");
    out.push_str("  <meta charset=\"utf-8\" />\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    if let Some(delay) = redirect {
        out.push_str(&format!(
            "  <meta http-equiv=\"refresh\" content=\"{};url=/\" />\n",
            format_seconds(delay)
        ));
    }
    out.push_str(&format!(
        "  <title>{} · {}</title>\n",
        escape(title),
        escape(&site.brand)
    ));
    out.push_str("  <link rel=\"stylesheet\" href=\"/style.css\" />\n");
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    out.push_str("<nav><div class=\"inner\">\n");
    out.push_str(&format!(
        "  <a class=\"brand\" href=\"/\">{}</a>\n",
        escape(&site.brand)
    ));
    out.push_str("  <div><a href=\"/#projects\">Projects</a> <a href=\"/#about\">About</a></div>\n");
    out.push_str("</div></nav>\n");
    out.push_str(body);
    if !site.footer.is_empty() {
        out.push_str(&format!("<footer>{}</footer>\n", escape(&site.footer)));
    }
    out.push_str("</body>\n");
    out.push_str("</html>\n");
    out
}

fn format_seconds(delay: Duration) -> String {
    let millis = delay.as_millis();
    let secs = millis / 1000;
    let frac = millis % 1000;
    if frac == 0 {
        secs.to_string()
    } else {
        format!("{secs}.{frac:03}")
            .trim_end_matches('0')
            .to_owned()
    }
}

fn badges(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("<span class=\"badge\">{}</span>", escape(t)))
        .collect::<Vec<_>>()
        .join("")
}

pub fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
