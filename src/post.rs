//! Defines the [`Payload`] handed to the builder and the [`Post`]
//! extracted from it. Extraction is where frontmatter defaults are
//! applied; every field that can be absent gets a value here so the
//! downstream templating and indexing steps never deal with options.

use serde::Deserialize;

use crate::date;
use crate::frontmatter::{Frontmatter, Value};
use crate::markdown;

/// The JSON payload produced by the writing pipeline. `frontmatter`
/// and `article` are required; deserialization fails without them.
#[derive(Deserialize, Clone, Debug)]
pub struct Payload {
    /// A multi-line `key: value` block, optionally fenced by `---`
    /// lines.
    pub frontmatter: String,

    /// The article body in the constrained markdown dialect.
    pub article: String,

    /// The SEO keyword; falls back to the post title.
    #[serde(default)]
    pub keyword: Option<String>,
}

/// A fully-extracted post, ready for templating and indexing.
#[derive(Clone, Debug)]
pub struct Post {
    pub title: String,
    pub description: String,
    pub slug: String,

    /// The raw date in ISO `YYYY-MM-DD` form.
    pub date: String,

    /// The long French form of `date`, e.g. `8 janvier 2026`.
    pub date_formatted: String,

    pub category: String,
    pub tags: Vec<String>,
    pub keyword: String,

    /// The article rendered to HTML.
    pub body: String,
}

impl Post {
    /// Extracts a [`Post`] from a [`Payload`], applying defaults for
    /// absent frontmatter keys and rendering the article body.
    pub fn from_payload(payload: &Payload) -> Post {
        let fm = Frontmatter::parse(&payload.frontmatter);
        let title = fm.scalar_or("title", "Sans titre").to_owned();
        let slug = match fm.scalar("slug") {
            Some(slug) => slug.to_owned(),
            None => derive_slug(&title),
        };
        let date = match fm.scalar("date") {
            Some(date) => date.to_owned(),
            None => date::today(),
        };
        let date_formatted = date::format_long(&date);
        let keyword = match &payload.keyword {
            Some(keyword) => keyword.clone(),
            None => title.clone(),
        };

        Post {
            description: fm.scalar_or("description", "").to_owned(),
            category: fm.scalar_or("category", "Général").to_owned(),
            tags: fm.get("tags").map(Value::to_list).unwrap_or_default(),
            body: markdown::to_html(&payload.article),
            title,
            slug,
            date,
            date_formatted,
            keyword,
        }
    }
}

/// Derives a slug from a title: lowercased, spaces hyphenated. Unlike
/// heading anchors, accents are kept; an explicit `slug` key is the
/// way to get a fully ASCII URL.
fn derive_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}
