//! HTML parsing and SEO attribute extraction
//!
//! Everything here is pure: the provider hands over the response body and the
//! requested URL, and gets back a [`PageAttributes`] without timing fields.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::types::PageAttributes;
use crate::url_utils::{is_internal_link, netloc};

/// Characters of visible text kept for the advisor prompt
pub const TEXT_CONTENT_LIMIT: usize = 3000;

/// Elements whose text never counts as page content
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Link targets that are not navigation
const SKIPPED_LINK_PREFIXES: &[&str] = &["#", "javascript:", "mailto:", "tel:"];

/// JSON-LD blocks inspected for type names
const SCHEMA_BLOCK_LIMIT: usize = 3;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static META_DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector("meta[name='description']"));
static META_KEYWORDS: Lazy<Selector> = Lazy::new(|| selector("meta[name='keywords']"));
static META_ROBOTS: Lazy<Selector> = Lazy::new(|| selector("meta[name='robots']"));
static META_VIEWPORT: Lazy<Selector> = Lazy::new(|| selector("meta[name='viewport']"));
static META_CHARSET: Lazy<Selector> =
    Lazy::new(|| selector("meta[charset], meta[http-equiv='Content-Type']"));
static CANONICAL: Lazy<Selector> = Lazy::new(|| selector("link[rel~='canonical']"));
static LINK_WITH_REL: Lazy<Selector> = Lazy::new(|| selector("link[rel]"));
static OG_TITLE: Lazy<Selector> = Lazy::new(|| selector("meta[property='og:title']"));
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| selector("meta[property='og:description']"));
static OG_IMAGE: Lazy<Selector> = Lazy::new(|| selector("meta[property='og:image']"));
static OG_TYPE: Lazy<Selector> = Lazy::new(|| selector("meta[property='og:type']"));
static TWITTER_CARD: Lazy<Selector> = Lazy::new(|| selector("meta[name='twitter:card']"));
static TWITTER_TITLE: Lazy<Selector> = Lazy::new(|| selector("meta[name='twitter:title']"));
static TWITTER_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| selector("meta[name='twitter:description']"));
static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static H2: Lazy<Selector> = Lazy::new(|| selector("h2"));
static H3: Lazy<Selector> = Lazy::new(|| selector("h3"));
static H4: Lazy<Selector> = Lazy::new(|| selector("h4"));
static IMAGES: Lazy<Selector> = Lazy::new(|| selector("img"));
static ANCHORS: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| selector("p"));
static HTML_LANG: Lazy<Selector> = Lazy::new(|| selector("html[lang]"));
static SCRIPTS: Lazy<Selector> = Lazy::new(|| selector("script"));
static MICRODATA: Lazy<Selector> = Lazy::new(|| selector("[itemtype]"));

static RE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Extract every on-page signal the scoring rubric and advisor use.
///
/// `page_url` is the URL that was requested; it decides `has_https` and is
/// the base for resolving relative links.
pub fn extract_page_attributes(html: &str, page_url: &Url) -> PageAttributes {
    let document = Html::parse_document(html);

    let (internal_links, external_links) = count_links(&document, page_url);
    let (images, images_with_alt) = count_images(&document);
    let text = visible_text(&document);
    let (has_schema, schema_types) = structured_data(&document);

    let attrs = PageAttributes {
        url: page_url.to_string(),
        has_https: page_url.scheme() == "https",

        title: first_text(&document, &TITLE),
        meta_description: meta_description(&document),
        meta_keywords: meta_content(&document, &META_KEYWORDS),
        canonical_url: attr_value(&document, &CANONICAL, "href"),
        meta_robots: meta_content(&document, &META_ROBOTS),

        og_title: meta_content(&document, &OG_TITLE),
        og_description: meta_content(&document, &OG_DESCRIPTION),
        og_image: meta_content(&document, &OG_IMAGE),
        og_type: meta_content(&document, &OG_TYPE),

        twitter_card: meta_content(&document, &TWITTER_CARD),
        twitter_title: meta_content(&document, &TWITTER_TITLE),
        twitter_description: meta_content(&document, &TWITTER_DESCRIPTION),

        h1_tags: heading_texts(&document, &H1, None),
        h2_tags: heading_texts(&document, &H2, Some(10)),
        h3_tags: heading_texts(&document, &H3, Some(10)),
        h4_tags: heading_texts(&document, &H4, Some(5)),

        images,
        images_with_alt,
        images_without_alt: images - images_with_alt,

        internal_links,
        external_links,

        word_count: text.split_whitespace().count(),
        paragraph_count: paragraph_count(&document),
        text_content: text.chars().take(TEXT_CONTENT_LIMIT).collect(),

        has_viewport: document.select(&META_VIEWPORT).next().is_some(),
        has_favicon: has_favicon(&document),
        has_charset: document.select(&META_CHARSET).next().is_some(),
        language: attr_value(&document, &HTML_LANG, "lang"),

        has_schema,
        schema_types,

        ..Default::default()
    };

    debug!(
        url = %attrs.url,
        words = attrs.word_count,
        h1 = attrs.h1_tags.len(),
        h2 = attrs.h2_tags.len(),
        images = attrs.images,
        images_with_alt = attrs.images_with_alt,
        "extracted page attributes"
    );

    attrs
}

/// Extract JSON-LD script blocks from a parsed document
pub fn extract_json_ld_blocks(document: &Html) -> Vec<String> {
    json_ld_scripts(document)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Trimmed text of every JSON-LD script, empty ones included
fn json_ld_scripts(document: &Html) -> impl Iterator<Item = String> + '_ {
    document.select(&SCRIPTS).filter_map(|element| {
        let script_type = element
            .value()
            .attr("type")
            .map(|t| t.trim().to_ascii_lowercase())
            .unwrap_or_default();

        // Use contains() to catch variations like "application/ld+json; charset=utf-8"
        script_type
            .contains("ld+json")
            .then(|| element.text().collect::<String>().trim().to_string())
    })
}

/// Schema.org presence and the type names found in the first JSON-LD scripts.
/// Any JSON-LD script counts as present, even an empty one. Falls back to
/// microdata (`itemtype`), which yields no type names.
fn structured_data(document: &Html) -> (bool, Vec<String>) {
    let scripts: Vec<String> = json_ld_scripts(document).collect();
    if !scripts.is_empty() {
        let types = scripts
            .iter()
            .take(SCHEMA_BLOCK_LIMIT)
            .flat_map(|block| schema_types_in_block(block))
            .collect();
        return (true, types);
    }

    (document.select(&MICRODATA).next().is_some(), Vec::new())
}

/// Type names declared by one JSON-LD block. Malformed blocks yield nothing.
fn schema_types_in_block(block: &str) -> Vec<String> {
    let Ok(parsed) = serde_json::from_str::<JsonValue>(block) else {
        return Vec::new();
    };

    match &parsed {
        JsonValue::Object(obj) => match (obj.get("@type"), obj.get("@graph")) {
            (Some(types), _) => type_names(types),
            (None, Some(JsonValue::Array(items))) => items_type_names(items),
            _ => Vec::new(),
        },
        JsonValue::Array(items) => items_type_names(items),
        _ => Vec::new(),
    }
}

fn items_type_names(items: &[JsonValue]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.get("@type"))
        .flat_map(type_names)
        .collect()
}

fn type_names(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::String(name) => vec![name.clone()],
        JsonValue::Array(names) => names
            .iter()
            .filter_map(|n| n.as_str())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// (internal, external) counts over every navigable `<a href>`.
fn count_links(document: &Html, page_url: &Url) -> (usize, usize) {
    let page_netloc = netloc(page_url);
    let mut internal = 0;
    let mut external = 0;

    for anchor in document.select(&ANCHORS) {
        let href = anchor.value().attr("href").unwrap_or_default().trim();
        if href.is_empty() || SKIPPED_LINK_PREFIXES.iter().any(|p| href.starts_with(p)) {
            continue;
        }

        // An unresolvable href has no host, which the containment test treats as internal
        let link_netloc = page_url
            .join(href)
            .map(|absolute| netloc(&absolute))
            .unwrap_or_default();

        if is_internal_link(&page_netloc, &link_netloc) {
            internal += 1;
        } else {
            external += 1;
        }
    }

    (internal, external)
}

/// (total, with non-empty alt) image counts
fn count_images(document: &Html) -> (usize, usize) {
    document
        .select(&IMAGES)
        .fold((0, 0), |(total, with_alt), img| {
            let has_alt = img
                .value()
                .attr("alt")
                .is_some_and(|alt| !alt.trim().is_empty());
            (total + 1, with_alt + usize::from(has_alt))
        })
}

fn has_favicon(document: &Html) -> bool {
    document.select(&LINK_WITH_REL).any(|link| {
        link.value()
            .attr("rel")
            .is_some_and(|rel| rel.to_lowercase().contains("icon"))
    })
}

/// Whitespace-normalized text outside script/style/nav/footer/header
fn visible_text(document: &Html) -> String {
    let mut raw = String::new();
    push_visible_text(document.root_element(), &mut raw);
    RE_WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

/// Non-empty `<p>` elements outside script/style/nav/footer/header
fn paragraph_count(document: &Html) -> usize {
    document
        .select(&PARAGRAPHS)
        .filter(|p| {
            !p.ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| HIDDEN_TEXT_ELEMENTS.contains(&ancestor.value().name()))
        })
        .filter(|p| {
            let mut text = String::new();
            push_visible_text(*p, &mut text);
            !text.trim().is_empty()
        })
        .count()
}

fn push_visible_text(element: ElementRef<'_>, buf: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if !HIDDEN_TEXT_ELEMENTS.contains(&child_element.value().name()) {
                push_visible_text(child_element, buf);
            }
        } else if let Some(text) = child.value().as_text() {
            buf.push_str(text);
        }
    }
}

fn heading_texts(document: &Html, selector: &Selector, limit: Option<usize>) -> Vec<String> {
    document
        .select(selector)
        .map(|h| h.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Trimmed text of the first match; kept even when empty
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// A description only counts when its raw `content` is non-empty; whitespace-only
/// content survives as an empty string.
fn meta_description(document: &Html) -> Option<String> {
    document
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(|content| content.trim().to_string())
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    attr_value(document, selector, "content")
}

/// Trimmed attribute of the first match, `None` when missing or blank
fn attr_value(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
