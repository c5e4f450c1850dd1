//! Rubric tables
//!
//! Every category is a static, ordered list of [`Check`]s. A check looks at the
//! page attributes and returns the points it awards together with exactly one
//! [`Finding`]. Table order is the order in which findings are reported.

use crate::types::{Category, PageAttributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
}

/// A single strength or issue produced by a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Strength(String),
    Issue { severity: Severity, message: String },
}

impl Finding {
    pub fn strength(message: impl Into<String>) -> Self {
        Self::Strength(message.into())
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::Issue {
            severity: Severity::Critical,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Issue {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_strength(&self) -> bool {
        matches!(self, Self::Strength(_))
    }

    /// Report line with its status icon
    pub fn render(&self) -> String {
        match self {
            Self::Strength(message) => format!("✅ {message}"),
            Self::Issue {
                severity: Severity::Critical,
                message,
            } => format!("❌ {message}"),
            Self::Issue {
                severity: Severity::Warning,
                message,
            } => format!("⚠️ {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub points: u32,
    pub finding: Finding,
}

impl Outcome {
    fn new(points: u32, finding: Finding) -> Self {
        Self { points, finding }
    }
}

/// One row of the rubric
pub struct Check {
    pub name: &'static str,
    pub max_points: u32,
    pub evaluate: fn(&PageAttributes) -> Outcome,
}

/// An ordered group of checks. `category` is `None` for reported-only checks.
pub struct Rubric {
    pub category: Option<Category>,
    pub checks: &'static [Check],
}

impl Rubric {
    pub fn max_points(&self) -> u32 {
        self.checks.iter().map(|c| c.max_points).sum()
    }
}

pub static META_TAGS: Rubric = Rubric {
    category: Some(Category::MetaTags),
    checks: &[
        Check {
            name: "title_length",
            max_points: 10,
            evaluate: title_length,
        },
        Check {
            name: "meta_description",
            max_points: 10,
            evaluate: meta_description,
        },
        Check {
            name: "canonical_url",
            max_points: 5,
            evaluate: canonical_url,
        },
        Check {
            name: "meta_robots",
            max_points: 5,
            evaluate: meta_robots,
        },
    ],
};

pub static CONTENT: Rubric = Rubric {
    category: Some(Category::Content),
    checks: &[
        Check {
            name: "h1_count",
            max_points: 12,
            evaluate: h1_count,
        },
        Check {
            name: "h2_count",
            max_points: 8,
            evaluate: h2_count,
        },
        Check {
            name: "word_count",
            max_points: 10,
            evaluate: word_count,
        },
        Check {
            name: "internal_links",
            max_points: 5,
            evaluate: internal_links,
        },
    ],
};

pub static TECHNICAL: Rubric = Rubric {
    category: Some(Category::Technical),
    checks: &[
        Check {
            name: "https",
            max_points: 5,
            evaluate: https,
        },
        Check {
            name: "load_time",
            max_points: 5,
            evaluate: load_time,
        },
        Check {
            name: "page_size",
            max_points: 3,
            evaluate: page_size,
        },
        Check {
            name: "viewport",
            max_points: 3,
            evaluate: viewport,
        },
        Check {
            name: "language",
            max_points: 2,
            evaluate: language,
        },
        Check {
            name: "favicon",
            max_points: 2,
            evaluate: favicon,
        },
        Check {
            name: "structured_data",
            max_points: 5,
            evaluate: structured_data,
        },
    ],
};

pub static SOCIAL: Rubric = Rubric {
    category: Some(Category::Social),
    checks: &[
        Check {
            name: "image_alt_text",
            max_points: 5,
            evaluate: image_alt_text,
        },
        Check {
            name: "open_graph",
            max_points: 3,
            evaluate: open_graph,
        },
        Check {
            name: "twitter_card",
            max_points: 2,
            evaluate: twitter_card,
        },
    ],
};

pub static UNSCORED: Rubric = Rubric {
    category: None,
    checks: &[Check {
        name: "external_links",
        max_points: 0,
        evaluate: external_links,
    }],
};

/// All rubric groups in evaluation order
pub static RUBRICS: [&Rubric; 5] = [&META_TAGS, &CONTENT, &TECHNICAL, &SOCIAL, &UNSCORED];

// Meta tags

fn title_length(attrs: &PageAttributes) -> Outcome {
    match attrs.title_length() {
        None => Outcome::new(0, Finding::critical("Missing title tag (critical SEO issue)")),
        Some(0) => Outcome::new(0, Finding::critical("Title tag is empty")),
        Some(30..=60) => Outcome::new(
            10,
            Finding::strength("Title tag length is optimal (30-60 characters)"),
        ),
        Some(len @ (20..=29 | 61..=70)) => Outcome::new(
            6,
            Finding::warning(format!("Title tag length is {len} chars (optimal: 30-60)")),
        ),
        Some(len) => Outcome::new(
            3,
            Finding::critical(format!("Title tag length is {len} chars (needs improvement)")),
        ),
    }
}

fn meta_description(attrs: &PageAttributes) -> Outcome {
    match attrs.meta_description_length() {
        None => Outcome::new(
            0,
            Finding::critical("Missing meta description (important for click-through rate)"),
        ),
        Some(0) => Outcome::new(0, Finding::critical("Meta description is empty")),
        Some(120..=160) => Outcome::new(
            10,
            Finding::strength("Meta description length is optimal (120-160 characters)"),
        ),
        Some(len @ (100..=119 | 161..=180)) => Outcome::new(
            6,
            Finding::warning(format!("Meta description is {len} chars (optimal: 120-160)")),
        ),
        Some(len) => Outcome::new(
            3,
            Finding::critical(format!("Meta description is {len} chars (needs improvement)")),
        ),
    }
}

fn canonical_url(attrs: &PageAttributes) -> Outcome {
    if attrs.canonical_url.is_some() {
        Outcome::new(
            5,
            Finding::strength("Canonical URL is set (prevents duplicate content)"),
        )
    } else {
        Outcome::new(0, Finding::warning("No canonical URL found (recommended for SEO)"))
    }
}

fn meta_robots(attrs: &PageAttributes) -> Outcome {
    match attrs.meta_robots.as_deref() {
        // Present robots tags earn full credit even when they exclude the page
        Some(robots) if robots.to_lowercase().contains("noindex") => Outcome::new(
            5,
            Finding::warning("Page is set to NOINDEX (won't appear in search results)"),
        ),
        Some(_) => Outcome::new(5, Finding::strength("Meta robots tag configured properly")),
        None => Outcome::new(
            2,
            Finding::warning("No meta robots tag (not critical but recommended)"),
        ),
    }
}

// Content

fn h1_count(attrs: &PageAttributes) -> Outcome {
    match attrs.h1_tags.len() {
        1 => Outcome::new(12, Finding::strength("Perfect! One H1 tag found")),
        0 => Outcome::new(
            0,
            Finding::critical("No H1 tag found (critical for SEO and accessibility)"),
        ),
        n => Outcome::new(
            6,
            Finding::warning(format!("Multiple H1 tags found ({n}). Should have only 1")),
        ),
    }
}

fn h2_count(attrs: &PageAttributes) -> Outcome {
    match attrs.h2_tags.len() {
        0 => Outcome::new(
            0,
            Finding::critical("No H2 tags found. Add subheadings for better structure"),
        ),
        n @ 1..=2 => Outcome::new(
            4,
            Finding::warning(format!(
                "Only {n} H2 tag(s). Add more for better structure"
            )),
        ),
        n => Outcome::new(
            8,
            Finding::strength(format!("Good content structure with {n} H2 tags")),
        ),
    }
}

fn word_count(attrs: &PageAttributes) -> Outcome {
    let words = attrs.word_count;
    match words {
        1000.. => Outcome::new(
            10,
            Finding::strength(format!("Good content length ({words} words)")),
        ),
        500..=999 => Outcome::new(
            6,
            Finding::warning(format!(
                "Content is {words} words (aim for 1000+ for better SEO)"
            )),
        ),
        300..=499 => Outcome::new(
            3,
            Finding::warning(format!(
                "Content is short ({words} words). Add more valuable content"
            )),
        ),
        _ => Outcome::new(
            0,
            Finding::critical(format!(
                "Very little content ({words} words). Search engines prefer comprehensive content"
            )),
        ),
    }
}

fn internal_links(attrs: &PageAttributes) -> Outcome {
    let links = attrs.internal_links;
    match links {
        5.. => Outcome::new(
            5,
            Finding::strength(format!("Good internal linking ({links} links)")),
        ),
        2..=4 => Outcome::new(
            3,
            Finding::warning(format!(
                "Only {links} internal links. Add more for better SEO"
            )),
        ),
        _ => Outcome::new(
            0,
            Finding::critical("Very few internal links. Add more to improve site navigation"),
        ),
    }
}

// Technical

fn https(attrs: &PageAttributes) -> Outcome {
    if attrs.has_https {
        Outcome::new(5, Finding::strength("Website uses HTTPS (secure)"))
    } else {
        Outcome::new(
            0,
            Finding::critical("Website is not using HTTPS (security risk and SEO penalty)"),
        )
    }
}

fn load_time(attrs: &PageAttributes) -> Outcome {
    let secs = format_seconds(attrs.load_time);
    if attrs.load_time < 2.0 {
        Outcome::new(5, Finding::strength(format!("Fast load time ({secs}s)")))
    } else if attrs.load_time < 4.0 {
        Outcome::new(
            3,
            Finding::warning(format!("Load time is {secs}s (aim for under 2s)")),
        )
    } else {
        Outcome::new(
            0,
            Finding::critical(format!("Slow load time ({secs}s). Optimize for speed")),
        )
    }
}

fn page_size(attrs: &PageAttributes) -> Outcome {
    let kb = attrs.page_size_kb;
    if kb < 500.0 {
        Outcome::new(3, Finding::strength(format!("Good page size ({kb:.1} KB)")))
    } else if kb < 1000.0 {
        Outcome::new(
            2,
            Finding::warning(format!(
                "Page size is {kb:.1} KB (try to keep under 500 KB)"
            )),
        )
    } else {
        Outcome::new(
            0,
            Finding::critical(format!(
                "Page size is {kb:.1} KB (too large, affects loading speed)"
            )),
        )
    }
}

fn viewport(attrs: &PageAttributes) -> Outcome {
    if attrs.has_viewport {
        Outcome::new(3, Finding::strength("Mobile viewport meta tag present"))
    } else {
        Outcome::new(
            0,
            Finding::critical("Missing viewport meta tag (critical for mobile SEO)"),
        )
    }
}

fn language(attrs: &PageAttributes) -> Outcome {
    match attrs.language.as_deref() {
        Some(code) => Outcome::new(2, Finding::strength(format!("Language declared ({code})"))),
        None => Outcome::new(0, Finding::warning("No language declaration in HTML tag")),
    }
}

fn favicon(attrs: &PageAttributes) -> Outcome {
    if attrs.has_favicon {
        Outcome::new(2, Finding::strength("Favicon present"))
    } else {
        Outcome::new(
            0,
            Finding::warning("No favicon found (improves brand recognition)"),
        )
    }
}

fn structured_data(attrs: &PageAttributes) -> Outcome {
    if !attrs.has_schema {
        return Outcome::new(
            0,
            Finding::warning(
                "No structured data (Schema.org). Helps search engines understand your content",
            ),
        );
    }

    let types = attrs
        .schema_types
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if types.is_empty() {
        Outcome::new(5, Finding::strength("Structured data present"))
    } else {
        Outcome::new(5, Finding::strength(format!("Structured data found ({types})")))
    }
}

// Social & images

fn image_alt_text(attrs: &PageAttributes) -> Outcome {
    let total = attrs.images;
    let missing = attrs.images_without_alt;

    if total == 0 {
        return Outcome::new(2, Finding::warning("No images found on the page"));
    }
    if missing == 0 {
        return Outcome::new(
            5,
            Finding::strength(format!("All {total} images have alt text")),
        );
    }

    let message = format!("{missing} out of {total} images missing alt text");
    // Strictly under 30% missing, compared without floating point
    if missing * 100 < total * 30 {
        Outcome::new(3, Finding::warning(message))
    } else {
        Outcome::new(1, Finding::critical(message))
    }
}

fn open_graph(attrs: &PageAttributes) -> Outcome {
    match attrs.open_graph_count() {
        0 => Outcome::new(
            0,
            Finding::warning("No Open Graph tags (important for social media previews)"),
        ),
        n @ 1..=2 => Outcome::new(
            1,
            Finding::warning(format!(
                "Only {n}/3 Open Graph tags found (add more for better social sharing)"
            )),
        ),
        _ => Outcome::new(
            3,
            Finding::strength("Complete Open Graph tags for social sharing"),
        ),
    }
}

fn twitter_card(attrs: &PageAttributes) -> Outcome {
    if attrs.twitter_card.is_some() {
        Outcome::new(2, Finding::strength("Twitter Card tags present"))
    } else {
        Outcome::new(
            0,
            Finding::warning("No Twitter Card tags (helps with Twitter sharing)"),
        )
    }
}

// Reported only

fn external_links(attrs: &PageAttributes) -> Outcome {
    match attrs.external_links {
        0 => Outcome::new(
            0,
            Finding::warning(
                "No external links found (linking to authoritative sources helps SEO)",
            ),
        ),
        n => Outcome::new(
            0,
            Finding::strength(format!("Has {n} external links (good for credibility)")),
        ),
    }
}

/// Seconds with at least one fractional digit: `1.2`, `2.0`, `3.45`
fn format_seconds(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> PageAttributes {
        PageAttributes::default()
    }

    fn with_title_len(len: usize) -> PageAttributes {
        PageAttributes {
            title: Some("a".repeat(len)),
            ..attrs()
        }
    }

    fn with_description_len(len: usize) -> PageAttributes {
        PageAttributes {
            meta_description: Some("d".repeat(len)),
            ..attrs()
        }
    }

    #[test]
    fn table_maxima_match_category_maxima() {
        for rubric in RUBRICS {
            match rubric.category {
                Some(category) => assert_eq!(
                    rubric.max_points(),
                    category.max_points(),
                    "{category:?}"
                ),
                None => assert_eq!(rubric.max_points(), 0),
            }
        }
    }

    #[test]
    fn check_names_are_unique() {
        let mut names: Vec<&str> = RUBRICS
            .iter()
            .flat_map(|r| r.checks.iter().map(|c| c.name))
            .collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn title_boundaries() {
        let cases = [
            (30, 10, true),
            (60, 10, true),
            (20, 6, false),
            (29, 6, false),
            (61, 6, false),
            (70, 6, false),
            (19, 3, false),
            (71, 3, false),
            (1, 3, false),
        ];
        for (len, points, strength) in cases {
            let outcome = title_length(&with_title_len(len));
            assert_eq!(outcome.points, points, "title length {len}");
            assert_eq!(outcome.finding.is_strength(), strength, "title length {len}");
        }
    }

    #[test]
    fn title_tier_messages_include_length() {
        let outcome = title_length(&with_title_len(20));
        assert_eq!(
            outcome.finding.render(),
            "⚠️ Title tag length is 20 chars (optimal: 30-60)"
        );

        let outcome = title_length(&with_title_len(71));
        assert_eq!(
            outcome.finding.render(),
            "❌ Title tag length is 71 chars (needs improvement)"
        );
    }

    #[test]
    fn missing_and_empty_title_are_distinct() {
        let missing = title_length(&attrs());
        assert_eq!(missing.points, 0);
        assert_eq!(
            missing.finding.render(),
            "❌ Missing title tag (critical SEO issue)"
        );

        let empty = title_length(&with_title_len(0));
        assert_eq!(empty.points, 0);
        assert_eq!(empty.finding.render(), "❌ Title tag is empty");
    }

    #[test]
    fn meta_description_boundaries() {
        let cases = [
            (120, 10),
            (160, 10),
            (100, 6),
            (119, 6),
            (161, 6),
            (180, 6),
            (99, 3),
            (181, 3),
        ];
        for (len, points) in cases {
            let outcome = meta_description(&with_description_len(len));
            assert_eq!(outcome.points, points, "description length {len}");
            assert_eq!(outcome.finding.is_strength(), points == 10);
        }
    }

    #[test]
    fn meta_description_missing_and_empty() {
        assert_eq!(
            meta_description(&attrs()).finding.render(),
            "❌ Missing meta description (important for click-through rate)"
        );
        let empty = meta_description(&with_description_len(0));
        assert_eq!(empty.points, 0);
        assert_eq!(empty.finding.render(), "❌ Meta description is empty");
    }

    #[test]
    fn meta_robots_tiers() {
        let absent = meta_robots(&attrs());
        assert_eq!(absent.points, 2);
        assert!(!absent.finding.is_strength());

        let noindex = meta_robots(&PageAttributes {
            meta_robots: Some("NoIndex, follow".to_string()),
            ..attrs()
        });
        assert_eq!(noindex.points, 5);
        assert_eq!(
            noindex.finding.render(),
            "⚠️ Page is set to NOINDEX (won't appear in search results)"
        );

        let fine = meta_robots(&PageAttributes {
            meta_robots: Some("index, follow".to_string()),
            ..attrs()
        });
        assert_eq!(fine.points, 5);
        assert!(fine.finding.is_strength());
    }

    #[test]
    fn h1_tiers() {
        let h1s = |n: usize| PageAttributes {
            h1_tags: vec!["Heading".to_string(); n],
            ..attrs()
        };

        let none = h1_count(&h1s(0));
        assert_eq!(none.points, 0);
        assert!(!none.finding.is_strength());

        let one = h1_count(&h1s(1));
        assert_eq!(one.points, 12);
        assert!(one.finding.is_strength());

        let two = h1_count(&h1s(2));
        assert_eq!(two.points, 6);
        assert_eq!(
            two.finding.render(),
            "⚠️ Multiple H1 tags found (2). Should have only 1"
        );
    }

    #[test]
    fn h2_tiers() {
        let h2s = |n: usize| PageAttributes {
            h2_tags: vec!["Section".to_string(); n],
            ..attrs()
        };
        assert_eq!(h2_count(&h2s(0)).points, 0);
        assert_eq!(h2_count(&h2s(1)).points, 4);
        assert_eq!(h2_count(&h2s(2)).points, 4);
        assert_eq!(h2_count(&h2s(3)).points, 8);
        assert_eq!(
            h2_count(&h2s(2)).finding.render(),
            "⚠️ Only 2 H2 tag(s). Add more for better structure"
        );
    }

    #[test]
    fn word_count_boundaries() {
        let words = |n: usize| PageAttributes {
            word_count: n,
            ..attrs()
        };
        assert_eq!(word_count(&words(1000)).points, 10);
        assert_eq!(word_count(&words(999)).points, 6);
        assert_eq!(word_count(&words(500)).points, 6);
        assert_eq!(word_count(&words(499)).points, 3);
        assert_eq!(word_count(&words(300)).points, 3);
        assert_eq!(word_count(&words(299)).points, 0);
    }

    #[test]
    fn internal_link_boundaries() {
        let links = |n: usize| PageAttributes {
            internal_links: n,
            ..attrs()
        };
        assert_eq!(internal_links(&links(5)).points, 5);
        assert_eq!(internal_links(&links(4)).points, 3);
        assert_eq!(internal_links(&links(2)).points, 3);
        assert_eq!(internal_links(&links(1)).points, 0);
    }

    #[test]
    fn load_time_boundaries_and_formatting() {
        let timed = |t: f64| PageAttributes {
            load_time: t,
            ..attrs()
        };
        let fast = load_time(&timed(1.2));
        assert_eq!(fast.points, 5);
        assert_eq!(fast.finding.render(), "✅ Fast load time (1.2s)");

        let two = load_time(&timed(2.0));
        assert_eq!(two.points, 3);
        assert_eq!(two.finding.render(), "⚠️ Load time is 2.0s (aim for under 2s)");

        let slow = load_time(&timed(4.0));
        assert_eq!(slow.points, 0);
        assert_eq!(
            slow.finding.render(),
            "❌ Slow load time (4.0s). Optimize for speed"
        );
    }

    #[test]
    fn page_size_boundaries() {
        let sized = |kb: f64| PageAttributes {
            page_size_kb: kb,
            ..attrs()
        };
        assert_eq!(page_size(&sized(499.9)).points, 3);
        assert_eq!(page_size(&sized(500.0)).points, 2);
        assert_eq!(page_size(&sized(999.9)).points, 2);
        assert_eq!(page_size(&sized(1000.0)).points, 0);
        assert_eq!(
            page_size(&sized(123.456)).finding.render(),
            "✅ Good page size (123.5 KB)"
        );
    }

    #[test]
    fn structured_data_lists_first_three_types() {
        let schema = PageAttributes {
            has_schema: true,
            schema_types: ["Organization", "WebSite", "BreadcrumbList", "Product"]
                .map(String::from)
                .to_vec(),
            ..attrs()
        };
        let outcome = structured_data(&schema);
        assert_eq!(outcome.points, 5);
        assert_eq!(
            outcome.finding.render(),
            "✅ Structured data found (Organization, WebSite, BreadcrumbList)"
        );

        let untyped = PageAttributes {
            has_schema: true,
            ..attrs()
        };
        assert_eq!(
            structured_data(&untyped).finding.render(),
            "✅ Structured data present"
        );
    }

    #[test]
    fn language_strength_includes_code() {
        let declared = PageAttributes {
            language: Some("en-US".to_string()),
            ..attrs()
        };
        assert_eq!(
            language(&declared).finding.render(),
            "✅ Language declared (en-US)"
        );
        assert_eq!(language(&attrs()).points, 0);
    }

    #[test]
    fn image_alt_tiers() {
        let images = |total: usize, missing: usize| PageAttributes {
            images: total,
            images_without_alt: missing,
            images_with_alt: total - missing,
            ..attrs()
        };

        let none = image_alt_text(&images(0, 0));
        assert_eq!(none.points, 2);
        assert!(!none.finding.is_strength());

        assert_eq!(image_alt_text(&images(10, 0)).points, 5);
        assert_eq!(image_alt_text(&images(10, 2)).points, 3);

        // Exactly 30% missing is not "under 30%"
        let thirty = image_alt_text(&images(10, 3));
        assert_eq!(thirty.points, 1);
        assert_eq!(
            thirty.finding.render(),
            "❌ 3 out of 10 images missing alt text"
        );
    }

    #[test]
    fn open_graph_tiers() {
        let two = PageAttributes {
            og_title: Some("Title".to_string()),
            og_description: Some("Description".to_string()),
            ..attrs()
        };
        let outcome = open_graph(&two);
        assert_eq!(outcome.points, 1);
        assert!(outcome.finding.render().contains("2/3"));

        let three = PageAttributes {
            og_image: Some("https://example.com/og.png".to_string()),
            ..two
        };
        let outcome = open_graph(&three);
        assert_eq!(outcome.points, 3);
        assert!(outcome.finding.is_strength());

        assert_eq!(open_graph(&attrs()).points, 0);
    }

    #[test]
    fn external_links_never_score() {
        let linked = PageAttributes {
            external_links: 3,
            ..attrs()
        };
        let outcome = external_links(&linked);
        assert_eq!(outcome.points, 0);
        assert_eq!(
            outcome.finding.render(),
            "✅ Has 3 external links (good for credibility)"
        );
        assert!(!external_links(&attrs()).finding.is_strength());
    }

    #[test]
    fn format_seconds_keeps_one_decimal() {
        assert_eq!(format_seconds(2.0), "2.0");
        assert_eq!(format_seconds(1.2), "1.2");
        assert_eq!(format_seconds(3.45), "3.45");
    }
}
