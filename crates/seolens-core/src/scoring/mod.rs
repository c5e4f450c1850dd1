//! Deterministic SEO scoring
//!
//! [`score`] folds the rubric tables in [`rubric::RUBRICS`] over a page's
//! attributes, in order, into a [`ScoreReport`]. Scoring is pure: no I/O, no
//! shared state, and the same input always yields an identical report.

pub mod rubric;

use tracing::debug;

use crate::types::{Category, CategoryScores, PageAttributes, PageData, ScoreReport};
use rubric::{Finding, Rubric, RUBRICS};

/// Score a page, short-circuiting to a zero report when it could not be fetched
pub fn score(page: &PageData) -> ScoreReport {
    match page {
        PageData::Ready(attrs) => score_attributes(attrs),
        PageData::Error(message) => ScoreReport::failed(message.clone()),
    }
}

/// Score already-extracted attributes
pub fn score_attributes(attrs: &PageAttributes) -> ScoreReport {
    let mut acc = Accumulator::default();
    for rubric in RUBRICS {
        acc.apply(rubric, attrs);
    }
    let report = acc.finish();

    debug!(
        url = %attrs.url,
        score = report.score,
        issues = report.issues.len(),
        strengths = report.strengths.len(),
        "scored page"
    );
    report
}

/// `round(points / max * 100)`, ties to even
pub fn percentage(points: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    (f64::from(points) / f64::from(max) * 100.0).round_ties_even() as u32
}

#[derive(Default)]
struct Accumulator {
    scores: CategoryScores,
    issues: Vec<String>,
    strengths: Vec<String>,
}

impl Accumulator {
    fn apply(&mut self, rubric: &Rubric, attrs: &PageAttributes) {
        let mut points = 0;
        for check in rubric.checks {
            let outcome = (check.evaluate)(attrs);
            debug_assert!(outcome.points <= check.max_points, "{}", check.name);
            points += outcome.points;

            let line = outcome.finding.render();
            match outcome.finding {
                Finding::Strength(_) => self.strengths.push(line),
                Finding::Issue { .. } => self.issues.push(line),
            }
        }

        if let Some(category) = rubric.category {
            self.scores.set(category, points);
        }
    }

    fn finish(self) -> ScoreReport {
        let mut percentages = CategoryScores::default();
        for category in Category::ALL {
            percentages.set(
                category,
                percentage(self.scores.get(category), category.max_points()),
            );
        }

        ScoreReport {
            score: self.scores.total(),
            category_scores: self.scores,
            category_percentages: percentages,
            issues: self.issues,
            strengths: self.strengths,
        }
    }
}
