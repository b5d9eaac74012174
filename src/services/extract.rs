// src/services/extract.rs

//! Lecture link extraction.
//!
//! Pulls lecture summary links out of a course page using a fixed CSS
//! selector chain.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{ExtractionConfig, Lecture};

/// Extractor holding a parsed selector.
pub struct LectureExtractor {
    selector: Selector,
    reverse_display_text: bool,
}

impl LectureExtractor {
    /// Build an extractor from extraction settings.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let selector = parse_selector(&config.lecture_selector)?;
        Ok(Self {
            selector,
            reverse_display_text: config.reverse_display_text,
        })
    }

    /// Extract lecture links from raw markup, in document order.
    ///
    /// The href is captured verbatim: no validation, no resolution of
    /// relative URLs. Anchors without an href are skipped. Zero matches
    /// is a valid result, not an error.
    pub fn extract(&self, html: &str) -> Vec<Lecture> {
        let document = Html::parse_document(html);
        let mut lectures = Vec::new();

        for element in document.select(&self.selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let text: String = element.text().collect();
            let name = if self.reverse_display_text {
                text.chars().rev().collect()
            } else {
                text
            };
            lectures.push(Lecture {
                name,
                url: href.to_string(),
            });
        }

        lectures
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
