//! Lecture data structures.

use serde::{Deserialize, Serialize};

/// A lecture summary link discovered on a course page.
///
/// Identity is the `url`; the `name` is opaque display text captured
/// verbatim from the page markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lecture {
    /// Display text of the link
    pub name: String,

    /// Link target, captured as-is (may be relative)
    pub url: String,
}

/// A lecture not yet present in the seen-set, destined for notification.
///
/// Ephemeral: exists only for the duration of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLecture {
    /// Display name of the source the lecture was found on
    pub source_name: String,

    /// Display text of the lecture link
    pub lecture_name: String,

    /// Link target
    pub url: String,
}

impl NewLecture {
    /// Format one notification body line.
    pub fn format(&self) -> String {
        format!(
            "{}: {}, url: {}",
            self.source_name, self.lecture_name, self.url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let new = NewLecture {
            source_name: "Complexity".to_string(),
            lecture_name: "Lecture 1".to_string(),
            url: "/files/l1.pdf".to_string(),
        };
        assert_eq!(new.format(), "Complexity: Lecture 1, url: /files/l1.pdf");
    }
}
