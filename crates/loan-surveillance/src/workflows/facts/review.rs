use super::mapping::{locate_sections, RuleSection};
use super::normalizer::normalize_status;
use serde::Serialize;
use serde_json::{Map, Value};

/// One question of the red flag review questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    pub question: String,
    pub answer: Option<String>,
    pub status: Option<String>,
}

impl ReviewItem {
    pub fn is_flagged(&self) -> bool {
        self.status.as_deref() == Some("fail")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSection {
    pub section: RuleSection,
    pub title: &'static str,
    pub source_key: String,
    pub items: Vec<ReviewItem>,
    pub flagged: usize,
}

/// Question/answer/status rows for every rule section of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedFlagReview {
    pub sections: Vec<ReviewSection>,
}

impl RedFlagReview {
    pub fn from_document(document: &Value) -> Self {
        let sections = locate_sections(document)
            .into_iter()
            .map(|located| {
                let items = review_items(located.body);
                let flagged = items.iter().filter(|item| item.is_flagged()).count();
                ReviewSection {
                    section: located.section,
                    title: located.section.label(),
                    source_key: located.key.to_string(),
                    items,
                    flagged,
                }
            })
            .collect();

        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.items.is_empty())
    }

    pub fn flagged_count(&self) -> usize {
        self.sections.iter().map(|section| section.flagged).sum()
    }
}

fn review_items(body: &Map<String, Value>) -> Vec<ReviewItem> {
    let questions = column(body, "question");
    let answers = column(body, "answer");
    let statuses = column(body, "status");

    questions
        .iter()
        .enumerate()
        .filter_map(|(index, question)| {
            let question = question.as_str()?.trim();
            if question.is_empty() {
                return None;
            }
            let answer = answers
                .get(index)
                .and_then(Value::as_str)
                .map(|answer| answer.trim().to_string());
            let status = statuses
                .get(index)
                .and_then(Value::as_str)
                .map(normalize_status)
                .filter(|status| !status.is_empty());

            Some(ReviewItem {
                question: question.to_string(),
                answer,
                status,
            })
        })
        .collect()
}

fn column<'a>(body: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    body.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
