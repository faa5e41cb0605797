//! Notion page-creation payloads.
//!
//! Only the property types this service writes are modelled: title, rich text,
//! number, and date. Property names are the Korean column names of the target database.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    /// `null` when no database is configured; Notion rejects the page in that case.
    pub database_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    pub text: TextContent,
}

impl RichText {
    fn plain(content: &str) -> Vec<Self> {
        vec![Self {
            text: TextContent {
                content: content.to_string(),
            },
        }]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextProperty {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberProperty {
    pub number: serde_json::Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateProperty {
    pub date: DateValue,
}

/// A `POST /v1/pages` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePage<P> {
    pub parent: Parent,
    pub properties: P,
}

/// Properties of a page written by the explain flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationProperties {
    #[serde(rename = "개념")]
    pub concept: TitleProperty,
    #[serde(rename = "설명")]
    pub explanation: RichTextProperty,
}

/// Properties of a manually saved study record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRecordProperties {
    #[serde(rename = "과목")]
    pub subject: TitleProperty,
    #[serde(rename = "개념")]
    pub concept: RichTextProperty,
    #[serde(rename = "중요도")]
    pub importance: NumberProperty,
    #[serde(rename = "메모")]
    pub memo: RichTextProperty,
    #[serde(rename = "복습 날짜", skip_serializing_if = "Option::is_none", default)]
    pub review_date: Option<DateProperty>,
}

/// A study record as submitted to `/save_study`, after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyRecord {
    pub subject: String,
    pub concept: String,
    pub importance: serde_json::Number,
    pub review_date: Option<String>,
    pub memo: String,
}

pub fn explanation_page(
    database_id: Option<&str>,
    concept: &str,
    explanation: &str,
) -> CreatePage<ExplanationProperties> {
    CreatePage {
        parent: Parent {
            database_id: database_id.map(str::to_string),
        },
        properties: ExplanationProperties {
            concept: TitleProperty {
                title: RichText::plain(concept),
            },
            explanation: RichTextProperty {
                rich_text: RichText::plain(explanation),
            },
        },
    }
}

/// Build a study-record page. The date property is present only for a non-empty review date.
pub fn study_record_page(
    database_id: Option<&str>,
    record: &StudyRecord,
) -> CreatePage<StudyRecordProperties> {
    let review_date = record
        .review_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|start| DateProperty {
            date: DateValue {
                start: start.to_string(),
            },
        });

    CreatePage {
        parent: Parent {
            database_id: database_id.map(str::to_string),
        },
        properties: StudyRecordProperties {
            subject: TitleProperty {
                title: RichText::plain(&record.subject),
            },
            concept: RichTextProperty {
                rich_text: RichText::plain(&record.concept),
            },
            importance: NumberProperty {
                number: record.importance.clone(),
            },
            memo: RichTextProperty {
                rich_text: RichText::plain(&record.memo),
            },
            review_date,
        },
    }
}
