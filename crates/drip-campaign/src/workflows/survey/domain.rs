use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for survey questions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for response options; referenced globally by paths.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionId(pub String);

/// Identifier wrapper for routing paths.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathId(pub String);

/// Identifier wrapper for registered surveys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SurveyId(pub String);

macro_rules! display_id {
    ($($name:ident),+) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

display_id!(QuestionId, OptionId, PathId, SurveyId);

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for PathId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single question in a survey node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(default)]
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// Options attached to the question; empty for free-text and numeric questions.
    pub fn options(&self) -> &[ResponseOption] {
        match &self.kind {
            QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
                options
            }
            QuestionKind::FreeText | QuestionKind::Numeric => &[],
        }
    }

    pub fn is_scoreable(&self) -> bool {
        self.kind.is_choice()
    }

    pub fn is_single_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::SingleChoice { .. })
    }
}

/// Question type; only the choice variants own options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice {
        #[serde(default)]
        options: Vec<ResponseOption>,
    },
    MultiChoice {
        #[serde(default)]
        options: Vec<ResponseOption>,
    },
    FreeText,
    Numeric,
}

impl QuestionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice { .. } => "single-choice",
            QuestionKind::MultiChoice { .. } => "multi-choice",
            QuestionKind::FreeText => "free-text",
            QuestionKind::Numeric => "numeric",
        }
    }

    pub const fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionKind::SingleChoice { .. } | QuestionKind::MultiChoice { .. }
        )
    }
}

/// Selectable answer owned by exactly one choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOption {
    pub id: OptionId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub allows_text: bool,
}

/// Numeric-question bound carried with a path. Never consulted by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCondition {
    pub question_id: QuestionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// Boolean rule set: AND over `require_all`, OR over `require_any`, NOT over `require_none`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedRules {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub require_all: Vec<OptionId>,
    #[serde(default)]
    pub require_any: Vec<OptionId>,
    #[serde(default)]
    pub require_none: Vec<OptionId>,
}

impl AdvancedRules {
    pub fn has_requirements(&self) -> bool {
        !(self.require_all.is_empty()
            && self.require_any.is_empty()
            && self.require_none.is_empty())
    }

    /// Enabled with at least one non-empty list.
    pub fn is_active(&self) -> bool {
        self.enabled && self.has_requirements()
    }
}

/// Routing destination a respondent may be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePath {
    pub id: PathId,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range_conditions: Vec<RangeCondition>,
    #[serde(default)]
    pub mapped_options: Vec<OptionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_rules: Option<AdvancedRules>,
}

impl ResponsePath {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: PathId(id.into()),
            label: label.into(),
            color: None,
            score_min: None,
            score_max: None,
            range_conditions: Vec::new(),
            mapped_options: Vec::new(),
            advanced_rules: None,
        }
    }

    pub fn has_score_threshold(&self) -> bool {
        self.score_min.is_some() || self.score_max.is_some()
    }

    pub fn advanced_rules_enabled(&self) -> bool {
        self.advanced_rules
            .as_ref()
            .map(|rules| rules.enabled)
            .unwrap_or(false)
    }
}

/// Flat, unordered set of selected option ids across every question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections(BTreeSet<OptionId>);

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, option: &OptionId) -> bool {
        self.0.contains(option)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, option: OptionId) -> bool {
        self.0.insert(option)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionId> {
        self.0.iter()
    }
}

impl FromIterator<OptionId> for Selections {
    fn from_iter<I: IntoIterator<Item = OptionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for Selections {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(OptionId::from).collect()
    }
}

/// Complete survey configuration: questions plus the paths respondents are routed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDefinition {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub paths: Vec<ResponsePath>,
}
