use std::collections::HashSet;

use super::domain::{OptionId, PathId, QuestionId, SurveyDefinition};
use crate::config::IntakeLimits;

/// Structural problems that stop a survey definition from being accepted.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionViolation {
    #[error("{entity} identifier must not be empty")]
    EmptyIdentifier { entity: &'static str },
    #[error("question '{0}' is defined more than once")]
    DuplicateQuestion(QuestionId),
    #[error("question '{question}' repeats option '{option}'")]
    DuplicateOption {
        question: QuestionId,
        option: OptionId,
    },
    #[error("path '{0}' is defined more than once")]
    DuplicatePath(PathId),
    #[error("survey has {found} questions (limit {max})")]
    TooManyQuestions { max: usize, found: usize },
    #[error("survey has {found} paths (limit {max})")]
    TooManyPaths { max: usize, found: usize },
    #[error("question '{question}' has {found} options (limit {max})")]
    TooManyOptions {
        question: QuestionId,
        max: usize,
        found: usize,
    },
}

/// Boundary check applied before a definition reaches the routing engine.
///
/// Only structural shape is enforced here; routing-logic concerns stay advisory
/// and are reported by the validator instead.
#[derive(Debug, Clone, Default)]
pub struct SurveyGuard {
    limits: IntakeLimits,
}

impl SurveyGuard {
    pub fn with_limits(limits: IntakeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    pub fn admit(
        &self,
        definition: SurveyDefinition,
    ) -> Result<SurveyDefinition, DefinitionViolation> {
        self.check(&definition)?;
        Ok(definition)
    }

    fn check(&self, definition: &SurveyDefinition) -> Result<(), DefinitionViolation> {
        if definition.questions.len() > self.limits.max_questions {
            return Err(DefinitionViolation::TooManyQuestions {
                max: self.limits.max_questions,
                found: definition.questions.len(),
            });
        }

        if definition.paths.len() > self.limits.max_paths {
            return Err(DefinitionViolation::TooManyPaths {
                max: self.limits.max_paths,
                found: definition.paths.len(),
            });
        }

        let mut question_ids = HashSet::new();
        for question in &definition.questions {
            if question.id.0.trim().is_empty() {
                return Err(DefinitionViolation::EmptyIdentifier { entity: "question" });
            }
            if !question_ids.insert(&question.id) {
                return Err(DefinitionViolation::DuplicateQuestion(question.id.clone()));
            }

            let options = question.options();
            if options.len() > self.limits.max_options_per_question {
                return Err(DefinitionViolation::TooManyOptions {
                    question: question.id.clone(),
                    max: self.limits.max_options_per_question,
                    found: options.len(),
                });
            }

            let mut option_ids = HashSet::new();
            for option in options {
                if option.id.0.trim().is_empty() {
                    return Err(DefinitionViolation::EmptyIdentifier { entity: "option" });
                }
                if !option_ids.insert(&option.id) {
                    return Err(DefinitionViolation::DuplicateOption {
                        question: question.id.clone(),
                        option: option.id.clone(),
                    });
                }
            }
        }

        let mut path_ids = HashSet::new();
        for path in &definition.paths {
            if path.id.0.trim().is_empty() {
                return Err(DefinitionViolation::EmptyIdentifier { entity: "path" });
            }
            if !path_ids.insert(&path.id) {
                return Err(DefinitionViolation::DuplicatePath(path.id.clone()));
            }
        }

        Ok(())
    }
}
