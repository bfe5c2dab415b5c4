use std::io::Read;
use std::path::Path;

use super::domain::SurveyDefinition;
use super::intake::{DefinitionViolation, SurveyGuard};

#[derive(Debug)]
pub enum SurveyImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Definition(DefinitionViolation),
}

impl std::fmt::Display for SurveyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyImportError::Io(err) => write!(f, "failed to read survey file: {}", err),
            SurveyImportError::Json(err) => write!(f, "invalid survey JSON: {}", err),
            SurveyImportError::Definition(err) => write!(f, "survey rejected: {}", err),
        }
    }
}

impl std::error::Error for SurveyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyImportError::Io(err) => Some(err),
            SurveyImportError::Json(err) => Some(err),
            SurveyImportError::Definition(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SurveyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SurveyImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<DefinitionViolation> for SurveyImportError {
    fn from(err: DefinitionViolation) -> Self {
        Self::Definition(err)
    }
}

/// Loads survey definitions exported by the campaign builder.
pub struct SurveyImporter {
    guard: SurveyGuard,
}

impl SurveyImporter {
    pub fn new(guard: SurveyGuard) -> Self {
        Self { guard }
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<SurveyDefinition, SurveyImportError> {
        let file = std::fs::File::open(path)?;
        self.load_reader(file)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<SurveyDefinition, SurveyImportError> {
        let definition: SurveyDefinition = serde_json::from_reader(reader)?;
        Ok(self.guard.admit(definition)?)
    }
}

impl Default for SurveyImporter {
    fn default() -> Self {
        Self::new(SurveyGuard::default())
    }
}
