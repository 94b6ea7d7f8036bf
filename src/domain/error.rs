use thiserror::Error;

use super::draft::RequiredField;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("required fields are empty: {}", join_fields(.0))]
    Missing(Vec<RequiredField>),
    #[error("cover `{file_name}` is not an image (detected `{content_type}`)")]
    NotAnImage {
        file_name: String,
        content_type: String,
    },
    #[error("cover `{file_name}` is empty")]
    EmptyCover { file_name: String },
}

impl DraftError {
    pub fn missing(fields: Vec<RequiredField>) -> Self {
        Self::Missing(fields)
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
