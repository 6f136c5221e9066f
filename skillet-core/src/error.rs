//! Pipeline-level errors.

use thiserror::Error;

use crate::completion::CompletionError;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request had no usable ingredients after cleaning.
    #[error("at least one ingredient is required")]
    EmptyIngredients,
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// The completion arrived but was not the JSON shape the prompt asked
    /// for. Worth retrying.
    #[error("could not understand the generated recipes, please try again: {0}")]
    MalformedResponse(String),
}
