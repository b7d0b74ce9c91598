use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("Empty attraction pool: need at least one attraction in any bucket")]
    EmptyPool,

    #[error("Invalid trip length: {0} (must be at least 1 day)")]
    InvalidDays(usize),

    #[error("Day {0} not found in plan")]
    DayNotFound(u32),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid surprise level: {0} (must be between 0.0 and 1.0)")]
    InvalidSurpriseLevel(f64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ItineraryError {
    /// Precondition violations the caller is expected to prevent.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, ItineraryError::Json(_))
    }
}
