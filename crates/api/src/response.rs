//! Success envelope shared by all handlers.

use serde::Serialize;

/// `{ "success": true, ...T }`.
///
/// The payload's fields are flattened next to `success`, so `T` must
/// serialize as a map.
///
/// ```ignore
/// Ok(Json(Success::new(SubjectsBody { models })))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}
