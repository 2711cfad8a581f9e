mod razas;

pub use razas::{ApiErrorBody, ApiErrorObject, RazasError};

pub type RazasResult<T> = Result<T, RazasError>;
