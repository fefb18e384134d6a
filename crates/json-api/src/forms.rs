//! Form submission errors.

use salvo::http::StatusError;

use cuantovale_app::views::FormError;

use crate::{prices, products};

/// Map a rejected form submission. Validation messages are passed through as
/// the brief so clients can show them next to the form.
pub(crate) fn into_status_error(error: FormError) -> StatusError {
    match error {
        FormError::Invalid(invalid) => StatusError::bad_request().brief(invalid.to_string()),
        FormError::SignedOut => StatusError::unauthorized().brief(FormError::SignedOut.to_string()),
        FormError::Product(source) => products::errors::into_status_error(source),
        FormError::Price(source) => prices::errors::into_status_error(source),
    }
}
