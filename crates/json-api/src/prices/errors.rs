//! Price Errors

use salvo::http::StatusError;
use tracing::error;

use cuantovale_app::domain::prices::PricesServiceError;

pub(crate) fn into_status_error(error: PricesServiceError) -> StatusError {
    match error {
        PricesServiceError::AlreadyExists => StatusError::conflict().brief("Price already exists"),
        PricesServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        PricesServiceError::MissingRequiredData | PricesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid price payload")
        }
        PricesServiceError::Sql(source) => {
            error!("price storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
