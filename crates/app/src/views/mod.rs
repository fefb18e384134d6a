//! View models
//!
//! One model per screen element. Each holds the state a renderer needs and
//! exposes the user actions as methods; none of them draw anything.

use cuantovale::drafts::DraftError;
use thiserror::Error;

use crate::domain::{prices::PricesServiceError, products::ProductsServiceError};

pub mod price_form;
pub mod price_history;
pub mod price_trend;
pub mod product_form;
pub mod registry;
pub mod shell;

pub use price_form::{PriceForm, PriceFormOutcome};
pub use price_history::PriceHistory;
pub use price_trend::PriceTrend;
pub use product_form::ProductForm;
pub use registry::ProductRegistry;
pub use shell::{MENU, MenuItem, Shell};

/// Why a form submission did not go through.
///
/// The `Display` output is the message shown next to the form.
#[derive(Debug, Error)]
pub enum FormError {
    /// The input was rejected before anything was written.
    #[error(transparent)]
    Invalid(#[from] DraftError),

    #[error("Debe iniciar sesión para continuar.")]
    SignedOut,

    /// Storing the product failed.
    #[error("Error al agregar el producto: {0}")]
    Product(#[source] ProductsServiceError),

    /// Storing the price failed.
    #[error("Error al agregar el precio: {0}")]
    Price(#[source] PricesServiceError),
}

/// Feedback shown under a form after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    /// Shown in green after a successful save.
    Success(String),

    /// Shown in red; the inputs are kept.
    Error(String),
}

impl FormMessage {
    /// The message as shown.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<&FormError> for FormMessage {
    fn from(error: &FormError) -> Self {
        Self::Error(error.to_string())
    }
}
