//! Product creation form.

use std::{fmt, sync::Arc};

use cuantovale::drafts::ProductDraft;
use tracing::info;

use crate::{
    domain::products::{ProductsService, data::NewProduct, records::ProductRecord},
    views::{FormError, FormMessage},
};

/// Confirmation shown after a product is stored.
pub const PRODUCT_ADDED: &str = "Producto agregado exitosamente.";

/// The add-product modal: a name and a unit, both required.
pub struct ProductForm {
    products: Arc<dyn ProductsService>,
    draft: ProductDraft,
    message: Option<FormMessage>,
    saving: bool,
}

impl fmt::Debug for ProductForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductForm")
            .field("draft", &self.draft)
            .field("message", &self.message)
            .field("saving", &self.saving)
            .finish_non_exhaustive()
    }
}

impl ProductForm {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self {
            products,
            draft: ProductDraft::default(),
            message: None,
            saving: false,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.draft.unit = unit.into();
    }

    /// Confirmation or error from the last submission.
    #[must_use]
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Inputs are disabled while a submission is in flight.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Validate and store the product, stamped with the current time.
    ///
    /// On success the inputs are cleared and a confirmation is shown. On any
    /// failure the inputs are kept and the error becomes the form message.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] without writing anything when a field is
    /// blank, or [`FormError::Product`] when the write fails.
    pub async fn submit(&mut self) -> Result<ProductRecord, FormError> {
        self.message = None;
        self.saving = true;

        let result = self.save().await;

        self.saving = false;

        match &result {
            Ok(product) => {
                info!(product = %product.uuid, name = %product.name, "product added");

                self.draft = ProductDraft::default();
                self.message = Some(FormMessage::Success(PRODUCT_ADDED.to_string()));
            }
            Err(error) => self.message = Some(FormMessage::from(error)),
        }

        result
    }

    async fn save(&self) -> Result<ProductRecord, FormError> {
        let product = self.draft.validate()?;

        self.products
            .create_product(NewProduct::from_valid(product))
            .await
            .map_err(FormError::Product)
    }
}
