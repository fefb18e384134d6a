//! Application shell.

use cuantovale::chart::DateFormat;
use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

use crate::{
    auth::User,
    context::AppContext,
    views::{FormError, ProductForm, ProductRegistry},
};

/// Shown in the header.
pub const APP_NAME: &str = "CuantoVale";
/// Dashboard heading.
pub const WELCOME: &str = "Bienvenido a CuantoVale";
/// Dashboard subheading.
pub const TAGLINE: &str = "Busca productos y compara precios en diferentes tiendas.";

/// A navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Text shown in the menu.
    pub label: &'static str,

    /// Route the entry points at.
    pub path: &'static str,
}

/// The navigation menu, in display order.
pub const MENU: [MenuItem; 5] = [
    MenuItem {
        label: "Dashboard",
        path: "/",
    },
    MenuItem {
        label: "Productos",
        path: "/productos",
    },
    MenuItem {
        label: "Precios",
        path: "/precios",
    },
    MenuItem {
        label: "Comparar",
        path: "/comparar",
    },
    MenuItem {
        label: "Administración",
        path: "/admin",
    },
];

/// Top-level state: who is signed in, the add-product modal, the search
/// text and the product registry.
#[derive(Debug)]
pub struct Shell {
    context: AppContext,
    user: watch::Receiver<Option<User>>,
    search: String,
    add_product: Option<ProductForm>,
    registry: ProductRegistry,
}

impl Shell {
    /// Mount the shell and the product registry beneath it.
    #[must_use]
    pub fn mount(context: AppContext, format: DateFormat) -> Self {
        Self {
            user: context.session.subscribe(),
            search: String::new(),
            add_product: None,
            registry: ProductRegistry::mount(context.clone(), "", format),
            context,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    /// Wait until someone signs in or out.
    ///
    /// Signing out closes the add-product modal. Returns `false` if the
    /// session is gone.
    pub async fn user_changed(&mut self) -> bool {
        if self.user.changed().await.is_err() {
            return false;
        }

        if self.user.borrow_and_update().is_none() {
            self.add_product = None;
        }

        true
    }

    #[must_use]
    pub fn menu(&self) -> &'static [MenuItem] {
        &MENU
    }

    /// Menu entries are placeholders; choosing one is only recorded.
    pub fn navigate(&self, path: &str) {
        info!(path, "navigate");
    }

    /// Open the add-product modal.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SignedOut`] when nobody is signed in.
    pub fn open_add_product(&mut self) -> Result<&mut ProductForm, FormError> {
        if self.user.borrow().is_none() {
            return Err(FormError::SignedOut);
        }

        Ok(self
            .add_product
            .insert(ProductForm::new(self.context.products.clone())))
    }

    /// The add-product modal, while open.
    #[must_use]
    pub fn add_product(&self) -> Option<&ProductForm> {
        self.add_product.as_ref()
    }

    pub fn add_product_mut(&mut self) -> Option<&mut ProductForm> {
        self.add_product.as_mut()
    }

    pub fn close_add_product(&mut self) {
        self.add_product = None;
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Search applies as the user types.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.registry.set_search(&self.search);
    }

    #[must_use]
    pub fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProductRegistry {
        &mut self.registry
    }
}
