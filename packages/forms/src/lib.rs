//! # ShopX Forms
//!
//! Draft state for the product and category forms: slug derivation, tag
//! and image list editing, validation, normalization into partial-update
//! payloads, and a generic controller that submits through the storage
//! repositories.

pub mod category;
pub mod controller;
pub mod images;
pub mod product;
pub mod slug;
pub mod tags;

// Re-export drafts
pub use category::{available_parents, CategoryDraft};
pub use product::ProductDraft;

// Re-export controller
pub use controller::{FormController, FormError, FormModel, FormPhase, FormResult};

// Re-export field helpers
pub use images::ImageList;
pub use slug::{SlugField, SlugState};
pub use tags::TagList;

pub type ProductForm = FormController<ProductDraft>;
pub type CategoryForm = FormController<CategoryDraft>;
