// ABOUTME: Category form draft, its validation rules and the parent picker
// ABOUTME: Parent checks walk the whole ancestor chain so no cycle can be saved

use async_trait::async_trait;
use shopx_core::constants::{
    CATEGORY_DESCRIPTION_MAX, CATEGORY_NAME_MAX, CATEGORY_NAME_MIN, SEO_DESCRIPTION_MAX,
    SEO_TITLE_MAX,
};
use shopx_core::validation::{char_len, check_max_len};
use shopx_core::{
    is_ancestor_or_self, is_valid_url, non_blank, Category, CategoryPayload, CategoryStatus,
    ValidationErrors,
};
use shopx_storage::{CategoryRepository, StorageResult};

use crate::controller::FormModel;
use crate::slug::SlugField;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: SlugField,
    pub description: String,
    pub image: String,
    pub parent_id: String,
    pub status: CategoryStatus,
    pub seo_title: String,
    pub seo_description: String,
}

impl CategoryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: SlugField::manual(category.slug.clone()),
            description: category.description.clone().unwrap_or_default(),
            image: category.image.clone().unwrap_or_default(),
            parent_id: category
                .parent_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            status: category.status,
            seo_title: category.seo_title.clone().unwrap_or_default(),
            seo_description: category.seo_description.clone().unwrap_or_default(),
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.slug.on_name_change(name);
    }

    pub fn set_slug(&mut self, slug: &str) {
        self.slug.edit(slug);
    }

    /// Checks every rule. `editing_id` is the category being edited, if
    /// any; `categories` is the known list used for parent checks.
    pub fn validate(
        &self,
        editing_id: Option<u64>,
        categories: &[Category],
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name_len = char_len(self.name.trim());
        if name_len == 0 {
            errors.add("name", "Category name is required");
        } else if name_len < CATEGORY_NAME_MIN {
            errors.add("name", "Category name must be at least 3 characters");
        } else if char_len(&self.name) > CATEGORY_NAME_MAX {
            errors.add("name", "Category name must be less than 100 characters");
        }

        if self.slug.value().trim().is_empty() {
            errors.add("slug", "Slug is required");
        }

        check_max_len(
            &mut errors,
            "description",
            &self.description,
            CATEGORY_DESCRIPTION_MAX,
            "Description must be less than 300 characters",
        );

        let image = self.image.trim();
        if !image.is_empty() && !is_valid_url(image) {
            errors.add("image", "Please enter a valid image URL");
        }

        check_max_len(
            &mut errors,
            "seoTitle",
            &self.seo_title,
            SEO_TITLE_MAX,
            "SEO title must be less than 60 characters",
        );
        check_max_len(
            &mut errors,
            "seoDescription",
            &self.seo_description,
            SEO_DESCRIPTION_MAX,
            "SEO description must be less than 160 characters",
        );

        let parent = self.parent_id.trim();
        if !parent.is_empty() {
            match parent.parse::<u64>() {
                Err(_) => errors.add("parentId", "Please select a valid parent category"),
                Ok(parent_id) if Some(parent_id) == editing_id => {
                    errors.add("parentId", "Category cannot be its own parent")
                }
                Ok(parent_id) if !categories.iter().any(|c| c.id == parent_id) => {
                    errors.add("parentId", "Parent category does not exist")
                }
                Ok(parent_id) => {
                    if let Some(id) = editing_id {
                        if is_ancestor_or_self(categories, parent_id, id) {
                            errors.add(
                                "parentId",
                                "Category cannot be placed under one of its subcategories",
                            );
                        }
                    }
                }
            }
        }

        errors.into_result()
    }

    /// Payload for submission; blank fields are left out
    pub fn normalize(&self) -> CategoryPayload {
        CategoryPayload {
            name: non_blank(&self.name),
            slug: non_blank(self.slug.value()),
            description: non_blank(&self.description),
            image: non_blank(&self.image),
            parent_id: self.parent_id.trim().parse().ok(),
            status: Some(self.status),
            seo_title: non_blank(&self.seo_title),
            seo_description: non_blank(&self.seo_description),
        }
    }
}

/// Categories that may be picked as the parent of `editing`: everything
/// except the category itself and its descendants at any depth.
pub fn available_parents(categories: &[Category], editing: Option<u64>) -> Vec<&Category> {
    categories
        .iter()
        .filter(|c| match editing {
            Some(id) => !is_ancestor_or_self(categories, c.id, id),
            None => true,
        })
        .collect()
}

#[async_trait]
impl FormModel for CategoryDraft {
    type Entity = Category;
    type Payload = CategoryPayload;
    type Context = Vec<Category>;
    type Store = dyn CategoryRepository;

    const KIND: &'static str = "category";

    fn defaults() -> Self {
        Self::new()
    }

    fn from_entity(entity: &Category) -> Self {
        Self::from_category(entity)
    }

    fn entity_id(entity: &Category) -> u64 {
        entity.id
    }

    fn set_name(&mut self, name: &str) {
        CategoryDraft::set_name(self, name)
    }

    fn set_slug(&mut self, slug: &str) {
        CategoryDraft::set_slug(self, slug)
    }

    fn validate(
        &self,
        editing_id: Option<u64>,
        context: &Vec<Category>,
    ) -> Result<(), ValidationErrors> {
        CategoryDraft::validate(self, editing_id, context)
    }

    fn normalize(&self) -> CategoryPayload {
        CategoryDraft::normalize(self)
    }

    async fn persist(
        store: &Self::Store,
        id: Option<u64>,
        payload: CategoryPayload,
    ) -> StorageResult<Category> {
        match id {
            Some(id) => store.update_category(id, payload).await,
            None => store.create_category(payload).await,
        }
    }
}
