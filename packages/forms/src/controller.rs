// ABOUTME: Generic lifecycle of a single entity form: open, edit, validate, submit, close
// ABOUTME: Persistence is reached through the repository traits and may be cancelled mid-flight

use async_trait::async_trait;
use serde::Serialize;
use shopx_core::ValidationErrors;
use shopx_storage::{StorageError, StorageResult};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Where a form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    Closed,
    Editing,
    Validating,
    Submitting,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Submission failed: {0}")]
    Persistence(#[from] StorageError),

    #[error("Form is not open for editing")]
    NotEditing,

    #[error("Submission cancelled")]
    Cancelled,
}

pub type FormResult<T> = Result<T, FormError>;

/// A draft entity the controller can drive.
///
/// Implemented by `ProductDraft` and `CategoryDraft`. `Context` carries
/// whatever validation needs beyond the draft itself, e.g. the category
/// list for parent checks.
#[async_trait]
pub trait FormModel: Clone + Send + Sync + Sized {
    type Entity: Clone + Send + Sync;
    type Payload: Send;
    type Context: Send + Sync;
    type Store: ?Sized + Send + Sync;

    /// Entity name used in log lines
    const KIND: &'static str;

    fn defaults() -> Self;

    /// Draft pre-filled from a stored entity, slug locked to `Manual`
    fn from_entity(entity: &Self::Entity) -> Self;

    fn entity_id(entity: &Self::Entity) -> u64;

    fn set_name(&mut self, name: &str);

    fn set_slug(&mut self, slug: &str);

    fn validate(
        &self,
        editing_id: Option<u64>,
        context: &Self::Context,
    ) -> Result<(), ValidationErrors>;

    fn normalize(&self) -> Self::Payload;

    /// Creates when `id` is `None`, merge-updates otherwise
    async fn persist(
        store: &Self::Store,
        id: Option<u64>,
        payload: Self::Payload,
    ) -> StorageResult<Self::Entity>;
}

struct OpenForm<M: FormModel> {
    draft: M,
    editing_id: Option<u64>,
    context: M::Context,
}

pub struct FormController<M: FormModel> {
    phase: FormPhase,
    open: Option<OpenForm<M>>,
    errors: ValidationErrors,
    last_error: Option<FormError>,
}

impl<M: FormModel> Default for FormController<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: FormModel> FormController<M> {
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Closed,
            open: None,
            errors: ValidationErrors::new(),
            last_error: None,
        }
    }

    /// Starts a blank draft for a new entity
    pub fn open_new(&mut self, context: M::Context) {
        debug!("Opening new {} form", M::KIND);
        self.start(M::defaults(), None, context);
    }

    /// Starts a draft copied from `entity`. Its slug is kept as-is even if
    /// the name is edited afterwards.
    pub fn open_existing(&mut self, entity: &M::Entity, context: M::Context) {
        let id = M::entity_id(entity);
        debug!("Opening {} form for {}", M::KIND, id);
        self.start(M::from_entity(entity), Some(id), context);
    }

    fn start(&mut self, draft: M, editing_id: Option<u64>, context: M::Context) {
        self.open = Some(OpenForm {
            draft,
            editing_id,
            context,
        });
        self.errors = ValidationErrors::new();
        self.last_error = None;
        self.phase = FormPhase::Editing;
    }

    /// Discards the draft
    pub fn close(&mut self) {
        self.open = None;
        self.errors = ValidationErrors::new();
        self.phase = FormPhase::Closed;
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    /// Id of the entity being edited; `None` for a new one or a closed form
    pub fn editing_id(&self) -> Option<u64> {
        self.open.as_ref().and_then(|open| open.editing_id)
    }

    pub fn draft(&self) -> Option<&M> {
        self.open.as_ref().map(|open| &open.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut M> {
        self.open.as_mut().map(|open| &mut open.draft)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn last_error(&self) -> Option<&FormError> {
        self.last_error.as_ref()
    }

    /// Edits one field and clears the error shown for it
    pub fn edit(&mut self, field: &str, change: impl FnOnce(&mut M)) -> FormResult<()> {
        let open = self.open.as_mut().ok_or(FormError::NotEditing)?;
        change(&mut open.draft);
        self.errors.clear_field(field);
        Ok(())
    }

    /// Updates the name, regenerating the slug while it is still automatic
    pub fn set_name(&mut self, name: &str) -> FormResult<()> {
        self.edit("name", |draft| draft.set_name(name))
    }

    /// Hand edit of the slug; stops name-driven regeneration for the session
    pub fn set_slug(&mut self, slug: &str) -> FormResult<()> {
        self.edit("slug", |draft| draft.set_slug(slug))
    }

    /// Runs the rule set and records per-field errors
    pub fn validate(&mut self) -> FormResult<()> {
        let open = self.open.as_ref().ok_or(FormError::NotEditing)?;
        self.phase = FormPhase::Validating;
        let outcome = open.draft.validate(open.editing_id, &open.context);
        self.phase = FormPhase::Editing;

        match outcome {
            Ok(()) => {
                self.errors = ValidationErrors::new();
                Ok(())
            }
            Err(errors) => {
                debug!("{} form rejected: {}", M::KIND, errors);
                self.errors = errors.clone();
                Err(FormError::Validation(errors))
            }
        }
    }

    /// Validates, normalizes and hands the payload to `store`.
    ///
    /// On success the form closes and the stored entity is returned. On a
    /// persistence failure the form stays open with the draft intact.
    pub async fn submit(&mut self, store: &M::Store) -> FormResult<M::Entity> {
        let (editing_id, payload) = self.prepare()?;
        let result = M::persist(store, editing_id, payload).await;
        self.finish(editing_id, result)
    }

    /// Like [`submit`](Self::submit), but gives up when `cancel` fires.
    /// A cancelled submission is discarded and the form is closed.
    pub async fn submit_with_cancel(
        &mut self,
        store: &M::Store,
        cancel: &CancellationToken,
    ) -> FormResult<M::Entity> {
        let (editing_id, payload) = self.prepare()?;

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = M::persist(store, editing_id, payload) => Some(result),
        };

        match result {
            Some(result) => self.finish(editing_id, result),
            None => {
                info!("{} submission cancelled", M::KIND);
                self.close();
                self.last_error = Some(FormError::Cancelled);
                Err(FormError::Cancelled)
            }
        }
    }

    fn prepare(&mut self) -> FormResult<(Option<u64>, M::Payload)> {
        if self.phase != FormPhase::Editing {
            return Err(FormError::NotEditing);
        }
        self.last_error = None;
        self.validate()?;

        let open = self.open.as_ref().ok_or(FormError::NotEditing)?;
        let payload = open.draft.normalize();
        self.phase = FormPhase::Submitting;
        Ok((open.editing_id, payload))
    }

    fn finish(
        &mut self,
        editing_id: Option<u64>,
        result: StorageResult<M::Entity>,
    ) -> FormResult<M::Entity> {
        match result {
            Ok(entity) => {
                match editing_id {
                    Some(id) => info!("Updated {} {}", M::KIND, id),
                    None => info!("Created {} {}", M::KIND, M::entity_id(&entity)),
                }
                self.close();
                Ok(entity)
            }
            Err(e) => {
                warn!("{} submission failed: {}", M::KIND, e);
                if let StorageError::Validation(errors) = &e {
                    self.errors = errors.clone();
                }
                let error = FormError::Persistence(e);
                self.phase = FormPhase::Editing;
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }
}
