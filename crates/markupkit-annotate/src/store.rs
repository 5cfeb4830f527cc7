//! Authoritative annotation list with edit sessions.
//!
//! Creating an annotation opens an edit session on it. Closing the session
//! with no text rolls the creation back, so an abandoned create leaves the
//! list unchanged. At most one edit session is open at a time; opening
//! another closes the current one under the same rule.

use markupkit_core::AnnotationError;

use crate::model::{Annotation, AnnotationId, AnnotationKind, Category, Priority};

/// What closing an edit session did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text and metadata were written.
    Committed,
    /// A never-committed annotation was removed; nothing to record.
    RolledBack,
    /// A previously committed annotation was removed.
    Removed,
    /// The annotation already had text; nothing changed.
    Unchanged,
}

impl EditOutcome {
    /// Whether the outcome is a user-visible mutation worth a history entry.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Committed | Self::Removed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EditSession {
    id: AnnotationId,
    /// True until the annotation has been committed once.
    fresh: bool,
}

/// Ordered annotation list plus the single edit-session slot.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_id: AnnotationId,
    editing: Option<EditSession>,
}

impl AnnotationStore {
    /// Creates an empty store. The first id handed out is 1.
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 1,
            editing: None,
        }
    }

    /// Creates a store from a loaded list.
    pub fn from_annotations(annotations: Vec<Annotation>) -> Result<Self, AnnotationError> {
        let mut store = Self::new();
        store.replace_all(annotations)?;
        Ok(store)
    }

    /// Annotations in creation order.
    pub fn list(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// True when the store holds no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// The id the next created annotation will receive.
    pub fn next_id(&self) -> AnnotationId {
        self.next_id
    }

    /// Id of the annotation with an open edit session.
    pub fn editing(&self) -> Option<AnnotationId> {
        self.editing.map(|session| session.id)
    }

    /// Annotations that have been committed at least once.
    ///
    /// A freshly created annotation whose first edit session is still open
    /// is left out. This is the list history and storage see.
    pub fn committed(&self) -> Vec<Annotation> {
        let pending = self
            .editing
            .filter(|session| session.fresh)
            .map(|session| session.id);
        self.annotations
            .iter()
            .filter(|a| Some(a.id) != pending)
            .cloned()
            .collect()
    }

    /// Looks up an annotation by id.
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Looks up an annotation by id for mutation.
    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    /// One-based display number of an annotation.
    pub fn position(&self, id: AnnotationId) -> Option<usize> {
        self.annotations.iter().position(|a| a.id == id).map(|i| i + 1)
    }

    /// Appends a new annotation and opens an edit session on it.
    ///
    /// Any session already open is closed first. Fails without touching the
    /// list once the id space is exhausted.
    pub fn create(&mut self, kind: AnnotationKind) -> Result<AnnotationId, AnnotationError> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or(AnnotationError::IdOverflow { id })?;
        self.close_edit();
        tracing::debug!("Created {} annotation {}", kind.name(), id);
        self.annotations.push(Annotation::new(id, kind));
        self.editing = Some(EditSession { id, fresh: true });
        Ok(id)
    }

    /// Re-opens an edit session on an existing annotation.
    pub fn open_edit(&mut self, id: AnnotationId) -> Result<(), AnnotationError> {
        if self.editing() == Some(id) {
            return Ok(());
        }
        if self.get(id).is_none() {
            return Err(AnnotationError::NotFound { id });
        }
        self.close_edit();
        self.editing = Some(EditSession { id, fresh: false });
        Ok(())
    }

    /// Writes text and metadata and closes the session.
    ///
    /// Committing empty text removes the annotation, the same as discarding.
    pub fn commit_edit(
        &mut self,
        id: AnnotationId,
        text: impl Into<String>,
        priority: Priority,
        category: Category,
    ) -> Result<EditOutcome, AnnotationError> {
        let session = self.session_for(id)?;
        let text = text.into();
        if text.trim().is_empty() {
            return Ok(self.remove_for_session(session));
        }
        let ann = self
            .get_mut(id)
            .ok_or(AnnotationError::NotFound { id })?;
        ann.text = text;
        ann.priority = priority;
        ann.category = category;
        self.editing = None;
        Ok(EditOutcome::Committed)
    }

    /// Closes the session on `id`, removing the annotation if its text is empty.
    pub fn discard_edit(&mut self, id: AnnotationId) -> Result<EditOutcome, AnnotationError> {
        let session = self.session_for(id)?;
        let empty = self
            .get(id)
            .map(Annotation::has_empty_text)
            .ok_or(AnnotationError::NotFound { id })?;
        if empty {
            return Ok(self.remove_for_session(session));
        }
        self.editing = None;
        Ok(EditOutcome::Unchanged)
    }

    /// Closes whatever session is open under the discard rule.
    pub fn close_edit(&mut self) -> Option<EditOutcome> {
        let id = self.editing()?;
        match self.discard_edit(id) {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                self.editing = None;
                None
            }
        }
    }

    /// Removes an annotation.
    pub fn delete(&mut self, id: AnnotationId) -> Result<Annotation, AnnotationError> {
        let index = self
            .annotations
            .iter()
            .position(|a| a.id == id)
            .ok_or(AnnotationError::NotFound { id })?;
        if self.editing() == Some(id) {
            self.editing = None;
        }
        Ok(self.annotations.remove(index))
    }

    /// Removes every annotation. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        self.editing = None;
        let count = self.annotations.len();
        self.annotations.clear();
        count
    }

    /// Replaces the whole list (history restore or load).
    ///
    /// Closes any edit session. `next_id` never moves backwards, so ids stay
    /// unique across undo. A list holding an id with no successor is rejected
    /// and the store is left untouched.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) -> Result<(), AnnotationError> {
        let max_id = annotations.iter().map(|a| a.id).max().unwrap_or(0);
        let next = max_id
            .checked_add(1)
            .ok_or(AnnotationError::IdOverflow { id: max_id })?;
        self.editing = None;
        self.next_id = self.next_id.max(next);
        self.annotations = annotations;
        Ok(())
    }

    fn session_for(&self, id: AnnotationId) -> Result<EditSession, AnnotationError> {
        match self.editing {
            None => Err(AnnotationError::NoEditSession),
            Some(session) if session.id != id => Err(AnnotationError::EditSessionMismatch {
                open: session.id,
                requested: id,
            }),
            Some(session) => Ok(session),
        }
    }

    fn remove_for_session(&mut self, session: EditSession) -> EditOutcome {
        self.editing = None;
        self.annotations.retain(|a| a.id != session.id);
        if session.fresh {
            tracing::debug!("Rolled back empty annotation {}", session.id);
            EditOutcome::RolledBack
        } else {
            EditOutcome::Removed
        }
    }
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}
