//! The session context.
//!
//! A [`Session`] owns every piece of mutable state: the annotation store,
//! style overrides, history, drag and gesture state, the storage backend
//! and attached listeners. All input flows through `&mut self` methods, and
//! each discrete user-visible mutation commits exactly one history entry and
//! re-persists both state halves together.

use std::fmt;

use markupkit_annotate::{
    export_annotations, Annotation, AnnotationId, AnnotationKind, AnnotationStore, ArrowTool,
    Category, CoordinateMapper, DragController, DragHandle, DragUpdate, EditOutcome, ExportFormat,
    FreehandCapture, Priority, SubmissionReport,
};
use markupkit_core::constants::{ANNOTATIONS_KEY, DESIGN_CONFIG_KEY};
use markupkit_core::{AnnotationError, ContainerRect, Error, PixelPoint, Result};
use markupkit_style::{
    compile, inject_into, DesignConfig, InjectionOutcome, PreviewTarget, StyleControl,
};

use crate::config::{Capabilities, SessionConfig};
use crate::history::{HistoryManager, HistorySnapshot};
use crate::listener::{SessionListener, StatusLevel};
use crate::persistence::{load_or_default, save_json, KeyValueStore};

/// Which annotation a click or gesture creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Postit,
    Cloud,
    Arrow,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postit => write!(f, "postit"),
            Self::Cloud => write!(f, "cloud"),
            Self::Arrow => write!(f, "arrow"),
        }
    }
}

/// Summary counts for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub annotations: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub selectors: usize,
    pub properties: usize,
    pub has_custom_css: bool,
    pub history_entries: usize,
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Annotations: {} ({} high, {} medium, {} low)",
            self.annotations, self.high, self.medium, self.low
        )?;
        writeln!(
            f,
            "Style overrides: {} selectors, {} properties{}",
            self.selectors,
            self.properties,
            if self.has_custom_css {
                " + custom CSS"
            } else {
                ""
            }
        )?;
        write!(f, "History entries: {}", self.history_entries)
    }
}

/// Annotation and style editing session over a storage backend.
pub struct Session<S: KeyValueStore> {
    config: SessionConfig,
    storage: S,
    mapper: CoordinateMapper,
    store: AnnotationStore,
    design: DesignConfig,
    history: HistoryManager,
    drag: DragController,
    freehand: FreehandCapture,
    arrow: ArrowTool,
    tool: Tool,
    browsing: bool,
    listeners: Vec<Box<dyn SessionListener>>,
    preview: Option<Box<dyn PreviewTarget>>,
}

impl<S: KeyValueStore> Session<S> {
    /// Opens a session, loading both persisted blobs from `storage`.
    ///
    /// Missing or malformed blobs load as empty state. The loaded state
    /// becomes the history base.
    pub fn open(config: SessionConfig, storage: S) -> Result<Self> {
        config.validate()?;
        let annotations: Vec<Annotation> = load_or_default(&storage, ANNOTATIONS_KEY);
        let store = AnnotationStore::from_annotations(annotations).unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored annotations: {}", e);
            AnnotationStore::new()
        });
        let design: DesignConfig = load_or_default(&storage, DESIGN_CONFIG_KEY);
        tracing::info!(
            "Session opened with {} annotations and {} style selectors",
            store.len(),
            design.selectors.len()
        );

        let history = HistoryManager::with_capacity(
            HistorySnapshot::capture(store.list(), &design),
            config.history_capacity,
        );
        Ok(Self {
            mapper: CoordinateMapper::new(config.container),
            freehand: FreehandCapture::with_min_points(config.min_freehand_points),
            store,
            design,
            history,
            drag: DragController::new(),
            arrow: ArrowTool::new(),
            tool: Tool::default(),
            browsing: false,
            listeners: Vec::new(),
            preview: None,
            config,
            storage,
        })
    }

    /// Opens a session with default configuration.
    pub fn with_storage(storage: S) -> Result<Self> {
        Self::open(SessionConfig::default(), storage)
    }

    pub fn add_listener(&mut self, listener: Box<dyn SessionListener>) {
        self.listeners.push(listener);
    }

    /// Attaches the live preview and pushes the current styles to it.
    pub fn attach_preview(&mut self, preview: Box<dyn PreviewTarget>) -> InjectionOutcome {
        self.preview = Some(preview);
        self.apply_styles()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.config.capabilities
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Closes the session and hands back its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.store.list()
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.store.get(id)
    }

    pub fn design(&self) -> &DesignConfig {
        &self.design
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Id of the annotation whose editor is open.
    pub fn editing(&self) -> Option<AnnotationId> {
        self.store.editing()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Whether pointer input currently passes through to the page.
    pub fn is_browsing(&self) -> bool {
        self.browsing
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Selects the annotation tool and leaves browse mode.
    pub fn set_tool(&mut self, tool: Tool) {
        self.arrow.reset();
        self.freehand = FreehandCapture::with_min_points(self.config.min_freehand_points);
        self.tool = tool;
        self.browsing = false;
    }

    /// Flips browse mode. Returns the new state.
    pub fn toggle_browse(&mut self) -> Result<bool> {
        require(self.config.capabilities.browse_mode, "browse_mode")?;
        self.arrow.reset();
        self.browsing = !self.browsing;
        tracing::debug!("Browse mode {}", if self.browsing { "on" } else { "off" });
        Ok(self.browsing)
    }

    /// The preview container changed size. Geometry is redrawn from the
    /// stored percentages.
    pub fn resize(&mut self, rect: ContainerRect) {
        self.mapper.resize(rect);
        self.notify_annotations();
    }

    /// A click on the overlay. Returns the id of a newly created annotation.
    ///
    /// Post-its are created on every click; arrows on every second click.
    pub fn click(&mut self, pointer: PixelPoint) -> Option<AnnotationId> {
        if self.browsing || self.drag.is_active() {
            return None;
        }
        let point = self.mapper.to_percent(pointer);
        let kind = match self.tool {
            Tool::Postit => AnnotationKind::postit_at(point),
            Tool::Arrow => {
                let (start, end) = self.arrow.click(point)?;
                AnnotationKind::arrow(start, end)
            }
            Tool::Cloud => return None,
        };
        self.create(kind)
    }

    /// Pointer down with the cloud tool.
    pub fn freehand_begin(&mut self, pointer: PixelPoint) {
        if self.browsing || self.tool != Tool::Cloud {
            return;
        }
        self.freehand.begin(pointer);
    }

    /// Pointer move with the cloud tool.
    pub fn freehand_extend(&mut self, pointer: PixelPoint) {
        self.freehand.extend(pointer);
    }

    /// Raw samples of the gesture in progress.
    pub fn freehand_samples(&self) -> &[PixelPoint] {
        self.freehand.samples()
    }

    /// Pointer up with the cloud tool. Returns the new cloud's id, or `None`
    /// when the gesture was too short.
    pub fn freehand_end(&mut self) -> Option<AnnotationId> {
        let outline = self.freehand.finish(&self.mapper)?;
        self.create(outline.into_kind())
    }

    /// Re-opens the editor on an existing annotation.
    pub fn open_edit(&mut self, id: AnnotationId) -> Result<()> {
        if self.store.get(id).is_none() {
            return Err(AnnotationError::NotFound { id }.into());
        }
        if self.store.editing() != Some(id) {
            self.close_edit();
        }
        self.store.open_edit(id)?;
        Ok(())
    }

    /// Saves the editor contents.
    pub fn commit_edit(
        &mut self,
        id: AnnotationId,
        text: &str,
        priority: Priority,
        category: Category,
    ) -> Result<EditOutcome> {
        let outcome = self.store.commit_edit(id, text, priority, category)?;
        self.after_edit(outcome);
        Ok(outcome)
    }

    /// Cancels the editor on `id`, rolling back an empty annotation.
    pub fn discard_edit(&mut self, id: AnnotationId) -> Result<EditOutcome> {
        let outcome = self.store.discard_edit(id)?;
        self.after_edit(outcome);
        Ok(outcome)
    }

    /// Closes whichever editor is open.
    pub fn close_edit(&mut self) -> Option<EditOutcome> {
        let outcome = self.store.close_edit()?;
        self.after_edit(outcome);
        Some(outcome)
    }

    pub fn delete(&mut self, id: AnnotationId) -> Result<Annotation> {
        if self.store.editing().is_some_and(|open| open != id) {
            self.close_edit();
        }
        let removed = self.store.delete(id)?;
        if self.drag.active().is_some_and(|drag| drag.annotation_id == id) {
            self.drag.release();
            tracing::debug!("Drag on annotation {} cancelled by delete", id);
        }
        tracing::info!("Deleted annotation {}", id);
        self.record();
        self.notify_annotations();
        Ok(removed)
    }

    /// Removes every annotation. Returns how many were removed.
    pub fn clear_annotations(&mut self) -> usize {
        self.drag.release();
        let count = self.store.clear();
        if count > 0 {
            tracing::info!("Cleared {} annotations", count);
            self.record();
        }
        self.notify_annotations();
        count
    }

    /// Pointer down on a drag handle.
    pub fn begin_drag(
        &mut self,
        id: AnnotationId,
        handle: DragHandle,
        pointer: PixelPoint,
    ) -> Result<()> {
        if self.store.editing().is_some_and(|open| open != id) {
            self.close_edit();
        }
        let annotation = self.store.get(id).ok_or(AnnotationError::NotFound { id })?;
        self.drag.begin(annotation, handle, pointer, &self.mapper)?;
        Ok(())
    }

    /// Pointer move during a drag. Updates the live annotation only.
    pub fn drag_move(&mut self, pointer: PixelPoint) -> Option<DragUpdate> {
        let update = self.drag.pointer_move(pointer, &self.mapper)?;
        self.apply_drag(&update);
        for listener in &mut self.listeners {
            listener.drag_moved(&update);
        }
        Some(update)
    }

    /// Pointer up. Writes the final position and commits one history entry.
    pub fn drag_release(&mut self) -> Option<DragUpdate> {
        let update = self.drag.release()?;
        if !self.apply_drag(&update) {
            tracing::debug!("Dragged annotation {} no longer exists", update.annotation_id);
            return None;
        }
        self.record();
        self.notify_annotations();
        Some(update)
    }

    /// Sets a style control. Returns whether the configuration changed.
    pub fn set_control(&mut self, control: StyleControl, value: &str) -> Result<bool> {
        require(self.config.capabilities.style_editor, "style_editor")?;
        let changed = control.apply(&mut self.design, value)?;
        self.after_style_change(changed);
        Ok(changed)
    }

    /// Sets a property under an arbitrary selector. A blank value removes it.
    pub fn set_property(&mut self, selector: &str, property: &str, value: &str) -> Result<bool> {
        require(self.config.capabilities.style_editor, "style_editor")?;
        let changed = self.design.set_property(selector, property, value)?;
        self.after_style_change(changed);
        Ok(changed)
    }

    pub fn remove_selector(&mut self, selector: &str) -> Result<bool> {
        require(self.config.capabilities.style_editor, "style_editor")?;
        let changed = self.design.remove_selector(selector);
        self.after_style_change(changed);
        Ok(changed)
    }

    pub fn set_custom_css(&mut self, css: &str) -> Result<bool> {
        require(self.config.capabilities.style_editor, "style_editor")?;
        let changed = self.design.set_custom_css(css);
        self.after_style_change(changed);
        Ok(changed)
    }

    /// Drops every style override.
    pub fn reset_styles(&mut self) -> Result<bool> {
        require(self.config.capabilities.style_editor, "style_editor")?;
        let changed = self.design.reset();
        self.after_style_change(changed);
        Ok(changed)
    }

    /// Steps back one history entry. Returns false at the oldest entry.
    pub fn undo(&mut self) -> Result<bool> {
        require(self.config.capabilities.history, "history")?;
        self.settle_interaction();
        let Some(snapshot) = self.history.undo().cloned() else {
            return Ok(false);
        };
        self.restore(snapshot);
        Ok(true)
    }

    /// Steps forward one history entry. Returns false at the newest entry.
    pub fn redo(&mut self) -> Result<bool> {
        require(self.config.capabilities.history, "history")?;
        self.settle_interaction();
        let Some(snapshot) = self.history.redo().cloned() else {
            return Ok(false);
        };
        self.restore(snapshot);
        Ok(true)
    }

    pub fn compile_stylesheet(&self) -> String {
        compile(&self.design)
    }

    /// Pushes the compiled stylesheet to the attached preview.
    pub fn apply_styles(&mut self) -> InjectionOutcome {
        let css = self.compile_stylesheet();
        let outcome = match self.preview.as_deref_mut() {
            Some(preview) => inject_into(preview, &css),
            None => InjectionOutcome::Skipped("no preview attached".to_string()),
        };
        if let InjectionOutcome::Skipped(reason) = &outcome {
            if self.preview.is_some() {
                let message = format!(
                    "Live preview unavailable ({}); styles still apply to the exported stylesheet",
                    reason
                );
                self.notify_status(StatusLevel::Warning, &message);
            }
        }
        outcome
    }

    pub fn export_annotations(&self, format: ExportFormat) -> Result<String> {
        export_annotations(self.store.list(), format)
    }

    /// Builds a submission report for the page at `url`.
    pub fn report(&self, url: &str) -> SubmissionReport {
        SubmissionReport::new(url, self.store.list().to_vec())
    }

    pub fn stats(&self) -> SessionStats {
        let list = self.store.list();
        let count = |p: Priority| list.iter().filter(|a| a.priority == p).count();
        SessionStats {
            annotations: list.len(),
            high: count(Priority::High),
            medium: count(Priority::Medium),
            low: count(Priority::Low),
            selectors: self.design.selectors.len(),
            properties: self.design.property_count(),
            has_custom_css: !self.design.custom_css.trim().is_empty(),
            history_entries: self.history.len(),
        }
    }

    /// Writes both blobs, propagating storage errors.
    pub fn save(&mut self) -> Result<()> {
        save_json(&mut self.storage, ANNOTATIONS_KEY, &self.store.committed())?;
        save_json(&mut self.storage, DESIGN_CONFIG_KEY, &self.design)?;
        tracing::debug!("Session state saved");
        Ok(())
    }

    fn create(&mut self, kind: AnnotationKind) -> Option<AnnotationId> {
        self.close_edit();
        match self.store.create(kind) {
            Ok(id) => {
                self.notify_annotations();
                Some(id)
            }
            Err(e) => {
                tracing::warn!("Annotation not created: {}", e);
                self.notify_status(StatusLevel::Warning, "No more annotations can be added");
                None
            }
        }
    }

    fn after_edit(&mut self, outcome: EditOutcome) {
        if outcome.is_mutation() {
            self.record();
        }
        if outcome != EditOutcome::Unchanged {
            self.notify_annotations();
        }
    }

    fn after_style_change(&mut self, changed: bool) {
        if !changed {
            return;
        }
        self.record();
        self.notify_styles();
    }

    fn apply_drag(&mut self, update: &DragUpdate) -> bool {
        match self.store.get_mut(update.annotation_id) {
            Some(annotation) => {
                annotation.set_handle_position(update.handle, update.position);
                true
            }
            None => false,
        }
    }

    /// Ends any open edit session and pending gesture before a history jump.
    fn settle_interaction(&mut self) {
        if self.drag.release().is_some() {
            tracing::debug!("Drag dropped by history navigation");
        }
        self.arrow.reset();
        self.close_edit();
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        if let Err(e) = self.store.replace_all(snapshot.annotations) {
            tracing::warn!("History entry not restored: {}", e);
            return;
        }
        self.design = snapshot.design;
        tracing::info!(
            "Restored history entry {}/{}",
            self.history.index() + 1,
            self.history.len()
        );
        self.persist();
        self.notify_annotations();
        self.notify_styles();
    }

    fn record(&mut self) {
        if self.config.capabilities.history {
            self.history.commit(HistorySnapshot::new(
                self.store.committed(),
                self.design.clone(),
            ));
        }
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to persist session state: {}", e);
            self.notify_status(StatusLevel::Warning, "Changes could not be saved");
        }
    }

    fn notify_annotations(&mut self) {
        let list = self.store.list();
        for listener in &mut self.listeners {
            listener.annotations_changed(list);
        }
    }

    fn notify_styles(&mut self) {
        let css = compile(&self.design);
        for listener in &mut self.listeners {
            listener.styles_changed(&self.design, &css);
        }
        if self.preview.is_some() {
            self.apply_styles();
        }
    }

    fn notify_status(&mut self, level: StatusLevel, message: &str) {
        for listener in &mut self.listeners {
            listener.status(level, message);
        }
    }
}

fn require(enabled: bool, capability: &str) -> Result<()> {
    if enabled {
        Ok(())
    } else {
        Err(Error::capability_disabled(capability))
    }
}
