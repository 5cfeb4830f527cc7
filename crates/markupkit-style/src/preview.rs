//! Live preview injection seam.
//!
//! The preview document may belong to another origin, in which case it
//! cannot receive a stylesheet. Compilation is unaffected; only the
//! injection step is skipped.

use markupkit_core::StyleError;

/// A document that can receive the compiled stylesheet.
pub trait PreviewTarget {
    /// Replaces the injected stylesheet with `css`.
    ///
    /// Cross-origin documents return [`StyleError::CrossOrigin`].
    fn inject(&mut self, css: &str) -> Result<(), StyleError>;
}

/// What happened when the stylesheet was pushed to the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionOutcome {
    Applied,
    /// The preview could not take the styles; compilation still succeeded.
    Skipped(String),
}

impl InjectionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Pushes `css` to `target`, downgrading failures to a skip.
pub fn inject_into(target: &mut dyn PreviewTarget, css: &str) -> InjectionOutcome {
    match target.inject(css) {
        Ok(()) => InjectionOutcome::Applied,
        Err(err) => {
            tracing::warn!("Preview not updated: {}", err);
            InjectionOutcome::Skipped(err.to_string())
        }
    }
}

/// In-memory preview that records the last stylesheet it received.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreview {
    cross_origin: bool,
    injected: Option<String>,
    injections: usize,
}

impl MemoryPreview {
    /// A same-origin preview.
    pub fn new() -> Self {
        Self::default()
    }

    /// A preview that refuses every injection as cross-origin.
    pub fn cross_origin() -> Self {
        Self {
            cross_origin: true,
            ..Self::default()
        }
    }

    /// The stylesheet currently applied.
    pub fn stylesheet(&self) -> Option<&str> {
        self.injected.as_deref()
    }

    /// How many times a stylesheet was applied.
    pub fn injections(&self) -> usize {
        self.injections
    }
}

impl PreviewTarget for MemoryPreview {
    fn inject(&mut self, css: &str) -> Result<(), StyleError> {
        if self.cross_origin {
            return Err(StyleError::CrossOrigin);
        }
        self.injected = Some(css.to_string());
        self.injections += 1;
        Ok(())
    }
}
