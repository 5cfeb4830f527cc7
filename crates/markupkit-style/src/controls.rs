//! Visual style controls and their canonical selector/property targets.

use std::fmt;
use std::str::FromStr;

use markupkit_core::StyleError;

use crate::config::DesignConfig;

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";
const BUTTONS: &str = "button, .btn";

/// Where a control writes: selector, property and an optional unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlTarget {
    pub selector: &'static str,
    pub property: &'static str,
    pub unit: Option<&'static str>,
}

impl ControlTarget {
    const fn new(selector: &'static str, property: &'static str) -> Self {
        Self {
            selector,
            property,
            unit: None,
        }
    }

    const fn px(selector: &'static str, property: &'static str) -> Self {
        Self {
            selector,
            property,
            unit: Some("px"),
        }
    }
}

/// A single control in the style editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleControl {
    BackgroundColor,
    TextColor,
    FontFamily,
    FontSize,
    LineHeight,
    HeadingColor,
    HeadingFont,
    LinkColor,
    AccentColor,
    ButtonRadius,
    ContainerMaxWidth,
    SectionPadding,
}

impl StyleControl {
    /// Every control, in editor order.
    pub const ALL: [StyleControl; 12] = [
        Self::BackgroundColor,
        Self::TextColor,
        Self::FontFamily,
        Self::FontSize,
        Self::LineHeight,
        Self::HeadingColor,
        Self::HeadingFont,
        Self::LinkColor,
        Self::AccentColor,
        Self::ButtonRadius,
        Self::ContainerMaxWidth,
        Self::SectionPadding,
    ];

    /// The canonical target of this control.
    pub fn target(&self) -> ControlTarget {
        match self {
            Self::BackgroundColor => ControlTarget::new("body", "background-color"),
            Self::TextColor => ControlTarget::new("body", "color"),
            Self::FontFamily => ControlTarget::new("body", "font-family"),
            Self::FontSize => ControlTarget::px("body", "font-size"),
            Self::LineHeight => ControlTarget::new("body", "line-height"),
            Self::HeadingColor => ControlTarget::new(HEADINGS, "color"),
            Self::HeadingFont => ControlTarget::new(HEADINGS, "font-family"),
            Self::LinkColor => ControlTarget::new(":root", "--link-color"),
            Self::AccentColor => ControlTarget::new(BUTTONS, "background-color"),
            Self::ButtonRadius => ControlTarget::px(BUTTONS, "border-radius"),
            Self::ContainerMaxWidth => ControlTarget::px(".container", "max-width"),
            Self::SectionPadding => ControlTarget::px("section", "padding"),
        }
    }

    /// Auxiliary targets written with the same value.
    pub fn mirrors(&self) -> &'static [ControlTarget] {
        static LINK: [ControlTarget; 1] = [ControlTarget::new("a", "color")];
        static ACCENT: [ControlTarget; 1] = [ControlTarget::new(":root", "--accent-color")];
        match self {
            Self::LinkColor => &LINK,
            Self::AccentColor => &ACCENT,
            _ => &[],
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BackgroundColor => "Background color",
            Self::TextColor => "Text color",
            Self::FontFamily => "Font family",
            Self::FontSize => "Font size",
            Self::LineHeight => "Line height",
            Self::HeadingColor => "Heading color",
            Self::HeadingFont => "Heading font",
            Self::LinkColor => "Link color",
            Self::AccentColor => "Accent color",
            Self::ButtonRadius => "Button radius",
            Self::ContainerMaxWidth => "Container max width",
            Self::SectionPadding => "Section padding",
        }
    }

    /// Writes `value` to the canonical target and every mirror.
    ///
    /// A blank value clears them all. Returns whether anything changed.
    pub fn apply(&self, config: &mut DesignConfig, value: &str) -> Result<bool, StyleError> {
        let mut changed = false;
        for target in std::iter::once(self.target()).chain(self.mirrors().iter().copied()) {
            let value = with_unit(value, target.unit);
            changed |= config.set_property(target.selector, target.property, &value)?;
        }
        Ok(changed)
    }

    /// Current value at the canonical target.
    pub fn current<'a>(&self, config: &'a DesignConfig) -> Option<&'a str> {
        let target = self.target();
        config.get(target.selector, target.property)
    }
}

impl fmt::Display for StyleControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BackgroundColor => "background-color",
            Self::TextColor => "text-color",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::LineHeight => "line-height",
            Self::HeadingColor => "heading-color",
            Self::HeadingFont => "heading-font",
            Self::LinkColor => "link-color",
            Self::AccentColor => "accent-color",
            Self::ButtonRadius => "button-radius",
            Self::ContainerMaxWidth => "container-max-width",
            Self::SectionPadding => "section-padding",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for StyleControl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.to_string() == wanted)
            .ok_or_else(|| format!("Unknown style control: {}", s))
    }
}

/// Appends `unit` when the trimmed value is a bare number; otherwise the
/// value is kept as typed.
pub fn with_unit(value: &str, unit: Option<&str>) -> String {
    let trimmed = value.trim();
    match unit {
        Some(unit) if is_bare_number(trimmed) => format!("{}{}", trimmed, unit),
        _ => trimmed.to_string(),
    }
}

fn is_bare_number(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
        && value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}
