//! Stylesheet compilation.
//!
//! Output shape:
//! ```text
//! body {
//!   color: #333 !important;
//!   font-size: 16px !important;
//! }
//!
//! <custom fragment, verbatim>
//! ```
//!
//! Selectors and properties come out in sorted order, so the same set of
//! overrides always compiles to the same text.

use crate::config::DesignConfig;

/// Compiles a configuration into stylesheet text.
pub fn compile(config: &DesignConfig) -> String {
    let blocks: Vec<String> = config
        .selectors
        .iter()
        .filter(|(_, bag)| !bag.is_empty())
        .map(|(selector, bag)| {
            let mut block = format!("{} {{\n", selector);
            for (property, value) in bag {
                block.push_str(&format!("  {}: {} !important;\n", property, value));
            }
            block.push('}');
            block
        })
        .collect();

    let mut out = String::new();
    if !blocks.is_empty() {
        out = blocks.join("\n\n");
        out.push('\n');
    }
    if !config.custom_css.trim().is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&config.custom_css);
    }
    out
}
