//! Template lookup and rendering.
//!
//! A template is a named, ordered set of file mappings declared by a catalog.
//! Rendering substitutes `{placeholder}` tokens into destination names and
//! file contents: strictly for names (a broken path means silently wrong
//! files), tolerantly for contents (hand-editable).

pub mod placeholder;
pub mod renderer;
pub mod resolver;

pub use placeholder::{substitute, substitute_path};
pub use renderer::{RenderContext, TemplateRenderer};
pub use resolver::{ResolvedTemplate, TemplateResolver};
