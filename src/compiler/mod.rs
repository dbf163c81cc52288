//! Content compilation pipeline.
//!
//! - **content**: Walk the content tree into a [`PageRegistry`]
//! - **links**: Extract internal links and record backlinks
//! - **render**: Expand pages through the shared templates
//! - **templates**: Navigation, footer, static imports and markdown layout
//!
//! # Build Flow
//!
//! ```text
//! ContentCompiler::compile() ──► resolve_backlinks() ──► render_site()
//!           │                           │                     │
//!           ▼                           ▼                     ▼
//!     PageRegistry               LinkedRegistry          HTML files
//!   (+ copied assets)          (backlinks filled)
//! ```
//!
//! Each pass finishes before the next one starts: a backlink can only be
//! resolved once every page it might point at is in the registry.

pub mod content;
pub mod error;
pub mod links;
pub mod page;
pub mod registry;
pub mod render;
pub mod templates;

pub use content::ContentCompiler;
pub use links::resolve_backlinks;
pub use registry::LinkedRegistry;
pub use render::render_site;
pub use templates::Templates;
