//! Document state for the brochure editor.
//!
//! This crate owns the brochure document and every edit applied to it: the
//! data model, the editor store that holds the working copy and the current
//! selection, and the pure functions that turn a document into what is
//! drawn and exported. It performs no I/O; the service crate wraps it in
//! sessions and HTTP.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`doc`] | Sides, panels, blocks, decorations, and their patch types |
//! | [`store`] | [`store::EditorStore`]: working copy, selection, edits, uploads |
//! | [`resolve`] | Which background and borders actually paint a panel |
//! | [`render`] | Render view-model of one side |
//! | [`export`] | Page geometry and file names of an export |
//! | [`upload`] | Image payload decoding into `data:` URIs |
//! | [`templates`] | Validated registry of starting documents |
//! | [`consts`] | Shared defaults (opacities, page geometry, id format) |

pub mod consts;
pub mod doc;
pub mod export;
pub mod render;
pub mod resolve;
pub mod store;
pub mod templates;
pub mod upload;
