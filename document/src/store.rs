//! Editor store: the working document, the selection, and every edit.
//!
//! DESIGN
//! ======
//! `EditorStore` owns one deep copy of a template's content and applies
//! coordinate-addressed edits to it: (side, panel index) for panel edits and
//! (side, panel index, block id) for block edits. Each edit runs as one
//! synchronous step and reports whether the document changed. Coordinates
//! that do not resolve are absorbed as no-ops, never errors.
//!
//! Two counters describe the document over time. `generation` changes only
//! when a template is selected or reset, so work started against an older
//! document can recognise itself as stale. `revision` changes on every
//! applied document edit, so a renderer can skip unchanged content.
//! Selection changes leave it alone.
//!
//! ASYNC UPLOADS
//! =============
//! Decoding an upload may run off the store's owner. The caller takes an
//! [`UploadTicket`] first, decodes without holding the store, and hands the
//! result back. Completion re-checks the generation and the target before
//! applying, so a block removed mid-decode is never resurrected.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{BLOCK_ID_ALPHABET, BLOCK_ID_LEN, UPLOADED_BACKGROUND_OPACITY};
use crate::doc::{
    BackgroundKind, BackgroundPatch, Block, BlockId, BlockPatch, BlockType, BorderEdge, BorderPatch, BorderStyle,
    BrochureContent, LayoutStyle, Panel, PanelBackground, SideKey, Template, VerticalAlign,
};
use crate::templates::TemplateRegistry;
use crate::upload::{DataUri, DecodeError, decode_image_payload};

/// What the user is currently editing. At most one target at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    None,
    #[serde(rename_all = "camelCase")]
    Block { side: SideKey, panel_index: usize, block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    Panel { side: SideKey, panel_index: usize },
}

/// The block under edit, resolved against the current document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditingBlock<'a> {
    pub side: SideKey,
    pub panel_index: usize,
    pub block: &'a Block,
}

/// Target of a pending upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTarget {
    /// The `src` of a logo or image block.
    BlockSource { side: SideKey, panel_index: usize, block_id: BlockId },
    /// The background of a panel.
    PanelBackground { side: SideKey, panel_index: usize },
}

/// Proof that an upload target existed when decoding started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub target: UploadTarget,
    generation: u64,
}

impl UploadTicket {
    /// Generation of the document the ticket was issued against.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Working document plus transient editing state.
#[derive(Debug, Clone, Default)]
pub struct EditorStore {
    template: Option<Template>,
    content: Option<BrochureContent>,
    selection: Selection,
    generation: u64,
    revision: u64,
}

impl EditorStore {
    /// An empty store with no document loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded from `template`.
    #[must_use]
    pub fn with_template(template: &Template) -> Self {
        let mut store = Self::new();
        store.select_template(Some(template));
        store
    }

    // --- Queries ---

    #[must_use]
    pub fn content(&self) -> Option<&BrochureContent> {
        self.content.as_ref()
    }

    /// The template the current document was seeded from.
    #[must_use]
    pub fn active_template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The selected block, if the selection still resolves.
    #[must_use]
    pub fn editing_block(&self) -> Option<EditingBlock<'_>> {
        let Selection::Block { side, panel_index, ref block_id } = self.selection else {
            return None;
        };
        let block = self.content.as_ref()?.block(side, panel_index, block_id)?;
        Some(EditingBlock { side, panel_index, block })
    }

    // --- Template lifecycle ---

    /// Replace the working document with a deep copy of `template`'s content,
    /// or unload it. Clears the selection either way.
    pub fn select_template(&mut self, template: Option<&Template>) {
        self.template = template.cloned();
        self.content = template.map(|t| t.content.clone());
        self.selection = Selection::None;
        self.generation += 1;
        self.revision += 1;
        debug!(
            template = template.map_or("<none>", |t| t.id.as_str()),
            generation = self.generation,
            "template selected"
        );
    }

    /// Start over from the registry's default template.
    pub fn reset(&mut self, registry: &TemplateRegistry) {
        self.select_template(registry.default_template());
    }

    // --- Selection ---

    /// Select a block, clearing any panel selection. Ignored when the block
    /// does not exist.
    pub fn select_block(&mut self, side: SideKey, panel_index: usize, block_id: &str) -> bool {
        let exists = self
            .content
            .as_ref()
            .is_some_and(|c| c.block(side, panel_index, block_id).is_some());
        if exists {
            self.selection = Selection::Block { side, panel_index, block_id: block_id.to_string() };
        }
        exists
    }

    /// Select a panel, clearing any block selection. Ignored when the panel
    /// does not exist.
    pub fn select_panel(&mut self, side: SideKey, panel_index: usize) -> bool {
        let exists = self
            .content
            .as_ref()
            .is_some_and(|c| c.panel(side, panel_index).is_some());
        if exists {
            self.selection = Selection::Panel { side, panel_index };
        }
        exists
    }

    /// Drop the selection. Returns whether anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        !matches!(std::mem::take(&mut self.selection), Selection::None)
    }

    // --- Document-level edits ---

    pub fn update_theme_color(&mut self, color: &str) -> bool {
        self.edit_content(|c| {
            c.theme_color = color.to_string();
            true
        })
    }

    pub fn update_layout(&mut self, layout: LayoutStyle) -> bool {
        self.edit_content(|c| {
            c.layout = layout;
            true
        })
    }

    /// Merge into the global background, seeding it when absent.
    pub fn update_global_background(&mut self, patch: &BackgroundPatch) -> bool {
        self.edit_content(|c| {
            c.global_background
                .get_or_insert_with(PanelBackground::seed)
                .merge(patch);
            true
        })
    }

    // --- Panel edits ---

    /// Merge into a panel's background (seeding it when absent), or clear it
    /// with `None` so the global background shows through.
    pub fn update_panel_background(&mut self, side: SideKey, panel_index: usize, patch: Option<&BackgroundPatch>) -> bool {
        self.edit_panel(side, panel_index, |panel| {
            match patch {
                None => panel.background = None,
                Some(patch) => panel.background.get_or_insert_with(PanelBackground::seed).merge(patch),
            }
            true
        })
    }

    /// Merge into one edge border (seeding it when absent), or clear it.
    pub fn update_panel_border(
        &mut self,
        side: SideKey,
        panel_index: usize,
        edge: BorderEdge,
        patch: Option<&BorderPatch>,
    ) -> bool {
        self.edit_panel(side, panel_index, |panel| {
            let slot = panel.border_slot(edge);
            match patch {
                None => *slot = None,
                Some(patch) => slot.get_or_insert_with(BorderStyle::seed).merge(patch),
            }
            true
        })
    }

    /// Copy one panel's background onto every panel of both sides.
    /// Nothing changes when the source panel has no background.
    pub fn apply_panel_background_to_all(&mut self, side: SideKey, panel_index: usize) -> bool {
        let Some(background) = self
            .content
            .as_ref()
            .and_then(|c| c.panel(side, panel_index))
            .and_then(|p| p.background.clone())
        else {
            return false;
        };
        self.edit_content(|c| {
            for panel in c.panels_mut() {
                panel.background = Some(background.clone());
            }
            true
        })
    }

    pub fn update_panel_align(&mut self, side: SideKey, panel_index: usize, align: VerticalAlign) -> bool {
        self.edit_panel(side, panel_index, |panel| {
            panel.vertical_align = Some(align);
            true
        })
    }

    // --- Block edits ---

    /// Shallow-merge `patch` into a block. No-op when the block is missing.
    pub fn update_block(&mut self, side: SideKey, panel_index: usize, block_id: &str, patch: &BlockPatch) -> bool {
        self.edit_panel(side, panel_index, |panel| {
            let Some(block) = panel.block_mut(block_id) else {
                return false;
            };
            block.apply_patch(patch);
            true
        })
    }

    /// Append a block of `kind` with that kind's defaults. Returns its id.
    pub fn add_block(&mut self, side: SideKey, panel_index: usize, kind: BlockType) -> Option<BlockId> {
        let mut new_id = None;
        self.edit_panel(side, panel_index, |panel| {
            let id = fresh_block_id(panel);
            panel.blocks.push(Block::with_defaults(id.clone(), kind));
            new_id = Some(id);
            true
        });
        new_id
    }

    /// Remove a block. Drops any block selection, whichever block it names.
    pub fn remove_block(&mut self, side: SideKey, panel_index: usize, block_id: &str) -> bool {
        if matches!(self.selection, Selection::Block { .. }) {
            self.selection = Selection::None;
        }
        self.edit_panel(side, panel_index, |panel| {
            let before = panel.blocks.len();
            panel.blocks.retain(|b| b.id != block_id);
            panel.blocks.len() != before
        })
    }

    // --- Uploads ---

    /// Decode `bytes` and store the result as the block's `src`.
    ///
    /// Returns `Ok(false)` when the block does not exist.
    ///
    /// # Errors
    ///
    /// Returns the decode failure; the document is left untouched.
    pub fn upload_logo_image(
        &mut self,
        side: SideKey,
        panel_index: usize,
        block_id: &str,
        bytes: &[u8],
    ) -> Result<bool, DecodeError> {
        let data = decode_image_payload(bytes)?;
        let Some(ticket) = self.begin_logo_upload(side, panel_index, block_id) else {
            return Ok(false);
        };
        Ok(self.complete_upload(&ticket, data))
    }

    /// Start a block `src` upload. `None` when the block does not exist.
    #[must_use]
    pub fn begin_logo_upload(&self, side: SideKey, panel_index: usize, block_id: &str) -> Option<UploadTicket> {
        self.content.as_ref()?.block(side, panel_index, block_id)?;
        Some(UploadTicket {
            target: UploadTarget::BlockSource { side, panel_index, block_id: block_id.to_string() },
            generation: self.generation,
        })
    }

    /// Start a panel background image upload. `None` when the panel does not exist.
    #[must_use]
    pub fn begin_background_upload(&self, side: SideKey, panel_index: usize) -> Option<UploadTicket> {
        self.content.as_ref()?.panel(side, panel_index)?;
        Some(UploadTicket { target: UploadTarget::PanelBackground { side, panel_index }, generation: self.generation })
    }

    /// Apply a decoded upload if its target still exists in the current
    /// document. Stale tickets are discarded and reported as `false`.
    pub fn complete_upload(&mut self, ticket: &UploadTicket, data: DataUri) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding upload for replaced document"
            );
            return false;
        }
        let applied = match &ticket.target {
            UploadTarget::BlockSource { side, panel_index, block_id } => {
                let patch = BlockPatch { src: Some(data.into_string()), ..Default::default() };
                self.update_block(*side, *panel_index, block_id, &patch)
            }
            UploadTarget::PanelBackground { side, panel_index } => {
                let patch = BackgroundPatch {
                    kind: Some(BackgroundKind::Image),
                    value: Some(data.into_string()),
                    opacity: Some(UPLOADED_BACKGROUND_OPACITY),
                    ..Default::default()
                };
                self.update_panel_background(*side, *panel_index, Some(&patch))
            }
        };
        if !applied {
            debug!(upload_target = ?ticket.target, "discarding upload for removed target");
        }
        applied
    }

    // --- Internals ---

    fn edit_content(&mut self, f: impl FnOnce(&mut BrochureContent) -> bool) -> bool {
        let Some(content) = self.content.as_mut() else {
            return false;
        };
        let changed = f(content);
        if changed {
            self.revision += 1;
        }
        changed
    }

    fn edit_panel(&mut self, side: SideKey, panel_index: usize, f: impl FnOnce(&mut Panel) -> bool) -> bool {
        self.edit_content(|c| c.panel_mut(side, panel_index).is_some_and(f))
    }
}

/// Generate a block id not already used in `panel`.
fn fresh_block_id(panel: &Panel) -> BlockId {
    let mut rng = rand::rng();
    loop {
        let id: String = (0..BLOCK_ID_LEN)
            .map(|_| char::from(BLOCK_ID_ALPHABET[rng.random_range(0..BLOCK_ID_ALPHABET.len())]))
            .collect();
        if !panel.contains_block(&id) {
            return id;
        }
    }
}
