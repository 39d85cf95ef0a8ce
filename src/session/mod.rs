// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Template session: one template being edited, plus its backend.
//!
//! The session owns the graph, the text engine and the template identity. Local edits are
//! synchronous and total; backend calls are async and leave local state untouched when they
//! fail. Every mutating call takes `&mut self`, so a save cannot overlap another save.

use thiserror::Error;
use tracing::{debug, info};

use crate::graph::{GraphError, GraphStore, StagedScreen};
use crate::idgen::KeyGenerator;
use crate::model::{
    Screen, ScreenId, StringKey, StringTable, Template, TemplateId, TemplateSummary, TextMode,
    TextSlot,
};
use crate::store::{
    template_from_json, template_to_json, BackendError, StringTableExportJson, TemplateBackend,
    WireError,
};
use crate::text::TextEngine;

const DEFAULT_SCRIPT_STEM: &str = "script";
const DEFAULT_STRING_TABLE_STEM: &str = "conversation";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("load or save a template first")]
    MissingTemplateId,

    #[error("string table mode is not enabled")]
    NotExternalized,

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

#[derive(Debug)]
pub struct TemplateSession<B> {
    backend: B,
    template_id: Option<TemplateId>,
    name: String,
    graph: GraphStore,
    text: TextEngine,
}

impl<B: TemplateBackend> TemplateSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_keys(backend, KeyGenerator::new())
    }

    /// Session whose string keys come from `keys` (seeded generators make tests deterministic).
    pub fn with_keys(backend: B, keys: KeyGenerator) -> Self {
        Self {
            backend,
            template_id: None,
            name: String::new(),
            graph: GraphStore::default(),
            text: TextEngine::with_keys(keys),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn template_id(&self) -> Option<TemplateId> {
        self.template_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> TextMode {
        self.text.mode()
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn screens(&self) -> &[Screen] {
        self.graph.screens()
    }

    pub fn string_table(&self) -> &StringTable {
        self.text.table()
    }

    /// Text behind a slot of this template (empty for a missing key).
    pub fn resolve_text<'a>(&'a self, slot: &'a TextSlot) -> &'a str {
        self.text.resolve(slot)
    }

    /// Drops the current template and starts an empty, unsaved one.
    pub fn new_template(&mut self, name: impl Into<String>) {
        self.template_id = None;
        self.name = name.into();
        self.graph = GraphStore::default();
        self.text.reset();
    }

    pub fn reset(&mut self) {
        self.new_template(String::new());
    }

    /// Renames the template. References minted before keep their old namespace name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Current template as a detached value.
    pub fn snapshot(&self) -> Template {
        Template {
            template_id: self.template_id,
            name: self.name.clone(),
            mode: self.text.mode(),
            screens: self.graph.screens().to_vec(),
            string_table: self.text.table().clone(),
        }
    }

    pub async fn list_templates(&self) -> Result<Vec<TemplateSummary>, SessionError> {
        let summaries = self.backend.list_templates().await?;
        Ok(summaries.into_iter().map(TemplateSummary::from).collect())
    }

    /// Replaces the session with the stored template `template_id`. Nothing is selected after.
    pub async fn load(&mut self, template_id: TemplateId) -> Result<(), SessionError> {
        let json = self.backend.get_template(template_id).await?;
        let mut template = template_from_json(json)?;

        let namespace_name = template
            .screens
            .iter()
            .flat_map(|screen| screen.text_slots())
            .find_map(|slot| slot.text_ref())
            .map(|text_ref| text_ref.template_name().to_owned())
            .unwrap_or_else(|| template.name.clone());

        self.text.restore(template.mode, template.string_table, namespace_name);
        let adopted = self.text.adopt_inline(&mut template.screens);
        self.graph = GraphStore::from_screens(template.screens);
        self.template_id = Some(template.template_id.unwrap_or(template_id));
        self.name = template.name;

        info!(
            template_id = %template_id,
            screens = self.graph.len(),
            mode = %self.text.mode(),
            adopted,
            "loaded template"
        );
        Ok(())
    }

    /// Creates the template on first save, updates it afterwards. Returns the stored id.
    pub async fn save(&mut self) -> Result<TemplateId, SessionError> {
        let json = template_to_json(&self.snapshot());
        let stored = match self.template_id {
            Some(template_id) => self.backend.update_template(template_id, &json).await?,
            None => self.backend.create_template(&json).await?,
        };

        let template_id = match (stored.id, self.template_id) {
            (Some(template_id), _) | (None, Some(template_id)) => template_id,
            (None, None) => {
                return Err(BackendError::Parse("created template has no id".to_owned()).into())
            }
        };
        let created = self.template_id.is_none();
        self.template_id = Some(template_id);

        info!(template_id = %template_id, created, screens = self.graph.len(), "saved template");
        Ok(template_id)
    }

    /// Deletes the stored template and resets the session.
    pub async fn delete(&mut self) -> Result<(), SessionError> {
        let template_id = self.template_id.ok_or(SessionError::MissingTemplateId)?;
        self.backend.delete_template(template_id).await?;
        self.reset();
        info!(template_id = %template_id, "deleted template");
        Ok(())
    }

    pub async fn compile_script(&self) -> Result<String, SessionError> {
        let template_id = self.template_id.ok_or(SessionError::MissingTemplateId)?;
        let script = self.backend.compile_script(template_id).await?;
        info!(template_id = %template_id, bytes = script.lua_script.len(), "compiled script");
        Ok(script.lua_script)
    }

    pub fn script_file_name(&self) -> String {
        format!("{}.lua", self.file_stem(DEFAULT_SCRIPT_STEM))
    }

    pub fn string_table_file_name(&self) -> String {
        format!("{}.stf", self.file_stem(DEFAULT_STRING_TABLE_STEM))
    }

    /// Ordered `(key, text)` rows of the string table as they will be exported.
    pub fn string_table_pairs(&self) -> Vec<(StringKey, String)> {
        self.text.export_pairs(self.graph.screens())
    }

    /// Sends the string table to the backend and returns the encoded artifact.
    pub async fn export_string_table(&self) -> Result<Vec<u8>, SessionError> {
        if !self.text.mode().is_externalized() {
            return Err(SessionError::NotExternalized);
        }
        let request = StringTableExportJson {
            template_name: self.name.clone(),
            data: self
                .string_table_pairs()
                .into_iter()
                .map(|(key, text)| (key.into_string(), text))
                .collect(),
        };
        let bytes = self.backend.export_string_table(&request).await?;
        info!(rows = request.data.len(), bytes = bytes.len(), "exported string table");
        Ok(bytes)
    }

    /// Switches between inline and externalized text for the whole template.
    ///
    /// The staged buffer is re-copied from the transformed graph, so uncommitted edits on the
    /// selected screen are dropped.
    pub fn toggle_text_mode(&mut self) -> TextMode {
        let mode = self.text.toggle(self.graph.screens_mut(), &self.name);
        self.graph.resync_selection();
        info!(mode = %mode, entries = self.text.table().len(), "toggled text mode");
        mode
    }

    /// Appends a screen with empty text and returns its id.
    pub fn add_screen(&mut self) -> ScreenId {
        let dialogue = self.text.blank_slot();
        self.graph.add_screen(dialogue).screen_id()
    }

    pub fn remove_screen(&mut self, screen_id: ScreenId) -> bool {
        let removed = self.graph.remove_screen(screen_id);
        debug!(screen_id = %screen_id, removed, "remove screen");
        removed
    }

    pub fn screen_name(&self, screen_id: ScreenId) -> &str {
        self.graph.screen_name(screen_id)
    }

    pub fn select_screen(
        &mut self,
        screen_id: ScreenId,
    ) -> Result<&mut StagedScreen, SessionError> {
        Ok(self.graph.select_screen(screen_id)?)
    }

    pub fn clear_selection(&mut self) {
        self.graph.clear_selection();
    }

    pub fn selected_screen_id(&self) -> Option<ScreenId> {
        self.graph.selected_screen_id()
    }

    pub fn staged(&self) -> Option<&StagedScreen> {
        self.graph.staged()
    }

    pub fn staged_mut(&mut self) -> Option<&mut StagedScreen> {
        self.graph.staged_mut()
    }

    /// Dialogue text of the staged screen, including uncommitted edits.
    pub fn staged_dialogue_text(&self) -> Option<&str> {
        self.graph.staged().map(|staged| staged.dialogue_text(self.text.table()))
    }

    /// Adds an option with `text` to the staged screen. Returns its index.
    pub fn add_option(&mut self, text: impl Into<String>) -> Option<usize> {
        if self.graph.staged().is_none() {
            return None;
        }
        let slot = self.text.blank_slot();
        let staged = self.graph.staged_mut()?;
        let index = staged.add_option(slot);
        staged.set_option_text(index, text);
        Some(index)
    }

    pub fn remove_option(&mut self, index: usize) -> bool {
        self.graph.staged_mut().and_then(|staged| staged.remove_option(index)).is_some()
    }

    /// Writes the staged buffer back into the graph (and its pending text into the table).
    pub fn commit_screen(&mut self) -> bool {
        self.graph.commit_screen(self.text.table_mut())
    }

    /// Creates a screen for the staged option `option_index`, commits, and selects it.
    pub fn add_screen_for_option(&mut self, option_index: usize) -> Option<ScreenId> {
        let staged = self.graph.staged()?;
        if option_index >= staged.options().len() || !self.graph.contains(staged.screen_id()) {
            return None;
        }
        let dialogue = self.text.blank_slot();
        self.graph.add_screen_for_option(option_index, dialogue, self.text.table_mut())
    }

    fn file_stem<'a>(&'a self, fallback: &'a str) -> &'a str {
        let name = self.name.trim();
        if name.is_empty() {
            fallback
        } else {
            name
        }
    }
}
