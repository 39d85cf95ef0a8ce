// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Externalization engine.
//!
//! Moves screen and option text between the graph (inline mode) and a string table keyed by
//! generated ids (externalized mode). The transform preserves text values across an
//! `inline -> externalized -> inline` round trip; it does not preserve keys, because going
//! back inline drops the table and the next externalization mints fresh ones.

use tracing::debug;

use crate::idgen::KeyGenerator;
use crate::model::{Screen, StringKey, StringTable, TextMode, TextRef, TextSlot};

#[derive(Debug, Clone)]
pub struct TextEngine {
    mode: TextMode,
    table: StringTable,
    keys: KeyGenerator,
    /// Template name captured by the last externalization; used for references minted later.
    namespace_name: Option<String>,
}

impl TextEngine {
    pub fn new() -> Self {
        Self::with_keys(KeyGenerator::new())
    }

    pub fn with_keys(keys: KeyGenerator) -> Self {
        Self { mode: TextMode::Inline, table: StringTable::default(), keys, namespace_name: None }
    }

    /// Engine state for a template that was loaded already externalized.
    pub(crate) fn restore(&mut self, mode: TextMode, table: StringTable, namespace_name: String) {
        self.mode = mode;
        if mode.is_externalized() {
            self.table = table;
            self.namespace_name = Some(namespace_name);
        } else {
            self.table = StringTable::default();
            self.namespace_name = None;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.mode = TextMode::Inline;
        self.table.clear();
        self.namespace_name = None;
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    pub fn table(&self) -> &StringTable {
        &self.table
    }

    pub(crate) fn table_mut(&mut self) -> &mut StringTable {
        &mut self.table
    }

    /// Template name references are currently minted under, if externalized.
    pub fn namespace_name(&self) -> Option<&str> {
        self.namespace_name.as_deref()
    }

    /// Empty text slot for a new screen or option in the current mode.
    ///
    /// When externalized this mints a key and records an empty table entry for it.
    pub fn blank_slot(&mut self) -> TextSlot {
        match (self.mode, self.namespace_name.clone()) {
            (TextMode::Externalized, Some(name)) => {
                let key = self.mint_key();
                self.table.insert(key.clone(), String::new());
                TextSlot::External(TextRef::new(name, key))
            }
            _ => TextSlot::default(),
        }
    }

    /// Text behind `slot`: inline text, the table value, or empty for an unknown key.
    pub fn resolve<'a>(&'a self, slot: &'a TextSlot) -> &'a str {
        match slot {
            TextSlot::Inline(text) => text,
            TextSlot::External(text_ref) => self.table.get(text_ref.key()).unwrap_or_default(),
        }
    }

    /// Moves all text into the table under `template_name`.
    ///
    /// Slots that already hold a reference keep their key but are re-homed under the current
    /// name, so running this twice in a row leaves the key set unchanged.
    pub fn externalize(&mut self, screens: &mut [Screen], template_name: &str) {
        let mut minted = 0usize;
        let mut reused = 0usize;

        for screen in screens.iter_mut() {
            for slot in screen.text_slots_mut() {
                let next = match slot {
                    TextSlot::Inline(text) => {
                        let key = self.mint_key();
                        self.table.insert(key.clone(), std::mem::take(text));
                        minted += 1;
                        TextRef::new(template_name, key)
                    }
                    TextSlot::External(text_ref) => {
                        if !self.table.contains_key(text_ref.key()) {
                            self.table.insert(text_ref.key().clone(), String::new());
                        }
                        reused += 1;
                        text_ref.rehome(template_name)
                    }
                };
                *slot = TextSlot::External(next);
            }
        }

        self.mode = TextMode::Externalized;
        self.namespace_name = Some(template_name.to_owned());
        debug!(template = template_name, minted, reused, "externalized template text");
    }

    /// Moves any inline slots into the table under the current namespace name.
    ///
    /// Existing references are left exactly as they are. Used after loading an externalized
    /// template whose payload mixed references with plain text. No-op in inline mode.
    pub(crate) fn adopt_inline(&mut self, screens: &mut [Screen]) -> usize {
        let Some(name) = self.namespace_name.clone().filter(|_| self.mode.is_externalized())
        else {
            return 0;
        };

        let mut adopted = 0usize;
        for screen in screens.iter_mut() {
            for slot in screen.text_slots_mut() {
                let TextSlot::Inline(text) = slot else {
                    continue;
                };
                let key = self.mint_key();
                self.table.insert(key.clone(), std::mem::take(text));
                *slot = TextSlot::External(TextRef::new(name.as_str(), key));
                adopted += 1;
            }
        }
        adopted
    }

    /// Pulls all text back onto the graph and drops the table.
    ///
    /// A reference whose key is missing from the table falls back to empty text instead of
    /// failing the transition.
    pub fn internalize(&mut self, screens: &mut [Screen]) {
        let mut missing = 0usize;

        for screen in screens.iter_mut() {
            for slot in screen.text_slots_mut() {
                let TextSlot::External(text_ref) = slot else {
                    continue;
                };
                let text = match self.table.get(text_ref.key()) {
                    Some(text) => text.to_owned(),
                    None => {
                        missing += 1;
                        String::new()
                    }
                };
                *slot = TextSlot::Inline(text);
            }
        }

        self.table.clear();
        self.mode = TextMode::Inline;
        self.namespace_name = None;
        debug!(missing, "internalized template text");
    }

    /// Flips the mode, transforming `screens` accordingly. Returns the new mode.
    pub fn toggle(&mut self, screens: &mut [Screen], template_name: &str) -> TextMode {
        match self.mode {
            TextMode::Inline => self.externalize(screens, template_name),
            TextMode::Externalized => self.internalize(screens),
        }
        self.mode
    }

    /// Ordered `(key, text)` pairs for string-table export.
    ///
    /// Order follows the graph: per screen (in screen order) its dialogue first, then each
    /// option's text. Inline slots and unreferenced table entries are not exported.
    pub fn export_pairs(&self, screens: &[Screen]) -> Vec<(StringKey, String)> {
        screens
            .iter()
            .flat_map(|screen| screen.text_slots())
            .filter_map(|slot| slot.text_ref())
            .map(|text_ref| {
                let text = self.table.get(text_ref.key()).unwrap_or_default();
                (text_ref.key().clone(), text.to_owned())
            })
            .collect()
    }

    fn mint_key(&mut self) -> StringKey {
        let table = &self.table;
        self.keys.mint_unused(|key| table.contains_key(key))
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}
