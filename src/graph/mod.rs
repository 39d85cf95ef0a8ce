// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph store: the ordered screens of one template plus the current selection.
//!
//! Every operation is total. Unknown ids degrade to sentinels or no-ops so the editor can
//! always render; the only reported failure is selecting a screen that does not exist.
//!
//! Invariants kept under mutation:
//! - once a screen exists, at least one always exists and the first one is the entry point;
//! - no option (committed or staged) targets a screen that was removed;
//! - a selection always comes with its staged buffer.

mod staged;

use std::fmt;

use crate::idgen::ScreenIdSequence;
use crate::model::{Screen, ScreenId, StringTable, TextSlot};

pub use staged::StagedScreen;

/// Display name given to a screen promoted to entry point by a removal.
pub const ENTRY_SCREEN_LABEL: &str = "first_screen";

/// Label returned by [`GraphStore::screen_name`] for ids that are not in the graph.
pub const UNKNOWN_SCREEN_LABEL: &str = "Unknown Screen";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    ScreenNotFound { screen_id: ScreenId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScreenNotFound { screen_id } => write!(f, "screen not found (id={screen_id})"),
        }
    }
}

impl std::error::Error for GraphError {}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphStore {
    screens: Vec<Screen>,
    selection: Option<StagedScreen>,
    screen_ids: ScreenIdSequence,
}

impl GraphStore {
    /// Graph over already-built screens (e.g. from a loaded template). Nothing is selected.
    pub fn from_screens(screens: Vec<Screen>) -> Self {
        let screen_ids = ScreenIdSequence::after(screens.iter().map(Screen::screen_id));
        Self { screens, selection: None, screen_ids }
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn entry_screen(&self) -> Option<&Screen> {
        self.screens.first()
    }

    pub fn screen(&self, screen_id: ScreenId) -> Option<&Screen> {
        self.screens.iter().find(|s| s.screen_id() == screen_id)
    }

    pub fn contains(&self, screen_id: ScreenId) -> bool {
        self.screen(screen_id).is_some()
    }

    /// Display name of `screen_id`, or [`UNKNOWN_SCREEN_LABEL`].
    pub fn screen_name(&self, screen_id: ScreenId) -> &str {
        self.screen(screen_id).map(Screen::display_name).unwrap_or(UNKNOWN_SCREEN_LABEL)
    }

    pub fn selected_screen_id(&self) -> Option<ScreenId> {
        self.selection.as_ref().map(StagedScreen::screen_id)
    }

    pub fn staged(&self) -> Option<&StagedScreen> {
        self.selection.as_ref()
    }

    pub fn staged_mut(&mut self) -> Option<&mut StagedScreen> {
        self.selection.as_mut()
    }

    /// Appends a screen named after the current count and returns it.
    pub fn add_screen(&mut self, dialogue: TextSlot) -> &Screen {
        let screen_id = self.screen_ids.next_id();
        let display_name = format!("screen_{}", self.screens.len() + 1);
        self.screens.push(Screen::new(screen_id, display_name, dialogue));
        let index = self.screens.len() - 1;
        &self.screens[index]
    }

    /// Removes `screen_id` and repairs every reference to it.
    ///
    /// Refuses to remove the last remaining screen. Returns whether a screen was removed.
    pub fn remove_screen(&mut self, screen_id: ScreenId) -> bool {
        if self.screens.len() <= 1 {
            return false;
        }
        let Some(index) = self.screens.iter().position(|s| s.screen_id() == screen_id) else {
            return false;
        };

        self.screens.remove(index);
        for screen in &mut self.screens {
            screen.detach_target(screen_id);
        }

        let mut promoted = None;
        if index == 0 {
            if let Some(entry) = self.screens.first_mut() {
                entry.set_display_name(ENTRY_SCREEN_LABEL);
                promoted = Some(entry.screen_id());
            }
        }

        if self.selected_screen_id() == Some(screen_id) {
            self.selection = None;
        } else if let Some(staged) = self.selection.as_mut() {
            staged.detach_target(screen_id);
            if promoted == Some(staged.screen_id()) {
                staged.set_display_name(ENTRY_SCREEN_LABEL);
            }
        }

        true
    }

    /// Selects `screen_id`, replacing any staged buffer with a fresh copy of the screen.
    pub fn select_screen(&mut self, screen_id: ScreenId) -> Result<&mut StagedScreen, GraphError> {
        let screen = self.screen(screen_id).ok_or(GraphError::ScreenNotFound { screen_id })?;
        let staged = StagedScreen::from_screen(screen);
        Ok(self.selection.insert(staged))
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Writes the staged buffer back over its screen.
    ///
    /// No-op (returns false) without a selection or when the selected screen is gone.
    pub fn commit_screen(&mut self, table: &mut StringTable) -> bool {
        let Some(staged) = self.selection.as_mut() else {
            return false;
        };
        let Some(slot) = self.screens.iter_mut().find(|s| s.screen_id() == staged.screen_id())
        else {
            return false;
        };
        *slot = staged.commit(table);
        true
    }

    /// Creates a screen, points the staged option at it, commits, and selects the new screen.
    ///
    /// Nothing changes unless a screen is selected and `option_index` names one of its
    /// options. Returns the new screen id.
    pub fn add_screen_for_option(
        &mut self,
        option_index: usize,
        dialogue: TextSlot,
        table: &mut StringTable,
    ) -> Option<ScreenId> {
        let staged = self.selection.as_ref()?;
        if option_index >= staged.options().len() || !self.contains(staged.screen_id()) {
            return None;
        }

        let new_id = self.add_screen(dialogue).screen_id();
        if let Some(staged) = self.selection.as_mut() {
            staged.set_option_target(option_index, Some(new_id));
        }
        self.commit_screen(table);

        let staged = StagedScreen::from_screen(self.screens.last()?);
        self.selection = Some(staged);
        Some(new_id)
    }

    /// Mutable access to every screen for whole-graph text rewrites.
    pub(crate) fn screens_mut(&mut self) -> &mut [Screen] {
        &mut self.screens
    }

    /// Re-copies the selected screen from the graph, dropping staged edits.
    pub(crate) fn resync_selection(&mut self) {
        if let Some(screen_id) = self.selected_screen_id() {
            if self.select_screen(screen_id).is_err() {
                self.selection = None;
            }
        }
    }
}
