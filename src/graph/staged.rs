// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{DialogueOption, Screen, ScreenId, StringKey, StringTable, TextSlot};

/// Detached working copy of the selected screen.
///
/// Nothing here touches the graph until
/// [`GraphStore::commit_screen`](super::GraphStore::commit_screen). Text edits on
/// externalized slots are kept per key and only reach the string table on commit, so
/// abandoning the buffer abandons them too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedScreen {
    screen: Screen,
    pending_text: BTreeMap<StringKey, String>,
}

impl StagedScreen {
    pub(crate) fn from_screen(screen: &Screen) -> Self {
        Self { screen: screen.clone(), pending_text: BTreeMap::new() }
    }

    pub fn screen_id(&self) -> ScreenId {
        self.screen.screen_id()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn options(&self) -> &[DialogueOption] {
        self.screen.options()
    }

    pub fn display_name(&self) -> &str {
        self.screen.display_name()
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.screen.set_display_name(display_name);
    }

    pub fn set_terminates_conversation(&mut self, terminates: bool) {
        self.screen.set_terminates_conversation(terminates);
    }

    pub fn dialogue_text<'a>(&'a self, table: &'a StringTable) -> &'a str {
        self.resolve(self.screen.dialogue(), table)
    }

    pub fn set_dialogue_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.screen.dialogue() {
            TextSlot::Inline(_) => self.screen.set_dialogue(TextSlot::Inline(text)),
            TextSlot::External(text_ref) => {
                self.pending_text.insert(text_ref.key().clone(), text);
            }
        }
    }

    pub fn option_text<'a>(&'a self, index: usize, table: &'a StringTable) -> Option<&'a str> {
        let option = self.screen.options().get(index)?;
        Some(self.resolve(option.text(), table))
    }

    /// Returns false when `index` is out of range.
    pub fn set_option_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        let Some(option) = self.screen.options_mut().get_mut(index) else {
            return false;
        };
        let text = text.into();
        match option.text() {
            TextSlot::Inline(_) => option.set_text(TextSlot::Inline(text)),
            TextSlot::External(text_ref) => {
                self.pending_text.insert(text_ref.key().clone(), text);
            }
        }
        true
    }

    /// Returns false when `index` is out of range.
    pub fn set_option_target(&mut self, index: usize, next_screen: Option<ScreenId>) -> bool {
        match self.screen.options_mut().get_mut(index) {
            Some(option) => {
                option.set_next_screen(next_screen);
                true
            }
            None => false,
        }
    }

    /// Appends an option with no target and returns its index.
    pub fn add_option(&mut self, text: TextSlot) -> usize {
        let options = self.screen.options_mut();
        options.push(DialogueOption::new(text));
        options.len() - 1
    }

    /// Removes by position. The option's string-table entry, if any, is left in place.
    pub fn remove_option(&mut self, index: usize) -> Option<DialogueOption> {
        let options = self.screen.options_mut();
        (index < options.len()).then(|| options.remove(index))
    }

    pub fn has_pending_text(&self) -> bool {
        !self.pending_text.is_empty()
    }

    pub(crate) fn detach_target(&mut self, target: ScreenId) -> usize {
        self.screen.detach_target(target)
    }

    /// Flushes staged text into `table` and returns the screen to store in the graph.
    pub(crate) fn commit(&mut self, table: &mut StringTable) -> Screen {
        for (key, text) in std::mem::take(&mut self.pending_text) {
            table.insert(key, text);
        }
        self.screen.clone()
    }

    fn resolve<'a>(&'a self, slot: &'a TextSlot, table: &'a StringTable) -> &'a str {
        match slot {
            TextSlot::Inline(text) => text,
            TextSlot::External(text_ref) => self
                .pending_text
                .get(text_ref.key())
                .map(String::as_str)
                .or_else(|| table.get(text_ref.key()))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StagedScreen;
    use crate::model::{Screen, ScreenId, StringKey, StringTable, TextRef, TextSlot};

    fn external_screen(key: &str) -> Screen {
        let key = StringKey::new(key).unwrap();
        Screen::new(ScreenId::new(1), "screen_1", TextSlot::External(TextRef::new("inn", key)))
    }

    #[test]
    fn inline_edits_stay_on_the_copy() {
        let original = Screen::new(ScreenId::new(1), "screen_1", TextSlot::inline("Hello"));
        let mut staged = StagedScreen::from_screen(&original);
        let table = StringTable::default();

        staged.set_dialogue_text("Hi there");
        staged.add_option(TextSlot::inline("Bye"));

        assert_eq!(staged.dialogue_text(&table), "Hi there");
        assert_eq!(original.dialogue().inline_text(), Some("Hello"));
        assert!(original.options().is_empty());
    }

    #[test]
    fn external_edits_are_pending_until_commit() {
        let key = StringKey::new("s_dialog").unwrap();
        let mut table = StringTable::default();
        table.insert(key.clone(), "Hello");

        let mut staged = StagedScreen::from_screen(&external_screen("s_dialog"));
        staged.set_dialogue_text("Howdy");

        assert_eq!(staged.dialogue_text(&table), "Howdy");
        assert_eq!(table.get(&key), Some("Hello"));
        assert!(staged.has_pending_text());

        let committed = staged.commit(&mut table);
        assert_eq!(table.get(&key), Some("Howdy"));
        assert!(!staged.has_pending_text());
        assert!(committed.dialogue().is_external());
    }

    #[test]
    fn option_edits_report_out_of_range() {
        let mut staged = StagedScreen::from_screen(&external_screen("s_dialog"));
        assert!(!staged.set_option_text(0, "nope"));
        assert!(!staged.set_option_target(0, None));
        assert_eq!(staged.remove_option(0), None);

        let index = staged.add_option(TextSlot::inline("Yes"));
        assert_eq!(index, 0);
        assert!(staged.set_option_target(0, Some(ScreenId::new(4))));
        assert_eq!(staged.options()[0].next_screen(), Some(ScreenId::new(4)));

        let removed = staged.remove_option(0).expect("removed option");
        assert_eq!(removed.text().inline_text(), Some("Yes"));
        assert!(staged.options().is_empty());
    }

    #[test]
    fn unresolvable_reference_reads_as_empty() {
        let staged = StagedScreen::from_screen(&external_screen("s_missing"));
        assert_eq!(staged.dialogue_text(&StringTable::default()), "");
    }
}
