// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{OptionId, ScreenId};
use super::text_ref::TextRef;

/// Where a screen's or option's text lives.
///
/// Inline text and a string-table reference are mutually exclusive; which variant is used
/// follows the template's text mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSlot {
    Inline(String),
    External(TextRef),
}

impl TextSlot {
    pub fn inline(text: impl Into<String>) -> Self {
        Self::Inline(text.into())
    }

    pub fn inline_text(&self) -> Option<&str> {
        match self {
            Self::Inline(text) => Some(text),
            Self::External(_) => None,
        }
    }

    pub fn text_ref(&self) -> Option<&TextRef> {
        match self {
            Self::Inline(_) => None,
            Self::External(text_ref) => Some(text_ref),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

impl Default for TextSlot {
    fn default() -> Self {
        Self::Inline(String::new())
    }
}

/// One player response on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogueOption {
    option_id: Option<OptionId>,
    text: TextSlot,
    next_screen: Option<ScreenId>,
}

impl DialogueOption {
    pub fn new(text: TextSlot) -> Self {
        Self { option_id: None, text, next_screen: None }
    }

    pub fn new_with(
        option_id: Option<OptionId>,
        text: TextSlot,
        next_screen: Option<ScreenId>,
    ) -> Self {
        Self { option_id, text, next_screen }
    }

    pub fn option_id(&self) -> Option<OptionId> {
        self.option_id
    }

    pub fn text(&self) -> &TextSlot {
        &self.text
    }

    pub fn set_text(&mut self, text: TextSlot) {
        self.text = text;
    }

    pub fn next_screen(&self) -> Option<ScreenId> {
        self.next_screen
    }

    pub fn set_next_screen(&mut self, next_screen: Option<ScreenId>) {
        self.next_screen = next_screen;
    }
}

/// A node in the conversation graph: one line of dialogue plus its responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    screen_id: ScreenId,
    display_name: String,
    dialogue: TextSlot,
    terminates_conversation: bool,
    options: Vec<DialogueOption>,
}

impl Screen {
    pub fn new(screen_id: ScreenId, display_name: impl Into<String>, dialogue: TextSlot) -> Self {
        Self {
            screen_id,
            display_name: display_name.into(),
            dialogue,
            terminates_conversation: false,
            options: Vec::new(),
        }
    }

    pub fn screen_id(&self) -> ScreenId {
        self.screen_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    pub fn dialogue(&self) -> &TextSlot {
        &self.dialogue
    }

    pub fn set_dialogue(&mut self, dialogue: TextSlot) {
        self.dialogue = dialogue;
    }

    pub fn terminates_conversation(&self) -> bool {
        self.terminates_conversation
    }

    pub fn set_terminates_conversation(&mut self, terminates: bool) {
        self.terminates_conversation = terminates;
    }

    pub fn options(&self) -> &[DialogueOption] {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Vec<DialogueOption> {
        &mut self.options
    }

    /// Nulls every option target pointing at `target`; returns how many were rewritten.
    pub fn detach_target(&mut self, target: ScreenId) -> usize {
        let mut rewritten = 0;
        for option in &mut self.options {
            if option.next_screen == Some(target) {
                option.next_screen = None;
                rewritten += 1;
            }
        }
        rewritten
    }

    /// All text slots of this screen in export order: dialogue first, then each option.
    pub fn text_slots(&self) -> impl Iterator<Item = &TextSlot> {
        std::iter::once(&self.dialogue).chain(self.options.iter().map(|o| &o.text))
    }

    pub fn text_slots_mut(&mut self) -> impl Iterator<Item = &mut TextSlot> {
        std::iter::once(&mut self.dialogue).chain(self.options.iter_mut().map(|o| &mut o.text))
    }
}
