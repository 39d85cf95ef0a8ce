// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::{ScreenId, TemplateId};
use super::screen::Screen;
use super::string_table::StringTable;

/// How a template stores its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextMode {
    #[default]
    Inline,
    Externalized,
}

impl TextMode {
    pub fn is_externalized(self) -> bool {
        self == Self::Externalized
    }
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => f.write_str("inline"),
            Self::Externalized => f.write_str("externalized"),
        }
    }
}

/// A complete conversation template as exchanged with the backend.
///
/// Screen order matters: the first screen is the entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub template_id: Option<TemplateId>,
    pub name: String,
    pub mode: TextMode,
    pub screens: Vec<Screen>,
    /// Populated only for externalized templates.
    pub string_table: StringTable,
}

impl Template {
    pub fn entry_screen_id(&self) -> Option<ScreenId> {
        self.screens.first().map(Screen::screen_id)
    }
}

/// Listing entry for a stored template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub template_id: TemplateId,
    pub name: String,
}
