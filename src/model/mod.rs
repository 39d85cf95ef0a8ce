// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Templates contain an ordered list of screens; each screen carries its options. Text lives
//! either inline on the screens/options or in a string table addressed by `TextRef`s.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod screen;
pub mod string_table;
pub mod template;
pub mod text_ref;

pub use ids::{IdError, OptionId, ScreenId, Serial, StringKey, TemplateId};
pub use screen::{DialogueOption, Screen, TextSlot};
pub use string_table::StringTable;
pub use template::{Template, TemplateSummary, TextMode};
pub use text_ref::{ParseTextRefError, TextRef, CONVERSATION_NAMESPACE};
