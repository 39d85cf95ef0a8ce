// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON shapes exchanged with the template backend, and their conversion to and from the model.
//!
//! Field names are the backend's and must not change: `stf_mode`, `leftDialog`,
//! `stfReference`, `templateName`. Externalized templates still carry the resolved text in
//! `custom_dialog_text`/`text`, which is what lets a load rebuild the string table.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::idgen::ScreenIdSequence;
use crate::model::{
    DialogueOption, OptionId, ParseTextRefError, Screen, ScreenId, StringTable, Template,
    TemplateId, TemplateSummary, TextMode, TextRef, TextSlot,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateJson {
    #[serde(default)]
    pub id: Option<TemplateId>,
    pub name: String,
    #[serde(default)]
    pub stf_mode: bool,
    #[serde(default)]
    pub initial_screen: Option<ScreenId>,
    #[serde(default)]
    pub screens: Vec<ScreenJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenJson {
    #[serde(default)]
    pub id: Option<ScreenId>,
    pub id_name: String,
    #[serde(default)]
    pub custom_dialog_text: String,
    #[serde(rename = "leftDialog", default, skip_serializing_if = "Option::is_none")]
    pub left_dialog: Option<String>,
    #[serde(default)]
    pub stop_conversation: bool,
    #[serde(default)]
    pub options: Vec<OptionJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OptionId>,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "stfReference", default, skip_serializing_if = "Option::is_none")]
    pub stf_reference: Option<String>,
    #[serde(default)]
    pub next_screen: Option<ScreenId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummaryJson {
    pub id: TemplateId,
    pub name: String,
}

impl From<TemplateSummaryJson> for TemplateSummary {
    fn from(json: TemplateSummaryJson) -> Self {
        Self { template_id: json.id, name: json.name }
    }
}

/// Compiled script returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptJson {
    #[serde(alias = "script_text")]
    pub lua_script: String,
}

/// Body of the string-table export request: ordered `[key, text]` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringTableExportJson {
    #[serde(rename = "templateName")]
    pub template_name: String,
    pub data: Vec<(String, String)>,
}

#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid text reference in {field}: {value:?}: {source}")]
    InvalidTextRef {
        field: &'static str,
        value: String,
        #[source]
        source: ParseTextRefError,
    },
}

pub fn template_to_json(template: &Template) -> TemplateJson {
    let resolve = |slot: &TextSlot| -> (String, Option<String>) {
        match slot {
            TextSlot::Inline(text) => (text.clone(), None),
            TextSlot::External(text_ref) => {
                let text = template.string_table.get(text_ref.key()).unwrap_or_default();
                (text.to_owned(), Some(text_ref.to_string()))
            }
        }
    };

    let screens = template
        .screens
        .iter()
        .map(|screen| {
            let (custom_dialog_text, left_dialog) = resolve(screen.dialogue());
            ScreenJson {
                id: Some(screen.screen_id()),
                id_name: screen.display_name().to_owned(),
                custom_dialog_text,
                left_dialog,
                stop_conversation: screen.terminates_conversation(),
                options: screen
                    .options()
                    .iter()
                    .map(|option| {
                        let (text, stf_reference) = resolve(option.text());
                        OptionJson {
                            id: option.option_id(),
                            text,
                            stf_reference,
                            next_screen: option.next_screen(),
                        }
                    })
                    .collect(),
            }
        })
        .collect();

    TemplateJson {
        id: template.template_id,
        name: template.name.clone(),
        stf_mode: template.mode.is_externalized(),
        initial_screen: template.entry_screen_id(),
        screens,
    }
}

/// Rebuilds a template (and, in externalized mode, its string table) from backend JSON.
///
/// Screens missing an id get fresh ones above every id present, as does every screen after
/// the first that repeats an id. When `initial_screen` names
/// a screen other than the first, that screen is moved to the front so the entry point is
/// always `screens[0]`. Option targets naming unknown screens are dropped to `None`.
pub fn template_from_json(json: TemplateJson) -> Result<Template, WireError> {
    let mode = if json.stf_mode { TextMode::Externalized } else { TextMode::Inline };
    let mut table = StringTable::default();
    let mut screen_ids = ScreenIdSequence::after(json.screens.iter().filter_map(|s| s.id));

    let mut slot_for = |text: String,
                        reference: Option<String>,
                        field: &'static str|
     -> Result<TextSlot, WireError> {
        let reference = reference.filter(|r| !r.is_empty() && mode.is_externalized());
        let Some(raw) = reference else {
            return Ok(TextSlot::Inline(text));
        };
        let text_ref = TextRef::parse(&raw)
            .map_err(|source| WireError::InvalidTextRef { field, value: raw.clone(), source })?;
        table.insert(text_ref.key().clone(), text);
        Ok(TextSlot::External(text_ref))
    };

    let mut screens = Vec::with_capacity(json.screens.len());
    let mut seen = BTreeSet::new();
    for screen_json in json.screens {
        let screen_id = match screen_json.id {
            Some(id) if seen.insert(id) => id,
            _ => {
                let id = screen_ids.next_id();
                seen.insert(id);
                id
            }
        };
        let dialogue =
            slot_for(screen_json.custom_dialog_text, screen_json.left_dialog, "leftDialog")?;
        let mut screen = Screen::new(screen_id, screen_json.id_name, dialogue);
        screen.set_terminates_conversation(screen_json.stop_conversation);
        for option_json in screen_json.options {
            let text = slot_for(option_json.text, option_json.stf_reference, "stfReference")?;
            screen.options_mut().push(DialogueOption::new_with(
                option_json.id,
                text,
                option_json.next_screen,
            ));
        }
        screens.push(screen);
    }

    if let Some(initial) = json.initial_screen {
        if let Some(index) = screens.iter().position(|s| s.screen_id() == initial) {
            let entry = screens.remove(index);
            screens.insert(0, entry);
        }
    }

    let known = screens.iter().map(Screen::screen_id).collect::<Vec<_>>();
    for screen in &mut screens {
        for option in screen.options_mut() {
            if option.next_screen().is_some_and(|target| !known.contains(&target)) {
                option.set_next_screen(None);
            }
        }
    }

    Ok(Template { template_id: json.id, name: json.name, mode, screens, string_table: table })
}
