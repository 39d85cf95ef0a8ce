// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process template backend for tests and `--demo`.
//!
//! Ids are assigned on create. Every call is recorded so callers can assert on the request
//! sequence, and a failure can be queued to exercise error paths.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::wire::{
    OptionJson, ScreenJson, ScriptJson, StringTableExportJson, TemplateJson, TemplateSummaryJson,
};
use super::{BackendError, TemplateBackend};
use crate::model::{ScreenId, TemplateId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRequest {
    List,
    Get(TemplateId),
    Create { name: String },
    Update(TemplateId),
    Delete(TemplateId),
    Compile(TemplateId),
    ExportStrings { template_name: String, rows: usize },
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    templates: BTreeMap<TemplateId, TemplateJson>,
    requests: Vec<BackendRequest>,
    fail_next: Option<BackendError>,
}

impl MemoryState {
    fn begin(&mut self, request: BackendRequest) -> Result<(), BackendError> {
        self.requests.push(request);
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn existing(&self, template_id: TemplateId) -> Result<&TemplateJson, BackendError> {
        self.templates.get(&template_id).ok_or(BackendError::NotFound { template_id })
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with a small innkeeper conversation (id 1).
    pub fn demo() -> Self {
        let state = MemoryState {
            next_id: 1,
            templates: BTreeMap::from([(TemplateId::new(1), demo_template(TemplateId::new(1)))]),
            ..MemoryState::default()
        };
        Self { state: Mutex::new(state) }
    }

    /// Makes the next call fail with `err` (after it is recorded).
    pub async fn fail_next(&self, err: BackendError) {
        self.state.lock().await.fail_next = Some(err);
    }

    pub async fn requests(&self) -> Vec<BackendRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn stored(&self, template_id: TemplateId) -> Option<TemplateJson> {
        self.state.lock().await.templates.get(&template_id).cloned()
    }

    pub async fn template_count(&self) -> usize {
        self.state.lock().await.templates.len()
    }
}

#[async_trait]
impl TemplateBackend for MemoryBackend {
    async fn list_templates(&self) -> Result<Vec<TemplateSummaryJson>, BackendError> {
        let mut state = self.state.lock().await;
        state.begin(BackendRequest::List)?;
        Ok(state
            .templates
            .values()
            .filter_map(|t| t.id.map(|id| TemplateSummaryJson { id, name: t.name.clone() }))
            .collect())
    }

    async fn get_template(&self, template_id: TemplateId) -> Result<TemplateJson, BackendError> {
        let mut state = self.state.lock().await;
        state.begin(BackendRequest::Get(template_id))?;
        state.existing(template_id).cloned()
    }

    async fn create_template(&self, template: &TemplateJson) -> Result<TemplateJson, BackendError> {
        let mut state = self.state.lock().await;
        state.begin(BackendRequest::Create { name: template.name.clone() })?;
        state.next_id += 1;
        let template_id = TemplateId::new(state.next_id);
        let stored = TemplateJson { id: Some(template_id), ..template.clone() };
        state.templates.insert(template_id, stored.clone());
        Ok(stored)
    }

    async fn update_template(
        &self,
        template_id: TemplateId,
        template: &TemplateJson,
    ) -> Result<TemplateJson, BackendError> {
        let mut state = self.state.lock().await;
        state.begin(BackendRequest::Update(template_id))?;
        state.existing(template_id)?;
        let stored = TemplateJson { id: Some(template_id), ..template.clone() };
        state.templates.insert(template_id, stored.clone());
        Ok(stored)
    }

    async fn delete_template(&self, template_id: TemplateId) -> Result<(), BackendError> {
        let mut state = self.state.lock().await;
        state.begin(BackendRequest::Delete(template_id))?;
        state
            .templates
            .remove(&template_id)
            .map(|_| ())
            .ok_or(BackendError::NotFound { template_id })
    }

    async fn compile_script(&self, template_id: TemplateId) -> Result<ScriptJson, BackendError> {
        let mut state = self.state.lock().await;
        state.begin(BackendRequest::Compile(template_id))?;
        let template = state.existing(template_id)?;
        Ok(ScriptJson { lua_script: outline_script(template) })
    }

    async fn export_string_table(
        &self,
        request: &StringTableExportJson,
    ) -> Result<Vec<u8>, BackendError> {
        let mut state = self.state.lock().await;
        state.begin(BackendRequest::ExportStrings {
            template_name: request.template_name.clone(),
            rows: request.data.len(),
        })?;
        let mut out = Vec::new();
        for (key, text) in &request.data {
            out.extend_from_slice(key.as_bytes());
            out.push(b'\t');
            out.extend_from_slice(text.as_bytes());
            out.push(b'\n');
        }
        Ok(out)
    }
}

/// Stand-in for the compiled script: one comment line per screen and option.
fn outline_script(template: &TemplateJson) -> String {
    let mut out = format!("-- {}\n", template.name);
    for screen in &template.screens {
        out.push_str(&format!("-- [{}] {}\n", screen.id_name, screen.custom_dialog_text));
        for option in &screen.options {
            let target =
                option.next_screen.map(|id| id.to_string()).unwrap_or_else(|| "end".to_owned());
            out.push_str(&format!("--   > {} -> {target}\n", option.text));
        }
    }
    out
}

fn demo_template(template_id: TemplateId) -> TemplateJson {
    let option = |text: &str, next: Option<u64>| OptionJson {
        id: None,
        text: text.to_owned(),
        stf_reference: None,
        next_screen: next.map(ScreenId::new),
    };
    let screen = |id: u64, name: &str, text: &str, stop: bool, options: Vec<OptionJson>| {
        ScreenJson {
            id: Some(ScreenId::new(id)),
            id_name: name.to_owned(),
            custom_dialog_text: text.to_owned(),
            left_dialog: None,
            stop_conversation: stop,
            options,
        }
    };

    TemplateJson {
        id: Some(template_id),
        name: "innkeeper".to_owned(),
        stf_mode: false,
        initial_screen: Some(ScreenId::new(1)),
        screens: vec![
            screen(
                1,
                "screen_1",
                "Welcome, traveler. What brings you in?",
                false,
                vec![option("A room for the night.", Some(2)), option("Just passing.", Some(3))],
            ),
            screen(
                2,
                "rooms",
                "Five silver, breakfast included.",
                false,
                vec![option("Deal.", Some(3)), option("Too pricey.", Some(1))],
            ),
            screen(3, "farewell", "Safe roads, friend.", true, Vec::new()),
        ],
    }
}
