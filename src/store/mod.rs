// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Template persistence.
//!
//! The editor never owns storage. It talks to a template backend through [`TemplateBackend`]:
//! over HTTP in production ([`HttpBackend`]) or in-process for tests and the demo
//! ([`MemoryBackend`]). Payloads are the JSON shapes in [`wire`].

pub mod http;
pub mod memory;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::TemplateId;

pub use http::HttpBackend;
pub use memory::{BackendRequest, MemoryBackend};
pub use wire::{
    template_from_json, template_to_json, OptionJson, ScreenJson, ScriptJson,
    StringTableExportJson, TemplateJson, TemplateSummaryJson, WireError,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("template not found (id={template_id})")]
    NotFound { template_id: TemplateId },
}

#[async_trait]
pub trait TemplateBackend: Send + Sync {
    async fn list_templates(&self) -> Result<Vec<TemplateSummaryJson>, BackendError>;

    async fn get_template(&self, template_id: TemplateId) -> Result<TemplateJson, BackendError>;

    /// Stores a new template; the response carries the assigned id.
    async fn create_template(&self, template: &TemplateJson) -> Result<TemplateJson, BackendError>;

    async fn update_template(
        &self,
        template_id: TemplateId,
        template: &TemplateJson,
    ) -> Result<TemplateJson, BackendError>;

    async fn delete_template(&self, template_id: TemplateId) -> Result<(), BackendError>;

    async fn compile_script(&self, template_id: TemplateId) -> Result<ScriptJson, BackendError>;

    /// Encodes the rows into the binary string-table artifact.
    async fn export_string_table(
        &self,
        request: &StringTableExportJson,
    ) -> Result<Vec<u8>, BackendError>;
}
