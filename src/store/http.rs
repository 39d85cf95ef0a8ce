// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP client for the template backend.
//!
//! Routes (relative to the configured base URL):
//! - `GET /templates`, `POST /templates`
//! - `GET|PUT|DELETE /templates/{id}`
//! - `GET /templates/{id}/lua`
//! - `POST /templates/stf` (binary response)

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::wire::{ScriptJson, StringTableExportJson, TemplateJson, TemplateSummaryJson};
use super::{BackendError, TemplateBackend};
use crate::config::ClientConfig;
use crate::model::TemplateId;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn template_url(&self, template_id: TemplateId) -> String {
        self.config.endpoint(&format!("templates/{template_id}"))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        template_id: Option<TemplateId>,
    ) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(|e| BackendError::Network(e.to_string()))?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "backend response");

        if status == StatusCode::NOT_FOUND {
            if let Some(template_id) = template_id {
                return Err(BackendError::NotFound { template_id });
            }
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status: status.as_u16(), message });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        template_id: Option<TemplateId>,
    ) -> Result<T, BackendError> {
        self.send(request, template_id)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TemplateBackend for HttpBackend {
    async fn list_templates(&self) -> Result<Vec<TemplateSummaryJson>, BackendError> {
        let request = self.client.get(self.config.endpoint("templates"));
        self.send_json(request, None).await
    }

    async fn get_template(&self, template_id: TemplateId) -> Result<TemplateJson, BackendError> {
        let request = self.client.get(self.template_url(template_id));
        self.send_json(request, Some(template_id)).await
    }

    async fn create_template(&self, template: &TemplateJson) -> Result<TemplateJson, BackendError> {
        let request = self.client.post(self.config.endpoint("templates")).json(template);
        self.send_json(request, None).await
    }

    async fn update_template(
        &self,
        template_id: TemplateId,
        template: &TemplateJson,
    ) -> Result<TemplateJson, BackendError> {
        let request = self.client.put(self.template_url(template_id)).json(template);
        self.send_json(request, Some(template_id)).await
    }

    async fn delete_template(&self, template_id: TemplateId) -> Result<(), BackendError> {
        let request = self.client.delete(self.template_url(template_id));
        self.send(request, Some(template_id)).await?;
        Ok(())
    }

    async fn compile_script(&self, template_id: TemplateId) -> Result<ScriptJson, BackendError> {
        let url = format!("{}/lua", self.template_url(template_id));
        self.send_json(self.client.get(url), Some(template_id)).await
    }

    async fn export_string_table(
        &self,
        request: &StringTableExportJson,
    ) -> Result<Vec<u8>, BackendError> {
        let builder = self.client.post(self.config.endpoint("templates/stf")).json(request);
        let bytes = self
            .send(builder, None)
            .await?
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
