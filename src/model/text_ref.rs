// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::{IdError, StringKey};

/// Namespace every conversation text reference lives under.
pub const CONVERSATION_NAMESPACE: &str = "conversation";

/// Composite reference from a screen or option into the string table.
///
/// Canonical format: `@<namespace>/<template_name>:<key>`, e.g.
/// `@conversation/innkeeper:s_k3j9x0ab`.
///
/// The template name is whatever the template was called when the reference was minted; it
/// is not rewritten when the template is renamed later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextRef {
    namespace: String,
    template_name: String,
    key: StringKey,
}

impl TextRef {
    pub fn new(template_name: impl Into<String>, key: StringKey) -> Self {
        Self {
            namespace: CONVERSATION_NAMESPACE.to_owned(),
            template_name: template_name.into(),
            key,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn key(&self) -> &StringKey {
        &self.key
    }

    /// Same key, re-homed under `template_name`.
    pub fn rehome(&self, template_name: &str) -> Self {
        Self::new(template_name, self.key.clone())
    }

    pub fn parse(input: &str) -> Result<Self, ParseTextRefError> {
        let rest = input.strip_prefix('@').ok_or(ParseTextRefError::MissingPrefix)?;

        let (namespace, remainder) =
            rest.split_once('/').ok_or(ParseTextRefError::MissingTemplateName)?;
        if namespace.is_empty() {
            return Err(ParseTextRefError::MissingNamespace);
        }

        let (template_name, key) =
            remainder.rsplit_once(':').ok_or(ParseTextRefError::MissingKey)?;
        if key.is_empty() {
            return Err(ParseTextRefError::MissingKey);
        }
        let key = StringKey::new(key.to_owned()).map_err(ParseTextRefError::InvalidKey)?;

        Ok(Self {
            namespace: namespace.to_owned(),
            template_name: template_name.to_owned(),
            key,
        })
    }
}

impl fmt::Display for TextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}/{}:{}", self.namespace, self.template_name, self.key)
    }
}

impl FromStr for TextRef {
    type Err = ParseTextRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTextRefError {
    MissingPrefix,
    MissingNamespace,
    MissingTemplateName,
    MissingKey,
    InvalidKey(IdError),
}

impl fmt::Display for ParseTextRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix => f.write_str("text reference must start with '@'"),
            Self::MissingNamespace => f.write_str("text reference is missing its namespace"),
            Self::MissingTemplateName => {
                f.write_str("text reference is missing the '/<template>' segment")
            }
            Self::MissingKey => f.write_str("text reference is missing the ':<key>' suffix"),
            Self::InvalidKey(err) => write!(f, "invalid string key: {err}"),
        }
    }
}

impl std::error::Error for ParseTextRefError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidKey(err) => Some(err),
            _ => None,
        }
    }
}
