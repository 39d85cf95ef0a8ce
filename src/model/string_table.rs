// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::StringKey;

/// Local key → text mapping backing externalized templates.
///
/// Keys that nothing references any more are allowed to linger; they are never exported
/// because export walks the graph, not the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringTable {
    entries: BTreeMap<StringKey, String>,
}

impl StringTable {
    pub fn get(&self, key: &StringKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &StringKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: StringKey, text: impl Into<String>) -> Option<String> {
        self.entries.insert(key, text.into())
    }

    pub fn remove(&mut self, key: &StringKey) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
