// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use convoscribe::graph::GraphStore;
use convoscribe::model::{DialogueOption, Screen, ScreenId, TextSlot};

pub struct Case {
    pub id: &'static str,
    pub screens: usize,
    pub options_per_screen: usize,
    pub text_len: usize,
}

pub const CASES: &[Case] = &[
    Case { id: "small", screens: 8, options_per_screen: 2, text_len: 32 },
    Case { id: "medium_dense", screens: 120, options_per_screen: 6, text_len: 64 },
    Case { id: "large_long_text", screens: 600, options_per_screen: 4, text_len: 512 },
];

fn text(prefix: &str, index: usize, len: usize) -> String {
    let mut out = format!("{prefix}_{index:05} ");
    while out.len() < len {
        out.push_str("lorem ipsum ");
    }
    out.truncate(len.max(prefix.len() + 7));
    out
}

/// Screens `1..=screens`, each option `j` of screen `i` pointing at screen `(i + j) % n + 1`.
pub fn conversation(case: &Case) -> Vec<Screen> {
    let n = case.screens.max(1);
    (0..n)
        .map(|i| {
            let mut screen = Screen::new(
                ScreenId::new(i as u64 + 1),
                format!("screen_{}", i + 1),
                TextSlot::Inline(text("dialogue", i, case.text_len)),
            );
            for j in 0..case.options_per_screen {
                let target = ScreenId::new(((i + j + 1) % n) as u64 + 1);
                screen.options_mut().push(DialogueOption::new_with(
                    None,
                    TextSlot::Inline(text("option", i * 100 + j, case.text_len / 2)),
                    Some(target),
                ));
            }
            screen
        })
        .collect()
}

pub fn graph(case: &Case) -> GraphStore {
    GraphStore::from_screens(conversation(case))
}
