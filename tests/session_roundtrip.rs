// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use convoscribe::graph::ENTRY_SCREEN_LABEL;
use convoscribe::idgen::KeyGenerator;
use convoscribe::model::{ScreenId, TemplateId, TextMode};
use convoscribe::session::TemplateSession;
use convoscribe::store::{MemoryBackend, TemplateBackend, TemplateJson};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("templates")
}

fn read_template(name: &str) -> TemplateJson {
    let path = fixtures_dir().join(name);
    let raw =
        fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"));
    serde_json::from_str(&raw).unwrap_or_else(|err| panic!("failed to parse {path:?}: {err}"))
}

async fn session_with(name: &str) -> (TemplateSession<MemoryBackend>, TemplateId) {
    let backend = MemoryBackend::new();
    let stored = backend.create_template(&read_template(name)).await.expect("seed template");
    let template_id = stored.id.expect("assigned id");
    (TemplateSession::with_keys(backend, KeyGenerator::from_seed(99)), template_id)
}

fn resolved_texts(session: &TemplateSession<MemoryBackend>) -> Vec<String> {
    session
        .screens()
        .iter()
        .flat_map(|screen| screen.text_slots())
        .map(|slot| session.resolve_text(slot).to_owned())
        .collect()
}

#[tokio::test]
async fn stored_externalized_template_loads_with_its_string_table() {
    let (mut session, template_id) = session_with("smith_externalized.json").await;

    session.load(template_id).await.expect("load");

    assert_eq!(session.mode(), TextMode::Externalized);
    assert_eq!(session.string_table().len(), 7);
    assert_eq!(
        resolved_texts(&session),
        [
            "Need something forged?",
            "A sword.",
            "Repairs.",
            "Nothing.",
            "Steel or bronze?",
            "Steel.",
            "Come back tomorrow.",
        ]
    );

    let pairs = session.string_table_pairs();
    assert_eq!(pairs[0].0.as_str(), "s_k3v9q0aa");
    assert_eq!(pairs[6].0.as_str(), "s_k3v9q0ag");
}

#[tokio::test]
async fn toggling_inline_and_saving_stores_plain_text() {
    let (mut session, template_id) = session_with("smith_externalized.json").await;
    session.load(template_id).await.expect("load");
    let expected = resolved_texts(&session);

    assert_eq!(session.toggle_text_mode(), TextMode::Inline);
    session.save().await.expect("save");

    let stored = session.backend().stored(template_id).await.expect("stored");
    assert!(!stored.stf_mode);
    assert!(stored.screens.iter().all(|s| s.left_dialog.is_none()));
    assert!(stored.screens.iter().flat_map(|s| &s.options).all(|o| o.stf_reference.is_none()));

    session.reset();
    session.load(template_id).await.expect("reload");
    assert_eq!(session.mode(), TextMode::Inline);
    assert!(session.string_table().is_empty());
    assert_eq!(resolved_texts(&session), expected);
}

#[tokio::test]
async fn editing_a_loaded_template_keeps_the_graph_consistent() {
    let (mut session, template_id) = session_with("smith_externalized.json").await;
    session.load(template_id).await.expect("load");

    // Removing the entry screen promotes the next one and cuts every edge into it.
    assert!(session.remove_screen(ScreenId::new(7)));
    assert_eq!(session.screens()[0].screen_id(), ScreenId::new(8));
    assert_eq!(session.screens()[0].display_name(), ENTRY_SCREEN_LABEL);

    // New screens get externalized text under the loaded namespace and never reuse ids.
    session.select_screen(ScreenId::new(8)).expect("select");
    let index = session.add_option("Bronze.").expect("option");
    let new_id = session.add_screen_for_option(index).expect("linked screen");
    assert!(new_id > ScreenId::new(9));

    let entry = session.graph().screen(ScreenId::new(8)).expect("entry");
    let option_ref = entry.options()[index].text().text_ref().expect("externalized option");
    assert_eq!(option_ref.template_name(), "smith");
    assert_eq!(session.resolve_text(entry.options()[index].text()), "Bronze.");

    session.save().await.expect("save");
    session.reset();
    session.load(template_id).await.expect("reload");

    assert_eq!(session.screens().len(), 3);
    assert_eq!(session.screen_name(new_id), "screen_3");
    for screen in session.screens() {
        for option in screen.options() {
            if let Some(target) = option.next_screen() {
                assert!(session.graph().contains(target), "dangling edge to {target}");
            }
        }
    }
}

#[tokio::test]
async fn exporting_sends_rows_in_graph_order() {
    let (mut session, template_id) = session_with("smith_externalized.json").await;
    session.load(template_id).await.expect("load");

    let bytes = session.export_string_table().await.expect("export");
    let text = String::from_utf8(bytes).expect("utf8");
    let keys = text
        .lines()
        .map(|line| line.split('\t').next().unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(
        keys,
        [
            "s_k3v9q0aa",
            "s_k3v9q0ab",
            "s_k3v9q0ac",
            "s_k3v9q0ad",
            "s_k3v9q0ae",
            "s_k3v9q0af",
            "s_k3v9q0ag",
        ]
    );
    assert_eq!(session.string_table_file_name(), "smith.stf");
}
