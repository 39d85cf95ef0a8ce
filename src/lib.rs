// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Convoscribe: conversation template editor core.
//!
//! A template is an ordered graph of screens whose options point at other screens. Text lives
//! either inline on the graph or in a string table referenced by `@conversation/<name>:<key>`.
//! [`session::TemplateSession`] ties the graph, the text engine and a template backend together.

pub mod config;
pub mod graph;
pub mod idgen;
pub mod model;
pub mod session;
pub mod store;
pub mod text;
