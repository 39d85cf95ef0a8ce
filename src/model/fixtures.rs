// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{OptionId, ScreenId};
use super::screen::{DialogueOption, Screen, TextSlot};

fn sid(value: u64) -> ScreenId {
    ScreenId::new(value)
}

fn option(text: &str, next_screen: Option<ScreenId>) -> DialogueOption {
    DialogueOption::new_with(None, TextSlot::inline(text), next_screen)
}

/// One screen saying "Hello" with a single "Bye" option.
pub(crate) fn greeting_screens() -> Vec<Screen> {
    let mut hello = Screen::new(sid(10), "screen_1", TextSlot::inline("Hello"));
    hello.options_mut().push(option("Bye", None));
    vec![hello]
}

/// Small branching conversation: entry screen with two choices, one loops back.
pub(crate) fn innkeeper_screens() -> Vec<Screen> {
    let mut greet = Screen::new(sid(1), "screen_1", TextSlot::inline("Welcome, traveler."));
    let mut rooms = Screen::new(sid(2), "rooms", TextSlot::inline("A room is five silver."));
    let mut farewell = Screen::new(sid(3), "farewell", TextSlot::inline("Safe roads."));

    greet.options_mut().extend([
        DialogueOption::new_with(
            Some(OptionId::new(100)),
            TextSlot::inline("A room?"),
            Some(sid(2)),
        ),
        DialogueOption::new_with(
            Some(OptionId::new(101)),
            TextSlot::inline("Goodbye."),
            Some(sid(3)),
        ),
    ]);
    rooms.options_mut().extend([
        option("Too pricey.", Some(sid(1))),
        option("I'll take it.", Some(sid(3))),
        option("", None),
    ]);
    farewell.set_terminates_conversation(true);

    vec![greet, rooms, farewell]
}
