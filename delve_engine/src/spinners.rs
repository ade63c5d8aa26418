//! Random flavor text.
//!
//! A spinner holds interchangeable lines for the same event; each spin picks
//! one. Only cosmetic text goes through here: anything a test needs to pin
//! down (room descriptions, rewards) is decided elsewhere.
use std::collections::HashMap;

use gametools::spinners::{Spinner, Wedge};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpinnerType {
    UnrecognizedCommand,
    QuitMsg,
}

pub trait SpinnerExt {
    fn from_strs(words: &[&'static str]) -> Self;
}
impl SpinnerExt for Spinner<&'static str> {
    fn from_strs(words: &[&'static str]) -> Self {
        let wedges = words.iter().map(|w| Wedge::new(*w)).collect::<Vec<_>>();
        Spinner::new(wedges)
    }
}

/// Spinners bundled with the engine.
pub fn default_spinners() -> HashMap<SpinnerType, Spinner<&'static str>> {
    let mut spinners = HashMap::new();
    spinners.insert(
        SpinnerType::UnrecognizedCommand,
        Spinner::from_strs(&[
            "Unknown command! Type 'help' for the list.",
            "The cave doesn't understand that. Try 'help'.",
            "Didn't quite catch that? Type 'help'.",
        ]),
    );
    spinners.insert(
        SpinnerType::QuitMsg,
        Spinner::from_strs(&[
            "Thanks for playing. Farewell!",
            "The cave will be waiting. Goodbye!",
        ]),
    );
    spinners
}

/// Spin the selected spinner, or fall back to `default`.
pub fn spin(
    spinners: &HashMap<SpinnerType, Spinner<&'static str>>,
    spin_type: SpinnerType,
    default: &'static str,
) -> String {
    spinners
        .get(&spin_type)
        .and_then(Spinner::spin)
        .unwrap_or(default)
        .to_string()
}
