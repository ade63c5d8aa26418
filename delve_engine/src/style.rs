//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};
use textwrap::{Options, termwidth};

/// Widest a wrapped paragraph is allowed to get, even on very wide terminals.
const MAX_BLOCK_WIDTH: usize = 100;

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn item_style(&self) -> ColoredString;
    fn enemy_style(&self) -> ColoredString;
    fn location_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn error_icon_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn denied_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn harm_style(&self) -> ColoredString;
    fn gold_style(&self) -> ColoredString;
    fn subsystem_style(&self) -> ColoredString;
    fn undo_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{}]", self);
        bracketed.truecolor(75, 80, 75)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn enemy_style(&self) -> ColoredString {
        self.truecolor(200, 60, 40).bold()
    }
    fn location_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10)
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn error_icon_style(&self) -> ColoredString {
        self.bold().truecolor(230, 30, 30)
    }
    fn denied_style(&self) -> ColoredString {
        self.italic().truecolor(230, 30, 30)
    }
    fn harm_style(&self) -> ColoredString {
        self.truecolor(230, 80, 80)
    }
    fn gold_style(&self) -> ColoredString {
        self.bold().truecolor(255, 200, 0)
    }
    fn subsystem_style(&self) -> ColoredString {
        self.dimmed().truecolor(150, 230, 30)
    }
    fn undo_style(&self) -> ColoredString {
        self.italic().truecolor(75, 180, 255)
    }
}

impl GameStyle for String {
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn enemy_style(&self) -> ColoredString {
        self.as_str().enemy_style()
    }
    fn location_style(&self) -> ColoredString {
        self.as_str().location_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn error_icon_style(&self) -> ColoredString {
        self.as_str().error_icon_style()
    }
    fn denied_style(&self) -> ColoredString {
        self.as_str().denied_style()
    }
    fn harm_style(&self) -> ColoredString {
        self.as_str().harm_style()
    }
    fn gold_style(&self) -> ColoredString {
        self.as_str().gold_style()
    }
    fn subsystem_style(&self) -> ColoredString {
        self.as_str().subsystem_style()
    }
    fn undo_style(&self) -> ColoredString {
        self.as_str().undo_style()
    }
}

/// Wrapping options for ordinary paragraphs.
pub fn normal_block() -> Options<'static> {
    Options::new(termwidth().min(MAX_BLOCK_WIDTH))
}

/// Wrapping options for paragraphs nested under a heading.
pub fn indented_block() -> Options<'static> {
    Options::new(termwidth().min(MAX_BLOCK_WIDTH))
        .initial_indent("    ")
        .subsequent_indent("    ")
}
