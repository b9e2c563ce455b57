//! Terminal colours: the markdown skin and one colour per mood.

use mjr_core::Mood;
use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

const fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

pub struct Theme;

impl Theme {
    pub const TEXT: Color = rgb(0xABB2BF);
    pub const MUTED: Color = rgb(0x5C6370);
    pub const WARNING: Color = rgb(0xE06C75);

    pub fn skin() -> MadSkin {
        let mut skin = MadSkin::default();
        skin.paragraph.set_fg(Self::TEXT);
        skin.bold.set_fg(Self::TEXT);
        skin.italic.set_fg(Self::MUTED);

        skin.headers[0].set_fg(Self::mood(Mood::Excited));
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;
        skin.headers[1].set_fg(Self::mood(Mood::Tired));
        skin.headers[1].add_attr(Attribute::Bold);

        skin.table.set_fg(Self::MUTED);
        skin.bullet.set_fg(Self::MUTED);
        // Search matches are wrapped in backticks.
        skin.inline_code.set_fg(Self::mood(Mood::Excited));
        skin.inline_code.add_attr(Attribute::Bold);
        skin
    }

    pub fn mood(mood: Mood) -> Color {
        match mood {
            Mood::Happy => rgb(0x98C379),
            Mood::Excited => rgb(0xE5C07B),
            Mood::Tired => rgb(0x61AFEF),
            Mood::Sad => rgb(0xC678DD),
            Mood::Angry => Self::WARNING,
        }
    }
}
