//! CLI styles for clap.

use clap::builder::styling::{AnsiColor, Color, Style, Styles};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn ansi(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

pub fn styles() -> Styles {
    Styles::styled()
        .header(ansi(AnsiColor::Cyan).bold())
        .usage(ansi(AnsiColor::Cyan).bold())
        .literal(ansi(AnsiColor::Green))
        .placeholder(ansi(AnsiColor::BrightBlack))
        .error(ansi(AnsiColor::Red).bold())
        .invalid(ansi(AnsiColor::Yellow).bold())
        .valid(ansi(AnsiColor::Green).bold())
}
