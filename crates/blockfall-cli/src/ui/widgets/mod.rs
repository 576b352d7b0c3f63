use ratatui::{layout::Rect, widgets::Block};

pub(crate) use self::{
    board_display::*, game_display::*, piece_display::*, popup::*, score_table::*,
};

mod board_display;
mod game_display;
mod piece_display;
mod popup;
mod score_table;

/// Terminal columns per board cell.
const CELL_WIDTH: u16 = 2;

/// Horizontal and vertical space taken by a block's borders and padding.
fn block_margin(block: Option<&Block>) -> (u16, u16) {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    (
        dummy_rect.width - inner_rect.width,
        dummy_rect.height - inner_rect.height,
    )
}

mod color {
    use ratatui::style::Color;

    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
}

pub(crate) mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const BORDER: Style = fg_bg(color::WHITE, color::BLACK);
    pub const BORDER_GAME_OVER: Style = fg_bg(color::RED, color::BLACK);
    pub const HIGHLIGHT: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    /// Solid block in the given shape color.
    pub const fn block(color: blockfall_engine::Color) -> Style {
        let color = Color::Rgb(color.r(), color.g(), color.b());
        Style::new().fg(color).bg(color)
    }
}
