//! Paint a mounted grid with crossterm commands.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;
use vgrid::row::fit_to_width;
use vgrid::{Rect, VirtualGrid};

const TRACK: char = '│';
const THUMB: char = '█';

/// Queue a full frame. `status` is the line below the grid.
pub fn draw(out: &mut impl Write, grid: &VirtualGrid, status: Rect) -> io::Result<()> {
    let Some(layout) = grid.layout() else {
        return queue!(out, Clear(ClearType::All));
    };

    // Header
    queue!(
        out,
        MoveTo(layout.header.x, layout.header.y),
        SetAttribute(Attribute::Bold),
        SetBackgroundColor(Color::DarkBlue),
        SetForegroundColor(Color::White),
        Print(fit_to_width(&grid.header_text(), layout.header.width as usize)),
        ResetColor,
        SetAttribute(Attribute::Reset),
    )?;

    // Body
    let width = layout.body.width as usize;
    let rows = grid.visible_rows();
    for line in 0..layout.body.height {
        let text = match rows.get(line as usize) {
            Some((_, row)) => grid.row_text(row),
            None => String::new(),
        };
        queue!(
            out,
            MoveTo(layout.body.x, layout.body.y + line),
            Print(fit_to_width(&text, width)),
        )?;
    }

    draw_scrollbar(out, grid)?;
    draw_menu(out, grid)?;
    draw_ghost(out, grid)?;
    draw_status(out, grid, status)
}

fn draw_scrollbar(out: &mut impl Write, grid: &VirtualGrid) -> io::Result<()> {
    let Some(bar) = grid.scrollbar() else {
        return Ok(());
    };
    let thumb = bar.handle_rect();
    for y in bar.track.y..bar.track.bottom() {
        let on_thumb = y >= thumb.y && y < thumb.bottom();
        let glyph = if on_thumb { THUMB } else { TRACK };
        let cells: String = std::iter::repeat_n(glyph, bar.track.width as usize).collect();
        queue!(
            out,
            MoveTo(bar.track.x, y),
            SetForegroundColor(if on_thumb { Color::Grey } else { Color::DarkGrey }),
            Print(cells),
            ResetColor,
        )?;
    }
    Ok(())
}

fn draw_menu(out: &mut impl Write, grid: &VirtualGrid) -> io::Result<()> {
    let Some(menu) = grid.menu_layout() else {
        return Ok(());
    };
    for item in &menu.items {
        queue!(
            out,
            MoveTo(item.bounds.x, item.bounds.y),
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::White),
            Print(fit_to_width(&format!(" {}", item.text), item.bounds.width as usize)),
            ResetColor,
        )?;
    }
    Ok(())
}

/// The dragged column's label follows the pointer along the header row.
fn draw_ghost(out: &mut impl Write, grid: &VirtualGrid) -> io::Result<()> {
    let (Some(ghost), Some(layout)) = (grid.columns().ghost(), grid.layout()) else {
        return Ok(());
    };
    let label = format!(" {} ", ghost.label);
    let x = ghost
        .position
        .x
        .min(layout.area.right().saturating_sub(label.width() as u16));
    queue!(
        out,
        MoveTo(x, layout.header.y),
        SetAttribute(Attribute::Reverse),
        Print(label),
        SetAttribute(Attribute::Reset),
    )
}

fn draw_status(out: &mut impl Write, grid: &VirtualGrid, status: Rect) -> io::Result<()> {
    if status.is_empty() {
        return Ok(());
    }
    let window = grid.window();
    let range = window.range();
    let text = format!(
        " rows {}-{} of {} | hidden columns {} | drag {} | q quit",
        range.start + usize::from(!range.is_empty()),
        range.end,
        window.data_length(),
        grid.columns().hidden_count(),
        grid.scroll().drag_mode().label(),
    );
    queue!(
        out,
        MoveTo(status.x, status.y),
        SetAttribute(Attribute::Dim),
        Print(fit_to_width(&text, status.width as usize)),
        SetAttribute(Attribute::Reset),
    )
}
