//! Bar chart drawing with crossterm.
//!
//! Layout is computed separately from drawing so it can be tested without a terminal.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use sortviz_core::{BarColor, Role, RoleSet};

const BLOCK: &str = "█";

/// A rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// One bar, anchored at the bottom of the chart area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub x: u16,
    pub width: u16,
    pub height: u16,
    pub role: Role,
}

pub fn color(color: BarColor) -> Color {
    match color {
        BarColor::Green => Color::Green,
        BarColor::Red => Color::Red,
        BarColor::Yellow => Color::Yellow,
        BarColor::Blue => Color::Blue,
    }
}

/// Lays out one bar per value. Heights are proportional to `value / max_value`; a non-zero value
/// always gets at least one cell. Bars that do not fit horizontally are dropped.
pub fn layout(values: &[u32], roles: &RoleSet, area: Area, max_value: u32) -> Vec<Bar> {
    if values.is_empty() || area.width == 0 || area.height == 0 {
        return Vec::new();
    }

    let slot = (usize::from(area.width) / values.len()).max(1) as u16;
    // keep a one cell gap once bars are wide enough to spare it
    let width = if slot >= 3 { slot - 1 } else { slot };
    let max_value = u64::from(max_value.max(1));

    values
        .iter()
        .enumerate()
        .take(usize::from(area.width / slot))
        .map(|(index, &value)| {
            let scaled = u64::from(value) * u64::from(area.height) / max_value;
            let mut height = scaled.min(u64::from(area.height)) as u16;
            if value > 0 && height == 0 {
                height = 1;
            }

            Bar {
                x: area.x + index as u16 * slot,
                width,
                height,
                role: roles.role_of(index),
            }
        })
        .collect()
}

/// Draws `bars` into `area`, clearing it first.
pub fn draw_bars<W: Write>(out: &mut W, bars: &[Bar], area: Area) -> io::Result<()> {
    let blank = " ".repeat(usize::from(area.width));
    for row in 0..area.height {
        out.queue(MoveTo(area.x, area.y + row))?;
        out.queue(Print(&blank))?;
    }

    for bar in bars {
        out.queue(SetForegroundColor(color(bar.role.color())))?;
        let cells = BLOCK.repeat(usize::from(bar.width));
        for level in 0..bar.height {
            let row = area.y + area.height - 1 - level;
            out.queue(MoveTo(bar.x, row))?;
            out.queue(Print(&cells))?;
        }
    }
    out.queue(ResetColor)?;

    Ok(())
}

/// Text around the chart.
pub struct Frame<'a> {
    pub title: &'a str,
    pub status: String,
    pub help: &'a str,
}

/// Draws a full screen: title, status, chart, legend and key help.
pub fn draw_frame<W: Write>(
    out: &mut W,
    frame: &Frame<'_>,
    values: &[u32],
    roles: &RoleSet,
    max_value: u32,
    (columns, rows): (u16, u16),
) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?;

    out.queue(MoveTo(centered(frame.title, columns), 0))?;
    out.queue(SetAttribute(Attribute::Bold))?;
    out.queue(SetForegroundColor(Color::Magenta))?;
    out.queue(Print(frame.title))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;

    out.queue(MoveTo(centered(&frame.status, columns), 1))?;
    out.queue(Print(&frame.status))?;

    // title, status, blank line on top; legend and help below
    let chart = Area {
        x: 1,
        y: 3,
        width: columns.saturating_sub(2),
        height: rows.saturating_sub(6),
    };
    let bars = layout(values, roles, chart, max_value);
    draw_bars(out, &bars, chart)?;

    let legend_row = chart.y + chart.height;
    out.queue(MoveTo(1, legend_row))?;
    for role in Role::ALL {
        out.queue(SetForegroundColor(color(role.color())))?;
        out.queue(Print(BLOCK))?;
        out.queue(ResetColor)?;
        out.queue(Print(format!(" {}   ", role.label())))?;
    }

    out.queue(MoveTo(1, legend_row + 1))?;
    out.queue(SetAttribute(Attribute::Dim))?;
    out.queue(Print(frame.help))?;
    out.queue(SetAttribute(Attribute::Reset))?;

    out.flush()
}

fn centered(text: &str, columns: u16) -> u16 {
    let len = text.chars().count() as u16;
    columns.saturating_sub(len) / 2
}
