//! Crossterm-backed terminal with double-buffered diff rendering.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor, event, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use log::debug;

use crate::buffer::{Buffer, Cell};
use crate::element::Element;
use crate::layout::{layout, LayoutResult, Rect};
use crate::render::render_to_buffer;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

pub struct Terminal {
    stdout: Stdout,
    current: Buffer,
    previous: Buffer,
    last_layout: LayoutResult,
}

impl Terminal {
    /// Enter raw mode, the alternate screen and mouse capture.
    ///
    /// Also installs a panic hook that restores the terminal before the
    /// default hook prints the panic message.
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore();
            original_hook(info);
        }));

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;
        stdout.flush()?;

        let (width, height) = terminal::size()?;
        debug!("Terminal initialised at {}x{}", width, height);

        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: invalidated(width, height),
            last_layout: LayoutResult::new(),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Lay out and draw `root`, writing only the cells that changed since
    /// the previous frame.
    pub fn render(&mut self, root: &Element) -> io::Result<&LayoutResult> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            debug!("Terminal resized to {}x{}", width, height);
            self.current = Buffer::new(width, height);
            self.previous = invalidated(width, height);
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.current.clear();
        self.last_layout = layout(root, Rect::from_size(width, height));
        render_to_buffer(root, &self.last_layout, &mut self.current);
        self.flush_diff()?;
        std::mem::swap(&mut self.current, &mut self.previous);

        Ok(&self.last_layout)
    }

    /// Layout of the last rendered frame, used for hit testing.
    pub fn layout(&self) -> &LayoutResult {
        &self.last_layout
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut cursor_at: Option<(u16, u16)> = None;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        let mut style = TextStyle::new();

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            if cell.wide_continuation {
                continue;
            }
            if cursor_at != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            if cell.style != style {
                // Attribute reset also clears colours.
                write_style(&mut self.stdout, cell)?;
                fg = None;
                bg = None;
                style = cell.style;
            }
            if fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(to_ct(cell.fg)))?;
                fg = Some(cell.fg);
            }
            if bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(to_ct(cell.bg)))?;
                bg = Some(cell.bg);
            }

            write!(self.stdout, "{}", cell.char)?;
            cursor_at = Some((x + char_width(cell.char).max(1) as u16, y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

/// A buffer that differs from every real frame, forcing a full repaint.
fn invalidated(width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::new(width, height);
    for cell in buf.cells_mut() {
        cell.char = '\0';
    }
    buf
}

fn write_style(out: &mut Stdout, cell: &Cell) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    if cell.style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if cell.style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if cell.style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if cell.style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

fn to_ct(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn restore() -> io::Result<()> {
    let mut stdout = io::stdout();
    queue!(
        stdout,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    stdout.flush()?;
    terminal::disable_raw_mode()
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = restore();
        debug!("Terminal restored");
    }
}
