//! Event loop: crossterm input in, grid commits, frames out.

use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;
use vgrid::{Event, GridLayout, Key, Rect, VirtualGrid};

use crate::error::AppError;
use crate::render;
use crate::terminal::Terminal;

const TICK: Duration = Duration::from_millis(250);

pub struct App {
    grid: VirtualGrid,
    status: Rect,
    quit: bool,
}

impl App {
    pub fn new(grid: VirtualGrid) -> Self {
        Self {
            grid,
            status: Rect::default(),
            quit: false,
        }
    }

    /// Run until the user quits. The terminal is restored on every exit path.
    pub fn run(mut self) -> Result<(), AppError> {
        let mut terminal = Terminal::new()?;
        let (width, height) = terminal.size()?;
        self.resize(width, height);
        self.draw(&mut terminal)?;

        while !self.quit {
            let mut redraw = false;
            for raw in terminal.poll(TICK)? {
                redraw |= self.handle(&raw);
            }
            if redraw | self.grid.take_dirty() {
                self.draw(&mut terminal)?;
            }
        }

        self.grid.unmount();
        log::info!("[app] exit, {} listeners left", self.grid.listener_count());
        Ok(())
    }

    /// Returns whether a full redraw is needed regardless of grid state.
    fn handle(&mut self, raw: &CrosstermEvent) -> bool {
        let Some(event) = Event::from_crossterm(raw) else {
            return false;
        };
        match event {
            Event::Key {
                key: Key::Char('q'),
                ..
            } => {
                self.quit = true;
                false
            }
            Event::Key {
                key: Key::Char('c'),
                modifiers,
            } if modifiers.ctrl => {
                self.quit = true;
                false
            }
            Event::Resize { width, height } => {
                self.resize(width, height);
                true
            }
            event => {
                let result = self.grid.handle_event(&event);
                log::trace!("[app] {event:?} -> {result:?}");
                false
            }
        }
    }

    /// Re-mount the grid over the whole screen minus the status line.
    fn resize(&mut self, width: u16, height: u16) {
        let (area, status) = Rect::from_size(width, height).split_top(height.saturating_sub(1));
        self.status = status;
        let layout = GridLayout::split(area, self.grid.config().scrollbar_width);
        log::debug!("[app] resize {width}x{height}");
        self.grid.unmount();
        self.grid.mount(layout);
    }

    fn draw(&self, terminal: &mut Terminal) -> Result<(), AppError> {
        render::draw(terminal.out(), &self.grid, self.status)?;
        terminal.flush()?;
        Ok(())
    }
}
