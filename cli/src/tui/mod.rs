pub mod app;
pub mod ui;

use std::io;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use salesdash_core::{BrandRepository, SheetRepository};

use crate::tui::app::{App, InputMode, Screen};

pub fn run<B: BrandRepository, S: SheetRepository>(mut app: App<B, S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<T: Backend, B: BrandRepository, S: SheetRepository>(
    terminal: &mut Terminal<T>,
    app: &mut App<B, S>,
) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match (app.input_mode, app.screen) {
            (InputMode::AddingBrand | InputMode::RenamingBrand, _) => match key.code {
                KeyCode::Enter => app.submit_input(),
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
            (InputMode::Normal, Screen::Brands) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Enter => app.open_selected_brand(),
                KeyCode::Char('a') => app.enter_add_mode(),
                KeyCode::Char('r') => app.enter_rename_mode(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_brand(),
                KeyCode::Char('g') => app.reload_brands(),
                _ => {}
            },
            (InputMode::Normal, Screen::Insights) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Esc | KeyCode::Backspace => app.back(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char('m') => app.cycle_manager_type(),
                KeyCode::Char('t') => app.toggle_timeframe(),
                KeyCode::Right | KeyCode::Char('l') => app.next_month(),
                KeyCode::Left | KeyCode::Char('h') => app.previous_month(),
                KeyCode::Char('w') => app.cycle_week(),
                KeyCode::Char('g') => app.refresh(),
                _ => {}
            },
        }
    }
}
