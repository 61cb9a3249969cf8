use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use salesdash_core::{BrandRepository, CellClass, SheetRepository, Week};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode, Screen};

const LABEL_MIN_WIDTH: u16 = 12;
const LABEL_MAX_WIDTH: u16 = 30;

pub fn draw<B: BrandRepository, S: SheetRepository>(f: &mut Frame, app: &mut App<B, S>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status / input
            Constraint::Length(1), // Help
        ])
        .split(size);

    let header = Paragraph::new("SALES DASHBOARD")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    match app.screen {
        Screen::Brands => draw_brand_list(f, app, main_chunks[1]),
        Screen::Insights => draw_insights(f, app, main_chunks[1]),
    }

    draw_status_line(f, app, main_chunks[2]);

    let help = match (app.screen, app.input_mode) {
        (_, InputMode::AddingBrand | InputMode::RenamingBrand) => "Enter: Save | Esc: Cancel",
        (Screen::Brands, _) => {
            "j/k: Navigate | Enter: Insights | a: Add | r: Rename | d: Delete | q: Quit"
        }
        (Screen::Insights, _) => {
            "j/k: Sheet | m: Manager | t: Timeframe | ←/→: Month | w: Week | Esc: Back | q: Quit"
        }
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_status_line<B: BrandRepository, S: SheetRepository>(
    f: &mut Frame,
    app: &App<B, S>,
    area: Rect,
) {
    let line = match app.input_mode {
        InputMode::AddingBrand => Line::from(vec![
            Span::styled("New brand: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.input.as_str()),
        ]),
        InputMode::RenamingBrand => Line::from(vec![
            Span::styled("Rename to: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.input.as_str()),
        ]),
        InputMode::Normal => match &app.status {
            Some(msg) => Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Red))),
            None => Line::from(""),
        },
    };
    f.render_widget(Paragraph::new(line), area);

    if app.input_mode != InputMode::Normal {
        let prefix = 11; // "New brand: " / "Rename to: "
        let typed: String = app.input.chars().take(app.cursor_position).collect();
        let x = area.x + prefix + typed.width() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}

fn draw_brand_list<B: BrandRepository, S: SheetRepository>(
    f: &mut Frame,
    app: &mut App<B, S>,
    area: Rect,
) {
    let rows: Vec<Row> = app
        .brands
        .iter()
        .map(|brand| {
            let initial = brand
                .brand_name
                .chars()
                .next()
                .map(|c| c.to_string())
                .unwrap_or_default();
            Row::new(vec![
                Span::styled(
                    initial,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    brand.brand_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(brand.brand_id.clone(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let title = format!(" Brands ({}) ", app.brands.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Initial
            Constraint::Min(20),    // Name
            Constraint::Length(26), // ID
        ],
    )
    .header(Row::new(vec!["", "Brand", "ID"]).style(Style::default().fg(Color::Yellow)))
    .block(panel(title))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.brand_state);
}

fn draw_insights<B: BrandRepository, S: SheetRepository>(
    f: &mut Frame,
    app: &mut App<B, S>,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(40)])
        .split(area);

    draw_sidebar(f, app, chunks[0]);
    draw_sales_table(f, app, chunks[1]);
}

fn draw_sidebar<B: BrandRepository, S: SheetRepository>(
    f: &mut Frame,
    app: &mut App<B, S>,
    area: Rect,
) {
    let filter_height = if app.monthly { 8 } else { 6 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(filter_height), Constraint::Min(3)])
        .split(area);

    let label = Style::default().fg(Color::Blue);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Manager:   ", label),
            Span::raw(app.manager_type.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Timeframe: ", label),
            Span::raw(if app.monthly { "Monthly" } else { "Latest Data" }),
        ]),
    ];
    if app.monthly {
        lines.push(Line::from(vec![
            Span::styled("Month:     ", label),
            Span::raw(format!("{} {}", app.month.name(), app.year)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Week:      ", label),
            Span::raw(Week::label(app.week)),
        ]));
    }

    let filters = Paragraph::new(lines).block(panel(" Filters "));
    f.render_widget(filters, chunks[0]);

    let rows: Vec<Row> = app
        .view
        .as_ref()
        .map(|v| {
            v.sheets
                .iter()
                .map(|s| Row::new(vec![s.display_date()]))
                .collect()
        })
        .unwrap_or_default();

    let sheets = Table::new(rows, [Constraint::Min(10)])
        .block(panel(" Available Data "))
        .row_highlight_style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(sheets, chunks[1], &mut app.sheet_state);
}

fn draw_sales_table<B: BrandRepository, S: SheetRepository>(
    f: &mut Frame,
    app: &App<B, S>,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    let brand_name = app.brand.as_ref().map(|b| b.brand_name.as_str()).unwrap_or("");
    let mut title = vec![
        Span::styled(brand_name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(format!("[{}]", app.manager_type), Style::default().fg(Color::Blue)),
    ];
    if let Some(sheet) = app.view.as_ref().and_then(|v| v.selected_sheet()) {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("Data up to {}", sheet.display_date()),
            Style::default().fg(Color::Cyan),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(title)), chunks[0]);

    let table = app.table();
    if table.is_empty() {
        let empty = Paragraph::new("No data for this selection")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let label_width = table
        .all_rows()
        .map(|r| r.label.width() as u16)
        .max()
        .unwrap_or(0)
        .clamp(LABEL_MIN_WIDTH, LABEL_MAX_WIDTH);

    let rows: Vec<Row> = table
        .all_rows()
        .map(|row| {
            let mut cells = vec![Cell::from(row.label.clone())];
            cells.extend(row.cells.iter().map(|cell| {
                let style = match cell.class {
                    CellClass::Negative => Style::default().fg(Color::Red),
                    CellClass::Positive => Style::default().fg(Color::Green),
                    CellClass::Neutral => Style::default(),
                };
                Cell::from(Line::from(cell.text.clone()).alignment(Alignment::Center)).style(style)
            }));
            let row_style = if row.is_total {
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells).style(row_style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(label_width)];
    widths.extend(std::iter::repeat(Constraint::Min(8)).take(table.headers.len() - 1));

    let widget = Table::new(rows, widths)
        .header(Row::new(table.headers.clone()).style(Style::default().fg(Color::Yellow)))
        .block(panel(" Sales "));
    f.render_widget(widget, chunks[1]);
}

fn panel<'a>(title: impl Into<Line<'a>>) -> Block<'a> {
    let title: Line<'a> = title.into();
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}
