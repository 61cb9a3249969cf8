use chrono::Month;
use ratatui::widgets::TableState;
use salesdash_core::time::{current_month, current_year};
use salesdash_core::{
    Brand, BrandRepository, BrandService, ManagerType, SalesTable, Selection, SheetRepository,
    SheetService, SheetView, Timeframe, Week,
};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Brands,
    Insights,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    AddingBrand,
    RenamingBrand,
}

pub struct App<B: BrandRepository, S: SheetRepository> {
    brand_service: BrandService<B>,
    sheet_service: SheetService<S>,
    pub screen: Screen,
    pub brands: Vec<Brand>,
    pub brand_state: TableState,
    pub brand: Option<Brand>,
    pub manager_type: ManagerType,
    pub monthly: bool,
    pub year: i32,
    pub month: Month,
    pub week: Option<Week>,
    pub view: Option<SheetView>,
    pub sheet_state: TableState,
    pub status: Option<String>,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

impl<B: BrandRepository, S: SheetRepository> App<B, S> {
    pub fn new(brand_repo: B, sheet_repo: S, manager_type: ManagerType) -> Self {
        let mut app = App {
            brand_service: BrandService::new(brand_repo),
            sheet_service: SheetService::new(sheet_repo),
            screen: Screen::Brands,
            brands: Vec::new(),
            brand_state: TableState::default(),
            brand: None,
            manager_type,
            monthly: false,
            year: current_year(),
            month: current_month(),
            week: None,
            view: None,
            sheet_state: TableState::default(),
            status: None,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        };
        app.reload_brands();
        app
    }

    pub fn reload_brands(&mut self) {
        match self.brand_service.list() {
            Ok(brands) => {
                self.brands = brands;
                let selected = match self.brand_state.selected() {
                    _ if self.brands.is_empty() => None,
                    Some(i) if i < self.brands.len() => Some(i),
                    _ => Some(0),
                };
                self.brand_state.select(selected);
            }
            Err(e) => self.report("Failed to load brands", e),
        }
    }

    fn report(&mut self, what: &str, err: anyhow::Error) {
        warn!(error = %err, "{}", what);
        self.status = Some(format!("{}: {}", what, err));
    }

    pub fn selected_brand(&self) -> Option<&Brand> {
        self.brand_state.selected().and_then(|i| self.brands.get(i))
    }

    pub fn selection(&self) -> Option<Selection> {
        let brand = self.brand.as_ref()?;
        let timeframe = if self.monthly {
            Timeframe::Monthly {
                year: self.year,
                month: self.month,
                week: self.week,
            }
        } else {
            Timeframe::Latest
        };
        Some(Selection {
            manager_type: self.manager_type,
            brand_id: brand.brand_id.clone(),
            timeframe,
        })
    }

    pub fn table(&self) -> SalesTable {
        self.view
            .as_ref()
            .map(|v| v.table())
            .unwrap_or_else(|| SalesTable::build(&[]))
    }

    /// Refetches for the current selection. The old view is dropped either way.
    pub fn refresh(&mut self) {
        let Some(selection) = self.selection() else {
            return;
        };
        self.view = None;
        match self.sheet_service.load(&selection) {
            Ok(view) => {
                self.sheet_state.select(view.selected_index());
                self.view = Some(view);
                self.status = None;
            }
            Err(e) => {
                self.sheet_state.select(None);
                self.report("Failed to fetch sheets", e);
            }
        }
    }

    pub fn open_selected_brand(&mut self) {
        if let Some(brand) = self.selected_brand().cloned() {
            self.brand = Some(brand);
            self.screen = Screen::Insights;
            self.refresh();
        }
    }

    pub fn back(&mut self) {
        self.screen = Screen::Brands;
        self.brand = None;
        self.view = None;
        self.status = None;
    }

    pub fn next(&mut self) {
        match self.screen {
            Screen::Brands => step(&mut self.brand_state, self.brands.len(), true),
            Screen::Insights => self.step_sheet(true),
        }
    }

    pub fn previous(&mut self) {
        match self.screen {
            Screen::Brands => step(&mut self.brand_state, self.brands.len(), false),
            Screen::Insights => self.step_sheet(false),
        }
    }

    fn step_sheet(&mut self, forward: bool) {
        if let Some(view) = self.view.as_mut() {
            step(&mut self.sheet_state, view.sheets.len(), forward);
            if let Some(i) = self.sheet_state.selected() {
                view.select_index(i);
            }
        }
    }

    pub fn cycle_manager_type(&mut self) {
        self.manager_type = self.manager_type.next();
        self.refresh();
    }

    pub fn toggle_timeframe(&mut self) {
        self.monthly = !self.monthly;
        self.refresh();
    }

    pub fn next_month(&mut self) {
        if self.monthly {
            if self.month == Month::December {
                self.year += 1;
            }
            self.month = self.month.succ();
            self.refresh();
        }
    }

    pub fn previous_month(&mut self) {
        if self.monthly {
            if self.month == Month::January {
                self.year -= 1;
            }
            self.month = self.month.pred();
            self.refresh();
        }
    }

    pub fn cycle_week(&mut self) {
        if self.monthly {
            self.week = Week::cycle(self.week);
            self.refresh();
        }
    }

    pub fn delete_brand(&mut self) {
        let Some(brand) = self.selected_brand().cloned() else {
            return;
        };
        match self.brand_service.delete(&brand.brand_id) {
            Ok(()) => self.status = Some(format!("Deleted {}", brand.brand_name)),
            Err(e) => self.report("Failed to delete brand", e),
        }
        self.reload_brands();
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::AddingBrand;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_rename_mode(&mut self) {
        if let Some(brand) = self.selected_brand() {
            self.input = brand.brand_name.clone();
            self.cursor_position = self.input.chars().count();
            self.input_mode = InputMode::RenamingBrand;
        }
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_input(&mut self) {
        let name = self.input.trim().to_string();
        let result = match self.input_mode {
            InputMode::AddingBrand => self.brand_service.create(&name),
            InputMode::RenamingBrand => match self.selected_brand().cloned() {
                Some(brand) => self.brand_service.rename(&brand.brand_id, &name),
                None => Ok(()),
            },
            InputMode::Normal => Ok(()),
        };

        if let Err(e) = result {
            self.report("Brand not saved", e);
        } else {
            self.reload_brands();
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }
}

fn step(state: &mut TableState, len: usize, forward: bool) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    state.select(Some(i));
}
