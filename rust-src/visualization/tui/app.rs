//! Interactive dashboard state and event loop.

use std::io::{stdout, Stdout};
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;

use crate::aggregation::Dashboard;
use crate::data::CatalogCache;
use crate::filter::FilterState;
use crate::models::{Catalog, ContentType};


/// Chart tabs in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Directors,
    Trends,
    Countries,
    Durations,
    Genres,
    Data,
}


impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Overview,
        Tab::Directors,
        Tab::Trends,
        Tab::Countries,
        Tab::Durations,
        Tab::Genres,
        Tab::Data,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Directors => "Directors",
            Tab::Trends => "Trends",
            Tab::Countries => "Countries",
            Tab::Durations => "Durations",
            Tab::Genres => "Genres",
            Tab::Data => "Data",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}


/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Main,
    Sidebar,
}


/// One selectable line in the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    Type(ContentType),
    YearFrom,
    YearTo,
    Country(String),
}


pub struct App {
    pub catalog: Arc<Catalog>,
    pub filter: FilterState,
    pub dashboard: Dashboard,
    pub tab: Tab,
    pub focus: Focus,
    pub sidebar: Vec<SidebarItem>,
    pub sidebar_cursor: usize,
    pub table_cursor: usize,
    /// One-line feedback shown in the header (reload results).
    pub status: Option<String>,
    pub reload_requested: bool,
    pub should_quit: bool,
}


fn sidebar_items(catalog: &Catalog) -> Vec<SidebarItem> {
    let mut sidebar: Vec<SidebarItem> = catalog
        .content_types()
        .into_iter()
        .map(SidebarItem::Type)
        .collect();
    sidebar.push(SidebarItem::YearFrom);
    sidebar.push(SidebarItem::YearTo);
    sidebar.extend(catalog.countries().into_iter().map(SidebarItem::Country));
    sidebar
}


impl App {
    pub fn new(catalog: Arc<Catalog>, filter: FilterState) -> Self {
        let sidebar = sidebar_items(&catalog);
        let dashboard = Dashboard::build(&catalog, &filter);

        Self {
            catalog,
            filter,
            dashboard,
            tab: Tab::Overview,
            focus: Focus::Main,
            sidebar,
            sidebar_cursor: 0,
            table_cursor: 0,
            status: None,
            reload_requested: false,
            should_quit: false,
        }
    }

    /// Swap in a freshly loaded catalog, keeping the current selection.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        if Arc::ptr_eq(&catalog, &self.catalog) {
            self.status = Some("dataset unchanged".to_string());
            return;
        }

        self.filter.rebase(&catalog);
        self.sidebar = sidebar_items(&catalog);
        self.sidebar_cursor = self.sidebar_cursor.min(self.sidebar.len().saturating_sub(1));
        self.catalog = catalog;
        self.refresh();
        self.status = Some(format!("reloaded {} titles", self.catalog.len()));
    }

    /// Recompute every chart for the current filter.
    fn refresh(&mut self) {
        self.dashboard = Dashboard::build(&self.catalog, &self.filter);
        self.table_cursor = self.table_cursor.min(self.dashboard.preview.len().saturating_sub(1));
    }

    /// Apply a filter change and rebuild the dashboard if anything changed.
    fn update_filter(&mut self, change: impl FnOnce(&mut FilterState, &Catalog)) {
        let before = self.filter.clone();
        change(&mut self.filter, &*self.catalog);
        if self.filter != before {
            self.refresh();
        }
    }

    /// Whether a sidebar item is currently selected in the filter.
    pub fn is_selected(&self, item: &SidebarItem) -> bool {
        match item {
            SidebarItem::Type(t) => self.filter.content_types.contains(t),
            SidebarItem::Country(c) => self.filter.countries.contains(c),
            SidebarItem::YearFrom | SidebarItem::YearTo => true,
        }
    }

    fn toggle_current(&mut self) {
        let Some(item) = self.sidebar.get(self.sidebar_cursor).cloned() else {
            return;
        };

        match item {
            SidebarItem::Type(t) => self.update_filter(|f, _| f.toggle_type(t)),
            SidebarItem::Country(c) => self.update_filter(|f, _| f.toggle_country(&c)),
            SidebarItem::YearFrom | SidebarItem::YearTo => {}
        }
    }

    fn adjust_current_year(&mut self, delta: i32) {
        let item = self.sidebar.get(self.sidebar_cursor).cloned();
        match item {
            Some(SidebarItem::YearFrom) => self.update_filter(|f, _| f.shift_start(delta)),
            Some(SidebarItem::YearTo) => self.update_filter(|f, _| f.shift_end(delta)),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            Focus::Sidebar => {
                self.sidebar_cursor = step(self.sidebar_cursor, delta, self.sidebar.len());
            }
            Focus::Main if self.tab == Tab::Data => {
                self.table_cursor = step(self.table_cursor, delta, self.dashboard.preview.len());
            }
            Focus::Main => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        // Keys that work regardless of focus
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.tab = self.tab.next();
                return;
            }
            KeyCode::BackTab => {
                self.tab = self.tab.prev();
                return;
            }
            KeyCode::Char('f') => {
                self.focus = match self.focus {
                    Focus::Main => Focus::Sidebar,
                    Focus::Sidebar => Focus::Main,
                };
                return;
            }
            KeyCode::Char('a') => {
                self.update_filter(|f, catalog| f.select_all_countries(catalog));
                return;
            }
            KeyCode::Char('c') => {
                self.update_filter(|f, _| f.clear_countries());
                return;
            }
            KeyCode::Char('r') => {
                self.reload_requested = true;
                return;
            }
            KeyCode::Char('[') => return self.update_filter(|f, _| f.shift_start(-1)),
            KeyCode::Char(']') => return self.update_filter(|f, _| f.shift_start(1)),
            KeyCode::Char('{') => return self.update_filter(|f, _| f.shift_end(-1)),
            KeyCode::Char('}') => return self.update_filter(|f, _| f.shift_end(1)),
            _ => {}
        }

        match (self.focus, key) {
            (_, KeyCode::Up | KeyCode::Char('k')) => self.move_cursor(-1),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.move_cursor(1),
            (_, KeyCode::PageUp) => self.move_cursor(-10),
            (_, KeyCode::PageDown) => self.move_cursor(10),
            (Focus::Sidebar, KeyCode::Char(' ') | KeyCode::Enter) => self.toggle_current(),
            (Focus::Sidebar, KeyCode::Left | KeyCode::Char('h')) => self.adjust_current_year(-1),
            (Focus::Sidebar, KeyCode::Right | KeyCode::Char('l')) => self.adjust_current_year(1),
            (Focus::Main, KeyCode::Left | KeyCode::Char('h')) => self.tab = self.tab.prev(),
            (Focus::Main, KeyCode::Right | KeyCode::Char('l')) => self.tab = self.tab.next(),
            _ => {}
        }
    }
}


/// Move an index by `delta` within `[0, len)`.
fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}


type Tui = Terminal<CrosstermBackend<Stdout>>;


fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    restore_on_error(enter_alternate_screen, || {
        let _ = restore_terminal();
    })
}


fn enter_alternate_screen() -> Result<Tui> {
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}


fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}


/// Run `setup`, calling `restore` if it fails.
fn restore_on_error<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    let result = setup();
    if result.is_err() {
        restore();
    }
    result
}


/// Restore the terminal before the default panic message is printed.
fn install_panic_hook(restore: fn()) {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        default_hook(info);
    }));
}


/// Run the interactive dashboard until the user quits.
///
/// `r` reloads the dataset through `cache`; an unchanged file is not re-parsed.
pub fn run_dashboard(
    cache: &mut CatalogCache,
    catalog: Arc<Catalog>,
    filter: FilterState,
) -> Result<()> {
    install_panic_hook(|| {
        let _ = restore_terminal();
    });

    let result = init_terminal().and_then(|mut terminal| {
        let mut app = App::new(catalog, filter);
        let result = run_app(&mut terminal, &mut app, cache);
        restore_terminal()?;
        result
    });

    // Back to the default hook
    let _ = panic::take_hook();
    result
}


fn run_app(terminal: &mut Tui, app: &mut App, cache: &mut CatalogCache) -> Result<()> {
    use super::ui::render;

    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.reload_requested {
            app.reload_requested = false;
            match cache.load(app.catalog.source()) {
                Ok(catalog) => app.replace_catalog(catalog),
                Err(e) => app.status = Some(format!("reload failed: {e}")),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
