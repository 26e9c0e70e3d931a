//! Interactive TUI (Terminal User Interface) for odocgen.
//!
//! This is the terminal counterpart of the index page's search box:
//! - Every edit of the query runs one filter pass over the rendered rows
//! - The list shows the rows left visible, in index order
//! - Enter opens the documentation page of the selected row in the browser

use crate::app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use odocgen_core::{Config, FilterEngine, FilterOutcome, MemorySurface};
use ratatui::{prelude::*, widgets::*};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

/// TUI application state.
struct TuiApp {
    /// Rendered rows plus the live filter
    engine: FilterEngine<MemorySurface>,

    /// Absolute directory the index was loaded from, for resolving row links
    base_dir: String,

    /// Current search query string
    query_string: String,

    /// Selected row among the visible ones
    selected: usize,

    /// Vertical scroll offset
    scroll_offset: usize,

    /// Rows moved by PageUp/PageDown
    page_size: usize,

    /// Whether we should quit
    should_quit: bool,

    /// Duration of the last filter pass
    last_filter_time: Duration,

    /// Summary of the last filter pass
    last_outcome: FilterOutcome,

    /// Status message
    status_message: Option<String>,
}

impl TuiApp {
    fn new(app: &App) -> Self {
        let engine = app.render(MemorySurface::with_capacity(app.index.len()), "");
        let visible = engine.surface().visible_count();
        let source = std::fs::canonicalize(&app.source).unwrap_or_else(|_| app.source.clone());
        let base_dir = source
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        TuiApp {
            engine,
            base_dir,
            query_string: String::new(),
            selected: 0,
            scroll_offset: 0,
            page_size: app.config.ui.page_size.max(1),
            should_quit: false,
            last_filter_time: Duration::ZERO,
            last_outcome: FilterOutcome {
                visible,
                hidden: 0,
                changed: 0,
            },
            status_message: app.quotes.first().cloned(),
        }
    }

    /// Run a filter pass with the current query.
    fn filter(&mut self) {
        let start = Instant::now();
        self.last_outcome = self.engine.on_query_changed(&self.query_string);
        self.last_filter_time = start.elapsed();

        // Reset selection
        self.selected = 0;
        self.scroll_offset = 0;
        self.status_message = None;
    }

    /// Rows actually shown. Can differ from the last pass's match count
    /// when duplicate keys leave a row at its initial visibility.
    fn visible_len(&self) -> usize {
        self.engine.surface().visible_count()
    }

    /// Handle input character.
    fn on_char(&mut self, c: char) {
        self.query_string.push(c);
        self.filter();
    }

    /// Handle backspace.
    fn on_backspace(&mut self) {
        if self.query_string.pop().is_some() {
            self.filter();
        }
    }

    /// Clear the query.
    fn clear_query(&mut self) {
        self.query_string.clear();
        self.filter();
    }

    /// Move selection up.
    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_visible();
        }
    }

    /// Move selection down.
    fn select_next(&mut self) {
        if self.selected + 1 < self.visible_len() {
            self.selected += 1;
            self.ensure_visible();
        }
    }

    /// Page up.
    fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size);
        self.ensure_visible();
    }

    /// Page down.
    fn page_down(&mut self) {
        self.selected = (self.selected + self.page_size).min(self.visible_len().saturating_sub(1));
        self.ensure_visible();
    }

    /// Keep the selection above the top edge; the bottom edge is handled
    /// while drawing, where the list height is known.
    fn ensure_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
    }

    /// Page of the selected row, as a `file://` URL when the index
    /// directory is known.
    fn selected_location(&self) -> Option<String> {
        let row = self.engine.surface().visible_rows().nth(self.selected)?;
        let href = &row.link.href;

        Some(if self.base_dir.is_empty() {
            href.clone()
        } else {
            format!("file://{}/{}", self.base_dir.trim_end_matches('/'), href)
        })
    }

    /// Open the selected row's page in the system browser.
    fn open_selected(&mut self) {
        let Some(location) = self.selected_location() else {
            return;
        };

        self.status_message = Some(match open::that(&location) {
            Ok(()) => format!("Opened {}", location),
            Err(e) => format!("Failed to open {}: {}", location, e),
        });
    }
}

/// Run the TUI application.
pub fn run(config: Config, index: &Path) -> anyhow::Result<()> {
    let app = App::new(config, index)?;

    if app.index.is_empty() {
        eprintln!("Index is empty. Regenerate the documentation first.");
        return Ok(());
    }

    let mut tui_app = TuiApp::new(&app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut tui_app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main event loop.
fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.should_quit = true;
                        }
                        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.clear_query();
                        }
                        KeyCode::Char(c) => {
                            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                                app.on_char(c);
                            }
                        }
                        KeyCode::Backspace => {
                            app.on_backspace();
                        }
                        KeyCode::Up => {
                            app.select_previous();
                        }
                        KeyCode::Down => {
                            app.select_next();
                        }
                        KeyCode::PageUp => {
                            app.page_up();
                        }
                        KeyCode::PageDown => {
                            app.page_down();
                        }
                        KeyCode::Home => {
                            app.selected = 0;
                            app.scroll_offset = 0;
                        }
                        KeyCode::End => {
                            if app.visible_len() > 0 {
                                app.selected = app.visible_len() - 1;
                            }
                        }
                        KeyCode::Enter => {
                            app.open_selected();
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

mod ui {
    use super::*;
    use odocgen_core::EntryKind;

    /// Draw the UI.
    pub fn draw(f: &mut Frame, app: &mut TuiApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Search box
                Constraint::Min(10),   // Rows
                Constraint::Length(2), // Status bar
            ])
            .split(f.area());

        draw_search_box(f, app, chunks[0]);
        draw_rows(f, app, chunks[1]);
        draw_status_bar(f, app, chunks[2]);
    }

    /// Draw the search input box.
    fn draw_search_box(f: &mut Frame, app: &TuiApp, area: Rect) {
        let input = Paragraph::new(app.query_string.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Search (case-sensitive) "),
            );
        f.render_widget(input, area);

        f.set_cursor_position(Position::new(
            area.x + app.query_string.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }

    /// Draw the visible rows.
    fn draw_rows(f: &mut Frame, app: &mut TuiApp, area: Rect) {
        let visible_height = area.height.saturating_sub(2) as usize;

        if visible_height > 0 && app.selected >= app.scroll_offset + visible_height {
            app.scroll_offset = app.selected - visible_height + 1;
        }

        let items: Vec<ListItem> = app
            .engine
            .surface()
            .visible_rows()
            .skip(app.scroll_offset)
            .take(visible_height)
            .enumerate()
            .map(|(i, row)| {
                let kind_color = match row.kind {
                    EntryKind::Class => Color::Cyan,
                    EntryKind::Method => Color::Green,
                    EntryKind::Field => Color::Magenta,
                };

                let line = Line::from(vec![
                    Span::styled(row.prefix.clone(), Style::default().fg(kind_color)),
                    Span::styled(
                        row.link.text.clone(),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ),
                    Span::raw(row.suffix.clone()),
                ]);

                let style = if i + app.scroll_offset == app.selected {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(line).style(style)
            })
            .collect();

        let title = format!(
            " Index ({} of {} shown, {} changed, filtered in {:.2}ms) ",
            app.visible_len(),
            app.engine.surface().len(),
            app.last_outcome.changed,
            app.last_filter_time.as_secs_f64() * 1000.0
        );

        let rows = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(rows, area);
    }

    /// Draw the status bar.
    fn draw_status_bar(f: &mut Frame, app: &TuiApp, area: Rect) {
        let stats = app.engine.index().stats();

        let status = if let Some(ref msg) = app.status_message {
            msg.clone()
        } else {
            format!(
                "Index: {} classes, {} methods, {} fields | ↑↓:Navigate Enter:Open Ctrl+U:Clear Esc:Quit",
                stats.classes, stats.methods, stats.fields
            )
        };

        let status_bar = Paragraph::new(status).style(Style::default().fg(Color::Gray));

        f.render_widget(status_bar, area);
    }
}
