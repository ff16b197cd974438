use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, TableState};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use verselink_client::{Backend, GraphParams, SearchParams, Session};
use verselink_core::{ResultKey, SelectionState};

pub mod neighborhood;
pub mod results;

/// How long to wait for a key before checking for new snapshots.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Results,
    Graph,
}

/// Something the user asked for that needs the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Search(String),
    Select(ResultKey),
}

/// Request parameters used for every intent of the session.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub search: SearchParams,
    pub graph: GraphParams,
}

/// Application state for the explorer.
///
/// Holds the latest published snapshot plus purely local view state
/// (focus, query input, table cursors). Never mutates the snapshot.
#[derive(Debug)]
pub struct App {
    pub focus: Focus,
    pub input: String,
    pub state: SelectionState,
    pub results_table: TableState,
    pub nodes_table: TableState,
    /// Transient notice shown in the status bar.
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            focus: Focus::Query,
            input: String::new(),
            state: SelectionState::new(),
            results_table: TableState::default(),
            nodes_table: TableState::default(),
            notice: None,
            should_quit: false,
        }
    }

    /// Take a new snapshot, keeping the table cursors in range.
    pub fn update(&mut self, state: SelectionState) {
        let results = state.results().len();
        let nodes = state.graph().map_or(0, |g| g.node_count());
        self.state = state;
        clamp_cursor(&mut self.results_table, results);
        clamp_cursor(&mut self.nodes_table, nodes);
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<Intent> {
        match self.focus {
            Focus::Query => self.handle_query_key(key),
            Focus::Results => self.handle_results_key(key),
            Focus::Graph => {
                self.handle_graph_key(key);
                None
            }
        }
    }

    fn handle_query_key(&mut self, key: KeyCode) -> Option<Intent> {
        match key {
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => {
                let term = self.input.trim().to_string();
                if term.is_empty() {
                    return None;
                }
                self.focus = Focus::Results;
                self.notice = None;
                Some(Intent::Search(term))
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = Focus::Results;
                None
            }
            _ => None,
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) -> Option<Intent> {
        let count = self.state.results().len();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('/') => self.focus = Focus::Query,
            KeyCode::Tab => self.focus = Focus::Graph,
            KeyCode::Char('j') | KeyCode::Down => move_cursor(&mut self.results_table, count, 1),
            KeyCode::Char('k') | KeyCode::Up => move_cursor(&mut self.results_table, count, -1),
            KeyCode::Enter => {
                let index = self.results_table.selected()?;
                let key = self.state.results().as_slice().get(index)?.key.clone();
                self.notice = None;
                return Some(Intent::Select(key));
            }
            _ => {}
        }
        None
    }

    fn handle_graph_key(&mut self, key: KeyCode) {
        let count = self.state.graph().map_or(0, |g| g.node_count());
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Tab => self.focus = Focus::Results,
            KeyCode::Char('/') => self.focus = Focus::Query,
            KeyCode::Char('j') | KeyCode::Down => move_cursor(&mut self.nodes_table, count, 1),
            KeyCode::Char('k') | KeyCode::Up => move_cursor(&mut self.nodes_table, count, -1),
            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_cursor(table: &mut TableState, len: usize) {
    match (table.selected(), len) {
        (_, 0) => table.select(None),
        (None, _) => table.select(Some(0)),
        (Some(i), _) if i >= len => table.select(Some(len - 1)),
        _ => {}
    }
}

fn move_cursor(table: &mut TableState, len: usize, step: isize) {
    if len == 0 {
        return;
    }
    let current = table.selected().unwrap_or(0);
    let next = current.saturating_add_signed(step).min(len - 1);
    table.select(Some(next));
}

/// Run the explorer.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error). Must be called from within a tokio runtime
/// that allows blocking, since backend requests are spawned onto it.
pub fn run_tui<B: Backend + 'static>(
    session: &Arc<Session<B>>,
    params: Params,
    query: Option<String>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, session, params, query);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<B: Backend + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &Arc<Session<B>>,
    params: Params,
    query: Option<String>,
) -> Result<()> {
    let handle = Handle::current();
    let (notices_tx, mut notices_rx) = mpsc::unbounded_channel();
    let mut snapshots = session.subscribe();
    let mut app = App::new();

    if let Some(term) = query {
        app.input.clone_from(&term);
        app.focus = Focus::Results;
        spawn_intent(&handle, session, params, Intent::Search(term), &notices_tx);
    }

    loop {
        if snapshots.has_changed().unwrap_or(false) {
            let state = snapshots.borrow_and_update().clone();
            app.update(state);
        }
        while let Ok(notice) = notices_rx.try_recv() {
            app.notice = Some(notice);
        }

        terminal.draw(|frame| render(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(intent) = app.handle_key(key.code) {
                        spawn_intent(&handle, session, params, intent, &notices_tx);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn spawn_intent<B: Backend + 'static>(
    handle: &Handle,
    session: &Arc<Session<B>>,
    params: Params,
    intent: Intent,
    notices: &mpsc::UnboundedSender<String>,
) {
    let session = Arc::clone(session);
    let notices = notices.clone();
    match intent {
        Intent::Search(term) => {
            handle.spawn(async move {
                let outcome = session.submit_query(&term, &params.search).await;
                log::debug!("query {:?}: {:?}", term, outcome);
            });
        }
        Intent::Select(key) => {
            handle.spawn(async move {
                if let Err(e) = session.select_result(&key, &params.graph).await {
                    notices.send(e.to_string()).ok();
                }
            });
        }
    }
}

fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query bar
            Constraint::Min(8),    // Panes
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(panes[1]);

    results::render_query(frame, app, chunks[0]);
    results::render_table(frame, app, panes[0]);
    neighborhood::render_graph(frame, app, right[0]);
    neighborhood::render_words(frame, app, right[1]);
    render_status(frame, app, chunks[2]);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if let Some(notice) = &app.notice {
        (notice.clone(), Style::default().fg(Color::Yellow))
    } else if let Some(error) = app.state.last_error() {
        (
            format!("{:?}: {}", error.kind, error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        let help = match app.focus {
            Focus::Query => "  Type a query  Enter Search  Esc Results",
            Focus::Results => {
                "  \u{2191}/k Up  \u{2193}/j Down  Enter Select  / Search  Tab Graph  q Quit"
            }
            Focus::Graph => "  \u{2191}/k Up  \u{2193}/j Down  Tab Results  / Search  q Quit",
        };
        (help.to_string(), Style::default().fg(Color::DarkGray))
    };

    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

/// Terminal color for a domain color.
pub(crate) fn to_color(rgb: verselink_core::Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
