use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame, Terminal,
};
use semicon_core::consts::DROPPED_MARKER;
use semicon_core::{radio, Flush, Stats};

use crate::debugger::HostWrite;
use crate::mock_radio::MockRadio;
use crate::SimConsole;

/// Snapshot of the console taken once per frame.
#[derive(Clone, Copy, Debug, Default)]
struct ConsoleView {
    pending: usize,
    capacity: usize,
    stats: Stats,
    log_enabled: bool,
    buffer_enabled: bool,
    silenced: bool,
}

impl ConsoleView {
    fn read(console: &SimConsole) -> Option<Self> {
        console.with(|c| Self {
            pending: c.pending(),
            capacity: c.capacity(),
            stats: c.stats(),
            log_enabled: c.is_log_enabled(),
            buffer_enabled: c.is_buffer_enabled(),
            silenced: c.is_silenced(),
        })
    }
}

/// Everything the TUI needs to drive the simulated target.
pub struct Sim {
    pub console: &'static SimConsole,
    pub debugger_rx: Receiver<HostWrite>,
    pub attached: Arc<AtomicBool>,
    pub irq_running: Arc<AtomicBool>,
    pub radio: MockRadio,
}

struct TuiState {
    sim: Sim,
    lines: Vec<String>,
    partial: String,
    max_lines: usize,
    view: ConsoleView,
    last_flush: Option<Flush>,
    auto_flush_loop: bool,
    should_quit: bool,
}

impl TuiState {
    fn new(sim: Sim) -> Self {
        Self {
            sim,
            lines: Vec::new(),
            partial: String::new(),
            max_lines: 500,
            view: ConsoleView::default(),
            last_flush: None,
            auto_flush_loop: true,
            should_quit: false,
        }
    }

    /// Pull everything the debugger received and split it into lines.
    fn collect_output(&mut self) {
        while let Ok(write) = self.sim.debugger_rx.try_recv() {
            self.partial.push_str(&String::from_utf8_lossy(&write.bytes));
            while let Some(end) = self.partial.find('\n') {
                let line: String = self.partial.drain(..=end).collect();
                self.lines.push(line.trim_end_matches(['\r', '\n']).to_string());
            }
        }
        if self.lines.len() > self.max_lines {
            let excess = self.lines.len() - self.max_lines;
            self.lines.drain(..excess);
        }
    }

    /// One pass of the target's main loop.
    fn tick(&mut self) {
        if self.auto_flush_loop {
            match self.sim.console.flush() {
                Flush::Empty => {}
                result => self.last_flush = Some(result),
            }
        }
        if let Some(view) = ConsoleView::read(self.sim.console) {
            self.view = view;
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let console = self.sim.console;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Char('l') => {
                if self.view.log_enabled {
                    console.disable_log();
                } else {
                    console.enable_log();
                    log::info!("logging enabled");
                }
            }
            KeyCode::Char('b') => {
                if self.view.buffer_enabled {
                    self.last_flush = Some(console.disable_buffer());
                } else {
                    console.enable_buffer();
                    log::info!("buffering enabled");
                }
            }
            KeyCode::Char('f') => self.last_flush = Some(console.flush()),
            KeyCode::Char('p') => self.auto_flush_loop = !self.auto_flush_loop,
            KeyCode::Char('s') => console.set_silenced(!self.view.silenced),
            KeyCode::Char('d') => {
                let attached = self.sim.attached.load(Ordering::Relaxed);
                self.sim.attached.store(!attached, Ordering::Relaxed);
            }
            KeyCode::Char('i') => {
                let running = self.sim.irq_running.load(Ordering::Relaxed);
                self.sim.irq_running.store(!running, Ordering::Relaxed);
            }
            KeyCode::Char('r') => {
                let queued = self.sim.radio.burst(4);
                log::debug!("{} packets waiting", queued);
                let mut out = console;
                radio::drain(&mut self.sim.radio, &mut out);
            }
            KeyCode::Char('x') => {
                for n in 0..64 {
                    console.print_fmt(format_args!("spam line {:02} ", n));
                    console.print_float(n as f32 / 3.0);
                    console.print("\n");
                }
            }
            KeyCode::Char('z') => {
                console.with(|c| c.reset_stats());
            }
            _ => {}
        }
    }
}

pub fn run(sim: Sim) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = TuiState::new(sim);
    log::info!("simulated target up");

    while !state.should_quit {
        state.tick();
        state.collect_output();

        terminal.draw(|f| ui(f, &state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                state.handle_key(key.code, key.modifiers);
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}

fn ui(f: &mut Frame, state: &TuiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Output + status
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("Semihosting Console Simulator")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(rows[1]);

    render_output(f, columns[0], state);
    render_status(f, columns[1], state);

    let help = Paragraph::new(
        "l: log | b: buffer | f: flush | p: main-loop flush | s: silence | d: probe | i: irq | r: radio | x: spam | z: reset stats | q: quit",
    )
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, rows[2]);
}

fn render_output(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default().borders(Borders::ALL).title("Debugger stderr");
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Show the tail that fits
    let visible = inner.height as usize;
    let start = state.lines.len().saturating_sub(visible);
    let marker = String::from_utf8_lossy(DROPPED_MARKER);
    let marker: &str = &marker;

    let items: Vec<ListItem> = state.lines[start..]
        .iter()
        .map(|line| {
            let content = match line.split_once(marker) {
                Some((before, after)) => Line::from(vec![
                    Span::raw(before),
                    Span::styled(marker, Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                    Span::raw(after),
                ]),
                None => Line::from(line.as_str()),
            };
            ListItem::new(content)
        })
        .collect();

    f.render_widget(List::new(items), inner);
}

fn render_status(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default().borders(Borders::ALL).title("Target");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(6)])
        .split(inner);

    let view = &state.view;
    let ratio = if view.capacity == 0 {
        0.0
    } else {
        (view.pending as f64 / view.capacity as f64).clamp(0.0, 1.0)
    };
    let gauge_color = if ratio > 0.9 { Color::Red } else { Color::Green };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(ratio)
        .label(format!("{}/{} bytes", view.pending, view.capacity));
    f.render_widget(gauge, parts[0]);

    let attached = state.sim.attached.load(Ordering::Relaxed);
    let irq = state.sim.irq_running.load(Ordering::Relaxed);
    let last_flush = state
        .last_flush
        .map(|r| format!("{:?}", r))
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        flag_line("log", view.log_enabled),
        flag_line("buffer", view.buffer_enabled),
        flag_line("silenced", view.silenced),
        flag_line("probe", attached),
        flag_line("irq ticks", irq),
        flag_line("main-loop flush", state.auto_flush_loop),
        Line::from(format!("marked:   {}", view.stats.marked)),
        Line::from(format!("rejected: {}", view.stats.rejected)),
        Line::from(format!("last flush: {}", last_flush)),
    ];
    f.render_widget(Paragraph::new(lines), parts[1]);
}

fn flag_line(name: &str, on: bool) -> Line<'static> {
    let (text, color) = if on { ("on", Color::Green) } else { ("off", Color::DarkGray) };
    Line::from(vec![
        Span::raw(format!("{:<16}", name)),
        Span::styled(text, Style::default().fg(color)),
    ])
}
