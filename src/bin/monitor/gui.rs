use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use quimikey::elements::ElementRecord;

type ElementFetcher = Box<dyn FnMut() -> Option<ElementRecord>>;

struct App {
    fetcher: ElementFetcher,
    current: Option<ElementRecord>,
}

impl App {
    fn new(fetcher: ElementFetcher) -> App {
        App {
            fetcher,
            current: None,
        }
    }

    fn on_tick(&mut self) {
        self.current = (self.fetcher)();
    }
}

pub fn engage_gui(fetcher: ElementFetcher) -> Result<(), Box<dyn Error>> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let tick_rate = Duration::from_millis(250);
    let app = App::new(fetcher);
    let res = run_app(&mut terminal, app, tick_rate);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui(f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let KeyCode::Char('q') = key.code {
                    return Ok(());
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn detail(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn ui(f: &mut Frame, app: &App) {
    let block = Block::default()
        .title(" Quimikey Monitor ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL);

    let lines = match app.current {
        Some(ref record) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("{}  {}", record.symbol, record.name),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                detail("atomic number", record.atomic_number.to_string()),
                detail("atomic mass", record.atomic_mass.to_string()),
                detail("category", record.category.clone()),
                detail("phase", record.phase.clone()),
            ];
            if let Some(ref url) = record.model_3d {
                lines.push(detail("3D model", url.clone()));
            }
            if let Some(ref url) = record.image_2d {
                lines.push(detail("2D image", url.clone()));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "waiting for a selection...",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let card = Paragraph::new(lines).block(block);
    f.render_widget(card, f.size());
}
