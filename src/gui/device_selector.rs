use std::{io::stdout, path::PathBuf};

use crate::gui::error::QuimikeyGuiError;

use crossterm::{
    event::{self, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{
        block::{Position, Title},
        *,
    },
    Terminal,
};

/// Full-screen picker over the serial devices on this machine. `list_ports`
/// is called again on every rescan, so a Quimikey plugged in while the
/// picker is open shows up after pressing `r`. Returns `None` if the user
/// quits without choosing.
pub fn device_selector<F>(list_ports: F) -> Result<Option<PathBuf>, QuimikeyGuiError>
where
    F: Fn() -> Vec<PathBuf>,
{
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut available_ports = list_ports();
    let mut cursor = 0;
    let mut list_state = ListState::default().with_selected(Some(cursor));
    let mut selected_port = None;
    loop {
        let title = Title::from(" Which port is the Quimikey on? ".cyan().bold());
        let instructions = Title::from(Line::from(vec![
            " Navigate ".into(),
            "<Up>/<Down>".cyan().bold(),
            " Select ".into(),
            "<Enter>".cyan().bold(),
            " Rescan ".into(),
            "<R>".cyan().bold(),
            " Quit ".into(),
            "<Q> ".cyan().bold(),
        ]));
        let block = Block::default()
            .title(title.alignment(Alignment::Center))
            .title(
                instructions
                    .alignment(Alignment::Center)
                    .position(Position::Bottom),
            )
            .borders(Borders::ALL);
        let list = if available_ports.is_empty() {
            List::new([" no serial devices found, plug one in and rescan "])
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
        } else {
            let port_names = available_ports.iter().map(|p| p.to_string_lossy());
            List::new(port_names)
                .style(Style::default().fg(Color::White))
                .highlight_symbol(">>")
                .highlight_style(Style::default().fg(Color::Cyan))
                .block(block)
        };
        list_state.select(Some(cursor));
        terminal.draw(|frame| {
            let area = frame.size();
            frame.render_stateful_widget(list, area, &mut list_state);
        })?;
        if event::poll(std::time::Duration::from_millis(16))? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let n_ports = available_ports.len();
                    match key.code {
                        KeyCode::Down if n_ports > 0 => {
                            cursor = (cursor + 1) % n_ports;
                        }
                        KeyCode::Up if n_ports > 0 => {
                            cursor = (cursor + n_ports - 1) % n_ports;
                        }
                        KeyCode::Enter if n_ports > 0 => {
                            selected_port = Some(cursor);
                            break;
                        }
                        KeyCode::Char('r') => {
                            available_ports = list_ports();
                            cursor = 0;
                        }
                        KeyCode::Char('q') => break,
                        _ => {}
                    }
                }
            }
        }
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(selected_port.map(|i| available_ports.swap_remove(i)))
}
