#[cfg(target_arch = "wasm32")]
fn main() -> std::io::Result<()> {
    web::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "school-odds runs in the browser: build it with `trunk serve`. \
         The API is served by `school-odds-server`."
    );
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::{cell::RefCell, io, rc::Rc};

    use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
    use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
    use ratzilla::ratatui::style::{Color, Style};
    use ratzilla::ratatui::text::{Line, Span};
    use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
    use ratzilla::ratatui::{Frame, Terminal};
    use ratzilla::{DomBackend, WebRenderer};

    use school_odds::form::api::XhrBackend;
    use school_odds::form::state::Screen;
    use school_odds::form::FormApp;
    use school_odds::input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
    use school_odds::storage::{self, KeyValueStore, MemoryStore};

    /// Query the grid container's bounding rect and convert pixel coordinates to a cell.
    fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
        let document = web_sys::window()?.document()?;

        // DomBackend creates a <div> as the grid container inside <body>.
        let grid = document.query_selector("body > div").ok()??;
        let rect = grid.get_bounding_client_rect();

        let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
        let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
        Some((col, row))
    }

    fn key_char(code: KeyCode) -> Option<char> {
        match code {
            KeyCode::Up => Some('k'),
            KeyCode::Down => Some('j'),
            KeyCode::Left => Some('h'),
            KeyCode::Right => Some('l'),
            KeyCode::Enter => Some('e'),
            KeyCode::Esc => Some('q'),
            KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }

    pub fn run() -> io::Result<()> {
        console_error_panic_hook::set_once();

        let store: Box<dyn KeyValueStore> = match storage::session_storage() {
            Some(session) => Box::new(session),
            None => {
                web_sys::console::warn_1(&"school-odds: no sessionStorage, nothing will persist".into());
                Box::new(MemoryStore::new())
            }
        };
        let app = Rc::new(RefCell::new(FormApp::new(store, Box::new(XhrBackend::new("")))));
        let click_state = Rc::new(RefCell::new(ClickState::new()));
        let backend = DomBackend::new()?;
        let terminal = Terminal::new(backend)?;

        // Mouse/touch click handler
        terminal.on_mouse_event({
            let app = app.clone();
            let click_state = click_state.clone();
            move |mouse_event| {
                if mouse_event.event != MouseEventKind::Pressed
                    || mouse_event.button != MouseButton::Left
                {
                    return;
                }

                let action = {
                    let cs = click_state.borrow();
                    dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                        .and_then(|(col, row)| cs.hit_test(col, row))
                };
                if let Some(id) = action {
                    app.borrow_mut().handle_input(&InputEvent::Click(id));
                }
            }
        });

        // Keyboard handler
        terminal.on_key_event({
            let app = app.clone();
            move |key_event| {
                if let Some(c) = key_char(key_event.code) {
                    app.borrow_mut().handle_input(&InputEvent::Key(c));
                }
            }
        });

        terminal.draw_web(move |f| {
            let app = app.borrow();
            let size = f.area();

            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(13), Constraint::Length(3)])
                .split(size);

            app.render(f, chunks[0], &click_state);
            render_help(f, app.state.screen, chunks[1]);
        });

        Ok(())
    }

    fn render_help(f: &mut Frame, screen: Screen, area: Rect) {
        let help_text = match screen {
            Screen::Form => "↑↓ champ · ←→ valeur · Entrée choisir",
            Screen::SpecialitePicker | Screen::TargetPicker => "touche ou tap : cocher · Échap retour",
            Screen::Summary => "Échap retour",
        };
        let help = Paragraph::new(Line::from(Span::styled(
            help_text,
            Style::default().fg(Color::DarkGray),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
        f.render_widget(help, area);
    }
}
