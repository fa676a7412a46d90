//! Form rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::data::{find_school, MAX_SPECIALITES, SCHOOLS, SPECIALITES};
use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::logic::{format_size, specialites_allowed};
use super::picker_key;
use super::state::{Field, FormState, LogEntry, ResultData, Screen, FIELDS};

pub fn render(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10)])
        .split(area);

    render_title(state, f, chunks[0]);

    let mut cs = click_state.borrow_mut();
    match state.screen {
        Screen::Form => render_form(state, f, chunks[1], &mut cs),
        Screen::SpecialitePicker => render_specialite_picker(state, f, chunks[1], &mut cs),
        Screen::TargetPicker => render_target_picker(state, f, chunks[1], &mut cs),
        Screen::Summary => match &state.result {
            Some(result) => render_summary(result, f, chunks[1], &mut cs),
            None => render_form(state, f, chunks[1], &mut cs),
        },
    }
}

fn render_title(state: &FormState, f: &mut Frame, area: Rect) {
    let subtitle = match state.screen {
        Screen::Form => "Formulaire",
        Screen::SpecialitePicker => "Spécialités",
        Screen::TargetPicker => "Écoles visées",
        Screen::Summary => "Récapitulatif",
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "School Odds",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ·  {subtitle}"), Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(ratzilla::ratatui::layout::Alignment::Center);
    f.render_widget(title, area);
}

/// ` [K] label` with the key highlighted.
fn command_line(key: char, label: &str, enabled: bool) -> Line<'static> {
    let label_color = if enabled { Color::White } else { Color::DarkGray };
    Line::from(vec![
        Span::styled(
            format!(" [{}] ", key.to_ascii_uppercase()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(label.to_string(), Style::default().fg(label_color)),
    ])
}

// ── Form screen ────────────────────────────────────────────────────────

fn render_form(state: &FormState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    if is_narrow_layout(area.width) {
        let fields_height = FIELDS.len() as u16 + 5;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(fields_height),
                Constraint::Length(8),
                Constraint::Min(3),
            ])
            .split(area);
        render_fields(state, f, chunks[0], cs);
        render_commands(state, f, chunks[1], cs);
        render_log(&state.log, f, chunks[2]);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(FIELDS.len() as u16 + 5), Constraint::Length(8)])
            .split(columns[0]);
        render_fields(state, f, left[0], cs);
        render_commands(state, f, left[1], cs);
        render_log(&state.log, f, columns[1]);
    }
}

fn field_value(state: &FormState, field: Field) -> String {
    let data = &state.data;
    let unset = || "—".to_string();
    match field {
        Field::Lycee => data.lycee.clone().unwrap_or_else(unset),
        Field::Classe => data.classe.map(|c| c.label().to_string()).unwrap_or_else(unset),
        Field::Bac => data.bac_type.map(|b| b.label().to_string()).unwrap_or_else(unset),
        Field::Specialites => {
            if !specialites_allowed(state) {
                "non concerné".to_string()
            } else if data.specialites.is_empty() {
                unset()
            } else {
                data.specialites.join(", ")
            }
        }
        Field::Targets => match data.targets.len() {
            0 => unset(),
            1 => data.targets[0].clone(),
            n => format!("{n} écoles"),
        },
        Field::FicheAvenir => match &data.fiche_avenir {
            Some(fiche) => format!("{} ({})", fiche.name, format_size(fiche.size)),
            None => unset(),
        },
    }
}

fn render_fields(state: &FormState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();

    for (i, field) in FIELDS.iter().enumerate() {
        let selected = i == state.cursor;
        let marker = if selected { "▶ " } else { "  " };
        let label_style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let line = Line::from(vec![
            Span::styled(format!(" {marker}{:<14}", field.label()), label_style),
            Span::styled(field_value(state, *field), Style::default().fg(Color::White)),
        ]);
        cl.push_clickable(line, SELECT_FIELD_BASE + i as u16);
    }

    cl.push(Line::from(""));
    match state.field() {
        field if field.is_single_choice() => {
            cl.push_clickable(command_line('h', "◀ Valeur précédente", true), PREV_VALUE);
            cl.push_clickable(command_line('l', "▶ Valeur suivante", true), NEXT_VALUE);
        }
        Field::Specialites => {
            let allowed = specialites_allowed(state);
            cl.push_clickable(command_line('e', "Choisir les spécialités", allowed), OPEN_PICKER);
        }
        Field::Targets => {
            cl.push_clickable(command_line('e', "Choisir les écoles", true), OPEN_PICKER);
        }
        _ => {
            cl.push_clickable(command_line('u', "Envoyer le fichier choisi", true), UPLOAD_FICHE);
        }
    }

    cl.register_targets(area, cs, 1, 1);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Votre profil ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_commands(state: &FormState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();
    cl.push_clickable(command_line('p', "Pré-remplir (lycée, classe)", true), PREFILL);
    cl.push_clickable(command_line('u', "Envoyer la Fiche Avenir", true), UPLOAD_FICHE);
    cl.push_clickable(command_line('s', "Valider le formulaire", true), SUBMIT);
    cl.push_clickable(command_line('x', "Tout effacer", true), RESET);
    if state.result.is_some() {
        cl.push_clickable(command_line('v', "Voir le dernier envoi", true), SHOW_SUMMARY);
    }

    cl.register_targets(area, cs, 1, 1);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Actions ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_log(log: &[LogEntry], f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = log.len().saturating_sub(visible);

    let lines: Vec<Line> = log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Journal "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

// ── Pickers ────────────────────────────────────────────────────────────

fn check_line(index: usize, checked: bool, label: String) -> Line<'static> {
    let (mark, color) = if checked {
        ("☑", Color::Green)
    } else {
        ("☐", Color::White)
    };
    Line::from(vec![
        Span::styled(
            format!(" [{}] ", picker_key(index)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{mark} {label}"), Style::default().fg(color)),
    ])
}

fn render_specialite_picker(state: &FormState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let chosen = &state.data.specialites;
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {}/{MAX_SPECIALITES} sélectionnées", chosen.len()),
        Style::default().fg(Color::Gray),
    )));
    for (i, code) in SPECIALITES.iter().enumerate() {
        let checked = chosen.iter().any(|c| c == code);
        cl.push_clickable(check_line(i, checked, code.to_string()), TOGGLE_SPECIALITE_BASE + i as u16);
    }
    cl.push(Line::from(""));
    cl.push_clickable(command_line('-', "Retour", true), BACK);

    cl.register_targets(area, cs, 1, 1);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Spécialités ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_target_picker(state: &FormState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let narrow = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();
    for (i, school) in SCHOOLS.iter().enumerate() {
        let checked = state.data.targets.iter().any(|t| t == school.school);
        let label = if narrow {
            school.school.to_string()
        } else {
            format!("{} · {} ({})", school.school, school.program, school.location)
        };
        cl.push_clickable(check_line(i, checked, label), TOGGLE_TARGET_BASE + i as u16);
    }
    cl.push(Line::from(""));
    cl.push_clickable(command_line('-', "Retour", true), BACK);

    cl.register_targets(area, cs, 1, 1);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Écoles visées ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Summary ────────────────────────────────────────────────────────────

fn summary_row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<14}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_summary(result: &ResultData, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();
    cl.push(summary_row("Lycée", result.lycee.clone()));
    cl.push(summary_row("Classe", result.classe.label().to_string()));
    cl.push(summary_row("Bac", result.bac_type.label().to_string()));
    let specialites = if result.specialites.is_empty() {
        "—".to_string()
    } else {
        result.specialites.join(", ")
    };
    cl.push(summary_row("Spécialités", specialites));
    let fiche = match &result.fiche_avenir {
        Some(fiche) => format!("{} ({})", fiche.name, format_size(fiche.size)),
        None => "non jointe".to_string(),
    };
    cl.push(summary_row("Fiche Avenir", fiche));

    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " Écoles visées",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    if result.targets.is_empty() {
        cl.push(Line::from(Span::styled("   aucune", Style::default().fg(Color::DarkGray))));
    }
    for name in &result.targets {
        let detail = match find_school(name) {
            Some(school) => format!("   {} · {}, {}", school.school, school.program, school.location),
            None => format!("   {name}"),
        };
        cl.push(Line::from(Span::styled(detail, Style::default().fg(Color::White))));
    }

    cl.push(Line::from(""));
    cl.push_clickable(command_line('-', "Retour au formulaire", true), BACK);
    cl.push_clickable(command_line('x', "Tout effacer", true), RESET);

    cl.register_targets(area, cs, 1, 1);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Récapitulatif ");
    let widget = Paragraph::new(cl.into_lines()).block(block);
    f.render_widget(widget, area);
}
