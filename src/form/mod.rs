//! Orientation form: pick a lycée, classe, bac track, spécialités and target
//! schools, attach a Fiche Avenir, then submit a summary.
//!
//! Keys and taps are first turned into a [`Command`], then applied. Every
//! applied command re-saves the form slot, except a reset which clears
//! both slots instead.

pub mod actions;
pub mod api;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::data::{SCHOOLS, SPECIALITES};
use crate::input::{ClickState, InputEvent};
use crate::storage::{self, KeyValueStore};

use actions::*;
use api::Backend;
use state::{Field, FormData, FormState, ResultData, Screen, FIELDS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveCursor(isize),
    /// Tap on a field row: select it, or activate it if already selected.
    SelectField(usize),
    Cycle { forward: bool },
    OpenPicker,
    ToggleSpecialite(usize),
    ToggleTarget(usize),
    Prefill,
    UploadFiche,
    Submit,
    ShowSummary,
    Reset,
    Back,
}

/// Key shown next to the `index`-th picker entry: `1`..`9`, then `a`...
pub fn picker_key(index: usize) -> char {
    if index < 9 {
        (b'1' + index as u8) as char
    } else {
        (b'a' + (index - 9) as u8) as char
    }
}

/// Inverse of [`picker_key`].
pub fn picker_index(key: char) -> Option<usize> {
    match key {
        '1'..='9' => Some(key as usize - '1' as usize),
        'a'..='z' => Some(key as usize - 'a' as usize + 9),
        _ => None,
    }
}

pub fn key_command(screen: Screen, key: char) -> Option<Command> {
    match screen {
        Screen::Form => match key {
            'j' => Some(Command::MoveCursor(1)),
            'k' => Some(Command::MoveCursor(-1)),
            'h' => Some(Command::Cycle { forward: false }),
            'l' => Some(Command::Cycle { forward: true }),
            'e' => Some(Command::OpenPicker),
            'p' => Some(Command::Prefill),
            'u' => Some(Command::UploadFiche),
            's' => Some(Command::Submit),
            'v' => Some(Command::ShowSummary),
            'x' => Some(Command::Reset),
            _ => None,
        },
        Screen::SpecialitePicker | Screen::TargetPicker => match key {
            'q' | '-' => Some(Command::Back),
            _ => {
                let index = picker_index(key)?;
                if screen == Screen::SpecialitePicker {
                    (index < SPECIALITES.len()).then_some(Command::ToggleSpecialite(index))
                } else {
                    (index < SCHOOLS.len()).then_some(Command::ToggleTarget(index))
                }
            }
        },
        Screen::Summary => match key {
            'q' | '-' => Some(Command::Back),
            'x' => Some(Command::Reset),
            _ => None,
        },
    }
}

pub fn click_command(action_id: u16) -> Option<Command> {
    match action_id {
        id if (SELECT_FIELD_BASE..SELECT_FIELD_BASE + FIELDS.len() as u16).contains(&id) => {
            Some(Command::SelectField((id - SELECT_FIELD_BASE) as usize))
        }
        PREV_VALUE => Some(Command::Cycle { forward: false }),
        NEXT_VALUE => Some(Command::Cycle { forward: true }),
        OPEN_PICKER => Some(Command::OpenPicker),
        id if (TOGGLE_SPECIALITE_BASE..TOGGLE_SPECIALITE_BASE + SPECIALITES.len() as u16)
            .contains(&id) =>
        {
            Some(Command::ToggleSpecialite((id - TOGGLE_SPECIALITE_BASE) as usize))
        }
        id if (TOGGLE_TARGET_BASE..TOGGLE_TARGET_BASE + SCHOOLS.len() as u16).contains(&id) => {
            Some(Command::ToggleTarget((id - TOGGLE_TARGET_BASE) as usize))
        }
        PREFILL => Some(Command::Prefill),
        UPLOAD_FICHE => Some(Command::UploadFiche),
        SUBMIT => Some(Command::Submit),
        RESET => Some(Command::Reset),
        BACK => Some(Command::Back),
        SHOW_SUMMARY => Some(Command::ShowSummary),
        _ => None,
    }
}

pub struct FormApp {
    pub state: FormState,
    store: Box<dyn KeyValueStore>,
    backend: Box<dyn Backend>,
}

impl FormApp {
    /// Build the form, restoring whatever the session already holds.
    pub fn new(store: Box<dyn KeyValueStore>, backend: Box<dyn Backend>) -> Self {
        let mut state = FormState::new();
        if let Some(data) = storage::load_form_data::<_, FormData>(&*store) {
            state.data = data;
            state.add_log("Formulaire restauré");
        }
        state.result = storage::load_result_data::<_, ResultData>(&*store);

        Self {
            state,
            store,
            backend,
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let command = match event {
            InputEvent::Key(c) => key_command(self.state.screen, *c),
            InputEvent::Click(id) => click_command(*id),
        };
        match command {
            Some(command) => self.apply(command),
            None => false,
        }
    }

    pub fn apply(&mut self, command: Command) -> bool {
        let consumed = match command {
            Command::MoveCursor(delta) => {
                logic::move_cursor(&mut self.state, delta);
                true
            }
            Command::SelectField(index) => {
                if self.state.cursor == index {
                    self.activate_field()
                } else {
                    logic::select_field(&mut self.state, index)
                }
            }
            Command::Cycle { forward } => logic::cycle_value(&mut self.state, forward),
            Command::OpenPicker => self.activate_field(),
            Command::ToggleSpecialite(index) => logic::toggle_specialite(&mut self.state, index),
            Command::ToggleTarget(index) => logic::toggle_target(&mut self.state, index),
            Command::Prefill => {
                self.prefill();
                true
            }
            Command::UploadFiche => {
                self.upload_fiche();
                true
            }
            Command::Submit => {
                if let Some(result) = logic::submit(&mut self.state) {
                    storage::save_result_data(&*self.store, &result);
                }
                true
            }
            Command::ShowSummary => {
                if self.state.result.is_none() {
                    self.state.add_log("Aucun envoi enregistré");
                } else {
                    self.state.screen = Screen::Summary;
                }
                true
            }
            Command::Reset => {
                storage::clear_all_data(&*self.store);
                logic::reset(&mut self.state);
                return true;
            }
            Command::Back => {
                self.state.screen = Screen::Form;
                true
            }
        };

        if consumed {
            storage::save_form_data(&*self.store, &self.state.data);
        }
        consumed
    }

    fn activate_field(&mut self) -> bool {
        match self.state.field() {
            Field::FicheAvenir => {
                self.upload_fiche();
                true
            }
            f if f.is_single_choice() => logic::cycle_value(&mut self.state, true),
            _ => logic::open_picker(&mut self.state),
        }
    }

    fn prefill(&mut self) {
        match self.backend.prefill() {
            Ok(payload) => logic::apply_prefill(&mut self.state, payload),
            Err(e) => self
                .state
                .add_important_log(&format!("Pré-remplissage impossible : {e}")),
        }
    }

    fn upload_fiche(&mut self) {
        let Some(fiche) = self.backend.selected_fiche() else {
            self.state
                .add_log("Choisissez d'abord un fichier (bouton au-dessus du formulaire)");
            return;
        };
        match self.backend.upload_fiche(&fiche) {
            Ok(receipt) => logic::apply_upload(&mut self.state, receipt),
            Err(e) => self
                .state
                .add_important_log(&format!("Envoi de la Fiche Avenir impossible : {e}")),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
