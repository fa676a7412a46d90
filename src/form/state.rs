//! Form state: what the student has chosen and where the UI is.

use serde::{Deserialize, Serialize};

use crate::data::{BacType, Classe, FicheAvenir};

/// Form fields in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Lycee,
    Classe,
    Bac,
    Specialites,
    Targets,
    FicheAvenir,
}

pub const FIELDS: [Field; 6] = [
    Field::Lycee,
    Field::Classe,
    Field::Bac,
    Field::Specialites,
    Field::Targets,
    Field::FicheAvenir,
];

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Lycee => "Lycée",
            Field::Classe => "Classe",
            Field::Bac => "Bac",
            Field::Specialites => "Spécialités",
            Field::Targets => "Écoles visées",
            Field::FicheAvenir => "Fiche Avenir",
        }
    }

    /// Fields edited with the previous/next arrows rather than a picker.
    pub fn is_single_choice(self) -> bool {
        matches!(self, Field::Lycee | Field::Classe | Field::Bac)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Form,
    SpecialitePicker,
    TargetPicker,
    Summary,
}

/// Everything the student has entered so far. Saved to the form slot after
/// every change, so all fields are optional and default to empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub lycee: Option<String>,
    pub classe: Option<Classe>,
    pub bac_type: Option<BacType>,
    pub specialites: Vec<String>,
    /// Target school names, in the order they were picked.
    pub targets: Vec<String>,
    /// Metadata echoed back by the upload endpoint.
    pub fiche_avenir: Option<FicheAvenir>,
}

/// Snapshot of a submitted form, saved to the result slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultData {
    pub lycee: String,
    pub classe: Classe,
    pub bac_type: BacType,
    pub specialites: Vec<String>,
    pub targets: Vec<String>,
    pub fiche_avenir: Option<FicheAvenir>,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

const MAX_LOG: usize = 50;

pub struct FormState {
    pub data: FormData,
    pub result: Option<ResultData>,
    pub screen: Screen,
    /// Index into [`FIELDS`].
    pub cursor: usize,
    pub log: Vec<LogEntry>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            data: FormData::default(),
            result: None,
            screen: Screen::Form,
            cursor: 0,
            log: Vec::new(),
        }
    }

    pub fn field(&self) -> Field {
        FIELDS[self.cursor]
    }

    pub fn add_log(&mut self, text: &str) {
        self.push_log(text, false);
    }

    pub fn add_important_log(&mut self, text: &str) {
        self.push_log(text, true);
    }

    fn push_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
