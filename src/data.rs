//! Reference data: schools, class levels, bac tracks, specialties and
//! post-bac target institutions.
//!
//! Every list is a closed, process-wide constant. Order matters: the form
//! cycles through values in the order they appear here.

use serde::{Deserialize, Serialize};

/// Lycées offered in the school selector.
pub const LYCEES: [&str; 19] = [
    "Etienne Dolet",
    "Lycée privé Charles de Foucauld",
    "Lycée polyvalent Guillaume Tirel",
    "Lycée polyvalent l'Initiative",
    "Lycée polyvalent privé Saint Jean de Montmartre",
    "Lycée privé Pascal",
    "Lycée du bâtiment et des travaux publics",
    "Lycée polyvalent privé Saint-Nicolas",
    "Lycée privé La Rochefoucauld",
    "Lycée technique privé de l'école technique supérieure du laboratoire",
    "Lycée privé Charles Péguy",
    "Lycée privé Sainte-Louise",
    "Lycée privé L'Ecole alsacienne",
    "Lycée polyvalent ESAA-Ecole Boulle",
    "Lycée polyvalent Paul Poiret",
    "Lycée Charlemagne",
    "Lycée Claude Monet",
    "Lycée privé Lucien de Hirsch",
    "Lycée privé Saint-Michel de Picpus",
];

/// Year level within the last three years of lycée.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classe {
    Seconde,
    #[serde(rename = "Première")]
    Premiere,
    Terminale,
}

/// All class levels in pedagogical order.
pub const CLASSES: [Classe; 3] = [Classe::Seconde, Classe::Premiere, Classe::Terminale];

impl Classe {
    pub fn label(self) -> &'static str {
        match self {
            Classe::Seconde => "Seconde",
            Classe::Premiere => "Première",
            Classe::Terminale => "Terminale",
        }
    }
}

/// Baccalauréat track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BacType {
    #[serde(rename = "Général")]
    General,
    Technologique,
    Professionnel,
}

pub const BAC_TYPES: [BacType; 3] = [
    BacType::General,
    BacType::Technologique,
    BacType::Professionnel,
];

impl BacType {
    pub fn label(self) -> &'static str {
        match self {
            BacType::General => "Général",
            BacType::Technologique => "Technologique",
            BacType::Professionnel => "Professionnel",
        }
    }

    /// Whether students on this track choose spécialités.
    pub fn has_specialites(self) -> bool {
        !matches!(self, BacType::Professionnel)
    }
}

/// Spécialité short codes.
pub const SPECIALITES: [&str; 13] = [
    "HGGSP", "HLP", "LLCE", "LCA", "Maths", "NSI", "PC", "SVT", "SI", "SES", "EPS", "Arts", "BE",
];

/// Most spécialités a student may hold at once.
pub const MAX_SPECIALITES: usize = 3;

/// A post-bac institution and the program the student aims for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TargetSchool {
    pub school: &'static str,
    pub location: &'static str,
    pub program: &'static str,
}

pub const SCHOOLS: [TargetSchool; 7] = [
    TargetSchool {
        school: "EDHEC Business School",
        location: "Roubaix",
        program: "International BBA",
    },
    TargetSchool {
        school: "ESSEC Business School",
        location: "Cergy",
        program: "Global BBA",
    },
    TargetSchool {
        school: "HEC Paris",
        location: "Jouy-en-Josas",
        program: "Grande École",
    },
    TargetSchool {
        school: "ESCP Business School",
        location: "Paris",
        program: "Bachelor in Management",
    },
    TargetSchool {
        school: "EM Lyon",
        location: "Lyon",
        program: "Global BBA",
    },
    TargetSchool {
        school: "Sciences Po",
        location: "Paris",
        program: "Bachelor",
    },
    TargetSchool {
        school: "Université Paris-Dauphine",
        location: "Paris",
        program: "Licence Gestion",
    },
];

/// Look up a target school by its display name.
pub fn find_school(name: &str) -> Option<&'static TargetSchool> {
    SCHOOLS.iter().find(|s| s.school == name)
}

/// Prefill suggestion returned by `GET /api/prefill`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrefillPayload {
    pub lycee: String,
    pub classe: Classe,
}

/// File metadata sent to `POST /api/fiche-avenir`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicheAvenir {
    pub name: String,
    pub size: u64,
}

/// Envelope echoed back by the mock upload endpoint.
///
/// The server echoes the request body untouched (`T = serde_json::Value`);
/// the client reads it back as [`FicheAvenir`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt<T = FicheAvenir> {
    pub ok: bool,
    pub received: T,
}

impl<T> UploadReceipt<T> {
    pub fn accepted(received: T) -> Self {
        Self { ok: true, received }
    }
}
