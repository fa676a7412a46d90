//! Form editing rules. Pure: no rendering or IO.

use crate::data::{
    BacType, PrefillPayload, UploadReceipt, BAC_TYPES, CLASSES, LYCEES, MAX_SPECIALITES, SCHOOLS,
    SPECIALITES,
};

use super::state::{Field, FormState, ResultData, Screen, FIELDS};

// ── Cursor ────────────────────────────────────────────────────────────

/// Move the field cursor, wrapping at both ends.
pub fn move_cursor(state: &mut FormState, delta: isize) {
    let len = FIELDS.len() as isize;
    state.cursor = (state.cursor as isize + delta).rem_euclid(len) as usize;
}

pub fn select_field(state: &mut FormState, index: usize) -> bool {
    if index >= FIELDS.len() {
        return false;
    }
    state.cursor = index;
    true
}

// ── Single-choice fields ──────────────────────────────────────────────

/// Next index when cycling through `len` values. An unset value goes to
/// the first entry forwards and the last entry backwards.
fn cycle_index(current: Option<usize>, len: usize, forward: bool) -> usize {
    match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    }
}

/// Cycle the value of the field under the cursor. Returns false when the
/// field is not a single-choice one.
pub fn cycle_value(state: &mut FormState, forward: bool) -> bool {
    match state.field() {
        Field::Lycee => {
            let current = state
                .data
                .lycee
                .as_deref()
                .and_then(|l| LYCEES.iter().position(|&x| x == l));
            let next = cycle_index(current, LYCEES.len(), forward);
            state.data.lycee = Some(LYCEES[next].to_string());
            true
        }
        Field::Classe => {
            let current = state
                .data
                .classe
                .and_then(|c| CLASSES.iter().position(|&x| x == c));
            state.data.classe = Some(CLASSES[cycle_index(current, CLASSES.len(), forward)]);
            true
        }
        Field::Bac => {
            let current = state
                .data
                .bac_type
                .and_then(|b| BAC_TYPES.iter().position(|&x| x == b));
            set_bac_type(state, BAC_TYPES[cycle_index(current, BAC_TYPES.len(), forward)]);
            true
        }
        _ => false,
    }
}

/// Professionnel has no spécialités, so switching to it drops any chosen.
pub fn set_bac_type(state: &mut FormState, bac: BacType) {
    state.data.bac_type = Some(bac);
    if !bac.has_specialites() && !state.data.specialites.is_empty() {
        state.data.specialites.clear();
        state.add_log("Bac Professionnel : spécialités retirées");
    }
}

// ── Multi-choice fields ───────────────────────────────────────────────

/// Whether the spécialité picker may be opened for the current track.
pub fn specialites_allowed(state: &FormState) -> bool {
    state.data.bac_type.is_none_or(BacType::has_specialites)
}

/// Open the picker (or trigger nothing) for the field under the cursor.
pub fn open_picker(state: &mut FormState) -> bool {
    match state.field() {
        Field::Specialites => {
            if !specialites_allowed(state) {
                state.add_log("Pas de spécialités en bac Professionnel");
                return true;
            }
            state.screen = Screen::SpecialitePicker;
            true
        }
        Field::Targets => {
            state.screen = Screen::TargetPicker;
            true
        }
        _ => false,
    }
}

/// Toggle a spécialité by its index in [`SPECIALITES`].
pub fn toggle_specialite(state: &mut FormState, index: usize) -> bool {
    let Some(&code) = SPECIALITES.get(index) else {
        return false;
    };
    if !specialites_allowed(state) {
        return false;
    }

    let chosen = &mut state.data.specialites;
    if let Some(pos) = chosen.iter().position(|s| s == code) {
        chosen.remove(pos);
        return true;
    }
    if chosen.len() >= MAX_SPECIALITES {
        state.add_log(&format!("{MAX_SPECIALITES} spécialités au maximum"));
        return true;
    }
    chosen.push(code.to_string());
    true
}

/// Toggle a target school by its index in [`SCHOOLS`].
pub fn toggle_target(state: &mut FormState, index: usize) -> bool {
    let Some(school) = SCHOOLS.get(index) else {
        return false;
    };
    let targets = &mut state.data.targets;
    match targets.iter().position(|t| t == school.school) {
        Some(pos) => {
            targets.remove(pos);
        }
        None => targets.push(school.school.to_string()),
    }
    true
}

// ── Server round-trips ────────────────────────────────────────────────

pub fn apply_prefill(state: &mut FormState, payload: PrefillPayload) {
    state.add_log(&format!(
        "Pré-rempli : {} ({})",
        payload.lycee,
        payload.classe.label()
    ));
    state.data.lycee = Some(payload.lycee);
    state.data.classe = Some(payload.classe);
}

pub fn apply_upload(state: &mut FormState, receipt: UploadReceipt) {
    if !receipt.ok {
        state.add_important_log("Fiche Avenir refusée par le serveur");
        return;
    }
    state.add_log(&format!(
        "Fiche Avenir reçue : {} ({})",
        receipt.received.name,
        format_size(receipt.received.size)
    ));
    state.data.fiche_avenir = Some(receipt.received);
}

// ── Submit / reset ────────────────────────────────────────────────────

/// Build the result snapshot. Lycée, classe and bac are required; the
/// error lists the missing field labels.
pub fn build_result(state: &FormState) -> Result<ResultData, Vec<&'static str>> {
    let data = &state.data;
    let mut missing = Vec::new();
    if data.lycee.is_none() {
        missing.push(Field::Lycee.label());
    }
    if data.classe.is_none() {
        missing.push(Field::Classe.label());
    }
    if data.bac_type.is_none() {
        missing.push(Field::Bac.label());
    }

    match (&data.lycee, data.classe, data.bac_type) {
        (Some(lycee), Some(classe), Some(bac_type)) => Ok(ResultData {
            lycee: lycee.clone(),
            classe,
            bac_type,
            specialites: data.specialites.clone(),
            targets: data.targets.clone(),
            fiche_avenir: data.fiche_avenir.clone(),
        }),
        _ => Err(missing),
    }
}

/// Submit the form. On success the result is kept and the summary shown.
pub fn submit(state: &mut FormState) -> Option<ResultData> {
    match build_result(state) {
        Ok(result) => {
            state.result = Some(result.clone());
            state.screen = Screen::Summary;
            state.add_important_log("Formulaire envoyé");
            Some(result)
        }
        Err(missing) => {
            state.add_important_log(&format!("Champs manquants : {}", missing.join(", ")));
            None
        }
    }
}

pub fn reset(state: &mut FormState) {
    *state = FormState::new();
    state.add_log("Formulaire réinitialisé");
}

// ── Formatting ────────────────────────────────────────────────────────

pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} o")
    } else if b < KIB * KIB {
        format!("{:.1} Ko", b / KIB)
    } else {
        format!("{:.1} Mo", b / (KIB * KIB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Classe, FicheAvenir};
    use proptest::prelude::*;

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = FormState::new();
        move_cursor(&mut state, -1);
        assert_eq!(state.field(), Field::FicheAvenir);
        move_cursor(&mut state, 1);
        assert_eq!(state.field(), Field::Lycee);
    }

    #[test]
    fn select_field_rejects_out_of_range() {
        let mut state = FormState::new();
        assert!(select_field(&mut state, 2));
        assert_eq!(state.field(), Field::Bac);
        assert!(!select_field(&mut state, FIELDS.len()));
        assert_eq!(state.field(), Field::Bac);
    }

    #[test]
    fn cycle_from_unset() {
        assert_eq!(cycle_index(None, 3, true), 0);
        assert_eq!(cycle_index(None, 3, false), 2);
        assert_eq!(cycle_index(Some(2), 3, true), 0);
        assert_eq!(cycle_index(Some(0), 3, false), 2);
    }

    #[test]
    fn cycle_lycee_walks_the_list() {
        let mut state = FormState::new();
        assert!(cycle_value(&mut state, true));
        assert_eq!(state.data.lycee.as_deref(), Some(LYCEES[0]));
        assert!(cycle_value(&mut state, true));
        assert_eq!(state.data.lycee.as_deref(), Some(LYCEES[1]));
        assert!(cycle_value(&mut state, false));
        assert!(cycle_value(&mut state, false));
        assert_eq!(state.data.lycee.as_deref(), Some(LYCEES[18]));
    }

    #[test]
    fn unknown_lycee_restarts_cycle() {
        let mut state = FormState::new();
        state.data.lycee = Some("Lycée fermé".to_string());
        cycle_value(&mut state, true);
        assert_eq!(state.data.lycee.as_deref(), Some(LYCEES[0]));
    }

    #[test]
    fn cycle_classe_in_order() {
        let mut state = FormState::new();
        state.cursor = 1;
        let mut seen = Vec::new();
        for _ in 0..4 {
            cycle_value(&mut state, true);
            seen.push(state.data.classe.unwrap());
        }
        assert_eq!(
            seen,
            vec![Classe::Seconde, Classe::Premiere, Classe::Terminale, Classe::Seconde]
        );
    }

    #[test]
    fn cycle_on_multi_field_is_refused() {
        let mut state = FormState::new();
        state.cursor = 3;
        assert!(!cycle_value(&mut state, true));
    }

    #[test]
    fn specialites_limited_to_max() {
        let mut state = FormState::new();
        for i in 0..MAX_SPECIALITES {
            assert!(toggle_specialite(&mut state, i));
        }
        // Refused, but the refusal is logged.
        assert!(toggle_specialite(&mut state, MAX_SPECIALITES));
        assert_eq!(state.data.specialites.len(), MAX_SPECIALITES);
        assert_eq!(state.log.last().unwrap().text, "3 spécialités au maximum");

        // Deselecting frees a slot.
        assert!(toggle_specialite(&mut state, 0));
        assert!(toggle_specialite(&mut state, MAX_SPECIALITES));
        assert_eq!(state.data.specialites, vec!["HLP", "LLCE", "LCA"]);
    }

    #[test]
    fn specialite_out_of_range_is_ignored() {
        let mut state = FormState::new();
        assert!(!toggle_specialite(&mut state, SPECIALITES.len()));
        assert!(state.data.specialites.is_empty());
    }

    #[test]
    fn professionnel_clears_specialites() {
        let mut state = FormState::new();
        toggle_specialite(&mut state, 4);
        set_bac_type(&mut state, BacType::Professionnel);
        assert!(state.data.specialites.is_empty());
        assert!(!toggle_specialite(&mut state, 4));

        state.cursor = 3;
        assert!(open_picker(&mut state));
        assert_eq!(state.screen, Screen::Form);
    }

    #[test]
    fn open_picker_for_targets() {
        let mut state = FormState::new();
        state.cursor = 4;
        assert!(open_picker(&mut state));
        assert_eq!(state.screen, Screen::TargetPicker);
    }

    #[test]
    fn toggle_target_adds_and_removes() {
        let mut state = FormState::new();
        assert!(toggle_target(&mut state, 2));
        assert!(toggle_target(&mut state, 0));
        assert_eq!(state.data.targets, vec!["HEC Paris", "EDHEC Business School"]);
        assert!(toggle_target(&mut state, 2));
        assert_eq!(state.data.targets, vec!["EDHEC Business School"]);
        assert!(!toggle_target(&mut state, SCHOOLS.len()));
    }

    #[test]
    fn prefill_sets_lycee_and_classe_only() {
        let mut state = FormState::new();
        state.data.bac_type = Some(BacType::Technologique);
        apply_prefill(
            &mut state,
            PrefillPayload {
                lycee: "Lycée Charlemagne".to_string(),
                classe: Classe::Terminale,
            },
        );
        assert_eq!(state.data.lycee.as_deref(), Some("Lycée Charlemagne"));
        assert_eq!(state.data.classe, Some(Classe::Terminale));
        assert_eq!(state.data.bac_type, Some(BacType::Technologique));
    }

    #[test]
    fn upload_receipt_is_recorded() {
        let mut state = FormState::new();
        let fiche = FicheAvenir {
            name: "bulletin.pdf".to_string(),
            size: 12345,
        };
        apply_upload(&mut state, UploadReceipt::accepted(fiche.clone()));
        assert_eq!(state.data.fiche_avenir, Some(fiche));
    }

    #[test]
    fn refused_upload_is_not_recorded() {
        let mut state = FormState::new();
        let receipt = UploadReceipt {
            ok: false,
            received: FicheAvenir {
                name: "x.pdf".to_string(),
                size: 1,
            },
        };
        apply_upload(&mut state, receipt);
        assert!(state.data.fiche_avenir.is_none());
        assert!(state.log.last().unwrap().is_important);
    }

    #[test]
    fn submit_requires_core_fields() {
        let mut state = FormState::new();
        assert!(submit(&mut state).is_none());
        assert_eq!(state.screen, Screen::Form);
        let last = &state.log.last().unwrap().text;
        assert!(last.contains("Lycée") && last.contains("Classe") && last.contains("Bac"));

        state.data.lycee = Some(LYCEES[3].to_string());
        state.data.classe = Some(Classe::Premiere);
        assert_eq!(build_result(&state).unwrap_err(), vec!["Bac"]);
    }

    #[test]
    fn submit_snapshots_the_form() {
        let mut state = FormState::new();
        state.data.lycee = Some(LYCEES[15].to_string());
        state.data.classe = Some(Classe::Terminale);
        state.data.bac_type = Some(BacType::General);
        toggle_specialite(&mut state, 4);
        toggle_specialite(&mut state, 5);
        toggle_target(&mut state, 5);

        let result = submit(&mut state).unwrap();
        assert_eq!(state.screen, Screen::Summary);
        assert_eq!(state.result.as_ref(), Some(&result));
        assert_eq!(result.lycee, "Lycée Charlemagne");
        assert_eq!(result.specialites, vec!["Maths", "NSI"]);
        assert_eq!(result.targets, vec!["Sciences Po"]);
    }

    #[test]
    fn reset_returns_to_blank_form() {
        let mut state = FormState::new();
        state.data.lycee = Some(LYCEES[0].to_string());
        state.screen = Screen::Summary;
        state.cursor = 4;
        reset(&mut state);
        assert_eq!(state.data.lycee, None);
        assert_eq!(state.screen, Screen::Form);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.log.len(), 1);
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(512), "512 o");
        assert_eq!(format_size(12345), "12.1 Ko");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 Mo");
    }

    proptest! {
        #[test]
        fn prop_specialites_never_exceed_max(
            toggles in prop::collection::vec(0usize..SPECIALITES.len(), 0..40),
        ) {
            let mut state = FormState::new();
            for i in toggles {
                toggle_specialite(&mut state, i);
                prop_assert!(state.data.specialites.len() <= MAX_SPECIALITES);
            }
        }

        #[test]
        fn prop_cursor_stays_in_range(moves in prop::collection::vec(-7isize..7, 0..30)) {
            let mut state = FormState::new();
            for d in moves {
                move_cursor(&mut state, d);
                prop_assert!(state.cursor < FIELDS.len());
            }
        }
    }
}
