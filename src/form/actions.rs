//! Semantic action IDs for form click targets.
//!
//! Registered during render, dispatched back through `InputEvent::Click`.

// ── Field rows (base + index into FIELDS) ──────────────────────────
pub const SELECT_FIELD_BASE: u16 = 0;

// ── Value arrows for single-choice fields ──────────────────────────
pub const PREV_VALUE: u16 = 20;
pub const NEXT_VALUE: u16 = 21;
pub const OPEN_PICKER: u16 = 22;

// ── Picker entries (base + index into SPECIALITES / SCHOOLS) ───────
pub const TOGGLE_SPECIALITE_BASE: u16 = 100;
pub const TOGGLE_TARGET_BASE: u16 = 200;

// ── Form commands ──────────────────────────────────────────────────
pub const PREFILL: u16 = 300;
pub const UPLOAD_FICHE: u16 = 301;
pub const SUBMIT: u16 = 302;
pub const RESET: u16 = 303;
pub const BACK: u16 = 304;
pub const SHOW_SUMMARY: u16 = 305;
