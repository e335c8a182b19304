//! Field-level predicates shared by the step rules, the eager per-keystroke
//! error display, and the pre-submit batch gate. No state, no side effects.

/// Length of the national identifier numbers (KK and NIK).
pub const NATIONAL_ID_LENGTH: usize = 16;

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Presence check. `None` means valid.
pub fn required(value: &str, label: &str) -> Option<String> {
    if is_blank(value) {
        Some(format!("{label} wajib diisi"))
    } else {
        None
    }
}

/// Fixed-length numeric identifier check. Blank values pass; presence is the
/// `required` check's concern.
pub fn fixed_length_id(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.len() != NATIONAL_ID_LENGTH || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        Some(format!("Nomor identitas harus {NATIONAL_ID_LENGTH} digit angka"))
    } else {
        None
    }
}

/// Branch-required date presence check. Calendar correctness is deliberately
/// not validated here; the submission pipeline passes unparseable dates
/// through untouched and the server remains the authority.
pub fn date_provided(value: &str, label: &str) -> Option<String> {
    required(value, label)
}

/// Convenience used by the step predicates: presence plus the 16-digit rule.
pub fn valid_identifier(value: &str) -> bool {
    !is_blank(value) && fixed_length_id(value).is_none()
}
