//! Order number formats

use rand::Rng;

/// Characters used in ticket codes; ambiguous glyphs are left out
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// `YYYYMMDD` key for today, the issue-date component of order numbers
pub fn today_stamp() -> String {
    shared::util::date_stamp(chrono::Utc::now().date_naive())
}

/// `INV-YYYYMMDD-NNNN`, sequence zero-padded to four digits
pub fn format_invoice_number(day: &str, seq: i64) -> String {
    format!("INV-{day}-{seq:04}")
}

/// `TIX-YYYYMMDD-XXXXXX` with a random six-character suffix
///
/// Collisions are resolved by the caller retrying against the unique index.
pub fn generate_ticket_code(day: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("TIX-{day}-{suffix}")
}
