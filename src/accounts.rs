use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use rand::Rng;
use regex::Regex;

const ACCOUNT_SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ACCOUNT_SUFFIX_LEN: usize = 6;

static IBAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{4,30}$").expect("valid IBAN regex"));

static BIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$").expect("valid BIC regex"));

/// Account number of the form `OK-<year>-<6 uppercase alphanumerics>`.
pub fn generate_account_number() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ACCOUNT_SUFFIX_LEN)
        .map(|_| ACCOUNT_SUFFIX_CHARSET[rng.random_range(0..ACCOUNT_SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("OK-{}-{suffix}", Utc::now().year())
}

/// Strip whitespace and upper-case, then check the basic IBAN shape.
/// Returns the normalized IBAN.
pub fn normalize_iban(iban: &str) -> Result<String, String> {
    let clean: String = iban
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if IBAN_RE.is_match(&clean) {
        Ok(clean)
    } else {
        Err("Invalid IBAN".to_string())
    }
}

pub fn normalize_bic(bic: &str) -> Result<String, String> {
    let clean = bic.trim().to_uppercase();
    if BIC_RE.is_match(&clean) {
        Ok(clean)
    } else {
        Err("Invalid BIC".to_string())
    }
}

/// All but the last four characters replaced with `*`.
pub fn mask_iban(iban: &str) -> String {
    let len = iban.chars().count();
    if len < 4 {
        return iban.to_string();
    }
    let tail: String = iban.chars().skip(len - 4).collect();
    format!("{}{tail}", "*".repeat(len - 4))
}

/// Random initial password for accounts created by an admin.
pub fn generate_initial_password() -> String {
    rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}
