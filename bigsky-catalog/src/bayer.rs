//! Bayer designation decoding.
//!
//! Cross-identification tables abbreviate the Greek letter to three
//! characters (`alf`, `bet`, ... `ome`; short names are padded with a dot:
//! `mu.`, `nu.`, `xi.`, `pi.`) and may append a two-digit ordinal for
//! multiple stars sharing a letter. The ordinal is rendered as superscript.

fn greek_letter(code: &str) -> Option<char> {
    let letter = match code {
        "alf" => 'α',
        "bet" => 'β',
        "gam" => 'γ',
        "del" => 'δ',
        "eps" => 'ε',
        "zet" => 'ζ',
        "eta" => 'η',
        "tet" => 'θ',
        "iot" => 'ι',
        "kap" => 'κ',
        "lam" => 'λ',
        "mu." => 'μ',
        "nu." => 'ν',
        "ksi" | "xi." => 'ξ',
        "omi" => 'ο',
        "pi." => 'π',
        "rho" => 'ρ',
        "sig" => 'σ',
        "tau" => 'τ',
        "ups" => 'υ',
        "phi" => 'φ',
        "chi" => 'χ',
        "psi" => 'ψ',
        "ome" => 'ω',
        _ => return None,
    };
    Some(letter)
}

fn superscript(digit: char) -> Option<char> {
    const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    digit.to_digit(10).map(|d| SUPERSCRIPTS[d as usize])
}

/// `"omi02"` → `"ο²"`, `"pi."` → `"π"`. Unknown letters give `None`.
pub fn decode_bayer(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let code = raw.get(..3)?.to_ascii_lowercase();
    let mut decoded = greek_letter(&code)?.to_string();

    let ordinal = raw[3..].trim().trim_start_matches('0');
    for digit in ordinal.chars() {
        decoded.push(superscript(digit)?);
    }
    Some(decoded)
}
