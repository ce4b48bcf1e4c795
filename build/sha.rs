// Copyright (c) 2026 rezky_nightky

/// First seven characters of a commit id, lowercased; `None` unless they are all hex.
pub fn short_hex(v: &str) -> Option<String> {
    let short: String = v.trim().chars().take(7).collect();
    if !short.is_empty() && short.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(short.to_ascii_lowercase())
    } else {
        None
    }
}
