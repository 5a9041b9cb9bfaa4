pub mod booking;
pub mod confirmation;
pub mod detail;
pub mod home;
pub mod not_found;

/// Decoded query pairs from the current location, empty when unavailable.
#[yew::hook]
pub fn use_query_pairs() -> Vec<(String, String)> {
    yew_router::hooks::use_location()
        .and_then(|location| location.query::<Vec<(String, String)>>().ok())
        .unwrap_or_default()
}

/// RNG seed for a visit that did not pin one with `seed=`.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn fallback_seed() -> u64 {
    crate::dom::clock_seed()
}

/// RNG seed for a visit that did not pin one with `seed=`.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn fallback_seed() -> u64 {
    rand::random()
}

/// First value of `key` in already-decoded query pairs.
#[must_use]
pub fn query_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
