//! Helpers for building URLs that respect the deployment base path.
///
/// When `PUBLIC_URL` is set at compile time (e.g., `/travel` when served from
/// a subdirectory), generated URLs are prefixed accordingly. Local builds
/// without `PUBLIC_URL` fall back to root-anchored paths.
#[must_use]
pub fn api_path(relative: &str) -> String {
    path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Base path for the router (e.g., `/travel` when hosted under a subdirectory).
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}
