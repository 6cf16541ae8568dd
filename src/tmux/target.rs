// ABOUTME: Tmux target qualification (window.pane -> session:window.pane)

/// Prefix `reference` with `session:` unless it already names a session.
///
/// A reference containing `:` is taken as already qualified. Without a
/// configured session the reference passes through untouched and tmux
/// resolves it against the current session.
pub fn qualify_target(session: Option<&str>, reference: &str) -> String {
    match session {
        Some(session) if !session.is_empty() && !reference.contains(':') => {
            format!("{session}:{reference}")
        }
        _ => reference.to_string(),
    }
}

/// `window.index` pane reference
pub fn pane(window: &str, index: u32) -> String {
    format!("{window}.{index}")
}
