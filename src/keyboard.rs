//! Keyboard activation for filter controls.

/// Keys that activate a focused filter control
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}
