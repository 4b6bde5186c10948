// ABOUTME: Action-item extraction from response text.
// ABOUTME: Deterministic line-oriented scan; malformed lines are skipped.

use super::ActionItem;

/// Extract action items from response text.
///
/// A trimmed line starting with `- [` or `* [` contributes one item
/// whose description is the text after the first `]`, trimmed, provided
/// that text is non-empty and does not itself start with `[`. All other
/// lines are ignored. Never fails.
pub fn extract_action_items(content: &str) -> Vec<ActionItem> {
    let mut items = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if !line.starts_with("- [") && !line.starts_with("* [") {
            continue;
        }
        let Some((_, rest)) = line.split_once(']') else {
            continue;
        };
        let description = rest.trim();
        if description.is_empty() || description.starts_with('[') {
            continue;
        }
        items.push(ActionItem::new(description));
    }

    items
}
