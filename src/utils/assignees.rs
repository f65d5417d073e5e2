//! Assignee parsing for the create-task dialog.

use crate::board::DEFAULT_ASSIGNEE;

const MAX_VISIBLE: usize = 3;
const VISIBLE_WITH_OVERFLOW: usize = 2;

/// Turn a comma-separated list of names into display initials.
///
/// Each name becomes the uppercased first letters of its first two words.
/// Up to three names are shown as-is; longer lists keep the first two and
/// add a `+N` marker for the rest. An empty list yields the default
/// assignee.
///
/// ```
/// use workspace_board::utils::assignees::normalize_assignees;
/// assert_eq!(
///     normalize_assignees("Alex Li, Morgan Bates, Dana Lee, Jordan Kim"),
///     vec!["AL", "MB", "+2"]
/// );
/// ```
pub fn normalize_assignees(raw: &str) -> Vec<String> {
    let tokens: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.split_whitespace()
                .filter_map(|word| word.chars().next())
                .take(2)
                .collect::<String>()
                .to_uppercase()
        })
        .filter(|initials| !initials.is_empty())
        .collect();

    if tokens.is_empty() {
        return vec![DEFAULT_ASSIGNEE.to_owned()];
    }
    if tokens.len() <= MAX_VISIBLE {
        return tokens;
    }
    let overflow = tokens.len() - VISIBLE_WITH_OVERFLOW;
    let mut visible: Vec<String> = tokens.into_iter().take(VISIBLE_WITH_OVERFLOW).collect();
    visible.push(format!("+{}", overflow));
    visible
}
