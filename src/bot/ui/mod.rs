//! Message building blocks shared by the interaction handlers.

pub mod custom_id;
pub mod embed;
pub mod select;

const ELLIPSIS: &str = "...";

/// Number of characters of a table's infos quoted in confirmations.
const PREVIEW_LEN: usize = 50;

/// Shortens `value` to at most `max` characters, ending in `...` when cut.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    if max <= ELLIPSIS.len() {
        return value.chars().take(max).collect();
    }

    let mut out: String = value.chars().take(max - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Short quote of a table's infos used to name it in replies and DMs.
pub fn info_preview(info: &str) -> String {
    let mut preview: String = info.chars().take(PREVIEW_LEN).collect();
    preview.push_str(ELLIPSIS);
    preview
}
