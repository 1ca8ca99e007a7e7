/// First row to draw so that `selected_index` stays visible.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    let last_start = total_rows - max_visible_rows;
    if selected_index >= max_visible_rows {
        let offset = selected_index.saturating_sub(max_visible_rows) + 1;
        return if offset > last_start { last_start } else { offset };
    }

    0
}

/// Clamp a free-running scroll position so the last page stays full.
pub const fn clamp_offset(total_rows: usize, max_visible_rows: usize, offset: usize) -> usize {
    let last_start = total_rows.saturating_sub(max_visible_rows);
    if offset > last_start {
        last_start
    } else {
        offset
    }
}
