/// Formats a layout value as CSS pixels, without a `-0px`.
pub fn px(value: f64) -> String {
    if value == 0.0 {
        return "0px".to_string();
    }
    format!("{}px", value)
}

/// Prefixes every line of a rendered fragment for a `datastar-merge-fragments` event.
pub fn create_fragments_event(rendered_template: &str) -> String {
    rendered_template
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("fragments {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
