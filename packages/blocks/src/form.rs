//! Field builders for property-editing forms.
//!
//! Every input carries `data-prop` (the property key) and `data-type` (the
//! value type from [`PropKind`]) so the host can route edits back without
//! knowing anything about the block itself.

use crate::escape::escape_html;
use crate::value::PropKind;

fn field(label: &str, key: &str, control: String) -> String {
    format!(
        "<div class=\"pb-field\"><label for=\"pb-prop-{key}\">{label}</label>{control}</div>",
        key = escape_html(key),
        label = escape_html(label),
    )
}

fn binding(key: &str, kind: PropKind) -> String {
    let key = escape_html(key);
    format!(
        "id=\"pb-prop-{key}\" data-prop=\"{key}\" data-type=\"{}\"",
        kind.as_str()
    )
}

pub fn text_input(label: &str, key: &str, value: &str, placeholder: &str) -> String {
    field(
        label,
        key,
        format!(
            "<input type=\"text\" {} value=\"{}\" placeholder=\"{}\">",
            binding(key, PropKind::String),
            escape_html(value),
            escape_html(placeholder)
        ),
    )
}

pub fn text_area(label: &str, key: &str, value: &str, rows: u32) -> String {
    field(
        label,
        key,
        format!(
            "<textarea {} rows=\"{rows}\">{}</textarea>",
            binding(key, PropKind::String),
            escape_html(value)
        ),
    )
}

pub fn number_input(label: &str, key: &str, value: Option<i64>, min: i64) -> String {
    let value = value.map(|v| v.to_string()).unwrap_or_default();
    field(
        label,
        key,
        format!(
            "<input type=\"number\" {} value=\"{value}\" min=\"{min}\">",
            binding(key, PropKind::Int)
        ),
    )
}

/// Select box over integer options; `(value, caption)` pairs
pub fn int_select(label: &str, key: &str, selected: i64, options: &[(i64, &str)]) -> String {
    let options: String = options
        .iter()
        .map(|(value, caption)| {
            let marker = if *value == selected { " selected" } else { "" };
            format!(
                "<option value=\"{value}\"{marker}>{}</option>",
                escape_html(caption)
            )
        })
        .collect();

    field(
        label,
        key,
        format!("<select {}>{options}</select>", binding(key, PropKind::Int)),
    )
}

pub fn checkbox(label: &str, key: &str, checked: bool) -> String {
    let marker = if checked { " checked" } else { "" };
    field(
        label,
        key,
        format!(
            "<input type=\"checkbox\" {}{marker}>",
            binding(key, PropKind::Boolean)
        ),
    )
}
