//! Encoding helpers for values spliced into the HTML templates.

use crate::error::Result;

/// Encode a value as a JavaScript string literal, quotes included.
///
/// `</` is written as `<\/` so the literal can never close the enclosing
/// `<script>` element. Both forms evaluate to the same string in JS.
pub fn js_string(value: &str) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/"))
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Replace every placeholder in `template` in a single left-to-right pass.
///
/// Substituted text is never rescanned, so values that happen to contain a
/// placeholder name come through untouched.
pub fn fill_placeholders(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = substitutions
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .filter_map(|&(key, value)| rest.find(key).map(|pos| (pos, key, value)))
            .min_by_key(|&(pos, _, _)| pos);

        match next {
            Some((pos, key, value)) => {
                out.push_str(&rest[..pos]);
                out.push_str(value);
                rest = &rest[pos + key.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
