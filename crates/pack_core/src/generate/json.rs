//! Defensive JSON extraction from free-text model output.
//!
//! Generation backends are instructed to return bare JSON but often wrap it
//! in Markdown fences or prefix it with prose anyway. Extraction has a single
//! failure mode: no balanced object found.

/// Strip a surrounding Markdown code fence, if present.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) up to the first newline.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    let rest = rest.trim_end();
    match rest.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => rest,
    }
}

/// Locate the first balanced top-level `{...}` object.
///
/// Brace counting is string- and escape-aware so braces inside JSON string
/// values do not unbalance the scan.
fn first_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract the JSON object payload from raw model output.
pub fn extract_json(raw: &str) -> Option<&str> {
    first_object(strip_fences(raw))
}
