// ABOUTME: HTML output helpers shared by the merge tag replacers
// ABOUTME: Escaping and newline-to-break conversion for note and user values

/// Escape a value for safe inclusion in HTML output.
pub fn esc_html(value: &str) -> String {
    handlebars::html_escape(value)
}

/// Insert `<br />` before every line break, keeping the break itself.
///
/// `\r\n` and `\n\r` pairs count as a single break.
pub fn nl2br(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                out.push_str("<br />");
                out.push(c);
                let pair = if c == '\r' { '\n' } else { '\r' };
                if chars.peek() == Some(&pair) {
                    out.push(pair);
                    chars.next();
                }
            }
            other => out.push(other),
        }
    }

    out
}
