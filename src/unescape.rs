/// Doubled forward slashes stand in for backslashes in transported payloads.
const TRANSPORT_BACKSLASH: &str = "//";

fn control_char(escaped: char) -> Option<char> {
    match escaped {
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{b}'),
        '\\' => Some('\\'),
        _ => None,
    }
}

/// Decode escape sequences in a variable value.
///
/// Every `//` is first turned into a backslash, then each `\x` pair is
/// replaced by the control character it names. Unknown escapes yield the
/// escaped character itself and a trailing lone backslash is dropped.
pub fn unescape(raw: &str) -> String {
    let raw = raw.replace(TRANSPORT_BACKSLASH, "\\");
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        if let Some(next) = chars.next() {
            out.push(control_char(next).unwrap_or(next));
        }
    }

    out
}
