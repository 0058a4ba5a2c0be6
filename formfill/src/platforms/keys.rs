//! Translation of `{Modifier+Key}` chords into UI Automation `send_keys` input.
//!
//! `send_keys` only accepts one key name per brace group and expects held
//! modifiers to precede the key as their own groups: `{Control+a}` has to be
//! sent as `{ctrl}a`, `{Alt+F4}` as `{alt}{F4}`. Groups without `+` and plain
//! text are passed through untouched.

fn modifier_key(name: &str) -> Option<&'static str> {
    match name.trim().to_lowercase().as_str() {
        "control" | "ctrl" => Some("ctrl"),
        "alt" | "menu" => Some("alt"),
        "shift" => Some("shift"),
        "win" | "windows" | "meta" | "super" => Some("win"),
        _ => None,
    }
}

/// A single printable key is typed as itself, anything longer is a named key
fn key_input(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if matches!(c, '{' | '}' | '(' | ')') => format!("{{{c}}}"),
        (Some(c), None) => c.to_string(),
        _ => format!("{{{key}}}"),
    }
}

fn translate_group(group: &str) -> Option<String> {
    // `{+}` is a literal plus, not a chord
    let (modifiers, key) = group.rsplit_once('+').filter(|(m, _)| !m.is_empty())?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let mut out = String::new();
    for name in modifiers.split('+') {
        out.push('{');
        out.push_str(modifier_key(name)?);
        out.push('}');
    }
    out.push_str(&key_input(key));
    Some(out)
}

/// Rewrite every `{A+B+key}` chord in `keys`; unknown modifiers are left as written
pub(crate) fn to_send_keys(keys: &str) -> String {
    let mut out = String::with_capacity(keys.len());
    let mut rest = keys;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let group = &after[..close];
        match translate_group(group) {
            Some(translated) => out.push_str(&translated),
            None => {
                out.push('{');
                out.push_str(group);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
