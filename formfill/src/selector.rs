/// Parsed form of the selector strings understood by the bundled drivers.
///
/// The replication core never looks inside a selector; only platform drivers
/// parse them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Select by role and optional name
    Role { role: String, name: Option<String> },
    /// Select by name/label
    Name(String),
    /// Select by native automation id (`AutomationId` on Windows)
    NativeId(String),
    /// Represents an invalid selector string, with a reason.
    Invalid(String),
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        let s = s.trim();

        // role:Edit|name:Email is the precise form
        if let Some((role_part, name_part)) = s.split_once('|') {
            let role = role_part.trim();
            let name = name_part.trim();
            let role = role.strip_prefix("role:").unwrap_or(role).to_string();
            let name = name.strip_prefix("name:").unwrap_or(name).to_string();
            if role.is_empty() {
                return Selector::Invalid(format!("Missing role in selector: \"{s}\""));
            }
            return Selector::Role {
                role,
                name: if name.is_empty() { None } else { Some(name) },
            };
        }

        match s {
            "" => Selector::Invalid("Empty selector".to_string()),
            _ if s.starts_with("role:") => Selector::Role {
                role: s[5..].to_string(),
                name: None,
            },
            _ if s.starts_with("Name:") || s.starts_with("name:") => {
                Selector::Name(s[5..].to_string())
            }
            _ if s.to_lowercase().starts_with("nativeid:") => {
                Selector::NativeId(s["nativeid:".len()..].trim().to_string())
            }
            _ if s.starts_with('#') => Selector::NativeId(s[1..].to_string()),
            _ => Selector::Invalid(format!(
                "Unknown selector format: \"{s}\". Use 'role:X|name:Y', 'role:X', 'name:Y', 'nativeid:Z' or '#Z'."
            )),
        }
    }
}
