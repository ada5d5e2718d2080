use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use validator::ValidationError;

static USERNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid")
});

pub const RESERVED_USERNAMES: [&str; 1] = ["me"];

/// Letters, digits and `.@+-_` only; reserved names are refused whatever
/// their case.
pub fn username(value: &str) -> Result<(), ValidationError> {
    if RESERVED_USERNAMES
        .iter()
        .any(|reserved| value.eq_ignore_ascii_case(reserved))
    {
        return Err(ValidationError::new("reserved")
            .with_message(Cow::Owned(format!("Username \"{value}\" is not allowed."))));
    }

    if !USERNAME.is_match(value) {
        return Err(ValidationError::new("invalid").with_message(Cow::Borrowed(
            "Username may contain only letters, digits and @/./+/-/_ characters.",
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::username;

    #[test]
    fn accepts_regular_names() {
        for name in ["john_doe", "a.b@c+d-e", "пользователь", "x1"] {
            assert!(username(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_me_in_any_case() {
        for name in ["me", "Me", "ME", "mE"] {
            let err = username(name).unwrap_err();
            assert_eq!(err.code, "reserved");
        }
    }

    #[test]
    fn rejects_forbidden_characters() {
        for name in ["john doe", "john!", "", "a/b"] {
            assert!(username(name).is_err(), "{name:?}");
        }
    }
}
