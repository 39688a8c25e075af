use once_cell::sync::Lazy;
use regex::Regex;

/// The HTML "valid e-mail address" production, as browsers apply it to
/// `<input type="email">`.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const REQUIRED_MESSAGE: &str = "Please fill out this field.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    /// Textareas and every input that isn't `type="email"`.
    TextLike,
    Select,
}

impl FieldKind {
    /// Classifies a control from its tag name and `type` attribute.
    pub fn classify(tag_name: &str, input_type: Option<&str>) -> Self {
        if tag_name.eq_ignore_ascii_case("select") {
            FieldKind::Select
        } else if tag_name.eq_ignore_ascii_case("input")
            && input_type.is_some_and(|t| t.eq_ignore_ascii_case("email"))
        {
            FieldKind::Email
        } else {
            FieldKind::TextLike
        }
    }

    pub fn accepts(self, value: &str) -> bool {
        match self {
            FieldKind::Email => {
                let trimmed = value.trim();
                !trimmed.is_empty() && trimmed.contains('@') && EMAIL_PATTERN.is_match(trimmed)
            }
            FieldKind::TextLike => !value.trim().is_empty(),
            FieldKind::Select => !value.is_empty(),
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            FieldKind::Email => EMAIL_MESSAGE,
            _ => REQUIRED_MESSAGE,
        }
    }
}

/// A required control tracked by the contact form. The value itself always
/// lives in the page and is read through the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub kind: FieldKind,
}

impl FormField {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self { id: id.into(), kind }
    }

    pub fn error_slot_id(&self) -> String {
        format!("{}-error", self.id)
    }
}
