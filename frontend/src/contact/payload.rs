pub const SUBJECT_PREFIX: &str = "New Project Inquiry from ";
const SUBJECT_FALLBACK: &str = "Contact Form";

/// Form entries in submission order. Names may repeat, like browser form data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    entries: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`get`](Self::get), but an empty value counts as absent.
    pub fn filled(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn inquiry_subject(&self) -> String {
        let who = self
            .filled("company")
            .or_else(|| self.filled("name"))
            .unwrap_or(SUBJECT_FALLBACK);
        format!("{SUBJECT_PREFIX}{who}")
    }

    /// Appends the relay routing fields: destination address and subject.
    pub fn with_relay_fields(mut self, recipient: &str) -> Self {
        let subject = self.inquiry_subject();
        self.append("_to", recipient);
        self.append("_subject", subject);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_prefers_company_then_name() {
        let payload: FormPayload = [("name", "Ada"), ("company", "Analytical Engines")]
            .into_iter()
            .collect();
        assert_eq!(payload.inquiry_subject(), "New Project Inquiry from Analytical Engines");

        let payload: FormPayload = [("name", "Ada"), ("company", "")].into_iter().collect();
        assert_eq!(payload.inquiry_subject(), "New Project Inquiry from Ada");

        let payload = FormPayload::new();
        assert_eq!(payload.inquiry_subject(), "New Project Inquiry from Contact Form");
    }

    #[test]
    fn relay_fields_are_appended_after_entries() {
        let payload: FormPayload = [("name", "Ada"), ("email", "ada@example.com")]
            .into_iter()
            .collect();
        let payload = payload.with_relay_fields("hello@wombatlabs.ai");

        let entries: Vec<_> = payload.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("name", "Ada"),
                ("email", "ada@example.com"),
                ("_to", "hello@wombatlabs.ai"),
                ("_subject", "New Project Inquiry from Ada"),
            ]
        );
    }

    #[test]
    fn get_returns_first_of_repeated_names() {
        let payload: FormPayload = [("topic", "a"), ("topic", "b")].into_iter().collect();
        assert_eq!(payload.get("topic"), Some("a"));
        assert_eq!(payload.get("missing"), None);
    }
}
