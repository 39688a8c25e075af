use super::payload::FormPayload;

const MISSING: &str = "N/A";

/// Body lines of the handoff e-mail, as (entry name, label).
const BODY_LINES: [(&str, &str); 7] = [
    ("name", "Name"),
    ("email", "Email"),
    ("company", "Company"),
    ("website", "Website"),
    ("budget", "Budget Range"),
    ("timeline", "Timeline"),
    ("project", "Project Description"),
];

pub fn mail_body(payload: &FormPayload) -> String {
    let mut body = String::from("New Project Inquiry\n\n");
    for (name, label) in BODY_LINES {
        let value = payload.filled(name).unwrap_or(MISSING);
        body.push_str(&format!("{label}: {value}\n"));
    }
    body
}

/// `mailto:` URI handing the inquiry to the visitor's own mail client.
pub fn mailto_url(recipient: &str, payload: &FormPayload) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&payload.inquiry_subject()),
        urlencoding::encode(&mail_body(payload)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormPayload {
        [
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("company", ""),
            ("budget", "10k-25k"),
            ("project", "Difference engine & docs"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn body_lists_every_line_with_defaults() {
        assert_eq!(
            mail_body(&sample()),
            "New Project Inquiry\n\n\
             Name: Ada Lovelace\n\
             Email: ada@example.com\n\
             Company: N/A\n\
             Website: N/A\n\
             Budget Range: 10k-25k\n\
             Timeline: N/A\n\
             Project Description: Difference engine & docs\n"
        );
    }

    #[test]
    fn url_percent_encodes_subject_and_body() {
        let url = mailto_url("hello@wombatlabs.ai", &sample());

        assert!(url.starts_with(
            "mailto:hello@wombatlabs.ai?subject=New%20Project%20Inquiry%20from%20Ada%20Lovelace&body="
        ));
        assert!(url.contains("New%20Project%20Inquiry%0A%0AName%3A%20Ada%20Lovelace%0A"));
        assert!(url.contains("Difference%20engine%20%26%20docs"));
        assert_eq!(url.matches('&').count(), 1);
    }
}
