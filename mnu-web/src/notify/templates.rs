//! Notification message layouts

use mnu_common::config::NOTIFICATION_ADDRESS;
use mnu_common::schema::ContactForm;
use mnu_common::AffiliationRecord;

use super::EmailMessage;

pub const AFFILIATION_SUBJECT: &str = "New MNU Affiliation Request";
pub const CONTACT_SUBJECT: &str = "New Contact Message from MNU Website";

/// Email announcing a stored affiliation, every field in a fixed order
pub fn affiliation_notification(record: &AffiliationRecord) -> EmailMessage {
    let age = record.age.to_string();
    let rows = [
        ("Name", record.name.as_str()),
        ("Surname", record.surname.as_str()),
        ("Age", age.as_str()),
        ("Gender", record.gender.as_str()),
        ("Sector", record.sector.as_str()),
        ("Disability", or_none(&record.disability)),
        ("Nationality", record.nationality.as_str()),
        ("Province", record.province.as_str()),
        ("Municipality", record.municipality.as_str()),
        ("Ward", record.ward.as_str()),
        ("Qualifications", or_none(&record.qualifications)),
    ];
    message(AFFILIATION_SUBJECT, "New Affiliation Request", &rows)
}

/// Email forwarding a contact form message
pub fn contact_notification(form: &ContactForm) -> EmailMessage {
    let rows = [
        ("Name", form.name.as_str()),
        ("Email", form.email.as_str()),
        ("Message", form.message.as_str()),
    ];
    message(CONTACT_SUBJECT, "New Contact Message", &rows)
}

fn or_none(value: &str) -> &str {
    if value.is_empty() || value == mnu_common::models::DISABILITY_NONE {
        "None"
    } else {
        value
    }
}

fn message(subject: &str, heading: &str, rows: &[(&str, &str)]) -> EmailMessage {
    let mut html = format!("<h2>{}</h2>\n", heading);
    let mut text = format!("{}\n\n", heading);

    for (label, value) in rows {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>\n",
            label,
            escape_html(value)
        ));
        text.push_str(&format!("{}: {}\n", label, value));
    }

    EmailMessage {
        to: NOTIFICATION_ADDRESS.to_string(),
        subject: subject.to_string(),
        html,
        text: Some(text),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
