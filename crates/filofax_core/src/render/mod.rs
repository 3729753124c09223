//! HTML rendering of the contact directory page.
//!
//! # Responsibility
//! - Turn a contact collection into page markup, one card per contact.
//! - Emit one `data-action="toggle"` control per card for the UI shell.
//!
//! # Invariants
//! - Rendering is a pure function of its input.
//! - Every interpolated value is HTML-escaped.
//! - Key contacts render in stored order.

use crate::model::contact::{CompanyDetails, Contact, ContactDetails, IndividualDetails};
use std::fmt::Write;

const PAGE_TITLE: &str = "ADDRESS BOOK";
const PAGE_INTRO: &str = "You can see all stored contacts in the list seen below. \
Each contact is either an individual or a company account.";
const CARD_ICONS: [&str; 4] = ["receiver", "mail", "commenting", "calendar"];

/// Renders the full page: header plus card container.
pub fn render_app(contacts: &[Contact]) -> String {
    let mut html = String::new();
    html.push_str("<header class=\"page-header\">");
    html.push_str(&render_header());
    html.push_str("</header>\n<main>\n<section class=\"card-container\">\n");
    for contact in contacts {
        html.push_str(&render_contact_card(contact));
    }
    html.push_str("</section>\n</main>\n");
    html
}

/// Renders the static page header.
pub fn render_header() -> String {
    format!("<h1>{PAGE_TITLE}</h1><p>{PAGE_INTRO}</p>")
}

/// Renders one card keyed by `data-id`.
pub fn render_contact_card(contact: &Contact) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<article class=\"card\" data-id=\"{}\">",
        escape_html(&contact.id)
    );
    let _ = writeln!(html, "<div class=\"thumb\">{}</div>", escape_html(&contact.thumbnail));
    let _ = writeln!(html, "<h2 class=\"name\">{}</h2>", escape_html(&contact.name));
    let _ = writeln!(
        html,
        "<div class=\"subtitle\">{}</div>",
        escape_html(contact.details.subtitle())
    );

    html.push_str("<div class=\"icon-container\">");
    for icon in CARD_ICONS {
        let _ = write!(html, "<span uk-icon=\"{icon}\"></span>");
    }
    html.push_str("</div>\n");

    let chevron = if contact.is_expanded {
        "chevron-up"
    } else {
        "chevron-down"
    };
    let _ = writeln!(
        html,
        "<button class=\"chevron\" data-action=\"toggle\" type=\"button\" aria-label=\"Toggle details\" aria-expanded=\"{}\"><span uk-icon=\"{chevron}\"></span></button>",
        contact.is_expanded
    );

    if contact.is_expanded {
        let _ = writeln!(html, "<div class=\"details\">{}</div>", render_details(contact));
    }

    html.push_str("</article>\n");
    html
}

/// Renders the expanded detail block for one contact.
pub fn render_details(contact: &Contact) -> String {
    match &contact.details {
        ContactDetails::Individual(details) => render_individual_details(details),
        ContactDetails::Company(details) => render_company_details(details),
    }
}

fn render_individual_details(details: &IndividualDetails) -> String {
    detail_lines(&[
        details.phone_number.as_str(),
        details.email_address.as_str(),
        details.address.as_str(),
        details.website.as_str(),
    ])
}

fn render_company_details(details: &CompanyDetails) -> String {
    let mut html = detail_lines(&[
        details.phone_number.as_str(),
        details.email_address.as_str(),
        details.address.as_str(),
        details.website.as_str(),
    ]);
    html.push_str("<div class=\"key-contacts\"><h3>Key contacts</h3><ul>");
    for key_contact in &details.key_contacts {
        let _ = write!(
            html,
            "<li><span class=\"kc-name\">{}</span> <span class=\"kc-email\">&lt;{}&gt;</span></li>",
            escape_html(&key_contact.name),
            escape_html(&key_contact.email_address)
        );
    }
    html.push_str("</ul></div>");
    html
}

fn detail_lines(values: &[&str]) -> String {
    values.iter().fold(String::new(), |mut html, value| {
        let _ = write!(html, "<div class=\"detail-line\">{}</div>", escape_html(value));
        html
    })
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
