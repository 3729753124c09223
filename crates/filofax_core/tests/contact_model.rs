use filofax_core::{
    CompanyDetails, Contact, ContactDetails, ContactKind, IndividualDetails, KeyContact,
};
use serde_json::json;

fn company() -> Contact {
    Contact::new(
        "contact-1",
        "Northwind Traders",
        ContactDetails::Company(CompanyDetails {
            phone_number: "020".to_string(),
            industry: "Wholesale".to_string(),
            email_address: "hello@northwind.test".to_string(),
            address: "Dock Street".to_string(),
            website: "northwind.test".to_string(),
            key_contacts: vec![
                KeyContact {
                    name: "Andrew Fuller".to_string(),
                    email_address: "andrew@northwind.test".to_string(),
                },
                KeyContact {
                    name: "Nancy Davolio".to_string(),
                    email_address: "nancy@northwind.test".to_string(),
                },
            ],
        }),
    )
}

#[test]
fn contact_new_derives_thumbnail_and_starts_collapsed() {
    let contact = company();

    assert_eq!(contact.thumbnail, "NT");
    assert!(!contact.is_expanded);
    assert_eq!(contact.kind(), ContactKind::Company);
    assert_eq!(contact.details.subtitle(), "Wholesale");
}

#[test]
fn toggle_is_bidirectional() {
    let mut contact = company();

    contact.toggle();
    assert!(contact.is_expanded);
    contact.toggle();
    assert!(!contact.is_expanded);
}

#[test]
fn company_serializes_flat_with_camel_case_fields() {
    let json = serde_json::to_value(company()).unwrap();

    assert_eq!(json["kind"], "company");
    assert_eq!(json["isExpanded"], false);
    assert_eq!(json["phoneNumber"], "020");
    assert_eq!(json["emailAddress"], "hello@northwind.test");
    assert_eq!(json["keyContacts"][0]["name"], "Andrew Fuller");
    assert_eq!(json["keyContacts"][1]["emailAddress"], "nancy@northwind.test");
    assert!(json.get("details").is_none());
}

#[test]
fn individual_deserializes_without_is_expanded() {
    let value = json!({
        "id": "contact-0",
        "name": "Jane Doe",
        "thumbnail": "JD",
        "kind": "individual",
        "phoneNumber": "555",
        "title": "Eng",
        "emailAddress": "j@x.com",
        "address": "A1",
        "website": "w1"
    });

    let contact: Contact = serde_json::from_value(value).unwrap();
    assert!(!contact.is_expanded);
    assert_eq!(
        contact.details,
        ContactDetails::Individual(IndividualDetails {
            phone_number: "555".to_string(),
            title: "Eng".to_string(),
            email_address: "j@x.com".to_string(),
            address: "A1".to_string(),
            website: "w1".to_string(),
        })
    );
}

#[test]
fn legacy_email_field_does_not_deserialize() {
    let value = json!({
        "id": "contact-0",
        "name": "Jane Doe",
        "thumbnail": "JD",
        "isExpanded": false,
        "kind": "individual",
        "phoneNumber": "555",
        "title": "Eng",
        "email": "j@x.com",
        "address": "A1",
        "website": "w1"
    });

    let err = serde_json::from_value::<Contact>(value).unwrap_err();
    assert!(err.to_string().contains("emailAddress"), "unexpected error: {err}");
}
