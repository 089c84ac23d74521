use careers_backend::entities::application::{
    normalize_phone, position_label, CareerApplication, CareerApplicationForm, CvAttachment,
};
use validator::Validate;

fn valid_form() -> CareerApplicationForm {
    CareerApplicationForm {
        name: "Ahmet".to_string(),
        surname: "Yılmaz".to_string(),
        email: "ahmet@example.com".to_string(),
        phone: "0532 123 45 67".to_string(),
        position: "mimar".to_string(),
        message: "Mimarlık ofisinizde çalışmak istiyorum, deneyim sahibiyim.".to_string(),
        cv: vec!["data:application/pdf;base64,AAAA".to_string()],
        recaptcha_token: Some("token".to_string()),
        system_info: None,
    }
}

#[test]
fn accepts_a_valid_form() {
    assert!(valid_form().validate().is_ok());
}

#[test]
fn message_length_boundaries_are_inclusive() {
    for (len, ok) in [(29, false), (30, true), (1000, true), (1001, false)] {
        let mut form = valid_form();
        form.message = "a".repeat(len);
        let result = form.validate();
        assert_eq!(result.is_ok(), ok, "message of {len} chars");
        if !ok {
            assert!(result.unwrap_err().field_errors().contains_key("message"));
        }
    }
}

#[test]
fn names_allow_turkish_letters_only() {
    let mut form = valid_form();
    form.name = "Gülşah".to_string();
    form.surname = "Öztürk Çelik".to_string();
    assert!(form.validate().is_ok());

    let mut form = valid_form();
    form.name = "Ahmet123".to_string();
    let errors = form.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("name"));

    let mut form = valid_form();
    form.surname = "Y".to_string();
    let errors = form.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("surname"));
}

#[test]
fn rejects_invalid_email() {
    let mut form = valid_form();
    form.email = "not-an-email".to_string();
    let errors = form.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("email"));
}

#[test]
fn phone_requires_at_least_one_digit() {
    let mut form = valid_form();
    form.phone = "abc-def".to_string();
    let errors = form.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("phone"));
}

#[test]
fn phone_normalization_strips_non_digits_and_is_idempotent() {
    let normalized = normalize_phone("0532 123 45 67");
    assert_eq!(normalized, "05321234567");
    assert_eq!(normalize_phone(&normalized), normalized);
    assert_eq!(normalize_phone("+90 (532) 123-45-67"), "905321234567");
}

#[test]
fn position_must_be_present() {
    let mut form = valid_form();
    form.position = String::new();
    let errors = form.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("position"));
}

#[test]
fn cv_list_must_not_be_empty() {
    let mut form = valid_form();
    form.cv = vec![];
    let errors = form.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("cv"));
}

#[test]
fn cv_type_allow_list_is_enforced() {
    let mut form = valid_form();
    form.cv = vec!["data:image/png;base64,AAAA".to_string()];
    let errors = form.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("cv"));

    let mut form = valid_form();
    form.cv = vec![
        "data:application/msword;base64,AAAA".to_string(),
        "data:application/vnd.openxmlformats-officedocument.wordprocessingml.document;base64,AAAA"
            .to_string(),
        "data:text/plain;base64,AAAA".to_string(),
    ];
    assert!(form.validate().is_ok());
}

#[test]
fn cv_type_check_is_case_insensitive() {
    let mut form = valid_form();
    form.cv = vec!["data:APPLICATION/PDF;base64,AAAA".to_string()];
    assert!(form.validate().is_ok());
}

#[test]
fn cv_attachment_decodes_its_payload() {
    let attachment = CvAttachment::parse("data:application/pdf;base64,AAAA").unwrap();
    assert_eq!(attachment.content, vec![0, 0, 0]);
    assert_eq!(attachment.extension, "pdf");
    assert_eq!(attachment.content_type, "application/pdf");
}

#[test]
fn cv_attachment_rejects_plain_strings() {
    assert!(CvAttachment::parse("AAAA").is_err());
    assert!(CvAttachment::parse("data:application/pdf,AAAA").is_err());
}

#[test]
fn validated_application_carries_normalized_phone() {
    let application = CareerApplication::try_from(valid_form()).unwrap();
    assert_eq!(application.phone, "05321234567");
    assert_eq!(application.cv.len(), 1);
    assert_eq!(application.cv[0].extension, "pdf");
}

#[test]
fn position_labels_cover_the_fixed_list() {
    assert_eq!(position_label("mimar"), "Mimar");
    assert_eq!(position_label("ic-mimar"), "İç Mimar");
    assert_eq!(position_label("insaat-muhendisi"), "İnşaat Mühendisi");
    assert_eq!(position_label("diger"), "Diğer");
    // Unknown slugs pass through untouched.
    assert_eq!(position_label("stajyer"), "stajyer");
}
