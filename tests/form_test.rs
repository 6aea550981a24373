// Behavioral tests for the form engine: required fields, save-and-exit,
// conditional validation, sanitization and projection.

use market_access::form::{
    Condition, Field, FieldError, FieldValue, Form, FormRequest, SelectOption, SubmittedBody,
};

fn post(pairs: &[(&str, &str)]) -> FormRequest {
    let mut body = SubmittedBody::new();
    for (name, value) in pairs {
        body.insert_text(*name, *value);
    }
    FormRequest::post(body, "test-token")
}

#[tokio::test]
async fn test_required_field_rejects_whitespace_only_value() {
    let fields = vec![Field::plain("test").required("Enter a value")];
    let mut form = Form::new(&post(&[("test", "   ")]), fields);

    form.validate();

    assert!(form.has_errors());
    assert_eq!(form.errors().len(), 1);
    assert_eq!(
        form.errors()[0],
        FieldError {
            id: "test".to_string(),
            message: "Enter a value".to_string()
        }
    );
}

#[tokio::test]
async fn test_exit_submission_bypasses_required_checks() {
    let fields = vec![Field::plain("test").required("Enter a value")];
    let mut form = Form::new(&post(&[("action", "exit")]), fields);

    form.validate();

    assert!(!form.has_errors());
    assert_eq!(form.errors().len(), 0);
}

#[tokio::test]
async fn test_conditional_field_validated_when_condition_met() {
    let fields = vec![
        Field::plain("testName"),
        Field::plain("another")
            .required("Enter another")
            .condition(Condition::equals("testName", "fred")),
    ];
    let mut form = Form::new(&post(&[("testName", "fred"), ("another", "")]), fields);

    form.validate();

    assert!(form.has_errors());
}

#[tokio::test]
async fn test_conditional_field_skipped_when_condition_unmet() {
    let fields = vec![
        Field::plain("testName"),
        Field::plain("another")
            .required("Enter another")
            .condition(Condition::equals("testName", "fred")),
    ];
    let mut form = Form::new(&post(&[("testName", ""), ("another", "")]), fields);

    form.validate();

    assert!(!form.has_errors());
}

#[tokio::test]
async fn test_values_round_trip_sanitization() {
    let fields = vec![Field::plain("sanitize").sanitize(|v| v.replace(',', ""))];
    let form = Form::new(&post(&[("sanitize", "1,000,000")]), fields);

    assert_eq!(
        form.values().get("sanitize"),
        Some(&FieldValue::text("1000000"))
    );
}

#[tokio::test]
async fn test_template_values_idempotent_without_validate() {
    let fields = vec![
        Field::plain("title"),
        Field::select(
            "country",
            vec![SelectOption::new("FR", "France"), SelectOption::new("DE", "Germany")],
        ),
    ];
    let form = Form::new(&post(&[("title", "t"), ("country", "DE")]), fields);

    assert_eq!(form.template_values(), form.template_values());
}

#[tokio::test]
async fn test_radio_projection_checks_resolved_value() {
    let fields = vec![Field::radio(
        "radio",
        vec![
            SelectOption::new("1", "text 1"),
            SelectOption::new("2", "text 2"),
        ],
    )];
    let form = Form::new(&post(&[("radio", "2")]), fields);

    let values = form.template_values();
    let options = values.get("radio").unwrap().as_radio();

    assert_eq!(options.len(), 2);
    assert_eq!((options[0].value.as_str(), options[0].checked), ("1", false));
    assert_eq!((options[1].value.as_str(), options[1].checked), ("2", true));
}

#[tokio::test]
async fn test_add_errors_uses_error_field_alias_and_anchor_id() {
    let fields = vec![Field::checkboxes("myCheckbox", vec!["item1".into()]).error_field("a")];
    let mut form = Form::new(&post(&[]), fields);

    form.validate();
    assert!(!form.has_errors());

    form.add_errors([("a", "Error message a")]);

    assert!(form.has_errors());
    assert_eq!(
        form.errors(),
        &[FieldError {
            id: "my-checkbox-1".to_string(),
            message: "Error message a".to_string()
        }]
    );
}

#[tokio::test]
async fn test_checkbox_extraction_assembles_sub_items() {
    let fields = vec![Field::checkboxes(
        "myCheckbox",
        vec!["item1".into(), "item2".into()],
    )];
    let form = Form::new(&post(&[("item1", "v1"), ("item2", "v2")]), fields);

    let expected = FieldValue::group([("item1", "v1"), ("item2", "v2")]);
    assert_eq!(form.values().get("myCheckbox"), Some(&expected));
}

#[tokio::test]
async fn test_validate_twice_does_not_duplicate_errors() {
    let fields = vec![Field::plain("test").required("Enter a value")];
    let mut form = Form::new(&post(&[("test", "")]), fields);

    form.validate();
    form.validate();

    assert_eq!(form.errors().len(), 1);
}

#[tokio::test]
async fn test_exit_submission_still_resolves_values() {
    let fields = vec![
        Field::plain("title").required("Enter a title"),
        Field::plain("summary"),
    ];
    let mut form = Form::new(
        &post(&[("title", "partial"), ("action", "exit")]),
        fields,
    );

    form.validate();

    assert!(!form.has_errors());
    assert_eq!(form.values().get("title"), Some(&FieldValue::text("partial")));
}

#[tokio::test]
async fn test_template_errors_preserve_validation_order() {
    let fields = vec![
        Field::plain("title").required("Enter a title"),
        Field::select("country", vec![SelectOption::new("FR", "France")])
            .required("Select a country"),
    ];
    let mut form = Form::new(&post(&[("title", ""), ("country", "")]), fields);

    form.validate();
    let errors = form.template_errors();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].href, "#title");
    assert_eq!(errors[0].text, "Enter a title");
    assert_eq!(errors[1].href, "#country");
}
