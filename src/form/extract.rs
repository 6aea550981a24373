// Value extraction: resolve each field's current value from the request

use super::field::{Field, FieldKind};
use super::value::{FieldValue, FormRequest, FormValues, RequestMethod};

/// Resolve the values map for a field list against the incoming request.
///
/// On a POST every field reads from the submitted body; on a GET the first
/// present entry of the field's candidate list wins. Fields with nothing to
/// offer are simply left out of the map. This pass never fails: a missing
/// body key is an absent value, not an error.
pub fn resolve_values(fields: &[Field], request: &FormRequest) -> FormValues {
    let mut values = FormValues::new();
    let is_post = request.method == RequestMethod::Post;

    for field in fields {
        let resolved = if is_post {
            extract_posted(field, request)
        } else {
            field.candidates.iter().find(|v| v.is_present()).cloned()
        };

        if let Some(value) = resolved {
            values.insert(field.name.clone(), value);
        }
    }

    values
}

fn extract_posted(field: &Field, request: &FormRequest) -> Option<FieldValue> {
    match field.kind {
        FieldKind::Plain | FieldKind::Radio | FieldKind::Select => {
            request.body.text(&field.name).map(|raw| {
                let cleaned = match &field.sanitize {
                    Some(sanitizer) => sanitizer(raw),
                    None => raw.to_string(),
                };
                FieldValue::Text(cleaned)
            })
        }
        FieldKind::Checkboxes | FieldKind::Group => {
            // One body key per named sub-item; unlisted body keys are ignored.
            let entries: Vec<(String, String)> = field
                .sub_items
                .iter()
                .filter_map(|item| {
                    request
                        .body
                        .text(item)
                        .map(|raw| (item.clone(), raw.to_string()))
                })
                .collect();
            Some(FieldValue::group(entries))
        }
        FieldKind::File => request
            .body
            .file(&field.name)
            .cloned()
            .map(FieldValue::File),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::value::{SubmittedBody, UploadedFile};

    fn post_request(pairs: &[(&str, &str)]) -> FormRequest {
        let mut body = SubmittedBody::new();
        for (name, value) in pairs {
            body.insert_text(*name, *value);
        }
        FormRequest::post(body, "token")
    }

    #[test]
    fn test_get_takes_first_present_candidate() {
        let fields = vec![Field::plain("title")
            .candidate(FieldValue::text(""))
            .candidate(FieldValue::text("persisted title"))];
        let values = resolve_values(&fields, &FormRequest::get("token"));
        assert_eq!(
            values.get("title"),
            Some(&FieldValue::text("persisted title"))
        );
    }

    #[test]
    fn test_get_without_candidates_resolves_nothing() {
        let fields = vec![Field::plain("title")];
        let values = resolve_values(&fields, &FormRequest::get("token"));
        assert!(values.is_empty());
    }

    #[test]
    fn test_post_ignores_candidates() {
        let fields = vec![Field::plain("title").candidate(FieldValue::text("old"))];
        let values = resolve_values(&fields, &post_request(&[("title", "new")]));
        assert_eq!(values.get("title"), Some(&FieldValue::text("new")));
    }

    #[test]
    fn test_post_sanitizes_plain_values() {
        let fields = vec![Field::plain("amount").sanitize(|v| v.replace(',', ""))];
        let values = resolve_values(&fields, &post_request(&[("amount", "1,000,000")]));
        assert_eq!(values.get("amount"), Some(&FieldValue::text("1000000")));
    }

    #[test]
    fn test_post_assembles_group_sub_items() {
        let fields = vec![Field::checkboxes(
            "myCheckbox",
            vec!["item1".into(), "item2".into()],
        )];
        let values = resolve_values(
            &fields,
            &post_request(&[("item1", "v1"), ("item2", "v2"), ("stray", "x")]),
        );
        assert_eq!(
            values.get("myCheckbox"),
            Some(&FieldValue::group([("item1", "v1"), ("item2", "v2")]))
        );
    }

    #[test]
    fn test_post_group_with_partial_sub_items() {
        let fields = vec![Field::group("date", vec!["month".into(), "year".into()])];
        let values = resolve_values(&fields, &post_request(&[("year", "2024")]));
        assert_eq!(
            values.get("date"),
            Some(&FieldValue::group([("year", "2024")]))
        );
    }

    #[test]
    fn test_post_file_passes_descriptor_through() {
        let mut body = SubmittedBody::new();
        body.insert_file(
            "evidence",
            UploadedFile {
                name: "doc.pdf".to_string(),
                size: 2048,
            },
        );
        let fields = vec![Field::file("evidence")];
        let values = resolve_values(&fields, &FormRequest::post(body, "token"));
        assert_eq!(
            values.get("evidence").and_then(FieldValue::as_file),
            Some(&UploadedFile {
                name: "doc.pdf".to_string(),
                size: 2048
            })
        );
    }
}
