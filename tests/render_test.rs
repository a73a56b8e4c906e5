//! Integration tests for full CV renders.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use lopdf::Document;
use serde_json::{json, Value};

use cvpdf::error::{Error, Result};
use cvpdf::model::{CvDocument, Element, StyleName, Translations};
use cvpdf::render::{self, RenderOptions, Renderer};
use cvpdf::sections::{FormatContext, FormatterRegistry, SectionFormatter};
use cvpdf::PageSize;

fn project_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn bundled() -> (CvDocument, Value, Translations) {
    (
        cvpdf::load_document(project_file("data/cv_data.json")).unwrap(),
        cvpdf::load_json_file(project_file("config/styles.json")).unwrap(),
        cvpdf::load_translations(project_file("config/translations.json")).unwrap(),
    )
}

fn minimal(extra: Value) -> CvDocument {
    let mut value = json!({
        "personal_info": {"name": "Ana Souza", "email": "ana@example.com"},
        "desired_role": {"desired_role_pt": "Engenheira", "desired_role_en": "Engineer"}
    });
    if let (Some(target), Value::Object(extra)) = (value.as_object_mut(), extra) {
        target.extend(extra);
    }
    CvDocument::from_value(value).unwrap()
}

fn info_title(bytes: &[u8]) -> String {
    let pdf = Document::load_mem(bytes).unwrap();
    let id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let title = pdf.get_dictionary(id).unwrap().get(b"Title").unwrap();
    match title.as_str().unwrap() {
        [0xfe, 0xff, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).unwrap()
        }
        ascii => String::from_utf8(ascii.to_vec()).unwrap(),
    }
}

fn page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes).unwrap().get_pages().len()
}

/// Records every formatted item under its section type.
struct RecordingFormatter {
    section_type: &'static str,
    calls: Arc<Mutex<Vec<String>>>,
}

impl SectionFormatter for RecordingFormatter {
    fn section_type(&self) -> &str {
        self.section_type
    }

    fn format_section_item(&self, item: &Value, ctx: &FormatContext<'_>) -> Result<Vec<Element>> {
        self.calls.lock().unwrap().push(self.section_type.to_string());
        Ok(vec![Element::paragraph(ctx.field(item, "name"), StyleName::Body)])
    }
}

fn recording_renderer(types: &[&'static str]) -> (Renderer, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut registry = FormatterRegistry::new();
    for &section_type in types {
        registry.register(Arc::new(RecordingFormatter {
            section_type,
            calls: Arc::clone(&calls),
        }));
    }
    (Renderer::default().with_registry(registry), calls)
}

#[test]
fn test_bundled_cv_renders_in_both_languages() {
    let (doc, styles, translations) = bundled();

    let pt = render::render(&doc, &styles, &translations, "pt").unwrap();
    let en = render::render(&doc, &styles, &translations, "en").unwrap();
    assert!(pt.starts_with(b"%PDF-"));
    assert!(en.starts_with(b"%PDF-"));
    assert_ne!(pt, en);

    let title = info_title(&en);
    assert!(title.starts_with("Mariana"), "{title}");
    assert_ne!(info_title(&pt), title);
}

#[test]
fn test_render_is_idempotent() {
    let (doc, styles, translations) = bundled();
    let first = render::render(&doc, &styles, &translations, "en").unwrap();
    let second = render::render(&doc, &styles, &translations, "en").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stats_match_page_count() {
    let (doc, styles, translations) = bundled();
    let result = render::render_with_stats(&doc, &styles, &translations, "pt").unwrap();

    assert_eq!(page_count(&result.bytes), result.stats.pages);
    assert_eq!(result.stats.sections_rendered, 7);
}

#[test]
fn test_long_cv_spans_several_pages() {
    let experience: Vec<Value> = (0..40)
        .map(|i| {
            json!({
                "position": format!("Engineer {}", i),
                "company": "ACME",
                "start_year": 2000 + i,
                "end_year": 2001 + i,
                "description": ["Built things", "Fixed other things", "Reviewed code"]
            })
        })
        .collect();
    let doc = minimal(json!({"experience": experience}));
    let (_, styles, translations) = bundled();

    let result = render::render_with_stats(&doc, &styles, &translations, "en").unwrap();
    assert!(result.stats.pages > 1);
    assert_eq!(result.stats.items_rendered, 40);
}

#[test]
fn test_disabled_sections_never_formatted() {
    let (renderer, calls) = recording_renderer(&["alpha", "beta", "gamma"]);
    let doc = minimal(json!({
        "sections": [
            {"type": "beta", "order": 2, "items": [{"name": "b1"}]},
            {"type": "alpha", "order": 1, "items": [{"name": "a1"}, {"name": "a2"}]},
            {"type": "gamma", "order": 0, "enabled": false, "items": [{"name": "g1"}]}
        ]
    }));
    let (_, styles, translations) = bundled();

    renderer.render(&doc, &styles, &translations, "en").unwrap();
    assert_eq!(*calls.lock().unwrap(), vec!["alpha", "alpha", "beta"]);
}

#[test]
fn test_equal_order_keeps_input_order() {
    let (renderer, calls) = recording_renderer(&["alpha", "beta"]);
    let doc = minimal(json!({
        "sections": [
            {"type": "beta", "order": 1, "items": [{"name": "b"}]},
            {"type": "alpha", "order": 1, "items": [{"name": "a"}]}
        ]
    }));
    let (_, styles, translations) = bundled();

    renderer.render(&doc, &styles, &translations, "en").unwrap();
    assert_eq!(*calls.lock().unwrap(), vec!["beta", "alpha"]);
}

#[test]
fn test_unknown_section_type_is_skipped() {
    let doc = minimal(json!({
        "sections": [
            {"type": "hobbies", "items": [{"name": "chess"}]},
            {"type": "languages", "items": [{"language": "English"}]}
        ]
    }));
    let (_, styles, translations) = bundled();

    let elements = render::build_elements(&doc, &styles, &translations, "en").unwrap();
    let texts: Vec<String> = elements.iter().map(Element::plain_text).collect();
    assert!(texts.contains(&"Languages".to_string()));
    assert!(!texts.iter().any(|t| t.contains("chess") || t == "hobbies"));
}

#[test]
fn test_missing_desired_role_is_validation_error() {
    let doc = CvDocument::from_value(json!({
        "personal_info": {"name": "Ana", "email": "ana@example.com"}
    }))
    .unwrap();
    let (_, styles, translations) = bundled();

    match render::render(&doc, &styles, &translations, "en") {
        Err(Error::Validation { errors, .. }) => {
            assert_eq!(errors, vec!["Missing top-level field: 'desired_role'"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_missing_body_style_is_config_error() {
    let (doc, mut styles, translations) = bundled();
    styles["paragraph_styles"]
        .as_object_mut()
        .unwrap()
        .remove("BodyStyle");

    let err = render::render(&doc, &styles, &translations, "en").unwrap_err();
    assert!(err.is_config());
    assert!(err
        .to_string()
        .contains("Style configuration missing required paragraph styles: BodyStyle"));
}

#[test]
fn test_malformed_month_is_omitted() {
    let doc = minimal(json!({
        "experience": [{
            "position": "Dev",
            "start_month": 13,
            "start_year": 2020,
            "end_month": "abc",
            "end_year": 2021
        }]
    }));
    let (_, styles, translations) = bundled();

    let elements = render::build_elements(&doc, &styles, &translations, "en").unwrap();
    let date = elements
        .iter()
        .find(|e| e.style() == Some(StyleName::Date))
        .unwrap();
    assert_eq!(date.plain_text(), "2020 - 2021");
}

#[test]
fn test_open_ended_period_uses_present_label() {
    let doc = minimal(json!({
        "experience": [{"position": "Dev", "start_month": 3, "start_year": 2021}]
    }));
    let (_, styles, translations) = bundled();

    for (language, expected) in [("pt", "Mar 2021 - Atual"), ("en", "Mar 2021 - Present")] {
        let elements = render::build_elements(&doc, &styles, &translations, language).unwrap();
        let date = elements
            .iter()
            .find(|e| e.style() == Some(StyleName::Date))
            .unwrap();
        assert_eq!(date.plain_text(), expected);
    }
}

#[test]
fn test_long_link_and_non_latin_names_render() {
    let url = format!("https://www.linkedin.com/in/{}", "ana-souza-".repeat(20));
    let doc = minimal(json!({
        "personal_info": {
            "name": "Łucja Ελένη 日本",
            "email": "ana@example.com",
            "location": "Łódź",
            "social": [{"label": "", "url": url}]
        }
    }));
    let (_, styles, translations) = bundled();

    let result = render::render_with_stats(&doc, &styles, &translations, "en").unwrap();
    assert_eq!(result.stats.pages, 1);
    assert!(info_title(&result.bytes).starts_with("Łucja Ελένη 日本"));
}

#[test]
fn test_letter_page_size() {
    let (doc, styles, translations) = bundled();
    let renderer = Renderer::new(RenderOptions::new().with_page_size(PageSize::LETTER));
    let bytes = renderer.render(&doc, &styles, &translations, "en").unwrap();

    let pdf = Document::load_mem(&bytes).unwrap();
    let (_, page_id) = pdf.get_pages().into_iter().next().unwrap();
    let page = pdf.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let width = media_box[2].as_float().unwrap();
    let height = media_box[3].as_float().unwrap();
    assert!((width - 612.0).abs() < 0.5, "{width}");
    assert!((height - 792.0).abs() < 0.5, "{height}");
}

#[test]
fn test_render_languages_matches_sequential_renders() {
    let (doc, styles, translations) = bundled();
    let results = render::render_languages(&doc, &styles, &translations, &["pt", "en"]);

    for (result, language) in results.into_iter().zip(["pt", "en"]) {
        let sequential = render::render(&doc, &styles, &translations, language).unwrap();
        assert_eq!(result.unwrap(), sequential);
    }
}
