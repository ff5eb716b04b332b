use chrono::NaiveDate;
use experience_core::{ExperienceForm, ExperienceRecord};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn blank_form_defaults() {
    let today = day(2025, 6, 30);
    let form = ExperienceForm::blank_on(today);

    assert!(form.title.is_empty());
    assert_eq!(form.start_date, today);
    assert_eq!(form.end_date, today);
    assert!(form.duration.is_empty());
    assert!(form.summary.is_empty());
    assert!(form.details.is_empty());
    assert!(form.keywords.is_empty());
    assert!(form.notes.is_empty());
}

#[test]
fn save_renders_period_text() {
    let mut form = ExperienceForm::blank_on(day(2024, 1, 5));
    form.end_date = day(2024, 1, 10);

    let record = form.save();
    assert_eq!(record.date(), "2024-01-05 ~ 2024-01-10");
}

#[test]
fn resave_after_edit_recomputes_period() {
    let mut form = ExperienceForm::blank_on(day(2024, 1, 5));
    form.title = "Internship".to_string();
    let original = form.save();

    let mut edited = original.to_form();
    edited.end_date = day(2024, 8, 31);
    let updated = edited.save();

    assert_eq!(updated.title(), "Internship");
    assert_eq!(updated.date(), "2024-01-05 ~ 2024-08-31");
}

#[test]
fn to_form_round_trips_all_editable_fields() {
    let form = ExperienceForm {
        title: "Volunteer".to_string(),
        start_date: day(2023, 3, 1),
        end_date: day(2023, 5, 1),
        duration: "2 months".to_string(),
        summary: "Taught coding".to_string(),
        details: "Weekly sessions".to_string(),
        keywords: "teaching, rust".to_string(),
        notes: "Certificate pending".to_string(),
    };
    assert_eq!(form.clone().save().to_form(), form);
}

#[test]
fn serialization_uses_camel_case_fields() {
    let mut form = ExperienceForm::blank_on(day(2024, 1, 5));
    form.end_date = day(2024, 1, 10);
    form.title = "Club".to_string();
    let record = form.save();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["title"], "Club");
    assert_eq!(json["startDate"], "2024-01-05");
    assert_eq!(json["endDate"], "2024-01-10");
    assert_eq!(json["date"], "2024-01-05 ~ 2024-01-10");

    let decoded: ExperienceRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn deserialize_recomputes_stale_period() {
    let value = serde_json::json!({
        "title": "Imported",
        "startDate": "2022-09-01",
        "endDate": "2022-12-20",
        "date": "tampered",
        "keywords": "a,b"
    });

    let record: ExperienceRecord = serde_json::from_value(value).unwrap();
    assert_eq!(record.date(), "2022-09-01 ~ 2022-12-20");
    assert_eq!(record.keyword_list(), vec!["a", "b"]);
    assert!(record.notes().is_empty());
}
