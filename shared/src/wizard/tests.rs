use super::*;
use crate::validation::error_for;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn service() -> Service {
    Service {
        service_id: 11,
        name: "Deep clean".into(),
        description: None,
        base_price: 300_000,
        unit: None,
        estimated_duration_minutes: Some(180),
        category_id: Some(1),
        icon_url: None,
        is_active: true,
    }
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn filled_wizard() -> BookingWizard {
    let mut wizard = BookingWizard::with_service(&service());
    wizard.advance(today()).unwrap();
    let draft = wizard.draft_mut();
    draft.date = Some(today());
    draft.start_time = Some(at(9, 30));
    wizard.advance(today()).unwrap();
    let draft = wizard.draft_mut();
    draft.address = "12 Le Loi, District 1".into();
    draft.contact_phone = "0901234567".into();
    draft.note = "  Bring eco products ".into();
    wizard.advance(today()).unwrap();
    wizard
}

#[test]
fn cannot_leave_service_step_without_service() {
    let mut wizard = BookingWizard::new();
    let errors = wizard.advance(today()).unwrap_err();
    assert_eq!(error_for(&errors, "service"), Some("Choose a service"));
    assert_eq!(wizard.step(), WizardStep::Service);
}

#[test]
fn schedule_rejects_past_dates_and_odd_times() {
    let mut wizard = BookingWizard::with_service(&service());
    wizard.advance(today()).unwrap();

    let draft = wizard.draft_mut();
    draft.date = today().pred_opt();
    draft.start_time = Some(at(7, 0));
    let errors = wizard.advance(today()).unwrap_err();
    assert!(error_for(&errors, "date").is_some());
    assert!(error_for(&errors, "time").is_some());

    wizard.draft_mut().start_time = Some(at(18, 30));
    assert!(wizard.advance(today()).is_err());

    let draft = wizard.draft_mut();
    draft.date = Some(today());
    draft.start_time = Some(at(18, 0));
    assert_eq!(wizard.advance(today()).unwrap(), WizardStep::Address);
}

#[test]
fn back_does_not_validate() {
    let mut wizard = BookingWizard::with_service(&service());
    wizard.advance(today()).unwrap();
    wizard.draft_mut().date = None;
    assert_eq!(wizard.back(), WizardStep::Service);
    assert_eq!(wizard.back(), WizardStep::Service);
}

#[test]
fn full_flow_builds_request() {
    let wizard = filled_wizard();
    assert_eq!(wizard.step(), WizardStep::Review);
    let req = wizard.to_request(today()).unwrap();
    assert_eq!(req.service_id, 11);
    assert_eq!(req.start_time, at(9, 30));
    assert_eq!(req.note.as_deref(), Some("Bring eco products"));
}

#[test]
fn request_only_from_review() {
    let mut wizard = filled_wizard();
    wizard.back();
    assert!(wizard.to_request(today()).is_err());
}

#[test]
fn review_revalidates_every_step() {
    let mut wizard = filled_wizard();
    // 日期在跨天后过期
    let tomorrow = today().succ_opt().unwrap();
    let errors = wizard.to_request(tomorrow).unwrap_err();
    assert!(error_for(&errors, "date").is_some());

    wizard.draft_mut().contact_phone.clear();
    let errors = wizard.to_request(today()).unwrap_err();
    assert!(error_for(&errors, "contactPhone").is_some());
}

#[test]
fn jump_only_backwards() {
    let mut wizard = filled_wizard();
    assert!(wizard.jump_to(WizardStep::Schedule));
    assert!(!wizard.jump_to(WizardStep::Review));
    assert_eq!(wizard.step(), WizardStep::Schedule);
}

#[test]
fn slots_cover_business_hours() {
    let slots = time_slots();
    assert_eq!(slots.first(), Some(&at(8, 0)));
    assert_eq!(slots.last(), Some(&at(18, 0)));
    assert_eq!(slots.len(), 21);
}
