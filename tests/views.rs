//! Page behaviour against the fake backend: fetch on mount, mutate, then
//! acknowledge or reload.

mod support;

use serde_json::json;
use support::{FakeBackend, BUSINESS_ID};
use voiceagent_admin::views::forms::PREVIEW_CHARS;
use voiceagent_admin::views::{
    load_stats, BookingRulesView, BusinessSettingsView, CallLogsView, DashboardView,
    KnowledgeBaseView, NoticeKind, ServiceDraft, ServicesView,
};
use voiceagent_admin::{BookingRules, ServiceUpdate, View, ViewError};

fn signed_in_client(backend: &FakeBackend) -> voiceagent_admin::ApiClient {
    let client = backend.client();
    client
        .session()
        .set(support::token_for(BUSINESS_ID), BUSINESS_ID)
        .unwrap();
    client
}

#[tokio::test]
async fn test_booking_rules_default_then_saved() {
    let backend = FakeBackend::start().await;
    let client = signed_in_client(&backend);

    let mut view = BookingRulesView::new(client.clone());
    view.mount().await.unwrap();
    assert_eq!(view.form.parse().unwrap(), BookingRules::default());
    assert_eq!(view.form.max_advance_days, "30");

    view.form.advance_notice_hours = "48".into();
    view.form.cancellation_hours = "12".into();
    view.save().await.unwrap();

    let notice = view.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Saved!");
    assert!(notice.is_visible());

    let stored = client
        .business(BUSINESS_ID)
        .booking_rules()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored,
        BookingRules {
            advance_notice_hours: 48,
            max_advance_days: 30,
            cancellation_hours: 12,
        }
    );

    // A fresh mount shows what was saved
    let mut again = BookingRulesView::new(client);
    again.mount().await.unwrap();
    assert_eq!(again.form.advance_notice_hours, "48");
}

#[tokio::test]
async fn test_booking_rules_invalid_input_is_not_sent() {
    let backend = FakeBackend::start().await;
    let mut view = BookingRulesView::new(signed_in_client(&backend));
    view.mount().await.unwrap();

    view.form.max_advance_days = "soon".into();
    let err = view.save().await.unwrap_err();
    assert!(matches!(err, ViewError::Form(_)));
    assert!(view.notice().unwrap().is_error());

    let path = format!("PUT /businesses/{BUSINESS_ID}/booking-rules");
    assert_eq!(backend.hits(&path), 0);
}

#[tokio::test]
async fn test_knowledge_base_add_and_delete() {
    let backend = FakeBackend::start().await;
    let mut view = KnowledgeBaseView::new(signed_in_client(&backend));
    view.mount().await.unwrap();
    let before = view.docs().len();

    let content = "Q: Do you take walk-ins? A: Yes. ".repeat(20);
    view.draft.title = "FAQ".into();
    view.draft.content = content.clone();
    view.add().await.unwrap();

    assert_eq!(view.docs().len(), before + 1);
    let faq: Vec<_> = view.docs().iter().filter(|d| d.title == "FAQ").collect();
    assert_eq!(faq.len(), 1);
    assert_eq!(faq[0].content, content);
    assert!(view.draft.title.is_empty());

    let snapshot = view.snapshot();
    let preview = snapshot["docs"][0]["preview"].as_str().unwrap();
    assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
    assert!(preview.ends_with("..."));

    let id = faq[0].id.clone();
    view.delete(&id).await.unwrap();
    assert_eq!(view.docs().len(), before);
}

#[tokio::test]
async fn test_knowledge_base_reloads_after_each_write() {
    let backend = FakeBackend::start().await;
    let mut view = KnowledgeBaseView::new(signed_in_client(&backend));
    view.mount().await.unwrap();

    view.draft.title = "Hours".into();
    view.draft.content = "9 to 5".into();
    view.add().await.unwrap();

    let list = format!("GET /businesses/{BUSINESS_ID}/knowledge-base");
    assert_eq!(backend.hits(&list), 2);
}

#[tokio::test]
async fn test_service_with_empty_price_is_null() {
    let backend = FakeBackend::start().await;
    let mut view = ServicesView::new(signed_in_client(&backend));
    view.mount().await.unwrap();

    view.draft.name = "Consultation".into();
    view.draft.price = "".into();
    view.add().await.unwrap();

    assert_eq!(view.services().len(), 1);
    let created = &view.services()[0];
    assert_eq!(created.price, None);
    assert_eq!(created.duration_minutes, 30);
    assert_eq!(created.description, None);

    let raw = backend.with(|s| s.services[0].clone());
    assert_eq!(raw["price"], json!(null));
    assert_eq!(raw["description"], json!(null));
}

#[tokio::test]
async fn test_service_update_and_delete() {
    let backend = FakeBackend::start().await;
    let mut view = ServicesView::new(signed_in_client(&backend));
    view.mount().await.unwrap();

    view.draft.name = "Haircut".into();
    view.draft.duration_minutes = "45".into();
    view.draft.price = "35".into();
    view.add().await.unwrap();
    let id = view.services()[0].id.clone();

    let update = ServiceUpdate {
        price: Some(Some(40.0)),
        ..Default::default()
    };
    view.update(&id, &update).await.unwrap();
    assert_eq!(view.services()[0].price, Some(40.0));
    assert_eq!(view.services()[0].duration_minutes, 45);
    assert!(view.render().contains("$40.00"));

    view.delete(&id).await.unwrap();
    assert!(view.services().is_empty());
}

#[tokio::test]
async fn test_service_edit_clears_price_and_description() {
    let backend = FakeBackend::start().await;
    let mut view = ServicesView::new(signed_in_client(&backend));
    view.mount().await.unwrap();

    view.draft.name = "Haircut".into();
    view.draft.price = "35".into();
    view.draft.description = "Wash and cut".into();
    view.add().await.unwrap();
    let service = view.services()[0].clone();
    assert_eq!(service.price, Some(35.0));

    let mut draft = ServiceDraft::from(&service);
    draft.price.clear();
    draft.description.clear();
    view.update(&service.id, &draft.to_update().unwrap())
        .await
        .unwrap();

    assert_eq!(view.services()[0].price, None);
    assert_eq!(view.services()[0].description, None);
    backend.with(|s| {
        assert!(s.services[0]["price"].is_null());
        assert!(s.services[0]["description"].is_null());
    });
}

#[tokio::test]
async fn test_dashboard_counts() {
    let backend = FakeBackend::start().await;
    backend.with(|s| {
        s.call_logs = (0..5).map(|i| json!({ "id": format!("c{i}") })).collect();
        s.bookings = (0..3).map(|i| json!({ "id": format!("b{i}") })).collect();
        s.services = vec![json!({ "id": "s1", "name": "Cut", "duration_minutes": 30 })];
    });
    let client = signed_in_client(&backend);

    let stats = load_stats(&client.business(BUSINESS_ID)).await.unwrap();
    assert_eq!(stats.total_calls, 5);
    assert_eq!(stats.total_bookings, 3);
    assert_eq!(stats.total_services, 1);

    let mut view = DashboardView::new(client);
    view.mount().await.unwrap();
    assert_eq!(view.stats(), stats);
    assert!(view.render().contains("Total Bookings: 3"));
}

#[tokio::test]
async fn test_dashboard_fails_when_any_fetch_fails() {
    let backend = FakeBackend::start().await;
    // 500 is not transient, so the first answer is final
    backend.fail(&format!("GET /businesses/{BUSINESS_ID}/bookings"), &[500]);

    let mut view = DashboardView::new(signed_in_client(&backend));
    let err = view.mount().await.unwrap_err();
    assert!(matches!(err, ViewError::Api(_)));
    assert!(view.notice().unwrap().is_error());
    assert_eq!(view.stats().total_calls, 0);
}

#[tokio::test]
async fn test_settings_patch_sends_changed_fields() {
    let backend = FakeBackend::start().await;
    let mut view = BusinessSettingsView::new(signed_in_client(&backend));
    view.mount().await.unwrap();
    assert_eq!(view.form.name, "Sunset Salon");
    assert_eq!(view.form.policies, "");

    view.form.policies = "24h cancellation".into();
    view.save().await.unwrap();
    assert_eq!(view.notice().unwrap().message, "Saved!");

    let business = backend.with(|s| s.business.clone());
    assert_eq!(business["policies"], "24h cancellation");
    assert_eq!(business["name"], "Sunset Salon");
}

#[tokio::test]
async fn test_settings_rejects_bad_phone() {
    let backend = FakeBackend::start().await;
    let mut view = BusinessSettingsView::new(signed_in_client(&backend));
    view.mount().await.unwrap();

    view.form.phone = "555-12".into();
    assert!(matches!(view.save().await, Err(ViewError::Form(_))));
    assert_eq!(backend.hits(&format!("PATCH /businesses/{BUSINESS_ID}")), 0);
}

#[tokio::test]
async fn test_call_logs_rendering() {
    let backend = FakeBackend::start().await;
    backend.with(|s| {
        s.call_logs = vec![json!({
            "id": "c1",
            "caller_phone": null,
            "intent": "booking",
            "outcome": null,
            "duration_seconds": 73,
            "created_at": "2024-06-01T10:00:00Z",
        })];
    });

    let mut view = CallLogsView::new(signed_in_client(&backend));
    view.mount().await.unwrap();

    let row = &view.rows()[0];
    assert_eq!(row.caller, "Unknown");
    assert_eq!(row.outcome, "-");
    assert_eq!(row.duration, "73s");
    assert!(view.render().contains("Unknown"));
}

#[tokio::test]
async fn test_no_business_means_no_fetch() {
    let backend = FakeBackend::start().await;
    let client = backend.client();

    let mut rules = BookingRulesView::new(client.clone());
    rules.mount().await.unwrap();
    assert_eq!(rules.form.parse().unwrap(), BookingRules::default());

    let mut dashboard = DashboardView::new(client.clone());
    dashboard.mount().await.unwrap();
    assert_eq!(dashboard.stats().total_calls, 0);

    assert!(backend.with(|s| s.hits.is_empty()));

    // Acting without a business is an error, not a request
    let mut services = ServicesView::new(client);
    services.draft.name = "Cut".into();
    assert!(matches!(services.add().await, Err(ViewError::NoBusiness)));
}
