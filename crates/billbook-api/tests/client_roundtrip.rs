use billbook_api::{app_router, AppState};
use billbook_core::api::HttpRecordsApi;
use billbook_core::render::{ListRegion, SearchRegion};
use billbook_core::{
    Bills, Clock, DeleteOutcome, FormController, FormPresentation, Items, RecordId,
    SearchOutcome, SubmitOutcome, View,
};
use chrono::{DateTime, FixedOffset, Utc};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct RecordingView {
    lists: Vec<ListRegion>,
    searches: Vec<SearchRegion>,
    errors: Vec<String>,
}

impl View for RecordingView {
    fn render_list(&mut self, region: &ListRegion) {
        self.lists.push(region.clone());
    }

    fn render_search(&mut self, region: &SearchRegion) {
        self.searches.push(region.clone());
    }

    fn render_form(&mut self, _form: &FormPresentation) {}

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app_router(AppState::default()))
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

fn clock() -> Clock {
    let now = DateTime::parse_from_rfc3339("2024-03-05T14:30:00Z")
        .unwrap()
        .with_timezone(&Utc);
    Clock::frozen(now, FixedOffset::east_opt(0).unwrap())
}

fn last_list_len(view: &RecordingView) -> usize {
    match view.lists.last() {
        Some(ListRegion::Rows(rows)) => rows.len(),
        _ => 0,
    }
}

#[tokio::test]
async fn bills_round_trip_through_the_backend() {
    let base_url = spawn_backend().await;
    let api = HttpRecordsApi::<Bills>::new(&base_url).unwrap();
    let mut controller =
        FormController::<Bills, _, _>::new(api, RecordingView::default(), clock());

    assert_eq!(controller.load_list().await.unwrap(), 0);
    assert_eq!(controller.view().lists.last(), Some(&ListRegion::Empty));

    controller.set_field("embasa", "12.50").unwrap();
    controller.set_field("coelba", "30").unwrap();
    controller.set_field("created_at", "2024-03-01T08:00").unwrap();
    let SubmitOutcome::Created(Some(id)) = controller.submit().await.unwrap() else {
        panic!("backend should echo the created bill");
    };
    assert_eq!(last_list_len(controller.view()), 1);

    controller.prepare_edit(&id).unwrap();
    assert_eq!(controller.form().value("embasa"), "12.50");
    assert_eq!(controller.form().value("created_at"), "2024-03-01T08:00");
    controller.set_field("coelba", "31.25").unwrap();
    assert_eq!(
        controller.submit().await.unwrap(),
        SubmitOutcome::Updated(id.clone())
    );

    let bill = controller.records()[0].clone();
    assert!((bill.coelba - 31.25).abs() < f64::EPSILON);
    assert!(bill.updated_at.is_some());
    assert_eq!(
        bill.created_at.map(|at| at.with_timezone(&Utc).to_rfc3339()),
        Some("2024-03-01T08:00:00+00:00".to_string())
    );

    assert_eq!(
        controller.search(id.as_str()).await.unwrap(),
        SearchOutcome::Found(id.clone())
    );
    assert_eq!(controller.delete(&id).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(controller.view().searches.last(), Some(&SearchRegion::Cleared));
    assert_eq!(controller.view().lists.last(), Some(&ListRegion::Empty));

    assert_eq!(
        controller.search(id.as_str()).await.unwrap(),
        SearchOutcome::NotFound
    );
    assert!(controller.view().errors.is_empty());
}

#[tokio::test]
async fn malformed_bill_ids_render_not_found() {
    let base_url = spawn_backend().await;
    let api = HttpRecordsApi::<Bills>::new(&base_url).unwrap();
    let mut controller =
        FormController::<Bills, _, _>::new(api, RecordingView::default(), clock());

    assert_eq!(
        controller.search("not-a-uuid").await.unwrap(),
        SearchOutcome::NotFound
    );
    assert_eq!(controller.view().searches, vec![SearchRegion::NotFound]);
}

#[tokio::test]
async fn items_round_trip_through_the_backend() {
    let base_url = spawn_backend().await;
    let api = HttpRecordsApi::<Items>::new(&base_url).unwrap();
    let mut controller =
        FormController::<Items, _, _>::new(api, RecordingView::default(), clock());

    controller.set_field("nome", " Monitor ").unwrap();
    controller.set_field("preco", "850.50").unwrap();
    let outcome = controller.submit().await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Created(Some(RecordId::parse("1").unwrap()))
    );

    let item = controller.records()[0].clone();
    assert_eq!(item.nome, "Monitor");
    assert!((item.preco - 850.5).abs() < f64::EPSILON);

    let missing = RecordId::parse("99").unwrap();
    assert!(controller.delete(&missing).await.is_err());
    assert_eq!(controller.view().errors.len(), 1);
    assert!(controller.view().errors[0].contains("Item not found"));
    assert_eq!(last_list_len(controller.view()), 1);
}

#[tokio::test]
async fn re_editing_after_updating_a_search_hit_uses_fresh_values() {
    let base_url = spawn_backend().await;
    let api = HttpRecordsApi::<Items>::new(&base_url).unwrap();
    let mut controller =
        FormController::<Items, _, _>::new(api, RecordingView::default(), clock());

    controller.set_field("nome", "Monitor").unwrap();
    controller.set_field("preco", "12.5").unwrap();
    controller.submit().await.unwrap();

    let id = RecordId::parse("1").unwrap();
    controller.search("1").await.unwrap();
    controller.prepare_edit(&id).unwrap();
    controller.set_field("preco", "15").unwrap();
    controller.submit().await.unwrap();
    assert!((controller.records()[0].preco - 15.0).abs() < f64::EPSILON);

    controller.prepare_edit(&id).unwrap();
    assert_eq!(controller.form().value("preco"), "15.00");

    controller.submit().await.unwrap();
    assert!((controller.records()[0].preco - 15.0).abs() < f64::EPSILON);
}
