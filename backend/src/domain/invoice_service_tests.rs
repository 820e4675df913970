//! Tests for the invoice mutation pipeline.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    InvoiceRepositoryError, MockInvoiceRepository, MockViewCache, RejectionKind,
};
use crate::domain::{CustomerId, InvoiceStatus};
use crate::test_support::MutableClock;

#[fixture]
fn clock() -> Arc<MutableClock> {
    let now = Utc
        .with_ymd_and_hms(2024, 6, 30, 23, 59, 0)
        .single()
        .expect("valid timestamp");
    Arc::new(MutableClock::new(now))
}

fn service(
    repo: MockInvoiceRepository,
    views: MockViewCache,
    clock: Arc<MutableClock>,
) -> InvoiceMutationService<MockInvoiceRepository, MockViewCache> {
    InvoiceMutationService::new(Arc::new(repo), Arc::new(views), clock)
}

fn expect_invalidated(views: &mut MockViewCache) {
    views
        .expect_invalidate()
        .withf(|view| view == INVOICES_VIEW)
        .times(1)
        .return_const(());
}

fn expect_untouched(repo: &mut MockInvoiceRepository, views: &mut MockViewCache) {
    repo.expect_insert().times(0);
    repo.expect_update().times(0);
    views.expect_invalidate().times(0);
}

fn rejection(outcome: MutationOutcome) -> FormState {
    match outcome {
        MutationOutcome::Rejected(state) => state,
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn create_persists_cents_and_redirects(clock: Arc<MutableClock>) {
    let mut repo = MockInvoiceRepository::new();
    repo.expect_insert()
        .withf(|draft| {
            draft.amount.get() == 5000
                && draft.customer_id == CustomerId::new("c1").expect("id")
                && draft.status == InvoiceStatus::Paid
                && draft.date == NaiveDate::from_ymd_opt(2024, 6, 30).expect("date")
        })
        .times(1)
        .return_once(|_| Ok(InvoiceId::random()));
    let mut views = MockViewCache::new();
    expect_invalidated(&mut views);

    let outcome = service(repo, views, clock)
        .create(InvoiceForm::new("c1", "50", "paid"))
        .await;

    assert_eq!(outcome, MutationOutcome::Redirect("/dashboard/invoices"));
}

#[rstest]
#[tokio::test]
async fn create_rounds_half_up(clock: Arc<MutableClock>) {
    let mut repo = MockInvoiceRepository::new();
    repo.expect_insert()
        .withf(|draft| draft.amount.get() == 1235)
        .times(1)
        .return_once(|_| Ok(InvoiceId::random()));
    let mut views = MockViewCache::new();
    expect_invalidated(&mut views);

    let outcome = service(repo, views, clock)
        .create(InvoiceForm::new("c1", "12.345", "pending"))
        .await;

    assert!(matches!(outcome, MutationOutcome::Redirect(_)));
}

#[rstest]
#[case("0")]
#[case("-10")]
#[tokio::test]
async fn create_rejects_non_positive_amount_without_writing(
    clock: Arc<MutableClock>,
    #[case] amount: &str,
) {
    let mut repo = MockInvoiceRepository::new();
    let mut views = MockViewCache::new();
    expect_untouched(&mut repo, &mut views);

    let state = rejection(
        service(repo, views, clock)
            .create(InvoiceForm::new("c1", amount, "pending"))
            .await,
    );

    assert_eq!(state.kind, RejectionKind::Validation);
    assert_eq!(state.message, CREATE_INVALID);
    assert_eq!(
        state.errors.get("amount"),
        Some(&vec!["Please enter an amount greater than $0.".to_owned()])
    );
    assert!(!state.errors.contains_key("customerId"));
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_status(clock: Arc<MutableClock>) {
    let mut repo = MockInvoiceRepository::new();
    let mut views = MockViewCache::new();
    expect_untouched(&mut repo, &mut views);

    let state = rejection(
        service(repo, views, clock)
            .create(InvoiceForm::new("c1", "10", "overdue"))
            .await,
    );

    assert_eq!(
        state.errors.get("status"),
        Some(&vec!["Please select an invoice status.".to_owned()])
    );
}

#[rstest]
#[tokio::test]
async fn create_reports_generic_database_failure(clock: Arc<MutableClock>) {
    let mut repo = MockInvoiceRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(InvoiceRepositoryError::query("duplicate key value")));
    let mut views = MockViewCache::new();
    views.expect_invalidate().times(0);

    let state = rejection(
        service(repo, views, clock)
            .create(InvoiceForm::new("c1", "10", "paid"))
            .await,
    );

    assert_eq!(state.kind, RejectionKind::Persistence);
    assert_eq!(state.message, "Database error. Could not create invoice.");
    assert!(state.errors.is_empty());
}

#[rstest]
#[case(1)]
#[case(0)]
#[tokio::test]
async fn update_redirects_whether_or_not_a_row_matched(
    clock: Arc<MutableClock>,
    #[case] rows: usize,
) {
    let id = InvoiceId::random();
    let mut repo = MockInvoiceRepository::new();
    repo.expect_update()
        .withf(move |target, draft| *target == id && draft.amount.get() == 1230)
        .times(1)
        .return_once(move |_, _| Ok(rows));
    let mut views = MockViewCache::new();
    expect_invalidated(&mut views);

    let outcome = service(repo, views, clock)
        .update(id, InvoiceForm::new("c1", "12.3", "pending"))
        .await;

    assert_eq!(outcome, MutationOutcome::Redirect(INVOICES_VIEW));
}

#[rstest]
#[tokio::test]
async fn update_uses_update_summary(clock: Arc<MutableClock>) {
    let mut repo = MockInvoiceRepository::new();
    let mut views = MockViewCache::new();
    expect_untouched(&mut repo, &mut views);

    let state = rejection(
        service(repo, views, clock)
            .update(InvoiceId::random(), InvoiceForm::default())
            .await,
    );

    assert_eq!(state.message, UPDATE_INVALID);
    assert_eq!(state.errors.len(), 3);
}

#[rstest]
#[tokio::test]
async fn update_reports_generic_database_failure(clock: Arc<MutableClock>) {
    let mut repo = MockInvoiceRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(|_, _| Err(InvoiceRepositoryError::connection("refused")));
    let mut views = MockViewCache::new();
    views.expect_invalidate().times(0);

    let state = rejection(
        service(repo, views, clock)
            .update(InvoiceId::random(), InvoiceForm::new("c1", "1", "paid"))
            .await,
    );

    assert_eq!(state.message, "Database error. Could not update invoice.");
}

#[rstest]
#[case(1)]
#[case(0)]
#[tokio::test]
async fn delete_confirms_and_invalidates(clock: Arc<MutableClock>, #[case] rows: usize) {
    let mut repo = MockInvoiceRepository::new();
    repo.expect_delete().times(1).return_once(move |_| Ok(rows));
    let mut views = MockViewCache::new();
    expect_invalidated(&mut views);

    let outcome = service(repo, views, clock).delete(InvoiceId::random()).await;

    assert_eq!(
        outcome,
        MutationOutcome::Deleted {
            message: "Invoice deleted successfully.".to_owned()
        }
    );
}

#[rstest]
#[tokio::test]
async fn delete_failure_is_a_soft_rejection(clock: Arc<MutableClock>) {
    let mut repo = MockInvoiceRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(|_| Err(InvoiceRepositoryError::query("lock timeout")));
    let mut views = MockViewCache::new();
    views.expect_invalidate().times(0);

    let state = rejection(service(repo, views, clock).delete(InvoiceId::random()).await);

    assert_eq!(state.kind, RejectionKind::Persistence);
    assert_eq!(state.message, "Database error. Failed to delete invoice.");
}
