use super::common::*;
use crate::api::{ApiError, RequestScope};
use crate::domain::{RegistrationId, VerificationDecision, VerificationVerdict};
use crate::review::{QueueError, RegistrationQueue, StatusFilter};

fn reg(id: &str) -> RegistrationId {
    RegistrationId(id.to_string())
}

#[tokio::test]
async fn open_fetches_the_full_record() {
    let gateway = registration_gateway();
    let mut queue = RegistrationQueue::new(gateway.clone(), RequestScope::new());
    queue.refresh().await.expect("initial load");

    let dialog = queue.open(&reg("reg-1")).await.expect("detail loads");
    assert_eq!(dialog.record.full_name(), "Abebe Kebede");
    assert_eq!(dialog.remark, "");
    assert_eq!(dialog.record.documents().len(), 3);

    assert_eq!(
        gateway.calls(),
        vec![Call::PendingRegistrations, Call::RegistrationDetail(reg("reg-1"))]
    );
}

#[tokio::test]
async fn verify_posts_status_and_remark_then_refetches() {
    let gateway = registration_gateway();
    let mut queue = RegistrationQueue::new(gateway.clone(), RequestScope::new());
    queue.refresh().await.expect("initial load");
    queue.open(&reg("reg-1")).await.expect("detail loads");
    queue
        .set_remark("National ID is blurry")
        .expect("dialog is open");

    queue
        .verify(VerificationDecision::Rejected)
        .await
        .expect("verify succeeds");

    assert_eq!(
        gateway.count(|call| {
            call == &Call::VerifyRegistration(
                reg("reg-1"),
                VerificationVerdict {
                    status: VerificationDecision::Rejected,
                    remark: "National ID is blurry".to_string(),
                },
            )
        }),
        1
    );
    assert_eq!(gateway.count(|call| call == &Call::PendingRegistrations), 2);
    assert!(queue.dialog().is_none());
    assert_eq!(queue.rows().len(), 2);
}

#[tokio::test]
async fn verify_without_open_dialog_sends_nothing() {
    let gateway = registration_gateway();
    let mut queue = RegistrationQueue::new(gateway.clone(), RequestScope::new());

    assert!(matches!(
        queue.verify(VerificationDecision::Approved).await,
        Err(QueueError::NothingOpen)
    ));
    assert!(matches!(queue.set_remark("x"), Err(QueueError::NothingOpen)));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn failed_verify_keeps_dialog_and_skips_refetch() {
    let gateway = registration_gateway();
    gateway.fail_next("verify_registration", server_error(500, None));
    let mut queue = RegistrationQueue::new(gateway.clone(), RequestScope::new());
    queue.refresh().await.expect("initial load");
    queue.open(&reg("reg-2")).await.expect("detail loads");
    queue.set_remark("looks fine").expect("dialog is open");

    assert!(queue.verify(VerificationDecision::Approved).await.is_err());

    assert_eq!(queue.notice(), Some("Failed to update verification status."));
    let dialog = queue.dialog().expect("dialog stays open");
    assert_eq!(dialog.remark, "looks fine");
    assert_eq!(gateway.count(|call| call == &Call::PendingRegistrations), 1);
    assert!(!queue.is_dialog_loading());
}

#[tokio::test]
async fn missing_detail_surfaces_server_message() {
    let gateway = registration_gateway();
    let mut queue = RegistrationQueue::new(gateway, RequestScope::new());

    let err = queue.open(&reg("reg-404")).await.expect_err("detail missing");

    assert!(matches!(err, QueueError::Api(ApiError::Status { status: 404, .. })));
    assert_eq!(queue.notice(), Some("Registration not found"));
    assert!(queue.dialog().is_none());
}

#[tokio::test]
async fn unauthenticated_list_reports_sign_in_hint() {
    let gateway = registration_gateway();
    gateway.fail_next("pending_registrations", ApiError::Unauthenticated);
    let mut queue = RegistrationQueue::new(gateway, RequestScope::new());

    assert!(queue.refresh().await.is_err());
    assert_eq!(
        queue.notice(),
        Some("not signed in; run `drive-admin login` first")
    );
}

#[tokio::test]
async fn status_filter_and_search_combine() {
    let gateway = registration_gateway();
    let mut queue = RegistrationQueue::new(gateway, RequestScope::new());
    queue.refresh().await.expect("initial load");

    queue.set_filter(StatusFilter::Pending);
    let ids: Vec<&str> = queue
        .visible()
        .iter()
        .map(|row| row.registration_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["reg-1"]);

    queue.set_filter(StatusFilter::Any);
    queue.set_search("meron@");
    let ids: Vec<&str> = queue
        .visible()
        .iter()
        .map(|row| row.registration_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["reg-2"]);

    queue.set_search("selam girma");
    assert_eq!(queue.visible().len(), 1);
}
