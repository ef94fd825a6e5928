//! Monthly spend-cap enforcement through the wired broker.

mod common;

use seathub::ErrorKind;

use common::{seed_tool, start_broker};

#[tokio::test]
async fn test_cap_blocks_overage_before_any_state_change() {
    // Cap 500, price 600: the first overage borrow would already breach
    // the cap, so it is denied and nothing is recorded.
    let tb = start_broker(vec![seed_tool("cad_tool", 2, 1, 1, 600.0)]).await;
    tb.broker.spend.set_max_spend("cad_tool", Some(500.0)).await.unwrap();

    tb.broker.admission.borrow("cad_tool", "alice").await.unwrap();
    let err = tb
        .broker
        .admission
        .borrow("cad_tool", "bob")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::SpendCap);

    let status = tb.broker.admission.status("cad_tool").await.unwrap().unwrap();
    assert_eq!(status.borrowed, 1);
    assert_eq!(status.overage_borrows, 0);
    assert_eq!(
        tb.broker
            .spend
            .month_to_date_overage_cost("cad_tool")
            .await
            .unwrap(),
        0.0
    );
}

#[tokio::test]
async fn test_cap_admits_up_to_the_boundary() {
    // Cap 200, price 100: two overage borrows land exactly on the cap,
    // the third would exceed it.
    let tb = start_broker(vec![seed_tool("cad_tool", 4, 1, 3, 100.0)]).await;
    tb.broker.spend.set_max_spend("cad_tool", Some(200.0)).await.unwrap();
    let admission = &tb.broker.admission;

    admission.borrow("cad_tool", "alice").await.unwrap();
    admission.borrow("cad_tool", "bob").await.unwrap();
    admission.borrow("cad_tool", "carol").await.unwrap();

    let err = admission.borrow("cad_tool", "dave").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::SpendCap);

    assert_eq!(
        tb.broker
            .spend
            .month_to_date_overage_cost("cad_tool")
            .await
            .unwrap(),
        200.0
    );
}

#[tokio::test]
async fn test_returns_do_not_refund_monthly_spend() {
    let tb = start_broker(vec![seed_tool("cad_tool", 3, 1, 2, 100.0)]).await;
    tb.broker.spend.set_max_spend("cad_tool", Some(150.0)).await.unwrap();
    let admission = &tb.broker.admission;

    admission.borrow("cad_tool", "alice").await.unwrap();
    let overage = admission.borrow("cad_tool", "bob").await.unwrap();
    admission.release(overage.borrow_id).await.unwrap();

    // The seat came back but the 100.0 charge stands, so the next
    // overage borrow would hit 200.0 against a 150.0 cap.
    let err = admission.borrow("cad_tool", "carol").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::SpendCap);
    assert_eq!(
        tb.broker
            .spend
            .month_to_date_overage_cost("cad_tool")
            .await
            .unwrap(),
        100.0
    );
}

#[tokio::test]
async fn test_clearing_cap_readmits_overage() {
    let tb = start_broker(vec![seed_tool("cad_tool", 2, 1, 1, 600.0)]).await;
    tb.broker.spend.set_max_spend("cad_tool", Some(500.0)).await.unwrap();
    let admission = &tb.broker.admission;

    admission.borrow("cad_tool", "alice").await.unwrap();
    let err = admission.borrow("cad_tool", "bob").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::SpendCap);

    tb.broker.spend.set_max_spend("cad_tool", None).await.unwrap();
    let grant = admission.borrow("cad_tool", "bob").await.unwrap();
    assert!(grant.is_overage);
}

#[tokio::test]
async fn test_cap_operations_on_unknown_tool() {
    let tb = start_broker(vec![seed_tool("known_tool", 1, 1, 0, 0.0)]).await;

    let err = tb
        .broker
        .spend
        .set_max_spend("ghost", Some(100.0))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownTool);

    let err = tb
        .broker
        .spend
        .month_to_date_overage_cost("ghost")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownTool);
}
