use chrono::{DateTime, FixedOffset, Local};

use eatery::model::{OrderLineModel, OrderModel, OrderStatus};
use eatery::repository::{AbsOrderRepo, OrderInMemRepo};

use super::in_mem_ds_ctx_setup;

async fn ut_repo_setup(max_items: u32) -> OrderInMemRepo {
    let ds = in_mem_ds_ctx_setup(max_items);
    let mem = ds.in_mem.as_ref().unwrap();
    let result = OrderInMemRepo::new(mem.clone()).await;
    result.unwrap()
}

fn ut_time_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn ut_line(name: &str, quantity: u32) -> OrderLineModel {
    OrderLineModel {
        dish_id: Some("3".to_string()),
        name: name.to_string(),
        description: "spicy".to_string(),
        image_url: String::new(),
        price: 880,
        quantity,
    }
}

fn ut_order(id_: &str, status: OrderStatus, lines: Vec<OrderLineModel>) -> OrderModel {
    OrderModel {
        id_: id_.to_string(),
        deliver_to: "04 Station Road".to_string(),
        mobile_number: "0912-345-678".to_string(),
        status,
        lines,
        create_time: ut_time_now(),
    }
}

#[tokio::test]
async fn save_fetch_ok() {
    let repo = ut_repo_setup(20).await;
    let lines = vec![ut_line("pad thai", 2), ut_line("green curry", 1)];
    let saved = ut_order("1", OrderStatus::Pending, lines);
    repo.save(saved.clone()).await.unwrap();
    let fetched = repo.fetch("1").await.unwrap().unwrap();
    assert_eq!(fetched.status, OrderStatus::Pending);
    assert_eq!(fetched.lines.len(), 2);
    // line order is preserved across the key-value storage
    assert_eq!(fetched.lines[0].name.as_str(), "pad thai");
    assert_eq!(fetched.lines[1].name.as_str(), "green curry");
    assert_eq!(fetched.create_time, saved.create_time);
    assert!(repo.fetch("2").await.unwrap().is_none());
}

#[tokio::test]
async fn save_shrinks_stale_lines() {
    let repo = ut_repo_setup(20).await;
    let lines = vec![ut_line("pad thai", 2), ut_line("green curry", 1)];
    repo.save(ut_order("1", OrderStatus::Pending, lines)).await.unwrap();
    let fewer = vec![ut_line("tom yum", 3)];
    repo.save(ut_order("1", OrderStatus::Preparing, fewer))
        .await
        .unwrap();
    let fetched = repo.fetch("1").await.unwrap().unwrap();
    assert_eq!(fetched.status, OrderStatus::Preparing);
    assert_eq!(fetched.lines.len(), 1);
    assert_eq!(fetched.lines[0].name.as_str(), "tom yum");
}

#[tokio::test]
async fn save_error_capacity_keeps_stored_version() {
    use eatery::error::AppErrorCode;
    let repo = ut_repo_setup(2).await;
    let lines = vec![ut_line("pad thai", 2), ut_line("green curry", 1)];
    repo.save(ut_order("1", OrderStatus::Pending, lines))
        .await
        .unwrap();
    let grown = vec![
        ut_line("pad thai", 2),
        ut_line("green curry", 1),
        ut_line("tom yum", 3),
    ];
    let result = repo.save(ut_order("1", OrderStatus::Preparing, grown)).await;
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::ExceedingMaxLimit);
    // the rejected edit must leave the previous version fully readable
    let fetched = repo.fetch("1").await.unwrap().unwrap();
    assert_eq!(fetched.status, OrderStatus::Pending);
    assert_eq!(fetched.lines.len(), 2);
    assert_eq!(fetched.lines[0].name.as_str(), "pad thai");
    assert_eq!(fetched.lines[1].name.as_str(), "green curry");
}

#[tokio::test]
async fn delete_ok_then_absent() {
    let repo = ut_repo_setup(20).await;
    repo.save(ut_order("1", OrderStatus::Pending, vec![ut_line("pad thai", 1)]))
        .await
        .unwrap();
    repo.delete("1").await.unwrap();
    assert!(repo.fetch("1").await.unwrap().is_none());
    assert!(repo.all_ids().await.unwrap().is_empty());
    // removing it again is a tolerated no-op
    assert!(repo.delete("1").await.is_ok());
}

#[tokio::test]
async fn fetch_all_insertion_order() {
    let repo = ut_repo_setup(40).await;
    for id_ in ["1", "2", "11"] {
        repo.save(ut_order(id_, OrderStatus::Pending, vec![ut_line("pad thai", 1)]))
            .await
            .unwrap();
    }
    let all = repo.fetch_all().await.unwrap();
    let ids = all.iter().map(|o| o.id_.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["1", "2", "11"]);
}

#[tokio::test]
async fn line_keys_do_not_collide_across_orders() {
    let repo = ut_repo_setup(40).await;
    repo.save(ut_order("1", OrderStatus::Pending, vec![ut_line("pad thai", 1)]))
        .await
        .unwrap();
    let lines = vec![ut_line("green curry", 2), ut_line("tom yum", 3)];
    repo.save(ut_order("11", OrderStatus::Pending, lines))
        .await
        .unwrap();
    let o1 = repo.fetch("1").await.unwrap().unwrap();
    assert_eq!(o1.lines.len(), 1);
    let o11 = repo.fetch("11").await.unwrap().unwrap();
    assert_eq!(o11.lines.len(), 2);
}
