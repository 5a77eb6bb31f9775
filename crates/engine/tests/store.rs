mod common;

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::UTC;

use common::migrated_db;
use engine::{
    ConversationState, Currency, EngineError, Money, MoneyEvent, Period, Storage, Store,
};

async fn store_with_user(user_id: i64) -> Store {
    let store = Store::builder()
        .database(migrated_db().await)
        .build()
        .await
        .unwrap();
    store.create_user(user_id, "ana").await.unwrap();
    store
}

fn march() -> Period {
    Period::month_of(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(), UTC)
}

fn event(tag: &str, cents: i64, created: chrono::DateTime<Utc>) -> MoneyEvent {
    MoneyEvent {
        amount: Money::new(cents),
        currency: Currency::Ars,
        comment: String::new(),
        tag: tag.to_string(),
        created,
    }
}

#[tokio::test]
async fn new_users_start_idle() {
    let store = store_with_user(1).await;

    assert!(store.user_exists(1).await.unwrap());
    assert!(!store.user_exists(2).await.unwrap());
    assert_eq!(store.state(1).await.unwrap(), ConversationState::Idle);
}

#[tokio::test]
async fn state_survives_a_round_trip() {
    let store = store_with_user(1).await;
    let state = ConversationState::AwaitingBudgetAmount {
        tag: "Food".to_string(),
    };

    store.set_state(1, &state).await.unwrap();

    assert_eq!(store.state(1).await.unwrap(), state);
}

#[tokio::test]
async fn state_of_unknown_users_is_an_error() {
    let store = store_with_user(1).await;

    assert_eq!(
        store.set_state(7, &ConversationState::Idle).await,
        Err(EngineError::UnknownUser(7))
    );
    assert_eq!(store.state(7).await, Err(EngineError::UnknownUser(7)));
}

#[tokio::test]
async fn upserting_a_target_replaces_the_previous_one() {
    let store = store_with_user(1).await;

    store
        .upsert_target(1, "Food", Money::new(1000), march())
        .await
        .unwrap();
    store
        .upsert_target(1, "Food", Money::new(2500), march())
        .await
        .unwrap();
    store
        .upsert_target(1, "Bar", Money::new(300), march())
        .await
        .unwrap();

    let targets = store.targets(1, march()).await.unwrap();
    let view: Vec<(&str, Money)> = targets
        .iter()
        .map(|target| (target.tag.as_str(), target.amount))
        .collect();
    assert_eq!(view, [("Bar", Money::new(300)), ("Food", Money::new(2500))]);
    assert_eq!(targets[0].period, march());
}

#[tokio::test]
async fn targets_are_scoped_to_their_month() {
    let store = store_with_user(1).await;
    let april = Period::month_of(march().end, UTC);

    store
        .upsert_target(1, "Food", Money::new(1000), march())
        .await
        .unwrap();

    assert!(store.targets(1, april).await.unwrap().is_empty());
    assert_eq!(store.targets(1, march()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn money_events_are_filtered_by_a_half_open_period() {
    let store = store_with_user(1).await;
    let period = march();

    for event in [
        event("late", 1, period.start + Duration::days(20)),
        event("before", 2, period.start - Duration::seconds(1)),
        event("first", 3, period.start),
        event("next month", 4, period.end),
        event("last", 5, period.end - Duration::seconds(1)),
    ] {
        store.create_money_event(1, &event).await.unwrap();
    }

    let events = store.money_events(1, period).await.unwrap();

    let tags: Vec<&str> = events.iter().map(|event| event.tag.as_str()).collect();
    assert_eq!(tags, ["first", "late", "last"]);
    assert_eq!(events[0].amount, Money::new(3));
    assert_eq!(events[0].currency, Currency::Ars);
}

#[tokio::test]
async fn money_events_belong_to_their_user() {
    let store = store_with_user(1).await;
    store.create_user(2, "bob").await.unwrap();
    let inside = march().start + Duration::hours(1);

    store
        .create_money_event(2, &event("Food", 100, inside))
        .await
        .unwrap();

    assert!(store.money_events(1, march()).await.unwrap().is_empty());
    assert_eq!(store.money_events(2, march()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn tags_are_a_set() {
    let store = store_with_user(1).await;

    store.add_tag(1, "Food").await.unwrap();
    store.add_tag(1, "Food").await.unwrap();
    store.add_tag(1, "Bar").await.unwrap();

    let tags = store.tags(1).await.unwrap();
    assert_eq!(tags.iter().map(String::as_str).collect::<Vec<_>>(), ["Bar", "Food"]);

    store.remove_tag(1, "Food").await.unwrap();
    store.remove_tag(1, "Missing").await.unwrap();

    let tags = store.tags(1).await.unwrap();
    assert_eq!(tags.iter().map(String::as_str).collect::<Vec<_>>(), ["Bar"]);
}

#[tokio::test]
async fn visible_messages_are_listed_in_send_order_and_cleared() {
    let store = store_with_user(1).await;

    store.save_visible_message(1, "10").await.unwrap();
    store.save_visible_message(1, "11").await.unwrap();
    store.save_visible_message(2, "99").await.unwrap();

    assert_eq!(store.visible_messages(1).await.unwrap(), ["10", "11"]);

    store.clear_visible_messages(1).await.unwrap();

    assert!(store.visible_messages(1).await.unwrap().is_empty());
    assert_eq!(store.visible_messages(2).await.unwrap(), ["99"]);
}

#[tokio::test]
async fn usage_is_recorded_for_anyone() {
    let store = store_with_user(1).await;

    store.record_usage(1, "help").await.unwrap();
    store.record_usage(99, "start").await.unwrap();
}
