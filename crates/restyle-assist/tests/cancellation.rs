//! A cancelled or failed assist stream must leave the store untouched.

use futures::stream::{self, StreamExt};
use restyle_assist::{
    apply_outcome, collect_stream, decode_events, parse_suggestion, AbortHandle, Applied,
    AssistError, StreamEvent,
};
use restyle_store::{MemoryStorage, StoreOptions, StyleStore, Update};

fn store() -> StyleStore<MemoryStorage> {
    let mut store = StyleStore::open(MemoryStorage::new(), StoreOptions::default());
    store
        .update(Update::TailwindClasses("flex gap-2".into()))
        .unwrap();
    store
}

#[tokio::test]
async fn cancelled_mid_stream_applies_nothing() {
    let store = store();
    let history_before = store.history_len();

    // One delta arrives, then the relay goes quiet and the user cancels.
    let events = stream::iter(vec![Ok::<_, AssistError>(StreamEvent::Delta(
        "{\"tailwindClasses\": \"grid".to_string(),
    ))])
    .chain(stream::pending());

    let (handle, registration) = AbortHandle::new_pair();
    let mut received = String::new();
    let result = collect_stream(events, registration, |delta| {
        received.push_str(delta);
        handle.abort();
    })
    .await;

    assert!(matches!(result, Err(AssistError::Cancelled)));
    assert_eq!(received, "{\"tailwindClasses\": \"grid");
    assert_eq!(store.get().tailwind_classes, "flex gap-2");
    assert_eq!(store.history_len(), history_before);
}

#[tokio::test]
async fn broken_stream_applies_nothing() {
    let store = store();
    let events = stream::iter(vec![
        Ok(StreamEvent::Delta("{\"textContent\":".to_string())),
        Err(AssistError::Http {
            status: 502,
            body: "upstream closed".to_string(),
        }),
    ]);
    let (_handle, registration) = AbortHandle::new_pair();
    let err = collect_stream(events, registration, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, AssistError::Http { status: 502, .. }));
    assert_eq!(store.get().text_content, "Edit me");
}

#[tokio::test]
async fn completed_stream_applies_as_one_step() {
    let mut store = store();
    let history_before = store.history_len();

    let body: &[&[u8]] = &[
        b"data: {\"content\":\"```json\\n{\\\"tailwindClasses\\\":\"}\n\n",
        b"data: {\"content\":\"\\\"p-6 shadow-lg\\\",\\\"textContent\\\":\\\"Hello\\\"}\\n```\"}\n\n",
        b"data: [DONE]\n\n",
    ];
    let chunks = stream::iter(body.iter().map(|b| Ok::<_, AssistError>(*b)));
    let events = decode_events(chunks);

    let (_handle, registration) = AbortHandle::new_pair();
    let text = collect_stream(events, registration, |_| {}).await.unwrap();
    let applied = apply_outcome(&mut store, parse_suggestion(&text)).unwrap();

    assert!(matches!(applied, Applied::Updated { .. }));
    assert_eq!(store.get().tailwind_classes, "p-6 shadow-lg");
    assert_eq!(store.get().text_content, "Hello");
    assert_eq!(store.history_len(), history_before + 1);

    let events: Vec<_> = decode_events(stream::iter(vec![Ok::<_, AssistError>(
        b"data: [DONE]".as_slice(),
    )]))
    .collect()
    .await;
    assert_eq!(events.len(), 1);
}
