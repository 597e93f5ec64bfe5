//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_insert`] or [`expect_find`] to assert on the
//! request and answer it through the returned responder.

use crate::store::{CollectionClient, Document, FindOptions, Response, StoreRequest};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// No [`crate::store::CollectionActor`] runs behind the client: the test plays
/// the collection by reading requests off `receiver` and answering them, which
/// makes success, failure and missing-document paths deterministic.
pub fn create_mock_client<T: Document>(buffer_size: usize) -> (CollectionClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: Document>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Insert, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindById request
pub async fn expect_find_by_id<T: Document>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindById { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Find request
pub async fn expect_find<T: Document>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Filter, FindOptions, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Find { filter, options, respond_to }) => Some((filter, options, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindByIdAndUpdate request
pub async fn expect_update<T: Document>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Id, T::Update, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindByIdAndUpdate { id, update, respond_to }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindByIdAndDelete request
pub async fn expect_delete<T: Document>(receiver: &mut mpsc::Receiver<StoreRequest<T>>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindByIdAndDelete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let insert_task = tokio::spawn(async move {
            client.insert(ProductCreate::new("Widget", 3.5)).await
        });

        let (payload, responder) = expect_insert(&mut receiver).await.expect("Expected Insert request");
        assert_eq!(payload.name, "Widget");
        responder.send(Ok(Product::new("product_1", payload.name, payload.price))).unwrap();

        let result = insert_task.await.unwrap();
        assert_eq!(result, Ok(Product::new("product_1", "Widget", 3.5)));
    }
}
