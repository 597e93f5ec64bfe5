use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Documents, Filters, Find Options)
// =============================================================================

/// Trait that any record must implement to live in a [`CollectionActor`].
pub trait Document: Clone + Send + Sync + 'static {
    /// Primary key. Collections iterate in ascending `Id` order.
    type Id: Ord + Clone + Send + Sync + Display + Debug;
    type Insert: Send + Sync + Debug;
    type Update: Send + Sync + Debug;
    type Filter: Send + Sync + Debug;

    /// Collection name used in errors and log fields.
    const COLLECTION: &'static str;

    fn id(&self) -> &Self::Id;

    /// Build the stored document from a freshly generated id and the insert payload.
    fn from_insert(id: Self::Id, payload: Self::Insert) -> Self;

    /// Overwrite the fields carried by `update`. The id is never touched.
    fn apply_update(&mut self, update: Self::Update);

    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// Paging applied after filtering and the ascending-id sort.
///
/// A `limit` of zero means no cap, the same as a document store's `limit(0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub skip: usize,
    pub limit: usize,
}

impl FindOptions {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    fn cap(&self) -> usize {
        if self.limit == 0 {
            usize::MAX
        } else {
            self.limit
        }
    }
}

/// Failures raised by the collection itself, passed through unchanged by repositories.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("{collection} collection is not running")]
    Unavailable { collection: &'static str },
    #[error("{collection} collection dropped the request")]
    Dropped { collection: &'static str },
    #[error("duplicate id in {collection}: {id}")]
    DuplicateId { collection: &'static str, id: String },
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    Insert {
        payload: T::Insert,
        respond_to: Response<T>,
    },
    FindById {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        filter: T::Filter,
        options: FindOptions,
        respond_to: Response<Vec<T>>,
    },
    FindByIdAndUpdate {
        id: T::Id,
        update: T::Update,
        respond_to: Response<Option<T>>,
    },
    FindByIdAndDelete {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC COLLECTION ACTOR
// =============================================================================

pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    docs: BTreeMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Document> CollectionActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            docs: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = CollectionClient::new(sender);
        (actor, client)
    }

    /// Serve requests until every client handle has been dropped.
    #[instrument(name = "collection", skip_all, fields(collection = T::COLLECTION))]
    pub async fn run(mut self) {
        info!("Collection starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { payload, respond_to } => {
                    let _ = respond_to.send(self.insert(payload));
                }
                StoreRequest::FindById { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.docs.get(&id).cloned()));
                }
                StoreRequest::Find { filter, options, respond_to } => {
                    let _ = respond_to.send(Ok(self.find(&filter, options)));
                }
                StoreRequest::FindByIdAndUpdate { id, update, respond_to } => {
                    let updated = self.docs.get_mut(&id).map(|doc| {
                        doc.apply_update(update);
                        doc.clone()
                    });
                    debug!(%id, found = updated.is_some(), "Applied update");
                    let _ = respond_to.send(Ok(updated));
                }
                StoreRequest::FindByIdAndDelete { id, respond_to } => {
                    let removed = self.docs.remove(&id);
                    debug!(%id, found = removed.is_some(), "Applied delete");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }
        info!(documents = self.docs.len(), "Collection stopped");
    }

    fn insert(&mut self, payload: T::Insert) -> Result<T, StoreError> {
        let id = (self.next_id_fn)();
        if self.docs.contains_key(&id) {
            warn!(%id, "Id factory produced an id already in use");
            return Err(StoreError::DuplicateId {
                collection: T::COLLECTION,
                id: id.to_string(),
            });
        }
        let doc = T::from_insert(id, payload);
        debug!(id = %doc.id(), "Inserted document");
        self.docs.insert(doc.id().clone(), doc.clone());
        Ok(doc)
    }

    fn find(&self, filter: &T::Filter, options: FindOptions) -> Vec<T> {
        self.docs
            .values()
            .filter(|doc| doc.matches(filter))
            .skip(options.skip)
            .take(options.cap())
            .cloned()
            .collect()
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Unavailable { collection: T::COLLECTION })?;
        response
            .await
            .map_err(|_| StoreError::Dropped { collection: T::COLLECTION })?
    }

    pub async fn insert(&self, payload: T::Insert) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Insert { payload, respond_to }).await
    }

    pub async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindById { id, respond_to }).await
    }

    pub async fn find(&self, filter: T::Filter, options: FindOptions) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Find { filter, options, respond_to }).await
    }

    pub async fn find_by_id_and_update(&self, id: T::Id, update: T::Update) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindByIdAndUpdate { id, update, respond_to }).await
    }

    pub async fn find_by_id_and_delete(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindByIdAndDelete { id, respond_to }).await
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
        tag: Option<String>,
    }

    #[derive(Debug)]
    struct NoteInsert {
        text: String,
        tag: Option<String>,
    }

    #[derive(Debug, Default)]
    struct NoteUpdate {
        text: Option<String>,
    }

    #[derive(Debug, Default)]
    struct NoteFilter {
        tag: Option<String>,
    }

    impl Document for Note {
        type Id = String;
        type Insert = NoteInsert;
        type Update = NoteUpdate;
        type Filter = NoteFilter;

        const COLLECTION: &'static str = "notes";

        fn id(&self) -> &String {
            &self.id
        }

        fn from_insert(id: String, payload: NoteInsert) -> Self {
            Self {
                id,
                text: payload.text,
                tag: payload.tag,
            }
        }

        fn apply_update(&mut self, update: NoteUpdate) {
            if let Some(text) = update.text {
                self.text = text;
            }
        }

        fn matches(&self, filter: &NoteFilter) -> bool {
            filter.tag.is_none() || self.tag == filter.tag
        }
    }

    fn counter_ids() -> impl Fn() -> String + Send + Sync + 'static {
        let counter = Arc::new(AtomicU64::new(1));
        move || format!("note_{:04}", counter.fetch_add(1, Ordering::SeqCst))
    }

    fn spawn_notes() -> CollectionClient<Note> {
        let (actor, client) = CollectionActor::new(10, counter_ids());
        tokio::spawn(actor.run());
        client
    }

    fn note(text: &str, tag: Option<&str>) -> NoteInsert {
        NoteInsert {
            text: text.into(),
            tag: tag.map(Into::into),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find_by_id() {
        let client = spawn_notes();

        let inserted = client.insert(note("hello", None)).await.unwrap();
        assert_eq!(inserted.id, "note_0001");

        let found = client.find_by_id(inserted.id.clone()).await.unwrap();
        assert_eq!(found, Some(inserted));

        let missing = client.find_by_id("nope".to_string()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_filters_sorts_and_pages() {
        let client = spawn_notes();
        for i in 0..6 {
            let tag = if i % 2 == 0 { Some("even") } else { Some("odd") };
            client.insert(note(&format!("n{i}"), tag)).await.unwrap();
        }

        let evens = client
            .find(NoteFilter { tag: Some("even".into()) }, FindOptions::default())
            .await
            .unwrap();
        let ids: Vec<_> = evens.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["note_0001", "note_0003", "note_0005"]);

        let page = client.find(NoteFilter::default(), FindOptions::new(2, 3)).await.unwrap();
        let ids: Vec<_> = page.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["note_0003", "note_0004", "note_0005"]);

        let past_end = client.find(NoteFilter::default(), FindOptions::new(10, 3)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_ids() {
        let client = spawn_notes();
        let inserted = client.insert(note("draft", Some("t"))).await.unwrap();

        let updated = client
            .find_by_id_and_update(inserted.id.clone(), NoteUpdate { text: Some("final".into()) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "final");
        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.tag.as_deref(), Some("t"));

        let none = client
            .find_by_id_and_update("ghost".to_string(), NoteUpdate::default())
            .await
            .unwrap();
        assert!(none.is_none());

        let removed = client.find_by_id_and_delete(inserted.id.clone()).await.unwrap();
        assert_eq!(removed.map(|n| n.text), Some("final".to_string()));
        assert!(client.find_by_id(inserted.id.clone()).await.unwrap().is_none());
        assert!(client.find_by_id_and_delete(inserted.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let (actor, client) = CollectionActor::<Note>::new(10, || "fixed".to_string());
        tokio::spawn(actor.run());

        client.insert(note("first", None)).await.unwrap();
        let err = client.insert(note("second", None)).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateId { collection: "notes", id: "fixed".to_string() }
        );

        let all = client.find(NoteFilter::default(), FindOptions::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "first");
    }

    #[tokio::test]
    async fn test_stopped_collection_is_unavailable() {
        let (actor, client) = CollectionActor::<Note>::new(10, counter_ids());
        drop(actor);

        let err = client.find_by_id("note_0001".to_string()).await.unwrap_err();
        assert_eq!(err, StoreError::Unavailable { collection: "notes" });
    }
}
