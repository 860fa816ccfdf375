//! Topic-based pub/sub channel between a viewer and its widgets.
//!
//! The bus is an explicit collaborator passed to whoever needs it, not a
//! process-wide singleton, so tests can run a private one per scenario.

use log::debug;

use crate::viewer::ViewerSnapshot;

/// Notification topics a viewer publishes about its pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Navigated to the first page of the document.
    FirstPage,
    /// The current page changed (any navigation, including scrolling).
    PageChanging,
    /// The document's page-label table changed.
    PageLabels,
}

impl Topic {
    pub fn all() -> &'static [Topic] {
        &[Topic::FirstPage, Topic::PageChanging, Topic::PageLabels]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::FirstPage => "firstpage",
            Topic::PageChanging => "pagechanging",
            Topic::PageLabels => "pagelabels",
        }
    }
}

pub type Handler = Box<dyn FnMut(&ViewerSnapshot)>;

/// Token returned by `subscribe`, required to release the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`. Handlers on the same topic run in
    /// registration order.
    pub fn subscribe(&mut self, topic: Topic, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, topic, handler });
        debug!("bus: subscribed {id:?} to {}", topic.as_str());
        id
    }

    /// Closure-friendly wrapper around `subscribe`.
    pub fn on<F>(&mut self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: FnMut(&ViewerSnapshot) + 'static,
    {
        self.subscribe(topic, Box::new(handler))
    }

    /// Remove one subscription. Returns false if the id is unknown, which is
    /// fine to ignore on teardown paths.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|sub| sub.id != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!("bus: unsubscribed {id:?}");
        }
        removed
    }

    /// Synchronously invoke every handler subscribed to `topic`. Handlers
    /// run to completion one after another on the caller's thread.
    pub fn emit(&mut self, topic: Topic, snapshot: &ViewerSnapshot) {
        debug!(
            "bus: emit {} (page {}/{})",
            topic.as_str(),
            snapshot.current_page_number,
            snapshot.pages_count
        );
        for sub in &mut self.subscribers {
            if sub.topic == topic {
                (sub.handler)(snapshot);
            }
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscribers.iter().filter(|s| s.topic == topic).count()
    }
}
