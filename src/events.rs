//! Change notification for [`crate::flow_network::FlowNetwork`].
//!
//! Realizes the "shared-observable" re-architecture: rather than the
//! ambient observer idiom a GUI toolkit provides for free, callers register
//! a plain closure and get called back, once per mutation or algorithm run,
//! with a snapshot of what changed.

/// Describes what a `FlowNetwork` mutation or algorithm run changed, so a
/// subscriber can decide whether to recompute a layout or just repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeEvent {
    /// The graph's vertex/edge set or an edge's capacity changed.
    pub update_graph: bool,
    /// Only flow/excess/label values changed; topology did not.
    pub draw_graph: bool,
}

/// Handle returned by `subscribe`, used to `unsubscribe` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Box<dyn Fn(ChangeEvent)>)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl Fn(ChangeEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns `true` if `id` was registered (and is now removed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub fn notify(&self, event: ChangeEvent) {
        for (_, callback) in &self.callbacks {
            callback(event);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
