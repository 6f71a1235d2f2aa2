// ABOUTME: Outbound tab events and the observer registry that delivers them.
// ABOUTME: Handlers run synchronously, in registration order, inside the triggering call.

use std::fmt;

/// Display property of a tab, for data-binding observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabProperty {
    Title,
    IconPath,
}

impl TabProperty {
    pub fn name(&self) -> &'static str {
        match self {
            TabProperty::Title => "Title",
            TabProperty::IconPath => "IconPath",
        }
    }
}

impl fmt::Display for TabProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    /// The last pane closed; the tab must be torn down by its owner
    Closed,
    /// A different pane became active; re-query the accessors
    ActivePaneChanged,
    PropertyChanged(TabProperty),
}

/// Token returned by `Tab::subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&TabEvent)>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, handler: impl FnMut(&TabEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub(crate) fn emit(&mut self, event: TabEvent) {
        tracing::trace!("Tab event {:?} to {} observers", event, self.handlers.len());
        for (_, handler) in &mut self.handlers {
            handler(&event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.handlers.len())
            .finish()
    }
}
