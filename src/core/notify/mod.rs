//=========================================================================
// Notification Bus
//=========================================================================
//
// Synchronous observer channels for session changes.
//
// Architecture:
//   Session ──publish(n)──> NotificationBus ──> subscriber 1
//                                          ├──> subscriber 2
//                                          └──> ...
//
// Subscribers are called in subscription order, on the publishing
// thread, before `publish` returns. A panicking subscriber is contained
// and logged; delivery continues with the next one.
//
// Unlike the MessageBus, nothing is queued: a notification exists only
// for the duration of its `publish` call.
//
//=========================================================================

//=== Module Declarations =================================================

mod notification;

//=== Public API ==========================================================

pub use notification::{Notification, NotificationKind};

//=== External Dependencies ===============================================

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::{error, trace};

//=== SubscriptionId ======================================================

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

//=== Subscriber ==========================================================

type Callback = Box<dyn FnMut(&Notification) + Send>;

struct Subscriber {
    id: SubscriptionId,

    /// `None` receives every channel.
    kind: Option<NotificationKind>,

    callback: Callback,
}

impl Subscriber {
    fn wants(&self, kind: NotificationKind) -> bool {
        self.kind.map_or(true, |k| k == kind)
    }
}

//=== NotificationBus =====================================================

/// Typed, synchronous fan-out of [`Notification`]s.
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use aetheric_arcade::core::notify::{Notification, NotificationBus, NotificationKind};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let mut bus = NotificationBus::new();
/// bus.subscribe(NotificationKind::ScoreChanged, move |n| {
///     sink.lock().unwrap().push(*n);
/// });
///
/// bus.publish(Notification::ScoreChanged(100));
/// bus.publish(Notification::LivesChanged(2)); // not subscribed
///
/// assert_eq!(*seen.lock().unwrap(), vec![Notification::ScoreChanged(100)]);
/// ```
pub struct NotificationBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Subscribes `callback` to a single channel.
    pub fn subscribe<F>(&mut self, kind: NotificationKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        self.insert(Some(kind), Box::new(callback))
    }

    /// Subscribes `callback` to every channel.
    pub fn subscribe_all<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        self.insert(None, Box::new(callback))
    }

    /// Removes a subscriber. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Drops every subscriber.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    /// Number of subscribers that would receive a notification of `kind`.
    pub fn subscriber_count(&self, kind: NotificationKind) -> usize {
        self.subscribers.iter().filter(|s| s.wants(kind)).count()
    }

    //--- Delivery ---------------------------------------------------------

    /// Delivers `notification` to every interested subscriber.
    ///
    /// Returns the number of subscribers that completed without panicking.
    pub fn publish(&mut self, notification: Notification) -> usize {
        let kind = notification.kind();
        let mut delivered = 0;

        trace!(target: "session", "Publishing {:?}", notification);

        for subscriber in self.subscribers.iter_mut().filter(|s| s.wants(kind)) {
            let callback = &mut subscriber.callback;
            match catch_unwind(AssertUnwindSafe(|| callback(&notification))) {
                Ok(()) => delivered += 1,
                Err(_) => error!(
                    target: "session",
                    "Subscriber {:?} panicked while handling {:?}",
                    subscriber.id,
                    notification
                ),
            }
        }

        delivered
    }

    //--- Internal Helpers -------------------------------------------------

    fn insert(&mut self, kind: Option<NotificationKind>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, kind, callback });
        id
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<Notification>>>, impl FnMut(&Notification) + Send) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |n: &Notification| sink.lock().unwrap().push(*n))
    }

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = NotificationBus::new();
        for kind in NotificationKind::ALL {
            assert_eq!(bus.subscriber_count(kind), 0);
        }
    }

    #[test]
    fn publish_without_subscribers_delivers_nothing() {
        let mut bus = NotificationBus::new();
        assert_eq!(bus.publish(Notification::GameOver), 0);
    }

    #[test]
    fn subscriber_only_sees_its_channel() {
        let mut bus = NotificationBus::new();
        let (log, callback) = recorder();
        bus.subscribe(NotificationKind::LivesChanged, callback);

        bus.publish(Notification::ScoreChanged(10));
        bus.publish(Notification::LivesChanged(2));
        bus.publish(Notification::GameOver);

        assert_eq!(*log.lock().unwrap(), vec![Notification::LivesChanged(2)]);
    }

    #[test]
    fn subscribe_all_sees_everything_in_order() {
        let mut bus = NotificationBus::new();
        let (log, callback) = recorder();
        bus.subscribe_all(callback);

        bus.publish(Notification::LivesChanged(0));
        bus.publish(Notification::StateChanged(crate::core::session::SessionState::GameOver));
        bus.publish(Notification::GameOver);

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0], Notification::LivesChanged(0));
        assert_eq!(log[2], Notification::GameOver);
    }

    #[test]
    fn subscribers_called_in_subscription_order() {
        let mut bus = NotificationBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.subscribe(NotificationKind::GameOver, move |_| {
                order.lock().unwrap().push(tag);
            });
        }

        bus.publish(Notification::GameOver);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn panicking_subscriber_does_not_block_others() {
        let mut bus = NotificationBus::new();
        let (before_log, before) = recorder();
        let (after_log, after) = recorder();

        bus.subscribe(NotificationKind::ScoreChanged, before);
        bus.subscribe(NotificationKind::ScoreChanged, |_| panic!("broken score label"));
        bus.subscribe(NotificationKind::ScoreChanged, after);

        let delivered = bus.publish(Notification::ScoreChanged(300));

        assert_eq!(delivered, 2);
        assert_eq!(before_log.lock().unwrap().len(), 1);
        assert_eq!(after_log.lock().unwrap().len(), 1);

        // The broken subscriber stays attached and is isolated again.
        assert_eq!(bus.publish(Notification::ScoreChanged(400)), 2);
        assert_eq!(after_log.lock().unwrap().len(), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut bus = NotificationBus::new();
        let (log, callback) = recorder();
        let id = bus.subscribe(NotificationKind::TimeChanged, callback);

        bus.publish(Notification::TimeChanged(10.0));
        assert!(bus.unsubscribe(id));
        bus.publish(Notification::TimeChanged(9.0));

        assert_eq!(log.lock().unwrap().len(), 1);
        assert!(!bus.unsubscribe(id), "second unsubscribe is a no-op");
    }

    #[test]
    fn subscriber_count_includes_wildcards() {
        let mut bus = NotificationBus::new();
        bus.subscribe(NotificationKind::GameOver, |_| {});
        bus.subscribe_all(|_| {});

        assert_eq!(bus.subscriber_count(NotificationKind::GameOver), 2);
        assert_eq!(bus.subscriber_count(NotificationKind::ScoreChanged), 1);

        bus.clear();
        assert_eq!(bus.subscriber_count(NotificationKind::GameOver), 0);
    }
}
