use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

pub type Callback<T> = Rc<dyn Fn(&T)>;
pub type SubscriptionId = u64;

/// Sending half of a channel. Cheap to clone; all clones share listeners.
pub struct EventEmitter<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Subscribing half of a channel.
pub struct EventObserver<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Handle returned by `subscribe`; dropping it does NOT unsubscribe, call
/// `unsubscribe()` explicitly (usually from `Destroyable::destroy`).
pub struct Unsubscriber<T: std::fmt::Debug> {
    channel: Channel<T>,
    id: SubscriptionId,
}

impl<T: std::fmt::Debug> Unsubscriber<T> {
    pub fn unsubscribe(self) -> bool {
        self.channel.unsubscribe(self.id)
    }
}

pub struct Channel<T: std::fmt::Debug> {
    listeners: Rc<RefCell<HashMap<SubscriptionId, Callback<T>>>>,
    next_id: Rc<RefCell<SubscriptionId>>,
}

impl<T: std::fmt::Debug> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl<T: std::fmt::Debug> Channel<T> {
    pub fn new() -> (EventEmitter<T>, EventObserver<T>) {
        let channel = Channel {
            listeners: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(RefCell::new(0)),
        };
        (
            EventEmitter {
                channel: channel.clone(),
            },
            EventObserver { channel },
        )
    }

    fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        let id = {
            let mut next_id = self.next_id.borrow_mut();
            let id = *next_id;
            *next_id += 1;
            id
        };
        self.listeners.borrow_mut().insert(id, Rc::new(callback));
        Unsubscriber {
            channel: self.clone(),
            id,
        }
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    fn emit(&self, data: &T) {
        // snapshot the callbacks so a listener may subscribe or unsubscribe
        // while we iterate
        let callbacks: Vec<Callback<T>> = self.listeners.borrow().values().cloned().collect();
        trace!(target: "events", "Emitting event to {} listeners: {:?}", callbacks.len(), data);
        for callback in callbacks {
            callback(data);
        }
    }
}

impl<T: std::fmt::Debug> EventEmitter<T> {
    pub fn emit(&self, data: &T) {
        self.channel.emit(data);
    }
}

impl<T: std::fmt::Debug> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        self.channel.subscribe(callback)
    }
}
