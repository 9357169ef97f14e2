use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Change notification handle for a [`Property`].
pub struct PropertySubscriber {
    receiver: broadcast::Receiver<()>,
}

// PropertySubscriber intentionally does not implement Clone.
// To get multiple subscribers, call Property::subscribe() multiple times.

impl PropertySubscriber {
    pub async fn wait_for_change(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(_) => return true,
                // If we lagged behind, skip to the latest and keep waiting
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                // Channel closed: no more updates
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }

    pub fn try_recv(&mut self) -> bool {
        match self.receiver.try_recv() {
            Ok(_) => true,
            Err(broadcast::error::TryRecvError::Empty) => false,
            // Consider lag as a change signal; the next recv() will align
            Err(broadcast::error::TryRecvError::Lagged(_)) => true,
            Err(broadcast::error::TryRecvError::Closed) => false,
        }
    }
}

/// Observable value read by the render layer.
///
/// The event loop is the only writer; readers either sample the latest value
/// or await a change notification.
pub struct Property<T: Clone + Send + Sync> {
    watch_sender: Arc<watch::Sender<T>>,
    watch_receiver: watch::Receiver<T>,
    broadcast_sender: broadcast::Sender<()>,
    name: String,
}

impl<T: Clone + Send + Sync> Property<T> {
    pub fn new(initial_value: T, name: impl Into<String>) -> Self {
        let (watch_sender, watch_receiver) = watch::channel(initial_value);
        let (broadcast_sender, _) = broadcast::channel(100);
        Self {
            watch_sender: Arc::new(watch_sender),
            watch_receiver,
            broadcast_sender,
            name: name.into(),
        }
    }

    pub fn get(&self) -> T {
        self.watch_receiver.borrow().clone()
    }

    pub fn set(&self, new_value: T) {
        let _ = self.watch_sender.send(new_value);
        let _ = self.broadcast_sender.send(());
    }

    /// Replace the value only when it differs, so subscribers are not woken
    /// for no-op dispatches.
    pub fn set_if_changed(&self, new_value: T) -> bool
    where
        T: PartialEq,
    {
        if *self.watch_receiver.borrow() == new_value {
            return false;
        }
        self.set(new_value);
        true
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        PropertySubscriber {
            receiver: self.broadcast_sender.subscribe(),
        }
    }
}

impl<T: Clone + Send + Sync> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            watch_sender: self.watch_sender.clone(),
            watch_receiver: self.watch_receiver.clone(),
            broadcast_sender: self.broadcast_sender.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + Debug> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({})", self.name)
    }
}
