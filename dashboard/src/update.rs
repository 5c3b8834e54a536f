use std::sync::mpsc::{channel, Receiver, Sender};

pub type UpdateFn<I> = dyn FnOnce(&mut I) + Send;

/// A queued mutation of `I`, tagged with the handle of whoever sent it.
pub struct Update<I> {
    function: Box<UpdateFn<I>>,
    sender_handle: &'static str,
}

impl<I> Update<I> {
    pub fn sender_handle(&self) -> &'static str {
        self.sender_handle
    }
}

pub struct UpdateSender<I> {
    tx: Sender<Update<I>>,
    handle: &'static str,
}

impl<I> Clone for UpdateSender<I> {
    fn clone(&self) -> UpdateSender<I> {
        UpdateSender {
            tx: self.tx.clone(),
            handle: self.handle,
        }
    }
}

impl<I> UpdateSender<I> {
    pub fn clone_with_handle(&self, handle: &'static str) -> UpdateSender<I> {
        UpdateSender {
            tx: self.tx.clone(),
            handle,
        }
    }

    /// Queues `function` to run against the owner. Updates sent after the
    /// owner has shut down are dropped.
    pub fn update<F>(&self, function: F)
    where
        F: FnOnce(&mut I) + Send + 'static,
    {
        let update = Update {
            function: Box::new(function),
            sender_handle: self.handle,
        };
        let _ = self.tx.send(update);
    }
}

pub struct UpdateReceiver<I> {
    rx: Receiver<Update<I>>,
}

impl<I> UpdateReceiver<I> {
    /// Blocks until the next update, or `None` once every sender is gone.
    pub fn wait_update(&mut self) -> Option<Update<I>> {
        self.rx.recv().ok()
    }
}

pub fn process_update<I>(update: Update<I>, input: &mut I) {
    (update.function)(input);
}

pub fn update_channel<I>() -> (UpdateSender<I>, UpdateReceiver<I>) {
    let (tx, rx) = channel();
    (UpdateSender { tx, handle: "root" }, UpdateReceiver { rx })
}
