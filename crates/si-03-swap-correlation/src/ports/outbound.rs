use crate::domain::{PendingInput, PendingKey};

/// Storage for pending inbound legs.
///
/// Each key holds a queue ordered oldest first. Last-write-wins keeps at most
/// one entry per key by always going through [`PendingInputStore::replace`].
pub trait PendingInputStore: Send {
    /// Replace everything under `key` with `input`, returning what was there.
    fn replace(&mut self, key: PendingKey, input: PendingInput) -> Vec<PendingInput>;

    /// Append `input` behind any entries already under `key`.
    fn push_back(&mut self, key: PendingKey, input: PendingInput);

    /// Put `input` back at the head of `key`'s queue.
    fn push_front(&mut self, key: PendingKey, input: PendingInput);

    /// Whether any entry is held under `key`.
    fn contains(&self, key: &PendingKey) -> bool;

    /// Remove and return the oldest entry under `key`.
    fn pop_oldest(&mut self, key: &PendingKey) -> Option<PendingInput>;

    /// Remove and return the newest entry under `key`.
    fn pop_newest(&mut self, key: &PendingKey) -> Option<PendingInput>;

    /// Drop every entry for which `keep` returns false, returning the dropped ones.
    fn retain(
        &mut self,
        keep: &mut dyn FnMut(&PendingKey, &PendingInput) -> bool,
    ) -> Vec<(PendingKey, PendingInput)>;

    /// Arrival sequences of all entries, in no particular order.
    fn sequences(&self) -> Vec<u64>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}
