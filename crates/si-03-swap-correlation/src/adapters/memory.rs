use std::collections::{HashMap, VecDeque};

use crate::domain::{PendingInput, PendingKey};
use crate::ports::PendingInputStore;

/// Hash map of per-key queues.
#[derive(Debug, Default)]
pub struct InMemoryPendingInputs {
    entries: HashMap<PendingKey, VecDeque<PendingInput>>,
    len: usize,
}

impl InMemoryPendingInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys with at least one entry.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}

impl PendingInputStore for InMemoryPendingInputs {
    fn replace(&mut self, key: PendingKey, input: PendingInput) -> Vec<PendingInput> {
        let mut queue = VecDeque::with_capacity(1);
        queue.push_back(input);
        let displaced: Vec<PendingInput> = self
            .entries
            .insert(key, queue)
            .map(Vec::from)
            .unwrap_or_default();
        self.len = self.len + 1 - displaced.len();
        displaced
    }

    fn push_back(&mut self, key: PendingKey, input: PendingInput) {
        self.entries.entry(key).or_default().push_back(input);
        self.len += 1;
    }

    fn push_front(&mut self, key: PendingKey, input: PendingInput) {
        self.entries.entry(key).or_default().push_front(input);
        self.len += 1;
    }

    fn contains(&self, key: &PendingKey) -> bool {
        self.entries.contains_key(key)
    }

    fn pop_oldest(&mut self, key: &PendingKey) -> Option<PendingInput> {
        let queue = self.entries.get_mut(key)?;
        let input = queue.pop_front();
        if queue.is_empty() {
            self.entries.remove(key);
        }
        if input.is_some() {
            self.len -= 1;
        }
        input
    }

    fn pop_newest(&mut self, key: &PendingKey) -> Option<PendingInput> {
        let queue = self.entries.get_mut(key)?;
        let input = queue.pop_back();
        if queue.is_empty() {
            self.entries.remove(key);
        }
        if input.is_some() {
            self.len -= 1;
        }
        input
    }

    fn retain(
        &mut self,
        keep: &mut dyn FnMut(&PendingKey, &PendingInput) -> bool,
    ) -> Vec<(PendingKey, PendingInput)> {
        let mut removed = Vec::new();
        self.entries.retain(|key, queue| {
            let mut kept = VecDeque::with_capacity(queue.len());
            for input in queue.drain(..) {
                if keep(key, &input) {
                    kept.push_back(input);
                } else {
                    removed.push((*key, input));
                }
            }
            *queue = kept;
            !queue.is_empty()
        });
        self.len -= removed.len();
        removed
    }

    fn sequences(&self) -> Vec<u64> {
        self.entries
            .values()
            .flat_map(|queue| queue.iter().map(|input| input.seq))
            .collect()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }
}
