use derive_more::Display;
use std::collections::BTreeMap;
use std::fmt;

/// Callback run once a batch and all of its animations are done.
pub type Completion = Box<dyn FnOnce() + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct TransactionId(u64);

struct Pending {
    outstanding: usize,
    open: bool,
    completion: Option<Completion>,
}

impl fmt::Debug for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("outstanding", &self.outstanding)
            .field("open", &self.open)
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

/// Groups animations into batches that report one completion each.
///
/// A batch is opened with [`begin`](Self::begin) and closed with
/// [`commit`](Self::commit). Every animation started while it is open is
/// [`enlist`](Self::enlist)ed and later [`release`](Self::release)d, however
/// it ends. A closed batch with nothing outstanding is resolved and its
/// completion is handed out by [`take_resolved`](Self::take_resolved).
#[derive(Debug, Default)]
pub struct Transactions {
    next_id: u64,
    open: Vec<TransactionId>,
    pending: BTreeMap<TransactionId, Pending>,
}

impl Transactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, completion: Option<Completion>) -> TransactionId {
        let id = TransactionId(self.next_id);
        self.next_id += 1;
        self.open.push(id);
        self.pending.insert(
            id,
            Pending {
                outstanding: 0,
                open: true,
                completion,
            },
        );
        id
    }

    /// Closes the innermost open batch. Batches must be committed in the
    /// reverse order they were begun.
    pub fn commit(&mut self, id: TransactionId) {
        let innermost = self.open.pop();
        assert_eq!(innermost, Some(id), "transaction {id} committed out of order");
        if let Some(pending) = self.pending.get_mut(&id) {
            pending.open = false;
        }
    }

    pub fn is_grouping(&self) -> bool {
        !self.open.is_empty()
    }

    /// Registers one animation with every open batch and returns their ids.
    pub fn enlist(&mut self) -> Vec<TransactionId> {
        for id in &self.open {
            if let Some(pending) = self.pending.get_mut(id) {
                pending.outstanding += 1;
            }
        }
        self.open.clone()
    }

    /// Marks one animation of each listed batch as ended.
    pub fn release(&mut self, ids: &[TransactionId]) {
        for id in ids {
            if let Some(pending) = self.pending.get_mut(id) {
                pending.outstanding = pending.outstanding.saturating_sub(1);
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes every resolved batch and returns their completions, oldest
    /// batch first.
    pub fn take_resolved(&mut self) -> Vec<Completion> {
        let resolved: Vec<TransactionId> = self
            .pending
            .iter()
            .filter(|(_, p)| !p.open && p.outstanding == 0)
            .map(|(id, _)| *id)
            .collect();

        resolved
            .into_iter()
            .filter_map(|id| self.pending.remove(&id))
            .filter_map(|p| p.completion)
            .collect()
    }
}
