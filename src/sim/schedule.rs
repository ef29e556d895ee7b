//! Delayed actions on the simulated clock
//!
//! Replaces fire-and-forget timeouts: actions are queued with a due time and
//! drained in due order by the session tick. Clearing the queue cancels them.

/// Work that can be deferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SpawnTarget,
}

#[derive(Debug, Clone, PartialEq)]
struct Pending {
    due_ms: f64,
    /// Insertion counter, breaks ties between equal due times
    seq: u64,
    action: Action,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run at `due_ms`
    pub fn at(&mut self, due_ms: f64, action: Action) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms,
            seq,
            action,
        });
    }

    /// Remove and return every action due at or before `now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<Action> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now_ms {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
