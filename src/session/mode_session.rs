use std::collections::VecDeque;

use rand::Rng;

use crate::catalog::{VerbCatalog, VerbRecord};
use crate::engine::shuffle::shuffle;

/// Per-mode drill state: the remaining draw order for the current round and
/// the running score. Queue entries are catalog indices; the front is the
/// verb currently shown.
#[derive(Clone, Debug)]
pub struct ModeSession {
    queue: VecDeque<usize>,
    score: u32,
    cycles_completed: u32,
}

fn fresh_queue<R: Rng + ?Sized>(catalog: &VerbCatalog, rng: &mut R) -> VecDeque<usize> {
    let order: Vec<usize> = (0..catalog.len()).collect();
    shuffle(&order, rng).into()
}

impl ModeSession {
    pub fn new<R: Rng + ?Sized>(catalog: &VerbCatalog, rng: &mut R) -> Self {
        Self {
            queue: fresh_queue(catalog, rng),
            score: 0,
            cycles_completed: 0,
        }
    }

    pub fn ensure_non_empty<R: Rng + ?Sized>(&mut self, catalog: &VerbCatalog, rng: &mut R) {
        if self.queue.is_empty() {
            self.queue = fresh_queue(catalog, rng);
        }
    }

    pub fn peek_current<'c, R: Rng + ?Sized>(
        &mut self,
        catalog: &'c VerbCatalog,
        rng: &mut R,
    ) -> &'c VerbRecord {
        self.ensure_non_empty(catalog, rng);
        &catalog[self.queue[0]]
    }

    /// Front of the queue without refilling. `None` only if the queue is empty.
    pub fn current<'c>(&self, catalog: &'c VerbCatalog) -> Option<&'c VerbRecord> {
        self.queue.front().map(|&i| &catalog[i])
    }

    /// Drops the answered verb. An exhausted queue is reshuffled right away so
    /// the next verb is always available.
    pub fn advance<R: Rng + ?Sized>(&mut self, catalog: &VerbCatalog, rng: &mut R) {
        self.queue.pop_front();
        if self.queue.is_empty() {
            self.queue = fresh_queue(catalog, rng);
            self.cycles_completed += 1;
        }
    }

    pub fn increment_score(&mut self) {
        self.score += 1;
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, catalog: &VerbCatalog, rng: &mut R) {
        self.score = 0;
        self.cycles_completed = 0;
        self.queue = fresh_queue(catalog, rng);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Completed rounds through the whole catalog since creation or reset.
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Share of the catalog already answered in this round, 0.0..=100.0.
    pub fn percent_complete(&self, catalog_len: usize) -> f64 {
        if catalog_len == 0 {
            return 0.0;
        }
        let done = catalog_len.saturating_sub(self.queue.len());
        done as f64 / catalog_len as f64 * 100.0
    }
}
