use std::collections::HashMap;

use rand::Rng;

use crate::catalog::{ModeId, VerbCatalog};
use crate::session::mode_session::ModeSession;

/// One `ModeSession` per mode that has ever been active.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<ModeId, ModeSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create<R: Rng + ?Sized>(
        &mut self,
        mode: &ModeId,
        catalog: &VerbCatalog,
        rng: &mut R,
    ) -> &mut ModeSession {
        self.sessions.entry(mode.clone()).or_insert_with(|| {
            log::debug!("starting session for mode '{mode}'");
            ModeSession::new(catalog, rng)
        })
    }

    pub fn get(&self, mode: &ModeId) -> Option<&ModeSession> {
        self.sessions.get(mode)
    }

    pub fn get_mut(&mut self, mode: &ModeId) -> Option<&mut ModeSession> {
        self.sessions.get_mut(mode)
    }

    pub fn contains(&self, mode: &ModeId) -> bool {
        self.sessions.contains_key(mode)
    }

    pub fn visited(&self) -> usize {
        self.sessions.len()
    }
}
