use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::SmallRng;

use crate::catalog::{ModeId, ModeSpec, ModeTable, VerbCatalog, VerbRecord};
use crate::engine::validator::{Verdict, check_answer};
use crate::error::{CatalogError, DrillError};
use crate::session::mode_session::ModeSession;
use crate::session::registry::SessionRegistry;

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    PromptForInput,
    Correct,
    Incorrect,
    ResetNotice,
}

/// Notifications for the presentation layer. One-way; nothing is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum DrillEvent {
    /// Dictionary form of the verb to conjugate.
    Display(String),
    Feedback(Feedback),
    /// Clear feedback text and the answer input.
    ClearPrompt,
    Score(u32),
    /// Round progress in percent.
    Progress(f64),
    Mode(ModeId),
    LoadFailed(String),
}

pub trait PresentationSink {
    fn emit(&mut self, event: DrillEvent);
}

impl PresentationSink for Vec<DrillEvent> {
    fn emit(&mut self, event: DrillEvent) {
        self.push(event);
    }
}

/// Yes/no gate consulted before a reset.
pub trait ConfirmReset {
    fn confirm_reset(&mut self) -> bool;
}

impl<F: FnMut() -> bool> ConfirmReset for F {
    fn confirm_reset(&mut self) -> bool {
        self()
    }
}

/// An answer the user already gave to the confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Confirmation(pub bool);

impl ConfirmReset for Confirmation {
    fn confirm_reset(&mut self) -> bool {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed(String),
}

/// Orchestrates catalog, sessions and validation in response to user
/// triggers. Each call runs to completion; the only deferred work is the
/// advance to the next verb after a correct answer, fired from `tick`.
pub struct DrillController<R: Rng = SmallRng> {
    phase: Phase,
    modes: ModeTable,
    catalog: Option<VerbCatalog>,
    registry: SessionRegistry,
    active_mode: ModeId,
    rng: R,
    advance_delay: Duration,
    // Due time of the scheduled advance. Cleared by mode switches and resets.
    pending_advance: Option<Instant>,
}

impl<R: Rng> DrillController<R> {
    pub fn new(modes: ModeTable, rng: R) -> Self {
        let active_mode = modes.default_mode().clone();
        Self {
            phase: Phase::Loading,
            modes,
            catalog: None,
            registry: SessionRegistry::new(),
            active_mode,
            rng,
            advance_delay: DEFAULT_ADVANCE_DELAY,
            pending_advance: None,
        }
    }

    /// Mode shown once loading completes. Unknown ids keep the table default.
    pub fn with_initial_mode(mut self, mode: &ModeId) -> Self {
        if self.modes.contains(mode) {
            self.active_mode = mode.clone();
        } else {
            log::warn!(
                "unknown initial mode '{mode}', using '{}'",
                self.modes.default_mode()
            );
        }
        self
    }

    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    pub fn on_load_complete(&mut self, catalog: VerbCatalog, sink: &mut impl PresentationSink) {
        if self.phase != Phase::Loading {
            log::warn!("ignoring catalog delivered in phase {:?}", self.phase);
            return;
        }
        log::info!(
            "drill ready: {} verbs, {} modes, starting in '{}'",
            catalog.len(),
            self.modes.len(),
            self.active_mode
        );
        self.registry
            .get_or_create(&self.active_mode, &catalog, &mut self.rng);
        self.catalog = Some(catalog);
        self.phase = Phase::Ready;
        self.emit_snapshot(sink);
    }

    pub fn on_load_failed(&mut self, error: &CatalogError, sink: &mut impl PresentationSink) {
        if self.phase != Phase::Loading {
            log::warn!("ignoring load failure in phase {:?}: {error}", self.phase);
            return;
        }
        log::error!("drill halted: {error}");
        let message = error.to_string();
        self.phase = Phase::Failed(message.clone());
        sink.emit(DrillEvent::LoadFailed(message));
    }

    pub fn on_submit_answer(
        &mut self,
        raw: &str,
        now: Instant,
        sink: &mut impl PresentationSink,
    ) -> Result<Verdict, DrillError> {
        self.require_ready()?;
        if self.pending_advance.is_some() {
            return Err(DrillError::AdvancePending);
        }

        let verdict = {
            let Self {
                modes,
                catalog,
                registry,
                active_mode,
                rng,
                ..
            } = self;
            let catalog = catalog.as_ref().ok_or(DrillError::NotReady)?;
            let spec = modes
                .get(active_mode)
                .ok_or_else(|| DrillError::UnknownMode(active_mode.clone()))?;
            let session = registry.get_or_create(active_mode, catalog, rng);
            let verb = session.peek_current(catalog, rng);
            let verdict = check_answer(spec, verb, raw);

            match verdict {
                Verdict::Empty => sink.emit(DrillEvent::Feedback(Feedback::PromptForInput)),
                Verdict::Incorrect => {
                    log::debug!("'{}' rejected for {} ({active_mode})", raw.trim(), verb.dictionary_form);
                    sink.emit(DrillEvent::Feedback(Feedback::Incorrect));
                }
                Verdict::Correct => {
                    log::debug!("'{}' accepted for {} ({active_mode})", raw.trim(), verb.dictionary_form);
                    session.increment_score();
                    sink.emit(DrillEvent::Feedback(Feedback::Correct));
                    sink.emit(DrillEvent::Score(session.score()));
                    session.advance(catalog, rng);
                    sink.emit(DrillEvent::Progress(session.percent_complete(catalog.len())));
                }
            }
            verdict
        };

        if verdict == Verdict::Correct {
            self.pending_advance = Some(now + self.advance_delay);
        }
        Ok(verdict)
    }

    /// Fires the scheduled advance once it is due. Returns whether it fired.
    pub fn tick(&mut self, now: Instant, sink: &mut impl PresentationSink) -> bool {
        match self.pending_advance {
            Some(due) if now >= due => {
                self.pending_advance = None;
                if let Some(verb) = self.current_verb() {
                    sink.emit(DrillEvent::Display(verb.dictionary_form.clone()));
                }
                sink.emit(DrillEvent::ClearPrompt);
                sink.emit(DrillEvent::Progress(self.percent_complete()));
                true
            }
            _ => false,
        }
    }

    pub fn on_switch_mode(
        &mut self,
        mode: &ModeId,
        sink: &mut impl PresentationSink,
    ) -> Result<(), DrillError> {
        self.require_ready()?;
        if !self.modes.contains(mode) {
            log::error!("switch to unknown mode '{mode}'");
            return Err(DrillError::UnknownMode(mode.clone()));
        }

        let Self {
            catalog,
            registry,
            rng,
            ..
        } = self;
        let catalog = catalog.as_ref().ok_or(DrillError::NotReady)?;
        registry
            .get_or_create(mode, catalog, rng)
            .ensure_non_empty(catalog, rng);

        self.cancel_pending_advance();
        log::debug!("mode '{}' -> '{mode}'", self.active_mode);
        self.active_mode = mode.clone();
        self.emit_snapshot(sink);
        Ok(())
    }

    /// Restarts the active mode's score and round if `confirm` agrees.
    /// Returns whether the reset happened.
    pub fn on_reset(
        &mut self,
        confirm: &mut impl ConfirmReset,
        sink: &mut impl PresentationSink,
    ) -> Result<bool, DrillError> {
        self.require_ready()?;
        if !confirm.confirm_reset() {
            log::debug!("reset of '{}' declined", self.active_mode);
            return Ok(false);
        }

        let Self {
            catalog,
            registry,
            active_mode,
            rng,
            ..
        } = self;
        let catalog = catalog.as_ref().ok_or(DrillError::NotReady)?;
        registry
            .get_or_create(active_mode, catalog, rng)
            .reset(catalog, rng);

        self.cancel_pending_advance();
        log::info!("mode '{}' reset", self.active_mode);
        self.emit_snapshot(sink);
        sink.emit(DrillEvent::Feedback(Feedback::ResetNotice));
        Ok(true)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn modes(&self) -> &ModeTable {
        &self.modes
    }

    pub fn active_mode(&self) -> &ModeId {
        &self.active_mode
    }

    pub fn active_spec(&self) -> Option<&ModeSpec> {
        self.modes.get(&self.active_mode)
    }

    pub fn catalog(&self) -> Option<&VerbCatalog> {
        self.catalog.as_ref()
    }

    pub fn session(&self, mode: &ModeId) -> Option<&ModeSession> {
        self.registry.get(mode)
    }

    pub fn current_verb(&self) -> Option<&VerbRecord> {
        let catalog = self.catalog.as_ref()?;
        self.registry.get(&self.active_mode)?.current(catalog)
    }

    pub fn score(&self) -> u32 {
        self.registry
            .get(&self.active_mode)
            .map_or(0, ModeSession::score)
    }

    pub fn percent_complete(&self) -> f64 {
        match (&self.catalog, self.registry.get(&self.active_mode)) {
            (Some(catalog), Some(session)) => session.percent_complete(catalog.len()),
            _ => 0.0,
        }
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    fn require_ready(&self) -> Result<(), DrillError> {
        match self.phase {
            Phase::Ready => Ok(()),
            Phase::Loading => Err(DrillError::NotReady),
            Phase::Failed(_) => Err(DrillError::LoadFailed),
        }
    }

    fn cancel_pending_advance(&mut self) {
        if self.pending_advance.take().is_some() {
            log::debug!("scheduled advance cancelled");
        }
    }

    fn emit_snapshot(&self, sink: &mut impl PresentationSink) {
        sink.emit(DrillEvent::Mode(self.active_mode.clone()));
        if let Some(verb) = self.current_verb() {
            sink.emit(DrillEvent::Display(verb.dictionary_form.clone()));
        }
        sink.emit(DrillEvent::ClearPrompt);
        sink.emit(DrillEvent::Score(self.score()));
        sink.emit(DrillEvent::Progress(self.percent_complete()));
    }
}
