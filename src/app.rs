use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use katsuyo::catalog::{ModeId, ModeTable, VerbCatalog};
use katsuyo::config::Config;
use katsuyo::engine::{
    Confirmation, DrillController, DrillEvent, Feedback, Phase, PresentationSink,
};
use katsuyo::error::{CatalogError, DrillError};

use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Loading,
    Drill,
    LoadError,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    None,
    ConfirmReset,
    Help,
}

/// What the drill screen currently shows. Updated only through controller events.
#[derive(Debug, Default)]
pub struct DrillView {
    pub prompt: Option<String>,
    pub feedback: Option<Feedback>,
    pub score: u32,
    pub progress: f64,
    pub mode: Option<ModeId>,
    pub load_error: Option<String>,
    pub input: LineInput,
}

impl PresentationSink for DrillView {
    fn emit(&mut self, event: DrillEvent) {
        match event {
            DrillEvent::Display(text) => self.prompt = Some(text),
            DrillEvent::Feedback(kind) => self.feedback = Some(kind),
            DrillEvent::ClearPrompt => {
                self.feedback = None;
                self.input.clear();
            }
            DrillEvent::Score(value) => self.score = value,
            DrillEvent::Progress(percent) => self.progress = percent,
            DrillEvent::Mode(mode) => self.mode = Some(mode),
            DrillEvent::LoadFailed(message) => self.load_error = Some(message),
        }
    }
}

pub struct App {
    pub controller: DrillController,
    pub view: DrillView,
    pub overlay: Overlay,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, modes: ModeTable, theme: &'static Theme, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let controller = DrillController::new(modes, rng)
            .with_initial_mode(&ModeId::new(config.default_mode.as_str()))
            .with_advance_delay(config.advance_delay());

        Self {
            controller,
            view: DrillView::default(),
            overlay: Overlay::None,
            theme,
            config,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> AppScreen {
        match self.controller.phase() {
            Phase::Loading => AppScreen::Loading,
            Phase::Ready => AppScreen::Drill,
            Phase::Failed(_) => AppScreen::LoadError,
        }
    }

    pub fn on_catalog(&mut self, result: Result<VerbCatalog, CatalogError>) {
        match result {
            Ok(catalog) => self.controller.on_load_complete(catalog, &mut self.view),
            Err(err) => self.controller.on_load_failed(&err, &mut self.view),
        }
    }

    pub fn on_tick(&mut self) {
        self.controller.tick(Instant::now(), &mut self.view);
    }

    pub fn handle_input(&mut self, key: crossterm::event::KeyEvent) {
        // Keep the answered text visible until the next verb replaces it.
        if self.controller.has_pending_advance() {
            return;
        }
        if self.view.input.handle(key) == InputResult::Submit {
            self.submit();
        }
    }

    pub fn submit(&mut self) {
        let answer = self.view.input.value().to_string();
        match self
            .controller
            .on_submit_answer(&answer, Instant::now(), &mut self.view)
        {
            Ok(_) | Err(DrillError::AdvancePending) => {}
            Err(err) => log::warn!("submit ignored: {err}"),
        }
    }

    pub fn switch_mode(&mut self, mode: &ModeId) {
        if self.controller.active_mode() == mode {
            return;
        }
        if let Err(err) = self.controller.on_switch_mode(mode, &mut self.view) {
            log::error!("mode switch failed: {err}");
        }
    }

    pub fn next_mode(&mut self) {
        let next = self
            .controller
            .modes()
            .next_after(self.controller.active_mode())
            .clone();
        self.switch_mode(&next);
    }

    pub fn prev_mode(&mut self) {
        let prev = self
            .controller
            .modes()
            .prev_before(self.controller.active_mode())
            .clone();
        self.switch_mode(&prev);
    }

    pub fn select_mode(&mut self, index: usize) {
        if let Some(spec) = self.controller.modes().nth(index) {
            let id = spec.id.clone();
            self.switch_mode(&id);
        }
    }

    /// Opens the yes/no prompt, or resets straight away when confirmation is disabled.
    pub fn request_reset(&mut self) {
        if self.config.confirm_reset {
            self.overlay = Overlay::ConfirmReset;
        } else {
            self.answer_reset(true);
        }
    }

    pub fn answer_reset(&mut self, confirmed: bool) {
        self.overlay = Overlay::None;
        if let Err(err) = self
            .controller
            .on_reset(&mut Confirmation(confirmed), &mut self.view)
        {
            log::warn!("reset ignored: {err}");
        }
    }

    pub fn active_mode_label(&self) -> &str {
        self.controller
            .active_spec()
            .map_or("", |spec| spec.label.as_str())
    }

    pub fn catalog_len(&self) -> usize {
        self.controller.catalog().map_or(0, VerbCatalog::len)
    }

    pub fn answered_in_round(&self) -> usize {
        let total = self.catalog_len();
        self.controller
            .session(self.controller.active_mode())
            .map_or(0, |s| total.saturating_sub(s.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use katsuyo::catalog::CatalogSource;

    use super::*;

    fn loaded_app(confirm_reset: bool) -> App {
        let mut config = Config::default();
        config.confirm_reset = confirm_reset;
        config.advance_delay_ms = 0;
        let modes = config.mode_table().unwrap();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let mut app = App::new(config, modes.clone(), theme, Some(7));
        app.on_catalog(CatalogSource::Embedded.load(&modes));
        app
    }

    fn type_answer(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_input(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        app.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    fn current_romaji(app: &App) -> String {
        let spec = app.controller.active_spec().unwrap().clone();
        let verb = app.controller.current_verb().unwrap();
        verb.field(&spec.romaji_field).unwrap().to_string()
    }

    #[test]
    fn test_loading_then_drill_screen() {
        let config = Config::default();
        let modes = config.mode_table().unwrap();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let mut app = App::new(config, modes.clone(), theme, Some(1));
        assert_eq!(app.screen(), AppScreen::Loading);
        app.on_catalog(CatalogSource::Embedded.load(&modes));
        assert_eq!(app.screen(), AppScreen::Drill);
        assert!(app.view.prompt.is_some());
    }

    #[test]
    fn test_load_error_screen() {
        let config = Config::default();
        let modes = config.mode_table().unwrap();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let mut app = App::new(config, modes, theme, Some(1));
        app.on_catalog(Err(CatalogError::Empty));
        assert_eq!(app.screen(), AppScreen::LoadError);
        assert!(app.view.load_error.is_some());
    }

    #[test]
    fn test_correct_answer_flows_to_next_prompt() {
        let mut app = loaded_app(true);
        let answer = current_romaji(&app);
        type_answer(&mut app, &answer);
        assert_eq!(app.view.score, 1);
        assert_eq!(app.view.feedback, Some(Feedback::Correct));

        app.on_tick();
        assert_eq!(app.view.feedback, None);
        assert!(app.view.input.is_empty());
        assert_eq!(
            app.view.prompt.as_deref(),
            Some(app.controller.current_verb().unwrap().dictionary_form.as_str())
        );
    }

    #[test]
    fn test_wrong_answer_keeps_input() {
        let mut app = loaded_app(true);
        type_answer(&mut app, "zzz");
        assert_eq!(app.view.feedback, Some(Feedback::Incorrect));
        assert_eq!(app.view.input.value(), "zzz");
        assert_eq!(app.view.score, 0);
    }

    #[test]
    fn test_reset_asks_first() {
        let mut app = loaded_app(true);
        let answer = current_romaji(&app);
        type_answer(&mut app, &answer);
        app.on_tick();

        app.request_reset();
        assert_eq!(app.overlay, Overlay::ConfirmReset);
        app.answer_reset(false);
        assert_eq!(app.view.score, 1);

        app.request_reset();
        app.answer_reset(true);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.view.score, 0);
        assert_eq!(app.view.feedback, Some(Feedback::ResetNotice));
    }

    #[test]
    fn test_reset_without_confirmation() {
        let mut app = loaded_app(false);
        let answer = current_romaji(&app);
        type_answer(&mut app, &answer);
        app.request_reset();
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.view.score, 0);
    }

    #[test]
    fn test_mode_cycling() {
        let mut app = loaded_app(true);
        assert_eq!(app.controller.active_mode().as_str(), "te");
        app.next_mode();
        assert_eq!(app.view.mode.as_ref().map(ModeId::as_str), Some("ta"));
        app.next_mode();
        assert_eq!(app.controller.active_mode().as_str(), "te");
        app.prev_mode();
        assert_eq!(app.controller.active_mode().as_str(), "ta");
        app.select_mode(0);
        assert_eq!(app.controller.active_mode().as_str(), "te");
        app.select_mode(8);
        assert_eq!(app.controller.active_mode().as_str(), "te");
    }
}
