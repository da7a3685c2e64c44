use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use katsuyo::catalog::{CatalogSource, ModeId, ModeTable, VerbCatalog, VerbRecord};
use katsuyo::engine::validator::{Verdict, is_correct};
use katsuyo::engine::{Confirmation, DrillController, DrillEvent, Feedback};
use katsuyo::session::ModeSession;

fn verb(dict: &str, te: [&str; 3], ta: [&str; 3]) -> VerbRecord {
    VerbRecord::new(
        dict,
        [
            ("teForm", te[0]),
            ("teHiragana", te[1]),
            ("teRomaji", te[2]),
            ("taForm", ta[0]),
            ("taHiragana", ta[1]),
            ("taRomaji", ta[2]),
        ],
    )
}

fn taberu() -> VerbRecord {
    verb(
        "食べる",
        ["食べて", "たべて", "tabete"],
        ["食べた", "たべた", "tabeta"],
    )
}

fn three_verbs() -> Vec<VerbRecord> {
    vec![
        taberu(),
        verb("飲む", ["飲んで", "のんで", "nonde"], ["飲んだ", "のんだ", "nonda"]),
        verb("行く", ["行って", "いって", "itte"], ["行った", "いった", "itta"]),
    ]
}

fn ready_controller(verbs: Vec<VerbRecord>, seed: u64) -> (DrillController, Vec<DrillEvent>) {
    let modes = ModeTable::default();
    let catalog = VerbCatalog::from_records(verbs, &modes).unwrap();
    let mut controller = DrillController::new(modes, SmallRng::seed_from_u64(seed))
        .with_advance_delay(Duration::ZERO);
    let mut events = Vec::new();
    controller.on_load_complete(catalog, &mut events);
    (controller, events)
}

fn romaji_for_current(controller: &DrillController) -> String {
    let field = controller.active_spec().unwrap().romaji_field.clone();
    controller
        .current_verb()
        .unwrap()
        .field(&field)
        .unwrap()
        .to_string()
}

fn answer_correctly(controller: &mut DrillController, events: &mut Vec<DrillEvent>) {
    let answer = romaji_for_current(controller);
    let now = Instant::now();
    assert_eq!(
        controller.on_submit_answer(&answer, now, events),
        Ok(Verdict::Correct)
    );
    assert!(controller.tick(now, events));
}

#[test]
fn single_verb_uppercase_romaji_is_correct_and_refills() {
    let (mut controller, _) = ready_controller(vec![taberu()], 1);
    let mut events = Vec::new();

    let verdict = controller
        .on_submit_answer("TABETE", Instant::now(), &mut events)
        .unwrap();

    assert_eq!(verdict, Verdict::Correct);
    assert_eq!(controller.score(), 1);
    assert_eq!(controller.session(&"te".into()).unwrap().remaining(), 1);
    assert_eq!(controller.percent_complete(), 0.0);
    assert!(events.contains(&DrillEvent::Feedback(Feedback::Correct)));
    assert!(events.contains(&DrillEvent::Score(1)));
    assert!(events.contains(&DrillEvent::Progress(0.0)));
}

#[test]
fn blank_answer_prompts_for_input() {
    let (mut controller, _) = ready_controller(vec![taberu()], 1);
    let mut events = Vec::new();

    let verdict = controller
        .on_submit_answer("  ", Instant::now(), &mut events)
        .unwrap();

    assert_eq!(verdict, Verdict::Empty);
    assert_eq!(events, vec![DrillEvent::Feedback(Feedback::PromptForInput)]);
    assert_eq!(controller.score(), 0);
    assert!(!controller.has_pending_advance());
}

#[test]
fn progress_wraps_to_zero_on_last_verb_of_round() {
    let (mut controller, _) = ready_controller(three_verbs(), 3);
    let mut seen = Vec::new();
    let mut percents = Vec::new();

    for _ in 0..3 {
        seen.push(controller.current_verb().unwrap().dictionary_form.clone());
        let mut events = Vec::new();
        answer_correctly(&mut controller, &mut events);
        percents.push(controller.percent_complete());
    }

    seen.sort();
    let mut expected: Vec<String> = three_verbs().into_iter().map(|v| v.dictionary_form).collect();
    expected.sort();
    assert_eq!(seen, expected);

    assert!((percents[0] - 100.0 / 3.0).abs() < 1e-9);
    assert!((percents[1] - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(percents[2], 0.0);
    assert_eq!(controller.score(), 3);
    assert_eq!(
        controller.session(&"te".into()).unwrap().cycles_completed(),
        1
    );
}

#[test]
fn declined_reset_changes_nothing_and_confirmed_reset_restarts() {
    let (mut controller, _) = ready_controller(three_verbs(), 5);
    let mut events = Vec::new();
    answer_correctly(&mut controller, &mut events);

    let remaining = controller.session(&"te".into()).unwrap().remaining();
    let current = controller.current_verb().unwrap().dictionary_form.clone();

    events.clear();
    let done = controller
        .on_reset(&mut Confirmation(false), &mut events)
        .unwrap();
    assert!(!done);
    assert!(events.is_empty());
    assert_eq!(controller.score(), 1);
    assert_eq!(
        controller.session(&"te".into()).unwrap().remaining(),
        remaining
    );
    assert_eq!(controller.current_verb().unwrap().dictionary_form, current);

    let mut asked = 0;
    let done = controller
        .on_reset(
            &mut || {
                asked += 1;
                true
            },
            &mut events,
        )
        .unwrap();
    assert!(done);
    assert_eq!(asked, 1);
    assert_eq!(controller.score(), 0);
    assert_eq!(controller.session(&"te".into()).unwrap().remaining(), 3);
    assert_eq!(controller.percent_complete(), 0.0);
    assert_eq!(
        events.last(),
        Some(&DrillEvent::Feedback(Feedback::ResetNotice))
    );
}

#[test]
fn score_counts_only_accepted_answers() {
    let (mut controller, _) = ready_controller(three_verbs(), 11);
    let spec = controller.active_spec().unwrap().clone();
    let attempts = ["", "itte", "nonde", "wrong", "TABETE", "のんで", "  ", "行って", "tabeta"];

    let mut expected = 0;
    let mut events = Vec::new();
    for attempt in attempts {
        let accepted = is_correct(&spec, controller.current_verb().unwrap(), attempt) == Some(true);
        let now = Instant::now();
        controller.on_submit_answer(attempt, now, &mut events).unwrap();
        if accepted {
            expected += 1;
            controller.tick(now, &mut events);
        }
        assert_eq!(controller.score(), expected);
    }
}

#[test]
fn switching_modes_leaves_other_session_untouched() {
    let (mut controller, _) = ready_controller(three_verbs(), 17);
    let te = ModeId::from("te");
    let ta = ModeId::from("ta");
    let mut events = Vec::new();

    answer_correctly(&mut controller, &mut events);
    let te_score = controller.score();
    let te_remaining = controller.session(&te).unwrap().remaining();
    let te_current = controller.current_verb().unwrap().dictionary_form.clone();

    controller.on_switch_mode(&ta, &mut events).unwrap();
    assert_eq!(controller.score(), 0);
    answer_correctly(&mut controller, &mut events);
    answer_correctly(&mut controller, &mut events);
    assert_eq!(controller.score(), 2);

    let te_session = controller.session(&te).unwrap();
    assert_eq!(te_session.score(), te_score);
    assert_eq!(te_session.remaining(), te_remaining);

    controller.on_switch_mode(&te, &mut events).unwrap();
    assert_eq!(controller.score(), te_score);
    assert_eq!(controller.current_verb().unwrap().dictionary_form, te_current);
    assert_eq!(controller.session(&ta).unwrap().score(), 2);
}

#[test]
fn queue_never_runs_dry() {
    let modes = ModeTable::default();
    let catalog = VerbCatalog::from_records(three_verbs(), &modes).unwrap();
    let mut rng = SmallRng::seed_from_u64(23);
    let mut session = ModeSession::new(&catalog, &mut rng);

    for step in 0..50 {
        assert!(session.current(&catalog).is_some(), "empty at step {step}");
        session.advance(&catalog, &mut rng);
    }
    assert_eq!(session.cycles_completed(), 16);
}

#[test]
fn every_variant_of_every_bundled_verb_is_accepted() {
    let modes = ModeTable::default();
    let catalog = CatalogSource::Embedded.load(&modes).unwrap();

    for spec in modes.iter() {
        for verb in catalog.iter() {
            let forms = spec.accepted_forms(verb).unwrap();
            assert_eq!(is_correct(spec, verb, forms.kanji), Some(true));
            assert_eq!(is_correct(spec, verb, forms.kana), Some(true));
            assert_eq!(is_correct(spec, verb, forms.romaji), Some(true));
            assert_eq!(
                is_correct(spec, verb, &forms.romaji.to_uppercase()),
                Some(true)
            );
            assert_eq!(is_correct(spec, verb, ""), None);
        }
    }
}

#[test]
fn failed_load_blocks_drilling() {
    let modes = ModeTable::default();
    let mut controller = DrillController::new(modes, SmallRng::seed_from_u64(0));
    let mut events = Vec::new();
    controller.on_load_failed(&katsuyo::error::CatalogError::Empty, &mut events);

    assert!(matches!(events.as_slice(), [DrillEvent::LoadFailed(_)]));
    assert!(
        controller
            .on_submit_answer("tabete", Instant::now(), &mut events)
            .is_err()
    );
}
