use icu_normalizer::ComposingNormalizerBorrowed;

use crate::catalog::{ModeSpec, VerbRecord};

/// Outcome of checking one submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing but whitespace was submitted.
    Empty,
    Correct,
    Incorrect,
}

/// Checks `raw` against the verb's accepted forms for `mode`.
///
/// Input is trimmed; an empty result is `Verdict::Empty`, never `Incorrect`.
/// Kanji and kana must match exactly; romaji is compared case-insensitively.
/// Both sides are NFC-normalized so decomposed dakuten match precomposed kana.
pub fn check_answer(mode: &ModeSpec, verb: &VerbRecord, raw: &str) -> Verdict {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Verdict::Empty;
    }

    // Catalog validation guarantees the fields exist for every configured mode.
    let Some(forms) = mode.accepted_forms(verb) else {
        log::warn!(
            "verb '{}' has no answers for mode '{}'",
            verb.dictionary_form,
            mode.id
        );
        return Verdict::Incorrect;
    };

    let nfc = ComposingNormalizerBorrowed::new_nfc();
    let input = nfc.normalize(trimmed).into_owned();
    let lowered = input.to_lowercase();

    let variants = [
        nfc.normalize(forms.kanji).into_owned(),
        nfc.normalize(forms.kana).into_owned(),
        nfc.normalize(&forms.romaji.to_lowercase()).into_owned(),
    ];
    let matched = variants
        .iter()
        .any(|variant| *variant == input || *variant == lowered);

    if matched {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// `None` signals empty input; otherwise whether the answer was accepted.
pub fn is_correct(mode: &ModeSpec, verb: &VerbRecord, raw: &str) -> Option<bool> {
    match check_answer(mode, verb, raw) {
        Verdict::Empty => None,
        Verdict::Correct => Some(true),
        Verdict::Incorrect => Some(false),
    }
}
