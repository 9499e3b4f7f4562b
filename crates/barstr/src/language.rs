use whatlang::Lang;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Shortest text, in characters, that is handed to the detector.
const MIN_DETECT_CHARS: usize = 4;

/// Best-effort ISO 639-1 code for `text`, `en` when unsure.
///
/// The detector is a pure function of its input, so repeated runs agree.
pub fn detect_language(text: &str) -> &'static str {
    if text.trim().chars().count() < MIN_DETECT_CHARS {
        return DEFAULT_LANGUAGE;
    }
    match whatlang::detect_lang(text) {
        Some(lang) => iso_639_1(lang),
        None => DEFAULT_LANGUAGE,
    }
}

fn iso_639_1(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Por => "pt",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Rus => "ru",
        Lang::Pol => "pl",
        Lang::Tur => "tr",
        Lang::Jpn => "ja",
        Lang::Cmn => "zh",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        // Three-letter code for the rest; templates fall back to `en` anyway.
        other => other.code(),
    }
}
