/// A language the proofreading service can check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub label: &'static str,
}

pub const DEFAULT_LANGUAGE: &str = "es";

pub const LANGUAGES: &[Language] = &[
    Language {
        code: "es",
        label: "Español",
    },
    Language {
        code: "en",
        label: "English",
    },
    Language {
        code: "pt",
        label: "Português",
    },
    Language {
        code: "fr",
        label: "Français",
    },
    Language {
        code: "de",
        label: "Deutsch",
    },
    Language {
        code: "it",
        label: "Italiano",
    },
];

impl Language {
    pub fn from_code(code: &str) -> Option<&'static Language> {
        LANGUAGES.iter().find(|lang| lang.code == code)
    }

    /// Next language in the list, wrapping around
    pub fn cycle(code: &str) -> &'static Language {
        let index = LANGUAGES
            .iter()
            .position(|lang| lang.code == code)
            .map_or(0, |i| (i + 1) % LANGUAGES.len());
        &LANGUAGES[index]
    }
}
