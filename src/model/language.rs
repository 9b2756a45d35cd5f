use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    KoKr,
    EnUs,
}

impl Language {
    /// Data Dragon locale code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::KoKr => "ko_KR",
            Language::EnUs => "en_US",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ko_KR" => Some(Language::KoKr),
            "en_US" => Some(Language::EnUs),
            _ => None,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
