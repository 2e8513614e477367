use std::fmt;

/// The two languages the transpilation service translates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Kotlin,
    Swift,
}

impl Language {
    /// File extension of sources in this language, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Kotlin => "kt",
            Language::Swift => "swift",
        }
    }

    /// Tag sent to the service as the `input` query parameter.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
        }
    }

    pub fn opposite(self) -> Language {
        match self {
            Language::Kotlin => Language::Swift,
            Language::Swift => Language::Kotlin,
        }
    }

    /// Lenient parse used by the CLI: anything starting with `k` is Kotlin,
    /// everything else is Swift.
    pub fn from_arg(arg: &str) -> Language {
        if arg.to_lowercase().starts_with('k') {
            Language::Kotlin
        } else {
            Language::Swift
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_arg_selects_kotlin_for_k_prefix_only() {
        assert_eq!(Language::from_arg("kotlin"), Language::Kotlin);
        assert_eq!(Language::from_arg("K"), Language::Kotlin);
        assert_eq!(Language::from_arg("kt"), Language::Kotlin);
        assert_eq!(Language::from_arg("swift"), Language::Swift);
        assert_eq!(Language::from_arg("java"), Language::Swift);
        assert_eq!(Language::from_arg(""), Language::Swift);
    }

    #[test]
    fn opposite_swaps_languages() {
        assert_eq!(Language::Kotlin.opposite(), Language::Swift);
        assert_eq!(Language::Swift.opposite(), Language::Kotlin);
        assert_eq!(Language::Kotlin.opposite().extension(), "swift");
    }
}
