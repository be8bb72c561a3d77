//! Month and weekday names used when formatting and reading dates.
//!
//! Only names vary by locale. The wire format, digit tokens and the
//! permissive fallback layouts are locale-independent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DAYS_PER_WEEK, MAX_MONTH};

const MONTHS: usize = MAX_MONTH as usize;

/// Name tables for one language. Weekday tables start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameTable {
    pub months:         [&'static str; MONTHS],
    pub months_short:   [&'static str; MONTHS],
    pub weekdays:       [&'static str; DAYS_PER_WEEK],
    pub weekdays_short: [&'static str; DAYS_PER_WEEK],
    pub weekdays_min:   [&'static str; DAYS_PER_WEEK],
}

const ENGLISH: NameTable = NameTable {
    months:         [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_short:   [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays:       [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    weekdays_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    weekdays_min:   ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
};

const FRENCH: NameTable = NameTable {
    months:         [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    months_short:   [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    weekdays:       [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    weekdays_short: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    weekdays_min:   ["di", "lu", "ma", "me", "je", "ve", "sa"],
};

const GERMAN: NameTable = NameTable {
    months:         [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short:   [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sep.", "Okt.", "Nov.",
        "Dez.",
    ],
    weekdays:       [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    weekdays_short: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    weekdays_min:   ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
};

const SPANISH: NameTable = NameTable {
    months:         [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    months_short:   [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    weekdays:       [
        "domingo",
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
    ],
    weekdays_short: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
    weekdays_min:   ["do", "lu", "ma", "mi", "ju", "vi", "sá"],
};

/// Language of month and weekday names.
///
/// Deserialized from a language tag such as `"fr"` or `"fr-CA"`. Unknown
/// languages fall back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
    #[default]
    En,
    Fr,
    De,
    Es,
}

impl Locale {
    /// Reads the primary subtag of a BCP 47 style tag.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "en" | "" => Self::En,
            "fr" => Self::Fr,
            "de" => Self::De,
            "es" => Self::Es,
            _ => {
                debug!("no names for locale {tag:?}, using English");
                Self::En
            }
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Es => "es",
        }
    }

    pub const fn names(self) -> &'static NameTable {
        match self {
            Self::En => &ENGLISH,
            Self::Fr => &FRENCH,
            Self::De => &GERMAN,
            Self::Es => &SPANISH,
        }
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag().to_owned()
    }
}

impl NameTable {
    /// Month number (1-12) for a full or abbreviated name at the start of
    /// `text`, with the byte length matched.
    pub fn match_month(&self, text: &str) -> Option<(u32, usize)> {
        longest_match(text, self.months.iter().chain(&self.months_short), MONTHS)
            .and_then(|(index, len)| Some((u32::try_from(index + 1).ok()?, len)))
    }

    /// Byte length of any weekday name at the start of `text`.
    pub fn match_weekday(&self, text: &str) -> Option<usize> {
        let names = self
            .weekdays
            .iter()
            .chain(&self.weekdays_short)
            .chain(&self.weekdays_min);
        longest_match(text, names, DAYS_PER_WEEK).map(|(_, len)| len)
    }
}

/// Finds the longest name that prefixes `text`, ignoring case. Returns the
/// name's index modulo `period` and the matched byte length.
fn longest_match<'a>(
    text: &str,
    names: impl Iterator<Item = &'a &'static str>,
    period: usize,
) -> Option<(usize, usize)> {
    names
        .enumerate()
        .filter_map(|(index, name)| prefix_len(text, name).map(|len| (index % period, len)))
        .max_by_key(|&(_, len)| len)
}

fn prefix_len(text: &str, name: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    for expected in name.chars() {
        let (_, found) = chars.next()?;
        if !found.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(text.len(), |(index, _)| index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        struct TestCase {
            tag:      &'static str,
            expected: Locale,
        }

        let cases = [
            TestCase { tag: "fr", expected: Locale::Fr },
            TestCase { tag: "fr-CA", expected: Locale::Fr },
            TestCase { tag: "DE_at", expected: Locale::De },
            TestCase { tag: "es", expected: Locale::Es },
            TestCase { tag: "en-US", expected: Locale::En },
            TestCase { tag: "ja", expected: Locale::En },
            TestCase { tag: "", expected: Locale::En },
        ];
        for case in cases {
            assert_eq!(Locale::from_tag(case.tag), case.expected, "tag {:?}", case.tag);
        }
    }

    #[test]
    fn test_serde_tag() {
        let locale: Locale = serde_json::from_str(r#""fr-FR""#).unwrap();
        assert_eq!(locale, Locale::Fr);
        assert_eq!(serde_json::to_string(&locale).unwrap(), r#""fr""#);
    }

    #[test]
    fn test_match_month_prefers_longest_name() {
        let english = Locale::En.names();
        assert_eq!(english.match_month("June 5"), Some((6, 4)));
        assert_eq!(english.match_month("jun 5"), Some((6, 3)));
        assert_eq!(english.match_month("Foo"), None);

        let french = Locale::Fr.names();
        assert_eq!(french.match_month("février 20"), Some((2, "février".len())));
        assert_eq!(french.match_month("FÉVR. 20"), Some((2, "févr.".len())));
        assert_eq!(french.match_month("juillet"), Some((7, "juillet".len())));
    }

    #[test]
    fn test_match_weekday() {
        let spanish = Locale::Es.names();
        assert_eq!(spanish.match_weekday("miércoles,"), Some("miércoles".len()));
        assert_eq!(spanish.match_weekday("sá"), Some("sá".len()));
        assert_eq!(spanish.match_weekday("xx"), None);
    }

    #[test]
    fn test_tables_have_distinct_names() {
        for locale in [Locale::En, Locale::Fr, Locale::De, Locale::Es] {
            let names = locale.names();
            for (index, name) in names.months.iter().enumerate() {
                assert_eq!(
                    names.match_month(name),
                    Some((u32::try_from(index + 1).unwrap(), name.len())),
                    "{locale:?} {name}"
                );
            }
        }
    }
}
