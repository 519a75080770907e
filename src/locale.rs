//! Locale value object (§9 design notes: "fold into a small locale value
//! object... do not depend on a specific host locale library").

/// Decimal separator, date pattern and yes/no pair for one culture.
///
/// Always passed explicitly through `ProcessOptions`; the engine never reads
/// ambient host locale state (`LC_ALL`, `CurrentCulture`, etc).
#[derive(Debug, Clone, PartialEq)]
pub struct Locale {
    pub tag: &'static str,
    pub decimal_separator: char,
    pub group_separator: char,
    pub date_pattern: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
}

impl Locale {
    pub fn invariant() -> Locale {
        Locale {
            tag: "invariant",
            decimal_separator: '.',
            group_separator: ',',
            date_pattern: "%Y-%m-%d %H:%M:%S",
            yes: "Yes",
            no: "No",
        }
    }

    pub fn en_us() -> Locale {
        Locale {
            tag: "en-US",
            ..Locale::invariant()
        }
    }

    pub fn fr_fr() -> Locale {
        Locale {
            tag: "fr-FR",
            decimal_separator: ',',
            group_separator: '.',
            date_pattern: "%d/%m/%Y %H:%M:%S",
            yes: "Oui",
            no: "Non",
        }
    }

    pub fn de_de() -> Locale {
        Locale {
            tag: "de-DE",
            decimal_separator: ',',
            group_separator: '.',
            date_pattern: "%d.%m.%Y %H:%M:%S",
            yes: "Ja",
            no: "Nein",
        }
    }

    pub fn es_es() -> Locale {
        Locale {
            tag: "es-ES",
            decimal_separator: ',',
            group_separator: '.',
            date_pattern: "%d/%m/%Y %H:%M:%S",
            yes: "Sí",
            no: "No",
        }
    }

    pub fn it_it() -> Locale {
        Locale {
            tag: "it-IT",
            decimal_separator: ',',
            group_separator: '.',
            date_pattern: "%d/%m/%Y %H:%M:%S",
            yes: "Sì",
            no: "No",
        }
    }

    pub fn pt_br() -> Locale {
        Locale {
            tag: "pt-BR",
            decimal_separator: ',',
            group_separator: '.',
            date_pattern: "%d/%m/%Y %H:%M:%S",
            yes: "Sim",
            no: "Não",
        }
    }

    /// Render an integer part + fractional digits honoring grouping and the
    /// locale's decimal separator.
    pub fn format_number(&self, whole: i128, frac: Option<(u32, u32)>) -> String {
        let negative = whole < 0;
        let whole = whole.unsigned_abs();
        let digits = whole.to_string();
        let mut grouped = String::new();
        for (i, ch) in digits.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(ch);
        }
        let mut out: String = grouped.chars().rev().collect();
        if negative {
            out.insert(0, '-');
        }
        if let Some((value, scale)) = frac {
            out.push(self.decimal_separator);
            out.push_str(&format!("{value:0width$}", width = scale as usize));
        }
        out
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::invariant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Locale::invariant(), "Yes", "No")]
    #[case(Locale::fr_fr(), "Oui", "Non")]
    #[case(Locale::de_de(), "Ja", "Nein")]
    #[case(Locale::es_es(), "Sí", "No")]
    #[case(Locale::it_it(), "Sì", "No")]
    #[case(Locale::pt_br(), "Sim", "Não")]
    fn builtin_yesno_pairs(#[case] locale: Locale, #[case] yes: &str, #[case] no: &str) {
        assert_eq!(locale.yes, yes);
        assert_eq!(locale.no, no);
    }

    #[test]
    fn groups_thousands() {
        let l = Locale::invariant();
        assert_eq!(l.format_number(1234567, None), "1,234,567");
    }

    #[test]
    fn uses_locale_decimal_separator_for_fraction() {
        let l = Locale::fr_fr();
        assert_eq!(l.format_number(12, Some((50, 2))), "12,50");
    }
}
