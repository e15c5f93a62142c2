// Number handling shared by the report loader and any front end that displays
// the dashboard values.

// Brazilian number formats found in the exported reports.
// Three conventions appear side by side in the same file:
//   currency    "R$ 1.234,56"
//   percentage  "12,3%"
//   counts      "1.234"
// Every parser is total: a cell that cannot be read becomes 0.0 so a handful of
// malformed cells never blocks a render pass.
pub mod brazilian_format {
    use std::str::FromStr;

    /// A cell as it arrives from a report: absent, already numeric, or text.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum RawValue<'a> {
        Missing,
        Number(f64),
        Text(&'a str),
    }

    impl<'a> From<&'a str> for RawValue<'a> {
        fn from(s: &'a str) -> Self {
            RawValue::Text(s)
        }
    }

    impl<'a> From<&'a String> for RawValue<'a> {
        fn from(s: &'a String) -> Self {
            RawValue::Text(s.as_str())
        }
    }

    impl From<f64> for RawValue<'_> {
        fn from(v: f64) -> Self {
            RawValue::Number(v)
        }
    }

    impl<'a> From<Option<&'a str>> for RawValue<'a> {
        fn from(value: Option<&'a str>) -> Self {
            value.map_or(RawValue::Missing, RawValue::Text)
        }
    }

    // Non-breaking spaces used by the export between "R$" and the amount.
    const NBSP: char = '\u{a0}';
    const NARROW_NBSP: char = '\u{202f}';

    /// Parses "R$ 1.234,56" into 1234.56.
    pub fn parse_currency<'a>(raw: impl Into<RawValue<'a>>) -> f64 {
        clean(raw.into(), |s| {
            s.replace("R$", "")
                .replace([NBSP, NARROW_NBSP, ' '], "")
                .replace('.', "")
                .replace(',', ".")
        })
    }

    /// Parses "12,3%" into 12.3. Periods are left alone, as in the export.
    pub fn parse_percentage<'a>(raw: impl Into<RawValue<'a>>) -> f64 {
        clean(raw.into(), |s| s.replace('%', "").replace(',', "."))
    }

    /// Parses "1.234" into 1234.0 and "1.234,5" into 1234.5.
    pub fn parse_grouped_number<'a>(raw: impl Into<RawValue<'a>>) -> f64 {
        clean(raw.into(), |s| s.replace('.', "").replace(',', "."))
    }

    fn clean(raw: RawValue<'_>, normalize: impl Fn(&str) -> String) -> f64 {
        let value = match raw {
            RawValue::Missing => return 0.0,
            RawValue::Number(v) => v,
            RawValue::Text(s) => f64::from_str(normalize(s).trim()).unwrap_or(0.0),
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Formats 1234.5 with two places as "1.234,50".
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
            "-"
        } else {
            ""
        };
        match frac_part {
            Some(frac) => format!("{}{},{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }

    pub fn format_currency(value: f64) -> String {
        format!("R$ {}", format_decimal(value, 2))
    }

}
