//! The built-in pool of standard fractions.

use serde::{Deserialize, Serialize};

use crate::model::FractionPair;

/// One row of the curated pool: fraction markup and its percent markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedEntry {
    pub fraction: String,
    pub percent: String,
}

impl CuratedEntry {
    #[must_use]
    pub fn new(fraction: impl Into<String>, percent: impl Into<String>) -> Self {
        Self {
            fraction: fraction.into(),
            percent: percent.into(),
        }
    }

    /// Read the numerator and denominator back out of the markup.
    #[must_use]
    pub fn pair(&self) -> Option<FractionPair> {
        FractionPair::from_notation(&self.fraction).ok()
    }
}

/// Every proper fraction in lowest terms with denominator 2 through 12,
/// plus the common fifteenths, sixteenths, twentieths, and twenty-fifths.
#[must_use]
pub fn curated_table() -> Vec<CuratedEntry> {
    vec![
        CuratedEntry::new(r"\frac{1}{2}", r"50\%"),
        CuratedEntry::new(r"\frac{1}{3}", r"33\frac{1}{3}\%"),
        CuratedEntry::new(r"\frac{2}{3}", r"66\frac{2}{3}\%"),
        CuratedEntry::new(r"\frac{1}{4}", r"25\%"),
        CuratedEntry::new(r"\frac{3}{4}", r"75\%"),
        CuratedEntry::new(r"\frac{1}{5}", r"20\%"),
        CuratedEntry::new(r"\frac{2}{5}", r"40\%"),
        CuratedEntry::new(r"\frac{3}{5}", r"60\%"),
        CuratedEntry::new(r"\frac{4}{5}", r"80\%"),
        CuratedEntry::new(r"\frac{1}{6}", r"16\frac{2}{3}\%"),
        CuratedEntry::new(r"\frac{5}{6}", r"83\frac{1}{3}\%"),
        CuratedEntry::new(r"\frac{1}{7}", r"14\frac{2}{7}\%"),
        CuratedEntry::new(r"\frac{2}{7}", r"28\frac{4}{7}\%"),
        CuratedEntry::new(r"\frac{3}{7}", r"42\frac{6}{7}\%"),
        CuratedEntry::new(r"\frac{4}{7}", r"57\frac{1}{7}\%"),
        CuratedEntry::new(r"\frac{5}{7}", r"71\frac{3}{7}\%"),
        CuratedEntry::new(r"\frac{6}{7}", r"85\frac{5}{7}\%"),
        CuratedEntry::new(r"\frac{1}{8}", r"12\frac{1}{2}\%"),
        CuratedEntry::new(r"\frac{3}{8}", r"37\frac{1}{2}\%"),
        CuratedEntry::new(r"\frac{5}{8}", r"62\frac{1}{2}\%"),
        CuratedEntry::new(r"\frac{7}{8}", r"87\frac{1}{2}\%"),
        CuratedEntry::new(r"\frac{1}{9}", r"11\frac{1}{9}\%"),
        CuratedEntry::new(r"\frac{2}{9}", r"22\frac{2}{9}\%"),
        CuratedEntry::new(r"\frac{4}{9}", r"44\frac{4}{9}\%"),
        CuratedEntry::new(r"\frac{5}{9}", r"55\frac{5}{9}\%"),
        CuratedEntry::new(r"\frac{7}{9}", r"77\frac{7}{9}\%"),
        CuratedEntry::new(r"\frac{8}{9}", r"88\frac{8}{9}\%"),
        CuratedEntry::new(r"\frac{1}{10}", r"10\%"),
        CuratedEntry::new(r"\frac{3}{10}", r"30\%"),
        CuratedEntry::new(r"\frac{7}{10}", r"70\%"),
        CuratedEntry::new(r"\frac{9}{10}", r"90\%"),
        CuratedEntry::new(r"\frac{1}{11}", r"9\frac{1}{11}\%"),
        CuratedEntry::new(r"\frac{2}{11}", r"18\frac{2}{11}\%"),
        CuratedEntry::new(r"\frac{3}{11}", r"27\frac{3}{11}\%"),
        CuratedEntry::new(r"\frac{4}{11}", r"36\frac{4}{11}\%"),
        CuratedEntry::new(r"\frac{5}{11}", r"45\frac{5}{11}\%"),
        CuratedEntry::new(r"\frac{6}{11}", r"54\frac{6}{11}\%"),
        CuratedEntry::new(r"\frac{7}{11}", r"63\frac{7}{11}\%"),
        CuratedEntry::new(r"\frac{8}{11}", r"72\frac{8}{11}\%"),
        CuratedEntry::new(r"\frac{9}{11}", r"81\frac{9}{11}\%"),
        CuratedEntry::new(r"\frac{10}{11}", r"90\frac{10}{11}\%"),
        CuratedEntry::new(r"\frac{1}{12}", r"8\frac{1}{3}\%"),
        CuratedEntry::new(r"\frac{5}{12}", r"41\frac{2}{3}\%"),
        CuratedEntry::new(r"\frac{7}{12}", r"58\frac{1}{3}\%"),
        CuratedEntry::new(r"\frac{11}{12}", r"91\frac{2}{3}\%"),
        CuratedEntry::new(r"\frac{1}{15}", r"6\frac{2}{3}\%"),
        CuratedEntry::new(r"\frac{1}{16}", r"6\frac{1}{4}\%"),
        CuratedEntry::new(r"\frac{3}{16}", r"18\frac{3}{4}\%"),
        CuratedEntry::new(r"\frac{1}{20}", r"5\%"),
        CuratedEntry::new(r"\frac{3}{20}", r"15\%"),
        CuratedEntry::new(r"\frac{1}{25}", r"4\%"),
        CuratedEntry::new(r"\frac{3}{25}", r"12\%"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::format_percent;

    #[test]
    fn every_entry_matches_the_formatter() {
        for entry in curated_table() {
            let pair = entry.pair().expect("curated markup parses");
            let expected = format_percent(pair.numerator(), pair.denominator());
            assert_eq!(entry.percent, expected.to_string(), "{}", entry.fraction);
        }
    }

    #[test]
    fn percents_are_unique() {
        let table = curated_table();
        for (i, entry) in table.iter().enumerate() {
            assert!(
                table[..i].iter().all(|e| e.percent != entry.percent),
                "duplicate percent {}",
                entry.percent
            );
        }
        assert_eq!(table.len(), 52);
    }

    #[test]
    fn malformed_entries_yield_no_pair() {
        assert!(CuratedEntry::new("one half", r"50\%").pair().is_none());
    }
}
