//! Enumerates the GLP semi-annual publications for a year range.
//!
//! The portal names almost every file `glp-{year}-0{semester}.csv`. Two
//! publications were uploaded under different names and are special-cased.

use crate::domain::model::DownloadTarget;

pub const DEFAULT_BASE_URL: &str =
    "https://www.gov.br/anp/pt-br/centrais-de-conteudo/dados-abertos/arquivos/shpc/dsas/glp";

/// First year of the historical series.
pub const DEFAULT_START_YEAR: i32 = 2004;
pub const DEFAULT_END_YEAR: i32 = 2024;
pub const DEFAULT_SEMESTERS_PER_YEAR: u32 = 2;

/// URL of one publication.
pub fn publication_url(base_url: &str, year: i32, semester: u32) -> String {
    let base = base_url.trim_end_matches('/');
    match (year, semester) {
        (2021, 1) => format!("{}/precos-semestrais-glp{}-0{}.csv", base, year, semester),
        (2022, 1) => format!("{}/precos-semestrais-glp-{}-0{}.csv", base, year, semester),
        _ => format!("{}/glp-{}-0{}.csv", base, year, semester),
    }
}

/// Lazy, ascending (year, semester) walk over a publication range.
///
/// Cloning restarts from the clone's current position, so a fresh
/// `GlpUrls::new(..)` or a clone taken before iteration replays the
/// whole range.
#[derive(Debug, Clone)]
pub struct GlpUrls {
    base_url: String,
    end_year: i32,
    semesters_per_year: u32,
    year: i32,
    semester: u32,
    exhausted: bool,
}

impl GlpUrls {
    pub fn new(
        base_url: impl Into<String>,
        start_year: i32,
        end_year: i32,
        semesters_per_year: u32,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            end_year,
            semesters_per_year,
            year: start_year,
            semester: 1,
            exhausted: false,
        }
    }

    fn is_done(&self) -> bool {
        self.exhausted || self.semesters_per_year == 0 || self.year > self.end_year
    }

    fn remaining(&self) -> usize {
        if self.is_done() {
            return 0;
        }
        let full_years = (i64::from(self.end_year) - i64::from(self.year)) as u64;
        let this_year = u64::from(self.semesters_per_year - self.semester + 1);
        let total = full_years
            .saturating_mul(u64::from(self.semesters_per_year))
            .saturating_add(this_year);
        usize::try_from(total).unwrap_or(usize::MAX)
    }

    /// Same walk, tagging each URL with its (year, semester).
    pub fn targets(self) -> impl Iterator<Item = DownloadTarget> {
        let mut urls = self;
        std::iter::from_fn(move || {
            let (year, semester) = (urls.year, urls.semester);
            let url = urls.next()?;
            Some(DownloadTarget::new(year, semester, url))
        })
    }
}

impl Iterator for GlpUrls {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.is_done() {
            return None;
        }

        let url = publication_url(&self.base_url, self.year, self.semester);

        if self.semester >= self.semesters_per_year {
            self.semester = 1;
            match self.year.checked_add(1) {
                Some(next) => self.year = next,
                None => self.exhausted = true,
            }
        } else {
            self.semester += 1;
        }

        Some(url)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for GlpUrls {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const BASE: &str = "https://portal.example/glp";

    #[test]
    fn test_default_template_for_regular_publications() {
        for year in 2004..=2024 {
            for semester in 1..=2 {
                if (year, semester) == (2021, 1) || (year, semester) == (2022, 1) {
                    continue;
                }
                assert_eq!(
                    publication_url(BASE, year, semester),
                    format!("{}/glp-{}-0{}.csv", BASE, year, semester)
                );
            }
        }
    }

    #[test]
    fn test_named_exceptions() {
        assert_eq!(
            publication_url(BASE, 2021, 1),
            format!("{}/precos-semestrais-glp2021-01.csv", BASE)
        );
        assert_eq!(
            publication_url(BASE, 2022, 1),
            format!("{}/precos-semestrais-glp-2022-01.csv", BASE)
        );
        // Second semesters of those years use the default name
        assert_eq!(
            publication_url(BASE, 2021, 2),
            format!("{}/glp-2021-02.csv", BASE)
        );
        assert_eq!(
            publication_url(BASE, 2022, 2),
            format!("{}/glp-2022-02.csv", BASE)
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        assert_eq!(
            publication_url("https://portal.example/glp/", 2004, 1),
            "https://portal.example/glp/glp-2004-01.csv"
        );
    }

    #[test]
    fn test_single_year_yields_override_then_default() {
        let urls: Vec<String> = GlpUrls::new(BASE, 2021, 2021, 2).collect();
        assert_eq!(
            urls,
            vec![
                format!("{}/precos-semestrais-glp2021-01.csv", BASE),
                format!("{}/glp-2021-02.csv", BASE),
            ]
        );
    }

    #[test]
    fn test_count_order_and_uniqueness() {
        let urls = GlpUrls::new(BASE, 2004, 2024, 2);
        assert_eq!(urls.len(), 42);

        let collected: Vec<String> = urls.collect();
        assert_eq!(collected.len(), 42);
        assert_eq!(collected[0], format!("{}/glp-2004-01.csv", BASE));
        assert_eq!(collected[1], format!("{}/glp-2004-02.csv", BASE));
        assert_eq!(collected[41], format!("{}/glp-2024-02.csv", BASE));

        let unique: HashSet<&String> = collected.iter().collect();
        assert_eq!(unique.len(), collected.len());
    }

    #[test]
    fn test_targets_are_ascending_with_unique_file_names() {
        let targets: Vec<DownloadTarget> = GlpUrls::new(BASE, 2004, 2024, 2).targets().collect();

        let pairs: Vec<(i32, u32)> = targets.iter().map(|t| (t.year, t.semester)).collect();
        let mut sorted = pairs.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(pairs, sorted);

        let names: HashSet<String> = targets.iter().map(|t| t.file_name().unwrap()).collect();
        assert_eq!(names.len(), targets.len());
        assert_eq!(targets[0].file_name().unwrap(), "glp-2004-01.csv");
        assert_eq!(
            targets[34].file_name().unwrap(),
            "precos-semestrais-glp2021-01.csv"
        );
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let urls = GlpUrls::new(BASE, 2024, 2004, 2);
        assert_eq!(urls.len(), 0);
        assert_eq!(urls.count(), 0);
    }

    #[test]
    fn test_zero_semesters_is_empty() {
        assert_eq!(GlpUrls::new(BASE, 2004, 2024, 0).count(), 0);
    }

    #[test]
    fn test_other_semester_counts() {
        let urls: Vec<String> = GlpUrls::new(BASE, 2010, 2011, 3).collect();
        assert_eq!(urls.len(), 6);
        assert_eq!(urls[2], format!("{}/glp-2010-03.csv", BASE));
        assert_eq!(urls[3], format!("{}/glp-2011-01.csv", BASE));
    }

    #[test]
    fn test_clone_restarts_sequence() {
        let urls = GlpUrls::new(BASE, 2004, 2005, 2);
        let first: Vec<String> = urls.clone().collect();
        let second: Vec<String> = urls.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut urls = GlpUrls::new(BASE, 2004, 2005, 2);
        assert_eq!(urls.len(), 4);
        urls.next();
        assert_eq!(urls.len(), 3);
        urls.next();
        urls.next();
        assert_eq!(urls.len(), 1);
        urls.next();
        assert_eq!(urls.len(), 0);
        assert!(urls.next().is_none());
    }

    #[test]
    fn test_last_representable_year_terminates() {
        let urls = GlpUrls::new("http://h", i32::MAX, i32::MAX, 2);
        assert_eq!(urls.len(), 2);
        let collected: Vec<String> = urls.collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1], format!("http://h/glp-{}-02.csv", i32::MAX));
    }

    #[test]
    fn test_full_i32_range_length_does_not_overflow() {
        let urls = GlpUrls::new("http://h", i32::MIN, i32::MAX, 2);
        let expected = (u64::from(u32::MAX) + 1) * 2;
        assert_eq!(urls.len() as u64, expected.min(usize::MAX as u64));
    }
}
