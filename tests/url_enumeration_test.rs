use anp_etl::core::urls::{publication_url, DEFAULT_BASE_URL};
use anp_etl::GlpUrls;

#[test]
fn test_full_historical_series() {
    let urls: Vec<String> = GlpUrls::new(DEFAULT_BASE_URL, 2004, 2024, 2).collect();

    assert_eq!(urls.len(), (2024 - 2004 + 1) * 2);
    assert_eq!(
        urls.first().unwrap(),
        "https://www.gov.br/anp/pt-br/centrais-de-conteudo/dados-abertos/arquivos/shpc/dsas/glp/glp-2004-01.csv"
    );
    assert!(urls.contains(&format!(
        "{}/precos-semestrais-glp2021-01.csv",
        DEFAULT_BASE_URL
    )));
    assert!(urls.contains(&format!(
        "{}/precos-semestrais-glp-2022-01.csv",
        DEFAULT_BASE_URL
    )));

    let overrides = urls
        .iter()
        .filter(|u| u.contains("precos-semestrais"))
        .count();
    assert_eq!(overrides, 2);
}

#[test]
fn test_count_formula_across_ranges() {
    for (start, end, semesters) in [(2004, 2004, 1), (2010, 2015, 2), (2000, 2009, 4)] {
        let expected = ((end - start + 1) as usize) * semesters as usize;
        assert_eq!(GlpUrls::new("http://h", start, end, semesters).count(), expected);
    }
}

#[test]
fn test_publication_url_is_pure() {
    assert_eq!(
        publication_url("http://h/glp", 2021, 1),
        publication_url("http://h/glp", 2021, 1)
    );
    assert_ne!(
        publication_url("http://h/glp", 2021, 1),
        publication_url("http://h/glp", 2022, 1)
    );
}
