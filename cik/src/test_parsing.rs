// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! Parsing of synthetic results tables, and the helpers that feed into it.


#[cfg(test)]
mod tests {
    use scraper::{ElementRef, Html, Selector};
    use crate::candidates::{build_candidate, color_for_candidate, shorten_name};
    use crate::parse_results::{locate_results_table, parse_percentage, parse_results_table, ParseError};
    use crate::regions::{RegionIndex, RegionKey};

    fn reference() -> RegionIndex {
        RegionIndex::from_pairs(vec![
            ("moskva".to_string(),"г. Москва".to_string()),
            ("primorskiy".to_string(),"Приморский край".to_string()),
        ])
    }

    fn key(s:&str) -> RegionKey { RegionKey(s.to_string()) }

    fn first_table(document:&Html) -> ElementRef<'_> {
        document.select(&Selector::parse("table").unwrap()).next().unwrap()
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("54,3"),Some(54.3));
        assert_eq!(parse_percentage("12.34"),Some(12.34));
        assert_eq!(parse_percentage("100"),Some(100.0));
        assert_eq!(parse_percentage("0"),Some(0.0));
        assert_eq!(parse_percentage("67,5\u{a0}"),Some(67.5));
        assert_eq!(parse_percentage("54,333"),Some(54.33));
        // values over 100 are absolute vote counts, not percentages
        assert_eq!(parse_percentage("100,01"),None);
        assert_eq!(parse_percentage("1234567"),None);
        assert_eq!(parse_percentage("1 234 567"),None);
        assert_eq!(parse_percentage(""),None);
        assert_eq!(parse_percentage("н/д"),None);
    }

    const SYNTHETIC_TABLE : &str = "<html><body><table>\
        <tr><td></td><td>Россия</td><td>Москва</td><td>Приморский край</td></tr>\
        <tr><td>Иванов Иван Иванович</td><td>51,20</td><td>60,00</td><td>45,30</td></tr>\
        <tr><td>Явка (%)</td><td>67,50</td><td>70,00</td><td>65,00</td></tr>\
        </table></body></html>";

    #[test]
    fn test_synthetic_table_end_to_end() {
        let document = Html::parse_document(SYNTHETIC_TABLE);
        let parsed = parse_results_table(first_table(&document),&reference()).unwrap();
        assert_eq!(parsed.regions_order.len(),2);
        assert_eq!(parsed.regions_order[0],(2,key("moskva"),"Москва".to_string()));
        assert_eq!(parsed.regions_order[1],(3,key("primorskiy"),"Приморский край".to_string()));
        assert_eq!(parsed.national_column,Some(1));
        assert!(parsed.unresolved.is_empty());
        assert_eq!(parsed.candidates.len(),1);
        let candidate = &parsed.candidates[0];
        assert_eq!(candidate.raw_name,"Иванов Иван Иванович");
        assert_eq!(candidate.pct_national,Some(51.2));
        assert_eq!(candidate.regions.get(&key("moskva")),Some(&60.0));
        assert_eq!(candidate.regions.get(&key("primorskiy")),Some(&45.3));
        assert_eq!(parsed.turnout.get(&key("moskva")),Some(&70.0));
        assert_eq!(parsed.turnout.get(&key("primorskiy")),Some(&65.0));
    }

    #[test]
    fn test_row_classification() {
        let html = "<table>\
            <tr><td></td><td>Москва</td></tr>\
            <tr><td>Число избирателей, включенных в список</td><td>7000000</td></tr>\
            <tr><td>Явка избирателей</td><td>70,00</td></tr>\
            <tr><td>Петров Петр Петрович</td><td>33,30</td></tr>\
            </table>";
        let document = Html::parse_document(html);
        let parsed = parse_results_table(first_table(&document),&reference()).unwrap();
        // the administrative row appears nowhere; the turnout row is never a candidate
        assert_eq!(parsed.candidates.len(),1);
        assert_eq!(parsed.candidates[0].raw_name,"Петров Петр Петрович");
        assert_eq!(parsed.turnout.get(&key("moskva")),Some(&70.0));
        assert_eq!(parsed.national_column,None);
    }

    #[test]
    fn test_candidate_row_with_no_parsed_values_is_discarded() {
        let html = "<table>\
            <tr><td></td><td>Москва</td></tr>\
            <tr><td>Сидоров Сидор</td><td>7000000</td></tr>\
            <tr><td>Петров Петр</td><td>33,30</td></tr>\
            </table>";
        let document = Html::parse_document(html);
        let parsed = parse_results_table(first_table(&document),&reference()).unwrap();
        // Сидоров's only cell is an absolute count, so his row yields nothing
        assert_eq!(parsed.candidates.len(),1);
        assert_eq!(parsed.candidates[0].raw_name,"Петров Петр");
    }

    #[test]
    fn test_duplicate_region_columns_last_write_wins() {
        let html = "<table>\
            <tr><td></td><td>Москва</td><td>г. Москва</td></tr>\
            <tr><td>Петров Петр</td><td>10,00</td><td>20,00</td></tr>\
            <tr><td>Явка</td><td>50,00</td><td>60,00</td></tr>\
            </table>";
        let document = Html::parse_document(html);
        let parsed = parse_results_table(first_table(&document),&reference()).unwrap();
        assert_eq!(parsed.regions_order.len(),2);
        assert_eq!(parsed.candidates[0].regions.get(&key("moskva")),Some(&20.0));
        assert_eq!(parsed.turnout.get(&key("moskva")),Some(&60.0));
    }

    #[test]
    fn test_unresolved_header_is_reported_and_excluded() {
        let html = "<table>\
            <tr><td></td><td>Неведомый край</td><td>Москва</td></tr>\
            <tr><td>Петров Петр</td><td>11,00</td><td>22,00</td></tr>\
            <tr><td>Явка</td><td>51,00</td><td>61,00</td></tr>\
            </table>";
        let document = Html::parse_document(html);
        let parsed = parse_results_table(first_table(&document),&reference()).unwrap();
        assert_eq!(parsed.unresolved,vec!["Неведомый край".to_string()]);
        assert_eq!(parsed.regions_order.len(),1);
        assert_eq!(parsed.candidates[0].regions.get(&key("moskva")),Some(&22.0));
    }

    #[test]
    fn test_table_too_small() {
        let html = "<table><tr><td>Москва</td></tr><tr><td>Петров</td></tr></table>";
        let document = Html::parse_document(html);
        match parse_results_table(first_table(&document),&reference()) {
            Err(ParseError::TableTooSmall(2)) => {}
            other => panic!("expected TableTooSmall(2), got {:?}",other.map(|_|())),
        }
    }

    #[test]
    fn test_locator_prefers_markup_signature() {
        let html = "<html><body>\
            <table><tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td><td>7</td></tr></table>\
            <table class=\"election-results\"><tr><td>narrow</td></tr></table>\
            </body></html>";
        let document = Html::parse_document(html);
        let table = locate_results_table(&document).unwrap();
        assert!(table.html().contains("narrow"));
    }

    #[test]
    fn test_locator_fallback_picks_widest_header_row() {
        let html = "<html><body>\
            <table><tr><td>a</td><td>b</td><td>c</td></tr></table>\
            <table><tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td><td>7</td></tr></table>\
            </body></html>";
        let document = Html::parse_document(html);
        let table = locate_results_table(&document).unwrap();
        let cells = Selector::parse("td").unwrap();
        assert_eq!(table.select(&cells).count(),7);
    }

    #[test]
    fn test_locator_rejects_narrow_tables() {
        let html = "<table><tr><td>a</td><td>b</td><td>c</td><td>d</td><td>e</td></tr></table>";
        let document = Html::parse_document(html);
        assert!(locate_results_table(&document).is_none());
    }

    #[test]
    fn test_shorten_name() {
        assert_eq!(shorten_name("Иванов Иван Иванович"),"Иванов И.И.");
        assert_eq!(shorten_name("Иванов Иван"),"Иванов И.");
        assert_eq!(shorten_name("Иванов"),"Иванов");
        assert_eq!(shorten_name("  Иванов Иван Иванович  "),"Иванов И.И.");
    }

    #[test]
    fn test_candidate_colors() {
        assert_eq!(color_for_candidate("Путин Владимир Владимирович"),"#1565C0");
        assert_eq!(color_for_candidate("ЗЮГАНОВ Геннадий Андреевич"),"#b71c1c");
        assert_eq!(color_for_candidate("Против всех кандидатов"),"#9E9E9E");
        assert_eq!(color_for_candidate("Совершенно Неизвестный"),"#9E9E9E");
    }

    #[test]
    fn test_build_candidate() {
        let mut regions = std::collections::BTreeMap::new();
        regions.insert(key("moskva"),60.0);
        let candidate = build_candidate(" Иванов Иван Иванович ",regions,Some(51.2));
        assert_eq!(candidate.name,"Иванов И.И.");
        assert_eq!(candidate.raw_name,"Иванов Иван Иванович");
        assert_eq!(candidate.party,"");
        assert_eq!(candidate.pct_national,Some(51.2));
        assert_eq!(candidate.regions.len(),1);
    }
}
