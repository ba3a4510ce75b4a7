// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! Merge semantics of the persisted collection : upsert by id, metadata
//! preservation, deterministic order, and a JSON round trip.

use std::collections::BTreeMap;
use cik::election_data::{merge_results, CandidateRecord, ElectionResult};
use cik::regions::RegionKey;

fn candidate(raw_name:&str,pct:f64) -> CandidateRecord {
    let mut regions = BTreeMap::new();
    regions.insert(RegionKey("moskva".to_string()),pct);
    CandidateRecord {
        name: raw_name.to_string(),
        raw_name: raw_name.to_string(),
        party: String::new(),
        color: "#9E9E9E".to_string(),
        pct_national: Some(pct),
        regions,
    }
}

fn result(id:&str,year:u32,title:&str,candidates:Vec<CandidateRecord>) -> ElectionResult {
    ElectionResult {
        id: id.to_string(),
        year,
        date: format!("март {}",year),
        title: title.to_string(),
        source: "cikrf.ru".to_string(),
        candidates,
        turnout: BTreeMap::new(),
    }
}

fn as_json(collection:&[ElectionResult]) -> String {
    serde_json::to_string_pretty(collection).unwrap()
}

#[test]
fn test_merge_is_idempotent() {
    let existing = vec![result("president_2024",2024,"Выборы Президента РФ 2024",vec![candidate("Старый Кандидат",10.0)])];
    let incoming = vec![result("president_2024",2024,"Выборы Президента РФ 2024",vec![candidate("Новый Кандидат",20.0)])];
    let once = merge_results(existing.clone(),incoming.clone());
    let twice = merge_results(once.clone(),incoming);
    assert_eq!(once.len(),1);
    assert_eq!(once[0].candidates.len(),1);
    assert_eq!(once[0].candidates[0].raw_name,"Новый Кандидат");
    assert_eq!(as_json(&once),as_json(&twice));
}

#[test]
fn test_merge_preserves_curated_metadata() {
    let mut existing_record = result("president_2024",2024,"Выборы Президента РФ 2024",vec![candidate("Старый",10.0)]);
    existing_record.date = "15–17 марта 2024".to_string();
    let mut incoming_record = result("president_2024",0,"scraped placeholder title",vec![candidate("Новый",20.0)]);
    incoming_record.source = "cikrf.ru (re-scrape)".to_string();
    let merged = merge_results(vec![existing_record],vec![incoming_record]);
    assert_eq!(merged.len(),1);
    // year/date/title survive a re-scrape untouched
    assert_eq!(merged[0].title,"Выборы Президента РФ 2024");
    assert_eq!(merged[0].year,2024);
    assert_eq!(merged[0].date,"15–17 марта 2024");
    // volatile fields are replaced
    assert_eq!(merged[0].candidates[0].raw_name,"Новый");
    assert_eq!(merged[0].source,"cikrf.ru (re-scrape)");
}

#[test]
fn test_merge_inserts_new_records_in_stable_order() {
    let existing = vec![result("president_2024",2024,"2024",vec![])];
    let incoming = vec![
        result("president_1996_r2",1996,"1996 r2",vec![]),
        result("president_1991",1991,"1991",vec![]),
        result("president_1996_r1",1996,"1996 r1",vec![]),
    ];
    let merged = merge_results(existing,incoming);
    let ids : Vec<&str> = merged.iter().map(|r|r.id.as_str()).collect();
    assert_eq!(ids,vec!["president_1991","president_1996_r1","president_1996_r2","president_2024"]);
}

#[test]
fn test_merge_never_deletes() {
    let existing = vec![
        result("president_2000",2000,"2000",vec![]),
        result("president_2024",2024,"2024",vec![]),
    ];
    let merged = merge_results(existing,vec![result("president_1991",1991,"1991",vec![])]);
    assert_eq!(merged.len(),3);
}

#[test]
fn test_collection_json_round_trip() {
    let collection = vec![result("president_2024",2024,"Выборы Президента РФ 2024",vec![candidate("Иванов И.И.",51.2)])];
    let json = as_json(&collection);
    // non-ASCII is written literally, not \u-escaped
    assert!(json.contains("Выборы Президента РФ 2024"));
    assert!(json.contains("moskva"));
    let reread : Vec<ElectionResult> = serde_json::from_str(&json).unwrap();
    assert_eq!(as_json(&reread),json);
}
