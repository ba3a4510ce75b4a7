// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! Locating and parsing the per-region results table.
//!
//! The portal has republished these tables with different markup in pretty much
//! every decade; there is no schema to rely on. The locator tries known markup
//! signatures first and falls back to a structural fingerprint (the table with
//! the widest header row). The parser then classifies header cells into region
//! columns and a national-total column, and rows into candidate, turnout and
//! administrative rows.

use std::collections::BTreeMap;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use crate::regions::{is_aggregate_name, RegionIndex, RegionKey, RegionLookup};

#[derive(Error,Debug)]
pub enum ParseError {
    #[error("could not find a results table in the document")]
    NoResultsTable,
    #[error("results table too small ({0} rows)")]
    TableTooSmall(usize),
}

/// Row labels matching one of these are the turnout row.
const TURNOUT_KEYWORDS : &[&str] = &["явка","turnout"];

/// Row labels matching one of these (and not a turnout keyword) are procedural
/// counts - registered voters, ballots issued/spoiled/invalid, early voting,
/// totals - and are dropped entirely.
const ADMINISTRATIVE_KEYWORDS : &[&str] = &[
    "число", "бюллетен", "не учтен", "список", "зарегистр",
    "получен", "погашен", "выдан", "недействитель", "действительн",
    "досрочн", "помещен", "избиратель", "итого",
];

/// A candidate row before display normalisation.
#[derive(Debug,Clone)]
pub struct RawCandidate {
    pub raw_name : String,
    pub regions : BTreeMap<RegionKey,f64>,
    pub pct_national : Option<f64>,
}

/// Everything extracted from one results table.
#[derive(Debug)]
pub struct ParsedResultsTable {
    /// (column index, key, header text verbatim), left to right. Two headers may
    /// resolve to the same key via the fuzzy fallback; within a row the
    /// rightmost such column wins.
    pub regions_order : Vec<(usize,RegionKey,String)>,
    /// column index of the nationwide total, if the header had one.
    pub national_column : Option<usize>,
    pub candidates : Vec<RawCandidate>,
    pub turnout : BTreeMap<RegionKey,f64>,
    /// header texts the region index could not resolve. These columns are
    /// excluded from all extracted data and must be reported by the caller.
    pub unresolved : Vec<String>,
}

/// Interpret a table cell as a percentage. Comma decimal separators and
/// embedded spaces/NBSPs are tolerated. Values over 100 are judged to be
/// absolute vote counts and rejected; a genuine count of at most 100 votes
/// would slip through, which is accepted. Kept values are rounded to 2 decimals.
pub fn parse_percentage(raw:&str) -> Option<f64> {
    let cleaned : String = raw.replace(',',".").chars().filter(|&c|c!='\u{a0}'&&c!=' ').collect();
    if cleaned.is_empty() { return None; }
    match cleaned.parse::<f64>() {
        Ok(value) if value>100.0 => None,
        Ok(value) => Some((value*100.0).round()/100.0),
        Err(_) => None,
    }
}

/// True if the table's class or id attribute carries one of the naming patterns
/// the portal has used for the results grid.
fn has_results_signature(table:&ElementRef) -> bool {
    let class_hit = table.value().attr("class").map(|c|{
        let c = c.to_lowercase();
        c.contains("sdelect")||c.contains("election")||c.contains("result")
    }).unwrap_or(false);
    let id_hit = table.value().attr("id").map(|i|{
        let i = i.to_lowercase();
        i.contains("result")||i.contains("table")
    }).unwrap_or(false);
    class_hit||id_hit
}

/// Find the table most likely to hold the per-region results. Markup signature
/// first; otherwise the table with the strictly widest first row, provided it
/// has more than 5 cells (narrower tables are assumed to be page furniture).
pub fn locate_results_table(document:&Html) -> Option<ElementRef<'_>> {
    let select_table = Selector::parse("table").unwrap();
    let select_tr = Selector::parse("tr").unwrap();
    let select_cell = Selector::parse("td, th").unwrap();
    for table in document.select(&select_table) {
        if has_results_signature(&table) { return Some(table); }
    }
    let mut best : Option<ElementRef> = None;
    let mut best_cells = 0;
    for table in document.select(&select_table) {
        if let Some(first_row) = table.select(&select_tr).next() {
            let count = first_row.select(&select_cell).count();
            if count>best_cells { best_cells=count; best=Some(table); }
        }
    }
    if best_cells>5 { best } else { None }
}

/// All text inside a cell, each fragment trimmed, concatenated.
fn cell_text(cell:&ElementRef<'_>) -> String {
    cell.text().map(|t|t.trim()).filter(|t|!t.is_empty()).collect()
}

fn row_texts(row:&ElementRef<'_>,select_cell:&Selector) -> Vec<String> {
    row.select(select_cell).map(|c|cell_text(&c)).collect()
}

/// Parse a located results table. The header row gives the region columns and
/// the national-total column; each following row is classified by its label and
/// its percentage cells extracted. Needs at least a header and two data rows.
pub fn parse_results_table(table:ElementRef<'_>,regions:&RegionIndex) -> Result<ParsedResultsTable,ParseError> {
    let select_tr = Selector::parse("tr").unwrap();
    let select_cell = Selector::parse("td, th").unwrap();
    let rows : Vec<ElementRef> = table.select(&select_tr).collect();
    if rows.len()<3 { return Err(ParseError::TableTooSmall(rows.len())); }

    let header = row_texts(&rows[0],&select_cell);
    let mut regions_order : Vec<(usize,RegionKey,String)> = Vec::new();
    let mut unresolved : Vec<String> = Vec::new();
    let mut national_column : Option<usize> = None;
    for (column,text) in header.iter().enumerate() {
        if text.is_empty() { continue; }
        let lower = text.to_lowercase();
        if is_aggregate_name(&lower) || lower.contains("российская федерация") || lower.contains("россия") {
            national_column = Some(column);
            continue;
        }
        match regions.resolve(text) {
            RegionLookup::Region(key) => regions_order.push((column,key,text.clone())),
            RegionLookup::SkippedAggregate => {}
            RegionLookup::Unresolved => unresolved.push(text.clone()),
        }
    }

    let mut candidates : Vec<RawCandidate> = Vec::new();
    let mut turnout : BTreeMap<RegionKey,f64> = BTreeMap::new();
    for row in &rows[1..] {
        let texts = row_texts(row,&select_cell);
        let label = match texts.first() {
            Some(t) if !t.is_empty() => t.clone(),
            _ => continue,
        };
        let label_lower = label.to_lowercase();
        let is_turnout = TURNOUT_KEYWORDS.iter().any(|w|label_lower.contains(w));
        let is_administrative = ADMINISTRATIVE_KEYWORDS.iter().any(|w|label_lower.contains(w));
        if is_administrative && !is_turnout { continue; }
        if is_turnout {
            for (column,key,_) in &regions_order {
                if let Some(value) = texts.get(*column).and_then(|t|parse_percentage(t)) {
                    turnout.insert(key.clone(),value);
                }
            }
        } else {
            let mut pcts : BTreeMap<RegionKey,f64> = BTreeMap::new();
            for (column,key,_) in &regions_order {
                if let Some(value) = texts.get(*column).and_then(|t|parse_percentage(t)) {
                    pcts.insert(key.clone(),value);
                }
            }
            // a candidate row with no parsed regional values is not useful data.
            if !pcts.is_empty() {
                let pct_national = national_column.and_then(|c|texts.get(c)).and_then(|t|parse_percentage(t));
                candidates.push(RawCandidate{raw_name:label,regions:pcts,pct_national});
            }
        }
    }

    Ok(ParsedResultsTable{regions_order,national_column,candidates,turnout,unresolved})
}
