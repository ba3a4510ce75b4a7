// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! The extracted results for one election, and the persisted collection of them.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path,PathBuf};
use serde::{Serialize,Deserialize};
use crate::regions::RegionKey;

/// One candidate's results across regions. `name` is the shortened display
/// form; `raw_name` is the row label verbatim for traceability.
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct CandidateRecord {
    pub name : String,
    pub raw_name : String,
    /// not published in the per-region table; kept for hand curation.
    pub party : String,
    /// display color, e.g. "#1565C0"
    pub color : String,
    /// the nationwide percentage, if the table had a national column.
    pub pct_national : Option<f64>,
    /// percentage per region. Every key is a resolved region key.
    pub regions : BTreeMap<RegionKey,f64>,
}

/// Everything extracted from one election's results page, plus the registry
/// metadata identifying it. `id` is immutable once assigned and is the merge key.
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ElectionResult {
    pub id : String,
    pub year : u32,
    pub date : String,
    pub title : String,
    /// where the data came from, e.g. "cikrf.ru"
    pub source : String,
    pub candidates : Vec<CandidateRecord>,
    /// turnout percentage per region.
    pub turnout : BTreeMap<RegionKey,f64>,
}

impl ElectionResult {
    /// Write this result on its own, pretty printed, independently of the merged collection.
    pub fn save_artifact(&self,dir:&Path,election_key:&str) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json",election_key));
        serde_json::to_writer_pretty(File::create(&path)?,self)?;
        Ok(path)
    }
}

/// Read the persisted collection. A missing file is an empty collection, not an error.
pub fn load_collection(path:&Path) -> anyhow::Result<Vec<ElectionResult>> {
    if !path.exists() { return Ok(Vec::new()); }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Write the collection, pretty printed, creating parent directories as needed.
pub fn save_collection(path:&Path,collection:&[ElectionResult]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() { std::fs::create_dir_all(parent)?; }
    serde_json::to_writer_pretty(File::create(path)?,collection)?;
    Ok(())
}

/// Merge freshly scraped results into the existing collection, keyed by id.
/// A matching record keeps its year/date/title and any hand-curated metadata;
/// only candidates, turnout and source are replaced. Unmatched incoming
/// records are appended. Nothing is ever deleted. The returned collection is
/// sorted by (year, id) so the persisted file has a stable order.
pub fn merge_results(existing:Vec<ElectionResult>,incoming:Vec<ElectionResult>) -> Vec<ElectionResult> {
    let mut merged = existing;
    for record in incoming {
        match merged.iter_mut().find(|e|e.id==record.id) {
            Some(entry) => {
                entry.candidates = record.candidates;
                entry.turnout = record.turnout;
                entry.source = record.source;
                println!("  Updated : {}",entry.id);
            }
            None => {
                println!("  Added : {}",record.id);
                merged.push(record);
            }
        }
    }
    merged.sort_by(|a,b|a.year.cmp(&b.year).then_with(||a.id.cmp(&b.id)));
    merged
}
