// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! Scraping one election : fetch the page, sanity check it, parse the table,
//! assemble the result and write the per-election artifact.

use std::path::{Path,PathBuf};
use anyhow::anyhow;
use scraper::Html;
use crate::candidates::build_candidate;
use crate::download::Fetcher;
use crate::election_data::ElectionResult;
use crate::elections::KnownElection;
use crate::parse_results::{locate_results_table, parse_results_table, ParseError};
use crate::regions::RegionIndex;

/// Scrapes elections one at a time. Owns the region index (built once per run)
/// and the output directory, which holds the merged collection at its root and
/// per-election artifacts under scraped/.
pub struct CikDataLoader {
    regions : RegionIndex,
    fetcher : Fetcher,
    out_dir : PathBuf,
}

/// The page should mention voters or candidates somewhere. A page that mentions
/// neither is probably an error page or a redirect stub, not results.
pub fn looks_like_results_page(html:&str) -> bool {
    let lower = html.to_lowercase();
    lower.contains("избирател")||lower.contains("кандидат")
}

impl CikDataLoader {
    pub fn new(regions:RegionIndex,fetcher:Fetcher,out_dir:PathBuf) -> Self {
        CikDataLoader{regions,fetcher,out_dir}
    }

    pub fn scraped_dir(&self) -> PathBuf { self.out_dir.join("scraped") }
    pub fn debug_dir(&self) -> PathBuf { self.scraped_dir().join("debug") }
    /// the merged collection of every election scraped so far.
    pub fn collection_path(&self) -> PathBuf { self.out_dir.join("president_regions.json") }

    /// Scrape one election and write its artifact. Any failure here is specific
    /// to this election; callers catch it and carry on with the rest of the batch.
    pub fn scrape_election(&self,election:&KnownElection) -> anyhow::Result<ElectionResult> {
        let url = election.url();
        println!("\n  Fetching : {}",election.title);
        println!("  URL : {}",url);
        let html = self.fetcher.fetch(&url)?;
        if !looks_like_results_page(&html) {
            let debug_path = self.save_debug_html(election.key,&html)?;
            return Err(anyhow!("page does not look like election results; raw copy saved to {}",debug_path.to_string_lossy()));
        }
        let document = Html::parse_document(&html);
        let table = locate_results_table(&document).ok_or(ParseError::NoResultsTable)?;
        let parsed = parse_results_table(table,&self.regions)?;
        for name in &parsed.unresolved {
            println!("    UNRESOLVED region header : \"{}\"",name);
        }
        println!("    Regions recognised : {}, national column : {:?}",parsed.regions_order.len(),parsed.national_column);
        let result = ElectionResult {
            id: election.id.to_string(),
            year: election.year,
            date: election.date.to_string(),
            title: election.title.to_string(),
            source: "cikrf.ru".to_string(),
            candidates: parsed.candidates.into_iter().map(|c|build_candidate(&c.raw_name,c.regions,c.pct_national)).collect(),
            turnout: parsed.turnout,
        };
        println!("    Candidates found : {}",result.candidates.len());
        for candidate in &result.candidates {
            println!("      {:40} national={} regions={}",
                     candidate.raw_name,
                     candidate.pct_national.map(|p|format!("{}%",p)).unwrap_or_else(||"-".to_string()),
                     candidate.regions.len());
        }
        let artifact = result.save_artifact(&self.scraped_dir(),election.key)?;
        println!("    Saved : {}",artifact.to_string_lossy());
        Ok(result)
    }

    /// Keep the raw page for manual inspection when it fails the sanity check.
    fn save_debug_html(&self,election_key:&str,html:&str) -> anyhow::Result<PathBuf> {
        let dir = self.debug_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.html",election_key));
        std::fs::write(&path,html)?;
        Ok(path)
    }

    pub fn out_dir(&self) -> &Path { &self.out_dir }
}
