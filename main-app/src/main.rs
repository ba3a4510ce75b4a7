// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


use std::path::PathBuf;
use anyhow::anyhow;
use clap::Parser;
use cik::download::Fetcher;
use cik::election_data::{load_collection, merge_results, save_collection};
use cik::elections::{KnownElection, DEFAULT_ELECTIONS, PORTAL_ROOT};
use cik::regions::RegionIndex;
use cik::scrape::CikDataLoader;

#[derive(Parser)]
#[command(name="scrape_cik", version)]
/// Scrape per-candidate, per-region presidential election results from the
/// CIK RF portal and merge them into the persisted collection.
struct Opts {
    /// Election keys to scrape, e.g. 2024 2000 1996r1.
    /// If none are given, a default set of the years most in need of re-scraping is used.
    elections : Vec<String>,

    /// Scrape every election in the registry.
    #[arg(long)]
    all : bool,

    /// Only check that the portal is reachable, then exit.
    #[arg(long)]
    test : bool,

    /// Directory for the merged collection and per-election artifacts.
    #[arg(short, long, default_value="data")]
    out : PathBuf,

    /// The region reference table, a CSV of (key, canonical_name) rows.
    #[arg(short, long, default_value="vybory_regions_key.csv")]
    regions : PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opts : Opts = Opts::parse();

    println!("============================================================");
    println!("  CikScrape - presidential election results");
    println!("============================================================");

    // Work out what to scrape before touching the network; an unknown key is a
    // usage error, not a scraping failure.
    let targets : Vec<String> = if opts.all {
        KnownElection::all_keys().iter().map(|k|k.to_string()).collect()
    } else if opts.elections.is_empty() {
        DEFAULT_ELECTIONS.iter().map(|k|k.to_string()).collect()
    } else {
        opts.elections.clone()
    };
    let invalid : Vec<&String> = targets.iter().filter(|k|KnownElection::find(k).is_none()).collect();
    if !invalid.is_empty() {
        return Err(anyhow!("unknown election keys {:?}; valid keys are : {}",
                           invalid,KnownElection::all_keys().join(", ")));
    }

    let regions = RegionIndex::load_or_warn(&opts.regions)?;
    println!("Region reference table : {} entries",regions.len());

    let fetcher = Fetcher::new()?;
    println!("\nChecking connectivity to the portal...");
    if let Err(e) = fetcher.check_connectivity(PORTAL_ROOT) {
        return Err(anyhow!("cannot reach {} : {:#}. Check the network and that the portal is up.",PORTAL_ROOT,e));
    }
    if opts.test {
        println!("--test : connectivity ok, exiting.");
        return Ok(());
    }

    println!("\nPlanned : {}",targets.join(" "));
    let loader = CikDataLoader::new(regions,fetcher,opts.out.clone());

    let mut scraped = Vec::new();
    let mut failed : Vec<String> = Vec::new();
    for key in &targets {
        let election = KnownElection::find(key).unwrap(); // validated above
        match loader.scrape_election(election) {
            Ok(result) => scraped.push(result),
            Err(e) => {
                println!("  ERROR scraping {} : {:#}",key,e);
                failed.push(key.clone());
            }
        }
    }

    println!("\n============================================================");
    println!("Succeeded : {}/{} elections",scraped.len(),targets.len());
    if !failed.is_empty() { println!("Failed : {}",failed.join(" ")); }

    if !scraped.is_empty() {
        println!("\nMerging into {}...",loader.collection_path().to_string_lossy());
        let existing = load_collection(&loader.collection_path())?;
        let merged = merge_results(existing,scraped);
        save_collection(&loader.collection_path(),&merged)?;
        println!("Collection now holds {} records",merged.len());
    }

    Ok(())
}
