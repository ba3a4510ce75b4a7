// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! The registry of known presidential elections on the portal.
//!
//! Each contest is addressed by a pair of opaque portal parameters (tvd, vrn)
//! which were found by hand; there is no API to discover them.

/// One known election. `key` is what the user types on the command line;
/// `id` is the stable identifier used in the persisted collection.
pub struct KnownElection {
    pub key : &'static str,
    pub tvd : &'static str,
    pub vrn : &'static str,
    pub year : u32,
    pub date : &'static str,
    pub title : &'static str,
    pub id : &'static str,
}

impl KnownElection {
    /// The per-federal-subject results view (candidates x regions) is report type 226.
    pub fn url(&self) -> String {
        format!("https://www.vybory.izbirkom.ru/region/region/izbirkom?action=show&root_a=412&tvd={tvd}&vrn={vrn}&region=0&global=1&sub_region=0&prver=0&pronetvd=null&vibid={vrn}&type=226",tvd=self.tvd,vrn=self.vrn)
    }

    pub fn find(key:&str) -> Option<&'static KnownElection> {
        KNOWN_ELECTIONS.iter().find(|e|e.key==key)
    }

    pub fn all_keys() -> Vec<&'static str> {
        KNOWN_ELECTIONS.iter().map(|e|e.key).collect()
    }
}

pub const KNOWN_ELECTIONS : &[KnownElection] = &[
    KnownElection{ key:"2024",   tvd:"100100084849066", vrn:"100100084849062", year:2024, date:"15–17 марта 2024", title:"Выборы Президента РФ 2024",          id:"president_2024" },
    KnownElection{ key:"2018",   tvd:"100100084849065", vrn:"100100084849061", year:2018, date:"18 марта 2018",    title:"Выборы Президента РФ 2018",          id:"president_2018" },
    KnownElection{ key:"2012",   tvd:"100100022336596", vrn:"100100022336812", year:2012, date:"4 марта 2012",     title:"Выборы Президента РФ 2012",          id:"president_2012" },
    KnownElection{ key:"2008",   tvd:"100100021960070", vrn:"100100021960066", year:2008, date:"2 марта 2008",     title:"Выборы Президента РФ 2008",          id:"president_2008" },
    KnownElection{ key:"2004",   tvd:"100100021596090", vrn:"100100021596451", year:2004, date:"14 марта 2004",    title:"Выборы Президента РФ 2004",          id:"president_2004" },
    KnownElection{ key:"2000",   tvd:"100100020800339", vrn:"100100020800085", year:2000, date:"26 марта 2000",    title:"Выборы Президента РФ 2000",          id:"president_2000" },
    KnownElection{ key:"1996r1", tvd:"100100020578856", vrn:"100100020578765", year:1996, date:"16 июня 1996",     title:"Выборы Президента РФ 1996 (1 тур)",  id:"president_1996_r1" },
    KnownElection{ key:"1996r2", tvd:"100100020578857", vrn:"100100020578766", year:1996, date:"3 июля 1996",      title:"Выборы Президента РФ 1996 (2 тур)",  id:"president_1996_r2" },
    KnownElection{ key:"1991",   tvd:"100100020404560", vrn:"100100020404500", year:1991, date:"12 июня 1991",     title:"Выборы Президента РСФСР 1991",       id:"president_1991" },
];

/// The set scraped when the user names no elections. The in-between years are
/// already curated by hand and rarely need a re-scrape.
pub const DEFAULT_ELECTIONS : &[&str] = &["2024","2000","1996r1","1996r2","1991"];

pub const PORTAL_ROOT : &str = "https://www.vybory.izbirkom.ru/";
