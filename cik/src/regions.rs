// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! Resolution of free-text region names, as they appear in portal table headers,
//! to canonical stable keys. Spellings, punctuation and even the official names of
//! federal subjects vary across three decades of published pages, so resolution
//! goes through several progressively looser stages.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use serde::{Serialize,Deserialize};

/// a federal subject, referred to by its canonical stable key, e.g. "moskva".
/// The key does not change when the subject is officially renamed.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionKey(pub String);
// type alias really, don't want long display
impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

/// The outcome of looking up a raw region name. Aggregate rows (the nationwide
/// total, extraterritorial voting, long-dissolved autonomous okrugs) are skipped
/// rather than unresolved; the distinction matters to callers, so it is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionLookup {
    Region(RegionKey),
    SkippedAggregate,
    Unresolved,
}

/// Names that denote an aggregate or otherwise non-regional row, lower case.
/// A raw name equal to one of these, or containing one as a substring, is skipped.
/// The last six are autonomous okrugs absorbed into other subjects in the 2000s;
/// old pages still list them but the reference table has no key for them.
const SKIP_AGGREGATES : &[&str] = &[
    "российская федерация", "россия", "сумма",
    "город байконур", "байконур",
    "территория за пределами рф",
    "территории за рубежом",
    "за рубежом",
    "агинский бурятский автономный округ",
    "коми-пермяцкий автономный округ",
    "корякский автономный округ",
    "таймырский (долгано-ненецкий) автономный округ",
    "усть-ордынский бурятский автономный округ",
    "эвенкийский автономный округ",
];

/// Alternate spellings and historical names, lower case, checked before the
/// reference table. The tail of the list covers pre-2014 and pre-1993 naming
/// (Камчатская область became Камчатский край, Чечено-Ингушетия split, ...).
const MANUAL_REGION_NAMES : &[(&str,&str)] = &[
    ("г. москва",                                "moskva"),
    ("москва",                                   "moskva"),
    ("г. санкт-петербург",                       "spb"),
    ("санкт-петербург",                          "spb"),
    ("ленинград",                                "spb"),
    ("ямало-ненецкий автономный округ",          "yamalo_nenetskiy"),
    ("ненецкий автономный округ",                "nenetskiy"),
    ("ханты-мансийский автономный округ - югра", "hmao"),
    ("ханты-мансийский автономный округ — югра", "hmao"),
    ("ханты-мансийский автономный округ",        "hmao"),
    ("чукотский автономный округ",               "chukotskiy"),
    ("еврейская автономная область",             "evreyskaya"),
    ("республика северная осетия - алания",      "severnaya_osetiya"),
    ("республика северная осетия",               "severnaya_osetiya"),
    ("кемеровская область - кузбасс",            "kemerovskaya"),
    ("кемеровская область",                      "kemerovskaya"),
    ("камчатская область",                       "kamchatskiy"),
    ("пермская область",                         "permskiy"),
    ("читинская область",                        "zabaykalskiy"),
    ("чечено-ингушетия",                         "chechenskaya"),
    ("чечено-ингушская республика",              "chechenskaya"),
    ("ингушская республика",                     "ingushetiya"),
];

/// True if the lower-cased text is exactly one of the aggregate names.
/// The table parser uses this on header cells when deciding the national column.
pub fn is_aggregate_name(lower:&str) -> bool {
    SKIP_AGGREGATES.iter().any(|s|*s==lower)
}

/// Index from canonical region names to keys, built once per run from the
/// reference table and read-only afterwards. Passed explicitly to the parser
/// so tests can inject a small table.
pub struct RegionIndex {
    /// canonical name, verbatim from the reference table
    exact : HashMap<String,RegionKey>,
    /// normalised name in reference-table order. Kept as a Vec so that the
    /// fuzzy fallback scans entries in a deterministic order.
    normalized : Vec<(String,RegionKey)>,
}

impl RegionIndex {
    /// Build from (key, canonical_name) pairs.
    pub fn from_pairs<I:IntoIterator<Item=(String,String)>>(pairs:I) -> RegionIndex {
        let mut exact = HashMap::new();
        let mut normalized = Vec::new();
        for (key,name) in pairs {
            let key = RegionKey(key.trim().to_string());
            let name = name.trim().to_string();
            normalized.push((normalize_name(&name),key.clone()));
            exact.insert(name,key);
        }
        RegionIndex{exact,normalized}
    }

    /// Read the reference table, a delimited text file whose first two fields
    /// per row are (key, canonical_name). The first row is a header.
    pub fn from_reference_csv(path:&Path) -> anyhow::Result<RegionIndex> {
        let mut rdr = csv::Reader::from_path(path)?;
        let mut pairs = Vec::new();
        for record in rdr.records() {
            let record = record?;
            if record.len()>=2 {
                pairs.push((record[0].to_string(),record[1].to_string()));
            }
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Like from_reference_csv, but a missing file degrades to an empty reference
    /// table (the manual override table still applies) with a printed warning.
    pub fn load_or_warn(path:&Path) -> anyhow::Result<RegionIndex> {
        if path.exists() { Self::from_reference_csv(path) }
        else {
            println!("WARNING : reference table {} not found, resolving with manual overrides only",path.to_string_lossy());
            Ok(Self::from_pairs(Vec::new()))
        }
    }

    /// number of canonical names loaded from the reference table.
    pub fn len(&self) -> usize { self.exact.len() }
    pub fn is_empty(&self) -> bool { self.exact.is_empty() }

    /// Resolve a raw region name. Stages, first match wins :
    /// 1. skip-set entry (exactly or as a substring) → SkippedAggregate
    /// 2. manual override table, lower cased → its key
    /// 3. exact canonical name → its key
    /// 4. normalised name → its key
    /// 5. normalised name is a substring of (or contains) a normalised canonical
    ///    name longer than 5 characters → that key, first hit in table order.
    ///    This can match the wrong subject for very similar names; the explicit
    ///    Unresolved outcome below is preferred to looser guessing.
    /// 6. otherwise Unresolved. Callers must report these, not drop them.
    pub fn resolve(&self,raw:&str) -> RegionLookup {
        let s = raw.trim();
        if s.is_empty() { return RegionLookup::Unresolved; }
        let lower = s.to_lowercase();
        if SKIP_AGGREGATES.iter().any(|skip|lower.contains(skip)) { return RegionLookup::SkippedAggregate; }
        if let Some((_,key)) = MANUAL_REGION_NAMES.iter().find(|(name,_)|*name==lower) {
            return RegionLookup::Region(RegionKey(key.to_string()));
        }
        if let Some(key) = self.exact.get(s) { return RegionLookup::Region(key.clone()); }
        let norm = normalize_name(s);
        if let Some((_,key)) = self.normalized.iter().find(|(name,_)|*name==norm) {
            return RegionLookup::Region(key.clone());
        }
        for (name,key) in &self.normalized {
            if name.chars().count()>5 && (norm.contains(name.as_str()) || name.contains(norm.as_str())) {
                return RegionLookup::Region(key.clone());
            }
        }
        RegionLookup::Unresolved
    }
}

/// Normalisation applied to both canonical and raw names : lower case, drop
/// parenthetical qualifiers, collapse whitespace, drop a trailing
/// dash-separated word ("Кемеровская область — Кузбасс" → "кемеровская область").
fn normalize_name(s:&str) -> String {
    let lower = s.trim().to_lowercase();
    let mut without_parens = String::with_capacity(lower.len());
    let mut depth = 0usize;
    for c in lower.chars() {
        match c {
            '(' => depth+=1,
            ')' => { if depth>0 { depth-=1; } }
            _ if depth==0 => without_parens.push(c),
            _ => {}
        }
    }
    let collapsed = without_parens.split_whitespace().collect::<Vec<_>>().join(" ");
    strip_trailing_dash_word(&collapsed).to_string()
}

/// Remove a final "<dash> word" suffix. Hyphens inside a multi-word name are
/// untouched since the text after them contains whitespace.
fn strip_trailing_dash_word(s:&str) -> &str {
    if let Some((i,c)) = s.char_indices().rev().find(|&(_,c)|c=='—'||c=='–'||c=='-') {
        let tail = s[i+c.len_utf8()..].trim();
        if !tail.is_empty() && tail.chars().all(|c|c.is_alphanumeric()||c=='_') {
            return s[..i].trim_end();
        }
    }
    s
}
