// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! Turning a raw candidate row label into a display record.

use std::collections::BTreeMap;
use crate::election_data::CandidateRecord;
use crate::regions::RegionKey;

/// Display colors by surname fragment, lower case, scanned in order; the first
/// fragment found as a substring of the candidate's name wins. Two candidates
/// sharing a fragment get the same color; this is presentation, not identity.
const CANDIDATE_COLORS : &[(&str,&str)] = &[
    ("путин",         "#1565C0"),
    ("харитонов",     "#e53935"),
    ("даванков",      "#4CAF50"),
    ("слуцкий",       "#FF9800"),
    ("грудинин",      "#e53935"),
    ("жириновский",   "#FF9800"),
    ("собчак",        "#E91E63"),
    ("сурайкин",      "#9E9E9E"),
    ("бабурин",       "#78909C"),
    ("титов",         "#8BC34A"),
    ("явлинский",     "#4CAF50"),
    ("зюганов",       "#b71c1c"),
    ("медведев",      "#1565C0"),
    ("богданов",      "#607D8B"),
    ("прохоров",      "#607D8B"),
    ("миронов",       "#4CAF50"),
    ("глазьев",       "#FF5722"),
    ("хакамада",      "#E91E63"),
    ("малышкин",      "#FF9800"),
    ("рыжков",        "#e53935"),
    ("лебедь",        "#607D8B"),
    ("тулеев",        "#795548"),
    ("макашов",       "#607D8B"),
    ("бакатин",       "#9C27B0"),
    ("ельцин",        "#1565C0"),
    ("горбачёв",      "#9E9E9E"),
    ("шаккум",        "#9E9E9E"),
    ("власов",        "#9E9E9E"),
    ("брынцалов",     "#9E9E9E"),
    ("памфилова",     "#E91E63"),
    ("говорухин",     "#9C27B0"),
    ("скуратов",      "#9E9E9E"),
    ("подберёзкин",   "#9E9E9E"),
    ("джабраилов",    "#9E9E9E"),
    ("против всех",   "#9E9E9E"),
];

const DEFAULT_COLOR : &str = "#9E9E9E";

/// The display color for a candidate : first-substring-hit lookup over the
/// fragment table above.
pub fn color_for_candidate(raw_name:&str) -> &'static str {
    let lower = raw_name.to_lowercase();
    CANDIDATE_COLORS.iter().find(|(fragment,_)|lower.contains(fragment)).map(|(_,color)|*color).unwrap_or(DEFAULT_COLOR)
}

/// Shorten "Фамилия Имя Отчество" to "Фамилия И.О.", and "Фамилия Имя" to
/// "Фамилия И.". Anything shorter is left as is.
pub fn shorten_name(raw:&str) -> String {
    let parts : Vec<&str> = raw.split_whitespace().collect();
    match parts.len() {
        n if n>=3 => format!("{} {}.{}.",parts[0],initial(parts[1]),initial(parts[2])),
        2 => format!("{} {}.",parts[0],initial(parts[1])),
        _ => raw.trim().to_string(),
    }
}

// split_whitespace never yields an empty token.
fn initial(word:&str) -> char { word.chars().next().unwrap() }

/// Assemble the full record for one candidate row.
pub fn build_candidate(raw_name:&str,regions:BTreeMap<RegionKey,f64>,pct_national:Option<f64>) -> CandidateRecord {
    let name = raw_name.trim();
    CandidateRecord {
        name: shorten_name(name),
        raw_name: name.to_string(),
        party: String::new(),
        color: color_for_candidate(name).to_string(),
        pct_national,
        regions,
    }
}
