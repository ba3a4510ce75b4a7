// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


pub mod regions;
pub mod election_data;
pub mod candidates;
pub mod parse_results;
pub mod download;
pub mod elections;
pub mod scrape;
mod test_regions;
mod test_parsing;
