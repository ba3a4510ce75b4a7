// Copyright 2026 the CikScrape developers.
// This file is part of CikScrape.
// CikScrape is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// CikScrape is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with CikScrape.  If not, see <https://www.gnu.org/licenses/>.


//! Downloading pages from the results portal.
//!
//! The portal is slow and rate limits aggressively, so every request goes
//! through a single politeness gate. Pages from the 1990s and 2000s are served
//! as windows-1251; the charset header is honoured explicitly rather than
//! trusting any default.

use std::sync::Mutex;
use std::thread::sleep;
use std::time::Duration;
use anyhow::anyhow;
use once_cell::sync::OnceCell;
use reqwest::header;

/// Minimum delay before each request to the portal.
pub const POLITENESS_DELAY : Duration = Duration::from_millis(1500);
const ATTEMPTS : usize = 3;
const TIMEOUT : Duration = Duration::from_secs(20);

/// The portal serves a different (useless) page to clients without browser-like headers.
const USER_AGENT : &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

pub struct Fetcher {
    client : reqwest::blocking::Client,
}

impl Fetcher {
    fn rate_limit() {
        static DOWNLOAD_RATE_LIMIT_MUTEX: OnceCell<Mutex<()>> = OnceCell::new();
        let _lock = DOWNLOAD_RATE_LIMIT_MUTEX.get_or_init(||Mutex::new(())).lock().unwrap();
        sleep(POLITENESS_DELAY);
    }

    pub fn new() -> anyhow::Result<Fetcher> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT,"text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".parse()?);
        headers.insert(header::ACCEPT_LANGUAGE,"ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7".parse()?);
        headers.insert(header::REFERER,"https://www.vybory.izbirkom.ru/".parse()?);
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(TIMEOUT)
            .build()?;
        Ok(Fetcher{client})
    }

    /// Download a url as text, retrying transient failures a bounded number of
    /// times with a longer sleep between attempts. After the last attempt the
    /// error is the caller's problem; one failed page must not stop a batch.
    pub fn fetch(&self,url:&str) -> anyhow::Result<String> {
        let mut last_error : Option<anyhow::Error> = None;
        for attempt in 0..ATTEMPTS {
            if attempt>0 { sleep(POLITENESS_DELAY*2); }
            Self::rate_limit();
            match self.try_fetch(url) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    println!("    Attempt {}/{} failed : {}",attempt+1,ATTEMPTS,e);
                    last_error=Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(||anyhow!("could not download {}",url)))
    }

    fn try_fetch(&self,url:&str) -> anyhow::Result<String> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let charset = response.headers().get(header::CONTENT_TYPE)
            .and_then(|v|v.to_str().ok())
            .and_then(|ct|ct.split(';').find_map(|p|p.trim().strip_prefix("charset=")))
            .map(|c|c.trim_matches('"').to_ascii_lowercase());
        let bytes = response.bytes()?;
        // iso-8859-5 labels on the old pages are lies; the bytes are windows-1251.
        let text = match charset.as_deref() {
            Some("windows-1251")|Some("cp1251")|Some("iso-8859-5") => {
                let (decoded,_,_) = encoding_rs::WINDOWS_1251.decode(&bytes);
                decoded.into_owned()
            }
            _ => String::from_utf8_lossy(&bytes).into_owned(),
        };
        Ok(text)
    }

    /// A cheap reachability probe, used before starting a batch and for --test.
    pub fn check_connectivity(&self,url:&str) -> anyhow::Result<()> {
        let response = self.client.get(url).send()?;
        println!("  OK : {}",response.status());
        Ok(())
    }
}
