// src/specs/calendar.rs
//! Scraping *spec* for the advent calendar page.
//!
//! Participants are the `<a href="/{user}">` links inside
//! `.adventCalendarCalendar_day .adventCalendarCalendar_author`, in document
//! (= day) order. Days without an author simply contribute nothing.

use log::{debug, warn};

use crate::config::consts::{AUTHOR_CLASS, DAY_CLASS};
use crate::config::options::NetOptions;
use crate::core::{html, net::Fetch, sanitize::strip_first_char};
use crate::error::Result;

pub fn fetch(client: &dyn Fetch, net: &NetOptions, calendar: &str) -> Result<Vec<String>> {
    let url = net.calendar_url(calendar);
    let doc = client.get_text(&url)?;
    let ids = extract_participants(&doc)?;
    debug!("{calendar}: {} participants", ids.len());
    Ok(ids)
}

/// Participant ids in document order. Markup is read leniently (omitted end
/// tags, unclosed comments); a tag cut off inside the selector path is an
/// error. An anchor without `href` is skipped.
pub fn extract_participants(doc: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();

    html::for_each_with_class(doc, 0, DAY_CLASS, |day_start, day_end| {
        let day = &doc[..day_end];
        html::for_each_with_class(day, day_start, AUTHOR_CLASS, |author_start, author_end| {
            collect_anchor_ids(&doc[..author_end], author_start, &mut ids)
        })
    })?;

    Ok(ids)
}

fn collect_anchor_ids(s: &str, from: usize, ids: &mut Vec<String>) -> Result<()> {
    let mut pos = from;
    while let Some(tag) = html::next_tag(s, pos)? {
        pos = tag.end;
        if !tag.is_open("a") {
            continue;
        }
        match tag.attr("href") {
            Some(href) if !href.is_empty() => ids.push(strip_first_char(href).to_string()),
            _ => warn!("author link at {} has no href; skipped", tag.start),
        }
    }
    Ok(())
}
