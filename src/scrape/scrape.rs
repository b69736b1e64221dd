// src/scrape/scrape.rs
use std::{
    sync::{ mpsc, atomic::{ AtomicBool, AtomicUsize, Ordering }},
    thread,
};

use log::{debug, error, info};

use crate::{
    config::options::{ NetOptions, RunOptions },
    core::net::Fetch,
    error::Result,
    model::{ filter_by_tag, Participant },
    progress::Progress,
    specs::{ calendar, items },
};

/// Whole pipeline: calendar page → participant ids → tagged posts per
/// participant. Any failure fails the run; there is no partial result.
pub fn run(
    client: &dyn Fetch,
    opts: &RunOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<Vec<Participant>> {
    info!("Reading calendar {:?}…", opts.calendar);
    let ids = calendar::fetch(client, &opts.net, &opts.calendar).inspect_err(|e| error!("{e}"))?;
    info!("{} participants; fetching posts tagged {:?}", ids.len(), opts.tag);

    collect_participants(client, opts, &ids, progress)
}

/// One participant: their items, filtered down to `tag`.
pub fn fetch_participant(client: &dyn Fetch, net: &NetOptions, user: &str, tag: &str) -> Result<Participant> {
    let posts = items::fetch(client, net, user)?;
    let total = posts.len();
    let posts = filter_by_tag(posts, tag);
    debug!("{user}: {}/{} posts tagged {tag:?}", posts.len(), total);
    Ok(Participant::new(user, posts))
}

/// Fetch every id on a small worker pool and return the participants in the
/// order of `ids`. The first error stops the pool and is returned.
pub fn collect_participants(
    client: &dyn Fetch,
    opts: &RunOptions,
    ids: &[String],
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Participant>> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
    }

    // Concurrency
    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let workers = opts.workers.min(ids.len()).max(1);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<Participant>)>();

    let outcome = thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let (next, stop) = (&next, &stop);

            scope.spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(user) = ids.get(i) else { break };
                    let result = fetch_participant(client, &opts.net, user, &opts.tag);
                    if tx.send((i, result)).is_err() {
                        break; // receiver gone: run already failed
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        // Aggregate results, keyed by calendar position
        let mut done: Vec<(usize, Participant)> = Vec::with_capacity(ids.len());
        for (i, result) in res_rx {
            match result {
                Ok(participant) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(i, &participant.id);
                    }
                    done.push((i, participant));
                }
                Err(e) => {
                    error!("{e}");
                    stop.store(true, Ordering::Relaxed);
                    return Err(e);
                }
            }
        }
        Ok(done)
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let mut done = outcome?;
    done.sort_by_key(|(i, _)| *i);
    Ok(done.into_iter().map(|(_, participant)| participant).collect())
}
