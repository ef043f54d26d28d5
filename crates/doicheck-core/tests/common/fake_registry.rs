//! Scripted in-memory registry

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use doicheck_core::{
    Doi, FailureReason, RegistryRequestFailed, UpdateRelation, WorkFetcher, WorkMetadata,
};

#[derive(Debug, Clone)]
pub enum Reply {
    Found(Vec<UpdateRelation>),
    Fail(FailureReason),
    /// Wait, then answer
    Delay(Duration, Box<Reply>),
    Panic,
}

impl Reply {
    pub fn found() -> Self {
        Reply::Found(Vec::new())
    }

    pub fn after(delay_ms: u64, reply: Reply) -> Self {
        Reply::Delay(Duration::from_millis(delay_ms), Box::new(reply))
    }
}

pub fn retraction_of(doi: &str) -> UpdateRelation {
    UpdateRelation {
        doi: doi.to_string(),
        update_type: "retraction".to_string(),
        label: Some("Retraction".to_string()),
        updated: Some(vec![2021, 2, 4]),
    }
}

/// Answers from a per-DOI script. The last scripted reply repeats; DOIs with
/// no script use the default reply.
pub struct FakeRegistry {
    default: Reply,
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeRegistry {
    pub fn new(default: Reply) -> Self {
        Self {
            default,
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn script(self, doi: &str, replies: Vec<Reply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(doi.to_ascii_lowercase(), replies.into());
        self
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, doi: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|called| called.as_str() == doi)
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_reply(&self, doi: &str) -> Reply {
        self.calls.lock().unwrap().push(doi.to_string());
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(doi) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| self.default.clone()),
            None => self.default.clone(),
        }
    }
}

impl WorkFetcher for FakeRegistry {
    async fn fetch_work(&self, doi: &Doi) -> Result<WorkMetadata, RegistryRequestFailed> {
        let mut reply = self.next_reply(doi.as_str());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        loop {
            match reply {
                Reply::Delay(delay, next) => {
                    tokio::time::sleep(delay).await;
                    reply = *next;
                }
                Reply::Found(update_to) => {
                    return Ok(WorkMetadata {
                        doi: doi.to_string(),
                        title: None,
                        kind: Some("journal-article".to_string()),
                        update_to,
                    })
                }
                Reply::Fail(cause) => return Err(RegistryRequestFailed::new(doi.as_str(), cause)),
                Reply::Panic => panic!("registry blew up for {}", doi),
            }
        }
    }
}
