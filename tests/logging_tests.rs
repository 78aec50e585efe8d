use std::{
    io,
    sync::{Arc, Mutex},
};

use proximity::prelude::*;
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn capture<F: FnOnce()>(level: Level, f: F) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

fn references() -> ReferenceSet {
    ReferenceSet::build(Coordinate::new(36.2704, -121.8081).ok(), false, Vec::new())
}

#[test]
fn excluded_profile_is_reported() {
    let output = capture(Level::DEBUG, || {
        let candidate = Candidate::profile("profile-42", None);
        assert!(!ProximityMatcher::new().matches(
            &candidate,
            &FilterPreferences::default(),
            &references()
        ));
    });
    assert!(output.contains("profile-42"), "{output}");
    assert!(output.contains("DEBUG"), "{output}");
}

#[test]
fn included_event_is_quiet_at_debug() {
    let output = capture(Level::DEBUG, || {
        let candidate = Candidate::event("event-7", None);
        assert!(ProximityMatcher::new().matches(
            &candidate,
            &FilterPreferences::default(),
            &references()
        ));
    });
    assert!(!output.contains("event-7"), "{output}");
}

#[test]
fn dropped_geocode_results_are_counted() {
    let output = capture(Level::WARN, || {
        let cache = GeocodeCache::from_raw([("bad-entry", -999.0, -999.0), ("b", 10.0, 10.0)]);
        assert_eq!(cache.len(), 1);
    });
    assert!(output.contains("Dropping geocode result for bad-entry"), "{output}");
    assert!(output.contains("Dropped 1 invalid geocode results"), "{output}");
}
