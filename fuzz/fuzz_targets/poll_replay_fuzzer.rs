//! Fuzz target for poll replay
//!
//! # Strategy
//!
//! - Well-formed setup followed by a mix of valid and hostile events
//! - Arbitrary payload strings in place of any event
//! - Delivery order shuffled by reversing the submessage list
//!
//! # Invariants
//!
//! - Replay never panics, whatever the payloads
//! - Replay result does not depend on delivery order
//! - Vote counts equal the number of listed voters

#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamview_core::{TracingSink, replay_poll};
use streamview_proto::Submessage;

#[derive(Debug, Clone, Arbitrary)]
enum Event {
    NewOption { idx: u8, option: String },
    Vote { sender: u8, idx: u8, vote: i8 },
    Question { question: String },
    Raw(String),
}

#[derive(Debug, Clone, Arbitrary)]
struct Case {
    sender: u8,
    own: u8,
    setup: Option<(String, Vec<String>)>,
    events: Vec<(u8, u8, Event)>,
}

fuzz_target!(|case: Case| {
    let mut submessages = Vec::new();
    if let Some((question, options)) = &case.setup {
        let content = format!(
            r#"{{"widget_type":"poll","extra_data":{{"question":{},"options":[{}]}}}}"#,
            quote(question),
            options.iter().map(|o| quote(o)).collect::<Vec<_>>().join(",")
        );
        submessages.push(Submessage::widget(0, u64::from(case.sender), content));
    }

    let mut seen = BTreeSet::new();
    for (id, sender, event) in &case.events {
        let id = u64::from(*id) + 1;
        if !seen.insert(id) {
            continue;
        }
        let content = match event {
            Event::NewOption { idx, option } => {
                format!(r#"{{"type":"new_option","idx":{idx},"option":{}}}"#, quote(option))
            }
            Event::Vote { sender, idx, vote } => {
                format!(r#"{{"type":"vote","key":"{sender},{idx}","vote":{vote}}}"#)
            }
            Event::Question { question } => {
                format!(r#"{{"type":"question","question":{}}}"#, quote(question))
            }
            Event::Raw(raw) => raw.clone(),
        };
        submessages.push(Submessage::widget(id, u64::from(*sender), content));
    }

    let sender = u64::from(case.sender);
    let own = u64::from(case.own);
    let forward = replay_poll(sender, own, &submessages, &mut TracingSink);

    submessages.reverse();
    let backward = replay_poll(sender, own, &submessages, &mut TracingSink);

    match (forward, backward) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a, b);
            for option in &a.options {
                assert_eq!(option.count, option.voters.len());
            }
        }
        (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
        (a, b) => panic!("order changed the outcome: {a:?} vs {b:?}"),
    }
});

fn quote(text: &str) -> String {
    let mut out = String::from("\"");
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
