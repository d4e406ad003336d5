//! Scripted judges and paper builders shared by unit tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use paper_core::{Entry, Judge, JudgeRequest, JudgeVerdict, Origin, Recommendation, Status};

/// Replays a fixed queue of answers and remembers every request.
/// Once the queue runs dry the judge reports itself unavailable.
#[derive(Default)]
pub struct ScriptedJudge {
    answers: RefCell<VecDeque<Option<JudgeVerdict>>>,
    pub requests: RefCell<Vec<JudgeRequest>>,
}

impl ScriptedJudge {
    pub fn new(answers: Vec<Option<JudgeVerdict>>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Judge for ScriptedJudge {
    fn judge(&self, _model: &str, request: &JudgeRequest) -> Option<JudgeVerdict> {
        self.requests.borrow_mut().push(request.clone());
        self.answers.borrow_mut().pop_front().flatten()
    }
}

/// Always prefers whichever paper is shown first.
pub struct FirstSeenJudge;

impl Judge for FirstSeenJudge {
    fn judge(&self, _model: &str, _request: &JudgeRequest) -> Option<JudgeVerdict> {
        Some(JudgeVerdict::from_raw("paperA", "first paper reads better"))
    }
}

/// Always prefers the paper with the given title, wherever it is shown.
pub struct TitleJudge(pub &'static str);

impl Judge for TitleJudge {
    fn judge(&self, _model: &str, request: &JudgeRequest) -> Option<JudgeVerdict> {
        let winner = if request.a.title == self.0 {
            "paperA"
        } else if request.b.title == self.0 {
            "paperB"
        } else {
            "tie"
        };
        Some(JudgeVerdict::from_raw(winner, ""))
    }
}

pub fn verdict(winner: &str, rationale: &str) -> Option<JudgeVerdict> {
    Some(JudgeVerdict::from_raw(winner, rationale))
}

pub fn human(id: &str) -> Entry {
    Entry::new(id, &format!("Human {id}"), Origin::Human)
}

pub fn reviewed_ai(id: &str) -> Entry {
    let mut entry = Entry::new(id, &format!("AI {id}"), Origin::Ai);
    entry.status = Status::Reviewed;
    entry.review_recommendation = Recommendation::Minor;
    entry.advisor_score = 78.0;
    entry.reviewer_score = 74.0;
    entry
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` and return what it logged at WARN or above.
pub fn with_warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
