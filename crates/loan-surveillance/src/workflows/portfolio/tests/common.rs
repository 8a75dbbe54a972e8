use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::facts::{FactsLoadError, FactsSource, StaticFactsSource};
use crate::workflows::portfolio::repository::StaticLoanRepository;
use crate::workflows::portfolio::{portfolio_router, PortfolioService};

pub(super) fn document() -> Value {
    json!({
        "facts_lookup": {
            "fact_loan_summary_003": {
                "statement": "The property is located at 1250 Commerce Blvd, Austin, TX 78701."
            },
            "fact_loan_summary_017": {
                "statement": "The LTV is 62.5% based on the as-is appraised value."
            }
        },
        "loan_summary": {
            "loan_number": "LN-2024-0117",
            "risk_score": "3",
            "DSCR": "",
            "upb": "40,100,000",
            "TLR_status": "TLR Completed"
        },
        "risk_insights": { "key_risk_areas": ["income_expense", "ltv_stress"] },
        "Income & Expense Rules": {
            "question": ["Is trailing NOI within 10% of underwriting?"],
            "answer": ["No, trailing NOI is 14% lower."],
            "status": ["fail"],
            "categories": {
                "Operating Statement": [{ "status": "fail" }, { "status": "pass" }],
                "Rent Roll": [{ "status": "pass" }]
            }
        },
        "valuation_rules": {
            "categories": { "Appraisal": { "rules": [{ "status": "pass" }] } }
        }
    })
}

pub(super) type TestService = PortfolioService<StaticLoanRepository, StaticFactsSource>;

pub(super) fn service_with(source: StaticFactsSource) -> Arc<TestService> {
    Arc::new(PortfolioService::new(
        Arc::new(StaticLoanRepository::default()),
        Arc::new(source),
        "1",
    ))
}

pub(super) fn external_service() -> Arc<TestService> {
    service_with(StaticFactsSource::new(document()))
}

pub(super) fn fallback_service() -> Arc<TestService> {
    service_with(StaticFactsSource::unavailable())
}

pub(super) fn router(service: Arc<TestService>) -> axum::Router {
    portfolio_router(service)
}

/// Counts fetches so tests can assert the document is reloaded per request.
#[derive(Default)]
pub(super) struct CountingSource {
    fetches: AtomicUsize,
}

impl CountingSource {
    pub(super) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl FactsSource for CountingSource {
    fn fetch(&self) -> Result<Value, FactsLoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(document())
    }
}

/// Holds each fetch until the test releases it, so loads can be made to overlap.
pub(super) struct GatedSource {
    calls: AtomicUsize,
    entered: Mutex<Sender<usize>>,
    gates: Vec<Mutex<Receiver<()>>>,
}

impl GatedSource {
    /// Returns the source, a receiver reporting which fetch has started, and one
    /// release handle per fetch.
    pub(super) fn new(fetches: usize) -> (Self, Receiver<usize>, Vec<Sender<()>>) {
        let (entered, started) = mpsc::channel();
        let (releases, gates): (Vec<_>, Vec<_>) = (0..fetches)
            .map(|_| {
                let (release, gate) = mpsc::channel();
                (release, Mutex::new(gate))
            })
            .unzip();
        let source = Self {
            calls: AtomicUsize::new(0),
            entered: Mutex::new(entered),
            gates,
        };
        (source, started, releases)
    }
}

impl FactsSource for GatedSource {
    fn fetch(&self) -> Result<Value, FactsLoadError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self
            .gates
            .get(call)
            .ok_or_else(|| FactsLoadError::Unavailable(format!("unexpected fetch {call}")))?;
        self.entered
            .lock()
            .expect("entered lock")
            .send(call)
            .expect("test listening");
        gate.lock().expect("gate lock").recv().expect("released");
        Ok(document())
    }
}

/// Records the thread each fetch ran on.
#[derive(Default)]
pub(super) struct ThreadRecordingSource {
    threads: Mutex<Vec<ThreadId>>,
}

impl ThreadRecordingSource {
    pub(super) fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().expect("threads lock").clone()
    }
}

impl FactsSource for ThreadRecordingSource {
    fn fetch(&self) -> Result<Value, FactsLoadError> {
        self.threads
            .lock()
            .expect("threads lock")
            .push(std::thread::current().id());
        Ok(document())
    }
}

pub(super) struct PanickingSource;

impl FactsSource for PanickingSource {
    fn fetch(&self) -> Result<Value, FactsLoadError> {
        panic!("facts source crashed");
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
