use crate::domain::errors::CalculationError;
use crate::domain::performance::{
    PerformanceRequest, PerformanceResponse, compute_fallback, compute_fallback_for_year,
};
use crate::domain::ports::PerformanceCalculator;
use crate::infrastructure::local_calculator::LocalPerformanceCalculator;
use crate::infrastructure::observability::Metrics;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Which path produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationSource {
    /// Answered by the primary calculator.
    Primary,
    /// Same input as the last primary answer; no call was made.
    Cached,
    /// Scored in-process without consulting the primary (empty goal set).
    Local,
    /// Degraded mode after the primary failed.
    Fallback,
}

impl CalculationSource {
    pub fn label(self) -> &'static str {
        match self {
            CalculationSource::Primary => "primary",
            CalculationSource::Cached => "cached",
            CalculationSource::Local => "local",
            CalculationSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for CalculationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceOutcome {
    pub response: PerformanceResponse,
    pub source: CalculationSource,
    /// Why the primary was not used, set only for `Fallback`.
    pub degraded_reason: Option<String>,
}

impl PerformanceOutcome {
    pub fn is_degraded(&self) -> bool {
        self.source == CalculationSource::Fallback
    }
}

struct Memo {
    fingerprint: String,
    response: PerformanceResponse,
}

/// Scores goal sets through a primary calculator, falling back to the
/// degraded in-process calculation whenever the primary fails.
///
/// Concurrent evaluations of the same goal set share one primary call: later
/// callers wait on that set's in-flight gate and then find the answer memoized.
/// Different goal sets never wait on each other.
pub struct StrategicPerformanceService {
    primary: Arc<dyn PerformanceCalculator>,
    reference_year: Option<i32>,
    metrics: Option<Metrics>,
    memo: Mutex<Option<Memo>>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl StrategicPerformanceService {
    pub fn new(primary: Arc<dyn PerformanceCalculator>) -> Self {
        Self {
            primary,
            reference_year: None,
            metrics: None,
            memo: Mutex::new(None),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Pins the year used by the in-process calculations.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Scores `request`, reusing the last primary answer when the input is unchanged.
    pub async fn evaluate(&self, request: &PerformanceRequest) -> PerformanceOutcome {
        self.run(request, true).await
    }

    /// Scores `request` without consulting the memo.
    pub async fn refresh(&self, request: &PerformanceRequest) -> PerformanceOutcome {
        self.run(request, false).await
    }

    /// Forgets the memoized answer.
    pub async fn invalidate(&self) {
        *self.memo.lock().await = None;
    }

    async fn run(&self, request: &PerformanceRequest, use_memo: bool) -> PerformanceOutcome {
        if request.goals.is_empty() {
            debug!("No goals supplied, scoring zero state locally");
            let response = self.local().score(request);
            return self.finish(response, CalculationSource::Local, None);
        }

        let Some(fingerprint) = fingerprint(request) else {
            return self.call_primary(request, None).await;
        };

        if use_memo {
            if let Some(response) = self.memoized(&fingerprint).await {
                return self.finish(response, CalculationSource::Cached, None);
            }
        }

        let gate = self.gate(&fingerprint).await;
        let outcome = {
            let _in_flight = gate.lock().await;
            // an identical call may have finished while this one waited
            let settled = if use_memo {
                self.memoized(&fingerprint).await
            } else {
                None
            };
            match settled {
                Some(response) => self.finish(response, CalculationSource::Cached, None),
                None => self.call_primary(request, Some(fingerprint.clone())).await,
            }
        };
        self.release_gate(&fingerprint, gate).await;
        outcome
    }

    async fn call_primary(
        &self,
        request: &PerformanceRequest,
        fingerprint: Option<String>,
    ) -> PerformanceOutcome {
        match self.primary.calculate(request).await {
            Ok(response) => {
                if let Some(fingerprint) = fingerprint {
                    *self.memo.lock().await = Some(Memo {
                        fingerprint,
                        response: response.clone(),
                    });
                }
                self.finish(response, CalculationSource::Primary, None)
            }
            Err(e) => self.degrade(request, e),
        }
    }

    async fn memoized(&self, fingerprint: &str) -> Option<PerformanceResponse> {
        let memo = self.memo.lock().await;
        let current = memo.as_ref().filter(|m| m.fingerprint == fingerprint)?;
        debug!("Goal set unchanged, reusing last strategic performance");
        Some(current.response.clone())
    }

    async fn gate(&self, fingerprint: &str) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        in_flight.entry(fingerprint.to_string()).or_default().clone()
    }

    /// Drops the gate once no other caller holds or waits on it.
    async fn release_gate(&self, fingerprint: &str, gate: Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().await;
        let owned = in_flight
            .get(fingerprint)
            .is_some_and(|current| Arc::ptr_eq(current, &gate));
        if owned && Arc::strong_count(&gate) <= 2 {
            in_flight.remove(fingerprint);
        }
    }

    fn degrade(&self, request: &PerformanceRequest, error: CalculationError) -> PerformanceOutcome {
        warn!(
            "{} calculator failed ({}), using degraded calculation: {}",
            self.primary.name(),
            error.kind(),
            error
        );
        if let Some(metrics) = &self.metrics {
            metrics.inc_fallback(error.kind());
        }

        let response = match self.reference_year {
            Some(year) => compute_fallback_for_year(
                &request.goals,
                &request.objectives,
                &request.timeframe,
                year,
            ),
            None => compute_fallback(&request.goals, &request.objectives, &request.timeframe),
        };
        self.finish(response, CalculationSource::Fallback, Some(error.to_string()))
    }

    fn finish(
        &self,
        response: PerformanceResponse,
        source: CalculationSource,
        degraded_reason: Option<String>,
    ) -> PerformanceOutcome {
        if let Some(metrics) = &self.metrics {
            metrics.record_calculation(source.label(), response.strategic_likelihood);
        }
        info!(
            "Strategic likelihood {} [{}-{}] via {}",
            response.strategic_likelihood,
            response.confidence_interval.low(),
            response.confidence_interval.high(),
            source
        );
        PerformanceOutcome {
            response,
            source,
            degraded_reason,
        }
    }

    fn local(&self) -> LocalPerformanceCalculator {
        match self.reference_year {
            Some(year) => LocalPerformanceCalculator::for_year(year),
            None => LocalPerformanceCalculator::new(),
        }
    }
}

/// SHA-256 over the serialized request; `None` if it cannot be serialized.
fn fingerprint(request: &PerformanceRequest) -> Option<String> {
    serde_json::to_vec(request)
        .ok()
        .map(|bytes| hex::encode(Sha256::digest(&bytes)))
}
