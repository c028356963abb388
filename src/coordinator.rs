//! Route request coordination.
//!
//! Every submission is tagged with a monotonically increasing generation
//! token. A response is applied to the candidate store only while its token
//! is still the latest; responses from older in-flight submissions are
//! discarded so they can never overwrite a newer selection's results.

use std::fmt;

use tracing::{debug, warn};

use crate::backend::BackendError;
use crate::candidates::{RouteCandidate, RouteCandidateStore};
use crate::rewards::RewardsLedger;
use crate::traits::RouteProvider;

/// Whether a submission asks for one candidate or one per strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Single,
    Multiple,
}

/// An issued submission, identified by its generation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub token: u64,
    pub source: String,
    pub destination: String,
    pub mode: RequestMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Source and destination must differ; guarded before any request.
    SameEndpoints,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::SameEndpoints => {
                write!(f, "source and destination must be different locations")
            }
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Default)]
pub struct RouteRequestCoordinator {
    generation: u64,
}

impl RouteRequestCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the latest submission.
    pub fn latest_token(&self) -> u64 {
        self.generation
    }

    /// Start a new submission, invalidating all earlier in-flight ones.
    pub fn begin(
        &mut self,
        source: &str,
        destination: &str,
        mode: RequestMode,
    ) -> Result<Submission, SubmitError> {
        if source == destination {
            return Err(SubmitError::SameEndpoints);
        }
        self.generation += 1;
        debug!(token = self.generation, source, destination, "route request issued");
        Ok(Submission {
            token: self.generation,
            source: source.to_string(),
            destination: destination.to_string(),
            mode,
        })
    }

    /// Apply a submission's outcome to the store and ledger.
    ///
    /// Returns `false` when the token is stale and the outcome was
    /// discarded. Failures are stored as error candidates so the list is
    /// never empty without an error attached.
    pub fn complete(
        &mut self,
        token: u64,
        outcome: Result<Vec<RouteCandidate>, BackendError>,
        store: &mut RouteCandidateStore,
        ledger: &mut RewardsLedger,
    ) -> bool {
        if token != self.generation {
            debug!(token, latest = self.generation, "discarding stale route response");
            return false;
        }

        match outcome {
            Ok(candidates) if candidates.is_empty() => {
                warn!(token, "backend returned no candidates");
                store.replace_all(vec![RouteCandidate::failed(
                    "no routes available between the selected locations",
                )]);
            }
            Ok(candidates) => {
                if let Some(points) = earned_points(&candidates) {
                    ledger.add_points(points);
                }
                store.replace_all(candidates);
            }
            Err(err) => {
                warn!(token, error = %err, "route request failed");
                store.replace_all(vec![RouteCandidate::failed(err.to_string())]);
            }
        }
        true
    }

    /// Blocking convenience: begin a submission and complete it against
    /// `provider` in one call.
    pub fn submit<P: RouteProvider>(
        &mut self,
        provider: &P,
        source: &str,
        destination: &str,
        mode: RequestMode,
        store: &mut RouteCandidateStore,
        ledger: &mut RewardsLedger,
    ) -> Result<bool, SubmitError> {
        let submission = self.begin(source, destination, mode)?;
        let outcome = match submission.mode {
            RequestMode::Single => provider
                .single_route(&submission.source, &submission.destination)
                .map(|candidate| vec![candidate]),
            RequestMode::Multiple => {
                provider.multiple_routes(&submission.source, &submission.destination)
            }
        };
        Ok(self.complete(submission.token, outcome, store, ledger))
    }
}

/// Reward points carried by the first candidate that grants any.
fn earned_points(candidates: &[RouteCandidate]) -> Option<u32> {
    candidates
        .iter()
        .find_map(|candidate| candidate.reward_points.filter(|points| *points > 0))
}
