//! Area-analysis workflow state machine.
//!
//! ```text
//! Idle ⇄ Drawing → Analyzing → Displayed → Idle
//! ```
//!
//! Every analysis request is issued an [`AnalysisTicket`]. Only the most
//! recently issued ticket may complete the session; completions carrying an
//! older ticket are discarded, so re-drawing or editing a shape while a
//! previous analysis is in flight never lets the stale result overwrite the
//! new one.

use thiserror::Error;
use urban_map_analysis_models::{
    AnalysisPhase, AreaAnalysisResult, Notification, NotificationLevel,
};
use urban_map_spatial::DrawnShape;

use crate::{AnalysisError, AreaAnalyzer};

/// Message shown for any pipeline failure, whatever its cause.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Erro ao analisar a área selecionada.";

/// Errors for operations that are not valid in the current phase.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The operation is not allowed in this phase.
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        /// The attempted operation.
        action: &'static str,
        /// The phase the session was in.
        phase: AnalysisPhase,
    },
}

/// Identifies one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnalysisTicket(u64);

/// What happened to a completed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result is now displayed.
    Displayed,
    /// The analysis failed; the session returned to `Idle`.
    Failed,
    /// A newer request superseded this one; the outcome was dropped.
    Stale,
}

/// State of the area-analysis workflow.
#[derive(Debug)]
pub struct AnalysisSession {
    phase: AnalysisPhase,
    shape: Option<DrawnShape>,
    result: Option<AreaAnalysisResult>,
    issued: u64,
    pending: Option<AnalysisTicket>,
    notifications: Vec<Notification>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    /// Creates a session in the `Idle` phase.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: AnalysisPhase::Idle,
            shape: None,
            result: None,
            issued: 0,
            pending: None,
            notifications: Vec::new(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    #[must_use]
    pub const fn shape(&self) -> Option<&DrawnShape> {
        self.shape.as_ref()
    }

    /// The displayed result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&AreaAnalysisResult> {
        self.result.as_ref()
    }

    /// The ticket of the analysis currently in flight.
    #[must_use]
    pub const fn pending(&self) -> Option<AnalysisTicket> {
        self.pending
    }

    /// Takes all notifications raised since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Switches analysis mode on or off.
    ///
    /// From `Idle` this enters `Drawing`. From any other phase it leaves
    /// analysis mode: the shape and result are cleared and any in-flight
    /// analysis is abandoned.
    pub fn toggle_mode(&mut self) -> AnalysisPhase {
        if self.phase == AnalysisPhase::Idle {
            self.phase = AnalysisPhase::Drawing;
            self.notify(
                NotificationLevel::Info,
                "Modo análise ativado. Desenhe uma área no mapa para analisar indicadores de sustentabilidade.",
            );
        } else {
            self.reset();
            self.notify(NotificationLevel::Info, "Modo análise desativado.");
        }
        log::debug!("Analysis mode toggled, now {}", self.phase);
        self.phase
    }

    /// Records a newly drawn shape and starts analysing it.
    ///
    /// # Errors
    ///
    /// * If analysis mode is off
    pub fn shape_completed(&mut self, shape: DrawnShape) -> Result<AnalysisTicket, SessionError> {
        if self.phase == AnalysisPhase::Idle {
            return Err(SessionError::InvalidTransition {
                action: "complete a shape",
                phase: self.phase,
            });
        }
        Ok(self.start(shape))
    }

    /// Re-analyses the current shape after it was edited.
    ///
    /// # Errors
    ///
    /// * If there is no shape to edit
    pub fn shape_edited(&mut self, shape: DrawnShape) -> Result<AnalysisTicket, SessionError> {
        if self.shape.is_none() {
            return Err(SessionError::InvalidTransition {
                action: "edit a shape",
                phase: self.phase,
            });
        }
        Ok(self.start(shape))
    }

    /// Applies the outcome of the analysis identified by `ticket`.
    ///
    /// Failures raise a single generic error notification and return the
    /// session to `Idle`; nothing is retried.
    pub fn complete(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AreaAnalysisResult, AnalysisError>,
    ) -> Completion {
        if self.pending != Some(ticket) {
            log::debug!("Discarding stale analysis {ticket:?} (pending {:?})", self.pending);
            return Completion::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(result) => {
                log::debug!(
                    "Analysis {ticket:?} complete: {} scored {}",
                    result.zone,
                    result.score
                );
                self.result = Some(result);
                self.phase = AnalysisPhase::Displayed;
                Completion::Displayed
            }
            Err(e) => {
                log::error!("Area analysis failed: {e}");
                self.reset();
                self.notify(NotificationLevel::Error, ANALYSIS_FAILED_MESSAGE);
                Completion::Failed
            }
        }
    }

    /// Closes the result panel.
    ///
    /// # Errors
    ///
    /// * If no result is displayed
    pub fn close_panel(&mut self) -> Result<(), SessionError> {
        if self.phase != AnalysisPhase::Displayed {
            return Err(SessionError::InvalidTransition {
                action: "close the panel",
                phase: self.phase,
            });
        }
        self.reset();
        Ok(())
    }

    /// Deletes the drawn shape, abandoning any analysis of it.
    ///
    /// # Errors
    ///
    /// * If there is no shape to delete
    pub fn delete_shape(&mut self) -> Result<(), SessionError> {
        if self.shape.is_none() {
            return Err(SessionError::InvalidTransition {
                action: "delete the shape",
                phase: self.phase,
            });
        }
        self.reset();
        Ok(())
    }

    /// Draws `shape` and runs the analysis to completion.
    ///
    /// # Errors
    ///
    /// * If analysis mode is off
    pub async fn run(
        &mut self,
        analyzer: &AreaAnalyzer,
        shape: DrawnShape,
    ) -> Result<Completion, SessionError> {
        let ticket = self.shape_completed(shape.clone())?;
        let outcome = analyzer.analyze(&shape).await;
        Ok(self.complete(ticket, outcome))
    }

    fn start(&mut self, shape: DrawnShape) -> AnalysisTicket {
        self.issued += 1;
        let ticket = AnalysisTicket(self.issued);
        if let Some(previous) = self.pending.replace(ticket) {
            log::debug!("Analysis {previous:?} superseded by {ticket:?}");
        }
        self.shape = Some(shape);
        self.result = None;
        self.phase = AnalysisPhase::Analyzing;
        ticket
    }

    fn reset(&mut self) {
        self.phase = AnalysisPhase::Idle;
        self.shape = None;
        self.result = None;
        self.pending = None;
    }

    fn notify(&mut self, level: NotificationLevel, message: &str) {
        self.notifications.push(Notification::new(level, message));
    }
}
