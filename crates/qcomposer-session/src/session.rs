//! The editing session: one circuit, its share link and its service answers.
//!
//! Every committed edit bumps a revision counter, rewrites the share token
//! in the [`Location`], and sends the derived request to the
//! [`CircuitService`] twice (simulation and code) on spawned tasks. Answers
//! come back tagged with the revision they were computed for; an answer
//! older than the one already shown on its channel is dropped, so a slow
//! reply can never overwrite a newer one.
//!
//! ```text
//!   edit ──→ CircuitEditor ──ok──→ revision += 1 ──→ Location (replace)
//!                │                      └──────────→ spawn simulate / generate_code
//!                └──err──→ notice                             │
//!                                                   replies ←─┘  (tagged by revision)
//! ```

use std::fmt;
use std::sync::Arc;

use qcomposer_ir::{
    CircuitEditor, CircuitState, EditError, EditResult, Gate, GateChanges, GateId, GateKind,
    InsertPosition, parse_angle,
};
use qcomposer_wire::{
    CodeResult, SimulationResult, SnapshotResult, StateView, derive_request, select_view,
    snapshot,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::config::SessionConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::gesture::{ConnectGesture, LineLayout, Point};
use crate::location::Location;
use crate::service::{Channel, CircuitService};

/// What happened to one service answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The answer is now the one on display.
    Applied {
        /// Channel the answer belongs to.
        channel: Channel,
        /// Revision it was computed for.
        revision: u64,
    },
    /// A newer answer was already on display; this one was dropped.
    Stale {
        /// Channel the answer belongs to.
        channel: Channel,
        /// Revision it was computed for.
        revision: u64,
    },
    /// The service call failed; the previous answer stays on display.
    Failed {
        /// Channel the answer belongs to.
        channel: Channel,
        /// Revision it was computed for.
        revision: u64,
    },
}

#[derive(Debug)]
enum Reply {
    Simulation {
        revision: u64,
        result: ServiceResult<SimulationResult>,
    },
    Code {
        revision: u64,
        result: ServiceResult<CodeResult>,
    },
}

#[derive(Debug, Clone)]
struct Latest<T> {
    revision: u64,
    value: T,
}

/// An interactive circuit-editing session.
///
/// Construction and every committed edit spawn Tokio tasks, so a session
/// must be driven from inside a Tokio runtime.
pub struct Session<L> {
    editor: CircuitEditor,
    location: L,
    config: SessionConfig,
    service: Arc<dyn CircuitService>,
    revision: u64,
    outstanding: usize,
    simulation: Option<Latest<SimulationResult>>,
    code: Option<Latest<CodeResult>>,
    selected_moment: Option<i64>,
    gesture: Option<ConnectGesture>,
    notice: Option<String>,
    replies_tx: mpsc::UnboundedSender<Reply>,
    replies_rx: mpsc::UnboundedReceiver<Reply>,
}

impl<L> fmt::Debug for Session<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("service", &self.service.name())
            .field("revision", &self.revision)
            .field("outstanding", &self.outstanding)
            .field("qubits", &self.editor.state().qubit_count())
            .field("gates", &self.editor.state().num_gates())
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}

impl<L: Location> Session<L> {
    /// Open a session on whatever circuit `location` carries.
    ///
    /// An absent or unreadable token starts from the default circuit; the
    /// location is left untouched until the first committed edit. Results
    /// for the loaded circuit are requested immediately.
    #[instrument(skip_all, fields(service = service.name()))]
    pub fn load(service: Arc<dyn CircuitService>, location: L, config: SessionConfig) -> Self {
        let editor = match location.query_param(&config.share_param) {
            Some(token) => match snapshot::decode(&token) {
                Ok(state) => {
                    info!(
                        qubits = state.qubit_count(),
                        gates = state.num_gates(),
                        "Restored circuit from share token"
                    );
                    CircuitEditor::from_state(state, config.defaults)
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable share token; starting from default circuit");
                    CircuitEditor::new(config.defaults)
                }
            },
            None => CircuitEditor::new(config.defaults),
        };

        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        let mut session = Self {
            editor,
            location,
            config,
            service,
            revision: 0,
            outstanding: 0,
            simulation: None,
            code: None,
            selected_moment: None,
            gesture: None,
            notice: None,
            replies_tx,
            replies_rx,
        };
        session.dispatch();
        session
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current circuit.
    pub fn state(&self) -> &CircuitState {
        self.editor.state()
    }

    /// The editor, for read-only lookups such as [`CircuitEditor::gate_at`].
    pub fn editor(&self) -> &CircuitEditor {
        &self.editor
    }

    /// Gate with this id.
    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.editor.gate(id)
    }

    /// Number of edits committed since load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Service requests sent but not yet answered.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Where the share token is written.
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Message from the last rejected edit, cleared by the next commit.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Dismiss the notice.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Latest simulation answer.
    pub fn simulation(&self) -> Option<&SimulationResult> {
        self.simulation.as_ref().map(|l| &l.value)
    }

    /// Latest code answer.
    pub fn code(&self) -> Option<&CodeResult> {
        self.code.as_ref().map(|l| &l.value)
    }

    /// Token for the current circuit, as written to the location.
    pub fn share_token(&self) -> SnapshotResult<String> {
        snapshot::encode(self.editor.state())
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Place `kind` at `(qubit, moment)`, replacing any gate there.
    pub fn place_gate(&mut self, qubit: usize, moment: usize, kind: GateKind) -> EditResult<GateId> {
        self.apply("place_gate", |e| e.place_gate(qubit, moment, kind))
    }

    /// Apply a partial update to one gate.
    ///
    /// An empty update changes nothing and commits nothing.
    pub fn update_gate(&mut self, id: GateId, changes: &GateChanges) -> EditResult<()> {
        if changes.is_empty() {
            if self.editor.gate(id).is_none() {
                return Err(self.reject("update_gate", EditError::GateNotFound(id)));
            }
            return Ok(());
        }
        self.apply("update_gate", |e| e.update_gate(id, changes))
    }

    /// Set a rotation angle from user text such as `pi/4` or `0.5`.
    ///
    /// Returns the parsed angle.
    pub fn set_parameter_text(&mut self, id: GateId, text: &str) -> EditResult<f64> {
        match parse_angle(text) {
            Some(angle) => self
                .apply("set_parameter", |e| {
                    e.update_gate(id, &GateChanges::new().with_parameter(angle))
                })
                .map(|()| angle),
            None => Err(self.reject(
                "set_parameter",
                EditError::InvalidParameter(text.trim().to_string()),
            )),
        }
    }

    /// Delete one gate.
    pub fn remove_gate(&mut self, id: GateId) -> EditResult<Gate> {
        self.apply("remove_gate", |e| e.remove_gate(id))
    }

    /// Insert a qubit line next to `anchor`; returns its index.
    pub fn add_qubit(&mut self, anchor: usize, position: InsertPosition) -> EditResult<usize> {
        self.apply("add_qubit", |e| e.add_qubit(anchor, position))
    }

    /// Delete a qubit line and every gate that touches it.
    ///
    /// Removing the only qubit is ignored and returns `Ok(None)`.
    pub fn remove_qubit(&mut self, index: usize) -> EditResult<Option<usize>> {
        match self.editor.remove_qubit(index) {
            Ok(Some(dropped)) => {
                self.commit("remove_qubit");
                Ok(Some(dropped))
            }
            Ok(None) => {
                debug!(index, "Ignoring removal of the only qubit");
                Ok(None)
            }
            Err(e) => Err(self.reject("remove_qubit", e)),
        }
    }

    /// Rename a qubit line.
    pub fn rename_qubit(&mut self, index: usize, name: impl Into<String>) -> EditResult<()> {
        self.apply("rename_qubit", |e| e.rename_qubit(index, name))
    }

    /// Add moment columns; `None` uses the configured increment.
    ///
    /// Returns the new moment count.
    pub fn extend_moments(&mut self, increment: Option<usize>) -> usize {
        let increment = increment.unwrap_or(self.config.moment_increment);
        if increment == 0 {
            return self.editor.state().moment_count();
        }
        let count = self.editor.extend_moments(increment);
        self.commit("extend_moments");
        count
    }

    /// Start over from the default circuit.
    pub fn reset(&mut self) {
        self.editor.reset();
        self.gesture = None;
        self.selected_moment = None;
        self.commit("reset");
    }

    // =========================================================================
    // Connect gesture
    // =========================================================================

    /// Start dragging a target connection from a CNOT gate.
    pub fn begin_connect(&mut self, gate: GateId, start: Point) -> EditResult<()> {
        match self.editor.gate(gate).map(|g| g.kind) {
            Some(GateKind::Cnot) => {
                self.gesture = Some(ConnectGesture::new(gate, start));
                Ok(())
            }
            Some(kind) => Err(self.reject(
                "begin_connect",
                EditError::FieldNotApplicable {
                    kind,
                    field: "target",
                },
            )),
            None => Err(self.reject("begin_connect", EditError::GateNotFound(gate))),
        }
    }

    /// Follow the pointer during a drag. Ignored when no drag is active.
    pub fn drag_connect(&mut self, point: Point) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.move_to(point);
        }
    }

    /// Line segment to draw while dragging.
    pub fn connect_preview(&self) -> Option<(Point, Point)> {
        self.gesture.as_ref().map(|g| (g.start(), g.cursor()))
    }

    /// Finish the drag.
    ///
    /// Over another qubit line this retargets the CNOT and returns the new
    /// target; anywhere else the drag is discarded and `Ok(None)` returned.
    pub fn release_connect(&mut self, layout: &LineLayout) -> EditResult<Option<usize>> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(None);
        };
        let Some(source) = self.editor.gate(gesture.gate()).map(|g| g.qubit) else {
            debug!(gate = %gesture.gate(), "Connect gesture outlived its gate");
            return Ok(None);
        };

        match gesture.resolve(layout, source, self.editor.state().qubit_count()) {
            Some(line) => self
                .apply("connect", |e| {
                    e.update_gate(gesture.gate(), &GateChanges::new().with_target(line))
                })
                .map(|()| Some(line)),
            None => {
                debug!("Connect gesture released away from any other line");
                Ok(None)
            }
        }
    }

    /// Abandon the drag.
    pub fn cancel_connect(&mut self) {
        self.gesture = None;
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Show the step for `moment`, or the final state for `None`.
    pub fn select_moment(&mut self, moment: Option<i64>) {
        self.selected_moment = moment;
    }

    /// The moment currently selected.
    pub fn selected_moment(&self) -> Option<i64> {
        self.selected_moment
    }

    /// Vectors to display for the selection, once a simulation arrived.
    pub fn current_view(&self) -> Option<StateView<'_>> {
        self.simulation
            .as_ref()
            .map(|l| select_view(&l.value, self.selected_moment))
    }

    /// Request fresh results for the current revision without editing.
    pub fn refresh(&mut self) {
        self.dispatch();
    }

    /// Apply every answer that has already arrived.
    pub fn process_pending(&mut self) -> Vec<ReplyOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(reply) = self.replies_rx.try_recv() {
            outcomes.push(self.absorb(reply));
        }
        outcomes
    }

    /// Wait for the next answer and apply it.
    ///
    /// Returns `None` immediately when nothing is outstanding.
    #[instrument(skip(self), fields(outstanding = self.outstanding))]
    pub async fn next_response(&mut self) -> Option<ReplyOutcome> {
        if self.outstanding == 0 {
            return None;
        }
        let reply = self.replies_rx.recv().await?;
        Some(self.absorb(reply))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply<T>(
        &mut self,
        op: &'static str,
        edit: impl FnOnce(&mut CircuitEditor) -> EditResult<T>,
    ) -> EditResult<T> {
        match edit(&mut self.editor) {
            Ok(value) => {
                self.commit(op);
                Ok(value)
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    fn reject(&mut self, op: &'static str, err: EditError) -> EditError {
        debug!(op, error = %err, "Edit rejected");
        self.notice = Some(err.to_string());
        err
    }

    fn commit(&mut self, op: &'static str) {
        self.revision += 1;
        self.notice = None;
        info!(
            op,
            revision = self.revision,
            qubits = self.editor.state().qubit_count(),
            gates = self.editor.state().num_gates(),
            "Committed edit"
        );
        self.persist();
        self.dispatch();
    }

    fn persist(&mut self) {
        match snapshot::encode(self.editor.state()) {
            Ok(token) => self
                .location
                .replace_query_param(&self.config.share_param, &token),
            Err(e) => warn!(error = %e, "Failed to encode share token; link not updated"),
        }
    }

    fn dispatch(&mut self) {
        let request = Arc::new(derive_request(self.editor.state()));
        let revision = self.revision;
        self.outstanding += 2;
        debug!(
            revision,
            gates = request.gates.len(),
            service = self.service.name(),
            "Requesting simulation and code"
        );

        let service = Arc::clone(&self.service);
        let tx = self.replies_tx.clone();
        let sim_request = Arc::clone(&request);
        tokio::spawn(async move {
            let result = guarded(async move { service.simulate(&sim_request).await }).await;
            // The receiver is gone only when the session was dropped.
            let _ = tx.send(Reply::Simulation { revision, result });
        });

        let service = Arc::clone(&self.service);
        let tx = self.replies_tx.clone();
        tokio::spawn(async move {
            let result = guarded(async move { service.generate_code(&request).await }).await;
            let _ = tx.send(Reply::Code { revision, result });
        });
    }

    fn absorb(&mut self, reply: Reply) -> ReplyOutcome {
        self.outstanding = self.outstanding.saturating_sub(1);
        match reply {
            Reply::Simulation { revision, result } => {
                absorb_into(&mut self.simulation, Channel::Simulation, revision, result)
            }
            Reply::Code { revision, result } => {
                absorb_into(&mut self.code, Channel::Code, revision, result)
            }
        }
    }
}

/// Run a service call on its own task so a panic still yields a reply.
async fn guarded<T, F>(call: F) -> ServiceResult<T>
where
    T: Send + 'static,
    F: Future<Output = ServiceResult<T>> + Send + 'static,
{
    tokio::spawn(call)
        .await
        .unwrap_or_else(|e| Err(ServiceError::Aborted(e.to_string())))
}

fn absorb_into<T>(
    slot: &mut Option<Latest<T>>,
    channel: Channel,
    revision: u64,
    result: ServiceResult<T>,
) -> ReplyOutcome {
    match result {
        Err(e) => {
            warn!(%channel, revision, error = %e, "Service request failed; keeping previous result");
            ReplyOutcome::Failed { channel, revision }
        }
        Ok(_) if slot.as_ref().is_some_and(|l| l.revision > revision) => {
            debug!(%channel, revision, "Discarding stale response");
            ReplyOutcome::Stale { channel, revision }
        }
        Ok(value) => {
            *slot = Some(Latest { revision, value });
            ReplyOutcome::Applied { channel, revision }
        }
    }
}
