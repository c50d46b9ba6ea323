//! Session registry and broadcast manager.
//!
//! One registry instance is shared by every connection task. All mutation
//! funnels through the write lock; broadcasts iterate a cloned snapshot taken
//! under the read lock, so a recipient removed mid-broadcast can never
//! corrupt the iteration or surface a delivery error to the sender.

use std::collections::HashMap;

use axum::extract::ws::Message;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use ssmon_models::{PresenceStatus, StudentEvent, TeacherEvent, TelemetryRecord};

/// Outbound queue handle for one connection's writer task.
pub type OutboundSender = mpsc::Sender<Message>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("student {0} is not connected")]
    UnknownStudent(String),

    #[error("send to student {0} failed")]
    SendFailed(String),
}

#[derive(Default)]
struct RegistryInner {
    /// student id -> outbound handle
    students: HashMap<String, OutboundSender>,
    /// student id -> display name; every registered student has an entry
    student_names: HashMap<String, String>,
    /// teacher connection id -> outbound handle
    teachers: HashMap<Uuid, OutboundSender>,
    /// student id -> teachers watching them; reserved, never populated
    watch_sessions: HashMap<String, Vec<Uuid>>,
}

/// Connection registry shared by every session task.
#[derive(Default)]
pub struct Registry {
    inner: RwLock<RegistryInner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a student and announce the updated roster.
    pub async fn connect_student(&self, student_id: &str, tx: OutboundSender) {
        {
            let mut inner = self.inner.write().await;
            inner.students.insert(student_id.to_string(), tx);
            inner
                .student_names
                .insert(student_id.to_string(), "Unknown".to_string());
        }
        self.broadcast_roster().await;
    }

    /// Remove a student, rebroadcast the roster and emit offline telemetry.
    ///
    /// Safe to call twice; the second call is a no-op.
    pub async fn disconnect_student(&self, student_id: &str) {
        let was_connected = {
            let mut inner = self.inner.write().await;
            let removed = inner.students.remove(student_id).is_some();
            inner.student_names.remove(student_id);
            inner.watch_sessions.remove(student_id);
            removed
        };
        if !was_connected {
            return;
        }
        self.broadcast_roster().await;
        self.broadcast_telemetry(TelemetryRecord::offline(student_id))
            .await;
    }

    /// Store a display name. Rebroadcasts the roster and returns `true` when
    /// the stored name actually changed.
    pub async fn update_student_name(&self, student_id: &str, name: &str) -> bool {
        let changed = {
            let mut inner = self.inner.write().await;
            match inner.student_names.get(student_id) {
                Some(current) if current == name => false,
                _ => {
                    inner
                        .student_names
                        .insert(student_id.to_string(), name.to_string());
                    true
                }
            }
        };
        if changed {
            self.broadcast_roster().await;
        }
        changed
    }

    /// Stored display name, "Unknown" for unregistered ids.
    pub async fn student_name(&self, student_id: &str) -> String {
        self.inner
            .read()
            .await
            .student_names
            .get(student_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Register a teacher and announce ONLINE to students.
    pub async fn connect_teacher(&self, tx: OutboundSender) -> Uuid {
        let teacher_id = Uuid::new_v4();
        self.inner.write().await.teachers.insert(teacher_id, tx);
        self.broadcast_to_students(&StudentEvent::teacher_status(PresenceStatus::Online))
            .await;
        teacher_id
    }

    /// Remove a teacher and announce OFFLINE to students. Idempotent.
    pub async fn disconnect_teacher(&self, teacher_id: Uuid) {
        let was_connected = self
            .inner
            .write()
            .await
            .teachers
            .remove(&teacher_id)
            .is_some();
        if !was_connected {
            return;
        }
        self.broadcast_to_students(&StudentEvent::teacher_status(PresenceStatus::Offline))
            .await;
    }

    /// Echo a student's frame to every teacher, best effort.
    ///
    /// Per-recipient failures are logged and swallowed; a dead teacher is
    /// reaped by the telemetry path, not here.
    pub async fn forward_frame(&self, student_id: &str, image: &str) {
        let Some(message) = encode(&TeacherEvent::student_frame(student_id, image)) else {
            return;
        };
        for (teacher_id, tx) in self.teacher_snapshot().await {
            if let Err(e) = tx.try_send(message.clone()) {
                debug!("frame forward to teacher {teacher_id} dropped: {e}");
            }
        }
    }

    /// Broadcast a telemetry record to every teacher.
    ///
    /// A recipient whose queue is closed is removed afterwards - the failed
    /// write doubles as disconnect detection.
    pub async fn broadcast_telemetry(&self, record: TelemetryRecord) {
        let Some(message) = encode(&TeacherEvent::telemetry(record)) else {
            return;
        };
        let mut dead = Vec::new();
        for (teacher_id, tx) in self.teacher_snapshot().await {
            match tx.try_send(message.clone()) {
                Ok(()) => {}
                Err(TrySendError::Closed(_)) => dead.push(teacher_id),
                Err(TrySendError::Full(_)) => {
                    warn!("telemetry to teacher {teacher_id} dropped: queue full");
                }
            }
        }
        if !dead.is_empty() {
            let mut inner = self.inner.write().await;
            for teacher_id in dead {
                inner.teachers.remove(&teacher_id);
                warn!("teacher {teacher_id} removed after failed telemetry write");
            }
        }
    }

    /// Unicast an event to one student. Failure is the caller's signal to
    /// tear the connection down.
    pub async fn send_feedback(
        &self,
        student_id: &str,
        event: &StudentEvent,
    ) -> Result<(), RegistryError> {
        let tx = self
            .inner
            .read()
            .await
            .students
            .get(student_id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownStudent(student_id.to_string()))?;
        let message =
            encode(event).ok_or_else(|| RegistryError::SendFailed(student_id.to_string()))?;
        tx.try_send(message)
            .map_err(|_| RegistryError::SendFailed(student_id.to_string()))
    }

    /// Send the current roster of student ids to every student.
    pub async fn broadcast_roster(&self) {
        let (peers, recipients) = {
            let inner = self.inner.read().await;
            (
                inner.students.keys().cloned().collect::<Vec<_>>(),
                inner.students.values().cloned().collect::<Vec<_>>(),
            )
        };
        let Some(message) = encode(&StudentEvent::peer_update(peers)) else {
            return;
        };
        for tx in recipients {
            if let Err(e) = tx.try_send(message.clone()) {
                debug!("roster update dropped: {e}");
            }
        }
    }

    /// Connected student ids, order unspecified.
    pub async fn active_students(&self) -> Vec<String> {
        self.inner.read().await.students.keys().cloned().collect()
    }

    pub async fn teacher_count(&self) -> usize {
        self.inner.read().await.teachers.len()
    }

    async fn broadcast_to_students(&self, event: &StudentEvent) {
        let Some(message) = encode(event) else {
            return;
        };
        for tx in self.student_snapshot().await {
            if let Err(e) = tx.try_send(message.clone()) {
                debug!("student broadcast dropped: {e}");
            }
        }
    }

    async fn teacher_snapshot(&self) -> Vec<(Uuid, OutboundSender)> {
        self.inner
            .read()
            .await
            .teachers
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect()
    }

    async fn student_snapshot(&self) -> Vec<OutboundSender> {
        self.inner.read().await.students.values().cloned().collect()
    }
}

fn encode<T: Serialize>(event: &T) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json)),
        Err(e) => {
            warn!("event serialization failed: {e}");
            None
        }
    }
}
