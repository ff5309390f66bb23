// Dashboard session - connection lifecycle state machine
use crate::application::pipeline::TelemetryPipeline;
use crate::application::render_sink::RenderSink;
use crate::domain::render::RenderInstruction;
use crate::domain::theme::ThemeMode;
use crate::infrastructure::config::ConnectionConfig;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Transport event queue depth. The feed awaits sends, so a slow consumer
/// suspends the poll loop instead of queueing unboundedly.
pub const TRANSPORT_QUEUE_CAPACITY: usize = 100;

/// Element id of the visible connection status indicator.
const STATUS_ELEMENT: &str = "status";

/// Typed transport callback, delivered in broker order on a
/// single-consumer channel.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    Connected,
    Message(Bytes),
    Error(String),
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ConfigFetching,
    Connecting,
    Subscribed,
    Connected,
    Error,
    Closed,
}

/// Source of the transport connection parameters, fetched once at startup.
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<ConnectionConfig>;
}

/// The publish/subscribe transport. `start` issues connect and subscribe
/// and then feeds events into the session queue until the session ends.
#[async_trait]
pub trait TelemetryFeed: Send + Sync {
    async fn start(
        &self,
        connection: &ConnectionConfig,
        events: mpsc::Sender<TransportEvent>,
    ) -> anyhow::Result<()>;
}

/// Drives the startup sequence and the transport event loop:
/// Idle -> ConfigFetching -> Connecting -> Subscribed -> {Connected,
/// Error, Closed}. Errors are terminal to the operation but never to the
/// process; a failed session leaves the last rendered state on screen.
pub struct DashboardSession {
    pipeline: TelemetryPipeline,
    sink: Arc<dyn RenderSink>,
    state: SessionState,
}

impl DashboardSession {
    pub fn new(pipeline: TelemetryPipeline, sink: Arc<dyn RenderSink>) -> Self {
        Self {
            pipeline,
            sink,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub async fn run(
        mut self,
        source: Arc<dyn ConnectionSource>,
        feed: Arc<dyn TelemetryFeed>,
    ) -> anyhow::Result<()> {
        self.pipeline.initial_plots(&ThemeMode::default().palette());

        self.state = SessionState::ConfigFetching;
        let connection = match source.fetch().await {
            Ok(connection) => connection,
            Err(e) => {
                // Fatal for the session only; the HTTP layer keeps serving.
                tracing::error!("failed to fetch connection details: {:#}", e);
                self.state = SessionState::Error;
                return Ok(());
            }
        };
        tracing::info!(
            "connecting to {} on topic {}",
            connection.mqtt_server,
            connection.mqtt_topic
        );

        self.state = SessionState::Connecting;
        let (tx, mut rx) = mpsc::channel(TRANSPORT_QUEUE_CAPACITY);
        if let Err(e) = feed.start(&connection, tx).await {
            tracing::error!("failed to start transport: {:#}", e);
            self.state = SessionState::Error;
            self.set_status("Error");
            return Ok(());
        }
        self.state = SessionState::Subscribed;

        while let Some(event) = rx.recv().await {
            self.handle_event(event);
            if self.state == SessionState::Closed {
                break;
            }
        }
        Ok(())
    }

    /// Apply one transport event. Messages are not gated on the Connected
    /// state: a payload arriving before the connect acknowledgment is
    /// still processed.
    fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => {
                self.state = SessionState::Connected;
                self.set_status("Connected");
            }
            TransportEvent::Message(payload) => {
                if let Err(e) = self.pipeline.on_message(&payload) {
                    tracing::warn!("dropping malformed telemetry message: {}", e);
                }
            }
            TransportEvent::Error(reason) => {
                tracing::error!("transport error: {}", reason);
                self.state = SessionState::Error;
                self.set_status("Error");
            }
            TransportEvent::Closed => {
                tracing::info!("transport connection closed");
                self.state = SessionState::Closed;
                self.set_status("Closed");
            }
        }
    }

    fn set_status(&self, text: &str) {
        self.sink.submit(RenderInstruction::SetText {
            element: STATUS_ELEMENT,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render_sink::testing::RecordingSink;
    use crate::domain::metric::Metric;
    use crate::domain::series::{DEFAULT_WINDOW_CAPACITY, SampleCounter};
    use std::sync::Mutex;

    struct StubSource {
        result: Mutex<Option<anyhow::Result<ConnectionConfig>>>,
    }

    impl StubSource {
        fn ok() -> Self {
            Self {
                result: Mutex::new(Some(Ok(ConnectionConfig {
                    mqtt_server: "mqtt://broker:1883".to_string(),
                    mqtt_topic: "sensors/readings".to_string(),
                }))),
            }
        }

        fn failing() -> Self {
            Self {
                result: Mutex::new(Some(Err(anyhow::anyhow!("connection details unavailable")))),
            }
        }
    }

    #[async_trait]
    impl ConnectionSource for StubSource {
        async fn fetch(&self) -> anyhow::Result<ConnectionConfig> {
            self.result.lock().unwrap().take().expect("fetched twice")
        }
    }

    /// Feed that replays a scripted event sequence.
    struct ScriptedFeed {
        events: Mutex<Vec<TransportEvent>>,
    }

    impl ScriptedFeed {
        fn new(events: Vec<TransportEvent>) -> Self {
            Self {
                events: Mutex::new(events),
            }
        }
    }

    #[async_trait]
    impl TelemetryFeed for ScriptedFeed {
        async fn start(
            &self,
            _connection: &ConnectionConfig,
            events: mpsc::Sender<TransportEvent>,
        ) -> anyhow::Result<()> {
            let script: Vec<TransportEvent> =
                std::mem::take(&mut *self.events.lock().unwrap());
            tokio::spawn(async move {
                for event in script {
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
            });
            Ok(())
        }
    }

    fn session_with_sink() -> (DashboardSession, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let pipeline = TelemetryPipeline::new(
            DEFAULT_WINDOW_CAPACITY,
            SampleCounter::new(),
            sink.clone(),
        );
        (DashboardSession::new(pipeline, sink.clone()), sink)
    }

    fn status_texts(instructions: &[RenderInstruction]) -> Vec<String> {
        instructions
            .iter()
            .filter_map(|i| match i {
                RenderInstruction::SetText {
                    element: "status",
                    text,
                } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_full_session_renders_messages_and_status() {
        let (session, sink) = session_with_sink();
        let feed = ScriptedFeed::new(vec![
            TransportEvent::Connected,
            TransportEvent::Message(Bytes::from_static(
                br#"{"temperature":21,"humidity":40,"voltage":480,"rpm":55}"#,
            )),
            TransportEvent::Closed,
        ]);

        session
            .run(Arc::new(StubSource::ok()), Arc::new(feed))
            .await
            .unwrap();

        let instructions = sink.recorded();
        assert_eq!(
            status_texts(&instructions),
            vec!["Connected".to_string(), "Closed".to_string()]
        );
        // 8 initial plots, 12 message instructions, 2 status updates
        assert_eq!(instructions.len(), 22);
    }

    #[tokio::test]
    async fn test_message_before_connect_ack_is_processed() {
        let (session, sink) = session_with_sink();
        let feed = ScriptedFeed::new(vec![
            TransportEvent::Message(Bytes::from_static(
                br#"{"temperature":21,"humidity":40,"voltage":480,"rpm":55}"#,
            )),
            TransportEvent::Connected,
            TransportEvent::Closed,
        ]);

        session
            .run(Arc::new(StubSource::ok()), Arc::new(feed))
            .await
            .unwrap();

        let updated_box = sink.recorded().into_iter().any(|i| {
            matches!(
                i,
                RenderInstruction::SetText {
                    element: "temperature",
                    ..
                }
            )
        });
        assert!(updated_box, "early message must still render");
    }

    #[tokio::test]
    async fn test_transport_error_degrades_but_session_continues() {
        let (session, sink) = session_with_sink();
        let feed = ScriptedFeed::new(vec![
            TransportEvent::Connected,
            TransportEvent::Error("broker unreachable".to_string()),
            TransportEvent::Message(Bytes::from_static(
                br#"{"temperature":21,"humidity":40,"voltage":480,"rpm":55}"#,
            )),
            TransportEvent::Closed,
        ]);

        session
            .run(Arc::new(StubSource::ok()), Arc::new(feed))
            .await
            .unwrap();

        assert_eq!(
            status_texts(&sink.recorded()),
            vec![
                "Connected".to_string(),
                "Error".to_string(),
                "Closed".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_config_fetch_failure_halts_without_status_update() {
        let (session, sink) = session_with_sink();
        let feed = ScriptedFeed::new(vec![TransportEvent::Connected]);

        session
            .run(Arc::new(StubSource::failing()), Arc::new(feed))
            .await
            .unwrap();

        let instructions = sink.recorded();
        // Initial plots went out, then the machine halted; the status
        // indicator is only driven by transport callbacks.
        assert_eq!(instructions.len(), 8);
        assert!(status_texts(&instructions).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_message_drops_without_render() {
        let (session, sink) = session_with_sink();
        let feed = ScriptedFeed::new(vec![
            TransportEvent::Connected,
            TransportEvent::Message(Bytes::from_static(b"{\"temperature\":21}")),
            TransportEvent::Closed,
        ]);

        session
            .run(Arc::new(StubSource::ok()), Arc::new(feed))
            .await
            .unwrap();

        let instructions = sink.recorded();
        // Nothing beyond the initial plots and the two status updates.
        assert_eq!(instructions.len(), 10);
        let touched_history = instructions.iter().any(|i| {
            matches!(i, RenderInstruction::Update { surface, .. }
                if *surface == Metric::Temperature.history_surface())
        });
        assert!(!touched_history);
    }

    #[test]
    fn test_state_transitions() {
        let (mut session, _sink) = session_with_sink();
        assert_eq!(session.state(), SessionState::Idle);

        session.handle_event(TransportEvent::Connected);
        assert_eq!(session.state(), SessionState::Connected);

        session.handle_event(TransportEvent::Error("boom".to_string()));
        assert_eq!(session.state(), SessionState::Error);

        session.handle_event(TransportEvent::Closed);
        assert_eq!(session.state(), SessionState::Closed);
    }
}
