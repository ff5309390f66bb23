// MQTT transport adapter - bridges the broker event loop onto the session queue
use crate::application::session::{TelemetryFeed, TransportEvent};
use crate::infrastructure::config::ConnectionConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use rumqttc::{AsyncClient, ConnectionError, Event, MqttOptions, Packet, QoS};
use std::time::Duration;
use tokio::sync::mpsc;

const DEFAULT_MQTT_PORT: u16 = 1883;
const KEEP_ALIVE: Duration = Duration::from_secs(30);
const RECONNECT_PAUSE: Duration = Duration::from_secs(1);

pub struct MqttFeed;

impl MqttFeed {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TelemetryFeed for MqttFeed {
    async fn start(
        &self,
        connection: &ConnectionConfig,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<()> {
        let (host, port) = parse_server(&connection.mqtt_server)?;
        let client_id = format!("sensor-dashboard-{}", std::process::id());

        let mut options = MqttOptions::new(client_id, host, port);
        options.set_keep_alive(KEEP_ALIVE);

        let (client, mut event_loop) = AsyncClient::new(options, 10);

        // Issued before CONNACK arrives; rumqttc queues the SUBSCRIBE
        // until the session is up, so the subscription is not lost.
        client
            .subscribe(&connection.mqtt_topic, QoS::AtMostOnce)
            .await
            .context("failed to issue subscribe")?;

        let topic = connection.mqtt_topic.clone();
        tokio::spawn(async move {
            // The client handle must outlive the poll loop or the request
            // channel closes and the subscription dies with it.
            let mut seen_connack = false;
            loop {
                match classify(event_loop.poll().await, &mut seen_connack) {
                    LoopAction::Connected { resubscribe } => {
                        // A reconnected broker session starts with no
                        // subscriptions; subscribe again before reporting
                        // Connected or no data ever flows.
                        if resubscribe {
                            if let Err(e) = client.subscribe(&topic, QoS::AtMostOnce).await {
                                tracing::error!("failed to resubscribe after reconnect: {}", e);
                                let _ = events.send(TransportEvent::Error(e.to_string())).await;
                                continue;
                            }
                        }
                        if events.send(TransportEvent::Connected).await.is_err() {
                            break;
                        }
                    }
                    LoopAction::Deliver(payload) => {
                        if events
                            .send(TransportEvent::Message(payload))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    LoopAction::Stop => {
                        let _ = events.send(TransportEvent::Closed).await;
                        break;
                    }
                    LoopAction::Nothing => {}
                    LoopAction::Fail(reason) => {
                        if events
                            .send(TransportEvent::Error(reason))
                            .await
                            .is_err()
                        {
                            break;
                        }
                        // The event loop reconnects on the next poll; pause
                        // so a dead broker does not spin this task.
                        tokio::time::sleep(RECONNECT_PAUSE).await;
                    }
                }
            }
        });

        Ok(())
    }
}

/// What the poll loop does with one event-loop result.
#[derive(Debug, PartialEq)]
enum LoopAction {
    Connected { resubscribe: bool },
    Deliver(Bytes),
    Fail(String),
    Stop,
    Nothing,
}

/// Map one event-loop result onto a loop action. Every connect
/// acknowledgment after the first marks a fresh broker session that needs
/// its subscription restored.
fn classify(result: Result<Event, ConnectionError>, seen_connack: &mut bool) -> LoopAction {
    match result {
        Ok(Event::Incoming(Packet::ConnAck(_))) => {
            let resubscribe = *seen_connack;
            *seen_connack = true;
            LoopAction::Connected { resubscribe }
        }
        Ok(Event::Incoming(Packet::Publish(publish))) => LoopAction::Deliver(publish.payload),
        Ok(Event::Incoming(Packet::Disconnect)) => LoopAction::Stop,
        Ok(_) => LoopAction::Nothing,
        Err(e) => LoopAction::Fail(e.to_string()),
    }
}

/// Accepts "host", "host:port" and the scheme-prefixed forms the
/// connection-details endpoint hands out.
fn parse_server(server: &str) -> Result<(String, u16)> {
    let trimmed = server
        .trim()
        .trim_start_matches("mqtt://")
        .trim_start_matches("tcp://")
        .trim_start_matches("ws://");

    let (host, port) = match trimmed.rsplit_once(':') {
        Some((host, port)) => {
            let port: u16 = port
                .parse()
                .with_context(|| format!("invalid port in server address `{}`", server))?;
            (host, port)
        }
        None => (trimmed, DEFAULT_MQTT_PORT),
    };

    if host.is_empty() {
        anyhow::bail!("empty host in server address `{}`", server);
    }
    Ok((host.to_string(), port))
}
