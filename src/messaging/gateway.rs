//! Publish/subscribe gateway seam
//!
//! The simulation never talks to a broker directly. It sees a [`ScoreSink`];
//! tilt samples reach it through a [`SampleCell`] that the gateway's
//! delivery side writes into.

use std::sync::Arc;

use super::sample::{AccelSample, SampleCell};
use crate::error::{DecodeError, GatewayError};
use crate::settings::BrokerConfig;
use crate::sim::{ScoreEvent, ScoreSink};

/// Broker client lifecycle
pub trait MessagingGateway {
    /// Open a clean session to the configured broker
    fn connect(&mut self) -> Result<(), GatewayError>;

    /// Route decoded tilt samples from the subscribe topic into `cell`
    fn subscribe(&mut self, cell: Arc<SampleCell>) -> Result<(), GatewayError>;

    /// Retained publish of `payload` to the publish topic
    fn publish(&mut self, payload: &str) -> Result<(), GatewayError>;

    /// Drop the subscription and close the session
    fn disconnect(&mut self) -> Result<(), GatewayError>;

    fn is_connected(&self) -> bool;
}

/// A message handed to the broker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: String,
    pub retained: bool,
}

/// Inbound side of a subscription.
///
/// Cheap to clone and `Send`, so a delivery thread can own one.
#[derive(Debug, Clone)]
pub struct Subscription {
    topic: String,
    cell: Arc<SampleCell>,
}

impl Subscription {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Decode `payload` and make it the latest sample.
    ///
    /// Malformed payloads are rejected here and never reach the cell.
    pub fn deliver(&self, payload: &[u8]) -> Result<AccelSample, DecodeError> {
        let sample = AccelSample::decode_bytes(payload)?;
        self.cell.store(sample);
        Ok(sample)
    }
}

/// In-process broker stand-in.
///
/// Records everything it publishes and lets callers inject inbound payloads
/// through its [`Subscription`].
#[derive(Debug)]
pub struct LoopbackGateway {
    config: BrokerConfig,
    client_id: Option<String>,
    subscription: Option<Subscription>,
    published: Vec<PublishedMessage>,
}

impl LoopbackGateway {
    pub fn new(config: BrokerConfig) -> Self {
        Self {
            config,
            client_id: None,
            subscription: None,
            published: Vec::new(),
        }
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    /// Client id of the open session
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Inbound handle, once subscribed
    pub fn subscription(&self) -> Option<Subscription> {
        self.subscription.clone()
    }

    /// Deliver one inbound payload, logging and dropping it if malformed.
    ///
    /// Returns true if the sample was accepted.
    pub fn deliver(&self, payload: &[u8]) -> bool {
        let Some(sub) = &self.subscription else {
            log::warn!("Inbound message dropped: no subscription");
            return false;
        };
        match sub.deliver(payload) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Malformed payload on {}: {}", sub.topic, e);
                false
            }
        }
    }

    pub fn published(&self) -> &[PublishedMessage] {
        &self.published
    }

    fn ensure_connected(&self) -> Result<(), GatewayError> {
        if self.client_id.is_some() {
            Ok(())
        } else {
            Err(GatewayError::NotConnected(self.config.uri()))
        }
    }
}

impl MessagingGateway for LoopbackGateway {
    fn connect(&mut self) -> Result<(), GatewayError> {
        let broker = self.config.uri();
        if self.config.host.trim().is_empty() {
            return Err(GatewayError::Connect {
                broker,
                reason: "empty host".to_string(),
            });
        }

        let client_id = format!("tilt-herd-{:08x}", rand::random::<u32>());
        log::info!("Connected to broker {} as {}", broker, client_id);
        self.client_id = Some(client_id);
        Ok(())
    }

    fn subscribe(&mut self, cell: Arc<SampleCell>) -> Result<(), GatewayError> {
        self.ensure_connected()?;
        let topic = self.config.sub_topic.clone();
        log::info!("Subscribed to topic {} (qos {})", topic, self.config.qos);
        self.subscription = Some(Subscription { topic, cell });
        Ok(())
    }

    fn publish(&mut self, payload: &str) -> Result<(), GatewayError> {
        self.ensure_connected()?;
        let message = PublishedMessage {
            topic: self.config.pub_topic.clone(),
            payload: payload.to_string(),
            retained: true,
        };
        log::debug!("Published to {}: {}", message.topic, message.payload);
        self.published.push(message);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), GatewayError> {
        self.ensure_connected()?;
        if let Some(sub) = self.subscription.take() {
            log::info!("Unsubscribed from topic {}", sub.topic);
        }
        self.client_id = None;
        log::info!("Disconnected from broker {}", self.config.uri());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.client_id.is_some()
    }
}

impl ScoreSink for LoopbackGateway {
    fn publish_score(&mut self, event: &ScoreEvent) -> Result<(), GatewayError> {
        self.publish(&event.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> LoopbackGateway {
        let mut gw = LoopbackGateway::new(BrokerConfig::default());
        gw.connect().unwrap();
        gw
    }

    #[test]
    fn test_connect_and_disconnect() {
        let mut gw = LoopbackGateway::new(BrokerConfig::default());
        assert!(!gw.is_connected());
        gw.connect().unwrap();
        assert!(gw.is_connected());
        assert!(gw.client_id().unwrap().starts_with("tilt-herd-"));
        gw.disconnect().unwrap();
        assert!(!gw.is_connected());
    }

    #[test]
    fn test_connect_rejects_empty_host() {
        let mut gw = LoopbackGateway::new(BrokerConfig {
            host: " ".to_string(),
            ..Default::default()
        });
        assert!(matches!(gw.connect(), Err(GatewayError::Connect { .. })));
    }

    #[test]
    fn test_publish_is_retained_on_pub_topic() {
        let mut gw = connected();
        gw.publish_score(&ScoreEvent { score: 3 }).unwrap();

        assert_eq!(
            gw.published(),
            &[PublishedMessage {
                topic: "StA/message".to_string(),
                payload: "Scored, 3".to_string(),
                retained: true,
            }]
        );
    }

    #[test]
    fn test_publish_requires_connection() {
        let mut gw = LoopbackGateway::new(BrokerConfig::default());
        assert!(matches!(
            gw.publish("Scored, 1"),
            Err(GatewayError::NotConnected(_))
        ));
        assert!(gw.published().is_empty());
    }

    #[test]
    fn test_inbound_samples_reach_cell() {
        let mut gw = connected();
        let cell = Arc::new(SampleCell::default());
        gw.subscribe(Arc::clone(&cell)).unwrap();

        assert!(gw.deliver(b"1.25,-3.5"));
        assert_eq!(cell.load(), AccelSample::new(1.25, -3.5));

        // Malformed payload leaves the previous sample in place
        assert!(!gw.deliver(b"1.25"));
        assert!(!gw.deliver(b"x,y"));
        assert!(!gw.deliver(b"NaN,0"));
        assert!(!gw.deliver(b"0,inf"));
        assert_eq!(cell.load(), AccelSample::new(1.25, -3.5));
    }

    #[test]
    fn test_subscription_from_other_thread() {
        let mut gw = connected();
        let cell = Arc::new(SampleCell::default());
        gw.subscribe(Arc::clone(&cell)).unwrap();
        let sub = gw.subscription().unwrap();
        assert_eq!(sub.topic(), "StA/data");

        std::thread::spawn(move || sub.deliver(b"0.5,0.25"))
            .join()
            .unwrap()
            .unwrap();
        assert_eq!(cell.load(), AccelSample::new(0.5, 0.25));
    }

    #[test]
    fn test_disconnect_drops_subscription() {
        let mut gw = connected();
        gw.subscribe(Arc::new(SampleCell::default())).unwrap();
        gw.disconnect().unwrap();
        assert!(gw.subscription().is_none());
        assert!(!gw.deliver(b"1,1"));
    }
}
