//! One complete run: load the group, pair it, deliver every assignment.

use std::path::Path;

use santa_pairing::{PairingEngine, RandomSource, ThreadRandom};
use santa_roster::ParticipantLoader;
use santa_types::ParticipantSet;

use crate::error::NotifyError;
use crate::mailer::Mailer;
use crate::template::MessageTemplate;

/// Outcome of a run in which every notification was accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub backend: String,
}

pub struct Dispatcher {
    loader: Box<dyn ParticipantLoader>,
    engine: PairingEngine,
    random: Box<dyn RandomSource>,
    template: MessageTemplate,
    mailer: Box<dyn Mailer>,
}

impl Dispatcher {
    /// Create a dispatcher with the default attempt budget and the thread RNG.
    pub fn new(
        loader: Box<dyn ParticipantLoader>,
        template: MessageTemplate,
        mailer: Box<dyn Mailer>,
    ) -> Self {
        Self {
            loader,
            engine: PairingEngine::new(),
            random: Box::new(ThreadRandom),
            template,
            mailer,
        }
    }

    pub fn with_engine(mut self, engine: PairingEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Load participants from `path`, then [`deliver`](Self::deliver) to them.
    pub async fn run(&self, path: &Path) -> Result<DeliveryReport, NotifyError> {
        let participants = self.loader.load(path)?;
        self.deliver(&participants).await
    }

    /// Pair `participants` and send each gifter their assignment.
    ///
    /// Pairing failure aborts before anything is sent. Once sending starts,
    /// a failed notification does not stop the others; the run still
    /// returns [`NotifyError::Delivery`] if any of them failed.
    pub async fn deliver(&self, participants: &ParticipantSet) -> Result<DeliveryReport, NotifyError> {
        let assignment = self.engine.pair(self.random.as_ref(), participants)?;
        assignment.validate(participants)?;

        let total = assignment.len();
        let mut delivered = 0;
        let mut failures = Vec::new();

        for (gifter, giftee) in assignment.pairs(participants) {
            let sent = match self.template.notification(gifter, giftee) {
                Ok(notification) => self.mailer.deliver(&notification).await,
                Err(e) => Err(e),
            };
            match sent {
                Ok(receipt) => {
                    delivered += 1;
                    tracing::debug!(
                        gifter = %gifter.id,
                        message_id = receipt.message_id.as_deref().unwrap_or("-"),
                        "assignment delivered"
                    );
                }
                Err(e) => {
                    tracing::warn!(gifter = %gifter.id, error = %e, "assignment delivery failed");
                    failures.push(e);
                }
            }
        }

        if let Some(first) = failures.first() {
            return Err(NotifyError::Delivery {
                failed: failures.len(),
                total,
                first: first.to_string(),
            });
        }

        tracing::info!(delivered, backend = self.mailer.name(), "all assignments delivered");
        Ok(DeliveryReport {
            delivered,
            backend: self.mailer.name().to_string(),
        })
    }
}
