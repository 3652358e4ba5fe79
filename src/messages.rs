use tokio::sync::RwLock;

/// Ordered, append-only log of operational messages, shown to the user by
/// whatever front end sits on top. Pull-based: observers snapshot it, there
/// is no notification stream. Created once at startup and shared by `Arc`.
#[derive(Default)]
pub struct MessageLog {
    messages: RwLock<Vec<String>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, message: impl Into<String>) {
        self.messages.write().await.push(message.into());
    }

    pub async fn clear(&self) {
        self.messages.write().await.clear();
    }

    /// Snapshot of the log in insertion order.
    pub async fn messages(&self) -> Vec<String> {
        self.messages.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_insertion_order() {
        tokio_test::block_on(async {
            let log = MessageLog::new();
            log.add("first").await;
            log.add("second").await;
            log.add("second").await; // no dedup
            assert_eq!(log.messages().await, vec!["first", "second", "second"]);
        });
    }

    #[test]
    fn clear_empties_the_log() {
        tokio_test::block_on(async {
            let log = MessageLog::new();
            log.add("entry").await;
            log.clear().await;
            assert!(log.is_empty().await);
            assert_eq!(log.len().await, 0);
        });
    }
}
