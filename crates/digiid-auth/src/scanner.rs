//! Debounced scan session.
//!
//! The platform barcode decoder runs on its own capture queue and pushes
//! decoded frame strings into a channel; the session consumes them on the
//! caller's task. A camera pointed at a QR code decodes the same payload on
//! every frame, so repeats of the last payload are dropped before parsing.
//! Dropping the session (or the decoder closing its sender) cancels only the
//! scan; it never touches an HTTP exchange already in flight.

use digiid_types::{AuthRequest, ParseError};
use tokio::sync::mpsc;

/// Result of processing one debounced frame.
#[derive(Debug)]
pub enum FrameResult {
    /// The payload parsed into an authentication request.
    Accepted(AuthRequest),
    /// The payload was new but did not parse.
    Rejected(ParseError),
}

/// Consumes decoded frame payloads until one parses.
pub struct ScanSession {
    frames: mpsc::Receiver<String>,
    last_payload: Option<String>,
}

impl ScanSession {
    /// Create a session over the decoder's output channel.
    pub fn new(frames: mpsc::Receiver<String>) -> Self {
        Self {
            frames,
            last_payload: None,
        }
    }

    /// Process frames until a payload differs from the previous one, then
    /// parse it. Returns `None` when the decoder side is closed.
    pub async fn next_frame(&mut self) -> Option<FrameResult> {
        loop {
            let payload = self.frames.recv().await?;
            if self.last_payload.as_deref() == Some(payload.as_str()) {
                continue;
            }
            self.last_payload = Some(payload.clone());

            match AuthRequest::parse(&payload) {
                Ok(request) => {
                    log::debug!("scan accepted for domain {}", request.domain);
                    return Some(FrameResult::Accepted(request));
                }
                Err(e) => {
                    log::debug!("scan rejected: {}", e);
                    return Some(FrameResult::Rejected(e));
                }
            }
        }
    }

    /// Run the session to the first accepted request.
    ///
    /// Rejected payloads are skipped (the user keeps aiming the camera);
    /// `None` means the scan was cancelled before anything parsed.
    pub async fn next_request(&mut self) -> Option<AuthRequest> {
        loop {
            match self.next_frame().await? {
                FrameResult::Accepted(request) => return Some(request),
                FrameResult::Rejected(_) => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_repeated_frames_do_not_retrigger() {
        let (tx, rx) = mpsc::channel(8);
        let mut session = ScanSession::new(rx);

        // Same invalid payload decoded over several frames, then a valid one.
        for _ in 0..3 {
            tx.send("garbage".to_string()).await.unwrap();
        }
        tx.send("digiid://example.com/cb?x=1".to_string()).await.unwrap();

        let first = session.next_frame().await.unwrap();
        assert!(matches!(first, FrameResult::Rejected(_)));

        // The two repeats are skipped; the next result is the valid payload.
        let second = session.next_frame().await.unwrap();
        match second {
            FrameResult::Accepted(req) => assert_eq!(req.domain, "example.com"),
            FrameResult::Rejected(e) => panic!("expected accept, got {}", e),
        }
    }

    #[tokio::test]
    async fn test_next_request_skips_rejects() {
        let (tx, rx) = mpsc::channel(8);
        let mut session = ScanSession::new(rx);

        tx.send("not a uri".to_string()).await.unwrap();
        tx.send("https://wrong.scheme/cb?x=1".to_string()).await.unwrap();
        tx.send("digiid://demo.example.com/cb?x=9".to_string()).await.unwrap();

        let request = session.next_request().await.unwrap();
        assert_eq!(request.domain, "demo.example.com");
        assert_eq!(request.nonce, "9");
    }

    #[tokio::test]
    async fn test_closed_channel_cancels_scan() {
        let (tx, rx) = mpsc::channel::<String>(1);
        let mut session = ScanSession::new(rx);
        drop(tx);
        assert!(session.next_request().await.is_none());
    }

    #[tokio::test]
    async fn test_alternating_payloads_each_trigger() {
        let (tx, rx) = mpsc::channel(8);
        let mut session = ScanSession::new(rx);

        tx.send("digiid://a.example.com/cb?x=1".to_string()).await.unwrap();
        tx.send("digiid://b.example.com/cb?x=2".to_string()).await.unwrap();

        let a = session.next_request().await.unwrap();
        let b = session.next_request().await.unwrap();
        assert_eq!(a.domain, "a.example.com");
        assert_eq!(b.domain, "b.example.com");
    }
}
