use std::sync::{Arc, Mutex};

/// One RGBA camera frame, tightly packed (`width * 4` bytes per row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Default)]
struct Latest {
    sequence: u64,
    frame: Option<PreviewFrame>,
}

/// Latest-frame mailbox between the camera pipeline and the front-end.
///
/// The camera overwrites, the UI polls; older frames are simply dropped.
#[derive(Clone, Default)]
pub struct PreviewSink {
    latest: Arc<Mutex<Latest>>,
}

impl PreviewSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, frame: PreviewFrame) {
        if let Ok(mut latest) = self.latest.lock() {
            latest.sequence += 1;
            latest.frame = Some(frame);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut latest) = self.latest.lock() {
            latest.sequence += 1;
            latest.frame = None;
        }
    }

    /// Returns the current frame if it changed after `seen`.
    ///
    /// `Some((seq, None))` means the preview was cleared.
    pub fn newer_than(&self, seen: u64) -> Option<(u64, Option<PreviewFrame>)> {
        let latest = self.latest.lock().ok()?;
        if latest.sequence == seen {
            return None;
        }
        Some((latest.sequence, latest.frame.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(fill: u8) -> PreviewFrame {
        PreviewFrame {
            width: 2,
            height: 1,
            rgba: vec![fill; 8],
        }
    }

    #[test]
    fn test_only_new_frames_are_returned() {
        let sink = PreviewSink::new();
        assert!(sink.newer_than(0).is_none());

        sink.publish(frame(1));
        sink.publish(frame(2));
        let (seq, latest) = sink.newer_than(0).unwrap();
        assert_eq!(latest, Some(frame(2)));
        assert!(sink.newer_than(seq).is_none());

        sink.clear();
        let (_, cleared) = sink.newer_than(seq).unwrap();
        assert!(cleared.is_none());
    }
}
