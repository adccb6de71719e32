//! Best-effort location acquisition.
//!
//! The session asks a [`LocationSource`] once for the user's position and
//! proceeds without one if the source declines. Denial is not an error; it
//! simply leaves maps grounding unbiased.

use crate::types::Coordinates;
use async_trait::async_trait;

/// A one-shot, best-effort source of the user's position.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Return the current position, or `None` if unavailable or denied.
    /// Must not block indefinitely; the chat flow never waits on it.
    async fn current(&self) -> Option<Coordinates>;
}

/// Reads a position from `LIT_GUIDE_LAT` / `LIT_GUIDE_LON`.
///
/// The crate's stand-in for a platform location service: hosts that know
/// where the user is export the pair, everyone else gets unbiased grounding.
#[derive(Debug, Default)]
pub struct EnvLocation;

#[async_trait]
impl LocationSource for EnvLocation {
    async fn current(&self) -> Option<Coordinates> {
        let latitude = std::env::var("LIT_GUIDE_LAT").ok()?.trim().parse().ok()?;
        let longitude = std::env::var("LIT_GUIDE_LON").ok()?.trim().parse().ok()?;
        Some(Coordinates::new(latitude, longitude))
    }
}

/// Always reports the same position. For demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current(&self) -> Option<Coordinates> {
        Some(self.0)
    }
}

/// Never reports a position. The "permission denied" case.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    async fn current(&self) -> Option<Coordinates> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_location() {
        let source = FixedLocation(Coordinates::new(32.78, -96.80));
        let loc = source.current().await.unwrap();
        assert_eq!(loc.latitude, 32.78);
        assert_eq!(loc.longitude, -96.80);
    }

    #[tokio::test]
    async fn test_no_location() {
        assert!(NoLocation.current().await.is_none());
    }
}
