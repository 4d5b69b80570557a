use async_trait::async_trait;
use sharenet_core::spot::Spot;

use crate::client::SpotsError;

/// Anything that can produce the current list of spots.
#[async_trait]
pub trait SpotSource: Send + Sync {
    /// Fetch every spot currently listed upstream, in upstream order.
    async fn fetch_spots(&self) -> Result<Vec<Spot>, SpotsError>;
}
